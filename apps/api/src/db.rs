use anyhow::{Context, Result};
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use crate::models::{interview::INTERVIEWS, job::JOBS, resume::RESUMES, user::USERS};

/// Connects to MongoDB, verifies the server answers a ping and returns the database.
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    info!("Connecting to MongoDB...");

    let mut options = ClientOptions::parse(uri)
        .await
        .context("MONGODB_URI is not a valid connection string")?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 }, None)
        .await
        .context("MongoDB did not answer ping")?;

    info!("MongoDB connection established (database: {database})");
    Ok(db)
}

/// Creates the indexes every query path relies on. Idempotent.
pub async fn ensure_indexes(db: &Database) -> Result<()> {
    db.collection::<Document>(USERS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            None,
        )
        .await?;

    for collection in [RESUMES, INTERVIEWS] {
        db.collection::<Document>(collection)
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user": 1, "createdAt": -1 })
                    .build(),
                None,
            )
            .await?;
    }

    db.collection::<Document>(JOBS)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "user": 1, "updatedAt": -1 })
                .build(),
            None,
        )
        .await?;

    info!("MongoDB indexes ensured");
    Ok(())
}
