//! PDF text extraction. Parsing is CPU-bound and runs on the blocking pool.

use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

/// Below this many characters the upload is treated as a scanned/image PDF.
pub const MIN_TEXT_CHARS: usize = 50;

const PARSE_FAILURE: &str =
    "Failed to parse PDF. Please make sure the file is a valid PDF with text content.";

/// True when the upload declares itself a PDF by content type or extension.
pub fn is_pdf(content_type: Option<&str>, file_name: &str) -> bool {
    let by_type = content_type
        .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    let by_name = file_name.to_ascii_lowercase().ends_with(".pdf");
    by_type || by_name
}

/// Extracts and normalizes the text layer of a PDF.
pub async fn extract_text(bytes: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await;

    let raw = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF parsing error: {e}");
            return Err(AppError::UnprocessableEntity(PARSE_FAILURE.to_string()));
        }
        // pdf-extract panics on some malformed files
        Err(e) => {
            warn!("PDF parser aborted: {e}");
            return Err(AppError::UnprocessableEntity(PARSE_FAILURE.to_string()));
        }
    };

    Ok(normalize_text(&raw))
}

/// Strips trailing whitespace on every line and collapses runs of blank lines.
pub fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut blank_run = 0;
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}

pub fn ensure_enough_text(text: &str) -> Result<(), AppError> {
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::Validation(
            "Could not extract enough text from PDF. Make sure it contains selectable text."
                .to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_type_or_name() {
        assert!(is_pdf(Some("application/pdf"), "resume"));
        assert!(is_pdf(Some("application/octet-stream"), "Resume.PDF"));
        assert!(is_pdf(None, "cv.pdf"));
        assert!(!is_pdf(Some("image/png"), "cv.png"));
        assert!(!is_pdf(None, "cv.docx"));
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let raw = "  Jane Doe   \n\n\n\nSoftware Engineer  \n   \n\nRust, Go\n\n";
        assert_eq!(
            normalize_text(raw),
            "Jane Doe\n\nSoftware Engineer\n\nRust, Go"
        );
    }

    #[test]
    fn test_short_text_rejected() {
        assert!(matches!(
            ensure_enough_text("Jane Doe"),
            Err(AppError::Validation(_))
        ));
        assert!(ensure_enough_text(&"x".repeat(MIN_TEXT_CHARS)).is_ok());
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_unprocessable() {
        let result = extract_text(Bytes::from_static(b"definitely not a pdf")).await;
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }
}
