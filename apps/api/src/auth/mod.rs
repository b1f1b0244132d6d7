// User identity and profile.
// Identity is asserted upstream: the gateway authenticates the caller and
// forwards the user's id in `X-User-Id`. This module only resolves it.

pub mod extractor;
pub mod handlers;
pub mod store;
pub mod validation;

pub use extractor::AuthUser;
