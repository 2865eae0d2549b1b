//! Admin session gating for the HTTP layer

pub mod extractor;

pub use extractor::{AdminError, AdminResult, AdminSession, bearer_token, redirect_to_login};
