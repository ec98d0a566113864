//! Error handling.
//!
//! Failures are categorized into:
//! - **Initialization errors**: logger, HTTP client or endpoint setup failed
//! - **Submit errors**: the analysis request produced no results, either
//!   because no response arrived (transport/decode) or because the backend
//!   rejected it (`success: false`)
//!
//! Hostname resolution failures are absorbed inside the resolver and never
//! surface here.

mod types;

// Re-export public API
pub use types::{InitializationError, SubmitError};
