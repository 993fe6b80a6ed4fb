//! Public API types
//!
//! Route handlers here are infallible by design: every submission
//! failure lands in the session's `last_error` rather than an error
//! response, so there is no API-level error type to convert.

// Re-export public types from each route

pub mod session {
    pub use crate::api::routes::session::public::*;
}
