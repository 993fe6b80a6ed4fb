//! Failure taxonomy for a chat submission.
//!
//! Empty input is not represented here: it is rejected by the reducer
//! before a request exists and never becomes user-visible. Everything
//! else ends up rendered from `last_error` with the session back at
//! idle, so each variant's `Display` is the user-facing message.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// No credential is configured. Surfaced without a network attempt.
    #[error("credential missing")]
    Configuration,

    /// The network request failed or the endpoint returned an error.
    #[error("{0}")]
    Transport(String),

    /// A success response that is missing the generated text.
    #[error("response missing generated text")]
    MalformedResponse,
}
