//! The chat session state machine: an explicit state object, a pure
//! transition function, and a coordinator that gates one request at a
//! time against the text generation endpoint.

pub mod coordinator;
pub mod error;
pub mod models;
pub mod reducer;

pub use coordinator::{Coordinator, TextGenerator};
pub use error::SessionError;
pub use models::{Role, SessionState, SessionView, Status, Transcript, Turn};
pub use reducer::{Context, Event, OutboundRequest, apply};
