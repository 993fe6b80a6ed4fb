//! Public types for the session API
use serde::{Deserialize, Serialize};

pub use crate::session::{Role, SessionView, Status, Turn};

#[derive(Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct SystemInstructionRequest {
    pub instruction: String,
}

#[derive(Serialize, Deserialize)]
pub struct PendingInputRequest {
    pub input: String,
}
