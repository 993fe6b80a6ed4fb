//! The core models for managing a stateful chat with an LLM.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One message in the conversation. Immutable once created.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// Append-only conversation history. There is no way to edit, remove,
/// or reorder past turns.
#[derive(Default, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "sending")]
    Sending,
}

/// The session's complete mutable state. Owned exclusively by the
/// coordinator; every change goes through `reducer::apply`.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub(crate) transcript: Transcript,
    pub(crate) pending_input: String,
    pub(crate) status: Status,
    pub(crate) last_error: Option<String>,
    pub(crate) system_instruction: String,
}

impl SessionState {
    pub fn new(system_instruction: &str) -> Self {
        Self {
            transcript: Transcript::new(),
            pending_input: String::new(),
            status: Status::Idle,
            last_error: None,
            system_instruction: system_instruction.to_string(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Read-only view for the rendering layer. Renderers only ever see
    /// this snapshot, never the state itself.
    pub fn view(&self) -> SessionView {
        SessionView {
            transcript: self.transcript.turns().to_vec(),
            pending_input: self.pending_input.clone(),
            status: self.status,
            last_error: self.last_error.clone(),
            system_instruction: self.system_instruction.clone(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SessionView {
    pub transcript: Vec<Turn>,
    pub pending_input: String,
    pub status: Status,
    pub last_error: Option<String>,
    pub system_instruction: String,
}
