//! Pure transitions for the session state machine.
//!
//! Every mutation of `SessionState` happens in `apply`. The coordinator
//! feeds it events and performs the single side effect it can return,
//! which keeps the machine testable without any I/O in the loop.
use super::error::SessionError;
use super::models::{SessionState, Status, Turn};

/// Environment facts the transitions depend on but do not own.
#[derive(Clone, Copy, Debug)]
pub struct Context {
    pub credential_present: bool,
}

#[derive(Debug)]
pub enum Event {
    /// The user submitted text for a new turn.
    Submit(String),
    /// The in-flight request resolved with generated text.
    Resolved(String),
    /// The in-flight request failed.
    Failed(SessionError),
    /// Replace the system instruction for subsequent submissions.
    SetSystemInstruction(String),
    /// The input box content changed.
    SetPendingInput(String),
}

/// The request the coordinator should dispatch to the endpoint. Only the
/// new user turn is sent; prior transcript is not resent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
    pub user_text: String,
    pub system_instruction: String,
}

pub fn apply(state: &mut SessionState, ctx: Context, event: Event) -> Option<OutboundRequest> {
    match event {
        Event::Submit(text) => {
            // One request at a time. A submit while sending is a silent
            // no-op; the UI disables its send control as a second layer
            // of the same guard.
            if state.status == Status::Sending {
                return None;
            }
            if text.trim().is_empty() {
                return None;
            }
            if !ctx.credential_present {
                state.last_error = Some(SessionError::Configuration.to_string());
                return None;
            }

            // The user turn is committed before the call, so a failed
            // response still leaves the question visible in history.
            state.transcript.push(Turn::user(&text));
            state.pending_input.clear();
            state.last_error = None;
            state.status = Status::Sending;

            Some(OutboundRequest {
                user_text: text,
                system_instruction: state.system_instruction.clone(),
            })
        }
        Event::Resolved(text) => {
            if state.status != Status::Sending {
                return None;
            }
            state.transcript.push(Turn::assistant(&text));
            state.status = Status::Idle;
            None
        }
        Event::Failed(err) => {
            if state.status != Status::Sending {
                return None;
            }
            // The transcript is not amended; no partial or error turn.
            state.last_error = Some(err.to_string());
            state.status = Status::Idle;
            None
        }
        Event::SetSystemInstruction(text) => {
            state.system_instruction = text;
            None
        }
        Event::SetPendingInput(text) => {
            state.pending_input = text;
            None
        }
    }
}
