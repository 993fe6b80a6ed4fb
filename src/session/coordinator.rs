//! The request coordinator: gates one-at-a-time submission and drives
//! the state machine through a full request lifecycle.
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::error::SessionError;
use super::models::{SessionState, SessionView};
use super::reducer::{self, Context, Event, OutboundRequest};

/// The seam to the external text generation endpoint. The coordinator
/// never talks to the network directly, which keeps the lifecycle
/// testable and leaves timeout or cancellation wrappers as a drop-in
/// extension.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &OutboundRequest) -> Result<String, SessionError>;
}

/// Owns the session state and serializes access to it. Cheap to clone;
/// clones share the same session.
#[derive(Clone)]
pub struct Coordinator {
    state: Arc<Mutex<SessionState>>,
    ctx: Context,
    generator: Arc<dyn TextGenerator>,
}

impl Coordinator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        system_instruction: &str,
        credential_present: bool,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(system_instruction))),
            ctx: Context { credential_present },
            generator,
        }
    }

    /// Read-only snapshot for the rendering layer.
    pub async fn snapshot(&self) -> SessionView {
        self.state.lock().await.view()
    }

    /// Submit user text as the next turn and resolve the response.
    ///
    /// The transition to sending happens synchronously under the lock,
    /// before the endpoint call, so a second submit that arrives while
    /// the first is in flight observes the sending state and becomes a
    /// no-op. The lock is never held across the network await.
    pub async fn submit(&self, text: &str) -> SessionView {
        let request = {
            let mut state = self.state.lock().await;
            reducer::apply(&mut state, self.ctx, Event::Submit(text.to_string()))
        };

        let Some(request) = request else {
            return self.snapshot().await;
        };

        let result = self.generator.generate(&request).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(text) => {
                reducer::apply(&mut state, self.ctx, Event::Resolved(text));
            }
            Err(err) => {
                tracing::error!("Chat request failed: {}", err);
                reducer::apply(&mut state, self.ctx, Event::Failed(err));
            }
        }
        state.view()
    }

    /// Replace the system instruction. Takes effect on the next submit;
    /// an in-flight request is unaffected because its instruction was
    /// captured when the request was built.
    pub async fn update_system_instruction(&self, text: &str) -> SessionView {
        let mut state = self.state.lock().await;
        reducer::apply(
            &mut state,
            self.ctx,
            Event::SetSystemInstruction(text.to_string()),
        );
        state.view()
    }

    /// Track the input box content so the view stays authoritative.
    pub async fn update_pending_input(&self, text: &str) -> SessionView {
        let mut state = self.state.lock().await;
        reducer::apply(
            &mut state,
            self.ctx,
            Event::SetPendingInput(text.to_string()),
        );
        state.view()
    }
}
