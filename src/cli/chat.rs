use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::core::AppConfig;
use crate::gemini::GeminiClient;
use crate::session::{Coordinator, Role};

pub async fn run() -> Result<()> {
    let mut rl = DefaultEditor::new().expect("Editor failed");

    let config = AppConfig::default();
    let generator = GeminiClient::new(
        &config.api_hostname,
        config.api_key.as_deref().unwrap_or_default(),
        &config.model,
    );
    let coordinator = Coordinator::new(
        Arc::new(generator),
        &config.system_message,
        config.api_key.is_some(),
    );

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                coordinator.update_pending_input(&line).await;
                let view = coordinator.submit(&line).await;

                if let Some(err) = view.last_error {
                    println!("Error: {}", err);
                    continue;
                }
                if let Some(turn) = view
                    .transcript
                    .iter()
                    .rev()
                    .find(|t| t.role == Role::Assistant)
                {
                    println!("{}", turn.content);
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
