//! Client for a `generateContent` style text endpoint.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{OutboundRequest, SessionError, TextGenerator};

/// Sampling settings sent with every request. Fixed by design; there is
/// no per-request tuning surface.
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Part {
    pub text: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// The system instruction in the structured form the endpoint requires.
///
/// The endpoint silently ignores (or rejects) a bare string in this
/// position, so the field is unrepresentable as one: the only way to
/// build an instruction is `from_text`, which wraps it in parts.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(transparent)]
pub struct SystemInstruction(Content);

impl SystemInstruction {
    pub fn from_text(text: &str) -> Self {
        Self(Content::from_text(text))
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

/// Request the next generated text for a single user turn.
///
/// Each call is stateless from the endpoint's perspective; only the new
/// user turn is sent. The request carries no timeout, so a hung endpoint
/// blocks the caller indefinitely.
pub async fn generate_content(
    user_text: &str,
    system_instruction: SystemInstruction,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<String, SessionError> {
    let payload = GenerateContentRequest {
        contents: vec![Content::from_text(user_text)],
        system_instruction,
        generation_config: GenerationConfig::default(),
    };
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        api_hostname.trim_end_matches("/"),
        model
    );
    let response = reqwest::Client::new()
        .post(url)
        .query(&[("key", api_key)])
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))?;

    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| SessionError::Transport(e.to_string()))?;

    if !status.is_success() {
        // Prefer the provider-supplied message when there is one
        let message = body["error"]["message"]
            .as_str()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("endpoint returned {}", status));
        return Err(SessionError::Transport(message));
    }

    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.to_string())
        .ok_or(SessionError::MalformedResponse)
}

/// The production `TextGenerator` backed by the hosted endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    api_hostname: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &OutboundRequest) -> Result<String, SessionError> {
        generate_content(
            &request.user_text,
            SystemInstruction::from_text(&request.system_instruction),
            &self.api_hostname,
            &self.api_key,
            &self.model,
        )
        .await
    }
}
