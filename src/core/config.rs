use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_hostname: String,
    /// Missing credential is detectable and non-fatal so the session can
    /// surface it distinctly from a network failure.
    pub api_key: Option<String>,
    pub model: String,
    pub system_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_hostname = env::var("PARLEY_API_HOSTNAME")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let api_key = env::var("PARLEY_API_KEY").ok();
        let model = env::var("PARLEY_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());
        let system_message = env::var("PARLEY_SYSTEM_MESSAGE")
            .unwrap_or_else(|_| "You are a helpful assistant.".to_string());

        Self {
            api_hostname,
            api_key,
            model,
            system_message,
        }
    }
}
