use crate::config::ProviderConfig;
use crate::error::TransportError;
use crate::providers::ChatProvider;
use crate::CookAlongError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};

/// OpenAI-compatible chat-completion client
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    ///
    /// The request deadline is enforced by the caller, so the client itself
    /// has no timeout.
    pub fn new(config: &ProviderConfig) -> Result<Self, CookAlongError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CookAlongError::Validation(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(OpenAIProvider {
            client: Client::new(),
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt: config.system_message().map(String::from),
        })
    }

    #[doc(hidden)]
    pub fn with_endpoint(api_key: String, endpoint: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            endpoint,
            model,
            temperature: 0.7,
            max_tokens: 1000,
            system_prompt: None,
        }
    }

    fn messages(&self, prompt: &str) -> Vec<Value> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": prompt}));
        messages
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CookAlongError> {
        debug!("Sending chat completion request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": self.messages(prompt),
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        debug!("Chat completion response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Chat completion error response: {}", body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            }
            .into());
        }

        let body = response.text().await?;
        debug!("Chat completion response body: {}", body);

        let content = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| {
                value["choices"][0]["message"]["content"]
                    .as_str()
                    .map(String::from)
            })
            .unwrap_or_default();

        Ok(content)
    }
}
