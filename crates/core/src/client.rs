use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::{
    config::StudioConfig,
    error::{Result, ScriptflowError},
    provider::{Provider, WireFormat},
    schema::Schema,
};

/// One structured-output call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub schema: Schema,
    /// Name reported to providers that require one for `json_schema`.
    pub schema_name: &'static str,
    pub system_instruction: Option<String>,
    pub thinking_budget: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, schema: Schema, schema_name: &'static str) -> Self {
        Self {
            prompt: prompt.into(),
            schema,
            schema_name,
            system_instruction: None,
            thinking_budget: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// Submit a prompt with a response schema and get parsed JSON back.
///
/// Single attempt. Missing text and unparseable text are both errors.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<Value>;
}

pub struct HttpGenerationClient {
    http: reqwest::Client,
    provider: Provider,
    model: String,
    api_url: String,
    api_key: Option<String>,
}

impl HttpGenerationClient {
    /// Builds the client even when no key is configured; calls then fail
    /// with [`ScriptflowError::MissingApiKey`].
    pub fn new(config: &StudioConfig) -> Result<Self> {
        let api_key = match config.provider.validate_api_key() {
            Ok(key) => Some(key),
            Err(err) => {
                warn!("{err}; generation requests will fail until it is set");
                None
            }
        };
        let http = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self {
            http,
            provider: config.provider,
            model: config.model(),
            api_url: config.api_url(),
            api_key,
        })
    }

    /// Use this key instead of the one resolved from the environment.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn missing_key(&self) -> ScriptflowError {
        ScriptflowError::MissingApiKey {
            env_var: self.provider.config().env_vars.join(" or "),
        }
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| self.missing_key())?;
        info!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_len = request.prompt.len(),
            "sending generation request"
        );

        let wire = self.provider.config().wire;
        let builder = match wire {
            WireFormat::GenerateContent => self
                .http
                .post(format!(
                    "{}/{}:generateContent",
                    self.api_url.trim_end_matches('/'),
                    self.model
                ))
                .header("x-goog-api-key", api_key)
                .json(&generate_content_body(&request)),
            WireFormat::ChatCompletions => self
                .http
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", api_key))
                .json(&chat_completions_body(&self.model, &request)),
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScriptflowError::ApiStatus { status: status.as_u16(), body });
        }

        let body = response.json::<Value>().await?;
        let text = match wire {
            WireFormat::GenerateContent => generate_content_text(&body),
            WireFormat::ChatCompletions => chat_completions_text(&body),
        };
        parse_response_text(text.as_deref())
    }
}

pub fn generate_content_body(request: &GenerationRequest) -> Value {
    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseSchema": request.schema.to_gemini(),
    });
    if let Some(budget) = request.thinking_budget {
        generation_config["thinkingConfig"] = json!({ "thinkingBudget": budget });
    }

    let mut body = json!({
        "contents": [
            { "role": "user", "parts": [{ "text": &request.prompt }] }
        ],
        "generationConfig": generation_config,
    });
    if let Some(instruction) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }
    body
}

pub fn chat_completions_body(model: &str, request: &GenerationRequest) -> Value {
    let mut messages = Vec::new();
    if let Some(instruction) = &request.system_instruction {
        messages.push(json!({ "role": "system", "content": instruction }));
    }
    messages.push(json!({ "role": "user", "content": &request.prompt }));

    json!({
        "model": model,
        "messages": messages,
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": request.schema_name,
                "strict": true,
                "schema": request.schema.to_json_schema(),
            },
        },
    })
}

/// Concatenated non-thought text parts of the first candidate.
pub fn generate_content_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter(|part| !part["thought"].as_bool().unwrap_or(false))
        .filter_map(|part| part["text"].as_str())
        .collect();
    Some(text)
}

pub fn chat_completions_text(body: &Value) -> Option<String> {
    body["choices"][0]["message"]["content"].as_str().map(str::to_string)
}

pub fn parse_response_text(text: Option<&str>) -> Result<Value> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!("provider returned no text");
            return Err(ScriptflowError::EmptyResponse);
        }
    };
    debug!(len = text.len(), "parsing provider response");
    Ok(serde_json::from_str(text)?)
}
