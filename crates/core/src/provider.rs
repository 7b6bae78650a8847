use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScriptflowError};

/// Request body family spoken by a provider endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireFormat {
    /// Google `models/{model}:generateContent` with `responseSchema`.
    GenerateContent,
    /// OpenAI-compatible `chat/completions` with a `json_schema` response format.
    ChatCompletions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Openai,
    Grok,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    /// Checked in order, first non-empty wins.
    pub env_vars: &'static [&'static str],
    pub wire: WireFormat,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/models",
                model: "gemini-2.5-flash",
                env_vars: &["GEMINI_API_KEY", "API_KEY"],
                wire: WireFormat::GenerateContent,
            },
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-4.1-mini",
                env_vars: &["OPENAI_API_KEY"],
                wire: WireFormat::ChatCompletions,
            },
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_vars: &["XAI_API_KEY"],
                wire: WireFormat::ChatCompletions,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Openai => "OpenAI",
            Provider::Grok => "Grok",
        }
    }

    /// Look up the API key for this provider in the environment.
    pub fn validate_api_key(&self) -> Result<String> {
        let config = self.config();
        config
            .env_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| ScriptflowError::MissingApiKey {
                env_var: config.env_vars.join(" or "),
            })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = ScriptflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::Openai),
            "grok" | "xai" => Ok(Provider::Grok),
            other => Err(ScriptflowError::InvalidConfig {
                reason: format!("unknown provider '{other}' (expected gemini, openai or grok)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_aliases() {
        assert_eq!("Gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!(" xai ".parse::<Provider>().unwrap(), Provider::Grok);
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::Openai);
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn gemini_speaks_generate_content() {
        let config = Provider::default().config();
        assert_eq!(config.wire, WireFormat::GenerateContent);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.env_vars.contains(&"API_KEY"));
    }
}
