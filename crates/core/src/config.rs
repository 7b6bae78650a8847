use std::env;

use crate::{
    error::Result,
    provider::{Provider, ProviderConfig},
};

const ENV_PROVIDER: &str = "SCRIPTFLOW_PROVIDER";
const ENV_MODEL: &str = "SCRIPTFLOW_MODEL";
const ENV_API_BASE: &str = "SCRIPTFLOW_API_BASE";

/// Runtime settings for talking to the generation provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioConfig {
    pub provider: Provider,
    pub model: Option<String>,
    pub api_base: Option<String>,
}

impl StudioConfig {
    pub fn from_env() -> Result<Self> {
        let provider = match non_empty_var(ENV_PROVIDER) {
            Some(value) => value.parse()?,
            None => Provider::default(),
        };
        Ok(Self {
            provider,
            model: non_empty_var(ENV_MODEL),
            api_base: non_empty_var(ENV_API_BASE),
        })
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if model.is_some() {
            self.model = model;
        }
        self
    }

    pub fn provider_config(&self) -> ProviderConfig {
        self.provider.config()
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider_config().model.to_string())
    }

    pub fn api_url(&self) -> String {
        self.api_base
            .clone()
            .unwrap_or_else(|| self.provider_config().api_url.to_string())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
