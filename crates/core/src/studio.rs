use serde_json::Value;
use tracing::{error, info};

use crate::{
    client::{GenerationClient, GenerationRequest},
    error::{Result, ScriptflowError},
    prompt::{SYSTEM_INSTRUCTION, build_refine_prompt, build_script_prompt},
    schema::{script_schema, segment_schema},
    types::{GeneratedContent, GenerationConfig, ScriptSegment},
};

const SCRIPT_THINKING_BUDGET: u32 = 2048;

/// Generate a full script and its hype analysis.
pub async fn generate_script(
    client: &dyn GenerationClient,
    config: &GenerationConfig,
) -> Result<GeneratedContent> {
    let request = GenerationRequest::new(build_script_prompt(config), script_schema(), "script")
        .with_system_instruction(SYSTEM_INSTRUCTION)
        .with_thinking_budget(SCRIPT_THINKING_BUDGET);

    let value = client.generate(request).await.inspect_err(|err| {
        error!("Error generating script: {err}");
    })?;
    let content: GeneratedContent = from_reply(value)?;
    info!(
        scenes = content.script.len(),
        score = content.analysis.score,
        "script generated"
    );
    Ok(content)
}

/// Rewrite one scene according to a free-text instruction.
pub async fn regenerate_segment(
    client: &dyn GenerationClient,
    segment: &ScriptSegment,
    instruction: &str,
    title: &str,
) -> Result<ScriptSegment> {
    let request = GenerationRequest::new(
        build_refine_prompt(segment, instruction, title),
        segment_schema(),
        "script_segment",
    );

    let value = client.generate(request).await.inspect_err(|err| {
        error!("Error regenerating segment: {err}");
    })?;
    from_reply(value)
}

/// The provider honoured JSON but not the schema.
fn from_reply<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        error!("reply does not match the response schema: {err}");
        ScriptflowError::InvalidResponse { reason: err.to_string() }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::types::AdvancedConfig;

    struct Recording {
        reply: Value,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl GenerationClient for Recording {
        async fn generate(&self, request: GenerationRequest) -> Result<Value> {
            self.seen.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    fn config() -> GenerationConfig {
        GenerationConfig {
            title: "Coffee at 3am".into(),
            duration: "45s".into(),
            tone: "Casual & Friendly".into(),
            platform: "LinkedIn Video".into(),
            advanced: AdvancedConfig::default(),
        }
    }

    #[tokio::test]
    async fn generate_script_sends_script_schema_and_parses_reply() {
        let client = Recording {
            reply: json!({
                "script": [{ "narration": "Hi", "visual": "Mug close-up" }],
                "analysis": {
                    "score": 7,
                    "headline": "Relatable late-night hook",
                    "viralFactors": ["hook"],
                    "platformTips": ["post at 9am"]
                }
            }),
            seen: Mutex::new(Vec::new()),
        };

        let content = generate_script(&client, &config()).await.unwrap();
        assert_eq!(content.script.len(), 1);
        assert_eq!(content.analysis.score, 7.0);

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].schema, script_schema());
        assert_eq!(seen[0].system_instruction.as_deref(), Some(SYSTEM_INSTRUCTION));
        assert_eq!(seen[0].thinking_budget, Some(SCRIPT_THINKING_BUDGET));
        assert!(seen[0].prompt.contains("Coffee at 3am"));
    }

    #[tokio::test]
    async fn shape_mismatch_is_an_error() {
        let client = Recording { reply: json!({ "script": "nope" }), seen: Mutex::new(Vec::new()) };
        let err = generate_script(&client, &config()).await.unwrap_err();
        assert!(matches!(err, ScriptflowError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn regenerate_segment_uses_segment_schema() {
        let client = Recording {
            reply: json!({ "narration": "Funnier", "visual": "Drone shot" }),
            seen: Mutex::new(Vec::new()),
        };
        let current = ScriptSegment { narration: "Plain".into(), visual: "Static".into() };

        let segment = regenerate_segment(&client, &current, "funnier", "Coffee").await.unwrap();
        assert_eq!(segment.visual, "Drone shot");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].schema, segment_schema());
        assert!(seen[0].system_instruction.is_none());
        assert!(seen[0].prompt.contains("User Request: \"funnier\""));
    }
}
