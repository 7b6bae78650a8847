use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScriptflowError};

/// Phrase used when a custom duration is selected but left blank.
pub const CUSTOM_DURATION_FALLBACK: &str = "5 minutes";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationChoice {
    #[default]
    Short,
    Medium,
    Long,
    Custom,
}

impl DurationChoice {
    pub const ALL: [DurationChoice; 4] = [
        DurationChoice::Short,
        DurationChoice::Medium,
        DurationChoice::Long,
        DurationChoice::Custom,
    ];

    /// Turn the choice into the phrase handed to the prompt builder.
    ///
    /// `custom` is passed through verbatim; an empty custom value falls back
    /// to [`CUSTOM_DURATION_FALLBACK`].
    pub fn resolve(&self, custom: &str) -> String {
        match self {
            DurationChoice::Short => "Short form (30-60 seconds)".to_string(),
            DurationChoice::Medium => "Standard length (3-5 minutes)".to_string(),
            DurationChoice::Long => "Long form (8-10 minutes)".to_string(),
            DurationChoice::Custom if custom.is_empty() => CUSTOM_DURATION_FALLBACK.to_string(),
            DurationChoice::Custom => custom.to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationChoice::Short => "short",
            DurationChoice::Medium => "medium",
            DurationChoice::Long => "long",
            DurationChoice::Custom => "custom",
        }
    }
}

impl fmt::Display for DurationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationChoice {
    type Err = ScriptflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(DurationChoice::Short),
            "medium" => Ok(DurationChoice::Medium),
            "long" => Ok(DurationChoice::Long),
            "custom" => Ok(DurationChoice::Custom),
            other => Err(ScriptflowError::InvalidConfig {
                reason: format!("unknown duration '{other}' (expected short, medium, long or custom)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_descriptive_phrases() {
        assert_eq!(DurationChoice::Short.resolve("ignored"), "Short form (30-60 seconds)");
        assert_eq!(DurationChoice::Medium.resolve(""), "Standard length (3-5 minutes)");
        assert_eq!(DurationChoice::Long.resolve(""), "Long form (8-10 minutes)");
    }

    #[test]
    fn custom_passes_literal_value() {
        assert_eq!(DurationChoice::Custom.resolve("45s"), "45s");
    }

    #[test]
    fn empty_custom_falls_back() {
        assert_eq!(DurationChoice::Custom.resolve(""), CUSTOM_DURATION_FALLBACK);
    }
}
