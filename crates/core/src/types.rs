use serde::{Deserialize, Serialize};

pub const TONES: &[&str] = &[
    "Professional & Authoritative",
    "Casual & Friendly",
    "Humorous & Witty",
    "Cinematic & Dramatic",
    "Educational & Clear",
    "Hype & Energetic",
];

pub const PLATFORMS: &[&str] = &[
    "YouTube Video (16:9)",
    "YouTube Short / Reel / TikTok (9:16)",
    "LinkedIn Video",
    "TV Commercial / Ad Spot",
];

/// One scene of a script: what is said and what is shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub narration: String,
    pub visual: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentField {
    Narration,
    Visual,
}

impl ScriptSegment {
    pub fn set(&mut self, field: SegmentField, value: String) {
        match field {
            SegmentField::Narration => self.narration = value,
            SegmentField::Visual => self.visual = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptAnalysis {
    pub score: f64,
    pub headline: String,
    pub viral_factors: Vec<String>,
    pub platform_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub script: Vec<ScriptSegment>,
    pub analysis: ScriptAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedConfig {
    pub audience: String,
    pub pacing: String,
    pub cta: String,
    pub keywords: String,
    pub speaker_persona: String,
    pub visual_theme: String,
    pub reference_style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvancedField {
    Audience,
    Pacing,
    Cta,
    Keywords,
    SpeakerPersona,
    VisualTheme,
    ReferenceStyle,
}

impl AdvancedField {
    pub const ALL: [AdvancedField; 7] = [
        AdvancedField::Audience,
        AdvancedField::SpeakerPersona,
        AdvancedField::Keywords,
        AdvancedField::VisualTheme,
        AdvancedField::ReferenceStyle,
        AdvancedField::Pacing,
        AdvancedField::Cta,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdvancedField::Audience => "Target Audience",
            AdvancedField::Pacing => "Pacing",
            AdvancedField::Cta => "Call to Action",
            AdvancedField::Keywords => "Content Keywords",
            AdvancedField::SpeakerPersona => "Speaker Persona",
            AdvancedField::VisualTheme => "Visual Theme",
            AdvancedField::ReferenceStyle => "Reference Style",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            AdvancedField::Audience => "Who is watching?",
            AdvancedField::Pacing => "e.g. Fast cuts, slow burn",
            AdvancedField::Cta => "How should it end?",
            AdvancedField::Keywords => "Mandatory words/phrases",
            AdvancedField::SpeakerPersona => "e.g. High Energy Gen Z",
            AdvancedField::VisualTheme => "e.g. Dark Aesthetic, Minimalist",
            AdvancedField::ReferenceStyle => "e.g. Like MKBHD, Like Casey Neistat",
        }
    }
}

impl AdvancedConfig {
    pub fn get(&self, field: AdvancedField) -> &str {
        match field {
            AdvancedField::Audience => &self.audience,
            AdvancedField::Pacing => &self.pacing,
            AdvancedField::Cta => &self.cta,
            AdvancedField::Keywords => &self.keywords,
            AdvancedField::SpeakerPersona => &self.speaker_persona,
            AdvancedField::VisualTheme => &self.visual_theme,
            AdvancedField::ReferenceStyle => &self.reference_style,
        }
    }

    pub fn set(&mut self, field: AdvancedField, value: String) {
        let slot = match field {
            AdvancedField::Audience => &mut self.audience,
            AdvancedField::Pacing => &mut self.pacing,
            AdvancedField::Cta => &mut self.cta,
            AdvancedField::Keywords => &mut self.keywords,
            AdvancedField::SpeakerPersona => &mut self.speaker_persona,
            AdvancedField::VisualTheme => &mut self.visual_theme,
            AdvancedField::ReferenceStyle => &mut self.reference_style,
        };
        *slot = value;
    }
}

/// Everything the prompt builder needs for a full-script request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub title: String,
    /// Already resolved to a descriptive phrase.
    pub duration: String,
    pub tone: String,
    pub platform: String,
    pub advanced: AdvancedConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Clean,
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_uses_camel_case_wire_names() {
        let analysis: ScriptAnalysis = serde_json::from_str(
            r#"{"score": 8.5, "headline": "Hooks hard", "viralFactors": ["a"], "platformTips": ["b", "c"]}"#,
        )
        .unwrap();
        assert_eq!(analysis.score, 8.5);
        assert_eq!(analysis.platform_tips.len(), 2);

        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("viralFactors").is_some());
        assert!(value.get("viral_factors").is_none());
    }

    #[test]
    fn advanced_config_defaults_missing_fields() {
        let advanced: AdvancedConfig =
            serde_json::from_str(r#"{"speakerPersona": "Casey Neistat style"}"#).unwrap();
        assert_eq!(advanced.speaker_persona, "Casey Neistat style");
        assert_eq!(advanced.audience, "");
        assert_eq!(advanced.get(AdvancedField::SpeakerPersona), "Casey Neistat style");
    }

    #[test]
    fn segment_set_touches_one_field() {
        let mut segment = ScriptSegment {
            narration: "old narration".into(),
            visual: "old visual".into(),
        };
        segment.set(SegmentField::Visual, "drone shot".into());
        assert_eq!(segment.visual, "drone shot");
        assert_eq!(segment.narration, "old narration");
    }
}
