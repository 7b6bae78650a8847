use crate::types::{GenerationConfig, ScriptSegment};

pub static SYSTEM_INSTRUCTION: &str =
    "You are a world-class scriptwriter. Always return valid JSON matching the schema.";

/// Only an empty field is replaced; anything else goes in verbatim.
fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// Prompt for a full script plus its hype analysis.
pub fn build_script_prompt(config: &GenerationConfig) -> String {
    let advanced = &config.advanced;
    format!(
        r#"You are a viral content strategist and expert screenwriter.
Create a video script for: "{title}".

Context:
- Duration: {duration}.
- Tone: {tone}.
- Platform: {platform}.

Deep Customization:
- Audience: {audience}.
- Pacing: {pacing}.
- Speaker Persona: {persona}.
- Visual Theme: {visual_theme}.
- Reference Style: {reference_style}.
- CTA: {cta}.
- Keywords: {keywords}.

Tasks:
1. Write the script (narration + visual).
2. Analyze the script's potential (Hype Rating).

Output a JSON object with 'script' (array) and 'analysis' (object)."#,
        title = config.title,
        duration = config.duration,
        tone = config.tone,
        platform = config.platform,
        audience = or_placeholder(&advanced.audience, "General"),
        pacing = or_placeholder(&advanced.pacing, "Natural"),
        persona = or_placeholder(&advanced.speaker_persona, "Standard"),
        visual_theme = or_placeholder(&advanced.visual_theme, "Standard"),
        reference_style = or_placeholder(&advanced.reference_style, "None"),
        cta = or_placeholder(&advanced.cta, "None"),
        keywords = or_placeholder(&advanced.keywords, "None"),
    )
}

/// Prompt asking for one replacement scene.
pub fn build_refine_prompt(segment: &ScriptSegment, instruction: &str, title: &str) -> String {
    format!(
        r#"I have a script segment for a video titled "{title}".
Current Narration: "{narration}"
Current Visual: "{visual}"
User Request: "{instruction}"
Rewrite this segment to satisfy the user's request."#,
        narration = segment.narration,
        visual = segment.visual,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{duration::DurationChoice, types::AdvancedConfig};

    fn watch_config() -> GenerationConfig {
        GenerationConfig {
            title: "Why Mechanical Watches Are Making a Comeback".into(),
            duration: DurationChoice::Short.resolve(""),
            tone: "Humorous & Witty".into(),
            platform: "YouTube Short / Reel / TikTok (9:16)".into(),
            advanced: AdvancedConfig::default(),
        }
    }

    #[test]
    fn script_prompt_carries_form_values_verbatim() {
        let prompt = build_script_prompt(&watch_config());
        assert!(prompt.contains("Short form (30-60 seconds)"));
        assert!(prompt.contains("\"Why Mechanical Watches Are Making a Comeback\""));
        assert!(prompt.contains("Humorous & Witty"));
        assert!(prompt.contains("YouTube Short / Reel / TikTok (9:16)"));
        assert!(prompt.contains("'script' (array) and 'analysis' (object)"));
    }

    #[test]
    fn empty_advanced_fields_use_placeholders() {
        let prompt = build_script_prompt(&watch_config());
        assert!(prompt.contains("- Audience: General."));
        assert!(prompt.contains("- Pacing: Natural."));
        assert!(prompt.contains("- Speaker Persona: Standard."));
        assert!(prompt.contains("- Visual Theme: Standard."));
        assert!(prompt.contains("- Reference Style: None."));
        assert!(prompt.contains("- CTA: None."));
        assert!(prompt.contains("- Keywords: None."));
    }

    #[test]
    fn filled_advanced_fields_are_substituted() {
        let mut config = watch_config();
        config.advanced.speaker_persona = "Casey Neistat style".into();
        config.advanced.audience = "  ".into();
        let prompt = build_script_prompt(&config);
        assert!(prompt.contains("- Speaker Persona: Casey Neistat style."));
        assert!(prompt.contains("- Audience:   ."));
        assert!(!prompt.contains("- Audience: General."));
    }

    #[test]
    fn refine_prompt_quotes_segment_and_request() {
        let segment = ScriptSegment {
            narration: "Tick tock.".into(),
            visual: "Macro shot of a balance wheel".into(),
        };
        let prompt = build_refine_prompt(&segment, "make it funnier", "Watches");
        assert!(prompt.contains("video titled \"Watches\""));
        assert!(prompt.contains("Current Narration: \"Tick tock.\""));
        assert!(prompt.contains("Current Visual: \"Macro shot of a balance wheel\""));
        assert!(prompt.contains("User Request: \"make it funnier\""));
    }
}
