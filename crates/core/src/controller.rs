//! Studio state machine.
//!
//! `Splash --Submit--> Generating --success--> Editor`, `Generating
//! --failure--> Splash`, `Editor --BackToStudio--> Splash`. Transitions are
//! pure: [`StudioState::apply`] mutates the state and returns the external
//! call to make, if any. Whoever owns the state runs the [`Effect`] and feeds
//! the resulting event back in.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    client::GenerationClient,
    duration::DurationChoice,
    studio::{generate_script, regenerate_segment},
    types::{
        AdvancedConfig, AdvancedField, GeneratedContent, GenerationConfig, PLATFORMS,
        ScriptAnalysis, ScriptSegment, SegmentField, TONES, ViewMode,
    },
};

pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate script. Please check your API connection and try again.";
pub const REFINE_FAILED_MESSAGE: &str = "Failed to regenerate segment. Try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppScreen {
    #[default]
    Splash,
    Generating,
    Editor,
}

/// The open "refine scene" dialog. At most one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineDialog {
    pub index: usize,
    pub feedback: String,
    pub in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioState {
    pub screen: AppScreen,

    pub title: String,
    pub tone: String,
    pub platform: String,
    pub duration_choice: DurationChoice,
    pub custom_duration: String,
    pub advanced: AdvancedConfig,
    pub show_advanced: bool,

    pub script: Option<Vec<ScriptSegment>>,
    pub analysis: Option<ScriptAnalysis>,
    pub view_mode: ViewMode,
    pub error: Option<String>,

    pub refine: Option<RefineDialog>,
    pub alert: Option<String>,
    pub show_help: bool,

    /// Bumped on every accepted Submit. Refine results stamped with an
    /// older value belong to a script that has since been replaced.
    #[serde(default)]
    pub generation: u64,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            screen: AppScreen::Splash,
            title: String::new(),
            tone: TONES[0].to_string(),
            platform: PLATFORMS[0].to_string(),
            duration_choice: DurationChoice::default(),
            custom_duration: String::new(),
            advanced: AdvancedConfig::default(),
            show_advanced: false,
            script: None,
            analysis: None,
            view_mode: ViewMode::default(),
            error: None,
            refine: None,
            alert: None,
            show_help: false,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    Title(String),
    Tone(String),
    Platform(String),
    Duration(DurationChoice),
    CustomDuration(String),
    Advanced(AdvancedField, String),
    ToggleAdvanced,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    Form(FormEdit),
    Submit,
    GenerationSucceeded(GeneratedContent),
    /// Carries the underlying error text for logs; the user sees a fixed message.
    GenerationFailed(String),
    BackToStudio,
    SetViewMode(ViewMode),
    EditSegment {
        index: usize,
        field: SegmentField,
        value: String,
    },
    OpenRefine(usize),
    RefineFeedbackChanged(String),
    CloseRefine,
    SubmitRefine,
    RefineSucceeded {
        generation: u64,
        index: usize,
        segment: ScriptSegment,
    },
    RefineFailed {
        generation: u64,
        index: usize,
        error: String,
    },
    DismissAlert,
    ToggleHelp,
}

/// External work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Generate(GenerationConfig),
    Regenerate {
        generation: u64,
        index: usize,
        segment: ScriptSegment,
        instruction: String,
        title: String,
    },
}

impl StudioState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title_is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn resolved_duration(&self) -> String {
        self.duration_choice.resolve(&self.custom_duration)
    }

    /// Short label for the editor header: the custom text or the preset name.
    pub fn duration_label(&self) -> &str {
        match self.duration_choice {
            DurationChoice::Custom => &self.custom_duration,
            other => other.label(),
        }
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            title: self.title.clone(),
            duration: self.resolved_duration(),
            tone: self.tone.clone(),
            platform: self.platform.clone(),
            advanced: self.advanced.clone(),
        }
    }

    pub fn script(&self) -> &[ScriptSegment] {
        self.script.as_deref().unwrap_or_default()
    }

    pub fn apply(&mut self, event: StudioEvent) -> Option<Effect> {
        debug!(screen = ?self.screen, ?event, "studio event");
        match event {
            StudioEvent::Form(edit) => {
                if self.screen == AppScreen::Splash {
                    self.apply_form(edit);
                }
                None
            }
            StudioEvent::Submit => {
                if self.screen == AppScreen::Generating || !self.title_is_valid() {
                    return None;
                }
                self.screen = AppScreen::Generating;
                self.generation = self.generation.wrapping_add(1);
                self.error = None;
                self.script = None;
                self.analysis = None;
                self.refine = None;
                self.alert = None;
                Some(Effect::Generate(self.generation_config()))
            }
            StudioEvent::GenerationSucceeded(content) => {
                if self.screen == AppScreen::Generating {
                    self.script = Some(content.script);
                    self.analysis = Some(content.analysis);
                    self.view_mode = ViewMode::Clean;
                    self.screen = AppScreen::Editor;
                }
                None
            }
            StudioEvent::GenerationFailed(reason) => {
                if self.screen == AppScreen::Generating {
                    warn!("generation failed: {reason}");
                    self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                    self.screen = AppScreen::Splash;
                }
                None
            }
            StudioEvent::BackToStudio => {
                if self.screen == AppScreen::Editor {
                    self.screen = AppScreen::Splash;
                    self.refine = None;
                }
                None
            }
            StudioEvent::SetViewMode(mode) => {
                self.view_mode = mode;
                None
            }
            StudioEvent::EditSegment { index, field, value } => {
                if let Some(segment) = self.script.as_mut().and_then(|s| s.get_mut(index)) {
                    segment.set(field, value);
                }
                None
            }
            StudioEvent::OpenRefine(index) => {
                if index < self.script().len() {
                    self.refine = Some(RefineDialog { index, feedback: String::new(), in_flight: false });
                }
                None
            }
            StudioEvent::RefineFeedbackChanged(feedback) => {
                if let Some(dialog) = self.refine.as_mut() {
                    dialog.feedback = feedback;
                }
                None
            }
            StudioEvent::CloseRefine => {
                self.refine = None;
                None
            }
            StudioEvent::SubmitRefine => self.submit_refine(),
            StudioEvent::RefineSucceeded { generation, index, segment } => {
                if generation != self.generation {
                    debug!(index, "dropping refine result for a replaced script");
                    return None;
                }
                if let Some(slot) = self.script.as_mut().and_then(|s| s.get_mut(index)) {
                    *slot = segment;
                }
                if self.refine.as_ref().is_some_and(|dialog| dialog.index == index) {
                    self.refine = None;
                }
                None
            }
            StudioEvent::RefineFailed { generation, index, error } => {
                if generation != self.generation {
                    debug!(index, "dropping refine failure for a replaced script");
                    return None;
                }
                warn!("refine of scene {} failed: {error}", index + 1);
                self.alert = Some(REFINE_FAILED_MESSAGE.to_string());
                if let Some(dialog) = self.refine.as_mut().filter(|dialog| dialog.index == index) {
                    dialog.in_flight = false;
                }
                None
            }
            StudioEvent::DismissAlert => {
                self.alert = None;
                None
            }
            StudioEvent::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
        }
    }

    fn apply_form(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::Title(title) => self.title = title,
            FormEdit::Tone(tone) => self.tone = tone,
            FormEdit::Platform(platform) => self.platform = platform,
            FormEdit::Duration(choice) => self.duration_choice = choice,
            FormEdit::CustomDuration(value) => self.custom_duration = value,
            FormEdit::Advanced(field, value) => self.advanced.set(field, value),
            FormEdit::ToggleAdvanced => self.show_advanced = !self.show_advanced,
        }
    }

    fn submit_refine(&mut self) -> Option<Effect> {
        let dialog = self.refine.as_mut()?;
        if dialog.in_flight || dialog.feedback.trim().is_empty() {
            return None;
        }
        let segment = self.script.as_ref()?.get(dialog.index)?.clone();
        dialog.in_flight = true;
        Some(Effect::Regenerate {
            generation: self.generation,
            index: dialog.index,
            segment,
            instruction: dialog.feedback.clone(),
            title: self.title.clone(),
        })
    }
}

/// Perform an effect against the provider and turn the outcome into an event.
pub async fn run_effect(client: &dyn GenerationClient, effect: Effect) -> StudioEvent {
    match effect {
        Effect::Generate(config) => match generate_script(client, &config).await {
            Ok(content) => StudioEvent::GenerationSucceeded(content),
            Err(err) => StudioEvent::GenerationFailed(err.to_string()),
        },
        Effect::Regenerate { generation, index, segment, instruction, title } => {
            match regenerate_segment(client, &segment, &instruction, &title).await {
                Ok(segment) => StudioEvent::RefineSucceeded { generation, index, segment },
                Err(err) => StudioEvent::RefineFailed { generation, index, error: err.to_string() },
            }
        }
    }
}

/// Owns the state and a client, running effects to completion.
pub struct StudioController {
    state: StudioState,
    client: Arc<dyn GenerationClient>,
}

impl StudioController {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_state(client, StudioState::default())
    }

    pub fn with_state(client: Arc<dyn GenerationClient>, state: StudioState) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn into_state(self) -> StudioState {
        self.state
    }

    /// Apply the event and any follow-up effects until the state settles.
    pub async fn dispatch(&mut self, event: StudioEvent) -> &StudioState {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            if let Some(effect) = self.state.apply(event) {
                next = Some(run_effect(self.client.as_ref(), effect).await);
            }
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(n: usize) -> ScriptSegment {
        ScriptSegment { narration: format!("narration {n}"), visual: format!("visual {n}") }
    }

    fn content() -> GeneratedContent {
        GeneratedContent {
            script: (0..3).map(segment).collect(),
            analysis: ScriptAnalysis {
                score: 8.0,
                headline: "Strong hook".into(),
                viral_factors: vec!["hook".into()],
                platform_tips: vec!["captions".into()],
            },
        }
    }

    fn editor_state() -> StudioState {
        let mut state = StudioState::new();
        state.apply(StudioEvent::Form(FormEdit::Title("Watches".into())));
        state.apply(StudioEvent::Submit);
        state.apply(StudioEvent::GenerationSucceeded(content()));
        state
    }

    #[test]
    fn blank_title_submit_is_a_noop() {
        for title in ["", "   ", "\t\n"] {
            let mut state = StudioState::new();
            state.apply(StudioEvent::Form(FormEdit::Title(title.into())));
            assert_eq!(state.apply(StudioEvent::Submit), None);
            assert_eq!(state.screen, AppScreen::Splash);
        }
    }

    #[test]
    fn submit_moves_to_generating_with_resolved_config() {
        let mut state = StudioState::new();
        state.apply(StudioEvent::Form(FormEdit::Title("Watches".into())));
        state.apply(StudioEvent::Form(FormEdit::Duration(DurationChoice::Custom)));
        state.apply(StudioEvent::Form(FormEdit::CustomDuration("45s".into())));

        let effect = state.apply(StudioEvent::Submit);
        assert_eq!(state.screen, AppScreen::Generating);
        match effect {
            Some(Effect::Generate(config)) => {
                assert_eq!(config.title, "Watches");
                assert_eq!(config.duration, "45s");
                assert_eq!(config.tone, TONES[0]);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn submit_is_blocked_while_generating() {
        let mut state = StudioState::new();
        state.apply(StudioEvent::Form(FormEdit::Title("Watches".into())));
        assert!(state.apply(StudioEvent::Submit).is_some());
        assert!(state.apply(StudioEvent::Submit).is_none());
    }

    #[test]
    fn failure_returns_to_splash_and_keeps_inputs() {
        let mut state = StudioState::new();
        state.apply(StudioEvent::Form(FormEdit::Title("Watches".into())));
        state.apply(StudioEvent::Form(FormEdit::Advanced(
            AdvancedField::Audience,
            "Collectors".into(),
        )));
        state.apply(StudioEvent::Submit);
        state.apply(StudioEvent::GenerationFailed("connection refused".into()));

        assert_eq!(state.screen, AppScreen::Splash);
        assert_eq!(state.error.as_deref(), Some(GENERATION_FAILED_MESSAGE));
        assert_eq!(state.title, "Watches");
        assert_eq!(state.advanced.audience, "Collectors");
    }

    #[test]
    fn success_populates_script_and_analysis() {
        let state = editor_state();
        assert_eq!(state.screen, AppScreen::Editor);
        assert_eq!(state.script().len(), 3);
        assert!(state.analysis.is_some());
    }

    #[test]
    fn back_to_studio_retains_results() {
        let mut state = editor_state();
        state.apply(StudioEvent::BackToStudio);
        assert_eq!(state.screen, AppScreen::Splash);
        assert_eq!(state.script().len(), 3);
        assert_eq!(state.title, "Watches");
    }

    #[test]
    fn stale_generation_result_is_ignored() {
        let mut state = StudioState::new();
        state.apply(StudioEvent::GenerationSucceeded(content()));
        assert_eq!(state.screen, AppScreen::Splash);
        assert!(state.script.is_none());
    }

    #[test]
    fn form_edits_are_ignored_outside_splash() {
        let mut state = editor_state();
        state.apply(StudioEvent::Form(FormEdit::Title("Other".into())));
        assert_eq!(state.title, "Watches");
    }

    #[test]
    fn edit_segment_touches_one_index() {
        let mut state = editor_state();
        state.apply(StudioEvent::EditSegment {
            index: 1,
            field: SegmentField::Narration,
            value: "edited".into(),
        });
        assert_eq!(state.script()[1].narration, "edited");
        assert_eq!(state.script()[1].visual, "visual 1");
        assert_eq!(state.script()[0], segment(0));
        assert_eq!(state.script()[2], segment(2));

        state.apply(StudioEvent::EditSegment {
            index: 99,
            field: SegmentField::Visual,
            value: "ignored".into(),
        });
        assert_eq!(state.script().len(), 3);
    }

    #[test]
    fn refine_requires_feedback() {
        let mut state = editor_state();
        state.apply(StudioEvent::OpenRefine(2));
        assert_eq!(state.apply(StudioEvent::SubmitRefine), None);
        state.apply(StudioEvent::RefineFeedbackChanged("  ".into()));
        assert_eq!(state.apply(StudioEvent::SubmitRefine), None);
    }

    #[test]
    fn refine_replaces_only_its_index() {
        let mut state = editor_state();
        state.apply(StudioEvent::OpenRefine(1));
        state.apply(StudioEvent::RefineFeedbackChanged("drone shot".into()));

        let effect = state.apply(StudioEvent::SubmitRefine);
        let Some(Effect::Regenerate { generation, index, segment: current, instruction, title }) =
            effect
        else {
            panic!("expected a regenerate effect");
        };
        assert_eq!((index, instruction.as_str(), title.as_str()), (1, "drone shot", "Watches"));
        assert_eq!(current, segment(1));
        assert!(state.refine.as_ref().unwrap().in_flight);
        assert_eq!(state.apply(StudioEvent::SubmitRefine), None);

        let replacement = ScriptSegment { narration: "new".into(), visual: "drone".into() };
        state.apply(StudioEvent::RefineSucceeded { generation, index: 1, segment: replacement.clone() });

        assert_eq!(state.script()[0], segment(0));
        assert_eq!(state.script()[1], replacement);
        assert_eq!(state.script()[2], segment(2));
        assert!(state.refine.is_none());
    }

    #[test]
    fn refine_failure_alerts_and_keeps_dialog_for_retry() {
        let mut state = editor_state();
        state.apply(StudioEvent::OpenRefine(0));
        state.apply(StudioEvent::RefineFeedbackChanged("funnier".into()));
        state.apply(StudioEvent::SubmitRefine);
        state.apply(StudioEvent::RefineFailed {
            generation: state.generation,
            index: 0,
            error: "timeout".into(),
        });

        assert_eq!(state.alert.as_deref(), Some(REFINE_FAILED_MESSAGE));
        assert_eq!(state.script()[0], segment(0));
        let dialog = state.refine.clone().unwrap();
        assert!(!dialog.in_flight);
        assert_eq!(dialog.feedback, "funnier");
        assert!(state.apply(StudioEvent::SubmitRefine).is_some());

        state.apply(StudioEvent::DismissAlert);
        assert!(state.alert.is_none());
    }

    #[test]
    fn refine_reply_for_a_replaced_script_is_dropped() {
        let mut state = editor_state();
        state.apply(StudioEvent::OpenRefine(1));
        state.apply(StudioEvent::RefineFeedbackChanged("funnier".into()));
        let Some(Effect::Regenerate { generation: old, .. }) = state.apply(StudioEvent::SubmitRefine)
        else {
            panic!("expected a regenerate effect");
        };

        state.apply(StudioEvent::BackToStudio);
        state.apply(StudioEvent::Form(FormEdit::Title("New".into())));
        state.apply(StudioEvent::Submit);
        let fresh = GeneratedContent {
            script: (10..13).map(segment).collect(),
            ..content()
        };
        state.apply(StudioEvent::GenerationSucceeded(fresh.clone()));
        assert_ne!(state.generation, old);

        state.apply(StudioEvent::RefineSucceeded {
            generation: old,
            index: 1,
            segment: ScriptSegment { narration: "old rewrite".into(), visual: "old".into() },
        });
        assert_eq!(state.script(), fresh.script.as_slice());

        state.apply(StudioEvent::RefineFailed { generation: old, index: 1, error: "late".into() });
        assert!(state.alert.is_none());
    }

    #[test]
    fn opening_refine_out_of_range_is_ignored() {
        let mut state = editor_state();
        state.apply(StudioEvent::OpenRefine(3));
        assert!(state.refine.is_none());
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = editor_state();
        let json = serde_json::to_string(&state).unwrap();
        let back: StudioState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
