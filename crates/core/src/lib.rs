//! ScriptFlow Core Library
//!
//! Prompt building, schema-constrained generation calls, the studio state
//! machine and the text renderers shared by the CLI and the desktop app.

pub mod client;
pub mod config;
pub mod controller;
pub mod duration;
pub mod error;
pub mod export;
pub mod format;
pub mod preferences;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod studio;
pub mod types;

// Re-export commonly used items at crate root
pub use client::{GenerationClient, GenerationRequest, HttpGenerationClient};
pub use config::StudioConfig;
pub use controller::{
    AppScreen, Effect, FormEdit, RefineDialog, StudioController, StudioEvent, StudioState,
    run_effect,
};
pub use duration::DurationChoice;
pub use error::{Result, ScriptflowError};
pub use export::{CSV_FILE_NAME, PRINT_FILE_NAME, export_path, save_csv, script_to_csv};
pub use format::{PrintHeader, ScoreBand, format_score, narration_text, render_print_sheet, word_count};
pub use preferences::{Theme, ThemeStore};
pub use prompt::{build_refine_prompt, build_script_prompt};
pub use provider::{Provider, ProviderConfig};
pub use studio::{generate_script, regenerate_segment};
pub use types::{
    AdvancedConfig, AdvancedField, GeneratedContent, GenerationConfig, PLATFORMS, ScriptAnalysis,
    ScriptSegment, SegmentField, TONES, ViewMode,
};
