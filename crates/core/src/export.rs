use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::{
    error::{Result, ScriptflowError},
    types::ScriptSegment,
};

pub const CSV_FILE_NAME: &str = "production_script.csv";
pub const PRINT_FILE_NAME: &str = "production_script.txt";

const CSV_HEADER: &str = "Scene,Visual Description,Narration";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Production table as CSV: 1-indexed scene, quoted visual, quoted narration.
pub fn script_to_csv(script: &[ScriptSegment]) -> String {
    let rows = script
        .iter()
        .enumerate()
        .map(|(i, segment)| format!("{},{},{}", i + 1, quote(&segment.visual), quote(&segment.narration)));
    std::iter::once(CSV_HEADER.to_string())
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve where an export lands: a directory gets the default file name.
pub fn export_path(target: Option<&Path>, default_name: &str) -> PathBuf {
    match target {
        Some(path) if path.is_dir() => path.join(default_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_name),
    }
}

pub async fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|source| ScriptflowError::WriteFailed { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(())
}

pub async fn save_csv(script: &[ScriptSegment], path: &Path) -> Result<()> {
    write_text(path, &script_to_csv(script)).await
}
