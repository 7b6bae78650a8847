use std::{path::PathBuf, sync::Arc};

use anyhow::{Result, anyhow};
use iced::{Element, Task, widget::text_editor};
use tracing::{error, info, warn};

use scriptflow_core::{
    CSV_FILE_NAME, GenerationClient, HttpGenerationClient, PRINT_FILE_NAME, PrintHeader,
    ScriptSegment, SegmentField, StudioConfig, StudioEvent, StudioState, Theme, ThemeStore,
    export::write_text, export_path, narration_text, render_print_sheet, run_effect,
    script_to_csv,
};

mod view;

fn main() -> iced::Result {
    dotenv::dotenv().ok();
    if let Err(err) = setup_tracing() {
        eprintln!("{err}");
    }

    let app = match App::boot() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    iced::application("ScriptFlow Pro", App::update, App::view)
        .theme(App::theme)
        .window_size((1100.0, 820.0))
        .run_with(move || (app, Task::none()))
}

fn setup_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {err}"))
}

/// Multi-line editor buffers for one production row.
struct SceneEditors {
    visual: text_editor::Content,
    narration: text_editor::Content,
}

impl SceneEditors {
    fn new(segment: &ScriptSegment) -> Self {
        Self {
            visual: text_editor::Content::with_text(&segment.visual),
            narration: text_editor::Content::with_text(&segment.narration),
        }
    }

    fn get_mut(&mut self, field: SegmentField) -> &mut text_editor::Content {
        match field {
            SegmentField::Visual => &mut self.visual,
            SegmentField::Narration => &mut self.narration,
        }
    }
}

/// `Content::text` always ends the buffer with a newline.
fn editor_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

struct App {
    studio: StudioState,
    scenes: Vec<SceneEditors>,
    client: Arc<dyn GenerationClient>,
    provider_name: &'static str,
    themes: ThemeStore,
    theme: Theme,
    notice: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Studio(StudioEvent),
    EditScene(usize, SegmentField, text_editor::Action),
    ToggleTheme,
    CopyNarration,
    ExportCsv,
    Print,
    Saved(Result<PathBuf, String>),
}

impl App {
    fn boot() -> Result<Self> {
        let config = StudioConfig::from_env().unwrap_or_else(|err| {
            warn!("{err}; falling back to defaults");
            StudioConfig::default()
        });
        let client = HttpGenerationClient::new(&config)?;
        let provider_name = client.provider().name();
        info!(provider = provider_name, model = client.model(), "studio ready");

        let themes = ThemeStore::in_config_dir();
        let theme = themes.load();
        Ok(Self {
            studio: StudioState::new(),
            scenes: Vec::new(),
            client: Arc::new(client),
            provider_name,
            themes,
            theme,
            notice: None,
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Studio(event) => {
                if matches!(event, StudioEvent::Submit | StudioEvent::BackToStudio) {
                    self.notice = None;
                }
                let replaces_text = matches!(
                    event,
                    StudioEvent::GenerationSucceeded(_) | StudioEvent::RefineSucceeded { .. }
                );
                let effect = self.studio.apply(event);
                if replaces_text || self.scenes.len() != self.studio.script().len() {
                    self.scenes = self.studio.script().iter().map(SceneEditors::new).collect();
                }
                match effect {
                    Some(effect) => {
                        let client = Arc::clone(&self.client);
                        Task::perform(
                            async move { run_effect(client.as_ref(), effect).await },
                            Message::Studio,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::EditScene(index, field, action) => {
                let Some(scene) = self.scenes.get_mut(index) else {
                    return Task::none();
                };
                let content = scene.get_mut(field);
                let is_edit = action.is_edit();
                content.perform(action);
                if is_edit {
                    let value = editor_text(content);
                    self.studio.apply(StudioEvent::EditSegment { index, field, value });
                }
                Task::none()
            }
            Message::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(err) = self.themes.save(self.theme) {
                    error!("failed to save theme: {err}");
                }
                Task::none()
            }
            Message::CopyNarration => {
                self.notice = Some("Copied narration to clipboard".to_string());
                iced::clipboard::write(narration_text(self.studio.script()))
            }
            Message::ExportCsv => {
                let content = script_to_csv(self.studio.script());
                Task::perform(save_export(CSV_FILE_NAME, content), Message::Saved)
            }
            Message::Print => {
                let header = PrintHeader {
                    title: &self.studio.title,
                    date: chrono::Local::now().date_naive(),
                    platform: &self.studio.platform,
                    tone: &self.studio.tone,
                    duration: self.studio.duration_label(),
                };
                let content = render_print_sheet(&header, self.studio.script());
                Task::perform(save_export(PRINT_FILE_NAME, content), Message::Saved)
            }
            Message::Saved(result) => {
                self.notice = Some(match result {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(err) => format!("Export failed: {err}"),
                });
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::render(self)
    }

    fn theme(&self) -> iced::Theme {
        match self.theme {
            Theme::Light => iced::Theme::Light,
            Theme::Dark => iced::Theme::Dark,
        }
    }
}

/// Exports land in the downloads folder, like a browser download would.
async fn save_export(file_name: &'static str, content: String) -> Result<PathBuf, String> {
    let dir = dirs::download_dir();
    let path = export_path(dir.as_deref(), file_name);
    write_text(&path, &content)
        .await
        .map(|_| path)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use iced::widget::text_editor::{Action, Edit};
    use scriptflow_core::{AppScreen, ViewMode};

    use super::*;

    fn editor_app() -> App {
        let client = HttpGenerationClient::new(&StudioConfig::default()).unwrap();
        let studio = StudioState {
            screen: AppScreen::Editor,
            title: "Watches".into(),
            script: Some(vec![
                ScriptSegment { narration: "Tick.".into(), visual: "Macro".into() },
                ScriptSegment { narration: "Tock.".into(), visual: "Wide".into() },
            ]),
            ..StudioState::default()
        };
        App {
            studio,
            scenes: Vec::new(),
            client: Arc::new(client),
            provider_name: "Gemini",
            themes: ThemeStore::new(&std::env::temp_dir().join("scriptflow-desktop-test")),
            theme: Theme::Dark,
            notice: None,
        }
    }

    #[test]
    fn scene_editors_keep_multiline_text() {
        let mut app = editor_app();
        let _ = app.update(Message::Studio(StudioEvent::SetViewMode(ViewMode::Production)));
        assert_eq!(app.scenes.len(), 2);

        let _ = app.update(Message::EditScene(1, SegmentField::Narration, Action::SelectAll));
        let _ = app.update(Message::EditScene(
            1,
            SegmentField::Narration,
            Action::Edit(Edit::Paste(Arc::new("Tock.\nThe second hand sweeps.".into()))),
        ));

        assert_eq!(app.studio.script()[1].narration, "Tock.\nThe second hand sweeps.");
        assert_eq!(app.studio.script()[1].visual, "Wide");
        assert_eq!(app.studio.script()[0].narration, "Tick.");
    }

    #[test]
    fn refined_scene_refreshes_its_editor() {
        let mut app = editor_app();
        let _ = app.update(Message::Studio(StudioEvent::SetViewMode(ViewMode::Production)));

        let generation = app.studio.generation;
        let _ = app.update(Message::Studio(StudioEvent::RefineSucceeded {
            generation,
            index: 0,
            segment: ScriptSegment { narration: "Tick, tick.".into(), visual: "Drone".into() },
        }));

        assert_eq!(editor_text(&app.scenes[0].narration), "Tick, tick.");
        assert_eq!(editor_text(&app.scenes[0].visual), "Drone");
    }
}
