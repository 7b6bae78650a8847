use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;
use tracing::info;

use scriptflow_core::{
    AdvancedField, AppScreen, CSV_FILE_NAME, DurationChoice, FormEdit, GeneratedContent,
    HttpGenerationClient, PLATFORMS, PrintHeader, Provider, ScriptflowError, StudioConfig,
    StudioController, StudioEvent, StudioState, TONES, Theme, ThemeStore, ViewMode, export_path,
    render_print_sheet, save_csv,
};

mod output;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliProvider {
    Gemini,
    Openai,
    Grok,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Gemini => Provider::Gemini,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Grok => Provider::Grok,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum CliDuration {
    #[default]
    Short,
    Medium,
    Long,
    Custom,
}

impl From<CliDuration> for DurationChoice {
    fn from(cli: CliDuration) -> Self {
        match cli {
            CliDuration::Short => DurationChoice::Short,
            CliDuration::Medium => DurationChoice::Medium,
            CliDuration::Long => DurationChoice::Long,
            CliDuration::Custom => DurationChoice::Custom,
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum CliView {
    #[default]
    Clean,
    Production,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliTheme {
    Light,
    Dark,
}

impl From<CliTheme> for Theme {
    fn from(cli: CliTheme) -> Self {
        match cli {
            CliTheme::Light => Theme::Light,
            CliTheme::Dark => Theme::Dark,
        }
    }
}

#[derive(Parser)]
#[command(name = "scriptflow")]
#[command(about = "Turn a video idea into a production-ready script with an AI hype rating")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a script and its hype analysis
    Generate(GenerateArgs),
    /// Rewrite one scene of a generated script (JSON from `generate --view json`)
    Refine(RefineArgs),
    /// Render or export a generated script
    Export(ExportArgs),
    /// Show or set the studio theme
    Theme {
        /// New theme; omit to print the current one
        theme: Option<CliTheme>,
    },
}

#[derive(Args)]
struct ProviderArgs {
    /// AI provider (defaults to SCRIPTFLOW_PROVIDER, then gemini)
    #[arg(short, long)]
    provider: Option<CliProvider>,

    /// Model override (defaults to SCRIPTFLOW_MODEL, then the provider default)
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Args)]
struct OutputArgs {
    /// How to render the script
    #[arg(long, value_enum, default_value = "clean")]
    view: CliView,

    /// Write the production table as CSV (a directory gets production_script.csv)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print a printable production sheet
    #[arg(long)]
    print: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Project title
    #[arg(short, long)]
    title: String,

    /// Tone of voice
    #[arg(long, default_value = TONES[0])]
    tone: String,

    /// Target platform
    #[arg(long, default_value = PLATFORMS[0])]
    platform: String,

    /// Target length
    #[arg(short, long, value_enum, default_value = "short")]
    duration: CliDuration,

    /// Free-text duration used with `--duration custom` (e.g. "45s")
    #[arg(long, default_value = "")]
    custom_duration: String,

    /// Who is watching?
    #[arg(long)]
    audience: Option<String>,

    /// Pacing, e.g. "fast cuts"
    #[arg(long)]
    pacing: Option<String>,

    /// How should it end?
    #[arg(long)]
    cta: Option<String>,

    /// Mandatory words/phrases
    #[arg(long)]
    keywords: Option<String>,

    /// Speaker persona, e.g. "High Energy Gen Z"
    #[arg(long)]
    persona: Option<String>,

    /// Visual theme, e.g. "Dark Aesthetic, Minimalist"
    #[arg(long)]
    visual_theme: Option<String>,

    /// Reference style, e.g. "Like MKBHD"
    #[arg(long)]
    reference_style: Option<String>,

    #[command(flatten)]
    provider: ProviderArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl GenerateArgs {
    fn form_edits(&self) -> Vec<FormEdit> {
        let mut edits = vec![
            FormEdit::Title(self.title.clone()),
            FormEdit::Tone(self.tone.clone()),
            FormEdit::Platform(self.platform.clone()),
            FormEdit::Duration(self.duration.into()),
            FormEdit::CustomDuration(self.custom_duration.clone()),
        ];
        let advanced = [
            (AdvancedField::Audience, &self.audience),
            (AdvancedField::Pacing, &self.pacing),
            (AdvancedField::Cta, &self.cta),
            (AdvancedField::Keywords, &self.keywords),
            (AdvancedField::SpeakerPersona, &self.persona),
            (AdvancedField::VisualTheme, &self.visual_theme),
            (AdvancedField::ReferenceStyle, &self.reference_style),
        ];
        edits.extend(
            advanced
                .into_iter()
                .filter_map(|(field, value)| value.clone().map(|v| FormEdit::Advanced(field, v))),
        );
        edits
    }
}

#[derive(Args)]
struct RefineArgs {
    /// Generated script JSON
    content: PathBuf,

    /// Scene number to rewrite (1-indexed)
    #[arg(short, long)]
    scene: usize,

    /// What should change, e.g. "switch to a drone shot"
    #[arg(short, long)]
    instruction: String,

    /// Project title given to the model (defaults to the file name)
    #[arg(short, long)]
    title: Option<String>,

    /// Write the updated JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Generated script JSON
    content: PathBuf,

    /// Project title for the print sheet (defaults to the file name)
    #[arg(short, long)]
    title: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn setup_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!("failed to initialise tracing: {err}"))
}

fn build_client(args: &ProviderArgs) -> Result<HttpGenerationClient> {
    let mut config = StudioConfig::from_env()?.with_model(args.model.clone());
    if let Some(provider) = args.provider {
        config = config.with_provider(provider.into());
    }
    let client = HttpGenerationClient::new(&config)?;
    if !client.has_api_key() {
        eprintln!(
            "{} no API key for {}; requests will fail",
            style("Warning:").yellow().bold(),
            client.provider()
        );
    }
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(args).await,
        Command::Refine(args) => refine(args).await,
        Command::Export(args) => export(args).await,
        Command::Theme { theme } => theme_command(theme.map(Theme::from)),
    }
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let client = build_client(&args.provider)?;
    let provider = client.provider();
    let mut controller = StudioController::new(Arc::new(client));

    for edit in args.form_edits() {
        controller.dispatch(StudioEvent::Form(edit)).await;
    }
    if !controller.state().title_is_valid() {
        bail!("project title must not be empty");
    }

    if args.output.view != CliView::Json {
        println!(
            "\n{}  {}\n",
            style("scriptflow").cyan().bold(),
            style("Script Studio").dim()
        );
    }

    let started = Instant::now();
    let spinner = create_spinner(&format!("Synthesizing vision with {}...", provider));
    let state = controller.dispatch(StudioEvent::Submit).await;

    if state.screen != AppScreen::Editor {
        spinner.finish_with_message(format!("{} Generation failed", style("✗").red().bold()));
        let message = state.error.clone().unwrap_or_default();
        bail!(message);
    }
    spinner.finish_with_message(format!(
        "{} Script generated: {} scenes {}",
        style("✓").green().bold(),
        state.script().len(),
        style(format!("[{}]", format_duration(started.elapsed()))).dim()
    ));
    info!(title = %state.title, "generation complete");

    let state = controller.into_state();
    let content = GeneratedContent {
        script: state.script.clone().unwrap_or_default(),
        analysis: state.analysis.clone().unwrap_or_default(),
    };
    let header = PrintHeader {
        title: &state.title,
        date: chrono::Local::now().date_naive(),
        platform: &state.platform,
        tone: &state.tone,
        duration: state.duration_label(),
    };
    render(&content, &header, &args.output).await
}

async fn refine(args: RefineArgs) -> Result<()> {
    if args.instruction.trim().is_empty() {
        bail!("refine instruction must not be empty");
    }
    let content = load_content(&args.content).await?;
    let index = args
        .scene
        .checked_sub(1)
        .filter(|i| *i < content.script.len())
        .ok_or(ScriptflowError::SegmentOutOfRange {
            index: args.scene,
            len: content.script.len(),
        })?;

    let client = build_client(&args.provider)?;
    let state = StudioState {
        screen: AppScreen::Editor,
        title: args.title.unwrap_or_else(|| title_from_path(&args.content)),
        script: Some(content.script),
        analysis: Some(content.analysis),
        view_mode: ViewMode::Production,
        ..StudioState::default()
    };
    let mut controller = StudioController::with_state(Arc::new(client), state);

    controller.dispatch(StudioEvent::OpenRefine(index)).await;
    controller
        .dispatch(StudioEvent::RefineFeedbackChanged(args.instruction))
        .await;

    let spinner = create_spinner(&format!("Refining scene {}...", args.scene));
    let state = controller.dispatch(StudioEvent::SubmitRefine).await;
    if let Err(err) = refine_outcome(state) {
        spinner.finish_with_message(format!("{} {}", style("✗").red().bold(), err));
        return Err(err);
    }
    spinner.finish_with_message(format!(
        "{} Scene {} rewritten",
        style("✓").green().bold(),
        args.scene
    ));

    let updated = GeneratedContent {
        script: state.script().to_vec(),
        analysis: state.analysis.clone().unwrap_or_default(),
    };
    let json = serde_json::to_string_pretty(&updated)?;
    match args.output {
        Some(path) => {
            fs::write(&path, json)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} {}", style("Saved:").dim(), style(path.display()).cyan());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// A refine only succeeded if the dialog closed without raising an alert.
fn refine_outcome(state: &StudioState) -> Result<()> {
    if let Some(alert) = &state.alert {
        bail!(alert.clone());
    }
    if state.refine.is_some() {
        bail!("scene was not rewritten");
    }
    Ok(())
}

async fn export(args: ExportArgs) -> Result<()> {
    let content = load_content(&args.content).await?;
    let title = args.title.unwrap_or_else(|| title_from_path(&args.content));
    let header = PrintHeader {
        title: &title,
        date: chrono::Local::now().date_naive(),
        platform: "-",
        tone: "-",
        duration: "-",
    };
    render(&content, &header, &args.output).await
}

fn theme_command(theme: Option<Theme>) -> Result<()> {
    let store = ThemeStore::in_config_dir();
    match theme {
        Some(theme) => {
            store.save(theme)?;
            println!("{} theme set to {}", style("✓").green().bold(), style(theme).cyan());
        }
        None => println!("{}", store.load()),
    }
    Ok(())
}

async fn render(
    content: &GeneratedContent,
    header: &PrintHeader<'_>,
    output: &OutputArgs,
) -> Result<()> {
    match output.view {
        CliView::Json => println!("{}", serde_json::to_string_pretty(content)?),
        CliView::Clean => {
            output::print_rule();
            output::print_analysis(&content.analysis);
            output::print_rule();
            output::print_clean(&content.script);
        }
        CliView::Production => {
            output::print_rule();
            output::print_analysis(&content.analysis);
            output::print_rule();
            output::print_production(&content.script);
        }
    }

    if let Some(target) = &output.csv {
        let path = export_path(Some(target), CSV_FILE_NAME);
        save_csv(&content.script, &path).await?;
        eprintln!("{} {}", style("Saved:").dim(), style(path.display()).cyan());
    }

    if output.print {
        println!("{}", render_print_sheet(header, &content.script));
    }
    Ok(())
}

async fn load_content(path: &Path) -> Result<GeneratedContent> {
    let json = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("{} is not a generated script", path.display()))
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_else(|| "Untitled".to_string())
}
