use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args, Parser, Subcommand};
use console::style;

use livecut_core::{
    AnalysisError, AnalysisResult, Editor, FfmpegTranscoder, FileSettingsStore, LivecutError,
    Settings, SettingsPatch, SettingsStore, SubtitleCue, analyze, export_range,
    format_analysis_readable, get_analysis_path, get_cache_dir, init_logging, load_analysis,
    load_subtitles, save_analysis, time,
};

use crate::{
    session::{SessionContext, resolve_highlight},
    ui::{check, create_spinner, print_banner, until_cancelled},
};

mod session;
mod ui;

#[derive(Parser)]
#[command(name = "livecut")]
#[command(
    about = "Analyze livestream subtitles with AI, edit highlight ranges, and export clips"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Send the subtitles to the model and list the highlights it finds
    Analyze {
        /// Recorded livestream video
        video: PathBuf,

        /// Subtitle track (SRT or WebVTT)
        subtitles: PathBuf,

        /// Re-run the analysis even if a cached result exists
        #[arg(short, long)]
        force: bool,
    },

    /// Interactively adjust highlight ranges and export clips
    Edit {
        /// Recorded livestream video
        video: PathBuf,

        /// Subtitle track (SRT or WebVTT)
        subtitles: PathBuf,
    },

    /// Export one clip without the interactive editor
    Export(ExportArgs),

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("range").required(true).args(["highlight", "start"])))]
struct ExportArgs {
    /// Recorded livestream video
    video: PathBuf,

    /// Highlight id or list number from the cached analysis
    #[arg(long, requires = "subtitles", conflicts_with_all = ["start", "end"])]
    highlight: Option<String>,

    /// Subtitle track the analysis was made from
    #[arg(long)]
    subtitles: Option<PathBuf>,

    /// Clip start (MM:SS or HH:MM:SS)
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Clip end (MM:SS or HH:MM:SS)
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Output file; defaults to the highlight title next to the video
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,

    /// Update one or more settings
    Set {
        /// API key for the chat-completion endpoint
        #[arg(long)]
        api_key: Option<String>,

        /// Base URL of an OpenAI-compatible API
        #[arg(long)]
        base_url: Option<String>,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// ffmpeg binary used for exports
        #[arg(long)]
        ffmpeg_path: Option<String>,

        /// Analysis request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let store = FileSettingsStore::open_default();

    let mut logging = store.get().map(|s| s.logging).unwrap_or_default();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    init_logging(&logging);

    if let Err(e) = run(cli.command, &store).await {
        eprintln!("\n{} {:#}", style("Error:").red().bold(), e);
        if is_missing_credential(&e) {
            eprintln!(
                "{} {}",
                style("Hint:").yellow().bold(),
                style("livecut config set --api-key <KEY>").cyan()
            );
        }
        std::process::exit(1);
    }
}

async fn run(command: Command, store: &FileSettingsStore) -> Result<()> {
    match command {
        Command::Analyze {
            video,
            subtitles,
            force,
        } => analyze_command(store, &video, &subtitles, force).await,
        Command::Edit { video, subtitles } => edit_command(store, &video, &subtitles).await,
        Command::Export(args) => export_command(store, args).await,
        Command::Config { action } => config_command(store, action),
    }
}

fn is_missing_credential(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<LivecutError>(),
        Some(LivecutError::Analysis(AnalysisError::MissingCredential))
    )
}

async fn load_cues(subtitles: &Path) -> Result<Vec<SubtitleCue>> {
    let step_start = Instant::now();
    let spinner = create_spinner("Reading subtitles...");
    let cues = match load_subtitles(subtitles).await {
        Ok(cues) => cues,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(LivecutError::from(e).into());
        }
    };
    let duration = cues.last().map(|c| c.end).unwrap_or(0);
    spinner.finish_with_message(format!(
        "{} Subtitles: {} cues, {} {}",
        check(),
        cues.len(),
        time::encode(duration),
        style(format!("[{}]", time::format_duration(step_start.elapsed()))).dim()
    ));
    Ok(cues)
}

fn ensure_video(video: &Path) -> Result<()> {
    if !video.is_file() {
        bail!("Video file not found: {}", video.display());
    }
    Ok(())
}

async fn analyze_command(
    store: &FileSettingsStore,
    video: &Path,
    subtitles: &Path,
    force: bool,
) -> Result<()> {
    ensure_video(video)?;
    print_banner("Livestream Highlights");

    let settings = store.get().map_err(LivecutError::from)?;
    let cues = load_cues(subtitles).await?;

    let analysis_path = get_analysis_path(&get_cache_dir(subtitles), &settings.model);
    let step_start = Instant::now();

    let analysis = if !force && analysis_path.exists() {
        let analysis = load_analysis(&analysis_path).await?;
        println!(
            "{} Analyzed ({}) {}",
            check(),
            settings.model,
            style("(cached)").dim()
        );
        analysis
    } else {
        // Validate API key early
        if !settings.has_api_key() {
            return Err(LivecutError::from(AnalysisError::MissingCredential).into());
        }

        let spinner = create_spinner(&format!("Analyzing with {}...", settings.model));
        let analysis = match until_cancelled(analyze(store, &cues)).await {
            Some(Ok(analysis)) => analysis,
            Some(Err(e)) => {
                spinner.finish_and_clear();
                return Err(anyhow::Error::from(e).context("Analysis failed"));
            }
            None => {
                spinner.finish_and_clear();
                bail!("Analysis cancelled");
            }
        };
        save_analysis(&analysis, &analysis_path).await?;
        spinner.finish_with_message(format!(
            "{} Analyzed ({}): {} highlights {}",
            check(),
            settings.model,
            analysis.highlights.len(),
            style(format!("[{}]", time::format_duration(step_start.elapsed()))).dim()
        ));
        analysis
    };

    println!(
        "\n{} {}\n",
        style("Saved:").dim(),
        style(analysis_path.display()).cyan()
    );
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", format_analysis_readable(&analysis));
    println!(
        "{} {}",
        style("Next:").dim(),
        style(format!(
            "livecut edit {} {}",
            video.display(),
            subtitles.display()
        ))
        .cyan()
    );

    Ok(())
}

async fn load_cached_analysis(
    settings: &Settings,
    subtitles: &Path,
) -> Result<(AnalysisResult, PathBuf)> {
    let analysis_path = get_analysis_path(&get_cache_dir(subtitles), &settings.model);
    if !analysis_path.exists() {
        return Err(LivecutError::AnalysisNotCached {
            subtitle_path: subtitles.to_path_buf(),
        }
        .into());
    }
    let analysis = load_analysis(&analysis_path).await?;
    Ok((analysis, analysis_path))
}

async fn edit_command(store: &FileSettingsStore, video: &Path, subtitles: &Path) -> Result<()> {
    ensure_video(video)?;
    print_banner("Highlight Editor");

    let settings = store.get().map_err(LivecutError::from)?;
    let cues = load_cues(subtitles).await?;
    let (analysis, analysis_path) = load_cached_analysis(&settings, subtitles).await?;

    let editor = Editor::new(Arc::from(cues), &analysis);
    let ctx = SessionContext {
        video: video.to_path_buf(),
        analysis_path,
        output_dir: output_dir_for(video),
        transcoder: FfmpegTranscoder::new(&settings.ffmpeg_path),
    };

    session::run(editor, ctx).await
}

async fn export_command(store: &FileSettingsStore, args: ExportArgs) -> Result<()> {
    ensure_video(&args.video)?;
    print_banner("Clip Export");

    let settings = store.get().map_err(LivecutError::from)?;

    let (range, file_name) = match (&args.highlight, &args.subtitles, &args.start, &args.end) {
        (Some(reference), Some(subtitles), _, _) => {
            let cues = load_cues(subtitles).await?;
            let (analysis, _) = load_cached_analysis(&settings, subtitles).await?;
            let editor = Editor::new(Arc::from(cues), &analysis);
            let index = resolve_highlight(&editor, reference)
                .with_context(|| format!("No highlight matches {:?}", reference))?;
            let clip = editor
                .clip_request_for(index)
                .map_err(LivecutError::from)?;
            (clip.range, clip.file_name)
        }
        (None, _, Some(start), Some(end)) => {
            let start_ms = time::decode(start).map_err(LivecutError::from)?;
            let end_ms = time::decode(end).map_err(LivecutError::from)?;
            let range = livecut_core::ClipRange {
                start_secs: time::ms_to_secs(start_ms),
                end_secs: time::ms_to_secs(end_ms),
            };
            let name = livecut_core::default_clip_name(&format!(
                "clip {}-{}",
                time::encode(start_ms),
                time::encode(end_ms)
            ));
            (range, name)
        }
        _ => bail!("Pass either --highlight with --subtitles, or --start and --end"),
    };

    let output = args
        .output
        .unwrap_or_else(|| output_dir_for(&args.video).join(file_name));

    let transcoder = FfmpegTranscoder::new(&settings.ffmpeg_path);
    if !transcoder.is_available().await {
        bail!(
            "{} not found; install ffmpeg or run `livecut config set --ffmpeg-path <PATH>`",
            settings.ffmpeg_path
        );
    }

    let step_start = Instant::now();
    let spinner = create_spinner(&format!(
        "Exporting {}–{}...",
        time::encode(time::secs_to_ms(range.start_secs)),
        time::encode(time::secs_to_ms(range.end_secs))
    ));
    match until_cancelled(export_range(&transcoder, &args.video, range, &output)).await {
        Some(Ok(path)) => spinner.finish_with_message(format!(
            "{} Exported: {} {}",
            check(),
            style(path.display()).cyan(),
            style(format!("[{}]", time::format_duration(step_start.elapsed()))).dim()
        )),
        Some(Err(e)) => {
            spinner.finish_and_clear();
            return Err(LivecutError::from(e).into());
        }
        None => {
            spinner.finish_and_clear();
            bail!("Export cancelled");
        }
    }

    Ok(())
}

fn config_command(store: &FileSettingsStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = store.get().map_err(LivecutError::from)?;
            print_settings(store, &settings);
        }
        ConfigAction::Set {
            api_key,
            base_url,
            model,
            ffmpeg_path,
            timeout,
        } => {
            let patch = SettingsPatch {
                api_key,
                base_url,
                model,
                ffmpeg_path,
                request_timeout_secs: timeout,
            };
            if patch.is_empty() {
                bail!("Nothing to set; see `livecut config set --help`");
            }
            let settings = store.set(patch).map_err(LivecutError::from)?;
            println!("{} Settings saved", check());
            print_settings(store, &settings);
        }
    }
    Ok(())
}

fn print_settings(store: &FileSettingsStore, settings: &Settings) {
    println!("{} {}", style("File:").dim(), style(store.path().display()).cyan());
    println!("  api_key:     {}", settings.masked_api_key());
    println!("  base_url:    {}", settings.base_url);
    println!("  model:       {}", settings.model);
    println!("  ffmpeg_path: {}", settings.ffmpeg_path);
    println!("  timeout:     {}s", settings.request_timeout_secs);
    println!("  log level:   {}", settings.logging.level);
}

fn output_dir_for(video: &Path) -> PathBuf {
    video
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
