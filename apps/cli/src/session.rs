//! Line-oriented highlight editor.
//!
//! Each input line is one editor event; `seek` stands in for the player's
//! position ticks.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result, anyhow, bail};
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use livecut_core::{
    Editor, EditorMode, FfmpegTranscoder, LivecutError, SidePanel, export_range,
    format_highlight_duration, save_analysis, time,
};

use crate::ui::{check, create_spinner, cross, until_cancelled};

// cues shown on each side of the focused one
const TRANSCRIPT_CONTEXT: usize = 4;

pub struct SessionContext {
    pub video: PathBuf,
    pub analysis_path: PathBuf,
    pub output_dir: PathBuf,
    pub transcoder: FfmpegTranscoder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    List,
    Select(String),
    Deselect,
    /// Zero-based cue indices.
    Toggle(Vec<usize>),
    Seek(u64),
    MarkIn,
    MarkOut,
    AutoScroll(bool),
    View(SidePanel),
    Transcript { all: bool },
    Export(Option<PathBuf>),
    Save,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "list" | "ls" | "l" => SessionCommand::List,
        "select" | "s" => match rest.as_slice() {
            [reference] => SessionCommand::Select(reference.to_string()),
            _ => bail!("usage: select <NUMBER|ID>"),
        },
        "deselect" | "d" => SessionCommand::Deselect,
        "toggle" | "t" => {
            if rest.is_empty() {
                bail!("usage: toggle <CUE>...");
            }
            let cues = rest
                .iter()
                .map(|word| parse_cue_number(word))
                .collect::<Result<Vec<_>>>()?;
            SessionCommand::Toggle(cues)
        }
        "seek" | "g" => match rest.as_slice() {
            [position] => SessionCommand::Seek(parse_position(position)?),
            _ => bail!("usage: seek <MM:SS|HH:MM:SS|SECONDS>"),
        },
        "in" => SessionCommand::MarkIn,
        "out" => SessionCommand::MarkOut,
        "autoscroll" => match rest.as_slice() {
            ["on"] => SessionCommand::AutoScroll(true),
            ["off"] => SessionCommand::AutoScroll(false),
            _ => bail!("usage: autoscroll on|off"),
        },
        "view" => match rest.as_slice() {
            ["transcript"] => SessionCommand::View(SidePanel::Transcript),
            ["summary"] => SessionCommand::View(SidePanel::Summary),
            _ => bail!("usage: view transcript|summary"),
        },
        "transcript" | "tr" => match rest.as_slice() {
            [] => SessionCommand::Transcript { all: false },
            ["all"] => SessionCommand::Transcript { all: true },
            _ => bail!("usage: transcript [all]"),
        },
        "export" | "x" => match rest.as_slice() {
            [] => SessionCommand::Export(None),
            [path] => SessionCommand::Export(Some(PathBuf::from(path))),
            _ => bail!("usage: export [PATH]"),
        },
        "save" | "w" => SessionCommand::Save,
        "help" | "h" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => bail!("unknown command {:?}; type `help`", other),
    };

    Ok(Some(command))
}

fn parse_cue_number(word: &str) -> Result<usize> {
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(anyhow!("cue numbers start at 1, got {:?}", word)),
    }
}

fn parse_position(word: &str) -> Result<u64> {
    if let Ok(secs) = word.parse::<u64>() {
        return secs
            .checked_mul(1000)
            .ok_or_else(|| anyhow!("position {} is out of range", word));
    }
    time::decode(word).map_err(|e| anyhow!(e))
}

/// Resolve a 1-based list number or a highlight id. Ids win over numbers.
pub fn resolve_highlight(editor: &Editor, reference: &str) -> Option<usize> {
    if let Some(index) = editor.find_highlight(reference) {
        return Some(index);
    }
    match reference.parse::<usize>() {
        Ok(n) if n >= 1 && n <= editor.highlights().len() => Some(n - 1),
        _ => None,
    }
}

pub async fn run(mut editor: Editor, ctx: SessionContext) -> Result<()> {
    tracing::info!(
        session_id = %editor.session_id(),
        video = %ctx.video.display(),
        "Editing session"
    );

    render_list(&editor);
    println!("{}", style("Type `help` for commands.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut dirty = false;
    let mut quit_armed = false;

    loop {
        prompt(&editor);
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{} {}", cross(), e);
                continue;
            }
        };

        if command != SessionCommand::Quit {
            quit_armed = false;
        }

        match command {
            SessionCommand::Quit => {
                if dirty && !quit_armed {
                    println!(
                        "{} Unsaved edits; `save` first or `quit` again to discard",
                        style("!").yellow().bold()
                    );
                    quit_armed = true;
                    continue;
                }
                break;
            }
            SessionCommand::Save => match save(&editor, &ctx.analysis_path).await {
                Ok(()) => dirty = false,
                Err(e) => println!("{} {:#}", cross(), e),
            },
            SessionCommand::Export(path) => {
                if let Err(e) = export(&editor, &ctx, path).await {
                    println!("{} {:#}", cross(), e);
                }
            }
            other => match apply(&mut editor, other) {
                Ok(changed) => dirty |= changed,
                Err(e) => println!("{} {:#}", cross(), e),
            },
        }
    }

    tracing::info!(session_id = %editor.session_id(), "Session ended");
    Ok(())
}

/// Apply a command that only touches editor state. Returns whether a
/// highlight range changed.
fn apply(editor: &mut Editor, command: SessionCommand) -> Result<bool> {
    match command {
        SessionCommand::List => render_list(editor),
        SessionCommand::Select(reference) => {
            let index = resolve_highlight(editor, &reference)
                .ok_or_else(|| anyhow!("no highlight matches {:?}", reference))?;
            let seek = editor.select_highlight(index).map_err(LivecutError::from)?;
            if let Some(position) = seek {
                editor.advance_playback(position);
            }
            render_highlight(editor, index);
            render_transcript(editor, false);
        }
        SessionCommand::Deselect => {
            editor.deselect_highlight();
            println!("{} Browsing", check());
        }
        SessionCommand::Toggle(cues) => {
            let index = editor.active_highlight().ok_or_else(|| {
                anyhow!("select a highlight before toggling cues")
            })?;
            let len = editor.cues().len();
            if let Some(bad) = cues.iter().find(|&&cue| cue >= len) {
                bail!("cue {} does not exist ({} cues)", bad + 1, len);
            }
            let before = editor.highlights()[index].clone();
            for cue in cues {
                editor.toggle_cue(cue).map_err(LivecutError::from)?;
            }
            let after = &editor.highlights()[index];
            let changed =
                before.start_time != after.start_time || before.end_time != after.end_time;
            if editor.selected_cues().is_empty() {
                println!(
                    "{} Selection empty; range kept at {}–{}",
                    style("!").yellow().bold(),
                    after.start_time,
                    after.end_time
                );
            } else {
                render_highlight(editor, index);
            }
            return Ok(changed);
        }
        SessionCommand::Seek(position) => {
            let update = editor.advance_playback(position);
            let showing = update
                .display_highlight
                .map(|i| format!("  {}", highlight_label(editor, i)))
                .unwrap_or_default();
            println!(
                "{} {}{}",
                style("▶").cyan(),
                time::encode(update.position_ms),
                showing
            );
            if let Some(cue) = update.scroll_to_cue {
                render_window(editor, cue);
            }
        }
        SessionCommand::MarkIn => return mark(editor, Edge::Start),
        SessionCommand::MarkOut => return mark(editor, Edge::End),
        SessionCommand::AutoScroll(enabled) => {
            editor.set_auto_scroll(enabled);
            println!(
                "{} Auto-scroll {}",
                check(),
                if enabled { "on" } else { "off" }
            );
        }
        SessionCommand::View(panel) => {
            editor.set_panel(panel);
            match panel {
                SidePanel::Transcript => render_transcript(editor, false),
                SidePanel::Summary => render_summary(editor),
            }
        }
        SessionCommand::Transcript { all } => render_transcript(editor, all),
        SessionCommand::Help => render_help(),
        SessionCommand::Export(_) | SessionCommand::Save | SessionCommand::Quit => {}
    }
    Ok(false)
}

enum Edge {
    Start,
    End,
}

fn mark(editor: &mut Editor, edge: Edge) -> Result<bool> {
    let index = editor
        .active_highlight()
        .ok_or_else(|| anyhow!("select a highlight before marking"))?;
    let marked = match edge {
        Edge::Start => editor.set_start_at_playhead(),
        Edge::End => editor.set_end_at_playhead(),
    };
    marked.map_err(LivecutError::from)?;
    render_highlight(editor, index);
    Ok(true)
}

async fn save(editor: &Editor, path: &Path) -> Result<()> {
    save_analysis(&editor.to_analysis(), path).await?;
    println!("{} Saved {}", check(), style(path.display()).cyan());
    Ok(())
}

async fn export(editor: &Editor, ctx: &SessionContext, output: Option<PathBuf>) -> Result<()> {
    let request = editor.clip_request().map_err(LivecutError::from)?;
    let output = output.unwrap_or_else(|| ctx.output_dir.join(&request.file_name));

    if !ctx.transcoder.is_available().await {
        bail!("ffmpeg not found; set it with `livecut config set --ffmpeg-path <PATH>`");
    }

    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Exporting {}...", request.highlight_id));
    match until_cancelled(export_range(
        &ctx.transcoder,
        &ctx.video,
        request.range,
        &output,
    ))
    .await
    {
        Some(Ok(path)) => {
            spinner.finish_with_message(format!(
                "{} Exported: {} {}",
                check(),
                style(path.display()).cyan(),
                style(format!("[{}]", time::format_duration(step_start.elapsed()))).dim()
            ));
            Ok(())
        }
        Some(Err(e)) => {
            spinner.finish_and_clear();
            Err(LivecutError::from(e).into())
        }
        None => {
            spinner.finish_and_clear();
            bail!("Export cancelled")
        }
    }
}

fn prompt(editor: &Editor) {
    let mode = match editor.mode() {
        EditorMode::Idle => "idle".to_string(),
        EditorMode::Browsing => "browse".to_string(),
        EditorMode::Editing(i) => format!("edit {}", editor.highlights()[i].id),
    };
    print!(
        "{} {} {} ",
        style(time::encode(editor.position_ms())).dim(),
        style(mode).cyan(),
        style("›").bold()
    );
    std::io::stdout().flush().ok();
}

fn highlight_label(editor: &Editor, index: usize) -> String {
    let h = &editor.highlights()[index];
    format!("#{} {} {}", index + 1, style(&h.id).dim(), h.title)
}

fn render_list(editor: &Editor) {
    if editor.highlights().is_empty() {
        println!("{}", style("No highlights.").dim());
        return;
    }
    for (i, h) in editor.highlights().iter().enumerate() {
        let marker = if editor.active_highlight() == Some(i) {
            style("●").green().bold().to_string()
        } else if editor.display_highlight() == Some(i) {
            style("▸").cyan().to_string()
        } else {
            " ".to_string()
        };
        let range = format!("{}–{}", h.start_time, h.end_time);
        let range = if editor.is_inert(i) {
            style(format!("{} (invalid range)", range)).red().to_string()
        } else {
            let duration = format_highlight_duration(h).unwrap_or_default();
            format!("{} {}", range, style(format!("({})", duration)).dim())
        };
        println!("{} {:>2}. {}  {}", marker, i + 1, range, h.title);
        if !h.tags.is_empty() {
            println!("       {}", style(h.tags.join(", ")).dim());
        }
    }
}

fn render_highlight(editor: &Editor, index: usize) {
    let h = &editor.highlights()[index];
    println!(
        "{} {}  [{}–{}]  {} cues selected",
        check(),
        highlight_label(editor, index),
        h.start_time,
        h.end_time,
        editor.selected_cues().len()
    );
    if !h.description.is_empty() {
        println!("   {}", style(&h.description).dim());
    }
}

fn render_summary(editor: &Editor) {
    println!("{}", style("Summary").bold());
    println!("{}", editor.summary());
}

fn render_transcript(editor: &Editor, all: bool) {
    if all {
        for i in 0..editor.cues().len() {
            render_cue(editor, i);
        }
        return;
    }

    let focus = editor
        .selected_cues()
        .first()
        .copied()
        .or_else(|| editor.current_cue().map(|(i, _)| i))
        .unwrap_or(0);
    let last = editor.selected_cues().last().copied().unwrap_or(focus);

    let from = focus.saturating_sub(TRANSCRIPT_CONTEXT);
    let to = (last + TRANSCRIPT_CONTEXT + 1).min(editor.cues().len());
    for i in from..to {
        render_cue(editor, i);
    }
}

fn render_window(editor: &Editor, center: usize) {
    let from = center.saturating_sub(TRANSCRIPT_CONTEXT);
    let to = (center + TRANSCRIPT_CONTEXT + 1).min(editor.cues().len());
    for i in from..to {
        render_cue(editor, i);
    }
}

fn render_cue(editor: &Editor, index: usize) {
    let cue = &editor.cues()[index];
    let selected = if editor.selected_cues().contains(&index) {
        style("[x]").green().to_string()
    } else {
        "[ ]".to_string()
    };
    let playing = if editor.current_cue().map(|(i, _)| i) == Some(index) {
        style("▶").cyan().to_string()
    } else {
        " ".to_string()
    };
    let owner = editor
        .cue_owner(index)
        .map(|h| style(format!("#{}", h + 1)).yellow().to_string())
        .unwrap_or_default();
    println!(
        "{} {} {:>4} [{}] {} {}",
        playing,
        selected,
        index + 1,
        time::encode(cue.start),
        cue.text,
        owner
    );
}

fn render_help() {
    let rows = [
        ("list", "Show highlights"),
        ("select <N|ID>", "Edit a highlight and jump to its start"),
        ("deselect", "Stop editing, follow playback"),
        ("toggle <CUE>...", "Add/remove transcript cues; re-ranges the highlight"),
        ("seek <TIME>", "Move the playhead (MM:SS, HH:MM:SS or seconds)"),
        ("in / out", "Set the start / end of the edited highlight to the playhead"),
        ("autoscroll on|off", "Follow the playhead in the transcript"),
        ("view transcript|summary", "Switch the side panel"),
        ("transcript [all]", "Show cues around the selection or playhead"),
        ("export [PATH]", "Export the highlight being edited"),
        ("save", "Write edited ranges back to the cached analysis"),
        ("quit", "Leave the editor"),
    ];
    for (command, text) in rows {
        println!("  {:<26} {}", style(command).cyan(), text);
    }
}
