//! SRT / WebVTT cue loading.
//!
//! SRT is parsed by `srtlib`. WebVTT is rewritten into SRT blocks first:
//! the header, NOTE/STYLE/REGION blocks, cue identifiers and cue settings
//! are dropped. Cues whose end does not follow their start are skipped.

use std::path::{Path, PathBuf};

use srtlib::{Subtitles, Timestamp};
use tokio::fs;

use crate::types::SubtitleCue;

#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    #[error("Failed to read subtitles from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed subtitles: {0}")]
    Malformed(#[from] srtlib::ParsingError),

    #[error("No subtitle cues found")]
    NoCues,
}

/// Read and parse a subtitle file.
pub async fn load_subtitles(path: &Path) -> Result<Vec<SubtitleCue>, SubtitleError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let cues = parse_subtitles(&content)?;
    tracing::info!(path = %path.display(), cues = cues.len(), "Loaded subtitles");
    Ok(cues)
}

/// Parse SRT or WebVTT content into ordered cues.
pub fn parse_subtitles(content: &str) -> Result<Vec<SubtitleCue>, SubtitleError> {
    let blocks = blocks(content);
    let is_vtt = blocks
        .first()
        .is_some_and(|first| first.starts_with("WEBVTT"));

    let srt = if is_vtt {
        vtt_to_srt(&blocks)
    } else {
        blocks.join("\n\n")
    };
    if srt.trim().is_empty() {
        return Err(SubtitleError::NoCues);
    }

    let cues: Vec<SubtitleCue> = Subtitles::parse_from_str(srt)?
        .to_vec()
        .into_iter()
        .filter_map(|sub| {
            let start = timestamp_to_ms(&sub.start_time);
            let end = timestamp_to_ms(&sub.end_time);
            if end <= start {
                tracing::warn!(
                    num = sub.num,
                    start,
                    end,
                    "Skipping cue with non-positive duration"
                );
                return None;
            }
            Some(SubtitleCue::new(start, end, sub.text.trim()))
        })
        .collect();

    if cues.is_empty() {
        return Err(SubtitleError::NoCues);
    }

    Ok(cues)
}

fn timestamp_to_ms(t: &Timestamp) -> u64 {
    let (hours, minutes, seconds, milliseconds) = t.get();
    milliseconds as u64 + 1000 * (seconds as u64 + 60 * (minutes as u64 + 60 * hours as u64))
}

/// Blank-line separated blocks with BOM and CRLF removed.
fn blocks(content: &str) -> Vec<String> {
    let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

fn vtt_to_srt(blocks: &[String]) -> String {
    let mut out = Vec::new();

    for block in blocks.iter().skip(1) {
        if ["NOTE", "STYLE", "REGION"]
            .iter()
            .any(|kw| block.starts_with(kw))
        {
            continue;
        }

        let mut lines = block.lines().skip_while(|line| !line.contains("-->"));
        let Some(timing) = lines.next() else {
            continue;
        };
        let text = lines.collect::<Vec<_>>().join("\n");
        if text.trim().is_empty() {
            continue;
        }

        out.push(format!(
            "{}\n{}\n{}",
            out.len() + 1,
            vtt_timing_to_srt(timing),
            text
        ));
    }

    out.join("\n\n")
}

/// `00:01.000 --> 00:03.250 align:start` → `00:00:01,000 --> 00:00:03,250`
fn vtt_timing_to_srt(line: &str) -> String {
    let (start, rest) = line.split_once("-->").unwrap_or((line, ""));
    let end = rest.split_whitespace().next().unwrap_or_default();
    format!("{} --> {}", vtt_time_to_srt(start.trim()), vtt_time_to_srt(end))
}

fn vtt_time_to_srt(value: &str) -> String {
    let value = value.replace('.', ",");
    if value.matches(':').count() == 1 {
        format!("00:{}", value)
    } else {
        value
    }
}
