//! Clip export through an external transcoder.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use tokio::process::Command;
use uuid::Uuid;

/// Characters that are not allowed in a default clip file name.
const RESERVED_FILE_NAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Export failed: {reason}")]
    ExportFailed { reason: String },
}

impl ExportError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::ExportFailed {
            reason: reason.into(),
        }
    }
}

/// A clip range in seconds from the start of the source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRange {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl ClipRange {
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub start_secs: f64,
    pub duration_secs: f64,
}

#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Resolves once the output file is complete.
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), ExportError>;
}

/// Re-encodes with libx264/aac so cut points are frame accurate.
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(request: &TranscodeRequest) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            format!("{:.3}", request.start_secs),
            "-i".to_string(),
            request.input_path.to_string_lossy().into_owned(),
            "-t".to_string(),
            format!("{:.3}", request.duration_secs),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-preset".to_string(),
            "fast".to_string(),
            "-crf".to_string(),
            "22".to_string(),
            request.output_path.to_string_lossy().into_owned(),
        ]
    }

    /// Whether the configured binary runs at all.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), ExportError> {
        let output = Command::new(&self.program)
            .args(Self::args(request))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                ExportError::failed(format!("could not run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            return Err(ExportError::failed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join("\n")
            )));
        }

        Ok(())
    }
}

/// Cut `range` out of `source` into `destination`.
pub async fn export_range(
    transcoder: &dyn Transcoder,
    source: &Path,
    range: ClipRange,
    destination: &Path,
) -> Result<PathBuf, ExportError> {
    let job_id = Uuid::new_v4();

    if !(range.start_secs >= 0.0 && range.duration_secs() > 0.0) {
        return Err(ExportError::failed(format!(
            "invalid clip range {:.3}s..{:.3}s",
            range.start_secs, range.end_secs
        )));
    }

    let request = TranscodeRequest {
        input_path: source.to_path_buf(),
        output_path: destination.to_path_buf(),
        start_secs: range.start_secs,
        duration_secs: range.duration_secs(),
    };

    tracing::info!(
        %job_id,
        source = %source.display(),
        output = %destination.display(),
        start = request.start_secs,
        duration = request.duration_secs,
        "Starting clip export"
    );

    if let Err(e) = transcoder.transcode(&request).await {
        tracing::warn!(%job_id, error = %e, "Clip export failed");
        return Err(e);
    }

    tracing::info!(%job_id, "Clip export complete");
    Ok(request.output_path)
}

pub fn sanitize_file_name(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if RESERVED_FILE_NAME_CHARS.contains(&c) {
                '-'
            } else {
                c
            }
        })
        .collect()
}

/// Default save name for a clip cut from a highlight.
pub fn default_clip_name(title: &str) -> String {
    format!("{}.mp4", sanitize_file_name(title))
}
