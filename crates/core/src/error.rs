use std::path::PathBuf;
use thiserror::Error;

use crate::{
    analysis::AnalysisError, editor::EditorError, export::ExportError, mapper::MapperError,
    settings::SettingsError, subtitle::SubtitleError, time::TimestampError,
};

#[derive(Error, Debug)]
pub enum LivecutError {
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("No cached analysis for {subtitle_path}; run `livecut analyze` first")]
    AnalysisNotCached { subtitle_path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LivecutError>;
