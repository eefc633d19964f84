//! Livecut Core Library
//!
//! Subtitle loading, AI highlight analysis, highlight/cue mapping, the
//! timeline editor state machine, and clip export.

pub mod analysis;
pub mod cache;
pub mod editor;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod mapper;
pub mod provider;
pub mod settings;
pub mod subtitle;
pub mod time;
pub mod types;

// Re-export commonly used items at crate root
pub use analysis::{
    AnalysisError, analyze, build_prompt, parse_analysis_response, request_analysis,
};
pub use cache::{
    get_analysis_path, get_cache_dir, get_root_cache_dir, load_analysis, save_analysis,
};
pub use editor::{ClipRequest, Editor, EditorError, EditorMode, PlaybackUpdate, SidePanel};
pub use error::{LivecutError, Result};
pub use export::{
    ClipRange, ExportError, FfmpegTranscoder, Transcoder, default_clip_name, export_range,
    sanitize_file_name,
};
pub use format::{format_analysis_readable, format_highlight_duration};
pub use logging::init_logging;
pub use mapper::{MapperError, cue_belongs_to_highlight, cues_overlapping, range_covering};
pub use provider::{ChatCompletion, ChatRequest, OpenAiCompatibleClient};
pub use settings::{
    FileSettingsStore, LoggingConfig, MemorySettingsStore, Settings, SettingsError, SettingsPatch,
    SettingsStore,
};
pub use subtitle::{SubtitleError, load_subtitles, parse_subtitles};
pub use time::TimestampError;
pub use types::{AnalysisResult, Highlight, SubtitleCue, TimeRange};
