use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{error::Result, export::sanitize_file_name, types::AnalysisResult};

/// Get the cache directory for a given subtitle file
pub fn get_cache_dir(subtitle_path: &Path) -> PathBuf {
    get_cache_dir_in(&get_root_cache_dir(), subtitle_path)
}

pub fn get_cache_dir_in(root: &Path, subtitle_path: &Path) -> PathBuf {
    let canonical =
        std::fs::canonicalize(subtitle_path).unwrap_or_else(|_| subtitle_path.to_path_buf());
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    root.join(hasher.finish().to_string())
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("livecut")
}

/// Get the path for a cached analysis (model aware)
pub fn get_analysis_path(cache_dir: &Path, model: &str) -> PathBuf {
    cache_dir.join(format!("analysis_{}.json", sanitize_file_name(model)))
}

/// Load an analysis from a cached file
pub async fn load_analysis(path: &Path) -> Result<AnalysisResult> {
    let json_content = fs::read_to_string(path).await?;
    let analysis: AnalysisResult = serde_json::from_str(&json_content)?;
    Ok(analysis)
}

/// Save an analysis to a file, creating its directory if needed
pub async fn save_analysis(analysis: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(analysis)?;
    fs::write(path, &pretty_json).await?;
    tracing::debug!(path = %path.display(), "Analysis cached");
    Ok(())
}
