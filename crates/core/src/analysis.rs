//! Subtitle analysis: one chat-completion round trip that turns a timed
//! transcript into a summary plus an ordered list of highlights.

use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    error::Result,
    provider::{ChatCompletion, ChatRequest, OpenAiCompatibleClient},
    settings::SettingsStore,
    time,
    types::{AnalysisResult, Highlight, SubtitleCue},
};

pub static HIGHLIGHTS_PROMPT: &str = r#"You are an expert analyst of livestream content. Analyze the following time-stamped livestream subtitles and extract the core points.

Every core point MUST correspond to one continuous segment of the video. Output ONLY a JSON object with this exact structure:

{
  "summary": "Overall summary of the content (under 200 words)",
  "highlights": [
    {
      "id": "h1",
      "title": "Short point title (10 words max)",
      "description": "Detailed explanation of the point (50-100 words)",
      "startTime": "00:15:30",
      "endTime": "00:18:45",
      "tags": ["insight", "method"]
    }
  ]
}

Rules:
1. Extract 5-10 core points, each with a matching video time range
2. Each segment should contain a complete thought; 1-5 minutes is a good length
3. title is a short headline, description is the detailed explanation
4. Timestamps use HH:MM:SS or MM:SS
5. tags classify the segment, e.g. insight, case study, quote, method, story, interaction
6. List highlights in chronological order"#;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No API key configured; set one with `livecut config set --api-key <KEY>`")]
    MissingCredential,

    #[error("No subtitle cues to analyze")]
    NoSubtitles,

    #[error("The model returned an empty response")]
    EmptyResponse,

    #[error("Invalid analysis response: {reason}")]
    InvalidResponseShape { reason: String },

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// One `[MM:SS] text` line per cue, in cue order.
pub fn build_prompt(cues: &[SubtitleCue]) -> String {
    cues.iter()
        .map(|cue| format!("[{}] {}", time::encode(cue.start), cue.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Send the cues to the model and validate its reply.
pub async fn request_analysis(
    client: &dyn ChatCompletion,
    cues: &[SubtitleCue],
) -> std::result::Result<AnalysisResult, AnalysisError> {
    if cues.is_empty() {
        return Err(AnalysisError::NoSubtitles);
    }

    let request = ChatRequest {
        system: HIGHLIGHTS_PROMPT.to_string(),
        user: build_prompt(cues),
    };

    let content = client
        .complete(request)
        .await?
        .ok_or(AnalysisError::EmptyResponse)?;

    let result = parse_analysis_response(&content)?;
    tracing::info!(
        model = client.model(),
        highlights = result.highlights.len(),
        "Analysis complete"
    );
    Ok(result)
}

/// Load settings, check credentials, and run [`request_analysis`] against the
/// configured endpoint.
pub async fn analyze(store: &dyn SettingsStore, cues: &[SubtitleCue]) -> Result<AnalysisResult> {
    let settings = store.get()?;
    let client = OpenAiCompatibleClient::from_settings(&settings)?;
    Ok(request_analysis(&client, cues).await?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHighlight {
    #[serde(default)]
    id: Option<serde_json::Value>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    tags: Option<Vec<serde_json::Value>>,
}

impl RawHighlight {
    fn source_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// String tags only; anything else the model put in the list is dropped.
    fn string_tags(&mut self) -> Vec<String> {
        self.tags
            .take()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tag| match tag {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

/// Validate a model reply into an [`AnalysisResult`]. Missing or mistyped
/// required fields reject the whole reply.
pub fn parse_analysis_response(
    content: &str,
) -> std::result::Result<AnalysisResult, AnalysisError> {
    let shape = |reason: String| AnalysisError::InvalidResponseShape { reason };

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| shape(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| shape("top-level value is not an object".to_string()))?;

    let summary = object
        .get("summary")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| shape("missing string field `summary`".to_string()))?;

    let raw = object
        .get("highlights")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| shape("missing array field `highlights`".to_string()))?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            RawHighlight::deserialize(item).map_err(|e| shape(format!("highlight {i}: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(AnalysisResult {
        summary: summary.to_string(),
        highlights: assign_ids(raw),
    })
}

/// Keep the first occurrence of each source id; anything missing or repeated
/// gets `h<index>`.
fn assign_ids(raw: Vec<RawHighlight>) -> Vec<Highlight> {
    let mut taken: HashSet<String> = HashSet::new();

    raw.into_iter()
        .enumerate()
        .map(|(i, mut item)| {
            let tags = item.string_tags();
            let id = match item.source_id() {
                Some(id) if !taken.contains(&id) => id,
                _ => generated_id(i, &taken),
            };
            taken.insert(id.clone());

            Highlight {
                id,
                title: item.title,
                description: item.description.or(item.reason).unwrap_or_default(),
                start_time: item.start_time,
                end_time: item.end_time,
                tags,
            }
        })
        .collect()
}

fn generated_id(index: usize, taken: &HashSet<String>) -> String {
    let base = format!("h{}", index);
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
