use serde::{Deserialize, Serialize};

use crate::time::{self, TimestampError};

/// One subtitle entry. Times are milliseconds from the start of the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub start: u64,
    pub end: u64,
    pub text: String,
}

impl SubtitleCue {
    pub fn new(start: u64, end: u64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Half-open containment of a playback position.
    pub fn contains(&self, position_ms: u64) -> bool {
        position_ms >= self.start && position_ms < self.end
    }
}

/// A time interval in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u64,
    pub end: u64,
}

impl TimeRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, position_ms: u64) -> bool {
        position_ms >= self.start && position_ms < self.end
    }

    pub fn duration_ms(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub tags: Vec<String>,
}

impl Highlight {
    /// Decodes the display timestamps. Fails when either side does not parse
    /// or when the end does not strictly follow the start.
    pub fn range(&self) -> Result<TimeRange, TimestampError> {
        let start = time::decode(&self.start_time)?;
        let end = time::decode(&self.end_time)?;
        if end <= start {
            return Err(TimestampError::MalformedTimestamp {
                value: format!("{}-{}", self.start_time, self.end_time),
                reason: "end does not follow start".to_string(),
            });
        }
        Ok(TimeRange { start, end })
    }

    pub fn set_range(&mut self, start_time: String, end_time: String) {
        self.start_time = start_time;
        self.end_time = end_time;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub highlights: Vec<Highlight>,
}
