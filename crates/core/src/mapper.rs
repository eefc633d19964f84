//! Mapping between highlight time ranges and the subtitle cues they cover.
//!
//! Selection uses the loose overlap test so a partially covered cue can be
//! pulled in by a click. Ownership uses full containment so a cue straddling
//! two highlights belongs to neither.

use std::collections::BTreeSet;

use crate::types::{SubtitleCue, TimeRange};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapperError {
    #[error("Cannot compute a covering range for an empty cue selection")]
    EmptySelection,
}

/// Indices of every cue that strictly overlaps `range`. Touching a boundary
/// does not count.
pub fn cues_overlapping(range: TimeRange, cues: &[SubtitleCue]) -> BTreeSet<usize> {
    cues.iter()
        .enumerate()
        .filter(|(_, cue)| cue.end > range.start && cue.start < range.end)
        .map(|(i, _)| i)
        .collect()
}

/// Smallest range containing every selected cue. Indices past the end of
/// `cues` are ignored.
pub fn range_covering(
    selected: &BTreeSet<usize>,
    cues: &[SubtitleCue],
) -> Result<TimeRange, MapperError> {
    selected
        .iter()
        .filter_map(|&i| cues.get(i))
        .fold(None, |acc: Option<TimeRange>, cue| {
            Some(match acc {
                None => TimeRange::new(cue.start, cue.end),
                Some(r) => TimeRange::new(r.start.min(cue.start), r.end.max(cue.end)),
            })
        })
        .ok_or(MapperError::EmptySelection)
}

pub fn cue_belongs_to_highlight(cue: &SubtitleCue, range: TimeRange) -> bool {
    cue.start >= range.start && cue.end <= range.end
}

/// First range, in list order, that fully contains `cue`. `None` entries are
/// highlights whose timestamps did not decode.
pub fn owning_highlight(cue: &SubtitleCue, ranges: &[Option<TimeRange>]) -> Option<usize> {
    ranges.iter().position(|range| match range {
        Some(r) => cue_belongs_to_highlight(cue, *r),
        None => false,
    })
}
