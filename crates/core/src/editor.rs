//! Timeline editor state.
//!
//! The editor owns a working copy of the analysis highlights, the playback
//! position reported by the player, the highlight being edited, and the set
//! of transcript cues selected for it. All transitions are synchronous and
//! applied one at a time by the caller's event loop.
//!
//! A highlight whose timestamps do not decode is *inert*: it is kept and
//! shown with its raw strings, but never matched against playback, never
//! owns a cue, and cannot be exported until it is re-ranged by toggling cues.

use std::{collections::BTreeSet, sync::Arc};

use uuid::Uuid;

use crate::{
    export::{ClipRange, default_clip_name},
    mapper::{self, MapperError},
    time,
    types::{AnalysisResult, Highlight, SubtitleCue, TimeRange},
};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Highlight index {index} out of range ({len} highlights)")]
    HighlightOutOfRange { index: usize, len: usize },

    #[error("Cue index {index} out of range ({len} cues)")]
    CueOutOfRange { index: usize, len: usize },

    #[error("No highlight is being edited")]
    NotEditing,

    #[error("Highlight {id} has an unusable time range ({start_time} - {end_time})")]
    InertHighlight {
        id: String,
        start_time: String,
        end_time: String,
    },

    #[error("End {end_time} does not follow start {start_time}")]
    InvalidRange { start_time: String, end_time: String },

    #[error(transparent)]
    Mapper(#[from] MapperError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No highlights at all.
    Idle,
    /// Nothing chosen; the displayed highlight follows playback.
    Browsing,
    /// The highlight at this index is being edited.
    Editing(usize),
}

/// Which panel sits next to the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidePanel {
    #[default]
    Transcript,
    Summary,
}

/// What the views should do after a playback tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackUpdate {
    pub position_ms: u64,
    pub display_highlight: Option<usize>,
    /// Cue to bring into view, when auto-scroll is on and the transcript is showing.
    pub scroll_to_cue: Option<usize>,
}

/// Everything needed to export one highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub highlight_id: String,
    pub range: ClipRange,
    pub file_name: String,
}

pub struct Editor {
    session_id: Uuid,
    cues: Arc<[SubtitleCue]>,
    summary: String,
    highlights: Vec<Highlight>,
    // decoded ranges, `None` for inert highlights
    ranges: Vec<Option<TimeRange>>,
    active: Option<usize>,
    selected: BTreeSet<usize>,
    position_ms: u64,
    display: Option<usize>,
    auto_scroll: bool,
    panel: SidePanel,
}

impl Editor {
    /// Start a session over a cloned copy of `analysis.highlights`.
    pub fn new(cues: Arc<[SubtitleCue]>, analysis: &AnalysisResult) -> Self {
        let session_id = Uuid::new_v4();
        let highlights = analysis.highlights.clone();
        let ranges = highlights.iter().map(decode_range).collect::<Vec<_>>();

        tracing::debug!(
            %session_id,
            cues = cues.len(),
            highlights = highlights.len(),
            inert = ranges.iter().filter(|r| r.is_none()).count(),
            "Editor session started"
        );

        let mut editor = Self {
            session_id,
            cues,
            summary: analysis.summary.clone(),
            highlights,
            ranges,
            active: None,
            selected: BTreeSet::new(),
            position_ms: 0,
            display: None,
            auto_scroll: true,
            panel: SidePanel::default(),
        };
        editor.display = editor.highlight_at(0);
        editor
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> EditorMode {
        match self.active {
            Some(index) => EditorMode::Editing(index),
            None if self.highlights.is_empty() => EditorMode::Idle,
            None => EditorMode::Browsing,
        }
    }

    /// Start (or keep) editing the highlight at `index`.
    ///
    /// The cue selection is recomputed from the highlight's range only when
    /// `index` differs from the currently active one, so a redundant select
    /// never clobbers manual cue edits. Returns the position the player
    /// should seek to, if the highlight has a usable range.
    pub fn select_highlight(&mut self, index: usize) -> Result<Option<u64>, EditorError> {
        self.check_highlight(index)?;

        if self.active != Some(index) {
            self.selected = match self.ranges[index] {
                Some(range) => mapper::cues_overlapping(range, &self.cues),
                None => BTreeSet::new(),
            };
            tracing::debug!(
                session_id = %self.session_id,
                index,
                selected = self.selected.len(),
                "Highlight selected"
            );
        }

        self.active = Some(index);
        self.display = Some(index);
        Ok(self.ranges[index].map(|range| range.start))
    }

    /// Stop editing and go back to following playback.
    pub fn deselect_highlight(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!(session_id = %self.session_id, "Highlight deselected");
        }
        self.selected.clear();
        self.display = self.highlight_at(self.position_ms);
    }

    /// Flip `cue_index` in the selection and re-range the active highlight to
    /// cover the selection. An emptied selection leaves the range untouched.
    ///
    /// Returns the highlight's range after the toggle.
    pub fn toggle_cue(&mut self, cue_index: usize) -> Result<Option<TimeRange>, EditorError> {
        let active = self.active.ok_or(EditorError::NotEditing)?;
        if cue_index >= self.cues.len() {
            return Err(EditorError::CueOutOfRange {
                index: cue_index,
                len: self.cues.len(),
            });
        }

        if !self.selected.remove(&cue_index) {
            self.selected.insert(cue_index);
        }

        if self.selected.is_empty() {
            return Ok(self.ranges[active]);
        }

        let covering = mapper::range_covering(&self.selected, &self.cues).inspect_err(|e| {
            tracing::error!(session_id = %self.session_id, error = %e, "Covering range failed")
        })?;

        let (start_time, end_time) = encode_range(covering);
        let highlight = &mut self.highlights[active];
        highlight.set_range(start_time, end_time);
        self.ranges[active] = decode_range(highlight);

        tracing::debug!(
            session_id = %self.session_id,
            id = %highlight.id,
            start = %highlight.start_time,
            end = %highlight.end_time,
            "Highlight re-ranged"
        );
        Ok(self.ranges[active])
    }

    /// Move the active highlight's start to the playhead.
    pub fn set_start_at_playhead(&mut self) -> Result<TimeRange, EditorError> {
        let active = self.active.ok_or(EditorError::NotEditing)?;
        let start_time = time::encode(self.position_ms);
        let end_time = self.highlights[active].end_time.clone();
        self.apply_range(active, start_time, end_time)
    }

    /// Move the active highlight's end to the playhead.
    pub fn set_end_at_playhead(&mut self) -> Result<TimeRange, EditorError> {
        let active = self.active.ok_or(EditorError::NotEditing)?;
        let start_time = self.highlights[active].start_time.clone();
        let end_time = time::encode(self.position_ms);
        self.apply_range(active, start_time, end_time)
    }

    /// Re-range `index` to the given display strings and reselect the cues
    /// the new range overlaps. Nothing changes when the range is unusable.
    fn apply_range(
        &mut self,
        index: usize,
        start_time: String,
        end_time: String,
    ) -> Result<TimeRange, EditorError> {
        let mut candidate = self.highlights[index].clone();
        candidate.set_range(start_time, end_time);
        let range = candidate
            .range()
            .map_err(|_| EditorError::InvalidRange {
                start_time: candidate.start_time.clone(),
                end_time: candidate.end_time.clone(),
            })?;

        tracing::debug!(
            session_id = %self.session_id,
            id = %candidate.id,
            start = %candidate.start_time,
            end = %candidate.end_time,
            "Highlight re-ranged at playhead"
        );
        self.highlights[index] = candidate;
        self.ranges[index] = Some(range);
        self.selected = mapper::cues_overlapping(range, &self.cues);
        Ok(range)
    }

    /// Record a new playback position.
    pub fn advance_playback(&mut self, position_ms: u64) -> PlaybackUpdate {
        self.position_ms = position_ms;
        self.display = match self.active {
            Some(index) => Some(index),
            None => self.highlight_at(position_ms),
        };

        let scroll_to_cue = if self.auto_scroll && self.panel == SidePanel::Transcript {
            self.cue_at(position_ms)
        } else {
            None
        };

        PlaybackUpdate {
            position_ms,
            display_highlight: self.display,
            scroll_to_cue,
        }
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn set_panel(&mut self, panel: SidePanel) {
        self.panel = panel;
    }

    pub fn panel(&self) -> SidePanel {
        self.panel
    }

    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    pub fn active_highlight(&self) -> Option<usize> {
        self.active
    }

    /// The highlight the timeline should emphasise: the active one, or the
    /// one under the playhead while browsing.
    pub fn display_highlight(&self) -> Option<usize> {
        self.display
    }

    pub fn selected_cues(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn cues(&self) -> &[SubtitleCue] {
        &self.cues
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn highlight_range(&self, index: usize) -> Option<TimeRange> {
        self.ranges.get(index).copied().flatten()
    }

    pub fn is_inert(&self, index: usize) -> bool {
        index < self.ranges.len() && self.ranges[index].is_none()
    }

    pub fn find_highlight(&self, id: &str) -> Option<usize> {
        self.highlights.iter().position(|h| h.id == id)
    }

    /// Cue under the playhead.
    pub fn current_cue(&self) -> Option<(usize, &SubtitleCue)> {
        self.cue_at(self.position_ms).map(|i| (i, &self.cues[i]))
    }

    /// Highlight that fully contains the cue, for transcript colouring.
    pub fn cue_owner(&self, cue_index: usize) -> Option<usize> {
        let cue = self.cues.get(cue_index)?;
        mapper::owning_highlight(cue, &self.ranges)
    }

    /// Export parameters for the highlight being edited.
    pub fn clip_request(&self) -> Result<ClipRequest, EditorError> {
        let index = self.active.ok_or(EditorError::NotEditing)?;
        self.clip_request_for(index)
    }

    pub fn clip_request_for(&self, index: usize) -> Result<ClipRequest, EditorError> {
        self.check_highlight(index)?;
        let highlight = &self.highlights[index];
        let range = self.ranges[index].ok_or_else(|| EditorError::InertHighlight {
            id: highlight.id.clone(),
            start_time: highlight.start_time.clone(),
            end_time: highlight.end_time.clone(),
        })?;

        Ok(ClipRequest {
            highlight_id: highlight.id.clone(),
            range: ClipRange {
                start_secs: time::ms_to_secs(range.start),
                end_secs: time::ms_to_secs(range.end),
            },
            file_name: default_clip_name(&highlight.title),
        })
    }

    /// Snapshot of the edited analysis, for persisting.
    pub fn to_analysis(&self) -> AnalysisResult {
        AnalysisResult {
            summary: self.summary.clone(),
            highlights: self.highlights.clone(),
        }
    }

    fn check_highlight(&self, index: usize) -> Result<(), EditorError> {
        if index >= self.highlights.len() {
            return Err(EditorError::HighlightOutOfRange {
                index,
                len: self.highlights.len(),
            });
        }
        Ok(())
    }

    /// First usable highlight whose `[start, end)` holds the position; list
    /// order breaks ties between overlapping highlights.
    fn highlight_at(&self, position_ms: u64) -> Option<usize> {
        self.ranges
            .iter()
            .position(|range| range.is_some_and(|r| r.contains(position_ms)))
    }

    fn cue_at(&self, position_ms: u64) -> Option<usize> {
        self.cues.iter().position(|cue| cue.contains(position_ms))
    }
}

fn decode_range(highlight: &Highlight) -> Option<TimeRange> {
    match highlight.range() {
        Ok(range) => Some(range),
        Err(e) => {
            tracing::warn!(
                id = %highlight.id,
                start = %highlight.start_time,
                end = %highlight.end_time,
                error = %e,
                "Highlight has an unusable range and is excluded from matching"
            );
            None
        }
    }
}

/// Encode a covering range. Display strings drop sub-second precision, so a
/// range inside a single second is widened to end one second after its start.
fn encode_range(range: TimeRange) -> (String, String) {
    let start_floor = range.start / 1000 * 1000;
    let end_floor = range.end / 1000 * 1000;
    let end = if end_floor <= start_floor {
        start_floor + 1000
    } else {
        range.end
    };
    (time::encode(range.start), time::encode(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(id: &str, start: &str, end: &str) -> Highlight {
        Highlight {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: String::new(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            tags: Vec::new(),
        }
    }

    fn cues() -> Arc<[SubtitleCue]> {
        Arc::from(vec![
            SubtitleCue::new(0, 2_000, "a"),
            SubtitleCue::new(2_000, 5_000, "b"),
            SubtitleCue::new(5_000, 9_000, "c"),
            SubtitleCue::new(9_000, 12_000, "d"),
        ])
    }

    fn editor(highlights: Vec<Highlight>) -> Editor {
        Editor::new(
            cues(),
            &AnalysisResult {
                summary: "summary".to_string(),
                highlights,
            },
        )
    }

    #[test]
    fn test_modes() {
        let mut ed = editor(Vec::new());
        assert_eq!(ed.mode(), EditorMode::Idle);
        assert_eq!(ed.advance_playback(1_000).display_highlight, None);

        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        assert_eq!(ed.mode(), EditorMode::Browsing);
        ed.select_highlight(0).unwrap();
        assert_eq!(ed.mode(), EditorMode::Editing(0));
        ed.deselect_highlight();
        assert_eq!(ed.mode(), EditorMode::Browsing);
        assert!(ed.selected_cues().is_empty());
    }

    #[test]
    fn test_select_recomputes_and_returns_seek_target() {
        let mut ed = editor(vec![
            highlight("h0", "00:02", "00:09"),
            highlight("h1", "00:09", "00:12"),
        ]);

        assert_eq!(ed.select_highlight(0).unwrap(), Some(2_000));
        assert_eq!(ed.selected_cues(), &BTreeSet::from([1, 2]));

        assert_eq!(ed.select_highlight(1).unwrap(), Some(9_000));
        assert_eq!(ed.selected_cues(), &BTreeSet::from([3]));
    }

    #[test]
    fn test_reselect_after_deselect_recomputes() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        ed.select_highlight(0).unwrap();
        ed.toggle_cue(3).unwrap();
        ed.deselect_highlight();
        ed.select_highlight(0).unwrap();
        // the range now covers cues 1..=3
        assert_eq!(ed.selected_cues(), &BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        assert!(matches!(
            ed.select_highlight(3),
            Err(EditorError::HighlightOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(ed.mode(), EditorMode::Browsing);
    }

    #[test]
    fn test_toggle_requires_editing() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        assert!(matches!(ed.toggle_cue(0), Err(EditorError::NotEditing)));
        ed.select_highlight(0).unwrap();
        assert!(matches!(
            ed.toggle_cue(99),
            Err(EditorError::CueOutOfRange { index: 99, .. })
        ));
    }

    #[test]
    fn test_toggle_extends_and_shrinks_range() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        ed.select_highlight(0).unwrap();

        let range = ed.toggle_cue(0).unwrap();
        assert_eq!(range, Some(TimeRange::new(0, 9_000)));
        assert_eq!(ed.highlights()[0].start_time, "00:00");

        let range = ed.toggle_cue(2).unwrap();
        assert_eq!(range, Some(TimeRange::new(0, 5_000)));
        assert_eq!(ed.highlights()[0].end_time, "00:05");
    }

    #[test]
    fn test_emptied_selection_keeps_range() {
        let mut ed = editor(vec![highlight("h0", "00:03", "00:04")]);
        ed.select_highlight(0).unwrap();
        assert_eq!(ed.selected_cues(), &BTreeSet::from([1]));

        let range = ed.toggle_cue(1).unwrap();
        assert!(ed.selected_cues().is_empty());
        assert_eq!(range, Some(TimeRange::new(3_000, 4_000)));
        assert_eq!(ed.highlights()[0].start_time, "00:03");
        assert_eq!(ed.highlights()[0].end_time, "00:04");
    }

    #[test]
    fn test_sub_second_cue_keeps_positive_range() {
        let cues: Arc<[SubtitleCue]> = Arc::from(vec![SubtitleCue::new(2_100, 2_900, "blip")]);
        let mut ed = Editor::new(
            cues,
            &AnalysisResult {
                summary: String::new(),
                highlights: vec![highlight("h0", "00:10", "00:20")],
            },
        );
        ed.select_highlight(0).unwrap();
        let range = ed.toggle_cue(0).unwrap();
        assert_eq!(range, Some(TimeRange::new(2_000, 3_000)));
    }

    #[test]
    fn test_inert_highlight_is_isolated() {
        let mut ed = editor(vec![
            highlight("bad", "soon", "00:05"),
            highlight("h1", "00:00", "00:05"),
        ]);
        assert!(ed.is_inert(0));
        assert!(!ed.is_inert(1));

        let update = ed.advance_playback(1_000);
        assert_eq!(update.display_highlight, Some(1));
        assert_eq!(ed.cue_owner(0), Some(1));

        // selecting an inert highlight works, with nothing selected and no seek
        assert_eq!(ed.select_highlight(0).unwrap(), None);
        assert!(ed.selected_cues().is_empty());
        assert!(matches!(
            ed.clip_request(),
            Err(EditorError::InertHighlight { .. })
        ));

        // picking cues gives it a usable range again
        ed.toggle_cue(2).unwrap();
        assert!(!ed.is_inert(0));
        assert_eq!(ed.highlights()[0].start_time, "00:05");
    }

    #[test]
    fn test_reversed_range_is_inert() {
        let ed = editor(vec![highlight("h0", "00:09", "00:02")]);
        assert!(ed.is_inert(0));
    }

    #[test]
    fn test_browsing_uses_half_open_ranges() {
        let mut ed = editor(vec![
            highlight("h0", "00:00", "00:05"),
            highlight("h1", "00:05", "00:10"),
        ]);
        assert_eq!(ed.advance_playback(4_999).display_highlight, Some(0));
        assert_eq!(ed.advance_playback(5_000).display_highlight, Some(1));
        assert_eq!(ed.advance_playback(10_000).display_highlight, None);
    }

    #[test]
    fn test_editing_pins_display_highlight() {
        let mut ed = editor(vec![
            highlight("h0", "00:00", "00:05"),
            highlight("h1", "00:05", "00:10"),
        ]);
        ed.select_highlight(1).unwrap();
        assert_eq!(ed.advance_playback(1_000).display_highlight, Some(1));

        ed.deselect_highlight();
        assert_eq!(ed.display_highlight(), Some(0));
    }

    #[test]
    fn test_auto_scroll_follows_transcript_only() {
        let mut ed = editor(vec![highlight("h0", "00:00", "00:05")]);
        assert!(ed.auto_scroll());
        assert_eq!(ed.advance_playback(6_000).scroll_to_cue, Some(2));

        ed.set_panel(SidePanel::Summary);
        assert_eq!(ed.advance_playback(6_000).scroll_to_cue, None);

        ed.set_panel(SidePanel::Transcript);
        ed.set_auto_scroll(false);
        let update = ed.advance_playback(6_000);
        assert_eq!(update.scroll_to_cue, None);
        assert_eq!(update.display_highlight, None);
        assert_eq!(ed.current_cue().map(|(i, _)| i), Some(2));
    }

    #[test]
    fn test_toggle_auto_scroll_leaves_state_alone() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        ed.select_highlight(0).unwrap();
        ed.toggle_cue(0).unwrap();
        let before = ed.selected_cues().clone();
        ed.set_auto_scroll(false);
        ed.set_panel(SidePanel::Summary);
        assert_eq!(ed.selected_cues(), &before);
        assert_eq!(ed.mode(), EditorMode::Editing(0));
    }

    #[test]
    fn test_clip_request() {
        let mut ed = editor(vec![Highlight {
            title: "Q&A: tools/tips".to_string(),
            ..highlight("h0", "00:02", "00:09")
        }]);
        assert!(matches!(ed.clip_request(), Err(EditorError::NotEditing)));

        ed.select_highlight(0).unwrap();
        let request = ed.clip_request().unwrap();
        assert_eq!(request.highlight_id, "h0");
        assert_eq!(request.range.start_secs, 2.0);
        assert_eq!(request.range.end_secs, 9.0);
        assert_eq!(request.file_name, "Q&A- tools-tips.mp4");
    }

    #[test]
    fn test_cue_owner_requires_containment() {
        let ed = editor(vec![
            highlight("h0", "00:01", "00:06"),
            highlight("h1", "00:05", "00:12"),
        ]);
        assert_eq!(ed.cue_owner(0), None); // 0..2 starts before h0
        assert_eq!(ed.cue_owner(1), Some(0));
        assert_eq!(ed.cue_owner(2), Some(1));
        assert_eq!(ed.cue_owner(3), Some(1));
        assert_eq!(ed.cue_owner(42), None);
    }

    #[test]
    fn test_edits_do_not_touch_source_analysis() {
        let analysis = AnalysisResult {
            summary: "s".to_string(),
            highlights: vec![highlight("h0", "00:02", "00:09")],
        };
        let mut ed = Editor::new(cues(), &analysis);
        ed.select_highlight(0).unwrap();
        ed.toggle_cue(3).unwrap();

        assert_eq!(analysis.highlights[0].end_time, "00:09");
        let edited = ed.to_analysis();
        assert_eq!(edited.highlights[0].end_time, "00:12");
        assert_eq!(edited.highlights[0].id, "h0");
    }

    #[test]
    fn test_mark_in_and_out_at_playhead() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        ed.advance_playback(1_000);
        assert!(matches!(
            ed.set_start_at_playhead(),
            Err(EditorError::NotEditing)
        ));

        ed.select_highlight(0).unwrap();
        ed.advance_playback(5_400);
        assert_eq!(ed.set_start_at_playhead().unwrap(), TimeRange::new(5_000, 9_000));
        assert_eq!(ed.highlights()[0].start_time, "00:05");
        assert_eq!(ed.selected_cues(), &BTreeSet::from([2]));

        ed.advance_playback(11_000);
        assert_eq!(ed.set_end_at_playhead().unwrap(), TimeRange::new(5_000, 11_000));
        assert_eq!(ed.highlights()[0].end_time, "00:11");
        assert_eq!(ed.selected_cues(), &BTreeSet::from([2, 3]));
    }

    #[test]
    fn test_mark_rejects_end_before_start() {
        let mut ed = editor(vec![highlight("h0", "00:02", "00:09")]);
        ed.select_highlight(0).unwrap();

        ed.advance_playback(9_500);
        assert!(matches!(
            ed.set_start_at_playhead(),
            Err(EditorError::InvalidRange { .. })
        ));
        ed.advance_playback(2_000);
        assert!(matches!(
            ed.set_end_at_playhead(),
            Err(EditorError::InvalidRange { .. })
        ));

        assert_eq!(ed.highlights()[0].start_time, "00:02");
        assert_eq!(ed.highlights()[0].end_time, "00:09");
        assert_eq!(ed.highlight_range(0), Some(TimeRange::new(2_000, 9_000)));
    }

    #[test]
    fn test_mark_on_inert_highlight() {
        let mut ed = editor(vec![highlight("h0", "soon", "00:09")]);
        ed.select_highlight(0).unwrap();
        ed.advance_playback(3_000);
        assert_eq!(ed.set_start_at_playhead().unwrap(), TimeRange::new(3_000, 9_000));
        assert!(!ed.is_inert(0));
    }
}
