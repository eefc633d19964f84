//! End-to-end editor scenarios: analysis reply → editor session → export.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use livecut_core::{
    AnalysisError, AnalysisResult, ChatCompletion, ChatRequest, ClipRange, Editor, EditorMode,
    ExportError, Highlight, SubtitleCue, TimeRange, Transcoder, cues_overlapping, export_range,
    export::TranscodeRequest, request_analysis, time,
};

struct ScriptedChat(Option<String>);

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, _request: ChatRequest) -> Result<Option<String>, AnalysisError> {
        Ok(self.0.clone())
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

#[derive(Default)]
struct CapturingTranscoder(Mutex<Vec<TranscodeRequest>>);

#[async_trait]
impl Transcoder for CapturingTranscoder {
    async fn transcode(&self, request: &TranscodeRequest) -> Result<(), ExportError> {
        self.0.lock().unwrap().push(request.clone());
        Ok(())
    }
}

fn three_cues() -> Vec<SubtitleCue> {
    vec![
        SubtitleCue::new(0, 2_000, "a"),
        SubtitleCue::new(2_000, 5_000, "b"),
        SubtitleCue::new(5_000, 9_000, "c"),
    ]
}

fn highlight(id: &str, start: &str, end: &str) -> Highlight {
    Highlight {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        tags: Vec::new(),
    }
}

fn session(cues: Vec<SubtitleCue>, highlights: Vec<Highlight>) -> Editor {
    Editor::new(
        Arc::from(cues),
        &AnalysisResult {
            summary: String::new(),
            highlights,
        },
    )
}

#[test]
fn test_touching_cue_is_not_selected() {
    let hits = cues_overlapping(TimeRange::new(2_000, 9_000), &three_cues());
    assert_eq!(hits, BTreeSet::from([1, 2]));
}

#[test]
fn test_toggle_into_empty_selection_reranges_highlight() {
    let mut editor = session(three_cues(), vec![highlight("h0", "00:00", "00:01")]);
    editor.select_highlight(0).unwrap();

    // clear the initial overlap so the selection is empty
    editor.toggle_cue(0).unwrap();
    assert!(editor.selected_cues().is_empty());
    assert_eq!(editor.highlights()[0].start_time, "00:00");
    assert_eq!(editor.highlights()[0].end_time, "00:01");

    editor.toggle_cue(1).unwrap();
    assert_eq!(editor.highlights()[0].start_time, "00:02");
    assert_eq!(editor.highlights()[0].end_time, "00:05");
}

#[test]
fn test_redundant_select_keeps_manual_edits() {
    let mut editor = session(
        three_cues(),
        vec![
            highlight("h0", "00:00", "00:02"),
            highlight("h1", "00:02", "00:05"),
            highlight("h2", "00:02", "00:09"),
        ],
    );

    editor.select_highlight(2).unwrap();
    assert_eq!(editor.selected_cues(), &BTreeSet::from([1, 2]));

    editor.toggle_cue(0).unwrap();
    editor.toggle_cue(2).unwrap();
    let edited = editor.selected_cues().clone();
    assert_eq!(edited, BTreeSet::from([0, 1]));

    editor.select_highlight(2).unwrap();
    assert_eq!(editor.selected_cues(), &edited);
    assert_eq!(editor.mode(), EditorMode::Editing(2));
}

#[test]
fn test_overlapping_highlights_resolve_to_list_order() {
    let mut editor = session(
        three_cues(),
        vec![
            highlight("first", "00:00", "00:10"),
            highlight("second", "00:05", "00:15"),
        ],
    );
    assert_eq!(editor.advance_playback(7_000).display_highlight, Some(0));
    assert_eq!(editor.advance_playback(12_000).display_highlight, Some(1));
}

#[tokio::test]
async fn test_reply_without_highlights_produces_no_result() {
    let chat = ScriptedChat(Some(r#"{"summary": "just a summary"}"#.to_string()));
    let result = request_analysis(&chat, &three_cues()).await;
    assert!(matches!(
        result,
        Err(AnalysisError::InvalidResponseShape { .. })
    ));
}

#[tokio::test]
async fn test_analysis_to_export_flow() {
    let chat = ScriptedChat(Some(
        r#"{
            "summary": "Three short lines",
            "highlights": [
                {"title": "Middle: b/c", "description": "the good part", "startTime": "00:02", "endTime": "00:09", "tags": ["core"]},
                {"title": "Broken", "startTime": "later", "endTime": "00:09"}
            ]
        }"#
        .to_string(),
    ));
    let cues = three_cues();
    let analysis = request_analysis(&chat, &cues).await.unwrap();
    assert_eq!(analysis.highlights[0].id, "h0");
    assert_eq!(analysis.highlights[1].id, "h1");

    let mut editor = Editor::new(Arc::from(cues), &analysis);
    assert!(editor.is_inert(1));

    let seek = editor.select_highlight(0).unwrap();
    assert_eq!(seek, Some(2_000));
    editor.toggle_cue(2).unwrap();
    assert_eq!(editor.highlights()[0].end_time, "00:05");

    let clip = editor.clip_request().unwrap();
    assert_eq!(clip.file_name, "Middle- b-c.mp4");
    assert_eq!(
        clip.range,
        ClipRange {
            start_secs: 2.0,
            end_secs: 5.0
        }
    );

    let transcoder = CapturingTranscoder::default();
    let out = export_range(
        &transcoder,
        Path::new("/videos/stream.mp4"),
        clip.range,
        &PathBuf::from("/clips").join(&clip.file_name),
    )
    .await
    .unwrap();

    assert_eq!(out, PathBuf::from("/clips/Middle- b-c.mp4"));
    let requests = transcoder.0.lock().unwrap();
    assert_eq!(requests[0].start_secs, 2.0);
    assert_eq!(requests[0].duration_secs, 3.0);
}

#[test]
fn test_codec_round_values() {
    assert_eq!(time::encode(0), "00:00");
    assert_eq!(time::encode(3_661_000), "01:01:01");
    for secs in 0..4_000u64 {
        let ms = secs * 1000;
        assert_eq!(time::decode(&time::encode(ms)).unwrap(), ms);
    }
}
