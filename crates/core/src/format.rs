use crate::{
    time,
    types::{AnalysisResult, Highlight},
};

/// Duration of a highlight as a display string, or `None` when its
/// timestamps do not decode.
pub fn format_highlight_duration(highlight: &Highlight) -> Option<String> {
    highlight
        .range()
        .ok()
        .map(|range| time::encode(range.duration_ms()))
}

/// Format an analysis as human-readable markdown
pub fn format_analysis_readable(analysis: &AnalysisResult) -> String {
    let mut output = String::new();

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    output.push_str("## Highlights\n\n");
    if analysis.highlights.is_empty() {
        output.push_str("(none)\n");
    }
    for (i, highlight) in analysis.highlights.iter().enumerate() {
        let duration = format_highlight_duration(highlight)
            .map(|d| format!(" ({})", d))
            .unwrap_or_else(|| " (invalid range)".to_string());
        output.push_str(&format!(
            "### {}. [{}–{}]{} {}\n\n",
            i + 1,
            highlight.start_time,
            highlight.end_time,
            duration,
            highlight.title
        ));
        if !highlight.description.is_empty() {
            output.push_str(&format!("{}\n\n", highlight.description));
        }
        if !highlight.tags.is_empty() {
            let tags: Vec<String> = highlight.tags.iter().map(|t| format!("#{}", t)).collect();
            output.push_str(&format!("{}\n\n", tags.join(" ")));
        }
        output.push_str(&format!("id: {}\n\n", highlight.id));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_analysis_readable() {
        let analysis = AnalysisResult {
            summary: "Stream recap".to_string(),
            highlights: vec![
                Highlight {
                    id: "h0".to_string(),
                    title: "Opening".to_string(),
                    description: "Sets the scene".to_string(),
                    start_time: "00:10".to_string(),
                    end_time: "01:40".to_string(),
                    tags: vec!["story".to_string(), "quote".to_string()],
                },
                Highlight {
                    id: "h1".to_string(),
                    title: "Broken".to_string(),
                    description: String::new(),
                    start_time: "??".to_string(),
                    end_time: "01:00".to_string(),
                    tags: Vec::new(),
                },
            ],
        };

        let out = format_analysis_readable(&analysis);
        assert!(out.contains("Stream recap"));
        assert!(out.contains("### 1. [00:10–01:40] (01:30) Opening"));
        assert!(out.contains("#story #quote"));
        assert!(out.contains("### 2. [??–01:00] (invalid range) Broken"));
    }
}
