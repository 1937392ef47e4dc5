//! Materializing edits into a command string.
//!
//! [`apply`] produces the final command, [`render`] produces the same text
//! plus the display position of every parameter for highlighting. Neither
//! touches the edit map.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::parameters::{Parameter, ParameterSet};

/// Pending edits keyed by parameter index. Only values that differ from the
/// parameter's original value are stored.
pub type EditMap = BTreeMap<usize, String>;

/// Position of one parameter inside a rendered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub index: usize,
    /// Byte range into [`RenderedCommand::text`].
    pub range: Range<usize>,
    pub edited: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub text: String,
    pub spans: Vec<HighlightSpan>,
}

impl RenderedCommand {
    /// Splits the text into `(segment, highlight)` pieces in display order.
    pub fn segments(&self) -> Vec<(&str, Option<&HighlightSpan>)> {
        let mut segments = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut cursor = 0;

        for span in &self.spans {
            if cursor < span.range.start {
                segments.push((&self.text[cursor..span.range.start], None));
            }
            segments.push((&self.text[span.range.clone()], Some(span)));
            cursor = span.range.end;
        }

        if cursor < self.text.len() {
            segments.push((&self.text[cursor..], None));
        }

        segments
    }
}

/// The value a parameter currently has: its edit if any, else its original.
pub fn effective_value<'a>(parameter: &'a Parameter, edit: Option<&'a String>) -> &'a str {
    edit.map_or(parameter.original_value.as_str(), String::as_str)
}

/// Builds the final command by replacing edited spans, last span first, so
/// earlier offsets stay valid while later text changes length.
pub fn apply(base: &str, parameters: &ParameterSet, edits: &EditMap) -> String {
    let mut result = base.to_string();

    let mut edited: Vec<(&Parameter, &String)> = edits
        .iter()
        .filter_map(|(&index, value)| parameters.get(index).map(|p| (p, value)))
        .collect();
    edited.sort_by_key(|(parameter, _)| std::cmp::Reverse(parameter.start));

    for (parameter, value) in edited {
        result.replace_range(parameter.span(), value);
    }

    result
}

/// Builds the preview of a command, walking spans in ascending order and
/// shifting each by the length change of the spans before it.
pub fn render(
    base: &str,
    parameters: &ParameterSet,
    edits: &EditMap,
    selected: Option<usize>,
) -> RenderedCommand {
    let mut text = String::with_capacity(base.len());
    let mut spans = Vec::with_capacity(parameters.len());
    let mut cursor = 0;
    let mut delta: isize = 0;

    for (index, parameter) in parameters.iter().enumerate() {
        let edit = edits.get(&index);
        let value = effective_value(parameter, edit);

        text.push_str(&base[cursor..parameter.start]);

        let display_start = parameter.start.saturating_add_signed(delta);
        debug_assert_eq!(display_start, text.len());

        text.push_str(value);
        spans.push(HighlightSpan {
            index,
            range: display_start..display_start + value.len(),
            edited: edit.is_some(),
            selected: selected == Some(index),
        });

        delta += value.len() as isize - parameter.original_value.len() as isize;
        cursor = parameter.end;
    }

    text.push_str(&base[cursor..]);

    RenderedCommand { text, spans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detect_parameters;

    #[test]
    fn test_apply_without_edits_is_identity() {
        let base = "ffmpeg -i input.mp4 -ss 00:00:05 output.mp4";
        let parameters = detect_parameters(base);
        assert_eq!(apply(base, &parameters, &EditMap::new()), base);
        assert_eq!(render(base, &parameters, &EditMap::new(), None).text, base);
    }

    #[test]
    fn test_apply_keeps_surrounding_quotes() {
        let base = r#"mv "old name.txt" new_name.txt"#;
        let parameters = detect_parameters(base);
        let edits = EditMap::from([(0, "archive.txt".to_string())]);
        assert_eq!(
            apply(base, &parameters, &edits),
            r#"mv "archive.txt" new_name.txt"#
        );
    }

    #[test]
    fn test_apply_is_independent_of_edit_order() {
        let base = "ffmpeg -i input.mp4 -ss 00:00:05 output.mp4";
        let parameters = detect_parameters(base);
        let expected = "ffmpeg -i input.mp4 -ss 00:01:00 clip.mp4";

        let mut forward = EditMap::new();
        forward.insert(1, "00:01:00".to_string());
        forward.insert(2, "clip.mp4".to_string());

        let mut backward = EditMap::new();
        backward.insert(2, "clip.mp4".to_string());
        backward.insert(1, "00:01:00".to_string());

        assert_eq!(apply(base, &parameters, &forward), expected);
        assert_eq!(apply(base, &parameters, &backward), expected);
    }

    #[test]
    fn test_render_positions_follow_earlier_edits() {
        let base = "cp {SRC} {DEST}";
        let parameters = detect_parameters(base);
        let edits = EditMap::from([(0, "a_much_longer_name".to_string())]);

        let rendered = render(base, &parameters, &edits, Some(1));
        assert_eq!(rendered.text, "cp a_much_longer_name {DEST}");
        assert_eq!(&rendered.text[rendered.spans[0].range.clone()], "a_much_longer_name");
        assert_eq!(&rendered.text[rendered.spans[1].range.clone()], "{DEST}");
        assert!(rendered.spans[0].edited && !rendered.spans[0].selected);
        assert!(!rendered.spans[1].edited && rendered.spans[1].selected);
    }

    #[test]
    fn test_segments_cover_text() {
        let base = "cat {FILE} | wc -l";
        let parameters = detect_parameters(base);
        let rendered = render(base, &parameters, &EditMap::from([(0, "é.txt".to_string())]), None);

        let segments = rendered.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].0, "é.txt");
        assert!(segments[1].1.is_some());
        let joined: String = segments.iter().map(|(s, _)| *s).collect();
        assert_eq!(joined, rendered.text);
    }

    #[test]
    fn test_apply_matches_render_for_every_edit_subset() {
        let base = r#"ffmpeg -i "my clip.mov" -ss 0:00:05 -s 640x480 {OUT} dest ./here"#;
        let parameters = detect_parameters(base);
        assert!(parameters.len() >= 4);

        let replacements = ["", "x", "a much longer replacement", "ünïcödé"];

        for mask in 0u32..(1 << parameters.len()) {
            for replacement in replacements {
                let edits: EditMap = (0..parameters.len())
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| (i, format!("{replacement}{i}")))
                    .collect();

                let applied = apply(base, &parameters, &edits);
                let rendered = render(base, &parameters, &edits, None);
                assert_eq!(applied, rendered.text, "mask {mask:b}");

                for span in &rendered.spans {
                    let parameter = parameters.get(span.index).unwrap();
                    let expected = effective_value(parameter, edits.get(&span.index));
                    assert_eq!(&rendered.text[span.range.clone()], expected);
                }
            }
        }
    }
}
