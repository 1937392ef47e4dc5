//! Heuristic parameter detection.
//!
//! Each strategy scans the command independently; their candidates are
//! concatenated in a fixed order and resolved by [`ParameterSet::resolve`].

mod files;
mod flags;
mod keywords;
mod numbers;
mod placeholders;

use log::debug;

use crate::hints::{merge_hints, ExternalHint};
use crate::parameters::ParameterSet;
use crate::suggestions::Suggester;

/// Runs every detection strategy over a command.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    suggester: Suggester,
}

impl Detector {
    pub fn new(suggester: Suggester) -> Self {
        Self { suggester }
    }

    /// Detects parameters in `command`.
    ///
    /// Never fails: a strategy that matches nothing contributes nothing.
    pub fn detect(&self, command: &str) -> ParameterSet {
        let mut candidates = files::find(command, &self.suggester);
        candidates.extend(placeholders::find(command, &self.suggester));
        candidates.extend(keywords::find(command, &self.suggester));
        candidates.extend(flags::find(command, &self.suggester));
        candidates.extend(numbers::find(command, &self.suggester));

        let found = candidates.len();
        let parameters = ParameterSet::resolve(candidates);
        debug!(
            "Detected {} parameters ({found} candidates) in `{command}`",
            parameters.len()
        );

        parameters
    }

    /// Detects parameters and folds in hints from the response.
    pub fn detect_with_hints(&self, command: &str, hints: &[ExternalHint]) -> ParameterSet {
        merge_hints(command, self.detect(command), hints)
    }
}

/// Detects parameters without probing the filesystem for suggestions.
pub fn detect_parameters(command: &str) -> ParameterSet {
    Detector::default().detect(command)
}

/// `output_DIR name` becomes `Output_Dir Name`: a letter is upper-cased when
/// it follows a non-letter and lower-cased otherwise.
pub(crate) fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;

    text.chars()
        .flat_map(|c| {
            let converted: Vec<char> = if previous_is_letter {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_is_letter = c.is_alphabetic();
            converted
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ParameterKind;

    fn summary(command: &str) -> Vec<(String, ParameterKind)> {
        detect_parameters(command)
            .iter()
            .map(|p| (p.original_value.clone(), p.kind))
            .collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("output"), "Output");
        assert_eq!(title_case("OUTPUT DIR"), "Output Dir");
        assert_eq!(title_case("video"), "Video");
        assert_eq!(title_case("x2y"), "X2Y");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_ffmpeg_trim() {
        let parameters = detect_parameters("ffmpeg -i input.mp4 -ss 00:00:05 output.mp4");
        let found: Vec<(&str, ParameterKind, &str)> = parameters
            .iter()
            .map(|p| (p.original_value.as_str(), p.kind, p.name.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("input.mp4", ParameterKind::File, "File (.mp4)"),
                ("00:00:05", ParameterKind::Option, "Start Time"),
                ("output.mp4", ParameterKind::File, "File (.mp4)"),
            ]
        );
    }

    #[test]
    fn test_quoted_and_unquoted_files() {
        let parameters = detect_parameters(r#"mv "old name.txt" new_name.txt"#);
        let spans: Vec<(usize, usize)> = parameters.iter().map(|p| (p.start, p.end)).collect();
        assert_eq!(spans, vec![(4, 16), (18, 30)]);
        assert!(parameters.iter().all(|p| p.kind == ParameterKind::File));
    }

    #[test]
    fn test_nothing_to_customize() {
        assert!(detect_parameters("ls -la").is_empty());
        assert!(detect_parameters("").is_empty());
    }

    #[test]
    fn test_placeholder_beats_keyword_path() {
        assert_eq!(
            summary("tar czf backup.tar.gz dir {SOURCE_DIR}"),
            vec![
                ("backup.tar.gz".to_string(), ParameterKind::File),
                ("{SOURCE_DIR}".to_string(), ParameterKind::Placeholder),
            ]
        );
    }

    #[test]
    fn test_file_beats_flag_value() {
        assert_eq!(
            summary("magick --input photo.png --width 800 out.webp"),
            vec![
                ("photo.png".to_string(), ParameterKind::File),
                ("800".to_string(), ParameterKind::Option),
                ("out.webp".to_string(), ParameterKind::File),
            ]
        );
    }

    #[test]
    fn test_sets_are_sorted_and_disjoint() {
        let commands = [
            "ffmpeg -i in.mov -ss 0:01:02.5 -to 0:02:00 -vf \"select=eq(n\\,120)\" out.gif",
            "cp -r src ~/backup dest /mnt/drive",
            "convert <input> -resize {SIZE} [output] $HOME/out.png",
            "rsync -av --source 'my docs/report.pdf' --output ./out",
            "python script.py --input data.csv --frame 12 --fps 30",
            "find . -name '*.log' -delete",
            "echo héllo > wörld.txt",
        ];

        for command in commands {
            let parameters = detect_parameters(command);
            for parameter in &parameters {
                assert!(parameter.start < parameter.end, "{command}: {parameter}");
                assert_eq!(&command[parameter.span()], parameter.original_value);
            }
            for pair in parameters.as_slice().windows(2) {
                assert!(pair[0].end <= pair[1].start, "{command}: {} / {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_detection_is_deterministic() {
        let command = "ffmpeg -i input.mp4 -ss 00:00:05 -s 640x480 output dir/out.mkv";
        assert_eq!(detect_parameters(command), detect_parameters(command));
    }
}
