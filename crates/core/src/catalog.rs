//! Fixed heuristic data used by the parameter detector.
//!
//! Nothing in here does any matching; the strategies in [`crate::detection`]
//! compile these tables into regexes once and reuse them.

/// A named group of file extensions that share a suggestion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionGroup {
    pub label: &'static str,
    pub extensions: &'static [&'static str],
}

pub const EXTENSION_GROUPS: [ExtensionGroup; 7] = [
    ExtensionGroup {
        label: "video",
        extensions: &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"],
    },
    ExtensionGroup {
        label: "audio",
        extensions: &["mp3", "wav", "flac", "aac", "ogg", "m4a"],
    },
    ExtensionGroup {
        label: "image",
        extensions: &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"],
    },
    ExtensionGroup {
        label: "document",
        extensions: &["txt", "md", "doc", "docx", "pdf", "rtf"],
    },
    ExtensionGroup {
        label: "data",
        extensions: &["csv", "json", "xml", "yaml", "yml"],
    },
    ExtensionGroup {
        label: "code",
        extensions: &["py", "js", "html", "css", "cpp", "java", "go"],
    },
    ExtensionGroup {
        label: "archive",
        extensions: &["tar", "zip", "gz", "bz2", "xz", "7z"],
    },
];

/// Returns the group an extension (with or without the leading dot) belongs to.
pub fn extension_group(extension: &str) -> Option<&'static ExtensionGroup> {
    let extension = extension.trim_start_matches('.').to_lowercase();
    EXTENSION_GROUPS
        .iter()
        .find(|group| group.extensions.contains(&extension.as_str()))
}

/// Placeholder syntaxes: `{NAME}`, `<name>`, `[name]` and `$NAME`.
pub const PLACEHOLDER_PATTERNS: [&str; 4] = [r"\{[^}]+\}", r"<[^>]+>", r"\[[^\]]+\]", r"\$\w+"];

/// Characters stripped from a placeholder token to derive its display name.
pub const PLACEHOLDER_DELIMITERS: [char; 7] = ['{', '}', '<', '>', '[', ']', '$'];

/// Words that are usually followed by a path the user wants to change.
pub const PATH_KEYWORDS: [&str; 10] = [
    "input",
    "output",
    "src",
    "dest",
    "source",
    "destination",
    "file",
    "path",
    "dir",
    "directory",
];

/// Flags whose value is worth exposing, with the label shown for that value.
pub const FLAG_LABELS: [(&str, &str); 17] = [
    ("-i", "Input"),
    ("--input", "Input"),
    ("--in", "Input"),
    ("-o", "Output"),
    ("--output", "Output"),
    ("--out", "Output"),
    ("--frame", "Frame"),
    ("--frame-number", "Frame"),
    ("-n", "Frame"),
    ("--time", "Time"),
    ("-ss", "Start Time"),
    ("-to", "End Time"),
    ("--fps", "FPS"),
    ("--rate", "FPS"),
    ("--width", "Width"),
    ("--height", "Height"),
    ("-s", "Size"),
];

pub fn flag_label(flag: &str) -> Option<&'static str> {
    FLAG_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == flag)
        .map(|(_, label)| *label)
}

/// `H:MM:SS` or `HH:MM:SS`, optionally with a fractional second.
pub const TIMECODE_PATTERN: &str = r"\b\d{1,2}:\d{2}:\d{2}(?:\.\d+)?\b";

/// `frame=12`, `frame 12`, `frame: 12` and `n=12`; the digits are captured.
pub const FRAME_PATTERN: &str = r"(?i)(?:\bframe\b\s*[=:]?\s*(\d+))|(?:\bn\s*=\s*(\d+))";

pub const TIMECODE_SUGGESTIONS: [&str; 3] = ["00:00:01", "00:00:10", "00:01:00"];
pub const FRAME_SUGGESTIONS: [&str; 3] = ["1", "10", "100"];
pub const FPS_SUGGESTIONS: [&str; 3] = ["24", "30", "60"];
pub const DIMENSION_SUGGESTIONS: [&str; 3] = ["640", "720", "1080"];
pub const SIZE_SUGGESTIONS: [&str; 2] = ["1280x720", "1920x1080"];
pub const DIRECTORY_SUGGESTIONS: [&str; 3] = ["./", "../", "/tmp/"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_group_lookup() {
        assert_eq!(extension_group(".MP4").map(|g| g.label), Some("video"));
        assert_eq!(extension_group("yml").map(|g| g.label), Some("data"));
        assert_eq!(extension_group("7z").map(|g| g.label), Some("archive"));
        assert!(extension_group("exe").is_none());
    }

    #[test]
    fn test_flag_labels_are_unique() {
        let mut flags: Vec<&str> = FLAG_LABELS.iter().map(|(flag, _)| *flag).collect();
        flags.sort_unstable();
        flags.dedup();
        assert_eq!(flags.len(), FLAG_LABELS.len());
    }

    #[test]
    fn test_flag_label_lookup() {
        assert_eq!(flag_label("-ss"), Some("Start Time"));
        assert_eq!(flag_label("--output"), Some("Output"));
        assert_eq!(flag_label("--verbose"), None);
    }
}
