//! Replacement suggestions for detected parameters.
//!
//! Suggestions never influence which spans are detected. Directory probes are
//! best effort: any I/O failure just yields fewer suggestions.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::debug;

use crate::catalog::{
    DIMENSION_SUGGESTIONS, DIRECTORY_SUGGESTIONS, FPS_SUGGESTIONS, FRAME_SUGGESTIONS,
    SIZE_SUGGESTIONS, TIMECODE_SUGGESTIONS,
};

/// Maximum number of directory entries taken from a single probe.
const PROBE_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct Suggester {
    /// Directory to probe for files; `None` disables probing.
    probe_directory: Option<PathBuf>,
}

impl Suggester {
    pub fn probing(directory: impl Into<PathBuf>) -> Self {
        Self {
            probe_directory: Some(directory.into()),
        }
    }

    pub fn for_file(&self, filename: &str) -> Vec<String> {
        let extension = extension_of(filename);
        let mut suggestions = IndexSet::new();

        if let Some(extension) = &extension {
            suggestions.extend(self.probe(|name, is_dir| {
                !is_dir && name.to_lowercase().ends_with(&format!(".{extension}"))
            }));
        }

        match extension.as_deref() {
            Some("mp4" | "avi" | "mkv") => {
                suggestions.extend(owned(&["input.mp4", "output.mp4", "video.mp4"]));
            }
            Some("txt" | "md") => {
                suggestions.extend(owned(&["README.md", "input.txt", "output.txt"]));
            }
            _ => {}
        }

        suggestions.shift_remove(filename);
        suggestions.into_iter().collect()
    }

    pub fn for_placeholder(&self, placeholder: &str) -> Vec<String> {
        let lower = placeholder.to_lowercase();
        let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        let suggestions: &[&str] = if contains_any(&["input", "source", "src"]) {
            &["input.txt", "source.mp4", "data.csv"]
        } else if contains_any(&["output", "dest", "destination"]) {
            &["output.txt", "result.mp4", "processed.csv"]
        } else if lower.contains("file") {
            &["file.txt", "document.pdf", "data.json"]
        } else if contains_any(&["dir", "directory", "path"]) {
            &["./", "../", "/tmp/", "./output/"]
        } else {
            &[]
        };

        owned(suggestions)
    }

    pub fn for_path(&self, value: &str) -> Vec<String> {
        let mut suggestions = IndexSet::new();

        if value.ends_with('/') || value.to_lowercase().contains("dir") {
            suggestions.extend(self.probe(|_, is_dir| is_dir));
            suggestions.extend(owned(&DIRECTORY_SUGGESTIONS));
        } else {
            suggestions.extend(self.probe(|_, is_dir| !is_dir));
        }

        suggestions.shift_remove(value);
        suggestions.into_iter().collect()
    }

    /// Suggestions for a flag value, keyed by the flag's display label.
    pub fn for_option(&self, label: &str, value: &str) -> Vec<String> {
        let lower = label.to_lowercase();

        let mut suggestions: IndexSet<String> = if lower.contains("input") || lower.contains("output")
        {
            self.for_file(value).into_iter().collect()
        } else if lower == "frame" {
            owned(&FRAME_SUGGESTIONS).into_iter().collect()
        } else if lower.contains("time") || lower.contains("start") || lower.contains("end") {
            owned(&TIMECODE_SUGGESTIONS).into_iter().collect()
        } else if lower == "fps" || lower == "rate" {
            owned(&FPS_SUGGESTIONS).into_iter().collect()
        } else if lower == "width" || lower == "height" {
            owned(&DIMENSION_SUGGESTIONS).into_iter().collect()
        } else if lower == "size" {
            owned(&SIZE_SUGGESTIONS).into_iter().collect()
        } else {
            IndexSet::new()
        };

        suggestions.shift_remove(value);
        suggestions.into_iter().collect()
    }

    pub fn for_timecode(&self, value: &str) -> Vec<String> {
        owned(&TIMECODE_SUGGESTIONS)
            .into_iter()
            .filter(|s| s != value)
            .collect()
    }

    pub fn for_frame(&self, value: &str) -> Vec<String> {
        owned(&FRAME_SUGGESTIONS)
            .into_iter()
            .filter(|s| s != value)
            .collect()
    }

    fn probe(&self, keep: impl Fn(&str, bool) -> bool) -> Vec<String> {
        let Some(directory) = &self.probe_directory else {
            return Vec::new();
        };

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping suggestion probe of `{}`: {e}", directory.display());
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let is_dir = entry.file_type().ok()?.is_dir();
                let name = entry.file_name().into_string().ok()?;
                keep(&name, is_dir).then(|| if is_dir { format!("{name}/") } else { name })
            })
            .collect();

        // read_dir order is platform dependent
        names.sort();
        names.truncate(PROBE_LIMIT);
        names
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_file_suggestions_without_probe() {
        let suggester = Suggester::default();
        assert_eq!(
            suggester.for_file("input.mp4"),
            vec!["output.mp4".to_string(), "video.mp4".to_string()]
        );
        assert!(suggester.for_file("photo.png").is_empty());
    }

    #[test]
    fn test_file_suggestions_probe_directory() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();
        File::create(dir.path().join("a.MP4")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        fs::create_dir(dir.path().join("clips.mp4")).unwrap();

        let suggester = Suggester::probing(dir.path());
        let suggestions = suggester.for_file("input.mp4");

        assert_eq!(&suggestions[..2], &["a.MP4".to_string(), "b.mp4".to_string()]);
        assert!(!suggestions.contains(&"notes.txt".to_string()));
        assert!(!suggestions.contains(&"clips.mp4/".to_string()));
        assert!(!suggestions.contains(&"input.mp4".to_string()));
    }

    #[test]
    fn test_probe_of_missing_directory_is_empty() {
        let suggester = Suggester::probing("/this/path/does/not/exist");
        assert!(suggester.for_path("out/").contains(&"./".to_string()));
        assert!(suggester.for_path("notes").is_empty());
    }

    #[test]
    fn test_placeholder_suggestions() {
        let suggester = Suggester::default();
        assert_eq!(suggester.for_placeholder("{INPUT_FILE}")[0], "input.txt");
        assert_eq!(suggester.for_placeholder("<dest>")[0], "output.txt");
        assert_eq!(suggester.for_placeholder("[dir]")[0], "./");
        assert!(suggester.for_placeholder("$COUNT").is_empty());
    }

    #[test]
    fn test_option_suggestions_exclude_current_value() {
        let suggester = Suggester::default();
        assert_eq!(suggester.for_option("FPS", "30"), vec!["24", "60"]);
        assert_eq!(suggester.for_option("Size", "1280x720"), vec!["1920x1080"]);
        assert_eq!(
            suggester.for_option("Start Time", "00:00:05"),
            vec!["00:00:01", "00:00:10", "00:01:00"]
        );
        assert!(suggester.for_option("Unknown", "x").is_empty());
    }
}
