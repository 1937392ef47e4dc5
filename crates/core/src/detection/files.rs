use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::title_case;
use crate::catalog::{extension_group, ExtensionGroup, EXTENSION_GROUPS};
use crate::parameters::{Parameter, ParameterKind};
use crate::suggestions::Suggester;

struct GroupPatterns {
    quoted: Regex,
    unquoted: Regex,
}

static GROUP_PATTERNS: LazyLock<Vec<GroupPatterns>> =
    LazyLock::new(|| EXTENSION_GROUPS.iter().map(compile_group).collect());

fn compile_group(group: &ExtensionGroup) -> GroupPatterns {
    let extensions = group.extensions.join("|");

    GroupPatterns {
        quoted: Regex::new(&format!(
            r#"(?i)(?:^|[\s=])(?:"([^"]+\.(?:{extensions}))"|'([^']+\.(?:{extensions}))')"#
        ))
        .expect("static regex must compile"),
        unquoted: Regex::new(&format!(
            r#"(?i)[^\s"'=<>|;,()`]+\.(?:{extensions})\b"#
        ))
        .expect("static regex must compile"),
    }
}

/// Returns true when `token` ends in one of the known file extensions.
pub(crate) fn has_known_extension(token: &str) -> bool {
    Path::new(token.trim_matches(|c| c == '"' || c == '\''))
        .extension()
        .and_then(|e| e.to_str())
        .and_then(extension_group)
        .is_some()
}

/// Finds file names by extension, quoted occurrences first.
///
/// For quoted names the span is the inner content, so an edit keeps the
/// surrounding quotes. A quote only opens a name at the start of a word. Unquoted matches touching a quote or overlapping a
/// quoted match are skipped.
pub(crate) fn find(command: &str, suggester: &Suggester) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = Vec::new();

    for patterns in GROUP_PATTERNS.iter() {
        for captures in patterns.quoted.captures_iter(command) {
            if let Some(inner) = captures.get(1).or_else(|| captures.get(2)) {
                parameters.push(file_parameter(command, inner.range(), suggester));
            }
        }

        for found in patterns.unquoted.find_iter(command) {
            let before = command[..found.start()].chars().next_back();
            let after = command[found.end()..].chars().next();
            if [before, after]
                .iter()
                .any(|c| matches!(c, Some('"') | Some('\'')))
            {
                continue;
            }

            let overlaps = parameters
                .iter()
                .any(|p| found.start() < p.end && p.start < found.end());
            if overlaps {
                continue;
            }

            parameters.push(file_parameter(command, found.range(), suggester));
        }
    }

    parameters
}

fn file_parameter(command: &str, span: std::ops::Range<usize>, suggester: &Suggester) -> Parameter {
    let filename = &command[span.clone()];
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let group = extension_group(&extension).map_or("file", |g| g.label);

    Parameter::from_span(
        command,
        span,
        ParameterKind::File,
        format!("File (.{extension})"),
        format!("{} file (.{extension})", title_case(group)),
    )
    .with_suggestions(suggester.for_file(filename))
}
