use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

use crate::catalog::{flag_label, FLAG_LABELS};
use crate::parameters::{Parameter, ParameterKind};
use crate::suggestions::Suggester;

const VALUE: &str = r#""([^"]+)"|'([^']+)'|(\S+)"#;

struct FlagPatterns {
    equals: Regex,
    spaced: Regex,
}

static PATTERNS: LazyLock<FlagPatterns> = LazyLock::new(|| {
    // longest first so `-ss` is tried before `-s`
    let flags = FLAG_LABELS
        .iter()
        .map(|(flag, _)| *flag)
        .sorted_by_key(|flag| std::cmp::Reverse(flag.len()))
        .map(regex::escape)
        .join("|");

    FlagPatterns {
        equals: Regex::new(&format!(r"(?:^|\s)({flags})=(?:{VALUE})"))
            .expect("static regex must compile"),
        spaced: Regex::new(&format!(r"(?:^|\s)({flags})\s+(?:{VALUE})"))
            .expect("static regex must compile"),
    }
});

/// Finds values given to well known flags, as `--flag=value` or `--flag value`.
///
/// When the word after a flag is itself a flag, scanning resumes right after
/// the first one so the second still gets its value.
pub(crate) fn find(command: &str, suggester: &Suggester) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    for pattern in [&PATTERNS.equals, &PATTERNS.spaced] {
        let mut position = 0;

        while let Some(captures) = pattern.captures_at(command, position) {
            let Some(flag) = captures.get(1) else {
                break;
            };

            match flag_parameter(command, &captures, suggester) {
                Some(parameter) => {
                    parameters.push(parameter);
                    position = captures.get(0).map_or(flag.end(), |found| found.end());
                }
                None => position = flag.end(),
            }
        }
    }

    parameters
}

fn flag_parameter(command: &str, captures: &Captures<'_>, suggester: &Suggester) -> Option<Parameter> {
    let flag = captures.get(1)?.as_str();
    let label = flag_label(flag)?;

    let value = match (captures.get(2), captures.get(3), captures.get(4)) {
        (Some(quoted), _, _) | (_, Some(quoted), _) => quoted,
        (_, _, Some(bare)) if !looks_like_flag(bare.as_str()) => bare,
        _ => return None,
    };

    Some(
        Parameter::from_span(
            command,
            value.range(),
            ParameterKind::Option,
            label,
            format!("{label} option"),
        )
        .with_suggestions(suggester.for_option(label, value.as_str())),
    )
}

/// `-la` is another flag, `-5` is a negative number.
fn looks_like_flag(value: &str) -> bool {
    value.starts_with('-') && value.parse::<f64>().is_err()
}
