use std::sync::LazyLock;

use regex::Regex;

use super::title_case;
use crate::catalog::{PLACEHOLDER_DELIMITERS, PLACEHOLDER_PATTERNS};
use crate::parameters::{Parameter, ParameterKind};
use crate::suggestions::Suggester;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PLACEHOLDER_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static regex must compile"))
        .collect()
});

/// Finds `{NAME}`, `<name>`, `[name]` and `$NAME` tokens, delimiters included.
pub(crate) fn find(command: &str, suggester: &Suggester) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    for pattern in PATTERNS.iter() {
        for found in pattern.find_iter(command) {
            let name = placeholder_name(found.as_str());

            parameters.push(
                Parameter::from_span(
                    command,
                    found.range(),
                    ParameterKind::Placeholder,
                    name.clone(),
                    format!("Parameter: {name}"),
                )
                .with_suggestions(suggester.for_placeholder(found.as_str())),
            );
        }
    }

    parameters
}

/// `{OUTPUT_DIR}` becomes `Output Dir`.
pub(crate) fn placeholder_name(token: &str) -> String {
    let stripped: String = token
        .chars()
        .filter(|c| !PLACEHOLDER_DELIMITERS.contains(c))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();

    title_case(stripped.trim())
}
