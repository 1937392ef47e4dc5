use std::sync::LazyLock;

use regex::Regex;

use super::files::has_known_extension;
use super::title_case;
use crate::catalog::PATH_KEYWORDS;
use crate::parameters::{Parameter, ParameterKind};
use crate::suggestions::Suggester;

static KEYWORD_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\s+(\S+)", PATH_KEYWORDS.join("|")))
        .expect("static regex must compile")
});

/// Finds the token following a path keyword such as `output` or `dir`.
///
/// Only the token is spanned, never the keyword. Tokens that already carry a
/// known file extension are left to the file strategy.
pub(crate) fn find(command: &str, suggester: &Suggester) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    for captures in KEYWORD_PATH.captures_iter(command) {
        let (Some(keyword), Some(token)) = (captures.get(1), captures.get(2)) else {
            continue;
        };

        if has_known_extension(token.as_str()) {
            continue;
        }

        let name = title_case(keyword.as_str());
        parameters.push(
            Parameter::from_span(
                command,
                token.range(),
                ParameterKind::Path,
                name.clone(),
                format!("{name} path"),
            )
            .with_suggestions(suggester.for_path(token.as_str())),
        );
    }

    parameters
}
