//! Parameter hints supplied by the LLM alongside a generated command.
//!
//! Hint spans are character offsets into the exact command text. Valid hints
//! become [`ParameterKind::Option`] candidates and go through the same
//! overlap resolution as heuristic matches: files, placeholders and paths
//! always beat a hint, and between options the earlier start wins, the
//! heuristic match on a tie. Hints with a missing or invalid span are dropped.

use std::fmt::{Display, Formatter};
use std::ops::Range;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::parameters::{Parameter, ParameterKind, ParameterSet};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalHint {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub span_start: Option<i64>,
    pub span_end: Option<i64>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Why a hint could not be placed in the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSpan {
    Missing,
    Inverted { start: i64, end: i64 },
    OutOfRange { start: i64, end: i64, length: usize },
}

impl Display for InvalidSpan {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSpan::Missing => formatter.write_str("span is missing"),
            InvalidSpan::Inverted { start, end } => {
                write!(formatter, "span [{start}, {end}) is empty or inverted")
            }
            InvalidSpan::OutOfRange { start, end, length } => write!(
                formatter,
                "span [{start}, {end}) is outside a command of {length} characters"
            ),
        }
    }
}

impl ExternalHint {
    fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("Parameter")
    }

    fn display_description(&self) -> &str {
        non_blank(self.description.as_deref())
            .or_else(|| non_blank(self.role.as_deref()))
            .unwrap_or("Parameter")
    }

    /// Resolves the hint's character span into a byte range of `base`.
    pub fn byte_span(&self, base: &str) -> Result<Range<usize>, InvalidSpan> {
        let (Some(start), Some(end)) = (self.span_start, self.span_end) else {
            return Err(InvalidSpan::Missing);
        };

        let length = base.chars().count();
        let out_of_range = InvalidSpan::OutOfRange { start, end, length };

        if start < 0 {
            return Err(out_of_range);
        }
        if start >= end {
            return Err(InvalidSpan::Inverted { start, end });
        }

        let start = usize::try_from(start).map_err(|_| out_of_range)?;
        let end = usize::try_from(end).map_err(|_| out_of_range)?;
        if end > length {
            return Err(out_of_range);
        }

        Ok(char_to_byte(base, start)..char_to_byte(base, end))
    }

    /// Converts the hint into an option parameter over `base`.
    pub fn to_parameter(&self, base: &str) -> Result<Parameter, InvalidSpan> {
        let span = self.byte_span(base)?;

        Ok(Parameter::from_span(
            base,
            span,
            ParameterKind::Option,
            self.display_name(),
            self.display_description(),
        )
        .with_suggestions(self.suggestions.clone()))
    }
}

/// Folds hints into a detected set, re-running overlap resolution.
pub fn merge_hints(base: &str, parameters: ParameterSet, hints: &[ExternalHint]) -> ParameterSet {
    if hints.is_empty() {
        return parameters;
    }

    let mut candidates = parameters.into_vec();
    for hint in hints {
        match hint.to_parameter(base) {
            Ok(parameter) => candidates.push(parameter),
            Err(reason) => warn!("Dropping parameter hint `{}`: {reason}", hint.display_name()),
        }
    }

    let merged = ParameterSet::resolve(candidates);
    debug!("{} parameters after merging {} hints", merged.len(), hints.len());
    merged
}

fn char_to_byte(base: &str, char_index: usize) -> usize {
    base.char_indices()
        .nth(char_index)
        .map_or(base.len(), |(byte_index, _)| byte_index)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
