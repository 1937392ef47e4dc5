//! Detected parameters and the non-overlapping set they form.

use std::fmt::{Display, Formatter};
use std::ops::Range;

use itertools::Itertools;
use serde::Serialize;

/// What kind of heuristic produced a parameter.
///
/// Only used to decide which of two overlapping spans survives; see
/// [`ParameterKind::priority`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    File,
    Placeholder,
    Path,
    Option,
}

impl ParameterKind {
    /// `file > placeholder > path > option`.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            ParameterKind::File => 3,
            ParameterKind::Placeholder => 2,
            ParameterKind::Path => 1,
            ParameterKind::Option => 0,
        }
    }
}

impl Display for ParameterKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            ParameterKind::File => "file",
            ParameterKind::Placeholder => "placeholder",
            ParameterKind::Path => "path",
            ParameterKind::Option => "option",
        })
    }
}

/// A labelled span `[start, end)` into an immutable base command.
///
/// Offsets are byte offsets and always fall on `char` boundaries, so
/// `original_value == base[start..end]`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub original_value: String,
    pub start: usize,
    pub end: usize,
    pub kind: ParameterKind,
    pub suggestions: Vec<String>,
    pub description: String,
}

impl Parameter {
    /// Builds a parameter over `base[span]`.
    pub fn from_span(
        base: &str,
        span: Range<usize>,
        kind: ParameterKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        debug_assert!(span.start < span.end && span.end <= base.len());

        Self {
            name: name.into(),
            original_value: base[span.clone()].to_string(),
            start: span.start,
            end: span.end,
            kind,
            suggestions: Vec::new(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn overlaps(&self, other: &Parameter) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Display for Parameter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}: `{}`", self.name, self.original_value)
    }
}

/// Sorted, pairwise non-overlapping parameters over one base command.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// Resolves overlapping candidates into a valid set.
    ///
    /// Candidates are stable-sorted by `start` and swept left to right. A
    /// candidate that intersects already accepted spans replaces all of them
    /// only if its kind has strictly higher priority than each; otherwise it
    /// is dropped, so on a tie the first encountered candidate wins.
    pub fn resolve(candidates: Vec<Parameter>) -> Self {
        let mut accepted: Vec<Parameter> = Vec::with_capacity(candidates.len());

        for candidate in candidates.into_iter().sorted_by_key(|p| p.start) {
            let intersecting: Vec<usize> = accepted
                .iter()
                .enumerate()
                .filter(|(_, existing)| existing.overlaps(&candidate))
                .map(|(i, _)| i)
                .collect();

            let wins = intersecting
                .iter()
                .all(|&i| candidate.kind.priority() > accepted[i].kind.priority());

            if !wins {
                continue;
            }

            for i in intersecting.into_iter().rev() {
                accepted.remove(i);
            }
            accepted.push(candidate);
        }

        accepted.sort_by_key(|p| p.start);

        Self {
            parameters: accepted,
        }
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Finds a parameter by its 1-based position or its name (case-insensitive).
    pub fn find_by_key(&self, key: &str) -> Option<usize> {
        if let Ok(position) = key.parse::<usize>() {
            return (1..=self.len()).contains(&position).then(|| position - 1);
        }

        self.parameters
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(key.trim()))
    }

    pub(crate) fn into_vec(self) -> Vec<Parameter> {
        self.parameters
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
