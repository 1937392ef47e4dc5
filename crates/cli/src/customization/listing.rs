//! Plain-text parameter table for when no interactive terminal is available.

use std::io::Write;

use itertools::Itertools;
use rust_how_core::parameters::ParameterSet;
use rust_how_core::rendering::{effective_value, EditMap};

/// Writes one numbered row per parameter, with presets applied.
///
/// ```text
///  1. File (.mp4) [file] `clip.mp4` (was `input.mp4`): Video file
/// ```
pub fn write_parameter_table(
    out: &mut impl Write,
    parameters: &ParameterSet,
    edits: &EditMap,
) -> std::io::Result<()> {
    if parameters.is_empty() {
        return writeln!(out, "No parameters detected.");
    }

    let width = parameters.len().to_string().len();

    for (index, parameter) in parameters.iter().enumerate() {
        let edit = edits.get(&index);
        let mut row = format!(
            "{:>width$}. {} [{}] `{}`",
            index + 1,
            parameter.name,
            parameter.kind,
            effective_value(parameter, edit)
        );

        if edit.is_some() {
            row.push_str(&format!(" (was `{}`)", parameter.original_value));
        }

        if !parameter.description.is_empty() {
            row.push_str(&format!(": {}", parameter.description));
        }

        writeln!(out, "{row}")?;

        if !parameter.suggestions.is_empty() {
            writeln!(
                out,
                "{:width$}  suggestions: {}",
                "",
                parameter.suggestions.iter().join(", ")
            )?;
        }
    }

    Ok(())
}
