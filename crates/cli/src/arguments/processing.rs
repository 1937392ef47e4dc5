use log::debug;
use rust_how_core::error::Error::{PresetFormat, UnknownPresetParameter};
use rust_how_core::error::Result;
use rust_how_core::parameters::ParameterSet;
use rust_how_core::rendering::EditMap;

/// Splits a `key=value` preset at its first `=`.
///
/// The value may itself contain `=` and may be empty.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is blank.
pub fn parse_preset(preset: &str) -> Result<(&str, &str)> {
    match preset.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(PresetFormat(preset.to_string())),
    }
}

/// Resolves presets against the detected parameters into an edit map.
///
/// A later preset for the same parameter wins.
///
/// # Errors
///
/// Returns an error if a preset is malformed or names no parameter.
pub fn process_presets(presets: &[String], parameters: &ParameterSet) -> Result<EditMap> {
    let mut edits = EditMap::new();

    for preset in presets {
        let (key, value) = parse_preset(preset)?;
        let index = parameters
            .find_by_key(key)
            .ok_or_else(|| UnknownPresetParameter(key.to_string()))?;

        debug!("Preset `{key}` sets parameter {} to `{value}`", index + 1);
        edits.insert(index, value.to_string());
    }

    Ok(edits)
}
