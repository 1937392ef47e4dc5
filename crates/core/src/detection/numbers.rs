use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{FRAME_PATTERN, TIMECODE_PATTERN};
use crate::parameters::{Parameter, ParameterKind};
use crate::suggestions::Suggester;

static TIMECODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIMECODE_PATTERN).expect("static regex must compile"));

static FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FRAME_PATTERN).expect("static regex must compile"));

/// Finds timecodes and frame numbers.
///
/// Frame references span only their digits, not the `frame=` prefix.
pub(crate) fn find(command: &str, suggester: &Suggester) -> Vec<Parameter> {
    let timecodes = TIMECODE.find_iter(command).map(|found| {
        Parameter::from_span(
            command,
            found.range(),
            ParameterKind::Option,
            "Time",
            "Time position",
        )
        .with_suggestions(suggester.for_timecode(found.as_str()))
    });

    let frames = FRAME
        .captures_iter(command)
        .filter_map(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|digits| {
            Parameter::from_span(
                command,
                digits.range(),
                ParameterKind::Option,
                "Frame",
                "Frame number",
            )
            .with_suggestions(suggester.for_frame(digits.as_str()))
        });

    timecodes.chain(frames).collect()
}
