//! Parameter parsing helpers.
//!
//! Two sources feed uniform values: free-form control text (parsed every
//! frame, never rejected) and loose JSON objects from config files or the
//! command line (missing or mistyped keys fall back to a default).

use crate::preset::Preset;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parses the text of a numeric control into a uniform value.
///
/// Surrounding whitespace is ignored. Anything that is not a float
/// (empty text included) becomes `NaN`; values are never clamped.
pub fn parse_control(text: &str) -> f32 {
    text.trim().parse::<f32>().unwrap_or(f32::NAN)
}

/// Extracts an `f32` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and narrows them to f32.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Overlays the extras of `preset` found in `params` onto `extras`.
///
/// Keys the preset does not declare are ignored; declared extras missing
/// from both `params` and `extras` get the preset default.
pub fn merge_extras(extras: &mut BTreeMap<String, f32>, preset: &Preset, params: &Value) {
    for extra in preset.extras {
        let current = extras.get(extra.uniform).copied().unwrap_or(extra.default);
        extras.insert(
            extra.uniform.to_string(),
            param_f32(params, extra.uniform, current),
        );
    }
}
