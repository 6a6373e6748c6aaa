//! CSS identifier escaping (`CSS.escape`).

use cssparser::serialize_identifier;

/// Escape `value` so it can be used as a CSS identifier or inside a quoted
/// attribute value. Same output as the CSSOM `CSS.escape()`.
pub fn css_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    // Writing to a String never fails.
    let _ = serialize_identifier(value, &mut out);
    out
}
