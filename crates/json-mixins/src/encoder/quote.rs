/// Quote a string as a JSON string literal.
///
/// Escapes `"` and `\`, uses the short forms for backspace, form feed,
/// newline, carriage return and tab, and `\u00xx` (lower-case hex) for the
/// remaining control characters. Everything else is written as is.
pub fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

pub(crate) fn push_quoted(s: &str, output: &mut String) {
    output.push_str(&quote(s));
}
