use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use super::{number_to_string, Value};

/// ISO-8601 UTC rendering with millisecond precision.
///
/// Years outside `0..=9999` use the expanded six-digit signed form
/// (`+275760-09-13T00:00:00.000Z`).
pub fn iso_string(date: &DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!(
            "{sign}{:06}-{}",
            year.unsigned_abs(),
            date.format("%m-%dT%H:%M:%S%.3fZ")
        )
    }
}

/// String conversion of any value, used for map keys.
///
/// Containers render as their `[object Tag]` text, arrays join their
/// elements with commas, and dates use the long UTC form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Symbol(symbol) => write!(f, "{symbol}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Date(date) => write!(
                f,
                "{}",
                date.format("%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)")
            ),
            Value::Function(function) => {
                write!(f, "function {}() {{ [native code] }}", function.name())
            }
            Value::Error(error) => write!(f, "{error}"),
            Value::Map(_) => f.write_str("[object Map]"),
            Value::Set(_) => f.write_str("[object Set]"),
            Value::Opaque(opaque) => write!(f, "[object {}]", opaque.type_name()),
        }
    }
}
