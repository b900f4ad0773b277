//! The JSON encoder the replacer layer delegates to.
//!
//! [`Encoder`] is the narrow seam: one value, at most one replacer (a
//! transform or a key allow-list) and an optional indent. [`JsonEncoder`]
//! is the default implementation and follows `JSON.stringify` exactly:
//! quoting, number formatting, member order, indentation and allow-list
//! filtering all live here and nowhere else.

mod json;
mod quote;

pub use json::JsonEncoder;
pub use quote::quote;

use crate::errors::Result;
use crate::transforms::Transform;
use crate::value::{number_to_string, Value};

/// Encodes a [`Value`] to JSON text.
pub trait Encoder {
    /// Returns `Ok(None)` when the top-level value has no JSON form
    /// (undefined, a symbol, a function).
    fn encode(
        &self,
        value: &Value,
        replacer: HostReplacer<'_>,
        space: Option<&Space>,
    ) -> Result<Option<String>>;
}

/// The single replacer argument an encoder understands.
#[derive(Clone, Copy, Default)]
pub enum HostReplacer<'a> {
    #[default]
    None,
    /// Called once per key/value pair, root included (with key `""`).
    Function(&'a dyn Transform),
    /// Only these member names are written for every object.
    AllowList(&'a [PropertyKey]),
}

impl std::fmt::Debug for HostReplacer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostReplacer::None => f.write_str("None"),
            HostReplacer::Function(_) => f.write_str("Function(..)"),
            HostReplacer::AllowList(keys) => f.debug_tuple("AllowList").field(keys).finish(),
        }
    }
}

/// An allow-list entry: a member name or a number standing for one.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Name(String),
    Index(f64),
}

impl PropertyKey {
    /// The member name this entry selects; numbers use their canonical
    /// text (`1` selects `"1"`, `1.5` selects `"1.5"`).
    pub fn to_key_string(&self) -> String {
        match self {
            PropertyKey::Name(name) => name.clone(),
            PropertyKey::Index(n) => number_to_string(*n),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

impl From<i32> for PropertyKey {
    fn from(n: i32) -> Self {
        PropertyKey::Index(f64::from(n))
    }
}

impl From<u32> for PropertyKey {
    fn from(n: u32) -> Self {
        PropertyKey::Index(f64::from(n))
    }
}

impl From<f64> for PropertyKey {
    fn from(n: f64) -> Self {
        PropertyKey::Index(n)
    }
}

/// Indentation for pretty output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Space {
    /// This many spaces per level.
    Width(usize),
    /// This text, verbatim, per level.
    Text(String),
}

impl Space {
    /// The per-level indent unit, truncated to `max` characters. An empty
    /// unit means compact output.
    pub fn gap(&self, max: usize) -> String {
        match self {
            Space::Width(n) => " ".repeat((*n).min(max)),
            Space::Text(text) => text.chars().take(max).collect(),
        }
    }
}

impl From<usize> for Space {
    fn from(width: usize) -> Self {
        Space::Width(width)
    }
}

impl From<&str> for Space {
    fn from(text: &str) -> Self {
        Space::Text(text.to_string())
    }
}

impl From<String> for Space {
    fn from(text: String) -> Self {
        Space::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_caps_width_and_text() {
        assert_eq!(Space::Width(2).gap(10), "  ");
        assert_eq!(Space::Width(0).gap(10), "");
        assert_eq!(Space::Width(25).gap(10).len(), 10);
        assert_eq!(Space::from("--").gap(10), "--");
        assert_eq!(Space::from("abcdefghijklmno").gap(10), "abcdefghij");
        assert_eq!(Space::from("ééé").gap(2), "éé");
    }

    #[test]
    fn property_key_text() {
        assert_eq!(PropertyKey::from("a").to_key_string(), "a");
        assert_eq!(PropertyKey::from(1).to_key_string(), "1");
        assert_eq!(PropertyKey::from(1.5).to_key_string(), "1.5");
        assert_eq!(PropertyKey::from(-0.0).to_key_string(), "0");
    }

    #[test]
    fn host_replacer_debug() {
        assert_eq!(format!("{:?}", HostReplacer::None), "None");
        let keys = [PropertyKey::from("a")];
        assert_eq!(
            format!("{:?}", HostReplacer::AllowList(&keys)),
            "AllowList([Name(\"a\")])"
        );
        let identity = |_key: &str, value: Value| value;
        assert_eq!(format!("{:?}", HostReplacer::Function(&identity)), "Function(..)");
    }
}
