use std::borrow::Cow;

use indexmap::IndexSet;
use tracing::trace;

use super::quote::push_quoted;
use super::{Encoder, HostReplacer, Space};
use crate::config::EncoderConfig;
use crate::errors::{MixinError, Result};
use crate::value::{iso_string, number_to_string, Object, Value};

/// The default encoder, reproducing `JSON.stringify`.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new(EncoderConfig::get().clone())
    }
}

impl JsonEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Encoder for JsonEncoder {
    fn encode(
        &self,
        value: &Value,
        replacer: HostReplacer<'_>,
        space: Option<&Space>,
    ) -> Result<Option<String>> {
        trace!(?replacer, "encoding value");
        let allow_list: Option<IndexSet<String>> = match replacer {
            HostReplacer::AllowList(keys) => {
                Some(keys.iter().map(|key| key.to_key_string()).collect())
            }
            _ => None,
        };
        let transform = match replacer {
            HostReplacer::Function(transform) => Some(transform),
            _ => None,
        };

        let mut walk = Walk {
            transform,
            allow_list,
            gap: space
                .map(|s| s.gap(self.config.max_indent))
                .unwrap_or_default(),
            indent: String::new(),
            depth: 0,
            max_depth: self.config.max_depth,
        };
        walk.property("", Cow::Borrowed(value))
    }
}

/// Traversal state for one `encode` call.
struct Walk<'a> {
    transform: Option<&'a dyn crate::transforms::Transform>,
    // Deduplicated, first occurrence wins.
    allow_list: Option<IndexSet<String>>,
    gap: String,
    indent: String,
    depth: usize,
    max_depth: usize,
}

impl Walk<'_> {
    /// Serialize one holder member. `None` means the member has no JSON
    /// form and is skipped by the caller.
    fn property(&mut self, key: &str, value: Cow<'_, Value>) -> Result<Option<String>> {
        let mut value = value;

        // Dates carry their own JSON hook, applied before any replacer.
        if let Value::Date(date) = value.as_ref() {
            value = Cow::Owned(Value::String(iso_string(date)));
        }
        if let Some(transform) = self.transform {
            value = Cow::Owned(transform.apply(key, value.into_owned()));
        }

        let text = match value.as_ref() {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::String(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                push_quoted(s, &mut out);
                out
            }
            Value::Number(n) if n.is_finite() => number_to_string(*n),
            Value::Number(_) => "null".to_string(),
            Value::BigInt(_) => return Err(MixinError::BigInt),
            Value::Array(items) => self.array(items)?,
            Value::Object(members) => self.object(members)?,
            Value::Map(_) | Value::Set(_) | Value::Error(_) | Value::Opaque(_) => {
                self.object(&Object::new())?
            }
            Value::Date(date) => {
                // Only reachable when a replacer returned a date.
                let mut out = String::new();
                push_quoted(&iso_string(date), &mut out);
                out
            }
            Value::Undefined | Value::Symbol(_) | Value::Function(_) => return Ok(None),
        };
        Ok(Some(text))
    }

    fn enter(&mut self) -> Result<String> {
        if self.depth >= self.max_depth {
            return Err(MixinError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let stepback = self.indent.clone();
        self.indent.push_str(&self.gap);
        Ok(stepback)
    }

    fn leave(&mut self, stepback: String) {
        self.depth -= 1;
        self.indent = stepback;
    }

    fn array(&mut self, items: &[Value]) -> Result<String> {
        let stepback = self.enter()?;
        let mut parts = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let part = self.property(&index.to_string(), Cow::Borrowed(item))?;
            parts.push(part.unwrap_or_else(|| "null".to_string()));
        }
        let text = self.wrap('[', ']', &parts, &stepback);
        self.leave(stepback);
        Ok(text)
    }

    fn object(&mut self, members: &Object) -> Result<String> {
        let stepback = self.enter()?;
        let colon = if self.gap.is_empty() { ":" } else { ": " };

        let entries: Vec<(Cow<'_, str>, &Value)> = match &self.allow_list {
            Some(names) => names
                .iter()
                .filter_map(|name| members.get(name).map(|v| (Cow::Owned(name.clone()), v)))
                .collect(),
            None => ordered_members(members)
                .into_iter()
                .map(|(k, v)| (Cow::Borrowed(k), v))
                .collect(),
        };

        let mut parts = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Some(text) = self.property(&key, Cow::Borrowed(value))? {
                let mut member = String::with_capacity(key.len() + text.len() + 4);
                push_quoted(&key, &mut member);
                member.push_str(colon);
                member.push_str(&text);
                parts.push(member);
            }
        }
        let text = self.wrap('{', '}', &parts, &stepback);
        self.leave(stepback);
        Ok(text)
    }

    fn wrap(&self, open: char, close: char, parts: &[String], stepback: &str) -> String {
        if parts.is_empty() {
            return format!("{open}{close}");
        }
        if self.gap.is_empty() {
            return format!("{open}{}{close}", parts.join(","));
        }
        let separator = format!(",\n{}", self.indent);
        format!(
            "{open}\n{}{}\n{stepback}{close}",
            self.indent,
            parts.join(&separator)
        )
    }
}

/// Members in own-key order: array-index names ascending, then the rest in
/// insertion order.
fn ordered_members(members: &Object) -> Vec<(&str, &Value)> {
    let mut indexed: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::new();
    for (key, value) in members.iter() {
        match array_index(key) {
            Some(index) => indexed.push((index, key, value)),
            None => named.push((key, value)),
        }
    }
    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

/// Canonical decimal below 2^32 - 1, the range of array indices.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}
