//! Serialization entry points with composable replacers.
//!
//! [`serialize`] takes the value, a [`Replacer`] and an optional [`Space`]
//! and delegates to an [`Encoder`]. A non-empty list of transforms is
//! folded into one with [`combine_transforms`] first; every other replacer
//! shape is forwarded as is.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::encoder::{Encoder, HostReplacer, JsonEncoder, PropertyKey, Space};
use crate::errors::{MixinError, Result};
use crate::transforms::{combine_transforms, Chain, SharedTransform};
use crate::value::Value;

/// The replacer argument of [`serialize`].
#[derive(Clone, Default)]
pub enum Replacer {
    #[default]
    None,
    /// Native allow-list mode: only these member names are written.
    KeyFilter(Vec<PropertyKey>),
    /// One transform, used as the encoder's replacer directly.
    Single(SharedTransform),
    /// Transforms applied in order as one replacer.
    Chain(Vec<SharedTransform>),
}

impl Replacer {
    /// Chain several transforms, in order.
    pub fn chain<I>(transforms: I) -> Self
    where
        I: IntoIterator<Item = SharedTransform>,
    {
        Replacer::Chain(transforms.into_iter().collect())
    }

    /// Allow-list of member names.
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PropertyKey>,
    {
        Replacer::KeyFilter(keys.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Replacer::None => "none",
            Replacer::KeyFilter(_) => "key-filter",
            Replacer::Single(_) => "single",
            Replacer::Chain(_) => "chain",
        }
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::None => f.write_str("None"),
            Replacer::KeyFilter(keys) => f.debug_tuple("KeyFilter").field(keys).finish(),
            Replacer::Single(_) => f.write_str("Single(..)"),
            Replacer::Chain(steps) => write!(f, "Chain({} steps)", steps.len()),
        }
    }
}

impl From<SharedTransform> for Replacer {
    fn from(transform: SharedTransform) -> Self {
        Replacer::Single(transform)
    }
}

impl From<Vec<SharedTransform>> for Replacer {
    fn from(transforms: Vec<SharedTransform>) -> Self {
        Replacer::Chain(transforms)
    }
}

impl From<Chain> for Replacer {
    fn from(chain: Chain) -> Self {
        Replacer::Single(std::sync::Arc::new(chain))
    }
}

impl From<Vec<PropertyKey>> for Replacer {
    fn from(keys: Vec<PropertyKey>) -> Self {
        Replacer::KeyFilter(keys)
    }
}

impl From<&[&str]> for Replacer {
    fn from(keys: &[&str]) -> Self {
        Replacer::keys(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Replacer {
    fn from(keys: [&str; N]) -> Self {
        Replacer::keys(keys)
    }
}

impl From<Vec<String>> for Replacer {
    fn from(keys: Vec<String>) -> Self {
        Replacer::keys(keys)
    }
}

impl<T: Into<Replacer>> From<Option<T>> for Replacer {
    fn from(replacer: Option<T>) -> Self {
        replacer.map_or(Replacer::None, Into::into)
    }
}

/// Serialize `value` to JSON text with the default encoder.
///
/// Fails when the encoder does (for example on a big integer no transform
/// converted) or when the top-level value has no JSON form.
pub fn serialize(value: &Value, replacer: impl Into<Replacer>, space: Option<Space>) -> Result<String> {
    serialize_with(&JsonEncoder::default(), value, replacer, space)
}

/// [`serialize`] with a caller-supplied encoder.
pub fn serialize_with<E>(
    encoder: &E,
    value: &Value,
    replacer: impl Into<Replacer>,
    space: Option<Space>,
) -> Result<String>
where
    E: Encoder + ?Sized,
{
    let replacer = replacer.into();
    let space = space.as_ref();
    debug!(replacer = replacer.name(), "serializing value");

    let output = match &replacer {
        Replacer::Chain(steps) if !steps.is_empty() => {
            debug!(steps = steps.len(), "combining replacer chain");
            let chain = combine_transforms(steps.iter().cloned());
            encoder.encode(value, HostReplacer::Function(&chain), space)?
        }
        Replacer::Single(transform) => {
            debug!("using single replacer");
            encoder.encode(value, HostReplacer::Function(&**transform), space)?
        }
        Replacer::Chain(_) => {
            // An empty list has no transform in front, so it is an empty
            // allow-list as far as the encoder is concerned.
            debug!("empty replacer list forwarded as allow-list");
            encoder.encode(value, HostReplacer::AllowList(&[]), space)?
        }
        Replacer::KeyFilter(keys) => {
            debug!(keys = keys.len(), "forwarding key allow-list");
            encoder.encode(value, HostReplacer::AllowList(keys), space)?
        }
        Replacer::None => encoder.encode(value, HostReplacer::None, space)?,
    };

    output.ok_or(MixinError::NothingToSerialize { kind: value.kind() })
}

/// Serialize with no replacer and compact output.
pub fn to_string(value: &Value) -> Result<String> {
    serialize(value, Replacer::None, None)
}

/// Serialize with no replacer and a two-space indent.
pub fn serialize_pretty(value: &Value) -> Result<String> {
    serialize(value, Replacer::None, Some(Space::Width(2)))
}

/// Convert any serde-serializable value into a [`Value`].
pub fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?.into())
}
