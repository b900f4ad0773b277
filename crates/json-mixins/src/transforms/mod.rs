//! Replacer transforms and the combinator that chains them.
//!
//! A [`Transform`] rewrites one `(key, value)` pair. Any
//! `Fn(&str, Value) -> Value` closure or fn item is a transform, so the
//! functions in [`builtin`] can be handed to an encoder on their own or
//! folded together with [`combine_transforms`].

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A pure `(key, value) -> value` rewrite.
///
/// Implementations return the input unchanged when it is not a shape they
/// handle; they never fail.
pub trait Transform: Send + Sync {
    fn apply(&self, key: &str, value: Value) -> Value;
}

impl<F> Transform for F
where
    F: Fn(&str, Value) -> Value + Send + Sync,
{
    fn apply(&self, key: &str, value: Value) -> Value {
        self(key, value)
    }
}

/// A transform that can be cloned into several replacers and shared across
/// threads.
pub type SharedTransform = Arc<dyn Transform>;

/// Box a transform as a [`SharedTransform`].
pub fn shared<T: Transform + 'static>(transform: T) -> SharedTransform {
    Arc::new(transform)
}

/// Ordered transforms applied as one.
///
/// Each step receives the same key and the previous step's result; with no
/// steps the chain is the identity.
#[derive(Clone, Default)]
pub struct Chain {
    steps: Vec<SharedTransform>,
}

impl Chain {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step at the end of the chain.
    pub fn then(mut self, step: SharedTransform) -> Self {
        self.steps.push(step);
        self
    }
}

impl Transform for Chain {
    fn apply(&self, key: &str, value: Value) -> Value {
        self.steps
            .iter()
            .fold(value, |current, step| step.apply(key, current))
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl FromIterator<SharedTransform> for Chain {
    fn from_iter<I: IntoIterator<Item = SharedTransform>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

/// Fold transforms, left to right, into a single [`Chain`].
pub fn combine_transforms<I>(transforms: I) -> Chain
where
    I: IntoIterator<Item = SharedTransform>,
{
    transforms.into_iter().collect()
}
