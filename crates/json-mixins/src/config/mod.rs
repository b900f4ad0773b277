use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::{MixinError, Result};

/// Environment variable overriding [`EncoderConfig::max_depth`].
pub const MAX_DEPTH_VAR: &str = "JSON_MIXINS_MAX_DEPTH";
/// Environment variable overriding [`EncoderConfig::max_indent`].
pub const MAX_INDENT_VAR: &str = "JSON_MIXINS_MAX_INDENT";

/// Encoder settings.
///
/// The process-wide instance is read once from the environment by
/// [`EncoderConfig::get`]; encoders can also be built with an explicit one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderConfig {
    /// Deepest array/object nesting the encoder will walk.
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
    /// Cap on indent width and on the length of an indent string.
    #[serde(rename = "maxIndent")]
    pub max_indent: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            max_indent: 10,
        }
    }
}

static CONFIG: OnceLock<EncoderConfig> = OnceLock::new();

impl EncoderConfig {
    /// Returns the global config, reading the environment on first call.
    pub fn get() -> &'static EncoderConfig {
        CONFIG.get_or_init(EncoderConfig::from_env)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup. Unparsable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_depth: read_usize(&lookup, MAX_DEPTH_VAR, defaults.max_depth, 1),
            max_indent: read_usize(&lookup, MAX_INDENT_VAR, defaults.max_indent, 0),
        }
    }

    /// Load from a JSON document such as `{"maxDepth": 64}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(MixinError::Config("maxDepth must be at least 1".into()));
        }
        Ok(())
    }
}

fn read_usize<F>(lookup: &F, name: &str, default: usize, min: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= min => n,
        _ => {
            tracing::warn!(var = name, value = %raw, fallback = default, "ignoring invalid setting");
            default
        }
    }
}
