use thiserror::Error;

use crate::value::Kind;

#[derive(Error, Debug)]
pub enum MixinError {
    #[error("Do not know how to serialize a BigInt")]
    BigInt,

    #[error("Nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("Value of kind `{kind}` produced no JSON text")]
    NothingToSerialize { kind: Kind },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MixinError>;
