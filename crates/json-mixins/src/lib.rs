// json-mixins: composable replacer transforms for JSON serialization

pub mod config;
pub mod encoder;
pub mod errors;
pub mod json;
pub mod logger;
pub mod transforms;
pub mod value;

pub use encoder::{Encoder, JsonEncoder, PropertyKey, Space};
pub use errors::{MixinError, Result};
pub use json::{serialize, serialize_pretty, serialize_with, to_string, to_value, Replacer};
pub use transforms::builtin::{
    bigint_to_string, date_to_iso_string, error_to_object, function_to_string, map_to_object,
    set_to_array, symbol_to_string, undefined_to_null,
};
pub use transforms::{combine_transforms, shared, Chain, SharedTransform, Transform};
pub use value::{ErrorValue, Function, Kind, Object, Opaque, Symbol, Value};
