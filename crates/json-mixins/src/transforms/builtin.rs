//! Ready-made transforms, one per non-JSON shape.
//!
//! Each one ignores the key, converts the single variant it recognizes and
//! hands every other value back untouched.

use crate::encoder::{Encoder, HostReplacer, JsonEncoder};
use crate::value::{iso_string, Object, Value};

/// Symbols become their `Symbol(description)` text.
pub fn symbol_to_string(_key: &str, value: Value) -> Value {
    match value {
        Value::Symbol(symbol) => Value::String(symbol.to_string()),
        other => other,
    }
}

/// Big integers become their base-10 digits.
pub fn bigint_to_string(_key: &str, value: Value) -> Value {
    match value {
        Value::BigInt(n) => Value::String(n.to_string()),
        other => other,
    }
}

/// Dates become ISO-8601 UTC text.
pub fn date_to_iso_string(_key: &str, value: Value) -> Value {
    match value {
        Value::Date(date) => Value::String(iso_string(&date)),
        other => other,
    }
}

/// Undefined becomes `null`.
pub fn undefined_to_null(_key: &str, value: Value) -> Value {
    match value {
        Value::Undefined => Value::Null,
        other => other,
    }
}

/// Callables become the `"[Function]"` placeholder.
pub fn function_to_string(_key: &str, value: Value) -> Value {
    match value {
        Value::Function(_) => Value::from("[Function]"),
        other => other,
    }
}

/// Errors become `{name, message, stack}`.
pub fn error_to_object(_key: &str, value: Value) -> Value {
    match value {
        Value::Error(error) => Value::object([
            ("name", error.name()),
            ("message", error.message()),
            ("stack", error.stack()),
        ]),
        other => other,
    }
}

/// Maps become objects keyed by each key's string form.
///
/// Scalar values (see [`Value::is_primitive_like`]) are kept; anything else
/// is replaced by its own JSON text. The conversion is one level deep.
pub fn map_to_object(_key: &str, value: Value) -> Value {
    match value {
        Value::Map(entries) => {
            let mut object = Object::new();
            for (key, value) in entries {
                object.insert(key.to_string(), embed(value));
            }
            Value::Object(object)
        }
        other => other,
    }
}

/// Sets become arrays in insertion order, with the same per-element rule
/// as [`map_to_object`].
pub fn set_to_array(_key: &str, value: Value) -> Value {
    match value {
        Value::Set(elements) => Value::Array(elements.into_iter().map(embed).collect()),
        other => other,
    }
}

fn embed(value: Value) -> Value {
    if value.is_primitive_like() {
        return value;
    }
    match JsonEncoder::default().encode(&value, HostReplacer::None, None) {
        Ok(Some(text)) => Value::String(text),
        Ok(None) => Value::Undefined,
        Err(err) => {
            tracing::warn!(kind = value.type_name(), error = %err, "dropping collection element that cannot be encoded");
            Value::Undefined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ErrorValue, Function, Opaque, Symbol};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    type Builtin = fn(&str, Value) -> Value;

    const ALL: [(&str, Builtin); 8] = [
        ("symbol_to_string", symbol_to_string),
        ("bigint_to_string", bigint_to_string),
        ("date_to_iso_string", date_to_iso_string),
        ("undefined_to_null", undefined_to_null),
        ("function_to_string", function_to_string),
        ("error_to_object", error_to_object),
        ("map_to_object", map_to_object),
        ("set_to_array", set_to_array),
    ];

    fn assert_pass_through(transform: Builtin) {
        assert_eq!(transform("key", Value::from("test")), Value::from("test"));
        assert_eq!(transform("key", Value::from(123)), Value::from(123));
        assert_eq!(transform("key", Value::Null), Value::Null);
    }

    // --- symbol_to_string ---

    #[test]
    fn symbol_to_string_converts_symbols() {
        let symbol = Symbol::new("test");
        assert_eq!(
            symbol_to_string("key", Value::from(symbol.clone())),
            Value::from(symbol.to_string())
        );
        assert_eq!(
            symbol_to_string("key", Value::from(Symbol::anonymous())),
            Value::from("Symbol()")
        );
    }

    #[test]
    fn symbol_to_string_leaves_other_values() {
        assert_pass_through(symbol_to_string);
    }

    // --- bigint_to_string ---

    #[test]
    fn bigint_to_string_converts_bigints() {
        assert_eq!(
            bigint_to_string("key", Value::bigint(9007199254740991i64)),
            Value::from("9007199254740991")
        );
        assert_eq!(
            bigint_to_string("key", Value::BigInt(i128::MIN)),
            Value::from("-170141183460469231731687303715884105728")
        );
    }

    #[test]
    fn bigint_to_string_leaves_other_values() {
        assert_pass_through(bigint_to_string);
    }

    // --- date_to_iso_string ---

    #[test]
    fn date_to_iso_string_converts_dates() {
        let date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            date_to_iso_string("key", Value::Date(date)),
            Value::from("2023-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn date_to_iso_string_leaves_other_values() {
        assert_pass_through(date_to_iso_string);
    }

    // --- undefined_to_null ---

    #[test]
    fn undefined_to_null_converts_undefined() {
        assert_eq!(undefined_to_null("key", Value::Undefined), Value::Null);
    }

    #[test]
    fn undefined_to_null_leaves_other_values() {
        assert_pass_through(undefined_to_null);
    }

    // --- function_to_string ---

    #[test]
    fn function_to_string_converts_callables() {
        let f = Function::new("f");
        assert_eq!(
            function_to_string("key", Value::from(f)),
            Value::from("[Function]")
        );
    }

    #[test]
    fn function_to_string_leaves_other_values() {
        assert_pass_through(function_to_string);
    }

    // --- error_to_object ---

    #[test]
    fn error_to_object_has_exactly_three_fields() {
        let error = ErrorValue::new("test error");
        let stack = error.stack().to_string();
        let result = error_to_object("key", Value::from(error));

        let object = result.as_object().unwrap();
        let keys: Vec<&str> = object.keys().collect();
        assert_eq!(keys, ["name", "message", "stack"]);
        assert_eq!(result.get("name"), Some(&Value::from("Error")));
        assert_eq!(result.get("message"), Some(&Value::from("test error")));
        assert_eq!(result.get("stack"), Some(&Value::from(stack)));
    }

    #[test]
    fn error_to_object_keeps_custom_names() {
        let error = ErrorValue::with_name("TypeError", "bad type").with_stack("trace");
        let result = error_to_object("key", Value::from(error));
        assert_eq!(result.get("name"), Some(&Value::from("TypeError")));
        assert_eq!(result.get("stack"), Some(&Value::from("trace")));
    }

    #[test]
    fn error_to_object_leaves_other_values() {
        assert_pass_through(error_to_object);
    }

    // --- map_to_object ---

    #[test]
    fn map_to_object_keeps_primitive_values() {
        let map = Value::map([
            ("a", Value::from(1)),
            ("b", Value::from("test")),
            ("c", Value::from(true)),
        ]);
        assert_eq!(
            map_to_object("key", map),
            Value::object([
                ("a", Value::from(1)),
                ("b", Value::from("test")),
                ("c", Value::from(true)),
            ])
        );
    }

    #[test]
    fn map_to_object_embeds_nested_values_as_json() {
        let map = Value::map([("obj", Value::object([("name", "test")]))]);
        let result = map_to_object("key", map);
        assert_eq!(result.get("obj"), Some(&Value::from("{\"name\":\"test\"}")));
    }

    #[test]
    fn map_to_object_keeps_dates_bigints_and_undefined() {
        let date = Utc.with_ymd_and_hms(2020, 5, 17, 0, 0, 0).unwrap();
        let map = Value::map([
            ("when", Value::Date(date)),
            ("big", Value::bigint(5)),
            ("gone", Value::Undefined),
            ("none", Value::Null),
        ]);
        let result = map_to_object("key", map);
        assert_eq!(result.get("when"), Some(&Value::Date(date)));
        assert_eq!(result.get("big"), Some(&Value::bigint(5)));
        assert_eq!(result.get("gone"), Some(&Value::Undefined));
        assert_eq!(result.get("none"), Some(&Value::Null));
    }

    #[test]
    fn map_to_object_stringifies_keys() {
        let map = Value::map([
            (Value::from(1), Value::from("one")),
            (Value::from(true), Value::from("yes")),
            (Value::Null, Value::from("nothing")),
            (Value::from(Symbol::new("s")), Value::from("sym")),
            (Value::object([("x", 1)]), Value::from("obj")),
        ]);
        let result = map_to_object("key", map);
        let keys: Vec<&str> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["1", "true", "null", "Symbol(s)", "[object Object]"]);
    }

    #[test]
    fn map_to_object_colliding_key_text_overwrites_in_place() {
        let map = Value::map([
            (Value::from(1), Value::from("number")),
            (Value::from("x"), Value::from("middle")),
            (Value::from("1"), Value::from("string")),
        ]);
        let result = map_to_object("key", map);
        assert_eq!(
            result,
            Value::object([("1", "string"), ("x", "middle")])
        );
    }

    #[test]
    fn map_to_object_does_not_recurse_into_nested_collections() {
        let inner = Value::map([("a", 1)]);
        let map = Value::map([("inner", inner), ("list", Value::Array(vec![Value::from(1), Value::from(2)]))]);
        let result = map_to_object("key", map);
        assert_eq!(result.get("inner"), Some(&Value::from("{}")));
        assert_eq!(result.get("list"), Some(&Value::from("[1,2]")));
    }

    #[test]
    fn map_to_object_drops_values_without_json_text() {
        let map = Value::map([
            ("sym", Value::from(Symbol::new("s"))),
            ("f", Value::from(Function::new("f"))),
            ("deep", Value::object([("n", Value::bigint(1))])),
        ]);
        let result = map_to_object("key", map);
        assert_eq!(result.get("sym"), Some(&Value::Undefined));
        assert_eq!(result.get("f"), Some(&Value::Undefined));
        assert_eq!(result.get("deep"), Some(&Value::Undefined));
    }

    #[test]
    fn map_to_object_leaves_other_values() {
        assert_pass_through(map_to_object);
    }

    // --- set_to_array ---

    #[test]
    fn set_to_array_keeps_primitive_elements_in_order() {
        let set = Value::set([Value::from(1), Value::from("test"), Value::from(true)]);
        assert_eq!(
            set_to_array("key", set),
            Value::Array(vec![Value::from(1), Value::from("test"), Value::from(true)])
        );
    }

    #[test]
    fn set_to_array_embeds_nested_values_as_json() {
        let set = Value::set([Value::object([("name", "test")])]);
        assert_eq!(
            set_to_array("key", set),
            Value::Array(vec![Value::from("{\"name\":\"test\"}")])
        );
    }

    #[test]
    fn set_to_array_leaves_other_values() {
        assert_pass_through(set_to_array);
    }

    // --- shared properties ---

    #[test]
    fn opaque_values_pass_through_every_builtin() {
        for (name, transform) in ALL {
            let opaque = Value::from(Opaque::new("WeakMap"));
            assert_eq!(transform("key", opaque.clone()), opaque, "{name}");
        }
    }

    #[test]
    fn each_builtin_only_touches_its_own_shape() {
        let date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let samples = [
            ("symbol_to_string", Value::from(Symbol::new("s"))),
            ("bigint_to_string", Value::bigint(1)),
            ("date_to_iso_string", Value::Date(date)),
            ("undefined_to_null", Value::Undefined),
            ("function_to_string", Value::from(Function::new("f"))),
            ("error_to_object", Value::from(ErrorValue::new("e"))),
            ("map_to_object", Value::map([("a", 1)])),
            ("set_to_array", Value::set([1])),
        ];
        for (name, transform) in ALL {
            for (owner, sample) in &samples {
                let out = transform("key", sample.clone());
                if *owner == name {
                    assert_ne!(&out, sample, "{name} should convert its own shape");
                } else {
                    assert_eq!(&out, sample, "{name} should ignore {owner}");
                }
            }
        }
    }

    fn json_like() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i32>().prop_map(Value::from),
            "[a-z0-9 ]{0,12}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,4}", inner), 0..4).prop_map(|members| Value::object(members)),
            ]
        })
    }

    proptest! {
        #[test]
        fn builtins_pass_json_values_through(value in json_like()) {
            for (name, transform) in ALL {
                prop_assert_eq!(transform("key", value.clone()), value.clone(), "{}", name);
            }
        }
    }
}
