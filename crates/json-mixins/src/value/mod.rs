//! The closed value model shared by the transforms and the encoder.
//!
//! [`Value`] covers both the JSON-representable shapes and the extended
//! shapes a traversal can run into (symbols, callables, keyed and unique
//! collections, errors, big integers, dates). Shape detection happens once,
//! when a value is built; everything downstream matches on the variant.

mod number;
mod object;
mod render;
mod shapes;

pub use number::number_to_string;
pub use object::Object;
pub use render::iso_string;
pub use shapes::{ErrorValue, Function, Opaque, Symbol};

use chrono::{DateTime, Utc};

/// Any value a serialization traversal may encounter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    /// IEEE-754 double, like every JSON number.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// String-keyed members in insertion order.
    Object(Object),
    Symbol(Symbol),
    /// Arbitrary-size integer, limited here to the `i128` range.
    BigInt(i128),
    Date(DateTime<Utc>),
    Function(Function),
    Error(ErrorValue),
    /// Keyed collection; entries keep insertion order.
    Map(Vec<(Value, Value)>),
    /// Unique-element collection; elements keep insertion order.
    Set(Vec<Value>),
    /// Anything no transform recognizes, tagged with its type name.
    Opaque(Opaque),
}

/// Variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Symbol,
    BigInt,
    Date,
    Function,
    Error,
    Map,
    Set,
    Opaque,
}

impl Kind {
    /// Lower-case name used in log fields and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Symbol => "symbol",
            Kind::BigInt => "bigint",
            Kind::Date => "date",
            Kind::Function => "function",
            Kind::Error => "error",
            Kind::Map => "map",
            Kind::Set => "set",
            Kind::Opaque => "opaque",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Build a map from `(key, value)` pairs.
    ///
    /// A key that repeats an earlier primitive key replaces that entry's
    /// value and keeps its position. Container keys are never merged, since
    /// each one is a distinct collection.
    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = value.into();
            match out.iter_mut().find(|(existing, _)| existing.same_value_zero(&key)) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Map(out)
    }

    /// Build a set, dropping repeated primitive elements.
    pub fn set<I, V>(elements: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut out: Vec<Value> = Vec::new();
        for element in elements {
            let element = element.into();
            if !out.iter().any(|existing| existing.same_value_zero(&element)) {
                out.push(element);
            }
        }
        Value::Set(out)
    }

    /// Build an object from `(name, value)` pairs.
    pub fn object<I, K, V>(members: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(members.into_iter().collect())
    }

    /// Wrap an integer as a big integer.
    pub fn bigint(n: impl Into<i128>) -> Value {
        Value::BigInt(n.into())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Symbol(_) => Kind::Symbol,
            Value::BigInt(_) => Kind::BigInt,
            Value::Date(_) => Kind::Date,
            Value::Function(_) => Kind::Function,
            Value::Error(_) => Kind::Error,
            Value::Map(_) => Kind::Map,
            Value::Set(_) => Kind::Set,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Returns the type name as a string for log fields and error messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Scalars a map or set conversion keeps as they are: strings, numbers,
    /// booleans, null, undefined, dates and big integers.
    pub fn is_primitive_like(&self) -> bool {
        matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Date(_)
                | Value::BigInt(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Member lookup on objects; `None` for every other shape.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// SameValueZero: primitives compare by value (NaN equals NaN, zero
    /// signs are ignored), symbols and callables by identity, and
    /// collections never compare equal.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(members: Object) -> Self {
        Value::Object(members)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<ErrorValue> for Value {
    fn from(error: ErrorValue) -> Self {
        Value::Error(error)
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Value::Opaque(opaque)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
