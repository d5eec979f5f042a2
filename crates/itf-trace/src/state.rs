// crates/itf-trace/src/state.rs

//! A single ITF state: the `#meta` object plus ordered variable bindings.
//!
//! `#meta` is free-form tool metadata and is deliberately **not**
//! value-decoded; every other key is a variable binding decoded through
//! `itf-value`. Source key order is preserved end-to-end.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use indexmap::IndexMap;
use itf_value::codec::json_kind;
use itf_value::{FormatError, Value};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Reserved key carrying free-form metadata on states and traces.
pub(crate) const META_KEY: &str = "#meta";

/// Free-form metadata object, kept as raw JSON.
pub type Meta = JsonMap<String, JsonValue>;

/// One snapshot of all variable bindings at a point in a trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    /// `#meta` payload; empty when the wire object had none.
    pub meta: Meta,
    /// Variable name → value, in source order.
    pub values: IndexMap<String, Value>,
}

impl State {
    /// Empty state (no metadata, no bindings).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State from `(variable, value)` pairs, preserving their order.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let mut values = IndexMap::new();
        for (name, value) in pairs {
            values.insert(name.into(), value);
        }
        Self {
            meta: Meta::new(),
            values,
        }
    }

    /// Replace the `#meta` payload.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Value bound to `var`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, var: &str) -> Option<&Value> {
        self.values.get(var)
    }

    /// Number of variable bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the state binds no variables.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate bindings in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Decode a state from its ITF JSON representation.
    ///
    /// `#meta` defaults to an empty object when absent; every other key is
    /// decoded as a variable binding.
    pub fn from_json(json: &JsonValue) -> Result<Self, FormatError> {
        let obj = expect_object("state", json)?;
        let mut meta = Meta::new();
        let mut values = IndexMap::with_capacity(obj.len());
        for (key, raw) in obj {
            if key == META_KEY {
                meta = expect_object(META_KEY, raw)?.clone();
            } else {
                values.insert(key.clone(), Value::from_json(raw)?);
            }
        }
        Ok(Self { meta, values })
    }

    /// Encode this state to its ITF JSON representation.
    ///
    /// Emits `#meta` first (even when empty), then each binding in the
    /// state's own order.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut obj = JsonMap::with_capacity(self.values.len() + 1);
        obj.insert(META_KEY.to_owned(), JsonValue::Object(self.meta.clone()));
        for (var, value) in &self.values {
            obj.insert(var.clone(), value.to_json());
        }
        JsonValue::Object(obj)
    }
}

/// Serializes as the ITF JSON wire shape.
impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Deserializes from the ITF JSON wire shape via [`State::from_json`].
impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::from_json(&json).map_err(de::Error::custom)
    }
}

pub(crate) fn expect_object<'a>(
    context: &'static str,
    json: &'a JsonValue,
) -> Result<&'a Meta, FormatError> {
    match json {
        JsonValue::Object(obj) => Ok(obj),
        other => Err(FormatError::UnexpectedShape {
            context,
            expected: "an object",
            found: json_kind(other),
        }),
    }
}

pub(crate) fn decode_meta(raw: Option<&JsonValue>) -> Result<Meta, FormatError> {
    match raw {
        None => Ok(Meta::new()),
        Some(json) => Ok(expect_object(META_KEY, json)?.clone()),
    }
}
