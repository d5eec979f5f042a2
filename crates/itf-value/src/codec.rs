//! JSON wire codec for [`Value`].
//!
//! Decoding dispatches on the reserved marker key an object carries
//! (`#bigint`, `#tup`, `#set`, `#map`, `#unserializable`, in that fixed
//! precedence); an object with no marker is a record, an array is a list,
//! and leaves pass through. Encoding is the structural inverse and is
//! **total** — it never fails.
//!
//! Round-trip law: `Value::from_json(&v.to_json()) == v` for every value,
//! except records that use a reserved marker key as a genuine field name.
//! That case is unrepresentable by design and is reported with a `tracing`
//! warning at encode time.

use crate::{FormatError, Value};
use indexmap::{IndexMap, IndexSet};
use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::warn;

/// Reserved object keys that must never be used as ordinary field names
/// without losing round-trip fidelity.
pub const RESERVED_KEYS: [&str; 6] = [
    "#meta",
    "#bigint",
    "#tup",
    "#set",
    "#map",
    "#unserializable",
];

/// Maximum value nesting depth accepted by [`Value::from_json`].
///
/// Matches serde_json's own text-parsing recursion limit, so any value that
/// arrived as JSON text decodes without tripping the bound; JSON structures
/// assembled programmatically to be deeper are rejected with
/// [`FormatError::TooDeep`] instead of risking stack exhaustion.
pub const MAX_VALUE_DEPTH: usize = 128;

pub(crate) const BIGINT_KEY: &str = "#bigint";
pub(crate) const TUPLE_KEY: &str = "#tup";
pub(crate) const SET_KEY: &str = "#set";
pub(crate) const MAP_KEY: &str = "#map";
pub(crate) const UNSERIALIZABLE_KEY: &str = "#unserializable";

/// Short JSON kind name for diagnostics.
#[must_use]
pub const fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Value {
    /// Decode a value from its ITF JSON representation.
    ///
    /// Fails with [`FormatError`] when a `#bigint` payload is not a decimal
    /// integer literal, a marker payload has the wrong JSON shape, or the
    /// input nests deeper than [`MAX_VALUE_DEPTH`].
    pub fn from_json(json: &JsonValue) -> Result<Self, FormatError> {
        decode_value(json, 0)
    }

    /// Encode this value to its ITF JSON representation.
    ///
    /// Total. Integers render as `{"#bigint": "<decimal>"}` with exact sign
    /// and magnitude and no redundant leading zeros; set and map element
    /// order on the wire is the container's iteration order and carries no
    /// meaning. Recursion is proportional to nesting depth, which for
    /// decoded values is bounded by [`MAX_VALUE_DEPTH`].
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Number(n) => JsonValue::Number(n.clone()),
            Self::Str(s) => JsonValue::String(s.clone()),
            Self::Int(n) => marker(BIGINT_KEY, JsonValue::String(n.to_string())),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::to_json).collect()),
            Self::Tuple(items) => marker(
                TUPLE_KEY,
                JsonValue::Array(items.iter().map(Self::to_json).collect()),
            ),
            Self::Set(members) => marker(
                SET_KEY,
                JsonValue::Array(members.iter().map(Self::to_json).collect()),
            ),
            Self::Map(entries) => marker(
                MAP_KEY,
                JsonValue::Array(
                    entries
                        .iter()
                        .map(|(key, val)| JsonValue::Array(vec![key.to_json(), val.to_json()]))
                        .collect(),
                ),
            ),
            Self::Record(fields) => {
                let mut obj = JsonMap::with_capacity(fields.len());
                for (name, value) in fields {
                    if RESERVED_KEYS.contains(&name.as_str()) {
                        warn!(field = %name, "record field shadows a reserved ITF key; round-trip fidelity is lost");
                    }
                    obj.insert(name.clone(), value.to_json());
                }
                JsonValue::Object(obj)
            }
            Self::Unserializable(repr) => {
                marker(UNSERIALIZABLE_KEY, JsonValue::String(repr.clone()))
            }
        }
    }
}

fn marker(key: &str, payload: JsonValue) -> JsonValue {
    let mut obj = JsonMap::with_capacity(1);
    obj.insert(key.to_owned(), payload);
    JsonValue::Object(obj)
}

fn decode_value(json: &JsonValue, depth: usize) -> Result<Value, FormatError> {
    if depth > MAX_VALUE_DEPTH {
        return Err(FormatError::TooDeep {
            limit: MAX_VALUE_DEPTH,
        });
    }
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => Ok(Value::Number(n.clone())),
        JsonValue::String(s) => Ok(Value::Str(s.clone())),
        JsonValue::Array(items) => {
            let items = items
                .iter()
                .map(|item| decode_value(item, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(items))
        }
        JsonValue::Object(obj) => decode_object(obj, depth),
    }
}

fn decode_object(obj: &JsonMap<String, JsonValue>, depth: usize) -> Result<Value, FormatError> {
    if let Some(payload) = obj.get(BIGINT_KEY) {
        return decode_bigint(payload);
    }
    if let Some(payload) = obj.get(TUPLE_KEY) {
        let items = marker_array(TUPLE_KEY, payload)?
            .iter()
            .map(|item| decode_value(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::Tuple(items));
    }
    if let Some(payload) = obj.get(SET_KEY) {
        let items = marker_array(SET_KEY, payload)?;
        // Structural duplicates collapse; the first occurrence keeps its
        // position.
        let mut members = IndexSet::with_capacity(items.len());
        for item in items {
            members.insert(decode_value(item, depth + 1)?);
        }
        return Ok(Value::Set(members));
    }
    if let Some(payload) = obj.get(MAP_KEY) {
        let pairs = marker_array(MAP_KEY, payload)?;
        let mut entries = IndexMap::with_capacity(pairs.len());
        for pair in pairs {
            let (key, val) = match pair {
                JsonValue::Array(kv) if kv.len() == 2 => (&kv[0], &kv[1]),
                _ => return Err(FormatError::MapEntry),
            };
            let key = decode_value(key, depth + 1)?;
            let val = decode_value(val, depth + 1)?;
            // Duplicate keys after decoding: last pair wins.
            entries.insert(key, val);
        }
        return Ok(Value::Map(entries));
    }
    if let Some(payload) = obj.get(UNSERIALIZABLE_KEY) {
        return match payload {
            JsonValue::String(repr) => Ok(Value::Unserializable(repr.clone())),
            other => Err(FormatError::MarkerPayload {
                key: UNSERIALIZABLE_KEY,
                expected: "a string",
                found: json_kind(other),
            }),
        };
    }

    let mut fields = IndexMap::with_capacity(obj.len());
    for (name, val) in obj {
        fields.insert(name.clone(), decode_value(val, depth + 1)?);
    }
    Ok(Value::Record(fields))
}

fn marker_array<'a>(
    key: &'static str,
    payload: &'a JsonValue,
) -> Result<&'a Vec<JsonValue>, FormatError> {
    match payload {
        JsonValue::Array(items) => Ok(items),
        other => Err(FormatError::MarkerPayload {
            key,
            expected: "an array",
            found: json_kind(other),
        }),
    }
}

fn decode_bigint(payload: &JsonValue) -> Result<Value, FormatError> {
    let repr = match payload {
        JsonValue::String(repr) => repr,
        other => {
            return Err(FormatError::MarkerPayload {
                key: BIGINT_KEY,
                expected: "a string",
                found: json_kind(other),
            })
        }
    };
    if !is_decimal_literal(repr) {
        return Err(FormatError::InvalidBigInt { repr: repr.clone() });
    }
    let int = repr
        .parse::<BigInt>()
        .map_err(|_| FormatError::InvalidBigInt { repr: repr.clone() })?;
    Ok(Value::Int(int))
}

/// Optional leading `-`, then one or more ASCII digits. No `+` sign,
/// whitespace, underscores, or radix prefixes.
fn is_decimal_literal(repr: &str) -> bool {
    let digits = repr.strip_prefix('-').unwrap_or(repr);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Serializes as the ITF JSON wire shape (not a derived representation).
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Deserializes from the ITF JSON wire shape via [`Value::from_json`].
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::from_json(&json).map_err(de::Error::custom)
    }
}
