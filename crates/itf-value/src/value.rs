//! Canonical ITF value model.
//!
//! [`Value`] is a **closed** variant: the wire codec dispatches over it
//! exhaustively, with no runtime type probing. Composite kinds carry value
//! semantics — structural equality plus a deterministic structural hash — so
//! sets may contain lists, maps, and records, and map keys may themselves be
//! composite.
//!
//! Values are immutable after construction: build them with the constructors
//! below (or by decoding JSON) and read them through the accessors.

use crate::fingerprint;
use indexmap::{IndexMap, IndexSet};
use num_bigint::BigInt;
use serde_json::Number;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single ITF value.
///
/// Equality is structural. `Set`, `Map`, and `Record` compare independently
/// of iteration order; `List` and `Tuple` compare element-wise in order.
/// A raw [`Number`] and a boxed [`BigInt`] are distinct kinds and never
/// compare equal, even when numerically identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// JSON `null`, passed through the codec unchanged.
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Raw JSON number that was not `#bigint`-boxed.
    ///
    /// ITF requires unbounded integers to be boxed; an un-boxed number is
    /// outside the arbitrary-precision contract and is kept verbatim.
    Number(Number),
    /// String leaf.
    Str(String),
    /// Arbitrary-precision signed integer (the `#bigint` wire form).
    Int(BigInt),
    /// Ordered sequence; duplicates allowed.
    List(Vec<Value>),
    /// Fixed-arity ordered product (the `#tup` wire form).
    Tuple(Vec<Value>),
    /// Unordered collection of unique values (the `#set` wire form).
    ///
    /// Insertion order is retained for deterministic iteration but carries
    /// no meaning; equality ignores it.
    Set(IndexSet<Value>),
    /// Association from value to value (the `#map` wire form).
    Map(IndexMap<Value, Value>),
    /// Ordered field-name → value mapping (a plain JSON object on the wire).
    Record(IndexMap<String, Value>),
    /// Opaque placeholder for a value that had no serializable form when the
    /// trace was captured (the `#unserializable` wire form).
    Unserializable(String),
}

impl Value {
    /// Arbitrary-precision integer from anything `BigInt` converts from.
    #[inline]
    pub fn int(value: impl Into<BigInt>) -> Self {
        Self::Int(value.into())
    }

    /// Ordered list from an iterator of values.
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Tuple from an iterator of values; arity is fixed at construction.
    pub fn tuple(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Set from an iterator of values; structural duplicates collapse,
    /// keeping the first occurrence's position.
    pub fn set(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Map from `(key, value)` pairs; a repeated key keeps its first
    /// position and takes the last value.
    pub fn map(entries: impl IntoIterator<Item = (Self, Self)>) -> Self {
        let mut map = IndexMap::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        Self::Map(map)
    }

    /// Record from `(field, value)` pairs, preserving field order.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        let mut record = IndexMap::new();
        for (field, value) in fields {
            record.insert(field.into(), value);
        }
        Self::Record(record)
    }

    /// Opaque placeholder carrying a human-readable rendering.
    #[inline]
    pub fn unserializable(repr: impl Into<String>) -> Self {
        Self::Unserializable(repr.into())
    }

    /// Short kind name, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Unserializable(_) => "unserializable",
        }
    }

    /// `true` for [`Value::Null`].
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Boolean payload, if this is a `Bool`.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload, if this is a `Str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Raw number payload, if this is an un-boxed `Number`.
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Integer payload, if this is a boxed `Int`.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<&BigInt> {
        match self {
            Self::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Elements, if this is a `List`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Elements, if this is a `Tuple`.
    #[inline]
    #[must_use]
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Members, if this is a `Set`.
    #[inline]
    #[must_use]
    pub const fn as_set(&self) -> Option<&IndexSet<Self>> {
        match self {
            Self::Set(members) => Some(members),
            _ => None,
        }
    }

    /// Entries, if this is a `Map`.
    #[inline]
    #[must_use]
    pub const fn as_map(&self) -> Option<&IndexMap<Self, Self>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Fields, if this is a `Record`.
    #[inline]
    #[must_use]
    pub const fn as_record(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Deterministic 64-bit structural fingerprint.
    ///
    /// Equal values have equal fingerprints; unordered containers (`Set`,
    /// `Map`, `Record`) contribute their elements order-independently, so
    /// the fingerprint agrees with structural equality. [`Hash`] feeds this
    /// fingerprint to the caller's hasher.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        fingerprint::of_value(self)
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Signed machine integers box into `Int`, never into a raw `Number`.
impl From<i64> for Value {
    #[inline]
    fn from(n: i64) -> Self {
        Self::Int(BigInt::from(n))
    }
}

impl From<u64> for Value {
    #[inline]
    fn from(n: u64) -> Self {
        Self::Int(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    #[inline]
    fn from(n: BigInt) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// A bare `Vec` converts to the ordered kind; use [`Value::tuple`] or
/// [`Value::set`] for the others.
impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// Renders the ITF JSON encoding (compact; `{:#}` pretty-prints).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json();
        if f.alternate() {
            write!(f, "{json:#}")
        } else {
            write!(f, "{json}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_equality_ignores_insertion_order() {
        let a = Value::set([Value::int(1), Value::int(2), Value::int(3)]);
        let b = Value::set([Value::int(3), Value::int(2), Value::int(1)]);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn set_collapses_structural_duplicates() {
        let s = Value::set([Value::int(1), Value::int(1), Value::int(2)]);
        assert_eq!(s.as_set().map(IndexSet::len), Some(2));
    }

    #[test]
    fn list_order_matters() {
        let a = Value::list([Value::int(1), Value::int(2)]);
        let b = Value::list([Value::int(2), Value::int(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn list_and_tuple_are_distinct_kinds() {
        let items = [Value::int(1), Value::int(2)];
        assert_ne!(Value::list(items.clone()), Value::tuple(items));
    }

    #[test]
    fn record_equality_ignores_field_order() {
        let a = Value::record([("x", Value::int(1)), ("y", Value::int(2))]);
        let b = Value::record([("y", Value::int(2)), ("x", Value::int(1))]);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn map_equality_ignores_entry_order() {
        let a = Value::map([
            (Value::from("k1"), Value::int(1)),
            (Value::from("k2"), Value::int(2)),
        ]);
        let b = Value::map([
            (Value::from("k2"), Value::int(2)),
            (Value::from("k1"), Value::int(1)),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn boxed_int_and_raw_number_are_distinct() {
        let boxed = Value::int(1);
        let raw = Value::Number(Number::from(1));
        assert_ne!(boxed, raw);
        assert_eq!(boxed.kind(), "int");
        assert_eq!(raw.kind(), "number");
    }

    #[test]
    fn sets_may_contain_composites() {
        let list = Value::list([Value::int(1), Value::int(2)]);
        let map = Value::map([(Value::from("x"), Value::int(1))]);
        let record = Value::record([("a", Value::from(true))]);
        let set = Value::set([list.clone(), map.clone(), record.clone()]);

        let members = set.as_set().unwrap();
        assert_eq!(members.len(), 3);
        assert!(members.contains(&list));
        assert!(members.contains(&map));
        assert!(members.contains(&record));
        // Membership is structural, not positional.
        assert!(members.contains(&Value::list([Value::int(1), Value::int(2)])));
    }

    #[test]
    fn composite_map_keys_look_up_structurally() {
        let key = Value::tuple([Value::from("a"), Value::int(200)]);
        let m = Value::map([(key, Value::from(true))]);
        let fresh_key = Value::tuple([Value::from("a"), Value::int(200)]);
        assert_eq!(
            m.as_map().and_then(|entries| entries.get(&fresh_key)),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn map_keeps_last_value_for_repeated_key() {
        let m = Value::map([
            (Value::from("k"), Value::int(1)),
            (Value::from("k"), Value::int(2)),
        ]);
        assert_eq!(
            m.as_map().and_then(|entries| entries.get(&Value::from("k"))),
            Some(&Value::int(2))
        );
    }

    #[test]
    fn display_renders_wire_json() {
        assert_eq!(Value::int(-7).to_string(), r##"{"#bigint":"-7"}"##);
        assert_eq!(Value::from("hi").to_string(), r#""hi""#);
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn nested_sets_hash_consistently() {
        let inner_a = Value::set([Value::int(1), Value::int(2)]);
        let inner_b = Value::set([Value::int(2), Value::int(1)]);
        let outer = Value::set([inner_a]);
        // `inner_b` is structurally equal to the stored member, so lookup
        // must succeed even though insertion order differs.
        assert!(outer.as_set().unwrap().contains(&inner_b));
    }
}
