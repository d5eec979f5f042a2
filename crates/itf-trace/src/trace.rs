// crates/itf-trace/src/trace.rs

//! The ITF trace container and its JSON boundary.
//!
//! A trace is an ordered sequence of [`State`]s plus static metadata:
//! parameter names, variable names, and an optional lasso index (`loop` on
//! the wire) naming the state the trace's tail re-enters. Absence of the
//! index means the trace is linear.

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

use crate::state::{decode_meta, expect_object, Meta, State, META_KEY};
use itf_value::codec::json_kind;
use itf_value::FormatError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// An ITF trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    /// `#meta` payload; empty when the wire object had none.
    pub meta: Meta,
    /// Parameter (constant) names declared by the trace.
    pub params: Vec<String>,
    /// Variable names, in declaration order.
    pub vars: Vec<String>,
    /// Index of the state the lasso tail re-enters; `None` for a linear
    /// trace. Wire key: `loop`.
    pub loop_index: Option<u64>,
    /// The state sequence.
    pub states: Vec<State>,
}

impl Trace {
    /// Trace over the given variable names, with no states yet.
    pub fn new(vars: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of states.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the trace has no states.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether the trace models infinite behavior via a lasso.
    #[inline]
    #[must_use]
    pub const fn is_lasso(&self) -> bool {
        self.loop_index.is_some()
    }

    /// Decode a trace from its parsed ITF JSON representation.
    ///
    /// `#meta` and `params` default to empty when absent; `vars` and
    /// `states` are required. Unknown trace-level keys are ignored.
    pub fn from_json(json: &JsonValue) -> Result<Self, FormatError> {
        let obj = expect_object("trace", json)?;
        let meta = decode_meta(obj.get(META_KEY))?;
        let params = match obj.get("params") {
            None => Vec::new(),
            Some(raw) => decode_names("params", raw)?,
        };
        let vars = match obj.get("vars") {
            None => return Err(FormatError::MissingField("vars")),
            Some(raw) => decode_names("vars", raw)?,
        };
        let loop_index = match obj.get("loop") {
            None => None,
            Some(raw) => Some(decode_loop(raw)?),
        };
        let raw_states = obj
            .get("states")
            .ok_or_else(|| FormatError::MissingField("states"))?;
        let states = match raw_states {
            JsonValue::Array(items) => items
                .iter()
                .map(State::from_json)
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(FormatError::UnexpectedShape {
                    context: "states",
                    expected: "an array",
                    found: json_kind(other),
                })
            }
        };
        debug!(
            states = states.len(),
            vars = vars.len(),
            lasso = loop_index.is_some(),
            "decoded ITF trace"
        );
        Ok(Self {
            meta,
            params,
            vars,
            loop_index,
            states,
        })
    }

    /// Encode this trace to its ITF JSON representation.
    ///
    /// Emits `#meta`, `params`, `vars`, then `loop` only when present
    /// (never as `null`), then `states`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut obj = JsonMap::new();
        obj.insert(META_KEY.to_owned(), JsonValue::Object(self.meta.clone()));
        obj.insert("params".to_owned(), name_array(&self.params));
        obj.insert("vars".to_owned(), name_array(&self.vars));
        if let Some(index) = self.loop_index {
            obj.insert("loop".to_owned(), JsonValue::from(index));
        }
        obj.insert(
            "states".to_owned(),
            JsonValue::Array(self.states.iter().map(State::to_json).collect()),
        );
        debug!(states = self.states.len(), "encoded ITF trace");
        JsonValue::Object(obj)
    }

    /// Serialize to compact JSON text.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Serialize to pretty-printed JSON text.
    #[must_use]
    pub fn to_json_string_pretty(&self) -> String {
        format!("{:#}", self.to_json())
    }
}

/// Parse a trace from ITF JSON text (the load direction).
impl FromStr for Trace {
    type Err = FormatError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let json: JsonValue = serde_json::from_str(text)?;
        Self::from_json(&json)
    }
}

/// Renders the ITF JSON encoding (compact; `{:#}` pretty-prints).
impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json();
        if f.alternate() {
            write!(f, "{json:#}")
        } else {
            write!(f, "{json}")
        }
    }
}

/// Serializes as the ITF JSON wire shape.
impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Deserializes from the ITF JSON wire shape via [`Trace::from_json`].
impl<'de> Deserialize<'de> for Trace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Self::from_json(&json).map_err(de::Error::custom)
    }
}

fn name_array(names: &[String]) -> JsonValue {
    JsonValue::Array(
        names
            .iter()
            .map(|name| JsonValue::String(name.clone()))
            .collect(),
    )
}

fn decode_names(field: &'static str, raw: &JsonValue) -> Result<Vec<String>, FormatError> {
    let items = match raw {
        JsonValue::Array(items) => items,
        other => {
            return Err(FormatError::UnexpectedShape {
                context: field,
                expected: "an array of strings",
                found: json_kind(other),
            })
        }
    };
    items
        .iter()
        .map(|item| match item {
            JsonValue::String(name) => Ok(name.clone()),
            other => Err(FormatError::UnexpectedShape {
                context: field,
                expected: "an array of strings",
                found: json_kind(other),
            }),
        })
        .collect()
}

fn decode_loop(raw: &JsonValue) -> Result<u64, FormatError> {
    raw.as_u64().ok_or_else(|| FormatError::UnexpectedShape {
        context: "loop",
        expected: "a non-negative integer",
        found: json_kind(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itf_value::Value;
    use serde_json::json;

    #[test]
    fn missing_vars_is_a_format_error() {
        let err = Trace::from_json(&json!({ "states": [] })).unwrap_err();
        assert!(matches!(err, FormatError::MissingField("vars")));
    }

    #[test]
    fn missing_states_is_a_format_error() {
        let err = Trace::from_json(&json!({ "vars": ["x"] })).unwrap_err();
        assert!(matches!(err, FormatError::MissingField("states")));
    }

    #[test]
    fn params_and_meta_default_to_empty() {
        let trace = Trace::from_json(&json!({ "vars": ["x"], "states": [] })).unwrap();
        assert!(trace.meta.is_empty());
        assert!(trace.params.is_empty());
        assert_eq!(trace.vars, ["x"]);
        assert!(trace.is_empty());
        assert!(!trace.is_lasso());
    }

    #[test]
    fn loop_must_be_a_non_negative_integer() {
        for bad in [json!(-1), json!(1.5), json!("0"), json!(null)] {
            let err =
                Trace::from_json(&json!({ "vars": [], "states": [], "loop": bad })).unwrap_err();
            assert!(matches!(
                err,
                FormatError::UnexpectedShape { context: "loop", .. }
            ));
        }
    }

    #[test]
    fn var_names_must_be_strings() {
        let err = Trace::from_json(&json!({ "vars": ["x", 3], "states": [] })).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedShape { context: "vars", .. }
        ));
        let err = Trace::from_json(&json!({ "vars": "x", "states": [] })).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedShape { context: "vars", .. }
        ));
    }

    #[test]
    fn unknown_trace_keys_are_ignored() {
        let trace =
            Trace::from_json(&json!({ "vars": [], "states": [], "format": "ITF" })).unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn loop_is_omitted_when_linear() {
        let trace = Trace::new(["x"]);
        let json = trace.to_json();
        assert!(json.get("loop").is_none());
        // A decoded `loop` re-encodes.
        let lasso = Trace {
            loop_index: Some(0),
            ..Trace::new(["x"])
        };
        assert_eq!(lasso.to_json().get("loop"), Some(&json!(0)));
    }

    #[test]
    fn parse_rejects_malformed_json_text() {
        let err = "{ not json".parse::<Trace>().unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }

    #[test]
    fn round_trips_via_text() {
        let trace = Trace {
            meta: Meta::from_iter([("source".to_owned(), json!("test"))]),
            params: vec!["N".to_owned()],
            vars: vec!["pc".to_owned(), "x".to_owned()],
            loop_index: Some(1),
            states: vec![
                State::from_pairs([("pc", Value::from("init")), ("x", Value::int(0))]),
                State::from_pairs([("pc", Value::from("lock")), ("x", Value::int(1))]),
            ],
        };
        let parsed: Trace = trace.to_json_string().parse().unwrap();
        assert_eq!(parsed, trace);
        // Pretty output parses to the same trace.
        let parsed: Trace = trace.to_json_string_pretty().parse().unwrap();
        assert_eq!(parsed, trace);
    }

    #[test]
    fn state_errors_surface_with_state_context() {
        let err = Trace::from_json(&json!({ "vars": ["x"], "states": [5] })).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedShape { context: "state", .. }
        ));
    }
}
