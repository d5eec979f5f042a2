//! The single typed error surfaced by ITF decoding.
//!
//! Encoding has no error kind: every well-formed [`crate::Value`] has a JSON
//! rendering. Decoding fails fast — no partial value, state, or trace is ever
//! returned, since malformed input has no meaningful partial interpretation.

use thiserror::Error;

/// Decode-side failure for ITF values, states, and traces.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A required trace field (`vars` or `states`) is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A `#bigint` payload string is not a decimal integer literal
    /// (optional leading `-`, then one or more ASCII digits).
    #[error("invalid #bigint literal {repr:?}")]
    InvalidBigInt {
        /// The offending payload string, verbatim.
        repr: String,
    },

    /// A reserved marker key is present but its payload has the wrong JSON
    /// shape (e.g. a `#tup` whose payload is not an array).
    #[error("{key} payload must be {expected}, found {found}")]
    MarkerPayload {
        /// The reserved marker key.
        key: &'static str,
        /// What the marker requires.
        expected: &'static str,
        /// JSON kind actually found.
        found: &'static str,
    },

    /// A `#map` payload entry is not a two-element `[key, value]` array.
    #[error("#map entry must be a two-element [key, value] array")]
    MapEntry,

    /// A boundary (trace, state, or field) has the wrong JSON shape.
    #[error("{context} must be {expected}, found {found}")]
    UnexpectedShape {
        /// Which boundary was being decoded.
        context: &'static str,
        /// What that boundary requires.
        expected: &'static str,
        /// JSON kind actually found.
        found: &'static str,
    },

    /// Value nesting exceeded [`crate::MAX_VALUE_DEPTH`].
    #[error("value nesting exceeds the depth limit of {limit}")]
    TooDeep {
        /// The configured limit that was exceeded.
        limit: usize,
    },

    /// The text boundary received syntactically invalid JSON.
    #[error("malformed JSON text")]
    Json(#[from] serde_json::Error),
}
