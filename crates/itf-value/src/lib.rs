//! itf-value — canonical value model and JSON codec for the Informal Trace
//! Format (ITF).
//!
//! This crate defines the **stable boundary** shared by ITF tooling:
//! - the closed [`Value`] model (booleans, strings, arbitrary-precision
//!   integers, lists, tuples, sets, maps, records, opaque placeholders),
//! - structural equality and a deterministic structural hash, so composite
//!   values work as set members and map keys,
//! - the JSON wire codec (`Value::from_json` / `Value::to_json`) with the
//!   reserved `#bigint`/`#tup`/`#set`/`#map`/`#unserializable` markers, and
//! - the single typed decode error, [`FormatError`].
//!
//! ```
//! use itf_value::Value;
//!
//! let json = serde_json::json!({ "#set": [{ "#bigint": "1" }, { "#bigint": "2" }] });
//! let v = Value::from_json(&json)?;
//! assert_eq!(v, Value::set([Value::int(2), Value::int(1)]));
//! # Ok::<(), itf_value::FormatError>(())
//! ```
//!
//! Encoding is total: every well-formed [`Value`] has a JSON rendering, and
//! `decode(encode(v)) == v` up to set/map iteration order. Reading or writing
//! the underlying byte stream is the caller's job; this crate only converts
//! between parsed JSON structures and values.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// JSON wire codec for [`Value`] (reserved-marker dispatch, depth-limited).
pub mod codec;
/// The typed decode error.
pub mod error;
/// The closed value model with structural equality and hashing.
pub mod value;

mod fingerprint;

pub use codec::{MAX_VALUE_DEPTH, RESERVED_KEYS};
pub use error::FormatError;
pub use value::Value;
