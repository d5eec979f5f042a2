//! Structural FNV-1a fingerprints for values.
//!
//! Every value kind hashes behind a type tag. Ordered kinds fold their
//! elements into the running hash in sequence; unordered kinds (`Set`,
//! `Map`, `Record`) XOR per-element contributions so the result is
//! independent of iteration order, then apply a final mixing step.
//!
//! Invariant: `a == b` implies `of_value(&a) == of_value(&b)`. Equality for
//! `Set`/`Map`/`Record` ignores order, so their hashing must too.

use crate::Value;
use serde_json::Number;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

// Per-kind type tags. Distinct kinds never compare equal, so tags only need
// to be distinct, not stable across releases.
const TAG_NULL: u64 = 0;
const TAG_BOOL: u64 = 1;
const TAG_NUMBER: u64 = 2;
const TAG_STR: u64 = 3;
const TAG_INT: u64 = 4;
const TAG_LIST: u64 = 5;
const TAG_TUPLE: u64 = 6;
const TAG_SET: u64 = 7;
const TAG_MAP: u64 = 8;
const TAG_RECORD: u64 = 9;
const TAG_UNSERIALIZABLE: u64 = 10;

/// Fingerprint of a whole value tree.
pub(crate) fn of_value(value: &Value) -> u64 {
    fold_value(FNV_OFFSET, value)
}

#[inline]
fn mix(hash: u64, word: u64) -> u64 {
    (hash ^ word).wrapping_mul(FNV_PRIME)
}

#[inline]
fn mix_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &byte in bytes {
        hash = mix(hash, u64::from(byte));
    }
    hash
}

/// Final avalanche applied to an XOR-combined contribution word.
#[inline]
fn finish_unordered(mut combined: u64) -> u64 {
    combined = combined.wrapping_mul(FNV_PRIME);
    combined ^= combined >> 33;
    combined.wrapping_mul(FNV_PRIME)
}

/// Raw JSON numbers hash by wire representation, mirroring their equality:
/// integer and float representations are distinct even when numerically
/// equal, and the two float zeroes hash alike.
fn fold_number(hash: u64, number: &Number) -> u64 {
    if let Some(u) = number.as_u64() {
        mix(mix(hash, 0), u)
    } else if let Some(i) = number.as_i64() {
        mix(mix(hash, 1), i as u64)
    } else if let Some(f) = number.as_f64() {
        let bits = if f == 0.0 { 0.0_f64.to_bits() } else { f.to_bits() };
        mix(mix(hash, 2), bits)
    } else {
        hash
    }
}

fn fold_value(mut hash: u64, value: &Value) -> u64 {
    let tag = match value {
        Value::Null => TAG_NULL,
        Value::Bool(_) => TAG_BOOL,
        Value::Number(_) => TAG_NUMBER,
        Value::Str(_) => TAG_STR,
        Value::Int(_) => TAG_INT,
        Value::List(_) => TAG_LIST,
        Value::Tuple(_) => TAG_TUPLE,
        Value::Set(_) => TAG_SET,
        Value::Map(_) => TAG_MAP,
        Value::Record(_) => TAG_RECORD,
        Value::Unserializable(_) => TAG_UNSERIALIZABLE,
    };
    hash = mix(hash, tag);

    match value {
        Value::Null => hash,
        Value::Bool(b) => mix(hash, u64::from(*b)),
        Value::Number(n) => fold_number(hash, n),
        Value::Str(s) => mix_bytes(hash, s.as_bytes()),
        Value::Int(n) => mix_bytes(hash, &n.to_signed_bytes_le()),
        Value::List(items) | Value::Tuple(items) => {
            hash = mix(hash, items.len() as u64);
            for item in items {
                hash = fold_value(hash, item);
            }
            hash
        }
        Value::Set(members) => {
            let mut combined = 0u64;
            for member in members {
                combined ^= of_value(member);
            }
            hash = mix(hash, members.len() as u64);
            mix(hash, finish_unordered(combined))
        }
        Value::Map(entries) => {
            let mut combined = 0u64;
            for (key, val) in entries {
                combined ^= of_value(key).wrapping_mul(of_value(val).wrapping_add(1));
            }
            hash = mix(hash, entries.len() as u64);
            mix(hash, finish_unordered(combined))
        }
        Value::Record(fields) => {
            let mut combined = 0u64;
            for (name, val) in fields {
                let name_fp = mix_bytes(FNV_OFFSET, name.as_bytes());
                combined ^= name_fp.wrapping_mul(of_value(val).wrapping_add(1));
            }
            hash = mix(hash, fields.len() as u64);
            mix(hash, finish_unordered(combined))
        }
        Value::Unserializable(repr) => mix_bytes(hash, repr.as_bytes()),
    }
}
