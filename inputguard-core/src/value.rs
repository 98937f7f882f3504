// inputguard-core/src/value.rs
//! The closed value model the engine operates on.
//!
//! Request containers arrive as arbitrary, attacker-shaped trees. Instead of
//! inspecting types at runtime, every input is one of the variants of [`Value`],
//! so the pass-through cases of the sanitizer are checked exhaustively by the
//! compiler.
//!
//! Conversions to and from `serde_json::Value` are provided for the HTTP and CLI
//! layers. Integers outside the `i64`/`u64` range are kept verbatim as
//! [`Number::BigInt`], and parsed non-integers as [`Number::Decimal`], so a JSON
//! number leaves the engine with exactly the text it arrived with.
//!
//! License: MIT OR APACHE 2.0

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A numeric leaf. Numbers are never rewritten by the sanitizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Arbitrary-precision integer, stored as its decimal literal.
    BigInt(String),
    /// Non-integer JSON number, stored as its literal (`0.1`, `1e400`).
    Decimal(String),
}

impl Number {
    /// Builds a `BigInt` from a decimal literal such as `"-123456789012345678901234567890"`.
    ///
    /// Returns `None` if `digits` is not an optionally signed run of ASCII digits.
    pub fn big_int(digits: impl Into<String>) -> Option<Self> {
        let digits = digits.into();
        if is_integer_literal(&digits) {
            Some(Number::BigInt(digits))
        } else {
            None
        }
    }

    /// Builds a `Decimal` from a JSON number literal such as `"1.5e-7"`.
    ///
    /// Returns `None` if `literal` is not a valid JSON number.
    pub fn decimal(literal: impl Into<String>) -> Option<Self> {
        let literal = literal.into();
        serde_json::Number::from_str(&literal)
            .ok()
            .map(|_| Number::Decimal(literal))
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Number::Int(i) => serde_json::Value::from(*i),
            Number::UInt(u) => serde_json::Value::from(*u),
            Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Number::BigInt(literal) | Number::Decimal(literal) => {
                serde_json::Number::from_str(literal)
                    .map(serde_json::Value::Number)
                    .unwrap_or_else(|_| serde_json::Value::String(literal.clone()))
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(x) => write!(f, "{}", x),
            Number::BigInt(literal) | Number::Decimal(literal) => f.write_str(literal),
        }
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl From<serde_json::Number> for Number {
    fn from(n: serde_json::Number) -> Self {
        let repr = n.to_string();
        if !is_integer_literal(&repr) {
            return Number::Decimal(repr);
        }
        // Only take the native variants when they print back to the same literal (`-0` does not).
        match (repr.parse::<i64>(), repr.parse::<u64>()) {
            (Ok(i), _) if i.to_string() == repr => Number::Int(i),
            (_, Ok(u)) if u.to_string() == repr => Number::UInt(u),
            _ => Number::BigInt(repr),
        }
    }
}

/// An insertion-ordered string-keyed mapping with unique keys.
///
/// Equality ignores key order, matching how request objects are compared.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `key`, returning the previous value if the key existed.
    /// An existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebuilds the mapping with every value passed through `f`. Keys and their
    /// order are untouched.
    pub fn map_values<F>(self, mut f: F) -> Mapping
    where
        F: FnMut(Value) -> Value,
    {
        Mapping {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    // Caller guarantees the keys are already unique (e.g. a parsed JSON object).
    fn from_unique_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| ov == v))
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// Any value the sanitizer can be handed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    /// Anything not otherwise classified (an absent/undefined marker). Serializes as `null`.
    Opaque,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the variant, used in log lines instead of the content.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Opaque => "opaque",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(Mapping::from_unique_entries(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Opaque => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => n.to_json(),
            Value::String(s) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(m) => serde_json::Value::Object(
                m.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Int(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Int(i64::from(i)))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(Number::UInt(u))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
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
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Int(i) => serializer.serialize_i64(*i),
            Number::UInt(u) => serializer.serialize_u64(*u),
            Number::Float(f) => serializer.serialize_f64(*f),
            Number::BigInt(literal) | Number::Decimal(literal) => {
                match serde_json::Number::from_str(literal) {
                    Ok(n) => n.serialize(serializer),
                    Err(_) => serializer.serialize_str(literal),
                }
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Opaque => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
