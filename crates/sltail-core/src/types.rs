//! Core types for sltail-core.
//!
//! This module defines the generic value tree that the payload decoder
//! produces and every later stage consumes: [`PhpValue`], the [`ArrayKey`]
//! used to index arrays, and the insertion-ordered [`PhpArray`] mapping.

use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// A key of a decoded array. Serialized arrays are keyed either by native
/// integers or by arbitrary byte strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{i}"),
            ArrayKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(value: i64) -> Self {
        ArrayKey::Int(value)
    }
}

impl From<&str> for ArrayKey {
    fn from(value: &str) -> Self {
        ArrayKey::Str(value.to_string())
    }
}

impl From<String> for ArrayKey {
    fn from(value: String) -> Self {
        ArrayKey::Str(value)
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A dynamically-typed value decoded from a serialized payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(PhpArray),
    /// A serialized object: class name plus its member table.
    Object { class: String, members: PhpArray },
}

impl PhpValue {
    /// The array behind this value, if it is a key/value mapping.
    pub fn as_array(&self) -> Option<&PhpArray> {
        match self {
            PhpValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Short type tag used in formatting error markers.
    pub fn type_tag(&self) -> &'static str {
        match self {
            PhpValue::Null => "<nil>",
            PhpValue::Bool(_) => "bool",
            PhpValue::Int(_) => "int64",
            PhpValue::Float(_) => "float64",
            PhpValue::Str(_) => "string",
            PhpValue::Array(_) => "map",
            PhpValue::Object { .. } => "object",
        }
    }
}

impl From<&str> for PhpValue {
    fn from(value: &str) -> Self {
        PhpValue::Str(value.to_string())
    }
}

impl From<String> for PhpValue {
    fn from(value: String) -> Self {
        PhpValue::Str(value)
    }
}

impl From<i64> for PhpValue {
    fn from(value: i64) -> Self {
        PhpValue::Int(value)
    }
}

impl From<bool> for PhpValue {
    fn from(value: bool) -> Self {
        PhpValue::Bool(value)
    }
}

impl From<f64> for PhpValue {
    fn from(value: f64) -> Self {
        PhpValue::Float(value)
    }
}

impl From<PhpArray> for PhpValue {
    fn from(value: PhpArray) -> Self {
        PhpValue::Array(value)
    }
}

/// Generic textual representation. Never fails, whatever the variant.
impl fmt::Display for PhpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpValue::Null => f.write_str("(null)"),
            PhpValue::Bool(b) => write!(f, "{b}"),
            PhpValue::Int(i) => write!(f, "{i}"),
            PhpValue::Float(x) => fmt_float(*x, f),
            PhpValue::Str(s) => f.write_str(s),
            PhpValue::Array(arr) => write!(f, "{arr}"),
            PhpValue::Object { class, members } => write!(f, "{class}{members}"),
        }
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("NaN")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{x}")
    }
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

/// An insertion-ordered key/value mapping, the decoded form of a serialized
/// array.
///
/// Keys are unique: inserting an existing key replaces its value in place.
/// Lookups go through a key index, so building and reading an array stays
/// linear in its size.
#[derive(Clone, PartialEq, Default)]
pub struct PhpArray {
    entries: Vec<(ArrayKey, PhpValue)>,
    index: HashMap<ArrayKey, usize>,
}

impl PhpArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert `value` under `key`, replacing any previous value for that key.
    pub fn insert(&mut self, key: impl Into<ArrayKey>, value: impl Into<PhpValue>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &ArrayKey) -> Option<&PhpValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ArrayKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ArrayKey, &PhpValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<ArrayKey>, V: Into<PhpValue>> FromIterator<(K, V)> for PhpArray {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut arr = PhpArray::new();
        for (k, v) in iter {
            arr.insert(k, v);
        }
        arr
    }
}

impl fmt::Debug for PhpArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// `map[k:v k:v]`, keys in projection order (integers, then strings).
impl fmt::Display for PhpArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = crate::projector::SortedKeys::of(self);
        f.write_str("map[")?;
        for (i, (key, value)) in keys.entries(self).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}:{value}")?;
        }
        f.write_str("]")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
