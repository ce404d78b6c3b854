//! Payload projector: turns a decoded array into the positional argument
//! list for a normalized template.
//!
//! # Ordering
//!
//! Keys split into two classes. Native integer keys and string keys that
//! parse as a base-10 `i32` form the integer class, sorted ascending by value;
//! every other string key forms the string class, sorted by byte order.
//!
//! # Extraction
//!
//! 1. For `i` in `0..n` (`n` = size of the integer class) the value stored
//!    under index `i` is looked up. Missing indices are skipped, so keys
//!    `{0, 2}` yield a single argument. Found values are stringified with
//!    [`coerce`].
//! 2. Values of the string class follow in sorted order, passed through
//!    untouched as [`Arg::Native`] and stringified by the substitution step.

use crate::substitute::Arg;
use crate::types::{ArrayKey, PhpArray, PhpValue};

/// The keys of an array, partitioned and sorted for projection.
#[derive(Debug)]
pub struct SortedKeys<'a> {
    /// Integer-class keys with their numeric value, ascending. Among equal
    /// values a native integer key sorts before a numeric string.
    pub ints: Vec<(i64, &'a ArrayKey)>,
    /// String-class keys with their text, ascending.
    pub strs: Vec<(&'a str, &'a ArrayKey)>,
}

impl<'a> SortedKeys<'a> {
    pub fn of(arr: &'a PhpArray) -> Self {
        let mut ints = Vec::new();
        let mut strs = Vec::new();

        for key in arr.keys() {
            match key {
                ArrayKey::Int(i) => ints.push((*i, key)),
                ArrayKey::Str(s) => match s.parse::<i32>() {
                    Ok(i) => ints.push((i64::from(i), key)),
                    Err(_) => strs.push((s.as_str(), key)),
                },
            }
        }

        ints.sort_by_key(|(i, key)| (*i, matches!(key, ArrayKey::Str(_))));
        strs.sort_by_key(|(s, _)| *s);

        Self { ints, strs }
    }

    /// Key stored under integer index `index`, if any.
    pub fn index(&self, index: i64) -> Option<&'a ArrayKey> {
        let pos = self.ints.partition_point(|(i, _)| *i < index);
        self.ints
            .get(pos)
            .filter(|(i, _)| *i == index)
            .map(|(_, key)| *key)
    }

    /// Every entry of `arr`: integer class first, then string class.
    pub fn entries<'s>(
        &'s self,
        arr: &'a PhpArray,
    ) -> impl Iterator<Item = (&'a ArrayKey, &'a PhpValue)> + 's {
        self.ints
            .iter()
            .map(|(_, key)| *key)
            .chain(self.strs.iter().map(|(_, key)| *key))
            .filter_map(move |key| arr.get(key).map(|value| (key, value)))
    }
}

/// Stringify an integer-indexed value.
pub fn coerce(value: &PhpValue) -> String {
    match value {
        PhpValue::Null => "(null)".to_string(),
        PhpValue::Str(s) => s.clone(),
        PhpValue::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Project `payload` into positional arguments.
///
/// `needed_slots` is advisory: a mismatch is logged, and the substitution
/// step decides what missing or excess arguments look like.
pub fn project(payload: &PhpArray, needed_slots: usize) -> Vec<Arg<'_>> {
    let keys = SortedKeys::of(payload);
    let mut args = Vec::with_capacity(keys.ints.len() + keys.strs.len());

    for index in 0..keys.ints.len() as i64 {
        if let Some(value) = keys.index(index).and_then(|key| payload.get(key)) {
            args.push(Arg::Coerced(coerce(value)));
        }
    }

    for (_, key) in &keys.strs {
        if let Some(value) = payload.get(key) {
            args.push(Arg::Native(value));
        }
    }

    if args.len() != needed_slots {
        tracing::debug!(
            needed = needed_slots,
            projected = args.len(),
            "projector: argument count differs from slot count"
        );
    }

    args
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
