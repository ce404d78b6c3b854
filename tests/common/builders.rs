//! Test builders: ergonomic constructors for payloads and row input.

use sltail_core::{ArrayKey, PhpArray, PhpValue};

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize a value into the wire format the decoder reads.
pub fn serialize(value: &PhpValue) -> String {
    match value {
        PhpValue::Null => "N;".to_string(),
        PhpValue::Bool(b) => format!("b:{};", u8::from(*b)),
        PhpValue::Int(i) => format!("i:{i};"),
        PhpValue::Float(x) if x.is_nan() => "d:NAN;".to_string(),
        PhpValue::Float(x) if x.is_infinite() => {
            if *x > 0.0 { "d:INF;" } else { "d:-INF;" }.to_string()
        }
        PhpValue::Float(x) => format!("d:{x};"),
        PhpValue::Str(s) => format!("s:{}:\"{}\";", s.len(), s),
        PhpValue::Array(arr) => format!("a:{}:{{{}}}", arr.len(), serialize_members(arr)),
        PhpValue::Object { class, members } => format!(
            "O:{}:\"{}\":{}:{{{}}}",
            class.len(),
            class,
            members.len(),
            serialize_members(members)
        ),
    }
}

fn serialize_members(arr: &PhpArray) -> String {
    arr.iter()
        .map(|(key, value)| {
            let key = match key {
                ArrayKey::Int(i) => format!("i:{i};"),
                ArrayKey::Str(s) => format!("s:{}:\"{}\";", s.len(), s),
            };
            key + &serialize(value)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// PayloadBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for serialized array payloads.
///
/// # Example
///
/// ```rust
/// let payload = PayloadBuilder::new()
///     .push("admin")
///     .push(42i64)
///     .key("mode", "backend")
///     .serialize();
/// ```
#[derive(Default)]
pub struct PayloadBuilder {
    arr: PhpArray,
    next_index: i64,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append under the next integer index.
    pub fn push(mut self, value: impl Into<PhpValue>) -> Self {
        self.arr.insert(self.next_index, value);
        self.next_index += 1;
        self
    }

    pub fn index(mut self, index: i64, value: impl Into<PhpValue>) -> Self {
        self.arr.insert(index, value);
        self.next_index = self.next_index.max(index + 1);
        self
    }

    pub fn key(mut self, key: &str, value: impl Into<PhpValue>) -> Self {
        self.arr.insert(key, value);
        self
    }

    pub fn null(self) -> Self {
        self.push(PhpValue::Null)
    }

    pub fn build(self) -> PhpArray {
        self.arr
    }

    pub fn serialize(self) -> String {
        serialize(&PhpValue::Array(self.arr))
    }
}

// ---------------------------------------------------------------------------
// Row input
// ---------------------------------------------------------------------------

/// One JSON row line in the default column layout.
pub fn row_json(details: &str, tstamp: i64, ip: &str, log_data: &str) -> String {
    serde_json::json!({
        "uid": 1,
        "details": details,
        "tstamp": tstamp,
        "IP": ip,
        "log_data": log_data,
    })
    .to_string()
}
