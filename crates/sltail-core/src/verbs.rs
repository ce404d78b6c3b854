//! Verb normalizer: collapses every format verb of a legacy positional
//! template into the generic string verb `%s`.
//!
//! The grammar is data: a verb is the marker `%`, any run of characters from
//! [`FLAG_CHARS`], and exactly one terminating character from [`TYPE_CHARS`].
//! Flags are consumed, so `%.02f` becomes `%s`. Set membership is the only
//! branching the scanner does.
//!
//! A `%` seen while a verb is already open is emitted as-is and does not open
//! a second verb, so `%%d` normalizes to `%%s` with one slot. This is not
//! printf escaping.

use phf::phf_set;

use crate::error::MalformedTemplate;

/// Marker that opens a verb.
pub const VERB_MARKER: char = '%';

/// Type character every verb is rewritten to.
pub const GENERIC_VERB: char = 's';

/// Characters that close a verb.
pub static TYPE_CHARS: phf::Set<char> = phf_set! {
    'v', 'T', 't', 'b', 'c', 'd', 'o', 'q', 'x', 'X',
    'U', 'e', 'E', 'f', 'F', 'g', 'G', 's', 'p',
};

/// Width, precision, sign and padding modifiers allowed inside a verb.
pub static FLAG_CHARS: phf::Set<char> = phf_set! {
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '+', '.', ' ', '-', '#', '[', ']', '*',
};

/// A template with every verb collapsed to `%s`, plus the number of
/// substitution slots it expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub template: String,
    pub slots: usize,
}

impl Normalized {
    /// Whether rendering needs to decode a payload at all.
    pub fn needs_payload(&self) -> bool {
        self.slots > 0
    }
}

/// Rewrite every verb of `template` to the generic string verb.
///
/// Fails on the first character inside an open verb that is neither a flag
/// nor a type character; no partial output is produced.
pub fn normalize(template: &str) -> Result<Normalized, MalformedTemplate> {
    if !template.contains(VERB_MARKER) {
        return Ok(Normalized { template: template.to_string(), slots: 0 });
    }

    let mut out = String::with_capacity(template.len());
    let mut inside_verb = false;
    let mut slots = 0;

    for (offset, c) in template.char_indices() {
        if c == VERB_MARKER {
            if !inside_verb {
                inside_verb = true;
                slots += 1;
            }
            out.push(VERB_MARKER);
            continue;
        }

        if !inside_verb {
            out.push(c);
        } else if TYPE_CHARS.contains(&c) {
            inside_verb = false;
            out.push(GENERIC_VERB);
        } else if !FLAG_CHARS.contains(&c) {
            return Err(MalformedTemplate { found: c, offset });
        }
    }

    Ok(Normalized { template: out, slots })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
