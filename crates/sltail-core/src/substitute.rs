//! Positional substitution: fills the `%s` slots of a normalized template.
//!
//! | Sequence | Output |
//! |----------|--------|
//! | `%%` | `%` |
//! | `%s` | next argument |
//! | `%s`, arguments exhausted | `%!s(MISSING)` |
//! | `%` at end of template | `%!(NOVERB)` |
//! | `%c`, any other `c` | `%!c(<arg>)` or `%!c(MISSING)` |
//!
//! Arguments left over once the template is exhausted are ignored.

use std::fmt::{self, Write};

use crate::types::PhpValue;

/// A positional argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    /// Already stringified by the projector.
    Coerced(String),
    /// A decoded value passed through as-is. Strings print as themselves;
    /// other scalars print with a type-tagged marker such as `%!s(int64=5)`.
    Native(&'a PhpValue),
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Coerced(s) => f.write_str(s),
            Arg::Native(PhpValue::Str(s)) => f.write_str(s),
            Arg::Native(value @ (PhpValue::Array(_) | PhpValue::Object { .. })) => {
                write!(f, "{value}")
            }
            Arg::Native(value) => write_bad_verb(f, 's', value),
        }
    }
}

fn write_bad_verb(f: &mut impl Write, verb: char, value: &PhpValue) -> fmt::Result {
    match value {
        PhpValue::Null => write!(f, "%!{verb}(<nil>)"),
        other => write!(f, "%!{verb}({}={other})", other.type_tag()),
    }
}

/// Substitute `args` into `template`, left to right.
pub fn substitute(template: &str, args: &[Arg<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    // Writing into a String cannot fail.
    let _ = write_substituted(&mut out, template, args);
    out
}

fn write_substituted(out: &mut String, template: &str, args: &[Arg<'_>]) -> fmt::Result {
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            None => out.push_str("%!(NOVERB)"),
            Some('%') => out.push('%'),
            Some('s') => match args.next() {
                Some(arg) => write!(out, "{arg}")?,
                None => out.push_str("%!s(MISSING)"),
            },
            Some(verb) => match args.next() {
                Some(Arg::Coerced(s)) => write!(out, "%!{verb}(string={s})")?,
                Some(Arg::Native(value)) => write_bad_verb(out, verb, value)?,
                None => write!(out, "%!{verb}(MISSING)")?,
            },
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
