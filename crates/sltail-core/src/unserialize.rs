//! Payload decoder: parses the length-prefixed serialization format into a
//! [`PhpValue`] tree.
//!
//! ```text
//! N;                      null
//! b:1;                    bool
//! i:-42;                  integer
//! d:0.5;  d:INF;          float
//! s:5:"hello";            string, length in bytes
//! a:2:{i:0;s:1:"x";s:1:"k";N;}
//! O:3:"Foo":1:{s:4:"name";s:1:"x";}
//! ```
//!
//! Parsing works on bytes so string lengths line up with the wire format;
//! decoded string bytes are converted to UTF-8 lossily. Once a type tag has
//! matched, any later failure is cut so the error points at the real problem
//! instead of at the tag.

use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_till1},
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, cut, map, map_res, opt, recognize},
    error::{context, ContextError, ErrorKind, FromExternalError, ParseError},
    multi::fold_many_m_n,
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::error::PayloadDecodeError;
use crate::types::{ArrayKey, PhpArray, PhpValue};

/// Deepest array/object nesting accepted before decoding is refused.
pub const MAX_DEPTH: usize = 128;

/// Upper bound on the capacity reserved from an untrusted element count.
const PREALLOC_LIMIT: usize = 1024;

type Input<'a> = &'a [u8];
type PResult<'a, T> = IResult<Input<'a>, T, DecodeFail<'a>>;

/// Decode a serialized payload.
pub fn decode(payload: impl AsRef<[u8]>) -> Result<PhpValue, PayloadDecodeError> {
    let bytes = payload.as_ref();
    match all_consuming(|i| php_value(i, 0))(bytes) {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.into_decode_error(bytes)),
        Err(nom::Err::Incomplete(_)) => Err(PayloadDecodeError::new(
            bytes.len(),
            "unexpected end of payload",
        )),
    }
}

// ---------------------------------------------------------------------------
// Error plumbing
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct DecodeFail<'a> {
    input: Input<'a>,
    kind: ErrorKind,
    context: Option<&'static str>,
}

impl<'a> DecodeFail<'a> {
    fn into_decode_error(self, full: &[u8]) -> PayloadDecodeError {
        let offset = full.len() - self.input.len();
        let reason = if self.input.is_empty() {
            "unexpected end of payload".to_string()
        } else if let Some(ctx) = self.context {
            format!("expected {ctx}")
        } else if self.kind == ErrorKind::Eof {
            "trailing data after value".to_string()
        } else {
            format!("unexpected input ({})", self.kind.description())
        };
        PayloadDecodeError::new(offset, reason)
    }
}

impl<'a> ParseError<Input<'a>> for DecodeFail<'a> {
    fn from_error_kind(input: Input<'a>, kind: ErrorKind) -> Self {
        Self { input, kind, context: None }
    }

    fn append(_: Input<'a>, _: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Keeps the innermost context; outer layers only describe where we were.
impl<'a> ContextError<Input<'a>> for DecodeFail<'a> {
    fn add_context(_: Input<'a>, ctx: &'static str, mut other: Self) -> Self {
        if other.context.is_none() {
            other.context = Some(ctx);
        }
        other
    }
}

impl<'a, E> FromExternalError<Input<'a>, E> for DecodeFail<'a> {
    fn from_external_error(input: Input<'a>, kind: ErrorKind, _: E) -> Self {
        Self { input, kind, context: None }
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

fn parse_ascii<T: FromStr>(bytes: &[u8]) -> Result<T, ()> {
    std::str::from_utf8(bytes)
        .map_err(|_| ())
        .and_then(|s| s.parse().map_err(|_| ()))
}

fn parse_float(bytes: &[u8]) -> Result<f64, ()> {
    match bytes {
        b"INF" => Ok(f64::INFINITY),
        b"-INF" => Ok(f64::NEG_INFINITY),
        b"NAN" => Ok(f64::NAN),
        _ => parse_ascii(bytes),
    }
}

fn length(input: Input<'_>) -> PResult<'_, usize> {
    context("length", map_res(digit1, parse_ascii::<usize>))(input)
}

fn integer(input: Input<'_>) -> PResult<'_, i64> {
    map_res(
        recognize(pair(opt(one_of("+-")), digit1)),
        parse_ascii::<i64>,
    )(input)
}

fn float(input: Input<'_>) -> PResult<'_, f64> {
    map_res(take_till1(|b: u8| b == b';'), parse_float)(input)
}

/// `<len>:"<bytes>";`: everything after the `s:` tag.
fn string_rest(input: Input<'_>) -> PResult<'_, String> {
    let (input, len) = terminated(length, tag(":\""))(input)?;
    let (input, bytes) = terminated(take(len), tag("\";"))(input)?;
    Ok((input, String::from_utf8_lossy(bytes).into_owned()))
}

// ---------------------------------------------------------------------------
// Compound values
// ---------------------------------------------------------------------------

fn php_value(input: Input<'_>, depth: usize) -> PResult<'_, PhpValue> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(DecodeFail {
            input,
            kind: ErrorKind::TooLarge,
            context: Some("nesting within depth limit"),
        }));
    }

    context(
        "value",
        alt((
            map(tag("N;"), |_| PhpValue::Null),
            map(
                preceded(
                    tag("b:"),
                    cut(context("bool", terminated(one_of("01"), char(';')))),
                ),
                |c: char| PhpValue::Bool(c == '1'),
            ),
            map(
                preceded(tag("i:"), cut(context("integer", terminated(integer, char(';'))))),
                PhpValue::Int,
            ),
            map(
                preceded(tag("d:"), cut(context("float", terminated(float, char(';'))))),
                PhpValue::Float,
            ),
            map(preceded(tag("s:"), cut(context("string", string_rest))), PhpValue::Str),
            map(
                preceded(tag("a:"), cut(context("array", move |i| array_rest(i, depth)))),
                PhpValue::Array,
            ),
            preceded(tag("O:"), cut(context("object", move |i| object_rest(i, depth)))),
        )),
    )(input)
}

fn array_key(input: Input<'_>) -> PResult<'_, ArrayKey> {
    context(
        "array key",
        alt((
            map(preceded(tag("i:"), cut(terminated(integer, char(';')))), ArrayKey::Int),
            map(preceded(tag("s:"), cut(string_rest)), ArrayKey::Str),
        )),
    )(input)
}

fn member(input: Input<'_>, depth: usize) -> PResult<'_, (ArrayKey, PhpValue)> {
    let (input, key) = array_key(input)?;
    let (input, value) = php_value(input, depth + 1)?;
    Ok((input, (key, value)))
}

/// Exactly `len` key/value pairs followed by `}`.
fn members(input: Input<'_>, len: usize, depth: usize) -> PResult<'_, PhpArray> {
    let (input, arr) = fold_many_m_n(
        len,
        len,
        move |i| member(i, depth),
        move || PhpArray::with_capacity(len.min(PREALLOC_LIMIT)),
        |mut arr: PhpArray, (k, v)| {
            arr.insert(k, v);
            arr
        },
    )(input)?;
    let (input, _) = context("closing brace", char('}'))(input)?;
    Ok((input, arr))
}

/// `<n>:{<members>}`: everything after the `a:` tag.
fn array_rest(input: Input<'_>, depth: usize) -> PResult<'_, PhpArray> {
    let (input, len) = terminated(length, tag(":{"))(input)?;
    members(input, len, depth)
}

/// `<len>:"<class>":<n>:{<members>}`: everything after the `O:` tag.
fn object_rest(input: Input<'_>, depth: usize) -> PResult<'_, PhpValue> {
    let (input, class_len) = terminated(length, tag(":\""))(input)?;
    let (input, class) = terminated(take(class_len), tag("\":"))(input)?;
    let (input, len) = terminated(length, tag(":{"))(input)?;
    let (input, members) = members(input, len, depth)?;
    let class = String::from_utf8_lossy(class).into_owned();
    Ok((input, PhpValue::Object { class, members }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
