//! Render: normalize a template, decode its payload and substitute.
//!
//! The payload is only decoded when the normalized template has at least one
//! slot. Failures never lose the text: every [`RenderOutcome`] carries the
//! best string available, so a caller can always print something.
//!
//! | Situation | Outcome | Text |
//! |-----------|---------|------|
//! | no verbs | `Rendered` | template |
//! | verbs substituted | `Rendered` | substituted string |
//! | payload decodes to a non-array | `Skipped(NotAnArray)` | normalized template |
//! | payload does not decode | `Failed(PayloadDecode)` | normalized template |
//! | malformed verb | `Failed(MalformedTemplate)` | original template |

use std::fmt;

use crate::error::RenderError;
use crate::projector::project;
use crate::substitute::substitute;
use crate::unserialize::decode;
use crate::verbs::normalize;

/// Why substitution was skipped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The payload decoded to something other than a key/value mapping.
    NotAnArray,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnArray => write!(f, "payload is not an array"),
        }
    }
}

/// Result of a single [`render`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(String),
    Skipped { text: String, reason: SkipReason },
    Failed { fallback: String, error: RenderError },
}

impl RenderOutcome {
    /// The string to show, whatever happened.
    pub fn text(&self) -> &str {
        match self {
            RenderOutcome::Rendered(text) => text,
            RenderOutcome::Skipped { text, .. } => text,
            RenderOutcome::Failed { fallback, .. } => fallback,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            RenderOutcome::Rendered(text) => text,
            RenderOutcome::Skipped { text, .. } => text,
            RenderOutcome::Failed { fallback, .. } => fallback,
        }
    }

    pub fn error(&self) -> Option<&RenderError> {
        match self {
            RenderOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered(_))
    }

    /// Two-value form: the text on success or skip, otherwise the fallback
    /// text together with the error.
    pub fn into_result(self) -> Result<String, (String, RenderError)> {
        match self {
            RenderOutcome::Rendered(text) | RenderOutcome::Skipped { text, .. } => Ok(text),
            RenderOutcome::Failed { fallback, error } => Err((fallback, error)),
        }
    }
}

/// Render `template` with the values of the serialized `payload`.
pub fn render(template: &str, payload: impl AsRef<[u8]>) -> RenderOutcome {
    let normalized = match normalize(template) {
        Ok(normalized) => normalized,
        Err(err) => {
            tracing::debug!(error = %err, "render: malformed template");
            return RenderOutcome::Failed {
                fallback: template.to_string(),
                error: err.into(),
            };
        }
    };

    if !normalized.needs_payload() {
        return RenderOutcome::Rendered(normalized.template);
    }

    let value = match decode(payload) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "render: payload did not decode");
            return RenderOutcome::Failed {
                fallback: normalized.template,
                error: err.into(),
            };
        }
    };

    match value.as_array() {
        Some(arr) => {
            let args = project(arr, normalized.slots);
            RenderOutcome::Rendered(substitute(&normalized.template, &args))
        }
        None => RenderOutcome::Skipped {
            text: normalized.template,
            reason: SkipReason::NotAnArray,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
