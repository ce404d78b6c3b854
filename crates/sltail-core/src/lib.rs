//! sltail-core: rendering engine for tailed log-table rows.
//!
//! A log row stores its message as a legacy printf-style template plus a
//! serialized array of values. Rendering runs leaf-first:
//!
//! ```text
//! template ──► verbs::normalize ──► (template with %s slots, slot count)
//!                                          │ slots > 0
//! payload  ──► unserialize::decode ──► projector::project ──► substitute
//! ```
//!
//! Everything here is pure and synchronous; callers own I/O and pacing.

pub mod config;
pub mod error;
pub mod projector;
pub mod render;
pub mod row;
pub mod substitute;
pub mod types;
pub mod unserialize;
pub mod verbs;

pub use error::{MalformedTemplate, PayloadDecodeError, RenderError};
pub use render::{render, RenderOutcome, SkipReason};
pub use row::{LogRow, RowPrinter};
pub use types::{ArrayKey, PhpArray, PhpValue};
