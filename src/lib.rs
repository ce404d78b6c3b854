//! sltail: render tailed log-table rows as readable log lines.
//!
//! Each row carries a printf-style message template and a serialized array
//! of values. The rendering engine lives in [`sltail_core`]; this crate adds
//! the [`tail`] driver that streams rows through it and the `sltail` binary.
//!
//! # Architecture
//!
//! ```text
//! rows (JSON lines) ──► tail ──► RowPrinter ──► render ──► stdout
//!                                                 │
//!                         verbs · unserialize · projector · substitute
//! ```

pub mod tail;

pub use sltail_core::config::Config;
pub use sltail_core::{render, LogRow, RenderOutcome, RowPrinter};
