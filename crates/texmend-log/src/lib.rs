//! # TeXmend Log Parser
//!
//! Turns the free-text diagnostic log of a LaTeX engine run into a typed
//! report of errors and warnings.
//!
//! ## Overview
//!
//! Engine logs are adversarial input: hard-wrapped at 79 characters,
//! interleaved with file-open markers, and written for humans rather than
//! machines. This crate reassembles the wrapped lines, tracks which source
//! file the engine was reading, and classifies each logical line into a
//! closed [`ErrorCategory`](ir::ErrorCategory) taxonomy:
//!
//! - **Primary errors**: `! Undefined control sequence.` blocks with their
//!   `l.<N>` source line references
//! - **File-line errors**: `main.tex:12: ...` lines from `-file-line-error`
//!   runs
//! - **Warnings**: `LaTeX Warning:` and `Package ... Warning:` blocks,
//!   including their indented continuation lines
//! - **Box diagnostics**: `Overfull \hbox` / `Underfull \vbox` reports
//!
//! Parsing is total: any input, including empty strings, truncated logs and
//! binary noise, yields a [`ParsedLog`](ir::ParsedLog). Unrecognized lines
//! are skipped. The parser performs no I/O, keeps no state between calls
//! and is safe to run concurrently for unrelated documents.
//!
//! ## Pipeline
//!
//! ```text
//! raw log text ──► reassemble 79-col wraps ──► classify logical lines
//!                                                      │
//!                              ParsedLog ◄─────────────┘
//!                       (errors, warnings, counts, pdf_produced)
//! ```
//!
//! ## Examples
//!
//! ```
//! let report = texmend_log::parse("! Undefined control sequence.\nl.12 \\foo\n");
//!
//! assert_eq!(report.error_count, 1);
//! assert_eq!(report.errors[0].line, Some(12));
//! assert_eq!(report.errors[0].offending_text.as_deref(), Some("\\foo"));
//! ```
//!
//! The report serializes to JSON for export to editor frontends:
//!
//! ```
//! let report = texmend_log::parse("Output written on main.pdf (3 pages).\n");
//! let json = serde_json::to_string_pretty(&report)?;
//! assert!(json.contains("\"pdf_produced\": true"));
//! # Ok::<(), serde_json::Error>(())
//! ```

/// Typed diagnostic model.
pub mod ir;
/// Log classification.
pub mod parser;

#[cfg(test)]
mod tests;

pub use ir::{ErrorCategory, LatexError, ParsedLog, Severity};
pub use parser::{parse, LogParser};
