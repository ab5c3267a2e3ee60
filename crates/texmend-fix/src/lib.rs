//! # TeXmend Fix Engine
//!
//! Deterministic repair suggestions for diagnostics produced by
//! [`texmend_log`].
//!
//! ## Overview
//!
//! Given one [`LatexError`](texmend_log::ir::LatexError) and the document
//! split into source lines, [`fix`] dispatches on the error category to a
//! closed catalogue of rules:
//!
//! - **Undefined control sequence**: insert the `\usepackage` that provides
//!   the command, or correct a one-edit typo against a frequent-command
//!   list
//! - **Missing package**: insert `\usepackage{...}` at the preamble anchor
//! - **Unclosed brace / extra brace**: rebalance the reported line
//! - **Missing math delimiter**: wrap the offending math expression in `$`
//! - **Unclosed environment**: insert the matching `\begin`/`\end`
//!
//! Each invocation yields at most one [`FixSuggestion`] carrying a
//! declarative [`FixEdit`]; the engine never mutates the document. `None`
//! means "no rule applies" and is the caller's cue to try the injected
//! generative fallback ([`fix_with_ai`]), whose failures also degrade to
//! `None`.
//!
//! Both entry points are pure and reentrant; the only process-lifetime
//! state is the read-only lookup tables in [`tables`].
//!
//! ## Example
//!
//! ```
//! use texmend_fix::fix;
//!
//! let log = "! Undefined control sequence.\nl.2 \\mathbb\n";
//! let report = texmend_log::parse(log);
//! let source = vec!["\\documentclass{article}", "\\mathbb{R}"];
//!
//! let suggestion = fix(&report.errors[0], &source).expect("rule applies");
//! assert_eq!(suggestion.confidence, 0.95);
//! assert_eq!(
//!     suggestion.edit.new_text.as_deref(),
//!     Some("\\usepackage{amssymb}")
//! );
//! ```

/// Injected generative fallback boundary.
pub mod ai;
/// Brace and environment balance helpers.
pub mod balance;
/// Edit-distance computation.
pub mod distance;
/// Declarative edit and suggestion model.
pub mod edit;
/// The rule catalogue.
pub mod rules;
/// Static command, typo and package tables.
pub mod tables;

pub use ai::{fix_with_ai, AiError, AiFixProvider, NoOpAiProvider, AI_CONFIDENCE};
pub use edit::{FixAction, FixEdit, FixKind, FixSuggestion};
pub use rules::fix;
