use serde::{Deserialize, Serialize};

/// Severity of one diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Closed taxonomy of diagnostics the parser can produce.
///
/// The variants serialize in `snake_case` (`undefined_control_sequence`,
/// `box_warning`, ...), which is also the vocabulary the fix engine
/// dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    UndefinedControlSequence,
    MissingMathDelimiter,
    UnclosedBrace,
    ExtraBrace,
    UnclosedEnvironment,
    FileNotFound,
    MissingPackage,
    ExtraAlignmentTab,
    GeneralError,
    CitationWarning,
    ReferenceWarning,
    FontWarning,
    GeneralWarning,
    BoxWarning,
}

impl ErrorCategory {
    /// Whether the rule-based fix engine carries a repair rule for this
    /// category.
    ///
    /// Stored on each [`LatexError`] at construction so consumers never
    /// re-derive it.
    pub fn has_auto_fix(self) -> bool {
        matches!(
            self,
            Self::UndefinedControlSequence
                | Self::MissingPackage
                | Self::UnclosedBrace
                | Self::UnclosedEnvironment
                | Self::MissingMathDelimiter
        )
    }
}

/// One diagnostic extracted from an engine log.
///
/// `raw_log` keeps the logical log lines that produced the record verbatim
/// so a UI can show the original engine output next to the structured view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatexError {
    /// Unique within one parse call, assigned sequentially starting at 1.
    pub id: u32,
    pub severity: Severity,
    pub category: ErrorCategory,
    pub message: String,
    pub raw_log: String,
    /// Source file the engine was reading when the diagnostic fired.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 1-indexed source line, when the log carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Extracted token (a `\command` or quoted literal) driving repair lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending_text: Option<String>,
    pub has_auto_fix: bool,
}

/// The structured result of parsing one engine log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedLog {
    pub errors: Vec<LatexError>,
    pub warnings: Vec<LatexError>,
    /// Always equals `errors.len()`; denormalized for cheap display.
    pub error_count: usize,
    /// Always equals `warnings.len()`.
    pub warning_count: usize,
    /// True iff the engine reported writing an output artifact.
    pub pdf_produced: bool,
}

impl ParsedLog {
    /// Builds a report with the count fields derived from the collections.
    ///
    /// This is the only construction site, which keeps the denormalized
    /// counts consistent by construction.
    pub fn new(errors: Vec<LatexError>, warnings: Vec<LatexError>, pdf_produced: bool) -> Self {
        let error_count = errors.len();
        let warning_count = warnings.len();
        Self {
            errors,
            warnings,
            error_count,
            warning_count,
            pdf_produced,
        }
    }
}
