use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{ErrorCategory, LatexError, ParsedLog, Severity};

/// TeX engines hard-wrap log output at this many characters.
const WRAP_WIDTH: usize = 79;
/// How many logical lines after a `!` line are scanned for context.
const ERROR_CONTEXT_LINES: usize = 5;
/// Warning messages are capped so a runaway block cannot bloat the model.
const WARNING_MESSAGE_CAP: usize = 200;
/// Box-fit diagnostics carry long dimension dumps; keep only the head.
const BOX_MESSAGE_CAP: usize = 120;

static FILE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^\s()]+\.(?:tex|sty|cls|bbl|aux))").unwrap());
static FILE_LINE_ERROR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\s:]+\.(?:tex|sty|cls|bbl|aux)):(\d+):\s*(.*)$").unwrap());
static LINE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^l\.(\d+)").unwrap());
static INPUT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"on input line (\d+)").unwrap());
static BOX_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"at lines? (\d+)").unwrap());
static COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-zA-Z@]+").unwrap());
static ENVIRONMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:begin|end)\{[^}]*\}").unwrap());
static QUOTED_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^']+)'").unwrap());
static PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"Package\s+(\S+)\s+Error").unwrap());

/// Parses a complete engine log into a structured report.
///
/// Total over arbitrary input: empty strings, truncated logs and
/// non-LaTeX garbage all produce a (possibly empty) [`ParsedLog`], never a
/// panic. Lines the classifier does not recognize are skipped.
pub fn parse(log_text: &str) -> ParsedLog {
    LogParser::new().parse(log_text)
}

/// One-shot parser for LaTeX engine logs.
///
/// Holds the per-call state: the "current file" attribution and the
/// sequential id counter. A parser is consumed by [`LogParser::parse`];
/// every call to [`parse`] starts from a fresh one.
pub struct LogParser {
    current_file: Option<String>,
    next_id: u32,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            current_file: None,
            next_id: 0,
        }
    }

    /// Consumes the parser and classifies the whole log.
    pub fn parse(mut self, log_text: &str) -> ParsedLog {
        let lines = reassemble_lines(log_text);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let mut idx = 0;
        while idx < lines.len() {
            let line = &lines[idx];
            self.track_file(line);

            if line.starts_with('!') {
                let (record, consumed) = self.primary_error(&lines, idx);
                errors.push(record);
                idx += consumed;
                continue;
            }

            if let Some(caps) = FILE_LINE_ERROR.captures(line) {
                errors.push(self.file_line_error(&caps, line));
                idx += 1;
                continue;
            }

            if line.contains("LaTeX Warning:")
                || (line.contains("Package") && line.contains("Warning:"))
            {
                let (record, consumed) = self.warning_block(&lines, idx);
                warnings.push(record);
                idx += consumed;
                continue;
            }

            if line.starts_with("Overfull") || line.starts_with("Underfull") {
                warnings.push(self.box_warning(line));
                idx += 1;
                continue;
            }

            idx += 1;
        }

        ParsedLog::new(errors, warnings, log_text.contains("Output written on"))
    }

    /// Latest opening marker wins; no nesting stack is kept.
    fn track_file(&mut self, line: &str) {
        if let Some(caps) = FILE_MARKER.captures_iter(line).last() {
            self.current_file = Some(caps[1].to_string());
        }
    }

    /// Handles a `!`-prefixed primary error block.
    ///
    /// Collects up to [`ERROR_CONTEXT_LINES`] following logical lines
    /// (stopping at a blank line or the next `!` line), recovers the source
    /// line from an `l.<N>` marker and classifies over the whole block.
    fn primary_error(&mut self, lines: &[String], idx: usize) -> (LatexError, usize) {
        let first = &lines[idx];
        let message = first.trim_start_matches('!').trim().to_string();

        let mut block = first.clone();
        let mut source_line = None;
        let mut consumed = 1;
        while consumed <= ERROR_CONTEXT_LINES && idx + consumed < lines.len() {
            let context = &lines[idx + consumed];
            if context.trim().is_empty() || context.starts_with('!') {
                break;
            }
            block.push('\n');
            block.push_str(context);
            if source_line.is_none() {
                if let Some(caps) = LINE_REF.captures(context) {
                    source_line = caps[1].parse::<u32>().ok();
                }
            }
            consumed += 1;
        }

        let (category, offending_text) = classify(&block);
        let record = self.record(
            Severity::Error,
            category,
            message,
            block,
            source_line,
            offending_text,
        );
        (record, consumed)
    }

    /// Handles `-file-line-error` style `<file>:<line>: <message>` lines.
    fn file_line_error(&mut self, caps: &regex::Captures<'_>, line: &str) -> LatexError {
        let message = caps[3].trim().to_string();
        let (category, offending_text) = classify(&message);
        let mut record = self.record(
            Severity::Error,
            category,
            message,
            line.to_string(),
            caps[2].parse::<u32>().ok(),
            offending_text,
        );
        record.file = Some(caps[1].to_string());
        record
    }

    /// Handles a `LaTeX Warning:` / `Package ... Warning:` block, absorbing
    /// indented or blank continuation lines into a single message.
    fn warning_block(&mut self, lines: &[String], idx: usize) -> (LatexError, usize) {
        let first = &lines[idx];
        let mut message = first.trim().to_string();
        let mut block = first.clone();
        let mut consumed = 1;
        while idx + consumed < lines.len() {
            let next = &lines[idx + consumed];
            let continuation = next.trim().is_empty()
                || next.starts_with(' ')
                || next.starts_with('\t');
            if !continuation {
                break;
            }
            block.push('\n');
            block.push_str(next);
            if !next.trim().is_empty() {
                message.push(' ');
                message.push_str(next.trim());
            }
            consumed += 1;
        }

        let source_line = INPUT_LINE
            .captures(&message)
            .and_then(|caps| caps[1].parse::<u32>().ok());
        let category = warning_category(&message);
        let record = self.record(
            Severity::Warning,
            category,
            truncate(&message, WARNING_MESSAGE_CAP),
            block,
            source_line,
            None,
        );
        (record, consumed)
    }

    /// Handles `Overfull`/`Underfull` box-fit diagnostics.
    fn box_warning(&mut self, line: &str) -> LatexError {
        let source_line = BOX_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse::<u32>().ok());
        self.record(
            Severity::Warning,
            ErrorCategory::BoxWarning,
            truncate(line.trim(), BOX_MESSAGE_CAP),
            line.to_string(),
            source_line,
            None,
        )
    }

    fn record(
        &mut self,
        severity: Severity,
        category: ErrorCategory,
        message: String,
        raw_log: String,
        line: Option<u32>,
        offending_text: Option<String>,
    ) -> LatexError {
        self.next_id += 1;
        LatexError {
            id: self.next_id,
            severity,
            category,
            message,
            raw_log,
            file: self.current_file.clone(),
            line,
            offending_text,
            has_auto_fix: category.has_auto_fix(),
        }
    }
}

/// Rebuilds logical lines from the engine's hard-wrapped raw lines.
///
/// A raw line of exactly [`WRAP_WIDTH`] characters is a continuation: the
/// engine split it mid-token, so the next raw line is glued on without a
/// separator. Any other length terminates the logical line.
fn reassemble_lines(input: &str) -> Vec<String> {
    let mut logical = Vec::new();
    let mut buffer = String::new();
    for raw in input.lines() {
        buffer.push_str(raw);
        if raw.chars().count() == WRAP_WIDTH {
            continue;
        }
        logical.push(std::mem::take(&mut buffer));
    }
    if !buffer.is_empty() {
        logical.push(buffer);
    }
    logical
}

/// Shared substring classifier used by both the `!` block path and the
/// `<file>:<line>:` path. Checked in a fixed order; the first trigger wins.
fn classify(text: &str) -> (ErrorCategory, Option<String>) {
    if text.contains("Undefined control sequence") {
        let offending = COMMAND
            .find_iter(text)
            .last()
            .map(|m| m.as_str().to_string());
        return (ErrorCategory::UndefinedControlSequence, offending);
    }
    if text.contains("Missing $") {
        return (ErrorCategory::MissingMathDelimiter, None);
    }
    if text.contains("Missing }") || text.contains("Missing {") {
        return (ErrorCategory::UnclosedBrace, None);
    }
    if text.contains("Extra }") || text.contains("Too many }") {
        return (ErrorCategory::ExtraBrace, None);
    }
    if text.contains("\\begin") || text.contains("\\end") {
        let offending = ENVIRONMENT.find(text).map(|m| m.as_str().to_string());
        return (ErrorCategory::UnclosedEnvironment, offending);
    }
    if (text.contains("File") && text.contains("not found")) || text.contains("No file") {
        let filename = QUOTED_FILE.captures(text).map(|caps| caps[1].to_string());
        // A missing .sty is a missing package, not a missing input file;
        // this is what makes the package-insertion rule reachable.
        if let Some(name) = &filename {
            if let Some(stem) = name.strip_suffix(".sty") {
                return (ErrorCategory::MissingPackage, Some(stem.to_string()));
            }
        }
        return (ErrorCategory::FileNotFound, filename);
    }
    if text.contains("Package") && text.contains("Error") {
        let package = PACKAGE_NAME.captures(text).map(|caps| caps[1].to_string());
        return (ErrorCategory::GeneralError, package);
    }
    if text.contains("Extra alignment tab") {
        return (ErrorCategory::ExtraAlignmentTab, None);
    }
    (ErrorCategory::GeneralError, None)
}

fn warning_category(message: &str) -> ErrorCategory {
    if message.contains("Citation") {
        ErrorCategory::CitationWarning
    } else if message.contains("Reference") {
        ErrorCategory::ReferenceWarning
    } else if message.contains("Font") || message.contains("font") {
        ErrorCategory::FontWarning
    } else {
        ErrorCategory::GeneralWarning
    }
}

fn truncate(message: &str, cap: usize) -> String {
    message.chars().take(cap).collect()
}
