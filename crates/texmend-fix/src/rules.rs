use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use texmend_log::ir::{ErrorCategory, LatexError};

use crate::balance;
use crate::distance::levenshtein;
use crate::edit::{FixEdit, FixKind, FixSuggestion};
use crate::tables;

const PACKAGE_FIX_CONFIDENCE: f64 = 0.95;
const MISSING_PACKAGE_CONFIDENCE: f64 = 0.9;
const ENV_END_CONFIDENCE: f64 = 0.8;
const TYPO_FIX_CONFIDENCE: f64 = 0.8;
const MATH_WRAP_CONFIDENCE: f64 = 0.75;
const EXTRA_BRACE_CONFIDENCE: f64 = 0.75;
const ENV_BEGIN_CONFIDENCE: f64 = 0.7;
const BRACE_APPEND_CONFIDENCE: f64 = 0.7;

static USEPACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\usepackage(?:\[[^\]]*\])?\{([^}]*)\}").unwrap());

/// Math-only tokens whose presence outside `$...$` signals a missing
/// delimiter. Subscript and superscript markers are handled separately.
const MATH_COMMANDS: &[&str] = &[
    "\\sum", "\\int", "\\prod", "\\frac", "\\sqrt", "\\infty", "\\partial", "\\nabla", "\\alpha",
    "\\beta", "\\gamma", "\\delta", "\\epsilon", "\\theta", "\\lambda", "\\mu", "\\pi", "\\sigma",
    "\\phi", "\\omega", "\\leq", "\\geq", "\\neq", "\\approx", "\\equiv", "\\times", "\\cdot",
    "\\pm", "\\rightarrow",
];

/// Proposes at most one deterministic repair for a diagnostic.
///
/// Dispatches on the category to one specialized rule. `None` means no
/// rule applies or its preconditions failed; that is the normal signal to
/// try the generative fallback, not an error.
pub fn fix(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let suggestion = match error.category {
        ErrorCategory::UndefinedControlSequence => {
            undefined_control_sequence(error, source_lines)
        }
        ErrorCategory::MissingPackage => missing_package(error, source_lines),
        ErrorCategory::UnclosedBrace => unclosed_brace(error, source_lines),
        ErrorCategory::MissingMathDelimiter => missing_math_delimiter(error, source_lines),
        ErrorCategory::UnclosedEnvironment => unclosed_environment(error, source_lines),
        ErrorCategory::ExtraBrace => extra_brace(error, source_lines),
        ErrorCategory::FileNotFound
        | ErrorCategory::ExtraAlignmentTab
        | ErrorCategory::GeneralError
        | ErrorCategory::CitationWarning
        | ErrorCategory::ReferenceWarning
        | ErrorCategory::FontWarning
        | ErrorCategory::GeneralWarning
        | ErrorCategory::BoxWarning => None,
    };
    if suggestion.is_none() {
        debug!(
            "no rule produced a fix for error {} ({:?})",
            error.id, error.category
        );
    }
    suggestion
}

/// The error's 1-indexed source line, when present and in bounds.
fn error_line<'a>(error: &LatexError, source_lines: &[&'a str]) -> Option<(u32, &'a str)> {
    let line = error.line?;
    let idx = line.checked_sub(1)? as usize;
    source_lines.get(idx).map(|text| (line, *text))
}

fn rule_suggestion(
    error: &LatexError,
    description: String,
    edit: FixEdit,
    confidence: f64,
) -> FixSuggestion {
    FixSuggestion {
        error_id: error.id,
        description,
        kind: FixKind::Rule,
        edit,
        confidence,
    }
}

/// Package lookup first, typo correction second; the first hit wins and
/// the other path is never consulted.
fn undefined_control_sequence(
    error: &LatexError,
    source_lines: &[&str],
) -> Option<FixSuggestion> {
    let command = error.offending_text.as_deref()?;

    if let Some(hint) = tables::package_for_command(command) {
        if has_package(source_lines, hint.package) {
            return None;
        }
        let edit = usepackage_edit(source_lines, hint.package);
        return Some(rule_suggestion(
            error,
            format!(
                "Add \\usepackage{{{}}} to provide {} ({})",
                hint.package, command, hint.description
            ),
            edit,
            PACKAGE_FIX_CONFIDENCE,
        ));
    }

    let corrected = tables::TYPO_DICTIONARY
        .get(command)
        .copied()
        .or_else(|| closest_common_command(command))?;
    let (line, text) = error_line(error, source_lines)?;
    if !text.contains(command) {
        return None;
    }
    let new_text = text.replace(command, corrected);
    Some(rule_suggestion(
        error,
        format!("Replace {} with {}", command, corrected),
        FixEdit::replace_line(line, new_text, text.to_string()),
        TYPO_FIX_CONFIDENCE,
    ))
}

fn missing_package(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let package = error.offending_text.as_deref()?;
    let edit = usepackage_edit(source_lines, package);
    Some(rule_suggestion(
        error,
        format!("Add \\usepackage{{{}}}", package),
        edit,
        MISSING_PACKAGE_CONFIDENCE,
    ))
}

fn unclosed_brace(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let (line, text) = error_line(error, source_lines)?;
    let (opens, closes) = balance::count_braces(text);
    if opens <= closes {
        return None;
    }
    Some(rule_suggestion(
        error,
        "Append a closing } to balance this line".to_string(),
        FixEdit::replace_line(line, format!("{}}}", text), text.to_string()),
        BRACE_APPEND_CONFIDENCE,
    ))
}

fn missing_math_delimiter(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let (line, text) = error_line(error, source_lines)?;
    let (start, end) = math_span(text)?;
    let wrapped = &text[start..end];
    let new_text = format!("{}${}${}", &text[..start], wrapped, &text[end..]);
    Some(rule_suggestion(
        error,
        format!("Wrap {} in inline math delimiters", wrapped),
        FixEdit::replace_line(line, new_text, text.to_string()),
        MATH_WRAP_CONFIDENCE,
    ))
}

fn unclosed_environment(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let name = error
        .offending_text
        .as_deref()
        .and_then(environment_name)?;
    let balance = balance::environment_balance(source_lines, &name);
    let line_in_bounds = error
        .line
        .filter(|l| *l >= 1 && (*l as usize) <= source_lines.len());

    if balance.begins > balance.ends {
        let anchor = line_in_bounds
            .or(balance.last_begin_line)
            .unwrap_or(source_lines.len().max(1) as u32);
        return Some(rule_suggestion(
            error,
            format!("Insert \\end{{{}}} to close the environment", name),
            FixEdit::insert_after(anchor, format!("\\end{{{}}}", name)),
            ENV_END_CONFIDENCE,
        ));
    }
    if balance.ends > balance.begins {
        let anchor = line_in_bounds.or(balance.last_end_line).unwrap_or(1);
        return Some(rule_suggestion(
            error,
            format!("Insert \\begin{{{}}} to open the environment", name),
            FixEdit::insert_before(anchor, format!("\\begin{{{}}}", name)),
            ENV_BEGIN_CONFIDENCE,
        ));
    }
    None
}

fn extra_brace(error: &LatexError, source_lines: &[&str]) -> Option<FixSuggestion> {
    let (line, text) = error_line(error, source_lines)?;
    let at = balance::unbalanced_close_index(text)?;
    let mut new_text = String::with_capacity(text.len());
    new_text.push_str(&text[..at]);
    new_text.push_str(&text[at + 1..]);
    Some(rule_suggestion(
        error,
        "Remove the unmatched } on this line".to_string(),
        FixEdit::replace_line(line, new_text, text.to_string()),
        EXTRA_BRACE_CONFIDENCE,
    ))
}

/// First distance-1 match against the frequent-command list.
fn closest_common_command(command: &str) -> Option<&'static str> {
    tables::COMMON_COMMANDS
        .iter()
        .copied()
        .find(|candidate| levenshtein(command, candidate) == 1)
}

/// Whether any `\usepackage` line already pulls in `package`, including as
/// part of a comma-separated list.
fn has_package(source_lines: &[&str], package: &str) -> bool {
    source_lines.iter().any(|line| {
        USEPACKAGE.captures_iter(line).any(|caps| {
            caps[1]
                .split(',')
                .any(|entry| entry.trim() == package)
        })
    })
}

/// Anchor for a new `\usepackage` line: after the last existing one, else
/// before `\begin{document}`, else at the top of the document.
fn usepackage_edit(source_lines: &[&str], package: &str) -> FixEdit {
    let new_text = format!("\\usepackage{{{}}}", package);
    let mut last_usepackage = None;
    let mut begin_document = None;
    for (idx, line) in source_lines.iter().enumerate() {
        if line.contains("\\usepackage") {
            last_usepackage = Some(idx as u32 + 1);
        }
        if begin_document.is_none() && line.contains("\\begin{document}") {
            begin_document = Some(idx as u32 + 1);
        }
    }
    if let Some(line) = last_usepackage {
        FixEdit::insert_after(line, new_text)
    } else if let Some(line) = begin_document {
        FixEdit::insert_before(line, new_text)
    } else {
        FixEdit::insert_before(1, new_text)
    }
}

/// Extracts `name` from a `\begin{name}` or `\end{name}` token.
fn environment_name(token: &str) -> Option<String> {
    let start = token.find('{')? + 1;
    let end = token.rfind('}')?;
    let name = token.get(start..end)?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Locates the first math token outside math mode and the end of the
/// minimal trailing math expression it starts.
fn math_span(text: &str) -> Option<(usize, usize)> {
    for (pos, _) in text.char_indices() {
        let token_len = match math_token_at(text, pos) {
            Some(len) => len,
            None => continue,
        };
        // An odd number of preceding $ means we are already inside math.
        if text[..pos].matches('$').count() % 2 != 0 {
            continue;
        }
        let end = math_expr_end(text, pos, token_len);
        return Some((pos, end));
    }
    None
}

fn math_token_at(text: &str, pos: usize) -> Option<usize> {
    let rest = &text[pos..];
    let first = rest.chars().next()?;
    if first == '_' || first == '^' {
        return Some(1);
    }
    for command in MATH_COMMANDS {
        if rest.starts_with(command) {
            let boundary = rest[command.len()..].chars().next();
            if !matches!(boundary, Some(c) if c.is_ascii_alphabetic()) {
                return Some(command.len());
            }
        }
    }
    None
}

/// Greedily consumes the math expression starting at `start`: the token
/// itself, then any balanced `{...}` groups and sub/superscript groups.
fn math_expr_end(text: &str, start: usize, token_len: usize) -> usize {
    let mut cursor = start + token_len;
    let marker = matches!(&text[start..start + token_len], "_" | "^");
    if marker {
        cursor = consume_script_argument(text, cursor);
    }
    loop {
        match text[cursor..].chars().next() {
            Some('{') => cursor = consume_group(text, cursor),
            Some('_') | Some('^') => {
                cursor += 1;
                cursor = consume_script_argument(text, cursor);
            }
            _ => break,
        }
    }
    cursor
}

/// A sub/superscript argument: a balanced group or a single non-space
/// character.
fn consume_script_argument(text: &str, cursor: usize) -> usize {
    match text[cursor..].chars().next() {
        Some('{') => consume_group(text, cursor),
        Some(c) if !c.is_whitespace() => cursor + c.len_utf8(),
        _ => cursor,
    }
}

/// Consumes a balanced `{...}` group starting at `start`; an unbalanced
/// group runs to end of line.
fn consume_group(text: &str, start: usize) -> usize {
    let mut depth = 0i64;
    for (offset, c) in text[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return start + offset + 1;
                }
            }
            _ => {}
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_span_wraps_command_with_arguments() {
        let (start, end) = math_span("Consider \\frac{a}{b} here").expect("span");
        assert_eq!(&"Consider \\frac{a}{b} here"[start..end], "\\frac{a}{b}");
    }

    #[test]
    fn math_span_skips_tokens_already_in_math_mode() {
        let text = "The term $x_i$ is fine but y_j is not";
        let (start, end) = math_span(text).expect("span");
        assert_eq!(&text[start..end], "_j");
    }

    #[test]
    fn math_span_consumes_scripts_after_command() {
        let text = "so \\sum_{i=1}^n converges";
        let (start, end) = math_span(text).expect("span");
        assert_eq!(&text[start..end], "\\sum_{i=1}^n");
    }

    #[test]
    fn math_span_rejects_prefixes_of_longer_commands() {
        // \pile is not \pi; no math token means no span.
        assert!(math_span("see \\pile of text").is_none());
    }

    #[test]
    fn environment_name_extraction() {
        assert_eq!(
            environment_name("\\begin{itemize}").as_deref(),
            Some("itemize")
        );
        assert_eq!(
            environment_name("\\end{align*}").as_deref(),
            Some("align*")
        );
        assert!(environment_name("\\begin").is_none());
        assert!(environment_name("\\begin{}").is_none());
    }

    #[test]
    fn has_package_understands_option_lists() {
        let doc = vec![
            "\\documentclass{article}",
            "\\usepackage[margin=1in]{geometry}",
            "\\usepackage{amsmath, amssymb}",
        ];
        assert!(has_package(&doc, "geometry"));
        assert!(has_package(&doc, "amssymb"));
        assert!(!has_package(&doc, "tikz"));
    }

    #[test]
    fn usepackage_anchor_prefers_last_import() {
        let doc = vec![
            "\\documentclass{article}",
            "\\usepackage{amsmath}",
            "\\usepackage{graphicx}",
            "\\begin{document}",
        ];
        let edit = usepackage_edit(&doc, "xcolor");
        assert_eq!(edit.action, crate::edit::FixAction::InsertAfter);
        assert_eq!(edit.line, 3);
    }

    #[test]
    fn usepackage_anchor_falls_back_to_begin_document() {
        let doc = vec!["\\documentclass{article}", "", "\\begin{document}", "hi"];
        let edit = usepackage_edit(&doc, "xcolor");
        assert_eq!(edit.action, crate::edit::FixAction::InsertBefore);
        assert_eq!(edit.line, 3);
    }

    #[test]
    fn usepackage_anchor_defaults_to_top() {
        let doc = vec!["just a fragment"];
        let edit = usepackage_edit(&doc, "xcolor");
        assert_eq!(edit.action, crate::edit::FixAction::InsertBefore);
        assert_eq!(edit.line, 1);
    }
}
