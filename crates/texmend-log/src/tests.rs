use crate::ir::{ErrorCategory, Severity};
use crate::parse;

#[test]
fn empty_input_yields_empty_report() {
    let report = parse("");
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count, 0);
    assert!(!report.pdf_produced);
}

#[test]
fn primary_error_with_line_reference() {
    let report = parse("! Undefined control sequence.\nl.10 \\unknowncommand\n");
    assert_eq!(report.error_count, 1);
    let error = &report.errors[0];
    assert_eq!(error.severity, Severity::Error);
    assert_eq!(error.category, ErrorCategory::UndefinedControlSequence);
    assert_eq!(error.line, Some(10));
    assert_eq!(error.offending_text.as_deref(), Some("\\unknowncommand"));
    assert!(error.has_auto_fix);
    assert!(error.raw_log.contains("l.10"));
}

#[test]
fn file_attribution_follows_open_markers() {
    let input = "(./chapters/intro.tex\n! Missing $ inserted.\nl.3 x_i\n";
    let report = parse(input);
    assert_eq!(report.error_count, 1);
    let error = &report.errors[0];
    assert_eq!(error.file.as_deref(), Some("./chapters/intro.tex"));
    assert_eq!(error.category, ErrorCategory::MissingMathDelimiter);
    assert!(error.has_auto_fix);
}

#[test]
fn latest_file_marker_wins() {
    let input = "(./a.tex (./b.sty\n! Extra }, or forgotten $.\nl.7 }\n";
    let report = parse(input);
    assert_eq!(report.errors[0].file.as_deref(), Some("./b.sty"));
    assert_eq!(report.errors[0].category, ErrorCategory::ExtraBrace);
}

#[test]
fn file_line_error_mode() {
    let report = parse("./main.tex:42: Undefined control sequence.\n");
    assert_eq!(report.error_count, 1);
    let error = &report.errors[0];
    assert_eq!(error.file.as_deref(), Some("./main.tex"));
    assert_eq!(error.line, Some(42));
    assert_eq!(error.category, ErrorCategory::UndefinedControlSequence);
}

#[test]
fn warning_block_with_continuation() {
    let input = "Package hyperref Warning: Token not allowed in a PDF string\n    (Unicode) on input line 27.\n";
    let report = parse(input);
    assert_eq!(report.warning_count, 1);
    let warning = &report.warnings[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.category, ErrorCategory::GeneralWarning);
    assert_eq!(warning.line, Some(27));
    assert!(warning.message.contains("Token not allowed"));
    assert!(warning.message.contains("(Unicode)"));
}

#[test]
fn citation_and_reference_warnings() {
    let input = "LaTeX Warning: Citation `knuth84' on page 1 undefined on input line 5.\n\nLaTeX Warning: Reference `fig:setup' on page 2 undefined on input line 9.\n";
    let report = parse(input);
    assert_eq!(report.warning_count, 2);
    assert_eq!(report.warnings[0].category, ErrorCategory::CitationWarning);
    assert_eq!(report.warnings[0].line, Some(5));
    assert_eq!(report.warnings[1].category, ErrorCategory::ReferenceWarning);
    assert_eq!(report.warnings[1].line, Some(9));
}

#[test]
fn box_warnings_extract_paragraph_lines() {
    let input = "Overfull \\hbox (15.3pt too wide) in paragraph at lines 12--14\nUnderfull \\vbox (badness 10000) detected at line 80\n";
    let report = parse(input);
    assert_eq!(report.warning_count, 2);
    assert_eq!(report.warnings[0].category, ErrorCategory::BoxWarning);
    assert_eq!(report.warnings[0].line, Some(12));
    assert_eq!(report.warnings[1].line, Some(80));
}

#[test]
fn box_warning_message_is_capped() {
    let long_tail = "x".repeat(400);
    let input = format!("Overfull \\hbox (1.0pt too wide) in paragraph at lines 3--4 {}\n", long_tail);
    let report = parse(&input);
    assert_eq!(report.warnings[0].message.chars().count(), 120);
}

#[test]
fn ids_are_sequential_and_unique() {
    let input = "! Missing } inserted.\nl.2 foo\n\nLaTeX Warning: Citation `a' undefined on input line 3.\n\n! Extra alignment tab has been changed to \\cr.\nl.8 a & b & c\n";
    let report = parse(input);
    let mut ids: Vec<u32> = report
        .errors
        .iter()
        .chain(report.warnings.iter())
        .map(|e| e.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn counts_match_collections() {
    let input = "! Missing $ inserted.\nl.4 a_b\n\nLaTeX Warning: There were undefined references.\n";
    let report = parse(input);
    assert_eq!(report.error_count, report.errors.len());
    assert_eq!(report.warning_count, report.warnings.len());
}

#[test]
fn pdf_flag_tracks_output_marker() {
    assert!(parse("Output written on main.pdf (2 pages, 12345 bytes).\n").pdf_produced);
    assert!(!parse("No pages of output.\n").pdf_produced);
}

#[test]
fn alignment_tab_has_no_auto_fix() {
    let report = parse("! Extra alignment tab has been changed to \\cr.\nl.5 a & b\n");
    let error = &report.errors[0];
    assert_eq!(error.category, ErrorCategory::ExtraAlignmentTab);
    assert!(!error.has_auto_fix);
}

#[test]
fn package_error_extracts_package_name() {
    let report = parse("! Package babel Error: Unknown option `klingon'.\n");
    let error = &report.errors[0];
    assert_eq!(error.category, ErrorCategory::GeneralError);
    assert_eq!(error.offending_text.as_deref(), Some("babel"));
    assert!(!error.has_auto_fix);
}

#[test]
fn garbage_lines_are_skipped() {
    let input = "This is pdfTeX, Version 3.141592653\nrestricted \\write18 enabled.\n%&-line parsing enabled.\n**main.tex\n";
    let report = parse(input);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.warning_count, 0);
}

#[test]
fn environment_error_extracts_match() {
    let report =
        parse("! LaTeX Error: \\begin{itemize} on input line 4 ended by \\end{document}.\n");
    let error = &report.errors[0];
    assert_eq!(error.category, ErrorCategory::UnclosedEnvironment);
    assert_eq!(error.offending_text.as_deref(), Some("\\begin{itemize}"));
    assert!(error.has_auto_fix);
}

#[test]
fn report_serializes_with_snake_case_categories() {
    let report = parse("! Undefined control sequence.\nl.2 \\nope\n");
    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("\"undefined_control_sequence\""));
    assert!(json.contains("\"severity\":\"error\""));
}
