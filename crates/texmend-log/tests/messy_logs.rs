use texmend_log::{parse, ErrorCategory};

#[test]
fn test_realistic_pdflatex_run() {
    let input = include_str!("fixtures/pdflatex_run.log");
    let report = parse(input);

    assert_eq!(report.error_count, 3);
    assert_eq!(report.warning_count, 3);
    assert!(report.pdf_produced);

    let undefined = &report.errors[0];
    assert_eq!(
        undefined.category,
        ErrorCategory::UndefinedControlSequence
    );
    assert_eq!(undefined.line, Some(23));
    assert_eq!(undefined.offending_text.as_deref(), Some("\\mathbb"));
    // No parenthesis stack is modeled: attribution follows the most
    // recently opened file marker.
    assert_eq!(undefined.file.as_deref(), Some("./main.aux"));

    let not_found = &report.errors[1];
    assert_eq!(not_found.category, ErrorCategory::FileNotFound);
    assert_eq!(not_found.offending_text.as_deref(), Some("tikzfigure.tex"));
    assert!(!not_found.has_auto_fix);

    let math = &report.errors[2];
    assert_eq!(math.category, ErrorCategory::MissingMathDelimiter);
    assert_eq!(math.line, Some(55));
    assert!(math.has_auto_fix);

    assert_eq!(report.warnings[0].category, ErrorCategory::CitationWarning);
    assert_eq!(report.warnings[0].line, Some(31));
    assert_eq!(report.warnings[1].category, ErrorCategory::BoxWarning);
    assert_eq!(report.warnings[1].line, Some(40));
    assert_eq!(report.warnings[2].category, ErrorCategory::GeneralWarning);
}

#[test]
fn test_noise_between_records_is_ignored() {
    let input = "latexmk -pdf main.tex\nRc files read:\n  /home/user/.latexmkrc\nLatexmk: This is Latexmk, John Collins, 20 November 2021\n! Undefined control sequence.\nl.2 \\typo\n";
    let report = parse(input);
    assert_eq!(report.error_count, 1);
    assert_eq!(report.warning_count, 0);
    assert_eq!(report.errors[0].offending_text.as_deref(), Some("\\typo"));
}

#[test]
fn test_sty_not_found_reports_missing_package() {
    let input = "! LaTeX Error: File `siunitx.sty' not found.\n\nType X to quit.\n";
    let report = parse(input);
    assert_eq!(report.error_count, 1);
    let error = &report.errors[0];
    assert_eq!(error.category, ErrorCategory::MissingPackage);
    assert_eq!(error.offending_text.as_deref(), Some("siunitx"));
    assert!(error.has_auto_fix);
}
