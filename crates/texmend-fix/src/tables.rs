use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The package that provides a command, plus a short blurb for the
/// suggestion description.
#[derive(Debug, Clone, Copy)]
pub struct PackageHint {
    pub package: &'static str,
    pub description: &'static str,
}

/// Maps commands to the package that defines them.
///
/// Read-only for the process lifetime. Every entry names exactly one
/// insertable package so a hit can always be turned into a
/// `\usepackage{...}` edit.
pub static COMMAND_PACKAGES: Lazy<HashMap<&'static str, PackageHint>> = Lazy::new(|| {
    let mut m = HashMap::new();

    // Graphics and figures
    m.insert("\\includegraphics", PackageHint { package: "graphicx", description: "include external images" });
    m.insert("\\graphicspath", PackageHint { package: "graphicx", description: "set graphics search paths" });
    m.insert("\\rotatebox", PackageHint { package: "graphicx", description: "rotate content" });
    m.insert("\\scalebox", PackageHint { package: "graphicx", description: "scale content" });

    // Colors
    m.insert("\\textcolor", PackageHint { package: "xcolor", description: "colored text" });
    m.insert("\\colorbox", PackageHint { package: "xcolor", description: "colored box" });
    m.insert("\\definecolor", PackageHint { package: "xcolor", description: "define custom colors" });
    m.insert("\\rowcolor", PackageHint { package: "colortbl", description: "colored table rows" });

    // Links and URLs
    m.insert("\\href", PackageHint { package: "hyperref", description: "clickable hyperlinks" });
    m.insert("\\url", PackageHint { package: "hyperref", description: "formatted URLs" });
    m.insert("\\hypersetup", PackageHint { package: "hyperref", description: "configure hyperlinks" });

    // Math (AMS family)
    m.insert("\\text", PackageHint { package: "amsmath", description: "text in math mode" });
    m.insert("\\boldsymbol", PackageHint { package: "amsmath", description: "bold math symbols" });
    m.insert("\\dfrac", PackageHint { package: "amsmath", description: "display-style fraction" });
    m.insert("\\tfrac", PackageHint { package: "amsmath", description: "text-style fraction" });
    m.insert("\\operatorname", PackageHint { package: "amsmath", description: "upright operator names" });
    m.insert("\\mathbb", PackageHint { package: "amssymb", description: "blackboard bold letters" });
    m.insert("\\mathfrak", PackageHint { package: "amssymb", description: "fraktur letters" });
    m.insert("\\mathscr", PackageHint { package: "mathrsfs", description: "script letters" });
    m.insert("\\bm", PackageHint { package: "bm", description: "bold math" });
    m.insert("\\coloneqq", PackageHint { package: "mathtools", description: "definition colon-equals" });

    // Theorems and proofs
    m.insert("\\newtheorem", PackageHint { package: "amsthm", description: "define theorem environments" });
    m.insert("\\theoremstyle", PackageHint { package: "amsthm", description: "set theorem style" });
    m.insert("\\qedhere", PackageHint { package: "amsthm", description: "position the QED symbol" });

    // Tables and arrays
    m.insert("\\toprule", PackageHint { package: "booktabs", description: "professional table rules" });
    m.insert("\\midrule", PackageHint { package: "booktabs", description: "professional table rules" });
    m.insert("\\bottomrule", PackageHint { package: "booktabs", description: "professional table rules" });
    m.insert("\\cmidrule", PackageHint { package: "booktabs", description: "partial table rules" });
    m.insert("\\multirow", PackageHint { package: "multirow", description: "merge table rows" });
    m.insert("\\makecell", PackageHint { package: "makecell", description: "multi-line table cells" });
    m.insert("\\thead", PackageHint { package: "makecell", description: "table header formatting" });
    m.insert("\\hhline", PackageHint { package: "hhline", description: "custom table lines" });

    // Layout
    m.insert("\\geometry", PackageHint { package: "geometry", description: "page layout configuration" });
    m.insert("\\newgeometry", PackageHint { package: "geometry", description: "mid-document layout change" });
    m.insert("\\doublespacing", PackageHint { package: "setspace", description: "double line spacing" });
    m.insert("\\onehalfspacing", PackageHint { package: "setspace", description: "one-and-a-half spacing" });
    m.insert("\\fancyhead", PackageHint { package: "fancyhdr", description: "custom page headers" });
    m.insert("\\fancyfoot", PackageHint { package: "fancyhdr", description: "custom page footers" });
    m.insert("\\fancyhf", PackageHint { package: "fancyhdr", description: "set header and footer" });
    m.insert("\\pagestyle", PackageHint { package: "fancyhdr", description: "page style selection" });

    // Citations
    m.insert("\\citep", PackageHint { package: "natbib", description: "parenthetical citation" });
    m.insert("\\citet", PackageHint { package: "natbib", description: "textual citation" });
    m.insert("\\citeauthor", PackageHint { package: "natbib", description: "author-only citation" });
    m.insert("\\autocite", PackageHint { package: "biblatex", description: "automatic citation format" });
    m.insert("\\printbibliography", PackageHint { package: "biblatex", description: "print the bibliography" });

    // Cross-references
    m.insert("\\cref", PackageHint { package: "cleveref", description: "smart cross-reference" });
    m.insert("\\Cref", PackageHint { package: "cleveref", description: "capitalized smart cross-reference" });
    m.insert("\\crefrange", PackageHint { package: "cleveref", description: "reference range" });

    // Code listings
    m.insert("\\lstinline", PackageHint { package: "listings", description: "inline code" });
    m.insert("\\lstset", PackageHint { package: "listings", description: "listing configuration" });
    m.insert("\\mintinline", PackageHint { package: "minted", description: "highlighted inline code" });

    // TikZ and plots
    m.insert("\\tikz", PackageHint { package: "tikz", description: "inline TikZ picture" });
    m.insert("\\draw", PackageHint { package: "tikz", description: "draw in TikZ" });
    m.insert("\\node", PackageHint { package: "tikz", description: "TikZ node" });
    m.insert("\\addplot", PackageHint { package: "pgfplots", description: "plot inside an axis" });
    m.insert("\\pgfplotsset", PackageHint { package: "pgfplots", description: "pgfplots configuration" });

    // Units
    m.insert("\\si", PackageHint { package: "siunitx", description: "SI unit formatting" });
    m.insert("\\SI", PackageHint { package: "siunitx", description: "number with units" });
    m.insert("\\num", PackageHint { package: "siunitx", description: "number formatting" });
    m.insert("\\ang", PackageHint { package: "siunitx", description: "angle formatting" });

    // Enhanced lists
    m.insert("\\setlist", PackageHint { package: "enumitem", description: "customize list formatting" });

    // Quotations
    m.insert("\\enquote", PackageHint { package: "csquotes", description: "context-sensitive quotes" });
    m.insert("\\blockquote", PackageHint { package: "csquotes", description: "block quotation" });

    // Subfigures and floats
    m.insert("\\subcaption", PackageHint { package: "subcaption", description: "subfigure captions" });
    m.insert("\\subfloat", PackageHint { package: "subfig", description: "subfloat content" });
    m.insert("\\floatplacement", PackageHint { package: "float", description: "float placement control" });

    // Icons
    m.insert("\\faGithub", PackageHint { package: "fontawesome5", description: "Font Awesome icons" });
    m.insert("\\faEnvelope", PackageHint { package: "fontawesome5", description: "Font Awesome icons" });

    // Chemistry
    m.insert("\\ce", PackageHint { package: "mhchem", description: "chemical formulas" });

    // Headers for appendices
    m.insert("\\appendixpage", PackageHint { package: "appendix", description: "appendix title page" });

    // Micro-typography
    m.insert("\\textls", PackageHint { package: "microtype", description: "letter spacing adjustment" });

    m
});

/// Known misspellings that plain distance-1 matching cannot catch, mostly
/// transpositions. Checked before the Levenshtein pass.
pub static TYPO_DICTIONARY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("\\sectino", "\\section");
    m.insert("\\itme", "\\item");
    m.insert("\\bgein", "\\begin");
    m.insert("\\edn", "\\end");
    m.insert("\\lbael", "\\label");
    m.insert("\\lable", "\\label");
    m.insert("\\usepackages", "\\usepackage");
    m.insert("\\documentclas", "\\documentclass");
    m.insert("\\includegraphic", "\\includegraphics");
    m.insert("\\textbold", "\\textbf");
    m.insert("\\bold", "\\textbf");
    m.insert("\\italic", "\\textit");
    m.insert("\\italics", "\\textit");
    m.insert("\\maketile", "\\maketitle");
    m.insert("\\tableofcontent", "\\tableofcontents");
    m.insert("\\emphasis", "\\emph");
    m
});

/// Frequent commands used as Levenshtein correction targets. Order matters:
/// the first distance-1 match wins.
pub static COMMON_COMMANDS: &[&str] = &[
    "\\section",
    "\\subsection",
    "\\subsubsection",
    "\\chapter",
    "\\paragraph",
    "\\begin",
    "\\end",
    "\\item",
    "\\textbf",
    "\\textit",
    "\\texttt",
    "\\underline",
    "\\emph",
    "\\label",
    "\\ref",
    "\\cite",
    "\\caption",
    "\\title",
    "\\author",
    "\\date",
    "\\maketitle",
    "\\tableofcontents",
    "\\includegraphics",
    "\\footnote",
    "\\usepackage",
    "\\documentclass",
    "\\newcommand",
];

/// Package lookup for an undefined command.
pub fn package_for_command(command: &str) -> Option<&'static PackageHint> {
    COMMAND_PACKAGES.get(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mathbb_maps_to_amssymb() {
        let hint = package_for_command("\\mathbb").expect("known command");
        assert_eq!(hint.package, "amssymb");
    }

    #[test]
    fn unknown_command_has_no_hint() {
        assert!(package_for_command("\\definitelynotacommand").is_none());
    }

    #[test]
    fn every_hint_names_one_package() {
        for (command, hint) in COMMAND_PACKAGES.iter() {
            assert!(command.starts_with('\\'), "{} lacks backslash", command);
            assert!(!hint.package.is_empty());
            assert!(
                !hint.package.contains(' '),
                "{} maps to a non-installable package spec",
                command
            );
        }
    }

    #[test]
    fn typo_dictionary_targets_are_real_commands() {
        for (typo, target) in TYPO_DICTIONARY.iter() {
            assert!(typo.starts_with('\\'));
            assert!(target.starts_with('\\'));
            assert_ne!(typo, target);
        }
    }
}
