use super::indent::IndentCalculator;
use super::session::{is_blank, QuoteStyle};

/// What a single input line means to the framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Whitespace only.
    Blank,
    /// Ends with an explicit `\` continuation.
    ContinuationBackslash,
    /// Opens a triple-quoted string of the given style.
    MultilineOpener(QuoteStyle),
    /// Closes the open triple-quoted string.
    MultilineCloser,
    /// Inside an open triple-quoted string; kept verbatim.
    MultilineContent,
    /// The block continues at `depth` columns.
    IndentIncreasing { depth: usize },
    /// Completes a statement.
    IndentNeutral,
}

/// Classifies `line` given the open string region and the current depth.
///
/// An open region takes precedence over every other rule.
pub fn classify_line(
    line: &str,
    multiline: Option<QuoteStyle>,
    indent: &dyn IndentCalculator,
    depth: usize,
) -> LineClass {
    if let Some(style) = multiline {
        return if style.toggled_by(line) {
            LineClass::MultilineCloser
        } else {
            LineClass::MultilineContent
        };
    }
    if let Some(style) = QuoteStyle::opened_by(line) {
        return LineClass::MultilineOpener(style);
    }
    classify_statement(line, indent, depth)
}

/// Statement-level rules, applied outside string regions.
pub fn classify_statement(line: &str, indent: &dyn IndentCalculator, depth: usize) -> LineClass {
    if is_blank(line) {
        return LineClass::Blank;
    }
    if line.ends_with('\\') {
        return LineClass::ContinuationBackslash;
    }

    let mut size = indent.indent_of(line);
    let opener = indent.is_block_opener(line);
    if opener {
        size += indent.indent_unit();
    }
    if (depth > 0 && size > 0) || opener {
        LineClass::IndentIncreasing { depth: size }
    } else {
        LineClass::IndentNeutral
    }
}
