//! Indentation rules for an indentation-structured language.

use crate::config::ConsoleConfig;

/// Language-specific indentation collaborator used by the framer.
pub trait IndentCalculator: Send {
    /// Column width of the leading whitespace of `line`.
    fn indent_of(&self, line: &str) -> usize;

    /// Whitespace that renders as `size` columns.
    fn fill_indent(&self, size: usize) -> String;

    /// True when the line's last significant token opens a nested block.
    fn is_block_opener(&self, line: &str) -> bool;

    /// Columns added by one indentation level.
    fn indent_unit(&self) -> usize;

    /// True when the line continues the enclosing compound statement at
    /// its own level (`else:`), so it sits one level left of the body.
    fn is_block_continuation(&self, line: &str) -> bool;
}

const CONTINUATION_KEYWORDS: [&str; 4] = ["else", "elif", "except", "finally"];

/// Python-style indentation: blocks open with a trailing `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonIndent {
    indent_size: usize,
    tab_size: usize,
    use_tabs: bool,
}

impl PythonIndent {
    pub fn new(indent_size: usize, tab_size: usize, use_tabs: bool) -> Self {
        Self {
            indent_size: indent_size.max(1),
            tab_size: tab_size.max(1),
            use_tabs,
        }
    }
}

impl Default for PythonIndent {
    fn default() -> Self {
        Self::new(4, 8, false)
    }
}

impl From<&ConsoleConfig> for PythonIndent {
    fn from(config: &ConsoleConfig) -> Self {
        Self::new(config.indent_size, config.tab_size, config.use_tabs)
    }
}

impl IndentCalculator for PythonIndent {
    fn indent_of(&self, line: &str) -> usize {
        let mut column = 0;
        for ch in line.chars() {
            match ch {
                ' ' => column += 1,
                // Tabs advance to the next tab stop.
                '\t' => column = (column / self.tab_size + 1) * self.tab_size,
                _ => break,
            }
        }
        column
    }

    fn fill_indent(&self, size: usize) -> String {
        if self.use_tabs {
            let mut indent = "\t".repeat(size / self.tab_size);
            indent.push_str(&" ".repeat(size % self.tab_size));
            indent
        } else {
            " ".repeat(size)
        }
    }

    fn is_block_opener(&self, line: &str) -> bool {
        last_significant_char(line) == Some(':')
    }

    fn indent_unit(&self) -> usize {
        self.indent_size
    }

    fn is_block_continuation(&self, line: &str) -> bool {
        let line = line.trim_start();
        let word_end = line
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(line.len());
        CONTINUATION_KEYWORDS.contains(&&line[..word_end]) && self.is_block_opener(line)
    }
}

/// Last character outside string literals and before a `#` comment.
///
/// Returns `None` when the line ends inside an unterminated string.
fn last_significant_char(line: &str) -> Option<char> {
    let mut last = None;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in line.chars() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
                last = Some(ch);
            }
            continue;
        }
        match ch {
            '#' => break,
            '"' | '\'' => {
                quote = Some(ch);
                last = Some(ch);
            }
            c if c.is_whitespace() => {}
            c => last = Some(c),
        }
    }

    if quote.is_some() {
        return None;
    }
    last
}
