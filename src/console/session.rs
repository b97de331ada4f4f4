/// Delimiter style of an open triple-quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    DoubleQuote,
    SingleQuote,
}

impl QuoteStyle {
    pub fn delimiter(&self) -> &'static str {
        match self {
            QuoteStyle::DoubleQuote => "\"\"\"",
            QuoteStyle::SingleQuote => "'''",
        }
    }

    /// An odd number of delimiters on a line flips the region open or closed.
    pub fn toggled_by(&self, line: &str) -> bool {
        line.matches(self.delimiter()).count() % 2 == 1
    }

    /// Style of the region `line` opens, if any. Double quotes win.
    pub fn opened_by(line: &str) -> Option<Self> {
        [QuoteStyle::DoubleQuote, QuoteStyle::SingleQuote]
            .into_iter()
            .find(|style| style.toggled_by(line))
    }
}

/// State accumulated while the user types one command.
///
/// Owned exclusively by the framer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSession {
    buffer: Option<String>,
    indent_depth: usize,
    multiline: Option<QuoteStyle>,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `line`, terminated by a newline.
    ///
    /// A blank line is dropped while the buffer holds nothing but whitespace.
    pub fn append_line(&mut self, line: &str) {
        let buffer = self.buffer.get_or_insert_with(String::new);
        if is_blank(line) && is_blank(buffer.as_str()) {
            return;
        }
        buffer.push_str(line);
        if !line.ends_with('\n') {
            buffer.push('\n');
        }
    }

    /// Removes the accumulated command, leaving no buffer behind.
    pub fn take_command(&mut self) -> String {
        self.buffer.take().unwrap_or_default()
    }

    /// True once any line has been fed since the last dispatch.
    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// True when there is nothing but whitespace to send.
    pub fn is_blank(&self) -> bool {
        self.buffer.as_deref().map_or(true, is_blank)
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_deref().unwrap_or("")
    }

    pub fn indent_depth(&self) -> usize {
        self.indent_depth
    }

    pub fn set_indent_depth(&mut self, depth: usize) {
        self.indent_depth = depth;
    }

    pub fn multiline(&self) -> Option<QuoteStyle> {
        self.multiline
    }

    pub fn set_multiline(&mut self, style: Option<QuoteStyle>) {
        self.multiline = style;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}
