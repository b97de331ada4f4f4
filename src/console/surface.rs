use std::io::{self, Write};

use crate::channel::OutputStream;
use crate::config::PromptConfig;

use super::indent::IndentCalculator;
use super::prompt::PromptState;

/// Where the user types and reads: the framer's view of the front-end.
pub trait InputSurface {
    /// Keep the input open for another line of the current statement.
    fn request_more_input(&mut self);

    fn set_prompt(&mut self, state: PromptState);

    /// Pre-fill the next input line with `text` (auto-indent).
    fn insert_auto_indent(&mut self, text: &str);

    /// Drop whatever is typed or pre-filled.
    fn clear_input(&mut self);

    fn scroll_to_end(&mut self);

    /// Toggle plain-text pass-through (no statement highlighting) while a
    /// triple-quoted string is open.
    fn set_plain_text(&mut self, enabled: bool);

    /// Transient message, e.g. why input was refused.
    fn show_hint(&mut self, message: &str);

    fn write_output(&mut self, stream: OutputStream, text: &str);
}

/// Merges a pre-filled `prefix` into a line typed without editing it.
///
/// A line with its own leading whitespace keeps it, a block continuation
/// (`else:`) drops one level, and blank lines stay blank.
pub fn merge_prefix(prefix: &str, typed: &str, indent: &dyn IndentCalculator) -> String {
    if prefix.is_empty() || typed.trim().is_empty() || typed.starts_with(char::is_whitespace) {
        return typed.to_string();
    }
    if indent.is_block_continuation(typed) {
        let depth = indent.indent_of(prefix).saturating_sub(indent.indent_unit());
        return format!("{}{}", indent.fill_indent(depth), typed);
    }
    format!("{}{}", prefix, typed)
}

/// Line-oriented terminal front-end.
///
/// Auto-indent is kept as an input prefix. A line editor shows it as
/// editable text ([`TerminalSurface::take_input_prefix`]); plain line input
/// prints it after the prompt and merges it into the submitted line
/// ([`merge_prefix`]).
pub struct TerminalSurface<W: Write> {
    out: W,
    prompts: PromptConfig,
    prompt: PromptState,
    input_prefix: String,
    plain_text: bool,
    needs_prompt: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, prompts: PromptConfig) -> Self {
        Self {
            out,
            prompts,
            prompt: PromptState::default(),
            input_prefix: String::new(),
            plain_text: false,
            needs_prompt: true,
        }
    }

    /// Prompt text for the current prompt state.
    pub fn prompt_text(&self) -> &str {
        self.prompt.render(&self.prompts)
    }

    pub fn is_plain_text(&self) -> bool {
        self.plain_text
    }

    /// Pre-filled text that belongs in front of the next submitted line.
    pub fn take_input_prefix(&mut self) -> String {
        std::mem::take(&mut self.input_prefix)
    }

    /// Prints the prompt (and pre-filled indent) if it changed since the
    /// last line was read. Nothing is printed while a command executes.
    pub fn render_prompt(&mut self) -> io::Result<()> {
        if !self.needs_prompt || !self.prompt.accepts_input() {
            return Ok(());
        }
        let prompt = self.prompt.render(&self.prompts);
        write!(self.out, "{}{}", prompt, self.input_prefix)?;
        self.out.flush()?;
        self.needs_prompt = false;
        Ok(())
    }

    /// The next line needs a fresh prompt.
    pub fn line_submitted(&mut self) {
        self.needs_prompt = true;
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> InputSurface for TerminalSurface<W> {
    fn request_more_input(&mut self) {
        self.needs_prompt = true;
    }

    fn set_prompt(&mut self, state: PromptState) {
        self.prompt = state;
        self.needs_prompt = true;
    }

    fn insert_auto_indent(&mut self, text: &str) {
        self.input_prefix.push_str(text);
        self.needs_prompt = true;
    }

    fn clear_input(&mut self) {
        self.input_prefix.clear();
    }

    fn scroll_to_end(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::debug!("Flush failed: {}", err);
        }
    }

    fn set_plain_text(&mut self, enabled: bool) {
        self.plain_text = enabled;
    }

    fn show_hint(&mut self, message: &str) {
        if let Err(err) = writeln!(self.out, "! {}", message) {
            tracing::debug!("Failed to show hint: {}", err);
        }
        self.needs_prompt = true;
    }

    fn write_output(&mut self, stream: OutputStream, text: &str) {
        // Program output shares the terminal; stderr is only tagged in logs.
        tracing::trace!(?stream, len = text.len(), "Interpreter output");
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            tracing::debug!("Failed to write output: {}", err);
        }
        self.needs_prompt = true;
    }
}
