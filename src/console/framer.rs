//! Turns typed lines into interpreter commands.
//!
//! The framer buffers lines while a statement is incomplete (open block,
//! open triple-quoted string, trailing backslash), dispatches the buffer
//! once it is complete, and keeps the prompt in sync with both its own
//! state and the interpreter channel's.

use std::collections::VecDeque;

use crate::channel::{
    ChannelError, ConsoleListener, InterpreterChannel, InterpreterResponse,
};
use crate::mvi::Reducer;

use super::classify::{classify_line, classify_statement, LineClass};
use super::error::ConsoleError;
use super::indent::IndentCalculator;
use super::prompt::{PromptIntent, PromptReducer, PromptState};
use super::session::InputSession;
use super::surface::InputSurface;

/// A complete command waiting for the channel.
#[derive(Debug, Clone)]
struct PendingCommand {
    command: String,
    /// Last line fed before dispatch; sizes the indent if the interpreter
    /// asks for more.
    last_line: String,
}

pub struct ConsoleFramer<C, S> {
    channel: C,
    surface: S,
    indent: Box<dyn IndentCalculator>,
    session: InputSession,
    prompt: PromptState,
    /// Last line of the command whose response is outstanding.
    in_flight: Option<String>,
    queued: VecDeque<PendingCommand>,
}

impl<C: InterpreterChannel, S: InputSurface> ConsoleFramer<C, S> {
    pub fn new(channel: C, surface: S, indent: Box<dyn IndentCalculator>) -> Self {
        Self {
            channel,
            surface,
            indent,
            session: InputSession::new(),
            prompt: PromptState::default(),
            in_flight: None,
            queued: VecDeque::new(),
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn indent(&self) -> &dyn IndentCalculator {
        self.indent.as_ref()
    }

    pub fn session(&self) -> &InputSession {
        &self.session
    }

    pub fn prompt(&self) -> PromptState {
        self.prompt
    }

    /// True while a dispatched command has not reported back.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || !self.queued.is_empty()
    }

    /// Feeds user text, possibly several lines (a paste).
    ///
    /// With `exec_anyway`, a call that opened a block still executes: the
    /// buffer is flushed as if the user had closed it with a blank line.
    pub fn submit(&mut self, text: &str, exec_anyway: bool) {
        let depth_before = self.session.indent_depth();
        if text.is_empty() {
            self.process_one_line(text);
        } else {
            for line in text.lines() {
                self.process_one_line(line);
            }
        }
        if exec_anyway && self.session.indent_depth() > 0 && depth_before == 0 {
            self.finish_execution();
        }
    }

    pub fn process_one_line(&mut self, line: &str) {
        let indent_size = self.indent.indent_of(line);
        let line = line.trim_end();
        if line.is_empty() {
            self.dispatch_line("\n");
        } else if indent_size == 0
            && indent_size < self.session.indent_depth()
            && !self.indent.is_block_opener(line)
            && !self.channel.is_waiting_for_input()
            && self.session.multiline().is_none()
        {
            // Back at column zero mid-block: close the block first.
            tracing::debug!(depth = self.session.indent_depth(), "Dedent to top level");
            self.dispatch_line("\n");
            self.dispatch_line(line);
        } else {
            self.dispatch_line(line);
        }
    }

    /// Core transition: buffers `line` and decides what it means.
    pub fn dispatch_line(&mut self, line: &str) {
        self.session.append_line(line);

        if self.channel.is_waiting_for_input() {
            // Input for the running program, not a statement.
            self.send_buffer(line);
            return;
        }

        let class = classify_line(
            line,
            self.session.multiline(),
            self.indent.as_ref(),
            self.session.indent_depth(),
        );
        let class = match class {
            LineClass::MultilineContent => return,
            LineClass::MultilineOpener(style) => {
                tracing::debug!(?style, "Entering multi-line string");
                self.session.set_multiline(Some(style));
                self.surface.set_plain_text(true);
                self.transition(PromptIntent::EnterMultiline);
                return;
            }
            LineClass::MultilineCloser => {
                tracing::debug!("Leaving multi-line string");
                self.session.set_multiline(None);
                self.surface.set_plain_text(false);
                self.transition(PromptIntent::LeaveMultiline);
                // The closing line is still a statement line, but a string
                // closed inside a block cannot end that block.
                let depth = self.session.indent_depth();
                match classify_statement(line, self.indent.as_ref(), depth) {
                    LineClass::IndentNeutral if depth > 0 => LineClass::IndentIncreasing { depth },
                    other => other,
                }
            }
            other => other,
        };

        match class {
            LineClass::ContinuationBackslash => {
                self.transition(PromptIntent::RequestMore);
            }
            LineClass::IndentIncreasing { depth } => {
                self.request_more(depth);
            }
            LineClass::Blank if self.session.is_blank() && self.blank_closes_nothing() => {
                // Nothing typed: no command to run.
            }
            _ => self.send_buffer(line),
        }
    }

    /// Forces the pending statement to complete, then clears the input.
    pub fn finish_execution(&mut self) {
        if self.session.has_buffer() {
            self.dispatch_line("\n");
        }
        self.surface.clear_input();
    }

    /// Completion of the command in flight.
    pub fn on_response(&mut self, response: InterpreterResponse) {
        let Some(last_line) = self.in_flight.take() else {
            tracing::debug!("Response with no command in flight");
            return;
        };
        tracing::debug!(more = response.more, "Command completed");

        if response.more {
            self.transition(PromptIntent::RequestMore);
            self.surface.request_more_input();
            if self.session.indent_depth() == 0 {
                let depth = self.indent.indent_of(&last_line) + self.indent.indent_unit();
                self.session.set_indent_depth(depth);
                let fill = self.indent.fill_indent(depth);
                self.surface.insert_auto_indent(&fill);
            }
        } else {
            if !self.channel.is_waiting_for_input() {
                self.ordinary_prompt();
            }
            self.session.set_indent_depth(0);
        }

        if let Some(next) = self.queued.pop_front() {
            self.transition(PromptIntent::StartExecuting);
            self.send(next);
        }
    }

    /// Drops all input state; used when the interpreter goes away.
    pub fn reset(&mut self) {
        self.session.reset();
        self.in_flight = None;
        self.queued.clear();
        self.surface.set_plain_text(false);
        self.surface.clear_input();
        self.transition(PromptIntent::Reset);
    }

    /// A blank line only matters when the interpreter holds an open
    /// statement. While a command is in flight the depth still belongs to
    /// the block just sent.
    fn blank_closes_nothing(&self) -> bool {
        self.session.indent_depth() == 0 || self.in_flight.is_some()
    }

    fn request_more(&mut self, depth: usize) {
        self.session.set_indent_depth(depth);
        let fill = self.indent.fill_indent(depth);
        self.surface.insert_auto_indent(&fill);
        self.transition(PromptIntent::RequestMore);
        self.surface.request_more_input();
    }

    fn send_buffer(&mut self, last_line: &str) {
        let command = self.session.take_command();

        if self.channel.is_waiting_for_input() {
            tracing::debug!(len = command.len(), "Sending stdin line");
            if let Err(err) = self.channel.execute(command) {
                self.report(err);
                return;
            }
            // Interpreters rarely announce that stdin was consumed.
            if !self.channel.is_waiting_for_input() {
                self.session.set_indent_depth(0);
                self.transition(PromptIntent::StdinConsumed);
            }
            return;
        }

        self.transition(PromptIntent::StartExecuting);
        let pending = PendingCommand {
            command,
            last_line: last_line.to_string(),
        };
        if self.in_flight.is_some() {
            tracing::debug!(queued = self.queued.len() + 1, "Command queued behind running one");
            self.queued.push_back(pending);
            return;
        }
        self.send(pending);
    }

    fn send(&mut self, pending: PendingCommand) {
        tracing::debug!(len = pending.command.len(), "Dispatching command");
        match self.channel.execute(pending.command) {
            Ok(()) => self.in_flight = Some(pending.last_line),
            Err(err) => {
                self.queued.clear();
                self.session.set_indent_depth(0);
                self.transition(PromptIntent::Reset);
                self.report(err);
            }
        }
    }

    fn ordinary_prompt(&mut self) {
        let still_executing = self.channel.is_executing() || !self.queued.is_empty();
        self.transition(PromptIntent::CommandFinished { still_executing });
    }

    fn report(&mut self, err: ChannelError) {
        tracing::warn!("Interpreter channel failed: {}", err);
        let err = ConsoleError::from(err);
        self.surface.show_hint(&err.to_string());
    }

    fn transition(&mut self, intent: PromptIntent) {
        let next = PromptReducer::reduce(self.prompt, intent);
        if next == self.prompt {
            return;
        }
        tracing::trace!(from = ?self.prompt, to = ?next, "Prompt transition");
        self.prompt = next;
        self.surface.set_prompt(next);
        if next != PromptState::Executing {
            self.surface.scroll_to_end();
        }
    }
}

impl<C: InterpreterChannel, S: InputSurface> ConsoleListener for ConsoleFramer<C, S> {
    fn on_command_executed(&mut self) {
        self.ordinary_prompt();
    }

    fn on_input_requested(&mut self) {
        self.transition(PromptIntent::InputRequested);
        // Keeps an unindented stdin line from reading as a dedent.
        self.session.set_indent_depth(1);
    }

    fn on_prompt_requested(&mut self, state: PromptState) {
        self.transition(PromptIntent::Show(state));
    }
}
