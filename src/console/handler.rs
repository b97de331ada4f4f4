use crate::channel::{ChannelEvent, ConsoleListener, InterpreterChannel};

use super::error::ConsoleError;
use super::framer::ConsoleFramer;
use super::history::History;
use super::indent::IndentCalculator;
use super::prompt::PromptState;
use super::surface::InputSurface;

/// Entry point for user input and channel events.
///
/// Owns the framer and decides whether input may run at all: the console
/// must be enabled, and only one command runs at a time unless the running
/// program is waiting for stdin.
pub struct Console<C, S> {
    framer: ConsoleFramer<C, S>,
    history: History,
    enabled: bool,
}

impl<C: InterpreterChannel, S: InputSurface> Console<C, S> {
    pub fn new(channel: C, surface: S, indent: Box<dyn IndentCalculator>, history_size: usize) -> Self {
        Self {
            framer: ConsoleFramer::new(channel, surface, indent),
            history: History::new(history_size),
            enabled: false,
        }
    }

    pub fn framer(&self) -> &ConsoleFramer<C, S> {
        &self.framer
    }

    pub fn framer_mut(&mut self) -> &mut ConsoleFramer<C, S> {
        &mut self.framer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn prompt(&self) -> PromptState {
        self.framer.prompt()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::info!(enabled, "Console enablement changed");
        }
        self.enabled = enabled;
    }

    /// New input may run: nothing is executing, or the running program
    /// waits for stdin.
    pub fn can_execute_now(&self) -> bool {
        let channel = self.framer.channel();
        !channel.is_executing() || channel.is_waiting_for_input()
    }

    /// Explicit "run" request for the whole typed text.
    ///
    /// Executes even if the text leaves a block open.
    pub fn run_execute_action(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.check_can_execute()?;
        // Pager answers are not commands worth recalling.
        if !self.framer.prompt().is_paging() {
            self.history.add(text);
        }
        self.framer.submit(text, true);
        Ok(())
    }

    /// One line typed and confirmed with Enter.
    pub fn enter(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.check_can_execute()?;
        if !self.framer.prompt().is_paging() {
            self.history.add(line);
        }
        self.framer.submit(line, false);
        Ok(())
    }

    /// Message explaining why input cannot run right now.
    pub fn cant_execute_message(&self) -> String {
        let reason = if !self.enabled {
            ConsoleError::ConsoleNotEnabled
        } else if !self.can_execute_now() {
            ConsoleError::PreviousCommandRunning
        } else {
            ConsoleError::CannotExecute
        };
        reason.to_string()
    }

    /// Aborts the running command and flushes any half-typed statement.
    pub fn interrupt(&mut self) -> Result<(), ConsoleError> {
        tracing::info!("Interrupt requested");
        self.framer.channel_mut().interrupt()?;
        self.framer.finish_execution();
        Ok(())
    }

    pub fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Ready => self.set_enabled(true),
            ChannelEvent::Response(response) => self.framer.on_response(response),
            ChannelEvent::CommandExecuted => self.framer.on_command_executed(),
            ChannelEvent::InputRequested => self.framer.on_input_requested(),
            ChannelEvent::PromptRequested(state) => self.framer.on_prompt_requested(state),
            ChannelEvent::Output { stream, text } => {
                self.framer.surface_mut().write_output(stream, &text);
            }
            ChannelEvent::Exited { code } => {
                tracing::warn!(?code, "Interpreter exited");
                self.set_enabled(false);
                self.framer.reset();
                let message = match code {
                    Some(code) => format!("Interpreter exited with code {}", code),
                    None => "Interpreter exited".to_string(),
                };
                self.framer.surface_mut().show_hint(&message);
            }
        }
    }

    fn check_can_execute(&self) -> Result<(), ConsoleError> {
        if !self.enabled {
            return Err(ConsoleError::ConsoleNotEnabled);
        }
        if !self.can_execute_now() {
            return Err(ConsoleError::PreviousCommandRunning);
        }
        Ok(())
    }
}
