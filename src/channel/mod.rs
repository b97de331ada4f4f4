//! Link to the interpreter that executes framed commands.
//!
//! `execute` only hands a command off; the outcome and every other
//! notification arrive later as [`ChannelEvent`]s on an mpsc queue that the
//! console task drains, so all framer state is written from one place.

mod process;
mod protocol;

pub use process::ProcessChannel;
pub use protocol::{WorkerEvent, WorkerPrompt, WorkerRequest};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::console::PromptState;

/// Errors raised by an interpreter channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Interpreter channel disconnected")]
    Disconnected,

    #[error("Failed to spawn interpreter '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interpreter I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interpreter protocol error: {0}")]
    Protocol(String),
}

/// Outcome of one executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterResponse {
    /// The interpreter needs more lines to complete the statement.
    pub more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Notifications delivered by a channel, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The interpreter finished starting up and accepts commands.
    Ready,
    /// Completion of the command handed to `execute`.
    Response(InterpreterResponse),
    /// The interpreter reports that a command ran to the end.
    CommandExecuted,
    /// The running program reads from stdin.
    InputRequested,
    /// The interpreter switched to help mode or a pager.
    PromptRequested(PromptState),
    /// Program output.
    Output { stream: OutputStream, text: String },
    /// The interpreter went away.
    Exited { code: Option<i32> },
}

/// Interpreter side of the console.
pub trait InterpreterChannel {
    /// Sends `command` for execution, or as a stdin line when the channel
    /// is waiting for input. Completion is reported via
    /// [`ChannelEvent::Response`].
    fn execute(&mut self, command: String) -> Result<(), ChannelError>;

    fn is_executing(&self) -> bool;

    fn is_waiting_for_input(&self) -> bool;

    /// Asks the interpreter to abort the running command.
    fn interrupt(&mut self) -> Result<(), ChannelError>;
}

/// Receives interpreter notifications that are not tied to one command.
pub trait ConsoleListener {
    fn on_command_executed(&mut self);

    fn on_input_requested(&mut self);

    fn on_prompt_requested(&mut self, state: PromptState);
}
