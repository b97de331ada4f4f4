use crate::mvi::Intent;

use super::state::PromptState;

/// Events that can move the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptIntent {
    /// The statement is incomplete; ask for another line.
    RequestMore,

    /// A command was handed to the interpreter.
    StartExecuting,

    /// The interpreter finished a command (or reported it did).
    /// The channel may still be busy with a queued command.
    CommandFinished { still_executing: bool },

    /// The running program wants a line of stdin.
    InputRequested,

    /// A stdin line was consumed without a prompt change from the interpreter.
    StdinConsumed,

    /// A triple-quoted string was opened.
    EnterMultiline,

    /// The open triple-quoted string was closed.
    LeaveMultiline,

    /// Interpreter-driven prompt (help mode, pager).
    Show(PromptState),

    /// Back to a fresh prompt.
    Reset,
}

impl Intent for PromptIntent {}
