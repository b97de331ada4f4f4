//! JSON-lines wire format spoken with the worker process.
//!
//! One JSON object per line in each direction, tagged by `type`.

use serde::{Deserialize, Serialize};

use super::{ChannelEvent, InterpreterResponse, OutputStream};
use crate::console::PromptState;

/// Messages written to the worker's stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerRequest {
    Execute { id: u64, code: String },
    Stdin { text: String },
    Interrupt,
}

/// Messages read from the worker's stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerEvent {
    Ready,
    Result { id: u64, more: bool },
    CommandExecuted,
    InputRequested,
    Prompt { state: WorkerPrompt },
    Output { stream: OutputStream, text: String },
}

/// Prompts the worker may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerPrompt {
    Ordinary,
    Help,
    Paging,
}

impl From<WorkerPrompt> for PromptState {
    fn from(prompt: WorkerPrompt) -> Self {
        match prompt {
            WorkerPrompt::Ordinary => PromptState::Ordinary,
            WorkerPrompt::Help => PromptState::Help,
            WorkerPrompt::Paging => PromptState::Paging,
        }
    }
}

impl WorkerRequest {
    /// Serialized form, newline-terminated.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

impl WorkerEvent {
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim_end())
    }

    /// Console-facing event; `Result` ids are checked by the caller.
    pub fn into_channel_event(self) -> ChannelEvent {
        match self {
            WorkerEvent::Ready => ChannelEvent::Ready,
            WorkerEvent::Result { more, .. } => {
                ChannelEvent::Response(InterpreterResponse { more })
            }
            WorkerEvent::CommandExecuted => ChannelEvent::CommandExecuted,
            WorkerEvent::InputRequested => ChannelEvent::InputRequested,
            WorkerEvent::Prompt { state } => ChannelEvent::PromptRequested(state.into()),
            WorkerEvent::Output { stream, text } => ChannelEvent::Output { stream, text },
        }
    }
}
