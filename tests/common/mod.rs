//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use replframe::channel::{
    ChannelError, ChannelEvent, InterpreterChannel, InterpreterResponse, OutputStream,
};
use replframe::console::{Console, InputSurface, PromptState, PythonIndent};
use tokio::sync::mpsc;

/// In-memory interpreter channel.
///
/// Records what the framer hands off; tests flip `executing` and
/// `waiting_for_input` to play the interpreter.
#[derive(Debug, Default)]
pub struct MockChannel {
    pub commands: Vec<String>,
    pub stdin: Vec<String>,
    pub executing: bool,
    pub waiting_for_input: bool,
    pub interrupts: usize,
    pub fail: bool,
    /// When set, every command completes at once with `more: false`.
    pub auto_respond: Option<mpsc::UnboundedSender<ChannelEvent>>,
}

impl InterpreterChannel for MockChannel {
    fn execute(&mut self, command: String) -> Result<(), ChannelError> {
        if self.fail {
            return Err(ChannelError::Disconnected);
        }
        if self.waiting_for_input {
            self.waiting_for_input = false;
            self.stdin.push(command);
            return Ok(());
        }
        self.commands.push(command);
        match &self.auto_respond {
            Some(events) => {
                let _ = events.send(ChannelEvent::Response(InterpreterResponse { more: false }));
            }
            None => self.executing = true,
        }
        Ok(())
    }

    fn is_executing(&self) -> bool {
        self.executing
    }

    fn is_waiting_for_input(&self) -> bool {
        self.waiting_for_input
    }

    fn interrupt(&mut self) -> Result<(), ChannelError> {
        if self.fail {
            return Err(ChannelError::Disconnected);
        }
        self.interrupts += 1;
        Ok(())
    }
}

/// Input surface that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub prompts: Vec<PromptState>,
    pub auto_indents: Vec<String>,
    pub hints: Vec<String>,
    pub output: String,
    pub more_requests: usize,
    pub clears: usize,
    pub plain_text: bool,
}

impl InputSurface for RecordingSurface {
    fn request_more_input(&mut self) {
        self.more_requests += 1;
    }

    fn set_prompt(&mut self, state: PromptState) {
        self.prompts.push(state);
    }

    fn insert_auto_indent(&mut self, text: &str) {
        self.auto_indents.push(text.to_string());
    }

    fn clear_input(&mut self) {
        self.clears += 1;
    }

    fn scroll_to_end(&mut self) {}

    fn set_plain_text(&mut self, enabled: bool) {
        self.plain_text = enabled;
    }

    fn show_hint(&mut self, message: &str) {
        self.hints.push(message.to_string());
    }

    fn write_output(&mut self, _stream: OutputStream, text: &str) {
        self.output.push_str(text);
    }
}

pub type TestConsole = Console<MockChannel, RecordingSurface>;

/// Console with default indentation, not yet enabled.
pub fn new_console() -> TestConsole {
    Console::new(
        MockChannel::default(),
        RecordingSurface::default(),
        Box::new(PythonIndent::default()),
        100,
    )
}

/// Console that already received the interpreter's ready event.
pub fn ready_console() -> TestConsole {
    let mut console = new_console();
    console.handle_event(ChannelEvent::Ready);
    console
}

/// Plays the interpreter finishing the command in flight.
pub fn complete(console: &mut TestConsole, more: bool) {
    console.framer_mut().channel_mut().executing = false;
    console.handle_event(ChannelEvent::Response(InterpreterResponse { more }));
}

pub fn commands(console: &TestConsole) -> Vec<String> {
    console.framer().channel().commands.clone()
}

/// Feeds each line as if typed and confirmed with Enter.
pub fn type_lines(console: &mut TestConsole, lines: &[&str]) {
    for line in lines {
        console.framer_mut().submit(line, false);
    }
}
