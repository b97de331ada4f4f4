//! Sources of typed lines for the runtime loop.
//!
//! Both sources deliver [`InputEvent`]s over an mpsc queue so the loop can
//! `select!` on them next to channel events.

use std::io;
use std::sync::mpsc as std_mpsc;
use std::thread;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl+C pressed in the line editor.
    Interrupted,
    Eof,
}

struct ReadRequest {
    prompt: String,
    prefill: String,
}

/// Typed lines, either from a line editor on the terminal or from any
/// buffered reader (pipes, files, tests).
pub struct ConsoleInput {
    events: mpsc::UnboundedReceiver<InputEvent>,
    /// Present when a line editor shows prompts and pre-filled text itself.
    editor: Option<mpsc::UnboundedSender<ReadRequest>>,
    reading: bool,
}

impl ConsoleInput {
    /// Lines from `reader` as they arrive. The caller prints prompts.
    pub fn lines<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, events) = mpsc::unbounded_channel();
        tokio::spawn(read_lines(reader, tx));
        Self {
            events,
            editor: None,
            reading: false,
        }
    }

    /// Interactive editor on the controlling terminal.
    ///
    /// The editor lives on a dedicated thread and performs one read per
    /// [`ConsoleInput::begin_read`].
    pub fn editor() -> io::Result<Self> {
        let (tx, events) = mpsc::unbounded_channel();
        let (requests, request_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = std_mpsc::channel();
        thread::Builder::new()
            .name("line-editor".to_string())
            .spawn(move || match DefaultEditor::new() {
                Ok(editor) => {
                    let _ = ready_tx.send(Ok(()));
                    edit_lines(editor, request_rx, tx);
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err.to_string()));
                }
            })?;
        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                events,
                editor: Some(requests),
                reading: false,
            }),
            Ok(Err(message)) => Err(io::Error::other(message)),
            Err(_) => Err(io::Error::other("line editor thread exited")),
        }
    }

    /// True when pre-filled text is shown to the user for editing.
    pub fn edits_prefill(&self) -> bool {
        self.editor.is_some()
    }

    /// A line editor read is in progress.
    pub fn is_reading(&self) -> bool {
        self.reading
    }

    /// Starts an editor read showing `prompt` with `prefill` already typed.
    ///
    /// No-op for reader input or while a read is in progress.
    pub fn begin_read(&mut self, prompt: &str, prefill: String) {
        let Some(editor) = &self.editor else {
            return;
        };
        if self.reading {
            return;
        }
        let request = ReadRequest {
            prompt: prompt.to_string(),
            prefill,
        };
        if editor.send(request).is_err() {
            tracing::warn!("Line editor stopped");
            return;
        }
        self.reading = true;
    }

    /// Next typed line or control event. Cancel safe.
    pub async fn next(&mut self) -> InputEvent {
        let event = self.events.recv().await.unwrap_or(InputEvent::Eof);
        self.reading = false;
        event
    }
}

async fn read_lines<R>(reader: R, events: mpsc::UnboundedSender<InputEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => InputEvent::Line(line),
            Ok(None) => InputEvent::Eof,
            Err(err) => {
                tracing::warn!("Failed to read input: {}", err);
                InputEvent::Eof
            }
        };
        let done = event == InputEvent::Eof;
        if events.send(event).is_err() || done {
            return;
        }
    }
}

fn edit_lines(
    mut editor: DefaultEditor,
    mut requests: mpsc::UnboundedReceiver<ReadRequest>,
    events: mpsc::UnboundedSender<InputEvent>,
) {
    while let Some(request) = requests.blocking_recv() {
        let event = match editor.readline_with_initial(&request.prompt, (&request.prefill, "")) {
            Ok(line) => {
                if let Err(err) = editor.add_history_entry(line.as_str()) {
                    tracing::debug!("History entry dropped: {}", err);
                }
                InputEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
            Err(ReadlineError::Eof) => InputEvent::Eof,
            Err(err) => {
                tracing::warn!("Line editor failed: {}", err);
                InputEvent::Eof
            }
        };
        let done = event == InputEvent::Eof;
        if events.send(event).is_err() || done {
            break;
        }
    }
    tracing::debug!("Line editor thread done");
}

/// Line editor on a terminal, plain line reading otherwise.
pub fn stdin_input() -> ConsoleInput {
    use std::io::IsTerminal;

    if io::stdin().is_terminal() {
        match ConsoleInput::editor() {
            Ok(input) => return input,
            Err(err) => tracing::warn!("Line editor unavailable, reading plain lines: {}", err),
        }
    }
    ConsoleInput::lines(tokio::io::BufReader::new(tokio::io::stdin()))
}
