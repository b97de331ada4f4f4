use std::io::{self, Write};

use tokio::sync::mpsc;

use crate::channel::{ChannelEvent, InterpreterChannel, ProcessChannel};
use crate::config::ConfigStore;
use crate::console::{merge_prefix, Console, InputSurface, PythonIndent, TerminalSurface};
use crate::input::{self, ConsoleInput, InputEvent};

/// Runs the terminal console against the configured worker until input
/// ends (and the last command finished) or the worker exits.
pub async fn run(store: ConfigStore) -> anyhow::Result<()> {
    let config = store.get();
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let channel = ProcessChannel::spawn(&config.worker, event_tx)?;
    let surface = TerminalSurface::new(io::stdout(), config.prompts.clone());
    let indent = Box::new(PythonIndent::from(&config.console));
    let mut console = Console::new(channel, surface, indent, config.console.history_size);

    let mut input = input::stdin_input();
    drive(&mut console, &mut events, &mut input).await?;
    Ok(())
}

/// Event loop: typed lines and channel events are applied to the console
/// one at a time, from this task only.
pub async fn drive<C, W>(
    console: &mut Console<C, TerminalSurface<W>>,
    events: &mut mpsc::UnboundedReceiver<ChannelEvent>,
    input: &mut ConsoleInput,
) -> io::Result<()>
where
    C: InterpreterChannel,
    W: Write,
{
    let mut input_open = true;
    let mut exited = false;

    loop {
        if input_open && !exited && console.is_enabled() && console.prompt().accepts_input() {
            let surface = console.framer_mut().surface_mut();
            if input.edits_prefill() {
                if !input.is_reading() {
                    let prompt = surface.prompt_text().to_string();
                    input.begin_read(&prompt, surface.take_input_prefix());
                }
            } else {
                surface.render_prompt()?;
            }
        }

        tokio::select! {
            event = input.next(), if input_open => match event {
                // The worker is gone; nothing can run the line.
                InputEvent::Line(_) if exited => {}
                InputEvent::Line(line) => submit_line(console, line, input.edits_prefill()),
                InputEvent::Interrupted => interrupt(console),
                InputEvent::Eof => {
                    tracing::debug!("Input closed");
                    input_open = false;
                }
            },
            event = events.recv(), if !exited => match event {
                Some(event @ ChannelEvent::Exited { .. }) => {
                    console.handle_event(event);
                    exited = true;
                }
                Some(event) => console.handle_event(event),
                None => exited = true,
            },
            _ = tokio::signal::ctrl_c() => interrupt(console),
        }

        // A pending editor read owns the terminal until it returns.
        if exited && !input.is_reading() {
            break;
        }
        if !input_open && !console.framer().is_busy() {
            break;
        }
    }

    Ok(())
}

fn submit_line<C, W>(console: &mut Console<C, TerminalSurface<W>>, line: String, edited: bool)
where
    C: InterpreterChannel,
    W: Write,
{
    let surface = console.framer_mut().surface_mut();
    surface.line_submitted();
    let prefix = surface.take_input_prefix();
    let text = if edited {
        line
    } else {
        merge_prefix(&prefix, &line, console.framer().indent())
    };
    if let Err(err) = console.enter(&text) {
        tracing::debug!("Input refused: {}", err);
        console.framer_mut().surface_mut().show_hint(&err.to_string());
    }
}

fn interrupt<C, W>(console: &mut Console<C, TerminalSurface<W>>)
where
    C: InterpreterChannel,
    W: Write,
{
    if let Err(err) = console.interrupt() {
        tracing::warn!("Interrupt failed: {}", err);
        console.framer_mut().surface_mut().show_hint(&err.to_string());
    }
}
