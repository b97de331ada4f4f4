//! Console input framing.
//!
//! - `framer` - line-by-line state machine (buffering, indentation,
//!   multi-line strings, dispatch)
//! - `handler` - enablement, busy checks, history, channel events
//! - `prompt` - prompt states and their reducer
//! - `indent` - indentation rules
//! - `surface` - front-end the framer drives

mod classify;
mod error;
mod framer;
mod handler;
mod history;
mod indent;
pub mod prompt;
mod session;
mod surface;

pub use classify::{classify_line, LineClass};
pub use error::ConsoleError;
pub use framer::ConsoleFramer;
pub use handler::Console;
pub use history::History;
pub use indent::{IndentCalculator, PythonIndent};
pub use prompt::PromptState;
pub use session::{InputSession, QuoteStyle};
pub use surface::{merge_prefix, InputSurface, TerminalSurface};
