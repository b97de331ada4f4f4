use thiserror::Error;

use crate::channel::ChannelError;

/// Reasons a console refuses or fails to run input.
///
/// All are recoverable; the console keeps accepting input afterwards.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console is not enabled.")]
    ConsoleNotEnabled,

    #[error("Previous command is still running. Please wait or press Ctrl+C in console to interrupt.")]
    PreviousCommandRunning,

    #[error("Can't execute the command")]
    CannotExecute,

    #[error("Interpreter channel error: {0}")]
    Channel(#[from] ChannelError),
}
