use crate::config::PromptConfig;
use crate::mvi::State;

/// Prompt shown in front of the input line.
///
/// Derived from the framer's session and the channel's status; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    /// Ready for a new statement.
    #[default]
    Ordinary,
    /// The current statement needs more lines (open block, open string,
    /// trailing backslash).
    ContinuationIndent,
    /// A command is running in the interpreter.
    Executing,
    /// The running program is reading from stdin.
    AwaitingStdin,
    /// The interpreter is paging long output.
    Paging,
    /// The interpreter's interactive help is active.
    Help,
}

impl State for PromptState {}

impl PromptState {
    /// Prompt text for this state.
    pub fn render<'a>(&self, prompts: &'a PromptConfig) -> &'a str {
        match self {
            PromptState::Ordinary => &prompts.ordinary,
            PromptState::ContinuationIndent => &prompts.continuation,
            PromptState::Executing => &prompts.executing,
            PromptState::AwaitingStdin => &prompts.input,
            PromptState::Paging => &prompts.paging,
            PromptState::Help => &prompts.help,
        }
    }

    pub fn is_paging(&self) -> bool {
        matches!(self, Self::Paging)
    }

    /// True when the user can type into the console.
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Executing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ordinary() {
        assert_eq!(PromptState::default(), PromptState::Ordinary);
    }

    #[test]
    fn render_uses_configured_strings() {
        let prompts = PromptConfig::default();
        assert_eq!(PromptState::Ordinary.render(&prompts), ">>> ");
        assert_eq!(PromptState::ContinuationIndent.render(&prompts), "... ");
        assert_eq!(PromptState::Executing.render(&prompts), "");
        assert_eq!(PromptState::Help.render(&prompts), "help> ");
    }

    #[test]
    fn only_executing_blocks_input() {
        assert!(!PromptState::Executing.accepts_input());
        assert!(PromptState::AwaitingStdin.accepts_input());
        assert!(PromptState::Paging.accepts_input());
    }
}
