use crate::mvi::Reducer;

use super::intent::PromptIntent;
use super::state::PromptState;

/// Prompt transitions.
///
/// Pure; the framer pushes the resulting state to the input surface.
pub struct PromptReducer;

impl Reducer for PromptReducer {
    type State = PromptState;
    type Intent = PromptIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PromptIntent::RequestMore | PromptIntent::EnterMultiline => {
                PromptState::ContinuationIndent
            }
            PromptIntent::StartExecuting => PromptState::Executing,
            PromptIntent::CommandFinished { still_executing } => {
                if still_executing {
                    PromptState::Executing
                } else {
                    PromptState::Ordinary
                }
            }
            PromptIntent::InputRequested => match state {
                // Help mode reads its own input; keep its prompt.
                PromptState::AwaitingStdin | PromptState::Help => state,
                _ => PromptState::AwaitingStdin,
            },
            PromptIntent::StdinConsumed
            | PromptIntent::LeaveMultiline
            | PromptIntent::Reset => PromptState::Ordinary,
            PromptIntent::Show(next) => next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_more_moves_to_continuation() {
        let new = PromptReducer::reduce(PromptState::Ordinary, PromptIntent::RequestMore);
        assert_eq!(new, PromptState::ContinuationIndent);
    }

    #[test]
    fn command_finished_respects_busy_channel() {
        let new = PromptReducer::reduce(
            PromptState::Executing,
            PromptIntent::CommandFinished {
                still_executing: true,
            },
        );
        assert_eq!(new, PromptState::Executing);

        let new = PromptReducer::reduce(
            PromptState::Executing,
            PromptIntent::CommandFinished {
                still_executing: false,
            },
        );
        assert_eq!(new, PromptState::Ordinary);
    }

    #[test]
    fn input_requested_keeps_help_prompt() {
        let new = PromptReducer::reduce(PromptState::Help, PromptIntent::InputRequested);
        assert_eq!(new, PromptState::Help);
    }

    #[test]
    fn input_requested_from_executing() {
        let new = PromptReducer::reduce(PromptState::Executing, PromptIntent::InputRequested);
        assert_eq!(new, PromptState::AwaitingStdin);
    }

    #[test]
    fn stdin_consumed_returns_to_ordinary() {
        let new = PromptReducer::reduce(PromptState::AwaitingStdin, PromptIntent::StdinConsumed);
        assert_eq!(new, PromptState::Ordinary);
    }

    #[test]
    fn multiline_round_trip() {
        let state = PromptReducer::reduce(PromptState::Ordinary, PromptIntent::EnterMultiline);
        assert_eq!(state, PromptState::ContinuationIndent);
        let state = PromptReducer::reduce(state, PromptIntent::LeaveMultiline);
        assert_eq!(state, PromptState::Ordinary);
    }

    #[test]
    fn show_sets_interpreter_prompt() {
        let new = PromptReducer::reduce(
            PromptState::Executing,
            PromptIntent::Show(PromptState::Paging),
        );
        assert_eq!(new, PromptState::Paging);
    }
}
