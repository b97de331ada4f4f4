use super::intent::Intent;
use super::state::State;

/// The only place where state transitions happen.
///
/// Must be pure: `(State, Intent) -> State`.
pub trait Reducer {
    type State: State;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
