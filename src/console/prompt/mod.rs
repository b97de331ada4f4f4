//! Prompt feature module.
//!
//! - `state.rs` - the six prompt states and their rendering
//! - `intent.rs` - events that move the prompt
//! - `reducer.rs` - pure transitions

mod intent;
mod reducer;
mod state;

pub use intent::PromptIntent;
pub use reducer::PromptReducer;
pub use state::PromptState;
