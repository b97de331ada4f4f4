//! State/intent/reducer primitives.
//!
//! Console state that can be expressed as a pure transition (the prompt
//! shown to the user) goes through these traits; side effects such as
//! talking to the interpreter stay with the caller.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Surface
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
