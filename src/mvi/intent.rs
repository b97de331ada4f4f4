/// Marker trait for transition requests.
///
/// Intents come from the framer (a line was classified) or from the
/// interpreter channel (a command finished, stdin was requested).
pub trait Intent: Send + 'static {}
