/// Marker trait for reducer-owned state.
///
/// `Default` is the state a fresh console starts in; `PartialEq` lets the
/// caller skip surface updates when a transition is a no-op.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
