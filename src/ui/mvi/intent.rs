/// Marker trait for dialog intents: key presses translated into actions, or
/// results reported back from the store.
pub trait Intent: Send + 'static {}
