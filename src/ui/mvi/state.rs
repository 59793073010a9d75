/// Marker trait for dialog state.
///
/// `Default` is the hidden state, so `std::mem::take` can move the state
/// into the reducer.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
