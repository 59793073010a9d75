use super::intent::Intent;
use super::state::UiState;

/// The only place a dialog state changes.
///
/// `reduce` must be pure: any work against the store happens in the caller,
/// which reports the outcome back as an intent.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
