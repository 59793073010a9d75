//! Reducer for the checkout dialog.

use crate::ui::mvi::Reducer;

use super::intent::CheckoutIntent;
use super::state::CheckoutDialogState;

/// Checkout dialog transitions:
///
/// ```text
/// Hidden ─Open─→ Review ─Confirmed─→ Processing ─Completed─→ Success
///                   │                    │
///                   └──────Rejected──────┴──→ Failed
/// ```
///
/// `Close` returns to `Hidden` from anywhere except `Processing`.
pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = CheckoutDialogState;
    type Intent = CheckoutIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CheckoutIntent::Open {
                lines,
                total,
                credits,
            } => match state {
                processing @ CheckoutDialogState::Processing { .. } => processing,
                _ => CheckoutDialogState::Review {
                    lines,
                    total,
                    credits,
                },
            },

            CheckoutIntent::Confirmed => match state {
                CheckoutDialogState::Review { lines, total, .. } => {
                    CheckoutDialogState::Processing {
                        lines,
                        total,
                        animation_tick: 0,
                    }
                }
                other => other,
            },

            CheckoutIntent::AnimationTick => match state {
                CheckoutDialogState::Processing {
                    lines,
                    total,
                    animation_tick,
                } => CheckoutDialogState::Processing {
                    lines,
                    total,
                    animation_tick: animation_tick.wrapping_add(1),
                },
                other => other,
            },

            CheckoutIntent::Completed { summary } => match state {
                CheckoutDialogState::Processing { .. } => CheckoutDialogState::Success { summary },
                other => other,
            },

            CheckoutIntent::Rejected { message } => match state {
                CheckoutDialogState::Hidden => CheckoutDialogState::Hidden,
                _ => CheckoutDialogState::Failed { message },
            },

            CheckoutIntent::Close => match state {
                processing @ CheckoutDialogState::Processing { .. } => processing,
                _ => CheckoutDialogState::Hidden,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::checkout::state::CheckoutLine;

    fn open() -> CheckoutIntent {
        CheckoutIntent::Open {
            lines: vec![CheckoutLine {
                name: "Glow".into(),
                tag: "New".into(),
                cost: 250,
            }],
            total: 250,
            credits: 500,
        }
    }

    #[test]
    fn tick_outside_processing_is_ignored() {
        let state = CheckoutReducer::reduce(CheckoutDialogState::Hidden, CheckoutIntent::AnimationTick);
        assert_eq!(state, CheckoutDialogState::Hidden);
    }

    #[test]
    fn tick_advances_spinner() {
        let state = CheckoutReducer::reduce(CheckoutDialogState::Hidden, open());
        let state = CheckoutReducer::reduce(state, CheckoutIntent::Confirmed);
        let state = CheckoutReducer::reduce(state, CheckoutIntent::AnimationTick);
        assert!(matches!(
            state,
            CheckoutDialogState::Processing {
                animation_tick: 1,
                ..
            }
        ));
    }
}
