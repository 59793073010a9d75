mod dialog;
mod intent;
mod reducer;
mod state;

pub(crate) use dialog::price_label;
pub use dialog::render_checkout_dialog;
pub use intent::CheckoutIntent;
pub use reducer::CheckoutReducer;
pub use state::{CheckoutDialogState, CheckoutLine, CheckoutSummary};
