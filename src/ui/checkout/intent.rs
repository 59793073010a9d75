//! Intents for the checkout dialog.

use crate::ui::mvi::Intent;

use super::state::{CheckoutLine, CheckoutSummary};

#[derive(Debug, Clone)]
pub enum CheckoutIntent {
    /// Show the order for review.
    Open {
        lines: Vec<CheckoutLine>,
        total: u64,
        credits: u64,
    },

    /// The store accepted the order; the simulated confirmation is running.
    Confirmed,

    /// Spinner tick while processing.
    AnimationTick,

    /// The store committed the purchase.
    Completed { summary: CheckoutSummary },

    /// The store refused the order.
    Rejected { message: String },

    /// User pressed Escape, or the success screen timed out.
    Close,
}

impl Intent for CheckoutIntent {}
