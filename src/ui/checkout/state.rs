//! State for the checkout dialog.

use crate::catalog::TemplateDescriptor;
use crate::store::Receipt;
use crate::ui::mvi::UiState;

/// One row of the order review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub name: String,
    pub tag: String,
    pub cost: u64,
}

impl From<&TemplateDescriptor> for CheckoutLine {
    fn from(template: &TemplateDescriptor) -> Self {
        Self {
            name: template.name.clone(),
            tag: template.tag.clone(),
            cost: template.cost,
        }
    }
}

/// What the success screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub receipt_id: String,
    pub names: Vec<String>,
    pub total: u64,
    pub remaining_credits: u64,
}

impl From<&Receipt> for CheckoutSummary {
    fn from(receipt: &Receipt) -> Self {
        Self {
            receipt_id: receipt.id.to_string(),
            names: receipt.items.iter().map(|t| t.name.clone()).collect(),
            total: receipt.total,
            remaining_credits: receipt.remaining_credits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckoutDialogState {
    #[default]
    Hidden,

    /// Order shown, waiting for the user to confirm.
    Review {
        lines: Vec<CheckoutLine>,
        total: u64,
        credits: u64,
    },

    /// Transaction in flight. Cannot be closed.
    Processing {
        lines: Vec<CheckoutLine>,
        total: u64,
        animation_tick: u8,
    },

    Success { summary: CheckoutSummary },

    Failed { message: String },
}

impl UiState for CheckoutDialogState {}

impl CheckoutDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// Whether the reviewed order fits the balance. Only meaningful in
    /// `Review`.
    pub fn can_afford(&self) -> bool {
        match self {
            Self::Review { total, credits, .. } => total <= credits,
            _ => false,
        }
    }

    /// Progress bar percentage for the current step.
    pub fn progress(&self) -> u16 {
        match self {
            Self::Hidden => 0,
            Self::Review { .. } => 25,
            Self::Failed { .. } => 50,
            Self::Processing { .. } => 75,
            Self::Success { .. } => 100,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Review { .. } => " Review Your Order ",
            Self::Processing { .. } => " Processing Payment ",
            Self::Success { .. } => " Purchase Complete ",
            Self::Failed { .. } => " Purchase Failed ",
        }
    }
}
