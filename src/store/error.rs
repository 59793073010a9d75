use thiserror::Error;
use uuid::Uuid;

use crate::catalog::TemplateId;
use crate::persist::PersistError;

/// Why a store operation was refused.
///
/// Every variant is recoverable; state is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The template reference is missing an id or is not in the catalog.
    #[error("Invalid template: {reason}")]
    InvalidInput { reason: String },

    #[error("{name} is already purchased")]
    AlreadyOwned { id: TemplateId, name: String },

    #[error("{name} is already in your cart")]
    AlreadyStaged { id: TemplateId, name: String },

    #[error("Template {id} not found in cart")]
    NotFound { id: TemplateId },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Insufficient credits: you need {shortfall} more credits")]
    InsufficientCredits {
        total: u64,
        available: u64,
        shortfall: u64,
    },

    #[error("Please wait, processing previous transaction")]
    TransactionInProgress,

    /// The ticket was not issued by this store for its pending checkout.
    #[error("Checkout {id} is not pending in this store")]
    StaleTicket { id: Uuid },

    /// Durable storage refused a step that the operation cannot skip.
    #[error("Storage failure: {0}")]
    Persistence(#[from] PersistError),
}
