use uuid::Uuid;

use crate::catalog::{TemplateDescriptor, TemplateId};

/// Proof that checkout preconditions passed.
///
/// Issued by `Store::begin_checkout` and consumed by
/// `Store::complete_checkout` on the same store. While a ticket is
/// outstanding the store is processing and rejects cart changes. The ticket
/// records the id it was issued under and the cart it was issued for; the
/// store refuses it if either no longer matches.
#[derive(Debug)]
#[must_use = "an outstanding ticket keeps the store in the processing state"]
pub struct CheckoutTicket {
    pub(crate) id: Uuid,
    pub(crate) total: u64,
    pub(crate) items: Vec<TemplateId>,
}

impl CheckoutTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Result of a committed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub id: Uuid,
    pub items: Vec<TemplateDescriptor>,
    pub total: u64,
    pub remaining_credits: u64,
}

impl Receipt {
    /// Comma-separated names of the purchased templates.
    pub fn names(&self) -> String {
        self.items
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
