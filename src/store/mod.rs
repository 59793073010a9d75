//! Cart, credits and purchase state.
//!
//! [`Store`] is the single owner of the session's shopping state. It is
//! constructed once at startup and handed by reference to whatever renders it.
//!
//! Invariants held after every operation:
//! - no template id appears twice in the cart
//! - no purchased id is in the cart
//! - the balance never goes below zero (it is unsigned, and checkout refuses
//!   a total above the balance)
//! - the purchased set only grows through checkout and only shrinks on reset

mod cart;
mod checkout;
mod error;
mod notice;

pub use cart::Cart;
pub use checkout::{CheckoutTicket, Receipt};
pub use error::StoreError;
pub use notice::{Notice, NoticeLevel};

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::catalog::{Catalog, TemplateDescriptor, TemplateId};
use crate::persist::{KeyValueStore, PersistError, PersistWarning, CREDITS_KEY, PURCHASED_KEY};

/// Balance for a new or reset store.
pub const DEFAULT_CREDITS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Balance used when nothing is persisted, and the reset target.
    pub starting_credits: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            starting_credits: DEFAULT_CREDITS,
        }
    }
}

/// Comparable view of the mutable state, for before/after checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub cart: Vec<TemplateId>,
    pub credits: u64,
    pub purchased: BTreeSet<TemplateId>,
}

pub struct Store {
    catalog: Catalog,
    cart: Cart,
    credits: u64,
    purchased: BTreeSet<TemplateId>,
    /// Id of the outstanding ticket, between `begin_checkout` and
    /// `complete_checkout`.
    processing: Option<Uuid>,
    settings: StoreSettings,
    backend: Box<dyn KeyValueStore>,
    warnings: Vec<PersistWarning>,
}

impl Store {
    /// Create the store, seeding credits and purchases from `backend`.
    ///
    /// Missing or unreadable entries fall back to defaults; the problem is
    /// logged and queued as a warning.
    pub fn open(
        catalog: Catalog,
        backend: impl KeyValueStore + 'static,
        settings: StoreSettings,
    ) -> Self {
        let mut store = Self {
            catalog,
            cart: Cart::new(),
            credits: settings.starting_credits,
            purchased: BTreeSet::new(),
            processing: None,
            settings,
            backend: Box::new(backend),
            warnings: Vec::new(),
        };
        store.credits = store.load_credits();
        store.purchased = store.load_purchased();
        tracing::info!(
            credits = store.credits,
            purchased = store.purchased.len(),
            templates = store.catalog.len(),
            "Store opened"
        );
        store
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Stage `template` for purchase.
    ///
    /// The catalog's copy of the template is stored, so the caller's cost and
    /// metadata are never trusted.
    pub fn add_to_cart(
        &mut self,
        template: &TemplateDescriptor,
    ) -> Result<&TemplateDescriptor, StoreError> {
        if !template.id.is_valid() {
            return Err(StoreError::InvalidInput {
                reason: "template has no id".to_string(),
            });
        }
        let Some(entry) = self.catalog.get(template.id) else {
            return Err(StoreError::InvalidInput {
                reason: format!("template {} is not in the catalog", template.id),
            });
        };
        if self.purchased.contains(&entry.id) {
            return Err(StoreError::AlreadyOwned {
                id: entry.id,
                name: entry.name.clone(),
            });
        }
        if self.cart.contains(entry.id) {
            return Err(StoreError::AlreadyStaged {
                id: entry.id,
                name: entry.name.clone(),
            });
        }
        if self.processing.is_some() {
            return Err(StoreError::TransactionInProgress);
        }

        let entry = entry.clone();
        tracing::debug!(id = %entry.id, name = %entry.name, "Added to cart");
        self.cart.push(entry);
        let items = self.cart.items();
        Ok(&items[items.len() - 1])
    }

    /// Stage the catalog template with `id`.
    pub fn add_by_id(&mut self, id: TemplateId) -> Result<&TemplateDescriptor, StoreError> {
        let template = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::InvalidInput {
                reason: format!("template {id} is not in the catalog"),
            })?;
        self.add_to_cart(&template)
    }

    /// Unstage the template with `id`, returning it.
    pub fn remove_from_cart(&mut self, id: TemplateId) -> Result<TemplateDescriptor, StoreError> {
        if !self.cart.contains(id) {
            return Err(StoreError::NotFound { id });
        }
        if self.processing.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        let removed = self.cart.remove(id).ok_or(StoreError::NotFound { id })?;
        tracing::debug!(id = %removed.id, name = %removed.name, "Removed from cart");
        Ok(removed)
    }

    /// Check checkout preconditions and enter the processing state.
    ///
    /// Preconditions, in order: no checkout already in flight, cart not
    /// empty, cart total within the balance. On failure nothing changes.
    pub fn begin_checkout(&mut self) -> Result<CheckoutTicket, StoreError> {
        if self.processing.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        let total = self.cart.total();
        if total > self.credits {
            return Err(StoreError::InsufficientCredits {
                total,
                available: self.credits,
                shortfall: total - self.credits,
            });
        }

        let id = Uuid::new_v4();
        self.processing = Some(id);
        tracing::debug!(ticket = %id, total, items = self.cart.len(), "Checkout started");
        Ok(CheckoutTicket {
            id,
            total,
            items: self.cart.ids(),
        })
    }

    /// Commit an accepted checkout.
    ///
    /// Moves every cart id into the purchased set, debits the total and
    /// empties the cart in one step. Persistence failures after the commit are
    /// queued as warnings and do not undo it.
    ///
    /// A ticket that is not the one this store is processing is refused with
    /// `StaleTicket` and nothing changes. A matching ticket whose order no
    /// longer matches the cart or balance is refused too, and releases the
    /// processing state.
    pub fn complete_checkout(&mut self, ticket: CheckoutTicket) -> Result<Receipt, StoreError> {
        if self.processing != Some(ticket.id) {
            tracing::warn!(ticket = %ticket.id, "Refused checkout ticket not issued for this order");
            return Err(StoreError::StaleTicket { id: ticket.id });
        }
        // The ticket is spent from here on, whatever the outcome.
        self.processing = None;

        let total = self.cart.total();
        if total != ticket.total || self.cart.ids() != ticket.items {
            tracing::warn!(ticket = %ticket.id, "Cart changed under a pending checkout");
            return Err(StoreError::StaleTicket { id: ticket.id });
        }
        let Some(remaining) = self.credits.checked_sub(total) else {
            return Err(StoreError::InsufficientCredits {
                total,
                available: self.credits,
                shortfall: total - self.credits,
            });
        };

        let items = self.cart.take();
        self.purchased.extend(items.iter().map(|t| t.id));
        self.credits = remaining;

        self.persist_purchased();
        self.persist_credits();

        let receipt = Receipt {
            id: ticket.id,
            items,
            total,
            remaining_credits: self.credits,
        };
        tracing::info!(
            receipt = %receipt.id,
            total,
            remaining = self.credits,
            items = receipt.items.len(),
            "Checkout completed"
        );
        Ok(receipt)
    }

    /// Drop the pending checkout without committing it.
    ///
    /// Any outstanding ticket becomes stale. Returns whether a checkout was
    /// pending.
    pub fn cancel_checkout(&mut self) -> bool {
        match self.processing.take() {
            Some(id) => {
                tracing::info!(ticket = %id, "Checkout cancelled");
                true
            }
            None => false,
        }
    }

    /// Begin and complete a checkout in one call.
    pub fn checkout(&mut self) -> Result<Receipt, StoreError> {
        let ticket = self.begin_checkout()?;
        self.complete_checkout(ticket)
    }

    /// Clear persisted state and return to defaults.
    ///
    /// Storage is cleared first. If that fails the in-memory state is left
    /// untouched and the persisted entries are rewritten from it.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        if self.processing.is_some() {
            return Err(StoreError::TransactionInProgress);
        }

        let cleared = self
            .backend
            .remove(CREDITS_KEY)
            .and_then(|()| self.backend.remove(PURCHASED_KEY));
        if let Err(err) = cleared {
            tracing::error!(error = %err, "Failed to reset store");
            self.restore_persisted();
            return Err(StoreError::Persistence(err));
        }

        self.cart.clear();
        self.credits = self.settings.starting_credits;
        self.purchased.clear();
        tracing::info!(credits = self.credits, "Store reset");
        Ok(())
    }

    // ------------------------------------------------------------------
    // State and derived views
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn templates(&self) -> &[TemplateDescriptor] {
        self.catalog.as_slice()
    }

    pub fn cart(&self) -> &[TemplateDescriptor] {
        self.cart.items()
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn purchased(&self) -> &BTreeSet<TemplateId> {
        &self.purchased
    }

    /// True while a checkout is in flight.
    pub fn is_loading(&self) -> bool {
        self.processing.is_some()
    }

    pub fn starting_credits(&self) -> u64 {
        self.settings.starting_credits
    }

    pub fn cart_total(&self) -> u64 {
        self.cart.total()
    }

    pub fn cart_item_count(&self) -> usize {
        self.cart.len()
    }

    pub fn can_afford_cart(&self) -> bool {
        self.cart_total() <= self.credits
    }

    pub fn purchased_count(&self) -> usize {
        self.purchased.len()
    }

    pub fn is_purchased(&self, id: TemplateId) -> bool {
        self.purchased.contains(&id)
    }

    pub fn in_cart(&self, id: TemplateId) -> bool {
        self.cart.contains(id)
    }

    /// Catalog templates the user does not own, in catalog order.
    pub fn available_templates(&self) -> Vec<&TemplateDescriptor> {
        self.catalog
            .iter()
            .filter(|t| !self.purchased.contains(&t.id))
            .collect()
    }

    /// Catalog templates the user owns, in catalog order.
    pub fn purchased_templates(&self) -> Vec<&TemplateDescriptor> {
        self.catalog
            .iter()
            .filter(|t| self.purchased.contains(&t.id))
            .collect()
    }

    /// Neither owned nor already staged.
    pub fn can_purchase(&self, id: TemplateId) -> bool {
        !self.purchased.contains(&id) && !self.cart.contains(id)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            cart: self.cart.ids(),
            credits: self.credits,
            purchased: self.purchased.clone(),
        }
    }

    /// Drain persistence warnings accumulated since the last call.
    pub fn take_warnings(&mut self) -> Vec<PersistWarning> {
        std::mem::take(&mut self.warnings)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn load_credits(&mut self) -> u64 {
        let default = self.settings.starting_credits;
        match self.backend.get(CREDITS_KEY) {
            Ok(None) => default,
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(credits) => credits,
                Err(_) => {
                    let err = PersistError::InvalidValue {
                        key: CREDITS_KEY.to_string(),
                        value: raw,
                    };
                    self.warn(CREDITS_KEY, "Failed to load credits", &err.to_string());
                    default
                }
            },
            Err(err) => {
                self.warn(CREDITS_KEY, "Failed to load credits", &err.to_string());
                default
            }
        }
    }

    fn load_purchased(&mut self) -> BTreeSet<TemplateId> {
        match self.backend.get(PURCHASED_KEY) {
            Ok(None) => BTreeSet::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<TemplateId>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(err) => {
                    self.warn(
                        PURCHASED_KEY,
                        "Failed to load purchased items",
                        &err.to_string(),
                    );
                    BTreeSet::new()
                }
            },
            Err(err) => {
                self.warn(
                    PURCHASED_KEY,
                    "Failed to load purchased items",
                    &err.to_string(),
                );
                BTreeSet::new()
            }
        }
    }

    fn persist_credits(&mut self) {
        let value = self.credits.to_string();
        if let Err(err) = self.backend.set(CREDITS_KEY, &value) {
            self.warn(CREDITS_KEY, "Failed to save credit data", &err.to_string());
        }
    }

    fn persist_purchased(&mut self) {
        let result = serde_json::to_string(&self.purchased)
            .map_err(|err| err.to_string())
            .and_then(|value| {
                self.backend
                    .set(PURCHASED_KEY, &value)
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = result {
            self.warn(PURCHASED_KEY, "Failed to save purchase data", &err);
        }
    }

    /// Rewrite both keys after a failed reset. Each key that cannot be
    /// rewritten is queued as a warning.
    fn restore_persisted(&mut self) {
        self.persist_credits();
        self.persist_purchased();
    }

    fn warn(&mut self, key: &'static str, message: &str, detail: &str) {
        tracing::warn!(key, detail, "{}", message);
        self.warnings.push(PersistWarning {
            key,
            message: message.to_string(),
        });
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("cart", &self.cart.ids())
            .field("credits", &self.credits)
            .field("purchased", &self.purchased)
            .field("processing", &self.processing)
            .finish_non_exhaustive()
    }
}
