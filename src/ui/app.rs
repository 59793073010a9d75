use crate::catalog::{TemplateDescriptor, TemplateId};
use crate::store::{CheckoutTicket, Notice, Store, StoreError};
use crate::ui::checkout::{
    CheckoutDialogState, CheckoutIntent, CheckoutLine, CheckoutReducer, CheckoutSummary,
};
use crate::ui::mvi::Reducer;
use crate::ui::toast::ToastQueue;
use std::time::{Duration, Instant};

/// How long the success step stays up before the dialog closes itself.
const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Catalog,
    Cart,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopupKind {
    Checkout,
    ConfirmReset,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Accepted checkout waiting out the confirmation delay.
struct PendingCheckout {
    ticket: CheckoutTicket,
    ready_at: Instant,
}

pub struct App {
    store: Store,
    should_quit: bool,
    pane: Pane,
    popup: Option<PopupKind>,
    catalog_selection: usize,
    cart_selection: usize,
    /// State of the checkout dialog (MVI pattern).
    checkout_dialog: CheckoutDialogState,
    pending: Option<PendingCheckout>,
    close_success_at: Option<Instant>,
    checkout_delay: Duration,
    toasts: ToastQueue,
}

impl App {
    pub fn new(store: Store, checkout_delay: Duration) -> Self {
        let mut app = Self {
            store,
            should_quit: false,
            pane: Pane::Catalog,
            popup: None,
            catalog_selection: 0,
            cart_selection: 0,
            checkout_dialog: CheckoutDialogState::default(),
            pending: None,
            close_success_at: None,
            checkout_delay,
            toasts: ToastQueue::default(),
        };
        // Load problems from `Store::open` surface as the first toasts.
        app.drain_warnings(Instant::now());
        app
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        if self.pending.take().is_some() && self.store.cancel_checkout() {
            tracing::info!("Exiting with a checkout in flight; nothing was charged");
        }
        self.should_quit = true;
    }

    pub fn show_popup(&self) -> bool {
        self.popup.is_some()
    }

    pub fn popup_kind(&self) -> Option<PopupKind> {
        self.popup
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Catalog => Pane::Cart,
            Pane::Cart => Pane::Catalog,
        };
    }

    pub fn catalog_selection(&self) -> usize {
        self.catalog_selection
    }

    pub fn cart_selection(&self) -> usize {
        self.cart_selection
    }

    pub fn checkout_dialog(&self) -> &CheckoutDialogState {
        &self.checkout_dialog
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Template under the catalog cursor.
    pub fn selected_template(&self) -> Option<&TemplateDescriptor> {
        self.store.templates().get(self.catalog_selection)
    }

    pub fn move_selection(&mut self, direction: i32) {
        let (selection, len) = match self.pane {
            Pane::Catalog => (&mut self.catalog_selection, self.store.templates().len()),
            Pane::Cart => (&mut self.cart_selection, self.store.cart_item_count()),
        };
        if len == 0 {
            *selection = 0;
            return;
        }
        let max = len - 1;
        *selection = if direction < 0 {
            selection.saturating_sub(direction.unsigned_abs() as usize)
        } else {
            (*selection + direction as usize).min(max)
        };
    }

    /// Stage the template under the catalog cursor.
    pub fn add_selected(&mut self, now: Instant) {
        let Some(template) = self.selected_template().cloned() else {
            return;
        };
        let notice = match self.store.add_to_cart(&template) {
            Ok(added) => Notice::added(added),
            Err(err) => Notice::from(&err),
        };
        self.notify(notice, now);
        self.drain_warnings(now);
    }

    /// Remove the highlighted template from the cart.
    ///
    /// In the cart pane that is the cart cursor; in the catalog pane it is the
    /// catalog cursor, which may not be in the cart at all.
    pub fn remove_selected(&mut self, now: Instant) {
        let id = match self.pane {
            Pane::Catalog => self.selected_template().map(|t| t.id),
            Pane::Cart => self.store.cart().get(self.cart_selection).map(|t| t.id),
        };
        let Some(id) = id else {
            return;
        };
        self.remove(id, now);
    }

    fn remove(&mut self, id: TemplateId, now: Instant) {
        let notice = match self.store.remove_from_cart(id) {
            Ok(removed) => Notice::removed(&removed),
            Err(err) => Notice::from(&err),
        };
        self.notify(notice, now);
        self.clamp_cart_selection();
    }

    /// Show the review step for the current cart.
    pub fn open_checkout(&mut self, now: Instant) {
        if self.store.is_loading() {
            self.notify(Notice::from(&StoreError::TransactionInProgress), now);
            return;
        }
        if self.store.cart().is_empty() {
            self.notify(Notice::from(&StoreError::EmptyCart), now);
            return;
        }
        let lines = self.store.cart().iter().map(CheckoutLine::from).collect();
        self.dispatch_checkout(CheckoutIntent::Open {
            lines,
            total: self.store.cart_total(),
            credits: self.store.credits(),
        });
        self.popup = Some(PopupKind::Checkout);
    }

    /// Confirm the review step and start the simulated transaction.
    pub fn confirm_checkout(&mut self, now: Instant) {
        if !matches!(self.checkout_dialog, CheckoutDialogState::Review { .. }) {
            return;
        }
        match self.store.begin_checkout() {
            Ok(ticket) => {
                self.pending = Some(PendingCheckout {
                    ticket,
                    ready_at: now + self.checkout_delay,
                });
                self.dispatch_checkout(CheckoutIntent::Confirmed);
            }
            Err(err) => {
                self.notify(Notice::from(&err), now);
                self.dispatch_checkout(CheckoutIntent::Rejected {
                    message: err.to_string(),
                });
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.toasts.expire(now);

        if self.checkout_dialog.is_processing() {
            self.dispatch_checkout(CheckoutIntent::AnimationTick);
        }

        if self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.ready_at)
        {
            if let Some(pending) = self.pending.take() {
                self.finish_checkout(pending.ticket, now);
            }
        }

        if self.close_success_at.is_some_and(|at| now >= at) {
            self.close_popup();
        }

        self.drain_warnings(now);
    }

    fn finish_checkout(&mut self, ticket: CheckoutTicket, now: Instant) {
        match self.store.complete_checkout(ticket) {
            Ok(receipt) => {
                self.dispatch_checkout(CheckoutIntent::Completed {
                    summary: CheckoutSummary::from(&receipt),
                });
                self.notify(Notice::purchased(&receipt), now);
                self.close_success_at = Some(now + SUCCESS_DISPLAY);
            }
            Err(err) => {
                self.notify(Notice::from(&err), now);
                self.dispatch_checkout(CheckoutIntent::Rejected {
                    message: err.to_string(),
                });
            }
        }
        self.clamp_cart_selection();
    }

    /// Ask for confirmation before wiping credits and purchases.
    pub fn open_reset_confirm(&mut self, now: Instant) {
        if self.store.is_loading() {
            self.notify(Notice::from(&StoreError::TransactionInProgress), now);
            return;
        }
        self.popup = Some(PopupKind::ConfirmReset);
    }

    pub fn confirm_reset(&mut self, now: Instant) {
        if self.popup != Some(PopupKind::ConfirmReset) {
            return;
        }
        self.popup = None;
        let notice = match self.store.reset() {
            Ok(()) => {
                self.cart_selection = 0;
                Notice::reset()
            }
            Err(err) => Notice::from(&err),
        };
        self.notify(notice, now);
        self.drain_warnings(now);
    }

    /// Close whatever popup is open. The checkout dialog stays up while a
    /// transaction is processing.
    pub fn close_popup(&mut self) {
        if self.checkout_dialog.is_processing() {
            return;
        }
        if self.checkout_dialog.is_visible() {
            self.dispatch_checkout(CheckoutIntent::Close);
        }
        self.close_success_at = None;
        self.popup = None;
    }

    fn dispatch_checkout(&mut self, intent: CheckoutIntent) {
        dispatch_mvi!(self, checkout_dialog, CheckoutReducer, intent);
    }

    fn notify(&mut self, notice: Notice, now: Instant) {
        if notice.is_error() {
            tracing::debug!(message = %notice.message, "Operation rejected");
        }
        self.toasts.push(notice, now);
    }

    fn drain_warnings(&mut self, now: Instant) {
        for warning in self.store.take_warnings() {
            self.toasts.push(Notice::persistence(&warning), now);
        }
    }

    fn clamp_cart_selection(&mut self) {
        let len = self.store.cart_item_count();
        self.cart_selection = self.cart_selection.min(len.saturating_sub(1));
    }
}
