//! Store operations: cart staging, checkout, reset and derived views.

mod common;

use common::{fresh_store, ids, store_with, store_with_entries, template};
use stylecart::catalog::{TemplateDescriptor, TemplateId};
use stylecart::persist::{CREDITS_KEY, PURCHASED_KEY};
use stylecart::store::{StoreError, DEFAULT_CREDITS};

// -- Scenarios ----------------------------------------------------------------

#[test]
fn adding_a_free_template_stages_it() {
    let (mut store, _) = fresh_store();
    assert_eq!(store.credits(), 500);
    assert!(store.purchased().is_empty());

    let added = store.add_to_cart(&template(1)).expect("add");
    assert_eq!(added.id, TemplateId(1));
    assert_eq!(store.snapshot().cart, ids(&[1]));
}

#[test]
fn adding_twice_reports_already_staged() {
    let (mut store, _) = fresh_store();
    store.add_to_cart(&template(1)).expect("add");
    let before = store.snapshot();

    let err = store.add_to_cart(&template(1)).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyStaged { id: TemplateId(1), .. }));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn checkout_over_budget_reports_shortfall() {
    let (mut store, _) = store_with(100, &[]);
    store.add_to_cart(&template(2)).expect("add");
    let before = store.snapshot();

    let err = store.checkout().unwrap_err();
    match err {
        StoreError::InsufficientCredits {
            total,
            available,
            shortfall,
        } => {
            assert_eq!(total, 200);
            assert_eq!(available, 100);
            assert_eq!(shortfall, 100);
        }
        other => panic!("expected InsufficientCredits, got {other:?}"),
    }
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.credits(), 100);
    assert_eq!(store.snapshot().cart, ids(&[2]));
    assert!(!store.is_loading());
}

#[test]
fn checkout_moves_cart_into_purchased() {
    let (mut store, _) = fresh_store();
    store.add_to_cart(&template(2)).expect("add");
    store.add_to_cart(&template(5)).expect("add");

    let receipt = store.checkout().expect("checkout");
    assert_eq!(receipt.total, 300);
    assert_eq!(receipt.remaining_credits, 200);
    assert_eq!(receipt.names(), "Backdrop, Mono");

    assert_eq!(store.credits(), 200);
    assert!(store.is_purchased(TemplateId(2)));
    assert!(store.is_purchased(TemplateId(5)));
    assert!(store.cart().is_empty());
    assert!(!store.is_loading());
}

#[test]
fn owned_template_cannot_be_added() {
    let (mut store, _) = store_with(500, &[3]);
    let err = store.add_to_cart(&template(3)).unwrap_err();
    assert!(matches!(err, StoreError::AlreadyOwned { id: TemplateId(3), .. }));
    assert_eq!(err.to_string(), "Highlight is already purchased");
    assert!(store.cart().is_empty());
}

#[test]
fn removing_missing_item_reports_not_found() {
    let (mut store, _) = fresh_store();
    store.add_to_cart(&template(4)).expect("add");

    let err = store.remove_from_cart(TemplateId(99)).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: TemplateId(99) }));
    assert_eq!(store.snapshot().cart, ids(&[4]));

    let removed = store.remove_from_cart(TemplateId(4)).expect("remove");
    assert_eq!(removed.name, "Glow");
    assert!(store.cart().is_empty());
}

// -- Input validation ---------------------------------------------------------

#[test]
fn template_without_id_is_invalid() {
    let (mut store, _) = fresh_store();
    let err = store
        .add_to_cart(&TemplateDescriptor::new(0, "Nameless", 10))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert!(store.cart().is_empty());
}

#[test]
fn template_outside_catalog_is_invalid() {
    let (mut store, _) = fresh_store();
    let err = store
        .add_to_cart(&TemplateDescriptor::new(42, "Bootleg", 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput { .. }));
}

#[test]
fn cart_uses_catalog_price_not_caller_price() {
    let (mut store, _) = fresh_store();
    let forged = TemplateDescriptor::new(3, "Highlight", 0);
    store.add_to_cart(&forged).expect("add");
    assert_eq!(store.cart_total(), 300);
}

#[test]
fn cart_keeps_insertion_order() {
    let (mut store, _) = fresh_store();
    for id in [6, 2, 8] {
        store.add_by_id(TemplateId(id)).expect("add");
    }
    assert_eq!(store.snapshot().cart, ids(&[6, 2, 8]));
    store.remove_from_cart(TemplateId(2)).expect("remove");
    assert_eq!(store.snapshot().cart, ids(&[6, 8]));
}

// -- Checkout -----------------------------------------------------------------

#[test]
fn empty_cart_checkout_fails() {
    let (mut store, _) = fresh_store();
    let err = store.checkout().unwrap_err();
    assert!(matches!(err, StoreError::EmptyCart));
    assert_eq!(store.credits(), 500);
}

#[test]
fn exact_balance_is_affordable() {
    let (mut store, _) = store_with(300, &[]);
    store.add_by_id(TemplateId(3)).expect("add");
    assert!(store.can_afford_cart());
    let receipt = store.checkout().expect("checkout");
    assert_eq!(receipt.remaining_credits, 0);
    assert_eq!(store.credits(), 0);
}

#[test]
fn free_only_cart_checks_out_without_charge() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(1)).expect("add");
    let receipt = store.checkout().expect("checkout");
    assert_eq!(receipt.total, 0);
    assert_eq!(store.credits(), 500);
    assert!(store.is_purchased(TemplateId(1)));
}

#[test]
fn second_checkout_is_rejected_while_first_is_in_flight() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(2)).expect("add");

    let ticket = store.begin_checkout().expect("begin");
    assert!(store.is_loading());
    assert_eq!(ticket.total(), 200);
    assert_eq!(ticket.item_count(), 1);

    let before = store.snapshot();
    assert!(matches!(
        store.begin_checkout(),
        Err(StoreError::TransactionInProgress)
    ));
    assert!(matches!(
        store.checkout(),
        Err(StoreError::TransactionInProgress)
    ));
    assert_eq!(store.snapshot(), before);

    let receipt = store.complete_checkout(ticket).expect("complete");
    assert_eq!(receipt.total, 200);
    assert!(!store.is_loading());
    assert_eq!(store.credits(), 300);
}

#[test]
fn in_progress_check_precedes_empty_cart() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(5)).expect("add");
    let ticket = store.begin_checkout().expect("begin");
    // Cart is still staged but the transaction flag wins.
    assert!(matches!(
        store.begin_checkout(),
        Err(StoreError::TransactionInProgress)
    ));
    store.complete_checkout(ticket).expect("complete");
}

#[test]
fn cart_is_frozen_while_checkout_is_in_flight() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(2)).expect("add");
    let ticket = store.begin_checkout().expect("begin");

    assert!(matches!(
        store.add_by_id(TemplateId(5)),
        Err(StoreError::TransactionInProgress)
    ));
    assert!(matches!(
        store.remove_from_cart(TemplateId(2)),
        Err(StoreError::TransactionInProgress)
    ));
    assert!(matches!(store.reset(), Err(StoreError::TransactionInProgress)));

    // Reads stay available.
    assert_eq!(store.cart_total(), 200);
    assert_eq!(store.cart_item_count(), 1);

    store.complete_checkout(ticket).expect("complete");
    assert!(store.is_purchased(TemplateId(2)));
}

#[test]
fn receipts_have_distinct_ids() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(1)).expect("add");
    let first = store.checkout().expect("checkout");
    store.add_by_id(TemplateId(8)).expect("add");
    let second = store.checkout().expect("checkout");
    assert_ne!(first.id, second.id);
}

// -- Reset --------------------------------------------------------------------

#[test]
fn reset_restores_defaults_and_clears_storage() {
    let (mut store, backend) = store_with(120, &[2, 3]);
    store.add_by_id(TemplateId(4)).expect("add");

    store.reset().expect("reset");
    assert!(store.cart().is_empty());
    assert_eq!(store.credits(), DEFAULT_CREDITS);
    assert!(store.purchased().is_empty());
    assert_eq!(backend.peek(CREDITS_KEY), None);
    assert_eq!(backend.peek(PURCHASED_KEY), None);
}

#[test]
fn reset_is_idempotent() {
    let (mut store, _) = store_with(120, &[2]);
    store.reset().expect("first reset");
    let once = store.snapshot();
    store.reset().expect("second reset");
    assert_eq!(store.snapshot(), once);
    assert_eq!(once.credits, 500);
    assert!(once.cart.is_empty());
    assert!(once.purchased.is_empty());
}

#[test]
fn failed_reset_leaves_state_untouched() {
    let (mut store, backend) = store_with(120, &[2]);
    store.add_by_id(TemplateId(5)).expect("add");
    let before = store.snapshot();

    backend.set_fail_writes(true);
    let err = store.reset().unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.snapshot(), before);

    backend.set_fail_writes(false);
    store.reset().expect("reset after recovery");
    assert_eq!(store.credits(), 500);
}

#[test]
fn reset_uses_configured_starting_balance() {
    use stylecart::catalog::Catalog;
    use stylecart::persist::MemoryStore;
    use stylecart::store::{Store, StoreSettings};

    let mut store = Store::open(
        Catalog::builtin(),
        MemoryStore::with_entries([(CREDITS_KEY, "20")]),
        StoreSettings {
            starting_credits: 1000,
        },
    );
    assert_eq!(store.credits(), 20);
    store.reset().expect("reset");
    assert_eq!(store.credits(), 1000);
    assert_eq!(store.starting_credits(), 1000);
}

// -- Derived views ------------------------------------------------------------

#[test]
fn derived_views_track_state() {
    let (mut store, _) = store_with(250, &[1, 8]);
    assert_eq!(store.purchased_count(), 2);
    assert_eq!(store.available_templates().len(), 6);
    assert_eq!(
        store
            .purchased_templates()
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>(),
        vec!["Classic", "Minimal"]
    );

    store.add_by_id(TemplateId(2)).expect("add");
    store.add_by_id(TemplateId(7)).expect("add");
    assert_eq!(store.cart_total(), 350);
    assert_eq!(store.cart_item_count(), 2);
    assert!(!store.can_afford_cart());

    assert!(!store.can_purchase(TemplateId(1)));
    assert!(!store.can_purchase(TemplateId(2)));
    assert!(store.can_purchase(TemplateId(3)));
    assert!(store.in_cart(TemplateId(7)));
}

#[test]
fn empty_cart_is_affordable() {
    let (store, _) = store_with(0, &[]);
    assert_eq!(store.cart_total(), 0);
    assert!(store.can_afford_cart());
}

// -- Persistence side channel -------------------------------------------------

#[test]
fn checkout_persists_both_keys() {
    let (mut store, backend) = fresh_store();
    store.add_by_id(TemplateId(5)).expect("add");
    store.add_by_id(TemplateId(2)).expect("add");
    store.checkout().expect("checkout");

    assert_eq!(backend.peek(CREDITS_KEY).as_deref(), Some("200"));
    assert_eq!(backend.peek(PURCHASED_KEY).as_deref(), Some("[2,5]"));
}

#[test]
fn write_failure_keeps_purchase_and_warns() {
    let (mut store, backend) = fresh_store();
    store.add_by_id(TemplateId(3)).expect("add");
    backend.set_fail_writes(true);

    let receipt = store.checkout().expect("checkout still succeeds");
    assert_eq!(receipt.remaining_credits, 200);
    assert!(store.is_purchased(TemplateId(3)));
    assert_eq!(store.credits(), 200);

    let warnings = store.take_warnings();
    let keys: Vec<_> = warnings.iter().map(|w| w.key).collect();
    assert_eq!(keys, vec![PURCHASED_KEY, CREDITS_KEY]);
    assert_eq!(warnings[0].message, "Failed to save purchase data");
    assert_eq!(warnings[1].message, "Failed to save credit data");
    assert!(store.take_warnings().is_empty());
}

#[test]
fn unreadable_storage_falls_back_to_defaults() {
    let (store, _) = store_with_entries(&[(CREDITS_KEY, "lots"), (PURCHASED_KEY, "{oops")]);
    assert_eq!(store.credits(), 500);
    assert!(store.purchased().is_empty());

    let mut store = store;
    let messages: Vec<_> = store
        .take_warnings()
        .into_iter()
        .map(|w| w.message)
        .collect();
    assert_eq!(
        messages,
        vec!["Failed to load credits", "Failed to load purchased items"]
    );
}

#[test]
fn negative_persisted_balance_is_rejected() {
    let (store, _) = store_with_entries(&[(CREDITS_KEY, "-50")]);
    assert_eq!(store.credits(), 500);
}

#[test]
fn failing_backend_reads_fall_back_to_defaults() {
    use stylecart::catalog::Catalog;
    use stylecart::persist::MemoryStore;
    use stylecart::store::{Store, StoreSettings};

    let backend = MemoryStore::with_entries([(CREDITS_KEY, "42")]);
    backend.set_fail_reads(true);
    let mut store = Store::open(Catalog::builtin(), backend, StoreSettings::default());
    assert_eq!(store.credits(), 500);
    assert_eq!(store.take_warnings().len(), 2);
}

// -- Checkout tickets ---------------------------------------------------------

#[test]
fn ticket_from_another_store_is_refused() {
    let (mut issuer, _) = fresh_store();
    issuer.add_by_id(TemplateId(8)).expect("add");
    let ticket = issuer.begin_checkout().expect("begin");

    let (mut other, other_backend) = store_with(100, &[]);
    other.add_by_id(TemplateId(3)).expect("add");
    assert!(!other.can_afford_cart());
    let before = other.snapshot();

    let err = other.complete_checkout(ticket).unwrap_err();
    assert!(matches!(err, StoreError::StaleTicket { .. }));
    assert_eq!(other.snapshot(), before);
    assert!(!other.is_loading());
    assert_eq!(other_backend.peek(CREDITS_KEY).as_deref(), Some("100"));

    // The issuer is still processing; cancelling releases it with nothing
    // committed.
    assert!(issuer.is_loading());
    assert!(issuer.cancel_checkout());
    assert!(!issuer.is_loading());
    assert_eq!(issuer.credits(), 500);
    assert_eq!(issuer.snapshot().cart, ids(&[8]));
    assert!(!issuer.cancel_checkout());
}

#[test]
fn ticket_cannot_commit_on_an_idle_store() {
    let (mut issuer, _) = fresh_store();
    issuer.add_by_id(TemplateId(1)).expect("add");
    let ticket = issuer.begin_checkout().expect("begin");

    let (mut idle, _) = fresh_store();
    let before = idle.snapshot();
    assert!(matches!(
        idle.complete_checkout(ticket),
        Err(StoreError::StaleTicket { .. })
    ));
    assert_eq!(idle.snapshot(), before);
}

#[test]
fn cancelled_ticket_is_stale() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(2)).expect("add");
    let ticket = store.begin_checkout().expect("begin");
    assert!(store.cancel_checkout());

    let before = store.snapshot();
    assert!(matches!(
        store.complete_checkout(ticket),
        Err(StoreError::StaleTicket { .. })
    ));
    assert_eq!(store.snapshot(), before);

    // A fresh checkout still works.
    let receipt = store.checkout().expect("checkout");
    assert_eq!(receipt.remaining_credits, 300);
}

#[test]
fn receipt_carries_the_ticket_id() {
    let (mut store, _) = fresh_store();
    store.add_by_id(TemplateId(7)).expect("add");
    let ticket = store.begin_checkout().expect("begin");
    let id = ticket.id();
    let receipt = store.complete_checkout(ticket).expect("complete");
    assert_eq!(receipt.id, id);
}

// -- Reset under partial storage failure --------------------------------------

#[test]
fn partial_reset_failure_reports_unrestored_keys() {
    let (mut store, backend) = store_with(80, &[2, 4]);
    // Removing credits succeeds, removing purchased and every rewrite fails.
    backend.fail_writes_after(1);

    let err = store.reset().unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.credits(), 80);
    let owned: Vec<u32> = store.purchased().iter().map(|id| id.get()).collect();
    assert_eq!(owned, vec![2, 4]);

    assert_eq!(backend.peek(CREDITS_KEY), None);
    assert_eq!(backend.peek(PURCHASED_KEY).as_deref(), Some("[2,4]"));
    let warnings: Vec<_> = store
        .take_warnings()
        .into_iter()
        .map(|w| (w.key, w.message))
        .collect();
    assert_eq!(
        warnings,
        vec![
            (CREDITS_KEY, "Failed to save credit data".to_string()),
            (PURCHASED_KEY, "Failed to save purchase data".to_string()),
        ]
    );
}
