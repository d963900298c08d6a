//! Integration tests against PostgreSQL.
//!
//! Each test skips cleanly when `TEST_DATABASE_URL` is not set, and creates
//! its own uniquely named data so suites can run in parallel without
//! truncation.

mod helpers;

use helpers::*;
use kashta_backend::models::SettlementAction;
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::test]
async fn test_settlement_flow_end_to_end() {
    let Some(db) = TestDatabase::connect().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return;
    };
    let service = db.settlement_service();

    // Two participants, one payer
    let alice = create_test_participant(&db, &unique_label("alice")).await;
    let basim = create_test_participant(&db, &unique_label("basim")).await;
    let event = create_test_event(&db, &unique_label("dune-trip")).await;

    create_test_contribution(&db, event.id, Some(alice.id), Some("100")).await;
    create_test_contribution(&db, event.id, Some(basim.id), None).await;

    let settlement = service
        .compute_event_settlement(event.id)
        .await
        .expect("settlement should compute");

    assert_eq!(settlement.participant_count, 2);
    assert_eq!(settlement.fair_share, Decimal::new(50, 0));
    assert_eq!(settlement.transactions.len(), 1);

    let transfer = &settlement.transactions[0];
    assert_eq!(transfer.debtor_id, basim.id);
    assert_eq!(transfer.creditor_id, alice.id);
    assert_eq!(transfer.amount, Decimal::new(50, 0));
    assert!(!transfer.is_settled);

    // The event shows up in the all-events view
    let all = service
        .compute_all_settlements()
        .await
        .expect("batch computation should succeed");
    assert!(all.iter().any(|s| s.event_id == event.id));
}

#[tokio::test]
async fn test_toggle_flips_flag_and_appends_one_entry_each() {
    let Some(db) = TestDatabase::connect().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return;
    };
    let service = db.settlement_service();

    let dana = create_test_participant(&db, &unique_label("dana")).await;
    let omar = create_test_participant(&db, &unique_label("omar")).await;
    let event = create_test_event(&db, &unique_label("wadi-camp")).await;

    create_test_contribution(&db, event.id, Some(dana.id), Some("80")).await;
    create_test_contribution(&db, event.id, Some(omar.id), None).await;

    // First toggle: unsettled -> settled, one payment entry
    let toggled = service
        .toggle_settlement(event.id, omar.id, dana.id)
        .await
        .expect("toggle should succeed");
    assert!(toggled.is_settled);
    assert_eq!(toggled.amount, Decimal::new(40, 0));

    let settlement = service.compute_event_settlement(event.id).await.unwrap();
    assert!(settlement.transactions[0].is_settled);

    // Second toggle: settled -> unsettled again (idempotent pair of flips)
    let toggled = service
        .toggle_settlement(event.id, omar.id, dana.id)
        .await
        .expect("second toggle should succeed");
    assert!(!toggled.is_settled);

    // Exactly two ledger entries for this event, newest first
    let entries: Vec<_> = service
        .list_activity()
        .await
        .expect("ledger should list")
        .into_iter()
        .filter(|entry| entry.event_title == event.title)
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action_enum(), SettlementAction::Cancellation);
    assert_eq!(entries[1].action_enum(), SettlementAction::Payment);
    assert_eq!(entries[0].amount, Decimal::new(40, 0));
    assert_eq!(entries[0].debtor_name, omar.name);
    assert_eq!(entries[0].creditor_name, dana.name);
}

#[tokio::test]
async fn test_ledger_survives_event_deletion() {
    let Some(db) = TestDatabase::connect().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return;
    };
    let service = db.settlement_service();

    let noor = create_test_participant(&db, &unique_label("noor")).await;
    let zaid = create_test_participant(&db, &unique_label("zaid")).await;
    let event = create_test_event(&db, &unique_label("salt-flats")).await;

    create_test_contribution(&db, event.id, Some(noor.id), Some("60")).await;
    create_test_contribution(&db, event.id, Some(zaid.id), None).await;

    service
        .toggle_settlement(event.id, zaid.id, noor.id)
        .await
        .expect("toggle should succeed");

    // Delete the event out from under the ledger (the surrounding app owns
    // event CRUD; contributions and flags cascade)
    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event.id)
        .execute(&db.pool)
        .await
        .expect("event deletion should succeed");

    assert!(service
        .compute_event_settlement(event.id)
        .await
        .unwrap_err()
        .is_not_found());

    // The entry remains queryable with the captured names and amount
    let entries: Vec<_> = service
        .list_activity()
        .await
        .expect("ledger should list")
        .into_iter()
        .filter(|entry| entry.event_title == event.title)
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action_enum(), SettlementAction::Payment);
    assert_eq!(entries[0].amount, Decimal::new(30, 0));
    assert_eq!(entries[0].debtor_name, zaid.name);
    assert_eq!(entries[0].creditor_name, noor.name);
}

#[tokio::test]
async fn test_stale_flag_carries_forward_when_amount_changes() {
    let Some(db) = TestDatabase::connect().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return;
    };
    let service = db.settlement_service();

    let lina = create_test_participant(&db, &unique_label("lina")).await;
    let rami = create_test_participant(&db, &unique_label("rami")).await;
    let event = create_test_event(&db, &unique_label("oasis-run")).await;

    create_test_contribution(&db, event.id, Some(lina.id), Some("100")).await;
    create_test_contribution(&db, event.id, Some(rami.id), None).await;

    service
        .toggle_settlement(event.id, rami.id, lina.id)
        .await
        .expect("toggle should succeed");

    // New contribution changes the transfer amount for the same pair
    create_test_contribution(&db, event.id, Some(lina.id), Some("40")).await;

    let settlement = service.compute_event_settlement(event.id).await.unwrap();
    let transfer = &settlement.transactions[0];
    assert_eq!(transfer.amount, Decimal::new(70, 0));
    // The flag tracks the pair relationship, not the amount it was set at
    assert!(transfer.is_settled);
}

#[tokio::test]
async fn test_toggle_rejects_unknown_event_and_pair() {
    let Some(db) = TestDatabase::connect().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping integration test");
        return;
    };
    let service = db.settlement_service();

    // Unknown event
    let err = service
        .toggle_settlement(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // Known event, pair not in the computed transfer set
    let sami = create_test_participant(&db, &unique_label("sami")).await;
    let hala = create_test_participant(&db, &unique_label("hala")).await;
    let event = create_test_event(&db, &unique_label("stargazing")).await;

    create_test_contribution(&db, event.id, Some(sami.id), Some("50")).await;
    create_test_contribution(&db, event.id, Some(hala.id), None).await;

    // Reversed direction: sami is the creditor, not a debtor
    let err = service
        .toggle_settlement(event.id, sami.id, hala.id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    // No partial state was committed: nothing for this event in the ledger
    let entries: Vec<_> = service
        .list_activity()
        .await
        .expect("ledger should list")
        .into_iter()
        .filter(|entry| entry.event_title == event.title)
        .collect();
    assert!(entries.is_empty());
}
