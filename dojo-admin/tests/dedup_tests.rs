//! Tests for the dedup guard and its constraint-race backstop

use dojo_admin::db::{admissions, fees};
use dojo_admin::dedup::{self, DedupKey};
use dojo_admin::{token, ApiError};
use dojo_common::db::init_database;

async fn scratch_pool() -> (sqlx::SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = init_database(&dir.path().join("test.db"))
        .await
        .expect("init_database");
    (pool, dir)
}

fn new_admission(email: &str, phone: &str) -> admissions::NewAdmission {
    admissions::NewAdmission {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        age: 14,
        belt_level: "White".to_string(),
        address: "Panaji".to_string(),
        centre: "ST.CRUZ".to_string(),
        batch_timing: "Tue, Thu, Sat (4:30 PM - 6:00 PM)".to_string(),
        photo_url: String::new(),
        verification_token: token::issue(),
    }
}

fn new_fees_payment(txn_id: Option<&str>, img_hash: Option<&str>) -> fees::NewFeesPayment {
    fees::NewFeesPayment {
        full_name: "Asha Rao".to_string(),
        phone: "9990001111".to_string(),
        batch_name: "Batch 1".to_string(),
        centre: "ST.CRUZ".to_string(),
        payment_datetime: "2026-02-01T18:30:00".to_string(),
        status: "Pending Verification".to_string(),
        txn_id: txn_id.map(str::to_string),
        amount: Some(1500.0),
        img_hash: img_hash.map(str::to_string),
        screenshot_base64: None,
        validation_json: None,
    }
}

#[tokio::test]
async fn fresh_keys_pass_the_guard() {
    let (pool, _dir) = scratch_pool().await;

    assert!(!dedup::check_duplicate(&pool, &DedupKey::AdmissionEmail("a@x.com"))
        .await
        .unwrap());

    dedup::ensure_unique(
        &pool,
        &[
            DedupKey::AdmissionEmail("a@x.com"),
            DedupKey::AdmissionPhone("9990001111"),
        ],
    )
    .await
    .expect("no collisions expected");
}

#[tokio::test]
async fn duplicate_email_is_reported_as_conflict() {
    let (pool, _dir) = scratch_pool().await;

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111"))
        .await
        .unwrap();

    assert!(dedup::check_duplicate(&pool, &DedupKey::AdmissionEmail("a@x.com"))
        .await
        .unwrap());

    let result = dedup::ensure_unique(
        &pool,
        &[
            DedupKey::AdmissionEmail("a@x.com"),
            DedupKey::AdmissionPhone("9990009999"),
        ],
    )
    .await;

    match result {
        Err(ApiError::Conflict(message)) => assert!(message.contains("email")),
        other => panic!("expected Conflict, got {:?}", other),
    }

    // The rejected submission never reaches the store
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_phone_is_reported_independently() {
    let (pool, _dir) = scratch_pool().await;

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111"))
        .await
        .unwrap();

    let result = dedup::ensure_unique(
        &pool,
        &[
            DedupKey::AdmissionEmail("fresh@x.com"),
            DedupKey::AdmissionPhone("9990001111"),
        ],
    )
    .await;

    match result {
        Err(ApiError::Conflict(message)) => assert!(message.contains("phone")),
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn constraint_race_maps_to_the_same_conflict() {
    let (pool, _dir) = scratch_pool().await;

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111"))
        .await
        .unwrap();

    // Bypass the advisory check, as a concurrent submission effectively does:
    // the unique index still rejects the insert and the error maps to
    // Conflict.
    let race = admissions::insert(&pool, &new_admission("a@x.com", "9990002222"))
        .await
        .map_err(|e| dedup::conflict_on_unique(e, "This email is already registered"));

    assert!(matches!(race, Err(ApiError::Conflict(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "only one record may exist after the race");
}

#[tokio::test]
async fn duplicate_txn_id_rejects_the_payment() {
    let (pool, _dir) = scratch_pool().await;

    fees::insert(&pool, &new_fees_payment(Some("TXN-1"), None))
        .await
        .unwrap();

    assert!(dedup::check_duplicate(&pool, &DedupKey::PaymentTxnId("TXN-1"))
        .await
        .unwrap());

    let result = dedup::ensure_unique(&pool, &[DedupKey::PaymentTxnId("TXN-1")]).await;
    match result {
        Err(ApiError::Conflict(message)) => assert_eq!(message, "Duplicate transaction ID"),
        other => panic!("expected Conflict, got {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fees_payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "no new row may be inserted");
}

#[tokio::test]
async fn duplicate_img_hash_rejects_the_payment() {
    let (pool, _dir) = scratch_pool().await;

    fees::insert(&pool, &new_fees_payment(None, Some("abc123")))
        .await
        .unwrap();

    let result = dedup::ensure_unique(&pool, &[DedupKey::PaymentImageHash("abc123")]).await;
    match result {
        Err(ApiError::Conflict(message)) => assert_eq!(message, "Duplicate screenshot detected"),
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn payments_without_dedup_keys_do_not_collide() {
    let (pool, _dir) = scratch_pool().await;

    fees::insert(&pool, &new_fees_payment(None, None)).await.unwrap();
    fees::insert(&pool, &new_fees_payment(None, None)).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fees_payments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 2, "absent keys must not be treated as equal");
}
