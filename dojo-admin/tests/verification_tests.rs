//! Tests for the email verification workflow

use dojo_admin::db::{admissions, students};
use dojo_admin::token;
use dojo_admin::verification::{verify_email, VerifyTarget};
use dojo_common::db::init_database;
use dojo_common::Error;

async fn scratch_pool() -> (sqlx::SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = init_database(&dir.path().join("test.db"))
        .await
        .expect("init_database");
    (pool, dir)
}

fn new_admission(email: &str, phone: &str, token: &str) -> admissions::NewAdmission {
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
        verification_token: token.to_string(),
    }
}

#[tokio::test]
async fn verify_flips_the_flag_and_clears_the_token() {
    let (pool, _dir) = scratch_pool().await;
    let token = token::issue();

    let admission = admissions::insert(&pool, &new_admission("a@x.com", "9990001111", &token))
        .await
        .unwrap();
    assert!(!admission.email_verified);
    assert_eq!(admission.verification_token.as_deref(), Some(token.as_str()));

    let outcome = verify_email(&pool, VerifyTarget::Admission, &token, "a@x.com")
        .await
        .unwrap();
    assert!(!outcome.already_verified);
    assert_eq!(outcome.record_id, admission.id);
    assert_eq!(outcome.first_name, "Asha");

    let reloaded = admissions::get(&pool, admission.id).await.unwrap().unwrap();
    assert!(reloaded.email_verified);
    assert!(reloaded.verification_token.is_none());
}

#[tokio::test]
async fn second_visit_to_the_same_link_fails_not_found() {
    let (pool, _dir) = scratch_pool().await;
    let token = token::issue();

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111", &token))
        .await
        .unwrap();

    verify_email(&pool, VerifyTarget::Admission, &token, "a@x.com")
        .await
        .unwrap();

    // The token was cleared by the first success, so the pair no longer
    // matches any record.
    let second = verify_email(&pool, VerifyTarget::Admission, &token, "a@x.com").await;
    assert!(matches!(second, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn token_with_someone_elses_email_fails_not_found() {
    let (pool, _dir) = scratch_pool().await;
    let token_a = token::issue();
    let token_b = token::issue();

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111", &token_a))
        .await
        .unwrap();
    admissions::insert(&pool, &new_admission("b@x.com", "9990002222", &token_b))
        .await
        .unwrap();

    let result = verify_email(&pool, VerifyTarget::Admission, &token_a, "b@x.com").await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    // Neither record was mutated
    let rows: Vec<(bool,)> = sqlx::query_as("SELECT email_verified FROM admissions")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert!(rows.iter().all(|(verified,)| !verified));
}

#[tokio::test]
async fn unknown_token_fails_not_found() {
    let (pool, _dir) = scratch_pool().await;

    admissions::insert(&pool, &new_admission("a@x.com", "9990001111", &token::issue()))
        .await
        .unwrap();

    let result =
        verify_email(&pool, VerifyTarget::Admission, &token::issue(), "a@x.com").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn legacy_verified_row_with_leftover_token_is_a_noop() {
    let (pool, _dir) = scratch_pool().await;
    let token = token::issue();

    let admission = admissions::insert(&pool, &new_admission("a@x.com", "9990001111", &token))
        .await
        .unwrap();

    // Simulate a row migrated before token-clearing existed
    sqlx::query("UPDATE admissions SET email_verified = 1 WHERE id = ?")
        .bind(admission.id)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = verify_email(&pool, VerifyTarget::Admission, &token, "a@x.com")
        .await
        .unwrap();
    assert!(outcome.already_verified);

    // The defensive branch must not touch the row
    let reloaded = admissions::get(&pool, admission.id).await.unwrap().unwrap();
    assert!(reloaded.email_verified);
    assert_eq!(reloaded.verification_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn student_registration_verifies_with_its_batch() {
    let (pool, _dir) = scratch_pool().await;
    let token = token::issue();

    let registration = students::insert(
        &pool,
        &students::NewStudentRegistration {
            first_name: "Kiran".to_string(),
            last_name: "Naik".to_string(),
            email: "k@x.com".to_string(),
            phone: "9990003333".to_string(),
            batch: "batch2".to_string(),
            verification_token: token.clone(),
        },
    )
    .await
    .unwrap();

    let outcome = verify_email(&pool, VerifyTarget::StudentRegistration, &token, "k@x.com")
        .await
        .unwrap();
    assert!(!outcome.already_verified);
    assert_eq!(outcome.batch.as_deref(), Some("batch2"));

    // Verified students become visible to login
    let student = students::find_verified_by_email(&pool, "k@x.com")
        .await
        .unwrap()
        .expect("student should be verified");
    assert_eq!(student.id, registration.id);
}
