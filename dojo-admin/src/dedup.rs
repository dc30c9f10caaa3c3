//! Duplicate-submission guard
//!
//! Each incoming record is checked once per uniqueness key before insertion.
//! The lookup exists to produce a clear conflict message; the unique index on
//! the column remains the source of truth, so a race between two concurrent
//! submissions is still rejected by the constraint and mapped to the same
//! conflict error via [`conflict_on_unique`].

use crate::error::{ApiError, ApiResult};
use dojo_common::Result;
use sqlx::SqlitePool;

/// A uniqueness key attached to an incoming submission.
///
/// Keys are checked independently; the first collision found determines the
/// reported reason.
#[derive(Debug, Clone, Copy)]
pub enum DedupKey<'a> {
    AdmissionEmail(&'a str),
    AdmissionPhone(&'a str),
    RegistrationEmail(&'a str),
    PaymentTxnId(&'a str),
    PaymentImageHash(&'a str),
}

impl<'a> DedupKey<'a> {
    fn table(&self) -> &'static str {
        match self {
            DedupKey::AdmissionEmail(_) | DedupKey::AdmissionPhone(_) => "admissions",
            DedupKey::RegistrationEmail(_) => "student_registrations",
            DedupKey::PaymentTxnId(_) | DedupKey::PaymentImageHash(_) => "fees_payments",
        }
    }

    fn column(&self) -> &'static str {
        match self {
            DedupKey::AdmissionEmail(_) | DedupKey::RegistrationEmail(_) => "email",
            DedupKey::AdmissionPhone(_) => "phone",
            DedupKey::PaymentTxnId(_) => "txn_id",
            DedupKey::PaymentImageHash(_) => "img_hash",
        }
    }

    fn value(&self) -> &'a str {
        match self {
            DedupKey::AdmissionEmail(v)
            | DedupKey::AdmissionPhone(v)
            | DedupKey::RegistrationEmail(v)
            | DedupKey::PaymentTxnId(v)
            | DedupKey::PaymentImageHash(v) => v,
        }
    }

    /// User-facing conflict reason naming the colliding key
    pub fn conflict_message(&self) -> &'static str {
        match self {
            DedupKey::AdmissionEmail(_) => "This email is already registered",
            DedupKey::AdmissionPhone(_) => "This phone number is already registered",
            DedupKey::RegistrationEmail(_) => "Student with this email already exists",
            DedupKey::PaymentTxnId(_) => "Duplicate transaction ID",
            DedupKey::PaymentImageHash(_) => "Duplicate screenshot detected",
        }
    }
}

/// Advisory lookup: does a record with this key already exist?
pub async fn check_duplicate(pool: &SqlitePool, key: &DedupKey<'_>) -> Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
        key.table(),
        key.column()
    );

    let exists: bool = sqlx::query_scalar(&sql)
        .bind(key.value())
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Check every key of a submission, rejecting on the first collision.
pub async fn ensure_unique(pool: &SqlitePool, keys: &[DedupKey<'_>]) -> ApiResult<()> {
    for key in keys {
        if check_duplicate(pool, key).await? {
            return Err(ApiError::Conflict(key.conflict_message().to_string()));
        }
    }
    Ok(())
}

/// Map a storage error from an insert into the dedup taxonomy.
///
/// A unique-index violation means a concurrent submission won the race after
/// the advisory check passed; it is reported as the same conflict the guard
/// would have raised.
pub fn conflict_on_unique(err: dojo_common::Error, message: &str) -> ApiError {
    if err.is_unique_violation() {
        ApiError::Conflict(message.to_string())
    } else {
        ApiError::from(err)
    }
}
