//! Email verification workflow
//!
//! A pending record carries a verification token; visiting the emailed link
//! supplies that token together with the address. The lookup requires both to
//! match the same row, and the flag flip and token clear happen in one UPDATE
//! guarded by the token still being present, so two concurrent attempts on
//! one record can never both observe a fresh success.

use dojo_common::{Error, Result};
use sqlx::{Row, SqlitePool};

/// Which registration table a verification link targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyTarget {
    Admission,
    StudentRegistration,
}

impl VerifyTarget {
    fn table(&self) -> &'static str {
        match self {
            VerifyTarget::Admission => "admissions",
            VerifyTarget::StudentRegistration => "student_registrations",
        }
    }
}

/// Result of a successful verification call
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// True when the record was verified before this call (legacy rows with
    /// a leftover token, or a concurrent attempt that won the race). No side
    /// effects fire on this branch.
    pub already_verified: bool,
    pub record_id: i64,
    pub first_name: String,
    pub email: String,
    /// Batch name, present for student registrations only
    pub batch: Option<String>,
}

/// Verify a token+email pair against a pending record.
///
/// Fails with `Error::NotFound` when no record matches both values: an
/// unknown token, a token belonging to a different address, or a token
/// already cleared by an earlier success.
pub async fn verify_email(
    pool: &SqlitePool,
    target: VerifyTarget,
    token: &str,
    email: &str,
) -> Result<VerifyOutcome> {
    // Single combined lookup: the token alone does not authorize anything.
    let sql = match target {
        VerifyTarget::Admission => {
            "SELECT id, first_name, email_verified FROM admissions \
             WHERE email = ? AND verification_token = ?"
        }
        VerifyTarget::StudentRegistration => {
            "SELECT id, first_name, email_verified, batch FROM student_registrations \
             WHERE email = ? AND verification_token = ?"
        }
    };

    let row = sqlx::query(sql)
        .bind(email)
        .bind(token)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(Error::NotFound(
            "Invalid or expired verification link".to_string(),
        ));
    };

    let record_id: i64 = row.get("id");
    let first_name: String = row.get("first_name");
    let email_verified: bool = row.get("email_verified");
    let batch: Option<String> = match target {
        VerifyTarget::StudentRegistration => Some(row.get("batch")),
        VerifyTarget::Admission => None,
    };

    // A verified row with its token still present should not exist, but
    // rows migrated before token-clearing was introduced can look like
    // this. Treat them as a no-op success.
    if email_verified {
        return Ok(VerifyOutcome {
            already_verified: true,
            record_id,
            first_name,
            email: email.to_string(),
            batch,
        });
    }

    // Flip the flag and clear the token in one statement, guarded by the
    // token: of two concurrent attempts, exactly one updates a row here.
    let update_sql = format!(
        "UPDATE {} SET email_verified = 1, verification_token = NULL \
         WHERE id = ? AND verification_token = ?",
        target.table()
    );

    let result = sqlx::query(&update_sql)
        .bind(record_id)
        .bind(token)
        .execute(pool)
        .await?;

    // Zero rows means a concurrent attempt cleared the token between the
    // lookup and the update; report already-verified so side effects fire
    // at most once.
    let already_verified = result.rows_affected() == 0;

    Ok(VerifyOutcome {
        already_verified,
        record_id,
        first_name,
        email: email.to_string(),
        batch,
    })
}
