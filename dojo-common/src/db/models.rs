//! Row models for the dojo schema
//!
//! Timestamps are stored as SQLite text (`CURRENT_TIMESTAMP` / RFC 3339) and
//! surfaced as strings; handlers treat them as opaque.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Admission enquiry submitted from the public site.
///
/// Exactly one of two states: pending (`email_verified` false, token set) or
/// verified (`email_verified` true, token null). Legacy rows may be verified
/// with a leftover token; the verification workflow treats those as no-ops.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admission {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: Option<i64>,
    pub belt_level: Option<String>,
    pub address: Option<String>,
    pub centre: Option<String>,
    pub batch_timing: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub verification_sent_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Student account registration (grants dashboard login once verified)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentRegistration {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub batch: String,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    pub verification_sent_at: Option<String>,
    pub created_at: String,
}

/// Fee payment submission with optional dedup keys (txn id, screenshot hash)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeesPayment {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub batch_name: String,
    pub centre: String,
    pub payment_datetime: String,
    pub status: String,
    pub txn_id: Option<String>,
    pub amount: Option<f64>,
    pub img_hash: Option<String>,
    pub screenshot_base64: Option<String>,
    pub validation_json: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub rank: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Batch {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub timing: Option<String>,
    pub centre: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Manually recorded payment in the admin ledger
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: i64,
    pub student_name: String,
    pub amount: f64,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tournament {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub grade_info: Option<String>,
    pub date: String,
    pub belt: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub created_at: String,
}

/// Store order joined with its item (name, price, derived total)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreOrderDetail {
    pub id: i64,
    pub store_item_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub centre: String,
    pub batch: String,
    pub quantity: i64,
    pub status: String,
    pub created_at: String,
    pub item_name: String,
    pub item_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_name: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: i64,
    pub text: String,
    pub created_at: String,
}

/// Tournament sign-up joined with the tournament title/date
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TournamentRegistration {
    pub id: i64,
    pub tournament_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub centre: String,
    pub batch: String,
    pub created_at: String,
    pub tournament_title: String,
    pub tournament_date: String,
}

/// Exam sign-up joined with the exam title/date/belt
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExamRegistration {
    pub id: i64,
    pub exam_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub centre: String,
    pub batch: String,
    pub created_at: String,
    pub exam_title: String,
    pub exam_date: String,
    pub exam_belt: String,
}

/// Staff account (currently only the seeded admin)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    pub role: String,
    pub created_at: String,
}

/// Bearer session minted at login
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: String,
    pub subject: String,
    pub student_id: Option<i64>,
    pub student_batch: Option<String>,
    pub created_at: String,
    pub expires_at: String,
}
