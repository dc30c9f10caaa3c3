//! API handlers for dojo-admin
//!
//! One module per entity; each exposes a `*_routes()` builder merged into the
//! application router.

pub mod admissions;
pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod batches;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod health;
pub mod instructors;
pub mod payments;
pub mod registrations;
pub mod store;
pub mod students;
pub mod tournaments;
pub mod verify;

use serde::Serialize;

/// 201 body: the stored row plus a human-readable confirmation
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    pub message: String,
}

/// Lowercase, trimmed email
pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Digits-only phone number
pub(crate) fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Build a verification link carrying the token and address as query
/// parameters.
pub(crate) fn verification_link(base_url: &str, path: &str, token: &str, email: &str) -> String {
    let endpoint = format!("{}{}", base_url.trim_end_matches('/'), path);
    match reqwest::Url::parse_with_params(&endpoint, &[("token", token), ("email", email)]) {
        Ok(url) => url.to_string(),
        // Unparseable base URL; fall back to naive concatenation
        Err(_) => format!("{}?token={}&email={}", endpoint, token, email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_and_trimmed() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }

    #[test]
    fn phone_keeps_digits_only() {
        assert_eq!(normalize_phone("+91 99900-01111"), "919990001111");
    }

    #[test]
    fn link_escapes_the_email_parameter() {
        let link = verification_link("http://localhost:7750/", "/verify-email", "tok", "a+b@x.com");
        assert!(link.starts_with("http://localhost:7750/verify-email?"));
        assert!(link.contains("token=tok"));
        assert!(!link.contains("a+b@x.com"), "email must be percent-encoded");
    }
}
