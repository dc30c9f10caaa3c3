//! Staff account operations
//!
//! Passwords are stored as salted SHA-256 digests. The admin account is
//! seeded from configuration on every startup so a rotated password takes
//! effect without manual surgery.

use dojo_common::config::AdminConfig;
use dojo_common::db::models::User;
use dojo_common::Result;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

/// Salted password digest as 64 hex characters
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 128-bit random salt as hex
pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Constant-shape comparison of a candidate password against a stored digest
pub fn verify_password(user: &User, password: &str) -> bool {
    hash_password(password, &user.password_salt) == user.password_hash
}

/// Seed or refresh the admin account from configuration.
pub async fn ensure_admin(pool: &SqlitePool, admin: &AdminConfig) -> Result<()> {
    let salt = generate_salt();
    let hash = hash_password(&admin.password, &salt);

    sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, password_salt, role)
        VALUES ('admin', ?, ?, ?, 'admin')
        ON CONFLICT(username) DO UPDATE SET
            email = excluded.email,
            password_hash = excluded.password_hash,
            password_salt = excluded.password_salt
        "#,
    )
    .bind(&admin.email)
    .bind(&hash)
    .bind(&salt)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_admin_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? AND role = 'admin'")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_depends_on_salt() {
        let a = hash_password("karate@123", "salt-one");
        let b = hash_password("karate@123", "salt-two");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(
            hash_password("secret", "salt"),
            hash_password("secret", "salt")
        );
    }
}
