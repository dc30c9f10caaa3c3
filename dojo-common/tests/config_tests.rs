//! Tests for configuration loading and required-setting enforcement
//!
//! These tests mutate process environment variables, so they run serially.

use dojo_common::config::Config;
use dojo_common::Error;
use serial_test::serial;
use std::io::Write;

const DOJO_VARS: [&str; 12] = [
    "DOJO_CONFIG",
    "DOJO_HOST",
    "DOJO_PORT",
    "DOJO_DB_PATH",
    "DOJO_REDIS_URL",
    "DOJO_PUBLIC_URL",
    "DOJO_SESSION_TTL",
    "DOJO_MAIL_RELAY_URL",
    "DOJO_MAIL_API_KEY",
    "DOJO_MAIL_FROM",
    "DOJO_ADMIN_EMAIL",
    "DOJO_ADMIN_PASSWORD",
];

fn clear_env() {
    for var in DOJO_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (dir, path)
}

const FULL_CONFIG: &str = r#"
host = "127.0.0.1"
port = 8900
redis_url = "redis://cache:6379"
public_base_url = "https://dojo.example.com"

[mail]
relay_url = "https://relay.example.com"
api_key = "relay-key"
from_address = "noreply@example.com"

[admin]
email = "admin@example.com"
password = "top-secret"
"#;

#[test]
#[serial]
fn loads_a_complete_toml_file() {
    clear_env();
    let (_dir, path) = write_config(FULL_CONFIG);

    let config = Config::load(Some(path.as_path()), None).expect("load");

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8900);
    assert_eq!(config.redis_url, "redis://cache:6379");
    assert_eq!(config.public_base_url, "https://dojo.example.com");
    assert_eq!(config.mail.relay_url, "https://relay.example.com");
    assert_eq!(config.admin.email, "admin@example.com");
    assert_eq!(config.session_ttl_seconds, 86400);
}

#[test]
#[serial]
fn missing_admin_password_fails_loudly() {
    clear_env();
    let without_password = FULL_CONFIG.replace("password = \"top-secret\"", "");
    let (_dir, path) = write_config(&without_password);

    let result = Config::load(Some(path.as_path()), None);

    match result {
        Err(Error::Config(message)) => {
            assert!(
                message.contains("DOJO_ADMIN_PASSWORD"),
                "error should name the env var: {}",
                message
            );
        }
        other => panic!("expected Config error, got {:?}", other.map(|_| ())),
    }
}

#[test]
#[serial]
fn missing_mail_relay_fails_loudly() {
    clear_env();
    let without_relay = FULL_CONFIG.replace("relay_url = \"https://relay.example.com\"", "");
    let (_dir, path) = write_config(&without_relay);

    assert!(matches!(
        Config::load(Some(path.as_path()), None),
        Err(Error::Config(_))
    ));
}

#[test]
#[serial]
fn env_overrides_the_file() {
    clear_env();
    let (_dir, path) = write_config(FULL_CONFIG);
    std::env::set_var("DOJO_PORT", "9001");

    let config = Config::load(Some(path.as_path()), None).expect("load");
    assert_eq!(config.port, 9001);

    clear_env();
}

#[test]
#[serial]
fn cli_port_overrides_everything() {
    clear_env();
    let (_dir, path) = write_config(FULL_CONFIG);
    std::env::set_var("DOJO_PORT", "9001");

    let config = Config::load(Some(path.as_path()), Some(4444)).expect("load");
    assert_eq!(config.port, 4444);

    clear_env();
}

#[test]
#[serial]
fn explicit_config_path_must_exist() {
    clear_env();
    let missing = std::path::Path::new("/nonexistent/dojo/config.toml");

    assert!(matches!(
        Config::load(Some(missing), None),
        Err(Error::Config(_))
    ));
}
