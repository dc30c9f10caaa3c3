//! Database access shared across the dojo crates

pub mod init;
pub mod models;

pub use init::init_database;
