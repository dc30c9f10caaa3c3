//! Database access for dojo-admin
//!
//! One module per entity; each function takes the shared pool and returns
//! `dojo_common::Result`.

pub mod admissions;
pub mod announcements;
pub mod attendance;
pub mod batches;
pub mod dashboard;
pub mod exams;
pub mod fees;
pub mod instructors;
pub mod payments;
pub mod registrations;
pub mod sessions;
pub mod store;
pub mod students;
pub mod tournaments;
pub mod users;
