//! Domain logic for the annotation backend.
//!
//! Pure building blocks shared by the persistence and API layers:
//! encoding detection, CSV row addressing, completion/throughput math,
//! and the project lifecycle rules. No I/O beyond file reads in
//! [`encoding`]; everything here is unit-testable without a database.

pub mod categories;
pub mod encoding;
pub mod error;
pub mod project;
pub mod source;
pub mod stats;
pub mod types;
