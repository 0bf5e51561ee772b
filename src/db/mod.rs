//! Database module: storage gateway, schema and the two repositories.
//!
//! Layout:
//! - `sqlite.rs`: connection handling per storage role (the gateway)
//! - `schema.rs`: SQL DDL for the `login` and `pacientes` tables
//! - `models.rs`: Rust structs mirroring patient rows
//! - `patients.rs` / `credentials.rs`: repositories issuing the SQL

pub mod credentials;
pub mod models;
pub mod patients;
pub mod schema;
pub mod sqlite;

pub use credentials::CredentialsStorage;
pub use models::{NewPatient, Patient};
pub use patients::PatientsStorage;
pub use sqlite::{SqlitePool, Storage, StorageRole};
