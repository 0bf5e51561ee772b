pub mod auth;
pub mod password;
pub mod seed;

pub use auth::CredentialVerifier;
pub use seed::seed_operator;
