use crate::db::CredentialsStorage;
use crate::error::RegistryError;
use crate::service::password::verify_password;
use tracing::{debug, warn};

/// Checks operator credentials against the stored hashes.
#[derive(Clone)]
pub struct CredentialVerifier {
    storage: CredentialsStorage,
}

impl CredentialVerifier {
    pub fn new(storage: CredentialsStorage) -> Self {
        Self { storage }
    }

    /// `Ok(())` iff `username` exists and `password` matches its hash.
    ///
    /// Blank input short-circuits to `EmptyCredentials` without a lookup;
    /// an unknown user and a wrong password are indistinguishable
    /// (`InvalidCredentials`).
    pub async fn verify(&self, username: &str, password: &str) -> Result<(), RegistryError> {
        if username.is_empty() || password.is_empty() {
            return Err(RegistryError::EmptyCredentials);
        }

        let Some(stored) = self.storage.password_hash(username).await? else {
            debug!(username, "login attempt for unknown user");
            return Err(RegistryError::InvalidCredentials);
        };

        // PBKDF2 blocks for the full round count
        let password = password.to_owned();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await??;

        if matches {
            Ok(())
        } else {
            warn!(username, "login attempt with wrong password");
            Err(RegistryError::InvalidCredentials)
        }
    }
}
