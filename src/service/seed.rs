use crate::db::CredentialsStorage;
use crate::error::RegistryError;
use crate::service::password::hash_password;
use tracing::info;

/// Create the operator account, or reset its password if it already exists.
pub async fn seed_operator(
    storage: &CredentialsStorage,
    username: &str,
    password: &str,
    iterations: u32,
) -> Result<(), RegistryError> {
    if username.is_empty() || password.is_empty() {
        return Err(RegistryError::EmptyCredentials);
    }

    let password = password.to_owned();
    let encoded =
        tokio::task::spawn_blocking(move || hash_password(&password, iterations)).await?;
    storage.upsert(username, &encoded).await?;

    info!(username, iterations, "operator account seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::{StorageRole, connect};
    use crate::service::auth::CredentialVerifier;

    #[tokio::test]
    async fn reseeding_replaces_the_password() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("login.sqlite").display());
        let storage = CredentialsStorage::new(
            connect(StorageRole::Credentials, &url, 1).await.unwrap(),
        );

        seed_operator(&storage, "ana", "123", 1_000).await.unwrap();
        seed_operator(&storage, "ana", "456", 1_000).await.unwrap();

        let verifier = CredentialVerifier::new(storage.clone());
        assert!(verifier.verify("ana", "123").await.is_err());
        verifier.verify("ana", "456").await.unwrap();

        let stored = storage.password_hash("ana").await.unwrap().unwrap();
        assert!(stored.starts_with("pbkdf2-sha256$1000$"));
    }

    #[tokio::test]
    async fn blank_seed_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("login.sqlite").display());
        let storage = CredentialsStorage::new(
            connect(StorageRole::Credentials, &url, 1).await.unwrap(),
        );
        assert!(matches!(
            seed_operator(&storage, "ana", "", 1_000).await,
            Err(RegistryError::EmptyCredentials)
        ));
        assert_eq!(storage.password_hash("ana").await.unwrap(), None);
    }
}
