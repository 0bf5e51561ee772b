use crate::db::sqlite::SqlitePool;
use crate::error::RegistryError;

#[derive(Clone)]
pub struct CredentialsStorage {
    pool: SqlitePool,
}

impl CredentialsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Encoded password hash for an exact username match.
    pub async fn password_hash(&self, username: &str) -> Result<Option<String>, RegistryError> {
        let rec: Option<(String,)> = sqlx::query_as("SELECT senha FROM login WHERE usuario = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rec.map(|(hash,)| hash))
    }

    /// Insert or replace the hash stored for `username`.
    /// Uses SQLite `INSERT ... ON CONFLICT(usuario) DO UPDATE`.
    pub async fn upsert(&self, username: &str, password_hash: &str) -> Result<(), RegistryError> {
        sqlx::query(
            r#"
            INSERT INTO login (usuario, senha) VALUES (?, ?)
            ON CONFLICT(usuario) DO UPDATE SET senha = excluded.senha
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::{StorageRole, connect};

    #[tokio::test]
    async fn upsert_replaces_existing_hash() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("login.sqlite").display());
        let repo = CredentialsStorage::new(
            connect(StorageRole::Credentials, &url, 1).await.unwrap(),
        );

        assert_eq!(repo.password_hash("ana").await.unwrap(), None);

        repo.upsert("ana", "first").await.unwrap();
        repo.upsert("ana", "second").await.unwrap();

        assert_eq!(
            repo.password_hash("ana").await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(repo.password_hash("Ana").await.unwrap(), None);
    }
}
