use crate::config::StorageConfig;
use crate::db::credentials::CredentialsStorage;
use crate::db::patients::PatientsStorage;
use crate::db::schema::{CREDENTIALS_INIT, PATIENTS_INIT};
use crate::error::RegistryError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// The two logical data sets kept apart by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageRole {
    Credentials,
    Patients,
}

impl StorageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageRole::Credentials => "credentials",
            StorageRole::Patients => "patients",
        }
    }

    fn schema(self) -> &'static str {
        match self {
            StorageRole::Credentials => CREDENTIALS_INIT,
            StorageRole::Patients => PATIENTS_INIT,
        }
    }
}

/// Open a pool for `role` and make sure its tables exist.
pub async fn connect(
    role: StorageRole,
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, RegistryError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_opts)
        .await?;
    init_schema(&pool, role).await?;
    info!(role = role.as_str(), "storage connected");
    Ok(pool)
}

/// Execute the bundled DDL for `role`.
pub async fn init_schema(pool: &SqlitePool, role: StorageRole) -> Result<(), RegistryError> {
    // sqlx::query runs a single statement at a time
    for stmt in role.schema().split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// Long-lived storage handles shared by every request.
#[derive(Clone)]
pub struct Storage {
    credentials: SqlitePool,
    patients: SqlitePool,
}

impl Storage {
    /// Connect both roles. Identical URLs share a single pool.
    pub async fn open(cfg: &StorageConfig) -> Result<Self, RegistryError> {
        let credentials = connect(
            StorageRole::Credentials,
            &cfg.credentials_url,
            cfg.max_connections,
        )
        .await?;

        let patients = if cfg.patients_url == cfg.credentials_url {
            init_schema(&credentials, StorageRole::Patients).await?;
            info!("patients share the credentials pool");
            credentials.clone()
        } else {
            connect(StorageRole::Patients, &cfg.patients_url, cfg.max_connections).await?
        };

        Ok(Self {
            credentials,
            patients,
        })
    }

    pub fn credentials(&self) -> CredentialsStorage {
        CredentialsStorage::new(self.credentials.clone())
    }

    pub fn patients(&self) -> PatientsStorage {
        PatientsStorage::new(self.patients.clone())
    }

    pub async fn close(&self) {
        self.patients.close().await;
        self.credentials.close().await;
    }
}
