use crate::db::models::{NewPatient, Patient};
use crate::db::sqlite::SqlitePool;
use crate::error::RegistryError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct PatientsStorage {
    pool: SqlitePool,
}

impl PatientsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All patients ordered by name, or only those whose name contains
    /// `search` when it is non-empty. Matching folds case with Unicode rules
    /// (`Ângela` matches `ângela`); SQLite `LIKE` only folds ASCII.
    ///
    /// Rows that cannot be decoded into a full `Patient` are logged and
    /// skipped; they never fail the listing.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Patient>, RegistryError> {
        let rows = sqlx::query(
            r#"SELECT id, nome, cpf, idade, sexo, fuma, alcool
               FROM pacientes
               ORDER BY nome, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        let needle = search
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        Ok(rows
            .iter()
            .filter_map(|row| {
                Self::row_to_model(row)
                    .inspect_err(|e| warn!(error = %e, "skipping undecodable patient row"))
                    .ok()
            })
            .filter(|p| match &needle {
                Some(needle) => p.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .collect())
    }

    /// Insert a patient and return the id assigned by storage.
    pub async fn insert(&self, patient: &NewPatient) -> Result<i64, RegistryError> {
        let rec: (i64,) = sqlx::query_as(
            r#"INSERT INTO pacientes (nome, cpf, idade, sexo, fuma, alcool)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&patient.name)
        .bind(&patient.national_id)
        .bind(patient.age)
        .bind(&patient.sex)
        .bind(&patient.smokes)
        .bind(&patient.drinks_alcohol)
        .fetch_one(&self.pool)
        .await?;
        Ok(rec.0)
    }

    /// Delete by id. A missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), RegistryError> {
        let result = sqlx::query("DELETE FROM pacientes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id, rows = result.rows_affected(), "patient delete executed");
        Ok(())
    }

    fn row_to_model(row: &SqliteRow) -> Result<Patient, sqlx::Error> {
        Ok(Patient {
            id: row.try_get("id")?,
            name: row.try_get("nome")?,
            national_id: row.try_get("cpf")?,
            age: row.try_get("idade")?,
            sex: row.try_get("sexo")?,
            smokes: row.try_get("fuma")?,
            drinks_alcohol: row.try_get("alcool")?,
        })
    }
}
