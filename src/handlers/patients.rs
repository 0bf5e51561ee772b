use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::middleware::{PatientForm, PatientId};
use crate::{RegistryError, router::RegistryState};

#[derive(Debug, Default, Deserialize)]
pub struct PatientsQuery {
    #[serde(default)]
    pub busca: String,
}

/// GET /patients -> rendered list, optionally filtered by `busca`.
/// Read-only: id parameters are ignored here, deletion lives at
/// `/delete-patient`.
pub async fn list_patients_handler(
    State(state): State<RegistryState>,
    Query(query): Query<PatientsQuery>,
) -> Result<Html<String>, RegistryError> {
    let patients = state.patients.list(Some(&query.busca)).await?;
    debug!(count = patients.len(), busca = %query.busca, "patients listed");
    state.pages.render_patients(&patients, &query.busca).await
}

/// POST /cadastro -> insert and go back to the list.
pub async fn register_patient_handler(
    State(state): State<RegistryState>,
    PatientForm(patient): PatientForm,
) -> Result<Redirect, RegistryError> {
    info!(name = %patient.name, age = patient.age, "registering patient");
    let id = state.patients.insert(&patient).await?;
    info!(id, "patient registered");
    Ok(Redirect::to("/patients"))
}

/// Any method on /delete-patient?id=N -> delete and go back to the list.
pub async fn delete_patient_handler(
    State(state): State<RegistryState>,
    PatientId(id): PatientId,
) -> Result<Redirect, RegistryError> {
    state.patients.delete(id).await?;
    info!(id, "patient deleted");
    Ok(Redirect::to("/patients"))
}
