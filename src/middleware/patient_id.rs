use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::RegistryError;

/// Query parameter names accepted for the patient id.
pub const PATIENT_ID_PARAMS: [&str; 2] = ["id", "patientId"];

/// Patient id taken from the query string (`?id=` or `?patientId=`),
/// regardless of the request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientId(pub i64);

impl<S> FromRequestParts<S> for PatientId
where
    S: Send + Sync,
{
    type Rejection = RegistryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_patient_id(parts.uri.query()).map(PatientId)
    }
}

pub fn parse_patient_id(query: Option<&str>) -> Result<i64, RegistryError> {
    let raw = query
        .and_then(|qs| {
            url::form_urlencoded::parse(qs.as_bytes())
                .find(|(k, _)| PATIENT_ID_PARAMS.contains(&&**k))
                .map(|(_, v)| v.into_owned())
        })
        .filter(|v| !v.is_empty())
        .ok_or(RegistryError::MissingPatientId)?;

    raw.parse::<i64>()
        .map_err(|_| RegistryError::InvalidPatientId(raw))
}
