use axum::{
    Form,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::db::NewPatient;
use crate::error::RegistryError;

/// Raw registration form, field names as posted by `cadastro.html`.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub idade: String,
    #[serde(default)]
    pub sexo: String,
    #[serde(default)]
    pub fuma: String,
    #[serde(default)]
    pub alcool: String,
}

impl TryFrom<RegistrationForm> for NewPatient {
    type Error = RegistryError;

    fn try_from(form: RegistrationForm) -> Result<Self, Self::Error> {
        let age = form
            .idade
            .parse::<i64>()
            .map_err(|_| RegistryError::InvalidAge(form.idade.clone()))?;
        Ok(NewPatient {
            name: form.nome,
            national_id: form.cpf,
            age,
            sex: form.sexo,
            smokes: form.fuma,
            drinks_alcohol: form.alcool,
        })
    }
}

/// Validated registration: rejects with 400 before any storage access when
/// `idade` is not an integer.
pub struct PatientForm(pub NewPatient);

impl<S> FromRequest<S> for PatientForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = match Form::<RegistrationForm>::from_request(req, state).await {
            Ok(f) => f,
            Err(rejection) => return Err(rejection.into_response()),
        };

        match NewPatient::try_from(form) {
            Ok(patient) => Ok(PatientForm(patient)),
            Err(err) => {
                warn!(error = %err, "rejecting registration");
                Err(err.into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(idade: &str) -> RegistrationForm {
        RegistrationForm {
            nome: "Ana".into(),
            cpf: "111".into(),
            idade: idade.into(),
            sexo: "F".into(),
            fuma: "no".into(),
            alcool: "no".into(),
        }
    }

    #[test]
    fn valid_form_maps_every_field() {
        let patient = NewPatient::try_from(form("30")).unwrap();
        assert_eq!(
            patient,
            NewPatient {
                name: "Ana".into(),
                national_id: "111".into(),
                age: 30,
                sex: "F".into(),
                smokes: "no".into(),
                drinks_alcohol: "no".into(),
            }
        );
    }

    #[test]
    fn non_integer_age_is_rejected() {
        for idade in ["abc", "", "30.5", " 30"] {
            assert!(matches!(
                NewPatient::try_from(form(idade)),
                Err(RegistryError::InvalidAge(raw)) if raw == idade
            ));
        }
    }
}
