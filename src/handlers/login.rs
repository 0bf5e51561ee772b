use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::found;
use crate::{RegistryError, router::RegistryState};

#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login -> `/welcome` on success.
///
/// Blank fields bounce back to the login page with an error flag; a body
/// that is not a form counts as blank. Bad credentials are a plain 401.
pub async fn login_handler(
    State(state): State<RegistryState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, RegistryError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "login body is not a form");
            LoginForm::default()
        }
    };

    state.verifier.verify(&form.username, &form.password).await?;
    info!(username = %form.username, "operator signed in");
    Ok(found("/welcome"))
}
