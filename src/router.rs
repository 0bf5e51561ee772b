use axum::{
    Router,
    routing::{any, get, get_service},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::AssetsConfig;
use crate::db::{PatientsStorage, Storage};
use crate::handlers::login::login_handler;
use crate::handlers::patients::{
    delete_patient_handler, list_patients_handler, register_patient_handler,
};
use crate::pages::{LOGIN_PAGE, Pages, REGISTRATION_PAGE, WELCOME_PAGE};
use crate::service::CredentialVerifier;

/// Shared per-request state: cheap clones of the storage handles.
#[derive(Clone)]
pub struct RegistryState {
    pub patients: PatientsStorage,
    pub verifier: CredentialVerifier,
    pub pages: Pages,
    pub assets: Arc<AssetsConfig>,
}

impl RegistryState {
    pub fn new(storage: &Storage, assets: AssetsConfig) -> Self {
        Self {
            patients: storage.patients(),
            verifier: CredentialVerifier::new(storage.credentials()),
            pages: Pages::new(assets.templates_dir.clone()),
            assets: Arc::new(assets),
        }
    }
}

pub fn registry_router(state: RegistryState) -> Router {
    let pages = state.pages.clone();
    let assets = state.assets.clone();

    Router::new()
        .route("/", get_service(pages.serve(LOGIN_PAGE)))
        .route(
            "/login",
            get_service(pages.serve(LOGIN_PAGE)).post(login_handler),
        )
        .route("/welcome", get_service(pages.serve(WELCOME_PAGE)))
        .route(
            "/cadastro",
            get_service(pages.serve(REGISTRATION_PAGE)).post(register_patient_handler),
        )
        .route("/patients", get(list_patients_handler))
        .route("/delete-patient", any(delete_patient_handler))
        .nest_service("/style", ServeDir::new(&assets.style_dir))
        .nest_service("/img", ServeDir::new(&assets.img_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
