pub mod login;
pub mod patients;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// `302 Found` redirect, as the login flow uses.
pub(crate) fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
