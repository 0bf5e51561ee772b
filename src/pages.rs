//! Server-rendered pages.
//!
//! Static pages are streamed straight from the templates directory. The
//! patient list is the only dynamic page: `patients.html` is read on every
//! request and rendered as a tera template.

use axum::response::Html;
use std::path::PathBuf;
use tera::{Context, Tera};
use tower_http::services::ServeFile;

use crate::db::Patient;
use crate::error::RegistryError;

pub const LOGIN_PAGE: &str = "login.html";
pub const WELCOME_PAGE: &str = "welcome.html";
pub const REGISTRATION_PAGE: &str = "cadastro.html";
pub const PATIENTS_TEMPLATE: &str = "patients.html";

#[derive(Debug, Clone)]
pub struct Pages {
    templates_dir: PathBuf,
}

impl Pages {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn serve(&self, page: &str) -> ServeFile {
        ServeFile::new(self.templates_dir.join(page))
    }

    /// Render `patients.html` with `patients` and `busca` in the context.
    /// The `.html` name keeps tera's autoescaping on for every value.
    pub async fn render_patients(
        &self,
        patients: &[Patient],
        search: &str,
    ) -> Result<Html<String>, RegistryError> {
        let path = self.templates_dir.join(PATIENTS_TEMPLATE);
        let source = tokio::fs::read_to_string(&path).await.map_err(|e| {
            RegistryError::RenderError(format!("loading {}: {e}", path.display()))
        })?;

        let mut tera = Tera::default();
        tera.add_raw_template(PATIENTS_TEMPLATE, &source)?;

        let mut context = Context::new();
        context.insert("patients", patients);
        context.insert("busca", search);

        Ok(Html(tera.render(PATIENTS_TEMPLATE, &context)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<input value="{{ busca }}"><table>
{% for p in patients %}<tr><td>{{ p.id }}</td><td>{{ p.name }}</td><td><form method="post" action="/delete-patient?id={{ p.id }}"></form></td></tr>
{% endfor %}</table>"#;

    fn patient(id: i64, name: &str) -> Patient {
        Patient {
            id,
            name: name.to_string(),
            national_id: "111".to_string(),
            age: 30,
            sex: "F".to_string(),
            smokes: "no".to_string(),
            drinks_alcohol: "no".to_string(),
        }
    }

    fn pages_with(template: &str) -> (tempfile::TempDir, Pages) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PATIENTS_TEMPLATE), template).unwrap();
        let pages = Pages::new(dir.path());
        (dir, pages)
    }

    #[tokio::test]
    async fn renders_rows_and_search_term_escaped() {
        let (_dir, pages) = pages_with(TEMPLATE);

        let Html(body) = pages
            .render_patients(&[patient(4, "<Ana>")], "\"ana")
            .await
            .unwrap();

        assert!(body.contains("<input value=\"&quot;ana\">"));
        assert!(body.contains("<td>&lt;Ana&gt;</td>"));
        assert!(body.contains("action=\"/delete-patient?id=4\""));
    }

    #[tokio::test]
    async fn search_term_is_never_expanded_as_markup() {
        let (_dir, pages) = pages_with(TEMPLATE);

        let Html(body) = pages
            .render_patients(&[patient(7, "Ana")], "{{patients}}")
            .await
            .unwrap();

        let input_line = body.lines().next().unwrap();
        assert_eq!(input_line, "<input value=\"{{patients}}\"><table>");
        assert_eq!(body.matches("<tr>").count(), 1);
    }

    #[tokio::test]
    async fn missing_template_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let pages = Pages::new(dir.path());
        assert!(matches!(
            pages.render_patients(&[], "").await,
            Err(RegistryError::RenderError(_))
        ));
    }

    #[tokio::test]
    async fn unknown_variable_is_a_render_error() {
        let (_dir, pages) = pages_with("<table>{{ pacientes }}</table>");
        assert!(matches!(
            pages.render_patients(&[], "").await,
            Err(RegistryError::RenderError(_))
        ));
    }

    #[tokio::test]
    async fn malformed_template_is_a_render_error() {
        let (_dir, pages) = pages_with("{% for p in patients %}<tr>");
        assert!(matches!(
            pages.render_patients(&[], "").await,
            Err(RegistryError::RenderError(_))
        ));
    }
}
