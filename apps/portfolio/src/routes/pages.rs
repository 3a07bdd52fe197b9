use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Html,
    Form,
};
use tracing::debug;

use crate::contact::ContactForm;
use crate::errors::AppError;
use crate::pages::{compose, submit_contact, ContactView, Section};
use crate::state::AppState;

/// GET /
pub async fn handle_home(State(state): State<AppState>) -> Html<String> {
    Html(compose(&state, Section::Home, ContactView::default()).await)
}

/// GET /:section
pub async fn handle_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let section: Section = slug.parse().map_err(AppError::NotFound)?;
    debug!("Rendering section {section}");
    Ok(Html(compose(&state, section, ContactView::default()).await))
}

/// GET /contact
pub async fn handle_contact_page(State(state): State<AppState>) -> Html<String> {
    Html(compose(&state, Section::Contact, ContactView::default()).await)
}

/// POST /contact
pub async fn handle_contact_submit(
    State(state): State<AppState>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Html(submit_contact(&state, form).await))
}

/// Fallback for every unknown path.
pub async fn handle_not_found() -> AppError {
    AppError::NotFound("The page you are looking for does not exist".to_string())
}
