pub mod health;
pub mod pages;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(pages::handle_home))
        .route(
            "/contact",
            get(pages::handle_contact_page).post(pages::handle_contact_submit),
        )
        .route("/:section", get(pages::handle_section))
        .fallback(pages::handle_not_found)
        .with_state(state)
}
