use crate::contact::ContactSubmitter;
use crate::images::ImageResolver;
use crate::sources::DataStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Cached table loads over the configured record source (local or remote).
    pub data: DataStore,
    pub images: ImageResolver,
    /// Write path for the contact form. Disabled without a records API key.
    pub contact: ContactSubmitter,
}
