use form_intake::config::RuntimeSettings;
use std::sync::Arc;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<dyn RuntimeSettings>,
    pub server_name: Arc<str>,
}

impl AppState {
    pub fn new(settings: Arc<dyn RuntimeSettings>, server_name: impl Into<Arc<str>>) -> Self {
        Self {
            settings,
            server_name: server_name.into(),
        }
    }
}
