//! Shared application state injected into all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{AuthService, RedirectService, SoftwareService};
use crate::domain::repositories::LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub software_service: Arc<SoftwareService>,
    pub auth_service: Arc<AuthService>,
    /// Kept alongside the services for the health probe.
    pub link_repository: Arc<dyn LinkRepository>,
    /// Diagnostic log destination, when file logging is configured.
    pub log_file: Option<PathBuf>,
}
