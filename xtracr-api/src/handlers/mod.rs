pub mod session;
pub mod status;

use actix_web::web;
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::integrations::BackendClient;
use crate::jobs::{FormSession, SharedSession};

/// Largest PDF accepted by the upload route
pub const MAX_PDF_BYTES: usize = 50 * 1024 * 1024;

/// Shared state for the command API
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub backend: Arc<BackendClient>,
    pub config: SessionConfig,
}

impl AppState {
    pub fn new(backend: BackendClient, config: SessionConfig) -> Self {
        let backend = Arc::new(backend);
        Self {
            session: SharedSession::new(FormSession::new(config.clone()), backend.clone()),
            backend,
            config,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PDF_BYTES))
        .route("/api/status", web::get().to(status::check_status))
        .route("/api/salesperson-values", web::get().to(status::salesperson_values))
        .route("/api/session", web::get().to(session::get_session))
        .route("/api/session/init", web::post().to(session::init_session))
        .route("/api/session/fields", web::put().to(session::update_field))
        .route("/api/session/builder/search", web::post().to(session::search_builders))
        .route("/api/session/builder/select", web::post().to(session::select_builder))
        .route("/api/session/builder/clear", web::post().to(session::clear_builder))
        .route("/api/session/upload", web::post().to(session::upload_pdf))
        .route("/api/session/clear", web::post().to(session::clear_extracted))
        .route("/api/session/customer", web::post().to(session::submit_customer))
        .route("/api/session/job", web::post().to(session::submit_job));
}
