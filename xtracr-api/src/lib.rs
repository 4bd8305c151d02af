pub mod config;
pub mod handlers;
pub mod helpers;
pub mod integrations;
pub mod jobs;

pub use handlers::AppState;
pub use jobs::FormSession;
