use crate::config::Config;
use crate::history::store::VersionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub versions: VersionStore,
    pub config: Config,
}
