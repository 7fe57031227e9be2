use cryptocharger_engine::Dashboard;

/// Shared application state accessible by all route handlers.
pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}
