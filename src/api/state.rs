use crate::core::AppConfig;
use crate::session::Coordinator;

pub struct AppState {
    pub coordinator: Coordinator,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(coordinator: Coordinator, config: AppConfig) -> Self {
        Self {
            coordinator,
            config,
        }
    }
}
