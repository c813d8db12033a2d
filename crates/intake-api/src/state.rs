//! Application state shared by all handlers.

use crate::services::IntakeService;
use intake_core::Config;
use std::sync::Arc;

/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub intake: Arc<IntakeService>,
}

impl AppState {
    pub fn new(config: Config, intake: IntakeService) -> Arc<Self> {
        Arc::new(Self {
            config,
            intake: Arc::new(intake),
        })
    }
}
