use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{Navigator, TicketGateway};
use crate::view::RenderOptions;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub gateway: Arc<dyn TicketGateway>,
    pub navigator: Arc<dyn Navigator>,
    pub render: RenderOptions,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        gateway: Arc<dyn TicketGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            gateway,
            navigator,
            render: RenderOptions::default(),
        }
    }
}
