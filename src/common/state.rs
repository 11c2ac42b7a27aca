use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chart::ChartController;
use crate::config::Config;
use crate::services::CachedSource;
use crate::source::DataClient;

pub type ServerController = ChartController<CachedSource<DataClient>>;

/// The chart is one shared page view; the mutex serialises refreshes against it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: Arc<Mutex<ServerController>>,
}

impl AppState {
    pub fn new(config: Config, controller: ServerController) -> Self {
        Self {
            config: Arc::new(config),
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}
