use std::sync::Arc;

use service::ship::{ShipRepository, ShipService};

#[derive(Clone)]
pub struct ServerState {
    pub ships: Arc<ShipService<dyn ShipRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ShipRepository>) -> Self {
        Self { ships: Arc::new(ShipService::new(repo)) }
    }
}
