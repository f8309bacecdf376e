//! Backend construction

use std::sync::Arc;

use tracing::info;

use crate::{
    backend::{HttpRoomBackend, InMemoryRoomBackend, RoomBackend},
    Config, Result,
};

/// Pick the room backend: the configured HTTP server, or a process-local
/// store when running offline.
pub fn init_backend(config: &Config, offline: bool) -> Result<Arc<dyn RoomBackend>> {
    if offline {
        info!("Using in-memory room backend");
        return Ok(Arc::new(InMemoryRoomBackend::new()));
    }

    let backend = HttpRoomBackend::new(&config.backend)?;
    info!(base_url = %backend.base_url(), "Using HTTP room backend");
    Ok(Arc::new(backend))
}
