//! Room persistence backends
//!
//! The directory only talks to [`RoomBackend`]; where rooms are actually
//! stored is up to the implementation.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::{
    models::{Room, RoomScope},
    Result,
};

pub use http::HttpRoomBackend;
pub use memory::InMemoryRoomBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomBackend: Send + Sync {
    /// Rooms created by `owner`
    async fn list_rooms_for_owner(&self, owner: &str) -> Result<Vec<Room>>;

    /// Rooms of every owner
    async fn list_all_rooms(&self) -> Result<Vec<Room>>;

    async fn add_room(&self, room: &Room) -> Result<()>;

    async fn delete_room(&self, room: &Room) -> Result<()>;
}

/// Fetch the rooms in `scope`.
///
/// Owner-scoped results are filtered again on our side so a regular user
/// never sees someone else's room, whatever the backend returns.
pub async fn list_rooms(backend: &dyn RoomBackend, scope: &RoomScope) -> Result<Vec<Room>> {
    match scope {
        RoomScope::Global => backend.list_all_rooms().await,
        RoomScope::Owner(owner) => {
            let mut rooms = backend.list_rooms_for_owner(owner).await?;
            let before = rooms.len();
            rooms.retain(|room| room.is_owned_by(owner));
            if rooms.len() != before {
                tracing::warn!(
                    owner = %owner,
                    dropped = before - rooms.len(),
                    "Backend returned rooms outside the owner scope"
                );
            }
            Ok(rooms)
        }
    }
}
