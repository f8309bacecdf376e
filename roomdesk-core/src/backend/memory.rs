use async_trait::async_trait;
use parking_lot::RwLock;

use super::RoomBackend;
use crate::{models::Room, Error, Result};

/// Process-local room store, newest room first.
///
/// Enforces the `(owner, name)` uniqueness a real backend would.
#[derive(Debug, Default)]
pub struct InMemoryRoomBackend {
    rooms: RwLock<Vec<Room>>,
}

impl InMemoryRoomBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing rooms, kept in the given order
    #[must_use]
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.read().is_empty()
    }
}

#[async_trait]
impl RoomBackend for InMemoryRoomBackend {
    async fn list_rooms_for_owner(&self, owner: &str) -> Result<Vec<Room>> {
        Ok(self
            .rooms
            .read()
            .iter()
            .filter(|room| room.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn list_all_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.rooms.read().clone())
    }

    async fn add_room(&self, room: &Room) -> Result<()> {
        let mut rooms = self.rooms.write();
        if rooms
            .iter()
            .any(|r| r.owner == room.owner && r.name == room.name)
        {
            return Err(Error::AlreadyExists(format!("room {}", room.id())));
        }
        rooms.insert(0, room.clone());
        Ok(())
    }

    async fn delete_room(&self, room: &Room) -> Result<()> {
        let mut rooms = self.rooms.write();
        let position = rooms
            .iter()
            .position(|r| r.owner == room.owner && r.name == room.name)
            .ok_or_else(|| Error::NotFound(format!("room {}", room.id())))?;
        rooms.remove(position);
        Ok(())
    }
}
