//! Room directory: the room list screen's state and workflow
//!
//! Owns the in-memory room list, resolves which rooms the current user may
//! see, and mediates create/delete against the backend. Backend failures never
//! escape: they become error notifications and leave the list untouched.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::table::{self, Column, SortState, TableView};
use crate::{
    backend::{self, RoomBackend},
    capability::{Localizer, Navigator, Notifier, PassthroughLocalizer, Severity},
    config::RoomDefaultsConfig,
    models::{CurrentUser, Room, RoomScope, RoomStatus},
};

/// Progress of the initial room fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    /// The fetch failed; `load` may be called again
    Failed(String),
}

/// A delete the user has been asked to confirm.
///
/// Only [`RoomDirectory::prompt_delete`] hands these out, so a delete request
/// cannot be issued without going through the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    index: usize,
    owner: String,
    name: String,
    prompt: String,
}

impl DeleteRequest {
    /// Text of the confirmation dialog
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    fn matches(&self, room: &Room) -> bool {
        room.owner == self.owner && room.name == self.name
    }
}

#[derive(Debug)]
struct DirectoryState {
    load: LoadState,
    /// `None` until the first successful fetch
    rooms: Option<Vec<Room>>,
    sort: Option<SortState>,
    page: usize,
    creating: bool,
}

pub struct RoomDirectory {
    user: CurrentUser,
    defaults: RoomDefaultsConfig,
    backend: Arc<dyn RoomBackend>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    localizer: Arc<dyn Localizer>,
    state: Mutex<DirectoryState>,
}

impl std::fmt::Debug for RoomDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomDirectory")
            .field("user", &self.user.name)
            .field("state", &*self.state.lock())
            .finish()
    }
}

/// Clears the create-in-flight flag even if the create future is dropped
struct CreateGuard<'a> {
    state: &'a Mutex<DirectoryState>,
}

impl Drop for CreateGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().creating = false;
    }
}

impl RoomDirectory {
    pub fn new(
        user: CurrentUser,
        defaults: RoomDefaultsConfig,
        backend: Arc<dyn RoomBackend>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            user,
            defaults,
            backend,
            notifier,
            navigator,
            localizer: Arc::new(PassthroughLocalizer),
            state: Mutex::new(DirectoryState {
                load: LoadState::Unloaded,
                rooms: None,
                sort: None,
                page: 0,
                creating: false,
            }),
        }
    }

    #[must_use]
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    #[must_use]
    pub const fn user(&self) -> &CurrentUser {
        &self.user
    }

    #[must_use]
    pub fn scope(&self) -> RoomScope {
        self.user.room_scope()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state.lock().load.clone()
    }

    /// Snapshot of the list, `None` while not loaded
    #[must_use]
    pub fn rooms(&self) -> Option<Vec<Room>> {
        self.state.lock().rooms.clone()
    }

    /// Whether the add action should be enabled
    #[must_use]
    pub fn can_add(&self) -> bool {
        let state = self.state.lock();
        state.rooms.is_some() && !state.creating
    }

    /// Fetch the rooms visible to the current user.
    pub async fn load(&self) {
        let scope = self.scope();
        self.state.lock().load = LoadState::Loading;
        debug!(user = %self.user.name, scope = %scope, "Loading rooms");

        match backend::list_rooms(self.backend.as_ref(), &scope).await {
            Ok(rooms) => {
                info!(scope = %scope, count = rooms.len(), "Rooms loaded");
                let mut state = self.state.lock();
                state.rooms = Some(rooms);
                state.load = LoadState::Loaded;
                state.page = 0;
            }
            Err(e) => {
                warn!(scope = %scope, error = %e, "Failed to load rooms");
                self.state.lock().load = LoadState::Failed(e.to_string());
                self.notifier
                    .show_message(Severity::Error, &format!("Rooms failed to load: {e}"));
            }
        }
    }

    /// Room a create would send, numbered after the current list length
    fn default_room(&self, count: usize) -> Room {
        Room {
            owner: self.user.name.clone(),
            name: format!("room_{count}"),
            created_time: Utc::now().trunc_subsecs(0),
            display_name: format!("New Room - {count}"),
            conference: self.defaults.default_conference.clone(),
            meeting_number: self.defaults.default_meeting_number.clone(),
            passcode: self.defaults.default_passcode.clone(),
            invite_link: self.defaults.default_invite_link.clone(),
            participants: Vec::new(),
            status: RoomStatus::Ended,
            video_width: self.defaults.default_video_width,
            video_height: self.defaults.default_video_height,
        }
    }

    /// Create a default room and put it at the head of the list.
    ///
    /// Returns the new room on success. While a create is in flight further
    /// calls are ignored and return `None`.
    pub async fn create_room(&self) -> Option<Room> {
        let room = {
            let mut state = self.state.lock();
            if state.creating {
                debug!("Create already in flight, ignoring");
                return None;
            }
            let Some(rooms) = state.rooms.as_ref() else {
                drop(state);
                warn!("Create requested before rooms were loaded");
                self.notifier.show_message(
                    Severity::Error,
                    "Room failed to add: room list is not loaded",
                );
                return None;
            };
            let room = self.default_room(rooms.len());
            state.creating = true;
            room
        };
        let _guard = CreateGuard { state: &self.state };

        match self.backend.add_room(&room).await {
            Ok(()) => {
                info!(room = %room.id(), "Room added");
                if let Some(rooms) = self.state.lock().rooms.as_mut() {
                    rooms.insert(0, room.clone());
                }
                self.notifier
                    .show_message(Severity::Success, "Room added successfully");
                Some(room)
            }
            Err(e) => {
                warn!(room = %room.id(), error = %e, "Failed to add room");
                self.notifier
                    .show_message(Severity::Error, &format!("Room failed to add: {e}"));
                None
            }
        }
    }

    /// First step of a delete: describe what the user is about to confirm.
    ///
    /// `None` when `index` is out of range.
    #[must_use]
    pub fn prompt_delete(&self, index: usize) -> Option<DeleteRequest> {
        let state = self.state.lock();
        let room = state.rooms.as_ref()?.get(index)?;
        Some(DeleteRequest {
            index,
            owner: room.owner.clone(),
            name: room.name.clone(),
            prompt: table::delete_prompt(room),
        })
    }

    /// Confirmed delete. Removes the room from the list once the backend
    /// agrees; the remaining rows keep their order.
    pub async fn delete_room(&self, request: DeleteRequest) -> bool {
        // The list may have shifted (e.g. a create prepended) since the prompt
        let room = {
            let state = self.state.lock();
            state
                .rooms
                .as_ref()
                .and_then(|rooms| rooms.iter().find(|r| request.matches(r)))
                .cloned()
        };
        let Some(room) = room else {
            warn!(owner = %request.owner, name = %request.name, "Delete target no longer listed");
            self.notifier.show_message(
                Severity::Error,
                &format!(
                    "Room failed to delete: {}/{} is no longer listed",
                    request.owner, request.name
                ),
            );
            return false;
        };

        match self.backend.delete_room(&room).await {
            Ok(()) => {
                info!(room = %room.id(), "Room deleted");
                {
                    let mut state = self.state.lock();
                    if let Some(rooms) = state.rooms.as_mut() {
                        if let Some(position) = rooms.iter().position(|r| request.matches(r)) {
                            rooms.remove(position);
                        }
                    }
                    let page_count = page_count(state.rooms.as_ref().map_or(0, Vec::len), self.defaults.page_size);
                    state.page = state.page.min(page_count.saturating_sub(1));
                }
                self.notifier
                    .show_message(Severity::Success, "Room deleted successfully");
                true
            }
            Err(e) => {
                warn!(room = %room.id(), error = %e, "Failed to delete room");
                self.notifier
                    .show_message(Severity::Error, &format!("Room failed to delete: {e}"));
                false
            }
        }
    }

    /// Navigate to the edit view of the room at `index`
    pub fn edit_room(&self, index: usize) -> bool {
        let route = {
            let state = self.state.lock();
            state
                .rooms
                .as_ref()
                .and_then(|rooms| rooms.get(index))
                .map(Room::edit_route)
        };
        match route {
            Some(route) => {
                self.navigator.go_to(&route);
                true
            }
            None => false,
        }
    }

    /// Navigate to the room's conference. Only privileged users get a link.
    pub fn open_conference(&self, index: usize) -> bool {
        if !self.user.is_privileged() {
            return false;
        }
        let route = {
            let state = self.state.lock();
            state
                .rooms
                .as_ref()
                .and_then(|rooms| rooms.get(index))
                .and_then(Room::conference_route)
        };
        match route {
            Some(route) => {
                self.navigator.go_to(&route);
                true
            }
            None => false,
        }
    }

    /// Header click on `column`
    pub fn sort_by(&self, column: Column) {
        let mut state = self.state.lock();
        state.sort = SortState::after_click(state.sort, column);
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortState> {
        self.state.lock().sort
    }

    /// Jump to a table page, clamped to the last page
    pub fn set_page(&self, page: usize) {
        let mut state = self.state.lock();
        let count = page_count(state.rooms.as_ref().map_or(0, Vec::len), self.defaults.page_size);
        state.page = page.min(count.saturating_sub(1));
    }

    /// Current page of the table, sorted, ready to render
    #[must_use]
    pub fn table(&self) -> TableView {
        let state = self.state.lock();
        let columns = table::column_headers(self.localizer.as_ref());
        let loading = matches!(state.load, LoadState::Unloaded | LoadState::Loading);

        let Some(rooms) = state.rooms.as_ref() else {
            return TableView {
                loading,
                columns,
                rows: Vec::new(),
                sort: state.sort,
                page: 0,
                page_count: 0,
            };
        };

        let page_size = self.defaults.page_size.max(1);
        let rows = table::sorted_indices(rooms, state.sort)
            .into_iter()
            .skip(state.page * page_size)
            .take(page_size)
            .map(|index| table::render_row(index, &rooms[index], &self.user, self.localizer.as_ref()))
            .collect();

        TableView {
            loading,
            columns,
            rows,
            sort: state.sort,
            page: state.page,
            page_count: page_count(rooms.len(), page_size),
        }
    }
}

fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}
