//! Integration tests for roomdesk-core
//!
//! Drive the room directory end to end against the in-memory backend.
//!
//! Run with: cargo test --test integration_tests

use std::sync::{Arc, Mutex};

use chrono::Utc;
use roomdesk_core::{
    backend::{InMemoryRoomBackend, RoomBackend},
    capability::{Navigator, Notifier, Severity},
    config::RoomDefaultsConfig,
    models::{CurrentUser, Room, RoomStatus, VideoSize},
    service::{Column, LoadState, RoomDirectory, SortOrder},
};

#[derive(Default)]
struct Messages(Mutex<Vec<(Severity, String)>>);

impl Notifier for Messages {
    fn show_message(&self, severity: Severity, text: &str) {
        if let Ok(mut messages) = self.0.lock() {
            messages.push((severity, text.to_string()));
        }
    }
}

#[derive(Default)]
struct Routes(Mutex<Vec<String>>);

impl Navigator for Routes {
    fn go_to(&self, path: &str) {
        if let Ok(mut routes) = self.0.lock() {
            routes.push(path.to_string());
        }
    }
}

fn room(owner: &str, name: &str, meeting_number: &str) -> Room {
    Room {
        owner: owner.to_string(),
        name: name.to_string(),
        created_time: Utc::now(),
        display_name: format!("Room {name}"),
        conference: "conference_0".to_string(),
        meeting_number: meeting_number.to_string(),
        passcode: "123456".to_string(),
        invite_link: format!("https://meet.example.com/{name}"),
        participants: Vec::new(),
        status: RoomStatus::Ended,
        video_width: 1280,
        video_height: 720,
    }
}

fn seeded_backend() -> Arc<InMemoryRoomBackend> {
    Arc::new(InMemoryRoomBackend::with_rooms(vec![
        room("alice", "room_1", "300"),
        room("bob", "room_0", "1000"),
        room("alice", "room_0", "20"),
    ]))
}

fn directory_for(user: CurrentUser, backend: Arc<InMemoryRoomBackend>) -> (RoomDirectory, Arc<Messages>) {
    let messages = Arc::new(Messages::default());
    let directory = RoomDirectory::new(
        user,
        RoomDefaultsConfig::default(),
        backend,
        messages.clone(),
        Arc::new(Routes::default()),
    );
    (directory, messages)
}

#[tokio::test]
async fn test_regular_user_only_sees_own_rooms() {
    let (directory, _) = directory_for(CurrentUser::new("alice"), seeded_backend());
    directory.load().await;

    let rooms = directory.rooms().unwrap_or_default();
    assert_eq!(rooms.len(), 2);
    assert!(rooms.iter().all(|r| r.owner == "alice"));
}

#[tokio::test]
async fn test_editor_sees_every_owner() {
    let (directory, _) = directory_for(CurrentUser::new("ed").editor(), seeded_backend());
    directory.load().await;

    let owners: Vec<_> = directory
        .rooms()
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.owner)
        .collect();
    assert_eq!(owners, ["alice", "bob", "alice"]);
}

#[tokio::test]
async fn test_create_then_delete_round_trip() {
    let backend = seeded_backend();
    let (directory, messages) = directory_for(CurrentUser::new("alice"), backend.clone());
    directory.load().await;
    assert_eq!(directory.load_state(), LoadState::Loaded);

    // Two rooms listed, so the new one is room_2
    let created = directory.create_room().await;
    assert_eq!(created.as_ref().map(|r| r.name.as_str()), Some("room_2"));
    assert_eq!(backend.len(), 4);

    let names: Vec<_> = directory
        .rooms()
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["room_2", "room_1", "room_0"]);

    let request = directory.prompt_delete(0);
    assert!(request.is_some());
    if let Some(request) = request {
        assert!(directory.delete_room(request).await);
    }
    assert_eq!(backend.len(), 3);
    assert_eq!(directory.rooms().map(|r| r.len()), Some(2));

    let severities: Vec<_> = messages
        .0
        .lock()
        .map(|m| m.iter().map(|(s, _)| *s).collect())
        .unwrap_or_default();
    assert_eq!(severities, [Severity::Success, Severity::Success]);
}

#[tokio::test]
async fn test_name_collision_is_reported_not_applied() {
    // One listed room means the next default name is room_1, which is taken
    let backend = Arc::new(InMemoryRoomBackend::with_rooms(vec![room("alice", "room_1", "1")]));
    let (directory, messages) = directory_for(CurrentUser::new("alice"), backend.clone());
    directory.load().await;
    let before = directory.rooms();

    assert!(directory.create_room().await.is_none());
    assert_eq!(directory.rooms(), before);
    assert_eq!(backend.len(), 1);

    let last = messages.0.lock().ok().and_then(|m| m.last().cloned());
    match last {
        Some((Severity::Error, text)) => assert!(text.starts_with("Room failed to add: ")),
        other => panic!("expected error notification, got {other:?}"),
    }
}

#[tokio::test]
async fn test_table_sorts_meeting_numbers_as_strings() {
    let (directory, _) = directory_for(CurrentUser::new("root").admin(), seeded_backend());
    directory.load().await;

    directory.sort_by(Column::MeetingNumber);
    let view = directory.table();
    assert_eq!(view.sort.map(|s| s.order), Some(SortOrder::Ascending));
    let numbers: Vec<_> = view.rows.iter().map(|r| r.cells[3].text().to_string()).collect();
    assert_eq!(numbers, ["1000", "20", "300"]);

    directory.sort_by(Column::MeetingNumber);
    let numbers: Vec<_> = directory
        .table()
        .rows
        .iter()
        .map(|r| r.cells[3].text().to_string())
        .collect();
    assert_eq!(numbers, ["300", "20", "1000"]);
}

#[tokio::test]
async fn test_status_label() {
    let mut live = room("alice", "live", "1");
    live.status = RoomStatus::Started;
    let backend = Arc::new(InMemoryRoomBackend::with_rooms(vec![live, room("alice", "idle", "2")]));
    let (directory, _) = directory_for(CurrentUser::new("alice"), backend);
    directory.load().await;

    let labels: Vec<_> = directory
        .table()
        .rows
        .iter()
        .map(|r| r.cells[6].text().to_string())
        .collect();
    assert_eq!(labels, ["Started", "Ended"]);
}

#[tokio::test]
async fn test_backend_trait_object_is_usable() {
    let backend: Arc<dyn RoomBackend> = seeded_backend();
    let rooms = backend.list_rooms_for_owner("bob").await.unwrap_or_default();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].declared_size(), VideoSize::new(1280, 720));
}
