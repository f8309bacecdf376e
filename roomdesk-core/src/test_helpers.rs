//! Test helpers and fixtures for roomdesk-core tests
//!
//! Fixture builders for rooms plus recording fakes for the capabilities the
//! directory and stream view call into.

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::{
    capability::{Navigator, Notifier, Player, PlayerConfig, ReadyEvent, Severity, SizeNotifier},
    models::{Room, RoomStatus, VideoSize},
};

/// Test fixture builder for Room
pub struct RoomFixture {
    room: Room,
}

impl RoomFixture {
    pub fn new() -> Self {
        Self {
            room: Room {
                owner: "test_user".to_string(),
                name: "room_0".to_string(),
                created_time: Utc
                    .with_ymd_and_hms(2022, 7, 1, 12, 0, 0)
                    .single()
                    .unwrap_or_default(),
                display_name: "Test Room".to_string(),
                conference: String::new(),
                meeting_number: "123456789".to_string(),
                passcode: "123456".to_string(),
                invite_link: "https://zoom.us/j/123456789?pwd=123456".to_string(),
                participants: Vec::new(),
                status: RoomStatus::Ended,
                video_width: 640,
                video_height: 360,
            },
        }
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.room.owner = owner.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.room.name = name.to_string();
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.room.display_name = display_name.to_string();
        self
    }

    pub fn with_conference(mut self, conference: &str) -> Self {
        self.room.conference = conference.to_string();
        self
    }

    pub fn with_meeting_number(mut self, meeting_number: &str) -> Self {
        self.room.meeting_number = meeting_number.to_string();
        self
    }

    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.room.status = status;
        self
    }

    pub fn with_video_size(mut self, width: u32, height: u32) -> Self {
        self.room.video_width = width;
        self.room.video_height = height;
        self
    }

    pub fn build(self) -> Room {
        self.room
    }
}

impl Default for RoomFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_message(&self, severity: Severity, text: &str) {
        self.messages.lock().push((severity, text.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.routes.lock().push(path.to_string());
    }
}

#[derive(Default)]
pub struct RecordingSizeNotifier {
    sizes: Mutex<Vec<VideoSize>>,
}

impl RecordingSizeNotifier {
    pub fn sizes(&self) -> Vec<VideoSize> {
        self.sizes.lock().clone()
    }
}

impl SizeNotifier for RecordingSizeNotifier {
    fn on_video_size(&self, native: VideoSize) {
        self.sizes.lock().push(native);
    }
}

/// Player stand-in with a fixed rendered width
pub struct FakePlayer {
    width: u32,
    ready_tx: broadcast::Sender<ReadyEvent>,
    configured: Mutex<Option<PlayerConfig>>,
    sizes: Mutex<Vec<VideoSize>>,
}

impl FakePlayer {
    pub fn new(width: u32) -> Self {
        let (ready_tx, _) = broadcast::channel(16);
        Self {
            width,
            ready_tx,
            configured: Mutex::new(None),
            sizes: Mutex::new(Vec::new()),
        }
    }

    /// Emit a ready event; no-op when nobody listens
    pub fn fire(&self, native: VideoSize) {
        let _ = self.ready_tx.send(ReadyEvent { native });
    }

    pub fn configured(&self) -> Option<PlayerConfig> {
        self.configured.lock().clone()
    }

    pub fn sizes(&self) -> Vec<VideoSize> {
        self.sizes.lock().clone()
    }
}

impl Player for FakePlayer {
    fn configure(&self, config: &PlayerConfig) {
        *self.configured.lock() = Some(config.clone());
    }

    fn subscribe_ready(&self) -> broadcast::Receiver<ReadyEvent> {
        self.ready_tx.subscribe()
    }

    fn rendered_width(&self) -> u32 {
        self.width
    }

    fn set_player_size(&self, size: VideoSize) {
        self.sizes.lock().push(size);
    }
}
