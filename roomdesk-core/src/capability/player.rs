//! Interface of the embedded live-stream player.
//!
//! The player itself (demuxing, decoding, the control bar) lives outside this
//! crate. We hand it a [`PlayerConfig`], listen for its ready signal and tell
//! it how big to draw.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::VideoSize;

/// Horizontal extent of the player's container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerWidth {
    /// Take the whole container (mobile-class devices)
    Full,
    Pixels(u32),
}

impl ContainerWidth {
    /// CSS length handed to the player
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Full => "100%".to_string(),
            Self::Pixels(px) => format!("{px}px"),
        }
    }
}

/// Device class of the viewer, decides [`ContainerWidth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

/// Options understood by the player, serialized with its own key names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    pub source: String,
    pub width: String,
    pub height: String,
    pub autoplay: bool,
    pub is_live: bool,
    pub re_play: bool,
    pub playsinline: bool,
    pub preload: bool,
    pub enable_stash_buffer_for_flv: bool,
    /// KiB buffered before playback starts
    pub stash_initial_size_for_flv: u32,
    pub control_bar_visibility: String,
    #[serde(rename = "useH5Prism")]
    pub use_h5_prism: bool,
}

/// Emitted once the media element knows its intrinsic size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyEvent {
    pub native: VideoSize,
}

pub trait Player: Send + Sync {
    fn configure(&self, config: &PlayerConfig);

    /// Ready events. The player may fire more than once, e.g. first with
    /// 0x0 before metadata arrives.
    fn subscribe_ready(&self) -> broadcast::Receiver<ReadyEvent>;

    /// Width the player currently occupies on screen
    fn rendered_width(&self) -> u32;

    fn set_player_size(&self, size: VideoSize);
}

/// Parent layout hook that takes over sizing once native dimensions are known
pub trait SizeNotifier: Send + Sync {
    fn on_video_size(&self, native: VideoSize);
}
