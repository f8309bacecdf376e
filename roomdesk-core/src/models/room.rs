use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::video::VideoSize;

/// Whether the room's call is live. Owned by the call-session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RoomStatus {
    Started,
    #[default]
    Ended,
    /// A label this client does not know. Shown as ended, kept verbatim for
    /// sorting and for writes back to the server.
    Other(String),
}

impl RoomStatus {
    /// Anything other than the exact `"Started"` label counts as ended.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Started" => Self::Started,
            "Ended" | "" => Self::Ended,
            other => Self::Other(other.to_string()),
        }
    }

    /// Label as the server sent it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Started => "Started",
            Self::Ended => "Ended",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    /// Localization key for the status label
    #[must_use]
    pub const fn label_key(&self) -> &'static str {
        match self {
            Self::Started => "room:Started",
            Self::Ended | Self::Other(_) => "room:Ended",
        }
    }
}

impl Serialize for RoomStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RoomStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Ended, Self::from_label))
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Empty, missing or malformed timestamps decode to the Unix epoch.
fn lenient_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|time| time.with_timezone(&Utc))
        .unwrap_or_default())
}

/// Someone who joined the room's call. Filled in by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub owner: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_time")]
    pub created_time: DateTime<Utc>,
    pub display_name: String,
    #[serde(default)]
    pub conference: String,
    #[serde(default)]
    pub meeting_number: String,
    #[serde(default)]
    pub passcode: String,
    #[serde(default)]
    pub invite_link: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub video_width: u32,
    #[serde(default)]
    pub video_height: u32,
}

impl Room {
    /// `owner/name`, the identity used by the backend and in routes
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    #[must_use]
    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.owner == owner
    }

    /// Route of the per-room edit view
    #[must_use]
    pub fn edit_route(&self) -> String {
        format!("/rooms/{}/{}", self.owner, self.name)
    }

    /// Route of the conference this room belongs to, if it has one
    #[must_use]
    pub fn conference_route(&self) -> Option<String> {
        if self.conference.is_empty() {
            None
        } else {
            Some(format!("/conferences/{}", self.conference))
        }
    }

    #[must_use]
    pub const fn declared_size(&self) -> VideoSize {
        VideoSize::new(self.video_width, self.video_height)
    }
}
