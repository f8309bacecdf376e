//! Screen-level services the directory calls into: toast messages,
//! route changes and string lookup.

use serde::{Deserialize, Serialize};

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shows short messages to the user
pub trait Notifier: Send + Sync {
    fn show_message(&self, severity: Severity, text: &str);
}

/// Moves the app to another route, e.g. `/rooms/alice/room_0`
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Looks up display strings by `namespace:Key`
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Returns the key without its namespace, `room:Started` -> `Started`
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLocalizer;

impl Localizer for PassthroughLocalizer {
    fn translate(&self, key: &str) -> String {
        key.rsplit_once(':')
            .map_or(key, |(_, text)| text)
            .to_string()
    }
}
