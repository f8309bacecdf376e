use serde::{Deserialize, Serialize};

/// The signed-in account, as reported by the session layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_editor: bool,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_admin: false,
            is_editor: false,
        }
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    #[must_use]
    pub fn editor(mut self) -> Self {
        self.is_editor = true;
        self
    }

    /// Admins and editors see every owner's rooms
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.is_admin || self.is_editor
    }

    /// Resolve which rooms this user may list
    #[must_use]
    pub fn room_scope(&self) -> RoomScope {
        if self.is_privileged() {
            RoomScope::Global
        } else {
            RoomScope::Owner(self.name.clone())
        }
    }
}

/// Set of rooms a listing covers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomScope {
    /// Rooms of every owner
    Global,
    /// Only rooms owned by this name
    Owner(String),
}

impl RoomScope {
    /// Whether `owner`'s rooms belong in this scope
    #[must_use]
    pub fn admits(&self, owner: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Owner(name) => name == owner,
        }
    }
}

impl std::fmt::Display for RoomScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Owner(name) => write!(f, "owner:{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_user_is_scoped_to_own_rooms() {
        let user = CurrentUser::new("alice");
        assert!(!user.is_privileged());
        assert_eq!(user.room_scope(), RoomScope::Owner("alice".to_string()));
    }

    #[test]
    fn test_admin_and_editor_get_global_scope() {
        assert_eq!(CurrentUser::new("root").admin().room_scope(), RoomScope::Global);
        assert_eq!(CurrentUser::new("ed").editor().room_scope(), RoomScope::Global);
    }

    #[test]
    fn test_scope_admits() {
        let scope = RoomScope::Owner("alice".to_string());
        assert!(scope.admits("alice"));
        assert!(!scope.admits("bob"));
        assert!(RoomScope::Global.admits("bob"));
        assert_eq!(scope.to_string(), "owner:alice");
    }
}
