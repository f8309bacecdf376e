//! Framework-neutral description of the room table
//!
//! The directory produces a [`TableView`]; whatever renders it only has to
//! draw cells. Sorting happens here, on raw string values, so numeric-looking
//! fields such as meeting numbers compare lexicographically.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{
    capability::Localizer,
    models::{CurrentUser, Room},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Name,
    DisplayName,
    Conference,
    MeetingNumber,
    Passcode,
    InviteLink,
    Status,
    Action,
}

impl Column {
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::DisplayName,
        Self::Conference,
        Self::MeetingNumber,
        Self::Passcode,
        Self::InviteLink,
        Self::Status,
        Self::Action,
    ];

    /// Localization key of the header
    #[must_use]
    pub const fn title_key(&self) -> &'static str {
        match self {
            Self::Name => "general:Name",
            Self::DisplayName => "general:Display name",
            Self::Conference => "submission:Conference",
            Self::MeetingNumber => "room:Meeting number",
            Self::Passcode => "room:Passcode",
            Self::InviteLink => "room:Invite link",
            Self::Status => "general:Status",
            Self::Action => "general:Action",
        }
    }

    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        !matches!(self, Self::Action)
    }

    /// Raw value the column sorts on
    fn sort_key<'a>(&self, room: &'a Room) -> &'a str {
        match self {
            Self::Name => &room.name,
            Self::DisplayName => &room.display_name,
            Self::Conference => &room.conference,
            Self::MeetingNumber => &room.meeting_number,
            Self::Passcode => &room.passcode,
            Self::InviteLink => &room.invite_link,
            Self::Status => room.status.as_str(),
            Self::Action => "",
        }
    }
}

impl std::str::FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "name" => Ok(Self::Name),
            "displayname" => Ok(Self::DisplayName),
            "conference" => Ok(Self::Conference),
            "meetingnumber" => Ok(Self::MeetingNumber),
            "passcode" => Ok(Self::Passcode),
            "invitelink" => Ok(Self::InviteLink),
            "status" => Ok(Self::Status),
            "action" => Ok(Self::Action),
            _ => Err(format!("Unknown column: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: Column,
    pub order: SortOrder,
}

impl SortState {
    /// Next state after the user clicks `column`'s header.
    ///
    /// Same column flips the order, a new column starts ascending.
    /// `None` when the column cannot be sorted.
    #[must_use]
    pub fn after_click(current: Option<Self>, column: Column) -> Option<Self> {
        if !column.is_sortable() {
            return current;
        }
        Some(match current {
            Some(state) if state.column == column => Self {
                column,
                order: state.order.toggled(),
            },
            _ => Self {
                column,
                order: SortOrder::Ascending,
            },
        })
    }
}

/// Display order of `rooms` as indices into the slice.
///
/// The sort is stable in both directions: rows with equal keys keep their
/// list order.
#[must_use]
pub fn sorted_indices(rooms: &[Room], sort: Option<SortState>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rooms.len()).collect();
    if let Some(SortState { column, order }) = sort {
        indices.sort_by(|&a, &b| {
            let ord = compare(column, &rooms[a], &rooms[b]);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }
    indices
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Cell {
    Text { text: String },
    /// In-app route
    Link { text: String, route: String },
    /// Opens outside the app
    ExternalLink { text: String, href: String },
    Actions {
        edit_route: String,
        delete_prompt: String,
    },
}

impl Cell {
    /// What a plain-text renderer would print
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Link { text, .. } | Self::ExternalLink { text, .. } => text,
            Self::Actions { .. } => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Position in the directory's list, stable under sorting
    pub index: usize,
    /// Row key, the room name
    pub key: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub loading: bool,
    pub columns: Vec<(Column, String)>,
    pub rows: Vec<TableRow>,
    pub sort: Option<SortState>,
    pub page: usize,
    pub page_count: usize,
}

/// Confirmation text shown before a delete is sent
#[must_use]
pub fn delete_prompt(room: &Room) -> String {
    format!("Sure to delete room: {} ?", room.name)
}

pub(crate) fn render_row(
    index: usize,
    room: &Room,
    user: &CurrentUser,
    localizer: &dyn Localizer,
) -> TableRow {
    let conference = match room.conference_route() {
        Some(route) if user.is_privileged() => Cell::Link {
            text: room.conference.clone(),
            route,
        },
        _ => Cell::Text {
            text: room.conference.clone(),
        },
    };

    let cells = vec![
        Cell::Link {
            text: room.name.clone(),
            route: room.edit_route(),
        },
        Cell::Text {
            text: room.display_name.clone(),
        },
        conference,
        Cell::Text {
            text: room.meeting_number.clone(),
        },
        Cell::Text {
            text: room.passcode.clone(),
        },
        Cell::ExternalLink {
            text: room.invite_link.clone(),
            href: room.invite_link.clone(),
        },
        Cell::Text {
            text: localizer.translate(room.status.label_key()),
        },
        Cell::Actions {
            edit_route: room.edit_route(),
            delete_prompt: delete_prompt(room),
        },
    ];

    TableRow {
        index,
        key: room.name.clone(),
        cells,
    }
}

pub(crate) fn column_headers(localizer: &dyn Localizer) -> Vec<(Column, String)> {
    Column::ALL
        .iter()
        .map(|column| (*column, localizer.translate(column.title_key())))
        .collect()
}

/// Compare two rooms the way a column header click would order them
#[must_use]
pub fn compare(column: Column, a: &Room, b: &Room) -> Ordering {
    column.sort_key(a).cmp(column.sort_key(b))
}
