pub mod directory;
pub mod stream;
pub mod table;

pub use directory::{DeleteRequest, LoadState, RoomDirectory};
pub use stream::{player_config, stream_source_url, ReadyOutcome, StreamView};
pub use table::{Cell, Column, SortOrder, SortState, TableRow, TableView};
