pub mod room;
pub mod user;
pub mod video;

pub use room::{Participant, Room, RoomStatus};
pub use user::{CurrentUser, RoomScope};
pub use video::VideoSize;
