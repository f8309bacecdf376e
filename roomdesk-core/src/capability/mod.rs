//! Capabilities the core consumes but does not implement

pub mod player;
pub mod ui;

pub use player::{ContainerWidth, DeviceClass, Player, PlayerConfig, ReadyEvent, SizeNotifier};
pub use ui::{Localizer, Navigator, Notifier, PassthroughLocalizer, Severity};
