mod console;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use roomdesk_core::{
    bootstrap::{init_backend, load_config},
    capability::DeviceClass,
    logging,
    models::{CurrentUser, Room, VideoSize},
    service::{player_config, Column, LoadState, RoomDirectory, SortOrder},
};

use crate::console::{render_table, ConsoleNavigator, ConsoleNotifier};

#[derive(Parser, Debug)]
#[command(name = "roomdesk")]
#[command(about = "Conference room directory", long_about = None)]
struct Args {
    /// Config file (defaults to ROOMDESK_CONFIG_PATH or ./roomdesk.yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Signed-in user name
    #[arg(long, env = "ROOMDESK_USER", global = true, default_value = "admin")]
    user: String,

    /// Treat the user as an administrator
    #[arg(long, global = true)]
    admin: bool,

    /// Treat the user as an editor
    #[arg(long, global = true)]
    editor: bool,

    /// Keep rooms in memory instead of talking to the backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the rooms visible to the user
    List {
        /// Column to sort by, e.g. meeting-number
        #[arg(long)]
        sort: Option<Column>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Zero-based page
        #[arg(long, default_value_t = 0)]
        page: usize,
    },

    /// Create a room with default values
    Add,

    /// Delete one of the user's rooms
    Delete {
        /// Room name, or owner/name
        name: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Print the player options for a room's live stream
    PlayerConfig {
        owner: String,
        name: String,

        /// Use the mobile layout
        #[arg(long)]
        mobile: bool,
    },

    /// Compute the display size for a native video at a fixed width
    Fit {
        /// Native video size, e.g. 1920x1080
        #[arg(long)]
        native: VideoSize,

        /// Rendered width in pixels
        #[arg(long)]
        width: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Pure computation, no config or backend needed
    if let Command::Fit { native, width } = &args.command {
        let size = native
            .fit_width(*width)
            .ok_or_else(|| anyhow!("native size {native} has a zero dimension"))?;
        println!("{size}");
        return Ok(());
    }

    // 1. Load configuration
    let config = load_config(args.config.as_deref())?;

    // 2. Initialize logging
    logging::init_logging(&config.logging)?;
    debug!(command = ?args.command, "roomdesk starting");

    // 3. Initialize backend
    let backend = init_backend(&config, args.offline)?;

    // 4. Build the directory for the signed-in user
    let mut user = CurrentUser::new(args.user.clone());
    if args.admin {
        user = user.admin();
    }
    if args.editor {
        user = user.editor();
    }
    info!(user = %user.name, scope = %user.room_scope(), "Opening room directory");

    let directory = RoomDirectory::new(
        user,
        config.rooms.clone(),
        backend,
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleNavigator),
    );

    // 5. Load the list; every command below works on it
    directory.load().await;
    if let LoadState::Failed(reason) = directory.load_state() {
        return Err(anyhow!("could not load rooms: {reason}"));
    }

    match args.command {
        Command::List { sort, desc, page } => {
            if let Some(column) = sort {
                directory.sort_by(column);
                if desc && directory.sort().map(|s| s.order) == Some(SortOrder::Ascending) {
                    directory.sort_by(column);
                }
            }
            directory.set_page(page);
            print!("{}", render_table(&directory.table()));
        }
        Command::Add => {
            if directory.create_room().await.is_none() {
                return Err(anyhow!("room was not created"));
            }
        }
        Command::Delete { name, yes } => {
            let rooms = directory.rooms().unwrap_or_default();
            let index = find_room(&rooms, &name, &directory.user().name)
                .ok_or_else(|| anyhow!("no visible room named {name}"))?;
            let request = directory
                .prompt_delete(index)
                .ok_or_else(|| anyhow!("no visible room named {name}"))?;
            if !yes {
                println!("{}", request.prompt());
                println!("Re-run with --yes to confirm");
                return Ok(());
            }
            if !directory.delete_room(request).await {
                return Err(anyhow!("room was not deleted"));
            }
        }
        Command::PlayerConfig {
            owner,
            name,
            mobile,
        } => {
            let rooms = directory.rooms().unwrap_or_default();
            let room = rooms
                .iter()
                .find(|r| r.owner == owner && r.name == name)
                .ok_or_else(|| anyhow!("no visible room {owner}/{name}"))?;
            let device = if mobile {
                DeviceClass::Mobile
            } else {
                DeviceClass::Desktop
            };
            let options = player_config(room, device, &config.streaming)?;
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
        Command::Fit { .. } => {}
    }

    Ok(())
}

/// Index of the room named `target` (`name` or `owner/name`), preferring the
/// user's own room when several owners share a name
fn find_room(rooms: &[Room], target: &str, user: &str) -> Option<usize> {
    if let Some((owner, name)) = target.split_once('/') {
        return rooms.iter().position(|r| r.owner == owner && r.name == name);
    }
    rooms
        .iter()
        .position(|r| r.name == target && r.is_owned_by(user))
        .or_else(|| rooms.iter().position(|r| r.name == target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roomdesk_core::models::RoomStatus;

    fn room(owner: &str, name: &str) -> Room {
        Room {
            owner: owner.to_string(),
            name: name.to_string(),
            created_time: Utc::now(),
            display_name: String::new(),
            conference: String::new(),
            meeting_number: String::new(),
            passcode: String::new(),
            invite_link: String::new(),
            participants: Vec::new(),
            status: RoomStatus::Ended,
            video_width: 640,
            video_height: 360,
        }
    }

    #[test]
    fn test_find_room_prefers_own() {
        let rooms = [room("bob", "room_0"), room("alice", "room_0")];
        assert_eq!(find_room(&rooms, "room_0", "alice"), Some(1));
        assert_eq!(find_room(&rooms, "room_0", "carol"), Some(0));
        assert_eq!(find_room(&rooms, "bob/room_0", "alice"), Some(0));
        assert_eq!(find_room(&rooms, "room_9", "alice"), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "roomdesk", "--offline", "list", "--sort", "meeting-number", "--desc",
        ]);
        match args {
            Ok(args) => {
                assert!(args.offline);
                assert!(matches!(
                    args.command,
                    Command::List {
                        sort: Some(Column::MeetingNumber),
                        desc: true,
                        page: 0
                    }
                ));
            }
            Err(err) => panic!("parse failed: {err}"),
        }
    }

    #[test]
    fn test_fit_args() {
        let args = Args::try_parse_from(["roomdesk", "fit", "--native", "1920x1080", "--width", "640"]);
        assert!(matches!(
            args.map(|a| a.command),
            Ok(Command::Fit { native, width: 640 }) if native == VideoSize::new(1920, 1080)
        ));
    }
}
