//! Live stream view
//!
//! Configures the external player for a room and keeps the rendered size on
//! the source's aspect ratio: the container decides the width, the native
//! video decides the height.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::{
    capability::{ContainerWidth, DeviceClass, Player, PlayerConfig, ReadyEvent, SizeNotifier},
    config::StreamingConfig,
    models::{Room, VideoSize},
    Error, Result,
};

/// Everything except RFC 3986 unreserved characters
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Stream URL for `room`, filling `{owner}` and `{name}` in `template` with
/// percent-encoded values
pub fn stream_source_url(template: &str, room: &Room) -> Result<String> {
    if !template.contains("{name}") {
        return Err(Error::Config(
            "stream url template needs a {name} placeholder".to_string(),
        ));
    }
    let owner = utf8_percent_encode(&room.owner, SEGMENT).to_string();
    let name = utf8_percent_encode(&room.name, SEGMENT).to_string();
    let source = template
        .replace("{owner}", &owner)
        .replace("{name}", &name);
    Ok(Url::parse(&source)?.into())
}

#[must_use]
pub fn container_width(room: &Room, device: DeviceClass) -> ContainerWidth {
    match device {
        DeviceClass::Mobile => ContainerWidth::Full,
        DeviceClass::Desktop => ContainerWidth::Pixels(room.video_width),
    }
}

/// Player options for a live room. The declared room size is only a hint
/// until the player reports the real one.
pub fn player_config(
    room: &Room,
    device: DeviceClass,
    streaming: &StreamingConfig,
) -> Result<PlayerConfig> {
    Ok(PlayerConfig {
        source: stream_source_url(&streaming.url_template, room)?,
        width: container_width(room, device).css(),
        height: format!("{}px", room.video_height),
        autoplay: true,
        is_live: true,
        re_play: false,
        playsinline: true,
        preload: true,
        enable_stash_buffer_for_flv: true,
        stash_initial_size_for_flv: streaming.stash_initial_size,
        control_bar_visibility: streaming.control_bar_visibility.clone(),
        use_h5_prism: true,
    })
}

/// What a ready event led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// Dimensions not usable yet, wait for another ready
    NotReady,
    /// Native size handed to the parent's size notifier
    Delegated(VideoSize),
    /// Player resized to this size
    Resized(VideoSize),
}

struct StreamViewInner {
    player: Arc<dyn Player>,
    size_notifier: Option<Arc<dyn SizeNotifier>>,
    display: watch::Sender<VideoSize>,
}

impl StreamViewInner {
    fn handle_ready(&self, event: ReadyEvent) -> ReadyOutcome {
        let native = event.native;
        if !native.is_known() {
            debug!(native = %native, "Ready without video dimensions, waiting");
            return ReadyOutcome::NotReady;
        }

        if let Some(notifier) = &self.size_notifier {
            debug!(native = %native, "Delegating video size to parent layout");
            notifier.on_video_size(native);
            return ReadyOutcome::Delegated(native);
        }

        let width = self.player.rendered_width();
        if width == 0 {
            debug!("Player has no rendered width yet, waiting");
            return ReadyOutcome::NotReady;
        }
        let Some(size) = native.fit_width(width) else {
            return ReadyOutcome::NotReady;
        };

        debug!(native = %native, size = %size, "Resizing player");
        self.player.set_player_size(size);
        self.display.send_replace(size);
        ReadyOutcome::Resized(size)
    }
}

/// A mounted stream view.
///
/// Dropping it cancels the ready subscription, so the player can never call
/// back into a torn-down view.
pub struct StreamView {
    inner: Arc<StreamViewInner>,
    config: PlayerConfig,
    cancel: CancellationToken,
}

impl std::fmt::Debug for StreamView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamView")
            .field("source", &self.config.source)
            .field("display", &*self.inner.display.borrow())
            .finish()
    }
}

impl StreamView {
    /// Configure `player` for `room` and start listening for its ready event.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(
        room: &Room,
        device: DeviceClass,
        streaming: &StreamingConfig,
        player: Arc<dyn Player>,
        size_notifier: Option<Arc<dyn SizeNotifier>>,
    ) -> Result<Self> {
        let config = player_config(room, device, streaming)?;
        player.configure(&config);

        let ready_rx = player.subscribe_ready();
        let (display, _) = watch::channel(room.declared_size());
        let inner = Arc::new(StreamViewInner {
            player,
            size_notifier,
            display,
        });
        let cancel = CancellationToken::new();

        tokio::spawn(listen_for_ready(inner.clone(), ready_rx, cancel.clone()));

        Ok(Self {
            inner,
            config,
            cancel,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Size the view currently renders at
    #[must_use]
    pub fn display_size(&self) -> VideoSize {
        *self.inner.display.borrow()
    }

    /// Follow display size changes
    #[must_use]
    pub fn watch_size(&self) -> watch::Receiver<VideoSize> {
        self.inner.display.subscribe()
    }

    /// Process a ready event directly, bypassing the subscription
    pub fn handle_ready(&self, event: ReadyEvent) -> ReadyOutcome {
        self.inner.handle_ready(event)
    }

    /// Stop listening for ready events
    pub fn unmount(self) {
        // Drop does the work
    }
}

impl Drop for StreamView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Handle ready events until one yields usable dimensions or the view goes away
async fn listen_for_ready(
    inner: Arc<StreamViewInner>,
    mut ready_rx: broadcast::Receiver<ReadyEvent>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Stream view dropped, ready subscription released");
                break;
            }
            event = ready_rx.recv() => match event {
                Ok(event) => {
                    if inner.handle_ready(event) != ReadyOutcome::NotReady {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed player ready events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Player closed before becoming ready");
                    break;
                }
            },
        }
    }
}
