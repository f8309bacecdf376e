//! HTTP room backend
//!
//! Talks to the conference server's JSON API:
//! - `GET  /api/get-rooms?owner=<name>`
//! - `GET  /api/get-global-rooms`
//! - `POST /api/add-room`
//! - `POST /api/delete-room`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use url::Url;

use super::RoomBackend;
use crate::{
    config::BackendConfig,
    error::MAX_RESPONSE_SIZE,
    models::Room,
    Error, Result,
};

/// Envelope used by write endpoints
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    msg: String,
}

pub struct HttpRoomBackend {
    base_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpRoomBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoomBackend")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpRoomBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(Self::default_headers())
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { base_url, client })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("api/{name}"))?)
    }

    async fn get_rooms(&self, url: Url) -> Result<Vec<Room>> {
        debug!(url = %url, "Fetching rooms");
        let response = self.client.get(url).send().await?;
        let response = check_response(response)?;
        // The server encodes an empty list as `null`
        let rooms: Option<Vec<Room>> = json_with_limit(response).await?;
        Ok(rooms.unwrap_or_default())
    }

    async fn post_room(&self, endpoint: &str, room: &Room) -> Result<()> {
        let url = self.endpoint(endpoint)?;
        debug!(url = %url, room = %room.id(), "Posting room");
        let response = self.client.post(url).json(room).send().await?;
        let response = check_response(response)?;
        let resp: ApiResponse = json_with_limit(response).await?;
        if resp.status != "ok" {
            return Err(Error::Backend(if resp.msg.is_empty() {
                format!("{endpoint} returned status {:?}", resp.status)
            } else {
                resp.msg
            }));
        }
        Ok(())
    }
}

#[async_trait]
impl RoomBackend for HttpRoomBackend {
    async fn list_rooms_for_owner(&self, owner: &str) -> Result<Vec<Room>> {
        let mut url = self.endpoint("get-rooms")?;
        url.query_pairs_mut().append_pair("owner", owner);
        self.get_rooms(url).await
    }

    async fn list_all_rooms(&self) -> Result<Vec<Room>> {
        let url = self.endpoint("get-global-rooms")?;
        self.get_rooms(url).await
    }

    async fn add_room(&self, room: &Room) -> Result<()> {
        self.post_room("add-room", room).await
    }

    async fn delete_room(&self, room: &Room) -> Result<()> {
        self.post_room("delete-room", room).await
    }
}

/// Check HTTP response status before processing body.
fn check_response(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(Error::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Read a response body with size limit and deserialize as JSON.
async fn json_with_limit<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if let Some(cl) = response.content_length() {
        if cl > MAX_RESPONSE_SIZE as u64 {
            return Err(Error::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(Error::ResponseTooLarge {
            size: bytes.len() as u64,
        });
    }
    serde_json::from_slice(&bytes).map_err(Into::into)
}
