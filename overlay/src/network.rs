use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt, future};
use log::{debug, info, warn};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use veto_common::slug::{map_art_path, map_slug, team_logo_path, team_slug};
use veto_common::snapshot::{MatchSnapshot, Side, map_name_of};

const BACKOFF_START: Duration = Duration::from_secs(1);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// What the renderer receives per applied snapshot: the snapshot itself plus
/// any art the networking thread fetched for the first time. Bytes stay raw
/// here so the packet is cheap to build off the render thread; the render
/// loop turns them into textures.
pub struct StatePacket {
    pub snapshot: MatchSnapshot,
    pub new_art: Vec<Art>,
}

pub struct Art {
    pub kind: ArtKind,
    pub slug: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtKind {
    MapArt,
    TeamLogo,
}

#[derive(Deserialize)]
struct WireMessage {
    #[serde(rename = "type")]
    kind: String,
    state: Option<MatchSnapshot>,
}

#[derive(Debug, thiserror::Error)]
enum SessionEnd {
    #[error("server closed the connection")]
    Closed,
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    /// The render loop dropped its receiver; time to exit the thread.
    #[error("overlay shut down")]
    FrontendGone,
}

/// Push-channel URL for a match. The ws scheme mirrors the transport
/// security of the configured server URL.
fn ws_url(server_url: &str, match_id: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{base}")
    };
    format!("{ws_base}/ws?match={match_id}")
}

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(BACKOFF_CAP)
}

/// Snapshots may carry a monotonic `seq`; when they do, anything at or below
/// the last applied one is stale and dropped. Unnumbered snapshots are
/// applied in arrival order, as the backend intends.
fn should_apply(last_applied: Option<u64>, incoming: Option<u64>) -> bool {
    match (last_applied, incoming) {
        (Some(last), Some(incoming)) => incoming > last,
        _ => true,
    }
}

/// Parse one inbound frame. Only `type == "state"` frames carry a snapshot;
/// every other tag is reserved for future message kinds and skipped without
/// complaint. Malformed bodies are logged and dropped so the last-good
/// snapshot stays on screen.
fn decode_state(text: &str) -> Option<MatchSnapshot> {
    match serde_json::from_str::<WireMessage>(text) {
        Ok(message) => {
            if message.kind != "state" {
                debug!("Ignoring push message tagged '{}'", message.kind);
                return None;
            }
            if message.state.is_none() {
                warn!("State message without a state body discarded");
            }
            message.state
        }
        Err(e) => {
            warn!("Corrupted push message discarded: {e}");
            None
        }
    }
}

struct Session {
    tx: Sender<StatePacket>,
    client: Client,
    http_base: String,
    /// Asset paths already requested this process, successful or not. A
    /// failed fetch is not retried; a missing asset is a presentation
    /// concern, not something to hammer the store over.
    requested: HashSet<String>,
    last_seq: Option<u64>,
}

impl Session {
    async fn run(&mut self, stream: WebSocketStream<MaybeTlsStream<TcpStream>>) -> SessionEnd {
        let (mut write, mut read) = stream.split();
        loop {
            let message = match read.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return SessionEnd::Transport(e),
                None => return SessionEnd::Closed,
            };
            match message {
                Message::Text(text) => {
                    if let Some(snapshot) = decode_state(text.as_str()) {
                        if !should_apply(self.last_seq, snapshot.seq) {
                            warn!(
                                "Dropping stale snapshot (seq {:?} <= {:?})",
                                snapshot.seq, self.last_seq
                            );
                            continue;
                        }
                        if snapshot.seq.is_some() {
                            self.last_seq = snapshot.seq;
                        }
                        let new_art = self.fetch_new_art(&snapshot).await;
                        if self.tx.send(StatePacket { snapshot, new_art }).is_err() {
                            return SessionEnd::FrontendGone;
                        }
                    }
                }
                Message::Ping(payload) => {
                    if let Err(e) = write.send(Message::Pong(payload)).await {
                        return SessionEnd::Transport(e);
                    }
                }
                Message::Close(_) => return SessionEnd::Closed,
                _ => {}
            }
        }
    }

    /// Fetch art this session has not requested yet: both team logos and
    /// every map's art, by the slug conventions of the asset store.
    async fn fetch_new_art(&mut self, snapshot: &MatchSnapshot) -> Vec<Art> {
        let mut wanted = Vec::new();
        for side in [Side::A, Side::B] {
            if let Some(team) = snapshot.teams.get(&side) {
                let slug = team_slug(team.name.trim());
                if !slug.is_empty() {
                    wanted.push((ArtKind::TeamLogo, team_logo_path(&slug), slug));
                }
            }
        }
        for key in snapshot.maps.keys() {
            let slug = map_slug(map_name_of(key));
            if !slug.is_empty() {
                wanted.push((ArtKind::MapArt, map_art_path(&slug), slug));
            }
        }
        wanted.retain(|(_, path, _)| self.requested.insert(path.clone()));

        let fetches = wanted.into_iter().map(|(kind, path, slug)| {
            let url = format!("{}{}", self.http_base, path);
            let client = self.client.clone();
            async move {
                match fetch_bytes(&client, &url).await {
                    Ok(bytes) => {
                        debug!("Fetched art {url} ({} bytes)", bytes.len());
                        Some(Art { kind, slug, bytes })
                    }
                    Err(e) => {
                        warn!("Couldn't fetch art {url}: {e}");
                        None
                    }
                }
            }
        });
        future::join_all(fetches).await.into_iter().flatten().collect()
    }
}

async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    Ok(client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?
        .to_vec())
}

/// Entry point of the networking thread. Owns the push-channel connection
/// for one match and feeds applied snapshots to the render loop; reconnects
/// with bounded exponential backoff instead of freezing on stale state.
#[tokio::main]
pub async fn networking_thread(tx: Sender<StatePacket>, config: crate::AppConfig, match_id: String) {
    let client = match ClientBuilder::new()
        .connect_timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            // Startup-only failure; the overlay keeps showing its last state.
            log::error!("Couldn't create HTTP client: {e}");
            return;
        }
    };

    let url = ws_url(&config.server_url, &match_id);
    let mut session = Session {
        tx,
        client,
        http_base: config.server_url.trim_end_matches('/').to_string(),
        requested: HashSet::new(),
        last_seq: None,
    };

    let mut backoff = BACKOFF_START;
    loop {
        info!("Connecting to push channel at {url}");
        match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                info!("Push channel connected");
                backoff = BACKOFF_START;
                match session.run(stream).await {
                    SessionEnd::FrontendGone => return,
                    end => warn!("Push channel lost: {end}"),
                }
            }
            Err(e) => warn!("Push channel connect failed: {e}"),
        }
        info!("Reconnecting in {}s", backoff.as_secs());
        tokio::time::sleep(backoff).await;
        backoff = next_backoff(backoff);
    }
}
