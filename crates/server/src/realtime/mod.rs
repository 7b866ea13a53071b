//! Real-time event broadcasting.
//!
//! Every mutation of the feed (votes, comments, deletions) is announced to
//! connected clients over a single process-wide [`tokio::sync::broadcast`]
//! channel. Publishing is fire-and-forget: delivery is never acknowledged,
//! there are no retries and no backpressure, and a publish with zero
//! subscribers is not an error. A subscriber that falls too far behind skips
//! ahead and silently misses the overwritten events.
//!
//! Events are serialized once at publish time and shared between
//! subscribers; each WebSocket connection only pays for the final frame
//! write.
//!
//! Besides the global feed events there is a room layer for discussion
//! threads: clients join and leave rooms over the socket, and room-tagged
//! events are forwarded only to connections that joined that room.

pub mod ws;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

use grapevine_core::GossipId;

/// How many undelivered events the channel retains per subscriber before a
/// slow subscriber starts missing events.
const CHANNEL_CAPACITY: usize = 256;

/// Server-to-client events, named as they appear on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum FeedEvent {
    /// A gossip's vote counts changed.
    #[serde(rename_all = "camelCase")]
    GossipUpdated {
        gossip_id: GossipId,
        upvotes: i64,
        downvotes: i64,
    },

    /// A comment was added; clients refetch the gossip.
    #[serde(rename_all = "camelCase")]
    GossipCommentAdded { gossip_id: GossipId },

    /// A gossip (and its comments) was deleted.
    #[serde(rename_all = "camelCase")]
    GossipDeleted { gossip_id: GossipId },

    /// Some discussion thread changed; clients refetch the thread list.
    RefreshThreads,

    /// A chat message relayed to one discussion-thread room.
    #[serde(rename_all = "camelCase")]
    NewMessage { message: serde_json::Value },
}

/// A published event: the serialized frame plus an optional room scope.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Room this event is scoped to; `None` fans out to every client.
    pub room: Option<Arc<str>>,
    /// Event JSON, serialized once at publish time.
    pub payload: Arc<str>,
}

/// Handle for publishing events and subscribing to the stream.
///
/// Cheap to clone; all clones share one underlying channel.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<Envelope>,
}

impl EventBroadcaster {
    /// Create a broadcaster with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event to every connected client.
    pub fn publish(&self, event: &FeedEvent) {
        self.send(None, event);
    }

    /// Publish an event to the clients that joined the given room.
    pub fn publish_to_room(&self, room: &str, event: &FeedEvent) {
        self.send(Some(room), event);
    }

    /// Subscribe to the event stream. Each subscriber sees every event
    /// published after the subscription, subject to the lag limit.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.tx.subscribe()
    }

    fn send(&self, room: Option<&str>, event: &FeedEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize feed event");
                return;
            }
        };

        // Err here means no subscriber is connected, which is fine.
        let _ = self.tx.send(Envelope {
            room: room.map(Arc::from),
            payload: Arc::from(payload),
        });
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
