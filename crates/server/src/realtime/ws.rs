//! WebSocket subscription endpoint.
//!
//! `GET /ws` upgrades to a WebSocket that receives every global feed event
//! plus the events of any discussion-thread rooms the client has joined.
//! The joined-room set is plain per-connection state; room filtering happens
//! here, on the way out.

use std::collections::HashSet;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use super::{EventBroadcaster, FeedEvent};
use crate::state::AppState;

/// Client-to-server control events for the discussion-thread rooms.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinThread { thread_id: String },

    #[serde(rename_all = "camelCase")]
    LeaveThread { thread_id: String },

    #[serde(rename_all = "camelCase")]
    SendMessage {
        thread_id: String,
        message: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    ThreadUpdate { thread_id: String },
}

/// Upgrade the connection and attach it to the event stream.
pub async fn subscribe(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.events().clone();
    ws.on_upgrade(move |socket| handle_subscription(socket, events))
}

async fn handle_subscription(socket: WebSocket, events: EventBroadcaster) {
    let (mut sink, mut stream) = socket.split();
    let mut rx = events.subscribe();
    let mut rooms: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            delivery = rx.recv() => match delivery {
                Ok(envelope) => {
                    let wanted = envelope
                        .room
                        .as_deref()
                        .is_none_or(|room| rooms.contains(room));
                    if wanted
                        && sink
                            .send(Message::Text(envelope.payload.to_string().into()))
                            .await
                            .is_err()
                    {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    // Best-effort delivery: a slow client just misses events.
                    tracing::debug!(missed, "websocket subscriber lagged behind the feed");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_client_event(&text, &mut rooms, &events);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // ping/pong/binary: nothing to do
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "websocket receive error");
                    break;
                }
            },
        }
    }
}

fn handle_client_event(text: &str, rooms: &mut HashSet<String>, events: &EventBroadcaster) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed client event");
            return;
        }
    };

    match event {
        ClientEvent::JoinThread { thread_id } => {
            rooms.insert(thread_id);
        }
        ClientEvent::LeaveThread { thread_id } => {
            rooms.remove(&thread_id);
        }
        ClientEvent::SendMessage { thread_id, message } => {
            events.publish_to_room(&thread_id, &FeedEvent::NewMessage { message });
        }
        ClientEvent::ThreadUpdate { .. } => {
            events.publish(&FeedEvent::RefreshThreads);
        }
    }
}
