// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification delivery over WebSocket connections.
//!
//! This module fans committed-transition notifications out to floor
//! clients. Events are informational only and never authoritative:
//!
//! - Notifications are broadcast after the transition has persisted
//! - Each connection subscribes to exactly one recipient topic
//! - No commands are executed over WebSocket connections
//! - Clients must still query canonical state via the HTTP API
//!
//! A company topic is reachable only through the company's access
//! token, so the token doubles as the subscription capability.

use axum::extract::ws::{Message, WebSocket};
use fairline_api::validate_token_format;
use fairline_notify::{Notification, NotificationPayload};
use futures::{SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of notifications to buffer in the broadcast channel.
/// Slow subscribers skip whatever falls out of the buffer.
const EVENT_BUFFER_SIZE: usize = 100;

/// The wire shape of one delivered event.
///
/// Subscribers dispatch on `event` and surface `urgent` events
/// immediately; the payload keeps its `notification_type`
/// discriminator for fine-grained rendering.
#[derive(Debug, Clone, Serialize)]
struct WireEvent<'a> {
    /// The wire name of the event kind.
    event: &'static str,
    /// Whether the client should surface this immediately.
    urgent: bool,
    /// The typed payload of the notification.
    payload: &'a NotificationPayload,
}

/// The greeting sent once per connection, before any notification.
#[derive(Debug, Clone, Serialize)]
struct ConnectedEvent<'a> {
    /// Always `connected`.
    event: &'static str,
    /// Never urgent.
    urgent: bool,
    /// The topic this connection is subscribed to.
    topic: &'a str,
    /// Server timestamp (RFC 3339, UTC).
    timestamp: String,
}

/// Broadcaster for committed-transition notifications.
///
/// A lightweight wrapper around `tokio::sync::broadcast` shared by the
/// HTTP handlers (publish side) and the WebSocket connections
/// (subscribe side).
#[derive(Clone)]
pub struct NotificationBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<Notification>,
}

impl NotificationBroadcaster {
    /// Creates a new broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Publishes one notification to every live subscriber.
    ///
    /// If nobody is subscribed the notification is silently dropped;
    /// delivery never blocks and never fails the originating request.
    pub fn publish(&self, notification: &Notification) {
        match self.tx.send(notification.clone()) {
            Ok(count) => {
                debug!(
                    topic = %notification.recipient.topic(),
                    kind = %notification.kind,
                    receivers = count,
                    "Published notification"
                );
            }
            Err(_) => {
                debug!(
                    topic = %notification.recipient.topic(),
                    kind = %notification.kind,
                    "No subscribers for notification"
                );
            }
        }
    }

    /// Publishes a committed transition's notifications in order.
    pub fn publish_all(&self, notifications: &[Notification]) {
        for notification in notifications {
            self.publish(notification);
        }
    }

    /// Subscribes to the notification stream.
    ///
    /// Events published before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for NotificationBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a subscription path into a delivery topic.
///
/// Accepted paths are `student/{id}`, `company/{token}` and `admin`,
/// mapping onto the recipient topics `student:{id}`,
/// `company:{token}` and `admin`. Company tokens must be well-formed;
/// anything else yields `None`.
#[must_use]
pub fn parse_topic(recipient: &str) -> Option<String> {
    if recipient == "admin" {
        return Some(String::from("admin"));
    }
    match recipient.split_once('/') {
        Some(("student", id)) => id.parse::<i64>().ok().map(|id| format!("student:{id}")),
        Some(("company", token)) => {
            validate_token_format(token).ok()?;
            Some(format!("company:{token}"))
        }
        _ => None,
    }
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection greeting, then forwards every notification whose
/// recipient matches `topic` until the client disconnects.
pub async fn handle_socket(socket: WebSocket, broadcaster: NotificationBroadcaster, topic: String) {
    info!(%topic, "Subscriber connected");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<Notification> = broadcaster.subscribe();

    let greeting = ConnectedEvent {
        event: "connected",
        urgent: false,
        topic: &topic,
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };
    if let Ok(json) = serde_json::to_string(&greeting)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!(%topic, "Failed to send connection greeting");
        return;
    }

    let send_topic: String = topic.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let notification: Notification = match rx.recv().await {
                Ok(notification) => notification,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, topic = %send_topic, "Subscriber lagged; missed events dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            };
            if notification.recipient.topic() != send_topic {
                continue;
            }

            let wire = WireEvent {
                event: notification.kind.as_str(),
                urgent: notification.is_urgent(),
                payload: &notification.payload,
            };
            match serde_json::to_string(&wire) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize notification");
                }
            }
        }
    });

    // Clients never send commands; their stream only matters for close.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from subscriber, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Subscriber sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    info!(%topic, "Subscriber disconnected");
}
