//! The event hub and its server-sent-events transport.
//!
//! The hub keeps the live set of streaming admin subscribers. Fan-out is best-effort, at-most-once: every
//! broadcast re-validates each subscriber's session and writes one frame per live subscriber, removing anyone
//! whose session lapsed or whose connection can no longer take data. One dead or slow subscriber never blocks the
//! rest; its bounded channel simply fills up and it gets pruned.
//!
//! The whole fan-out loop runs synchronously under the live-set lock, which is what gives each subscriber frames
//! in broadcast order. No lock is held across an await point.

use std::{
    collections::HashMap,
    convert::Infallible,
    pin::Pin,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
        Mutex,
        MutexGuard,
        PoisonError,
    },
    task::{Context, Poll},
};

use bytes::Bytes;
use chrono::Utc;
use futures::Stream;
use log::*;
use ordercast_engine::sessions::SessionStore;
use serde::Serialize;
use tokio::sync::mpsc;

/// Frames a subscriber may fall behind by before it is considered dead. Deliberately small: the stream carries
/// notifications, not history, and a stuck consumer should be cut loose quickly.
const SUBSCRIBER_BUFFER: usize = 64;

pub fn sse_frame<P: Serialize>(event: &str, payload: &P) -> Bytes {
    let data = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    Bytes::from(format!("event: {event}\ndata: {data}\n\n"))
}

struct Subscriber {
    token: String,
    sender: mpsc::Sender<Bytes>,
}

pub struct EventHub {
    sessions: Arc<SessionStore>,
    live: Mutex<HashMap<u64, Subscriber>>,
    next_id: AtomicU64,
}

impl EventHub {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions, live: Mutex::new(HashMap::new()), next_id: AtomicU64::new(1) }
    }

    /// Adds a subscriber for an already-validated token and returns the response body stream.
    ///
    /// The `ready` handshake is written into the channel before the subscriber joins the live set, so it is
    /// always the first frame on the wire and can never be overtaken by a broadcast.
    pub fn register(self: Arc<Self>, token: String) -> SseStream {
        let (sender, receiver) = mpsc::channel(SUBSCRIBER_BUFFER);
        let handshake = serde_json::json!({ "message": "stream connected", "now": Utc::now().timestamp_millis() });
        let _ = sender.try_send(sse_frame("ready", &handshake));
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut live = self.live();
        live.insert(id, Subscriber { token, sender });
        debug!("📡️ Subscriber #{id} registered ({} live)", live.len());
        drop(live);
        SseStream { id, hub: self, receiver }
    }

    /// Sends one event to every live subscriber, pruning as it goes.
    ///
    /// A subscriber whose session no longer validates is removed without receiving the frame; dropping its sender
    /// ends its response stream and closes the connection. A full or closed channel prunes the same way.
    pub fn broadcast<P: Serialize>(&self, event: &str, payload: &P) {
        let frame = sse_frame(event, payload);
        let mut live = self.live();
        live.retain(|id, subscriber| {
            if self.sessions.validate(&subscriber.token).is_none() {
                debug!("📡️ Dropping subscriber #{id}: session invalid or expired");
                return false;
            }
            match subscriber.sender.try_send(frame.clone()) {
                Ok(()) => true,
                Err(e) => {
                    debug!("📡️ Dropping subscriber #{id}: {e}");
                    false
                },
            }
        });
        trace!("📡️ Broadcast '{event}' to {} subscribers", live.len());
    }

    pub fn subscriber_count(&self) -> usize {
        self.live().len()
    }

    fn unregister(&self, id: u64) {
        if self.live().remove(&id).is_some() {
            debug!("📡️ Subscriber #{id} disconnected");
        }
    }

    // A panic mid-broadcast must not wedge the hub for every later connection.
    fn live(&self) -> MutexGuard<'_, HashMap<u64, Subscriber>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The body stream of one streaming connection. Dropping it (client disconnect, response teardown) removes the
/// subscriber from the live set.
pub struct SseStream {
    id: u64,
    hub: Arc<EventHub>,
    receiver: mpsc::Receiver<Bytes>,
}

impl Stream for SseStream {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx).map(|frame| frame.map(Ok))
    }
}

impl Drop for SseStream {
    fn drop(&mut self) {
        self.hub.unregister(self.id);
    }
}
