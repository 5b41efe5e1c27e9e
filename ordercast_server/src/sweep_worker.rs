use std::{sync::Arc, time::Duration};

use chrono::Utc;
use log::*;
use ordercast_engine::sessions::SessionStore;
use serde_json::json;
use tokio::task::JoinHandle;

use crate::event_stream::EventHub;

/// Starts the sweep worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// One timer drives two jobs on purpose: expired sessions are reclaimed even when nobody logs in, and the same
/// tick broadcasts a `ping` that keeps intermediaries from timing out idle streams while forcing the hub's
/// session-revalidation pass even in the absence of business events.
pub fn start_sweep_worker(sessions: Arc<SessionStore>, hub: Arc<EventHub>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(period);
        info!("🕰️ Session sweep worker started ({}s period)", period.as_secs());
        loop {
            timer.tick().await;
            let swept = sessions.sweep();
            if swept > 0 {
                info!("🕰️ {swept} expired sessions reclaimed");
            }
            hub.broadcast("ping", &json!({ "now": Utc::now().timestamp_millis() }));
        }
    })
}
