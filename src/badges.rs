use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::warn;

use crate::api::ApiClient;
use crate::events::EventBus;

const CHECK_ENDPOINT: &str = "/api/check-new-badges/";
// Give the server a moment to finish awarding before asking.
const CHECK_DELAY: Duration = Duration::from_secs(1);
const POPUP_STAGGER: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Deserialize)]
pub struct Badge {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Default, Deserialize)]
struct BadgeCheck {
    #[serde(default)]
    new_badges: Vec<Badge>,
}

/// Watches the bus for actions that can earn a badge (votes, comments, new
/// posts) and asks the server whether any were awarded, feeding new badges to
/// the host's popup queue staggered so they do not land on top of each other.
#[derive(Debug)]
pub struct BadgeWatcher {
    handle: JoinHandle<()>,
}

impl BadgeWatcher {
    pub fn spawn(bus: &EventBus, api: ApiClient, popups: mpsc::Sender<Badge>) -> Self {
        let mut rx = bus.subscribe();
        let handle = tokio::spawn(async move {
            while let Ok(_event) = rx.recv().await {
                sleep(CHECK_DELAY).await;
                match api.get_json::<BadgeCheck>(CHECK_ENDPOINT).await {
                    Ok(check) => {
                        for (index, badge) in check.new_badges.into_iter().enumerate() {
                            if index > 0 {
                                sleep(POPUP_STAGGER).await;
                            }
                            if popups.send(badge).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => warn!("badge check failed: {err}"),
                }
            }
        });
        Self { handle }
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for BadgeWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
