use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tracing::warn;

use crate::api::ApiClient;
use crate::error::ApiError;

const LATEST_UNREAD: &str = "/notifications/latest-unread/";

/// How often the open dropdown refetches its content.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Where clicking the notification should navigate, if anywhere. The
    /// backend serializes a missing link as the string `"None"`.
    pub fn navigation_url(&self) -> Option<&str> {
        match self.url.as_deref() {
            None | Some("") | Some("None") | Some("undefined") => None,
            Some(url) => Some(url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NotificationList {
    #[serde(default)]
    notifications: Vec<Notification>,
}

/// Turkish relative timestamp for a dropdown row.
pub fn format_relative(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created_at).num_seconds().max(0);
    if diff < 60 {
        "Az önce".to_owned()
    } else if diff < 3_600 {
        format!("{} dakika önce", diff / 60)
    } else if diff < 86_400 {
        format!("{} saat önce", diff / 3_600)
    } else {
        format!("{} gün önce", diff / 86_400)
    }
}

/// Client for the notification dropdown's three endpoints.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    api: ApiClient,
}

impl NotificationFeed {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn latest_unread(&self) -> Result<Vec<Notification>, ApiError> {
        let list: NotificationList = self.api.get_json(LATEST_UNREAD).await?;
        Ok(list.notifications)
    }

    /// Mark one notification read and hand back its navigation target.
    pub async fn open(&self, notification: &Notification) -> Result<Option<String>, ApiError> {
        self.api
            .post_empty(&format!("/notifications/{}/read/", notification.id))
            .await?;
        Ok(notification.navigation_url().map(str::to_owned))
    }

    /// Mark everything read, then refetch the dropdown content.
    pub async fn mark_all_read(&self) -> Result<Vec<Notification>, ApiError> {
        self.api.post_empty("/notifications/read-all/").await?;
        self.latest_unread().await
    }
}

/// Periodic dropdown refresh with an explicit lifecycle: `start` spawns the
/// task, `stop` (or drop) cancels it. Started while the dropdown is open,
/// stopped when it closes.
#[derive(Debug, Default)]
pub struct NotificationRefresher {
    handle: Option<JoinHandle<()>>,
}

impl NotificationRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        feed: NotificationFeed,
        period: Duration,
        updates: mpsc::Sender<Vec<Notification>>,
    ) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut tick = interval(period);
            loop {
                tick.tick().await;
                match feed.latest_unread().await {
                    Ok(notifications) => {
                        if updates.send(notifications).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!("notification refresh failed: {err}"),
                }
            }
        }));
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for NotificationRefresher {
    fn drop(&mut self) {
        self.stop();
    }
}
