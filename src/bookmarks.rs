use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::poll::PostId;
use crate::toast::{ToastKind, ToastSink};

const BOOKMARKED_LABEL: &str = "Favorilerde";
const UNBOOKMARKED_LABEL: &str = "Favorilere Ekle";
const GENERIC_ERROR: &str = "Bir hata oluştu";

#[derive(Debug, Default, Deserialize)]
struct BookmarkOutcome {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    bookmarked: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    error: Option<String>,
}

/// Toggle button state for one post.
#[derive(Debug, Clone)]
pub struct BookmarkButton {
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

impl BookmarkButton {
    pub fn new(active: bool) -> Self {
        Self {
            label: if active { BOOKMARKED_LABEL } else { UNBOOKMARKED_LABEL }.to_owned(),
            active,
            disabled: false,
        }
    }
}

pub struct Bookmarks {
    api: ApiClient,
    toasts: Arc<dyn ToastSink>,
}

impl Bookmarks {
    pub fn new(api: ApiClient, toasts: Arc<dyn ToastSink>) -> Self {
        Self { api, toasts }
    }

    /// Toggle a post in the user's bookmarks, updating the button on the way
    /// out. On failure the button shows what it showed before the click.
    pub async fn toggle(&self, post_id: PostId, button: &mut BookmarkButton) {
        button.disabled = true;
        let previous_label = button.label.clone();

        match self
            .api
            .post_empty_json::<BookmarkOutcome>(&format!("/post/{post_id}/bookmark/"))
            .await
        {
            Ok(outcome) if outcome.success => {
                button.active = outcome.bookmarked;
                button.label = if outcome.bookmarked {
                    BOOKMARKED_LABEL
                } else {
                    UNBOOKMARKED_LABEL
                }
                .to_owned();
                self.toasts.toast(&outcome.message, ToastKind::Success);
            }
            Ok(outcome) => {
                warn!(post = post_id, "bookmark toggle rejected: {:?}", outcome.error);
                button.label = previous_label;
                self.toasts.toast(GENERIC_ERROR, ToastKind::Error);
            }
            Err(err) => {
                warn!(post = post_id, "bookmark toggle failed: {err}");
                button.label = previous_label;
                self.toasts.toast(GENERIC_ERROR, ToastKind::Error);
            }
        }
        button.disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_label_follows_initial_state() {
        assert_eq!(BookmarkButton::new(true).label, "Favorilerde");
        assert_eq!(BookmarkButton::new(false).label, "Favorilere Ekle");
    }
}
