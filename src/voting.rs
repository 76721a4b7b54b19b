use std::sync::Arc;

use tracing::warn;

use crate::config::ClientConfig;
use crate::poll::OptionId;
use crate::selection::SelectionTracker;
use crate::toast::{ToastKind, ToastSink};
use crate::view::PollCard;
use crate::vote::VoteClient;

pub const SELECT_AT_LEAST_ONE: &str = "Lütfen en az bir seçenek seçin.";
const VOTE_SAVED: &str = "Oyunuz kaydedildi!";
const VOTES_SAVED: &str = "Oylarınız kaydedildi!";

/// What the host should do after a click was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Handled,
    /// The user is not logged in; navigate here instead of voting.
    RedirectToLogin(String),
}

/// Drives the voting flow for every poll card on the page: immediate
/// dispatch for single-select polls, tracked selection plus explicit submit
/// for multi-select ones. Controls are disabled for the duration of a
/// request and always restored, whichever way it ends.
pub struct PollVoting {
    votes: VoteClient,
    selection: SelectionTracker,
    toasts: Arc<dyn ToastSink>,
    authenticated: bool,
    login_url: String,
}

impl PollVoting {
    pub fn new(votes: VoteClient, toasts: Arc<dyn ToastSink>, config: &ClientConfig) -> Self {
        Self {
            votes,
            selection: SelectionTracker::new(),
            toasts,
            authenticated: config.authenticated,
            login_url: config.login_url.clone(),
        }
    }

    /// Click on an option card.
    pub async fn option_clicked(&mut self, card: &mut PollCard, option_id: OptionId) -> ClickOutcome {
        if !self.authenticated {
            return ClickOutcome::RedirectToLogin(self.login_url.clone());
        }

        if card.allow_multiple {
            let now_selected = self.selection.toggle(card.post_id, option_id);
            card.set_option_selected(option_id, now_selected);
            return ClickOutcome::Handled;
        }

        card.set_options_disabled(true);
        match self.votes.send_vote(&card.vote_url, &[option_id]).await {
            Ok(results) => {
                card.apply_results(&results);
                self.toasts.toast(VOTE_SAVED, ToastKind::Success);
            }
            Err(err) => {
                warn!(post = card.post_id, "vote failed: {err}");
                self.toasts.toast(err.user_message(), ToastKind::Error);
            }
        }
        card.set_options_disabled(false);
        ClickOutcome::Handled
    }

    /// Click on a multi-select card's submit button. An empty selection never
    /// reaches the network.
    pub async fn submit_clicked(&mut self, card: &mut PollCard) -> ClickOutcome {
        if !self.authenticated {
            return ClickOutcome::RedirectToLogin(self.login_url.clone());
        }

        let selected = self.selection.selected(card.post_id);
        if selected.is_empty() {
            self.toasts.toast(SELECT_AT_LEAST_ONE, ToastKind::Error);
            return ClickOutcome::Handled;
        }

        card.submit.begin_loading();
        card.set_options_disabled(true);
        match self.votes.send_vote(&card.vote_url, &selected).await {
            Ok(results) => {
                card.apply_results(&results);
                self.selection.clear(card.post_id);
                card.clear_selected();
                self.toasts.toast(VOTES_SAVED, ToastKind::Success);
            }
            Err(err) => {
                // Selection stays put so the user can retry with one click.
                warn!(post = card.post_id, "multi vote failed: {err}");
                self.toasts.toast(err.user_message(), ToastKind::Error);
            }
        }
        card.submit.end_loading();
        card.set_options_disabled(false);
        ClickOutcome::Handled
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }
}
