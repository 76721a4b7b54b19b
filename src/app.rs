use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::badges::{Badge, BadgeWatcher};
use crate::bookmarks::Bookmarks;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::events::EventBus;
use crate::guest::{GuestCta, RegisterPrompt};
use crate::mentions::MentionComposer;
use crate::notifications::NotificationFeed;
use crate::reactions::CommentReactions;
use crate::search::{SearchHistory, SearchView, SmartSearch};
use crate::storage::Storage;
use crate::theme::ThemeSwitcher;
use crate::toast::ToastSink;
use crate::vote::VoteClient;
use crate::voting::PollVoting;

/// The page's composition root: one instance per session, built before any
/// event handling starts. Everything that used to be a module-level global
/// in a script closure lives here and is passed down by reference.
pub struct App {
    pub config: ClientConfig,
    pub events: EventBus,
    pub api: ApiClient,
    pub voting: PollVoting,
    pub notifications: NotificationFeed,
    pub bookmarks: Bookmarks,
    pub reactions: CommentReactions,
    pub themes: ThemeSwitcher,
    storage: Arc<dyn Storage>,
}

impl App {
    pub fn new(
        config: ClientConfig,
        toasts: Arc<dyn ToastSink>,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config)?;
        let events = EventBus::new();
        let votes = VoteClient::new(api.clone(), events.clone());
        let voting = PollVoting::new(votes, toasts.clone(), &config);
        let notifications = NotificationFeed::new(api.clone());
        let bookmarks = Bookmarks::new(api.clone(), toasts);
        let reactions = CommentReactions::new(api.clone());
        let themes = ThemeSwitcher::new(storage.clone());

        Ok(Self {
            config,
            events,
            api,
            voting,
            notifications,
            bookmarks,
            reactions,
            themes,
            storage,
        })
    }

    /// Badge popups in the background until the returned watcher is dropped.
    pub fn watch_badges(&self, popups: mpsc::Sender<Badge>) -> BadgeWatcher {
        BadgeWatcher::spawn(&self.events, self.api.clone(), popups)
    }

    pub fn watch_guest_cta(&self, prompts: mpsc::Sender<RegisterPrompt>) -> GuestCta {
        GuestCta::spawn(&self.events, &self.config, prompts)
    }

    pub fn smart_search(&self, views: mpsc::Sender<SearchView>) -> SmartSearch {
        SmartSearch::new(SearchHistory::load(self.storage.clone()), views)
    }

    pub fn mention_composer(&self) -> MentionComposer {
        MentionComposer::new(self.api.clone())
    }
}
