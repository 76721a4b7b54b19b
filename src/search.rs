use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::storage::Storage;

const HISTORY_KEY: &str = "search_history";
const HISTORY_CAP: usize = 10;
const RECENT_SHOWN: usize = 5;
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Topic catalog backing the search dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: &'static str,
    pub icon: &'static str,
    pub poll_count: u32,
}

impl Topic {
    /// The count label on a result row.
    pub fn count_label(&self) -> String {
        format!("{} anket", self.poll_count)
    }
}

pub const TOPICS: [Topic; 6] = [
    Topic { name: "Teknoloji", icon: "💻", poll_count: 45 },
    Topic { name: "Spor", icon: "⚽", poll_count: 32 },
    Topic { name: "Eğlence", icon: "🎉", poll_count: 28 },
    Topic { name: "Eğitim", icon: "🎓", poll_count: 21 },
    Topic { name: "Günlük Hayat", icon: "🏡", poll_count: 19 },
    Topic { name: "Yaratıcı", icon: "🎨", poll_count: 15 },
];

pub const TRENDING: [&str; 5] = ["Teknoloji", "Spor", "Eğlence", "Eğitim", "Günlük Hayat"];

/// Case-insensitive substring match over the catalog.
pub fn results_for(query: &str) -> Vec<Topic> {
    let needle = query.to_lowercase();
    TOPICS
        .iter()
        .filter(|topic| topic.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Past queries, newest first, capped and persisted between page loads.
pub struct SearchHistory {
    storage: Arc<dyn Storage>,
    terms: Vec<String>,
}

impl SearchHistory {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let terms = storage
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { storage, terms }
    }

    /// Record a query: an existing entry moves to the front instead of
    /// duplicating, and the oldest falls off past the cap.
    pub fn add(&mut self, term: &str) {
        self.terms.retain(|t| t != term);
        self.terms.insert(0, term.to_owned());
        self.terms.truncate(HISTORY_CAP);
        self.save();
    }

    pub fn remove(&mut self, term: &str) {
        self.terms.retain(|t| t != term);
        self.save();
    }

    /// The slice the dropdown shows.
    pub fn recent(&self) -> &[String] {
        &self.terms[..self.terms.len().min(RECENT_SHOWN)]
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn save(&self) {
        if let Ok(raw) = serde_json::to_string(&self.terms) {
            self.storage.set(HISTORY_KEY, &raw);
        }
    }
}

/// What the results dropdown should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// Focused with an empty query: recent terms plus the trending list.
    Default {
        recent: Vec<String>,
        trending: Vec<&'static str>,
    },
    Results(Vec<Topic>),
    NoResults,
}

/// Search box state machine. Views arrive over the channel the host passed
/// in; a keystroke inside the debounce window cancels the previous lookup.
pub struct SmartSearch {
    history: SearchHistory,
    debounce: Duration,
    pending: Option<JoinHandle<()>>,
    views: mpsc::Sender<SearchView>,
}

impl SmartSearch {
    pub fn new(history: SearchHistory, views: mpsc::Sender<SearchView>) -> Self {
        Self {
            history,
            debounce: DEBOUNCE,
            pending: None,
            views,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn default_view(&self) -> SearchView {
        SearchView::Default {
            recent: self.history.recent().to_vec(),
            trending: TRENDING.to_vec(),
        }
    }

    /// The input's text changed. Empty input swaps the default sections in
    /// right away; anything else waits out the debounce window first.
    pub async fn input_changed(&mut self, raw: &str) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let query = raw.trim().to_owned();
        if query.is_empty() {
            let _ = self.views.send(self.default_view()).await;
            return;
        }

        let views = self.views.clone();
        let debounce = self.debounce;
        self.pending = Some(tokio::spawn(async move {
            sleep(debounce).await;
            let results = results_for(&query);
            let view = if results.is_empty() {
                SearchView::NoResults
            } else {
                SearchView::Results(results)
            };
            let _ = views.send(view).await;
        }));
    }

    /// A result row was picked: record it and hand the query back for the
    /// host to navigate with.
    pub fn select(&mut self, query: &str) -> String {
        self.history.add(query);
        query.to_owned()
    }

    /// Remove one remembered term and refresh the default sections.
    pub async fn remove_term(&mut self, term: &str) {
        self.history.remove(term);
        let _ = self.views.send(self.default_view()).await;
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }
}

impl Drop for SmartSearch {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn history() -> SearchHistory {
        SearchHistory::load(Arc::new(MemoryStorage::default()))
    }

    #[test]
    fn matching_is_case_insensitive() {
        let results = results_for("tekno");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Teknoloji");
        assert_eq!(results[0].count_label(), "45 anket");
        assert!(results_for("xyz").is_empty());
    }

    #[test]
    fn history_dedups_and_caps() {
        let mut history = history();
        for term in ["a", "b", "c", "a"] {
            history.add(term);
        }
        assert_eq!(history.terms(), ["a", "c", "b"]);

        for i in 0..12 {
            history.add(&format!("term{i}"));
        }
        assert_eq!(history.terms().len(), 10);
        assert_eq!(history.recent().len(), 5);
        assert_eq!(history.terms()[0], "term11");
    }

    #[test]
    fn history_survives_a_reload() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let mut history = SearchHistory::load(storage.clone());
        history.add("Spor");
        drop(history);

        let reloaded = SearchHistory::load(storage);
        assert_eq!(reloaded.terms(), ["Spor"]);
    }

    #[test]
    fn removing_a_term_updates_storage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let mut history = SearchHistory::load(storage.clone());
        history.add("Spor");
        history.add("Eğitim");
        history.remove("Spor");
        assert_eq!(SearchHistory::load(storage).terms(), ["Eğitim"]);
    }

    #[tokio::test]
    async fn debounce_drops_superseded_queries() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut search =
            SmartSearch::new(history(), tx).with_debounce(Duration::from_millis(20));

        search.input_changed("Tekno").await;
        search.input_changed("Spor").await;

        let view = rx.recv().await.unwrap();
        let SearchView::Results(results) = view else {
            panic!("expected results");
        };
        assert_eq!(results[0].name, "Spor");
        // The superseded query never produced a view.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_input_shows_defaults_immediately() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut search = SmartSearch::new(history(), tx);
        search.input_changed("   ").await;
        let SearchView::Default { recent, trending } = rx.recv().await.unwrap() else {
            panic!("expected default view");
        };
        assert!(recent.is_empty());
        assert_eq!(trending.len(), 5);
    }
}
