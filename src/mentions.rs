use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MentionUser {
    pub username: String,
}

#[derive(Debug, Default, Deserialize)]
struct UserSearch {
    #[serde(default)]
    users: Vec<MentionUser>,
}

/// Keys the dropdown intercepts while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Scan back from the cursor for the `@` that opened a mention. Whitespace
/// ends the scan: an `@` only counts while the caret is still inside the
/// same token.
fn mention_anchor(text: &str, cursor: usize) -> Option<usize> {
    let head = text.get(..cursor)?;
    for (i, ch) in head.char_indices().rev() {
        match ch {
            '@' => return Some(i),
            ' ' | '\n' => return None,
            _ => {}
        }
    }
    None
}

/// `@username` autocomplete over a comment or post composer buffer. The host
/// feeds in edits and key presses; the composer owns the suggestion list and
/// the splice when one is accepted.
pub struct MentionComposer {
    api: ApiClient,
    pub text: String,
    /// Caret position as a byte offset into `text`, always on a char boundary.
    pub cursor: usize,
    users: Vec<MentionUser>,
    selected: Option<usize>,
    mention_start: Option<usize>,
}

impl MentionComposer {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            text: String::new(),
            cursor: 0,
            users: Vec::new(),
            selected: None,
            mention_start: None,
        }
    }

    /// The buffer changed. Looks for a mention in progress and refreshes the
    /// suggestion list from the user-search endpoint when one is found.
    pub async fn input_changed(&mut self, text: &str, cursor: usize) -> Result<(), ApiError> {
        self.text = text.to_owned();
        self.cursor = cursor;

        let Some(at) = mention_anchor(&self.text, cursor) else {
            self.close();
            return Ok(());
        };
        self.mention_start = Some(at);
        let query = self.text[at + 1..cursor].to_owned();
        if query.is_empty() {
            self.close();
            return Ok(());
        }

        let mut url = self.api.endpoint("/api/search-users/")?;
        url.query_pairs_mut().append_pair("q", &query);
        let found: UserSearch = self.api.get_json_url(url).await?;
        self.users = found.users;
        self.selected = None;
        if self.users.is_empty() {
            self.close();
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        !self.users.is_empty()
    }

    pub fn suggestions(&self) -> &[MentionUser] {
        &self.users
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Mouse hover moves the highlight the same way the arrow keys do.
    pub fn highlight(&mut self, index: usize) {
        if index < self.users.len() {
            self.selected = Some(index);
        }
    }

    /// Keyboard handling while the dropdown is open. Returns true when the
    /// key was consumed and must not reach the textarea.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            Key::ArrowDown => {
                self.selected = Some(match self.selected {
                    Some(i) => (i + 1).min(self.users.len() - 1),
                    None => 0,
                });
                true
            }
            Key::ArrowUp => {
                self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
                true
            }
            Key::Enter => match self.selected {
                Some(index) => {
                    self.accept(index);
                    true
                }
                None => false,
            },
            Key::Escape => {
                self.close();
                true
            }
        }
    }

    /// Splice `@username ` over the partial mention and park the caret right
    /// after the inserted space.
    pub fn accept(&mut self, index: usize) {
        let Some(start) = self.mention_start else {
            return;
        };
        let Some(user) = self.users.get(index) else {
            return;
        };
        let username = user.username.clone();
        let before = &self.text[..start];
        let after = &self.text[self.cursor..];
        self.text = format!("{before}@{username} {after}");
        self.cursor = start + username.len() + 2;
        self.close();
    }

    fn close(&mut self) {
        self.users.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn composer() -> MentionComposer {
        let api = ApiClient::new(&ClientConfig::new("http://localhost/")).unwrap();
        MentionComposer::new(api)
    }

    fn composer_with(users: &[&str], text: &str, cursor: usize, start: usize) -> MentionComposer {
        let mut composer = composer();
        composer.text = text.to_owned();
        composer.cursor = cursor;
        composer.mention_start = Some(start);
        composer.users = users
            .iter()
            .map(|u| MentionUser {
                username: (*u).to_owned(),
            })
            .collect();
        composer
    }

    #[test]
    fn anchor_stops_at_whitespace() {
        assert_eq!(mention_anchor("merhaba @ay", 11), Some(8));
        assert_eq!(mention_anchor("merhaba @ay se", 14), None);
        assert_eq!(mention_anchor("no mention here", 15), None);
        assert_eq!(mention_anchor("@x", 2), Some(0));
    }

    #[test]
    fn accept_splices_username_and_moves_cursor() {
        let mut composer = composer_with(&["ayse"], "selam @ay nasılsın", 9, 6);
        composer.accept(0);
        assert_eq!(composer.text, "selam @ayse  nasılsın");
        // Caret sits after the inserted "@ayse ".
        assert_eq!(composer.cursor, 6 + "ayse".len() + 2);
        assert!(!composer.is_open());
    }

    #[test]
    fn arrow_keys_clamp_to_the_list() {
        let mut composer = composer_with(&["a", "b"], "@a", 2, 0);
        assert!(composer.key_pressed(Key::ArrowDown));
        assert_eq!(composer.selected_index(), Some(0));
        composer.key_pressed(Key::ArrowDown);
        composer.key_pressed(Key::ArrowDown);
        assert_eq!(composer.selected_index(), Some(1));
        composer.key_pressed(Key::ArrowUp);
        assert_eq!(composer.selected_index(), Some(0));
        composer.key_pressed(Key::ArrowUp);
        assert_eq!(composer.selected_index(), Some(0));
    }

    #[test]
    fn enter_without_highlight_is_ignored() {
        let mut composer = composer_with(&["a"], "@a", 2, 0);
        assert!(!composer.key_pressed(Key::Enter));
        composer.key_pressed(Key::ArrowDown);
        assert!(composer.key_pressed(Key::Enter));
        assert_eq!(composer.text, "@a ");
    }

    #[test]
    fn escape_closes_the_dropdown() {
        let mut composer = composer_with(&["a"], "@a", 2, 0);
        assert!(composer.key_pressed(Key::Escape));
        assert!(!composer.is_open());
        // A closed dropdown consumes nothing.
        assert!(!composer.key_pressed(Key::ArrowDown));
    }
}
