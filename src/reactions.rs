use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;

/// The fixed reaction set. The badge row under a comment renders in this
/// order, whatever order the server's counts map comes back in.
#[derive(Debug, Clone, Copy)]
pub struct Reaction {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

pub const REACTIONS: [Reaction; 4] = [
    Reaction { key: "like", emoji: "👍", label: "Beğen" },
    Reaction { key: "love", emoji: "❤️", label: "Sevdim" },
    Reaction { key: "laugh", emoji: "😂", label: "Komik" },
    Reaction { key: "think", emoji: "🤔", label: "Düşündürücü" },
];

#[derive(Serialize)]
struct ReactRequest<'a> {
    reaction: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ReactOutcome {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    reactions: HashMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionBadge {
    pub emoji: &'static str,
    pub count: i64,
}

/// Rebuild the badge row from a counts map: catalog order, zero counts and
/// unknown keys dropped.
pub fn reaction_badges(counts: &HashMap<String, i64>) -> Vec<ReactionBadge> {
    REACTIONS
        .iter()
        .filter_map(|reaction| match counts.get(reaction.key) {
            Some(&count) if count > 0 => Some(ReactionBadge {
                emoji: reaction.emoji,
                count,
            }),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CommentReactions {
    api: ApiClient,
}

impl CommentReactions {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Toggle a reaction on a comment. `None` means the server did not accept
    /// the toggle and the row should stay as it is.
    pub async fn toggle(
        &self,
        comment_id: i64,
        reaction: &str,
    ) -> Result<Option<Vec<ReactionBadge>>, ApiError> {
        let outcome: ReactOutcome = self
            .api
            .post_json(
                &format!("/api/comment/{comment_id}/react/"),
                &ReactRequest { reaction },
            )
            .await?;
        if outcome.success {
            Ok(Some(reaction_badges(&outcome.reactions)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_follow_catalog_order_and_skip_zero() {
        let counts = HashMap::from([
            ("think".to_owned(), 2),
            ("like".to_owned(), 5),
            ("love".to_owned(), 0),
            ("custom".to_owned(), 9),
        ]);
        let badges = reaction_badges(&counts);
        assert_eq!(
            badges,
            vec![
                ReactionBadge { emoji: "👍", count: 5 },
                ReactionBadge { emoji: "🤔", count: 2 },
            ]
        );
    }

    #[test]
    fn empty_counts_render_nothing() {
        assert!(reaction_badges(&HashMap::new()).is_empty());
    }
}
