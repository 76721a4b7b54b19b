use serde::Deserialize;

/// Database key of a poll post. Polls themselves live on the server; the
/// client only ever sees ids attached to rendered cards.
pub type PostId = i64;
/// Database key of one option within a poll.
pub type OptionId = i64;

/// One row of the results payload returned after a vote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionResult {
    pub option_id: OptionId,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub percentage: f64,
}

/// Body of the vote endpoint's response, for success and failure alike.
/// Error responses carry only `error`, so everything defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<OptionResult>,
    #[serde(default)]
    pub error: Option<String>,
    /// Set by the server for anonymous sessions that are allowed one vote
    /// before being nudged to register.
    #[serde(default)]
    pub show_register_cta: bool,
}
