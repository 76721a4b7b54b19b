use reqwest::{StatusCode, header};
use tracing::{debug, info};

use crate::api::{ApiClient, CSRF_HEADER};
use crate::error::VoteError;
use crate::events::{ClientEvent, EventBus};
use crate::poll::{OptionId, OptionResult, VoteOutcome};

/// Sends vote submissions to a poll's vote endpoint and turns the response
/// into either a results payload or a classified [`VoteError`].
#[derive(Debug, Clone)]
pub struct VoteClient {
    api: ApiClient,
    events: EventBus,
}

impl VoteClient {
    pub fn new(api: ApiClient, events: EventBus) -> Self {
        Self { api, events }
    }

    /// Submit `option_ids` to `vote_url` (the per-post endpoint the server
    /// stamped on the card).
    ///
    /// Fails locally when the session cookies carry no CSRF token; nothing is
    /// sent in that case. Each id goes out as a repeated `options` form
    /// field. The body is parsed before the status is inspected, so
    /// server-supplied `error` text can ride the 403/400 variants. On success
    /// a [`ClientEvent::VoteSuccess`] is broadcast before the results are
    /// returned.
    pub async fn send_vote(
        &self,
        vote_url: &str,
        option_ids: &[OptionId],
    ) -> Result<Vec<OptionResult>, VoteError> {
        let csrf = self
            .api
            .csrf_token()
            .ok_or(VoteError::MissingCsrfToken)?
            .to_owned();
        let url = self.api.endpoint(vote_url)?;

        let form: Vec<(&str, String)> = option_ids
            .iter()
            .map(|id| ("options", id.to_string()))
            .collect();

        debug!(%url, options = ?option_ids, "submitting vote");
        let mut request = self
            .api
            .http()
            .post(url)
            .header(CSRF_HEADER, csrf)
            .form(&form);
        if !self.api.cookies().raw().is_empty() {
            request = request.header(header::COOKIE, self.api.cookies().raw().to_owned());
        }
        let response = request.send().await.map_err(VoteError::Transport)?;

        let status = response.status();
        let outcome: VoteOutcome = response
            .json()
            .await
            .map_err(VoteError::MalformedResponse)?;

        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => VoteError::RateLimited,
                StatusCode::FORBIDDEN => VoteError::Forbidden(outcome.error),
                StatusCode::BAD_REQUEST => VoteError::InvalidRequest(outcome.error),
                _ => VoteError::Rejected(outcome.error),
            });
        }
        if !outcome.success {
            return Err(VoteError::Rejected(outcome.error));
        }

        info!(options = ?option_ids, "vote recorded");
        self.events.emit(ClientEvent::VoteSuccess {
            option_ids: option_ids.to_vec(),
            results: outcome.results.clone(),
            show_register_cta: outcome.show_register_cta,
        });
        Ok(outcome.results)
    }
}
