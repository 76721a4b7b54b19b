use thiserror::Error;

/// Failures of a single vote submission. Each variant maps to exactly one
/// user-facing message; server-supplied `error` text wins over the default
/// for the statuses where the backend sends one.
#[derive(Error, Debug)]
pub enum VoteError {
    #[error("csrf token missing from session cookies")]
    MissingCsrfToken,
    #[error("vote endpoint url is invalid")]
    BadEndpoint(#[from] url::ParseError),
    #[error("rate limited by the vote endpoint")]
    RateLimited,
    #[error("vote forbidden")]
    Forbidden(Option<String>),
    #[error("vote request invalid")]
    InvalidRequest(Option<String>),
    #[error("vote rejected by the server")]
    Rejected(Option<String>),
    #[error("vote request failed: {0}")]
    Transport(reqwest::Error),
    #[error("vote response body malformed: {0}")]
    MalformedResponse(reqwest::Error),
}

impl VoteError {
    /// The toast text shown for this failure.
    pub fn user_message(&self) -> &str {
        match self {
            VoteError::MissingCsrfToken => "CSRF token bulunamadı. Lütfen sayfayı yenileyin.",
            VoteError::RateLimited => "Çok hızlı işlem yapıyorsunuz. Lütfen bekleyin.",
            VoteError::Forbidden(msg) => msg.as_deref().unwrap_or("Bu işlem için yetkiniz yok."),
            VoteError::InvalidRequest(msg) => msg.as_deref().unwrap_or("Geçersiz istek."),
            VoteError::Rejected(msg) => msg
                .as_deref()
                .unwrap_or("Bir hata oluştu. Lütfen tekrar deneyin."),
            VoteError::BadEndpoint(_) | VoteError::Transport(_) | VoteError::MalformedResponse(_) => {
                "Bir hata oluştu. Lütfen tekrar deneyin."
            }
        }
    }
}

/// Failures of the smaller widget endpoints (bookmarks, reactions,
/// notifications, badges, user search). These are surfaced generically or
/// only logged, so the variants stay coarse.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("endpoint url is invalid: {0}")]
    BadEndpoint(#[from] url::ParseError),
    #[error("csrf token missing from session cookies")]
    MissingCsrfToken,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_text_wins_for_forbidden_and_bad_request() {
        let err = VoteError::Forbidden(Some("Yorum yasağınız var.".to_owned()));
        assert_eq!(err.user_message(), "Yorum yasağınız var.");
        let err = VoteError::InvalidRequest(None);
        assert_eq!(err.user_message(), "Geçersiz istek.");
    }

    #[test]
    fn rate_limit_message_ignores_server_text() {
        // 429 always gets the fixed slow-down message.
        let err = VoteError::RateLimited;
        assert_eq!(
            err.user_message(),
            "Çok hızlı işlem yapıyorsunuz. Lütfen bekleyin."
        );
    }

    #[test]
    fn missing_token_has_local_message() {
        assert_eq!(
            VoteError::MissingCsrfToken.user_message(),
            "CSRF token bulunamadı. Lütfen sayfayı yenileyin."
        );
    }
}
