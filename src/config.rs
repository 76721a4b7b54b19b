/// Everything the host page knows that the engine cannot discover on its own.
///
/// Built once and handed to [`crate::app::App::new`]; components hold
/// references instead of reading ambient globals.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin the relative endpoint paths resolve against.
    pub base_url: String,
    /// Where unauthenticated users are sent when they try to vote.
    pub login_url: String,
    /// Registration page offered by the guest CTA.
    pub register_url: String,
    /// Whether the session belongs to a logged-in user.
    pub authenticated: bool,
    /// The session's cookies, in `Cookie` request-header form. The CSRF token
    /// is read out of this; the whole header is forwarded on every request.
    pub cookie_header: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_url: "/login/".to_owned(),
            register_url: "/register/".to_owned(),
            authenticated: false,
            cookie_header: String::new(),
        }
    }

    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn cookie_header(mut self, header: impl Into<String>) -> Self {
        self.cookie_header = header.into();
        self
    }

    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    pub fn register_url(mut self, url: impl Into<String>) -> Self {
        self.register_url = url.into();
        self
    }
}
