use reqwest::{Client, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::config::ClientConfig;
use crate::cookies::CookieJar;
use crate::error::ApiError;

/// Header Django checks mutating requests for.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// One HTTP client for the whole app: base URL joining, session cookie and
/// CSRF forwarding, and json helpers the widget clients build on. Clones
/// share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    cookies: CookieJar,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::new(),
            base: Url::parse(&config.base_url)?,
            cookies: CookieJar::parse(&config.cookie_header),
        })
    }

    /// Resolve an endpoint path (absolute-path form, e.g. `/notifications/`)
    /// against the configured origin.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base.join(path)
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies.csrf_token()
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("X-Requested-With", "XMLHttpRequest");
        if self.cookies.raw().is_empty() {
            builder
        } else {
            builder.header(header::COOKIE, self.cookies.raw().to_owned())
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_json_url(self.endpoint(path)?).await
    }

    pub async fn get_json_url<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.decorate(self.http.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// POST a JSON body. Requires a CSRF token in the session cookies.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let csrf = self.csrf_token().ok_or(ApiError::MissingCsrfToken)?.to_owned();
        let url = self.endpoint(path)?;
        let response = self
            .decorate(self.http.post(url))
            .header(CSRF_HEADER, csrf)
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Body-less POST for toggle-style endpoints that answer with JSON.
    pub async fn post_empty_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let csrf = self.csrf_token().ok_or(ApiError::MissingCsrfToken)?.to_owned();
        let url = self.endpoint(path)?;
        let response = self
            .decorate(self.http.post(url))
            .header(CSRF_HEADER, csrf)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Body-less POST where only the status matters.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let csrf = self.csrf_token().ok_or(ApiError::MissingCsrfToken)?.to_owned();
        let url = self.endpoint(path)?;
        let response = self
            .decorate(self.http.post(url))
            .header(CSRF_HEADER, csrf)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(())
    }
}
