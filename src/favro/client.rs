//! Favro HTTP client: the single request pipeline for every API call

use std::time::Duration;

use futures::stream::{self, Stream, TryStreamExt};
use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::api;
use crate::context::{CredentialStore, Session, ValueSource};
use crate::error::{FavroError, Result};

use super::response::{map_error_response, parse_retry_after};
use super::retry::{RetryDecision, RetryPolicy};
use super::traits::{Page, PageCursor, Query};

/// Connection settings for [`FavroClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API root, e.g. `https://favro.com/api/v1`
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: api::BASE_URL.to_string(),
            timeout: Duration::from_secs(api::TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(api::CONNECT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Point the client at another API root (self-hosted proxy, mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Body of a successful response
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: String,
}

/// Outcome of one attempt inside the retry loop
enum Attempt {
    Done(RawResponse),
    Retry(Duration),
    Fail(FavroError),
}

/// Where a page stream stands between polls
enum PageState {
    First,
    Next(PageCursor),
    Finished,
}

/// Favro API client bound to one [`Session`]
#[derive(Debug)]
pub struct FavroClient {
    client: Client,
    session: Session,
    settings: ClientSettings,
    /// Store to invalidate on 401, when the token came from it
    credential_store: Option<CredentialStore>,
}

impl FavroClient {
    /// Create a client for `session`
    pub fn new(session: Session, settings: ClientSettings) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            session,
            settings,
            credential_store: None,
        }
    }

    /// Attach the store the session token was read from
    pub fn with_credential_store(mut self, store: CredentialStore) -> Self {
        self.credential_store = Some(store);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Build a full URL for `path` (relative to the API root) and `query`
    pub(crate) fn url(&self, path: &str, query: &Query) -> String {
        let mut url = format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        url
    }

    /// Same connection, scoped to another organization
    pub fn scoped_to(&self, organization_id: &str) -> FavroClient {
        FavroClient {
            client: self.client.clone(),
            session: self.session.clone().with_organization(organization_id),
            settings: self.settings.clone(),
            credential_store: self.credential_store.clone(),
        }
    }

    /// Add auth and routing headers to a request
    fn build(&self, method: Method, url: &str, body: Option<&Value>) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        builder = match self.session.email() {
            Some(email) => builder.basic_auth(email, Some(self.session.token())),
            None => builder.header(AUTHORIZATION, format!("Bearer {}", self.session.token())),
        };
        if let Some(organization_id) = self.session.organization_id() {
            builder = builder.header(api::ORGANIZATION_HEADER, organization_id);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder
    }

    /// Send a request through the retry loop and return the 2xx body.
    ///
    /// 429 and 5xx are retried under the [`RetryPolicy`]; a transient network
    /// failure is retried once. Everything else fails immediately. A 401 on a
    /// stored token clears the stored credentials before returning.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.url(path, query);
        let policy = &self.settings.retry;
        let mut throttled: u32 = 0;
        let mut transient: u32 = 0;

        loop {
            debug!("{} {}", method, url);

            let attempt = match self.build(method.clone(), &url, body).send().await {
                Ok(response) => {
                    transient = 0;
                    let status = response.status();
                    let retry_after = parse_retry_after(response.headers());
                    match response.text().await {
                        Ok(text) => {
                            self.classify(status, text, retry_after, policy, &mut throttled)
                        }
                        Err(e) if is_transient(&e) => {
                            transient += 1;
                            transient_attempt(policy, transient, e)
                        }
                        Err(e) => Attempt::Fail(e.into()),
                    }
                }
                Err(e) if is_transient(&e) => {
                    transient += 1;
                    transient_attempt(policy, transient, e)
                }
                Err(e) => Attempt::Fail(e.into()),
            };

            match attempt {
                Attempt::Done(response) => return Ok(response),
                Attempt::Retry(delay) => {
                    debug!("Retrying {} {} in {:?}", method, url, delay);
                    tokio::time::sleep(delay).await;
                }
                Attempt::Fail(err) => {
                    if matches!(err, FavroError::Unauthenticated { .. }) {
                        self.invalidate_credentials();
                    }
                    return Err(err);
                }
            }
        }
    }

    fn classify(
        &self,
        status: StatusCode,
        body: String,
        retry_after: Option<Duration>,
        policy: &RetryPolicy,
        throttled: &mut u32,
    ) -> Attempt {
        if status.is_success() {
            return Attempt::Done(RawResponse {
                status: status.as_u16(),
                body,
            });
        }

        let err = map_error_response(status.as_u16(), &body, retry_after);
        if status != StatusCode::TOO_MANY_REQUESTS && !status.is_server_error() {
            return Attempt::Fail(err);
        }

        *throttled += 1;
        match policy.on_throttled(*throttled, retry_after) {
            RetryDecision::Retry(delay) => {
                warn!(
                    "Request returned {} (attempt {}/{}), backing off {:?}",
                    status.as_u16(),
                    throttled,
                    policy.max_attempts,
                    delay
                );
                Attempt::Retry(delay)
            }
            RetryDecision::GiveUp => Attempt::Fail(err),
        }
    }

    /// Clear stored credentials after the remote rejected a stored token
    fn invalidate_credentials(&self) {
        if self.session.token_source() != ValueSource::Stored {
            debug!("Token was supplied as an override; keeping stored credentials");
            return;
        }
        let Some(store) = &self.credential_store else {
            return;
        };
        match store.clear() {
            Ok(()) => warn!("Stored credentials were rejected and have been cleared"),
            Err(e) => warn!("Failed to clear rejected credentials: {}", e),
        }
    }

    /// Send a request and deserialize the JSON response into `T`
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<T> {
        let response = self.send(method, path, query, body).await?;
        serde_json::from_str(&response.body).map_err(|e| FavroError::ValidationFailed {
            status: Some(response.status),
            message: format!("Failed to parse response from '{}': {}", path, e),
            fields: Vec::new(),
        })
    }

    /// Send a request whose response body is ignored
    pub async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<()> {
        self.send(method, path, query, body).await.map(|_| ())
    }

    /// GET a single resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        self.request(Method::GET, path, query, None).await
    }

    /// Fetch one page of a listing; `None` cursor means the first page
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        cursor: Option<&PageCursor>,
    ) -> Result<Page<T>> {
        let query = match cursor {
            Some(cursor) => query.clone().extend(cursor.query()),
            None => query.clone(),
        };
        let page: Page<T> = self.get(path, &query).await?;
        debug!(
            "Fetched page {}/{} of '{}' ({} entities)",
            page.page + 1,
            page.pages.max(1),
            path,
            page.entities.len()
        );
        Ok(page)
    }

    /// Lazily iterate the pages of a listing, one batch of entities per page.
    ///
    /// Each call starts a fresh sequence from the first page. The stream ends
    /// after the last page or right after the first error.
    pub fn iterate_pages<'a, T>(
        &'a self,
        path: &'a str,
        query: Query,
    ) -> impl Stream<Item = Result<Vec<T>>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        stream::try_unfold(PageState::First, move |state| {
            let query = query.clone();
            async move { self.next_batch(path, &query, state).await }
        })
    }

    async fn next_batch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
        state: PageState,
    ) -> Result<Option<(Vec<T>, PageState)>> {
        let cursor = match state {
            PageState::First => None,
            PageState::Next(cursor) => Some(cursor),
            PageState::Finished => return Ok(None),
        };
        let requested = cursor.as_ref().map_or(0, PageCursor::page);
        let page: Page<T> = self.fetch_page(path, query, cursor.as_ref()).await?;
        if page.page != requested {
            warn!(
                "Requested page {} of '{}' but got page {}, stopping",
                requested, path, page.page
            );
        }
        let next = match page.next_cursor(requested) {
            Some(cursor) => PageState::Next(cursor),
            None => PageState::Finished,
        };
        Ok(Some((page.entities, next)))
    }

    /// Collect every page of a listing
    pub async fn fetch_all<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<Vec<T>> {
        let items: Vec<T> = self.iterate_pages(path, query).try_concat().await?;
        debug!("Fetched {} entities from '{}'", items.len(), path);
        Ok(items)
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

fn transient_attempt(policy: &RetryPolicy, consecutive: u32, err: reqwest::Error) -> Attempt {
    match policy.on_transient(consecutive) {
        RetryDecision::Retry(delay) => {
            warn!("Network error ({}), retrying once", err);
            Attempt::Retry(delay)
        }
        RetryDecision::GiveUp => Attempt::Fail(err.into()),
    }
}

#[cfg(test)]
impl FavroClient {
    /// Client for a mock server with fast retries and a stored-token session
    pub(crate) fn test_client(base_url: &str) -> Self {
        let session = Session::from_credentials(
            &crate::context::Credentials::new("test-token"),
            ValueSource::Stored,
        )
        .expect("valid test session")
        .with_organization("org-1");
        Self::new(session, test_settings(base_url))
    }
}

/// Settings for a mock server with millisecond retry delays
#[cfg(test)]
pub(crate) fn test_settings(base_url: &str) -> ClientSettings {
    ClientSettings::default()
        .with_base_url(base_url)
        .with_retry(RetryPolicy::with_delays(
            Duration::from_millis(1),
            Duration::from_millis(5),
            Duration::from_millis(1),
        ))
}
