//! # Request Lifecycle
//!
//! One JSON endpoint with observable lifecycle state.
//!
//! A `RequestHook` fixes the target URL, method and headers at construction
//! and tracks the outcome of the latest call as a `RequestState`:
//!
//! ```text
//!            send_request / fetch / start
//!   Idle ─────────────────────────────────▶ Loading
//!    ▲                                      │     │
//!    │ clear_data                  2xx body │     │ error status / transport
//!    │                                      ▼     ▼
//!    └──────────────────────────── Succeeded(T)  Failed(message)
//! ```
//!
//! Failures never escape as `Err`: they become `Failed` with a message fit
//! for an error panel.
//!
//! Overlapping calls are ordered by a sequence token taken at dispatch. Only
//! the newest dispatch may write its outcome; older responses are dropped.
//! Detached requests (`dispatch`, `start`) hold the lifecycle weakly, so a
//! consumer that drops every handle mid-flight simply never sees the result.
//! `try_send_request` refuses instead of superseding: while a call is in
//! flight it returns `None` and sends nothing.

use foodie_core::{StoreError, StoreResult, REQUEST_FAILURE_MESSAGE};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Lifecycle of the latest request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// Nothing sent yet, or data cleared
    Idle,
    /// A request is in flight
    Loading,
    /// Last request returned a success status with this body
    Succeeded(T),
    /// Last request failed with this user-facing message
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Error message, if the last request failed
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Response body, if the last request succeeded
    pub fn succeeded(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

/// Method, headers and start policy for a `RequestHook`
#[derive(Debug, Clone)]
pub struct RequestConfig {
    method: Option<Method>,
    headers: HeaderMap,
    load_on_start: bool,
}

impl RequestConfig {
    /// Config for `method`; `None` means GET.
    ///
    /// GET (explicit or implied) turns load-on-start on, anything else
    /// leaves the hook caller-driven.
    pub fn new(method: Option<Method>) -> Self {
        let load_on_start = method.as_ref().map_or(true, |m| *m == Method::GET);
        Self {
            method,
            headers: HeaderMap::new(),
            load_on_start,
        }
    }

    pub fn get() -> Self {
        Self::new(Some(Method::GET))
    }

    pub fn post() -> Self {
        Self::new(Some(Method::POST))
    }

    /// Builder: add a header. `Content-Type` overrides the JSON default.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Builder: override the load-on-start policy
    pub fn with_load_on_start(mut self, load_on_start: bool) -> Self {
        self.load_on_start = load_on_start;
        self
    }

    /// Effective method
    pub fn method(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn load_on_start(&self) -> bool {
        self.load_on_start
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Observable wrapper around a single JSON endpoint.
///
/// Cloning is cheap and every clone shares the same lifecycle state.
pub struct RequestHook<T> {
    endpoint: Arc<Endpoint>,
    lifecycle: Arc<Lifecycle<T>>,
    load_on_start: bool,
    started: Arc<AtomicBool>,
}

impl<T> Clone for RequestHook<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
            lifecycle: Arc::clone(&self.lifecycle),
            load_on_start: self.load_on_start,
            started: Arc::clone(&self.started),
        }
    }
}

impl<T> RequestHook<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Create a hook for `url`.
    ///
    /// `initial` is what `data()` reports until a request succeeds, and
    /// again after `clear_data`.
    pub fn new(client: Client, url: impl Into<String>, config: RequestConfig, initial: Option<T>) -> Self {
        let endpoint = Endpoint {
            client,
            url: url.into(),
            method: config.method(),
            headers: config.headers.clone(),
        };
        let (state, _) = watch::channel(RequestState::Idle);

        Self {
            endpoint: Arc::new(endpoint),
            lifecycle: Arc::new(Lifecycle {
                initial,
                state,
                latest: AtomicU64::new(0),
            }),
            load_on_start: config.load_on_start,
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RequestState<T> {
        self.lifecycle.state.borrow().clone()
    }

    /// Last successful body, or the initial data when no request has
    /// succeeded since construction or the last `clear_data`
    pub fn data(&self) -> Option<T> {
        match &*self.lifecycle.state.borrow() {
            RequestState::Succeeded(data) => Some(data.clone()),
            _ => self.lifecycle.initial.clone(),
        }
    }

    /// Last failure message
    pub fn error(&self) -> Option<String> {
        self.lifecycle.state.borrow().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.state.borrow().is_loading()
    }

    /// Watch lifecycle transitions
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.lifecycle.state.subscribe()
    }

    pub fn url(&self) -> &str {
        &self.endpoint.url
    }

    pub fn method(&self) -> &Method {
        &self.endpoint.method
    }

    /// Back to `Idle`, so `data()` reports the initial value again.
    ///
    /// A request still in flight is invalidated and its response dropped.
    pub fn clear_data(&self) {
        self.lifecycle.state.send_modify(|state| {
            self.lifecycle.latest.fetch_add(1, Ordering::SeqCst);
            *state = RequestState::Idle;
        });
    }

    /// Send `payload` as the JSON body and wait for the outcome
    #[instrument(skip(self, payload), fields(method = %self.endpoint.method, url = %self.endpoint.url))]
    pub async fn send_request<P>(&self, payload: &P) -> RequestState<T>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload).map(Some);
        run(&self.endpoint, Arc::downgrade(&self.lifecycle), body, Overlap::Supersede).await;
        self.state()
    }

    /// Send `payload` unless a request is already in flight.
    ///
    /// The Loading check and the switch to Loading happen under one lock, so
    /// of two concurrent callers exactly one reaches the network. The other
    /// gets `None`.
    #[instrument(skip(self, payload), fields(method = %self.endpoint.method, url = %self.endpoint.url))]
    pub async fn try_send_request<P>(&self, payload: &P) -> Option<RequestState<T>>
    where
        P: Serialize + ?Sized,
    {
        let body = encode(payload).map(Some);
        run(&self.endpoint, Arc::downgrade(&self.lifecycle), body, Overlap::Refuse)
            .await
            .then(|| self.state())
    }

    /// Send without a body and wait for the outcome
    #[instrument(skip(self), fields(method = %self.endpoint.method, url = %self.endpoint.url))]
    pub async fn fetch(&self) -> RequestState<T> {
        run(&self.endpoint, Arc::downgrade(&self.lifecycle), Ok(None), Overlap::Supersede).await;
        self.state()
    }

    /// Send `payload` on a detached task.
    ///
    /// The task does not keep the hook alive.
    pub fn dispatch<P>(&self, payload: &P) -> JoinHandle<()>
    where
        P: Serialize + ?Sized,
    {
        self.spawn(encode(payload).map(Some))
    }

    /// Fire the load-on-start request.
    ///
    /// Fires at most once per hook (clones included) and only when the
    /// config's load-on-start policy is set.
    pub fn start(&self) -> Option<JoinHandle<()>> {
        if !self.load_on_start {
            return None;
        }
        if self.started.swap(true, Ordering::SeqCst) {
            debug!(url = %self.endpoint.url, "load-on-start already fired");
            return None;
        }

        info!(method = %self.endpoint.method, url = %self.endpoint.url, "load-on-start request");
        Some(self.spawn(Ok(None)))
    }

    fn spawn(&self, body: StoreResult<Option<Vec<u8>>>) -> JoinHandle<()> {
        let endpoint = Arc::clone(&self.endpoint);
        let lifecycle = Arc::downgrade(&self.lifecycle);
        tokio::spawn(async move {
            run(&endpoint, lifecycle, body, Overlap::Supersede).await;
        })
    }
}

fn encode<P: Serialize + ?Sized>(payload: &P) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(payload)
        .map_err(|e| StoreError::Serialization(format!("Failed to encode request body: {}", e)))
}

/// What a new call does when another is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    /// Take over; the older response is dropped on arrival
    Supersede,
    /// Do not send
    Refuse,
}

/// One full request cycle: Loading, network call, terminal state.
///
/// Returns `false` when nothing was sent.
async fn run<T>(
    endpoint: &Endpoint,
    lifecycle: Weak<Lifecycle<T>>,
    body: StoreResult<Option<Vec<u8>>>,
    overlap: Overlap,
) -> bool
where
    T: DeserializeOwned,
{
    let Some(started) = lifecycle.upgrade().map(|l| match overlap {
        Overlap::Supersede => Some(l.begin()),
        Overlap::Refuse => l.try_begin(),
    }) else {
        debug!(url = %endpoint.url, "hook dropped before dispatch");
        return false;
    };
    let Some(token) = started else {
        debug!(url = %endpoint.url, "request already in flight, not sending");
        return false;
    };

    let outcome = match body {
        Ok(body) => endpoint.execute(body).await,
        Err(e) => Err(e),
    };

    match lifecycle.upgrade() {
        Some(lifecycle) => lifecycle.finish(token, outcome),
        None => debug!(url = %endpoint.url, "hook dropped while request was in flight, discarding response"),
    }
    true
}

struct Lifecycle<T> {
    initial: Option<T>,
    state: watch::Sender<RequestState<T>>,
    latest: AtomicU64,
}

impl<T> Lifecycle<T> {
    /// Enter Loading and take a fresh sequence token
    fn begin(&self) -> u64 {
        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RequestState::Loading;
        });
        token
    }

    /// Like `begin`, but only from a state other than Loading
    fn try_begin(&self) -> Option<u64> {
        let mut token = None;
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            token = Some(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
            *state = RequestState::Loading;
            true
        });
        token
    }

    /// Record the outcome if `token` is still the newest dispatch
    fn finish(&self, token: u64, outcome: StoreResult<T>) {
        let next = match outcome {
            Ok(data) => RequestState::Succeeded(data),
            Err(e) => {
                error!(error = %e, "request failed");
                RequestState::Failed(e.user_message())
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != token {
                return false;
            }
            *state = next;
            true
        });

        if !applied {
            debug!(token, "discarding stale response");
        }
    }
}

struct Endpoint {
    client: Client,
    url: String,
    method: Method,
    headers: HeaderMap,
}

impl Endpoint {
    async fn execute<T: DeserializeOwned>(&self, body: Option<Vec<u8>>) -> StoreResult<T> {
        let mut request = self
            .client
            .request(self.method.clone(), &self.url);

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }
        // configured headers win over the default content type
        request = request.headers(self.headers.clone());

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| REQUEST_FAILURE_MESSAGE.to_string());

            warn!(status = status.as_u16(), %message, "server rejected request");
            return Err(StoreError::Request {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "request succeeded");

        serde_json::from_slice(&body)
            .map_err(|e| StoreError::Serialization(format!("Failed to parse response: {}", e)))
    }
}

/// Error body shape shared by the meals and orders endpoints
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_on_start_policy() {
        assert!(RequestConfig::default().load_on_start());
        assert!(RequestConfig::get().load_on_start());
        assert!(!RequestConfig::post().load_on_start());
        assert!(!RequestConfig::get().with_load_on_start(false).load_on_start());
        assert_eq!(RequestConfig::default().method(), Method::GET);
    }

    #[test]
    fn test_state_accessors() {
        let failed: RequestState<u32> = RequestState::Failed("nope".into());
        assert_eq!(failed.error(), Some("nope"));
        assert!(failed.succeeded().is_none());
        assert!(!failed.is_loading());

        let done = RequestState::Succeeded(7u32);
        assert_eq!(done.succeeded(), Some(&7));
        assert!(done.error().is_none());
    }

    #[tokio::test]
    async fn test_initial_data_reported_while_idle() {
        let hook: RequestHook<Vec<u32>> = RequestHook::new(
            Client::new(),
            "http://localhost:3000/meals",
            RequestConfig::get(),
            Some(Vec::new()),
        );

        assert_eq!(hook.state(), RequestState::Idle);
        assert_eq!(hook.data(), Some(Vec::new()));
        assert!(hook.error().is_none());
        assert!(!hook.is_loading());
    }

    #[tokio::test]
    async fn test_start_without_policy_is_noop() {
        let hook: RequestHook<serde_json::Value> = RequestHook::new(
            Client::new(),
            "http://localhost:3000/orders",
            RequestConfig::post(),
            None,
        );

        assert!(hook.start().is_none());
        assert_eq!(hook.state(), RequestState::Idle);
    }

    #[test]
    fn test_try_begin_refuses_while_loading() {
        let (state, _) = watch::channel(RequestState::<u32>::Idle);
        let lifecycle = Lifecycle {
            initial: None,
            state,
            latest: AtomicU64::new(0),
        };

        let first = lifecycle.try_begin();
        assert_eq!(first, Some(1));
        assert!(lifecycle.try_begin().is_none());
        assert_eq!(lifecycle.latest.load(Ordering::SeqCst), 1);

        lifecycle.finish(1, Ok(5));
        assert_eq!(*lifecycle.state.borrow(), RequestState::Succeeded(5));
        assert_eq!(lifecycle.try_begin(), Some(2));
    }
}
