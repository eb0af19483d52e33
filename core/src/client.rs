//! Fire-and-forget cross-origin requests with a completion callback.
//!
//! # Design
//! `CorsClient` holds a transport factory and a log sink and carries no other
//! state. Every verb goes through one `dispatch` path:
//!
//! 1. open a transport for the method and URL (`None` means unsupported),
//! 2. apply the headers and body from `build_request`,
//! 3. send, and on `ReadyState::Done` parse the body as JSON.
//!
//! The callback API (`get`/`post`/`put`/`delete`/`request`) ends every call
//! in either one callback invocation or one sink line. `fetch` reports the
//! same outcomes as a tagged `Result` through a future instead.
//!
//! HTTP status codes are never inspected: any completed exchange with a JSON
//! body is handed to the callback labelled `"success"`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::channel::oneshot;

use crate::error::RequestError;
use crate::http::{build_request, parse_response, HttpMethod, HttpResponse};
use crate::params::ParamMap;
use crate::sink::{LogCrateSink, LogSink};
use crate::transport::{ReadyState, TransportFactory, TransportObserver};
use crate::ureq_transport::UreqTransportFactory;

/// Label passed to every callback invocation.
pub const SUCCESS: &str = "success";

/// Completion callback: parsed body and the status label.
pub type Callback = Box<dyn FnOnce(serde_json::Value, &'static str) + Send>;

/// Result of one exchange as delivered by `fetch`.
pub type Outcome = Result<serde_json::Value, RequestError>;

type Completion = Box<dyn FnOnce(Outcome) + Send>;

#[derive(Clone)]
pub struct CorsClient {
    transports: Arc<dyn TransportFactory>,
    sink: Arc<dyn LogSink>,
}

impl CorsClient {
    /// Client over the network with failures logged through the `log` crate.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CorsClientBuilder {
        CorsClientBuilder::default()
    }

    pub fn get(&self, url: &str, data: Option<&ParamMap>, callback: Option<Callback>) {
        self.request(HttpMethod::Get, url, data, callback);
    }

    pub fn post(&self, url: &str, data: Option<&ParamMap>, callback: Option<Callback>) {
        self.request(HttpMethod::Post, url, data, callback);
    }

    pub fn put(&self, url: &str, data: Option<&ParamMap>, callback: Option<Callback>) {
        self.request(HttpMethod::Put, url, data, callback);
    }

    pub fn delete(&self, url: &str, data: Option<&ParamMap>, callback: Option<Callback>) {
        self.request(HttpMethod::Delete, url, data, callback);
    }

    /// Send one request and return immediately.
    ///
    /// `callback` runs at most once, with the parsed JSON body and
    /// [`SUCCESS`]. Unsupported environments, transport errors and bodies
    /// that are not JSON each produce one line on the sink and no callback.
    pub fn request(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&ParamMap>,
        callback: Option<Callback>,
    ) {
        let sink = Arc::clone(&self.sink);
        self.dispatch(
            method,
            url,
            data,
            Box::new(move |outcome: Outcome| match outcome {
                Ok(value) => {
                    if let Some(callback) = callback {
                        callback(value, SUCCESS);
                    }
                }
                Err(e) => sink.log(&e.to_string()),
            }),
        );
    }

    /// Send one request and resolve to its outcome.
    ///
    /// Nothing is written to the sink. A transport that is dropped without
    /// finishing resolves to `RequestError::Abandoned`; one that never
    /// finishes never resolves.
    pub fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&ParamMap>,
    ) -> impl Future<Output = Outcome> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        self.dispatch(
            method,
            url,
            data,
            Box::new(move |outcome: Outcome| {
                let _ = tx.send(outcome);
            }),
        );
        async move { rx.await.unwrap_or(Err(RequestError::Abandoned)) }
    }

    fn dispatch(&self, method: HttpMethod, url: &str, data: Option<&ParamMap>, done: Completion) {
        let Some(mut transport) = self.transports.open(method, url) else {
            log::debug!("{method} {url}: no cross-origin transport available");
            done(Err(RequestError::Unsupported));
            return;
        };

        let request = build_request(method, url, data);
        for (name, value) in &request.headers {
            transport.set_request_header(name, value);
        }
        transport.send(request.body, Box::new(Exchange { done: Some(done) }));
    }
}

impl fmt::Debug for CorsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsClient").finish_non_exhaustive()
    }
}

impl Default for CorsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CorsClient`. Unset parts default to the ureq transport and
/// `LogCrateSink`.
#[derive(Default)]
pub struct CorsClientBuilder {
    transports: Option<Arc<dyn TransportFactory>>,
    sink: Option<Arc<dyn LogSink>>,
}

impl CorsClientBuilder {
    pub fn transports(mut self, factory: impl TransportFactory + 'static) -> Self {
        self.transports = Some(Arc::new(factory));
        self
    }

    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> CorsClient {
        CorsClient {
            transports: self
                .transports
                .unwrap_or_else(|| Arc::new(UreqTransportFactory::new())),
            sink: self.sink.unwrap_or_else(|| Arc::new(LogCrateSink)),
        }
    }
}

/// Observer for one in-flight exchange. Fires `done` on the first terminal
/// event and ignores everything after it.
struct Exchange {
    done: Option<Completion>,
}

impl TransportObserver for Exchange {
    fn on_ready_state_change(&mut self, state: ReadyState, response: &HttpResponse) {
        if state != ReadyState::Done {
            return;
        }
        if let Some(done) = self.done.take() {
            done(parse_response(response));
        }
    }

    fn on_error(&mut self) {
        if let Some(done) = self.done.take() {
            done(Err(RequestError::Transport));
        }
    }
}
