//! Transport abstraction: one object per HTTP exchange.
//!
//! # Design
//! A `TransportFactory` opens a `Transport` bound to a method and URL, or
//! returns `None` when it cannot make cross-origin requests at all. The
//! caller sets headers and then calls `send`, which consumes the transport:
//! a transport is never reused across calls. Progress is reported to a
//! `TransportObserver` as ready-state transitions, ending in either
//! `ReadyState::Done` or `on_error`.

use crate::http::{HttpMethod, HttpResponse};

/// Lifecycle of one exchange. Only `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    HeadersReceived = 2,
    Loading = 3,
    Done = 4,
}

/// Receives progress for a single exchange.
///
/// `on_ready_state_change` sees the response as filled in so far. A
/// transport calls `on_error` instead of reaching `Done` when the exchange
/// fails below HTTP; the cause is not passed along.
pub trait TransportObserver: Send {
    fn on_ready_state_change(&mut self, state: ReadyState, response: &HttpResponse);
    fn on_error(&mut self);
}

/// An opened, not yet sent, HTTP exchange.
pub trait Transport: Send {
    fn method(&self) -> HttpMethod;
    fn url(&self) -> &str;
    fn ready_state(&self) -> ReadyState;
    fn set_request_header(&mut self, name: &str, value: &str);

    /// Dispatch the request. Returns immediately; completion is reported to
    /// `observer`, possibly from another thread.
    fn send(self: Box<Self>, body: Option<String>, observer: Box<dyn TransportObserver>);
}

/// Opens transports capable of cross-origin requests.
pub trait TransportFactory: Send + Sync {
    /// Returns `None` when no cross-origin transport is available.
    fn open(&self, method: HttpMethod, url: &str) -> Option<Box<dyn Transport>>;
}

/// A factory for environments without any cross-origin transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransport;

impl TransportFactory for NoTransport {
    fn open(&self, _method: HttpMethod, _url: &str) -> Option<Box<dyn Transport>> {
        None
    }
}

/// Tries each factory in order and uses the first one that opens.
#[derive(Default)]
pub struct PreferredTransports {
    factories: Vec<Box<dyn TransportFactory>>,
}

impl PreferredTransports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fallback, tried after every factory already added.
    pub fn then(mut self, factory: impl TransportFactory + 'static) -> Self {
        self.factories.push(Box::new(factory));
        self
    }
}

impl TransportFactory for PreferredTransports {
    fn open(&self, method: HttpMethod, url: &str) -> Option<Box<dyn Transport>> {
        self.factories.iter().find_map(|f| f.open(method, url))
    }
}
