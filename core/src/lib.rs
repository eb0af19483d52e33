//! Minimal cross-origin HTTP request helper.
//!
//! # Overview
//! Sends GET/POST/PUT/DELETE requests and hands the JSON response to a
//! completion callback. Request bodies are flat key/value maps serialized as
//! `application/x-www-form-urlencoded` text.
//!
//! # Design
//! - `CorsClient` is stateless apart from two injected collaborators: a
//!   `TransportFactory` that opens one `Transport` per call, and a `LogSink`
//!   that receives one line for every call that ends without a callback.
//! - `build_request` / `parse_response` are pure, so the I/O boundary sits
//!   entirely inside the transport.
//! - Status codes are not inspected and keys/values are not percent-escaped.
//!
//! ```no_run
//! use cors_core::{Callback, CorsClient, ParamMap};
//!
//! let client = CorsClient::new();
//! let data: ParamMap = [("name", "widget")].into_iter().collect();
//! let done: Callback = Box::new(|body, status| println!("{status}: {body}"));
//! client.post("http://localhost:3000/echo", Some(&data), Some(done));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod sink;
pub mod transport;
pub mod ureq_transport;

pub use client::{Callback, CorsClient, CorsClientBuilder, Outcome, SUCCESS};
pub use config::TransportConfig;
pub use error::RequestError;
pub use http::{build_request, parse_response, HttpMethod, HttpRequest, HttpResponse};
pub use params::{encode_params, ParamMap, ParamValue};
pub use sink::{LogCrateSink, LogSink, MemorySink};
pub use transport::{
    NoTransport, PreferredTransports, ReadyState, Transport, TransportFactory, TransportObserver,
};
pub use ureq_transport::UreqTransportFactory;
