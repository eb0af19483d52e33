//! Network transport backed by a blocking `ureq` agent.
//!
//! # Design
//! `send` moves the exchange onto its own thread and returns at once, so
//! calls are fire-and-forget and complete in whatever order the network
//! allows. The agent is configured with `http_status_as_error(false)`:
//! 4xx/5xx responses are data, only failures below HTTP reach `on_error`.
//! Bodies are read in full whatever their size and decoded lossily.

use crate::config::TransportConfig;
use crate::http::{HttpMethod, HttpResponse};
use crate::transport::{ReadyState, Transport, TransportFactory, TransportObserver};

/// Opens `UreqTransport`s sharing one agent (and its connection pool).
#[derive(Clone)]
pub struct UreqTransportFactory {
    agent: ureq::Agent,
}

impl UreqTransportFactory {
    pub fn new() -> Self {
        Self::with_config(&TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> Self {
        let mut builder = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(config.max_redirects);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        Self {
            agent: builder.build().new_agent(),
        }
    }
}

impl Default for UreqTransportFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportFactory for UreqTransportFactory {
    fn open(&self, method: HttpMethod, url: &str) -> Option<Box<dyn Transport>> {
        Some(Box::new(UreqTransport {
            agent: self.agent.clone(),
            method,
            url: url.to_string(),
            headers: Vec::new(),
        }))
    }
}

pub struct UreqTransport {
    agent: ureq::Agent,
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
}

impl Transport for UreqTransport {
    fn method(&self) -> HttpMethod {
        self.method
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::Opened
    }

    fn set_request_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn send(self: Box<Self>, body: Option<String>, mut observer: Box<dyn TransportObserver>) {
        let this = *self;
        std::thread::spawn(move || {
            log::debug!("{} {}: sending", this.method, this.url);
            match this.exchange(body, observer.as_mut()) {
                Ok(()) => log::debug!("{} {}: done", this.method, this.url),
                Err(e) => {
                    log::debug!("{} {}: transport error: {e}", this.method, this.url);
                    observer.on_error();
                }
            }
        });
    }
}

impl UreqTransport {
    /// Run the round-trip, reporting each ready state as it is reached.
    fn exchange(
        &self,
        body: Option<String>,
        observer: &mut dyn TransportObserver,
    ) -> Result<(), ureq::Error> {
        let body = body.unwrap_or_default();
        let mut response = match self.method {
            HttpMethod::Get => {
                let mut req = self.agent.get(&self.url);
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()?
            }
            HttpMethod::Post => {
                let mut req = self.agent.post(&self.url);
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send(body.as_bytes())?
            }
            HttpMethod::Put => {
                let mut req = self.agent.put(&self.url);
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send(body.as_bytes())?
            }
            HttpMethod::Delete => {
                let mut req = self.agent.delete(&self.url).force_send_body();
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send(body.as_bytes())?
            }
        };

        let mut progress = HttpResponse {
            status: response.status().as_u16(),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect(),
            body: String::new(),
        };
        observer.on_ready_state_change(ReadyState::HeadersReceived, &progress);
        observer.on_ready_state_change(ReadyState::Loading, &progress);

        // No size cap, and invalid UTF-8 is replaced rather than rejected:
        // only I/O failures may end the exchange in `on_error`.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;
        progress.body = String::from_utf8_lossy(&bytes).into_owned();
        observer.on_ready_state_change(ReadyState::Done, &progress);
        Ok(())
    }
}
