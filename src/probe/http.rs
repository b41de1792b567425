//! reqwest-backed transport

use std::error::Error as _;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::transport::{HttpTransport, Reply, TransportFault};

/// Redirect hops followed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// Blocking HTTP client shared by every probe of a run
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Client identifying itself with `user_agent`, each request bounded by `timeout`
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportFault> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(classify)?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn head(&self, url: &str) -> Reply {
        let response = self.client.head(url).send().map_err(classify)?;
        Ok(response.status().as_u16())
    }

    fn get(&self, url: &str) -> Reply {
        // Only the status line and headers have been read at this point;
        // dropping the response discards the body unread.
        let response = self.client.get(url).send().map_err(classify)?;
        Ok(response.status().as_u16())
    }
}

/// Map a reqwest error to a fault carrying the full cause chain
fn classify(err: reqwest::Error) -> TransportFault {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }

    if err.is_timeout() {
        TransportFault::Timeout(description)
    } else if err.is_redirect() {
        TransportFault::Redirect(description)
    } else if err.is_connect() {
        TransportFault::Connect(description)
    } else {
        TransportFault::Request(description)
    }
}
