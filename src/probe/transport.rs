//! HTTP transport seam
//!
//! - HttpTransport trait: the two requests a probe needs
//! - ScriptedTransport: canned replies for tests
//! - ReqwestTransport (in `http`): real requests

use std::cell::RefCell;
use std::collections::HashMap;

/// Request method used by a probe step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
}

/// Status code or transport fault
pub type Reply = Result<u16, TransportFault>;

/// Issues the probe requests.
///
/// Both methods follow redirects and return the final status code. `get`
/// must not buffer the body.
pub trait HttpTransport {
    fn head(&self, url: &str) -> Reply;

    fn get(&self, url: &str) -> Reply;
}

/// Request-level failure with no HTTP status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFault {
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("too many redirects: {0}")]
    Redirect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl TransportFault {
    /// Short category for logs
    pub fn kind(&self) -> &'static str {
        match self {
            TransportFault::Timeout(_) => "timeout",
            TransportFault::Connect(_) => "connect",
            TransportFault::Redirect(_) => "redirect",
            TransportFault::Request(_) => "request",
        }
    }
}

/// Transport answering from a fixed table, recording every call.
///
/// Meant for tests; runs use [`ReqwestTransport`](super::ReqwestTransport).
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, (Reply, Reply)>,
    calls: RefCell<Vec<(Method, String)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `head` for HEAD and `get` for GET
    pub fn route(mut self, url: &str, head: Reply, get: Reply) -> Self {
        self.routes.insert(url.to_string(), (head, get));
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<(Method, String)> {
        self.calls.borrow().clone()
    }

    fn answer(&self, method: Method, url: &str) -> Reply {
        self.calls.borrow_mut().push((method, url.to_string()));
        match (self.routes.get(url), method) {
            (Some((head, _)), Method::Head) => head.clone(),
            (Some((_, get)), Method::Get) => get.clone(),
            (None, _) => Err(TransportFault::Connect(format!("no route to {}", url))),
        }
    }
}

impl HttpTransport for ScriptedTransport {
    fn head(&self, url: &str) -> Reply {
        self.answer(Method::Head, url)
    }

    fn get(&self, url: &str) -> Reply {
        self.answer(Method::Get, url)
    }
}
