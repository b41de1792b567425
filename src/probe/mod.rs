//! URL probing
//!
//! A probe sends HEAD first. Hosts that refuse HEAD (cloud drives, gated
//! dataset portals) get one GET whose body is never read. A transport fault
//! on either request ends the probe.

mod http;
mod transport;

pub use http::{ReqwestTransport, MAX_REDIRECTS};
pub use transport::{HttpTransport, Method, Reply, ScriptedTransport, TransportFault};

use std::fmt;

use tracing::debug;

/// Status codes below this count as reachable
pub const FIRST_FAILING_STATUS: u16 = 400;

/// Result of probing one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Reachable, with the final status code
    Ok(u16),
    /// Both requests answered with a failing status; holds the GET status
    FailedStatus(u16),
    /// A request could not complete
    FailedTransport(String),
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Ok(_))
    }

    /// Status code, or the fault description for transport failures
    pub fn reason(&self) -> String {
        match self {
            ProbeOutcome::Ok(status) | ProbeOutcome::FailedStatus(status) => status.to_string(),
            ProbeOutcome::FailedTransport(description) => description.clone(),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Probe `url` with HEAD, falling back to GET on a failing status
pub fn probe<T: HttpTransport + ?Sized>(transport: &T, url: &str) -> ProbeOutcome {
    let head_status = match transport.head(url) {
        Ok(status) => status,
        Err(fault) => {
            debug!(url, kind = fault.kind(), "HEAD failed");
            return ProbeOutcome::FailedTransport(fault.to_string());
        }
    };
    debug!(url, status = head_status, "HEAD");

    if head_status < FIRST_FAILING_STATUS {
        return ProbeOutcome::Ok(head_status);
    }

    match transport.get(url) {
        Ok(status) if status < FIRST_FAILING_STATUS => {
            debug!(url, status, "GET fallback recovered");
            ProbeOutcome::Ok(status)
        }
        Ok(status) => {
            debug!(url, status, "GET fallback");
            ProbeOutcome::FailedStatus(status)
        }
        Err(fault) => {
            debug!(url, kind = fault.kind(), "GET failed");
            ProbeOutcome::FailedTransport(fault.to_string())
        }
    }
}
