//! Resolved configuration consumed by the handler lifecycle.
//!
//! [`HecHandlerBuilder`](crate::HecHandlerBuilder) constructs these values
//! before passing them to [`SplunkHecHandler`](crate::SplunkHecHandler) for
//! runtime use.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default HEC listener port.
pub const DEFAULT_PORT: u16 = 8080;
/// Bounded timeout applied to the reachability probe and to each POST.
pub const COLLECTOR_TIMEOUT: Duration = Duration::from_secs(2);
/// Event endpoint path on the collector.
pub(crate) const ENDPOINT_PATH: &str = "/services/collector/event";

/// Scheme used to reach the collector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain HTTP.
    Http,
    /// HTTP over TLS.
    #[default]
    Https,
}

impl Protocol {
    /// The URL scheme for this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            _ => Err(()),
        }
    }
}

/// Immutable handler configuration produced by the builder.
#[derive(Clone)]
pub struct HecHandlerConfig {
    /// Collector hostname or IP address.
    pub host: String,
    /// HEC authentication token.
    pub token: String,
    /// Collector listener port.
    pub port: u16,
    /// Scheme used to reach the collector.
    pub protocol: Protocol,
    /// Verify the collector's TLS certificate. Disable for self-signed
    /// certificates only.
    pub tls_verify: bool,
    /// Override for the collector-side `source` field. Omitted when `None`.
    pub source: Option<String>,
    /// Override for the collector-side `sourcetype` field. Omitted when `None`.
    pub sourcetype: Option<String>,
    /// Override for the destination index. Omitted when `None`.
    pub index: Option<String>,
    /// Host value stamped on every event. Defaults to the local hostname.
    pub client_hostname: String,
    /// Unrecognised construction options, merged verbatim into every
    /// outgoing event. Supports collector API additions without code
    /// changes.
    pub extra_fields: BTreeMap<String, String>,
}

impl HecHandlerConfig {
    /// Full URL of the collector's event endpoint.
    pub fn collector_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol, self.host, self.port, ENDPOINT_PATH
        )
    }
}

impl fmt::Debug for HecHandlerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HecHandlerConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("tls_verify", &self.tls_verify)
            .field("source", &self.source)
            .field("sourcetype", &self.sourcetype)
            .field("index", &self.index)
            .field("client_hostname", &self.client_hostname)
            .field("extra_fields", &self.extra_fields)
            .finish()
    }
}
