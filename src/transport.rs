//! HTTP session and single-shot delivery.
//!
//! The session is created once at handler construction and reused for every
//! emit: the underlying `ureq` agent pools connections and is safe for
//! concurrent use, so no additional locking happens at this layer. Exactly
//! one request is made per emitted record; there is no retry loop and no
//! queue.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use native_tls::TlsConnector;
use ureq::{Agent, AgentBuilder};

use crate::config::{HecHandlerConfig, COLLECTOR_TIMEOUT};
use crate::error::{DeliveryError, HandlerBuildError};

/// Redirect budget for the session. The collector endpoint is a fixed path;
/// anything beyond a single hop is a misconfiguration.
const MAX_REDIRECTS: u32 = 1;

/// Persistent session for the collector's event endpoint.
pub(crate) struct HecTransport {
    agent: Agent,
    url: String,
    authorization: String,
}

impl HecTransport {
    /// Build the session: pooled agent, bounded timeouts, authorization
    /// header value, and the TLS verification policy from `config`.
    pub(crate) fn connect(config: &HecHandlerConfig) -> Result<Self, HandlerBuildError> {
        let agent = build_agent(COLLECTOR_TIMEOUT, config.tls_verify)?;
        Ok(Self {
            agent,
            url: config.collector_url(),
            authorization: format!("Splunk {}", config.token),
        })
    }

    /// POST a serialised envelope to the collector.
    ///
    /// Non-2xx responses and network-level failures surface as
    /// [`DeliveryError`]; the payload is not kept.
    pub(crate) fn send(&self, payload: &str) -> Result<(), DeliveryError> {
        let response = self
            .agent
            .post(&self.url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .send_string(payload);
        match response {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                debug!("collector at {} rejected event: HTTP {status}", self.url);
                Err(DeliveryError::Status { status, body })
            }
            Err(ureq::Error::Transport(err)) => {
                debug!("request to collector at {} failed: {err}", self.url);
                Err(DeliveryError::Transport(err.to_string()))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

fn build_agent(timeout: Duration, tls_verify: bool) -> Result<Agent, HandlerBuildError> {
    let mut builder = AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout(timeout)
        .redirects(MAX_REDIRECTS);
    if !tls_verify {
        let mut tls = TlsConnector::builder();
        tls.danger_accept_invalid_certs(true);
        tls.danger_accept_invalid_hostnames(true);
        builder = builder.tls_connector(Arc::new(tls.build()?));
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::config::Protocol;

    fn config(tls_verify: bool) -> HecHandlerConfig {
        HecHandlerConfig {
            host: "splunkfw.domain.tld".into(),
            token: "EA33046C".into(),
            port: 8888,
            protocol: Protocol::Https,
            tls_verify,
            source: None,
            sourcetype: None,
            index: None,
            client_hostname: "test_host".into(),
            extra_fields: BTreeMap::new(),
        }
    }

    #[test]
    fn session_targets_the_event_endpoint() {
        let transport = HecTransport::connect(&config(true)).expect("connect");
        assert_eq!(
            transport.url(),
            "https://splunkfw.domain.tld:8888/services/collector/event"
        );
    }

    #[test]
    fn insecure_session_builds() {
        assert!(HecTransport::connect(&config(false)).is_ok());
    }
}
