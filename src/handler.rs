//! Public handler type exported by the crate.

use std::fmt;

use log::debug;

use crate::builder::HecHandlerBuilder;
use crate::config::HecHandlerConfig;
use crate::error::DeliveryError;
use crate::event::normalize;
use crate::record::HecLogRecord;
use crate::transport::HecTransport;

/// Handler forwarding log records to a Splunk HTTP Event Collector.
///
/// Construction validates the configuration and probes the collector before
/// any event is accepted, so a value of this type is always ready to emit.
/// Emission is synchronous: each record is normalised into a fresh envelope
/// and delivered with a single bounded-timeout POST. Failures surface to
/// the caller and are never retried or queued.
pub struct SplunkHecHandler {
    config: HecHandlerConfig,
    transport: Option<HecTransport>,
}

impl SplunkHecHandler {
    /// Start building a handler for the collector at `host`.
    pub fn builder(host: impl Into<String>, token: impl Into<String>) -> HecHandlerBuilder {
        HecHandlerBuilder::new(host, token)
    }

    pub(crate) fn from_parts(config: HecHandlerConfig, transport: HecTransport) -> Self {
        Self {
            config,
            transport: Some(transport),
        }
    }

    /// The resolved configuration this handler was built with.
    pub fn config(&self) -> &HecHandlerConfig {
        &self.config
    }

    /// Normalise `record` into an event envelope and deliver it.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::Status`] for a non-2xx collector response,
    /// [`DeliveryError::Transport`] for network-level failures, and
    /// [`DeliveryError::Closed`] after [`close`](Self::close). Errors are
    /// logged at debug level before being returned.
    pub fn emit(&self, record: &HecLogRecord) -> Result<(), DeliveryError> {
        let Some(transport) = self.transport.as_ref() else {
            return Err(DeliveryError::Closed);
        };
        let envelope = normalize(record, &self.config);
        let payload = envelope.to_json()?;
        if let Err(err) = transport.send(&payload) {
            debug!(
                "failed to emit record to {}:{}: {err}",
                self.config.host, self.config.port
            );
            return Err(err);
        }
        Ok(())
    }

    /// Flush pending records. Nothing is ever buffered, since each emit
    /// completes its own request, so this always returns `true`.
    pub fn flush(&self) -> bool {
        true
    }

    /// Close the handler, dropping the HTTP session. Subsequent emits fail
    /// with [`DeliveryError::Closed`].
    pub fn close(&mut self) {
        self.transport = None;
    }
}

impl fmt::Debug for SplunkHecHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplunkHecHandler")
            .field("config", &self.config)
            .field("closed", &self.transport.is_none())
            .finish()
    }
}
