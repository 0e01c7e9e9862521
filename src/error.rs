//! Error types for handler construction and event delivery.

use std::io;

use thiserror::Error;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// No collector host was supplied.
    #[error("handler requires a collector host")]
    MissingHost,
    /// No HEC token was supplied.
    #[error("handler requires an HEC token")]
    MissingToken,
    /// Invalid user supplied configuration.
    #[error("invalid handler configuration: {0}")]
    InvalidConfig(String),
    /// The initial reachability probe failed.
    #[error(transparent)]
    Unreachable(#[from] ConnectivityError),
    /// TLS initialisation failed.
    #[error("failed to initialise TLS: {0}")]
    Tls(#[from] native_tls::Error),
}

/// The collector could not be reached during the construction-time probe.
#[derive(Debug, Error)]
#[error("collector {host}:{port} is unreachable: {source}")]
pub struct ConnectivityError {
    /// Collector hostname or IP address.
    pub host: String,
    /// Collector port.
    pub port: u16,
    /// Underlying cause (DNS failure, refusal, or timeout).
    #[source]
    pub source: io::Error,
}

/// Errors surfaced by [`emit`](crate::SplunkHecHandler::emit).
///
/// Delivery is at-most-once: none of these trigger a retry, and the record
/// that produced them is not kept.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The collector responded with a non-2xx status.
    #[error("collector returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body returned by the collector.
        body: String,
    },
    /// The request failed below the HTTP layer (timeout, reset, TLS).
    #[error("request to collector failed: {0}")]
    Transport(String),
    /// The event envelope could not be serialised.
    #[error("failed to serialise event payload: {0}")]
    Serialise(#[from] serde_json::Error),
    /// The handler was closed before this emit.
    #[error("handler is closed")]
    Closed,
}
