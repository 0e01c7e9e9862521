//! Builder resolving construction options into a live handler.
//!
//! Options can be set through typed setters or supplied as a string-keyed
//! map via [`with_options`](HecHandlerBuilder::with_options), mirroring the
//! loosely-typed configuration interfaces of host logging frameworks.
//! Unrecognised option keys are never rejected; they pass through verbatim
//! into every outgoing event, which keeps the handler forward-compatible
//! with collector API additions.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::{HecHandlerConfig, Protocol, COLLECTOR_TIMEOUT, DEFAULT_PORT};
use crate::error::HandlerBuildError;
use crate::handler::SplunkHecHandler;
use crate::probe::probe_collector;
use crate::transport::HecTransport;

/// Builder for [`SplunkHecHandler`] instances.
#[derive(Clone, Debug, Default)]
pub struct HecHandlerBuilder {
    host: String,
    token: String,
    port: Option<u16>,
    protocol: Option<Protocol>,
    tls_verify: Option<bool>,
    source: Option<String>,
    sourcetype: Option<String>,
    index: Option<String>,
    client_hostname: Option<String>,
    extra_fields: BTreeMap<String, String>,
}

impl HecHandlerBuilder {
    /// Create a builder targeting `host` authenticated by `token`.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Set the collector listener port. Defaults to 8080.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the collector scheme. Defaults to HTTPS.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Toggle TLS certificate verification. Defaults to on; disable for
    /// self-signed certificates.
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = Some(verify);
        self
    }

    /// Override the collector-side `source` value.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Override the collector-side `sourcetype` value.
    pub fn with_sourcetype(mut self, sourcetype: impl Into<String>) -> Self {
        self.sourcetype = Some(sourcetype.into());
        self
    }

    /// Route events to a specific index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the `host` value stamped on events. Defaults to the local
    /// hostname.
    pub fn with_client_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.client_hostname = Some(hostname.into());
        self
    }

    /// Attach a passthrough field merged into every outgoing event.
    pub fn with_extra_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(key.into(), value.into());
        self
    }

    /// Apply a string-keyed option map.
    ///
    /// Recognised keys: `port`, `proto`/`protocol`, `ssl_verify`/
    /// `tls_verify`, `source`, `sourcetype`, `index`, `hostname`. All other
    /// keys become passthrough fields. A recognised key with a malformed
    /// value is a build error.
    pub fn with_options(
        mut self,
        options: &BTreeMap<String, String>,
    ) -> Result<Self, HandlerBuildError> {
        for (key, value) in options {
            match key.as_str() {
                "port" => self.port = Some(parse_option("port", value)?),
                "proto" | "protocol" => {
                    let protocol = Protocol::from_str(value).map_err(|_| {
                        HandlerBuildError::InvalidConfig(format!(
                            "protocol must be http or https, got {value:?}"
                        ))
                    })?;
                    self.protocol = Some(protocol);
                }
                "ssl_verify" | "tls_verify" => self.tls_verify = Some(parse_bool(key, value)?),
                "source" => self.source = Some(value.clone()),
                "sourcetype" => self.sourcetype = Some(value.clone()),
                "index" => self.index = Some(value.clone()),
                "hostname" => self.client_hostname = Some(value.clone()),
                _ => {
                    self.extra_fields.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(self)
    }

    /// Probe the collector and build the handler.
    ///
    /// Fails fast when required fields are missing or when the collector is
    /// unreachable, so a returned handler is always usable.
    pub fn build(self) -> Result<SplunkHecHandler, HandlerBuildError> {
        let config = self.resolve()?;
        probe_collector(&config.host, config.port, COLLECTOR_TIMEOUT)?;
        let transport = HecTransport::connect(&config)?;
        Ok(SplunkHecHandler::from_parts(config, transport))
    }

    fn resolve(self) -> Result<HecHandlerConfig, HandlerBuildError> {
        if self.host.trim().is_empty() {
            return Err(HandlerBuildError::MissingHost);
        }
        if self.token.trim().is_empty() {
            return Err(HandlerBuildError::MissingToken);
        }
        Ok(HecHandlerConfig {
            host: self.host,
            token: self.token,
            port: self.port.unwrap_or(DEFAULT_PORT),
            protocol: self.protocol.unwrap_or_default(),
            tls_verify: self.tls_verify.unwrap_or(true),
            source: self.source,
            sourcetype: self.sourcetype,
            index: self.index,
            client_hostname: self.client_hostname.unwrap_or_else(local_hostname),
            extra_fields: self.extra_fields,
        })
    }
}

fn parse_option<T: FromStr>(key: &str, value: &str) -> Result<T, HandlerBuildError> {
    value.parse().map_err(|_| {
        HandlerBuildError::InvalidConfig(format!("invalid value {value:?} for option {key:?}"))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, HandlerBuildError> {
    match value {
        "true" | "True" | "1" => Ok(true),
        "false" | "False" | "0" => Ok(false),
        _ => Err(HandlerBuildError::InvalidConfig(format!(
            "invalid value {value:?} for option {key:?}"
        ))),
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_owned())
}
