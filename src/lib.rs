//! Logging handler for the Splunk HTTP Event Collector (HEC).
//!
//! This crate provides [`SplunkHecHandler`], which converts log records into
//! JSON events and delivers them to a token-authenticated collector endpoint
//! over HTTP(S). Records may be plain strings, format strings with positional
//! arguments, or structured maps; in the latter case the map is preserved as
//! a JSON object in the emitted event.
//!
//! Delivery is synchronous and best-effort: each emitted record results in
//! exactly one bounded-timeout POST, and failures surface to the caller
//! without retries, batching, or queueing. Construction probes the collector
//! first, so a handler value is only ever obtained for a reachable endpoint.
//!
//! ```no_run
//! use splunk_hec_handler::{HecLogRecord, SplunkHecHandler};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = SplunkHecHandler::builder("splunkfw.domain.tld", "EA33046C-6FEC-4DC0-AC66")
//!     .with_port(8888)
//!     .with_source("HEC_example")
//!     .build()?;
//!
//! handler.emit(&HecLogRecord::new("INFO", "service started"))?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod event;
mod handler;
mod literal;
mod log_bridge;
mod probe;
mod record;
mod transport;

pub use builder::HecHandlerBuilder;
pub use config::{HecHandlerConfig, Protocol, COLLECTOR_TIMEOUT, DEFAULT_PORT};
pub use error::{ConnectivityError, DeliveryError, HandlerBuildError};
pub use event::EventEnvelope;
pub use handler::SplunkHecHandler;
pub use record::{HecLogRecord, RecordMessage};
