//! Bridge into the Rust `log` facade.
//!
//! Implementing [`log::Log`] lets the handler plug directly into the
//! standard logging pipeline, either installed as the global logger or
//! wrapped by a fan-out logger. The facade's `log` method cannot propagate
//! errors, so delivery failures are dropped here; callers that need the
//! error surface should use [`emit`](SplunkHecHandler::emit) directly.

use log::{Log, Metadata, Record};

use crate::handler::SplunkHecHandler;
use crate::record::HecLogRecord;

impl Log for SplunkHecHandler {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::max_level() >= metadata.level().to_level_filter()
    }

    fn log(&self, record: &Record<'_>) {
        // Delivery diagnostics are logged through this same facade;
        // forwarding our own records would recurse.
        if record.target().starts_with(env!("CARGO_CRATE_NAME")) {
            return;
        }
        if !self.enabled(record.metadata()) {
            return;
        }
        let hec_record =
            HecLogRecord::new(&record.level().to_string(), &record.args().to_string());
        let _ = self.emit(&hec_record);
    }

    fn flush(&self) {
        SplunkHecHandler::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::config::{HecHandlerConfig, Protocol};
    use crate::transport::HecTransport;

    fn closed_handler() -> SplunkHecHandler {
        let config = HecHandlerConfig {
            host: "127.0.0.1".into(),
            token: "token".into(),
            port: 8088,
            protocol: Protocol::Http,
            tls_verify: true,
            source: None,
            sourcetype: None,
            index: None,
            client_hostname: "test_host".into(),
            extra_fields: BTreeMap::new(),
        };
        let transport = HecTransport::connect(&config).expect("connect");
        let mut handler = SplunkHecHandler::from_parts(config, transport);
        handler.close();
        handler
    }

    #[test]
    fn log_swallows_delivery_failures() {
        log::set_max_level(log::LevelFilter::Trace);
        let handler = closed_handler();
        let record = Record::builder()
            .args(format_args!("dropped"))
            .level(log::Level::Info)
            .target("app::module")
            .build();
        // The facade contract: no panic, no error escapes.
        handler.log(&record);
    }

    #[test]
    fn own_crate_records_are_skipped() {
        log::set_max_level(log::LevelFilter::Trace);
        let handler = closed_handler();
        let record = Record::builder()
            .args(format_args!("diagnostic"))
            .level(log::Level::Debug)
            .target(concat!(env!("CARGO_CRATE_NAME"), "::transport"))
            .build();
        handler.log(&record);
    }
}
