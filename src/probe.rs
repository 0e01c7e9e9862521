//! Construction-time reachability probe.
//!
//! Before any HTTP machinery is built, the handler opens a raw TCP
//! connection to the collector with a short timeout. A failure here aborts
//! construction: emitting into an unreachable collector would lose records
//! invisibly.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::ConnectivityError;

/// Attempt a raw, time-bounded connection to `host:port`.
///
/// The probe socket is dropped immediately on success; only reachability is
/// established. DNS failures, refusals and timeouts all map to
/// [`ConnectivityError`].
pub fn probe_collector(host: &str, port: u16, timeout: Duration) -> Result<(), ConnectivityError> {
    connect_probe(host, port, timeout).map_err(|source| ConnectivityError {
        host: host.to_owned(),
        port,
        source,
    })
}

fn connect_probe(host: &str, port: u16, timeout: Duration) -> io::Result<()> {
    let addrs: Vec<_> = (host, port).to_socket_addrs()?.collect();
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_stream) => return Ok(()),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses resolved for {host}:{port}"),
        )
    }))
}
