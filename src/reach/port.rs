//! TCP connect probes.

use std::collections::BTreeSet;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use futures::future::join_all;
use tokio::net::TcpStream;

/// Attempts one TCP connect to `address:port`.
///
/// Returns `true` when the handshake completes within `timeout`. Refusals,
/// unreachable networks and timeouts all count as failure. The connection is
/// closed immediately.
pub async fn connect(address: IpAddr, port: u16, timeout: Duration) -> bool {
    let target = SocketAddr::new(address, port);
    match tokio::time::timeout(timeout, TcpStream::connect(target)).await {
        Ok(Ok(_stream)) => {
            log::debug!("Connected to {target}");
            true
        }
        Ok(Err(e)) => {
            log::debug!("Failed to connect to {target} - {e}");
            false
        }
        Err(_) => {
            log::debug!("TCP connection timeout for {target} ({}s)", timeout.as_secs());
            false
        }
    }
}

/// Tries every port concurrently and returns the ones that accepted a
/// connection.
pub async fn open_ports(address: IpAddr, ports: &[u16], timeout: Duration) -> BTreeSet<u16> {
    let attempts = ports.iter().map(|&port| async move {
        connect(address, port, timeout).await.then_some(port)
    });
    join_all(attempts).await.into_iter().flatten().collect()
}
