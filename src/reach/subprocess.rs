//! ICMP echo through the system `ping` utility.

use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::config::PING_PACKET_COUNT;
use crate::reach::PingOutcome;

/// Runs `ping -c 1 <addr>` (or `ping6` for IPv6) with a deadline.
///
/// A non-zero exit, a timeout, a spawn failure or unparseable output all
/// count as zero replies.
pub async fn ping(address: IpAddr, timeout: Duration) -> PingOutcome {
    let program = match address {
        IpAddr::V4(_) => "ping",
        IpAddr::V6(_) => "ping6",
    };

    let child = Command::new(program)
        .arg("-c")
        .arg(PING_PACKET_COUNT.to_string())
        .arg(address.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            log::warn!("Failed to run {program} for {address}: {e}");
            return PingOutcome::lost(PING_PACKET_COUNT);
        }
        Err(_) => {
            log::debug!("{program} {address} timed out ({}s)", timeout.as_secs());
            return PingOutcome::lost(PING_PACKET_COUNT);
        }
    };

    if !output.status.success() {
        log::debug!("{program} {address} exited with {}", output.status);
        return PingOutcome::lost(PING_PACKET_COUNT);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_received_count(&stdout) {
        Some(received) => PingOutcome {
            sent: PING_PACKET_COUNT,
            received,
        },
        None => {
            log::warn!("Could not find the received count in {program} output for {address}");
            PingOutcome::lost(PING_PACKET_COUNT)
        }
    }
}

/// Extracts the number of replies from `ping` statistics output.
///
/// The count is the whitespace-separated token immediately preceding the
/// word `received` (`"1 packets transmitted, 1 received, 0% packet loss"` on
/// Linux, `"1 packets transmitted, 1 packets received, ..."` on BSD/macOS).
pub fn parse_received_count(stdout: &str) -> Option<u32> {
    let tokens: Vec<&str> = stdout.split_whitespace().collect();
    let position = tokens
        .iter()
        .position(|token| token.trim_end_matches(',') == "received")?;

    let previous = tokens.get(position.checked_sub(1)?)?;
    let count = if *previous == "packets" {
        tokens.get(position.checked_sub(2)?)?
    } else {
        previous
    };
    count.parse().ok()
}
