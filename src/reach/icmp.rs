//! ICMP echo over unprivileged datagram sockets.
//!
//! Datagram ICMP sockets (`SOCK_DGRAM` + `IPPROTO_ICMP`) let an unprivileged
//! process send echo requests where the OS allows it (Linux with a suitable
//! `net.ipv4.ping_group_range`, macOS). Opening the socket fails elsewhere,
//! and the caller falls back to the `ping` utility.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::Instant;

use crate::config::PING_PAYLOAD;
use crate::reach::PingOutcome;

const ICMPV4_ECHO_REQUEST: u8 = 8;
const ICMPV4_ECHO_REPLY: u8 = 0;
const ICMPV6_ECHO_REQUEST: u8 = 128;
const ICMPV6_ECHO_REPLY: u8 = 129;
const ICMP_HEADER_LEN: usize = 8;

/// Opens a non-blocking datagram ICMP socket registered with tokio.
///
/// # Errors
///
/// Returns the OS error when datagram ICMP sockets are not permitted.
pub fn open_socket(address: &IpAddr) -> io::Result<UdpSocket> {
    let (domain, protocol) = match address {
        IpAddr::V4(_) => (Domain::IPV4, Protocol::ICMPV4),
        IpAddr::V6(_) => (Domain::IPV6, Protocol::ICMPV6),
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(protocol))?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

/// Sends one echo request and waits up to `timeout` for its reply.
///
/// # Errors
///
/// Only a failure to open the socket is an error. Send and receive failures
/// after that are reported as zero replies.
pub async fn ping(address: IpAddr, timeout: Duration) -> io::Result<PingOutcome> {
    let socket = open_socket(&address)?;
    let sequence: u16 = rand::random();
    let request = echo_request(&address, rand::random(), sequence);

    if let Err(e) = socket.send_to(&request, SocketAddr::new(address, 0)).await {
        log::debug!("ICMP echo to {address} could not be sent: {e}");
        return Ok(PingOutcome::lost(1));
    }

    let deadline = Instant::now() + timeout;
    let mut buf = [0u8; 1500];
    loop {
        match tokio::time::timeout_at(deadline, socket.recv_from(&mut buf)).await {
            Ok(Ok((len, from))) => {
                if from.ip() == address && is_echo_reply(&address, &buf[..len], sequence) {
                    return Ok(PingOutcome::answered(1));
                }
            }
            Ok(Err(e)) => {
                log::debug!("ICMP receive from {address} failed: {e}");
                return Ok(PingOutcome::lost(1));
            }
            Err(_) => {
                log::debug!("ICMP echo to {address} timed out ({}s)", timeout.as_secs());
                return Ok(PingOutcome::lost(1));
            }
        }
    }
}

/// Builds an echo request. The kernel rewrites the identifier on datagram
/// sockets and fills in the ICMPv6 checksum.
fn echo_request(address: &IpAddr, identifier: u16, sequence: u16) -> Vec<u8> {
    let kind = match address {
        IpAddr::V4(_) => ICMPV4_ECHO_REQUEST,
        IpAddr::V6(_) => ICMPV6_ECHO_REQUEST,
    };

    let mut packet = Vec::with_capacity(ICMP_HEADER_LEN + PING_PAYLOAD.len());
    packet.extend_from_slice(&[kind, 0, 0, 0]);
    packet.extend_from_slice(&identifier.to_be_bytes());
    packet.extend_from_slice(&sequence.to_be_bytes());
    packet.extend_from_slice(PING_PAYLOAD);

    if address.is_ipv4() {
        let sum = checksum(&packet);
        packet[2..4].copy_from_slice(&sum.to_be_bytes());
    }
    packet
}

fn is_echo_reply(address: &IpAddr, datagram: &[u8], sequence: u16) -> bool {
    let (icmp, expected) = match address {
        // Some platforms deliver the IPv4 header along with the ICMP message
        IpAddr::V4(_) => (strip_ipv4_header(datagram), ICMPV4_ECHO_REPLY),
        IpAddr::V6(_) => (datagram, ICMPV6_ECHO_REPLY),
    };
    icmp.len() >= ICMP_HEADER_LEN
        && icmp[0] == expected
        && u16::from_be_bytes([icmp[6], icmp[7]]) == sequence
}

fn strip_ipv4_header(datagram: &[u8]) -> &[u8] {
    match datagram.first() {
        Some(first) if first >> 4 == 4 => {
            let header_len = usize::from(first & 0x0f) * 4;
            datagram.get(header_len..).unwrap_or_default()
        }
        _ => datagram,
    }
}

/// RFC 1071 internet checksum.
fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = data
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => u32::from(u16::from_be_bytes([*hi, *lo])),
            [hi] => u32::from(*hi) << 8,
            _ => 0,
        })
        .sum();
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    const V4: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    const V6: IpAddr = IpAddr::V6(Ipv6Addr::LOCALHOST);

    #[test]
    fn test_checksum_verifies_to_zero() {
        let packet = echo_request(&V4, 0x1234, 7);
        assert_eq!(checksum(&packet), 0, "a packet with its checksum sums to zero");
    }

    #[test]
    fn test_checksum_odd_length() {
        // 0x0102 + 0x0300 = 0x0402, complemented
        assert_eq!(checksum(&[1, 2, 3]), !0x0402);
    }

    #[test]
    fn test_echo_request_layout() {
        let packet = echo_request(&V6, 0xabcd, 0x0102);
        assert_eq!(packet[0], ICMPV6_ECHO_REQUEST);
        assert_eq!(&packet[2..4], &[0, 0], "ICMPv6 checksum is left to the kernel");
        assert_eq!(&packet[4..6], &[0xab, 0xcd]);
        assert_eq!(&packet[6..8], &[0x01, 0x02]);
        assert_eq!(&packet[ICMP_HEADER_LEN..], PING_PAYLOAD);
    }

    #[test]
    fn test_reply_matching() {
        let mut reply = echo_request(&V4, 1, 42);
        reply[0] = ICMPV4_ECHO_REPLY;
        assert!(is_echo_reply(&V4, &reply, 42));
        assert!(!is_echo_reply(&V4, &reply, 43), "sequence must match");

        let mut with_ip_header = vec![0x45];
        with_ip_header.extend_from_slice(&[0u8; 19]);
        with_ip_header.extend_from_slice(&reply);
        assert!(is_echo_reply(&V4, &with_ip_header, 42));

        let request = echo_request(&V4, 1, 42);
        assert!(!is_echo_reply(&V4, &request, 42), "our own request is not a reply");
        assert!(!is_echo_reply(&V4, &[0, 0, 0], 42));
    }
}
