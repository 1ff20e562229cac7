//! Raw IPv6 bytes to compressed text.

use std::fmt::Write;

use crate::error_handling::DnsCheckError;

/// Length of a raw IPv6 address in bytes.
pub const IPV6_LEN: usize = 16;
/// Length of a raw IPv4 address in bytes.
pub const IPV4_LEN: usize = 4;

/// How runs of all-zero groups are compressed into `::`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionPolicy {
    /// Every run of zero groups becomes `::`.
    ///
    /// Addresses with more than one zero run produce text that does not
    /// round-trip (`1::2::3`); existing consumers rely on this output, so it
    /// remains the default.
    #[default]
    EveryRun,
    /// RFC 5952: only the longest run of two or more zero groups is
    /// compressed (the first one on ties).
    LongestRun,
}

/// Returns `true` when `bytes` holds a complete IPv6 address.
pub fn is_valid_ipv6(bytes: &[u8]) -> bool {
    bytes.len() == IPV6_LEN
}

/// Returns `true` when `bytes` holds a complete IPv4 address.
pub fn is_valid_ipv4(bytes: &[u8]) -> bool {
    bytes.len() == IPV4_LEN
}

/// Formats a raw IPv6 address with the default [`CompressionPolicy`].
///
/// # Errors
///
/// Returns [`DnsCheckError::InvalidAddressLength`] unless `bytes` is exactly
/// 16 bytes long.
///
/// # Examples
///
/// ```
/// use domain_health::address::ipv6_to_text;
///
/// let mut raw = [0u8; 16];
/// raw[0] = 0x20;
/// raw[1] = 0x01;
/// raw[2] = 0x0d;
/// raw[3] = 0xb8;
/// raw[15] = 0x01;
/// assert_eq!(ipv6_to_text(&raw).unwrap(), "2001:db8::1");
/// ```
pub fn ipv6_to_text(bytes: &[u8]) -> Result<String, DnsCheckError> {
    ipv6_to_text_with(bytes, CompressionPolicy::default())
}

/// Formats a raw IPv6 address using the given compression policy.
///
/// # Errors
///
/// Returns [`DnsCheckError::InvalidAddressLength`] unless `bytes` is exactly
/// 16 bytes long.
pub fn ipv6_to_text_with(bytes: &[u8], policy: CompressionPolicy) -> Result<String, DnsCheckError> {
    if !is_valid_ipv6(bytes) {
        return Err(DnsCheckError::InvalidAddressLength {
            length: bytes.len(),
        });
    }

    let groups = hextets(bytes);
    Ok(match policy {
        CompressionPolicy::EveryRun => collapse_colon_runs(&expand(&groups)),
        CompressionPolicy::LongestRun => compress_longest_run(&groups),
    })
}

fn hextets(bytes: &[u8]) -> [u16; 8] {
    let mut groups = [0u16; 8];
    for (group, pair) in groups.iter_mut().zip(bytes.chunks_exact(2)) {
        *group = u16::from_be_bytes([pair[0], pair[1]]);
    }
    groups
}

/// Joins the groups with `:`, leaving zero groups empty so that every zero
/// run shows up as a sequence of two or more colons.
fn expand(groups: &[u16; 8]) -> String {
    let mut out = String::with_capacity(39);
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        if *group != 0 {
            // Writing to a String cannot fail
            let _ = write!(out, "{group:x}");
        }
    }
    out
}

/// Splices every maximal run of two or more colons into `::`.
///
/// A single zero group at either end leaves only one colon at the edge of the
/// string, so edge runs are spliced regardless of length.
fn collapse_colon_runs(expanded: &str) -> String {
    let mut out = String::with_capacity(expanded.len() + 1);
    let mut run = 0usize;
    for c in expanded.chars() {
        if c == ':' {
            run += 1;
            continue;
        }
        let at_start = out.is_empty();
        push_colons(&mut out, run, at_start);
        run = 0;
        out.push(c);
    }
    push_colons(&mut out, run, true);
    out
}

fn push_colons(out: &mut String, run: usize, at_edge: bool) {
    match run {
        0 => {}
        1 if !at_edge => out.push(':'),
        _ => out.push_str("::"),
    }
}

fn compress_longest_run(groups: &[u16; 8]) -> String {
    // (start, len) of the longest zero run of length >= 2
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    let render = |slice: &[u16]| {
        slice
            .iter()
            .map(|g| format!("{g:x}"))
            .collect::<Vec<_>>()
            .join(":")
    };

    match best {
        Some((start, len)) => format!(
            "{}::{}",
            render(&groups[..start]),
            render(&groups[start + len..])
        ),
        None => render(groups),
    }
}
