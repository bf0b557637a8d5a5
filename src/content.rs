//! Full header analysis: hops plus envelope metadata

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::{order_hops, total_transit};
use crate::date::{Timestamp, parse_date};
use crate::error::Result;
use crate::header::{Headers, parse_headers};
use crate::hop::{Hop, extract_hop};

/// Non-standard header some webmail services use to record the client address
pub const ORIGINATING_IP_HEADER: &str = "X-Originating-IP";

/// Result of analyzing one header block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Every parsed header, for inspection
    pub headers: Headers,

    /// Relay hops, earliest first
    pub hops: Vec<Hop>,

    /// Originating client address, if the header was present and valid
    pub source: Option<IpAddr>,

    pub from: String,
    pub to: String,
    pub cc: String,
    pub subject: String,
    pub message_id: String,

    /// Send time declared by the message itself
    pub date: Timestamp,
}

/// Analyze a raw message and reconstruct its relay path.
///
/// Only the header block is read. Any malformed header syntax or any
/// unrecognized timestamp, in a hop or in `Date`, fails the whole call.
pub fn analyze(raw: &[u8]) -> Result<Content> {
    let headers = parse_headers(raw)?;
    let hops = extract_hops(&headers)?;
    let date = parse_date(headers.get("Date").unwrap_or_default())?;
    let source = originating_ip(&headers);

    let single = |name: &str| headers.get(name).unwrap_or_default().to_string();
    let from = single("From");
    let to = single("To");
    let cc = single("Cc");
    let subject = single("Subject");
    let message_id = single("Message-ID");

    debug!(
        hops = hops.len(),
        transit_secs = total_transit(&hops).num_seconds(),
        "Analyzed message {message_id}"
    );

    Ok(Content {
        headers,
        hops,
        source,
        from,
        to,
        cc,
        subject,
        message_id,
        date,
    })
}

/// Extract every `Received` value and order the hops chronologically
pub fn extract_hops(headers: &Headers) -> Result<Vec<Hop>> {
    let hops = headers
        .get_all("Received")
        .iter()
        .map(|value| extract_hop(value))
        .collect::<Result<Vec<_>>>()?;

    Ok(order_hops(hops))
}

/// Parse the originating IP header, accepting a bracketed literal.
///
/// A missing or unparsable value is not an error.
#[must_use]
pub fn originating_ip(headers: &Headers) -> Option<IpAddr> {
    let raw = headers.get(ORIGINATING_IP_HEADER)?;
    let address = raw.trim().trim_matches(['[', ']']).parse().ok();
    if address.is_none() {
        debug!(value = raw, "Ignoring unparsable originating IP");
    }
    address
}
