//! Relay hop extraction from `Received` header values

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{Timestamp, parse_date};
use crate::error::Result;

/// One relay step reconstructed from a `Received` header value.
///
/// `from`, `by` and `with` are the raw matched text, surrounding whitespace
/// included. They are written by the relaying agents and are not verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Sending agent, empty when the value had no `from` clause
    pub from: String,

    /// Receiving agent
    pub by: String,

    /// Protocol or software, empty when absent
    pub with: String,

    /// Time the relay recorded
    pub time: Timestamp,

    /// Time since the previous hop, serialized as saturating nanoseconds
    #[serde(with = "nanoseconds")]
    pub delay: TimeDelta,
}

mod nanoseconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    // Saturates past the i64 range (about 292 years)
    pub fn serialize<S: Serializer>(delay: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = delay.num_nanoseconds().unwrap_or(if *delay < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::nanoseconds)
    }
}

// Relay grammars, matched against the text before the timestamp
static RECEIVED_FROM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"from\s+(.*?)\s+by(.*?)(?:(?:with|via)(.*?)(?:\sid\s|$)|\sid\s|$)").unwrap()
});

static RECEIVED_BY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"by(.*?)(?:(?:with|via)(.*?)(?:;|\sid\s|$)|;|\sid\s|$)").unwrap()
});

#[derive(Debug, Default)]
struct RelayFields {
    from: String,
    by: String,
    with: String,
}

fn group(captures: &Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map_or_else(String::new, |m| m.as_str().to_string())
}

fn relay_fields(remainder: &str) -> Option<RelayFields> {
    if remainder.starts_with("from") {
        let captures = RECEIVED_FROM_REGEX.captures(remainder)?;
        Some(RelayFields {
            from: group(&captures, 1),
            by: group(&captures, 2),
            with: group(&captures, 3),
        })
    } else {
        let captures = RECEIVED_BY_REGEX.captures(remainder)?;
        Some(RelayFields {
            from: String::new(),
            by: group(&captures, 1),
            with: group(&captures, 2),
        })
    }
}

/// Build a [`Hop`] from one `Received` header value.
///
/// The timestamp is whatever follows the last `;`. A value whose relay text
/// matches neither grammar still yields a hop, with empty text fields. The
/// returned delay is zero until the hop is placed in a chain.
pub fn extract_hop(value: &str) -> Result<Hop> {
    let (remainder, stamp) = value.rsplit_once(';').unwrap_or((value, value));
    let time = parse_date(stamp.trim())?;

    let fields = relay_fields(remainder).unwrap_or_else(|| {
        debug!(value, "Received value matched no relay grammar");
        RelayFields::default()
    });

    Ok(Hop {
        from: fields.from,
        by: fields.by,
        with: fields.with,
        time,
        delay: TimeDelta::zero(),
    })
}
