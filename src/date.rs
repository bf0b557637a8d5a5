//! Timestamp parsing for the date formats mail agents actually emit

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Weekday};
use tracing::trace;

use crate::error::{ParseError, Result};

/// An absolute instant together with the offset it was written in
pub type Timestamp = DateTime<FixedOffset>;

/// How a format encodes its time zone
#[derive(Debug, Clone, Copy)]
enum Zone {
    /// Numeric offset handled by chrono's `%z`
    Numeric,
    /// Alphabetic abbreviation at this whitespace-separated token position
    Abbreviation(usize),
    /// Numeric offset followed by a parenthesized abbreviation, e.g. `-0700 (MST)`
    NumericWithComment,
    /// RFC 3339, with or without fractional seconds
    Rfc3339,
}

#[derive(Debug)]
struct DateFormat {
    name: &'static str,
    /// Leading day name, checked for spelling but not against the date
    weekday: bool,
    pattern: &'static str,
    zone: Zone,
}

// Order matters: several layouts are prefixes of their neighbours.
const FORMATS: &[DateFormat] = &[
    DateFormat {
        name: "unix",
        weekday: true,
        pattern: " %b %d %H:%M:%S %Y",
        zone: Zone::Abbreviation(4),
    },
    DateFormat {
        name: "ruby",
        weekday: true,
        pattern: " %b %d %H:%M:%S %z %Y",
        zone: Zone::Numeric,
    },
    DateFormat {
        name: "rfc822",
        weekday: false,
        pattern: "%d %b %y %H:%M",
        zone: Zone::Abbreviation(4),
    },
    DateFormat {
        name: "rfc822z",
        weekday: false,
        pattern: "%d %b %y %H:%M %z",
        zone: Zone::Numeric,
    },
    DateFormat {
        name: "rfc1123",
        weekday: true,
        pattern: ", %d %b %Y %H:%M:%S",
        zone: Zone::Abbreviation(5),
    },
    DateFormat {
        name: "rfc1123z",
        weekday: true,
        pattern: ", %d %b %Y %H:%M:%S %z",
        zone: Zone::Numeric,
    },
    DateFormat {
        name: "rfc3339",
        weekday: false,
        pattern: "",
        zone: Zone::Rfc3339,
    },
    DateFormat {
        name: "rfc1123z-comment",
        weekday: true,
        pattern: ", %d %b %Y %H:%M:%S %z",
        zone: Zone::NumericWithComment,
    },
    DateFormat {
        name: "long-12h",
        weekday: false,
        pattern: "%B %d, %Y %I:%M:%S %p",
        zone: Zone::Abbreviation(5),
    },
];

impl DateFormat {
    fn parse(&self, input: &str) -> Option<Timestamp> {
        match self.zone {
            Zone::Numeric => {
                DateTime::parse_from_str(self.skip_weekday(input)?, self.pattern).ok()
            }
            Zone::Rfc3339 => DateTime::parse_from_rfc3339(input).ok(),
            Zone::NumericWithComment => {
                let (head, comment) = input.strip_suffix(')')?.rsplit_once('(')?;
                zone_offset(comment)?;
                DateTime::parse_from_str(self.skip_weekday(head.trim_end())?, self.pattern).ok()
            }
            Zone::Abbreviation(position) => {
                let mut tokens: Vec<&str> = input.split_whitespace().collect();
                if position >= tokens.len() {
                    return None;
                }
                let offset = zone_offset(tokens.remove(position))?;
                let joined = tokens.join(" ");
                let naive =
                    NaiveDateTime::parse_from_str(self.skip_weekday(&joined)?, self.pattern).ok()?;
                offset.from_local_datetime(&naive).single()
            }
        }
    }

    /// Strip a leading day name. A misspelled name fails the format; a name
    /// that disagrees with the date does not.
    fn skip_weekday<'a>(&self, input: &'a str) -> Option<&'a str> {
        if !self.weekday {
            return Some(input);
        }
        let end = input
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(input.len());
        input[..end].parse::<Weekday>().ok()?;
        Some(&input[end..])
    }
}

/// Resolve a zone abbreviation to its offset.
///
/// The RFC 5322 zone names map to their defined offsets. Any other run of
/// three to five uppercase letters is accepted with a zero offset; everything
/// else, `AM`/`PM` included, is not a zone abbreviation.
fn zone_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation {
        "UT" | "UTC" | "GMT" | "Z" => 0,
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        other
            if (3..=5).contains(&other.len())
                && other.bytes().all(|b| b.is_ascii_uppercase()) =>
        {
            0
        }
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

/// Parse a timestamp by trying each known format in order.
///
/// The whole input must match a format; trailing text is a failure.
pub fn parse_date(input: &str) -> Result<Timestamp> {
    FORMATS
        .iter()
        .find_map(|format| {
            let parsed = format.parse(input)?;
            trace!(format = format.name, input, "Matched date format");
            Some(parsed)
        })
        .ok_or_else(|| ParseError::Date(input.to_string()))
}
