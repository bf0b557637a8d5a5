//! RFC 5322 header block parsing
//!
//! Headers are kept in the order they were first seen, and every value of a
//! repeated header is kept in encounter order. For `Received` this means the
//! most recent relay comes first.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ParseError, Result};

/// Ordered, case-insensitive, multi-valued header mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a value, creating the header if it is new
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, values)) => values.push(value),
            None => self.entries.push((canonical_name(name), vec![value])),
        }
    }

    /// First value of a header
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values of a header, in encounter order
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Number of distinct header names
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate headers in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

struct HeadersVisitor;

impl<'de> Visitor<'de> for HeadersVisitor {
    type Value = Headers;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of header names to lists of values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Headers, A::Error> {
        let mut headers = Headers::new();
        while let Some((name, values)) = access.next_entry::<String, Vec<String>>()? {
            for value in values {
                headers.append(&name, value);
            }
        }
        Ok(headers)
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(HeadersVisitor)
    }
}

/// MIME canonical form: `x-originating-ip` becomes `X-Originating-Ip`
fn canonical_name(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}

fn is_field_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| (33..=126).contains(&b) && b != b':')
}

/// Parse the header block at the start of `raw`.
///
/// Parsing stops at the first empty line; anything after it is the body and
/// is not read. Continuation lines are unfolded into the previous value with a
/// single space. Input that ends before the empty line is rejected, whether
/// or not its last line was terminated.
pub fn parse_headers(raw: &[u8]) -> Result<Headers> {
    let text = String::from_utf8_lossy(raw);
    let mut headers = Headers::new();
    let mut current: Option<(String, String)> = None;
    let mut rest: &str = &text;
    let mut line_no = 0;
    let mut terminated = false;

    while !rest.is_empty() {
        line_no += 1;
        let Some((line, tail)) = rest.split_once('\n') else {
            return Err(ParseError::header(
                line_no,
                "unterminated header field at end of input",
            ));
        };
        rest = tail;
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            terminated = true;
            break;
        }

        if line.starts_with([' ', '\t']) {
            let Some((_, value)) = current.as_mut() else {
                return Err(ParseError::header(
                    line_no,
                    "continuation line without a preceding header",
                ));
            };
            let folded = line.trim();
            if !folded.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(folded);
            }
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::header(line_no, "missing ':' separator"));
        };
        if !is_field_name(name) {
            return Err(ParseError::header(
                line_no,
                format!("invalid header name {name:?}"),
            ));
        }

        if let Some((name, value)) = current.replace((name.to_string(), value.trim().to_string()))
        {
            headers.append(&name, value);
        }
    }

    if !terminated {
        return Err(ParseError::header(
            line_no + 1,
            "header block not terminated by an empty line",
        ));
    }

    if let Some((name, value)) = current {
        headers.append(&name, value);
    }

    Ok(headers)
}
