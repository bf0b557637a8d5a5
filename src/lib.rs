// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Mail Header Analyzer
//!
//! Reconstructs the transit path of an email from its raw header block.
//!
//! # Features
//!
//! - Folding-aware, order-preserving header parsing
//! - Relay hop extraction from `Received` headers
//! - Timestamp recovery across the date formats mail agents emit
//! - Chronological hop ordering with per-hop delays
//! - Envelope metadata (sender, recipients, subject, originating IP)
//!
//! With the `server` feature the crate also ships the `mha` HTTP service.
//!
//! # Example
//!
//! ```rust
//! use mail_header_analyzer::analyze;
//!
//! let raw = b"Received: by mx.example.org; Mon, 02 Jan 2006 15:04:09 -0700\r\n\
//!             Received: from client.example.com by relay.example.com with ESMTP id 1; Mon, 02 Jan 2006 15:04:05 -0700\r\n\
//!             Date: Mon, 02 Jan 2006 15:04:00 -0700\r\n\
//!             Subject: Hello\r\n\
//!             \r\n\
//!             Body";
//! let content = analyze(raw).unwrap();
//!
//! assert_eq!(content.hops.len(), 2);
//! assert!(content.hops[0].by.contains("relay.example.com"));
//! assert_eq!(content.hops[1].delay.num_seconds(), 4);
//! ```

pub mod chain;
mod content;
pub mod date;
mod error;
pub mod header;
pub mod hop;

#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod http;

pub use content::{Content, ORIGINATING_IP_HEADER, analyze, extract_hops, originating_ip};
pub use date::{Timestamp, parse_date};
pub use error::{ParseError, Result};
pub use header::{Headers, parse_headers};
pub use hop::{Hop, extract_hop};
