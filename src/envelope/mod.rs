//! Envelope inspection.
//!
//! # Data Flow
//! ```text
//! request body (opaque bytes)
//!     → split on '\n' (no UTF-8 requirement beyond the inspected lines)
//!     → header.rs (line 1: envelope header, required)
//!     → header.rs (line 2: item header, optional, best effort)
//!     → dsn.rs (destination derivation)
//! ```
//!
//! # Design Decisions
//! - Only the first two lines are ever parsed; the payload is forwarded as received
//! - Nothing here is cached or shared across requests

pub mod dsn;
pub mod header;

pub use dsn::Dsn;
pub use header::{EnvelopeHeader, ItemHeader, SdkInfo};

use crate::http::error::TunnelError;

/// Result of inspecting an envelope payload.
#[derive(Debug, Clone)]
pub struct EnvelopeSummary {
    /// Parsed envelope header (line 1).
    pub header: EnvelopeHeader,
    /// Item type from line 2, if present and parseable.
    pub item_type: Option<String>,
    /// Size of the full payload in bytes.
    pub size: usize,
}

/// Namespace for envelope parsing helpers.
pub struct Envelope;

impl Envelope {
    /// Parse the header and the first item header out of a raw envelope.
    ///
    /// A malformed header line is a fault; a malformed or missing item line is not.
    pub fn peek(bytes: &[u8]) -> Result<EnvelopeSummary, TunnelError> {
        let mut lines = bytes.split(|b| *b == b'\n');

        let header_line = lines.next().unwrap_or_default();
        let header = EnvelopeHeader::parse(header_line).map_err(TunnelError::MalformedHeader)?;

        let item_type = lines
            .next()
            .and_then(|line| ItemHeader::parse(line).ok())
            .and_then(|item| item.item_type);

        Ok(EnvelopeSummary {
            header,
            item_type,
            size: bytes.len(),
        })
    }
}
