//! Trusted DSN allowlist.
//! Restricts which ingestion projects the tunnel forwards to.

use std::sync::Arc;

use crate::envelope::Dsn;
use crate::http::error::TunnelError;

/// Set of trusted DSNs, compared by host and path.
///
/// An empty allowlist trusts every DSN (passthrough mode).
#[derive(Debug, Clone, Default)]
pub struct DsnAllowlist {
    trusted: Arc<Vec<Dsn>>,
}

impl DsnAllowlist {
    pub fn new(trusted: Vec<Dsn>) -> Self {
        Self {
            trusted: Arc::new(trusted),
        }
    }

    /// Build from raw config entries.
    pub fn from_config(entries: &[String]) -> Result<Self, url::ParseError> {
        let trusted = entries
            .iter()
            .map(|raw| Dsn::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(trusted))
    }

    pub fn is_open(&self) -> bool {
        self.trusted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trusted.is_empty()
    }

    pub fn check(&self, dsn: &Dsn) -> Result<(), TunnelError> {
        if self.is_open() || self.trusted.iter().any(|trusted| trusted.matches(dsn)) {
            Ok(())
        } else {
            Err(TunnelError::UntrustedDsn(dsn.to_string()))
        }
    }
}
