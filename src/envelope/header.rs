//! Envelope header types.

use serde::Deserialize;

/// First line of an envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnvelopeHeader {
    /// DSN the SDK was configured with.
    pub dsn: Option<String>,
    pub event_id: Option<String>,
    pub sent_at: Option<String>,
    pub sdk: Option<SdkInfo>,
}

/// SDK identification carried in the header.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SdkInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Header of the first envelope item (line 2). Observability only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemHeader {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

impl EnvelopeHeader {
    pub fn parse(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }

    /// The DSN, treating an empty string the same as a missing field.
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_deref().filter(|dsn| !dsn.is_empty())
    }

    pub fn sdk_name(&self) -> Option<&str> {
        self.sdk.as_ref().and_then(|sdk| sdk.name.as_deref())
    }

    pub fn sdk_version(&self) -> Option<&str> {
        self.sdk.as_ref().and_then(|sdk| sdk.version.as_deref())
    }
}

impl ItemHeader {
    pub fn parse(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }
}
