//! DSN parsing and upstream URL derivation.
//!
//! A DSN looks like `https://<public_key>@<host>/<project_id>`. The tunnel only
//! needs the scheme, the host (with an explicit port, if any) and the path.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// A parsed DSN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn(Url);

impl Dsn {
    /// Parse a DSN string as a URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(raw)?;
        if url.host_str().is_none() {
            return Err(url::ParseError::EmptyHost);
        }
        Ok(Self(url))
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Host plus explicit port, e.g. `o0.ingest.sentry.io` or `127.0.0.1:9000`.
    pub fn host(&self) -> String {
        let host = self.0.host_str().unwrap_or_default();
        match self.0.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// `scheme://host[:port]`, suitable for an `Origin` header.
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }

    /// The URL path with exactly one leading `/` removed. `None` when nothing remains.
    pub fn project_id(&self) -> Option<&str> {
        let path = self.0.path();
        let id = path.strip_prefix('/').unwrap_or(path);
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    /// `{scheme}://{host}/api/{project_id}/envelope/`.
    ///
    /// Returns `None` when the DSN carries no project id.
    pub fn upstream_url(&self) -> Option<String> {
        self.project_id().map(|project_id| {
            format!("{}://{}/api/{}/envelope/", self.scheme(), self.host(), project_id)
        })
    }

    /// Whether the DSN embeds a public or secret key.
    pub fn has_credentials(&self) -> bool {
        !self.0.username().is_empty() || self.0.password().is_some()
    }

    /// Same host and path. Keys are not compared.
    pub fn matches(&self, other: &Dsn) -> bool {
        self.host() == other.host() && self.0.path() == other.0.path()
    }

    /// Host and path only, safe to log.
    pub fn redacted(&self) -> String {
        format!("{}{}", self.host(), self.0.path())
    }
}

impl FromStr for Dsn {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme(), self.redacted())
    }
}
