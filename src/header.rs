//! Token header: the leading version and purpose tags.

use std::fmt;

/// Protocol version, identified by a fixed two-character tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    V2,
    V4,
}

impl Version {
    pub fn from_tag(tag: &str) -> Option<Version> {
        match tag {
            "v2" => Some(Version::V2),
            "v4" => Some(Version::V4),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Version::V2 => "v2",
            Version::V4 => "v4",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Whether a token is asymmetrically signed or symmetrically encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Local,
    Public,
}

impl Purpose {
    pub fn from_tag(tag: &str) -> Option<Purpose> {
        match tag {
            "local" => Some(Purpose::Local),
            "public" => Some(Purpose::Public),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Purpose::Local => "local",
            Purpose::Public => "public",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The `v{version}.{purpose}.` prefix of a token string.
///
/// Serialization is context-free: each (version, purpose) pair maps to
/// exactly one string and round-trips byte-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: Version,
    pub purpose: Purpose,
}

impl Header {
    pub fn new(version: Version, purpose: Purpose) -> Header {
        Header { version, purpose }
    }

    /// Match a pair of tag strings against the closed set of known tags.
    /// Unrecognized tags are a recoverable no-match, not an error.
    pub fn from_tags(version: &str, purpose: &str) -> Option<Header> {
        Some(Header {
            version: Version::from_tag(version)?,
            purpose: Purpose::from_tag(purpose)?,
        })
    }

    /// Parse the header prefix of a dot-separated token string.
    pub fn parse(token: &str) -> Option<Header> {
        let mut parts = token.split('.');
        Header::from_tags(parts.next()?, parts.next()?)
    }

    pub fn serialize(&self) -> String {
        format!("{}.{}.", self.version.tag(), self.purpose.tag())
    }
}
