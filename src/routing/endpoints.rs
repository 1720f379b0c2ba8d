//! Logical endpoint remapping.
//!
//! # Responsibilities
//! - Name the content resources the client knows about
//! - Rewrite a logical endpoint (`tours`, `tours/42`) to the path scheme of
//!   the active backend
//!
//! # Design Decisions
//! - Matching is on the first path segment; the remainder is kept verbatim
//! - Unmapped logical endpoints pass through unchanged
//! - Tables are static; no regex, no allocation on lookup
//! - Record ids are percent-encoded as exactly one path segment

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Bytes escaped in a record id: the URL path-segment set plus `\`,
/// which `http` URLs treat as a separator.
const ID_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A content resource served by both backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Tours,
    CulturalEvents,
    LocalExperiences,
    Restaurants,
    Transportation,
    SupportLocals,
    PhotoChallenges,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Tours,
        Resource::CulturalEvents,
        Resource::LocalExperiences,
        Resource::Restaurants,
        Resource::Transportation,
        Resource::SupportLocals,
        Resource::PhotoChallenges,
    ];

    /// The logical endpoint name used by callers and cache keys.
    pub fn logical_name(self) -> &'static str {
        match self {
            Resource::Tours => "tours",
            Resource::CulturalEvents => "cultural-events",
            Resource::LocalExperiences => "local-experiences",
            Resource::Restaurants => "restaurants",
            Resource::Transportation => "transportation",
            Resource::SupportLocals => "support-locals",
            Resource::PhotoChallenges => "photo-challenges",
        }
    }

    /// Property name a backend may wrap this resource's list under.
    pub fn collection_key(self) -> &'static str {
        match self {
            Resource::Tours => "tours",
            Resource::CulturalEvents => "events",
            Resource::LocalExperiences => "experiences",
            Resource::Restaurants => "restaurants",
            Resource::Transportation => "transportation",
            Resource::SupportLocals => "businesses",
            Resource::PhotoChallenges => "challenges",
        }
    }

    /// Logical endpoint of one record, `<resource>/<id>`.
    ///
    /// The id always stays a single segment. Ids that are empty or a dot
    /// segment (`.`, `..`) cannot and yield `None`.
    pub fn record_endpoint(self, id: &str) -> Option<String> {
        if matches!(id, "" | "." | "..") {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.logical_name(),
            utf8_percent_encode(id, ID_SEGMENT)
        ))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logical_name())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.logical_name() == s)
            .ok_or_else(|| format!("unknown resource '{}'", s))
    }
}

/// Which path convention a backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScheme {
    /// Serverless function gateway: `/admin-content/<resource>`.
    Functions,
    /// Legacy REST server: `/api/<resource>`.
    Legacy,
}

const FUNCTION_PATHS: &[(&str, &str)] = &[
    ("tours", "/admin-content/tours"),
    ("cultural-events", "/admin-content/cultural-events"),
    ("local-experiences", "/admin-content/local-experiences"),
    ("restaurants", "/admin-content/restaurants"),
    ("transportation", "/admin-content/transportation"),
    ("support-locals", "/admin-content/support-locals"),
    ("photo-challenges", "/admin-content/photo-challenges"),
];

const LEGACY_PATHS: &[(&str, &str)] = &[
    ("tours", "/api/tours"),
    ("cultural-events", "/api/cultural-events"),
    ("local-experiences", "/api/local-experiences"),
    ("restaurants", "/api/restaurants"),
    ("transportation", "/api/transportation"),
    ("support-locals", "/api/support-locals"),
    ("photo-challenges", "/api/photo-challenges"),
];

impl PathScheme {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PathScheme::Functions => FUNCTION_PATHS,
            PathScheme::Legacy => LEGACY_PATHS,
        }
    }

    /// Rewrite a logical endpoint into a concrete request path.
    pub fn remap(self, logical: &str) -> String {
        let logical = logical.trim_start_matches('/');
        let (head, rest) = match logical.find('/') {
            Some(idx) => logical.split_at(idx),
            None => (logical, ""),
        };

        match self.table().iter().find(|(name, _)| *name == head) {
            Some((_, path)) => format!("{}{}", path, rest),
            None => format!("/{}", logical),
        }
    }
}
