use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::draft::Draft;
use crate::error::UriParseError;

/// Base URI a schema under test is anchored at.
///
/// The empty URI means references resolve from the schema's own root. The
/// identifier is kept as written; absolute identifiers also carry the parsed
/// form, which is what two URIs are compared by.
#[derive(Debug, Clone, Default)]
pub struct BaseUri(Repr);

#[derive(Debug, Clone, Default)]
enum Repr {
    #[default]
    Empty,
    Absolute {
        raw: String,
        url: Url,
    },
    Relative(String),
}

impl BaseUri {
    pub fn empty() -> Self {
        Self(Repr::Empty)
    }

    /// Parse `id` as a URI reference.
    ///
    /// The empty string is the empty URI. Relative references are accepted;
    /// only strings that are not URI references at all are rejected.
    pub fn parse(id: &str) -> Result<Self, UriParseError> {
        if id.is_empty() {
            return Ok(Self::empty());
        }

        let invalid = |source| UriParseError::Invalid {
            id: id.to_string(),
            source,
        };

        match Url::parse(id) {
            Ok(url) => Ok(Self(Repr::Absolute {
                raw: id.to_string(),
                url,
            })),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                check_relative_reference(id)?;
                // Resolving against a placeholder catches malformed authorities.
                Url::parse(PLACEHOLDER_BASE)
                    .and_then(|base| base.join(id))
                    .map_err(invalid)?;
                Ok(Self(Repr::Relative(id.to_string())))
            }
            Err(source) => Err(invalid(source)),
        }
    }

    /// Derive the base URI from the identifier field of `schema`.
    ///
    /// Non-object schemas and objects without the field get the empty URI.
    pub fn for_schema(schema: &Value, draft: Draft) -> Result<Self, UriParseError> {
        let keyword = draft.id_keyword();
        let Some(id) = schema.as_object().and_then(|obj| obj.get(keyword)) else {
            return Ok(Self::empty());
        };
        match id.as_str() {
            Some(id) => Self::parse(id),
            None => Err(UriParseError::NotAString {
                keyword: keyword.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    pub fn is_relative(&self) -> bool {
        matches!(self.0, Repr::Relative(_))
    }

    /// Parsed form of an absolute identifier.
    pub fn as_url(&self) -> Option<&Url> {
        match &self.0 {
            Repr::Absolute { url, .. } => Some(url),
            _ => None,
        }
    }

    /// The identifier exactly as it appeared in the schema.
    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Empty => "",
            Repr::Absolute { raw, .. } => raw,
            Repr::Relative(raw) => raw,
        }
    }

    /// Whether `id`, an identifier string from some document, names this URI.
    pub fn identifies(&self, id: &str) -> bool {
        match &self.0 {
            Repr::Empty => id.is_empty(),
            Repr::Absolute { url, .. } => Url::parse(id).is_ok_and(|other| &other == url),
            Repr::Relative(raw) => raw == id,
        }
    }
}

impl PartialEq for BaseUri {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Empty, Repr::Empty) => true,
            (Repr::Absolute { url: a, .. }, Repr::Absolute { url: b, .. }) => a == b,
            (Repr::Relative(a), Repr::Relative(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for BaseUri {}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BaseUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const PLACEHOLDER_BASE: &str = "relative-base:///";

/// Syntax rules for relative references that `Url::join` does not enforce.
fn check_relative_reference(id: &str) -> Result<(), UriParseError> {
    let malformed = |reason: &str| UriParseError::Malformed {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.chars().any(|c| c.is_ascii_control()) {
        return Err(malformed("contains a control character"));
    }

    // Without a scheme, a colon in the first path segment reads as a scheme separator.
    let first_segment = id.split(['/', '?', '#']).next().unwrap_or_default();
    if first_segment.contains(':') {
        return Err(malformed("first path segment contains a colon"));
    }

    let bytes = id.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(malformed("invalid percent escape"));
            }
        }
    }
    Ok(())
}
