//! Topic keys - the composite address for a group of QA events.
//!
//! A topic key names a detection source and a topic within it, optionally
//! scoped to a single catalogued item. On the wire it is colon-delimited:
//!
//! ```text
//! source:topic[:target-uuid]
//! ```
//!
//! Topic names may contain a path separator (`/`), which collides with
//! nothing here but is disallowed in the raw key; it travels as `!` and is
//! restored on decode. `!` is therefore reserved and must not appear
//! literally in a topic name, and neither segment may contain the `:`
//! delimiter itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocketError, Result};
use crate::event::QAEvent;

/// Delimiter between the segments of a raw topic key.
pub const KEY_DELIMITER: char = ':';

/// Stand-in character carrying a path separator inside the topic segment.
pub const PATH_STAND_IN: char = '!';

/// Path separator that topic names may contain once decoded.
pub const PATH_SEPARATOR: char = '/';

/// A decoded topic key: detection source + topic, optionally one target item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicKey {
    /// Name of the detection source (e.g., "orcid").
    pub source: String,

    /// Topic name within the source; may contain `/`.
    pub topic: String,

    /// Target item scope; `None` aggregates across all targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Uuid>,
}

impl TopicKey {
    /// Create a key covering all targets of a topic.
    pub fn new(source: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            topic: topic.into(),
            target: None,
        }
    }

    /// Scope the key to a single target item.
    pub fn with_target(mut self, target: Uuid) -> Self {
        self.target = Some(target);
        self
    }

    /// Parse a raw colon-delimited topic key.
    ///
    /// The raw string is split on `:` into at most three segments, so only
    /// the first two occurrences of the delimiter are structural. At least
    /// two non-empty segments are required; a third segment, when present,
    /// must be a well-formed UUID. The topic segment is unescaped by
    /// replacing `!` with `/`.
    pub fn decode(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(3, KEY_DELIMITER);

        let source = parts.next().unwrap_or_default();
        let topic = parts.next().ok_or_else(|| malformed(raw, "expected at least two segments"))?;

        if source.is_empty() {
            return Err(malformed(raw, "empty source segment"));
        }
        if topic.is_empty() {
            return Err(malformed(raw, "empty topic segment"));
        }

        let target = match parts.next() {
            Some(segment) => Some(
                Uuid::parse_str(segment)
                    .map_err(|e| malformed(raw, format!("target segment is not a UUID: {}", e)))?,
            ),
            None => None,
        };

        Ok(Self {
            source: source.to_string(),
            topic: topic.replace(PATH_STAND_IN, &PATH_SEPARATOR.to_string()),
            target,
        })
    }

    /// Encode the key back to its raw colon-delimited form.
    ///
    /// Inverse of [`TopicKey::decode`] for every key whose source contains
    /// no `:` and whose topic contains neither `:` nor a literal `!`.
    pub fn encode(&self) -> String {
        let topic = self.topic.replace(PATH_SEPARATOR, &PATH_STAND_IN.to_string());
        match self.target {
            Some(target) => format!(
                "{}{}{}{}{}",
                self.source, KEY_DELIMITER, topic, KEY_DELIMITER, target
            ),
            None => format!("{}{}{}", self.source, KEY_DELIMITER, topic),
        }
    }

    /// Check whether an event falls under this key.
    ///
    /// Source and topic must match exactly; the target matters only when
    /// the key carries one.
    pub fn matches(&self, event: &QAEvent) -> bool {
        event.source == self.source
            && event.topic == self.topic
            && self.target.is_none_or(|t| event.target == t)
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for TopicKey {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

fn malformed(raw: &str, reason: impl Into<String>) -> DocketError {
    DocketError::MalformedKey {
        raw: raw.to_string(),
        reason: reason.into(),
    }
}
