//! QA event type - one machine-detected suggestion about one catalogued item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::topic::TopicKey;

/// A detected quality-assurance suggestion awaiting review.
///
/// Events are created by an external detection source and land in the active
/// store. They are never edited in place: a correction replaces the payload
/// through the patch mechanism, and a rejection moves the event into the
/// decision archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAEvent {
    /// Globally unique identifier assigned by the detection source.
    pub event_id: String,

    /// Name of the detection source (e.g., "openaire").
    pub source: String,

    /// Topic name of the detection rule; may contain `/`.
    pub topic: String,

    /// The catalogued item this suggestion concerns.
    pub target: Uuid,

    /// Short human-readable title of the suggestion.
    pub title: String,

    /// The proposed correction, interpretable only by the patch mechanism.
    pub payload: Value,

    /// Ranking signal; topic listings sort by this, descending.
    pub trust: f64,

    /// When the detection source produced the event.
    pub detected_at: DateTime<Utc>,

    /// A second item involved in the suggestion (e.g., a duplicate candidate).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Uuid>,
}

impl QAEvent {
    /// Create a new event with an empty payload and zero trust.
    pub fn new(
        event_id: impl Into<String>,
        source: impl Into<String>,
        topic: impl Into<String>,
        target: Uuid,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            source: source.into(),
            topic: topic.into(),
            target,
            title: String::new(),
            payload: Value::Null,
            trust: 0.0,
            detected_at: Utc::now(),
            related: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the correction payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Set the trust score.
    pub fn with_trust(mut self, trust: f64) -> Self {
        self.trust = trust;
        self
    }

    /// Set the detection timestamp.
    pub fn with_detected_at(mut self, at: DateTime<Utc>) -> Self {
        self.detected_at = at;
        self
    }

    /// Set the related item.
    pub fn with_related(mut self, related: Uuid) -> Self {
        self.related = Some(related);
        self
    }

    /// The topic-group key this event belongs to (all targets).
    pub fn topic_key(&self) -> TopicKey {
        TopicKey::new(self.source.clone(), self.topic.clone())
    }

    /// The fully scoped key addressing exactly this event's topic and target.
    pub fn target_key(&self) -> TopicKey {
        self.topic_key().with_target(self.target)
    }
}
