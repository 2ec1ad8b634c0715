//! QA events and the topic keys that address groups of them.
//!
//! Two tiers of identifier exist side by side: an `event_id` string names
//! exactly one event, while a [`TopicKey`] addresses every active event of a
//! detection topic, optionally narrowed to one target item. The codec for
//! the raw key format lives on [`TopicKey`] itself.

mod event;
mod topic;

pub use event::QAEvent;
pub use topic::{TopicKey, KEY_DELIMITER, PATH_SEPARATOR, PATH_STAND_IN};
