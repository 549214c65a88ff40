//! Store-neutral event types.
//!
//! These types represent planned events in a store-agnostic way. Store
//! backends return raw `Document`s; `Event::from_document` is the single
//! validated decoding step, so nothing downstream of the store client
//! ever sees an event without a usable `start` instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EventlyError, EventlyResult};
use crate::protocol::Document;

/// A planned event (read-side projection).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Store-assigned document id
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Start instant; always present and valid once decoded
    pub start: DateTime<Utc>,
    /// Optional end instant; `None` means same as `start`
    pub end: Option<DateTime<Utc>>,
    pub visibility: Visibility,
    /// Denormalized category, when the document carries one
    pub category: Option<Category>,
    /// Optional attendance capacity
    pub limit: Option<u32>,
    /// Attendee user ids; cardinality is display-only
    pub attendees: Vec<String>,
    /// Owner user id (opaque to the engine)
    pub owner: Option<String>,
    /// Place id (opaque to the engine)
    pub place: Option<String>,
}

impl Event {
    /// End instant used for ordering: an event with no `end` is treated
    /// as ending when it starts.
    pub fn end_or_start(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }

    /// Decode a raw store document into an `Event`.
    ///
    /// Fails on a missing or unparseable `start`, an empty `title`, or an
    /// unknown `visibility`. Callers quarantine failures rather than
    /// letting them reach the bucketer.
    pub fn from_document(document: &Document) -> EventlyResult<Self> {
        let fields: EventFields =
            serde_json::from_value(document.fields.clone()).map_err(|e| EventlyError::Decode {
                id: document.id.clone(),
                reason: e.to_string(),
            })?;

        if fields.title.trim().is_empty() {
            return Err(EventlyError::Decode {
                id: document.id.clone(),
                reason: "empty title".to_string(),
            });
        }

        Ok(Event {
            id: document.id.clone(),
            title: fields.title,
            description: fields.description,
            start: fields.start,
            end: fields.end,
            visibility: fields.visibility,
            category: fields.category,
            limit: fields.limit,
            attendees: fields.attendees,
            owner: fields.owner,
            place: fields.place,
        })
    }
}

/// Who can see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Friends,
    Unlisted,
}

/// A denormalized event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Icon name resolved by the rendering layer
    pub icon: String,
}

/// Field shape of an event document. Decoded separately from `Event`
/// because the document id lives outside the field map.
#[derive(Deserialize)]
struct EventFields {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(deserialize_with = "instant::required")]
    start: DateTime<Utc>,
    #[serde(default, deserialize_with = "instant::optional")]
    end: Option<DateTime<Utc>>,
    visibility: Visibility,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    attendees: Vec<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    place: Option<String>,
}

/// A new event to be written to the store. The store assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attendees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Wire instants: RFC 3339 strings or `{seconds, nanoseconds}` maps,
/// both decoding to `DateTime<Utc>`.
pub mod instant {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Rfc3339(DateTime<Utc>),
        SecondsNanos {
            seconds: i64,
            #[serde(default)]
            nanoseconds: u32,
        },
    }

    impl Raw {
        fn into_datetime<E: serde::de::Error>(self) -> Result<DateTime<Utc>, E> {
            match self {
                Raw::Rfc3339(dt) => Ok(dt),
                Raw::SecondsNanos {
                    seconds,
                    nanoseconds,
                } => Utc
                    .timestamp_opt(seconds, nanoseconds)
                    .single()
                    .ok_or_else(|| E::custom("timestamp out of range")),
            }
        }
    }

    pub fn required<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Raw::deserialize(deserializer)?.into_datetime()
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => raw.into_datetime().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(fields: serde_json::Value) -> Document {
        Document {
            id: "doc-1".to_string(),
            fields,
        }
    }

    #[test]
    fn decodes_rfc3339_instants() {
        let event = Event::from_document(&document(json!({
            "title": "Beach party",
            "start": "2024-03-05T10:00:00Z",
            "end": "2024-03-05T11:00:00Z",
            "visibility": "public",
            "category": { "name": "Parties", "icon": "party-popper" },
            "attendees": ["u1", "u2"]
        })))
        .unwrap();

        assert_eq!(event.id, "doc-1");
        assert_eq!(event.title, "Beach party");
        assert_eq!(event.visibility, Visibility::Public);
        assert_eq!(event.category.as_ref().unwrap().name, "Parties");
        assert_eq!(event.attendees.len(), 2);
        assert_eq!(event.end_or_start(), event.end.unwrap());
    }

    #[test]
    fn decodes_seconds_nanos_instants() {
        let event = Event::from_document(&document(json!({
            "title": "Bowling",
            "start": { "seconds": 1709632800, "nanoseconds": 500 },
            "visibility": "friends"
        })))
        .unwrap();

        assert_eq!(event.start.timestamp(), 1709632800);
        assert_eq!(event.start.timestamp_subsec_nanos(), 500);
        // No end: ordering falls back to start
        assert_eq!(event.end_or_start(), event.start);
    }

    #[test]
    fn rejects_missing_start() {
        let err = Event::from_document(&document(json!({
            "title": "No start",
            "visibility": "public"
        })))
        .unwrap_err();

        assert!(matches!(err, EventlyError::Decode { ref id, .. } if id == "doc-1"));
    }

    #[test]
    fn rejects_unparseable_start() {
        let err = Event::from_document(&document(json!({
            "title": "Bad start",
            "start": "yesterday-ish",
            "visibility": "public"
        })))
        .unwrap_err();

        assert!(matches!(err, EventlyError::Decode { .. }));
    }

    #[test]
    fn rejects_empty_title() {
        let err = Event::from_document(&document(json!({
            "title": "   ",
            "start": "2024-03-05T10:00:00Z",
            "visibility": "unlisted"
        })))
        .unwrap_err();

        assert!(matches!(err, EventlyError::Decode { .. }));
    }

    #[test]
    fn draft_serialization_omits_absent_fields() {
        let draft = EventDraft {
            title: "Garden walk".to_string(),
            description: None,
            start: "2024-03-05T10:00:00Z".parse().unwrap(),
            end: None,
            visibility: Visibility::Unlisted,
            category: None,
            limit: None,
            attendees: vec![],
            owner: Some("u1".to_string()),
            place: None,
        };

        let value = serde_json::to_value(&draft).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("title"));
        assert!(object.contains_key("owner"));
        assert!(!object.contains_key("end"));
        assert!(!object.contains_key("attendees"));
    }
}
