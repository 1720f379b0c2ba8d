//! Canonical record types, one per content resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize::fields::{flag, object, record_id, text, text_any, text_list, RecordId};
use crate::normalize::CanonicalRecord;
use crate::routing::Resource;

/// A guided tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tour {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub price: String,
    pub location: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for Tour {
    const RESOURCE: Resource = Resource::Tours;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            title: text_any(raw, &["title", "name"]),
            description: text(raw, "description"),
            duration: text(raw, "duration"),
            price: text(raw, "price"),
            location: text(raw, "location"),
            images: text_list(raw, "images"),
            tags: text_list(raw, "tags"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A festival, concert or other dated cultural event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CulturalEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for CulturalEvent {
    const RESOURCE: Resource = Resource::CulturalEvents;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            title: text_any(raw, &["title", "name"]),
            description: text(raw, "description"),
            date: text_any(raw, &["date", "event_date"]),
            location: text(raw, "location"),
            images: text_list(raw, "images"),
            tags: text_list(raw, "tags"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A hosted local experience (cooking class, snorkel trip, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalExperience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub price: String,
    pub location: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for LocalExperience {
    const RESOURCE: Resource = Resource::LocalExperiences;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            title: text_any(raw, &["title", "name"]),
            description: text(raw, "description"),
            category: text(raw, "category"),
            duration: text(raw, "duration"),
            price: text(raw, "price"),
            location: text(raw, "location"),
            images: text_list(raw, "images"),
            tags: text_list(raw, "tags"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub cuisine_types: Vec<String>,
    pub price_range: String,
    pub images: Vec<String>,
    pub featured: bool,
    pub contact_info: Map<String, Value>,
    pub operating_hours: Map<String, Value>,
    pub code_snippet: String,
}

impl CanonicalRecord for Restaurant {
    const RESOURCE: Resource = Resource::Restaurants;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            name: text(raw, "name"),
            description: text(raw, "description"),
            cuisine_types: text_list(raw, "cuisine_types"),
            price_range: text(raw, "price_range"),
            images: text_list(raw, "images"),
            featured: flag(raw, "featured"),
            contact_info: object(raw, "contact_info"),
            operating_hours: object(raw, "operating_hours"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A transport option: bus line, taxi company, rental, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transportation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Discriminator, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub contact_info: Map<String, Value>,
    pub operating_hours: Map<String, Value>,
    pub images: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for Transportation {
    const RESOURCE: Resource = Resource::Transportation;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            name: text(raw, "name"),
            kind: text(raw, "type"),
            description: text(raw, "description"),
            contact_info: object(raw, "contact_info"),
            operating_hours: object(raw, "operating_hours"),
            images: text_list(raw, "images"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A locally owned business promoted by the "support local" section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportLocal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub website: String,
    pub location: String,
    pub contact_info: Map<String, Value>,
    pub images: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for SupportLocal {
    const RESOURCE: Resource = Resource::SupportLocals;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            name: text(raw, "name"),
            description: text(raw, "description"),
            category: text(raw, "category"),
            website: text(raw, "website"),
            location: text(raw, "location"),
            contact_info: object(raw, "contact_info"),
            images: text_list(raw, "images"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoChallenge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub hashtag: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub active: bool,
    pub code_snippet: String,
}

impl CanonicalRecord for PhotoChallenge {
    const RESOURCE: Resource = Resource::PhotoChallenges;

    fn from_raw(raw: &Value) -> Self {
        Self {
            id: record_id(raw),
            title: text_any(raw, &["title", "name"]),
            description: text(raw, "description"),
            location: text(raw, "location"),
            hashtag: text(raw, "hashtag"),
            images: text_list(raw, "images"),
            tags: text_list(raw, "tags"),
            featured: flag(raw, "featured"),
            active: flag(raw, "active"),
            code_snippet: text(raw, "code_snippet"),
        }
    }

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restaurant_full_record() {
        let raw = json!({
            "id": 12,
            "name": "Zeerovers",
            "description": "Fresh catch at the pier",
            "cuisine_types": ["seafood", "local"],
            "price_range": "$",
            "images": "zeerovers.jpg",
            "featured": true,
            "contact_info": {"phone": "+297 000 0000"},
            "operating_hours": {"mon": "closed"},
            "code_snippet": "<iframe></iframe>"
        });
        let restaurant = Restaurant::from_raw(&raw);
        assert_eq!(restaurant.id, Some(RecordId::Int(12)));
        assert_eq!(restaurant.cuisine_types, vec!["seafood", "local"]);
        assert_eq!(restaurant.images, vec!["zeerovers.jpg"]);
        assert!(restaurant.featured);
        assert_eq!(restaurant.operating_hours.get("mon"), Some(&json!("closed")));
    }

    #[test]
    fn test_transportation_type_field() {
        let raw = json!({"id": "bus-1", "name": "Arubus", "type": "bus"});
        let transport = Transportation::from_raw(&raw);
        assert_eq!(transport.kind, "bus");
        assert_eq!(serde_json::to_value(&transport).unwrap()["type"], json!("bus"));
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let tour = Tour::from_raw(&json!({"id": 1, "name": "Sunset sail"}));
        assert_eq!(tour.title, "Sunset sail");

        let event = CulturalEvent::from_raw(&json!({"event_date": "2026-02-14"}));
        assert_eq!(event.date, "2026-02-14");
    }

    #[test]
    fn test_non_object_input_is_fully_defaulted() {
        assert_eq!(PhotoChallenge::from_raw(&json!(42)), PhotoChallenge::default());
        assert_eq!(SupportLocal::from_raw(&Value::Null), SupportLocal::default());
        assert_eq!(LocalExperience::from_raw(&json!(["x"])), LocalExperience::default());
    }

    #[test]
    fn test_missing_id_is_omitted_when_serialized() {
        let value = serde_json::to_value(Restaurant::from_raw(&json!({"name": "A"}))).unwrap();
        assert!(value.get("id").is_none());
    }
}
