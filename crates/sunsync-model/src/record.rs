//! Records exchanged with the persistence and catalog collaborators.

use crate::ids::RecordId;
use crate::payload::Payload;

/// The remote system-details record a section hydrates from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RemoteRecord {
    /// Server-side record id, echoed back in save payloads when present.
    pub id: Option<RecordId>,
    /// Raw instance-prefixed column values.
    pub fields: Payload,
}

impl RemoteRecord {
    #[must_use]
    pub fn new(id: Option<RecordId>, fields: Payload) -> Self {
        Self { id, fields }
    }
}

/// One selectable catalog entry (a manufacturer or a model).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogOption {
    /// Display text.
    pub label: String,
    /// Stable value sent to the persistence layer (uuid when available,
    /// otherwise the label itself).
    pub value: String,
    /// Numeric catalog id, present for models only.
    pub id: Option<i64>,
}

impl CatalogOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Catalog rows without a uuid fall back to the label as their value.
    #[must_use]
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
            id: None,
        }
    }

    /// Whether `needle` matches this option by value or by label. Preferred
    /// equipment rows store display names, catalog rows store uuids, so a
    /// match on either side counts.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.value == needle || self.label == needle
    }
}

/// A company's ranked preference for one make/model pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreferredEquipment {
    pub make: String,
    pub model: String,
    /// Marks the company default; at most one per equipment type.
    #[serde(default)]
    pub is_default: bool,
}

impl PreferredEquipment {
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            is_default: false,
        }
    }

    #[must_use]
    pub fn default_choice(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(make, model)
        }
    }
}
