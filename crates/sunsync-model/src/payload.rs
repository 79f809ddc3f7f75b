//! Save payloads and the normalization rules that make diffing them valid.
//!
//! A payload is a flat map of database column name to [`FieldValue`]. The
//! persistence layer distinguishes three intents per column:
//!
//! * key absent: "caller didn't touch this field", never written;
//! * explicit [`FieldValue::Null`]: "clear this field", written as NULL;
//! * any other value: written as-is.
//!
//! [`Payload::filtered`] enforces that contract: it drops empty-string text
//! (placeholder emptiness) while preserving explicit nulls. The section
//! store only ever compares filtered payloads against filtered payloads, so
//! equality checks stay apples-to-apples.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// A single field value in a save payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty-string text is placeholder emptiness, filtered out of payloads.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Default meaningfulness rule: booleans always count, text counts when
    /// non-blank, numbers count when nonzero. Null never counts.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(_) => true,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Optional text helper: `None` becomes an explicit null (clear the column),
/// mirroring how the form writes `make || null`.
impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(s) => Self::Text(s),
            None => Self::Null,
        }
    }
}

/// An ordered column-name → value map.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, FieldValue>);

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert, convenient in section `build_payload` closures.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Drop placeholder emptiness, keep explicit nulls. Idempotent.
    #[must_use]
    pub fn filtered(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, v)| !v.is_empty_text())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Whether any value is an explicit null. Selects the write path: a
    /// payload carrying nulls must go through the explicit-null-capable
    /// endpoint or the clears would be silently ignored.
    #[must_use]
    pub fn contains_null(&self) -> bool {
        self.0.values().any(|v| matches!(v, FieldValue::Null))
    }

    /// Whether any entry passes the supplied meaningfulness policy. Used to
    /// decide if a pre-hydration payload is worth writing at all.
    #[must_use]
    pub fn has_meaningful_value(&self, policy: &MeaningfulPolicy) -> bool {
        self.0.iter().any(|(k, v)| policy.is_meaningful(k, v))
    }
}

impl FromIterator<(String, FieldValue)> for Payload {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Payload {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Shallow payload comparison with snapshot-null semantics: two absent
/// snapshots are equal, an absent snapshot never equals a present one
/// (even an empty one), otherwise key sets and values must match exactly.
#[must_use]
pub fn shallow_equal(a: Option<&Payload>, b: Option<&Payload>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Per-field meaningfulness policy.
///
/// The default rule treats booleans, non-blank text and nonzero numbers as
/// meaningful. Callers whose sections have legitimate zero defaults (or
/// sentinel strings) can override individual fields instead of fighting the
/// default.
#[derive(Default)]
pub struct MeaningfulPolicy {
    overrides: BTreeMap<String, fn(&FieldValue) -> bool>,
}

impl MeaningfulPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rule for one field.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, rule: fn(&FieldValue) -> bool) -> Self {
        self.overrides.insert(field.into(), rule);
        self
    }

    #[must_use]
    pub fn is_meaningful(&self, field: &str, value: &FieldValue) -> bool {
        match self.overrides.get(field) {
            Some(rule) => rule(value),
            None => value.is_meaningful(),
        }
    }
}

impl std::fmt::Debug for MeaningfulPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeaningfulPolicy")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}
