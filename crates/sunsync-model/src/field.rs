//! Canonical field names and instance remapping.
//!
//! Section code is written once against the canonical first instance: every
//! system-scoped column name starts with `sys1_`. Binding a section to a
//! different instance rewrites that prefix. A handful of columns are
//! irregular: the schema drops an underscore for non-first instances
//! (`sys1_solar_panel_existing` but `sys2_solarpanel_existing`). Those
//! irregularities live in [`SCHEMA_OVERRIDES`]; adding one is a table edit,
//! not a new code path.
//!
//! Names that do not carry the canonical prefix are instance-agnostic
//! (`bls1_backup_load_sub_panel_make`, `utility_name`, ...) and pass through
//! every remap unchanged.

use std::fmt;

use thiserror::Error;

use crate::Instance;
use crate::payload::Payload;

/// Substring rewrites applied after the prefix swap, only for non-first
/// instances. Left side must include the surrounding underscores so the
/// match cannot fire inside an unrelated column name.
const SCHEMA_OVERRIDES: &[(&str, &str)] = &[("_solar_panel_existing", "_solarpanel_existing")];

/// Errors raised while validating canonical field names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// Name was empty.
    #[error("canonical field name is empty")]
    Empty,

    /// Name contained a character outside `[a-z0-9_]`.
    #[error("canonical field name {name:?} contains invalid character {found:?}")]
    InvalidCharacter { name: String, found: char },
}

/// A validated canonical field name.
///
/// Canonical names are lowercase snake_case column names, written against
/// the `sys1_` namespace (or no instance namespace at all).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalField(String);

impl CanonicalField {
    pub fn new(name: impl Into<String>) -> Result<Self, FieldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldError::Empty);
        }
        if let Some(found) = name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
        {
            return Err(FieldError::InvalidCharacter { name, found });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name is scoped to the canonical first instance.
    #[must_use]
    pub fn is_instance_scoped(&self) -> bool {
        self.0.starts_with(Instance::Sys1.prefix())
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CanonicalField {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CanonicalField> for String {
    fn from(value: CanonicalField) -> Self {
        value.0
    }
}

/// Rewrite a canonical field name for the given instance.
///
/// Instance-agnostic names come back unchanged. Total over any validated
/// name: a name with no override entry is still remapped by the generic
/// prefix rule.
#[must_use]
pub fn remap(field: &CanonicalField, instance: Instance) -> String {
    if !field.is_instance_scoped() {
        return field.0.clone();
    }
    let suffix = &field.0[Instance::Sys1.prefix().len()..];
    let mut name = format!("{}{}", instance.prefix(), suffix);
    if !instance.is_first() {
        for (from, to) in SCHEMA_OVERRIDES {
            if name.contains(from) {
                name = name.replace(from, to);
            }
        }
    }
    name
}

/// Remap every key of a canonical payload, preserving values.
///
/// Keys that fail canonical validation are remapped by the generic prefix
/// rule alone; payloads built by [`crate::entity::EntityFields`] never hit
/// that path.
#[must_use]
pub fn remap_payload(payload: &Payload, instance: Instance) -> Payload {
    let out: Payload = payload
        .iter()
        .map(|(key, value)| {
            let mapped = match CanonicalField::new(key) {
                Ok(field) => remap(&field, instance),
                Err(_) => key.replacen(Instance::Sys1.prefix(), instance.prefix(), 1),
            };
            (mapped, value.clone())
        })
        .collect();
    tracing::debug!(
        instance = instance.label(),
        before = ?payload.keys().collect::<Vec<_>>(),
        after = ?out.keys().collect::<Vec<_>>(),
        "remapped payload keys"
    );
    out
}
