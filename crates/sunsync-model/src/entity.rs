//! Equipment entity types and their database field tables.
//!
//! Each section of the form edits one entity type. The table below records,
//! per type, which columns hold the make/model/quantity/existing-flag/id and
//! which related columns must be cleared together with them. Field names are
//! canonical (written against the `sys1_` namespace); the backup load
//! sub-panel lives in its own `bls1_` namespace and is instance-agnostic.

use crate::FieldValue;
use crate::payload::Payload;

/// The kinds of equipment a section can edit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum EntityType {
    SolarPanel,
    MicroInverter,
    Optimizer,
    StringCombiner,
    Battery1,
    Battery2,
    EssCombiner,
    StorageManagement,
    BackupSubpanel,
}

/// Column table for one entity type. Suffixes are joined to the namespace
/// prefix to form canonical field names.
#[derive(Debug, Clone, Copy)]
pub struct EntityFields {
    /// Equipment type label used by the catalog API.
    pub api_label: &'static str,
    namespace: &'static str,
    make: &'static str,
    model: &'static str,
    qty: Option<&'static str>,
    existing: Option<&'static str>,
    id: Option<&'static str>,
    additional: &'static [&'static str],
}

impl EntityFields {
    #[must_use]
    pub fn make_column(&self) -> String {
        format!("{}{}", self.namespace, self.make)
    }

    #[must_use]
    pub fn model_column(&self) -> String {
        format!("{}{}", self.namespace, self.model)
    }

    #[must_use]
    pub fn qty_column(&self) -> Option<String> {
        self.qty.map(|s| format!("{}{}", self.namespace, s))
    }

    #[must_use]
    pub fn existing_column(&self) -> Option<String> {
        self.existing.map(|s| format!("{}{}", self.namespace, s))
    }

    #[must_use]
    pub fn id_column(&self) -> Option<String> {
        self.id.map(|s| format!("{}{}", self.namespace, s))
    }

    /// Every column this entity owns, canonical names.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut cols = vec![self.make_column(), self.model_column()];
        cols.extend(self.qty_column());
        cols.extend(self.existing_column());
        cols.extend(self.id_column());
        cols.extend(
            self.additional
                .iter()
                .map(|s| format!("{}{}", self.namespace, s)),
        );
        cols
    }

    /// Payload of explicit nulls for every column: the "remove this
    /// equipment" write.
    #[must_use]
    pub fn clear_payload(&self) -> Payload {
        self.columns()
            .into_iter()
            .map(|c| (c, FieldValue::Null))
            .collect()
    }

    /// Payload clearing the columns that become stale when a different make
    /// is picked: model, record id, and the dependent rating/location
    /// columns.
    #[must_use]
    pub fn make_change_clears(&self) -> Payload {
        let mut payload = Payload::new().with(self.model_column(), FieldValue::Null);
        if let Some(id) = self.id_column() {
            payload.set(id, FieldValue::Null);
        }
        for extra in self.additional {
            payload.set(format!("{}{}", self.namespace, extra), FieldValue::Null);
        }
        payload
    }
}

impl EntityType {
    pub const ALL: [Self; 9] = [
        Self::SolarPanel,
        Self::MicroInverter,
        Self::Optimizer,
        Self::StringCombiner,
        Self::Battery1,
        Self::Battery2,
        Self::EssCombiner,
        Self::StorageManagement,
        Self::BackupSubpanel,
    ];

    /// The column table for this entity type.
    #[must_use]
    pub fn fields(self) -> &'static EntityFields {
        match self {
            Self::SolarPanel => &EntityFields {
                api_label: "Solar Panel",
                namespace: "sys1_",
                make: "solar_panel_make",
                model: "solar_panel_model",
                qty: Some("solar_panel_qty"),
                existing: Some("solar_panel_existing"),
                id: Some("solarpanel_id"),
                additional: &[],
            },
            Self::MicroInverter => &EntityFields {
                api_label: "Microinverter",
                namespace: "sys1_",
                make: "micro_inverter_make",
                model: "micro_inverter_model",
                qty: Some("micro_inverter_qty"),
                existing: Some("micro_inverter_existing"),
                id: Some("micro_inverter_id"),
                additional: &[],
            },
            Self::Optimizer => &EntityFields {
                api_label: "Optimizer",
                namespace: "sys1_",
                make: "optimizer_make",
                model: "optimizer_model",
                qty: Some("optimizer_qty"),
                existing: Some("optimizer_existing"),
                id: Some("optimizer_id"),
                additional: &[],
            },
            Self::StringCombiner => &EntityFields {
                api_label: "String Combiner Panel",
                namespace: "sys1_",
                make: "combiner_panel_make",
                model: "combiner_panel_model",
                qty: None,
                existing: Some("combiner_existing"),
                id: Some("combinerpanel_id"),
                additional: &["combinerpanel_bus_rating", "combinerpanel_main_breaker_rating"],
            },
            Self::Battery1 => &EntityFields {
                api_label: "Battery Storage",
                namespace: "sys1_",
                make: "battery_1_make",
                model: "battery_1_model",
                qty: Some("battery_1_qty"),
                existing: Some("battery1_existing"),
                id: Some("battery1_id"),
                additional: &["battery1_tie_in_location"],
            },
            Self::Battery2 => &EntityFields {
                api_label: "Battery Storage",
                namespace: "sys1_",
                make: "battery_2_make",
                model: "battery_2_model",
                qty: Some("battery_2_qty"),
                existing: Some("battery2_existing"),
                id: Some("battery2_id"),
                additional: &["battery2_tie_in_location"],
            },
            Self::EssCombiner => &EntityFields {
                api_label: "ESS Combiner",
                namespace: "sys1_",
                make: "ess_make",
                model: "ess_model",
                qty: None,
                existing: Some("ess_existing"),
                id: Some("ess_id"),
                additional: &[
                    "ess_main_breaker_rating",
                    "ess_upstream_breaker_rating",
                    "ess_upstream_breaker_location",
                ],
            },
            Self::StorageManagement => &EntityFields {
                api_label: "Storage Management System",
                namespace: "sys1_",
                make: "sms_make",
                model: "sms_model",
                qty: None,
                existing: Some("sms_existing"),
                id: Some("sms_id"),
                additional: &[
                    "sms_breaker_rating",
                    "sms_rsd_enabled",
                    "sms_backup_load_sub_panel_breaker_rating",
                    "sms_pv_breaker_rating_override",
                    "sms_ess_breaker_rating_override",
                    "sms_tie_in_breaker_rating_override",
                ],
            },
            Self::BackupSubpanel => &EntityFields {
                api_label: "Load Center",
                namespace: "bls1_",
                make: "backup_load_sub_panel_make",
                model: "backup_load_sub_panel_model",
                qty: None,
                existing: Some("backuploader_existing"),
                id: Some("backupload_sub_panel_id"),
                additional: &[
                    "backuploader_bus_bar_rating",
                    "backuploader_main_breaker_rating",
                    "backuploader_upstream_breaker_rating",
                ],
            },
        }
    }

    /// Equipment-type slug for the preferred-equipment API.
    #[must_use]
    pub fn preferred_slug(self) -> &'static str {
        match self {
            Self::SolarPanel => "solar-panels",
            Self::MicroInverter => "micro-inverters",
            Self::Optimizer => "optimizers",
            Self::StringCombiner => "string-combiners",
            Self::Battery1 | Self::Battery2 => "batteries",
            Self::EssCombiner | Self::StorageManagement => "storage",
            Self::BackupSubpanel => "load-centers",
        }
    }
}
