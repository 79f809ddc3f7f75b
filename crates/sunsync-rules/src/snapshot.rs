//! The read-only equipment facts the classifier runs on.
//!
//! A snapshot is rebuilt on demand from the section stores' local state; it
//! is never the source of truth for anything. Derived facts (coupling type,
//! standby-only, peak shaving) are methods rather than stored fields so a
//! snapshot can never carry contradictory values.

use serde::{Deserialize, Serialize};

/// How the battery couples to the rest of the system. Follows directly from
/// the inverter kind: a hybrid inverter means DC coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouplingType {
    Ac,
    Dc,
}

/// Where the battery is allowed to charge from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingSource {
    GridOnly,
    GridOrRenewable,
}

/// The homeowner's backup coverage choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackupOption {
    WholeHome,
    PartialHome,
    #[default]
    None,
}

/// The selected inverter's role in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InverterKind {
    GridFollowing,
    GridFormingFollowing,
    Hybrid,
}

/// What the serving utility declares about balance-of-system equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityRequirements {
    /// Utility display name, e.g. "APS".
    pub name: String,
    /// The utility's declared BOS combination; "No BOS" means no extra
    /// equipment is ever required.
    pub bos_combination: String,
    /// Whether the utility publishes its own energy-storage configurations.
    pub supports_ess: bool,
}

impl UtilityRequirements {
    #[must_use]
    pub fn new(name: impl Into<String>, bos_combination: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bos_combination: bos_combination.into(),
            supports_ess: false,
        }
    }

    #[must_use]
    pub fn with_ess_support(mut self) -> Self {
        self.supports_ess = true;
        self
    }

    /// Whether this is Arizona Public Service, the one utility with a full
    /// storage decision tree of its own.
    #[must_use]
    pub fn is_aps(&self) -> bool {
        let name = self.name.to_ascii_lowercase();
        name.contains("aps") || name.contains("arizona public service")
    }

    #[must_use]
    pub fn requires_no_bos(&self) -> bool {
        self.bos_combination == "No BOS"
    }
}

/// Aggregate equipment facts projected out of the section stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSnapshot {
    pub utility: UtilityRequirements,
    pub has_solar: bool,
    /// None until an inverter has actually been selected.
    pub inverter: Option<InverterKind>,
    pub battery_quantity: u32,
    pub charging_source: ChargingSource,
    pub backup: BackupOption,
}

impl EquipmentSnapshot {
    #[must_use]
    pub fn has_battery(&self) -> bool {
        self.battery_quantity > 0
    }

    /// Multiple units of the same battery type.
    #[must_use]
    pub fn has_multiple_batteries(&self) -> bool {
        self.battery_quantity > 1
    }

    #[must_use]
    pub fn coupling_type(&self) -> Option<CouplingType> {
        self.inverter.map(|kind| match kind {
            InverterKind::Hybrid => CouplingType::Dc,
            _ => CouplingType::Ac,
        })
    }

    /// Battery with no renewable source feeding it.
    #[must_use]
    pub fn is_standby_only(&self) -> bool {
        !self.has_solar && self.charging_source == ChargingSource::GridOnly
    }

    #[must_use]
    pub fn requires_backup_power(&self) -> bool {
        matches!(self.backup, BackupOption::WholeHome | BackupOption::PartialHome)
    }

    /// Peak shaving is a hybrid-inverter feature.
    #[must_use]
    pub fn supports_peak_shaving(&self) -> bool {
        self.inverter == Some(InverterKind::Hybrid)
    }
}
