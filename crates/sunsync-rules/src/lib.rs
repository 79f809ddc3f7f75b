//! Configuration rules for energy-storage surveys.
//!
//! A pure classifier maps an [`EquipmentSnapshot`] of the whole form (solar,
//! inverter, battery and backup facts plus the serving utility's balance-of-
//! system requirements) onto a named configuration [`BundleId`], or onto one
//! of two sentinels: nothing required, or not classifiable yet. A
//! [`ConfigSession`] layers the per-project transition handling on top:
//! first-time suggestions, change records against the remembered bundle, and
//! the user's accept / customize / ask-later decisions.

pub mod bundle;
pub mod change;
pub mod classify;
pub mod session;
pub mod snapshot;

pub use bundle::{BundleId, Checklist, InverterCounts, SectionItem};
pub use change::{ChangeRecord, Replacement, diff};
pub use classify::{Classification, classify};
pub use session::{ConfigSession, Evaluation, HistoryEntry};
pub use snapshot::{
    BackupOption, ChargingSource, CouplingType, EquipmentSnapshot, InverterKind,
    UtilityRequirements,
};
