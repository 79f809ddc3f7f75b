//! The pure classifier: snapshot facts in, bundle (or sentinel) out.

use crate::bundle::BundleId;
use crate::snapshot::{ChargingSource, CouplingType, EquipmentSnapshot};

/// Outcome of classifying a snapshot. Both sentinels are ordinary answers,
/// never errors: `NoneRequired` is a terminal acceptable state and
/// `Indeterminate` just means the form is not far enough along yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Classification {
    Bundle(BundleId),
    /// The utility requires no balance-of-system equipment.
    NoneRequired,
    /// Not enough facts to classify, e.g. no inverter chosen yet.
    Indeterminate,
}

/// Classify the aggregate equipment state. Total and pure.
#[must_use]
pub fn classify(snapshot: &EquipmentSnapshot) -> Classification {
    if snapshot.utility.requires_no_bos() {
        return Classification::NoneRequired;
    }

    if !snapshot.has_battery() {
        return if snapshot.has_solar {
            Classification::Bundle(BundleId::PvUtility)
        } else {
            Classification::Indeterminate
        };
    }

    // Storage present: only APS publishes its own decision tree; everyone
    // else gets the generic storage bundle.
    if snapshot.utility.is_aps() && snapshot.utility.supports_ess {
        aps_storage(snapshot)
    } else {
        Classification::Bundle(BundleId::UtilityDefaultEss)
    }
}

/// The Arizona Public Service storage tree (configurations A-1 through D).
fn aps_storage(snapshot: &EquipmentSnapshot) -> Classification {
    if snapshot.is_standby_only() {
        return Classification::Bundle(BundleId::D);
    }

    let Some(coupling) = snapshot.coupling_type() else {
        return Classification::Indeterminate;
    };

    if coupling == CouplingType::Dc
        && snapshot.has_solar
        && snapshot.supports_peak_shaving()
    {
        return Classification::Bundle(if snapshot.requires_backup_power() {
            BundleId::C2
        } else {
            BundleId::C1
        });
    }

    if coupling == CouplingType::Ac {
        match snapshot.charging_source {
            ChargingSource::GridOnly => {
                return Classification::Bundle(if snapshot.requires_backup_power() {
                    BundleId::A1
                } else {
                    BundleId::A2
                });
            }
            // Renewable charging without solar is an inconsistent snapshot
            // (nothing to charge from), so it falls through to Indeterminate.
            ChargingSource::GridOrRenewable if snapshot.has_solar => {
                let bundle = match (
                    snapshot.requires_backup_power(),
                    snapshot.has_multiple_batteries(),
                ) {
                    (true, true) => BundleId::B1,
                    (true, false) => BundleId::B3,
                    (false, true) => BundleId::B5,
                    (false, false) => BundleId::B4,
                };
                return Classification::Bundle(bundle);
            }
            ChargingSource::GridOrRenewable => {}
        }
    }

    Classification::Indeterminate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BackupOption, InverterKind, UtilityRequirements};

    fn aps(
        has_solar: bool,
        inverter: Option<InverterKind>,
        battery_quantity: u32,
        charging_source: ChargingSource,
        backup: BackupOption,
    ) -> EquipmentSnapshot {
        EquipmentSnapshot {
            utility: UtilityRequirements::new("APS", "Series").with_ess_support(),
            has_solar,
            inverter,
            battery_quantity,
            charging_source,
            backup,
        }
    }

    #[test]
    fn no_bos_utility_requires_nothing() {
        let mut snapshot = aps(
            true,
            Some(InverterKind::Hybrid),
            2,
            ChargingSource::GridOrRenewable,
            BackupOption::WholeHome,
        );
        snapshot.utility = UtilityRequirements::new("APS", "No BOS");
        assert_eq!(classify(&snapshot), Classification::NoneRequired);
    }

    #[test]
    fn solar_without_battery_is_pv_only() {
        let snapshot = aps(
            true,
            Some(InverterKind::GridFollowing),
            0,
            ChargingSource::GridOnly,
            BackupOption::None,
        );
        assert_eq!(classify(&snapshot), Classification::Bundle(BundleId::PvUtility));
    }

    #[test]
    fn nothing_selected_is_indeterminate() {
        let snapshot = aps(false, None, 0, ChargingSource::GridOnly, BackupOption::None);
        assert_eq!(classify(&snapshot), Classification::Indeterminate);
    }

    #[test]
    fn standby_battery_is_d() {
        let snapshot = aps(
            false,
            Some(InverterKind::GridFormingFollowing),
            1,
            ChargingSource::GridOnly,
            BackupOption::WholeHome,
        );
        assert_eq!(classify(&snapshot), Classification::Bundle(BundleId::D));
    }

    #[test]
    fn dc_coupled_splits_on_backup() {
        let with_backup = aps(
            true,
            Some(InverterKind::Hybrid),
            1,
            ChargingSource::GridOrRenewable,
            BackupOption::WholeHome,
        );
        assert_eq!(classify(&with_backup), Classification::Bundle(BundleId::C2));

        let no_backup = aps(
            true,
            Some(InverterKind::Hybrid),
            1,
            ChargingSource::GridOrRenewable,
            BackupOption::None,
        );
        assert_eq!(classify(&no_backup), Classification::Bundle(BundleId::C1));
    }

    #[test]
    fn grid_only_ac_splits_on_backup() {
        let with_backup = aps(
            true,
            Some(InverterKind::GridFormingFollowing),
            1,
            ChargingSource::GridOnly,
            BackupOption::PartialHome,
        );
        assert_eq!(classify(&with_backup), Classification::Bundle(BundleId::A1));

        let no_backup = aps(
            true,
            Some(InverterKind::GridFollowing),
            1,
            ChargingSource::GridOnly,
            BackupOption::None,
        );
        assert_eq!(classify(&no_backup), Classification::Bundle(BundleId::A2));
    }

    #[test]
    fn grid_or_renewable_ac_splits_on_backup_and_quantity() {
        let cases = [
            (BackupOption::WholeHome, 2, BundleId::B1),
            (BackupOption::WholeHome, 1, BundleId::B3),
            (BackupOption::None, 2, BundleId::B5),
            (BackupOption::None, 1, BundleId::B4),
        ];
        for (backup, quantity, expected) in cases {
            let snapshot = aps(
                true,
                Some(InverterKind::GridFormingFollowing),
                quantity,
                ChargingSource::GridOrRenewable,
                backup,
            );
            assert_eq!(classify(&snapshot), Classification::Bundle(expected));
        }
    }

    #[test]
    fn renewable_charging_without_solar_stays_indeterminate() {
        // Battery and AC inverter chosen, solar not entered yet. A B-bundle
        // prompt here would be premature.
        let snapshot = aps(
            false,
            Some(InverterKind::GridFormingFollowing),
            1,
            ChargingSource::GridOrRenewable,
            BackupOption::WholeHome,
        );
        assert_eq!(classify(&snapshot), Classification::Indeterminate);
    }

    #[test]
    fn battery_without_inverter_is_indeterminate() {
        let snapshot = aps(
            true,
            None,
            1,
            ChargingSource::GridOrRenewable,
            BackupOption::WholeHome,
        );
        assert_eq!(classify(&snapshot), Classification::Indeterminate);
    }

    #[test]
    fn non_aps_storage_gets_the_utility_default() {
        let snapshot = EquipmentSnapshot {
            utility: UtilityRequirements::new("SRP", "Series"),
            has_solar: true,
            inverter: Some(InverterKind::GridFormingFollowing),
            battery_quantity: 1,
            charging_source: ChargingSource::GridOrRenewable,
            backup: BackupOption::WholeHome,
        };
        assert_eq!(
            classify(&snapshot),
            Classification::Bundle(BundleId::UtilityDefaultEss)
        );
    }
}
