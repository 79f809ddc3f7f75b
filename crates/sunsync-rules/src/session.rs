//! Per-project configuration session: remembered bundle, pending
//! suggestions, and the user's decisions.
//!
//! One session lives for one project form session and is owned by whoever
//! drives the form. There is no process-wide instance; callers that need
//! sharing hold the session themselves.

use chrono::{DateTime, Utc};

use crate::bundle::BundleId;
use crate::change::{ChangeRecord, diff};
use crate::classify::{Classification, classify};
use crate::snapshot::EquipmentSnapshot;

/// What an evaluation asks the UI to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Nothing to surface: unchanged, unclassifiable, or suppressed.
    NoAction,
    /// First real classification for this session; surface the checklist.
    FirstTime { bundle: BundleId },
    /// Classification moved away from the remembered bundle.
    Changed(ChangeRecord),
}

/// One past evaluation, kept for troubleshooting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub classification: Classification,
}

/// Stateful transition handling over the pure classifier.
#[derive(Debug, Default)]
pub struct ConfigSession {
    remembered: Option<BundleId>,
    pending: Option<BundleId>,
    deferred: bool,
    history: Vec<HistoryEntry>,
}

impl ConfigSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundle the user last accepted, if any.
    #[must_use]
    pub fn remembered(&self) -> Option<BundleId> {
        self.remembered
    }

    /// Seed the remembered bundle, e.g. when resuming a saved project.
    pub fn set_remembered(&mut self, bundle: BundleId) {
        self.remembered = Some(bundle);
    }

    /// The change record a given classification would imply, without
    /// evaluating or mutating anything.
    #[must_use]
    pub fn change_record(&self, bundle: BundleId) -> Option<ChangeRecord> {
        match self.remembered {
            Some(current) if current != bundle => Some(diff(current, bundle)),
            _ => None,
        }
    }

    /// Classify a snapshot and decide what, if anything, to surface.
    pub fn evaluate(&mut self, snapshot: &EquipmentSnapshot) -> Evaluation {
        let classification = classify(snapshot);
        self.history.push(HistoryEntry {
            at: Utc::now(),
            classification,
        });
        tracing::debug!(?classification, remembered = ?self.remembered, "configuration evaluated");

        let Classification::Bundle(bundle) = classification else {
            // Both sentinels are acceptable states, not prompts.
            return Evaluation::NoAction;
        };
        if self.deferred {
            return Evaluation::NoAction;
        }

        match self.remembered {
            None => {
                self.pending = Some(bundle);
                Evaluation::FirstTime { bundle }
            }
            Some(current) if current == bundle => Evaluation::NoAction,
            Some(current) => {
                self.pending = Some(bundle);
                Evaluation::Changed(diff(current, bundle))
            }
        }
    }

    /// Accept the surfaced suggestion; it becomes the remembered bundle.
    pub fn accept(&mut self) {
        if let Some(bundle) = self.pending.take() {
            tracing::info!(%bundle, "configuration accepted");
            self.remembered = Some(bundle);
        }
    }

    /// Discard the suggestion; the user will edit sections by hand. Nothing
    /// is remembered, so the same classification can resurface later.
    pub fn customize(&mut self) {
        self.pending = None;
    }

    /// Stop prompting for the rest of the session. The remembered bundle,
    /// if any, stays.
    pub fn ask_later(&mut self) {
        self.pending = None;
        self.deferred = true;
    }

    /// Back out of a surfaced change; the previously remembered bundle
    /// stands.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forget everything for a new project session. History is kept.
    pub fn reset(&mut self) {
        self.remembered = None;
        self.pending = None;
        self.deferred = false;
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        BackupOption, ChargingSource, InverterKind, UtilityRequirements,
    };

    fn snapshot(backup: BackupOption) -> EquipmentSnapshot {
        EquipmentSnapshot {
            utility: UtilityRequirements::new("APS", "Series").with_ess_support(),
            has_solar: true,
            inverter: Some(InverterKind::GridFormingFollowing),
            battery_quantity: 1,
            charging_source: ChargingSource::GridOrRenewable,
            backup,
        }
    }

    #[test]
    fn first_time_then_no_action_then_change() {
        let mut session = ConfigSession::new();

        // Whole-home backup storage classifies for the first time.
        let first = session.evaluate(&snapshot(BackupOption::WholeHome));
        assert_eq!(first, Evaluation::FirstTime { bundle: BundleId::B3 });
        session.accept();
        assert_eq!(session.remembered(), Some(BundleId::B3));

        // Same facts again: nothing to surface.
        assert_eq!(
            session.evaluate(&snapshot(BackupOption::WholeHome)),
            Evaluation::NoAction
        );

        // Dropping backup coverage surfaces a change record.
        let Evaluation::Changed(record) = session.evaluate(&snapshot(BackupOption::None)) else {
            panic!("expected a change record");
        };
        assert_eq!(record.from, BundleId::B3);
        assert_eq!(record.to, BundleId::B4);
        assert!(record.removed.contains(&"Backup Load Sub-Panel".to_string()));

        // Accepting moves the remembered bundle forward.
        session.accept();
        assert_eq!(session.remembered(), Some(BundleId::B4));
    }

    #[test]
    fn cancel_keeps_the_old_bundle() {
        let mut session = ConfigSession::new();
        session.evaluate(&snapshot(BackupOption::WholeHome));
        session.accept();

        session.evaluate(&snapshot(BackupOption::None));
        session.cancel();
        assert_eq!(session.remembered(), Some(BundleId::B3));

        // The divergence surfaces again on the next evaluation.
        assert!(matches!(
            session.evaluate(&snapshot(BackupOption::None)),
            Evaluation::Changed(_)
        ));
    }

    #[test]
    fn customize_remembers_nothing() {
        let mut session = ConfigSession::new();
        session.evaluate(&snapshot(BackupOption::WholeHome));
        session.customize();
        assert_eq!(session.remembered(), None);

        // Still a first-time suggestion next time around.
        assert!(matches!(
            session.evaluate(&snapshot(BackupOption::WholeHome)),
            Evaluation::FirstTime { .. }
        ));
    }

    #[test]
    fn ask_later_suppresses_without_forgetting() {
        let mut session = ConfigSession::new();
        session.evaluate(&snapshot(BackupOption::WholeHome));
        session.accept();

        session.ask_later();
        assert_eq!(
            session.evaluate(&snapshot(BackupOption::None)),
            Evaluation::NoAction
        );
        assert_eq!(session.remembered(), Some(BundleId::B3));
    }

    #[test]
    fn sentinels_never_prompt() {
        let mut session = ConfigSession::new();
        let mut unclassifiable = snapshot(BackupOption::WholeHome);
        unclassifiable.inverter = None;
        assert_eq!(session.evaluate(&unclassifiable), Evaluation::NoAction);

        let mut no_bos = snapshot(BackupOption::WholeHome);
        no_bos.utility = UtilityRequirements::new("APS", "No BOS");
        assert_eq!(session.evaluate(&no_bos), Evaluation::NoAction);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn preseeded_bundle_yields_a_change_record() {
        let mut session = ConfigSession::new();
        session.set_remembered(BundleId::C2);
        let record = session
            .change_record(BundleId::B3)
            .expect("differing bundle produces a record");
        assert_eq!(record.from, BundleId::C2);
        assert!(session.change_record(BundleId::C2).is_none());
    }
}
