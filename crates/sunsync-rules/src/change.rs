//! Checklist diffs between two bundles.

use serde::{Deserialize, Serialize};

use crate::bundle::{BundleId, InverterCounts, SectionItem};

/// One piece of equipment swapped for another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// What switching from one bundle to another means in equipment terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub from: BundleId,
    pub to: BundleId,
    pub removed: Vec<String>,
    pub added: Vec<String>,
    pub replaced: Vec<Replacement>,
}

impl ChangeRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.replaced.is_empty()
    }
}

const DIFFED_SECTIONS: &[SectionItem] = &[
    SectionItem::Solar,
    SectionItem::Inverter,
    SectionItem::Battery,
    SectionItem::SecondBattery,
    SectionItem::BatteryCombinerPanel,
    SectionItem::BackupLoadSubPanel,
    SectionItem::Gateway,
    SectionItem::Sms,
    SectionItem::EssCombiner,
    SectionItem::StringCombinerPanel,
];

/// Compute the removed/added/replaced equipment lists between two bundles'
/// checklists.
#[must_use]
pub fn diff(from: BundleId, to: BundleId) -> ChangeRecord {
    let old = from.checklist();
    let new = to.checklist();

    let mut removed = Vec::new();
    let mut added = Vec::new();
    let mut replaced = Vec::new();

    for i in 0..6 {
        match (old.bos_types[i], new.bos_types[i]) {
            (true, false) => removed.push(format!("BOS Type {}", i + 1)),
            (false, true) => added.push(format!("BOS Type {}", i + 1)),
            _ => {}
        }
    }

    for section in DIFFED_SECTIONS {
        let was = old.sections.contains(section);
        let is = new.sections.contains(section);
        match (was, is) {
            (true, false) => removed.push(section.display_name().to_string()),
            (false, true) => added.push(section.display_name().to_string()),
            _ => {}
        }
    }

    if let Some(swap) = inverter_replacement(old.inverters, new.inverters) {
        replaced.push(swap);
    }

    if old.battery_quantity != new.battery_quantity {
        replaced.push(Replacement {
            from: format!("{} Battery(ies)", old.battery_quantity),
            to: format!("{} Battery(ies)", new.battery_quantity),
        });
    }

    ChangeRecord {
        from,
        to,
        removed,
        added,
        replaced,
    }
}

/// A role the old bundle required going to zero while another role appears
/// counts as a swap, not a remove-and-add.
fn inverter_replacement(old: InverterCounts, new: InverterCounts) -> Option<Replacement> {
    const HYBRID: &str = "Hybrid Inverter";
    const FORMING: &str = "Grid Forming/Following Inverter";
    const FOLLOWING: &str = "Grid Following Inverter";

    let swap = |from: &str, to: &str| {
        Some(Replacement {
            from: from.to_string(),
            to: to.to_string(),
        })
    };

    if old.hybrid > 0 && new.hybrid == 0 {
        if new.grid_forming_following > 0 {
            return swap(HYBRID, FORMING);
        }
        if new.grid_following > 0 {
            return swap(HYBRID, FOLLOWING);
        }
    } else if old.grid_forming_following > 0 && new.grid_forming_following == 0 {
        if new.hybrid > 0 {
            return swap(FORMING, HYBRID);
        }
        if new.grid_following > 0 {
            return swap(FORMING, FOLLOWING);
        }
    } else if old.grid_following > 0 && new.grid_following == 0 {
        if new.hybrid > 0 {
            return swap(FOLLOWING, HYBRID);
        }
        if new.grid_forming_following > 0 {
            return swap(FOLLOWING, FORMING);
        }
    }
    None
}
