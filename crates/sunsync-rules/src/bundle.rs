//! The named configuration bundles and their equipment checklists.

use serde::{Deserialize, Serialize};

/// A named equipment-requirement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleId {
    /// AC coupled, grid-only charging, with backup.
    A1,
    /// AC coupled, grid-only charging, power control system instead of backup.
    A2,
    /// AC coupled, grid-or-renewable, multiple batteries, with backup.
    B1,
    /// AC coupled, grid-or-renewable, power control system.
    B2,
    /// AC coupled, grid-or-renewable, single battery, with backup.
    B3,
    /// AC coupled, grid-or-renewable, standard (no backup).
    B4,
    /// AC coupled, grid-or-renewable, multiple batteries, power control system.
    B5,
    /// DC coupled hybrid, peak shaving only.
    C1,
    /// DC coupled hybrid, peak shaving with backup.
    C2,
    /// Standby battery only.
    D,
    /// Solar without storage; utility-specific BOS applies.
    PvUtility,
    /// Storage under a utility with no published ESS decision tree.
    UtilityDefaultEss,
}

/// One form section a bundle calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionItem {
    Solar,
    Inverter,
    Battery,
    SecondBattery,
    BatteryCombinerPanel,
    BackupLoadSubPanel,
    Gateway,
    Sms,
    EssCombiner,
    StringCombinerPanel,
}

impl SectionItem {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Solar => "Solar Panels",
            Self::Inverter => "Inverter",
            Self::Battery => "Battery",
            Self::SecondBattery => "Second Battery",
            Self::BatteryCombinerPanel => "Battery Combiner Panel",
            Self::BackupLoadSubPanel => "Backup Load Sub-Panel",
            Self::Gateway => "Gateway",
            Self::Sms => "SMS",
            Self::EssCombiner => "ESS Helper/Combiner Card",
            Self::StringCombinerPanel => "String Combiner Panel",
        }
    }
}

/// Inverter requirements by role; a bundle can mix roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InverterCounts {
    pub grid_following: u8,
    pub grid_forming_following: u8,
    pub hybrid: u8,
}

/// The human-facing equipment checklist for one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checklist {
    pub sections: &'static [SectionItem],
    /// Which of the six utility BOS types the bundle calls for.
    pub bos_types: [bool; 6],
    pub battery_quantity: u8,
    pub inverters: InverterCounts,
}

impl Checklist {
    /// Display lines for presentation, sections first then BOS types.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .sections
            .iter()
            .map(|s| s.display_name().to_string())
            .collect();
        for (i, required) in self.bos_types.iter().enumerate() {
            if *required {
                lines.push(format!("BOS Type {}", i + 1));
            }
        }
        lines
    }
}

use SectionItem::{
    BackupLoadSubPanel, Battery, BatteryCombinerPanel, EssCombiner, Gateway, Inverter, Solar,
    StringCombinerPanel,
};

const fn counts(grid_following: u8, grid_forming_following: u8, hybrid: u8) -> InverterCounts {
    InverterCounts {
        grid_following,
        grid_forming_following,
        hybrid,
    }
}

static A1_CHECKLIST: Checklist = Checklist {
    sections: &[Inverter, Battery, BackupLoadSubPanel, Gateway, EssCombiner],
    bos_types: [true, true, true, false, false, false],
    battery_quantity: 1,
    inverters: counts(0, 1, 0),
};

static A2_CHECKLIST: Checklist = Checklist {
    sections: &[Inverter, Battery, EssCombiner],
    bos_types: [true, true, false, false, false, false],
    battery_quantity: 1,
    inverters: counts(1, 0, 0),
};

static B1_CHECKLIST: Checklist = Checklist {
    sections: &[
        Solar,
        Inverter,
        Battery,
        BatteryCombinerPanel,
        BackupLoadSubPanel,
        Gateway,
        EssCombiner,
        StringCombinerPanel,
    ],
    bos_types: [true, true, true, true, false, false],
    battery_quantity: 2,
    inverters: counts(1, 2, 0),
};

static B2_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, EssCombiner],
    bos_types: [true, true, false, false, false, false],
    battery_quantity: 1,
    inverters: counts(2, 0, 0),
};

static B3_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, BackupLoadSubPanel, Gateway, EssCombiner],
    bos_types: [true, true, true, false, false, false],
    battery_quantity: 1,
    inverters: counts(1, 1, 0),
};

static B4_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, BatteryCombinerPanel, EssCombiner],
    bos_types: [true, true, false, false, false, false],
    battery_quantity: 1,
    inverters: counts(2, 0, 0),
};

static B5_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, EssCombiner],
    bos_types: [true, true, false, false, false, false],
    battery_quantity: 2,
    inverters: counts(2, 0, 0),
};

static C1_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, BackupLoadSubPanel, EssCombiner],
    bos_types: [true, true, true, false, false, false],
    battery_quantity: 1,
    inverters: counts(0, 0, 1),
};

static C2_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, Battery, BackupLoadSubPanel, Gateway, EssCombiner],
    bos_types: [true, true, true, false, false, false],
    battery_quantity: 1,
    inverters: counts(0, 0, 1),
};

static D_CHECKLIST: Checklist = Checklist {
    sections: &[Inverter, Battery, BackupLoadSubPanel, Gateway],
    bos_types: [true, false, false, false, false, false],
    battery_quantity: 1,
    inverters: counts(0, 1, 0),
};

// BOS requirements for these two come from the utility, not the bundle.
static PV_UTILITY_CHECKLIST: Checklist = Checklist {
    sections: &[Solar, Inverter, StringCombinerPanel],
    bos_types: [false; 6],
    battery_quantity: 0,
    inverters: counts(1, 0, 0),
};

static UTILITY_DEFAULT_ESS_CHECKLIST: Checklist = Checklist {
    sections: &[
        Solar,
        Inverter,
        Battery,
        BackupLoadSubPanel,
        Gateway,
        EssCombiner,
        StringCombinerPanel,
    ],
    bos_types: [false; 6],
    battery_quantity: 1,
    inverters: counts(1, 1, 0),
};

impl BundleId {
    /// The short identifier the utility paperwork uses.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::A1 => "A-1",
            Self::A2 => "A-2",
            Self::B1 => "B-1",
            Self::B2 => "B-2",
            Self::B3 => "B-3",
            Self::B4 => "B-4",
            Self::B5 => "B-5",
            Self::C1 => "C-1",
            Self::C2 => "C-2",
            Self::D => "D",
            Self::PvUtility => "PV-UTILITY",
            Self::UtilityDefaultEss => "UTILITY-DEFAULT-ESS",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::A1 => "AC Coupled A-1",
            Self::A2 => "AC Coupled A-2",
            Self::B1 => "AC Coupled B-1",
            Self::B2 => "AC Coupled B-2",
            Self::B3 => "AC Coupled B-3",
            Self::B4 => "AC Coupled B-4",
            Self::B5 => "AC Coupled B-5",
            Self::C1 => "DC Coupled Hybrid C-1",
            Self::C2 => "DC Coupled Hybrid C-2",
            Self::D => "Standby Battery Configuration",
            Self::PvUtility => "PV-Only System",
            Self::UtilityDefaultEss => "Utility Default ESS",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::A1 => "Battery charged from grid only with backup power capability",
            Self::A2 => {
                "Battery charged from grid only with Power Control System (PCS/curtailment)"
            }
            Self::B1 => {
                "Battery charged from grid or renewable with multiple batteries (qty > 1) and backup"
            }
            Self::B2 => "Battery charged from grid or renewable with PCS (curtailment)",
            Self::B3 => "Battery charged from grid or renewable with single battery and backup",
            Self::B4 => "Battery charged from grid or renewable (standard configuration)",
            Self::B5 => {
                "Battery charged from grid or renewable with multiple batteries (qty > 1) and PCS"
            }
            Self::C1 => "DC coupled hybrid system with peak shaving capability",
            Self::C2 => "DC coupled hybrid system with peak shaving and backup power",
            Self::D => "Standby battery system without renewable energy sources",
            Self::PvUtility => {
                "Solar PV system without battery storage - uses utility-specific BOS requirements"
            }
            Self::UtilityDefaultEss => {
                "Standard ESS configuration for utilities without specific ESS requirements"
            }
        }
    }

    #[must_use]
    pub fn checklist(self) -> &'static Checklist {
        match self {
            Self::A1 => &A1_CHECKLIST,
            Self::A2 => &A2_CHECKLIST,
            Self::B1 => &B1_CHECKLIST,
            Self::B2 => &B2_CHECKLIST,
            Self::B3 => &B3_CHECKLIST,
            Self::B4 => &B4_CHECKLIST,
            Self::B5 => &B5_CHECKLIST,
            Self::C1 => &C1_CHECKLIST,
            Self::C2 => &C2_CHECKLIST,
            Self::D => &D_CHECKLIST,
            Self::PvUtility => &PV_UTILITY_CHECKLIST,
            Self::UtilityDefaultEss => &UTILITY_DEFAULT_ESS_CHECKLIST,
        }
    }
}

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
