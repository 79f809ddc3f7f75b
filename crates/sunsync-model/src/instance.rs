//! Repeated system instances.
//!
//! A survey form can describe up to four structurally-identical PV systems.
//! Every system-scoped database column carries an instance prefix
//! (`sys1_solar_panel_make`, `sys2_solar_panel_make`, ...). Canonical field
//! names are written against `sys1_`; [`crate::field::remap`] rewrites them
//! for the instance a section is currently bound to.

/// One of the repeated "System N" groups of the form.
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
pub enum Instance {
    Sys1,
    Sys2,
    Sys3,
    Sys4,
}

impl Instance {
    /// All instances, in form order.
    pub const ALL: [Self; 4] = [Self::Sys1, Self::Sys2, Self::Sys3, Self::Sys4];

    /// The database column prefix for this instance.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Sys1 => "sys1_",
            Self::Sys2 => "sys2_",
            Self::Sys3 => "sys3_",
            Self::Sys4 => "sys4_",
        }
    }

    /// Human-readable tab label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sys1 => "System 1",
            Self::Sys2 => "System 2",
            Self::Sys3 => "System 3",
            Self::Sys4 => "System 4",
        }
    }

    /// 1-based system number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Sys1 => 1,
            Self::Sys2 => 2,
            Self::Sys3 => 3,
            Self::Sys4 => 4,
        }
    }

    /// Whether this is the canonical first instance.
    #[must_use]
    pub fn is_first(self) -> bool {
        matches!(self, Self::Sys1)
    }
}
