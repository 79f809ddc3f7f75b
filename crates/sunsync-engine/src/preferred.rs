//! Preferred-equipment biasing.
//!
//! A company can rank a subset of the catalog as "preferred". For new
//! equipment the offered lists shrink to that subset (when it is non-empty);
//! for existing equipment the full catalog is always offered, since the
//! survey records whatever is physically on the roof. Bias never restricts
//! correctness: hosts can always fall back to the full lists kept alongside
//! the filtered ones.

use sunsync_model::{CatalogOption, PreferredEquipment};

/// Result of applying the preferred bias to raw catalog lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredOptions {
    pub makes: Vec<CatalogOption>,
    pub models: Vec<CatalogOption>,
    /// Set when the bias narrowed the makes to exactly one preferred entry.
    pub default_make: Option<CatalogOption>,
    /// Set together with `default_make` when that make has a single
    /// preferred model.
    pub default_model: Option<CatalogOption>,
    pub has_preferred: bool,
}

/// Filter catalog options down to the preferred subset.
#[must_use]
pub fn filter_by_preferred(
    all_makes: &[CatalogOption],
    all_models: &[CatalogOption],
    preferred: &[PreferredEquipment],
    is_new: bool,
    selected_make: Option<&str>,
) -> FilteredOptions {
    // Existing equipment, or no preferences on file: offer everything.
    if !is_new || preferred.is_empty() {
        return FilteredOptions {
            makes: all_makes.to_vec(),
            models: all_models.to_vec(),
            ..FilteredOptions::default()
        };
    }

    let makes: Vec<CatalogOption> = all_makes
        .iter()
        .filter(|opt| preferred.iter().any(|p| opt.matches(&p.make)))
        .cloned()
        .collect();

    let models: Vec<CatalogOption> = match selected_make {
        Some(make) => {
            let for_make: Vec<&PreferredEquipment> =
                preferred.iter().filter(|p| p.make == make).collect();
            if for_make.is_empty() {
                all_models.to_vec()
            } else {
                all_models
                    .iter()
                    .filter(|opt| for_make.iter().any(|p| opt.matches(&p.model)))
                    .cloned()
                    .collect()
            }
        }
        None => all_models.to_vec(),
    };

    let mut out = FilteredOptions {
        makes,
        models,
        default_make: None,
        default_model: None,
        has_preferred: true,
    };

    // Auto-select only when the choice is unambiguous: a flagged default
    // whose make is the sole remaining option.
    if let Some(default) = preferred.iter().find(|p| p.is_default)
        && out.makes.len() == 1
        && out.makes[0].matches(&default.make)
    {
        out.default_make = Some(out.makes[0].clone());
        let models_for_default: Vec<&PreferredEquipment> =
            preferred.iter().filter(|p| p.make == default.make).collect();
        if models_for_default.len() == 1 {
            out.default_model = all_models
                .iter()
                .find(|opt| opt.matches(&models_for_default[0].model))
                .cloned();
        }
    }

    out
}

/// The make/model pair to auto-select for a fresh "new equipment" section.
///
/// Prefers the flagged company default; falls back to the only entry when
/// the preference list has exactly one. Never fires for existing equipment.
#[must_use]
pub fn auto_select(preferred: &[PreferredEquipment], is_new: bool) -> Option<&PreferredEquipment> {
    if !is_new {
        return None;
    }
    preferred
        .iter()
        .find(|p| p.is_default)
        .or_else(|| match preferred {
            [only] => Some(only),
            _ => None,
        })
}
