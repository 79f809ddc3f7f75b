//! Catalog loading state for one section.
//!
//! Make and model lists load on demand, at most once per store instance,
//! with one deliberate exception: a model load that came back empty is
//! treated as "not actually loaded", because an empty result can reflect a
//! transient upstream condition rather than a true empty catalog. Picking a
//! different manufacturer clears the model list and its loaded flag so the
//! next load is not suppressed by stale state.
//!
//! The state is sans-IO: `begin_*` answers "should the host fetch now" and
//! flips the loading flag, `complete_*`/`fail_*` record the outcome.

use sunsync_model::{CatalogOption, PreferredEquipment};

use crate::preferred::filter_by_preferred;

/// Catalog lists and load bookkeeping for one section store.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    makes: Vec<CatalogOption>,
    models: Vec<CatalogOption>,
    all_makes: Vec<CatalogOption>,
    all_models: Vec<CatalogOption>,
    preferred: Vec<PreferredEquipment>,
    makes_loaded: bool,
    models_loaded: bool,
    loading_makes: bool,
    loading_models: bool,
}

impl CatalogState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The (possibly preferred-biased) manufacturer list offered to the user.
    #[must_use]
    pub fn makes(&self) -> &[CatalogOption] {
        &self.makes
    }

    /// The (possibly preferred-biased) model list for the selected make.
    #[must_use]
    pub fn models(&self) -> &[CatalogOption] {
        &self.models
    }

    /// Unbiased manufacturer list, for hosts offering a full-catalog toggle.
    #[must_use]
    pub fn all_makes(&self) -> &[CatalogOption] {
        &self.all_makes
    }

    /// Unbiased model list.
    #[must_use]
    pub fn all_models(&self) -> &[CatalogOption] {
        &self.all_models
    }

    #[must_use]
    pub fn loading_makes(&self) -> bool {
        self.loading_makes
    }

    #[must_use]
    pub fn loading_models(&self) -> bool {
        self.loading_models
    }

    #[must_use]
    pub fn preferred(&self) -> &[PreferredEquipment] {
        &self.preferred
    }

    pub fn set_preferred(&mut self, preferred: Vec<PreferredEquipment>) {
        self.preferred = preferred;
    }

    /// Gate a make load. Returns true when the host should fetch now.
    pub fn begin_load_makes(&mut self, enabled: bool, has_company: bool) -> bool {
        if !enabled || !has_company || self.makes_loaded || self.loading_makes {
            return false;
        }
        self.makes_loaded = true;
        self.loading_makes = true;
        true
    }

    pub fn complete_load_makes(
        &mut self,
        list: Vec<CatalogOption>,
        is_new: bool,
        selected_make: Option<&str>,
    ) {
        self.all_makes = list;
        let filtered = filter_by_preferred(
            &self.all_makes,
            &self.all_models,
            &self.preferred,
            is_new,
            selected_make,
        );
        tracing::debug!(
            total = self.all_makes.len(),
            offered = filtered.makes.len(),
            preferred = self.preferred.len(),
            is_new,
            "make list loaded"
        );
        self.makes = filtered.makes;
        self.loading_makes = false;
    }

    pub fn fail_load_makes(&mut self) {
        // Retryable: the next begin_load_makes fetches again.
        self.makes_loaded = false;
        self.loading_makes = false;
    }

    /// Gate a model load. Returns true when the host should fetch now.
    ///
    /// A previous load that returned zero models does not count as loaded.
    pub fn begin_load_models(&mut self, enabled: bool, selected_make: Option<&str>) -> bool {
        if !enabled || selected_make.is_none() || self.loading_models {
            return false;
        }
        if self.models_loaded {
            if !self.models.is_empty() {
                return false;
            }
            tracing::debug!("previous model load returned no rows, retrying");
            self.models_loaded = false;
        }
        self.models_loaded = true;
        self.loading_models = true;
        true
    }

    pub fn complete_load_models(
        &mut self,
        list: Vec<CatalogOption>,
        is_new: bool,
        selected_make: Option<&str>,
    ) {
        self.all_models = list;
        let filtered = filter_by_preferred(
            &self.all_makes,
            &self.all_models,
            &self.preferred,
            is_new,
            selected_make,
        );
        tracing::debug!(
            total = self.all_models.len(),
            offered = filtered.models.len(),
            "model list loaded"
        );
        self.models = filtered.models;
        self.loading_models = false;
    }

    pub fn fail_load_models(&mut self) {
        self.models_loaded = false;
        self.loading_models = false;
    }

    /// A different manufacturer was picked: the model list and its loaded
    /// flag are stale.
    pub fn make_changed(&mut self) {
        self.models.clear();
        self.all_models.clear();
        self.models_loaded = false;
    }

    /// Clear everything; used on store reset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogOption> {
        vec![
            CatalogOption::new("Enphase", "mk-enphase"),
            CatalogOption::new("Tesla", "mk-tesla"),
        ]
    }

    #[test]
    fn make_load_is_once_per_store() {
        let mut state = CatalogState::new();
        assert!(state.begin_load_makes(true, true));
        state.complete_load_makes(catalog(), false, None);
        assert!(!state.begin_load_makes(true, true));
        assert_eq!(state.makes().len(), 2);
    }

    #[test]
    fn make_load_gated_on_enabled_and_company() {
        let mut state = CatalogState::new();
        assert!(!state.begin_load_makes(false, true));
        assert!(!state.begin_load_makes(true, false));
        assert!(state.begin_load_makes(true, true));
    }

    #[test]
    fn failed_make_load_is_retryable() {
        let mut state = CatalogState::new();
        assert!(state.begin_load_makes(true, true));
        state.fail_load_makes();
        assert!(state.begin_load_makes(true, true));
    }

    #[test]
    fn empty_model_result_is_retryable() {
        let mut state = CatalogState::new();
        assert!(state.begin_load_models(true, Some("Enphase")));
        state.complete_load_models(vec![], false, Some("Enphase"));

        // Empty result: eligible again.
        assert!(state.begin_load_models(true, Some("Enphase")));
        state.complete_load_models(
            vec![CatalogOption::new("M1", "1")],
            false,
            Some("Enphase"),
        );
        assert_eq!(state.models().len(), 1);

        // Populated result: now the guard holds.
        assert!(!state.begin_load_models(true, Some("Enphase")));
    }

    #[test]
    fn model_load_requires_a_selected_make() {
        let mut state = CatalogState::new();
        assert!(!state.begin_load_models(true, None));
    }

    #[test]
    fn make_change_clears_models_and_flag() {
        let mut state = CatalogState::new();
        assert!(state.begin_load_models(true, Some("Enphase")));
        state.complete_load_models(vec![CatalogOption::new("M1", "1")], false, Some("Enphase"));

        state.make_changed();
        assert!(state.models().is_empty());
        assert!(state.begin_load_models(true, Some("Tesla")));
    }

    #[test]
    fn concurrent_load_is_suppressed() {
        let mut state = CatalogState::new();
        assert!(state.begin_load_models(true, Some("Enphase")));
        assert!(!state.begin_load_models(true, Some("Enphase")));
    }
}
