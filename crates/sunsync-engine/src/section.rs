//! The section descriptor: what a host supplies to instantiate a store.

use sunsync_model::{
    EntityType, Instance, MeaningfulPolicy, Payload, ProjectId, RecordId, RemoteRecord,
};

use crate::error::EngineError;

/// Describes one editable section of the form.
///
/// A spec is captured once per store. The three mapping operations must be
/// pure: `map_remote(None)` seeds the safe empty state the UI sees before
/// hydration, and `build_payload` must be a faithful inverse of `map_remote`
/// over the semantically meaningful fields so snapshot comparisons hold.
#[allow(async_fn_in_trait)]
pub trait SectionSpec {
    /// The section's editable local state.
    type State;

    /// Which equipment entity this section edits.
    fn entity(&self) -> EntityType;

    /// Per-field meaningfulness rules for the pre-hydration write guard.
    fn meaningful_policy(&self) -> MeaningfulPolicy {
        MeaningfulPolicy::new()
    }

    /// Fetch the remote record backing this section for one instance.
    /// `Ok(None)` means "nothing in the database yet".
    async fn fetch_remote(
        &self,
        project: &ProjectId,
        instance: Instance,
    ) -> Result<Option<RemoteRecord>, EngineError>;

    /// Map a remote record (or its absence) into local state. Must be total:
    /// the UI never observes an unset state.
    fn map_remote(&self, record: Option<&RemoteRecord>) -> Self::State;

    /// Build the candidate write payload for the current state.
    fn build_payload(&self, id: Option<&RecordId>, state: &Self::State) -> Payload;

    /// Project the catalog-relevant selection out of local state.
    fn selection(&self, state: &Self::State) -> Selection;

    /// Apply an auto-selected preferred make/model to local state. Sections
    /// that do not want auto-selection keep the default no-op.
    fn apply_auto_select(&self, _state: &mut Self::State, _make: &str, _model: &str) {}
}

/// The slice of local state the catalog loader cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Whether the section represents new (rather than existing) equipment.
    pub is_new: bool,
    /// Currently selected manufacturer, if any.
    pub make: Option<String>,
    /// Currently selected model, if any.
    pub model: Option<String>,
}

impl Selection {
    /// Whether neither make nor model has been chosen yet.
    #[must_use]
    pub fn is_unselected(&self) -> bool {
        self.make.is_none() && self.model.is_none()
    }
}
