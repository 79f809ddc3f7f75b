//! The section store: hydration and save lifecycle for one section.
//!
//! Lifecycle per store, keyed by (entity type, instance):
//!
//! * **Uninitialized**: local state is seeded via `map_remote(None)`; the
//!   UI never observes an unset shape.
//! * **Reset**: on project change or an enabled→disabled edge: hydration
//!   flags, remembered snapshots and catalog lists are cleared and local
//!   state reseeded. A disabled→enabled edge does NOT reset; it goes
//!   straight back to hydrating so data the user already entered survives a
//!   sibling section toggling this one off and on.
//! * **Hydrating**: armed whenever (enabled and a project is present) and
//!   this is the first entry for the project or the instance changed. The
//!   host takes a [`HydrationTicket`], performs the fetch, and feeds the
//!   result back; a ticket from a superseded generation is discarded, which
//!   is how an in-flight fetch is abandoned on instance switch or disable.
//! * **Idle**: edits flow through [`SectionStore::update_state`]; each one
//!   (re)arms the trailing-edge debounce. [`SectionStore::save_due`] runs
//!   the save evaluation at most once per window and hands back a
//!   [`SaveRequest`] only when the edit survived every skip rule.
//!
//! Switching instance mid-session keeps the old instance's local state on
//! screen until the new fetch resolves, never a transient blank form.

use std::time::Instant;

use sunsync_model::{
    EntityType, Instance, MeaningfulPolicy, Payload, ProjectId, RecordId, RemoteRecord,
    shallow_equal,
};

use crate::catalog::CatalogState;
use crate::scheduler::SaveDebounce;
use crate::section::{SectionSpec, Selection};

/// Which persistence-writer variant a save must go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Send only the provided keys; server leaves the rest untouched.
    Sparse,
    /// Same, but explicit nulls are written as NULL instead of ignored.
    ExplicitNull,
}

/// A write the host must perform on the store's behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub project: ProjectId,
    pub payload: Payload,
    pub mode: WriteMode,
}

/// Authorization for one hydration fetch. Completing a ticket whose
/// generation has been superseded is a no-op: the result is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationTicket {
    generation: u64,
    pub project: ProjectId,
    pub instance: Instance,
}

/// Owns the editable local state of one form section for one instance.
pub struct SectionStore<S: SectionSpec> {
    spec: S,
    policy: MeaningfulPolicy,
    state: S::State,
    record_id: Option<RecordId>,

    project: Option<ProjectId>,
    instance: Instance,
    enabled: bool,

    needs_hydration: bool,
    hydrating: bool,
    hydrated_once: bool,
    generation: u64,

    hydrated_snapshot: Option<Payload>,
    last_saved: Option<Payload>,

    debounce: SaveDebounce,
    catalog: CatalogState,
}

impl<S: SectionSpec> SectionStore<S> {
    pub fn new(spec: S, instance: Instance) -> Self {
        let policy = spec.meaningful_policy();
        let state = spec.map_remote(None);
        Self {
            spec,
            policy,
            state,
            record_id: None,
            project: None,
            instance,
            enabled: true,
            needs_hydration: false,
            hydrating: false,
            hydrated_once: false,
            generation: 0,
            hydrated_snapshot: None,
            last_saved: None,
            debounce: SaveDebounce::default(),
            catalog: CatalogState::new(),
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: SaveDebounce) -> Self {
        self.debounce = debounce;
        self
    }

    // Accessors ---------------------------------------------------------

    #[must_use]
    pub fn entity(&self) -> EntityType {
        self.spec.entity()
    }

    #[must_use]
    pub fn spec(&self) -> &S {
        &self.spec
    }

    #[must_use]
    pub fn state(&self) -> &S::State {
        &self.state
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.spec.selection(&self.state)
    }

    #[must_use]
    pub fn record_id(&self) -> Option<&RecordId> {
        self.record_id.as_ref()
    }

    #[must_use]
    pub fn instance(&self) -> Instance {
        self.instance
    }

    #[must_use]
    pub fn project(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the UI should show this section as still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.hydrating || self.needs_hydration
    }

    #[must_use]
    pub fn has_hydrated_once(&self) -> bool {
        self.hydrated_once
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogState {
        &mut self.catalog
    }

    // Dependency changes ------------------------------------------------

    /// Point the store at a (possibly different) project. Any change resets
    /// the store and, when enabled, arms a fresh hydration.
    pub fn set_project(&mut self, project: Option<ProjectId>) {
        if self.project == project {
            return;
        }
        self.project = project;
        self.reset("project changed");
        if self.enabled && self.project.is_some() {
            self.arm_hydration();
            self.debounce.mark_changed(Instant::now());
        }
    }

    /// Flip the enablement signal. Edge-triggered: disabling resets the
    /// store; re-enabling hydrates without resetting first.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.reset("section disabled");
            return;
        }
        if self.project.is_some() {
            self.arm_hydration();
            self.debounce.mark_changed(Instant::now());
        }
    }

    /// Re-point the store at a different instance of the same section.
    ///
    /// Equivalent to targeting a different remote record: forces a full
    /// re-hydration, but deliberately leaves the current local state in
    /// place so the UI never flashes blank between instances.
    pub fn set_instance(&mut self, instance: Instance) {
        if self.instance == instance {
            return;
        }
        tracing::debug!(
            entity = ?self.entity(),
            from = self.instance.label(),
            to = instance.label(),
            "instance switched"
        );
        self.instance = instance;
        // Abandon any fetch still in flight for the old instance.
        self.generation += 1;
        self.hydrating = false;
        if self.enabled && self.project.is_some() {
            self.arm_hydration();
        }
    }

    fn arm_hydration(&mut self) {
        self.needs_hydration = true;
    }

    fn reset(&mut self, reason: &str) {
        tracing::debug!(entity = ?self.entity(), reason, "resetting section store");
        self.generation += 1;
        self.needs_hydration = false;
        self.hydrating = false;
        self.hydrated_once = false;
        self.hydrated_snapshot = None;
        self.last_saved = None;
        self.record_id = None;
        self.debounce.cancel();
        self.catalog.reset();
        self.state = self.spec.map_remote(None);
    }

    // Hydration ---------------------------------------------------------

    /// Take the pending hydration, if any. The caller must perform the
    /// fetch and report back through [`Self::complete_hydration`] or
    /// [`Self::fail_hydration`].
    pub fn take_hydration(&mut self) -> Option<HydrationTicket> {
        if !self.needs_hydration || !self.enabled {
            return None;
        }
        let project = self.project.clone()?;
        self.needs_hydration = false;
        self.hydrating = true;
        self.generation += 1;
        tracing::debug!(
            entity = ?self.entity(),
            instance = self.instance.label(),
            "hydration started"
        );
        Some(HydrationTicket {
            generation: self.generation,
            project,
            instance: self.instance,
        })
    }

    /// Feed a fetch result back. Returns false when the ticket was
    /// superseded and the result discarded.
    pub fn complete_hydration(
        &mut self,
        ticket: &HydrationTicket,
        record: Option<RemoteRecord>,
    ) -> bool {
        if ticket.generation != self.generation || !self.hydrating {
            tracing::debug!(entity = ?self.entity(), "stale hydration result discarded");
            return false;
        }
        self.hydrating = false;
        self.hydrated_once = true;
        match record {
            None => {
                // Nothing in the database yet; later edits may save.
                self.record_id = None;
                self.hydrated_snapshot = None;
            }
            Some(record) => {
                self.record_id = record.id.clone();
                self.state = self.spec.map_remote(Some(&record));
                let snapshot = self
                    .spec
                    .build_payload(self.record_id.as_ref(), &self.state)
                    .filtered();
                tracing::debug!(
                    entity = ?self.entity(),
                    instance = self.instance.label(),
                    fields = snapshot.len(),
                    "hydration complete"
                );
                self.hydrated_snapshot = Some(snapshot);
            }
        }
        true
    }

    /// Record a failed fetch. The store stays in the hydrating state
    /// ("still loading" to the UI) until a later trigger retries; it never
    /// pretends the fetch returned an empty record.
    pub fn fail_hydration(&mut self, ticket: &HydrationTicket) {
        if ticket.generation != self.generation {
            return;
        }
        tracing::warn!(
            entity = ?self.entity(),
            instance = self.instance.label(),
            "hydration fetch failed; section remains loading"
        );
    }

    /// Re-arm a hydration after a failed fetch.
    pub fn retry_hydration(&mut self) {
        if self.hydrating {
            self.hydrating = false;
            self.arm_hydration();
        }
    }

    // Edits -------------------------------------------------------------

    /// Mutate local state and schedule a save evaluation. Also clears
    /// stale model-catalog state when the mutation changed the selected
    /// manufacturer.
    pub fn update_state(&mut self, f: impl FnOnce(&mut S::State)) {
        let before = self.spec.selection(&self.state);
        f(&mut self.state);
        let after = self.spec.selection(&self.state);
        if before.make != after.make {
            self.catalog.make_changed();
        }
        self.debounce.mark_changed(Instant::now());
    }

    /// Replace local state wholesale.
    pub fn set_state(&mut self, state: S::State) {
        self.update_state(|s| *s = state);
    }

    /// Apply a preferred-equipment auto-selection through the normal edit
    /// path, so it schedules a save like a user's own pick would.
    pub fn apply_auto_select(&mut self, make: &str, model: &str) {
        let before = self.spec.selection(&self.state);
        self.spec.apply_auto_select(&mut self.state, make, model);
        let after = self.spec.selection(&self.state);
        if before == after {
            return;
        }
        if before.make != after.make {
            self.catalog.make_changed();
        }
        self.debounce.mark_changed(Instant::now());
    }

    // Save evaluation ---------------------------------------------------

    /// Run the save evaluation if the debounce window has elapsed.
    pub fn save_due(&mut self, now: Instant) -> Option<SaveRequest> {
        if !self.debounce.is_due(now) {
            return None;
        }
        self.evaluate_save()
    }

    /// Teardown flush: evaluate any pending save immediately instead of
    /// dropping it, so the user's final edit is not silently lost.
    pub fn flush(&mut self) -> Option<SaveRequest> {
        if !self.debounce.is_pending() {
            return None;
        }
        self.evaluate_save()
    }

    /// Optimistic de-dup memory holds after a successful write; nothing to
    /// do beyond logging.
    pub fn save_succeeded(&mut self) {
        tracing::debug!(entity = ?self.entity(), "save confirmed");
    }

    /// Roll back the de-dup memory so an identical retry is not treated as
    /// a duplicate.
    pub fn save_failed(&mut self) {
        tracing::warn!(entity = ?self.entity(), "save failed; de-dup memory cleared");
        self.last_saved = None;
    }

    fn evaluate_save(&mut self) -> Option<SaveRequest> {
        self.debounce.consume();

        if !self.enabled || self.hydrating || self.needs_hydration {
            tracing::trace!(entity = ?self.entity(), "save skipped: disabled or hydrating");
            return None;
        }
        let project = self.project.clone()?;

        let built = self.spec.build_payload(self.record_id.as_ref(), &self.state);
        let filtered = built.filtered();
        if filtered.is_empty() {
            tracing::trace!(entity = ?self.entity(), "save skipped: empty payload");
            return None;
        }

        // Before the first hydration, only intentional defaults are worth
        // writing; pure placeholder emptiness must not race the fetch.
        if !self.hydrated_once && !filtered.has_meaningful_value(&self.policy) {
            tracing::trace!(entity = ?self.entity(), "save skipped: not hydrated, no meaningful defaults");
            return None;
        }

        // Echo of server truth, not a real edit.
        if self
            .hydrated_snapshot
            .as_ref()
            .is_some_and(|snapshot| *snapshot == filtered)
        {
            tracing::trace!(entity = ?self.entity(), "save skipped: equals hydrated snapshot");
            return None;
        }

        // Duplicate of what we already sent.
        if shallow_equal(Some(&filtered), self.last_saved.as_ref()) {
            tracing::trace!(entity = ?self.entity(), "save skipped: equals last attempted save");
            return None;
        }

        // Explicit nulls need the writer variant that persists them.
        let mode = if built.contains_null() {
            WriteMode::ExplicitNull
        } else {
            WriteMode::Sparse
        };

        // Remember the attempt optimistically; save_failed rolls this back.
        self.last_saved = Some(filtered.clone());

        tracing::debug!(
            entity = ?self.entity(),
            instance = self.instance.label(),
            fields = filtered.len(),
            ?mode,
            "save issued"
        );
        Some(SaveRequest {
            project,
            payload: filtered,
            mode,
        })
    }
}
