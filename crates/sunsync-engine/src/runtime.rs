//! Async driver that connects a [`SectionStore`] to its collaborators.
//!
//! The store makes every decision; the runtime only carries them out. Each
//! call to [`SectionRuntime::pump`] performs at most one hydration fetch
//! and one save write, then returns, so a host can interleave pumping with
//! UI work on a single logical thread.

use std::time::Instant;

use sunsync_model::CompanyId;

use crate::ports::{
    CatalogService, NoticeLevel, NotificationSink, PreferredEquipmentSource, SectionWriter,
};
use crate::scheduler::SaveDebounce;
use crate::section::SectionSpec;
use crate::store::{SaveRequest, SectionStore, WriteMode};

const SAVE_OK: &str = "Data Saved";
const SAVE_ERR: &str = "Error saving data";

/// Drives one section store against host-supplied I/O.
pub struct SectionRuntime<S, W, C, P, N>
where
    S: SectionSpec,
{
    store: SectionStore<S>,
    writer: W,
    catalog: C,
    preferred: P,
    sink: N,
    company: Option<CompanyId>,
    preferred_loaded: bool,
}

impl<S, W, C, P, N> SectionRuntime<S, W, C, P, N>
where
    S: SectionSpec,
    W: SectionWriter,
    C: CatalogService,
    P: PreferredEquipmentSource,
    N: NotificationSink,
{
    pub fn new(store: SectionStore<S>, writer: W, catalog: C, preferred: P, sink: N) -> Self {
        Self {
            store,
            writer,
            catalog,
            preferred,
            sink,
            company: None,
            preferred_loaded: false,
        }
    }

    /// The company whose equipment preferences bias the catalog lists.
    #[must_use]
    pub fn with_company(mut self, company: Option<CompanyId>) -> Self {
        self.company = company;
        self
    }

    #[must_use]
    pub fn store(&self) -> &SectionStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SectionStore<S> {
        &mut self.store
    }

    /// One driver step: pending hydration first, then a due save.
    pub async fn pump(&mut self) {
        self.pump_hydration().await;
        self.pump_save(Instant::now()).await;
    }

    /// Perform the fetch behind a pending hydration, if the store asks.
    pub async fn pump_hydration(&mut self) {
        let Some(ticket) = self.store.take_hydration() else {
            return;
        };
        let result = self
            .store
            .spec()
            .fetch_remote(&ticket.project, ticket.instance)
            .await;
        match result {
            Ok(record) => {
                self.store.complete_hydration(&ticket, record);
            }
            Err(err) => {
                tracing::warn!(error = %err, "hydration fetch failed");
                self.store.fail_hydration(&ticket);
            }
        }
    }

    /// Evaluate the debounce against `now` and perform the write, if any.
    pub async fn pump_save(&mut self, now: Instant) {
        if let Some(request) = self.store.save_due(now) {
            self.perform_write(request).await;
        }
    }

    /// Teardown: push out any edit still waiting behind the debounce.
    pub async fn flush(&mut self) {
        if let Some(request) = self.store.flush() {
            self.perform_write(request).await;
        }
    }

    async fn perform_write(&mut self, request: SaveRequest) {
        let result = match request.mode {
            WriteMode::Sparse => {
                self.writer
                    .write_sparse(&request.project, &request.payload)
                    .await
            }
            WriteMode::ExplicitNull => {
                self.writer
                    .write_exact(&request.project, &request.payload)
                    .await
            }
        };
        match result {
            Ok(()) => {
                self.store.save_succeeded();
                self.sink.notify(NoticeLevel::Success, SAVE_OK);
            }
            Err(err) => {
                tracing::error!(error = %err, "section write failed");
                self.store.save_failed();
                self.sink.notify(NoticeLevel::Error, SAVE_ERR);
            }
        }
    }

    /// Keep the catalog lists in step with the current selection: load the
    /// make list once, load models when a make is picked, and apply the
    /// preferred auto-selection to a fresh section.
    pub async fn sync_catalog(&mut self) {
        self.load_preferred().await;

        let enabled = self.store.is_enabled();
        let selection = self.store.selection();
        let entity = self.store.entity();

        if self
            .store
            .catalog_mut()
            .begin_load_makes(enabled, self.company.is_some())
        {
            match self.catalog.list_makes(entity).await {
                Ok(list) => {
                    self.store.catalog_mut().complete_load_makes(
                        list,
                        selection.is_new,
                        selection.make.as_deref(),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, ?entity, "make list load failed");
                    self.store.catalog_mut().fail_load_makes();
                }
            }
        }

        if self
            .store
            .catalog_mut()
            .begin_load_models(enabled, selection.make.as_deref())
        {
            // begin_load_models refuses to start without a selected make.
            if let Some(make) = selection.make.as_deref() {
                match self.catalog.list_models(entity, make).await {
                    Ok(list) => {
                        self.store.catalog_mut().complete_load_models(
                            list,
                            selection.is_new,
                            Some(make),
                        );
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, ?entity, make, "model list load failed");
                        self.store.catalog_mut().fail_load_models();
                    }
                }
            }
        }

        if enabled && selection.is_new && selection.is_unselected() {
            let pick = crate::preferred::auto_select(self.store.catalog().preferred(), true)
                .map(|p| (p.make.clone(), p.model.clone()));
            if let Some((make, model)) = pick {
                tracing::debug!(?entity, make, model, "auto-selecting preferred equipment");
                self.store.apply_auto_select(&make, &model);
            }
        }
    }

    async fn load_preferred(&mut self) {
        if self.preferred_loaded {
            return;
        }
        let Some(company) = self.company.clone() else {
            return;
        };
        self.preferred_loaded = true;
        match self
            .preferred
            .preferred(&company, self.store.entity())
            .await
        {
            Ok(list) => self.store.catalog_mut().set_preferred(list),
            Err(err) => {
                // Bias only; the full catalog still works without it.
                tracing::warn!(error = %err, "preferred equipment lookup failed");
            }
        }
    }
}

impl<S, W, C, P, N> SectionRuntime<S, W, C, P, N>
where
    S: SectionSpec,
{
    /// Tweak the debounce window, mainly for tests.
    #[must_use]
    pub fn with_debounce(mut self, debounce: SaveDebounce) -> Self {
        self.store = self.store.with_debounce(debounce);
        self
    }
}
