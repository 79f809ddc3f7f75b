//! Collaborator contracts consumed by the engine.
//!
//! All of these are implemented by the host application: the engine never
//! talks to a network itself. Futures here are not required to be `Send`;
//! the whole engine runs on one logical thread.

use sunsync_model::{CatalogOption, CompanyId, EntityType, Payload, PreferredEquipment, ProjectId};

use crate::error::EngineError;

/// The persistence writer, in its two variants.
///
/// `write_sparse` sends only the provided keys and the server leaves every
/// other column untouched; `write_exact` additionally guarantees that
/// explicit nulls are written as NULL rather than ignored. The store picks
/// the variant per payload.
#[allow(async_fn_in_trait)]
pub trait SectionWriter {
    async fn write_sparse(&self, project: &ProjectId, payload: &Payload)
    -> Result<(), EngineError>;

    async fn write_exact(&self, project: &ProjectId, payload: &Payload)
    -> Result<(), EngineError>;
}

/// Manufacturer → model catalog lookups.
#[allow(async_fn_in_trait)]
pub trait CatalogService {
    async fn list_makes(&self, entity: EntityType) -> Result<Vec<CatalogOption>, EngineError>;

    async fn list_models(
        &self,
        entity: EntityType,
        make: &str,
    ) -> Result<Vec<CatalogOption>, EngineError>;
}

/// Ranked per-company equipment preferences. Biases ordering and
/// auto-selection only; never restricts what a user may pick.
#[allow(async_fn_in_trait)]
pub trait PreferredEquipmentSource {
    async fn preferred(
        &self,
        company: &CompanyId,
        entity: EntityType,
    ) -> Result<Vec<PreferredEquipment>, EngineError>;
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Fire-and-forget success/error surfacing. The engine never depends on a
/// sink's behavior; a no-op implementation is perfectly valid.
pub trait NotificationSink {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Sink that drops every notice; useful in tests and headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _level: NoticeLevel, _message: &str) {}
}
