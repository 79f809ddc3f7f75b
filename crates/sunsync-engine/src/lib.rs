//! Section synchronization engine.
//!
//! One [`SectionStore`] per (entity type, instance) pair owns the editable
//! local state of a form section and decides, without performing any I/O
//! itself, when that state must be hydrated from the remote record and when
//! an edit has earned a write. The async [`SectionRuntime`] drives those
//! decisions against the collaborator traits in [`ports`].
//!
//! The store is deliberately sans-IO: every network-visible action is
//! requested through a value ([`HydrationTicket`], [`SaveRequest`]) and fed
//! back through a completion call, which keeps the whole lifecycle (reset
//! edges, in-flight abandonment, de-dup, failure rollback) unit-testable
//! with no runtime at all.

pub mod catalog;
pub mod error;
pub mod ports;
pub mod preferred;
pub mod runtime;
pub mod scheduler;
pub mod section;
pub mod store;

pub use catalog::CatalogState;
pub use error::EngineError;
pub use ports::{
    CatalogService, NoticeLevel, NotificationSink, NullSink, PreferredEquipmentSource,
    SectionWriter,
};
pub use preferred::{FilteredOptions, auto_select, filter_by_preferred};
pub use runtime::SectionRuntime;
pub use scheduler::SaveDebounce;
pub use section::{SectionSpec, Selection};
pub use store::{HydrationTicket, SaveRequest, SectionStore, WriteMode};
