//! Shared data model for the equipment section sync engine.
//!
//! Pure types only: system instances, canonical field names and their
//! instance remapping, save payloads and the filtering/equality rules that
//! make payload diffing valid, plus the id newtypes and catalog records the
//! engine crates exchange with their collaborators.

pub mod entity;
pub mod error;
pub mod field;
pub mod ids;
pub mod instance;
pub mod payload;
pub mod record;

pub use entity::{EntityFields, EntityType};
pub use error::ModelError;
pub use field::{CanonicalField, FieldError, remap, remap_payload};
pub use ids::{CompanyId, ProjectId, RecordId};
pub use instance::Instance;
pub use payload::{FieldValue, MeaningfulPolicy, Payload, shallow_equal};
pub use record::{CatalogOption, PreferredEquipment, RemoteRecord};
