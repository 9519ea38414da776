//! Visitor registry operations.
//!
//! ## Module Organization
//!
//! - `create`: Transactional entry creation
//! - `query`: Listing, single-entry lookup and daily summary
//! - `sequence`: Registry id reservation
//! - `status`: Forward-only status transitions
//! - `validate`: Request validation before any store access

pub mod create;
pub mod query;
pub mod sequence;
pub mod status;
pub mod validate;

pub use create::{CreatedEntry, create_registry_entry};
pub use query::{
    DailySummary, RegistryFilter, SummaryFilter, daily_summary, get_registry_entry,
    list_registry_entries,
};
pub use status::{StatusUpdateRequest, update_registry_status};
pub use validate::{NewRegistryEntryRequest, ValidatedEntry, validate_new_entry};
