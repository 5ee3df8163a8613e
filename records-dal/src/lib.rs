//! Records Data Access Layer
//!
//! Typed create, read, update, and list operations over the practice
//! management collections. Every record type routes through one generic
//! engine that stamps server-side timestamps, validates drafts before any
//! store round trip, and pages results with opaque cursors.

pub mod activity;
pub mod dal;
pub mod drafts;
pub mod error;
pub mod filters;
pub mod models;
pub mod page;
pub mod record;
pub mod resource;
pub mod validation;

pub use activity::{ActivityRecorder, NewActivity};
pub use dal::RecordsDal;
pub use drafts::*;
pub use error::{DalError, DalResult};
pub use filters::*;
pub use models::*;
pub use page::{Page, PageRequest};
pub use record::{iso_timestamp, Record, RecordDraft, RecordPatch, ResourceFilter};
pub use resource::Resource;
