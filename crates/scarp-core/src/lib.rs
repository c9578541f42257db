//! Core types and traits for the Scarp landscape-evolution harness.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Scarp workspace:
//! typed IDs, field definitions and the named per-node field store,
//! field access traits, the uplift field, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;
pub mod traits;
pub mod uplift;

pub use error::{FieldError, ProcessError, StepError};
pub use field::{FieldDef, FieldStore};
pub use id::{FieldId, NodeId, StepId};
pub use traits::{FieldBuffer, FieldReader, FieldWriter};
pub use uplift::Uplift;
