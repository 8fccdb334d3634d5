//! Reconciles a design tool's variable collections with the DLS token
//! definitions, and rebinds component paints from legacy variables.
//!
//! Both jobs talk to the host only through [`VariableStore`]. [`MemoryStore`]
//! backs offline snapshot runs and tests; [`FigmaClient`] drives the REST API.

pub mod document;
pub mod error;
pub mod figma;
pub mod memory;
pub mod rebind;
pub mod report;
pub mod store;
pub mod sync;
pub mod variable;

pub use document::Document;
pub use error::SyncError;
pub use figma::{FigmaClient, FigmaError};
pub use memory::{MemoryError, MemoryStore, Snapshot};
pub use rebind::{RebindScope, Rebinder};
pub use report::{IssueReason, RebindReport, SyncIssue, SyncReport};
pub use store::{Operation, VariableStore};
pub use sync::{Synchronizer, DEFAULT_PRIMITIVE_COLLECTION, DEFAULT_SEMANTIC_COLLECTION};
pub use variable::{Variable, VariableCollection, VariableId, VariableValue};
