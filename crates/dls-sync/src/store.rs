//! The variable-store capability.
//!
//! The synchronizer and rebinder only talk to the host through this trait, so
//! they run the same against the in-memory store, a JSON snapshot, or the
//! remote REST API.

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::variable::{
    CollectionId, ModeId, Variable, VariableCollection, VariableId, VariableType, VariableValue,
};

/// Read and write access to a host's local variables.
pub trait VariableStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every local variable collection, with its modes and member ids.
    fn list_collections(
        &self,
    ) -> impl Future<Output = Result<Vec<VariableCollection>, Self::Error>> + Send;

    /// Look up one variable. `Ok(None)` when the id is unknown.
    fn get_variable(
        &self,
        id: &VariableId,
    ) -> impl Future<Output = Result<Option<Variable>, Self::Error>> + Send;

    /// Create an empty variable in `collection`.
    fn create_variable(
        &self,
        name: &str,
        collection: &CollectionId,
        resolved_type: VariableType,
    ) -> impl Future<Output = Result<Variable, Self::Error>> + Send;

    fn set_value_for_mode(
        &self,
        id: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn set_description(
        &self,
        id: &VariableId,
        description: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn delete_variable(&self, id: &VariableId)
        -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Store operations, used to label failures in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListCollections,
    GetVariable,
    CreateVariable,
    SetValue,
    SetDescription,
    DeleteVariable,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListCollections => "list collections",
            Self::GetVariable => "get variable",
            Self::CreateVariable => "create variable",
            Self::SetValue => "set value",
            Self::SetDescription => "set description",
            Self::DeleteVariable => "delete variable",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
