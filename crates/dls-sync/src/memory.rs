//! In-memory variable store, loadable from and savable to a JSON snapshot.
//!
//! Used by the CLI for offline runs and by tests, which can also make any
//! operation fail for a given variable name.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::store::{Operation, VariableStore};
use crate::variable::{
    CollectionId, Mode, ModeId, Variable, VariableCollection, VariableId, VariableType, VariableValue,
};

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("variable not found: {0}")]
    NotFound(VariableId),

    #[error("collection not found: {0}")]
    CollectionNotFound(CollectionId),

    #[error("mode {mode} does not exist in collection {collection}")]
    UnknownMode { mode: ModeId, collection: CollectionId },

    #[error("variable {0:?} already exists in collection")]
    DuplicateName(String),

    #[error("{operation} failed for {name} (injected)")]
    Injected { operation: Operation, name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk form of a host file: its variables plus the document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub document: Document,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, MemoryError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), MemoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Inner {
    collections: Vec<VariableCollection>,
    variables: BTreeMap<VariableId, Variable>,
    next_id: u64,
    failures: Vec<Failure>,
}

/// An injected failure. `mode: None` matches every mode.
#[derive(Debug)]
struct Failure {
    operation: Operation,
    name: String,
    mode: Option<ModeId>,
}

impl Inner {
    fn check(
        &self,
        operation: Operation,
        name: &str,
        mode: Option<&ModeId>,
    ) -> Result<(), MemoryError> {
        if self.failures.iter().any(|f| {
            f.operation == operation
                && f.name == name
                && f.mode.as_ref().map_or(true, |m| Some(m) == mode)
        }) {
            return Err(MemoryError::Injected {
                operation,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn variable_mut(&mut self, id: &VariableId) -> Result<&mut Variable, MemoryError> {
        self.variables
            .get_mut(id)
            .ok_or_else(|| MemoryError::NotFound(id.clone()))
    }

    fn collection(&self, id: &CollectionId) -> Result<&VariableCollection, MemoryError> {
        self.collections
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| MemoryError::CollectionNotFound(id.clone()))
    }

    fn name_of(&self, id: &VariableId) -> String {
        self.variables
            .get(id)
            .map_or_else(|| id.to_string(), |v| v.name.clone())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new(collections: Vec<VariableCollection>, variables: Vec<Variable>) -> Self {
        let variables: BTreeMap<_, _> = variables.into_iter().map(|v| (v.id.clone(), v)).collect();
        Self {
            inner: Mutex::new(Inner {
                next_id: variables.len() as u64 + 1,
                collections,
                variables,
                failures: Vec::new(),
            }),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.collections.clone(), snapshot.variables.clone())
    }

    /// Current collections and variables, with `document` attached unchanged.
    pub fn snapshot(&self, document: Document) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            collections: inner.collections.clone(),
            variables: inner.variables.values().cloned().collect(),
            document,
            extra: Default::default(),
        }
    }

    /// Overwrite the collections and variables of `snapshot` with the current
    /// ones, keeping its document and any other fields.
    pub fn update(&self, snapshot: &mut Snapshot) {
        let inner = self.lock();
        snapshot.collections = inner.collections.clone();
        snapshot.variables = inner.variables.values().cloned().collect();
    }

    /// Add an empty collection with the given mode names.
    pub fn add_collection(&self, name: &str, modes: &[&str]) -> CollectionId {
        let mut inner = self.lock();
        let n = inner.collections.len() + 1;
        let id = CollectionId(format!("VariableCollectionId:{n}"));
        let modes = modes
            .iter()
            .enumerate()
            .map(|(i, mode)| Mode {
                mode_id: ModeId(format!("{n}:{i}")),
                name: (*mode).to_string(),
            })
            .collect();
        inner.collections.push(VariableCollection {
            id: id.clone(),
            name: name.to_string(),
            modes,
            variable_ids: Vec::new(),
            extra: Default::default(),
        });
        id
    }

    /// Make every future `operation` on the variable called `name` fail.
    pub fn fail_on(&self, operation: Operation, name: &str) {
        self.lock().failures.push(Failure {
            operation,
            name: name.to_string(),
            mode: None,
        });
    }

    /// Make value writes for `mode` on the variable called `name` fail, while
    /// writes for other modes succeed.
    pub fn fail_on_mode(&self, name: &str, mode: ModeId) {
        self.lock().failures.push(Failure {
            operation: Operation::SetValue,
            name: name.to_string(),
            mode: Some(mode),
        });
    }

    /// Find a variable by collection and name.
    pub fn find(&self, collection: &CollectionId, name: &str) -> Option<Variable> {
        self.lock()
            .variables
            .values()
            .find(|v| &v.variable_collection_id == collection && v.name == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl VariableStore for MemoryStore {
    type Error = MemoryError;

    async fn list_collections(&self) -> Result<Vec<VariableCollection>, MemoryError> {
        Ok(self.lock().collections.clone())
    }

    async fn get_variable(&self, id: &VariableId) -> Result<Option<Variable>, MemoryError> {
        let inner = self.lock();
        let name = inner.name_of(id);
        inner.check(Operation::GetVariable, &name, None)?;
        Ok(inner.variables.get(id).cloned())
    }

    async fn create_variable(
        &self,
        name: &str,
        collection: &CollectionId,
        resolved_type: VariableType,
    ) -> Result<Variable, MemoryError> {
        let mut inner = self.lock();
        inner.check(Operation::CreateVariable, name, None)?;
        inner.collection(collection)?;
        if inner
            .variables
            .values()
            .any(|v| &v.variable_collection_id == collection && v.name == name)
        {
            return Err(MemoryError::DuplicateName(name.to_string()));
        }

        let id = loop {
            let candidate = VariableId(format!("VariableID:local:{}", inner.next_id));
            inner.next_id += 1;
            if !inner.variables.contains_key(&candidate) {
                break candidate;
            }
        };
        let variable = Variable {
            id: id.clone(),
            name: name.to_string(),
            variable_collection_id: collection.clone(),
            resolved_type,
            description: String::new(),
            values_by_mode: BTreeMap::new(),
            extra: Default::default(),
        };
        inner.variables.insert(id.clone(), variable.clone());
        if let Some(c) = inner.collections.iter_mut().find(|c| &c.id == collection) {
            c.variable_ids.push(id);
        }
        Ok(variable)
    }

    async fn set_value_for_mode(
        &self,
        id: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> Result<(), MemoryError> {
        let mut inner = self.lock();
        let name = inner.name_of(id);
        inner.check(Operation::SetValue, &name, Some(mode))?;
        let collection_id = inner
            .variables
            .get(id)
            .map(|v| v.variable_collection_id.clone())
            .ok_or_else(|| MemoryError::NotFound(id.clone()))?;
        if !inner.collection(&collection_id)?.has_mode(mode) {
            return Err(MemoryError::UnknownMode {
                mode: mode.clone(),
                collection: collection_id,
            });
        }
        inner
            .variable_mut(id)?
            .values_by_mode
            .insert(mode.clone(), value);
        Ok(())
    }

    async fn set_description(&self, id: &VariableId, description: &str) -> Result<(), MemoryError> {
        let mut inner = self.lock();
        let name = inner.name_of(id);
        inner.check(Operation::SetDescription, &name, None)?;
        inner.variable_mut(id)?.description = description.to_string();
        Ok(())
    }

    async fn delete_variable(&self, id: &VariableId) -> Result<(), MemoryError> {
        let mut inner = self.lock();
        let name = inner.name_of(id);
        inner.check(Operation::DeleteVariable, &name, None)?;
        let variable = inner
            .variables
            .remove(id)
            .ok_or_else(|| MemoryError::NotFound(id.clone()))?;
        if let Some(c) = inner
            .collections
            .iter_mut()
            .find(|c| c.id == variable.variable_collection_id)
        {
            c.variable_ids.retain(|v| v != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list() {
        let store = MemoryStore::default();
        let coll = store.add_collection("color-semantic", &["Default", "Dark"]);
        let var = store
            .create_variable("surface/base", &coll, VariableType::Color)
            .await
            .unwrap();

        let collections = store.list_collections().await.unwrap();
        assert_eq!(collections[0].variable_ids, vec![var.id.clone()]);
        assert_eq!(collections[0].modes.len(), 2);
        assert_eq!(store.get_variable(&var.id).await.unwrap(), Some(var));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default"]);
        store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        let result = store.create_variable("a", &coll, VariableType::Color).await;
        assert!(matches!(result, Err(MemoryError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_set_value_checks_mode() {
        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default"]);
        let var = store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        let result = store
            .set_value_for_mode(&var.id, &"nope".into(), VariableValue::Float(1.0))
            .await;
        assert!(matches!(result, Err(MemoryError::UnknownMode { .. })));
    }

    #[tokio::test]
    async fn test_delete_removes_membership() {
        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default"]);
        let var = store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        store.delete_variable(&var.id).await.unwrap();
        assert!(store.get_variable(&var.id).await.unwrap().is_none());
        assert!(store.list_collections().await.unwrap()[0]
            .variable_ids
            .is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default"]);
        let var = store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        store.fail_on(Operation::SetDescription, "a");
        let result = store.set_description(&var.id, "x").await;
        assert!(matches!(result, Err(MemoryError::Injected { .. })));
    }

    #[tokio::test]
    async fn test_injected_failure_for_one_mode() {
        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default", "Dark"]);
        let var = store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        store.fail_on_mode("a", "1:1".into());

        let value = VariableValue::Float(1.0);
        store
            .set_value_for_mode(&var.id, &"1:0".into(), value.clone())
            .await
            .unwrap();
        let result = store.set_value_for_mode(&var.id, &"1:1".into(), value).await;
        assert!(matches!(result, Err(MemoryError::Injected { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");

        let store = MemoryStore::default();
        let coll = store.add_collection("c", &["Default"]);
        store
            .create_variable("a", &coll, VariableType::Color)
            .await
            .unwrap();
        store.snapshot(Document::default()).save(&path).unwrap();

        let loaded = MemoryStore::from_snapshot(&Snapshot::load(&path).unwrap());
        assert_eq!(loaded.len(), 1);
        assert!(loaded.find(&coll, "a").is_some());
        let next = loaded
            .create_variable("b", &coll, VariableType::Color)
            .await
            .unwrap();
        assert_ne!(next.id, loaded.find(&coll, "a").unwrap().id);
    }

    #[tokio::test]
    async fn test_snapshot_keeps_host_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let original = serde_json::json!({
            "collections": [{
                "id": "VariableCollectionId:1",
                "name": "c",
                "modes": [{"modeId": "1:0", "name": "Default"}],
                "variableIds": ["VariableID:1"],
                "hiddenFromPublishing": false
            }],
            "variables": [{
                "id": "VariableID:1",
                "name": "surface/base",
                "variableCollectionId": "VariableCollectionId:1",
                "resolvedType": "COLOR",
                "description": "",
                "valuesByMode": {"1:0": {"r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0}},
                "scopes": ["FRAME_FILL"]
            }],
            "document": {"pages": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "PAGE",
                "children": [{
                    "id": "1:1",
                    "name": "Card",
                    "type": "FRAME",
                    "opacity": 0.5,
                    "fills": [{
                        "type": "SOLID",
                        "color": {"r": 1.0, "g": 0.0, "b": 0.0},
                        "visible": true
                    }]
                }]
            }]},
            "fileKey": "AbC"
        });
        std::fs::write(&path, original.to_string()).unwrap();

        let mut snapshot = Snapshot::load(&path).unwrap();
        let store = MemoryStore::from_snapshot(&snapshot);
        store.update(&mut snapshot);
        snapshot.save(&path).unwrap();

        let reread: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread, original);
    }
}
