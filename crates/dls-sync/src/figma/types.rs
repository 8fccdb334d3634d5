use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::variable::{
    CollectionId, ModeId, Variable, VariableCollection, VariableId, VariableType, VariableValue,
};

// ── GET /v1/files/:key/variables/local ──────────────────────────

#[derive(Debug, Deserialize)]
pub struct LocalVariablesResponse {
    pub meta: LocalVariablesMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVariablesMeta {
    #[serde(default)]
    pub variables: HashMap<String, FigmaVariable>,
    #[serde(default)]
    pub variable_collections: HashMap<String, FigmaCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaCollection {
    #[serde(flatten)]
    pub collection: VariableCollection,
    pub default_mode_id: Option<ModeId>,
    #[serde(default)]
    pub remote: bool,
}

impl FigmaCollection {
    /// Convert to the store model, moving the default mode to the front so
    /// positional mode lookup finds it first.
    pub fn into_collection(self) -> VariableCollection {
        let mut collection = self.collection;
        if let Some(default) = self.default_mode_id {
            if let Some(pos) = collection.modes.iter().position(|m| m.mode_id == default) {
                let mode = collection.modes.remove(pos);
                collection.modes.insert(0, mode);
            }
        }
        collection
    }
}

#[derive(Debug, Deserialize)]
pub struct FigmaVariable {
    #[serde(flatten)]
    pub variable: Variable,
    #[serde(default)]
    pub remote: bool,
}

// ── POST /v1/files/:key/variables ───────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableChange {
    pub action: Action,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_collection_id: Option<CollectionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_type: Option<VariableType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableChange {
    fn new(action: Action, id: impl Into<String>) -> Self {
        Self {
            action,
            id: id.into(),
            name: None,
            variable_collection_id: None,
            resolved_type: None,
            description: None,
        }
    }

    pub fn create(
        temp_id: &str,
        name: &str,
        collection: &CollectionId,
        resolved_type: VariableType,
    ) -> Self {
        Self {
            name: Some(name.to_string()),
            variable_collection_id: Some(collection.clone()),
            resolved_type: Some(resolved_type),
            ..Self::new(Action::Create, temp_id)
        }
    }

    pub fn describe(id: &VariableId, description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..Self::new(Action::Update, id.as_str())
        }
    }

    pub fn delete(id: &VariableId) -> Self {
        Self::new(Action::Delete, id.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableModeValue {
    pub variable_id: VariableId,
    pub mode_id: ModeId,
    pub value: VariableValue,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variable_mode_values: Vec<VariableModeValue>,
}

impl VariablesRequest {
    pub fn change(change: VariableChange) -> Self {
        Self {
            variables: vec![change],
            ..Default::default()
        }
    }

    pub fn mode_value(value: VariableModeValue) -> Self {
        Self {
            variable_mode_values: vec![value],
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostVariablesResponse {
    #[serde(default)]
    pub meta: PostVariablesMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostVariablesMeta {
    #[serde(default)]
    pub temp_id_to_real_id: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_variables() {
        let json = r#"{
            "status": 200,
            "error": false,
            "meta": {
                "variableCollections": {
                    "VariableCollectionId:1:0": {
                        "id": "VariableCollectionId:1:0",
                        "name": "color-semantic",
                        "key": "abc",
                        "modes": [{"modeId": "1:1", "name": "Dark"}, {"modeId": "1:0", "name": "Default"}],
                        "defaultModeId": "1:0",
                        "remote": false,
                        "variableIds": ["VariableID:1:2"]
                    }
                },
                "variables": {
                    "VariableID:1:2": {
                        "id": "VariableID:1:2",
                        "name": "surface/base",
                        "key": "def",
                        "variableCollectionId": "VariableCollectionId:1:0",
                        "resolvedType": "COLOR",
                        "description": "",
                        "remote": false,
                        "valuesByMode": {
                            "1:0": {"type": "VARIABLE_ALIAS", "id": "VariableID:9:9"},
                            "1:1": {"r": 0.04, "g": 0.05, "b": 0.07, "a": 1}
                        }
                    }
                }
            }
        }"#;
        let resp: LocalVariablesResponse = serde_json::from_str(json).unwrap();
        let collection = resp
            .meta
            .variable_collections
            .into_values()
            .next()
            .unwrap()
            .into_collection();
        assert_eq!(collection.default_mode(), Some(&ModeId::from("1:0")));
        assert_eq!(collection.dark_mode(), Some(&ModeId::from("1:1")));

        let var = &resp.meta.variables["VariableID:1:2"].variable;
        assert_eq!(var.values_by_mode.len(), 2);
        assert_eq!(var.extra["key"], "def");
        assert_eq!(
            var.value_for_mode(&"1:0".into()).and_then(|v| v.as_alias()),
            Some(&VariableId::from("VariableID:9:9"))
        );
    }

    #[test]
    fn test_create_request_shape() {
        let body = VariablesRequest::change(VariableChange::create(
            "tmp",
            "surface/base",
            &"VariableCollectionId:1:0".into(),
            VariableType::Color,
        ));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "variables": [{
                    "action": "CREATE",
                    "id": "tmp",
                    "name": "surface/base",
                    "variableCollectionId": "VariableCollectionId:1:0",
                    "resolvedType": "COLOR"
                }]
            })
        );
    }

    #[test]
    fn test_mode_value_request_shape() {
        let body = VariablesRequest::mode_value(VariableModeValue {
            variable_id: "VariableID:1:2".into(),
            mode_id: "1:0".into(),
            value: VariableValue::Alias(crate::variable::VariableAlias::new("VariableID:9:9".into())),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("variables").is_none());
        assert_eq!(json["variableModeValues"][0]["modeId"], "1:0");
        assert_eq!(json["variableModeValues"][0]["value"]["type"], "VARIABLE_ALIAS");
    }

    #[test]
    fn test_delete_change() {
        let json = serde_json::to_value(VariableChange::delete(&"VariableID:1:2".into())).unwrap();
        assert_eq!(json, serde_json::json!({"action": "DELETE", "id": "VariableID:1:2"}));
    }
}
