//! Variable model shared by every store, shaped like the design tool's
//! variables API so snapshots and REST payloads deserialize directly.

use std::collections::BTreeMap;
use std::fmt;

use dls_tokens::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Opaque variable id assigned by the host.
    VariableId
);
string_id!(CollectionId);
string_id!(
    /// Opaque mode id. Modes are positional: the first mode of a collection is
    /// the default theme, the second (when present) is dark.
    ModeId
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: ModeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: CollectionId,
    pub name: String,
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub variable_ids: Vec<VariableId>,
    /// Host fields not modelled here, such as `hiddenFromPublishing`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VariableCollection {
    pub fn default_mode(&self) -> Option<&ModeId> {
        self.modes.first().map(|m| &m.mode_id)
    }

    pub fn dark_mode(&self) -> Option<&ModeId> {
        self.modes.get(1).map(|m| &m.mode_id)
    }

    pub fn has_mode(&self, mode: &ModeId) -> bool {
        self.modes.iter().any(|m| &m.mode_id == mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Boolean,
    Float,
    String,
    Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: VariableId,
    pub name: String,
    pub variable_collection_id: CollectionId,
    pub resolved_type: VariableType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub values_by_mode: BTreeMap<ModeId, VariableValue>,
    /// Host fields not modelled here, such as `scopes`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Variable {
    pub fn value_for_mode(&self, mode: &ModeId) -> Option<&VariableValue> {
        self.values_by_mode.get(mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A reference from one variable (or a bound paint) to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: VariableId,
}

impl VariableAlias {
    pub fn new(id: VariableId) -> Self {
        Self {
            kind: AliasKind::VariableAlias,
            id,
        }
    }
}

/// Normalized color channels as the host stores them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

/// Largest per-channel difference still treated as the same color: half an
/// 8-bit step for RGB.
const CHANNEL_TOLERANCE: f64 = 0.5 / 255.0;
const ALPHA_TOLERANCE: f64 = 1.0 / 512.0;

impl ColorValue {
    pub fn approx_eq(&self, other: &ColorValue) -> bool {
        (self.r - other.r).abs() <= CHANNEL_TOLERANCE
            && (self.g - other.g).abs() <= CHANNEL_TOLERANCE
            && (self.b - other.b).abs() <= CHANNEL_TOLERANCE
            && (self.a - other.a).abs() <= ALPHA_TOLERANCE
    }

    pub fn to_rgba(self) -> Rgba {
        Rgba::from_unit(self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for ColorValue {
    fn from(color: Rgba) -> Self {
        let [r, g, b, a] = color.to_unit();
        Self { r, g, b, a }
    }
}

/// A per-mode variable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(ColorValue),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl VariableValue {
    /// Alias value pointing at `target`.
    pub fn alias_to(target: &Variable) -> Self {
        Self::Alias(VariableAlias::new(target.id.clone()))
    }

    pub fn as_alias(&self) -> Option<&VariableId> {
        match self {
            Self::Alias(alias) => Some(&alias.id),
            _ => None,
        }
    }

    /// Equality used when deciding whether a write is needed: aliases match
    /// by target id, colors within rounding tolerance, everything else exactly.
    pub fn matches(&self, other: &VariableValue) -> bool {
        match (self, other) {
            (Self::Alias(a), Self::Alias(b)) => a.id == b.id,
            (Self::Color(a), Self::Color(b)) => a.approx_eq(b),
            (a, b) => a == b,
        }
    }
}

impl From<Rgba> for VariableValue {
    fn from(color: Rgba) -> Self {
        Self::Color(color.into())
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alias(alias) => write!(f, "-> {}", alias.id),
            Self::Color(color) => write!(f, "{}", color.to_rgba()),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_deserialize_shapes() {
        let alias: VariableValue =
            serde_json::from_str(r#"{"type":"VARIABLE_ALIAS","id":"VariableID:1:2"}"#).unwrap();
        assert_eq!(alias.as_alias(), Some(&VariableId::from("VariableID:1:2")));

        let color: VariableValue = serde_json::from_str(r#"{"r":1,"g":0,"b":0}"#).unwrap();
        match color {
            VariableValue::Color(c) => assert_eq!(c.a, 1.0),
            other => panic!("Expected color, got {other:?}"),
        }

        let float: VariableValue = serde_json::from_str("4").unwrap();
        assert_eq!(float, VariableValue::Float(4.0));
    }

    #[test]
    fn test_color_tolerance() {
        let exact = ColorValue::from(Rgba::rgba(0, 0, 0, 0.5));
        let close = ColorValue {
            r: 0.001,
            a: 0.501,
            ..exact
        };
        let far = ColorValue { r: 0.01, ..exact };
        assert!(exact.approx_eq(&close));
        assert!(!exact.approx_eq(&far));
    }

    #[test]
    fn test_alias_matches_by_id_only() {
        let a = VariableValue::Alias(VariableAlias::new("x".into()));
        let b = VariableValue::Alias(VariableAlias::new("x".into()));
        let c = VariableValue::Alias(VariableAlias::new("y".into()));
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        assert!(!a.matches(&VariableValue::from(Rgba::BLACK)));
    }

    #[test]
    fn test_variable_roundtrip_keeps_modes() {
        let json = r#"{
            "id": "VariableID:1:1",
            "name": "surface/base",
            "variableCollectionId": "VariableCollectionId:1:0",
            "resolvedType": "COLOR",
            "valuesByMode": {"1:0": {"r": 1, "g": 1, "b": 1, "a": 1}},
            "scopes": ["ALL_SCOPES"]
        }"#;
        let var: Variable = serde_json::from_str(json).unwrap();
        assert_eq!(var.description, "");
        let value = var.value_for_mode(&"1:0".into()).unwrap();
        assert!(value.matches(&Rgba::WHITE.into()));
    }
}
