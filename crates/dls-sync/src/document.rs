//! Minimal node tree of a design document: pages of nodes carrying fills,
//! strokes and effects that may be bound to color variables.
//!
//! Fields not modelled here are kept in `extra` so a snapshot written back
//! after a rebind is otherwise unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::variable::{VariableAlias, VariableId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn page_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.pages.iter_mut().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "frame")]
    pub node_type: String,
    /// `None` when the node has no fills or they are mixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn frame() -> String {
    "FRAME".to_string()
}

impl Node {
    /// Depth-first visit of this node and all descendants.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<VariableAlias>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Video,
    /// Any paint type not listed above, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(untagged)]
    Other(String),
}

impl EffectKind {
    pub fn is_shadow(&self) -> bool {
        matches!(self, Self::DropShadow | Self::InnerShadow)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Anything whose color can be bound to a variable.
pub trait ColorBinding {
    fn bound_color(&self) -> Option<&VariableId>;
    fn bind_color(&mut self, id: VariableId);
}

macro_rules! impl_color_binding {
    ($($ty:ty),+) => {
        $(impl ColorBinding for $ty {
            fn bound_color(&self) -> Option<&VariableId> {
                self.bound_variables
                    .as_ref()
                    .and_then(|b| b.color.as_ref())
                    .map(|alias| &alias.id)
            }

            fn bind_color(&mut self, id: VariableId) {
                self.bound_variables
                    .get_or_insert_with(BoundVariables::default)
                    .color = Some(VariableAlias::new(id));
            }
        })+
    };
}

impl_color_binding!(Paint, Effect);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_deserialize() {
        let json = r#"{
            "id": "0:1",
            "name": "Page 1",
            "type": "PAGE",
            "children": [{
                "id": "1:2",
                "name": "Card",
                "fills": [{"type": "SOLID", "boundVariables": {"color": {"type": "VARIABLE_ALIAS", "id": "v1"}}}],
                "effects": [{"type": "DROP_SHADOW"}]
            }]
        }"#;
        let page: Node = serde_json::from_str(json).unwrap();
        let card = &page.children[0];
        assert_eq!(card.node_type, "FRAME");
        assert!(card.strokes.is_none());
        let fills = card.fills.as_ref().unwrap();
        assert_eq!(fills[0].bound_color(), Some(&VariableId::from("v1")));
        assert!(card.effects[0].bound_color().is_none());
    }

    #[test]
    fn test_bind_color_creates_binding() {
        let mut effect = Effect {
            kind: EffectKind::InnerShadow,
            bound_variables: None,
            extra: Map::new(),
        };
        effect.bind_color("v2".into());
        assert_eq!(effect.bound_color(), Some(&VariableId::from("v2")));
    }

    #[test]
    fn test_walk_visits_all() {
        let mut page: Node = serde_json::from_str(
            r#"{"id":"p","type":"PAGE","children":[{"id":"a","children":[{"id":"b"}]},{"id":"c"}]}"#,
        )
        .unwrap();
        let mut seen = Vec::new();
        page.walk_mut(&mut |n| seen.push(n.id.clone()));
        assert_eq!(seen, ["p", "a", "b", "c"]);
    }

    #[test]
    fn test_unmodelled_fields_survive_roundtrip() {
        let json = serde_json::json!({
            "id": "1:2",
            "name": "Card",
            "type": "FRAME",
            "opacity": 0.5,
            "fills": [{
                "type": "SOLID",
                "color": {"r": 1.0, "g": 0.0, "b": 0.0},
                "visible": true
            }],
            "effects": [{"type": "DROP_SHADOW", "radius": 4.0}]
        });
        let node: Node = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(node.extra["opacity"], 0.5);
        assert_eq!(serde_json::to_value(&node).unwrap(), json);
    }

    #[test]
    fn test_unknown_paint_and_effect_types_load() {
        let json = serde_json::json!({
            "id": "1:3",
            "type": "RECTANGLE",
            "fills": [
                {"type": "PATTERN", "sourceNodeId": "9:9"},
                {"type": "SOLID", "boundVariables": {"color": {"type": "VARIABLE_ALIAS", "id": "v1"}}}
            ],
            "effects": [{"type": "NOISE"}]
        });
        let node: Node = serde_json::from_value(json).unwrap();
        let fills = node.fills.as_ref().unwrap();
        assert_eq!(fills[0].kind, PaintKind::Other("PATTERN".into()));
        assert_eq!(fills[1].kind, PaintKind::Solid);
        assert!(!node.effects[0].kind.is_shadow());

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["fills"][0]["type"], "PATTERN");
        assert_eq!(back["fills"][0]["sourceNodeId"], "9:9");
        assert_eq!(back["effects"][0]["type"], "NOISE");
    }
}
