//! DLS design tokens.
//!
//! Four layers: color primitives → system semantics → interaction state →
//! component tokens, for the `default` and `dark` themes. The whole set is
//! built once and exposed read-only through [`tokens`]; a consumer wanting the
//! other theme selects it by key rather than mutating anything.

pub mod color;
pub mod component;
pub mod error;
pub mod names;
pub mod props;
pub mod scale;
pub mod semantic;
pub mod shadow;
pub mod state;
pub mod theme;
pub mod typography;

use std::sync::LazyLock;

use serde::Serialize;

pub use color::{find_primitive, primitives, Palette, Primitive, Rgba};
pub use component::{component_tokens, ComponentTokens};
pub use error::TokenError;
pub use names::{NameMap, DEPRECATED_NAMES, LEGACY_BINDINGS};
pub use semantic::{SemanticLayer, SemanticToken, Source, SEMANTIC};
pub use state::{StateTokens, STATE_COLORS};
pub use theme::{Theme, Themed};

use scale::{RadiusTokens, Scale};
use shadow::ShadowTokens;
use typography::{FontTokens, TextTokens};

/// The full token export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub color: Palette,
    pub semantic: Themed<SemanticLayer<Rgba>>,
    pub state: StateTokens,
    pub component: Themed<ComponentTokens>,
    pub shadow: ShadowTokens,
    pub font: FontTokens,
    pub text: TextTokens,
    pub radius: RadiusTokens,
    pub spacing: Scale<u16>,
    pub icon_stroke: Scale<f32>,
}

static TOKENS: LazyLock<Tokens> = LazyLock::new(|| Tokens {
    color: Palette,
    semantic: Themed::from_fn(semantic::resolve),
    state: state::state_tokens(),
    component: Themed::from_fn(component_tokens),
    shadow: shadow::shadow_tokens(),
    font: typography::FONT,
    text: typography::TEXT,
    radius: scale::RADIUS,
    spacing: scale::SPACING,
    icon_stroke: scale::ICON_STROKE,
});

/// Process-wide token set, built on first access.
pub fn tokens() -> &'static Tokens {
    &TOKENS
}

pub fn semantic(theme: Theme) -> &'static SemanticLayer<Rgba> {
    tokens().semantic.get(theme)
}

pub fn component(theme: Theme) -> &'static ComponentTokens {
    tokens().component.get(theme)
}

/// Every canonical semantic variable published to the design tool, semantic
/// layer first, then state colors.
pub fn canonical_variables() -> Vec<&'static SemanticToken> {
    let mut out = SEMANTIC.leaves();
    out.extend(STATE_COLORS.leaves());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_unique() {
        let vars = canonical_variables();
        let mut names: Vec<&str> = vars.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vars.len());
        assert_eq!(vars.len(), 58);
    }

    #[test]
    fn test_aliases_point_at_known_primitives() {
        for token in canonical_variables() {
            for theme in Theme::ALL {
                if let Some(primitive) = token.source(theme).primitive() {
                    assert_eq!(find_primitive(&primitive.name()), Some(primitive));
                }
            }
        }
    }

    #[test]
    fn test_raw_variables() {
        let raw: Vec<&str> = canonical_variables()
            .into_iter()
            .filter(|t| t.is_raw())
            .map(|t| t.name)
            .collect();
        assert_eq!(
            raw,
            [
                "overlay/scrim",
                "overlay/backdrop",
                "state/hover-overlay",
                "state/pressed-overlay"
            ]
        );
    }

    #[test]
    fn test_theme_accessors() {
        assert_eq!(component(Theme::Default), &component_tokens(Theme::Default));
        assert_eq!(semantic(Theme::Dark).surface.base, Rgba::hex(0x0A0D12));
    }

    #[test]
    fn test_export_top_level_keys() {
        let json = serde_json::to_value(tokens()).unwrap();
        for key in [
            "color", "semantic", "state", "component", "shadow", "font", "text", "radius",
            "spacing", "iconStroke",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(
            json["component"]["default"]["accordion"]["item"]["bg"]["hover"],
            "rgba(0, 0, 0, 0.05)"
        );
        assert_eq!(json["spacing"]["0.5"], 2);
    }
}
