//! Layer 3: interaction state.
//!
//! Behavioral values only. Lightness deltas are applied in stylesheets; the
//! overlay colors approximate them for tools that cannot shift OKLCH lightness.

use serde::Serialize;

use crate::color::{info, Rgba};
use crate::semantic::{alias, literal, token_group, SemanticToken};
use crate::theme::Theme;

token_group!(
    /// State colors that are also published as remote variables.
    StateColors { focus_ring, hover_overlay, pressed_overlay }
);

pub static STATE_COLORS: StateColors<SemanticToken> = StateColors {
    focus_ring: alias("state/focus/ring", "Focus ring color", info::S300, info::S400),
    hover_overlay: literal(
        "state/hover-overlay",
        "Opacity overlay for hover state. Apply as second fill layer in Figma.",
        Rgba::rgba(0, 0, 0, 0.05),
        Rgba::rgba(255, 255, 255, 0.08),
    ),
    pressed_overlay: literal(
        "state/pressed-overlay",
        "Opacity overlay for pressed state. Apply as second fill layer in Figma.",
        Rgba::rgba(0, 0, 0, 0.10),
        Rgba::rgba(255, 255, 255, 0.15),
    ),
};

pub const HOVER_L_DELTA: f32 = -0.05;
pub const PRESSED_L_DELTA: f32 = -0.10;
pub const DISABLED_OPACITY: f32 = 0.38;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTokens {
    /// OKLCH lightness shift, e.g. `oklch(from <base> calc(l + delta) c h)`.
    pub l_delta: LightnessDelta,
    pub overlay: StateOverlays,
    pub disabled: DisabledState,
    pub focus: FocusState,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LightnessDelta {
    pub hover: f32,
    pub pressed: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StateOverlays {
    pub hover: OverlayPair,
    pub pressed: OverlayPair,
}

/// Light overlays darken; dark overlays brighten.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OverlayPair {
    pub light: Rgba,
    pub dark: Rgba,
}

impl OverlayPair {
    fn from_token(token: &SemanticToken) -> Self {
        Self {
            light: token.resolve(Theme::Default),
            dark: token.resolve(Theme::Dark),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisabledState {
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FocusState {
    pub ring: FocusRingColor,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FocusRingColor {
    pub color: Rgba,
}

pub fn state_tokens() -> StateTokens {
    StateTokens {
        l_delta: LightnessDelta {
            hover: HOVER_L_DELTA,
            pressed: PRESSED_L_DELTA,
        },
        overlay: StateOverlays {
            hover: OverlayPair::from_token(&STATE_COLORS.hover_overlay),
            pressed: OverlayPair::from_token(&STATE_COLORS.pressed_overlay),
        },
        disabled: DisabledState {
            opacity: DISABLED_OPACITY,
        },
        focus: FocusState {
            ring: FocusRingColor {
                color: STATE_COLORS.focus_ring.resolve(Theme::Default),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlays_follow_theme() {
        let state = state_tokens();
        assert_eq!(state.overlay.hover.light, Rgba::rgba(0, 0, 0, 0.05));
        assert_eq!(
            state.overlay.pressed.dark,
            Rgba::rgba(255, 255, 255, 0.15)
        );
    }

    #[test]
    fn test_export_keys() {
        let json = serde_json::to_value(state_tokens()).unwrap();
        assert_eq!(json["focus"]["ring"]["color"], "#84CAFF");
        assert!(json["lDelta"]["pressed"].as_f64().unwrap() < 0.0);
        assert_eq!(json["overlay"]["hover"]["dark"], "rgba(255, 255, 255, 0.08)");
    }
}
