//! Box shadows, raw and by surface elevation.

use serde::Serialize;

use crate::color::info;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShadowScale {
    pub sm: &'static str,
    pub md: &'static str,
    pub lg: &'static str,
}

const ELEVATION: ShadowScale = ShadowScale {
    sm: "0 1px 2px rgba(0, 0, 0, 0.05)",
    md: "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -2px rgba(0, 0, 0, 0.1)",
    lg: "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -4px rgba(0, 0, 0, 0.1)",
};

#[derive(Debug, Clone, Serialize)]
pub struct FocusShadow {
    pub ring: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShadowTokens {
    pub raw: ShadowScale,
    pub surface: ShadowScale,
    pub overlay: &'static str,
    pub focus: FocusShadow,
}

/// A 2px focus ring in the info/300 primitive.
pub fn focus_ring() -> String {
    format!("0 0 0 2px {}", info::S300.value)
}

pub fn shadow_tokens() -> ShadowTokens {
    ShadowTokens {
        raw: ELEVATION,
        surface: ELEVATION,
        overlay: "0 25px 50px -12px rgba(0, 0, 0, 0.25)",
        focus: FocusShadow { ring: focus_ring() },
    }
}
