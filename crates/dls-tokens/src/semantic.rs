//! Layer 2: system semantics.
//!
//! Each semantic token carries its remote variable name, a description and one
//! [`Source`] per theme. The typed palette that components read is resolved from
//! this same table, so code and the design tool share a single definition.

use serde::Serialize;

use crate::color::{danger, info, neutral, primary, success, warning, Primitive, Rgba};
use crate::theme::Theme;

/// Where a semantic value comes from in a given theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// Alias to exactly one primitive. Aliases never chain.
    Alias(Primitive),
    /// Raw value with no primitive behind it (overlays, scrims).
    Literal(Rgba),
}

impl Source {
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Alias(primitive) => primitive.value,
            Self::Literal(value) => *value,
        }
    }

    pub fn primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Alias(primitive) => Some(primitive),
            Self::Literal(_) => None,
        }
    }
}

/// A canonical semantic variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticToken {
    pub name: &'static str,
    pub description: &'static str,
    pub default: Source,
    pub dark: Source,
}

impl SemanticToken {
    pub const fn alias(
        name: &'static str,
        description: &'static str,
        default: Primitive,
        dark: Primitive,
    ) -> Self {
        Self {
            name,
            description,
            default: Source::Alias(default),
            dark: Source::Alias(dark),
        }
    }

    pub const fn literal(
        name: &'static str,
        description: &'static str,
        default: Rgba,
        dark: Rgba,
    ) -> Self {
        Self {
            name,
            description,
            default: Source::Literal(default),
            dark: Source::Literal(dark),
        }
    }

    pub fn source(&self, theme: Theme) -> Source {
        match theme {
            Theme::Default => self.default,
            Theme::Dark => self.dark,
        }
    }

    pub fn resolve(&self, theme: Theme) -> Rgba {
        self.source(theme).resolve()
    }

    /// True when no mode aliases a primitive.
    pub fn is_raw(&self) -> bool {
        Theme::ALL
            .iter()
            .all(|t| matches!(self.source(*t), Source::Literal(_)))
    }
}

// ── Token groups ───────────────────────────────────────────────────

/// Declares a flat group of tokens generic over the leaf type, with `map` and
/// `leaves` in field order.
macro_rules! token_group {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name<T> {
            $(pub $field: T,)+
        }

        impl<T> $name<T> {
            pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> $name<U> {
                $name {
                    $($field: f(&self.$field),)+
                }
            }

            pub fn leaves(&self) -> Vec<&T> {
                vec![$(&self.$field),+]
            }
        }
    };
}

pub(crate) use token_group;

token_group!(
    /// App surfaces, lowest to highest emphasis.
    Surface { base, subtle, muted, strong, inverse, disabled }
);
token_group!(Text { primary, secondary, inverse, disabled, placeholder });
token_group!(Border { base, subtle, strong, focus, disabled, inverse });
token_group!(
    /// One intent's fill, foreground and outline roles.
    Intent { base, on_base, subtle, strong, text, border }
);
token_group!(Overlay { scrim, backdrop });

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intents<T> {
    pub primary: Intent<T>,
    pub success: Intent<T>,
    pub warning: Intent<T>,
    pub danger: Intent<T>,
    pub info: Intent<T>,
    pub neutral: Intent<T>,
}

impl<T> Intents<T> {
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Intents<U> {
        Intents {
            primary: self.primary.map(&mut f),
            success: self.success.map(&mut f),
            warning: self.warning.map(&mut f),
            danger: self.danger.map(&mut f),
            info: self.info.map(&mut f),
            neutral: self.neutral.map(&mut f),
        }
    }

    pub fn leaves(&self) -> Vec<&T> {
        [
            &self.primary,
            &self.success,
            &self.warning,
            &self.danger,
            &self.info,
            &self.neutral,
        ]
        .into_iter()
        .flat_map(Intent::leaves)
        .collect()
    }
}

/// The whole semantic layer for one leaf type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticLayer<T> {
    pub surface: Surface<T>,
    pub text: Text<T>,
    pub border: Border<T>,
    pub intent: Intents<T>,
    pub overlay: Overlay<T>,
}

impl<T> SemanticLayer<T> {
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> SemanticLayer<U> {
        SemanticLayer {
            surface: self.surface.map(&mut f),
            text: self.text.map(&mut f),
            border: self.border.map(&mut f),
            intent: self.intent.map(&mut f),
            overlay: self.overlay.map(&mut f),
        }
    }

    pub fn leaves(&self) -> Vec<&T> {
        let mut out = self.surface.leaves();
        out.extend(self.text.leaves());
        out.extend(self.border.leaves());
        out.extend(self.intent.leaves());
        out.extend(self.overlay.leaves());
        out
    }
}

// ── Definitions ────────────────────────────────────────────────────

pub(crate) const fn alias(
    name: &'static str,
    description: &'static str,
    default: Primitive,
    dark: Primitive,
) -> SemanticToken {
    SemanticToken::alias(name, description, default, dark)
}

pub(crate) const fn literal(
    name: &'static str,
    description: &'static str,
    default: Rgba,
    dark: Rgba,
) -> SemanticToken {
    SemanticToken::literal(name, description, default, dark)
}

const SCRIM: Rgba = Rgba::rgba(0, 0, 0, 0.5);
const BACKDROP: Rgba = Rgba::rgba(0, 0, 0, 0.3);

pub static SEMANTIC: SemanticLayer<SemanticToken> = SemanticLayer {
    surface: Surface {
        base: alias("surface/base", "Primary app surface", neutral::S0, neutral::S950),
        subtle: alias("surface/subtle", "Secondary surface", neutral::S50, neutral::S900),
        muted: alias("surface/muted", "Tertiary surface", neutral::S100, neutral::S800),
        strong: alias("surface/strong", "Strong surface", neutral::S300, neutral::S700),
        inverse: alias("surface/inverse", "Inverted surface", neutral::S900, neutral::S0),
        disabled: alias("surface/disabled", "Disabled surface", neutral::S50, neutral::S800),
    },
    text: Text {
        primary: alias("text/primary", "Primary text and icons", neutral::S900, neutral::S0),
        secondary: alias("text/secondary", "Secondary text", neutral::S700, neutral::S200),
        inverse: alias("text/inverse", "Text on inverse surfaces", neutral::S0, neutral::S950),
        disabled: alias("text/disabled", "Disabled text", neutral::S500, neutral::S500),
        placeholder: alias("text/placeholder", "Placeholder text", neutral::S600, neutral::S400),
    },
    border: Border {
        base: alias("border/base", "Default border", neutral::S300, neutral::S600),
        subtle: alias("border/subtle", "Subtle border", neutral::S200, neutral::S700),
        strong: alias("border/strong", "Strong border", neutral::S500, neutral::S400),
        focus: alias("border/focus", "Focus border", neutral::S700, neutral::S100),
        disabled: alias("border/disabled", "Disabled border", neutral::S200, neutral::S700),
        inverse: alias(
            "border/inverse",
            "Border on inverse/dark surfaces",
            neutral::S0,
            neutral::S950,
        ),
    },
    intent: Intents {
        primary: Intent {
            base: alias("intent/primary/base", "Primary intent filled", primary::S700, primary::S600),
            on_base: alias(
                "intent/primary/on-base",
                "Foreground on primary base",
                neutral::S0,
                neutral::S0,
            ),
            subtle: alias("intent/primary/subtle", "Primary subtle bg", primary::S50, primary::S900),
            strong: alias("intent/primary/strong", "Primary strong", primary::S800, primary::S500),
            text: alias("intent/primary/text", "Primary text", primary::S900, primary::S300),
            border: alias("intent/primary/border", "Primary border", primary::S200, primary::S600),
        },
        success: Intent {
            base: alias("intent/success/base", "Success filled", success::S700, success::S500),
            on_base: alias(
                "intent/success/on-base",
                "Foreground on success base",
                neutral::S0,
                neutral::S950,
            ),
            subtle: alias("intent/success/subtle", "Success subtle", success::S50, success::S900),
            strong: alias("intent/success/strong", "Success strong", success::S800, success::S400),
            text: alias("intent/success/text", "Success text", success::S900, success::S300),
            border: alias("intent/success/border", "Success border", success::S200, success::S600),
        },
        warning: Intent {
            base: alias("intent/warning/base", "Warning filled", warning::S700, warning::S500),
            on_base: alias(
                "intent/warning/on-base",
                "Foreground on warning base",
                neutral::S0,
                neutral::S950,
            ),
            subtle: alias("intent/warning/subtle", "Warning subtle", warning::S50, warning::S900),
            strong: alias("intent/warning/strong", "Warning strong", warning::S800, warning::S400),
            text: alias("intent/warning/text", "Warning text", warning::S900, warning::S300),
            border: alias("intent/warning/border", "Warning border", warning::S200, warning::S600),
        },
        danger: Intent {
            base: alias("intent/danger/base", "Danger filled", danger::S600, danger::S600),
            on_base: alias(
                "intent/danger/on-base",
                "Foreground on danger base",
                neutral::S0,
                neutral::S0,
            ),
            subtle: alias("intent/danger/subtle", "Danger subtle", danger::S50, danger::S900),
            strong: alias("intent/danger/strong", "Danger strong", danger::S700, danger::S500),
            text: alias("intent/danger/text", "Danger text", danger::S900, danger::S300),
            border: alias("intent/danger/border", "Danger border", danger::S200, danger::S600),
        },
        info: Intent {
            base: alias("intent/info/base", "Info filled", info::S700, info::S600),
            on_base: alias(
                "intent/info/on-base",
                "Foreground on info base",
                neutral::S0,
                neutral::S0,
            ),
            subtle: alias("intent/info/subtle", "Info subtle", info::S50, info::S900),
            strong: alias("intent/info/strong", "Info strong", info::S800, info::S500),
            text: alias("intent/info/text", "Info text", info::S900, info::S300),
            border: alias("intent/info/border", "Info border", info::S200, info::S600),
        },
        neutral: Intent {
            base: alias("intent/neutral/base", "Neutral filled", neutral::S800, neutral::S50),
            on_base: alias(
                "intent/neutral/on-base",
                "Foreground on neutral base",
                neutral::S0,
                neutral::S950,
            ),
            subtle: alias("intent/neutral/subtle", "Neutral subtle", neutral::S50, neutral::S800),
            strong: alias("intent/neutral/strong", "Neutral strong", neutral::S900, neutral::S100),
            text: alias("intent/neutral/text", "Neutral text", neutral::S900, neutral::S200),
            border: alias("intent/neutral/border", "Neutral border", neutral::S200, neutral::S700),
        },
    },
    overlay: Overlay {
        scrim: literal("overlay/scrim", "Scrim behind modals and overlays.", SCRIM, SCRIM),
        backdrop: literal(
            "overlay/backdrop",
            "Lighter backdrop for non-blocking overlays.",
            BACKDROP,
            BACKDROP,
        ),
    },
};

/// Resolve the semantic layer for one theme. Every leaf is a concrete color.
pub fn resolve(theme: Theme) -> SemanticLayer<Rgba> {
    SEMANTIC.map(|token| token.resolve(theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        let s = resolve(Theme::Default);
        assert_eq!(s.surface.base, Rgba::hex(0xFFFFFF));
        assert_eq!(s.intent.primary.base, Rgba::hex(0x6941C6));
        assert_eq!(s.overlay.scrim, Rgba::rgba(0, 0, 0, 0.5));
    }

    #[test]
    fn test_resolve_dark() {
        let s = resolve(Theme::Dark);
        assert_eq!(s.surface.base, Rgba::hex(0x0A0D12));
        assert_eq!(s.intent.success.on_base, Rgba::hex(0x0A0D12));
        assert_eq!(s.text.primary, Rgba::hex(0xFFFFFF));
    }

    #[test]
    fn test_leaf_count_matches_table() {
        // 6 surface + 5 text + 6 border + 36 intent + 2 overlay
        assert_eq!(SEMANTIC.leaves().len(), 55);
    }

    #[test]
    fn test_overlays_are_raw() {
        assert!(SEMANTIC.overlay.scrim.is_raw());
        assert!(!SEMANTIC.surface.base.is_raw());
    }

    #[test]
    fn test_camel_case_export() {
        let json = serde_json::to_value(resolve(Theme::Default)).unwrap();
        assert_eq!(json["intent"]["primary"]["onBase"], "#FFFFFF");
        assert_eq!(json["surface"]["disabled"], "#FAFAFA");
    }
}
