//! Layer 4: component tokens.
//!
//! For theming, white-label overrides and development only. Core design system
//! code should prefer semantic tokens.

use serde::Serialize;

use crate::color::Rgba;
use crate::semantic::{self, SemanticLayer};
use crate::shadow;
use crate::state;
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentTokens {
    pub button: ButtonTokens,
    pub input: InputTokens,
    pub table: TableTokens,
    pub dialog: DialogTokens,
    pub dropdown: DropdownTokens,
    pub sidebar: SidebarTokens,
    pub badge: BadgeTokens,
    pub alert: AlertTokens,
    pub accordion: AccordionTokens,
}

// ── Shared shapes ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseDisabled {
    pub base: Rgba,
    pub disabled: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocusableFill {
    pub base: Rgba,
    pub focus: Rgba,
    pub disabled: Rgba,
}

/// Background, foreground and border for one tone of a badge or alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub bg: Rgba,
    pub fg: Rgba,
    pub border: Rgba,
}

// ── Button ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonTokens {
    pub primary: PrimaryButton,
    pub secondary: SecondaryButton,
    pub ghost: GhostButton,
}

/// Hover and pressed are derived in stylesheets from `base` via the state
/// lightness deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimaryButton {
    pub bg: BaseDisabled,
    pub fg: BaseDisabled,
    pub border: BaseDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondaryButton {
    pub bg: FocusableFill,
    pub fg: BaseDisabled,
    pub border: InteractiveBorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractiveBorder {
    pub base: Rgba,
    pub hover: Rgba,
    pub pressed: Rgba,
    pub disabled: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GhostButton {
    pub bg: FocusableFill,
    pub fg: BaseDisabled,
}

// ── Input ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputTokens {
    pub bg: BaseDisabled,
    pub fg: InputForeground,
    pub border: InputBorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputForeground {
    pub base: Rgba,
    pub placeholder: Rgba,
    pub disabled: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBorder {
    pub base: Rgba,
    pub hover: Rgba,
    pub focus: Rgba,
    pub disabled: Rgba,
}

// ── Table / dialog / dropdown / sidebar ─────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableTokens {
    pub row: TableRow,
    pub header: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub bg: RowBackground,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowBackground {
    pub base: Rgba,
    pub selected: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DialogTokens {
    pub overlay: Rgba,
    pub bg: Rgba,
    pub border: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropdownTokens {
    pub bg: Rgba,
    pub border: Rgba,
    pub item: DropdownItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropdownItem {
    pub bg: BaseOnly,
    pub fg: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseOnly {
    pub base: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidebarTokens {
    pub bg: Rgba,
    pub border: Rgba,
    pub item: SidebarItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidebarItem {
    pub fg: SidebarItemForeground,
    pub bg: ActiveOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidebarItemForeground {
    pub base: Rgba,
    pub active: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveOnly {
    pub active: Rgba,
}

// ── Badge / alert ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeTokens {
    pub neutral: Tone,
    pub primary: Tone,
    pub success: Tone,
    pub warning: Tone,
    pub danger: Tone,
    pub info: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertTokens {
    pub neutral: Tone,
    pub success: Tone,
    pub warning: Tone,
    pub danger: Tone,
    pub info: Tone,
}

// ── Accordion ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordionTokens {
    pub item: AccordionItemTokens,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionItemTokens {
    pub border: Rgba,
    pub title_fg: Rgba,
    pub content_fg: Rgba,
    pub bg: AccordionBackground,
    pub focus: AccordionFocus,
    pub disabled: AccordionDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccordionBackground {
    pub hover: Rgba,
    pub pressed: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordionFocus {
    /// Full `box-shadow` value.
    pub ring: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccordionDisabled {
    pub opacity: f32,
}

// ── Derivation ──────────────────────────────────────────────────

/// Project the resolved semantic layer (plus state values) into component tokens.
pub fn component_tokens(theme: Theme) -> ComponentTokens {
    derive(&semantic::resolve(theme))
}

fn tone(intent: &semantic::Intent<Rgba>) -> Tone {
    Tone {
        bg: intent.subtle,
        fg: intent.text,
        border: intent.border,
    }
}

fn derive(s: &SemanticLayer<Rgba>) -> ComponentTokens {
    let state = state::state_tokens();

    ComponentTokens {
        button: ButtonTokens {
            primary: PrimaryButton {
                bg: BaseDisabled {
                    base: s.intent.primary.base,
                    disabled: s.surface.disabled,
                },
                fg: BaseDisabled {
                    base: s.intent.primary.on_base,
                    disabled: s.text.disabled,
                },
                border: BaseDisabled {
                    base: s.intent.primary.base,
                    disabled: s.border.disabled,
                },
            },
            secondary: SecondaryButton {
                bg: FocusableFill {
                    base: s.surface.subtle,
                    focus: s.surface.base,
                    disabled: s.surface.disabled,
                },
                fg: BaseDisabled {
                    base: s.text.primary,
                    disabled: s.text.disabled,
                },
                border: InteractiveBorder {
                    base: s.border.base,
                    hover: s.border.strong,
                    pressed: s.border.strong,
                    disabled: s.border.disabled,
                },
            },
            ghost: GhostButton {
                bg: FocusableFill {
                    base: Rgba::TRANSPARENT,
                    focus: s.surface.base,
                    disabled: Rgba::TRANSPARENT,
                },
                fg: BaseDisabled {
                    base: s.text.primary,
                    disabled: s.text.disabled,
                },
            },
        },
        input: InputTokens {
            bg: BaseDisabled {
                base: s.surface.base,
                disabled: s.surface.disabled,
            },
            fg: InputForeground {
                base: s.text.primary,
                placeholder: s.text.placeholder,
                disabled: s.text.disabled,
            },
            border: InputBorder {
                base: s.border.base,
                hover: s.border.strong,
                focus: s.border.focus,
                disabled: s.border.disabled,
            },
        },
        table: TableTokens {
            row: TableRow {
                bg: RowBackground {
                    base: Rgba::TRANSPARENT,
                    selected: s.intent.primary.subtle,
                },
            },
            header: Tone {
                bg: s.surface.muted,
                fg: s.text.secondary,
                border: s.border.subtle,
            },
        },
        dialog: DialogTokens {
            overlay: s.overlay.scrim,
            bg: s.surface.base,
            border: s.border.subtle,
        },
        dropdown: DropdownTokens {
            bg: s.surface.base,
            border: s.border.base,
            item: DropdownItem {
                bg: BaseOnly {
                    base: Rgba::TRANSPARENT,
                },
                fg: s.text.primary,
            },
        },
        sidebar: SidebarTokens {
            bg: s.surface.subtle,
            border: s.border.subtle,
            item: SidebarItem {
                fg: SidebarItemForeground {
                    base: s.text.secondary,
                    active: s.text.primary,
                },
                bg: ActiveOnly {
                    active: s.surface.muted,
                },
            },
        },
        badge: BadgeTokens {
            neutral: tone(&s.intent.neutral),
            primary: tone(&s.intent.primary),
            success: tone(&s.intent.success),
            warning: tone(&s.intent.warning),
            danger: tone(&s.intent.danger),
            info: tone(&s.intent.info),
        },
        alert: AlertTokens {
            neutral: Tone {
                bg: s.surface.muted,
                fg: s.text.primary,
                border: s.border.base,
            },
            success: tone(&s.intent.success),
            warning: tone(&s.intent.warning),
            danger: tone(&s.intent.danger),
            info: tone(&s.intent.info),
        },
        accordion: AccordionTokens {
            item: AccordionItemTokens {
                border: s.border.base,
                title_fg: s.text.primary,
                content_fg: s.text.secondary,
                // Light overlays in both themes.
                bg: AccordionBackground {
                    hover: state.overlay.hover.light,
                    pressed: state.overlay.pressed.light,
                },
                focus: AccordionFocus {
                    ring: shadow::focus_ring(),
                },
                disabled: AccordionDisabled {
                    opacity: state.disabled.opacity,
                },
            },
        },
    }
}
