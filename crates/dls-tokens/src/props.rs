//! Prop surface of the Button and Accordion components.
//!
//! Variants are closed enums so an unknown value is a compile error in Rust
//! callers and a parse error at the CLI boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::TokenError;
use crate::theme::Theme;

macro_rules! prop_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, default = $default:ident {
        $($variant:ident => $text:literal),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TokenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(TokenError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

prop_enum!(ButtonVariant, "button variant", default = Filled {
    Filled => "filled",
    Outline => "outline",
    Soft => "soft",
    Dotted => "dotted",
    Ghost => "ghost",
    Link => "link",
});

prop_enum!(ButtonIntent, "button intent", default = Neutral {
    Neutral => "neutral",
    Primary => "primary",
    Info => "info",
    Success => "success",
    Warning => "warning",
    Danger => "danger",
});

prop_enum!(ButtonSize, "button size", default = M {
    M => "m",
    S => "s",
});

prop_enum!(
    /// Interaction state tracked by an accordion trigger.
    AccordionItemState, "accordion state", default = Normal {
        Normal => "normal",
        Hover => "hover",
        Focus => "focus",
        Pressed => "pressed",
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonProps {
    pub variant: ButtonVariant,
    pub intent: ButtonIntent,
    pub size: ButtonSize,
    pub icon_only: bool,
    pub disabled: bool,
}

impl ButtonProps {
    /// The `data-*` attributes a button renders, which stylesheets key on.
    pub fn data_attributes(&self) -> Vec<(&'static str, &'static str)> {
        let mut attrs = vec![
            ("data-variant", self.variant.as_str()),
            ("data-intent", self.intent.as_str()),
            ("data-size", self.size.as_str()),
        ];
        if self.icon_only {
            attrs.push(("data-icon-only", "true"));
        }
        if self.disabled {
            attrs.push(("disabled", ""));
        }
        attrs
    }
}

/// Resolved inline style of one accordion item.
#[derive(Debug, Clone, PartialEq)]
pub struct AccordionItemStyle {
    pub background: Rgba,
    pub ring: Option<String>,
    pub opacity: f32,
    pub border: Rgba,
    pub title_fg: Rgba,
    pub content_fg: Rgba,
}

pub fn accordion_item_style(
    theme: Theme,
    state: AccordionItemState,
    disabled: bool,
) -> AccordionItemStyle {
    let tk = &crate::component(theme).accordion.item;

    let background = match state {
        AccordionItemState::Pressed if !disabled => tk.bg.pressed,
        AccordionItemState::Hover if !disabled => tk.bg.hover,
        _ => Rgba::TRANSPARENT,
    };
    let ring = (state == AccordionItemState::Focus).then(|| tk.focus.ring.clone());

    AccordionItemStyle {
        background,
        ring,
        opacity: if disabled { tk.disabled.opacity } else { 1.0 },
        border: tk.border,
        title_fg: tk.title_fg,
        content_fg: tk.content_fg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = ButtonProps::default();
        assert_eq!(props.variant, ButtonVariant::Filled);
        assert_eq!(props.intent, ButtonIntent::Neutral);
        assert_eq!(props.size, ButtonSize::M);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("soft".parse::<ButtonVariant>(), Ok(ButtonVariant::Soft));
        assert!("solid".parse::<ButtonVariant>().is_err());
        assert!("xl".parse::<ButtonSize>().is_err());
    }

    #[test]
    fn test_data_attributes() {
        let props = ButtonProps {
            intent: ButtonIntent::Danger,
            icon_only: true,
            ..Default::default()
        };
        let attrs = props.data_attributes();
        assert!(attrs.contains(&("data-intent", "danger")));
        assert!(attrs.contains(&("data-icon-only", "true")));
        assert!(!attrs.iter().any(|(name, _)| *name == "disabled"));

        let disabled = ButtonProps {
            disabled: true,
            ..props
        };
        assert!(disabled.data_attributes().contains(&("disabled", "")));
    }

    #[test]
    fn test_props_deserialize() {
        let props: ButtonProps =
            serde_json::from_str(r#"{"variant":"ghost","iconOnly":true}"#).unwrap();
        assert_eq!(props.variant, ButtonVariant::Ghost);
        assert!(props.icon_only);
        assert_eq!(props.size, ButtonSize::M);
    }

    #[test]
    fn test_accordion_states() {
        let hover = accordion_item_style(Theme::Default, AccordionItemState::Hover, false);
        assert_eq!(hover.background, Rgba::rgba(0, 0, 0, 0.05));
        assert!(hover.ring.is_none());

        let disabled = accordion_item_style(Theme::Default, AccordionItemState::Pressed, true);
        assert_eq!(disabled.background, Rgba::TRANSPARENT);
        assert_eq!(disabled.opacity, 0.38);

        let focus = accordion_item_style(Theme::Dark, AccordionItemState::Focus, false);
        assert_eq!(focus.ring.as_deref(), Some("0 0 0 2px #84CAFF"));
    }
}
