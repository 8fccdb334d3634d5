//! Font family, weights and the text scale.

use serde::Serialize;

use crate::scale::Scale;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FontWeights {
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
    pub black: u16,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FontTokens {
    pub family: &'static str,
    pub weight: FontWeights,
}

pub const FONT: FontTokens = FontTokens {
    family: "\"Inter\", sans-serif",
    weight: FontWeights {
        normal: 400,
        medium: 500,
        semibold: 600,
        bold: 800,
        black: 900,
    },
};

/// Size and line height in px, with an optional weight for semantic styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: u16,
    pub line_height: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
}

const fn size(font_size: u16, line_height: u16) -> TextStyle {
    TextStyle {
        font_size,
        line_height,
        font_weight: None,
    }
}

const fn styled(font_size: u16, line_height: u16, weight: u16) -> TextStyle {
    TextStyle {
        font_size,
        line_height,
        font_weight: Some(weight),
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TextTokens {
    #[serde(flatten)]
    pub scale: Scale<TextStyle>,
    pub heading: Scale<TextStyle>,
    pub body: Scale<TextStyle>,
    pub label: Scale<TextStyle>,
    pub caption: TextStyle,
}

pub const TEXT: TextTokens = TextTokens {
    scale: Scale(&[
        ("xs", size(10, 14)),
        ("s", size(12, 16)),
        ("m", size(14, 20)),
        ("l", size(16, 24)),
        ("xl", size(18, 26)),
        ("2xl", size(24, 32)),
        ("3xl", size(32, 40)),
        ("hero", size(36, 46)),
    ]),
    heading: Scale(&[
        ("xl", styled(24, 32, FONT.weight.semibold)),
        ("l", styled(18, 26, FONT.weight.semibold)),
        ("m", styled(16, 24, FONT.weight.medium)),
    ]),
    body: Scale(&[
        ("l", styled(16, 24, FONT.weight.normal)),
        ("m", styled(14, 20, FONT.weight.normal)),
        ("s", styled(12, 16, FONT.weight.normal)),
    ]),
    label: Scale(&[
        ("m", styled(14, 20, FONT.weight.medium)),
        ("s", styled(12, 16, FONT.weight.medium)),
    ]),
    caption: styled(10, 14, FONT.weight.normal),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_styles_reuse_scale() {
        assert_eq!(TEXT.heading.get("xl").unwrap().font_size, TEXT.scale.get("2xl").unwrap().font_size);
        assert_eq!(TEXT.caption.font_weight, Some(400));
    }

    #[test]
    fn test_export_shape() {
        let json = serde_json::to_value(TEXT).unwrap();
        assert_eq!(json["2xl"]["fontSize"], 24);
        assert!(json["m"].get("fontWeight").is_none());
        assert_eq!(json["label"]["s"]["fontWeight"], 500);
    }
}
