//! Layer 1: color primitives.
//!
//! Primitives are named ramps (`family/step`). They are never used directly by
//! components; semantic tokens alias them instead.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TokenError;

// ── Rgba ───────────────────────────────────────────────────────────

/// An sRGB color with 8-bit channels and a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0.0);
    pub const BLACK: Rgba = Rgba::hex(0x000000);
    pub const WHITE: Rgba = Rgba::hex(0xFFFFFF);

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from normalized `0.0..=1.0` channels, as design tools store them.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: a.clamp(0.0, 1.0) as f32,
        }
    }

    /// Normalized `[r, g, b, a]` channels.
    pub fn to_unit(self) -> [f64; 4] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a),
        ]
    }

    pub fn is_opaque(&self) -> bool {
        (self.a - 1.0).abs() < f32::EPSILON
    }

    pub fn is_transparent(&self) -> bool {
        self.a.abs() < f32::EPSILON
    }

    /// CSS text: `#RRGGBB` when opaque, `transparent` for zero alpha,
    /// `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else if self.is_transparent() && self.r == 0 && self.g == 0 && self.b == 0 {
            "transparent".to_string()
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(...)`, `rgba(...)` or `transparent`.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| TokenError::InvalidColor(s.to_string()));
        }
        let body = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| TokenError::InvalidColor(s.to_string()))?;
        parse_functional(body).ok_or_else(|| TokenError::InvalidColor(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Rgba::rgba(out[0], out[1], out[2], 1.0))
        }
        6 => Some(Rgba::rgba(channel(0)?, channel(2)?, channel(4)?, 1.0)),
        8 => Some(Rgba::rgba(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            f32::from(channel(6)?) / 255.0,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let (r, g, b) = match parts.as_slice() {
        [r, g, b] | [r, g, b, _] => (r.parse().ok()?, g.parse().ok()?, b.parse().ok()?),
        _ => return None,
    };
    let a = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?,
        None => 1.0,
    };
    Some(Rgba::rgba(r, g, b, a))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::parse(s)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ── Primitives ─────────────────────────────────────────────────────

/// One named step of a color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub group: Option<&'static str>,
    pub family: &'static str,
    pub step: &'static str,
    pub value: Rgba,
}

impl Primitive {
    /// Hierarchical name as stored in the primitive collection, e.g. `neutral/0`
    /// or `additional/purple/500`.
    pub fn name(&self) -> String {
        match self.group {
            Some(group) => format!("{group}/{}/{}", self.family, self.step),
            None => format!("{}/{}", self.family, self.step),
        }
    }
}

/// All steps of one color family.
#[derive(Debug, Clone, Copy)]
pub struct Ramp {
    pub group: Option<&'static str>,
    pub family: &'static str,
    pub steps: &'static [Primitive],
}

impl Ramp {
    pub fn get(&self, step: &str) -> Option<&'static Primitive> {
        self.steps.iter().find(|p| p.step == step)
    }
}

impl Serialize for Ramp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for primitive in self.steps {
            map.serialize_entry(primitive.step, &primitive.value)?;
        }
        map.end()
    }
}

macro_rules! ramp {
    ($(#[$meta:meta])* $module:ident, $group:expr, $family:literal {
        $($konst:ident = $step:literal => $value:expr),+ $(,)?
    }) => {
        $(#[$meta])*
        pub mod $module {
            use $crate::color::{Primitive, Ramp, Rgba};

            $(
                pub const $konst: Primitive = Primitive {
                    group: $group,
                    family: $family,
                    step: $step,
                    value: $value,
                };
            )+

            pub const RAMP: Ramp = Ramp {
                group: $group,
                family: $family,
                steps: &[$($konst),+],
            };
        }
    };
}

ramp!(neutral, None, "neutral" {
    S0 = "0" => Rgba::hex(0xFFFFFF),
    S50 = "50" => Rgba::hex(0xFAFAFA),
    S100 = "100" => Rgba::hex(0xF5F5F5),
    S200 = "200" => Rgba::hex(0xE9EAEB),
    S300 = "300" => Rgba::hex(0xD5D7DA),
    S400 = "400" => Rgba::hex(0xA4A7AE),
    S500 = "500" => Rgba::hex(0x717680),
    S600 = "600" => Rgba::hex(0x535862),
    S700 = "700" => Rgba::hex(0x414651),
    S800 = "800" => Rgba::hex(0x252B37),
    S900 = "900" => Rgba::hex(0x181D27),
    S950 = "950" => Rgba::hex(0x0A0D12),
});

ramp!(primary, None, "primary" {
    S50 = "50" => Rgba::hex(0xF9F5FF),
    S100 = "100" => Rgba::hex(0xF4EBFF),
    S200 = "200" => Rgba::hex(0xE9D7FE),
    S300 = "300" => Rgba::hex(0xD6BBFB),
    S400 = "400" => Rgba::hex(0xB692F6),
    S500 = "500" => Rgba::hex(0x9E77ED),
    S600 = "600" => Rgba::hex(0x7F56D9),
    S700 = "700" => Rgba::hex(0x6941C6),
    S800 = "800" => Rgba::hex(0x53389E),
    S900 = "900" => Rgba::hex(0x42307D),
    S950 = "950" => Rgba::hex(0x2C1C5F),
});

ramp!(info, None, "info" {
    S50 = "50" => Rgba::hex(0xEFF8FF),
    S100 = "100" => Rgba::hex(0xD1E9FF),
    S200 = "200" => Rgba::hex(0xB2DDFF),
    S300 = "300" => Rgba::hex(0x84CAFF),
    S400 = "400" => Rgba::hex(0x53B1FD),
    S500 = "500" => Rgba::hex(0x2E90FA),
    S600 = "600" => Rgba::hex(0x1570EF),
    S700 = "700" => Rgba::hex(0x175CD3),
    S800 = "800" => Rgba::hex(0x1849A9),
    S900 = "900" => Rgba::hex(0x194185),
    S950 = "950" => Rgba::hex(0x102A56),
});

ramp!(success, None, "success" {
    S50 = "50" => Rgba::hex(0xECFDF3),
    S100 = "100" => Rgba::hex(0xD1FADF),
    S200 = "200" => Rgba::hex(0xA6F4C5),
    S300 = "300" => Rgba::hex(0x6CE9A6),
    S400 = "400" => Rgba::hex(0x32D583),
    S500 = "500" => Rgba::hex(0x12B76A),
    S600 = "600" => Rgba::hex(0x039855),
    S700 = "700" => Rgba::hex(0x027A48),
    S800 = "800" => Rgba::hex(0x05603A),
    S900 = "900" => Rgba::hex(0x054F31),
    S950 = "950" => Rgba::hex(0x053321),
});

ramp!(warning, None, "warning" {
    S50 = "50" => Rgba::hex(0xFFFAEB),
    S100 = "100" => Rgba::hex(0xFEF0C7),
    S200 = "200" => Rgba::hex(0xFEDF89),
    S300 = "300" => Rgba::hex(0xFEC84B),
    S400 = "400" => Rgba::hex(0xFDB022),
    S500 = "500" => Rgba::hex(0xF79009),
    S600 = "600" => Rgba::hex(0xDC6803),
    S700 = "700" => Rgba::hex(0xB54708),
    S800 = "800" => Rgba::hex(0x93370D),
    S900 = "900" => Rgba::hex(0x7A2E0E),
    S950 = "950" => Rgba::hex(0x4E1D09),
});

ramp!(danger, None, "danger" {
    S50 = "50" => Rgba::hex(0xFEF3F2),
    S100 = "100" => Rgba::hex(0xFEE4E2),
    S200 = "200" => Rgba::hex(0xFECDCA),
    S300 = "300" => Rgba::hex(0xFDA29B),
    S400 = "400" => Rgba::hex(0xF97066),
    S500 = "500" => Rgba::hex(0xF04438),
    S600 = "600" => Rgba::hex(0xD92D20),
    S700 = "700" => Rgba::hex(0xB42318),
    S800 = "800" => Rgba::hex(0x912018),
    S900 = "900" => Rgba::hex(0x7A271A),
    S950 = "950" => Rgba::hex(0x55160C),
});

/// Decorative hues outside the intent set.
pub mod additional {
    ramp!(purple, Some("additional"), "purple" {
        S100 = "100" => Rgba::hex(0xF8CFFC),
        S300 = "300" => Rgba::hex(0xEF9CF9),
        S500 = "500" => Rgba::hex(0xE244F3),
        S700 = "700" => Rgba::hex(0xB20DC5),
    });
    ramp!(violet, Some("additional"), "violet" {
        S100 = "100" => Rgba::hex(0xE3CBFB),
        S300 = "300" => Rgba::hex(0xBA7EF5),
        S500 = "500" => Rgba::hex(0x9439EF),
        S700 = "700" => Rgba::hex(0x620FB3),
    });
    ramp!(pink, Some("additional"), "pink" {
        S100 = "100" => Rgba::hex(0xFFE0F3),
        S300 = "300" => Rgba::hex(0xFFB2E1),
        S500 = "500" => Rgba::hex(0xFF4ABA),
        S700 = "700" => Rgba::hex(0xD60084),
    });
    ramp!(blue, Some("additional"), "blue" {
        S100 = "100" => Rgba::hex(0xE6E9FF),
        S300 = "300" => Rgba::hex(0xC0C7FF),
        S500 = "500" => Rgba::hex(0x475DFF),
        S700 = "700" => Rgba::hex(0x0019D6),
    });
    ramp!(teal, Some("additional"), "teal" {
        S100 = "100" => Rgba::hex(0xC8F8FE),
        S300 = "300" => Rgba::hex(0x76EDFD),
        S500 = "500" => Rgba::hex(0x03CCE7),
        S700 = "700" => Rgba::hex(0x03A6BB),
    });
    ramp!(yellow, Some("additional"), "yellow" {
        S100 = "100" => Rgba::hex(0xFFF1C5),
        S300 = "300" => Rgba::hex(0xFFDB6E),
        S500 = "500" => Rgba::hex(0xFFC71F),
        S700 = "700" => Rgba::hex(0xD6A100),
    });
    ramp!(green, Some("additional"), "green" {
        S100 = "100" => Rgba::hex(0xC8FDC7),
        S300 = "300" => Rgba::hex(0x76F974),
        S500 = "500" => Rgba::hex(0x0CC308),
        S700 = "700" => Rgba::hex(0x099B06),
    });
    ramp!(gold, Some("additional"), "gold" {
        S100 = "100" => Rgba::hex(0xF4EECF),
        S300 = "300" => Rgba::hex(0xE4D486),
        S500 = "500" => Rgba::hex(0xDAC65D),
        S700 = "700" => Rgba::hex(0x9A8623),
    });
    ramp!(cinnamon, Some("additional"), "cinnamon" {
        S100 = "100" => Rgba::hex(0xF6E9E4),
        S300 = "300" => Rgba::hex(0xE6C1B2),
        S500 = "500" => Rgba::hex(0xCD866A),
        S700 = "700" => Rgba::hex(0x995033),
    });
    ramp!(orange, Some("additional"), "orange" {
        S100 = "100" => Rgba::hex(0xFFEAD7),
        S300 = "300" => Rgba::hex(0xFECA9A),
        S500 = "500" => Rgba::hex(0xFD9535),
        S700 = "700" => Rgba::hex(0xCA6202),
    });
}

/// White and black at fixed opacities.
pub mod opacity {
    ramp!(light, Some("opacity"), "light" {
        S20 = "20" => Rgba::rgba(255, 255, 255, 0.2),
        S40 = "40" => Rgba::rgba(255, 255, 255, 0.4),
        S60 = "60" => Rgba::rgba(255, 255, 255, 0.6),
        S80 = "80" => Rgba::rgba(255, 255, 255, 0.8),
    });
    ramp!(dark, Some("opacity"), "dark" {
        S20 = "20" => Rgba::rgba(0, 0, 0, 0.2),
        S40 = "40" => Rgba::rgba(0, 0, 0, 0.4),
        S60 = "60" => Rgba::rgba(0, 0, 0, 0.6),
        S80 = "80" => Rgba::rgba(0, 0, 0, 0.8),
    });
}

pub const RAMPS: &[Ramp] = &[
    neutral::RAMP,
    primary::RAMP,
    info::RAMP,
    success::RAMP,
    warning::RAMP,
    danger::RAMP,
    additional::purple::RAMP,
    additional::violet::RAMP,
    additional::pink::RAMP,
    additional::blue::RAMP,
    additional::teal::RAMP,
    additional::yellow::RAMP,
    additional::green::RAMP,
    additional::gold::RAMP,
    additional::cinnamon::RAMP,
    additional::orange::RAMP,
    opacity::light::RAMP,
    opacity::dark::RAMP,
];

/// Every primitive in ramp order.
pub fn primitives() -> impl Iterator<Item = &'static Primitive> {
    RAMPS.iter().flat_map(|ramp| ramp.steps.iter())
}

/// Look a primitive up by its hierarchical name.
pub fn find_primitive(name: &str) -> Option<&'static Primitive> {
    primitives().find(|p| p.name() == name)
}

/// The Layer 1 export. Grouped ramps (`additional`, `opacity`) nest one level deeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette;

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut emitted: Vec<&str> = Vec::new();
        for ramp in RAMPS {
            match ramp.group {
                None => map.serialize_entry(ramp.family, ramp)?,
                Some(group) if !emitted.contains(&group) => {
                    emitted.push(group);
                    map.serialize_entry(group, &RampGroup(group))?;
                }
                Some(_) => {}
            }
        }
        map.end()
    }
}

struct RampGroup(&'static str);

impl Serialize for RampGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for ramp in RAMPS.iter().filter(|r| r.group == Some(self.0)) {
            map.serialize_entry(ramp.family, ramp)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_forms() {
        assert_eq!(neutral::S0.value.to_css(), "#FFFFFF");
        assert_eq!(Rgba::TRANSPARENT.to_css(), "transparent");
        assert_eq!(Rgba::rgba(0, 0, 0, 0.05).to_css(), "rgba(0, 0, 0, 0.05)");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Rgba::parse("#6941C6").unwrap(), primary::S700.value);
        assert_eq!(Rgba::parse("#fff").unwrap(), Rgba::WHITE);
        assert_eq!(
            Rgba::parse("rgba(255, 255, 255, 0.08)").unwrap(),
            Rgba::rgba(255, 255, 255, 0.08)
        );
        assert_eq!(Rgba::parse("transparent").unwrap(), Rgba::TRANSPARENT);
        assert!(Rgba::parse("#12345").is_err());
        assert!(matches!(Rgba::parse("#éa"), Err(TokenError::InvalidColor(_))));
        assert!(Rgba::parse("rgba(0, 0, 0, 1.5)").is_err());
        assert!(Rgba::parse("hsl(0, 0%, 0%)").is_err());
    }

    #[test]
    fn test_unit_channels() {
        let c = Rgba::from_unit(1.0, 0.0, 0.0, 0.5);
        assert_eq!(c, Rgba::rgba(255, 0, 0, 0.5));
        assert_eq!(Rgba::BLACK.to_unit(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_primitive_names() {
        assert_eq!(neutral::S950.name(), "neutral/950");
        assert_eq!(additional::teal::S500.name(), "additional/teal/500");
        assert_eq!(opacity::dark::S40.name(), "opacity/dark/40");
        assert_eq!(find_primitive("info/300"), Some(&info::S300));
        assert!(find_primitive("info/1000").is_none());
    }

    #[test]
    fn test_primitive_names_unique() {
        let mut names: Vec<String> = primitives().map(Primitive::name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_palette_export_shape() {
        let json = serde_json::to_value(Palette).unwrap();
        assert_eq!(json["neutral"]["0"], "#FFFFFF");
        assert_eq!(json["additional"]["gold"]["500"], "#DAC65D");
        assert_eq!(json["opacity"]["dark"]["20"], "rgba(0, 0, 0, 0.2)");
    }
}
