//! Numeric scales: radius, spacing (8pt grid) and icon stroke widths.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered, keyed scale. Serializes as a map in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Scale<T: 'static>(pub &'static [(&'static str, T)]);

impl<T: Copy + 'static> Scale<T> {
    pub fn get(&self, key: &str) -> Option<T> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Serialize + 'static> Serialize for Scale<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── Radius ───────────────────────────────────────────────────────

pub const RADIUS_SCALE: Scale<u16> = Scale(&[
    ("0", 0),
    ("xs", 2),
    ("s", 4),
    ("m", 6),
    ("l", 8),
    ("xl", 12),
    ("2xl", 16),
    ("full", 9999),
]);

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComponentRadius {
    pub button: u16,
    pub card: u16,
    pub modal: u16,
    pub input: u16,
    pub badge: u16,
    pub chip: u16,
    pub tooltip: u16,
    pub dropdown: u16,
    pub alert: u16,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RadiusTokens {
    #[serde(flatten)]
    pub scale: Scale<u16>,
    pub component: ComponentRadius,
}

pub const RADIUS: RadiusTokens = RadiusTokens {
    scale: RADIUS_SCALE,
    component: ComponentRadius {
        button: 6,
        card: 8,
        modal: 12,
        input: 4,
        badge: 9999,
        chip: 9999,
        tooltip: 4,
        dropdown: 6,
        alert: 6,
    },
};

// ── Spacing ──────────────────────────────────────────────────────

pub const SPACING: Scale<u16> = Scale(&[
    ("0", 0),
    ("0.5", 2),
    ("1", 4),
    ("1.5", 6),
    ("2", 8),
    ("2.5", 10),
    ("3", 12),
    ("4", 16),
    ("6", 24),
    ("8", 32),
    ("10", 40),
    ("11", 44),
    ("12", 48),
    ("14", 56),
    ("16", 64),
]);

// ── Icon stroke ──────────────────────────────────────────────────

/// Stroke width keyed by icon size.
pub const ICON_STROKE: Scale<f32> = Scale(&[("12", 1.0), ("16", 1.33), ("24", 2.0)]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_on_grid() {
        for key in SPACING.keys() {
            let step: f32 = key.parse().unwrap();
            assert_eq!(f32::from(SPACING.get(key).unwrap()), step * 4.0);
        }
    }

    #[test]
    fn test_radius_flattens() {
        let json = serde_json::to_value(RADIUS).unwrap();
        assert_eq!(json["full"], 9999);
        assert_eq!(json["component"]["modal"], 12);
    }

    #[test]
    fn test_icon_stroke() {
        assert_eq!(ICON_STROKE.get("16"), Some(1.33));
        assert_eq!(ICON_STROKE.get("20"), None);
    }
}
