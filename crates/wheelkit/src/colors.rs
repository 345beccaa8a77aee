use derive_more::{Deref, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_COLORS: [&str; 14] = [
    "#fde047", "#f97316", "#ef4444", "#ec4899", "#d946ef", "#a855f7", "#8b5cf6", "#6366f1",
    "#3b82f6", "#0ea5e9", "#06b6d4", "#14b8a6", "#22c55e", "#84cc16",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn to_f64(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Srgb<u8>>().map(HexColor)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Colors cycled over the slices of the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceColors(Vec<HexColor>);

impl Default for SliceColors {
    fn default() -> Self {
        Self(
            DEFAULT_COLORS
                .iter()
                .filter_map(|hex| hex.parse().ok())
                .collect(),
        )
    }
}

impl SliceColors {
    /// Falls back to [`DEFAULT_COLORS`] when `colors` is empty.
    pub fn new(colors: Vec<HexColor>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self(colors)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn color_for(&self, index: usize) -> HexColor {
        self.0[index % self.0.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let colors = SliceColors::default();
        assert_eq!(colors.len(), 14);
        assert_eq!(colors.color_for(0).to_string(), "#fde047");
        assert_eq!(colors.color_for(13).to_string(), "#84cc16");
    }

    #[test]
    fn test_color_for_wraps() {
        let colors = SliceColors::default();
        for i in 0..50 {
            assert_eq!(colors.color_for(i), colors.color_for(i % 14));
        }
        assert_eq!(colors.color_for(14).to_string(), "#fde047");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        assert_eq!(SliceColors::new(Vec::new()), SliceColors::default());
        let custom = SliceColors::new(vec!["#000000".parse().unwrap()]);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.color_for(5).to_string(), "#000000");
    }

    #[test]
    fn test_hex_deserialization() {
        let cases = vec![
            ("\"#ef4444\"", (0xef, 0x44, 0x44)),
            ("\"ef4444\"", (0xef, 0x44, 0x44)),
            ("\" #22c55e \"", (0x22, 0xc5, 0x5e)),
        ];

        for (json, (r, g, b)) in cases {
            let color: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(*color, Srgb::new(r, g, b));
        }
        assert!(serde_json::from_str::<HexColor>("\"#zzzzzz\"").is_err());
    }

    #[test]
    fn test_to_f64() {
        let white: HexColor = "#ffffff".parse().unwrap();
        assert_eq!(white.to_f64(), Srgb::new(1.0, 1.0, 1.0));
    }
}
