//! Crop annotation encoding and decoding
//!
//! A crop annotation travels as the alias segment of an image embed
//! (`![[file.png|150x200_Shift50x100]]`), so it survives any copy, sync, or
//! export path the surrounding text does. The grammar is
//! `<height>x<width>_Shift<y>x<x>[_Scale<scale>]` with the scale suffix
//! omitted when it is exactly 1.

use once_cell::sync::Lazy;
use regex::Regex;

use super::geometry::Rect;

/// Alias grammar for crop annotations
static CROP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x(\d+)_Shift(\d+)x(\d+)(?:_Scale([0-9.]+))?$").unwrap());

/// Rectangular viewport into an image, in original-image pixel space
///
/// A zero-area rectangle is representable and renders as an empty box.
/// Coordinates are not clamped to the image bounds; an out-of-range crop is
/// stored and rendered as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    /// Horizontal shift of the viewport (pixels from the left edge)
    pub x: u32,
    /// Vertical shift of the viewport (pixels from the top edge)
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Output scale multiplier applied to the rendered box, always positive
    pub scale: f64,
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            scale: 1.0,
        }
    }
}

impl CropRect {
    /// Create a new crop rectangle
    pub fn new(x: u32, y: u32, width: u32, height: u32, scale: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            scale,
        }
    }

    /// Round a working selection to integer pixels
    pub fn from_selection(selection: Rect, scale: f64) -> Self {
        Self {
            x: selection.x.round().max(0.0) as u32,
            y: selection.y.round().max(0.0) as u32,
            width: selection.width.round().max(0.0) as u32,
            height: selection.height.round().max(0.0) as u32,
            scale,
        }
    }

    /// Format as an embed alias
    ///
    /// The `_Scale` suffix is appended only when the scale differs from 1,
    /// using the shortest decimal form so `decode` reads back the same value.
    pub fn encode(&self) -> String {
        let mut alias = format!("{}x{}_Shift{}x{}", self.height, self.width, self.y, self.x);
        if self.scale != 1.0 {
            alias.push_str(&format!("_Scale{}", self.scale));
        }
        alias
    }

    /// Parse an embed alias
    ///
    /// `None` means "not a crop annotation" rather than an error; the caller
    /// must treat the embed as an ordinary, uncropped image. A matching
    /// string whose numbers do not fit (overflow, malformed decimal) is also
    /// `None` for the same reason.
    pub fn decode(alias: &str) -> Option<CropRect> {
        let caps = CROP_PATTERN.captures(alias)?;
        let height = caps[1].parse().ok()?;
        let width = caps[2].parse().ok()?;
        let y = caps[3].parse().ok()?;
        let x = caps[4].parse().ok()?;
        let scale = match caps.get(5) {
            Some(m) => m.as_str().parse::<f64>().ok().filter(|s| *s > 0.0)?,
            None => 1.0,
        };
        Some(CropRect {
            x,
            y,
            width,
            height,
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_omits_default_scale() {
        let crop = CropRect::new(1, 2, 3, 4, 1.0);
        assert_eq!(crop.encode(), "4x3_Shift2x1");
    }

    #[test]
    fn test_encode_includes_scale() {
        let crop = CropRect::new(1, 2, 3, 4, 2.0);
        assert_eq!(crop.encode(), "4x3_Shift2x1_Scale2");
    }

    #[test]
    fn test_encode_fractional_scale() {
        let crop = CropRect::new(0, 0, 10, 10, 0.5);
        assert_eq!(crop.encode(), "10x10_Shift0x0_Scale0.5");
    }

    #[test]
    fn test_decode_groups() {
        let crop = CropRect::decode("150x200_Shift50x100").unwrap();
        assert_eq!(crop, CropRect::new(100, 50, 200, 150, 1.0));
    }

    #[test]
    fn test_decode_with_scale() {
        let crop = CropRect::decode("4x3_Shift2x1_Scale1.5").unwrap();
        assert_eq!(crop, CropRect::new(1, 2, 3, 4, 1.5));
    }

    #[test]
    fn test_round_trip() {
        let crops = [
            CropRect::default(),
            CropRect::new(100, 50, 200, 150, 1.0),
            CropRect::new(0, 0, 1, 1, 2.0),
            CropRect::new(7, 13, 640, 480, 0.25),
            CropRect::new(1, 2, 3, 4, 1.75),
        ];
        for crop in crops {
            assert_eq!(CropRect::decode(&crop.encode()), Some(crop));
        }
    }

    #[test]
    fn test_decode_rejects_non_annotations() {
        for alias in [
            "",
            "abc",
            "just a caption",
            "100x100",
            "100x100_Shift5x5_Scale",
            "100x100_Shift5x5_Scale2_",
            "100x100_Shift5x5extra",
            "-1x100_Shift5x5",
            "100x100_Shift5x5 ",
        ] {
            assert_eq!(CropRect::decode(alias), None, "alias {alias:?}");
        }
    }

    #[test]
    fn test_decode_rejects_unparseable_numbers() {
        // Matches the grammar but overflows u32
        assert_eq!(CropRect::decode("99999999999x1_Shift0x0"), None);
        // Matches [0-9.]+ but is not a decimal number
        assert_eq!(CropRect::decode("1x1_Shift0x0_Scale1.2.3"), None);
        // Zero scale would render nothing and violates the scale invariant
        assert_eq!(CropRect::decode("1x1_Shift0x0_Scale0"), None);
    }

    #[test]
    fn test_from_selection_rounds() {
        let crop = CropRect::from_selection(Rect::new(99.6, 49.5, 200.4, 149.5), 1.0);
        assert_eq!(crop, CropRect::new(100, 50, 200, 150, 1.0));
    }

    #[test]
    fn test_degenerate_selection_still_encodes() {
        let crop = CropRect::from_selection(Rect::default(), 1.0);
        assert_eq!(crop.encode(), "0x0_Shift0x0");
        assert_eq!(CropRect::decode("0x0_Shift0x0"), Some(crop));
    }
}
