use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// PIXEL COLOR — RGB byte triple, serialized as "#rrggbb"
// ============================================================================

/// A fully-opaque RGB color. Grid cells hold `Option<PixelColor>`; `None`
/// means the cell was never painted (transparent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit color string. The leading `#` is optional and the
    /// digits are case-insensitive. Anything else — 3-digit shorthand, CSS
    /// function syntax, transparent sentinels — returns `None`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let val = u32::from_str_radix(digits, 16).ok()?;
        Some(Self {
            r: (val >> 16) as u8,
            g: (val >> 8) as u8,
            b: val as u8,
        })
    }

    /// Format as `#rrggbb`, lowercase, zero-padded.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build a color from f32 channels, rounding to nearest and clamping to
    /// the byte range. Used by the shading pass after blending.
    pub fn from_f32_channels(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.round().clamp(0.0, 255.0) as u8,
            g: g.round().clamp(0.0, 255.0) as u8,
            b: b.round().clamp(0.0, 255.0) as u8,
        }
    }

    pub fn as_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }

    pub fn as_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }
}

/// Euclidean distance between two colors in RGB space. Returns 0.0 when
/// either side is absent. Kept as a general edge-detection utility; the
/// shading pass gates on inequality rather than distance.
pub fn edge_strength(a: Option<PixelColor>, b: Option<PixelColor>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let dr = a.r as f32 - b.r as f32;
            let dg = a.g as f32 - b.g as f32;
            let db = a.b as f32 - b.b as f32;
            (dr * dr + dg * dg + db * db).sqrt()
        }
        _ => 0.0,
    }
}

// Project files store colors as hex strings, so serde goes through the same
// parser/formatter as everything else.
impl Serialize for PixelColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PixelColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid color string: {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_six_hex_digits_case_insensitive() {
        assert_eq!(
            PixelColor::parse_hex("#FF00ff"),
            Some(PixelColor::new(255, 0, 255))
        );
        assert_eq!(
            PixelColor::parse_hex("1d2B53"),
            Some(PixelColor::new(0x1d, 0x2b, 0x53))
        );
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(PixelColor::parse_hex(""), None);
        assert_eq!(PixelColor::parse_hex("#fff"), None); // 3-digit shorthand
        assert_eq!(PixelColor::parse_hex("#ff00f"), None);
        assert_eq!(PixelColor::parse_hex("#ff00ffa0"), None);
        assert_eq!(PixelColor::parse_hex("#gg0000"), None);
        assert_eq!(PixelColor::parse_hex("rgba(0,0,0,0)"), None);
    }

    #[test]
    fn hex_round_trip_normalizes_case() {
        for c in ["#7C7C7C", "#0f380f", "#FFEC27", "ab5236"] {
            let parsed = PixelColor::parse_hex(c).unwrap();
            let normalized = format!("#{}", c.trim_start_matches('#').to_lowercase());
            assert_eq!(parsed.to_hex(), normalized);
        }
    }

    #[test]
    fn format_zero_pads_channels() {
        assert_eq!(PixelColor::new(0, 1, 15).to_hex(), "#00010f");
    }

    #[test]
    fn f32_channels_round_and_clamp() {
        let c = PixelColor::from_f32_channels(-3.0, 127.5, 300.0);
        assert_eq!(c, PixelColor::new(0, 128, 255));
    }

    #[test]
    fn edge_strength_zero_when_absent() {
        let a = PixelColor::parse_hex("#ff0000");
        assert_eq!(edge_strength(a, None), 0.0);
        assert_eq!(edge_strength(None, a), 0.0);
        assert_eq!(edge_strength(None, None), 0.0);
    }

    #[test]
    fn edge_strength_is_rgb_distance() {
        let a = PixelColor::parse_hex("#000000");
        let b = PixelColor::parse_hex("#0000ff");
        assert_eq!(edge_strength(a, b), 255.0);
        let c = PixelColor::parse_hex("#030405");
        let d = PixelColor::parse_hex("#000000");
        let expected = ((9 + 16 + 25) as f32).sqrt();
        assert!((edge_strength(c, d) - expected).abs() < 1e-6);
    }

    #[test]
    fn serde_round_trips_as_hex_string() {
        let c = PixelColor::new(0x8b, 0xac, 0x0f);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#8bac0f\"");
        let back: PixelColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<PixelColor>("\"#xyz\"").is_err());
    }
}
