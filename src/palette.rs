use crate::color::PixelColor;

// ============================================================================
// RETRO PALETTES — named catalogs of swatch colors
// ============================================================================

/// Built-in retro hardware palettes offered in the palette picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetroPalette {
    Nes,
    Pico8,
    GameBoy,
}

impl RetroPalette {
    /// All palettes, in menu order.
    pub fn all() -> &'static [RetroPalette] {
        &[RetroPalette::Nes, RetroPalette::Pico8, RetroPalette::GameBoy]
    }

    pub fn name(&self) -> &'static str {
        match self {
            RetroPalette::Nes => "NES",
            RetroPalette::Pico8 => "PICO-8",
            RetroPalette::GameBoy => "Game Boy",
        }
    }

    /// The ordered swatch list for this palette.
    pub fn colors(&self) -> Vec<PixelColor> {
        let hex: &[&str] = match self {
            RetroPalette::Nes => &["#7C7C7C", "#0000FC", "#0000BC", "#4428BC", "#940084"],
            RetroPalette::Pico8 => &[
                "#000000", "#1D2B53", "#7E2553", "#008751", "#AB5236", "#5F574F",
                "#C2C3C7", "#FFF1E8", "#FF004D", "#FFA300", "#FFEC27", "#00E436",
                "#29ADFF", "#83769C", "#FF77A8", "#FFCCAA",
            ],
            RetroPalette::GameBoy => &["#0f380f", "#306230", "#8bac0f", "#9bbc0f"],
        };
        hex.iter()
            .map(|h| PixelColor::parse_hex(h).expect("palette constants are valid hex"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_palette_entries_parse() {
        for palette in RetroPalette::all() {
            assert!(!palette.colors().is_empty());
            assert!(!palette.name().is_empty());
        }
    }

    #[test]
    fn pico8_has_sixteen_colors() {
        assert_eq!(RetroPalette::Pico8.colors().len(), 16);
        assert_eq!(
            RetroPalette::Pico8.colors()[8],
            PixelColor::parse_hex("#ff004d").unwrap()
        );
    }

    #[test]
    fn gameboy_is_four_shades_of_green() {
        let colors = RetroPalette::GameBoy.colors();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], PixelColor::new(0x0f, 0x38, 0x0f));
    }
}
