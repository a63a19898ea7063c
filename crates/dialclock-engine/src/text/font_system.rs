use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts.
///
/// Fonts are immutable after loading. The system is passed to the text
/// renderer each frame so new glyphs can be rasterized on demand.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        if bytes.is_empty() {
            return Err(FontLoadError("empty font data".to_string()));
        }
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?} ({} bytes)", id, bytes.len());
        Ok(id)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Bounding size of a single line of text, in logical pixels.
    ///
    /// Width is the pen advance after the last glyph; height is the line height.
    /// Unknown fonts measure as an empty line.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let width: f32 = text
            .chars()
            .map(|c| font.metrics(c, size).advance_width)
            .sum();
        let height = font
            .horizontal_line_metrics(size)
            .map_or(size * 1.2, |m| m.new_line_size);

        Vec2::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bytes_are_rejected() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(&[]).is_err());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fs = FontSystem::new();
        let err = fs.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }

    #[test]
    fn unknown_font_measures_as_empty_line() {
        let fs = FontSystem::new();
        let size = fs.measure_text("12", FontId(7), 10.0);
        assert_eq!(size.x, 0.0);
        assert!((size.y - 12.0).abs() < 1e-4);
    }
}
