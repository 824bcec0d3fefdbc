//! TrueType/OpenType glyphs rasterized with `ab_glyph`.

use crate::text::{Glyph, GlyphError, GlyphMask, GlyphProvider};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use std::path::Path;

/// Pixels at least this covered by the outline count as "on".
const COVERAGE_THRESHOLD: f32 = 0.5;

pub struct FontGlyphProvider {
    font: FontVec,
}

impl FontGlyphProvider {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, GlyphError> {
        let font = FontVec::try_from_vec(data).map_err(|e| GlyphError::Unavailable {
            reason: e.to_string(),
        })?;

        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self, GlyphError> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl GlyphProvider for FontGlyphProvider {
    fn glyph(&self, c: char, size: u32) -> Result<Glyph, GlyphError> {
        let id = self.font.glyph_id(c);
        // Glyph 0 is the font's "missing" box.
        if id.0 == 0 && !c.is_whitespace() {
            return Err(GlyphError::Unsupported { character: c });
        }

        let scale = PxScale::from(size as f32);
        let advance = self.font.as_scaled(scale).h_advance(id).round() as i32;

        // Positioned on the baseline, so `px_bounds().min.y` is minus the ascent of the glyph.
        let positioned = id.with_scale_and_position(scale, point(0.0, 0.0));
        let outlined = match self.font.outline_glyph(positioned) {
            Some(outlined) => outlined,
            None => {
                return Ok(Glyph {
                    mask: GlyphMask::default(),
                    left: 0,
                    top: 0,
                    advance,
                })
            }
        };

        let bounds = outlined.px_bounds();
        let mut mask = GlyphMask::new(bounds.width() as u32, bounds.height() as u32);
        outlined.draw(|x, y, coverage| {
            if coverage >= COVERAGE_THRESHOLD && x < mask.width() && y < mask.height() {
                mask.set(x, y, true);
            }
        });

        Ok(Glyph {
            mask,
            left: bounds.min.x as i32,
            top: -bounds.min.y as i32,
            advance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DEJAVU_MONO: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/DejaVuSansMono.ttf"
    ));

    fn dejavu() -> FontGlyphProvider {
        FontGlyphProvider::from_bytes(DEJAVU_MONO.to_vec()).unwrap()
    }

    #[test]
    fn test_capital_sits_on_baseline() {
        let glyph = dejavu().glyph('H', 32).unwrap();

        assert!(glyph.mask.iter_on().next().is_some());
        // Cap height is about 0.63 of the pixel size.
        assert!((19..=23).contains(&glyph.mask.height()));
        assert!((glyph.top - glyph.mask.height() as i32).abs() <= 1);
        assert!(glyph.advance > glyph.left + glyph.mask.width() as i32 - 2);
    }

    #[test]
    fn test_descender_drops_below_baseline() {
        let glyph = dejavu().glyph('g', 32).unwrap();

        assert!(glyph.top > 0);
        assert!(glyph.top - (glyph.mask.height() as i32) < -2);
    }

    #[test]
    fn test_space_only_advances() {
        let font = dejavu();
        let space = font.glyph(' ', 32).unwrap();

        assert_eq!(space.mask.iter_on().count(), 0);
        assert_eq!(space.advance, font.glyph('H', 32).unwrap().advance);
    }

    #[test]
    fn test_uncovered_character_is_unsupported() {
        assert!(matches!(
            dejavu().glyph('\u{6f22}', 32),
            Err(GlyphError::Unsupported { character: '\u{6f22}' })
        ));
    }

    #[test]
    fn test_text_through_font_lands_on_origin() {
        let grid = crate::text::rasterize_text("Hi", 16, &dejavu()).unwrap();

        assert!(grid.is_normalized());
        assert!(!grid.is_empty());
        assert_eq!(grid.size().z, 1);
    }

    #[test]
    fn test_garbage_bytes_are_unavailable() {
        assert!(matches!(
            FontGlyphProvider::from_bytes(vec![0; 64]),
            Err(GlyphError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            FontGlyphProvider::from_file(&dir.path().join("Minecraftia-Regular.ttf")),
            Err(GlyphError::Io(_))
        ));
    }
}
