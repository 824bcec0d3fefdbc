use crate::text::GlyphMask;

use image::{GrayImage, Luma};

/// Luma values at or above this are "on".
const ON_THRESHOLD: u8 = 128;

/// Reads a bitmap glyph, e.g. one cell cut out of a font atlas.
impl From<&GrayImage> for GlyphMask {
    fn from(img: &GrayImage) -> Self {
        let (width, height) = img.dimensions();
        let mut mask = GlyphMask::new(width, height);
        for (x, y, Luma([v])) in img.enumerate_pixels() {
            mask.set(x, y, *v >= ON_THRESHOLD);
        }

        mask
    }
}

/// Renders a mask as white-on-black, for inspecting what a provider produced.
impl From<&GlyphMask> for GrayImage {
    fn from(mask: &GlyphMask) -> Self {
        GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
            Luma([if mask.get(x, y) { 255 } else { 0 }])
        })
    }
}
