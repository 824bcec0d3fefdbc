//! Rasterized text laid out as a one-voxel-deep slab in the X-Y plane.
//!
//! Glyph shapes come from a `GlyphProvider`, so the layout logic here never touches a font
//! backend directly.

use crate::{Point, VoxelGrid};

use fnv::FnvHashMap;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("no glyph for character {character:?}")]
    Unsupported { character: char },
    #[error("glyph source unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("failed to read font data")]
    Io(#[from] std::io::Error),
}

/// An on/off pixel raster, row-major with row 0 at the top.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl GlyphMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    /// Builds a mask from text rows where `#` is "on" and anything else is "off". Rows shorter
    /// than the widest one are padded with "off".
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut mask = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                mask.set(x as u32, y as u32, c == '#');
            }
        }

        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} mask",
            x,
            y,
            self.width,
            self.height
        );

        (y * self.width + x) as usize
    }

    /// # Panics
    ///
    /// If `(x, y)` lies outside the mask.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.pixels[self.index(x, y)]
    }

    /// # Panics
    ///
    /// If `(x, y)` lies outside the mask.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        let i = self.index(x, y);
        self.pixels[i] = on;
    }

    /// `(column, row)` of every "on" pixel.
    pub fn iter_on(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }

    /// Nearest-neighbor upscale by an integer factor.
    pub fn scaled(&self, factor: u32) -> Self {
        let mut out = Self::new(self.width * factor, self.height * factor);
        for (x, y) in self.iter_on() {
            for dy in 0..factor {
                for dx in 0..factor {
                    out.set(x * factor + dx, y * factor + dy, true);
                }
            }
        }

        out
    }
}

/// A rasterized character positioned relative to the pen and the baseline.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Glyph {
    pub mask: GlyphMask,
    /// Horizontal offset of mask column 0 from the pen position.
    pub left: i32,
    /// Number of mask rows lying above the baseline.
    pub top: i32,
    /// How far the pen moves after this glyph.
    pub advance: i32,
}

impl Glyph {
    pub fn scaled(&self, factor: u32) -> Self {
        let f = factor as i32;

        Glyph {
            mask: self.mask.scaled(factor),
            left: self.left * f,
            top: self.top * f,
            advance: self.advance * f,
        }
    }
}

/// Rasterizes single characters at a requested pixel size.
pub trait GlyphProvider {
    fn glyph(&self, c: char, size: u32) -> Result<Glyph, GlyphError>;
}

impl<P: GlyphProvider + ?Sized> GlyphProvider for &P {
    fn glyph(&self, c: char, size: u32) -> Result<Glyph, GlyphError> {
        (**self).glyph(c, size)
    }
}

/// A provider for exports that never render text.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGlyphs;

impl GlyphProvider for NoGlyphs {
    fn glyph(&self, _c: char, _size: u32) -> Result<Glyph, GlyphError> {
        Err(GlyphError::Unavailable {
            reason: "no font loaded".to_string(),
        })
    }
}

/// A fixed set of pixel glyphs drawn at `line_height`. Larger sizes are integer upscales.
#[derive(Clone, Debug)]
pub struct BitmapGlyphs {
    line_height: u32,
    glyphs: FnvHashMap<char, Glyph>,
}

impl BitmapGlyphs {
    pub fn new(line_height: u32) -> Self {
        Self {
            line_height: line_height.max(1),
            glyphs: FnvHashMap::default(),
        }
    }

    pub fn insert(&mut self, c: char, glyph: Glyph) {
        self.glyphs.insert(c, glyph);
    }

    pub fn with_glyph(mut self, c: char, glyph: Glyph) -> Self {
        self.insert(c, glyph);

        self
    }
}

impl Default for BitmapGlyphs {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GlyphProvider for BitmapGlyphs {
    fn glyph(&self, c: char, size: u32) -> Result<Glyph, GlyphError> {
        let glyph = self
            .glyphs
            .get(&c)
            .ok_or(GlyphError::Unsupported { character: c })?;
        let factor = (size / self.line_height).max(1);

        Ok(glyph.scaled(factor))
    }
}

/// Lays `text` out left to right on a shared baseline at `y = 0` and `z = 0`, then normalizes.
///
/// The first glyph failure aborts the whole request.
pub fn rasterize_text<P>(text: &str, size: u32, glyphs: &P) -> Result<VoxelGrid, GlyphError>
where
    P: GlyphProvider + ?Sized,
{
    let mut grid = VoxelGrid::new();
    let mut pen = 0;
    for c in text.chars() {
        let glyph = glyphs.glyph(c, size)?;
        for (col, row) in glyph.mask.iter_on() {
            grid.add(Point::new(
                pen + glyph.left + col as i32,
                glyph.top - 1 - row as i32,
                0,
            ));
        }
        pen += glyph.advance;
    }
    debug!(
        "text {:?} size={}: {} voxels over {} columns",
        text,
        size,
        grid.len(),
        pen
    );

    Ok(grid.normalized())
}
