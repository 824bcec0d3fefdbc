//! Voxelized shapes (circles, spheres, parabolic arches, rasterized text) exported as compressed
//! structure schematics.

pub mod encoder;
pub mod export;
mod extent;
pub mod generator;
mod grid;
pub mod palette;
mod point;
pub mod schematic;
pub mod shapes;
pub mod text;

#[cfg(feature = "font")]
pub mod font;

#[cfg(feature = "image")]
mod image;

#[cfg(feature = "vox")]
pub mod vox;

#[cfg(test)]
mod test_util;

pub use encoder::{Compression, EncodeError, SchematicEncoder};
pub use export::{export, ExportConfig, ExportError, ExportReport};
pub use extent::{Extent, ExtentIterator};
pub use generator::{Generator, ValidationError};
pub use grid::VoxelGrid;
pub use palette::{BlockRecord, BlockState, Palette, PaletteIndex};
pub use point::{Point, Voxel};
pub use schematic::{SchematicDocument, SchematicError, AUTHOR, DATA_VERSION};
pub use shapes::Orientation;
pub use text::{BitmapGlyphs, Glyph, GlyphError, GlyphMask, GlyphProvider, NoGlyphs};

pub mod prelude {
    pub use crate::generator::Generator;
    pub use crate::grid::VoxelGrid;
    pub use crate::point::Point;
    pub use crate::shapes::{sample_circle, sample_parabola, sample_sphere, Orientation};
    pub use crate::text::{rasterize_text, GlyphProvider};
}
