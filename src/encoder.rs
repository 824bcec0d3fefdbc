//! Turns a grid into the compressed structure-file byte stream and back.
//!
//! The whole blob is built in memory before any byte reaches a sink, so a failed export never
//! leaves a partial file behind.

use crate::{
    schematic::{SchematicDocument, SchematicError},
    VoxelGrid,
};

use flate2::{read::GzDecoder, write::GzEncoder};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Gzip settings for the tag tree, the only compression structure-file readers accept.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Compression {
    /// 0 (store) to 9 (smallest).
    pub level: u32,
}

impl Default for Compression {
    fn default() -> Self {
        Compression { level: 6 }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid structure document")]
    Schematic(#[from] SchematicError),
    #[error("compression failed")]
    Compress(#[source] std::io::Error),
    #[error("input is not gzip")]
    NotGzip,
    #[error("sink rejected the encoded bytes")]
    Write(#[source] std::io::Error),
    #[error("failed to write {}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SchematicEncoder {
    pub compression: Compression,
}

impl SchematicEncoder {
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    /// Compressed bytes of the document built from `grid`. Identical grids (as sets) always
    /// produce identical bytes.
    pub fn encode(&self, grid: &VoxelGrid) -> Result<Vec<u8>, EncodeError> {
        self.encode_document(&SchematicDocument::from_grid(grid))
    }

    pub fn encode_document(&self, doc: &SchematicDocument) -> Result<Vec<u8>, EncodeError> {
        let raw = doc.to_nbt()?;

        let level = flate2::Compression::new(self.compression.level.min(9));
        let mut encoder = GzEncoder::new(Vec::new(), level);
        encoder.write_all(&raw).map_err(EncodeError::Compress)?;
        let compressed = encoder.finish().map_err(EncodeError::Compress)?;
        debug!(
            "encoded {} blocks: {} raw bytes, {} compressed",
            doc.blocks.len(),
            raw.len(),
            compressed.len()
        );

        Ok(compressed)
    }

    /// Parses a gzip-compressed structure file.
    pub fn decode(bytes: &[u8]) -> Result<SchematicDocument, EncodeError> {
        if !bytes.starts_with(&GZIP_MAGIC) {
            return Err(EncodeError::NotGzip);
        }

        let mut raw = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut raw)
            .map_err(EncodeError::Compress)?;

        Ok(SchematicDocument::from_nbt(&raw)?)
    }

    /// Encodes fully, then hands the bytes to `sink` in one `write_all`.
    pub fn write_to<W: Write>(
        &self,
        grid: &VoxelGrid,
        sink: &mut W,
    ) -> Result<usize, EncodeError> {
        let bytes = self.encode(grid)?;
        sink.write_all(&bytes)
            .and_then(|_| sink.flush())
            .map_err(EncodeError::Write)?;

        Ok(bytes.len())
    }

    /// Encodes fully, writes to a temporary file next to `path`, then renames it into place.
    /// On failure nothing exists at `path` that wasn't there before.
    pub fn save(&self, grid: &VoxelGrid, path: &Path) -> Result<usize, EncodeError> {
        let bytes = self.encode(grid)?;
        persist_atomically(&bytes, path).map_err(|source| {
            warn!("failed to write {}: {}", path.display(), source);
            EncodeError::Sink {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(bytes.len())
    }
}

fn persist_atomically(bytes: &[u8], path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // The temp file is deleted on drop if any step before `persist` fails.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{sample_circle, sample_parabola, sample_sphere, Orientation};
    use crate::Point;

    #[test]
    fn test_unit_sphere_end_to_end() {
        let bytes = SchematicEncoder::default()
            .encode(&sample_sphere(1))
            .unwrap();

        assert!(bytes.starts_with(&GZIP_MAGIC));
        let doc = SchematicEncoder::decode(&bytes).unwrap();
        assert_eq!(doc.blocks.len(), 7);
        assert_eq!(doc.palette.len(), 2);
        assert_eq!(doc.data_version, 3463);
        assert_eq!(doc.size, Point::new(3, 3, 3));
    }

    #[test]
    fn test_decoded_voxels_match_grid() {
        let grids = vec![
            sample_circle(7, Orientation::Vertical),
            sample_sphere(5),
            sample_parabola(20, 11),
        ];

        for grid in grids.iter() {
            let bytes = SchematicEncoder::default().encode(grid).unwrap();
            let doc = SchematicEncoder::decode(&bytes).unwrap();

            assert_eq!(doc.blocks.len(), grid.len());
            assert_eq!(&doc.voxels(), grid);
            assert_eq!(doc.size, grid.size());
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let grid = sample_sphere(6);
        let shuffled: VoxelGrid = grid
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let encoder = SchematicEncoder::default();

        let first = encoder.encode(&grid).unwrap();
        assert_eq!(first, encoder.encode(&grid).unwrap());
        assert_eq!(first, encoder.encode(&shuffled).unwrap());
    }

    #[test]
    fn test_compression_level_does_not_change_content() {
        let grid = sample_circle(4, Orientation::Horizontal);
        let stored = SchematicEncoder::new(Compression { level: 0 })
            .encode(&grid)
            .unwrap();
        let smallest = SchematicEncoder::new(Compression { level: 9 })
            .encode(&grid)
            .unwrap();

        assert!(smallest.len() < stored.len());
        assert_eq!(
            SchematicEncoder::decode(&stored).unwrap(),
            SchematicEncoder::decode(&smallest).unwrap()
        );
    }

    #[test]
    fn test_uncompressed_input_is_rejected() {
        assert!(matches!(
            SchematicEncoder::decode(&[10, 0, 0, 0]),
            Err(EncodeError::NotGzip)
        ));
    }

    #[test]
    fn test_write_to_emits_whole_blob() {
        let grid = sample_sphere(2);
        let encoder = SchematicEncoder::default();
        let mut sink = Vec::new();

        let written = encoder.write_to(&grid, &mut sink).unwrap();

        assert_eq!(written, sink.len());
        assert_eq!(sink, encoder.encode(&grid).unwrap());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sphere_r2.nbt");

        SchematicEncoder::default()
            .save(&sample_sphere(2), &path)
            .unwrap();

        let doc = SchematicEncoder::decode(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(doc.voxels(), sample_sphere(2));
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_save_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be.
        let blocker = dir.path().join("schematics");
        fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("sphere_r1.nbt");

        let result = SchematicEncoder::default().save(&sample_sphere(1), &path);

        assert!(matches!(result, Err(EncodeError::Sink { .. })));
        assert!(!path.exists());
        assert_eq!(fs::read(&blocker).unwrap(), b"not a directory");
    }
}
