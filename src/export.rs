//! The full pipeline for one request: validate, sample, encode, write.

use crate::{
    encoder::{Compression, EncodeError, SchematicEncoder},
    generator::{Generator, ValidationError},
    text::{GlyphError, GlyphProvider},
};

use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "schematics";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Created on first export if absent.
    pub output_dir: PathBuf,
    pub compression: Compression,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compression: Compression::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),
    #[error("glyphs unavailable: {0}")]
    ResourceUnavailable(#[from] GlyphError),
    #[error("error while saving {}: {source}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode schematic")]
    Encode(#[source] EncodeError),
}

impl From<EncodeError> for ExportError {
    fn from(e: EncodeError) -> Self {
        match e {
            EncodeError::Sink { path, source } => ExportError::SinkWrite { path, source },
            other => ExportError::Encode(other),
        }
    }
}

/// What a successful export produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub voxels: usize,
    pub bytes: usize,
    pub message: String,
}

/// Runs one request to completion. Each call owns its grid and document; nothing outlives it
/// except the file written on success.
pub fn export<P>(
    generator: &Generator,
    glyphs: &P,
    config: &ExportConfig,
) -> Result<ExportReport, ExportError>
where
    P: GlyphProvider + ?Sized,
{
    generator.validate()?;

    let grid = generator.generate(glyphs)?;
    let path = config.output_dir.join(generator.filename());
    let bytes = SchematicEncoder::new(config.compression).save(&grid, &path)?;

    let path = path.canonicalize().unwrap_or(path);
    let message = generator.success_message(&path);
    info!("{} ({} voxels, {} bytes)", message, grid.len(), bytes);

    Ok(ExportReport {
        path,
        voxels: grid.len(),
        bytes,
        message,
    })
}
