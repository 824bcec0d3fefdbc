use crate::{
    palette::{BlockRecord, BlockState, Palette, PaletteIndex, AIR},
    Point, VoxelGrid,
};

use fastnbt::Value;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

/// Written into every document's `author` field.
pub const AUTHOR: &str = "TPexcoTblu";

/// Structure format version understood by the target game release.
pub const DATA_VERSION: i32 = 3463;

#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("invalid NBT")]
    Nbt(#[from] fastnbt::error::Error),
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Everything a structure file holds. Built from a grid, serialized once, then dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct SchematicDocument {
    pub palette: Palette,
    /// Sorted ascending by `(x, y, z)`.
    pub blocks: Vec<BlockRecord>,
    pub size: Point,
    pub author: String,
    pub data_version: i32,
}

// On-disk layout. Field order is the order tags are written in.

#[derive(Deserialize, Serialize)]
struct StructureNbt {
    blocks: Vec<BlockNbt>,
    palette: Vec<BlockState>,
    size: Vec<i32>,
    entities: Vec<Value>,
    author: String,
    #[serde(rename = "DataVersion")]
    data_version: i32,
}

#[derive(Deserialize, Serialize)]
struct BlockNbt {
    pos: Vec<i32>,
    state: i32,
}

impl SchematicDocument {
    /// Records every voxel of `grid` as a solid block, in canonical `(x, y, z)` order.
    pub fn from_grid(grid: &VoxelGrid) -> Self {
        debug_assert!(grid.is_normalized());

        let blocks = grid
            .iter()
            .sorted_by_key(|v| v.xyz())
            .map(|v| BlockRecord::solid(*v))
            .collect();

        Self {
            palette: Palette::default(),
            blocks,
            size: grid.size(),
            author: AUTHOR.to_string(),
            data_version: DATA_VERSION,
        }
    }

    /// Positions of every non-empty block.
    pub fn voxels(&self) -> VoxelGrid {
        self.blocks
            .iter()
            .filter(|b| b.state != AIR)
            .map(|b| b.pos)
            .collect()
    }

    /// Uncompressed NBT with an unnamed root compound.
    pub fn to_nbt(&self) -> Result<Vec<u8>, SchematicError> {
        let structure = StructureNbt {
            blocks: self
                .blocks
                .iter()
                .map(|b| BlockNbt {
                    pos: b.pos.xyz().to_vec(),
                    state: i32::from(b.state.0),
                })
                .collect(),
            palette: self.palette.iter().cloned().collect(),
            size: self.size.xyz().to_vec(),
            entities: Vec::new(),
            author: self.author.clone(),
            data_version: self.data_version,
        };

        Ok(fastnbt::to_bytes(&structure)?)
    }

    pub fn from_nbt(bytes: &[u8]) -> Result<Self, SchematicError> {
        let structure: StructureNbt = fastnbt::from_bytes(bytes)?;
        let palette = Palette::from_states(structure.palette);

        let blocks = structure
            .blocks
            .iter()
            .map(|b| {
                let state = u8::try_from(b.state)
                    .ok()
                    .map(PaletteIndex)
                    .filter(|s| palette.get(*s).is_some())
                    .ok_or_else(|| malformed("block state is not a palette index"))?;

                Ok(BlockRecord {
                    pos: coords(&b.pos)?,
                    state,
                })
            })
            .collect::<Result<Vec<_>, SchematicError>>()?;

        Ok(Self {
            palette,
            blocks,
            size: coords(&structure.size)?,
            author: structure.author,
            data_version: structure.data_version,
        })
    }
}

fn malformed(what: &str) -> SchematicError {
    SchematicError::Malformed(what.to_string())
}

fn coords(list: &[i32]) -> Result<Point, SchematicError> {
    match list {
        [x, y, z] => Ok(Point::new(*x, *y, *z)),
        _ => Err(malformed("coordinate does not have three components")),
    }
}
