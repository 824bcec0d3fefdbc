use crate::{palette::SOLID, Point, VoxelGrid};

use dot_vox::*;
use std::convert::TryFrom;
use thiserror::Error;

/// MagicaVoxel color index used for every solid voxel.
pub const SOLID_VOX_COLOR: u8 = SOLID.0;

#[derive(Debug, Error)]
#[error("grid of size {size} exceeds the 256^3 limit of .vox models")]
pub struct VoxTooLarge {
    pub size: Point,
}

/// Converts a normalized grid into a single-model `.vox` document. MagicaVoxel is Z-up, so the
/// grid's Y and Z axes are swapped.
impl TryFrom<&VoxelGrid> for DotVoxData {
    type Error = VoxTooLarge;

    fn try_from(grid: &VoxelGrid) -> Result<Self, Self::Error> {
        let size = grid.size();
        // Voxel coordinates are limited to u8.
        let limit = i32::from(std::u8::MAX) + 1;
        if size.x > limit || size.y > limit || size.z > limit {
            return Err(VoxTooLarge { size });
        }

        let voxels = grid
            .iter()
            .map(|p| dot_vox::Voxel {
                x: p.x as u8,
                y: p.z as u8,
                z: p.y as u8,
                i: SOLID_VOX_COLOR,
            })
            .collect();
        let size = dot_vox::Size {
            x: size.x as u32,
            y: size.z as u32,
            z: size.y as u32,
        };

        Ok(DotVoxData {
            version: 150,
            models: vec![Model { size, voxels }],
            palette: Vec::new(),
            materials: Vec::new(),
        })
    }
}

/// Every voxel of `data.models[model_index]` regardless of color, axes swapped back to Y-up.
pub fn grid_from_dot_vox(data: &DotVoxData, model_index: usize) -> Option<VoxelGrid> {
    let Model { voxels, .. } = data.models.get(model_index)?;

    Some(
        voxels
            .iter()
            .map(|v| Point::new(i32::from(v.x), i32::from(v.z), i32::from(v.y)))
            .collect(),
    )
}
