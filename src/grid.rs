use crate::{Extent, Point, Voxel};

use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::iter::FromIterator;

/// A sparse set of filled voxels with incrementally tracked bounds.
///
/// Members iterate in insertion order, which is stable for a given sequence of `add` calls.
/// Generated grids are normalized so that the minimum on every axis is 0, making every member
/// fall inside `[0, size)`.
#[derive(Clone, Debug, Default)]
pub struct VoxelGrid {
    voxels: IndexSet<Voxel, FnvBuildHasher>,
    bounds: Option<(Point, Point)>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `voxel`. Returns `false` if it was already present.
    pub fn add(&mut self, voxel: Voxel) -> bool {
        let inserted = self.voxels.insert(voxel);
        if inserted {
            self.bounds = Some(match self.bounds {
                None => (voxel, voxel),
                Some((min, max)) => (min.meet(&voxel), max.join(&voxel)),
            });
        }

        inserted
    }

    pub fn contains(&self, voxel: &Voxel) -> bool {
        self.voxels.contains(voxel)
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// The smallest extent containing every member, or `None` for an empty grid.
    pub fn extent(&self) -> Option<Extent> {
        self.bounds
            .map(|(min, max)| Extent::from_min_and_world_max(min, max))
    }

    /// Bounding dimensions, `(1, 1, 1)` when empty.
    pub fn size(&self) -> Point {
        self.extent()
            .map(|e| *e.get_local_supremum())
            .unwrap_or_else(Point::ones)
    }

    /// All members in insertion order. Calling again restarts the sequence.
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.iter()
    }

    /// Shifts every member by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        self.iter().map(|v| *v + offset).collect()
    }

    /// Shifts the grid so its minimum lands on the origin.
    pub fn normalized(self) -> Self {
        match self.bounds {
            Some((min, _)) if min != Point::zero() => self.translate(-min),
            _ => self,
        }
    }

    /// True iff the minimum on each axis is exactly 0 (vacuously true when empty).
    pub fn is_normalized(&self) -> bool {
        self.bounds.map_or(true, |(min, _)| min == Point::zero())
    }
}

impl FromIterator<Voxel> for VoxelGrid {
    fn from_iter<T: IntoIterator<Item = Voxel>>(iter: T) -> Self {
        let mut grid = VoxelGrid::new();
        grid.extend(iter);

        grid
    }
}

impl Extend<Voxel> for VoxelGrid {
    fn extend<T: IntoIterator<Item = Voxel>>(&mut self, iter: T) {
        for v in iter {
            self.add(v);
        }
    }
}

impl PartialEq for VoxelGrid {
    /// Grids are equal when they hold the same set of voxels, regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl Eq for VoxelGrid {}
