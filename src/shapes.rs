//! Closed-form shapes discretized onto the integer lattice.
//!
//! Every sampler works around a centered origin and returns a grid normalized to the zero-based
//! local frame. Parameter ranges are checked by `Generator::validate`; the samplers only
//! `debug_assert!` them.

use crate::{generator::ValidationError, Extent, Point, VoxelGrid};

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The plane a circle is laid in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// X-Z plane, a single Y layer.
    Horizontal,
    /// X-Y plane, a single Z layer.
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }

    /// Embeds the in-plane coordinates `(a, b)` into 3D.
    fn embed(self, a: i32, b: i32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(a, 0, b),
            Orientation::Vertical => Point::new(a, b, 0),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("horizontal") {
            Ok(Orientation::Horizontal)
        } else if s.eq_ignore_ascii_case("vertical") {
            Ok(Orientation::Vertical)
        } else {
            Err(ValidationError::Orientation(s.to_string()))
        }
    }
}

/// A filled disk of lattice points with `a² + b² <= r²`.
pub fn sample_circle(radius: i32, orientation: Orientation) -> VoxelGrid {
    debug_assert!(radius >= 1);

    let r2 = radius * radius;
    let mut grid = VoxelGrid::new();
    for a in -radius..=radius {
        for b in -radius..=radius {
            if a * a + b * b <= r2 {
                grid.add(orientation.embed(a, b));
            }
        }
    }
    debug!(
        "circle r={} {}: {} voxels",
        radius,
        orientation,
        grid.len()
    );

    grid.normalized()
}

/// A filled ball of lattice points with `x² + y² + z² <= r²`.
pub fn sample_sphere(radius: i32) -> VoxelGrid {
    debug_assert!(radius >= 1);

    let r2 = radius * radius;
    let grid: VoxelGrid = Extent::from_center_and_radius(Point::zero(), radius)
        .into_iter()
        .filter(|p| p.norm_squared() <= r2)
        .collect();
    debug!("sphere r={}: {} voxels", radius, grid.len());

    grid.normalized()
}

/// Height of the parabolic arch at column `x`, rounded half away from zero. The edge columns
/// `0` and `width - 1` sit at 0; a single column is all peak.
pub fn parabola_height(x: i32, width: i32, height: i32) -> i32 {
    if width <= 1 {
        return height;
    }

    // Offset from the center in half-columns, so mirrored columns get exactly opposite `t`.
    let span = f64::from(width - 1);
    let t = f64::from(2 * x - (width - 1)) / span;
    let h = f64::from(height);

    (h - h * t * t).round().max(0.0).min(h) as i32
}

/// A solid arch in the X-Y plane. Every column `x` in `[0, width)` is filled from `y = 0` up to
/// and including `parabola_height(x)`.
pub fn sample_parabola(width: i32, height: i32) -> VoxelGrid {
    debug_assert!(width >= 1 && height >= 1);

    let mut grid = VoxelGrid::new();
    for x in 0..width {
        let top = parabola_height(x, width, height);
        for y in 0..=top {
            grid.add(Point::new(x, y, 0));
        }
    }
    debug!("parabola w={} h={}: {} voxels", width, height, grid.len());

    grid.normalized()
}
