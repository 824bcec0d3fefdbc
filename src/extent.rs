use crate::Point;

/// A Cartesian product of 3 integer ranges: `[x_min..x_max] * [y_min..y_max] * [z_min..z_max]`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Extent {
    /// Point in the extent that's lesser than all other points in the extent.
    minimum: Point,

    /// The least point that's strictly greater than all points in the extent.
    world_sup: Point,

    /// Strict supremum relative to `minimum`, i.e. the size of the extent.
    local_sup: Point,
}

impl Extent {
    /// The extent with `minimum` as the least element and `world_max` as the greatest element.
    pub fn from_min_and_world_max(minimum: Point, world_max: Point) -> Self {
        let world_sup = world_max + Point::ones();

        Self {
            minimum,
            world_sup,
            local_sup: world_sup - minimum,
        }
    }

    /// The extent with `minimum` as the least element and `local_sup` as the least upper bound
    /// in local coordinates (i.e. the size).
    pub fn from_min_and_local_supremum(minimum: Point, local_sup: Point) -> Self {
        Self {
            minimum,
            world_sup: minimum + local_sup,
            local_sup,
        }
    }

    /// Returns a cube with all dimensions of length `2 * radius + 1`.
    pub fn from_center_and_radius(center: Point, radius: i32) -> Self {
        assert!(radius >= 0);

        let minimum = center - [radius; 3].into();
        let local_sup: Point = [2 * radius + 1; 3].into();

        Self::from_min_and_local_supremum(minimum, local_sup)
    }

    /// Get the least element.
    pub fn get_minimum(&self) -> Point {
        self.minimum
    }

    /// Get the greatest element.
    pub fn get_world_max(&self) -> Point {
        self.world_sup - Point::ones()
    }

    /// Get the least upper bound in local coordinates (i.e. the size).
    pub fn get_local_supremum(&self) -> &Point {
        &self.local_sup
    }

    /// Number of lattice points in the extent.
    pub fn volume(&self) -> usize {
        // The size can be negative for a degenerate extent, which has no points.
        (self.local_sup.x.max(0) as usize)
            * (self.local_sup.y.max(0) as usize)
            * (self.local_sup.z.max(0) as usize)
    }

    /// Returns `true` iff `self` contains no points.
    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }
}

#[derive(Debug)]
pub struct ExtentIterator {
    extent: Extent,
    cursor: Point,
    completed: bool,
}

impl ExtentIterator {
    pub fn new(extent: Extent) -> Self {
        ExtentIterator {
            extent,
            cursor: extent.minimum,
            completed: extent.is_empty(),
        }
    }
}

/// Returns a `Point` for each world coordinate in the extent, Z varying fastest.
impl Iterator for ExtentIterator {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.completed {
            return None;
        }

        let old_cursor = self.cursor;

        self.cursor.z += 1;
        if self.cursor.z == self.extent.world_sup.z {
            self.cursor.z = self.extent.minimum.z;
            self.cursor.y += 1;
            if self.cursor.y == self.extent.world_sup.y {
                self.cursor.y = self.extent.minimum.y;
                self.cursor.x += 1;
                if self.cursor.x == self.extent.world_sup.x {
                    self.completed = true;
                }
            }
        }

        Some(old_cursor)
    }
}

impl IntoIterator for &Extent {
    type Item = Point;
    type IntoIter = ExtentIterator;

    fn into_iter(self) -> Self::IntoIter {
        ExtentIterator::new(*self)
    }
}

impl IntoIterator for Extent {
    type Item = Point;
    type IntoIter = ExtentIterator;

    fn into_iter(self) -> Self::IntoIter {
        ExtentIterator::new(self)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
