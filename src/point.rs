use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A lattice point. Grid-local voxels are points with non-negative components.
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A filled unit cube in a grid's local frame.
pub type Voxel = Point;

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<Point> for [i32; 3] {
    fn from(p: Point) -> [i32; 3] {
        [p.x, p.y, p.z]
    }
}

impl From<[i32; 3]> for Point {
    fn from(other: [i32; 3]) -> Self {
        Point::new(other[0], other[1], other[2])
    }
}

impl From<(i32, i32, i32)> for Point {
    fn from(other: (i32, i32, i32)) -> Self {
        let (x, y, z) = other;

        Point::new(x, y, z)
    }
}

impl Point {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        [0, 0, 0].into()
    }

    pub fn ones() -> Self {
        [1, 1, 1].into()
    }

    /// Components in `(x, y, z)` order. Arrays compare lexicographically, so this doubles as the
    /// canonical sort key for serialization.
    pub fn xyz(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn dot(&self, other: &Self) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Squared euclidean distance from the origin.
    pub fn norm_squared(&self) -> i32 {
        self.dot(self)
    }

    pub fn join(&self, other: &Self) -> Self {
        [
            max(self.x, other.x),
            max(self.y, other.y),
            max(self.z, other.z),
        ]
        .into()
    }

    pub fn meet(&self, other: &Self) -> Self {
        [
            min(self.x, other.x),
            min(self.y, other.y),
            min(self.z, other.z),
        ]
        .into()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        [self.x + other.x, self.y + other.y, self.z + other.z].into()
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        [-self.x, -self.y, -self.z].into()
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + (-other)
    }
}
