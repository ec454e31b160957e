//! Generic 3D point value type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Scalars a [`Point3`] can hold.
///
/// Distances are always computed in `f64`, so the scalar must widen to it
/// without loss.
pub trait Coordinate: Copy + Add<Output = Self> + Into<f64> + fmt::Display {}

impl<T> Coordinate for T where T: Copy + Add<Output = T> + Into<f64> + fmt::Display {}

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3<T> {
    x: T,
    y: T,
    z: T,
}

impl<T: Coordinate> Point3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn z(&self) -> T {
        self.z
    }

    pub fn set_x(&mut self, x: T) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: T) {
        self.y = y;
    }

    pub fn set_z(&mut self, z: T) {
        self.z = z;
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = widen(self.x) - widen(other.x);
        let dy = widen(self.y) - widen(other.y);
        let dz = widen(self.z) - widen(other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

fn widen<T: Into<f64>>(v: T) -> f64 {
    v.into()
}

impl<T: Coordinate> Add for Point3<T> {
    type Output = Point3<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point3D -> x: {} y: {} z: {}", self.x, self.y, self.z)
    }
}
