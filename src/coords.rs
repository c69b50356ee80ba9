//! Integer coordinates and regions
//!
//! World positions, structure-local offsets, and the axis-aligned regions
//! used for both structure bounding volumes and terrain queries. All
//! coordinates are integers; nothing in the engine ever rounds.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// An integer 3-vector. Used for world positions, local offsets, and sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector (x = y = z).
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl Add for IVec3 {
    type Output = IVec3;

    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;

    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for IVec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An inclusive axis-aligned box, `min <= max` componentwise.
///
/// The constructor enforces the invariant; a deserialized region passes
/// through the same check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegion")]
pub struct Region {
    min: IVec3,
    max: IVec3,
}

#[derive(Deserialize)]
struct RawRegion {
    min: IVec3,
    max: IVec3,
}

impl TryFrom<RawRegion> for Region {
    type Error = EngineError;

    fn try_from(raw: RawRegion) -> Result<Self, EngineError> {
        Region::new(raw.min, raw.max)
    }
}

impl Region {
    /// Create a region from inclusive corners. Fails with `InvalidGeometry`
    /// if any component of `min` exceeds the matching component of `max`.
    pub fn new(min: IVec3, max: IVec3) -> Result<Self, EngineError> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(EngineError::invalid_geometry(format!(
                "region min {min} must not exceed max {max} on any axis"
            )));
        }
        Ok(Self { min, max })
    }

    /// Create a region from a corner and a positive size.
    pub fn from_size(min: IVec3, size: IVec3) -> Result<Self, EngineError> {
        if size.x < 1 || size.y < 1 || size.z < 1 {
            return Err(EngineError::invalid_geometry(format!(
                "region size {size} must be positive on every axis"
            )));
        }
        Region::new(min, IVec3::new(min.x + size.x - 1, min.y + size.y - 1, min.z + size.z - 1))
    }

    pub fn min(&self) -> IVec3 {
        self.min
    }

    pub fn max(&self) -> IVec3 {
        self.max
    }

    /// Extent along x (always >= 1).
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    /// Extent along y (always >= 1).
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Extent along z (always >= 1).
    pub fn depth(&self) -> i32 {
        self.max.z - self.min.z + 1
    }

    /// Total cell count.
    pub fn volume(&self) -> u64 {
        self.width() as u64 * self.height() as u64 * self.depth() as u64
    }

    /// Number of (x, z) columns in the horizontal footprint.
    pub fn column_count(&self) -> u64 {
        self.width() as u64 * self.depth() as u64
    }

    pub fn contains(&self, p: IVec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Whether a world (x, z) column lies inside the horizontal footprint.
    pub fn footprint_contains(&self, x: i32, z: i32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }
}
