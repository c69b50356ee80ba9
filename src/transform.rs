//! Rotation and flip transforms for structure placement
//!
//! A transform is a quarter-turn rotation about the vertical axis (0..=3
//! steps of 90 degrees) plus up to three independent axis flips. Within a
//! single application, flips act first and rotation second; `compose`
//! folds any sequence of transforms back into that canonical order.
//!
//! All extents and offsets are integers and the quarter-turn matrices are
//! exact, so applying a transform never rounds.
//!
//! The (rotation, flips) encoding is not unique as a description of the
//! underlying symmetry (rotation 2 combined with both horizontal flips is
//! the identity map), but every value is canonical: rotation is always in
//! 0..=3 and equal encodings compare equal.

use crate::coords::IVec3;
use crate::error::EngineError;

/// A canonical rotation + flip transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transform {
    rotation: u8,
    flip_x: bool,
    flip_y: bool,
    flip_z: bool,
}

impl Transform {
    pub const IDENTITY: Transform =
        Transform { rotation: 0, flip_x: false, flip_y: false, flip_z: false };

    /// Build from quarter-turn steps (normalized mod 4, negatives allowed)
    /// and per-axis flips.
    pub fn new(quarter_turns: i32, flip_x: bool, flip_y: bool, flip_z: bool) -> Self {
        Self { rotation: quarter_turns.rem_euclid(4) as u8, flip_x, flip_y, flip_z }
    }

    /// Pure rotation by quarter-turn steps.
    pub fn rotation(quarter_turns: i32) -> Self {
        Transform::new(quarter_turns, false, false, false)
    }

    /// Build from a rotation in degrees. Any multiple of 90 is accepted
    /// (including negatives); other angles are invalid.
    pub fn from_degrees(degrees: i32, flip_x: bool, flip_y: bool, flip_z: bool) -> Result<Self, EngineError> {
        if degrees % 90 != 0 {
            return Err(EngineError::invalid_geometry(format!(
                "rotation {degrees} is not a multiple of 90 degrees"
            )));
        }
        Ok(Transform::new(degrees / 90, flip_x, flip_y, flip_z))
    }

    pub fn quarter_turns(&self) -> u8 {
        self.rotation
    }

    pub fn flips(&self) -> (bool, bool, bool) {
        (self.flip_x, self.flip_y, self.flip_z)
    }

    /// The transform equivalent to applying `a` then `b`.
    ///
    /// Rotations add mod 4. Flips XOR, except that `b`'s horizontal flips
    /// first pass through `a`'s rotation: an odd rotation swaps which
    /// horizontal axis a later flip lands on.
    pub fn compose(a: Transform, b: Transform) -> Transform {
        let (bx, bz) =
            if a.rotation % 2 == 1 { (b.flip_z, b.flip_x) } else { (b.flip_x, b.flip_z) };
        Transform {
            rotation: (a.rotation + b.rotation) % 4,
            flip_x: a.flip_x ^ bx,
            flip_y: a.flip_y ^ b.flip_y,
            flip_z: a.flip_z ^ bz,
        }
    }

    /// The transform that undoes this one.
    pub fn inverse(&self) -> Transform {
        let (fx, fz) =
            if self.rotation % 2 == 1 { (self.flip_z, self.flip_x) } else { (self.flip_x, self.flip_z) };
        Transform {
            rotation: (4 - self.rotation) % 4,
            flip_x: fx,
            flip_y: self.flip_y,
            flip_z: fz,
        }
    }

    /// Map a local offset within a bounding box of the given size: flips
    /// negate the offset against the box extent, then rotation permutes
    /// the horizontal axes, re-anchored so outputs stay non-negative.
    ///
    /// For an in-bounds offset the result lies within `rotated_size(size)`.
    pub fn apply(&self, size: IVec3, offset: IVec3) -> IVec3 {
        let x = if self.flip_x { size.x - 1 - offset.x } else { offset.x };
        let y = if self.flip_y { size.y - 1 - offset.y } else { offset.y };
        let z = if self.flip_z { size.z - 1 - offset.z } else { offset.z };
        match self.rotation {
            0 => IVec3::new(x, y, z),
            1 => IVec3::new(size.z - 1 - z, y, x),
            2 => IVec3::new(size.x - 1 - x, y, size.z - 1 - z),
            _ => IVec3::new(z, y, size.x - 1 - x),
        }
    }

    /// The bounding size after this transform: odd rotations swap the
    /// horizontal extents, flips never change size.
    pub fn rotated_size(&self, size: IVec3) -> IVec3 {
        if self.rotation % 2 == 1 {
            IVec3::new(size.z, size.y, size.x)
        } else {
            size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_transforms() -> Vec<Transform> {
        let mut all = Vec::new();
        for r in 0..4 {
            for bits in 0..8u8 {
                all.push(Transform::new(r, bits & 1 != 0, bits & 2 != 0, bits & 4 != 0));
            }
        }
        all
    }

    fn box_offsets(size: IVec3) -> Vec<IVec3> {
        let mut offsets = Vec::new();
        for y in 0..size.y {
            for z in 0..size.z {
                for x in 0..size.x {
                    offsets.push(IVec3::new(x, y, z));
                }
            }
        }
        offsets
    }

    #[test]
    fn test_identity_laws() {
        for t in all_transforms() {
            assert_eq!(Transform::compose(Transform::IDENTITY, t), t);
            assert_eq!(Transform::compose(t, Transform::IDENTITY), t);
        }
    }

    #[test]
    fn test_flip_cancels_itself() {
        let flip_x = Transform::new(0, true, false, false);
        assert_eq!(Transform::compose(flip_x, flip_x), Transform::IDENTITY);
        let flip_y = Transform::new(0, false, true, false);
        assert_eq!(Transform::compose(flip_y, flip_y), Transform::IDENTITY);
    }

    #[test]
    fn test_four_quarter_turns_cancel() {
        let quarter = Transform::rotation(1);
        let mut acc = Transform::IDENTITY;
        for _ in 0..4 {
            acc = Transform::compose(acc, quarter);
        }
        assert_eq!(acc, Transform::IDENTITY);
    }

    #[test]
    fn test_rotation_normalized() {
        assert_eq!(Transform::rotation(5), Transform::rotation(1));
        assert_eq!(Transform::rotation(-1), Transform::rotation(3));
        assert_eq!(Transform::from_degrees(270, false, false, false).unwrap(), Transform::rotation(3));
        assert_eq!(Transform::from_degrees(-90, false, false, false).unwrap(), Transform::rotation(3));
    }

    #[test]
    fn test_from_degrees_rejects_odd_angles() {
        let err = Transform::from_degrees(45, false, false, false).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_apply_quarter_turn() {
        // Rotating a 2x1x3 box a quarter turn: (x, z) -> (sz-1-z, x)
        let size = IVec3::new(2, 1, 3);
        let t = Transform::rotation(1);
        assert_eq!(t.apply(size, IVec3::new(0, 0, 0)), IVec3::new(2, 0, 0));
        assert_eq!(t.apply(size, IVec3::new(1, 0, 2)), IVec3::new(0, 0, 1));
        assert_eq!(t.rotated_size(size), IVec3::new(3, 1, 2));
    }

    #[test]
    fn test_apply_is_bounds_preserving() {
        let size = IVec3::new(2, 3, 4);
        for t in all_transforms() {
            let out_size = t.rotated_size(size);
            for offset in box_offsets(size) {
                let mapped = t.apply(size, offset);
                assert!(
                    mapped.x >= 0 && mapped.x < out_size.x
                        && mapped.y >= 0 && mapped.y < out_size.y
                        && mapped.z >= 0 && mapped.z < out_size.z,
                    "{t:?} mapped {offset} to {mapped}, outside {out_size}"
                );
            }
        }
    }

    #[test]
    fn test_apply_is_a_bijection_on_the_box() {
        let size = IVec3::new(3, 2, 5);
        for t in all_transforms() {
            let mut seen = std::collections::HashSet::new();
            for offset in box_offsets(size) {
                assert!(seen.insert(t.apply(size, offset)), "{t:?} collided");
            }
            assert_eq!(seen.len(), (size.x * size.y * size.z) as usize);
        }
    }

    #[test]
    fn test_compose_matches_sequential_apply() {
        let size = IVec3::new(2, 2, 3);
        for a in all_transforms() {
            let mid_size = a.rotated_size(size);
            for b in all_transforms() {
                let ab = Transform::compose(a, b);
                for offset in box_offsets(size) {
                    let sequential = b.apply(mid_size, a.apply(size, offset));
                    assert_eq!(
                        ab.apply(size, offset),
                        sequential,
                        "compose({a:?}, {b:?}) diverged at {offset}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_compose_is_associative() {
        for a in all_transforms() {
            for b in all_transforms() {
                for c in [Transform::rotation(1), Transform::new(3, true, false, true)] {
                    assert_eq!(
                        Transform::compose(Transform::compose(a, b), c),
                        Transform::compose(a, Transform::compose(b, c))
                    );
                }
            }
        }
    }

    #[test]
    fn test_inverse_roundtrip() {
        let size = IVec3::new(4, 2, 3);
        for t in all_transforms() {
            assert_eq!(Transform::compose(t, t.inverse()), Transform::IDENTITY);
            let mid_size = t.rotated_size(size);
            for offset in box_offsets(size) {
                assert_eq!(t.inverse().apply(mid_size, t.apply(size, offset)), offset);
            }
        }
    }
}
