//! Geometric primitive emitters
//!
//! Solid and hollow cuboids as standalone generators, plus the box, disc,
//! and ring helpers the named structures are composed from. Discs and
//! rings work in the horizontal (x, z) plane and return point lists; the
//! irregular variant jitters the radius with seeded noise for organic
//! outlines.

use noise::{NoiseFn, Perlin};

use crate::block::{BlockSpec, Palette};
use crate::coords::IVec3;

use super::Emission;

/// Every offset in `[0,sx) x [0,sy) x [0,sz)` mapped to the primary block.
pub fn solid_cuboid(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let mut out = Vec::with_capacity((size.x * size.y * size.z) as usize);
    fill_box(&mut out, IVec3::ZERO, size - IVec3::splat(1), &palette.primary);
    out
}

/// The boundary cells of the box in the primary block, followed (when a
/// secondary material is present) by the interior cells in that fill
/// block. Shell and interior are disjoint, so the ordering is for clarity
/// under last-write-wins, not correctness.
pub fn hollow_cuboid(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let mut out = Vec::new();
    let max = size - IVec3::splat(1);
    shell_box(&mut out, IVec3::ZERO, max, &palette.primary);
    if let Some(fill) = &palette.secondary {
        if size.x > 2 && size.y > 2 && size.z > 2 {
            fill_box(&mut out, IVec3::splat(1), max - IVec3::splat(1), fill);
        }
    }
    out
}

/// Emit every cell of the inclusive box `[a, b]`, layer by layer.
pub fn fill_box(out: &mut Vec<Emission>, a: IVec3, b: IVec3, block: &BlockSpec) {
    for y in a.y..=b.y {
        for z in a.z..=b.z {
            for x in a.x..=b.x {
                out.push((IVec3::new(x, y, z), block.clone()));
            }
        }
    }
}

/// Emit the boundary cells of the inclusive box `[a, b]`.
pub fn shell_box(out: &mut Vec<Emission>, a: IVec3, b: IVec3, block: &BlockSpec) {
    for y in a.y..=b.y {
        for z in a.z..=b.z {
            for x in a.x..=b.x {
                let on_boundary = x == a.x || x == b.x
                    || y == a.y || y == b.y
                    || z == a.z || z == b.z;
                if on_boundary {
                    out.push((IVec3::new(x, y, z), block.clone()));
                }
            }
        }
    }
}

/// Emit a single cell only when it falls inside `[0, size)` on every
/// axis. Decorative features use this to degrade gracefully at small
/// sizes instead of failing.
pub fn emit_inside(out: &mut Vec<Emission>, size: IVec3, pos: IVec3, block: &BlockSpec) {
    if pos.x >= 0 && pos.x < size.x
        && pos.y >= 0 && pos.y < size.y
        && pos.z >= 0 && pos.z < size.z
    {
        out.push((pos, block.clone()));
    }
}

/// Points of a filled disc of the given radius around (cx, cz).
pub fn disc(cx: i32, cz: i32, radius: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dz * dz <= radius * radius {
                points.push((cx + dx, cz + dz));
            }
        }
    }
    points
}

/// Points of a circular band: `outer - thickness < dist <= outer`.
pub fn ring(cx: i32, cz: i32, outer: i32, thickness: i32) -> Vec<(i32, i32)> {
    let inner = (outer - thickness).max(0);
    let mut points = Vec::new();
    for dz in -outer..=outer {
        for dx in -outer..=outer {
            let dist_sq = dx * dx + dz * dz;
            if dist_sq <= outer * outer && dist_sq >= inner * inner {
                points.push((cx + dx, cz + dz));
            }
        }
    }
    points
}

/// Points strictly inside a ring of the given outer radius.
pub fn disc_interior(cx: i32, cz: i32, outer: i32, thickness: i32) -> Vec<(i32, i32)> {
    let inner = (outer - thickness).max(0);
    let mut points = Vec::new();
    for dz in -outer..=outer {
        for dx in -outer..=outer {
            if dx * dx + dz * dz < inner * inner {
                points.push((cx + dx, cz + dz));
            }
        }
    }
    points
}

/// A disc whose radius wobbles with seeded noise, for organic outlines
/// (tree canopies, garden beds). Identical seed and parameters give an
/// identical point list.
pub fn irregular_disc(
    cx: i32,
    cz: i32,
    base_radius: i32,
    variation: f64,
    seed: u32,
) -> Vec<(i32, i32)> {
    let noise = Perlin::new(seed);
    let max_r = (base_radius as f64 * (1.0 + variation)).ceil() as i32;
    let mut points = Vec::new();
    for dz in -max_r..=max_r {
        for dx in -max_r..=max_r {
            if dx == 0 && dz == 0 {
                points.push((cx, cz));
                continue;
            }
            let angle = (dz as f64).atan2(dx as f64);
            let wobble = noise.get([angle.cos() * 2.0, angle.sin() * 2.0]);
            let radius = base_radius as f64 * (1.0 + wobble * variation);
            if ((dx * dx + dz * dz) as f64).sqrt() <= radius {
                points.push((cx + dx, cz + dz));
            }
        }
    }
    points
}
