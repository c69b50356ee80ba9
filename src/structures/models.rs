//! Decorative model generators
//!
//! Smaller single-feature pieces: a slender parapet tower, a tree with a
//! noise-jittered canopy, a fountain, a blocky statue, and a windmill.
//! Same contract as the named structures: pure, ordered emissions, total
//! for sizes >= 1 with decorations dropped when they do not fit.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::block::{BlockSpec, Palette};
use crate::coords::IVec3;
use crate::seeds::BuildSeeds;

use super::shapes::{self, emit_inside};
use super::Emission;

/// A slender square watchtower with a crenellated parapet and window
/// slits up the front face.
pub fn tower(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let mut out = Vec::new();

    if sx < 3 || sz < 3 || sy < 3 {
        shapes::fill_box(&mut out, IVec3::ZERO, size - IVec3::splat(1), &palette.primary);
        return out;
    }

    // Closed shaft up to the parapet course.
    shapes::shell_box(&mut out, IVec3::ZERO, IVec3::new(sx - 1, sy - 2, sz - 1), &palette.primary);
    if sy >= 4 {
        shapes::fill_box(
            &mut out,
            IVec3::splat(1),
            IVec3::new(sx - 2, sy - 3, sz - 2),
            &BlockSpec::air(),
        );
    }

    // Crenellated parapet: alternating merlons on the rim.
    let merlon = palette.secondary_or_primary();
    for z in 0..sz {
        for x in 0..sx {
            let on_rim = x == 0 || x == sx - 1 || z == 0 || z == sz - 1;
            if on_rim && (x + z) % 2 == 0 {
                out.push((IVec3::new(x, sy - 1, z), merlon.clone()));
            }
        }
    }

    // Window slits up the front face.
    let cx = sx / 2;
    let mut y = 2;
    while y + 2 < sy {
        out.push((IVec3::new(cx, y, 0), BlockSpec::new("glass")));
        y += 3;
    }

    out
}

/// A tree: irregular noise-outlined canopy layers with per-layer jitter,
/// and a trunk punched through afterwards. Primary is the trunk material,
/// secondary the foliage.
pub fn tree(size: IVec3, palette: &Palette, seeds: &BuildSeeds) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let cz = sz / 2;
    let canopy_r = (sx.min(sz) - 1) / 2;
    let mut out = Vec::new();

    if canopy_r < 1 || sy < 3 {
        // A bare sapling trunk.
        shapes::fill_box(&mut out, IVec3::new(cx, 0, cz), IVec3::new(cx, sy - 1, cz), &palette.primary);
        return out;
    }

    let leaves = palette.secondary_or_primary();
    let canopy_h = (sy / 2).max(2);
    let canopy_base = sy - canopy_h;
    let mid = canopy_h / 2;
    let mut rng = ChaCha8Rng::seed_from_u64(seeds.foliage);

    // Canopy first; the trunk overwrites its own column afterwards.
    for layer in 0..canopy_h {
        let shrink = (layer - mid).abs() * canopy_r / (mid + 1);
        let radius = (canopy_r - shrink).max(1);
        let jx = rng.gen_range(-1..=1);
        let jz = rng.gen_range(-1..=1);
        let layer_seed = (seeds.foliage as u32).wrapping_add(layer as u32 * 131);
        for (x, z) in shapes::irregular_disc(cx + jx, cz + jz, radius, 0.35, layer_seed) {
            emit_inside(&mut out, size, IVec3::new(x, canopy_base + layer, z), leaves);
        }
    }

    let trunk_top = (canopy_base + mid).min(sy - 2);
    shapes::fill_box(&mut out, IVec3::new(cx, 0, cz), IVec3::new(cx, trunk_top, cz), &palette.primary);

    out
}

/// A fountain: disc base, raised rim holding water, and a center jet
/// column topped with water.
pub fn fountain(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let cz = sz / 2;
    let r = (sx.min(sz) - 1) / 2;
    let mut out = Vec::new();

    if r < 1 {
        shapes::fill_box(&mut out, IVec3::new(cx, 0, cz), IVec3::new(cx, 0, cz), &palette.primary);
        return out;
    }

    for (x, z) in shapes::disc(cx, cz, r) {
        out.push((IVec3::new(x, 0, z), palette.primary.clone()));
    }
    if sy >= 2 {
        for (x, z) in shapes::ring(cx, cz, r, 1) {
            out.push((IVec3::new(x, 1, z), palette.primary.clone()));
        }
        for (x, z) in shapes::disc_interior(cx, cz, r, 1) {
            out.push((IVec3::new(x, 1, z), BlockSpec::water()));
        }
    }

    // Center jet.
    if sy >= 3 && r >= 2 {
        let jet = palette.secondary_or_primary();
        for y in 1..sy - 1 {
            out.push((IVec3::new(cx, y, cz), jet.clone()));
        }
        out.push((IVec3::new(cx, sy - 1, cz), BlockSpec::water()));
    }

    out
}

/// A blocky figure on a pedestal: legs, torso with arms, and a head of
/// the secondary material.
pub fn statue(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let cz = sz / 2;
    let mut out = Vec::new();

    if sx < 3 || sy < 5 {
        shapes::fill_box(&mut out, IVec3::new(cx, 0, cz), IVec3::new(cx, sy - 1, cz), &palette.primary);
        return out;
    }

    let ped_h = (sy / 5).max(1);
    shapes::fill_box(&mut out, IVec3::ZERO, IVec3::new(sx - 1, ped_h - 1, sz - 1), &palette.primary);

    let body_h = sy - ped_h;
    let leg_h = (body_h / 3).max(1);
    let head_h = (body_h / 4).max(1);
    let shoulder_y = (sy - 1 - head_h).max(ped_h + leg_h);

    // Legs.
    let lx = cx - 1;
    let rx = cx + 1;
    for y in ped_h..ped_h + leg_h {
        emit_inside(&mut out, size, IVec3::new(lx, y, cz), &palette.primary);
        emit_inside(&mut out, size, IVec3::new(rx, y, cz), &palette.primary);
    }

    // Torso spanning the legs.
    for y in ped_h + leg_h..=shoulder_y {
        for x in lx..=rx {
            emit_inside(&mut out, size, IVec3::new(x, y, cz), &palette.primary);
        }
    }

    // Arms out at the shoulders.
    emit_inside(&mut out, size, IVec3::new(lx - 1, shoulder_y, cz), &palette.primary);
    emit_inside(&mut out, size, IVec3::new(rx + 1, shoulder_y, cz), &palette.primary);

    // Head.
    let head = palette.secondary_or_primary();
    for y in shoulder_y + 1..=(shoulder_y + head_h).min(sy - 1) {
        emit_inside(&mut out, size, IVec3::new(cx, y, cz), head);
    }

    out
}

/// A windmill: hollow body, stepped roof cap, and four diagonal fence
/// blades around a hub on the front face.
pub fn windmill(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let mut out = Vec::new();

    if sx < 3 || sz < 3 || sy < 4 {
        shapes::fill_box(&mut out, IVec3::ZERO, size - IVec3::splat(1), &palette.primary);
        return out;
    }

    let body_h = (sy * 2 / 3).max(3);
    shapes::shell_box(&mut out, IVec3::ZERO, IVec3::new(sx - 1, body_h - 1, sz - 1), &palette.primary);
    if body_h >= 3 {
        shapes::fill_box(
            &mut out,
            IVec3::splat(1),
            IVec3::new(sx - 2, body_h - 2, sz - 2),
            &BlockSpec::air(),
        );
    }

    // Stepped roof cap shrinking toward the top.
    let roof = palette.secondary_or_primary();
    for i in 0..sy - body_h {
        let inset = i + 1;
        if 2 * inset >= sx || 2 * inset >= sz {
            break;
        }
        shapes::fill_box(
            &mut out,
            IVec3::new(inset, body_h + i, inset),
            IVec3::new(sx - 1 - inset, body_h + i, sz - 1 - inset),
            roof,
        );
    }

    // Hub and four diagonal blades across the front face.
    let hub_y = (body_h * 3 / 4).clamp(1, sy - 2);
    out.push((IVec3::new(cx, hub_y, 0), roof.clone()));
    let blade = BlockSpec::new("oak_fence");
    for i in 1..=(sx / 2) {
        for (x, y) in [
            (cx - i, hub_y - i),
            (cx + i, hub_y + i),
            (cx - i, hub_y + i),
            (cx + i, hub_y - i),
        ] {
            emit_inside(&mut out, size, IVec3::new(x, y, 0), &blade);
        }
    }

    out
}
