//! Named structure generators
//!
//! Each structure decomposes into a fixed sequence of boxes, rings, and
//! decorations, emitted fill-then-carve. Walls and floors come from the
//! palette; fixtures (doors, panes, lanterns, fences) are part of the
//! recipe. All generators are total for sizes >= 1 on every axis:
//! features that do not fit are omitted, never an error.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::block::{BlockSpec, Palette};
use crate::coords::IVec3;
use crate::seeds::BuildSeeds;

use super::shapes::{self, emit_inside};
use super::Emission;

/// Stairs id matching a plank material, falling back to oak.
fn stairs_id(block: &BlockSpec) -> String {
    match block.base_id().strip_suffix("_planks") {
        Some(wood) => format!("{wood}_stairs"),
        None => "oak_stairs".to_string(),
    }
}

/// Sprinkle cracked/mossy variants into stone brick work. Other
/// materials pass through untouched.
fn weathered(base: &BlockSpec, rng: &mut ChaCha8Rng) -> BlockSpec {
    if base.base_id() == "stone_bricks" {
        match rng.gen_range(0..5) {
            3 => BlockSpec::new("cracked_stone_bricks"),
            4 => BlockSpec::new("mossy_stone_bricks"),
            _ => base.clone(),
        }
    } else {
        base.clone()
    }
}

/// A walled house: floor plate, hollow walls, carved interior, centered
/// front door, paned windows, pitched stair roof, and furnishings when
/// the footprint has room for them.
pub fn house(size: IVec3, palette: &Palette, seeds: &BuildSeeds) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let mut out = Vec::new();

    if sx < 3 || sy < 3 || sz < 3 {
        shapes::fill_box(&mut out, IVec3::ZERO, size - IVec3::splat(1), &palette.primary);
        return out;
    }

    // Shrink to an odd width so the door centers.
    let wx = if sx % 2 == 0 { sx - 1 } else { sx };
    let half = wx / 2;
    let roof_h = (half + 1).min(sy - 2);
    let wall_h = sy - roof_h;

    let mut rng = ChaCha8Rng::seed_from_u64(seeds.weathering);

    // Walls, then the floor plate over the bottom course.
    shapes::shell_box(&mut out, IVec3::ZERO, IVec3::new(wx - 1, wall_h - 1, sz - 1), &palette.primary);
    let floor = palette.secondary_or_primary();
    for z in 0..sz {
        for x in 0..wx {
            out.push((IVec3::new(x, 0, z), weathered(floor, &mut rng)));
        }
    }

    // Carve the interior.
    if wall_h > 2 {
        shapes::fill_box(
            &mut out,
            IVec3::splat(1),
            IVec3::new(wx - 2, wall_h - 2, sz - 2),
            &BlockSpec::air(),
        );
    }

    // Centered front door.
    out.push((
        IVec3::new(half, 1, 0),
        BlockSpec::with_states("oak_door", &[("facing", "north"), ("half", "lower")]),
    ));
    if wall_h > 2 {
        out.push((
            IVec3::new(half, 2, 0),
            BlockSpec::with_states("oak_door", &[("facing", "north"), ("half", "upper")]),
        ));
    }

    // Windows one course above the floor.
    if wall_h > 3 {
        let pane_ew = BlockSpec::with_states("glass_pane", &[("east", "true"), ("west", "true")]);
        let pane_ns = BlockSpec::with_states("glass_pane", &[("north", "true"), ("south", "true")]);
        if wx >= 5 {
            out.push((IVec3::new(1, 2, 0), pane_ew.clone()));
            out.push((IVec3::new(wx - 2, 2, 0), pane_ew.clone()));
        }
        let mut z = 2;
        while z < sz - 2 {
            out.push((IVec3::new(0, 2, z), pane_ns.clone()));
            out.push((IVec3::new(wx - 1, 2, z), pane_ns.clone()));
            z += 2;
        }
        out.push((IVec3::new(half, 2, sz - 1), pane_ew));
    }

    // Pitched roof: stair rows climbing to a ridge line.
    let stairs = stairs_id(&palette.primary);
    let east = BlockSpec::with_states(stairs.as_str(), &[("facing", "east")]);
    let west = BlockSpec::with_states(stairs.as_str(), &[("facing", "west")]);
    for i in 0..roof_h {
        let y = wall_h + i;
        let x_left = i.min(half);
        let x_right = (wx - 1 - i).max(x_left);
        if x_left == x_right {
            for z in 0..sz {
                out.push((IVec3::new(x_left, y, z), palette.primary.clone()));
            }
        } else {
            for z in 0..sz {
                out.push((IVec3::new(x_left, y, z), east.clone()));
                out.push((IVec3::new(x_right, y, z), west.clone()));
            }
            if i == roof_h - 1 {
                // The roof cannot come to a point; cap the gap.
                for x in x_left + 1..x_right {
                    for z in 0..sz {
                        out.push((IVec3::new(x, y, z), palette.primary.clone()));
                    }
                }
            }
        }
    }

    // Hanging lantern under the ceiling.
    if wall_h > 3 {
        out.push((
            IVec3::new(half, wall_h - 1, sz / 2),
            BlockSpec::with_states("lantern", &[("hanging", "true")]),
        ));
    }

    // Furnishings along the back wall.
    if wx >= 5 && sz >= 6 && wall_h > 2 {
        out.push((IVec3::new(1, 1, sz - 2), BlockSpec::new("crafting_table")));
        out.push((
            IVec3::new(wx - 2, 1, sz - 2),
            BlockSpec::with_states("red_bed", &[("facing", "north"), ("part", "foot")]),
        ));
        out.push((
            IVec3::new(wx - 2, 1, sz - 3),
            BlockSpec::with_states("red_bed", &[("facing", "north"), ("part", "head")]),
        ));
    }

    out
}

/// A round tower: weathered wall ring, carved interior, conical roof
/// with a fence-and-banner flag when there is headroom, doorway, glass
/// windows on the cardinal faces, lanterns at base and top.
pub fn tower(size: IVec3, palette: &Palette, seeds: &BuildSeeds) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let cz = sz / 2;
    let r = (sx.min(sz) - 1) / 2;
    let mut out = Vec::new();

    if r < 1 || sy < 4 {
        shapes::fill_box(&mut out, IVec3::new(cx, 0, cz), IVec3::new(cx, sy - 1, cz), &palette.primary);
        return out;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seeds.weathering);
    let roof_h = (2 * r).min(sy - 3).max(1);
    let body_h = sy - roof_h;

    let wall = shapes::ring(cx, cz, r, 1);
    let inside = shapes::disc_interior(cx, cz, r, 1);
    for y in 0..body_h {
        for &(x, z) in &wall {
            out.push((IVec3::new(x, y, z), weathered(&palette.primary, &mut rng)));
        }
        for &(x, z) in &inside {
            out.push((IVec3::new(x, y, z), BlockSpec::air()));
        }
    }

    // Conical roof, kept two courses short when the flag fits on top.
    let flag = roof_h >= 4;
    let cone_h = if flag { roof_h - 2 } else { roof_h };
    let roof = palette.secondary_or_primary();
    for i in 0..cone_h {
        let rr = r * (cone_h - i) / cone_h;
        for (x, z) in shapes::disc(cx, cz, rr) {
            out.push((IVec3::new(x, body_h + i, z), roof.clone()));
        }
    }
    if flag {
        out.push((IVec3::new(cx, body_h + cone_h, cz), BlockSpec::new("oak_fence")));
        out.push((IVec3::new(cx, body_h + cone_h + 1, cz), BlockSpec::new("red_banner")));
    }

    // Doorway on the north face.
    out.push((
        IVec3::new(cx, 1, cz - r),
        BlockSpec::with_states("oak_door", &[("facing", "south"), ("half", "lower")]),
    ));
    out.push((
        IVec3::new(cx, 2, cz - r),
        BlockSpec::with_states("oak_door", &[("facing", "south"), ("half", "upper")]),
    ));

    // Windows at one and two thirds of the body height.
    for level in [body_h / 3, 2 * body_h / 3] {
        if level < 3 {
            continue;
        }
        for (x, z) in [(cx + r, cz), (cx - r, cz), (cx, cz + r), (cx, cz - r)] {
            out.push((IVec3::new(x, level, z), BlockSpec::new("glass")));
        }
    }

    // Lanterns at the base and below the ceiling.
    out.push((IVec3::new(cx, 1, cz), BlockSpec::new("lantern")));
    if body_h >= 5 {
        out.push((IVec3::new(cx, body_h - 2, cz), BlockSpec::new("lantern")));
    }

    out
}

/// A bridge: deck spanning the long (z) axis, fence railings, and
/// support pillars at both deck edges every few cells.
pub fn bridge(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let mut out = Vec::new();
    let deck_y = (sy - 2).max(0);
    let edges: Vec<i32> = if sx >= 2 { vec![0, sx - 1] } else { vec![0] };

    // Support pillars first, deck over them.
    if deck_y > 0 {
        let pier = palette.secondary_or_primary();
        let mut z = 0;
        loop {
            for &x in &edges {
                shapes::fill_box(
                    &mut out,
                    IVec3::new(x, 0, z),
                    IVec3::new(x, deck_y - 1, z),
                    pier,
                );
            }
            if z >= sz - 1 {
                break;
            }
            z = (z + 4).min(sz - 1);
        }
    }

    shapes::fill_box(
        &mut out,
        IVec3::new(0, deck_y, 0),
        IVec3::new(sx - 1, deck_y, sz - 1),
        &palette.primary,
    );

    if deck_y + 1 < sy && sx >= 2 {
        let rail = BlockSpec::new("oak_fence");
        for z in 0..sz {
            for &x in &edges {
                out.push((IVec3::new(x, deck_y + 1, z), rail.clone()));
            }
        }
    }

    out
}

/// A village well: rounded base plate, sunken water basin, corner posts
/// carrying a slab canopy, fence courses, and a slab apron.
pub fn well(size: IVec3, palette: &Palette) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let cx = sx / 2;
    let cz = sz / 2;
    let mut out = Vec::new();

    // The water column itself always fits.
    out.push((IVec3::new(cx, 0, cz), BlockSpec::water()));

    if sx.min(sz) < 5 || sy < 3 {
        // Just a rim around the water where the box allows.
        for (x, z) in shapes::ring(cx, cz, 1, 1) {
            emit_inside(&mut out, size, IVec3::new(x, 0, z), &palette.primary);
        }
        return out;
    }

    let base_y = 1;

    // Rounded base plate (corners skipped).
    for dz in -2i32..=2 {
        for dx in -2i32..=2 {
            if dx.abs() == 2 && dz.abs() == 2 {
                continue;
            }
            out.push((IVec3::new(cx + dx, base_y, cz + dz), palette.primary.clone()));
        }
    }

    // Sink the basin: open the plate center and fill water below it.
    for dz in -1i32..=1 {
        for dx in -1i32..=1 {
            out.push((IVec3::new(cx + dx, base_y, cz + dz), BlockSpec::air()));
            out.push((IVec3::new(cx + dx, 0, cz + dz), BlockSpec::water()));
        }
    }

    if sy >= 5 {
        // Corner posts and canopy.
        let post = BlockSpec::new("cobblestone_wall");
        for (dx, dz) in [(-2, -2), (-2, 2), (2, -2), (2, 2)] {
            for y in 2..=3 {
                out.push((IVec3::new(cx + dx, y, cz + dz), post.clone()));
            }
        }
        let slab = BlockSpec::new("oak_slab");
        for dz in -1i32..=1 {
            for dx in -1i32..=1 {
                emit_inside(&mut out, size, IVec3::new(cx + dx, 4, cz + dz), &slab);
            }
        }
        // Fence tops on the edge midpoints.
        let fence = BlockSpec::new("oak_fence");
        for (dx, dz) in [(-2, 0), (2, 0), (0, -2), (0, 2)] {
            out.push((IVec3::new(cx + dx, 2, cz + dz), fence.clone()));
        }
    }

    // Slab apron circling the plate.
    let apron = BlockSpec::new("stone_slab");
    for dz in -3i32..=3 {
        for dx in -3i32..=3 {
            let dist_sq = dx * dx + dz * dz;
            if (7..=12).contains(&dist_sq) {
                emit_inside(&mut out, size, IVec3::new(cx + dx, base_y, cz + dz), &apron);
            }
        }
    }

    out
}

const FLOWERS: [&str; 8] = [
    "poppy",
    "dandelion",
    "blue_orchid",
    "allium",
    "azure_bluet",
    "red_tulip",
    "orange_tulip",
    "white_tulip",
];

/// A fenced garden: ground plate, perimeter fence with a front gate gap,
/// seeded flower and grass scatter, and a composter centerpiece.
pub fn garden(size: IVec3, palette: &Palette, seeds: &BuildSeeds) -> Vec<Emission> {
    let (sx, sy, sz) = (size.x, size.y, size.z);
    let mut out = Vec::new();

    shapes::fill_box(&mut out, IVec3::ZERO, IVec3::new(sx - 1, 0, sz - 1), &palette.primary);
    if sy < 2 {
        return out;
    }

    // Perimeter fence, gate gap at the front center.
    if sx >= 3 && sz >= 3 {
        let fence = BlockSpec::new("oak_fence");
        let gate_x = sx / 2;
        for x in 0..sx {
            if x != gate_x {
                out.push((IVec3::new(x, 1, 0), fence.clone()));
            }
            out.push((IVec3::new(x, 1, sz - 1), fence.clone()));
        }
        for z in 1..sz - 1 {
            out.push((IVec3::new(0, 1, z), fence.clone()));
            out.push((IVec3::new(sx - 1, 1, z), fence.clone()));
        }

        // Seeded scatter over the interior beds.
        let mut rng = ChaCha8Rng::seed_from_u64(seeds.scatter);
        let count = ((sx * sz) / 6).max(1);
        for _ in 0..count {
            let x = rng.gen_range(1..sx - 1);
            let z = rng.gen_range(1..sz - 1);
            let block = if rng.gen::<f32>() < 0.7 {
                BlockSpec::new(FLOWERS[rng.gen_range(0..FLOWERS.len())])
            } else {
                BlockSpec::new("short_grass")
            };
            out.push((IVec3::new(x, 1, z), block));
        }
    }

    // Centerpiece last so the scatter never buries it.
    if sx >= 5 && sz >= 5 {
        out.push((IVec3::new(sx / 2, 1, sz / 2), BlockSpec::new("composter")));
    }

    out
}
