//! Placement driver
//!
//! The two function-shaped boundaries the request layer consumes: turn a
//! structure request into a final ordered list of world-space placements,
//! and turn a terrain request into a structured report. The driver never
//! reorders generator output, so last-write-wins semantics carry through
//! to world space; forwarding placements to a world-write API (and any
//! retry policy) belongs to the request layer.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::block::{BlockSpec, Palette};
use crate::config::EngineConfig;
use crate::coords::IVec3;
use crate::error::EngineError;
use crate::seeds::BuildSeeds;
use crate::structures::{self, BuildKind, SizeSpec};
use crate::terrain::{self, HeightmapKind, TerrainReport, WaterCoverage, WorldSlice};
use crate::transform::Transform;

/// A final world-space block placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: IVec3,
    pub block: BlockSpec,
}

/// Generate a structure or model as world-space placements: dispatch to
/// the matching generator, map every local offset through the transform
/// using the structure's own bounding size, then translate by `position`.
pub fn build_structure(
    position: IVec3,
    transform: Transform,
    kind: BuildKind,
    size: SizeSpec,
    palette: &Palette,
    seed: u64,
    config: &EngineConfig,
) -> Result<Vec<Placement>, EngineError> {
    let bounding = kind.bounding_size(size);
    if bounding.x < 1 || bounding.y < 1 || bounding.z < 1 {
        return Err(EngineError::invalid_geometry(format!(
            "structure size {bounding} must be positive on every axis"
        )));
    }
    let limit = config.max_structure_extent;
    if bounding.x > limit || bounding.y > limit || bounding.z > limit {
        warn!("rejecting {kind} build: size {bounding} exceeds the per-axis limit {limit}");
        return Err(EngineError::invalid_geometry(format!(
            "structure size {bounding} exceeds the per-axis limit {limit}"
        )));
    }

    let seeds = BuildSeeds::from_master(seed);
    let placements: Vec<Placement> = structures::generate(kind, bounding, palette, &seeds)
        .into_iter()
        .map(|(offset, block)| Placement {
            position: position + transform.apply(bounding, offset),
            block,
        })
        .collect();

    info!("built {kind} at {position}: {} placements (seed {seed})", placements.len());
    Ok(placements)
}

/// Place a solid or hollow cuboid between two world corners (any corner
/// order; the box is normalized). Hollow cuboids fill their interior with
/// the palette's secondary material when one is present.
pub fn build_cuboid(
    corner1: IVec3,
    corner2: IVec3,
    palette: &Palette,
    hollow: bool,
    config: &EngineConfig,
) -> Result<Vec<Placement>, EngineError> {
    let min = IVec3::new(corner1.x.min(corner2.x), corner1.y.min(corner2.y), corner1.z.min(corner2.z));
    let max = IVec3::new(corner1.x.max(corner2.x), corner1.y.max(corner2.y), corner1.z.max(corner2.z));
    let size = max - min + IVec3::splat(1);
    let limit = config.max_structure_extent;
    if size.x > limit || size.y > limit || size.z > limit {
        return Err(EngineError::invalid_geometry(format!(
            "cuboid size {size} exceeds the per-axis limit {limit}"
        )));
    }

    let emissions = if hollow {
        structures::shapes::hollow_cuboid(size, palette)
    } else {
        structures::shapes::solid_cuboid(size, palette)
    };
    let placements: Vec<Placement> = emissions
        .into_iter()
        .map(|(offset, block)| Placement { position: min + offset, block })
        .collect();

    info!("placed {} cuboid between {min} and {max}: {} placements",
        if hollow { "hollow" } else { "solid" }, placements.len());
    Ok(placements)
}

/// Analyze a world slice with the default solid-surface heightmap.
pub fn query_terrain(
    slice: &WorldSlice,
    line: Option<((i32, i32), (i32, i32))>,
    config: &EngineConfig,
) -> Result<TerrainReport, EngineError> {
    query_terrain_with(slice, line, HeightmapKind::OceanFloor, config)
}

/// Analyze a world slice with explicit heightmap semantics. The profile
/// is included only when a line is supplied; the scan-volume limit is
/// enforced here, before any column is touched.
pub fn query_terrain_with(
    slice: &WorldSlice,
    line: Option<((i32, i32), (i32, i32))>,
    kind: HeightmapKind,
    config: &EngineConfig,
) -> Result<TerrainReport, EngineError> {
    let region = slice.region();
    let volume = region.volume();
    if volume > config.max_scan_volume {
        warn!("rejecting terrain query: {volume} cells over the {} limit", config.max_scan_volume);
        return Err(EngineError::RegionTooLarge { volume, limit: config.max_scan_volume });
    }

    let heightmap = terrain::sample_heightmap_kind(slice, kind);
    let surface = terrain::classify_surface(slice, &heightmap);
    let water = terrain::detect_water(slice, &heightmap);
    let stats = terrain::compute_stats(&heightmap, &surface, &water);
    let profile = match line {
        Some((start, end)) => Some(terrain::compute_profile(region, &heightmap, start, end)?),
        None => None,
    };

    let report = TerrainReport {
        width: region.width(),
        depth: region.depth(),
        terrain: terrain::classify_terrain(&stats),
        water: WaterCoverage::from_ratio(stats.water_coverage),
        stats,
        profile,
    };
    info!("terrain query over {} columns complete", region.column_count());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Region;
    use crate::structures::{ModelKind, StructureKind};
    use crate::terrain::TerrainKind;

    fn oak() -> Palette {
        Palette::new(BlockSpec::new("oak_planks"))
    }

    #[test]
    fn test_rotated_house_stays_in_footprint() {
        let position = IVec3::new(0, 65, 0);
        let transform = Transform::from_degrees(90, false, false, false).unwrap();
        let placements = build_structure(
            position,
            transform,
            BuildKind::Structure(StructureKind::House),
            SizeSpec::Uniform(7),
            &oak(),
            11,
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(!placements.is_empty());
        for p in &placements {
            assert!(
                p.position.x >= 0 && p.position.x < 7
                    && p.position.y >= 65 && p.position.y < 72
                    && p.position.z >= 0 && p.position.z < 7,
                "placement {} escaped the rotated footprint",
                p.position
            );
        }
    }

    #[test]
    fn test_build_is_reproducible() {
        let args = (
            IVec3::new(-10, 70, 42),
            Transform::new(3, true, false, false),
            BuildKind::Model(ModelKind::Tree),
            SizeSpec::Uniform(9),
        );
        let palette =
            Palette::with_secondary(BlockSpec::new("oak_log"), BlockSpec::new("oak_leaves"));
        let config = EngineConfig::default();
        let a = build_structure(args.0, args.1, args.2, args.3, &palette, 1234, &config).unwrap();
        let b = build_structure(args.0, args.1, args.2, args.3, &palette, 1234, &config).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap(),
            "identical requests must serialize identically"
        );
    }

    #[test]
    fn test_vertical_flip_puts_roof_below_floor() {
        // Honored literally: a flipped house hangs its door near the top.
        let config = EngineConfig::default();
        let kind = BuildKind::Structure(StructureKind::House);
        let upright = build_structure(
            IVec3::ZERO,
            Transform::IDENTITY,
            kind,
            SizeSpec::Uniform(7),
            &oak(),
            5,
            &config,
        )
        .unwrap();
        let flipped = build_structure(
            IVec3::ZERO,
            Transform::new(0, false, true, false),
            kind,
            SizeSpec::Uniform(7),
            &oak(),
            5,
            &config,
        )
        .unwrap();

        let door_y = |placements: &[Placement]| {
            placements
                .iter()
                .filter(|p| p.block.id == "oak_door")
                .map(|p| p.position.y)
                .min()
                .unwrap()
        };
        assert_eq!(door_y(&upright), 1);
        assert_eq!(door_y(&flipped), 4);
    }

    #[test]
    fn test_oversized_structure_rejected() {
        let config = EngineConfig { max_structure_extent: 16, ..EngineConfig::default() };
        let err = build_structure(
            IVec3::ZERO,
            Transform::IDENTITY,
            BuildKind::Structure(StructureKind::Tower),
            SizeSpec::Uniform(10), // tower doubles the vertical extent to 20
            &oak(),
            0,
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_nonpositive_size_rejected() {
        let err = build_structure(
            IVec3::ZERO,
            Transform::IDENTITY,
            BuildKind::Structure(StructureKind::Well),
            SizeSpec::PerAxis(IVec3::new(5, 0, 5)),
            &oak(),
            0,
            &EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_cuboid_corners_normalized() {
        let palette =
            Palette::with_secondary(BlockSpec::new("stone"), BlockSpec::new("air"));
        let placements = build_cuboid(
            IVec3::new(4, 10, 4),
            IVec3::new(0, 8, 0),
            &palette,
            true,
            &EngineConfig::default(),
        )
        .unwrap();

        // 5x3x5 hollow box: full shell plus the 3x1x3 interior fill.
        let shell = 5 * 3 * 5 - 3 * 1 * 3;
        assert_eq!(placements.len(), shell + 9);
        assert!(placements.iter().all(|p| {
            p.position.x >= 0 && p.position.x <= 4
                && p.position.y >= 8 && p.position.y <= 10
                && p.position.z >= 0 && p.position.z <= 4
        }));
        // Interior fill arrives after the shell.
        assert!(placements[shell..].iter().all(|p| p.block.is_air()));
    }

    #[test]
    fn test_terrain_query_flat_world() {
        let region = Region::new(IVec3::ZERO, IVec3::new(9, 255, 9)).unwrap();
        let slice = WorldSlice::from_fn(region, |p| {
            if p.y <= 64 { BlockSpec::new("stone") } else { BlockSpec::air() }
        });
        let report = query_terrain(&slice, None, &EngineConfig::default()).unwrap();

        let heights = report.stats.heights.unwrap();
        assert_eq!(heights.min, 64);
        assert_eq!(heights.max, 64);
        assert_eq!(report.stats.water_coverage, 0.0);
        assert_eq!(report.terrain, Some(TerrainKind::VeryFlat));
        assert_eq!(report.water, WaterCoverage::None);
        assert!(report.profile.is_none());
    }

    #[test]
    fn test_terrain_query_with_profile() {
        let region = Region::new(IVec3::ZERO, IVec3::new(9, 80, 9)).unwrap();
        let slice = WorldSlice::from_fn(region, |p| {
            if p.y <= 60 { BlockSpec::new("grass_block") } else { BlockSpec::air() }
        });
        let report =
            query_terrain(&slice, Some(((0, 0), (9, 9))), &EngineConfig::default()).unwrap();
        let profile = report.profile.unwrap();
        assert_eq!(profile.samples.len(), 10);
    }

    #[test]
    fn test_scan_volume_limit() {
        let region = Region::new(IVec3::ZERO, IVec3::new(9, 255, 9)).unwrap();
        let slice = WorldSlice::filled(region, BlockSpec::air());
        let config = EngineConfig { max_scan_volume: 1_000, ..EngineConfig::default() };
        let err = query_terrain(&slice, None, &config).unwrap_err();
        assert_eq!(err, EngineError::RegionTooLarge { volume: 25_600, limit: 1_000 });
    }
}
