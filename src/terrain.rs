//! Terrain sampling and analysis
//!
//! Takes a request-scoped slice of raw world blocks (fetched by the
//! surrounding request layer — the sampler itself never performs I/O),
//! derives per-column heightmaps, surface blocks, and a water mask, and
//! aggregates them into statistics, directional profiles, and a
//! serializable report.

use std::collections::BTreeMap;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::block::BlockSpec;
use crate::coords::{IVec3, Region};
use crate::error::EngineError;
use crate::grid::Grid;

/// Per-column surface elevation; `None` marks a column with no surface in
/// the scanned vertical range.
pub type Heightmap = Grid<Option<i32>>;

// =============================================================================
// WORLD SLICE
// =============================================================================

/// A dense, request-scoped volume of raw world blocks over a region.
///
/// Serialized form is [`SliceDump`]: the region plus all blocks ordered by
/// column (x outer, then z), ascending y within each column.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "SliceDump", into = "SliceDump")]
pub struct WorldSlice {
    region: Region,
    blocks: Vec<BlockSpec>,
}

/// Raw serialized form of a [`WorldSlice`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SliceDump {
    pub region: Region,
    pub blocks: Vec<BlockSpec>,
}

impl From<WorldSlice> for SliceDump {
    fn from(slice: WorldSlice) -> Self {
        SliceDump { region: slice.region, blocks: slice.blocks }
    }
}

impl TryFrom<SliceDump> for WorldSlice {
    type Error = EngineError;

    fn try_from(dump: SliceDump) -> Result<Self, EngineError> {
        WorldSlice::from_parts(dump.region, dump.blocks)
    }
}

impl WorldSlice {
    /// Build a slice from a region and its blocks in serialized order.
    pub fn from_parts(region: Region, blocks: Vec<BlockSpec>) -> Result<Self, EngineError> {
        if blocks.len() as u64 != region.volume() {
            return Err(EngineError::invalid_geometry(format!(
                "slice holds {} blocks but the region volume is {}",
                blocks.len(),
                region.volume()
            )));
        }
        Ok(Self { region, blocks })
    }

    /// A slice filled with a single block everywhere.
    pub fn filled(region: Region, block: BlockSpec) -> Self {
        let blocks = vec![block; region.volume() as usize];
        Self { region, blocks }
    }

    /// Build a slice by evaluating a function at every world position.
    pub fn from_fn(region: Region, f: impl Fn(IVec3) -> BlockSpec) -> Self {
        let (w, h, d) = (region.width(), region.height(), region.depth());
        let min = region.min();
        let mut blocks = Vec::with_capacity(region.volume() as usize);
        for x in 0..w {
            for z in 0..d {
                for y in 0..h {
                    blocks.push(f(IVec3::new(min.x + x, min.y + y, min.z + z)));
                }
            }
        }
        Self { region, blocks }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let h = self.region.height() as usize;
        let d = self.region.depth() as usize;
        (x * d + z) * h + y
    }

    /// Block at local coordinates within the region.
    pub fn block_local(&self, x: usize, y: usize, z: usize) -> &BlockSpec {
        &self.blocks[self.index(x, y, z)]
    }
}

// =============================================================================
// HEIGHTMAP SAMPLING
// =============================================================================

/// Which blocks terminate a downward column scan.
///
/// Mirrors the four heightmap kinds a voxel world interface exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightmapKind {
    /// First non-air block of any kind.
    WorldSurface,
    /// First motion-blocking block; liquids and leaves count, plants do not.
    MotionBlocking,
    /// Like `MotionBlocking` but scanning through leaves and vines.
    MotionBlockingNoLeaves,
    /// First solid ground: not air, liquid, plant, or foliage.
    OceanFloor,
}

impl HeightmapKind {
    pub fn counts_as_surface(&self, block: &BlockSpec) -> bool {
        match self {
            HeightmapKind::WorldSurface => !block.is_air(),
            HeightmapKind::MotionBlocking => !block.is_air() && !block.is_plant(),
            HeightmapKind::MotionBlockingNoLeaves => {
                !block.is_air() && !block.is_plant() && !block.is_foliage()
            }
            HeightmapKind::OceanFloor => block.is_surface_solid(),
        }
    }
}

impl FromStr for HeightmapKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        match s {
            "world_surface" | "WORLD_SURFACE" => Ok(HeightmapKind::WorldSurface),
            "motion_blocking" | "MOTION_BLOCKING" => Ok(HeightmapKind::MotionBlocking),
            "motion_blocking_no_leaves" | "MOTION_BLOCKING_NO_LEAVES" => {
                Ok(HeightmapKind::MotionBlockingNoLeaves)
            }
            "ocean_floor" | "OCEAN_FLOOR" => Ok(HeightmapKind::OceanFloor),
            other => Err(EngineError::unknown_kind(other)),
        }
    }
}

/// Scan every column downward and record the first solid surface
/// ([`HeightmapKind::OceanFloor`] semantics).
pub fn sample_heightmap(slice: &WorldSlice) -> Heightmap {
    sample_heightmap_kind(slice, HeightmapKind::OceanFloor)
}

/// Scan every column downward with explicit stop semantics.
///
/// Columns are scanned in parallel; the output is ordered by column index
/// and therefore deterministic.
pub fn sample_heightmap_kind(slice: &WorldSlice, kind: HeightmapKind) -> Heightmap {
    let w = slice.region().width() as usize;
    let d = slice.region().depth() as usize;
    let columns: Vec<Option<i32>> = (0..w * d)
        .into_par_iter()
        .map(|idx| scan_column(slice, idx % w, idx / w, kind))
        .collect();
    Grid::from_vec(w, d, columns)
}

fn scan_column(slice: &WorldSlice, x: usize, z: usize, kind: HeightmapKind) -> Option<i32> {
    let h = slice.region().height() as usize;
    let min_y = slice.region().min().y;
    for y in (0..h).rev() {
        if kind.counts_as_surface(slice.block_local(x, y, z)) {
            return Some(min_y + y as i32);
        }
    }
    None
}

/// Record the block at each column's surface height.
pub fn classify_surface(slice: &WorldSlice, heightmap: &Heightmap) -> Grid<Option<BlockSpec>> {
    let min_y = slice.region().min().y;
    let mut surface = Grid::new_with(heightmap.width(), heightmap.depth(), None);
    for (x, z, height) in heightmap.iter() {
        if let Some(y) = height {
            let block = slice.block_local(x, (y - min_y) as usize, z).clone();
            surface.set(x, z, Some(block));
        }
    }
    surface
}

/// Flag columns whose surface block, or the block immediately above it, is
/// a liquid. Columns with no recorded surface are never flagged.
pub fn detect_water(slice: &WorldSlice, heightmap: &Heightmap) -> Grid<bool> {
    let region = slice.region();
    let min_y = region.min().y;
    let max_y = region.max().y;
    let mut water = Grid::new_with(heightmap.width(), heightmap.depth(), false);
    for (x, z, height) in heightmap.iter() {
        let Some(y) = *height else { continue };
        let at_surface = slice.block_local(x, (y - min_y) as usize, z).is_liquid();
        let above_surface =
            y < max_y && slice.block_local(x, (y + 1 - min_y) as usize, z).is_liquid();
        water.set(x, z, at_surface || above_surface);
    }
    water
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Aggregates over the non-sentinel heights of a heightmap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeightSummary {
    pub min: i32,
    pub max: i32,
    pub mean: f64,
    /// Population variance of the surface heights.
    pub variance: f64,
}

/// Summary statistics over a sampled region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainStats {
    /// `None` when no column produced a surface; never NaN.
    pub heights: Option<HeightSummary>,
    /// Fraction of all columns flagged as water, in 0..=1.
    pub water_coverage: f64,
    /// Count of surface blocks by id.
    pub surface_blocks: BTreeMap<String, usize>,
}

/// Aggregate heightmap, surface classification, and water mask into stats.
pub fn compute_stats(
    heightmap: &Heightmap,
    surface: &Grid<Option<BlockSpec>>,
    water: &Grid<bool>,
) -> TerrainStats {
    let heights: Vec<i32> = heightmap.values().flatten().copied().collect();
    let summary = if heights.is_empty() {
        None
    } else {
        let n = heights.len() as f64;
        let mean = heights.iter().map(|&h| h as f64).sum::<f64>() / n;
        let variance =
            heights.iter().map(|&h| (h as f64 - mean).powi(2)).sum::<f64>() / n;
        Some(HeightSummary {
            min: *heights.iter().min().expect("non-empty"),
            max: *heights.iter().max().expect("non-empty"),
            mean,
            variance,
        })
    };

    let total_columns = heightmap.len();
    let wet_columns = water.values().filter(|&&w| w).count();
    let water_coverage =
        if total_columns == 0 { 0.0 } else { wet_columns as f64 / total_columns as f64 };

    let mut surface_blocks = BTreeMap::new();
    for (_, _, block) in surface.iter() {
        if let Some(block) = block {
            *surface_blocks.entry(block.id.clone()).or_insert(0) += 1;
        }
    }

    TerrainStats { heights: summary, water_coverage, surface_blocks }
}

// =============================================================================
// PROFILES
// =============================================================================

/// One sample along a profile line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    /// Cumulative Euclidean distance from the line start.
    pub distance: f64,
    /// Surface height at the sample column, if any.
    pub height: Option<i32>,
}

/// Heights sampled along a discretized line segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub samples: Vec<ProfileSample>,
}

/// Sample the heightmap along the Bresenham line from `start` to `end`
/// (world (x, z) coordinates, both inclusive).
///
/// Fails with `OutOfBounds` if either endpoint lies outside the region
/// footprint. Diagonal steps advance the distance by sqrt(2), axis steps
/// by 1, so distances are strictly increasing.
pub fn compute_profile(
    region: &Region,
    heightmap: &Heightmap,
    start: (i32, i32),
    end: (i32, i32),
) -> Result<TerrainProfile, EngineError> {
    for (x, z) in [start, end] {
        if !region.footprint_contains(x, z) {
            return Err(EngineError::OutOfBounds { x, z });
        }
    }

    let min = region.min();
    let (mut x, mut z) = start;
    let (x1, z1) = end;
    let dx = (x1 - x).abs();
    let dz = (z1 - z).abs();
    let step_x = if x < x1 { 1 } else { -1 };
    let step_z = if z < z1 { 1 } else { -1 };
    let mut err = dx - dz;
    let mut distance = 0.0f64;

    let mut samples = Vec::with_capacity(dx.max(dz) as usize + 1);
    loop {
        let height = *heightmap.get((x - min.x) as usize, (z - min.z) as usize);
        samples.push(ProfileSample { distance, height });
        if x == x1 && z == z1 {
            break;
        }
        let e2 = 2 * err;
        let mut diagonal = true;
        if e2 > -dz {
            err -= dz;
            x += step_x;
        } else {
            diagonal = false;
        }
        if e2 < dx {
            err += dx;
            z += step_z;
        } else {
            diagonal = false;
        }
        distance += if diagonal { std::f64::consts::SQRT_2 } else { 1.0 };
    }

    Ok(TerrainProfile { samples })
}

// =============================================================================
// CLASSIFICATION AND REPORT
// =============================================================================

/// Coarse terrain character derived from the height standard deviation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    VeryFlat,
    Flat,
    Hilly,
    Mountainous,
}

/// Classify terrain by height standard deviation (thresholds 3 / 7 / 15).
/// Returns `None` when the stats carry no height summary.
pub fn classify_terrain(stats: &TerrainStats) -> Option<TerrainKind> {
    let std_dev = stats.heights.as_ref()?.variance.sqrt();
    Some(if std_dev < 3.0 {
        TerrainKind::VeryFlat
    } else if std_dev < 7.0 {
        TerrainKind::Flat
    } else if std_dev < 15.0 {
        TerrainKind::Hilly
    } else {
        TerrainKind::Mountainous
    })
}

/// Coarse water coverage bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterCoverage {
    None,
    Light,
    Moderate,
    Extensive,
}

impl WaterCoverage {
    /// Bucket a coverage ratio (thresholds 0.05 / 0.2 / 0.5).
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.5 {
            WaterCoverage::Extensive
        } else if ratio > 0.2 {
            WaterCoverage::Moderate
        } else if ratio > 0.05 {
            WaterCoverage::Light
        } else {
            WaterCoverage::None
        }
    }
}

/// The structured result of a terrain query.
#[derive(Clone, Debug, Serialize)]
pub struct TerrainReport {
    /// Footprint width (x extent).
    pub width: i32,
    /// Footprint depth (z extent).
    pub depth: i32,
    pub stats: TerrainStats,
    pub terrain: Option<TerrainKind>,
    pub water: WaterCoverage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<TerrainProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(max: IVec3) -> Region {
        Region::new(IVec3::ZERO, max).unwrap()
    }

    /// Solid stone up to and including `surface_y`, air above.
    fn flat_slice(max: IVec3, surface_y: i32) -> WorldSlice {
        WorldSlice::from_fn(region(max), |p| {
            if p.y <= surface_y {
                BlockSpec::new("stone")
            } else {
                BlockSpec::air()
            }
        })
    }

    #[test]
    fn test_flat_world_stats() {
        let slice = flat_slice(IVec3::new(9, 255, 9), 64);
        let heightmap = sample_heightmap(&slice);
        let surface = classify_surface(&slice, &heightmap);
        let water = detect_water(&slice, &heightmap);
        let stats = compute_stats(&heightmap, &surface, &water);

        let heights = stats.heights.unwrap();
        assert_eq!(heights.min, 64);
        assert_eq!(heights.max, 64);
        assert_eq!(heights.mean, 64.0);
        assert_eq!(heights.variance, 0.0);
        assert_eq!(stats.water_coverage, 0.0);
        assert_eq!(stats.surface_blocks.get("stone"), Some(&100));
        assert_eq!(classify_terrain(&stats), Some(TerrainKind::VeryFlat));
    }

    #[test]
    fn test_water_detected_above_ocean_floor() {
        // Stone up to y=59, water from 60 to 64, air above.
        let slice = WorldSlice::from_fn(region(IVec3::new(3, 70, 3)), |p| {
            if p.y <= 59 {
                BlockSpec::new("stone")
            } else if p.y <= 64 {
                BlockSpec::water()
            } else {
                BlockSpec::air()
            }
        });
        let floor = sample_heightmap(&slice);
        assert_eq!(*floor.get(0, 0), Some(59));

        let surface = sample_heightmap_kind(&slice, HeightmapKind::WorldSurface);
        assert_eq!(*surface.get(0, 0), Some(64));

        let water = detect_water(&slice, &floor);
        assert!(water.values().all(|&w| w));

        let stats = compute_stats(&floor, &classify_surface(&slice, &floor), &water);
        assert_eq!(stats.water_coverage, 1.0);
        assert_eq!(WaterCoverage::from_ratio(stats.water_coverage), WaterCoverage::Extensive);
    }

    #[test]
    fn test_heightmap_kind_leaf_handling() {
        // Stone ground at 64, a leaf layer floating at 70.
        let slice = WorldSlice::from_fn(region(IVec3::new(2, 80, 2)), |p| {
            if p.y <= 64 {
                BlockSpec::new("stone")
            } else if p.y == 70 {
                BlockSpec::new("oak_leaves")
            } else {
                BlockSpec::air()
            }
        });
        let blocking = sample_heightmap_kind(&slice, HeightmapKind::MotionBlocking);
        let no_leaves = sample_heightmap_kind(&slice, HeightmapKind::MotionBlockingNoLeaves);
        assert_eq!(*blocking.get(1, 1), Some(70));
        assert_eq!(*no_leaves.get(1, 1), Some(64));
    }

    #[test]
    fn test_all_air_signals_empty_stats() {
        let slice = WorldSlice::filled(region(IVec3::new(4, 10, 4)), BlockSpec::air());
        let heightmap = sample_heightmap(&slice);
        assert!(heightmap.values().all(|h| h.is_none()));

        let surface = classify_surface(&slice, &heightmap);
        let water = detect_water(&slice, &heightmap);
        let stats = compute_stats(&heightmap, &surface, &water);
        assert!(stats.heights.is_none());
        assert!(stats.surface_blocks.is_empty());
        assert_eq!(stats.water_coverage, 0.0);
        assert_eq!(classify_terrain(&stats), None);
    }

    #[test]
    fn test_variance_over_two_levels() {
        // Half the columns at 10, half at 20.
        let slice = WorldSlice::from_fn(region(IVec3::new(1, 30, 0)), |p| {
            let surface = if p.x == 0 { 10 } else { 20 };
            if p.y <= surface { BlockSpec::new("stone") } else { BlockSpec::air() }
        });
        let heightmap = sample_heightmap(&slice);
        let stats = compute_stats(
            &heightmap,
            &classify_surface(&slice, &heightmap),
            &detect_water(&slice, &heightmap),
        );
        let heights = stats.heights.unwrap();
        assert_eq!(heights.min, 10);
        assert_eq!(heights.max, 20);
        assert_eq!(heights.mean, 15.0);
        assert_eq!(heights.variance, 25.0);
    }

    #[test]
    fn test_profile_step_count_and_distances() {
        let slice = flat_slice(IVec3::new(9, 70, 9), 64);
        let heightmap = sample_heightmap(&slice);
        let profile =
            compute_profile(slice.region(), &heightmap, (0, 0), (7, 3)).unwrap();

        // Chebyshev distance + 1 samples
        assert_eq!(profile.samples.len(), 8);
        assert_eq!(profile.samples[0].distance, 0.0);
        for pair in profile.samples.windows(2) {
            assert!(pair[1].distance > pair[0].distance);
        }
        assert!(profile.samples.iter().all(|s| s.height == Some(64)));
    }

    #[test]
    fn test_profile_single_point() {
        let slice = flat_slice(IVec3::new(4, 70, 4), 64);
        let heightmap = sample_heightmap(&slice);
        let profile =
            compute_profile(slice.region(), &heightmap, (2, 2), (2, 2)).unwrap();
        assert_eq!(profile.samples.len(), 1);
        assert_eq!(profile.samples[0].distance, 0.0);
    }

    #[test]
    fn test_profile_endpoint_out_of_bounds() {
        let slice = flat_slice(IVec3::new(4, 70, 4), 64);
        let heightmap = sample_heightmap(&slice);
        let err =
            compute_profile(slice.region(), &heightmap, (0, 0), (5, 2)).unwrap_err();
        assert_eq!(err, EngineError::OutOfBounds { x: 5, z: 2 });
    }

    #[test]
    fn test_classification_thresholds() {
        let stats = |variance: f64| TerrainStats {
            heights: Some(HeightSummary { min: 0, max: 0, mean: 0.0, variance }),
            water_coverage: 0.0,
            surface_blocks: BTreeMap::new(),
        };
        assert_eq!(classify_terrain(&stats(4.0)), Some(TerrainKind::VeryFlat));
        assert_eq!(classify_terrain(&stats(16.0)), Some(TerrainKind::Flat));
        assert_eq!(classify_terrain(&stats(100.0)), Some(TerrainKind::Hilly));
        assert_eq!(classify_terrain(&stats(400.0)), Some(TerrainKind::Mountainous));
    }

    #[test]
    fn test_slice_dump_roundtrip() {
        let slice = flat_slice(IVec3::new(2, 3, 2), 1);
        let json = serde_json::to_string(&slice).unwrap();
        let back: WorldSlice = serde_json::from_str(&json).unwrap();
        assert_eq!(*sample_heightmap(&back).get(1, 1), Some(1));
    }

    #[test]
    fn test_slice_block_count_validated() {
        let bad = SliceDump {
            region: region(IVec3::new(1, 1, 1)),
            blocks: vec![BlockSpec::air(); 3],
        };
        assert!(WorldSlice::try_from(bad).is_err());
    }
}
