//! Block identity and palettes
//!
//! A block is identified by a (possibly namespaced) id string plus an
//! optional state map and an opaque block-entity payload. Two blocks are
//! equal iff all three agree. Classification (air / liquid / foliage) is
//! namespace-insensitive so "minecraft:water" and "water" behave alike.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A block to be placed or observed in the world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Block id, e.g. "stone" or "minecraft:oak_planks".
    pub id: String,
    /// Block states, e.g. {"facing": "north"}.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<String, String>,
    /// Opaque SNBT block-entity payload; carried through, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl BlockSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), states: BTreeMap::new(), data: None }
    }

    /// Block with states, e.g. `BlockSpec::with_states("oak_stairs", &[("facing", "east")])`.
    pub fn with_states(id: impl Into<String>, states: &[(&str, &str)]) -> Self {
        Self {
            id: id.into(),
            states: states.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            data: None,
        }
    }

    pub fn with_data(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self { id: id.into(), states: BTreeMap::new(), data: Some(data.into()) }
    }

    pub fn air() -> Self {
        BlockSpec::new("air")
    }

    pub fn water() -> Self {
        BlockSpec::new("water")
    }

    /// Id with any namespace prefix stripped.
    pub fn base_id(&self) -> &str {
        match self.id.rsplit_once(':') {
            Some((_, base)) => base,
            None => &self.id,
        }
    }

    pub fn is_air(&self) -> bool {
        matches!(self.base_id(), "air" | "cave_air" | "void_air")
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self.base_id(), "water" | "lava" | "flowing_water" | "flowing_lava")
    }

    /// Leaves and vines: blocks the no-leaves heightmap scans through.
    pub fn is_foliage(&self) -> bool {
        let base = self.base_id();
        base.ends_with("_leaves") || base == "vine"
    }

    /// Small plants that never block motion (flowers, grass, ferns).
    pub fn is_plant(&self) -> bool {
        let base = self.base_id();
        matches!(
            base,
            "grass"
                | "short_grass"
                | "tall_grass"
                | "fern"
                | "large_fern"
                | "dead_bush"
                | "seagrass"
        ) || base.ends_with("_tulip")
            || matches!(
                base,
                "poppy" | "dandelion" | "blue_orchid" | "allium" | "azure_bluet" | "oxeye_daisy"
            )
    }

    /// Solid ground for surface purposes: not air, not liquid, not a plant
    /// and not foliage.
    pub fn is_surface_solid(&self) -> bool {
        !self.is_air() && !self.is_liquid() && !self.is_plant() && !self.is_foliage()
    }
}

/// The materials a generator is permitted to build with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Primary structural material (walls, trunk, deck).
    pub primary: BlockSpec,
    /// Optional secondary/fill material (floor, roof, foliage, accents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<BlockSpec>,
}

impl Palette {
    pub fn new(primary: BlockSpec) -> Self {
        Self { primary, secondary: None }
    }

    pub fn with_secondary(primary: BlockSpec, secondary: BlockSpec) -> Self {
        Self { primary, secondary: Some(secondary) }
    }

    /// The secondary material, falling back to the primary.
    pub fn secondary_or_primary(&self) -> &BlockSpec {
        self.secondary.as_ref().unwrap_or(&self.primary)
    }
}
