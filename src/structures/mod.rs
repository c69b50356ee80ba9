//! Parametric structure and model generators
//!
//! Every generator is a pure function from (size, palette, seeds) to an
//! ordered sequence of structure-local (offset, block) placements. Later
//! placements override earlier ones at the same offset, so hollow and
//! decorated shapes are built as fill-then-carve sequences; the consumer
//! applies last-write-wins, the generators only guarantee emission order.
//!
//! The kind sets are closed enums: adding a variant forces every dispatch
//! site to handle it, and unknown kind *strings* surface as `UnknownKind`
//! at the parsing boundary.

pub mod buildings;
pub mod models;
pub mod shapes;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::block::{BlockSpec, Palette};
use crate::coords::IVec3;
use crate::error::EngineError;
use crate::seeds::BuildSeeds;

/// One structure-local placement emitted by a generator.
pub type Emission = (IVec3, BlockSpec);

/// Multi-room building structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    House,
    Tower,
    Bridge,
    Well,
    Garden,
}

impl StructureKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StructureKind::House => "house",
            StructureKind::Tower => "tower",
            StructureKind::Bridge => "bridge",
            StructureKind::Well => "well",
            StructureKind::Garden => "garden",
        }
    }
}

impl FromStr for StructureKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        match s {
            "house" => Ok(StructureKind::House),
            "tower" => Ok(StructureKind::Tower),
            "bridge" => Ok(StructureKind::Bridge),
            "well" => Ok(StructureKind::Well),
            "garden" => Ok(StructureKind::Garden),
            other => Err(EngineError::unknown_kind(other)),
        }
    }
}

/// Single-feature decorative models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Tower,
    Tree,
    Fountain,
    Statue,
    Windmill,
}

impl ModelKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::Tower => "tower",
            ModelKind::Tree => "tree",
            ModelKind::Fountain => "fountain",
            ModelKind::Statue => "statue",
            ModelKind::Windmill => "windmill",
        }
    }
}

impl FromStr for ModelKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        match s {
            "tower" => Ok(ModelKind::Tower),
            "tree" => Ok(ModelKind::Tree),
            "fountain" => Ok(ModelKind::Fountain),
            "statue" => Ok(ModelKind::Statue),
            "windmill" => Ok(ModelKind::Windmill),
            other => Err(EngineError::unknown_kind(other)),
        }
    }
}

/// A buildable kind: either a structure or a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    Structure(StructureKind),
    Model(ModelKind),
}

impl BuildKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            BuildKind::Structure(kind) => kind.display_name(),
            BuildKind::Model(kind) => kind.display_name(),
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildKind::Structure(kind) => write!(f, "structure:{}", kind.display_name()),
            BuildKind::Model(kind) => write!(f, "model:{}", kind.display_name()),
        }
    }
}

impl FromStr for BuildKind {
    type Err = EngineError;

    /// Accepts bare names ("house", "tree"), resolving structures first,
    /// or explicit "structure:"/"model:" prefixes for the ambiguous ones
    /// ("tower" names both).
    fn from_str(s: &str) -> Result<Self, EngineError> {
        if let Some(rest) = s.strip_prefix("structure:") {
            return StructureKind::from_str(rest).map(BuildKind::Structure);
        }
        if let Some(rest) = s.strip_prefix("model:") {
            return ModelKind::from_str(rest).map(BuildKind::Model);
        }
        StructureKind::from_str(s)
            .map(BuildKind::Structure)
            .or_else(|_| ModelKind::from_str(s).map(BuildKind::Model))
            .map_err(|_| EngineError::unknown_kind(s))
    }
}

/// A requested size: one scalar expanded per-kind, or explicit extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Uniform(i32),
    PerAxis(IVec3),
}

impl BuildKind {
    /// Expand a size request into a concrete bounding box. A scalar `s`
    /// fixes the footprint at `s x s` with a per-kind vertical extent;
    /// per-axis sizes pass through verbatim. Every extent returned from a
    /// positive scalar is at least 1.
    pub fn bounding_size(&self, spec: SizeSpec) -> IVec3 {
        let s = match spec {
            SizeSpec::PerAxis(size) => return size,
            SizeSpec::Uniform(s) => s,
        };
        match self {
            BuildKind::Structure(StructureKind::House) => IVec3::new(s, s, s),
            BuildKind::Structure(StructureKind::Tower) => IVec3::new(s, s * 2, s),
            BuildKind::Structure(StructureKind::Bridge) => {
                IVec3::new((s / 3).clamp(1, 5), (s / 2).clamp(1, 6), s)
            }
            BuildKind::Structure(StructureKind::Well) => IVec3::new(s, s, s),
            BuildKind::Structure(StructureKind::Garden) => IVec3::new(s, s.min(3), s),
            BuildKind::Model(ModelKind::Tower) => IVec3::new(s, s * 3, s),
            BuildKind::Model(ModelKind::Tree) => IVec3::new(s, s * 2, s),
            BuildKind::Model(ModelKind::Fountain) => IVec3::new(s, s / 2 + 2, s),
            BuildKind::Model(ModelKind::Statue) => IVec3::new(s, s * 2, s),
            BuildKind::Model(ModelKind::Windmill) => IVec3::new(s, s * 2, s),
        }
    }
}

/// Generate the local placement sequence for a kind.
///
/// Total for every size with all extents >= 1: minimum sizes degrade to
/// plain filled shapes instead of failing.
pub fn generate(kind: BuildKind, size: IVec3, palette: &Palette, seeds: &BuildSeeds) -> Vec<Emission> {
    match kind {
        BuildKind::Structure(StructureKind::House) => buildings::house(size, palette, seeds),
        BuildKind::Structure(StructureKind::Tower) => buildings::tower(size, palette, seeds),
        BuildKind::Structure(StructureKind::Bridge) => buildings::bridge(size, palette),
        BuildKind::Structure(StructureKind::Well) => buildings::well(size, palette),
        BuildKind::Structure(StructureKind::Garden) => buildings::garden(size, palette, seeds),
        BuildKind::Model(ModelKind::Tower) => models::tower(size, palette),
        BuildKind::Model(ModelKind::Tree) => models::tree(size, palette, seeds),
        BuildKind::Model(ModelKind::Fountain) => models::fountain(size, palette),
        BuildKind::Model(ModelKind::Statue) => models::statue(size, palette),
        BuildKind::Model(ModelKind::Windmill) => models::windmill(size, palette),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockSpec;

    fn all_kinds() -> Vec<BuildKind> {
        vec![
            BuildKind::Structure(StructureKind::House),
            BuildKind::Structure(StructureKind::Tower),
            BuildKind::Structure(StructureKind::Bridge),
            BuildKind::Structure(StructureKind::Well),
            BuildKind::Structure(StructureKind::Garden),
            BuildKind::Model(ModelKind::Tower),
            BuildKind::Model(ModelKind::Tree),
            BuildKind::Model(ModelKind::Fountain),
            BuildKind::Model(ModelKind::Statue),
            BuildKind::Model(ModelKind::Windmill),
        ]
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("house".parse::<BuildKind>().unwrap(), BuildKind::Structure(StructureKind::House));
        assert_eq!("tree".parse::<BuildKind>().unwrap(), BuildKind::Model(ModelKind::Tree));
        // Bare "tower" resolves structure-first; the prefix disambiguates.
        assert_eq!("tower".parse::<BuildKind>().unwrap(), BuildKind::Structure(StructureKind::Tower));
        assert_eq!("model:tower".parse::<BuildKind>().unwrap(), BuildKind::Model(ModelKind::Tower));

        let err = "castle".parse::<BuildKind>().unwrap_err();
        assert_eq!(err, EngineError::UnknownKind { kind: "castle".into() });
    }

    #[test]
    fn test_every_kind_is_total_down_to_size_one() {
        let palette = Palette::new(BlockSpec::new("stone"));
        let seeds = BuildSeeds::from_master(7);
        for kind in all_kinds() {
            for s in 1..=4 {
                let size = kind.bounding_size(SizeSpec::Uniform(s));
                assert!(size.x >= 1 && size.y >= 1 && size.z >= 1, "{kind} scalar {s}");
                let emissions = generate(kind, size, &palette, &seeds);
                assert!(!emissions.is_empty(), "{kind} emitted nothing at scalar {s}");
                for (offset, _) in &emissions {
                    assert!(
                        offset.x >= 0 && offset.x < size.x
                            && offset.y >= 0 && offset.y < size.y
                            && offset.z >= 0 && offset.z < size.z,
                        "{kind} emitted {offset} outside {size}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        let palette = Palette::with_secondary(
            BlockSpec::new("oak_planks"),
            BlockSpec::new("stone_bricks"),
        );
        for kind in all_kinds() {
            let size = kind.bounding_size(SizeSpec::Uniform(8));
            let a = generate(kind, size, &palette, &BuildSeeds::from_master(99));
            let b = generate(kind, size, &palette, &BuildSeeds::from_master(99));
            assert_eq!(a, b, "{kind} is not deterministic");
        }
    }

    #[test]
    fn test_seed_changes_randomized_output() {
        let palette = Palette::with_secondary(
            BlockSpec::new("oak_log"),
            BlockSpec::new("oak_leaves"),
        );
        let kind = BuildKind::Model(ModelKind::Tree);
        let size = kind.bounding_size(SizeSpec::Uniform(9));
        let a = generate(kind, size, &palette, &BuildSeeds::from_master(1));
        let b = generate(kind, size, &palette, &BuildSeeds::from_master(2));
        assert_ne!(a, b);
    }
}
