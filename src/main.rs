use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use voxel_bridge::block::{BlockSpec, Palette};
use voxel_bridge::config::EngineConfig;
use voxel_bridge::coords::IVec3;
use voxel_bridge::driver;
use voxel_bridge::error::EngineError;
use voxel_bridge::structures::{BuildKind, SizeSpec};
use voxel_bridge::terrain::{HeightmapKind, WorldSlice};
use voxel_bridge::transform::Transform;

#[derive(Parser, Debug)]
#[command(name = "voxel_bridge")]
#[command(about = "Compute voxel structure placements and terrain reports")]
struct Args {
    /// Engine configuration file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate world-space placements for a structure or model
    Build {
        /// Structure or model kind (e.g. "house", "model:tree")
        #[arg(short, long)]
        kind: String,

        /// World position of the structure origin, as "x,y,z"
        #[arg(short, long, default_value = "0,0,0")]
        position: String,

        /// Size: a scalar ("7") or per-axis extents ("7x5x9")
        #[arg(short, long, default_value = "7")]
        size: String,

        /// Rotation about the vertical axis in degrees (0/90/180/270)
        #[arg(short, long, default_value = "0")]
        rotation: i32,

        /// Mirror along the x axis
        #[arg(long)]
        flip_x: bool,

        /// Mirror vertically
        #[arg(long)]
        flip_y: bool,

        /// Mirror along the z axis
        #[arg(long)]
        flip_z: bool,

        /// Primary block id
        #[arg(long, default_value = "oak_planks")]
        primary: String,

        /// Optional secondary/fill block id
        #[arg(long)]
        secondary: Option<String>,

        /// Seed for decorative randomness (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Place a solid or hollow cuboid between two corners
    Cuboid {
        /// First corner, as "x,y,z"
        #[arg(long)]
        corner1: String,

        /// Second corner, as "x,y,z"
        #[arg(long)]
        corner2: String,

        /// Block id for the cuboid (shell, when hollow)
        #[arg(long, default_value = "stone")]
        primary: String,

        /// Interior fill block id for hollow cuboids
        #[arg(long)]
        fill: Option<String>,

        /// Place only the shell
        #[arg(long)]
        hollow: bool,
    },

    /// Analyze a world slice dump and print a terrain report
    Terrain {
        /// World slice dump (JSON) fetched by the request layer
        #[arg(short, long)]
        slice: PathBuf,

        /// Optional profile line "x1,z1:x2,z2" in world coordinates
        #[arg(short, long)]
        line: Option<String>,

        /// Heightmap semantics for the surface scan
        #[arg(long, default_value = "ocean_floor")]
        surface: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config: EngineConfig = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Build {
            kind,
            position,
            size,
            rotation,
            flip_x,
            flip_y,
            flip_z,
            primary,
            secondary,
            seed,
        } => {
            let kind: BuildKind = kind.parse()?;
            let position = parse_ivec3(&position)?;
            let size = parse_size(&size)?;
            let transform = Transform::from_degrees(rotation, flip_x, flip_y, flip_z)?;
            let palette = match secondary {
                Some(id) => Palette::with_secondary(BlockSpec::new(primary), BlockSpec::new(id)),
                None => Palette::new(BlockSpec::new(primary)),
            };
            let seed = seed.unwrap_or_else(rand::random);

            let placements =
                driver::build_structure(position, transform, kind, size, &palette, seed, &config)?;
            println!("{}", serde_json::to_string_pretty(&placements)?);
        }
        Command::Cuboid { corner1, corner2, primary, fill, hollow } => {
            let palette = match fill {
                Some(id) => Palette::with_secondary(BlockSpec::new(primary), BlockSpec::new(id)),
                None => Palette::new(BlockSpec::new(primary)),
            };
            let placements = driver::build_cuboid(
                parse_ivec3(&corner1)?,
                parse_ivec3(&corner2)?,
                &palette,
                hollow,
                &config,
            )?;
            println!("{}", serde_json::to_string_pretty(&placements)?);
        }
        Command::Terrain { slice, line, surface } => {
            let slice: WorldSlice = serde_json::from_str(&fs::read_to_string(slice)?)?;
            let kind: HeightmapKind = surface.parse()?;
            let line = line.as_deref().map(parse_line).transpose()?;

            let report = driver::query_terrain_with(&slice, line, kind, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn parse_ivec3(s: &str) -> Result<IVec3, EngineError> {
    let parts: Vec<i32> = s.split(',').map(|p| p.trim().parse()).collect::<Result<_, _>>()
        .map_err(|_| EngineError::invalid_geometry(format!("expected \"x,y,z\", got \"{s}\"")))?;
    match parts[..] {
        [x, y, z] => Ok(IVec3::new(x, y, z)),
        _ => Err(EngineError::invalid_geometry(format!("expected \"x,y,z\", got \"{s}\""))),
    }
}

fn parse_size(s: &str) -> Result<SizeSpec, EngineError> {
    let bad = || EngineError::invalid_geometry(format!("expected \"s\" or \"WxHxD\", got \"{s}\""));
    if s.contains('x') {
        let parts: Vec<i32> =
            s.split('x').map(|p| p.trim().parse()).collect::<Result<_, _>>().map_err(|_| bad())?;
        match parts[..] {
            [x, y, z] => Ok(SizeSpec::PerAxis(IVec3::new(x, y, z))),
            _ => Err(bad()),
        }
    } else {
        s.trim().parse().map(SizeSpec::Uniform).map_err(|_| bad())
    }
}

fn parse_line(s: &str) -> Result<((i32, i32), (i32, i32)), EngineError> {
    let bad = || EngineError::invalid_geometry(format!("expected \"x1,z1:x2,z2\", got \"{s}\""));
    let (a, b) = s.split_once(':').ok_or_else(|| bad())?;
    let point = |p: &str| -> Result<(i32, i32), EngineError> {
        let parts: Vec<i32> =
            p.split(',').map(|c| c.trim().parse()).collect::<Result<_, _>>().map_err(|_| bad())?;
        match parts[..] {
            [x, z] => Ok((x, z)),
            _ => Err(bad()),
        }
    };
    Ok((point(a)?, point(b)?))
}
