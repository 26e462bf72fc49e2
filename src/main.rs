//! img2map CLI
//!
//! Usage:
//!   img2map [OPTIONS] <INPUT>
//!
//! Options:
//!   -R, --reverse            Convert a map file back into an image
//!   -i, --instantiate        Fill `$key$` placeholders of a template map
//!   -o, --output <FILE>      Output path (default: input path + .map / .png)
//!   -p, --palette <FILE>     Terrain palette (TOML format)
//!       --seed <N>           Seed for key placement
//!       --strict             Reject shared doors and keys placed on doors
//!       --distinct-keys      Never place two keys on the same cell
//!   -h, --help               Print help

use std::path::PathBuf;

use clap::Parser;
use log::info;

use img2map::{
    convert_image_file, convert_map_file, instantiate_file, ConvertConfig, TerrainPalette,
};

#[derive(Parser)]
#[command(name = "img2map")]
#[command(about = "Convert terrain images to MovingAI grid maps and back")]
struct Cli {
    /// Input file: an image, or a map with --reverse / --instantiate
    input: PathBuf,

    /// Convert a map file back into an image
    #[arg(short = 'R', long, conflicts_with = "instantiate")]
    reverse: bool,

    /// Fill the `$key$` placeholders of a template map with random free cells
    #[arg(short, long)]
    instantiate: bool,

    /// Output file (instantiated maps go to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Terrain palette file (TOML format)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Seed for key placement
    #[arg(long)]
    seed: Option<u64>,

    /// Reject maps where a door has two keys or a key sits on a door
    #[arg(long)]
    strict: bool,

    /// Never place two keys on the same cell
    #[arg(long)]
    distinct_keys: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Load palette
    let palette = match &cli.palette {
        Some(path) => match TerrainPalette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TerrainPalette::default(),
    };

    let config = ConvertConfig::new()
        .with_palette(palette)
        .with_seed(cli.seed)
        .with_strict(cli.strict)
        .with_distinct_keys(cli.distinct_keys);
    let output = cli.output.as_deref();

    let result = if cli.instantiate {
        instantiate_file(&cli.input, output, &config).map(|text| {
            if output.is_none() {
                print!("{}", text);
            }
        })
    } else if cli.reverse {
        convert_map_file(&cli.input, output, &config)
            .map(|path| info!("Wrote {}", path.display()))
    } else {
        convert_image_file(&cli.input, output, &config)
            .map(|path| info!("Wrote {}", path.display()))
    };

    if let Err(e) = result {
        eprintln!("{}", e.report());
        std::process::exit(1);
    }
}
