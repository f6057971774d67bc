use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use svy21::{io::convert_csv_file, Direction, LatLon, Svy21};

#[derive(Parser)]
#[command(name = "svy21")]
#[command(about = "Convert between WGS84 latitude/longitude and SVY21 northing/easting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV of SVY21 northing (Y), easting (X) to latitude, longitude
    ToLatlon(Files),

    /// Convert a CSV of latitude (Y), longitude (X) to SVY21 northing, easting
    ToSvy21(Files),

    /// Convert a single coordinate pair and print it
    Point {
        /// Treat the input as latitude/longitude and print northing/easting
        #[arg(long)]
        to_svy21: bool,

        /// "<northing> <easting>", or "<lat> <lon>" with --to-svy21
        #[arg(allow_hyphen_values = true)]
        coord: String,
    },
}

#[derive(Args)]
struct Files {
    /// Input CSV with a header row
    #[arg(value_hint = clap::ValueHint::FilePath)]
    input: PathBuf,

    /// Output CSV
    #[arg(value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Append to the output instead of overwriting it
    #[arg(short, long)]
    append: bool,
}

fn convert(files: &Files, direction: Direction) -> anyhow::Result<()> {
    let summary = convert_csv_file(&files.input, &files.output, direction, files.append)?;
    println!("Converted {} rows into {}", summary.rows, files.output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::ToLatlon(files) => convert(&files, Direction::ToLatLon),
        Commands::ToSvy21(files) => convert(&files, Direction::ToSvy21),
        Commands::Point { to_svy21: true, coord } => {
            let latlon: LatLon = svy21::from_str(&coord)?;
            println!("{}", latlon.to_svy21()?);
            Ok(())
        }
        Commands::Point { to_svy21: false, coord } => {
            let grid: Svy21 = svy21::from_str(&coord)?;
            println!("{}", grid.to_latlon()?);
            Ok(())
        }
    }
}
