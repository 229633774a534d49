use anyhow::Result;
use clap::Parser;
use imgembed_image::reader;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

/// Reads a generated pixel literal back and prints what it contains.
#[derive(Debug, Parser)]
#[clap(name = "image-embed-inspect", version, about, long_about = None)]
struct Cli {
    /// Generated source file
    file: PathBuf,

    /// Print every pixel as a hex color, one row per line
    #[clap(short = 'p', long = "pixels")]
    pixels: bool,

    /// Enable debug logging
    #[clap(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    let literal = reader::read_file(&cli.file)?;
    let image = &literal.image;

    println!("Source         : {}", literal.source);
    println!("Dimensions     : {}", image.size());
    println!("Pixels         : {}", image.pixels().len());

    if cli.pixels {
        for row in image.rows() {
            let row: Vec<String> = row.iter().map(ToString::to_string).collect();
            println!("{}", row.join(" "));
        }
    }

    Ok(())
}
