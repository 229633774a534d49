use clap::Parser;
use imgembed_config::storage::JsonStorageAdapter;
use imgembed_config::{config, config_set, config_store, config_store_write};
use imgembed_image::resizer::Resized;
use imgembed_image::{Converter, MaxDim, MaxDimArg};
use imgembed_shared::errors::{EmbedResult, Error};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};
use std::process::exit;

/// Converts an image into a source literal holding its (downsized) pixel grid.
#[derive(Debug, Parser)]
#[clap(name = "image-embed", version, about, long_about = None)]
struct Cli {
    /// Image to convert
    input: Option<PathBuf>,

    /// Source file to generate
    output: Option<PathBuf>,

    /// Maximum width and height of the generated image
    #[clap(allow_hyphen_values = true)]
    max_dim: Option<String>,

    /// Extra arguments, ignored
    #[clap(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,

    /// Resampling filter (nearest, triangle, catmullrom, gaussian, lanczos3)
    #[clap(short = 'f', long = "filter")]
    filter: Option<String>,

    /// Json file with settings that override the defaults
    #[clap(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Exit with a non-zero code for each kind of error
    #[clap(long = "strict")]
    strict: bool,

    /// List all settings and their current values
    #[clap(long = "settings")]
    settings: bool,

    /// Enable debug logging
    #[clap(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // the store is not set up yet, so only the flag can ask for strict exit codes
            let strict = std::env::args().any(|arg| arg == "--strict");
            exit(if strict { err.exit_code() } else { 0 });
        }
    };

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("cannot initialize logger: {err}");
    }

    exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    if let Some(path) = &cli.config {
        match JsonStorageAdapter::try_from(path.as_path()) {
            Ok(storage) => config_store_write().set_storage(Box::new(storage)),
            Err(err) => {
                println!("Error: {err}");
                return exit_code(cli, 1);
            }
        }
    }

    if cli.strict {
        config_set!(bool "convert.strict_exit", true);
    }
    if let Some(filter) = &cli.filter {
        config_set!(string "convert.filter", filter.clone());
    }

    if cli.settings {
        print_settings();
        return 0;
    }

    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        print_usage();
        return exit_code(cli, Error::InvalidArgument(String::new()).exit_code());
    };

    if !cli.ignored.is_empty() {
        debug!("ignoring extra arguments: {:?}", cli.ignored);
    }

    match convert(input, output, cli.max_dim.as_deref()) {
        Ok(()) => 0,
        Err(err) => {
            match &err {
                Error::FileNotFound(_) => println!("Error: {err}"),
                _ => println!("Error converting image: {err}"),
            }
            exit_code(cli, err.exit_code())
        }
    }
}

fn convert(input: &Path, output: &Path, max_dim: Option<&str>) -> EmbedResult<()> {
    let defaults = Converter::from_config()?;
    let max_dim = match MaxDimArg::parse(max_dim) {
        MaxDimArg::Missing => defaults.max_dim(),
        MaxDimArg::Parsed(value) => MaxDim::new(value)?,
        MaxDimArg::Invalid(raw) => {
            println!(
                "Warning: Invalid max_dim '{raw}', using default {}",
                defaults.max_dim()
            );
            defaults.max_dim()
        }
    };

    let converter = defaults.with_max_dim(max_dim);
    debug!(
        "converting with max_dim {} and {} filter",
        converter.max_dim(),
        converter.filter()
    );

    let image = converter.load(input)?;
    let resized = converter.resize(image)?;
    match &resized {
        Resized::Scaled { image, .. } => println!(
            "Resized image to {}x{} (max dimension: {})",
            image.width(),
            image.height(),
            converter.max_dim()
        ),
        Resized::Unchanged(image) => println!(
            "Image size: {}x{} (no resize needed)",
            image.width(),
            image.height()
        ),
    }

    converter.emit(resized.image(), input, output)?;
    println!(
        "Successfully converted {} to {}",
        input.display(),
        output.display()
    );

    Ok(())
}

/// Errors always exit with 0 unless strict mode is enabled
fn exit_code(cli: &Cli, code: i32) -> i32 {
    if cli.strict || config!(bool "convert.strict_exit") {
        code
    } else {
        0
    }
}

fn print_usage() {
    println!("Usage: image-embed <input_image> <output_file> [max_dim]");
    println!("  max_dim: Maximum dimension for resizing (default: 64)");
}

fn print_settings() {
    let store = config_store();
    for key in store.find("*") {
        if let Some(value) = store.get(&key) {
            let description = store
                .get_info(&key)
                .map(|info| info.description)
                .unwrap_or_default();
            println!("{key:24}: {:12} {description}", value.encode());
        }
    }
}
