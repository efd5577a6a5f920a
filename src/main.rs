use clap::Parser;
use std::path::PathBuf;

use placegen::{DebugConfig, GeneratorConfig, PlaceholderGenerator};

#[derive(Parser)]
#[command(name = "placegen")]
#[command(about = "Generate placeholder JPEG assets for the website")]
struct Cli {
    /// Directory the images are written to
    #[arg(long, value_name = "DIR", default_value = "src/assets")]
    output_dir: PathBuf,

    /// Preferred TrueType font (falls back to a built-in bitmap font)
    #[arg(long, value_name = "PATH", default_value = "arial.ttf")]
    font: PathBuf,

    /// JPEG quality
    #[arg(long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save each render step's canvas to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = GeneratorConfig::default()
        .with_output_dir(args.output_dir)
        .with_font_path(args.font)
        .with_quality(args.quality);

    let debug = args.debug_out.map(DebugConfig::new).transpose()?;

    println!("Creating placeholder images...");
    let generator = PlaceholderGenerator::new(&config)
        .with_verbose(args.verbose)
        .with_debug(debug);

    let report = generator.run_all()?;

    if report.batch.is_complete() {
        println!("\nDone! All placeholder images created.");
    } else {
        println!(
            "\nDone! Created {} images, {} failed.",
            report.total_created(),
            report.batch.failed()
        );
    }

    Ok(())
}
