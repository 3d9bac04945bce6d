//! cubemap-export - equirectangular panorama to cubemap converter
//!
//! Converts 2:1 panoramas (PNG, JPEG, HDR, EXR) into six cube faces or one
//! packed cubemap (PNG, EXR, or raw sample bytes).

use anyhow::Result;
use clap::{Parser, Subcommand};
use cubemap_core::{
    ConvertOptions, LogProgress, MAX_CONCURRENCY, NoProgress, OutputFormat, Progress,
};
use std::path::PathBuf;

use cubemap_export::{convert_file, manifest};

#[derive(Parser)]
#[command(name = "cubemap-export")]
#[command(about = "Equirectangular panorama to cubemap converter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single panorama
    Convert {
        /// Input panorama (2:1 equirectangular)
        input: PathBuf,

        /// Output base path (default: input without extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample precision: unspecified, half, or single
        #[arg(short, long, default_value = "unspecified")]
        format: OutputFormat,

        /// Write raw sample bytes instead of encoded images
        #[arg(long)]
        raw: bool,

        /// Write one packed cubemap instead of six faces
        #[arg(long)]
        packed: bool,

        /// Render workers (1-6)
        #[arg(short = 'j', long, default_value_t = MAX_CONCURRENCY)]
        threads: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert every panorama listed in a manifest file
    Build {
        /// Path to cubemaps.toml manifest
        #[arg(default_value = "cubemaps.toml")]
        manifest: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without converting
    Check {
        /// Path to cubemaps.toml manifest
        #[arg(default_value = "cubemaps.toml")]
        manifest: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn progress(verbose: bool) -> &'static dyn Progress {
    if verbose {
        &LogProgress
    } else {
        &NoProgress
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            raw,
            packed,
            threads,
            verbose,
        } => {
            init_logging(verbose);
            let output = output.unwrap_or_else(|| input.with_extension(""));
            let options = ConvertOptions {
                output_format: format,
                raw_output: raw,
                packed,
                threads,
            };
            tracing::info!("Converting {:?} -> {:?}", input, output);
            let written = convert_file(&input, &output, &options, progress(verbose))?;
            for path in &written {
                tracing::info!("  Wrote {}", path.display());
            }
            tracing::info!("Done!");
        }

        Commands::Build { manifest, verbose } => {
            init_logging(verbose);
            tracing::info!("Building cubemaps from {:?}", manifest);
            let config = manifest::CubemapManifest::load(&manifest)?;
            let dir = manifest.parent().map(PathBuf::from).unwrap_or_default();
            let written = manifest::build_all(&config, &dir, progress(verbose))?;
            tracing::info!("Build complete! ({written} files)");
        }

        Commands::Check { manifest } => {
            init_logging(false);
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::CubemapManifest::load(&manifest)?;
            config.validate()?;
            tracing::info!("Manifest is valid! ({} cubemaps)", config.cubemaps.len());
        }
    }

    Ok(())
}
