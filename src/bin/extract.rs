use clap::Parser;
use std::fs;
use std::path::PathBuf;
use brand_palette_wasm::{extract_palette_bytes, Palette, DEFAULT_MAX_SIDE, DEFAULT_NUM_COLORS};
use anyhow::Context;
use anyhow::Result;
use serde::Serialize;

/// Extract a brand color palette from one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of dominant colors to extract
    #[arg(short = 'k', long, default_value_t = DEFAULT_NUM_COLORS)]
    num_colors: usize,

    /// Longest side the image is shrunk to before extraction (0 keeps the original size)
    #[arg(short, long, default_value_t = DEFAULT_MAX_SIDE)]
    max_side: u32,

    /// Pretty-print the JSON reports
    #[arg(long)]
    pretty: bool,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    source: String,
    num_colors_extracted: usize,
    palette: &'a Palette,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = extract_palette_bytes(&bytes, args.num_colors, Some(args.max_side))
            .with_context(|| format!("extracting palette from {}", input.display()))?;

        let report = Report {
            source: input.display().to_string(),
            num_colors_extracted: palette.num_colors(),
            palette: &palette,
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{json}");
    }

    Ok(())
}
