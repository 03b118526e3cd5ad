//! Compile the first-quadrant molecular cloud catalog
//!
//! Loads a dendrogram snapshot, annotates the base catalog, runs the
//! negative-velocity, positive-velocity and low-velocity Perseus pipelines
//! and writes the composite cloud catalog.
//!
//! Usage:
//! ```
//! cargo run --bin compile_firstquad -- --snapshot dendrogram.json [OPTIONS]
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage row counts.

use std::path::PathBuf;

use clap::Parser;
use cloud_extractor::{
    compile_catalog, first_quad_cloud_catalog, ExtractionContext, ExtractorConfig,
};
use dendro::DendrogramSnapshot;
use log::info;

/// Command line arguments for catalog compilation
#[derive(Parser, Debug)]
#[command(
    name = "compile_firstquad",
    about = "Extracts molecular cloud candidates from a first-quadrant dendrogram",
    long_about = None
)]
struct Args {
    /// Dendrogram snapshot (JSON)
    #[arg(long)]
    snapshot: PathBuf,

    /// Extraction configuration (JSON); defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the composite catalog here (JSON)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Print the surviving clouds
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();

    if let Some(path) = &args.dump_config {
        ExtractorConfig::default().save_to_file(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    // A given --config path must load and validate
    let config = ExtractorConfig::load_or_default(args.config.as_deref())?;

    info!("Loading snapshot {}", args.snapshot.display());
    let snapshot = DendrogramSnapshot::load_from_file(&args.snapshot)?;
    let ctx = ExtractionContext::from_snapshot(snapshot)?.with_relation(config.size_linewidth);

    let base = first_quad_cloud_catalog(&ctx);
    let (catalog, report) = compile_catalog(&ctx, &base, &config.pipelines)?;

    println!("First Quadrant Cloud Catalog");
    println!("============================");
    println!("Survey: {}", ctx.metadata.survey);
    println!("Structures in dendrogram: {}", ctx.dendrogram.len());
    let [nl, nb, nv] = ctx.header.shape;
    println!(
        "Cube: {nl} x {nb} x {nv} (l, b, v), {:.4} deg/pixel, {:.3} km/s/channel",
        ctx.header.pixel_scale_deg, ctx.header.channel_width_kms
    );
    println!();
    println!("Clouds per region:");
    for (name, count) in &report.per_region {
        println!("  {name}: {count}");
    }
    println!("Stacked: {}", report.stacked);
    println!("Composite (after reduction): {}", report.composite);

    if args.summary {
        println!();
        println!(
            "{:>6} {:>8} {:>8} {:>7} {:>7} {:>8} {:>12}",
            "idx", "l", "b", "v", "sigma", "d (kpc)", "mass (Msun)"
        );
        for cloud in catalog.iter() {
            println!(
                "{:>6} {:>8.3} {:>8.3} {:>7.2} {:>7.2} {:>8.2} {:>12.3e}",
                cloud.idx,
                cloud.x_cen,
                cloud.y_cen,
                cloud.v_cen,
                cloud.v_rms,
                cloud.distance,
                cloud.mass
            );
        }
    }

    if let Some(path) = &args.output {
        catalog.save_to_file(path)?;
        println!("Wrote {} clouds to {}", catalog.len(), path.display());
    }

    Ok(())
}
