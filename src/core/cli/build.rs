use clap::{ArgAction, Parser};
use crate::core::builder::config::Recipe;
use crate::core::builder::model::Builder;
use crate::core::logging::{init_logging, LogConfig};
use std::path::PathBuf;
use anyhow::{Result, anyhow};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "ligbuild-build")]
#[command(version, about = "Lignin sequence builder", long_about = "Samples lignin monomer/linkage sequences to target composition and writes psfgen build scripts.")]
pub struct Args {
    /// Path to the recipe YAML file
    #[arg(short, long)]
    pub recipe: PathBuf,

    /// Output directory (default: casenum_<case> next to the recipe)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Random seed (overrides the recipe)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Build style: single or incremental (overrides the recipe)
    #[arg(long)]
    pub style: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

pub fn run_build_cli(args: Vec<String>) -> Result<()> {
    let args = Args::parse_from(args);
    init_logging(&LogConfig::from_verbosity(args.verbose));

    info!("Reading recipe from {:?}", args.recipe);
    let mut recipe = Recipe::from_yaml(&args.recipe)?;
    if let Some(seed) = args.seed { recipe.seed = Some(seed); }
    if let Some(style) = args.style { recipe.style = style; }

    let base_dir = args.recipe.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut builder = Builder::new();
    builder.set_recipe(recipe, base_dir);

    builder.prepare()?;
    info!("Begin generation for {}", builder.recipe.as_ref().map_or_else(String::new, |r| r.output_prefix()));
    builder.build()?;

    let generation = builder.generation.as_ref().ok_or_else(|| anyhow!("Failed to generate sequences"))?;
    info!("Generated {} chain(s) with seed {}", generation.chains.len(), generation.seed);
    if !generation.warnings.is_empty() {
        warn!("{} sampling call(s) returned best-effort sequences outside tolerance", generation.warnings.len());
    }

    let out_dir = args.output.unwrap_or_else(|| builder.default_output_dir());
    let written = builder.write_outputs(&out_dir)?;
    for path in &written {
        info!("  {:?}", path);
    }
    Ok(())
}
