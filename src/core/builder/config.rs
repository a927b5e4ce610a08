use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::fs;
use anyhow::Result;

use super::ratios;
use super::sampler::SamplerParams;
use super::schedule::StageSchedule;
use super::types::{RatioEntry, RatioTable};
use crate::core::error::GenError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    #[serde(default = "default_case")]
    pub case: u32,
    #[serde(default = "default_biomass")]
    pub biomass: String,
    pub degree: usize,                   // Degree of polymerization (final)
    #[serde(default = "default_chains")]
    pub n_chains: usize,
    #[serde(default = "default_segment")]
    pub segment: String,                 // Segment name prefix
    #[serde(default = "default_dataset")]
    pub dataset: String,                 // Reference dataset (A, B)
    pub monomers: Option<Vec<RatioEntry>>, // Overrides the dataset's monomer table
    pub linkers: Option<Vec<RatioEntry>>,  // Overrides the dataset's linker table
    #[serde(default = "default_topology")]
    pub topology: PathBuf,
    #[serde(default = "default_template")]
    pub template: PathBuf,               // Template 3-D structure (dimer PDB)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_style")]
    pub style: String,                   // single | multi
    pub stages: Option<Vec<usize>>,      // Explicit incremental stage lengths
    pub seed: Option<u64>,
    #[serde(default = "default_minimizer")]
    pub minimizer: String,               // Command run after each incremental stage
}

fn default_case() -> u32 { 1 }
fn default_biomass() -> String { "switchgrass".into() }
fn default_chains() -> usize { 1 }
fn default_segment() -> String { "swli".into() }
fn default_dataset() -> String { "A".into() }
fn default_topology() -> PathBuf { "lignin.top".into() }
fn default_template() -> PathBuf { "G-bO4L-G.pdb".into() }
fn default_tolerance() -> f64 { 0.1 }
fn default_max_attempts() -> usize { 500 }
fn default_style() -> String { "single".into() }
fn default_minimizer() -> String { "namd2 mini.conf > mini.out".into() }

/// Whether the chain is written in one pass or grown in stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStyle {
    Single,
    Incremental,
}

impl FromStr for BuildStyle {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single-shot" => Ok(BuildStyle::Single),
            "multi" | "incremental" => Ok(BuildStyle::Incremental),
            _ => Err(GenError::UnknownBuildStyle(s.to_string())),
        }
    }
}

impl std::fmt::Display for BuildStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStyle::Single => write!(f, "single"),
            BuildStyle::Incremental => write!(f, "incremental"),
        }
    }
}

impl Recipe {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        use anyhow::Context;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read recipe file: {:?}", path.as_ref()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML in recipe: {:?}\nPlease check that 'degree' is present and field names are spelled correctly.", path.as_ref()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn build_style(&self) -> Result<BuildStyle, GenError> {
        self.style.parse()
    }

    pub fn sampler_params(&self) -> SamplerParams {
        SamplerParams { tolerance: self.tolerance, max_attempts: self.max_attempts }
    }

    pub fn monomer_table(&self) -> Result<RatioTable, GenError> {
        match &self.monomers {
            Some(entries) => Ok(RatioTable::from_entries("monomers", entries)),
            None => ratios::monomer_ratios(&self.dataset),
        }
    }

    pub fn linker_table(&self) -> Result<RatioTable, GenError> {
        match &self.linkers {
            Some(entries) => Ok(RatioTable::from_entries("linkers", entries)),
            None => ratios::linker_ratios(&self.dataset),
        }
    }

    /// Stage schedule for the requested style. Single-shot builds have one stage.
    pub fn schedule(&self) -> Result<StageSchedule, GenError> {
        match self.build_style()? {
            BuildStyle::Single => StageSchedule::single(self.degree),
            BuildStyle::Incremental => match &self.stages {
                Some(lengths) => StageSchedule::from_lengths(lengths.clone(), self.degree),
                None => StageSchedule::doubling(self.degree),
            },
        }
    }

    /// Numeric sanity checks that need no filesystem access.
    pub fn validate(&self) -> Result<(), GenError> {
        let bad = |msg: &str| Err(GenError::InvalidConfig(msg.to_string()));
        if self.degree == 0 { return bad("degree must be positive"); }
        if self.n_chains == 0 { return bad("n_chains must be positive"); }
        if self.max_attempts == 0 { return bad("max_attempts must be positive"); }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 { return bad("tolerance must be a non-negative number"); }
        if self.segment.trim().is_empty() { return bad("segment name must not be empty"); }
        self.build_style()?;
        self.schedule()?;
        Ok(())
    }

    /// Output file stem shared by the script and structure files, e.g. `switchgrass_1`.
    pub fn output_prefix(&self) -> String {
        format!("{}_{}", self.biomass.trim_end_matches('_'), self.case)
    }

    /// Resolves a recipe path against the directory holding the recipe.
    pub fn resolve(&self, base: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_recipe_defaults() {
        let r = Recipe::from_yaml_str("degree: 16\n").unwrap();
        assert_eq!(r.case, 1);
        assert_eq!(r.n_chains, 1);
        assert_eq!(r.segment, "swli");
        assert_eq!(r.tolerance, 0.1);
        assert_eq!(r.max_attempts, 500);
        assert_eq!(r.build_style().unwrap(), BuildStyle::Single);
        assert_eq!(r.output_prefix(), "switchgrass_1");
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_style_aliases() {
        assert_eq!("multi".parse::<BuildStyle>().unwrap(), BuildStyle::Incremental);
        assert_eq!("Incremental".parse::<BuildStyle>().unwrap(), BuildStyle::Incremental);
        assert_eq!("single-shot".parse::<BuildStyle>().unwrap(), BuildStyle::Single);
        assert!(matches!("batch".parse::<BuildStyle>(), Err(GenError::UnknownBuildStyle(_))));
    }

    #[test]
    fn test_unknown_style_fails_validation() {
        let r = Recipe::from_yaml_str("degree: 8\nstyle: sometimes\n").unwrap();
        assert!(matches!(r.validate(), Err(GenError::UnknownBuildStyle(_))));
    }

    #[test]
    fn test_explicit_tables_override_dataset() {
        let yaml = "degree: 4\nmonomers:\n  - {name: GUAI, percent: 60}\n  - {name: SYRI, percent: 40}\n";
        let r = Recipe::from_yaml_str(yaml).unwrap();
        let m = r.monomer_table().unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.entries()[0].0.name(), "GUAI");
        // Linkers still come from the dataset
        assert_eq!(r.linker_table().unwrap(), ratios::linker_ratios("A").unwrap());
    }

    #[test]
    fn test_incremental_schedule() {
        let r = Recipe::from_yaml_str("degree: 16\nstyle: multi\n").unwrap();
        assert_eq!(r.schedule().unwrap().lengths(), &[2, 4, 8, 16]);

        let r = Recipe::from_yaml_str("degree: 12\nstyle: incremental\nstages: [3, 6, 12]\n").unwrap();
        assert_eq!(r.schedule().unwrap().lengths(), &[3, 6, 12]);

        let r = Recipe::from_yaml_str("degree: 16\nstyle: single\n").unwrap();
        assert_eq!(r.schedule().unwrap().lengths(), &[16]);
    }

    #[test]
    fn test_invalid_numbers() {
        for yaml in ["degree: 0\n", "degree: 4\nn_chains: 0\n", "degree: 4\nmax_attempts: 0\n", "degree: 4\ntolerance: -0.1\n"] {
            let r = Recipe::from_yaml_str(yaml).unwrap();
            assert!(matches!(r.validate(), Err(GenError::InvalidConfig(_))), "{}", yaml);
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(Recipe::from_yaml_str("degree: 4\ncolour: blue\n").is_err());
    }
}
