use super::config::{BuildStyle, Recipe};
use super::distribution::CumulativeDistribution;
use super::sampler::{SampleOutcome, SequenceSampler};
use super::schedule::StageSchedule;
use super::types::ChainSequences;
use crate::core::error::{GenError, Result};
use crate::parsers::psfgen::{self, ScriptContext};
use crate::parsers::topology::read_topology;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything that has been checked before any sampling or file output.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub recipe: Recipe,
    pub style: BuildStyle,
    pub schedule: StageSchedule,
    pub monomer_dist: CumulativeDistribution,
    pub linker_dist: CumulativeDistribution,
    pub topology: PathBuf,
    pub template: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptSummary {
    pub attempts: usize,
    pub accepted: bool,
    pub deviation: f64,
}

impl From<&SampleOutcome> for AttemptSummary {
    fn from(o: &SampleOutcome) -> Self {
        Self { attempts: o.attempts, accepted: o.accepted, deviation: o.deviation }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub stage: usize,
    pub length: usize,
    pub monomers: AttemptSummary,
    pub linkers: AttemptSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainReport {
    pub chain: usize,
    pub seed: u64,
    pub stages: Vec<StageReport>,
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub seed: u64,
    pub chains: Vec<ChainSequences>,
    pub reports: Vec<ChainReport>,
    pub warnings: Vec<String>,
}

pub struct Builder {
    pub recipe: Option<Recipe>,
    pub base_dir: PathBuf,
    pub plan: Option<BuildPlan>,
    pub generation: Option<Generation>,
}

impl Default for Builder {
    fn default() -> Self { Self::new() }
}

impl Builder {
    pub fn new() -> Self { Self { recipe: None, base_dir: PathBuf::from("."), plan: None, generation: None } }

    /// `base_dir` is where relative input paths in the recipe are looked up.
    pub fn set_recipe(&mut self, recipe: Recipe, base_dir: impl Into<PathBuf>) {
        self.recipe = Some(recipe);
        self.base_dir = base_dir.into();
        self.plan = None;
        self.generation = None;
    }

    /// Runs every fatal check: configuration, input files, ratio tables.
    pub fn prepare(&mut self) -> Result<&BuildPlan> {
        let recipe = self.recipe.as_ref().ok_or_else(|| GenError::InvalidConfig("no recipe set".into()))?;

        recipe.validate()?;
        let style = recipe.build_style()?;
        let schedule = recipe.schedule()?;

        let topology = recipe.resolve(&self.base_dir, &recipe.topology);
        let template = recipe.resolve(&self.base_dir, &recipe.template);
        for input in [&topology, &template] {
            if !input.is_file() {
                return Err(GenError::MissingInput(input.clone()));
            }
        }

        let monomer_table = recipe.monomer_table()?;
        let linker_table = recipe.linker_table()?;
        let monomer_dist = CumulativeDistribution::build(&monomer_table)?;
        let linker_dist = CumulativeDistribution::build(&linker_table)?;
        debug!("monomer distribution:\n{}", monomer_dist);
        debug!("linker distribution:\n{}", linker_dist);

        check_topology(&topology, &monomer_dist, &linker_dist);

        self.plan = Some(BuildPlan {
            recipe: recipe.clone(),
            style,
            schedule,
            monomer_dist,
            linker_dist,
            topology,
            template,
        });
        self.plan.as_ref().ok_or_else(|| GenError::InvalidConfig("plan not prepared".into()))
    }

    /// Samples monomer and linker sequences for every chain.
    pub fn build(&mut self) -> Result<()> {
        if self.plan.is_none() {
            self.prepare()?;
        }
        let plan = self.plan.as_ref().ok_or_else(|| GenError::InvalidConfig("plan not prepared".into()))?;
        let seed = plan.recipe.seed.unwrap_or_else(rand::random);
        self.generation = Some(generate(plan, seed));
        Ok(())
    }

    pub fn default_output_dir(&self) -> PathBuf {
        let case = self.recipe.as_ref().map_or(1, |r| r.case);
        self.base_dir.join(format!("casenum_{}", case))
    }

    /// Renders every output in memory, then creates `dir`, copies the inputs
    /// and writes the scripts and the run log. Returns the written paths.
    pub fn write_outputs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let plan = self.plan.as_ref().ok_or_else(|| GenError::InvalidConfig("not prepared".into()))?;
        let generation = self.generation.as_ref().ok_or_else(|| GenError::InvalidConfig("not built".into()))?;
        let recipe = &plan.recipe;

        let ctx = ScriptContext {
            topology: file_name(&plan.topology),
            template: file_name(&plan.template),
            prefix: recipe.output_prefix(),
            segment: recipe.segment.clone(),
            minimizer: recipe.minimizer.clone(),
        };
        let script = match plan.style {
            BuildStyle::Single => psfgen::write_single_script(&ctx, &generation.chains),
            BuildStyle::Incremental => psfgen::write_incremental_script(&ctx, &generation.chains, &plan.schedule),
        };
        let files = [
            (format!("{}.tcl", ctx.prefix), script),
            (format!("reslist_{}.tcl", recipe.case), psfgen::write_residue_list(&recipe.segment, &generation.chains)),
            (format!("linklist_{}.tcl", recipe.case), psfgen::write_link_list(&recipe.segment, &generation.chains)),
            (format!("log_{}.txt", recipe.case), super::report::render_run_log(plan, generation)),
        ];

        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for input in [&plan.topology, &plan.template] {
            let dest = dir.join(file_name(input));
            if !same_file(input, &dest) {
                std::fs::copy(input, &dest)?;
            }
            written.push(dest);
        }
        for (name, content) in files {
            let path = dir.join(name);
            std::fs::write(&path, content)?;
            written.push(path);
        }
        info!("Wrote {} files to {:?}", written.len(), dir);
        Ok(written)
    }
}

/// Grows every chain through the plan's stage schedule. Chain `k` draws from
/// its own generator seeded with `seed + k`.
pub fn generate(plan: &BuildPlan, seed: u64) -> Generation {
    let params = plan.recipe.sampler_params();
    let monomer_sampler = SequenceSampler::new(&plan.monomer_dist, params);
    let linker_sampler = SequenceSampler::new(&plan.linker_dist, params);

    let mut chains = Vec::with_capacity(plan.recipe.n_chains);
    let mut reports = Vec::with_capacity(plan.recipe.n_chains);
    let mut warnings = Vec::new();

    for chain in 0..plan.recipe.n_chains {
        let chain_seed = seed.wrapping_add(chain as u64);
        let mut rng = StdRng::seed_from_u64(chain_seed);
        let mut seqs = ChainSequences { monomers: Vec::new(), linkers: Vec::new() };
        let mut stages = Vec::with_capacity(plan.schedule.len());

        for (stage, _, len) in plan.schedule.stages() {
            let m = monomer_sampler.extend(&seqs.monomers, len, &mut rng);
            let l = linker_sampler.extend(&seqs.linkers, len - 1, &mut rng);

            for (outcome, kind) in [(&m, "monomers"), (&l, "linkers")] {
                let label = format!("chain {} stage {} {}", chain + 1, stage, kind);
                if let Some(w) = outcome.warning(&label) {
                    warn!("{}", w);
                    warnings.push(w.to_string());
                }
            }
            stages.push(StageReport { stage, length: len, monomers: (&m).into(), linkers: (&l).into() });
            seqs.monomers = m.sequence;
            seqs.linkers = l.sequence;
        }

        info!(
            chain = chain + 1,
            residues = seqs.monomers.len(),
            patches = seqs.linkers.len(),
            "chain sequences generated"
        );
        chains.push(seqs);
        reports.push(ChainReport { chain: chain + 1, seed: chain_seed, stages });
    }

    Generation { seed, chains, reports, warnings }
}

fn check_topology(path: &Path, monomers: &CumulativeDistribution, linkers: &CumulativeDistribution) {
    let names = match read_topology(path) {
        Ok(names) => names,
        Err(e) => {
            warn!("Skipping topology name check: {:#}", e);
            return;
        }
    };
    for (c, p) in monomers.targets() {
        if p > 0.0 && !names.has_residue(c.name()) {
            warn!("Monomer {} is not declared as RESI in {:?}", c, path);
        }
    }
    for (c, p) in linkers.targets() {
        if p > 0.0 && !names.has_patch(c.name()) {
            warn!("Linker {} is not declared as PRES in {:?}", c, path);
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.to_string_lossy().into_owned(), |s| s.to_string_lossy().into_owned())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
