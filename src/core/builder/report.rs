use super::composition::Composition;
use super::distribution::CumulativeDistribution;
use super::model::{AttemptSummary, BuildPlan, Generation};
use super::types::Category;

fn join(seq: &[Category]) -> String {
    seq.iter().map(|c| c.name()).collect::<Vec<_>>().join(" ")
}

fn summary(s: &AttemptSummary) -> String {
    let verdict = if s.accepted { "accepted" } else { "NOT within tolerance" };
    format!("{} after {} attempt(s), max deviation {:.3}", verdict, s.attempts, s.deviation)
}

fn composition_table(out: &mut String, seq: &[Category], dist: &CumulativeDistribution) {
    let comp = Composition::of(seq, dist);
    out.push_str(&format!("    {:<8} {:>6} {:>9} {:>9}\n", "name", "count", "target%", "actual%"));
    for (c, realized, target) in comp.fractions() {
        out.push_str(&format!("    {:<8} {:>6} {:>9.2} {:>9.2}\n", c.name(), comp.count(c), target * 100.0, realized * 100.0));
    }
}

/// Plain-text record of one generation run, written as `log_<case>.txt`.
pub fn render_run_log(plan: &BuildPlan, generation: &Generation) -> String {
    let r = &plan.recipe;
    let mut out = String::new();
    out.push_str("ligbuild run log\n");
    out.push_str(&format!("case: {}\n", r.case));
    out.push_str(&format!("biomass: {}\n", r.biomass));
    out.push_str(&format!("degree of polymerization: {}\n", r.degree));
    out.push_str(&format!("number of chains: {}\n", r.n_chains));
    out.push_str(&format!("segment: {}\n", r.segment));
    out.push_str(&format!("dataset: {}{}\n", r.dataset,
        if r.monomers.is_some() || r.linkers.is_some() { " (with recipe overrides)" } else { "" }));
    out.push_str(&format!("topology: {:?}\n", plan.topology));
    out.push_str(&format!("template: {:?}\n", plan.template));
    out.push_str(&format!("tolerance: {}\n", r.tolerance));
    out.push_str(&format!("max attempts: {}\n", r.max_attempts));
    out.push_str(&format!("build style: {}\n", plan.style));
    out.push_str(&format!("stages: {:?}\n", plan.schedule.lengths()));
    out.push_str(&format!("seed: {}\n\n", generation.seed));

    out.push_str("Cumulative distribution for segments:\n");
    out.push_str(&plan.monomer_dist.to_string());
    out.push_str("\nCumulative distribution for patches:\n");
    out.push_str(&plan.linker_dist.to_string());

    for (chain, report) in generation.chains.iter().zip(&generation.reports) {
        out.push_str(&format!("\nChain {} (seed {})\n", report.chain, report.seed));
        for s in &report.stages {
            out.push_str(&format!("  stage {} (length {})\n", s.stage, s.length));
            out.push_str(&format!("    monomers: {}\n", summary(&s.monomers)));
            out.push_str(&format!("    linkers:  {}\n", summary(&s.linkers)));
        }
        out.push_str(&format!("  residues: {}\n", join(&chain.monomers)));
        out.push_str(&format!("  patches:  {}\n", join(&chain.linkers)));
        out.push_str("  monomer composition:\n");
        composition_table(&mut out, &chain.monomers, &plan.monomer_dist);
        out.push_str("  linker composition:\n");
        composition_table(&mut out, &chain.linkers, &plan.linker_dist);
    }

    if !generation.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &generation.warnings {
            out.push_str(&format!("  {}\n", w));
        }
    }
    out
}
