use crate::core::builder::schedule::StageSchedule;
use crate::core::builder::types::{Category, ChainSequences};

/// File names and command strings the psfgen script refers to.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    pub topology: String,   // file name inside the output directory
    pub template: String,   // file name inside the output directory
    pub prefix: String,     // stem of the .psf/.pdb outputs
    pub segment: String,
    pub minimizer: String,
}

/// `swli` for a single chain, `swli1`, `swli2`, ... otherwise.
pub fn segment_name(segment: &str, chain: usize, n_chains: usize) -> String {
    if n_chains == 1 { segment.to_string() } else { format!("{}{}", segment, chain + 1) }
}

fn write_header(out: &mut String, ctx: &ScriptContext, chains: &[ChainSequences]) {
    out.push_str(";# psfgen script generated by ligbuild\n");
    out.push_str(&format!(";# {}: {} chain(s), degree of polymerization {}\n",
        ctx.prefix, chains.len(), chains.first().map_or(0, |c| c.degree())));
    out.push_str("package require psfgen\n");
    out.push_str(&format!("topology {}\n", ctx.topology));
}

fn write_segment(out: &mut String, segname: &str, monomers: &[Category], upto: usize) {
    out.push_str(&format!("segment {} {{\n", segname));
    for (i, res) in monomers.iter().take(upto).enumerate() {
        out.push_str(&format!("  residue {} {}\n", i + 1, res));
    }
    out.push_str("}\n");
}

fn write_patches(out: &mut String, segname: &str, linkers: &[Category], upto: usize) {
    // upto residues are joined by upto - 1 patches
    for (i, link) in linkers.iter().take(upto.saturating_sub(1)).enumerate() {
        out.push_str(&format!("patch {} {}:{} {}:{}\n", link, segname, i + 1, segname, i + 2));
    }
}

fn write_chains(out: &mut String, ctx: &ScriptContext, chains: &[ChainSequences], upto: usize) {
    out.push_str("resetpsf\n");
    for (c, chain) in chains.iter().enumerate() {
        let seg = segment_name(&ctx.segment, c, chains.len());
        write_segment(out, &seg, &chain.monomers, upto);
        write_patches(out, &seg, &chain.linkers, upto);
    }
    out.push_str("regenerate angles dihedrals\n");
}

fn write_outputs(out: &mut String, stem: &str) {
    out.push_str("guesscoord\n");
    out.push_str(&format!("writepsf {}.psf\n", stem));
    out.push_str(&format!("writepdb {}.pdb\n", stem));
}

/// Whole chains in one pass.
pub fn write_single_script(ctx: &ScriptContext, chains: &[ChainSequences]) -> String {
    let mut out = String::new();
    write_header(&mut out, ctx, chains);
    let degree = chains.iter().map(|c| c.degree()).max().unwrap_or(0);
    write_chains(&mut out, ctx, chains, degree);
    out.push_str(&format!("coordpdb {}\n", ctx.template));
    write_outputs(&mut out, &ctx.prefix);
    out.push_str("exit\n");
    out
}

/// One build-and-minimize block per growth stage. Each stage takes its
/// starting coordinates from the previous stage's structure; the last stage
/// writes the final `<prefix>.psf/.pdb`.
pub fn write_incremental_script(ctx: &ScriptContext, chains: &[ChainSequences], schedule: &StageSchedule) -> String {
    let mut out = String::new();
    write_header(&mut out, ctx, chains);
    let mut previous: Option<String> = None;

    for (stage, start, len) in schedule.stages() {
        let last = stage == schedule.len();
        let stem = if last { ctx.prefix.clone() } else { format!("{}_stage{}", ctx.prefix, stage) };

        out.push_str(&format!(";# stage {}: residues {}-{} (cumulative {})\n", stage, start + 1, len, len));
        write_chains(&mut out, ctx, chains, len);
        let source = previous.as_deref().unwrap_or(&ctx.template);
        for c in 0..chains.len() {
            out.push_str(&format!("coordpdb {} {}\n", source, segment_name(&ctx.segment, c, chains.len())));
        }
        write_outputs(&mut out, &stem);
        out.push_str(&format!("{}\n", ctx.minimizer));
        out.push_str(";# exit\n");
        previous = Some(format!("{}.pdb", stem));
    }

    out.push_str("exit\n");
    out
}

/// Every segment/residue assignment, one block per chain.
pub fn write_residue_list(segment: &str, chains: &[ChainSequences]) -> String {
    let mut out = String::from(";# Contains all segments for NAMD files.\n");
    for (c, chain) in chains.iter().enumerate() {
        write_segment(&mut out, &segment_name(segment, c, chains.len()), &chain.monomers, chain.degree());
    }
    out
}

/// Every patch between consecutive residues, all chains.
pub fn write_link_list(segment: &str, chains: &[ChainSequences]) -> String {
    let mut out = String::from(";# Contains all patches/links for NAMD files.\n");
    for (c, chain) in chains.iter().enumerate() {
        write_patches(&mut out, &segment_name(segment, c, chains.len()), &chain.linkers, chain.degree());
    }
    out
}
