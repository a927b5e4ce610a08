//! End-to-end tests for recipe loading, sampling and output writing.

use std::fs;
use std::path::Path;

use ligbuild::core::builder::config::Recipe;
use ligbuild::core::builder::model::Builder;
use ligbuild::core::cli::build::run_build_cli;
use ligbuild::core::error::GenError;
use tempfile::TempDir;

const TOPOLOGY: &str = "\
* minimal lignin topology
RESI PHYD 0.00
RESI GUAI 0.00
RESI SYRI 0.00
PRES BO4R 0.00
PRES BO4L 0.00
PRES B5R 0.00
PRES B5L 0.00
PRES BB 0.00
PRES 55 0.00
PRES 405 0.00
END
";

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lignin.top"), TOPOLOGY).unwrap();
    fs::write(dir.path().join("G-bO4L-G.pdb"), "REMARK dimer\nEND\n").unwrap();
    dir
}

fn builder_for(dir: &Path, yaml: &str) -> Builder {
    let mut builder = Builder::new();
    builder.set_recipe(Recipe::from_yaml_str(yaml).unwrap(), dir);
    builder
}

#[test]
fn test_single_shot_build_writes_all_outputs() {
    let ws = workspace();
    let mut builder = builder_for(ws.path(), "case: 3\ndegree: 16\nseed: 42\n");
    builder.build().unwrap();

    let out = ws.path().join("out");
    let written = builder.write_outputs(&out).unwrap();
    assert_eq!(written.len(), 6);

    for name in ["lignin.top", "G-bO4L-G.pdb", "switchgrass_3.tcl", "reslist_3.tcl", "linklist_3.tcl", "log_3.txt"] {
        assert!(out.join(name).is_file(), "{} missing", name);
    }

    let script = fs::read_to_string(out.join("switchgrass_3.tcl")).unwrap();
    assert_eq!(script.matches("  residue ").count(), 16);
    assert_eq!(script.matches("\npatch ").count(), 15);
    assert!(script.trim_end().ends_with("exit"));

    let log = fs::read_to_string(out.join("log_3.txt")).unwrap();
    assert!(log.contains("seed: 42"));
    assert!(log.contains("Chain 1 (seed 42)"));
}

#[test]
fn test_same_seed_gives_identical_scripts() {
    let ws = workspace();
    let yaml = "degree: 24\nn_chains: 2\nseed: 9\n";

    let mut a = builder_for(ws.path(), yaml);
    a.build().unwrap();
    a.write_outputs(&ws.path().join("a")).unwrap();

    let mut b = builder_for(ws.path(), yaml);
    b.build().unwrap();
    b.write_outputs(&ws.path().join("b")).unwrap();

    let sa = fs::read_to_string(ws.path().join("a/switchgrass_1.tcl")).unwrap();
    let sb = fs::read_to_string(ws.path().join("b/switchgrass_1.tcl")).unwrap();
    assert_eq!(sa, sb);
    assert!(sa.contains("segment swli1 {"));
    assert!(sa.contains("segment swli2 {"));
}

#[test]
fn test_incremental_build_emits_stage_blocks() {
    let ws = workspace();
    let mut builder = builder_for(ws.path(), "degree: 16\nstyle: incremental\nseed: 1\n");
    builder.build().unwrap();

    let report = &builder.generation.as_ref().unwrap().reports[0];
    let lengths: Vec<usize> = report.stages.iter().map(|s| s.length).collect();
    assert_eq!(lengths, vec![2, 4, 8, 16]);

    let out = ws.path().join("inc");
    builder.write_outputs(&out).unwrap();
    let script = fs::read_to_string(out.join("switchgrass_1.tcl")).unwrap();
    assert_eq!(script.matches("namd2 mini.conf > mini.out").count(), 4);
    assert!(script.contains("writepdb switchgrass_1_stage3.pdb"));
    assert!(script.contains("writepdb switchgrass_1.pdb"));
}

#[test]
fn test_missing_input_leaves_no_output_directory() {
    let ws = workspace();
    fs::remove_file(ws.path().join("G-bO4L-G.pdb")).unwrap();
    let mut builder = builder_for(ws.path(), "degree: 8\n");

    let err = builder.prepare().unwrap_err();
    assert!(matches!(err, GenError::MissingInput(_)));
    assert!(err.is_fatal());
    assert!(!builder.default_output_dir().exists());
}

#[test]
fn test_degenerate_ratio_table_is_fatal() {
    let ws = workspace();
    let yaml = "degree: 8\nlinkers:\n  - {name: BO4R, percent: 0}\n  - {name: BB, percent: 0}\n";
    let mut builder = builder_for(ws.path(), yaml);
    assert!(matches!(builder.build(), Err(GenError::InvalidDistribution { .. })));
    assert!(builder.generation.is_none());
}

#[test]
fn test_unknown_style_and_dataset_are_fatal() {
    let ws = workspace();
    let mut builder = builder_for(ws.path(), "degree: 8\nstyle: sideways\n");
    assert!(matches!(builder.prepare(), Err(GenError::UnknownBuildStyle(_))));

    let mut builder = builder_for(ws.path(), "degree: 8\ndataset: Z\n");
    assert!(matches!(builder.prepare(), Err(GenError::UnknownDataset(_))));
}

#[test]
fn test_best_effort_run_still_writes_outputs() {
    let ws = workspace();
    let yaml = "degree: 5\ntolerance: 0.0\nmax_attempts: 1\nseed: 3\n";
    let mut builder = builder_for(ws.path(), yaml);
    builder.build().unwrap();
    assert!(!builder.generation.as_ref().unwrap().warnings.is_empty());

    let out = ws.path().join("best");
    builder.write_outputs(&out).unwrap();
    let log = fs::read_to_string(out.join("log_1.txt")).unwrap();
    assert!(log.contains("Warnings:"));
    assert!(log.contains("NOT within tolerance"));
}

#[test]
fn test_cli_end_to_end() {
    let ws = workspace();
    let recipe = ws.path().join("recipe.yaml");
    fs::write(&recipe, "case: 2\ndegree: 10\ndataset: B\n").unwrap();

    run_build_cli(vec![
        "ligbuild-build".into(),
        "--recipe".into(),
        recipe.to_string_lossy().into_owned(),
        "--seed".into(),
        "17".into(),
    ])
    .unwrap();

    let out = ws.path().join("casenum_2");
    assert!(out.join("switchgrass_2.tcl").is_file());
    assert!(out.join("reslist_2.tcl").is_file());
    let links = fs::read_to_string(out.join("linklist_2.tcl")).unwrap();
    assert_eq!(links.lines().filter(|l| l.starts_with("patch ")).count(), 9);
}

#[test]
fn test_cli_rejects_unknown_style_override() {
    let ws = workspace();
    let recipe = ws.path().join("recipe.yaml");
    fs::write(&recipe, "degree: 10\n").unwrap();

    let result = run_build_cli(vec![
        "ligbuild-build".into(),
        "-r".into(),
        recipe.to_string_lossy().into_owned(),
        "--style".into(),
        "bogus".into(),
    ]);
    assert!(result.is_err());
    assert!(!ws.path().join("casenum_1").exists());
}
