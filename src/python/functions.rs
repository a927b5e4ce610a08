use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::core::builder::distribution::CumulativeDistribution;
use crate::core::builder::sampler::{SamplerParams, SequenceSampler};
use crate::core::builder::types::RatioTable;

/// Samples one sequence from (name, percent) ratios.
/// Returns (sequence, attempts, accepted).
#[pyfunction]
#[pyo3(signature = (ratios, length, tolerance=0.1, max_attempts=500, seed=None))]
pub fn sample_sequence(
    ratios: Vec<(String, f64)>,
    length: usize,
    tolerance: f64,
    max_attempts: usize,
    seed: Option<u64>,
) -> PyResult<(Vec<String>, usize, bool)> {
    let table = RatioTable::from_pairs("ratios", ratios.iter().map(|(n, p)| (n.as_str(), *p)));
    let dist = CumulativeDistribution::build(&table).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
    })?;
    let sampler = SequenceSampler::new(&dist, SamplerParams { tolerance, max_attempts });
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let out = sampler.sample(length, &mut rng);
    let names = out.sequence.iter().map(|c| c.name().to_string()).collect();
    Ok((names, out.attempts, out.accepted))
}

#[pyfunction]
pub fn run_build_cli(_py: Python, args: Vec<String>) -> PyResult<()> {
    crate::core::cli::build::run_build_cli(args).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("{:#}", e))
    })
}
