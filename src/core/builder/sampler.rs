use super::composition::Composition;
use super::distribution::CumulativeDistribution;
use super::types::{Category, Sequence};
use crate::core::error::GenError;
use rand::Rng;
use tracing::{debug, trace};

/// Acceptance budget for one sampling call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerParams {
    /// Allowed deviation as a fraction of each category's target share.
    pub tolerance: f64,
    /// Hard cap on the number of candidate draws.
    pub max_attempts: usize,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self { tolerance: 0.1, max_attempts: 500 }
    }
}

/// Result of a sampling call: the accepted sequence, or the last candidate
/// when the attempt budget ran out.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOutcome {
    pub sequence: Sequence,
    pub attempts: usize,
    pub accepted: bool,
    pub deviation: f64,
    pub tolerance: f64,
}

impl SampleOutcome {
    /// Non-fatal `ToleranceNotMet` for best-effort results.
    pub fn warning(&self, label: &str) -> Option<GenError> {
        (!self.accepted).then(|| GenError::ToleranceNotMet {
            label: label.to_string(),
            tolerance: self.tolerance,
            attempts: self.attempts,
            deviation: self.deviation,
        })
    }
}

/// Tolerance-bounded inverse-CDF sampler. Holds no state between calls; the
/// random generator is supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct SequenceSampler<'a> {
    dist: &'a CumulativeDistribution,
    params: SamplerParams,
}

impl<'a> SequenceSampler<'a> {
    pub fn new(dist: &'a CumulativeDistribution, params: SamplerParams) -> Self {
        Self { dist, params }
    }

    pub fn distribution(&self) -> &'a CumulativeDistribution { self.dist }

    /// One inverse-CDF draw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Category {
        let u: f64 = rng.gen();
        self.dist.select(u).clone()
    }

    /// Samples a fresh sequence of `length` categories.
    pub fn sample<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> SampleOutcome {
        self.extend(&[], length, rng)
    }

    /// Samples `target_len - prefix.len()` new categories and appends them to
    /// `prefix`. Acceptance is judged on the whole sequence; the prefix itself
    /// is never redrawn.
    pub fn extend<R: Rng + ?Sized>(&self, prefix: &[Category], target_len: usize, rng: &mut R) -> SampleOutcome {
        let fresh = target_len.saturating_sub(prefix.len());
        let cap = self.params.max_attempts.max(1);
        let mut candidate: Sequence = Vec::with_capacity(prefix.len() + fresh);
        let mut deviation = f64::INFINITY;

        for attempt in 1..=cap {
            candidate.clear();
            candidate.extend_from_slice(prefix);
            candidate.extend((0..fresh).map(|_| self.draw(rng)));

            let comp = Composition::of(&candidate, self.dist);
            deviation = comp.max_relative_deviation();
            trace!(table = self.dist.label(), attempt, deviation, "candidate sequence");

            if comp.within(self.params.tolerance) {
                debug!(table = self.dist.label(), length = candidate.len(), attempt, "sequence accepted");
                return SampleOutcome {
                    sequence: candidate,
                    attempts: attempt,
                    accepted: true,
                    deviation,
                    tolerance: self.params.tolerance,
                };
            }
        }

        SampleOutcome {
            sequence: candidate,
            attempts: cap,
            accepted: false,
            deviation,
            tolerance: self.params.tolerance,
        }
    }
}
