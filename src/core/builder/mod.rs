pub mod composition;
pub mod config;
pub mod distribution;
pub mod model;
pub mod ratios;
pub mod report;
pub mod sampler;
pub mod schedule;
pub mod types;

pub use distribution::CumulativeDistribution;
pub use model::Builder;
pub use sampler::{SampleOutcome, SamplerParams, SequenceSampler};
pub use schedule::StageSchedule;
pub use types::{Category, ChainSequences, RatioTable, Sequence};
