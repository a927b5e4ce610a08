pub mod psfgen;
pub mod topology;
