//! Reference composition datasets for switchgrass lignin.
//!
//! (A) Yan et al., Biomass and Bioenergy 34, 48-53, 2010 (Alamo switchgrass)
//! (B) Samuel et al., Frontiers in Energy Research 1 (14), 2014
//!
//! Monomer names follow the lignin topology residues: PHYD (H), GUAI (G), SYRI (S).
//! Linker names follow its patches: BO4R/BO4L (beta-O-4), B5R/B5L (beta-5),
//! BB (beta-beta), 55 (5-5), 405 (4-O-5).

use super::types::RatioTable;
use crate::core::error::{GenError, Result};

pub const DATASETS: &[&str] = &["A", "B"];

/// Monomer mol % for a named dataset.
pub fn monomer_ratios(dataset: &str) -> Result<RatioTable> {
    let pairs: &[(&str, f64)] = match dataset.to_ascii_uppercase().as_str() {
        // H:G:S = 26:42:32
        "A" => &[("PHYD", 26.0), ("GUAI", 42.0), ("SYRI", 32.0)],
        // H = 2, G:S = 0.77
        "B" => &[("PHYD", 2.0), ("GUAI", 42.6), ("SYRI", 55.4)],
        _ => return Err(GenError::UnknownDataset(dataset.to_string())),
    };
    Ok(RatioTable::from_pairs("monomers", pairs.iter().copied()))
}

/// Linkage mol % for a named dataset.
pub fn linker_ratios(dataset: &str) -> Result<RatioTable> {
    let pairs: &[(&str, f64)] = match dataset.to_ascii_uppercase().as_str() {
        "A" => &[
            ("BO4R", 34.0), ("BO4L", 34.0),
            ("B5R", 8.0), ("B5L", 8.0),
            ("BB", 8.0), ("55", 5.0), ("405", 3.0),
        ],
        "B" => &[
            ("BO4R", 38.0), ("BO4L", 38.0),
            ("B5R", 5.0), ("B5L", 5.0),
            ("BB", 7.0), ("55", 4.0), ("405", 3.0),
        ],
        _ => return Err(GenError::UnknownDataset(dataset.to_string())),
    };
    Ok(RatioTable::from_pairs("linkers", pairs.iter().copied()))
}
