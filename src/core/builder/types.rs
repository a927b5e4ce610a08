use serde::{Deserialize, Serialize};
use std::fmt;

/// Monomer or linkage identity, named as in the topology file (e.g. `GUAI`, `BO4R`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }
    pub fn name(&self) -> &str { &self.0 }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self { Self::new(s) }
}

/// One row of a ratio table as it appears in a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioEntry {
    pub name: String,
    pub percent: f64,
}

/// Target relative abundances (mol %), kept in insertion order.
///
/// Values need not sum to 100; they are normalized when the cumulative
/// distribution is built. Duplicate names are merged into the first slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioTable {
    label: String,
    entries: Vec<(Category, f64)>,
}

impl RatioTable {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), entries: Vec::new() }
    }

    pub fn from_pairs<'a>(label: impl Into<String>, pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut table = Self::new(label);
        for (name, abundance) in pairs {
            table.insert(Category::new(name), abundance);
        }
        table
    }

    pub fn from_entries(label: impl Into<String>, entries: &[RatioEntry]) -> Self {
        Self::from_pairs(label, entries.iter().map(|e| (e.name.as_str(), e.percent)))
    }

    pub fn insert(&mut self, category: Category, abundance: f64) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, v)) => *v += abundance,
            None => self.entries.push((category, abundance)),
        }
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn entries(&self) -> &[(Category, f64)] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn total(&self) -> f64 { self.entries.iter().map(|(_, v)| *v).sum() }
}

/// Ordered category assignments for one chain.
pub type Sequence = Vec<Category>;

/// Monomer and linkage sequences of a single chain.
/// `linkers[i]` joins `monomers[i]` and `monomers[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSequences {
    pub monomers: Sequence,
    pub linkers: Sequence,
}

impl ChainSequences {
    pub fn degree(&self) -> usize { self.monomers.len() }
}
