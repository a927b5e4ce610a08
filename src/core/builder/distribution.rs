use super::types::{Category, RatioTable};
use crate::core::error::{GenError, Result};
use std::fmt;

/// Running-sum form of a normalized ratio table, used for inverse-CDF draws.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistribution {
    label: String,
    // (category, normalized target fraction, cumulative fraction)
    entries: Vec<(Category, f64, f64)>,
}

impl CumulativeDistribution {
    /// Normalizes `table` and accumulates it in insertion order.
    pub fn build(table: &RatioTable) -> Result<Self> {
        let invalid = |reason: String| GenError::InvalidDistribution {
            table: table.label().to_string(),
            reason,
        };

        if table.is_empty() {
            return Err(invalid("table is empty".into()));
        }
        if let Some((c, v)) = table.entries().iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(invalid(format!("abundance of {} is {}", c, v)));
        }
        let total = table.total();
        if total <= 0.0 {
            return Err(invalid("abundances sum to zero".into()));
        }

        let mut running = 0.0;
        let mut entries: Vec<(Category, f64, f64)> = table.entries().iter().map(|(c, v)| {
            let p = v / total;
            running += p;
            (c.clone(), p, running)
        }).collect();

        // Pin the tail so rounding never leaves a gap below 1.0.
        if let Some(last_positive) = entries.iter().rposition(|(_, p, _)| *p > 0.0) {
            for e in entries.iter_mut().skip(last_positive) {
                e.2 = 1.0;
            }
        }

        Ok(Self { label: table.label().to_string(), entries })
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _, _)| c)
    }

    /// (category, target fraction) pairs in distribution order.
    pub fn targets(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.entries.iter().map(|(c, p, _)| (c, *p))
    }

    /// (category, cumulative fraction) pairs in distribution order.
    pub fn cumulative(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.entries.iter().map(|(c, _, cum)| (c, *cum))
    }

    pub fn target_of(&self, category: &Category) -> Option<f64> {
        self.entries.iter().find(|(c, _, _)| c == category).map(|(_, p, _)| *p)
    }

    /// Index of the first entry whose cumulative fraction exceeds `u`.
    ///
    /// Zero-abundance entries never own an interval and are never selected.
    pub fn index_for(&self, u: f64) -> usize {
        let idx = self.entries.partition_point(|(_, _, cum)| *cum <= u);
        idx.min(self.entries.len() - 1)
    }

    /// Inverse-CDF lookup for a draw in [0, 1).
    pub fn select(&self, u: f64) -> &Category {
        &self.entries[self.index_for(u)].0
    }
}

impl fmt::Display for CumulativeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:>10} {:>12}", "name", "target", "cumulative")?;
        for (c, p, cum) in &self.entries {
            writeln!(f, "{:<8} {:>10.4} {:>12.4}", c.name(), p, cum)?;
        }
        Ok(())
    }
}
