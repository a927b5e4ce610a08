use super::distribution::CumulativeDistribution;
use super::types::Category;

/// Realized category counts of a sequence, in distribution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    length: usize,
    counts: Vec<(Category, usize, f64)>, // (category, count, target fraction)
    foreign: usize,
}

impl Composition {
    pub fn of(sequence: &[Category], dist: &CumulativeDistribution) -> Self {
        let mut counts: Vec<(Category, usize, f64)> = dist.targets().map(|(c, p)| (c.clone(), 0, p)).collect();
        let mut foreign = 0;
        for item in sequence {
            match counts.iter_mut().find(|(c, _, _)| c == item) {
                Some(slot) => slot.1 += 1,
                None => foreign += 1,
            }
        }
        Self { length: sequence.len(), counts, foreign }
    }

    pub fn length(&self) -> usize { self.length }

    pub fn count(&self, category: &Category) -> usize {
        self.counts.iter().find(|(c, _, _)| c == category).map_or(0, |(_, n, _)| *n)
    }

    /// (category, realized fraction, target fraction).
    pub fn fractions(&self) -> impl Iterator<Item = (&Category, f64, f64)> + '_ {
        let len = self.length.max(1) as f64;
        self.counts.iter().map(move |(c, n, p)| (c, *n as f64 / len, *p))
    }

    /// Largest |realized - target| / target over all categories.
    ///
    /// A draw of a zero-target category (or of anything outside the
    /// distribution) is an infinite deviation. An empty sequence deviates by 0.
    pub fn max_relative_deviation(&self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        if self.foreign > 0 {
            return f64::INFINITY;
        }
        self.fractions().fold(0.0_f64, |worst, (_, realized, target)| {
            let dev = if target > 0.0 {
                (realized - target).abs() / target
            } else if realized > 0.0 {
                f64::INFINITY
            } else {
                0.0
            };
            worst.max(dev)
        })
    }

    /// Every category sits within `tolerance * target` of its target share.
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_relative_deviation() <= tolerance + 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::types::RatioTable;

    fn seq(names: &[&str]) -> Vec<Category> {
        names.iter().map(|n| Category::new(*n)).collect()
    }

    #[test]
    fn test_counts_and_deviation() {
        let dist = CumulativeDistribution::build(&RatioTable::from_pairs("t", [("A", 1.0), ("B", 3.0)])).unwrap();
        let comp = Composition::of(&seq(&["A", "B", "B", "B"]), &dist);
        assert_eq!(comp.count(&"A".into()), 1);
        assert_eq!(comp.count(&"B".into()), 3);
        assert!(comp.max_relative_deviation() < 1e-12);
        assert!(comp.within(0.0));

        let skewed = Composition::of(&seq(&["A", "A", "B", "B"]), &dist);
        // A: |0.5 - 0.25| / 0.25 = 1.0, B: |0.5 - 0.75| / 0.75 = 1/3
        assert!((skewed.max_relative_deviation() - 1.0).abs() < 1e-12);
        assert!(!skewed.within(0.5));
        assert!(skewed.within(1.0));
    }

    #[test]
    fn test_empty_sequence_is_within_any_tolerance() {
        let dist = CumulativeDistribution::build(&RatioTable::from_pairs("t", [("A", 1.0)])).unwrap();
        let comp = Composition::of(&[], &dist);
        assert_eq!(comp.length(), 0);
        assert!(comp.within(0.0));
    }

    #[test]
    fn test_foreign_category_is_infinite_deviation() {
        let dist = CumulativeDistribution::build(&RatioTable::from_pairs("t", [("A", 1.0)])).unwrap();
        let comp = Composition::of(&seq(&["A", "Z"]), &dist);
        assert!(comp.max_relative_deviation().is_infinite());
    }
}
