use crate::core::error::{GenError, Result};

/// Cumulative chain lengths of the growth stages of an incremental build.
/// Strictly increasing, all positive, last entry equal to the final degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSchedule {
    lengths: Vec<usize>,
}

impl StageSchedule {
    /// A single stage covering the whole chain.
    pub fn single(degree: usize) -> Result<Self> {
        Self::from_lengths(vec![degree], degree)
    }

    /// 2, 4, 8, ... up to the largest power of two not above `degree`, then a
    /// final stage at `degree` unless it is itself a power of two.
    pub fn doubling(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(GenError::InvalidConfig("degree of polymerization must be positive".into()));
        }
        let mut lengths = Vec::new();
        let mut n = 2;
        while n <= degree {
            lengths.push(n);
            n *= 2;
        }
        if lengths.last() != Some(&degree) {
            lengths.push(degree);
        }
        Ok(Self { lengths })
    }

    pub fn from_lengths(lengths: Vec<usize>, degree: usize) -> Result<Self> {
        if lengths.is_empty() {
            return Err(GenError::InvalidConfig("stage schedule is empty".into()));
        }
        if lengths[0] == 0 {
            return Err(GenError::InvalidConfig("stage lengths must be positive".into()));
        }
        if lengths.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GenError::InvalidConfig(format!("stage lengths must strictly increase: {:?}", lengths)));
        }
        if lengths.last() != Some(&degree) {
            return Err(GenError::InvalidConfig(format!(
                "last stage length must equal the degree of polymerization {}: {:?}", degree, lengths
            )));
        }
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &[usize] { &self.lengths }
    pub fn len(&self) -> usize { self.lengths.len() }
    pub fn is_empty(&self) -> bool { self.lengths.is_empty() }
    pub fn degree(&self) -> usize { self.lengths[self.lengths.len() - 1] }

    /// (stage number from 1, first new residue index from 0, cumulative length).
    pub fn stages(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.lengths.iter().enumerate().map(move |(i, &len)| {
            let start = if i == 0 { 0 } else { self.lengths[i - 1] };
            (i + 1, start, len)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_power_of_two() {
        let s = StageSchedule::doubling(16).unwrap();
        assert_eq!(s.lengths(), &[2, 4, 8, 16]);
    }

    #[test]
    fn test_doubling_with_remainder() {
        let s = StageSchedule::doubling(20).unwrap();
        assert_eq!(s.lengths(), &[2, 4, 8, 16, 20]);
        let s = StageSchedule::doubling(3).unwrap();
        assert_eq!(s.lengths(), &[2, 3]);
    }

    #[test]
    fn test_doubling_degree_one() {
        let s = StageSchedule::doubling(1).unwrap();
        assert_eq!(s.lengths(), &[1]);
        assert!(StageSchedule::doubling(0).is_err());
    }

    #[test]
    fn test_explicit_schedule_validation() {
        assert!(StageSchedule::from_lengths(vec![5, 10, 12], 12).is_ok());
        assert!(StageSchedule::from_lengths(vec![5, 5, 12], 12).is_err());
        assert!(StageSchedule::from_lengths(vec![5, 10], 12).is_err());
        assert!(StageSchedule::from_lengths(vec![0, 12], 12).is_err());
        assert!(StageSchedule::from_lengths(vec![], 12).is_err());
    }

    #[test]
    fn test_stage_ranges() {
        let s = StageSchedule::doubling(6).unwrap();
        let stages: Vec<_> = s.stages().collect();
        assert_eq!(stages, vec![(1, 0, 2), (2, 2, 4), (3, 4, 6)]);
    }
}
