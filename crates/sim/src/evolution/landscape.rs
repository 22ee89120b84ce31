//! Piecewise genomic landscapes.
//!
//! A landscape is a list of `[begin, end)` intervals with non-negative
//! weights. Drawing a position first picks an interval with probability
//! proportional to its weight, then a uniform point inside it. The same
//! machinery drives neutral mutation, selected mutation and recombination
//! breakpoint placement.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::LandscapeError;

/// One weighted interval of a landscape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub begin: f64,
    pub end: f64,
    pub weight: f64,
}

impl Region {
    pub fn new(begin: f64, end: f64, weight: f64) -> Self {
        Self { begin, end, weight }
    }

    fn validate(&self) -> Result<(), LandscapeError> {
        if !(self.begin.is_finite() && self.end.is_finite() && self.weight.is_finite()) {
            return Err(LandscapeError::NonFinite);
        }
        if self.weight < 0.0 {
            return Err(LandscapeError::NegativeWeight {
                begin: self.begin,
                end: self.end,
                weight: self.weight,
            });
        }
        if self.end < self.begin {
            return Err(LandscapeError::InvertedInterval {
                begin: self.begin,
                end: self.end,
            });
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.end > self.begin {
            rng.random_range(self.begin..self.end)
        } else {
            self.begin
        }
    }
}

/// Validated landscape ready for sampling.
///
/// A landscape whose weights are all zero (or that has no regions) is
/// valid but inactive: every draw yields `None`.
#[derive(Debug, Clone)]
pub struct GenomicLandscape {
    regions: Vec<Region>,
    index: Option<WeightedIndex<f64>>,
}

impl GenomicLandscape {
    pub fn new(regions: Vec<Region>) -> Result<Self, LandscapeError> {
        for region in &regions {
            region.validate()?;
        }
        let index = if regions.iter().any(|r| r.weight > 0.0) {
            WeightedIndex::new(regions.iter().map(|r| r.weight)).ok()
        } else {
            None
        };
        Ok(Self { regions, index })
    }

    /// A landscape with no regions.
    pub fn empty() -> Self {
        Self {
            regions: Vec::new(),
            index: None,
        }
    }

    /// Single region `[0, 1)` with weight one.
    pub fn unit() -> Self {
        Self::new(vec![Region::new(0.0, 1.0, 1.0)]).unwrap_or_else(|_| Self::empty())
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn total_weight(&self) -> f64 {
        self.regions.iter().map(|r| r.weight).sum()
    }

    /// Whether draws can produce a position at all.
    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    /// Index of a region drawn proportionally to weight.
    pub fn sample_region<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.index.as_ref().map(|index| index.sample(rng))
    }

    /// Uniform position inside region `region`.
    ///
    /// # Panics
    /// Panics if `region` is out of range.
    pub fn sample_in<R: Rng + ?Sized>(&self, region: usize, rng: &mut R) -> f64 {
        self.regions[region].sample(rng)
    }

    pub fn sample_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        let region = self.sample_region(rng)?;
        Some(self.sample_in(region, rng))
    }
}

impl TryFrom<Vec<Region>> for GenomicLandscape {
    type Error = LandscapeError;

    fn try_from(regions: Vec<Region>) -> Result<Self, Self::Error> {
        Self::new(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_rejects_negative_weight() {
        let err = GenomicLandscape::new(vec![Region::new(0.0, 1.0, -1.0)]).unwrap_err();
        assert!(matches!(err, LandscapeError::NegativeWeight { .. }));
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let err = GenomicLandscape::new(vec![Region::new(2.0, 1.0, 1.0)]).unwrap_err();
        assert_eq!(err, LandscapeError::InvertedInterval { begin: 2.0, end: 1.0 });
    }

    #[test]
    fn test_rejects_nan() {
        let err = GenomicLandscape::new(vec![Region::new(0.0, f64::NAN, 1.0)]).unwrap_err();
        assert_eq!(err, LandscapeError::NonFinite);
    }

    #[test]
    fn test_zero_weight_landscape_never_draws() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let landscape = GenomicLandscape::new(vec![Region::new(0.0, 1.0, 0.0)]).unwrap();
        assert!(!landscape.is_active());
        assert_eq!(landscape.sample_position(&mut rng), None);
        assert_eq!(GenomicLandscape::empty().sample_region(&mut rng), None);
    }

    #[test]
    fn test_positions_stay_inside_regions() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let landscape = GenomicLandscape::new(vec![
            Region::new(0.0, 1.0, 1.0),
            Region::new(5.0, 6.0, 1.0),
        ])
        .unwrap();
        for _ in 0..1000 {
            let p = landscape.sample_position(&mut rng).unwrap();
            assert!((0.0..1.0).contains(&p) || (5.0..6.0).contains(&p));
        }
    }

    #[test]
    fn test_zero_weight_region_is_skipped() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let landscape = GenomicLandscape::new(vec![
            Region::new(0.0, 1.0, 0.0),
            Region::new(1.0, 2.0, 3.0),
        ])
        .unwrap();
        for _ in 0..500 {
            assert_eq!(landscape.sample_region(&mut rng), Some(1));
        }
    }

    #[test]
    fn test_region_choice_follows_weights() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let landscape = GenomicLandscape::new(vec![
            Region::new(0.0, 1.0, 1.0),
            Region::new(1.0, 2.0, 3.0),
        ])
        .unwrap();
        let draws = 20_000;
        let second = (0..draws)
            .filter(|_| landscape.sample_region(&mut rng) == Some(1))
            .count();
        let share = second as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "share was {share}");
    }

    #[test]
    fn test_point_region_returns_begin() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let landscape = GenomicLandscape::new(vec![Region::new(0.5, 0.5, 1.0)]).unwrap();
        assert_eq!(landscape.sample_position(&mut rng), Some(0.5));
    }
}
