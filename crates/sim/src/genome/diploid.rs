use super::GameteId;

/// A diploid individual: two gamete handles plus the phenotype computed at
/// the last fitness evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diploid {
    pub first: GameteId,
    pub second: GameteId,
    /// Genetic value `G`.
    pub genetic_value: f64,
    /// Environmental noise `E`.
    pub environmental: f64,
    pub fitness: f64,
}

impl Diploid {
    pub fn new(first: GameteId, second: GameteId) -> Self {
        Self {
            first,
            second,
            genetic_value: 0.0,
            environmental: 0.0,
            fitness: 1.0,
        }
    }

    /// Phenotype `P = G + E`.
    #[inline]
    pub fn phenotype(&self) -> f64 {
        self.genetic_value + self.environmental
    }

    #[inline]
    pub fn gametes(&self) -> [GameteId; 2] {
        [self.first, self.second]
    }

    /// Replace one of the two gamete handles (`slot` 0 or 1).
    #[inline]
    pub fn set_gamete(&mut self, slot: usize, id: GameteId) {
        if slot == 0 {
            self.first = id;
        } else {
            self.second = id;
        }
    }

    #[inline]
    pub fn gamete(&self, slot: usize) -> GameteId {
        if slot == 0 {
            self.first
        } else {
            self.second
        }
    }
}
