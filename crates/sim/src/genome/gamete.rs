use crate::base::{Mutation, MutationIndex};

/// A haploid genome: the mutations it carries, split into neutral and
/// selected lists, each ordered by position.
///
/// Gametes are immutable once stored in a [`GameteArena`](super::GameteArena);
/// editing one means building a new value and allocating it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gamete {
    neutral: Vec<MutationIndex>,
    selected: Vec<MutationIndex>,
}

impl Gamete {
    pub fn new(neutral: Vec<MutationIndex>, selected: Vec<MutationIndex>) -> Self {
        Self { neutral, selected }
    }

    #[inline]
    pub fn neutral(&self) -> &[MutationIndex] {
        &self.neutral
    }

    #[inline]
    pub fn selected(&self) -> &[MutationIndex] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.neutral.len() + self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neutral.is_empty() && self.selected.is_empty()
    }

    /// All carried mutation indices, neutral first.
    pub fn iter(&self) -> impl Iterator<Item = MutationIndex> + '_ {
        self.neutral.iter().chain(self.selected.iter()).copied()
    }

    pub fn contains(&self, index: MutationIndex) -> bool {
        self.neutral.contains(&index) || self.selected.contains(&index)
    }

    /// Copy of this gamete with `index` inserted in position order.
    pub fn with_mutation(&self, index: MutationIndex, mutations: &[Mutation]) -> Self {
        let mut copy = self.clone();
        let position = mutations[index as usize].position;
        let list = if mutations[index as usize].neutral {
            &mut copy.neutral
        } else {
            &mut copy.selected
        };
        let at = list.partition_point(|&m| mutations[m as usize].position < position);
        list.insert(at, index);
        copy
    }

    /// Copy of this gamete keeping only indices accepted by `keep`.
    pub fn filtered(&self, keep: impl Fn(MutationIndex) -> bool) -> Self {
        Self {
            neutral: self.neutral.iter().copied().filter(|&m| keep(m)).collect(),
            selected: self.selected.iter().copied().filter(|&m| keep(m)).collect(),
        }
    }

    /// Sum of trait effects of the selected mutations on this gamete.
    pub fn effect_sum(&self, mutations: &[Mutation]) -> f64 {
        self.selected.iter().map(|&m| mutations[m as usize].effect).sum()
    }
}
