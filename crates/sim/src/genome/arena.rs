use super::{Diploid, Gamete};
use crate::base::MutationIndex;

/// Handle to a gamete stored in a [`GameteArena`].
pub type GameteId = u32;

/// Flat storage for the gametes of one generation.
///
/// Individuals refer to gametes by [`GameteId`]; identical gametes are
/// shared by handle rather than copied. Stored gametes are never edited in
/// place, so a handle stays valid for the lifetime of the arena.
#[derive(Debug, Clone, Default)]
pub struct GameteArena {
    gametes: Vec<Gamete>,
}

impl GameteArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            gametes: Vec::with_capacity(capacity),
        }
    }

    pub fn alloc(&mut self, gamete: Gamete) -> GameteId {
        self.gametes.push(gamete);
        (self.gametes.len() - 1) as GameteId
    }

    #[inline]
    pub fn get(&self, id: GameteId) -> &Gamete {
        &self.gametes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.gametes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gametes.is_empty()
    }

    /// How many gamete slots of `diploids` point at each stored gamete.
    pub fn multiplicities(&self, diploids: &[Diploid]) -> Vec<u32> {
        let mut n = vec![0u32; self.gametes.len()];
        for dip in diploids {
            n[dip.first as usize] += 1;
            n[dip.second as usize] += 1;
        }
        n
    }

    /// Build a new arena holding only the gametes referenced by `diploids`,
    /// with every mutation rejected by `keep` removed, and rewrite the
    /// diploids' handles to point into it.
    pub fn compact(&self, diploids: &mut [Diploid], keep: impl Fn(MutationIndex) -> bool) -> Self {
        let mut next = Self::with_capacity(self.gametes.len());
        let mut transfer = GameteTransfer::new(self);
        for dip in diploids.iter_mut() {
            dip.first = transfer.share_filtered(dip.first, &mut next, &keep);
            dip.second = transfer.share_filtered(dip.second, &mut next, &keep);
        }
        next
    }
}

/// Copies gametes from one arena into another at most once each, so
/// handles that were shared in the source stay shared in the destination.
pub struct GameteTransfer<'a> {
    source: &'a GameteArena,
    remap: Vec<Option<GameteId>>,
}

impl<'a> GameteTransfer<'a> {
    pub fn new(source: &'a GameteArena) -> Self {
        Self {
            source,
            remap: vec![None; source.len()],
        }
    }

    pub fn source(&self) -> &'a GameteArena {
        self.source
    }

    /// Handle in `dest` for the unchanged source gamete `id`.
    pub fn share(&mut self, id: GameteId, dest: &mut GameteArena) -> GameteId {
        self.share_filtered(id, dest, &|_| true)
    }

    fn share_filtered(
        &mut self,
        id: GameteId,
        dest: &mut GameteArena,
        keep: &impl Fn(MutationIndex) -> bool,
    ) -> GameteId {
        if let Some(mapped) = self.remap[id as usize] {
            return mapped;
        }
        let mapped = dest.alloc(self.source.get(id).filtered(keep));
        self.remap[id as usize] = Some(mapped);
        mapped
    }
}
