//! Per-slot deterministic RNGs.

use crowd_core::{AgentRng, SlotId};

/// One RNG per solver slot, seeded from the run's global seed.
///
/// Every agent that ever occupies a slot draws its preferred speed,
/// blueprint and path from that slot's stream, so a refused spawn in one
/// slot never perturbs another slot's draws.
pub struct SlotRngs {
    pub inner: Vec<AgentRng>,
}

impl SlotRngs {
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, SlotId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, slot: SlotId) -> &mut AgentRng {
        &mut self.inner[slot.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
