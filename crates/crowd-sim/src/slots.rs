//! Fixed slot layout and the `ActorId → SlotId` table.
//!
//! Slots are assigned once at start-up and never move:
//!
//! ```text
//! 0 .. N_net                  network (vehicle) slots
//! N_net .. N_net + N_side     sidewalk (pedestrian) slots
//! N_net + N_side              ego slot (always last)
//! ```
//!
//! The pool binds each spawned actor to its slot; removals and
//! `CrowdController::agent` resolve actors back to slots through the table.

use crowd_core::{ActorId, AgentKind, SlotId};

#[cfg(feature = "fx-hash")]
type ActorMap = rustc_hash::FxHashMap<ActorId, SlotId>;
#[cfg(not(feature = "fx-hash"))]
type ActorMap = std::collections::HashMap<ActorId, SlotId>;

/// What a slot is reserved for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotRole {
    Network,
    Sidewalk,
    Ego,
}

impl SlotRole {
    /// Agent kind pooled in this role; `None` for the ego slot.
    pub fn kind(self) -> Option<AgentKind> {
        match self {
            SlotRole::Network  => Some(AgentKind::Vehicle),
            SlotRole::Sidewalk => Some(AgentKind::Pedestrian),
            SlotRole::Ego      => None,
        }
    }

    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Vehicle    => SlotRole::Network,
            AgentKind::Pedestrian => SlotRole::Sidewalk,
        }
    }
}

pub struct SlotTable {
    roles:    Vec<SlotRole>,
    by_actor: ActorMap,
}

impl SlotTable {
    pub fn new(num_network: usize, num_sidewalk: usize) -> Self {
        let mut roles = Vec::with_capacity(num_network + num_sidewalk + 1);
        roles.extend(std::iter::repeat_n(SlotRole::Network, num_network));
        roles.extend(std::iter::repeat_n(SlotRole::Sidewalk, num_sidewalk));
        roles.push(SlotRole::Ego);
        Self { roles, by_actor: ActorMap::default() }
    }

    /// Total slots, ego included.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn role(&self, slot: SlotId) -> Option<SlotRole> {
        self.roles.get(slot.index()).copied()
    }

    pub fn ego(&self) -> SlotId {
        SlotId((self.roles.len() - 1) as u32)
    }

    /// Slots reserved for `kind`, in index order.
    pub fn slots_for(&self, kind: AgentKind) -> impl Iterator<Item = SlotId> + '_ {
        let role = SlotRole::for_kind(kind);
        self.roles
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == role)
            .map(|(i, _)| SlotId(i as u32))
    }

    /// Every non-ego slot, in index order.
    pub fn pool_slots(&self) -> impl Iterator<Item = SlotId> + use<> {
        (0..self.roles.len() as u32 - 1).map(SlotId)
    }

    pub fn bind(&mut self, actor: ActorId, slot: SlotId) {
        self.by_actor.insert(actor, slot);
    }

    pub fn unbind(&mut self, actor: ActorId) -> Option<SlotId> {
        self.by_actor.remove(&actor)
    }

    pub fn slot_of(&self, actor: ActorId) -> Option<SlotId> {
        self.by_actor.get(&actor).copied()
    }

    /// Number of actors currently bound to a slot.
    pub fn bound_count(&self) -> usize {
        self.by_actor.len()
    }
}
