//! Fixed-capacity object pool
//!
//! Bullets, enemies, particles and boss bullets all live in one of these.
//! Storage is allocated once; a spawn into a full pool is dropped, which is
//! the intended backpressure when the screen is saturated.

use glam::Vec2;

/// A movable object occupying one pool slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Advance one tick at constant velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Handle to a pool slot (only meaningful for the pool that issued it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Slot array of bodies; a dead slot holds `None`
#[derive(Debug, Clone)]
pub struct Pool {
    slots: Box<[Option<Body>]>,
}

impl Pool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live bodies (derived by scan)
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Occupy the first dead slot, or return `None` if the pool is full
    pub fn acquire(&mut self, body: Body) -> Option<SlotId> {
        let index = self.slots.iter().position(Option::is_none)?;
        self.slots[index] = Some(body);
        Some(SlotId(index))
    }

    /// Kill a slot; it is reusable on the next acquire
    pub fn release(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            *slot = None;
        }
    }

    pub fn is_alive(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SlotId) -> Option<&Body> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Body> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Every slot handle in index order, live or not
    pub fn ids(&self) -> impl Iterator<Item = SlotId> + use<> {
        (0..self.slots.len()).map(SlotId)
    }

    /// Live bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Body)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|b| (SlotId(i), b)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut Body)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|b| (SlotId(i), b)))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.iter().map(|(_, b)| b.pos)
    }

    /// First live body (in slot order) matching `pred`
    pub fn find(&self, mut pred: impl FnMut(&Body) -> bool) -> Option<SlotId> {
        self.iter().find(|(_, b)| pred(b)).map(|(id, _)| id)
    }

    /// Run `f` on every live body; bodies for which it returns false die
    pub fn retain_mut(&mut self, mut f: impl FnMut(&mut Body) -> bool) {
        for slot in self.slots.iter_mut() {
            let keep = match slot {
                Some(body) => f(body),
                None => continue,
            };
            if !keep {
                *slot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}
