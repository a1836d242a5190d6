//! Capacity-bounded particle storage.
//!
//! Storage is dense and ordered oldest first: new particles are appended at
//! the back and recycling rewrites a slot in place without moving it, so the
//! front of the vector is always the oldest live entry.

use crate::constants::{TRIM_BATCH, TRIM_SLACK};
use crate::particle::Particle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    /// Fixed population; dead slots are reinitialized in place.
    Recycle,
    /// Unbounded appends, trimmed from the oldest end once the population
    /// passes `capacity + slack`.
    GrowTrim { slack: usize, batch: usize },
}

#[derive(Clone, Debug)]
pub struct Pool {
    particles: Vec<Particle>,
    capacity: usize,
    discipline: Discipline,
}

impl Pool {
    pub fn recycling(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            discipline: Discipline::Recycle,
        }
    }

    pub fn growing(capacity: usize) -> Self {
        Self::with_discipline(
            capacity,
            Discipline::GrowTrim {
                slack: TRIM_SLACK,
                batch: TRIM_BATCH,
            },
        )
    }

    pub fn with_discipline(capacity: usize, discipline: Discipline) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            discipline,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Top up to capacity with freshly made particles. Returns how many
    /// were added.
    pub fn fill(&mut self, mut make: impl FnMut() -> Particle) -> usize {
        let missing = self.capacity.saturating_sub(self.particles.len());
        self.particles.extend((0..missing).map(|_| make()));
        missing
    }

    pub fn push(&mut self, p: Particle) {
        self.particles.push(p);
    }

    pub fn extend(&mut self, iter: impl IntoIterator<Item = Particle>) {
        self.particles.extend(iter);
    }

    /// Reinitialize every particle matching `dead` in place. The population
    /// never changes.
    pub fn recycle(
        &mut self,
        mut dead: impl FnMut(&Particle) -> bool,
        mut reset: impl FnMut(&mut Particle),
    ) -> usize {
        let mut n = 0;
        for p in self.particles.iter_mut() {
            if dead(p) {
                reset(p);
                n += 1;
            }
        }
        n
    }

    /// Grow-then-trim maintenance. Once the population exceeds
    /// `capacity + slack`, drop `min(batch, len - capacity)` from the oldest
    /// end. No-op for recycling pools. Returns the number removed.
    pub fn trim(&mut self) -> usize {
        let Discipline::GrowTrim { slack, batch } = self.discipline else {
            return 0;
        };
        let len = self.particles.len();
        if len <= self.capacity + slack {
            return 0;
        }
        let k = batch.min(len - self.capacity);
        self.particles.drain(..k);
        log::trace!("[pool] trimmed {} of {}", k, len);
        k
    }

    /// Remove up to `n` of the most recently added particles.
    pub fn shed_newest(&mut self, n: usize) -> usize {
        let k = n.min(self.particles.len());
        self.particles.truncate(self.particles.len() - k);
        k
    }

    /// Drop particles matching `remove` while the population is above
    /// capacity, scanning from the oldest end.
    pub fn settle(&mut self, mut remove: impl FnMut(&Particle) -> bool) -> usize {
        let mut excess = self.particles.len().saturating_sub(self.capacity);
        if excess == 0 {
            return 0;
        }
        let before = self.particles.len();
        self.particles.retain(|p| {
            if excess > 0 && remove(p) {
                excess -= 1;
                false
            } else {
                true
            }
        });
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

impl<'a> IntoIterator for &'a Pool {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
