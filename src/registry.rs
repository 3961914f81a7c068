/// Generic container of live entities with mark-then-sweep removal and an
/// optional countdown-lifetime sweep.
///
/// The collision resolver marks entities as it resolves rules and sweeps once
/// at the end of the pass, so removal never skips or double-visits the
/// survivors and a marked entity is never matched by a later rule.

use crate::entities::{FieldEffect, Spark};

/// Entities whose remaining lifetime counts down once per tick.
pub trait Timed {
    fn life_mut(&mut self) -> &mut i32;
}

impl Timed for FieldEffect {
    fn life_mut(&mut self) -> &mut i32 {
        &mut self.life
    }
}

impl Timed for Spark {
    fn life_mut(&mut self) -> &mut i32 {
        &mut self.life
    }
}

/// Unordered collection of entities of one class.  Each entity belongs to
/// exactly one registry; removal goes through `mark` + `sweep` (or `retain`
/// for unconditional culls).
#[derive(Clone, Debug, Default)]
pub struct Registry<T> {
    items: Vec<T>,
    marks: Vec<usize>,
}

impl<T> Registry<T> {
    pub fn new() -> Registry<T> {
        Registry {
            items: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Mark the entity at `index` for removal on the next `sweep`.
    pub fn mark(&mut self, index: usize) {
        if !self.marks.contains(&index) {
            self.marks.push(index);
        }
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.marks.contains(&index)
    }

    /// Remove every marked entity.  Survivors keep their relative order.
    pub fn sweep(&mut self) {
        if self.marks.is_empty() {
            return;
        }
        let marks = std::mem::take(&mut self.marks);
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !marks.contains(&index);
            index += 1;
            keep
        });
    }

    /// Unconditional filter (used for cull-on-exit).  Must not be interleaved
    /// with pending marks.
    pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
        debug_assert!(self.marks.is_empty());
        self.items.retain(f);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.marks.clear();
    }
}

impl<T: Timed> Registry<T> {
    /// Decrement every entity's remaining lifetime and remove those whose
    /// counter has gone negative.
    pub fn advance_lifetimes(&mut self) {
        debug_assert!(self.marks.is_empty());
        self.items.retain_mut(|item| {
            let life = item.life_mut();
            *life -= 1;
            *life >= 0
        });
    }
}

impl<T> std::ops::Index<usize> for Registry<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
