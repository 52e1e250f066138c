use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
};

use crate::foundation::core::Millis;

/// Handle returned by [`Scheduler::schedule`], used to cancel a pending cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CueId(u64);

/// Cooperative cue queue on a virtual millisecond clock.
///
/// Determinism rule: cues due at the same instant pop in the order they were scheduled.
/// Cancelled cues stay in the heap until they surface and are then dropped.
#[derive(Debug)]
pub struct Scheduler<T> {
    heap: BinaryHeap<Reverse<(Millis, u64)>>,
    pending: HashMap<u64, (Millis, T)>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Millis, cue: T) -> CueId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((at, seq)));
        self.pending.insert(seq, (at, cue));
        CueId(seq)
    }

    /// Returns `false` if the cue already fired or was cancelled.
    pub fn cancel(&mut self, id: CueId) -> bool {
        self.pending.remove(&id.0).is_some()
    }

    /// Cancel every pending cue matching `pred`; returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(Millis, &T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, (at, cue)| !pred(*at, cue));
        before - self.pending.len()
    }

    /// Pop the earliest cue due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, T)> {
        loop {
            let Reverse((at, seq)) = *self.heap.peek()?;
            if at > now {
                return None;
            }
            self.heap.pop();
            if let Some(entry) = self.pending.remove(&seq) {
                return Some(entry);
            }
        }
    }

    /// Time of the earliest pending cue.
    pub fn next_due(&mut self) -> Option<Millis> {
        while let Some(&Reverse((at, seq))) = self.heap.peek() {
            if self.pending.contains_key(&seq) {
                return Some(at);
            }
            self.heap.pop();
        }
        None
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
