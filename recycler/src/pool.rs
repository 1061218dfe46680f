use alloc::boxed::Box;
use alloc::collections::VecDeque;

use crate::kind::KindMap;
use crate::{KindTag, ResourceKind};

/// Builds a fresh instance when a kind's queue is empty.
pub type Factory<T> = Box<dyn FnMut(ResourceKind) -> T + Send>;

/// Counters describing how a [`Pool`] has been used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Instances built by the factory.
    pub created: usize,
    /// Acquisitions served from a queue.
    pub reused: usize,
    /// Releases discarded because the kind's queue was full.
    pub dropped: usize,
}

/// Per-kind FIFO queues of detached, reusable instances.
///
/// `acquire` never fails: an empty queue falls back to the factory. An instance handed out by
/// `acquire` is in an unspecified state and must be fully re-initialized by the caller.
pub struct Pool<T> {
    queues: KindMap<VecDeque<T>>,
    factory: Factory<T>,
    capacity: Option<usize>,
    stats: PoolStats,
}

impl<T> Pool<T> {
    pub fn new(factory: impl FnMut(ResourceKind) -> T + Send + 'static) -> Self {
        Self {
            queues: KindMap::default(),
            factory: Box::new(factory),
            capacity: None,
            stats: PoolStats::default(),
        }
    }

    /// Limits how many idle instances each kind keeps. Excess instances are dropped on release.
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        if let Some(cap) = capacity {
            for queue in self.queues.values_mut() {
                while queue.len() > cap {
                    queue.pop_front();
                    self.stats.dropped += 1;
                }
            }
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Takes the oldest idle instance of `kind`, or builds a new one.
    pub fn acquire(&mut self, kind: ResourceKind) -> T {
        if let Some(instance) = self.queues.get_mut(&kind).and_then(VecDeque::pop_front) {
            self.stats.reused += 1;
            return instance;
        }
        self.stats.created += 1;
        (self.factory)(kind)
    }

    pub fn acquire_typed<K: KindTag>(&mut self) -> T {
        self.acquire(K::KIND)
    }

    /// Queues `instance` for reuse under `kind`.
    ///
    /// The instance must already be detached from the host. Returns `false` when the queue was
    /// full and the instance was dropped instead.
    pub fn release(&mut self, kind: ResourceKind, instance: T) -> bool {
        let queue = self.queues.entry(kind).or_default();
        if self.capacity.is_some_and(|cap| queue.len() >= cap) {
            self.stats.dropped += 1;
            return false;
        }
        queue.push_back(instance);
        true
    }

    pub fn release_typed<K: KindTag>(&mut self, instance: T) -> bool {
        self.release(K::KIND, instance)
    }

    /// Number of idle instances queued under `kind`.
    pub fn idle(&self, kind: ResourceKind) -> usize {
        self.queues.get(&kind).map_or(0, VecDeque::len)
    }

    /// Number of idle instances across all kinds.
    pub fn idle_total(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Iterates over the idle instances of `kind`, oldest first.
    pub fn iter_idle(&self, kind: ResourceKind) -> impl Iterator<Item = &T> {
        self.queues.get(&kind).into_iter().flatten()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

impl<T> core::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool")
            .field("idle", &self.idle_total())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
