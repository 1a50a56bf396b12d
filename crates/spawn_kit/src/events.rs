//! Event types and sinks for observing selection and pooling.
//!
//! This module defines [`SpawnEvent`] and a set of sinks and adapters to emit,
//! collect, filter, or forward events produced by
//! [`crate::selection::WeightedSelector`], [`crate::pool::ComponentPool`] and
//! [`crate::spawner::Spawner`]. Sinks are passed explicitly to the `*_with_events`
//! operations; there is no global event hub.
use crossbeam_channel::{Receiver, Sender};

/// Describes events emitted by selection and pool operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnEvent {
    /// Emitted when a pool was created and filled.
    PoolCreated {
        /// Resource key of the pool.
        key: String,
        /// Number of instances constructed.
        size: usize,
    },

    /// Emitted when `create_pool` was called for a key that already has a pool.
    PoolAlreadyRegistered {
        /// Resource key of the existing pool.
        key: String,
    },

    /// Emitted when an instance was handed out.
    InstanceAcquired {
        /// Resource key of the pool.
        key: String,
        /// Construction index of the instance within its pool.
        slot: usize,
    },

    /// Emitted when an instance still active was forced dormant and reused.
    InstanceRecycled {
        /// Resource key of the pool.
        key: String,
        /// Construction index of the instance within its pool.
        slot: usize,
    },

    /// Emitted when the in-use guard refused to hand out an active instance.
    AcquireRejected {
        /// Resource key of the pool.
        key: String,
        /// Construction index of the active instance.
        slot: usize,
    },

    /// Emitted when an unregistered key was requested.
    AcquireMissed {
        /// The requested resource key.
        key: String,
    },

    /// Emitted when a weighted selection produced an item.
    ItemSelected {
        /// Level the selection was scoped to.
        level: String,
        /// Index of the selected entry among the level's entries.
        index: usize,
        /// The uniform draw in `[0, total_ratio)`.
        roll: u64,
        /// Sum of ratios of the level's entries.
        total_ratio: u64,
    },

    /// Emitted when a level has no entries to select from.
    SelectionEmpty {
        /// The requested level.
        level: String,
    },
}

/// Discriminant of [`SpawnEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnEventKind {
    PoolCreated,
    PoolAlreadyRegistered,
    InstanceAcquired,
    InstanceRecycled,
    AcquireRejected,
    AcquireMissed,
    ItemSelected,
    SelectionEmpty,
}

impl SpawnEvent {
    pub fn kind(&self) -> SpawnEventKind {
        match self {
            SpawnEvent::PoolCreated { .. } => SpawnEventKind::PoolCreated,
            SpawnEvent::PoolAlreadyRegistered { .. } => SpawnEventKind::PoolAlreadyRegistered,
            SpawnEvent::InstanceAcquired { .. } => SpawnEventKind::InstanceAcquired,
            SpawnEvent::InstanceRecycled { .. } => SpawnEventKind::InstanceRecycled,
            SpawnEvent::AcquireRejected { .. } => SpawnEventKind::AcquireRejected,
            SpawnEvent::AcquireMissed { .. } => SpawnEventKind::AcquireMissed,
            SpawnEvent::ItemSelected { .. } => SpawnEventKind::ItemSelected,
            SpawnEvent::SelectionEmpty { .. } => SpawnEventKind::SelectionEmpty,
        }
    }
}

/// A generic event sink that accepts [`SpawnEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SpawnEvent);

    /// Whether the sink is interested in events of `kind`. Producers skip
    /// building events nobody wants.
    #[inline]
    fn wants(&self, _kind: SpawnEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SpawnEvent) {}

    #[inline]
    fn wants(&self, _kind: SpawnEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SpawnEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<SpawnEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SpawnEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Moves the buffered events into `sink` in arrival order and returns how
    /// many it accepted. Kinds `sink` does not want are discarded.
    pub fn drain_into(&mut self, sink: &mut dyn EventSink) -> usize {
        let mut forwarded = 0;
        for event in self.events.drain(..) {
            if sink.wants(event.kind()) {
                sink.send(event);
                forwarded += 1;
            }
        }
        forwarded
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to every contained sink wanting its kind.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: SpawnEvent) {
        let kind = event.kind();
        let Some(last) = self.sinks.iter().rposition(|s| s.wants(kind)) else {
            return;
        };
        for sink in self.sinks[..last].iter_mut().filter(|s| s.wants(kind)) {
            sink.send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: SpawnEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Sink wrapper that only forwards the listed event kinds.
pub struct FilteredSink<S: EventSink> {
    inner: S,
    kinds: Vec<SpawnEventKind>,
}

impl<S: EventSink> FilteredSink<S> {
    pub fn new(inner: S, kinds: impl IntoIterator<Item = SpawnEventKind>) -> Self {
        Self {
            inner,
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for FilteredSink<S> {
    fn send(&mut self, event: SpawnEvent) {
        if self.kinds.contains(&event.kind()) {
            self.inner.send(event);
        }
    }

    fn wants(&self, kind: SpawnEventKind) -> bool {
        self.kinds.contains(&kind) && self.inner.wants(kind)
    }
}

/// Event sink that forwards events over a channel to a consumer elsewhere
/// in the game loop.
pub struct ChannelSink {
    pub tx: Sender<SpawnEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<SpawnEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink backed by an unbounded channel and returns its receiving end.
    pub fn unbounded() -> (Self, Receiver<SpawnEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        // A dropped receiver means nobody listens anymore.
        let _ = self.tx.send(event);
    }
}
