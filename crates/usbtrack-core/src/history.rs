/// Connection history — an ordered, append-only event log shared between the
/// poll thread and the UI.
///
/// The log is a cheap-to-clone handle around one `parking_lot::Mutex`. Every
/// operation (append, clear, tail, full copy) is a single critical section,
/// so a reader either sees the whole log as it was before a `clear()` or the
/// empty log after it, never a mix.
///
/// By default the log grows without bound, like the live view it feeds. A
/// retention cap can be set with [`HistoryLog::with_capacity_limit`]; the
/// oldest events are evicted first once it is reached.
use crate::model::HistoryEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Shared handle to the connection history.
#[derive(Clone, Default)]
pub struct HistoryLog {
    inner: Arc<Mutex<VecDeque<HistoryEvent>>>,
    capacity: Option<usize>,
}

impl HistoryLog {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` events. A limit of zero is treated
    /// as one.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            inner: Arc::default(),
            capacity: Some(limit.max(1)),
        }
    }

    /// Retention cap, if any.
    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// Append an event at the end of the log.
    pub fn append(&self, event: HistoryEvent) {
        let mut events = self.inner.lock();
        if let Some(limit) = self.capacity {
            while events.len() >= limit {
                events.pop_front();
            }
        }
        events.push_back(event);
    }

    /// The most recent `n` events, oldest first.
    pub fn snapshot_tail(&self, n: usize) -> Vec<HistoryEvent> {
        let events = self.inner.lock();
        let skip = events.len().saturating_sub(n);
        events.iter().skip(skip).cloned().collect()
    }

    /// Remove every event.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// The full log in chronological order.
    pub fn all(&self) -> Vec<HistoryEvent> {
        self.inner.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
