//! # Process registry: value → live process handle.
//!
//! Pure bookkeeping, no OS calls. A value is present from the moment its
//! process started until the coordinator observes its exit notification
//! (which can be after the process actually died).
//!
//! ## Rules
//! - Owned and mutated exclusively by the coordinator's single task, so no
//!   locking is needed.
//! - Keyed by the *string value*, not the rotation slot: if the rotation
//!   list repeats a value (`[A, B, A]`), both slots share one entry, and a
//!   rotate targeting a still-live value is rejected as a conflict.

use std::collections::HashMap;

/// Opaque handle to a running supervised process.
///
/// Carries the OS pid for signaling; the `tokio` child itself is owned by
/// the runner's wait task.
#[derive(Clone, Debug)]
pub struct ProcHandle {
    pid: Option<u32>,
}

impl ProcHandle {
    pub(crate) fn new(pid: Option<u32>) -> Self {
        Self { pid }
    }

    /// OS pid, if the process is addressable.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }
}

/// Live-process bookkeeping for the coordinator.
#[derive(Debug, Default)]
pub struct Registry {
    procs: HashMap<String, ProcHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `value`, if a process is tracked for it.
    pub fn get(&self, value: &str) -> Option<&ProcHandle> {
        self.procs.get(value)
    }

    /// Tracks a newly started process.
    pub fn insert(&mut self, value: impl Into<String>, handle: ProcHandle) {
        self.procs.insert(value.into(), handle);
    }

    /// Stops tracking `value` (its exit was observed).
    pub fn remove(&mut self, value: &str) {
        self.procs.remove(value);
    }

    /// Number of tracked processes.
    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// Visits every entry, in no particular order.
    pub fn for_each(&self, mut f: impl FnMut(&str, &ProcHandle)) {
        for (value, handle) in &self.procs {
            f(value, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut r = Registry::new();
        assert!(r.is_empty());
        r.insert("a", ProcHandle::new(Some(42)));
        assert_eq!(r.get("a").and_then(|h| h.pid()), Some(42));
        assert_eq!(r.len(), 1);
        r.remove("a");
        assert!(r.get("a").is_none());
        assert!(r.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut r = Registry::new();
        r.insert("a", ProcHandle::new(None));
        r.remove("b");
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn test_repeated_value_shares_entry() {
        let mut r = Registry::new();
        r.insert("a", ProcHandle::new(Some(1)));
        r.insert("a", ProcHandle::new(Some(2)));
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("a").and_then(|h| h.pid()), Some(2));
    }

    #[test]
    fn test_for_each_visits_all() {
        let mut r = Registry::new();
        r.insert("a", ProcHandle::new(Some(1)));
        r.insert("b", ProcHandle::new(Some(2)));
        let mut seen = Vec::new();
        r.for_each(|v, _| seen.push(v.to_string()));
        seen.sort();
        assert_eq!(seen, ["a", "b"]);
    }
}
