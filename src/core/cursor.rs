//! # Rotation cursor.
//!
//! Tracks a logical position in the fixed, ordered rotation list. The index
//! starts at a sentinel meaning "no rotation has happened yet": `current()`
//! is undefined before the first [`advance`](Cursor::advance), while
//! `next()` is always defined (slot 0 before the first advance).
//!
//! Advancing is the only mutation; callers commit an advance only once a
//! rotation actually happened.

/// Position in the fixed rotation list.
///
/// Slots cycle: with values `[A, B]` the current value after successive
/// advances is `A, B, A, B, ...`.
#[derive(Debug)]
pub struct Cursor {
    /// Slot index; -1 until the first rotation commits.
    index: i64,
    values: Vec<String>,
}

impl Cursor {
    /// Creates a cursor over `values`. The list must be non-empty (validated
    /// by [`Config::validate`](crate::Config::validate)).
    pub fn new(values: Vec<String>) -> Self {
        debug_assert!(!values.is_empty());
        Self { index: -1, values }
    }

    /// True once at least one rotation has committed.
    pub fn started(&self) -> bool {
        self.index >= 0
    }

    /// The current slot's value, or `None` before the first rotation.
    pub fn current(&self) -> Option<&str> {
        if self.index < 0 {
            return None;
        }
        Some(&self.values[self.index as usize % self.values.len()])
    }

    /// The next slot's value. Defined even before the first rotation.
    pub fn next(&self) -> &str {
        &self.values[(self.index + 1) as usize % self.values.len()]
    }

    /// Commits a rotation: moves to the next slot.
    pub fn advance(&mut self) {
        self.index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(values: &[&str]) -> Cursor {
        Cursor::new(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_unstarted_has_no_current() {
        let c = cursor(&["a", "b"]);
        assert!(!c.started());
        assert_eq!(c.current(), None);
        assert_eq!(c.next(), "a");
    }

    #[test]
    fn test_first_advance_lands_on_slot_zero() {
        let mut c = cursor(&["a", "b"]);
        c.advance();
        assert!(c.started());
        assert_eq!(c.current(), Some("a"));
        assert_eq!(c.next(), "b");
    }

    #[test]
    fn test_cycles_through_list() {
        let mut c = cursor(&["a", "b"]);
        let mut seen = Vec::new();
        for _ in 0..5 {
            c.advance();
            seen.push(c.current().unwrap().to_string());
        }
        assert_eq!(seen, ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_single_value_always_same() {
        let mut c = cursor(&["only"]);
        assert_eq!(c.next(), "only");
        c.advance();
        assert_eq!(c.current(), Some("only"));
        assert_eq!(c.next(), "only");
    }

    #[test]
    fn test_repeated_values_are_distinct_slots() {
        let mut c = cursor(&["a", "b", "a"]);
        c.advance();
        c.advance();
        c.advance();
        assert_eq!(c.current(), Some("a"));
        assert_eq!(c.next(), "a");
        c.advance();
        assert_eq!(c.current(), Some("a"));
        assert_eq!(c.next(), "b");
    }
}
