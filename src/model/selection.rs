//! Selection range.

use serde::{Deserialize, Serialize};

/// The user's active cursor or selection, as a normalized `[from, to]`
/// position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Lower end of the range
    pub from: usize,
    /// Upper end of the range
    pub to: usize,
}

impl Selection {
    /// Create a selection, normalizing the ends.
    pub fn new(from: usize, to: usize) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// A collapsed cursor at `pos`.
    pub fn cursor(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Whether the selection lies entirely inside the span `[start, end)`
    /// of a node (boundaries included, matching editor-surface semantics).
    pub fn inside_span(&self, start: usize, end: usize) -> bool {
        self.from >= start && self.to <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let sel = Selection::new(9, 3);
        assert_eq!(sel.from, 3);
        assert_eq!(sel.to, 9);
    }

    #[test]
    fn test_inside_span() {
        let sel = Selection::new(5, 8);
        assert!(sel.inside_span(5, 8));
        assert!(sel.inside_span(0, 20));
        assert!(!sel.inside_span(6, 20));
        assert!(!sel.inside_span(0, 7));
    }

    #[test]
    fn test_cursor_inside_span() {
        let cursor = Selection::cursor(12);
        assert!(cursor.inside_span(10, 14));
        assert!(!cursor.inside_span(0, 10));
    }
}
