//! Transactions: composable, atomically-applied document mutations.

use super::{Document, PageNode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single mutation step. Positions are expressed in the coordinate space
/// of the document *after* all preceding steps in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Step {
    /// Delete the range `[from, to)`.
    Delete {
        /// Start of the deleted range
        from: usize,
        /// End of the deleted range
        to: usize,
    },

    /// Insert a page whose opening token lands at `pos`.
    InsertPage {
        /// Page boundary position
        pos: usize,
        /// The page to insert
        page: PageNode,
    },
}

/// An ordered list of steps applied as one atomic edit.
///
/// Positions computed against the document as it was when the transaction
/// was opened can be carried forward with [`Transaction::map`], which plays
/// the accumulated steps' position shifts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    steps: Vec<Step>,
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Whether the transaction carries any steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps recorded so far.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The recorded steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Record a deletion of `[from, to)` (in post-previous-steps space).
    pub fn delete(&mut self, from: usize, to: usize) -> &mut Self {
        self.steps.push(Step::Delete { from, to });
        self
    }

    /// Record a page insertion at `pos` (in post-previous-steps space).
    pub fn insert_page(&mut self, pos: usize, page: PageNode) -> &mut Self {
        self.steps.push(Step::InsertPage { pos, page });
        self
    }

    /// Map a position from the coordinate space the transaction was opened
    /// in through every step recorded so far.
    pub fn map(&self, pos: usize) -> usize {
        self.steps.iter().fold(pos, |p, step| match step {
            Step::Delete { from, to } => {
                if p >= *to {
                    p - (to - from)
                } else if p > *from {
                    *from
                } else {
                    p
                }
            }
            Step::InsertPage { pos: at, page } => {
                if p >= *at {
                    p + page.node_size()
                } else {
                    p
                }
            }
        })
    }
}

impl Document {
    /// Apply a transaction atomically: every step is validated and applied
    /// against a scratch copy, and the document is replaced only if all of
    /// them succeed. A failing step leaves the document untouched.
    pub fn apply(&mut self, tr: &Transaction) -> Result<()> {
        let mut scratch = self.clone();
        for step in tr.steps() {
            match step {
                Step::Delete { from, to } => scratch.delete_range(*from, *to)?,
                Step::InsertPage { pos, page } => {
                    scratch.insert_page_at(*pos, page.clone())?
                }
            }
        }
        if scratch.pages.is_empty() {
            return Err(Error::Transaction(
                "transaction would leave the document without pages".to_string(),
            ));
        }
        *self = scratch;
        Ok(())
    }
}
