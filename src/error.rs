//! Error types for the pageflow library.

use thiserror::Error;

/// Result type alias for pageflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while mutating or querying a paged document.
#[derive(Error, Debug)]
pub enum Error {
    /// A transaction step refers to positions that no longer exist or do not
    /// fall on block boundaries. The document is left untouched.
    #[error("Transaction rejected: {0}")]
    Transaction(String),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// A slice range does not align with block boundaries.
    #[error("Invalid slice range [{from}, {to}): {reason}")]
    SliceBoundary {
        /// Start of the rejected range
        from: usize,
        /// End of the rejected range
        to: usize,
        /// Why the range was rejected
        reason: String,
    },

    /// A document position does not address any node.
    #[error("Position {0} does not address a node")]
    InvalidPosition(usize),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
