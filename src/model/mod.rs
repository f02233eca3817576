//! Document model types.
//!
//! The model is a position-addressed tree: the document owns an ordered
//! sequence of page containers, each page owns an ordered sequence of
//! blocks. Every node occupies a half-open span of positions; a container's
//! children live between its opening and closing tokens.

mod block;
mod document;
mod page;
mod selection;
mod transaction;

pub use block::{Block, BlockKind};
pub use document::{Document, PageRef};
pub use page::PageNode;
pub use selection::Selection;
pub use transaction::{Step, Transaction};
