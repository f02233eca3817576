//! Block-level types.
//!
//! Blocks are opaque to the pagination engine beyond their position, their
//! rendered height (answered by the layout oracle), and whether their text
//! is empty. The engine never splits inside a block.

use serde::{Deserialize, Serialize};

/// A block-level node inside a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// What kind of block this is
    pub kind: BlockKind,

    /// Plain text content
    pub text: String,
}

impl Block {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: String::new(),
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }

    /// Create a heading block.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self {
            kind: BlockKind::Heading {
                level: level.clamp(1, 6),
            },
            text: text.into(),
        }
    }

    /// Create a list item block.
    pub fn list_item(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::ListItem,
            text: text.into(),
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    /// Whether the block carries any non-whitespace text.
    pub fn has_visible_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Positional footprint of this block: content length plus the opening
    /// and closing tokens.
    pub fn node_size(&self) -> usize {
        self.text.chars().count() + 2
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind of a block-level node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// A paragraph of text
    Paragraph,

    /// A heading with level 1-6
    Heading {
        /// Heading level
        level: u8,
    },

    /// A list item
    ListItem,
}

impl BlockKind {
    /// Check if this kind is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }
}
