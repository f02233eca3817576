//! Page container type.

use super::Block;
use serde::{Deserialize, Serialize};

/// A page container emulating one printable sheet.
///
/// Pages are isolating: generic editing operations never merge or split
/// them. Only the overflow splitter creates pages and only the empty-page
/// reclaimer destroys them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    /// Block children, in document order
    pub children: Vec<Block>,
}

impl PageNode {
    /// Create an empty page.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Create a page holding the given blocks.
    pub fn with_children(children: Vec<Block>) -> Self {
        Self { children }
    }

    /// Create the minimum viable page: one empty paragraph.
    pub fn empty_paragraph() -> Self {
        Self {
            children: vec![Block::new()],
        }
    }

    /// Add a block to the end of the page.
    pub fn add_block(&mut self, block: Block) {
        self.children.push(block);
    }

    /// Get the number of blocks on the page.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the page is reclaimable: no children at all, or no
    /// non-whitespace text across all children.
    pub fn is_blank(&self) -> bool {
        self.children.is_empty() || !self.children.iter().any(|b| b.has_visible_text())
    }

    /// Positional footprint of this page: children plus the opening and
    /// closing tokens.
    pub fn node_size(&self) -> usize {
        2 + self.children.iter().map(Block::node_size).sum::<usize>()
    }

    /// Position of child `index` relative to the page's own offset.
    pub fn child_offset(&self, index: usize) -> usize {
        1 + self
            .children
            .iter()
            .take(index)
            .map(Block::node_size)
            .sum::<usize>()
    }
}

impl Default for PageNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = PageNode::new();
        assert_eq!(page.child_count(), 0);
        assert!(page.is_blank());
        assert_eq!(page.node_size(), 2);
    }

    #[test]
    fn test_empty_paragraph_page_is_blank() {
        let page = PageNode::empty_paragraph();
        assert_eq!(page.child_count(), 1);
        assert!(page.is_blank());
    }

    #[test]
    fn test_page_with_text_not_blank() {
        let mut page = PageNode::new();
        page.add_block(Block::with_text("content"));
        assert!(!page.is_blank());
        assert_eq!(page.plain_text(), "content");
    }

    #[test]
    fn test_child_offset() {
        let page = PageNode::with_children(vec![
            Block::with_text("ab"), // size 4
            Block::with_text("cde"), // size 5
            Block::new(),            // size 2
        ]);
        assert_eq!(page.child_offset(0), 1);
        assert_eq!(page.child_offset(1), 5);
        assert_eq!(page.child_offset(2), 10);
        assert_eq!(page.node_size(), 13);
    }
}
