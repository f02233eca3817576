//! Layout measurement seam.
//!
//! The engine never computes heights itself; it asks a [`LayoutOracle`] for
//! the last-rendered pixel height of the node starting at a position. The
//! oracle is a black box backed by the host rendering surface. A missing or
//! zero answer means "not painted yet" and defers overflow detection to a
//! later pass; it is never an error.

use crate::model::{Block, Document};

/// Source of rendered pixel heights for document nodes.
pub trait LayoutOracle {
    /// Last-rendered height of the node whose opening token sits at `pos`,
    /// or `None` if the node is not currently rendered.
    fn measure(&self, doc: &Document, pos: usize) -> Option<f32>;
}

/// Oracle that derives block heights from wrapped line counts.
///
/// This is the deterministic stand-in used where no real rendering surface
/// exists (tests, benches, headless hosts): a block occupies
/// `ceil(chars / chars_per_line)` lines, at least one, times `line_height`.
#[derive(Debug, Clone)]
pub struct LineHeightOracle {
    /// Pixel height of one rendered line
    pub line_height: f32,
    /// Characters that fit on one line before wrapping
    pub chars_per_line: usize,
}

impl LineHeightOracle {
    /// Create an oracle with the given metrics.
    pub fn new(line_height: f32, chars_per_line: usize) -> Self {
        Self {
            line_height,
            chars_per_line: chars_per_line.max(1),
        }
    }

    fn block_height(&self, block: &Block) -> f32 {
        let chars = block.text.chars().count();
        let lines = chars.div_ceil(self.chars_per_line).max(1);
        lines as f32 * self.line_height
    }
}

impl LayoutOracle for LineHeightOracle {
    fn measure(&self, doc: &Document, pos: usize) -> Option<f32> {
        resolve(doc, pos).map(|node| match node {
            Node::Page(page) => page
                .children
                .iter()
                .map(|b| self.block_height(b))
                .sum(),
            Node::Block(block) => self.block_height(block),
        })
    }
}

/// Oracle where every block measures one constant height.
#[derive(Debug, Clone)]
pub struct FixedHeightOracle {
    /// Height reported for every block
    pub block_height: f32,
}

impl FixedHeightOracle {
    /// Create an oracle reporting `block_height` for every block.
    pub fn new(block_height: f32) -> Self {
        Self { block_height }
    }
}

impl LayoutOracle for FixedHeightOracle {
    fn measure(&self, doc: &Document, pos: usize) -> Option<f32> {
        resolve(doc, pos).map(|node| match node {
            Node::Page(page) => page.child_count() as f32 * self.block_height,
            Node::Block(_) => self.block_height,
        })
    }
}

enum Node<'a> {
    Page(&'a crate::model::PageNode),
    Block(&'a Block),
}

/// Resolve a position to the page or block whose opening token sits there.
fn resolve(doc: &Document, pos: usize) -> Option<Node<'_>> {
    let page_ref = doc.page_at(pos)?;
    if pos == page_ref.offset {
        return Some(Node::Page(page_ref.page));
    }
    let mut cursor = page_ref.offset + 1;
    for child in &page_ref.page.children {
        if pos == cursor {
            return Some(Node::Block(child));
        }
        cursor += child.node_size();
    }
    None
}
