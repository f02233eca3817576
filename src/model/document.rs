//! Document-level types and position addressing.

use super::{Block, PageNode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A paged document: an ordered sequence of page containers.
///
/// Positions are token offsets. A page occupies `[offset, offset +
/// node_size)`; its children occupy `[offset + 1, offset + node_size - 1)`.
/// Mutations go through [`Transaction`](super::Transaction)s applied with
/// [`Document::apply`], which commits all steps or none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<PageNode>,
}

/// A page together with its index and absolute offset.
#[derive(Debug, Clone, Copy)]
pub struct PageRef<'a> {
    /// The page node
    pub page: &'a PageNode,
    /// Index among top-level children
    pub index: usize,
    /// Absolute position of the page's opening token
    pub offset: usize,
}

impl Document {
    /// Create the minimum viable document: one page with one empty
    /// paragraph.
    pub fn new() -> Self {
        Self {
            pages: vec![PageNode::empty_paragraph()],
        }
    }

    /// Create a document from the given pages.
    pub fn with_pages(pages: Vec<PageNode>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by index.
    pub fn page(&self, index: usize) -> Result<&PageNode> {
        self.pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index, self.pages.len()))
    }

    /// Total positional size of the document content.
    pub fn content_size(&self) -> usize {
        self.pages.iter().map(PageNode::node_size).sum()
    }

    /// Absolute offset of the page at `index`.
    pub fn page_offset(&self, index: usize) -> Result<usize> {
        if index > self.pages.len() {
            return Err(Error::PageOutOfRange(index, self.pages.len()));
        }
        Ok(self
            .pages
            .iter()
            .take(index)
            .map(PageNode::node_size)
            .sum())
    }

    /// Iterate pages with their indexes and absolute offsets.
    pub fn page_refs(&self) -> impl Iterator<Item = PageRef<'_>> {
        let mut offset = 0;
        self.pages.iter().enumerate().map(move |(index, page)| {
            let r = PageRef {
                page,
                index,
                offset,
            };
            offset += page.node_size();
            r
        })
    }

    /// Visit each top-level page with its offset and index.
    pub fn for_each_page<F>(&self, mut f: F)
    where
        F: FnMut(&PageNode, usize, usize),
    {
        for r in self.page_refs() {
            f(r.page, r.offset, r.index);
        }
    }

    /// Find the page whose span contains `pos`.
    pub fn page_at(&self, pos: usize) -> Option<PageRef<'_>> {
        self.page_refs()
            .find(|r| pos >= r.offset && pos < r.offset + r.page.node_size())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(PageNode::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Extract the blocks covered by `[from, to)`.
    ///
    /// The range must lie inside a single page and both ends must fall on
    /// block boundaries; anything else is a [`Error::SliceBoundary`].
    pub fn slice_blocks(&self, from: usize, to: usize) -> Result<Vec<Block>> {
        if from >= to {
            return Err(Error::SliceBoundary {
                from,
                to,
                reason: "empty or inverted range".to_string(),
            });
        }
        let page_ref = self.page_at(from).ok_or(Error::InvalidPosition(from))?;
        let (start, end) = block_aligned_range(page_ref.page, page_ref.offset, from, to)?;
        Ok(page_ref.page.children[start..end].to_vec())
    }

    /// Delete `[from, to)`. The range must cover whole pages or a
    /// block-aligned span inside a single page.
    pub(crate) fn delete_range(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= to || to > self.content_size() {
            return Err(Error::Transaction(format!(
                "delete range [{from}, {to}) is empty or out of bounds"
            )));
        }

        // Whole-page deletion: both ends on page boundaries.
        if let (Some(start), Some(end)) = (self.boundary_index(from), self.boundary_index(to)) {
            self.pages.drain(start..end);
            return Ok(());
        }

        let page_ref = self
            .page_at(from)
            .ok_or_else(|| Error::Transaction(format!("position {from} addresses no page")))?;
        let index = page_ref.index;
        let offset = page_ref.offset;
        let (start, end) = block_aligned_range(page_ref.page, offset, from, to)
            .map_err(|e| Error::Transaction(e.to_string()))?;
        self.pages[index].children.drain(start..end);
        Ok(())
    }

    /// Insert `page` so that its opening token lands at `pos`. `pos` must be
    /// a page boundary (including the end of the document).
    pub(crate) fn insert_page_at(&mut self, pos: usize, page: PageNode) -> Result<()> {
        let index = self.boundary_index(pos).ok_or_else(|| {
            Error::Transaction(format!("position {pos} is not a page boundary"))
        })?;
        self.pages.insert(index, page);
        Ok(())
    }

    /// If `pos` is a page boundary, the index of the page starting there
    /// (`page_count()` for the end of the document).
    fn boundary_index(&self, pos: usize) -> Option<usize> {
        let mut offset = 0;
        for (index, page) in self.pages.iter().enumerate() {
            if pos == offset {
                return Some(index);
            }
            offset += page.node_size();
        }
        (pos == offset).then_some(self.pages.len())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `[from, to)` against a page's children, requiring both ends on
/// block boundaries within that page. Returns child indexes `[start, end)`.
fn block_aligned_range(
    page: &PageNode,
    page_offset: usize,
    from: usize,
    to: usize,
) -> Result<(usize, usize)> {
    let inner_end = page_offset + page.node_size() - 1;
    if from <= page_offset || to > inner_end {
        return Err(Error::SliceBoundary {
            from,
            to,
            reason: "range escapes the page interior".to_string(),
        });
    }

    let mut start = None;
    let mut end = None;
    let mut cursor = page_offset + 1;
    for (i, child) in page.children.iter().enumerate() {
        if cursor == from {
            start = Some(i);
        }
        cursor += child.node_size();
        if cursor == to {
            end = Some(i + 1);
        }
    }
    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok((s, e)),
        _ => Err(Error::SliceBoundary {
            from,
            to,
            reason: "range ends fall inside a block".to_string(),
        }),
    }
}
