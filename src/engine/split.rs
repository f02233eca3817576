//! Overflow splitting.

use super::EngineOptions;
use crate::error::Result;
use crate::layout::LayoutOracle;
use crate::model::{Document, PageNode, Transaction};
use log::debug;

/// Split the first overflowing page at block granularity.
///
/// The first page whose summed child heights exceed the usable height plus
/// tolerance has everything from the first boundary-crossing child onward
/// moved into a new page appended at the end of the document. At most one
/// split is performed per call: a split shifts content, so measurements of
/// later pages are stale until the host re-renders.
///
/// Returns whether a split occurred. "No valid split point" and "nothing
/// rendered yet" are quiet `Ok(false)` outcomes, not errors.
pub fn split_overflow<O: LayoutOracle>(
    doc: &mut Document,
    oracle: &O,
    options: &EngineOptions,
) -> Result<bool> {
    if doc.page_count() >= options.max_pages {
        debug!(
            "page cap reached ({} >= {}), splitter inert",
            doc.page_count(),
            options.max_pages
        );
        return Ok(false);
    }

    let Some(overflow) = find_overflowing_page(doc, oracle, options) else {
        return Ok(false);
    };

    let Some(split_index) = find_split_index(doc, oracle, options, &overflow) else {
        debug!(
            "page {} overflows but has no valid split point",
            overflow.index
        );
        return Ok(false);
    };

    let page = doc.page(overflow.index)?;
    let split_pos = overflow.offset + page.child_offset(split_index);
    let inner_end = overflow.offset + page.node_size() - 1;

    let moved = doc.slice_blocks(split_pos, inner_end)?;
    if !moved.iter().any(|b| b.has_visible_text()) {
        debug!("overflow tail of page {} carries no text", overflow.index);
        return Ok(false);
    }

    let mut tr = Transaction::new();
    tr.delete(split_pos, inner_end);
    tr.insert_page(tr.map(doc.content_size()), PageNode::with_children(moved));
    doc.apply(&tr)?;
    debug!(
        "split page {} at child {}, document now has {} page(s)",
        overflow.index,
        split_index,
        doc.page_count()
    );
    Ok(true)
}

struct Overflow {
    index: usize,
    offset: usize,
}

/// First page whose summed child heights exceed usable height + tolerance.
/// Unmeasurable children count as zero, deferring detection to a later
/// pass once the host has painted them.
fn find_overflowing_page<O: LayoutOracle>(
    doc: &Document,
    oracle: &O,
    options: &EngineOptions,
) -> Option<Overflow> {
    doc.page_refs()
        .find(|r| {
            let height: f32 = (0..r.page.child_count())
                .map(|i| {
                    oracle
                        .measure(doc, r.offset + r.page.child_offset(i))
                        .unwrap_or(0.0)
                })
                .sum();
            height > options.usable_height_px + options.tolerance_px
        })
        .map(|r| Overflow {
            index: r.index,
            offset: r.offset,
        })
}

/// Index of the first child that pushes the running height past the usable
/// height, provided at least one child has already been accumulated. `None`
/// when the overflow rests entirely on the first child.
fn find_split_index<O: LayoutOracle>(
    doc: &Document,
    oracle: &O,
    options: &EngineOptions,
    overflow: &Overflow,
) -> Option<usize> {
    let page = doc.pages.get(overflow.index)?;
    let mut acc = 0.0f32;
    for i in 0..page.child_count() {
        let h = oracle
            .measure(doc, overflow.offset + page.child_offset(i))
            .unwrap_or(0.0);
        if acc + h > options.usable_height_px && acc > 0.0 {
            return Some(i);
        }
        acc += h;
    }
    None
}
