//! Empty-page reclamation.

use crate::error::Result;
use crate::model::{Document, Selection, Transaction};
use log::debug;

/// Delete blank pages, except the first page and any page hosting the
/// active selection. All deletions land in a single transaction, applied in
/// reverse document order so earlier position shifts cannot invalidate
/// later ones. Returns whether anything was deleted.
pub fn reclaim(doc: &mut Document, selection: &Selection) -> Result<bool> {
    let mut candidates: Vec<(usize, usize)> = Vec::new();

    doc.for_each_page(|page, offset, index| {
        if index == 0 {
            return;
        }
        let size = page.node_size();
        if page.is_blank() && !selection.inside_span(offset, offset + size) {
            candidates.push((offset, size));
        }
    });

    if candidates.is_empty() {
        return Ok(false);
    }

    let mut tr = Transaction::new();
    for &(offset, size) in candidates.iter().rev() {
        let from = tr.map(offset);
        tr.delete(from, from + size);
    }
    doc.apply(&tr)?;
    debug!("reclaimed {} empty page(s)", candidates.len());
    Ok(true)
}
