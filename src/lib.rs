//! # pageflow
//!
//! Automatic pagination and reflow engine for editable paged documents.
//!
//! pageflow keeps a continuously-edited document shaped into fixed-size
//! printable pages: it measures rendered block heights through a layout
//! oracle, removes pages that have gone blank, splits pages whose content
//! has grown past the usable height, and debounces that work behind the
//! host's edit stream so bursts of typing cost one reflow pass.
//!
//! ## Quick Start
//!
//! ```
//! use pageflow::{
//!     reflow_until_stable, Block, Document, EngineOptions, LineHeightOracle, PageNode,
//!     Selection,
//! };
//!
//! // A single page holding more text than fits on one sheet.
//! let mut doc = Document::with_pages(vec![PageNode::with_children(
//!     (0..40).map(|i| Block::with_text(format!("paragraph {i}"))).collect(),
//! )]);
//!
//! let oracle = LineHeightOracle::new(24.0, 80);
//! let options = EngineOptions::default();
//! let report = reflow_until_stable(&mut doc, &Selection::cursor(1), oracle, options);
//!
//! assert!(report.stable);
//! assert!(doc.page_count() > 1);
//! ```
//!
//! ## How it works
//!
//! - **Page containers are isolating**: only the engine creates or destroys
//!   pages; editing commands never merge or split them.
//! - **Measurement is a black box**: the [`LayoutOracle`] answers with the
//!   last-rendered height, which may be missing for unpainted nodes; the
//!   engine treats that as "no overflow this pass" and tries again later.
//! - **Every pass is one atomic transaction at most**: reclaim runs first,
//!   a split only happens in a pass that reclaimed nothing, and a pass that
//!   changed the document schedules a re-measure before deciding anything
//!   further.
//! - **Termination is guaranteed**: a pass that changes nothing goes idle,
//!   and the page cap bounds how many splits can ever cascade.

pub mod engine;
pub mod error;
pub mod layout;
pub mod model;

// Re-export commonly used types
pub use engine::{
    reclaim, split_overflow, EngineOptions, PaginationEngine, PassOutcome, ReflowReport,
    ReflowScheduler, ReflowState,
};
pub use error::{Error, Result};
pub use layout::{FixedHeightOracle, LayoutOracle, LineHeightOracle};
pub use model::{Block, BlockKind, Document, PageNode, PageRef, Selection, Step, Transaction};

/// Run one reclaim-then-split pass immediately, outside any scheduling.
///
/// Returns whether the document changed. Useful for hosts that manage their
/// own timing and only want the pagination decision logic.
pub fn reflow_pass<O: LayoutOracle>(
    doc: &mut Document,
    selection: &Selection,
    oracle: &O,
    options: &EngineOptions,
) -> Result<bool> {
    if reclaim(doc, selection)? {
        return Ok(true);
    }
    split_overflow(doc, oracle, options)
}

/// Build an engine, attach it, and drive it in virtual time until the
/// document is stable (or the pass budget runs out).
///
/// # Example
///
/// ```
/// use pageflow::{reflow_until_stable, Document, EngineOptions, FixedHeightOracle, Selection};
///
/// let mut doc = Document::new();
/// let report = reflow_until_stable(
///     &mut doc,
///     &Selection::cursor(1),
///     FixedHeightOracle::new(24.0),
///     EngineOptions::default(),
/// );
/// assert!(report.stable);
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn reflow_until_stable<O: LayoutOracle>(
    doc: &mut Document,
    selection: &Selection,
    oracle: O,
    options: EngineOptions,
) -> ReflowReport {
    let mut engine = PaginationEngine::with_options(oracle, options);
    engine.attach(0);
    engine.run_until_stable(doc, selection, 0)
}
