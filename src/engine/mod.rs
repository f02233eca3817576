//! Pagination engine: reflow passes and their scheduling.
//!
//! A reflow pass is reclaim-then-split: blank pages are removed first, and
//! only a pass that reclaimed nothing attempts a split. The two never share
//! a pass, because reclamation shifts content and the split decision must
//! be made against re-measured heights. Each pass applies at most one
//! transaction; a pass that changed the document schedules a follow-up, a
//! pass that changed nothing leaves the machine idle.

mod options;
mod reclaim;
mod scheduler;
mod split;

pub use options::EngineOptions;
pub use reclaim::reclaim;
pub use scheduler::{ReflowScheduler, ReflowState};
pub use split::split_overflow;

use crate::error::Result;
use crate::layout::LayoutOracle;
use crate::model::{Document, Selection};
use log::{debug, warn};

/// What one call to [`PaginationEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// No pass was due, nothing ran
    NotDue,
    /// Blank pages were deleted; split deferred to the follow-up pass
    Reclaimed,
    /// An overflowing page was split
    Split,
    /// Nothing to do; the document is stable and the machine went idle
    Stable,
    /// Page cap reached with overflow left unresolved; degraded but idle
    AtPageCap,
    /// The pass failed; the error was contained and the machine re-armed
    Failed,
}

/// Summary of a [`PaginationEngine::run_until_stable`] drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowReport {
    /// Total passes executed
    pub passes: usize,
    /// Passes that reclaimed pages
    pub reclaim_passes: usize,
    /// Passes that split a page
    pub split_passes: usize,
    /// Whether the machine reached `Idle` within the pass budget
    pub stable: bool,
}

/// The pagination engine.
///
/// Owns the layout oracle, the options, and the reflow scheduler. The host
/// forwards "document changed" notifications to [`note_edit`] and calls
/// [`tick`] from its timer loop; the engine mutates the document through
/// atomic transactions and expects the host to re-render before the next
/// tick's measurements.
///
/// [`note_edit`]: PaginationEngine::note_edit
/// [`tick`]: PaginationEngine::tick
pub struct PaginationEngine<O: LayoutOracle> {
    oracle: O,
    options: EngineOptions,
    scheduler: ReflowScheduler,
}

enum PassChange {
    Reclaimed,
    Split,
    Stable,
    AtPageCap,
}

impl<O: LayoutOracle> PaginationEngine<O> {
    /// Create an engine with default options.
    pub fn new(oracle: O) -> Self {
        Self::with_options(oracle, EngineOptions::default())
    }

    /// Create an engine with the given options.
    pub fn with_options(oracle: O, options: EngineOptions) -> Self {
        let scheduler = ReflowScheduler::new(&options);
        Self {
            oracle,
            options,
            scheduler,
        }
    }

    /// The engine's options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Current scheduler state.
    pub fn state(&self) -> ReflowState {
        self.scheduler.state()
    }

    /// Deadline of the next scheduled pass, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Schedule the initial pass, covering content present before any edit.
    pub fn attach(&mut self, now_ms: u64) {
        self.scheduler.attach(now_ms, self.options.initial_delay_ms);
    }

    /// Forward a "document changed" notification from the host surface.
    pub fn note_edit(&mut self, now_ms: u64) {
        self.scheduler.note_edit(now_ms);
    }

    /// Run at most one reflow pass if one is due.
    ///
    /// Failures inside the pass never escape: they are logged, the in-flight
    /// state is cleared, and [`PassOutcome::Failed`] is reported. The host's
    /// editing surface is never interrupted.
    pub fn tick(
        &mut self,
        doc: &mut Document,
        selection: &Selection,
        now_ms: u64,
    ) -> PassOutcome {
        if !self.scheduler.begin_pass(now_ms) {
            return PassOutcome::NotDue;
        }
        let result = self.run_pass(doc, selection);
        self.settle(result, now_ms)
    }

    /// Translate a finished pass into scheduler state and an outcome.
    /// Failures are contained here: logged, the in-flight state cleared,
    /// never propagated to the host.
    fn settle(&mut self, result: Result<PassChange>, now_ms: u64) -> PassOutcome {
        match result {
            Ok(PassChange::Reclaimed) => {
                self.scheduler
                    .finish_pass(now_ms, Some(self.options.reclaim_retry_ms));
                PassOutcome::Reclaimed
            }
            Ok(PassChange::Split) => {
                self.scheduler
                    .finish_pass(now_ms, Some(self.options.split_retry_ms));
                PassOutcome::Split
            }
            Ok(PassChange::Stable) => {
                self.scheduler.finish_pass(now_ms, None);
                PassOutcome::Stable
            }
            Ok(PassChange::AtPageCap) => {
                self.scheduler.finish_pass(now_ms, None);
                PassOutcome::AtPageCap
            }
            Err(e) => {
                warn!("reflow pass failed, document untouched: {e}");
                self.scheduler.abort_pass();
                PassOutcome::Failed
            }
        }
    }

    /// One reclaim-then-split pass. At most one transaction is applied.
    fn run_pass(&self, doc: &mut Document, selection: &Selection) -> Result<PassChange> {
        if reclaim(doc, selection)? {
            debug!("pass reclaimed pages, deferring split to follow-up");
            return Ok(PassChange::Reclaimed);
        }
        if doc.page_count() >= self.options.max_pages {
            return Ok(PassChange::AtPageCap);
        }
        if split_overflow(doc, &self.oracle, &self.options)? {
            return Ok(PassChange::Split);
        }
        Ok(PassChange::Stable)
    }

    /// Drive the scheduler in virtual time until the machine goes idle or
    /// the pass budget runs out. For hosts without a timer loop, and for
    /// tests: each pending deadline is jumped to and ticked in turn.
    pub fn run_until_stable(
        &mut self,
        doc: &mut Document,
        selection: &Selection,
        from_now_ms: u64,
    ) -> ReflowReport {
        // One split per page up to the cap, interleaved with reclaim
        // passes, plus slack for the initial and final stable pass.
        let budget = 2 * self.options.max_pages + 4;
        let mut report = ReflowReport {
            passes: 0,
            reclaim_passes: 0,
            split_passes: 0,
            stable: false,
        };
        let mut now = from_now_ms;
        while let Some(deadline) = self.scheduler.next_deadline() {
            if report.passes >= budget {
                return report;
            }
            now = now.max(deadline);
            match self.tick(doc, selection, now) {
                PassOutcome::Reclaimed => report.reclaim_passes += 1,
                PassOutcome::Split => report.split_passes += 1,
                PassOutcome::NotDue | PassOutcome::Failed => return report,
                PassOutcome::Stable | PassOutcome::AtPageCap => {}
            }
            report.passes += 1;
        }
        report.stable = self.scheduler.state() == ReflowState::Idle;
        report
    }
}
