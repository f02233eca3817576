//! Reflow scheduling.
//!
//! Timers are instance-owned deadlines in host-supplied milliseconds; the
//! host drives the machine by calling into it with the current time. There
//! is no ambient clock and no background thread: everything runs in
//! discrete, non-preemptible passes on the host's one thread.

use super::EngineOptions;

/// State of the reflow machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowState {
    /// Document is believed stable; nothing scheduled
    Idle,
    /// A pass is scheduled and waiting for its deadline
    Debouncing,
    /// A pass is executing right now
    Running,
}

/// Debounces edit-triggered reflow requests and serializes passes.
///
/// Edits coalesce into one deadline (cancel-and-replace). At most one pass
/// runs at a time; the `Running` state doubles as the in-flight flag that
/// swallows reentrant triggers fired by the engine's own transactions.
#[derive(Debug, Clone)]
pub struct ReflowScheduler {
    state: ReflowState,
    deadline_ms: Option<u64>,
    debounce_ms: u64,
}

impl ReflowScheduler {
    /// Create a scheduler from engine options.
    pub fn new(options: &EngineOptions) -> Self {
        Self {
            state: ReflowState::Idle,
            deadline_ms: None,
            debounce_ms: options.debounce_ms,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> ReflowState {
        self.state
    }

    /// Deadline of the pending pass, if one is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Schedule the one-off initial pass, `delay_ms` from `now_ms`. Covers
    /// content present before any edit occurs.
    pub fn attach(&mut self, now_ms: u64, delay_ms: u64) {
        if self.state == ReflowState::Idle {
            self.state = ReflowState::Debouncing;
            self.deadline_ms = Some(now_ms + delay_ms);
        }
    }

    /// Note a document-changing edit. Resets the debounce deadline; a
    /// reentrant notification during a running pass is a no-op (the pass's
    /// own rescheduling picks up whatever changed).
    pub fn note_edit(&mut self, now_ms: u64) {
        match self.state {
            ReflowState::Idle | ReflowState::Debouncing => {
                self.state = ReflowState::Debouncing;
                self.deadline_ms = Some(now_ms + self.debounce_ms);
            }
            ReflowState::Running => {}
        }
    }

    /// Whether a scheduled pass has come due.
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.state == ReflowState::Debouncing
            && self.deadline_ms.is_some_and(|d| now_ms >= d)
    }

    /// Claim the right to run a pass. Returns false unless a scheduled pass
    /// is due and nothing is already running.
    pub fn begin_pass(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.state = ReflowState::Running;
        self.deadline_ms = None;
        true
    }

    /// End the running pass. `retry_after_ms` schedules a follow-up pass
    /// that many milliseconds out; `None` means the document is stable and
    /// the machine goes idle.
    pub fn finish_pass(&mut self, now_ms: u64, retry_after_ms: Option<u64>) {
        debug_assert_eq!(self.state, ReflowState::Running);
        match retry_after_ms {
            Some(delay) => {
                self.state = ReflowState::Debouncing;
                self.deadline_ms = Some(now_ms + delay);
            }
            None => {
                self.state = ReflowState::Idle;
                self.deadline_ms = None;
            }
        }
    }

    /// Clear the in-flight state after a failed pass without rescheduling.
    /// The next edit re-arms the machine; the engine must never stay stuck
    /// in `Running`.
    pub fn abort_pass(&mut self) {
        self.state = ReflowState::Idle;
        self.deadline_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> ReflowScheduler {
        ReflowScheduler::new(&EngineOptions::new().with_debounce_ms(250))
    }

    #[test]
    fn test_edits_coalesce() {
        let mut s = scheduler();
        s.note_edit(0);
        s.note_edit(100);
        s.note_edit(200);
        assert_eq!(s.next_deadline(), Some(450));
        assert!(!s.is_due(449));
        assert!(s.is_due(450));
    }

    #[test]
    fn test_begin_pass_requires_due() {
        let mut s = scheduler();
        assert!(!s.begin_pass(1000)); // nothing scheduled
        s.note_edit(0);
        assert!(!s.begin_pass(100)); // not due yet
        assert!(s.begin_pass(250));
        assert_eq!(s.state(), ReflowState::Running);
        // reentrant claim while running is refused
        assert!(!s.begin_pass(251));
    }

    #[test]
    fn test_edit_while_running_is_noop() {
        let mut s = scheduler();
        s.note_edit(0);
        assert!(s.begin_pass(250));
        s.note_edit(260);
        assert_eq!(s.state(), ReflowState::Running);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_finish_pass_reschedules_or_idles() {
        let mut s = scheduler();
        s.note_edit(0);
        s.begin_pass(250);
        s.finish_pass(250, Some(150));
        assert_eq!(s.state(), ReflowState::Debouncing);
        assert_eq!(s.next_deadline(), Some(400));

        s.begin_pass(400);
        s.finish_pass(400, None);
        assert_eq!(s.state(), ReflowState::Idle);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_attach_schedules_initial_pass_once() {
        let mut s = scheduler();
        s.attach(0, 500);
        assert_eq!(s.next_deadline(), Some(500));
        // attach after an edit must not clobber the pending deadline
        let mut s = scheduler();
        s.note_edit(0);
        s.attach(0, 500);
        assert_eq!(s.next_deadline(), Some(250));
    }

    #[test]
    fn test_abort_clears_running() {
        let mut s = scheduler();
        s.note_edit(0);
        s.begin_pass(250);
        s.abort_pass();
        assert_eq!(s.state(), ReflowState::Idle);
        // the machine is not stuck: a later edit re-arms it
        s.note_edit(300);
        assert!(s.is_due(550));
    }
}
