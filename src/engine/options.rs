//! Engine options and configuration.

/// Options controlling pagination and reflow scheduling.
///
/// Defaults model a US Letter sheet at 96 dpi with one-inch top and bottom
/// margins: 11in * 96 = 1056px, minus 2 * 96px, leaving 864px of usable
/// content height.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Usable content height of a page, in pixels
    pub usable_height_px: f32,

    /// Overflow tolerance before a split is attempted, in pixels. Absorbs
    /// sub-pixel rounding so the splitter does not thrash.
    pub tolerance_px: f32,

    /// Hard cap on page count; the splitter goes inert beyond it
    pub max_pages: usize,

    /// Delay between an edit and the pass it triggers, in milliseconds
    pub debounce_ms: u64,

    /// Delay before the follow-up pass after a reclamation, in milliseconds
    pub reclaim_retry_ms: u64,

    /// Delay before the follow-up pass after a split, in milliseconds
    pub split_retry_ms: u64,

    /// Delay of the one-off pass scheduled on attachment, in milliseconds.
    /// Longer than the debounce so first layout can settle.
    pub initial_delay_ms: u64,
}

impl EngineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the usable content height in pixels.
    pub fn with_usable_height(mut self, px: f32) -> Self {
        self.usable_height_px = px;
        self
    }

    /// Set the overflow tolerance in pixels.
    pub fn with_tolerance(mut self, px: f32) -> Self {
        self.tolerance_px = px;
        self
    }

    /// Set the hard page-count cap.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the edit debounce delay in milliseconds.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the post-reclaim retry delay in milliseconds.
    pub fn with_reclaim_retry_ms(mut self, ms: u64) -> Self {
        self.reclaim_retry_ms = ms;
        self
    }

    /// Set the post-split retry delay in milliseconds.
    pub fn with_split_retry_ms(mut self, ms: u64) -> Self {
        self.split_retry_ms = ms;
        self
    }

    /// Set the initial settle delay in milliseconds.
    pub fn with_initial_delay_ms(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            usable_height_px: 864.0,
            tolerance_px: 20.0,
            max_pages: 50,
            debounce_ms: 250,
            reclaim_retry_ms: 200,
            split_retry_ms: 150,
            initial_delay_ms: 500,
        }
    }
}
