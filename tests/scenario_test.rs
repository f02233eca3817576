//! Integration tests for the documented pagination scenarios.

use pageflow::{
    Block, Document, EngineOptions, FixedHeightOracle, LayoutOracle, PageNode, PaginationEngine,
    PassOutcome, ReflowState, Selection,
};

/// 864px usable height, as rendered US Letter at 96 dpi with 1in margins.
fn letter_options() -> EngineOptions {
    EngineOptions::new()
        .with_usable_height(864.0)
        .with_tolerance(20.0)
        .with_max_pages(50)
}

fn page_of(texts: &[&str]) -> PageNode {
    PageNode::with_children(texts.iter().copied().map(Block::with_text).collect())
}

/// Oracle with one fixed height per child index, regardless of page.
struct PerChildOracle {
    heights: Vec<f32>,
}

impl LayoutOracle for PerChildOracle {
    fn measure(&self, doc: &Document, pos: usize) -> Option<f32> {
        let page_ref = doc.page_at(pos)?;
        let mut cursor = page_ref.offset + 1;
        for (i, child) in page_ref.page.children.iter().enumerate() {
            if pos == cursor {
                return self.heights.get(i).copied();
            }
            cursor += child.node_size();
        }
        None
    }
}

#[test]
fn scenario_a_fresh_document_is_stable() {
    let mut doc = Document::new();
    let before = doc.clone();
    let mut engine =
        PaginationEngine::with_options(FixedHeightOracle::new(24.0), letter_options());

    engine.attach(0);
    let report = engine.run_until_stable(&mut doc, &Selection::cursor(1), 0);

    assert!(report.stable);
    assert_eq!(report.reclaim_passes, 0);
    assert_eq!(report.split_passes, 0);
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc, before);
}

#[test]
fn scenario_b_split_at_third_of_five_children() {
    // Children sum to 900px against 864px usable; the running total crosses
    // 864 at the 3rd child, so children 3-5 move to a new page.
    let mut doc = Document::with_pages(vec![page_of(&[
        "first", "second", "third", "fourth", "fifth",
    ])]);
    let oracle = PerChildOracle {
        heights: vec![400.0, 400.0, 80.0, 10.0, 10.0],
    };
    let mut engine = PaginationEngine::with_options(oracle, letter_options());

    engine.note_edit(0);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 250);

    assert_eq!(outcome, PassOutcome::Split);
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].plain_text(), "first\nsecond");
    assert_eq!(doc.pages[1].plain_text(), "third\nfourth\nfifth");
}

#[test]
fn scenario_c_emptied_page_is_reclaimed() {
    // Page 2 went blank (say, after an undo); the next pass deletes it.
    let mut doc = Document::with_pages(vec![page_of(&["kept"]), PageNode::empty_paragraph()]);
    let mut engine =
        PaginationEngine::with_options(FixedHeightOracle::new(24.0), letter_options());

    engine.note_edit(0);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 250);
    assert_eq!(outcome, PassOutcome::Reclaimed);
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages[0].plain_text(), "kept");

    // The follow-up pass finds nothing more to do.
    let deadline = engine.next_deadline().unwrap();
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), deadline);
    assert_eq!(outcome, PassOutcome::Stable);
    assert_eq!(engine.state(), ReflowState::Idle);
}

#[test]
fn scenario_d_splitter_inert_at_page_cap() {
    let options = letter_options().with_max_pages(3);
    // Three pages, every one of them overflowing.
    let pages: Vec<PageNode> = (0..3)
        .map(|_| page_of(&["a", "b", "c", "d", "e"]))
        .collect();
    let mut doc = Document::with_pages(pages);
    let before = doc.clone();
    let mut engine = PaginationEngine::with_options(FixedHeightOracle::new(400.0), options);

    engine.note_edit(0);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 250);
    assert_eq!(outcome, PassOutcome::AtPageCap);
    assert_eq!(doc, before);

    // Subsequent passes stay inert too.
    engine.note_edit(300);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 550);
    assert_eq!(outcome, PassOutcome::AtPageCap);
    assert_eq!(doc, before);
}

#[test]
fn invariant_first_page_survives_every_pass() {
    let mut doc = Document::with_pages(vec![
        PageNode::empty_paragraph(),
        PageNode::empty_paragraph(),
        PageNode::empty_paragraph(),
    ]);
    let mut engine =
        PaginationEngine::with_options(FixedHeightOracle::new(24.0), letter_options());

    engine.attach(0);
    let report = engine.run_until_stable(&mut doc, &Selection::cursor(1), 0);

    assert!(report.stable);
    assert_eq!(doc.page_count(), 1);
    assert!(doc.pages[0].is_blank());
}

#[test]
fn invariant_split_page_carries_visible_text() {
    let mut doc = Document::with_pages(vec![page_of(&["alpha", "beta", "gamma"])]);
    let mut engine =
        PaginationEngine::with_options(FixedHeightOracle::new(400.0), letter_options());

    engine.note_edit(0);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 250);
    assert_eq!(outcome, PassOutcome::Split);

    let new_page = doc.pages.last().unwrap();
    assert!(new_page.child_count() >= 1);
    assert!(new_page.children.iter().any(|b| b.has_visible_text()));
}

#[test]
fn boundary_single_oversized_child_is_left_alone() {
    let mut doc = Document::with_pages(vec![page_of(&["one enormous block"])]);
    let before = doc.clone();
    let mut engine =
        PaginationEngine::with_options(FixedHeightOracle::new(5000.0), letter_options());

    engine.attach(0);
    let report = engine.run_until_stable(&mut doc, &Selection::cursor(1), 0);

    assert!(report.stable);
    assert_eq!(report.split_passes, 0);
    assert_eq!(doc, before);
}

#[test]
fn unmeasured_content_defers_overflow_detection() {
    struct UnpaintedOracle;
    impl LayoutOracle for UnpaintedOracle {
        fn measure(&self, _doc: &Document, _pos: usize) -> Option<f32> {
            None
        }
    }

    let mut doc = Document::with_pages(vec![page_of(&["a", "b", "c", "d", "e", "f"])]);
    let before = doc.clone();
    let mut engine = PaginationEngine::with_options(UnpaintedOracle, letter_options());

    engine.note_edit(0);
    let outcome = engine.tick(&mut doc, &Selection::cursor(1), 250);

    // Nothing rendered yet: no overflow is detected and no error raised.
    assert_eq!(outcome, PassOutcome::Stable);
    assert_eq!(doc, before);
}
