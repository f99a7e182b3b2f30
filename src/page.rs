//! Headless host page: a document plus viewport, scroll position and
//! input routing. Widgets are written against this the way browser widgets
//! are written against the DOM and window.

use std::time::{Duration, Instant};

use crate::dom::{
    Document, Easing, Element, InputState, Key, MouseButton, NodeId, ScrollAnimator, Size, Sizing,
    TextMetrics, UiEvent,
};

pub struct Page {
    pub doc: Document,
    pub input: InputState,
    viewport: Size,
    scroll_top: f32,
    scroller: ScrollAnimator,
}

impl Page {
    pub fn new(viewport: Size) -> Self {
        Self::with_metrics(viewport, TextMetrics::default())
    }

    pub fn with_metrics(viewport: Size, metrics: TextMetrics) -> Self {
        Self {
            doc: Document::with_metrics(metrics),
            input: InputState::new(),
            viewport,
            scroll_top: 0.0,
            scroller: ScrollAnimator::new(),
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Append a `<section id=...>` of the given height to the body.
    pub fn add_section(&mut self, id: &str, height: f32) -> NodeId {
        let section = self.doc.create_element(Element::Section);
        self.doc.set_id(section, id);
        self.doc.set_height(section, Sizing::Fixed(height));
        let body = self.doc.body();
        self.doc.append_child(body, section);
        section
    }

    /// Lay out the document if anything changed since the last pass.
    pub fn layout(&mut self) {
        if self.doc.needs_layout() {
            self.doc.layout(self.viewport);
        }
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Largest valid scroll offset. Zero when content fits the viewport.
    pub fn max_scroll(&self) -> f32 {
        let content_h = self.doc.rendered_height(self.doc.body());
        (content_h - self.viewport.height).max(0.0)
    }

    /// Start an animated scroll to `offset`. Supersedes an in-flight scroll;
    /// the new animation starts from the position reached so far.
    pub fn scroll_to(&mut self, offset: f32, duration: Duration, now: Instant) {
        self.tick(now);
        let target = offset.clamp(0.0, self.max_scroll());
        if self
            .scroller
            .start(self.scroll_top, target, duration, Easing::Swing, now)
        {
            log::debug!("scroll to {target} supersedes in-flight scroll");
        }
    }

    /// Animated scroll to the element with `id`. Returns false (and leaves
    /// the scroll position alone) when no such element is attached.
    pub fn scroll_to_element(&mut self, id: &str, duration: Duration, now: Instant) -> bool {
        self.layout();
        let Some(node) = self.doc.get_element_by_id(id) else {
            log::warn!("scroll target #{id} not found");
            return false;
        };
        let Some(offset) = self.doc.offset_top(node, self.scroll_top) else {
            return false;
        };
        self.scroll_to(offset, duration, now);
        true
    }

    /// Advance the scroll animation. Returns true while still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(value) = self.scroller.get(now) {
            self.scroll_top = value.clamp(0.0, self.max_scroll());
        }
        let active = self.scroller.is_active(now);
        self.scroller.gc(now);
        active
    }

    pub fn is_scrolling(&self, now: Instant) -> bool {
        self.scroller.is_active(now)
    }

    // ------------------------------------------------------------------
    // Input routing
    // ------------------------------------------------------------------

    /// Programmatic click on `node`.
    pub fn click(&mut self, node: NodeId) -> Option<UiEvent> {
        self.input.click(&self.doc, node)
    }

    pub fn handle_mouse_input(
        &mut self,
        button: MouseButton,
        pressed: bool,
        x: f32,
        y: f32,
    ) -> Option<UiEvent> {
        self.layout();
        self.input
            .handle_mouse_input(&self.doc, button, pressed, x, y, self.scroll_top)
    }

    pub fn handle_key(&mut self, key: Key) -> Option<UiEvent> {
        self.input.handle_key(&self.doc, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_sections() -> Page {
        let mut page = Page::new(Size::new(800.0, 600.0));
        page.add_section("One", 1500.0);
        page.add_section("Two", 1500.0);
        page.add_section("Three", 1500.0);
        page.layout();
        page
    }

    #[test]
    fn max_scroll_from_content() {
        let page = page_with_sections();
        assert!((page.max_scroll() - 3900.0).abs() < 0.01);

        let empty = Page::new(Size::new(800.0, 600.0));
        assert!(empty.max_scroll().abs() < 0.01);
    }

    #[test]
    fn animated_scroll_reaches_target() {
        let mut page = page_with_sections();
        let t0 = Instant::now();
        assert!(page.scroll_to_element("Two", Duration::from_millis(250), t0));
        assert!(page.is_scrolling(t0));

        assert!(page.tick(t0 + Duration::from_millis(125)));
        let mid = page.scroll_top();
        assert!(mid > 0.0 && mid < 1500.0);

        assert!(!page.tick(t0 + Duration::from_millis(250)));
        assert!((page.scroll_top() - 1500.0).abs() < 0.01);
        assert!(!page.is_scrolling(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn scroll_target_clamped_to_range() {
        let mut page = page_with_sections();
        let t0 = Instant::now();
        page.scroll_to(10_000.0, Duration::from_millis(100), t0);
        page.tick(t0 + Duration::from_millis(100));
        assert!((page.scroll_top() - page.max_scroll()).abs() < 0.01);
    }

    #[test]
    fn second_scroll_supersedes_first() {
        let mut page = page_with_sections();
        let t0 = Instant::now();
        page.scroll_to_element("Three", Duration::from_millis(250), t0);
        let t1 = t0 + Duration::from_millis(100);
        page.scroll_to_element("One", Duration::from_millis(250), t1);
        let partway = page.scroll_top();
        assert!(partway > 0.0, "second scroll starts where the first got to");

        // The first animation would end at 3000; only the second remains.
        page.tick(t1 + Duration::from_millis(250));
        assert!(page.scroll_top().abs() < 0.01);
    }

    #[test]
    fn missing_target_leaves_scroll_alone() {
        let mut page = page_with_sections();
        let t0 = Instant::now();
        page.scroll_to_element("Two", Duration::from_millis(250), t0);
        let t1 = t0 + Duration::from_millis(250);
        page.tick(t1);

        assert!(!page.scroll_to_element("Nope", Duration::from_millis(250), t1));
        assert!(!page.is_scrolling(t1));
        assert!((page.scroll_top() - 1500.0).abs() < 0.01);
    }
}
