mod animation;
mod element;
mod input;
mod theme;

pub use animation::{Easing, ScrollAnimator};
pub use element::{Display, Element, Listener};
pub use input::{InputState, Key, MouseButton, UiEvent};
pub use theme::Theme;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Handle into the element arena. Stable across insertions/removals.
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// Geometry primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Returns true if the point (px, py) is inside this rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// Padding / margin edges (top, right, bottom, left; CSS order).
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// How an element is positioned.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Position {
    /// Normal flow inside the parent.
    #[default]
    Flow,
    /// Pinned to the viewport at a pixel offset. Takes no space in flow
    /// and does not move when the page scrolls.
    Fixed { x: f32, y: f32 },
}

/// How an element's width/height is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Sizing {
    /// Fixed pixel size.
    Fixed(f32),
    /// Fraction of the containing width, or of the viewport height (0.0–1.0).
    Percent(f32),
    /// Fit to content (intrinsic size from measure). Block containers in
    /// block flow fill the available width instead.
    #[default]
    Fit,
}

/// Approximate font metrics used by measurement.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Line height as a multiple of font size when no explicit line height is set.
    pub line_height_factor: f32,
    /// Average glyph advance as a multiple of font size.
    pub glyph_width_factor: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            line_height_factor: 1.2,
            glyph_width_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub display: Display,
    pub position: Position,
    pub width: Sizing,
    pub height: Sizing,
    pub padding: Edges,
    pub margin: Edges,
    pub font_size: f32,
    /// Explicit line height in pixels; `None` derives it from font size.
    pub line_height: Option<f32>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Block,
            position: Position::Flow,
            width: Sizing::Fit,
            height: Sizing::Fit,
            padding: Edges::ZERO,
            margin: Edges::ZERO,
            font_size: 16.0,
            line_height: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing an element with tree, style and layout metadata.
#[derive(Debug)]
pub struct Node {
    pub element: Element,
    /// Element id attribute. Used for anchors and lookups.
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub style: Style,
    pub listener: Option<Listener>,
    pub dirty: bool,
    /// Computed layout rect (set by layout pass). Document coordinates,
    /// or viewport coordinates when `fixed` is set.
    pub rect: Rect,
    /// Measured intrinsic content size (set by layout pass).
    pub measured: Size,
    /// Whether this node sits inside a viewport-fixed subtree (set by layout).
    pub fixed: bool,
}

impl Node {
    fn new(element: Element) -> Self {
        Self {
            element,
            id: None,
            classes: SmallVec::new(),
            parent: None,
            children: Vec::new(),
            style: Style::default(),
            listener: None,
            dirty: true,
            rect: Rect::default(),
            measured: Size::default(),
            fixed: false,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Arena-backed retained element tree with a single body root.
///
/// Elements are created detached and only become part of the page once
/// appended under the body. Queries by id search the attached tree only.
pub struct Document {
    arena: SlotMap<NodeId, Node>,
    body: NodeId,
    metrics: TextMetrics,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_metrics(TextMetrics::default())
    }

    pub fn with_metrics(metrics: TextMetrics) -> Self {
        let mut arena = SlotMap::with_key();
        let body = arena.insert(Node::new(Element::Body));
        Self {
            arena,
            body,
            metrics,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element. Returns its id.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.arena.insert(Node::new(element))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Refuses to move the body or create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.arena.get(parent).map_or(0, |p| p.children.len());
        self.insert_child(parent, index, child);
    }

    /// Insert `child` at `index` among `parent`'s children (clamped to the
    /// child count). Same detaching rules as `append_child`.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if child == self.body || !self.arena.contains_key(parent) || !self.arena.contains_key(child)
        {
            log::warn!("insert_child: invalid parent/child pair");
            return;
        }
        if self.contains(child, parent) {
            log::warn!("insert_child: refusing to insert an ancestor into its descendant");
            return;
        }
        self.detach(child);

        if let Some(parent_node) = self.arena.get_mut(parent) {
            let at = index.min(parent_node.children.len());
            parent_node.children.insert(at, child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
        self.mark_dirty(parent);
    }

    /// Unlink a node from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent_id) = self.arena.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.arena.get_mut(parent_id) {
            parent.children.retain(|c| *c != id);
        }
        if let Some(node) = self.arena.get_mut(id) {
            node.parent = None;
        }
        self.mark_dirty(parent_id);
    }

    /// Remove an element and all its descendants. The body cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.body {
            log::warn!("remove: the body cannot be removed");
            return;
        }
        let mut to_remove = Vec::new();
        Self::collect_subtree(&self.arena, id, &mut to_remove);

        self.detach(id);

        for rid in to_remove {
            self.arena.remove(rid);
        }
    }

    fn collect_subtree(arena: &SlotMap<NodeId, Node>, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        if let Some(node) = arena.get(id) {
            for &child in &node.children {
                Self::collect_subtree(arena, child, out);
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(id).map_or(&[], |n| n.children.as_slice())
    }

    // ------------------------------------------------------------------
    // Attributes and style
    // ------------------------------------------------------------------

    pub fn set_id(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(node) = self.arena.get_mut(id) {
            node.id = Some(value.into());
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.arena.get_mut(id)
            && !node.has_class(class)
        {
            node.classes.push(class.to_string());
        }
    }

    /// Bind an action to an element; input routing reports it on click.
    pub fn bind(&mut self, id: NodeId, listener: Listener) {
        if let Some(node) = self.arena.get_mut(id) {
            node.listener = Some(listener);
        }
    }

    /// Apply a style mutation and mark the element dirty.
    pub fn update_style(&mut self, id: NodeId, f: impl FnOnce(&mut Style)) {
        if let Some(node) = self.arena.get_mut(id) {
            f(&mut node.style);
            self.mark_dirty(id);
        }
    }

    pub fn set_display(&mut self, id: NodeId, display: Display) {
        self.update_style(id, |s| s.display = display);
    }

    pub fn set_position(&mut self, id: NodeId, pos: Position) {
        self.update_style(id, |s| s.position = pos);
    }

    pub fn set_sizing(&mut self, id: NodeId, w: Sizing, h: Sizing) {
        self.update_style(id, |s| {
            s.width = w;
            s.height = h;
        });
    }

    pub fn set_height(&mut self, id: NodeId, h: Sizing) {
        self.update_style(id, |s| s.height = h);
    }

    pub fn set_padding(&mut self, id: NodeId, padding: Edges) {
        self.update_style(id, |s| s.padding = padding);
    }

    pub fn set_margin(&mut self, id: NodeId, margin: Edges) {
        self.update_style(id, |s| s.margin = margin);
    }

    pub fn set_margin_top(&mut self, id: NodeId, top: f32) {
        self.update_style(id, |s| s.margin.top = top);
    }

    pub fn set_font_size(&mut self, id: NodeId, px: f32) {
        self.update_style(id, |s| s.font_size = px);
    }

    pub fn set_line_height(&mut self, id: NodeId, px: f32) {
        self.update_style(id, |s| s.line_height = Some(px));
    }

    /// Record the intrinsic size of an image element.
    pub fn set_natural_size(&mut self, id: NodeId, size: Option<Size>) {
        if let Some(node) = self.arena.get_mut(id)
            && let Element::Img { natural, .. } = &mut node.element
        {
            *natural = size;
            self.mark_dirty(id);
        }
    }

    /// Mark an element and its ancestors as dirty.
    pub fn mark_dirty(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(cid) = current {
            let Some(node) = self.arena.get_mut(cid) else {
                break;
            };
            node.dirty = true;
            current = node.parent;
        }
    }

    /// Whether the attached tree changed since the last layout pass.
    pub fn needs_layout(&self) -> bool {
        self.arena.get(self.body).is_some_and(|b| b.dirty)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Returns true if `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(cid) = current {
            if cid == ancestor {
                return true;
            }
            current = self.arena.get(cid).and_then(|n| n.parent);
        }
        false
    }

    /// Returns true if the element is part of the page (reachable from body).
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.arena.contains_key(id) && self.contains(self.body, id)
    }

    /// First attached element with the given id, in document order.
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        if self.id_matches(self.body, value) {
            return Some(self.body);
        }
        self.find_by_id(self.body, value)
    }

    /// First descendant of `scope` (excluding `scope`) with the given id.
    pub fn find_by_id(&self, scope: NodeId, value: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk_descendants(scope, &mut |doc, id| {
            if found.is_none() && doc.id_matches(id, value) {
                found = Some(id);
            }
        });
        found
    }

    /// All descendants of `scope` (excluding `scope`) carrying `class`,
    /// in document order.
    pub fn find_by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_descendants(scope, &mut |doc, id| {
            if doc.arena.get(id).is_some_and(|n| n.has_class(class)) {
                out.push(id);
            }
        });
        out
    }

    /// Descendants of `scope` that have a listener bound, in document order.
    pub fn bound_descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_descendants(scope, &mut |doc, id| {
            if doc.arena.get(id).is_some_and(|n| n.listener.is_some()) {
                out.push(id);
            }
        });
        out
    }

    /// Nearest element at or above `start` with a listener bound.
    pub fn listener_target(&self, start: NodeId) -> Option<(NodeId, Listener)> {
        let mut current = Some(start);
        while let Some(cid) = current {
            let node = self.arena.get(cid)?;
            if let Some(listener) = node.listener {
                return Some((cid, listener));
            }
            current = node.parent;
        }
        None
    }

    /// Concatenated text of all spans in the subtree, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(Node {
            element: Element::Span { text },
            ..
        }) = self.arena.get(id)
        {
            out.push_str(text);
        }
        self.walk_descendants(id, &mut |doc, nid| {
            if let Some(Node {
                element: Element::Span { text },
                ..
            }) = doc.arena.get(nid)
            {
                out.push_str(text);
            }
        });
        out
    }

    fn id_matches(&self, id: NodeId, value: &str) -> bool {
        self.arena
            .get(id)
            .and_then(|n| n.id.as_deref())
            .is_some_and(|v| v == value)
    }

    fn walk_descendants(&self, id: NodeId, f: &mut impl FnMut(&Self, NodeId)) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        for &child in &node.children {
            f(self, child);
            self.walk_descendants(child, f);
        }
    }

    // ------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------

    /// Measure intrinsic content size of an element (no padding).
    /// Works on detached subtrees.
    pub fn measure_node(&self, id: NodeId) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::default();
        };

        match &node.element {
            Element::Span { text } => {
                let fs = node.style.font_size;
                Size {
                    width: text.chars().count() as f32 * fs * self.metrics.glyph_width_factor,
                    height: self.line_height(&node.style),
                }
            }
            Element::Img { natural, .. } => natural.unwrap_or_default(),
            Element::Body | Element::Div | Element::Section => {
                let mut w: f32 = 0.0;
                let mut h: f32 = 0.0;
                for &child_id in &node.children {
                    let Some(child) = self.arena.get(child_id) else {
                        continue;
                    };
                    if matches!(child.style.position, Position::Fixed { .. }) {
                        continue;
                    }
                    let outer = self.outer_size(child_id);
                    match node.style.display {
                        Display::Block => {
                            w = w.max(outer.width);
                            h += outer.height;
                        }
                        Display::Row => {
                            w += outer.width;
                            h = h.max(outer.height);
                        }
                    }
                }
                Size {
                    width: w,
                    height: h.max(0.0),
                }
            }
        }
    }

    /// Rendered border-box height of an element, as layout would size it.
    /// Percent heights resolve against the content they wrap.
    pub fn rendered_height(&self, id: NodeId) -> f32 {
        let Some(node) = self.arena.get(id) else {
            return 0.0;
        };
        match node.style.height {
            Sizing::Fixed(px) => px,
            Sizing::Percent(_) | Sizing::Fit => {
                self.measure_node(id).height + node.style.padding.vertical()
            }
        }
    }

    fn line_height(&self, style: &Style) -> f32 {
        style
            .line_height
            .unwrap_or(style.font_size * self.metrics.line_height_factor)
    }

    /// Border-box size plus margins, used when stacking siblings.
    fn outer_size(&self, id: NodeId) -> Size {
        let Some(node) = self.arena.get(id) else {
            return Size::default();
        };
        let measured = self.measure_node(id);
        let w = match node.style.width {
            Sizing::Fixed(px) => px,
            Sizing::Percent(_) | Sizing::Fit => measured.width + node.style.padding.horizontal(),
        };
        let h = match node.style.height {
            Sizing::Fixed(px) => px,
            Sizing::Percent(_) | Sizing::Fit => measured.height + node.style.padding.vertical(),
        };
        Size {
            width: w + node.style.margin.horizontal(),
            height: h + node.style.margin.vertical(),
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Run the full layout pass over the attached tree.
    /// `viewport` is the visible area; the body spans its width.
    pub fn layout(&mut self, viewport: Size) {
        let body = self.body;
        self.layout_node(body, 0.0, 0.0, viewport.width, false, false, viewport);
    }

    /// Lay out one node at the given flow origin. Returns the space it
    /// consumes in its parent's flow (zero for fixed elements).
    #[allow(clippy::too_many_arguments)]
    fn layout_node(
        &mut self,
        id: NodeId,
        origin_x: f32,
        origin_y: f32,
        available_width: f32,
        in_row: bool,
        in_fixed: bool,
        viewport: Size,
    ) -> Size {
        let measured = self.measure_node(id);

        let Some(node) = self.arena.get_mut(id) else {
            return Size::default();
        };
        node.measured = measured;
        let style = node.style;
        let is_container = matches!(
            node.element,
            Element::Body | Element::Div | Element::Section
        );

        let fixed_origin = match style.position {
            Position::Fixed { x, y } => Some((x, y)),
            Position::Flow => None,
        };
        let fixed = in_fixed || fixed_origin.is_some();
        let containing_width = if fixed_origin.is_some() {
            viewport.width
        } else {
            available_width
        };

        let resolved_w = match style.width {
            Sizing::Fixed(px) => px,
            Sizing::Percent(frac) => containing_width * frac,
            Sizing::Fit if is_container && !in_row && fixed_origin.is_none() => {
                (containing_width - style.margin.horizontal()).max(0.0)
            }
            Sizing::Fit => measured.width + style.padding.horizontal(),
        };
        let resolved_h = match style.height {
            Sizing::Fixed(px) => px,
            Sizing::Percent(frac) => viewport.height * frac,
            Sizing::Fit => measured.height + style.padding.vertical(),
        };

        let (ox, oy) = fixed_origin.unwrap_or((origin_x, origin_y));
        node.rect = Rect {
            x: ox + style.margin.left,
            y: oy + style.margin.top,
            width: resolved_w,
            height: resolved_h,
        };
        node.fixed = fixed;
        node.dirty = false;

        let content_x = node.rect.x + style.padding.left;
        let content_y = node.rect.y + style.padding.top;
        let content_w = (resolved_w - style.padding.horizontal()).max(0.0);
        let children: Vec<NodeId> = node.children.clone();

        let mut cursor_x = content_x;
        let mut cursor_y = content_y;
        for child in children {
            let used = match style.display {
                Display::Block => {
                    self.layout_node(child, content_x, cursor_y, content_w, false, fixed, viewport)
                }
                Display::Row => {
                    self.layout_node(child, cursor_x, content_y, content_w, true, fixed, viewport)
                }
            };
            match style.display {
                Display::Block => cursor_y += used.height,
                Display::Row => cursor_x += used.width,
            }
        }

        if fixed_origin.is_some() {
            Size::default()
        } else {
            Size {
                width: resolved_w + style.margin.horizontal(),
                height: resolved_h + style.margin.vertical(),
            }
        }
    }

    /// Vertical document offset of an attached, laid-out element.
    /// Fixed elements report their viewport offset plus `scroll_top`.
    pub fn offset_top(&self, id: NodeId, scroll_top: f32) -> Option<f32> {
        if !self.is_attached(id) {
            return None;
        }
        let node = self.arena.get(id)?;
        Some(if node.fixed {
            node.rect.y + scroll_top
        } else {
            node.rect.y
        })
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Find the deepest element under the viewport point (x, y).
    /// Fixed subtrees are tested in viewport space and win over flow
    /// content; flow content is tested at (x, y + scroll_top).
    pub fn hit_test(&self, x: f32, y: f32, scroll_top: f32) -> Option<NodeId> {
        let body = self.arena.get(self.body)?;
        for &child in body.children.iter().rev() {
            if let Some(hit) = self.hit_test_fixed(child, x, y) {
                return Some(hit);
            }
        }
        self.hit_test_flow(self.body, x, y + scroll_top)
    }

    fn hit_test_fixed(&self, id: NodeId, x: f32, y: f32) -> Option<NodeId> {
        let node = self.arena.get(id)?;
        if matches!(node.style.position, Position::Fixed { .. }) {
            return self.hit_test_node(id, x, y);
        }
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_fixed(child, x, y) {
                return Some(hit);
            }
        }
        None
    }

    fn hit_test_flow(&self, id: NodeId, x: f32, y: f32) -> Option<NodeId> {
        let node = self.arena.get(id)?;
        if matches!(node.style.position, Position::Fixed { .. }) || !node.rect.contains(x, y) {
            return None;
        }
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_flow(child, x, y) {
                return Some(hit);
            }
        }
        Some(id)
    }

    fn hit_test_node(&self, id: NodeId, x: f32, y: f32) -> Option<NodeId> {
        let node = self.arena.get(id)?;
        if !node.rect.contains(x, y) {
            return None;
        }
        // Later children paint on top, so check the last child first.
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test_node(child, x, y) {
                return Some(hit);
            }
        }
        Some(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Size {
        Size::new(800.0, 600.0)
    }

    fn section(doc: &mut Document, id: &str, height: f32) -> NodeId {
        let s = doc.create_element(Element::Section);
        doc.set_id(s, id);
        doc.set_height(s, Sizing::Fixed(height));
        let body = doc.body();
        doc.append_child(body, s);
        s
    }

    #[test]
    fn append_and_detach() {
        let mut doc = Document::new();
        let div = doc.create_element(Element::Div);
        assert!(!doc.is_attached(div));

        let body = doc.body();
        doc.append_child(body, div);
        assert!(doc.is_attached(div));
        assert_eq!(doc.get(div).expect("div").parent, Some(body));

        doc.detach(div);
        assert!(!doc.is_attached(div));
        assert!(doc.children(body).is_empty());
    }

    #[test]
    fn append_moves_between_parents() {
        let mut doc = Document::new();
        let a = doc.create_element(Element::Div);
        let b = doc.create_element(Element::Div);
        let child = doc.create_element(Element::span("x"));
        doc.append_child(a, child);
        doc.append_child(b, child);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
    }

    #[test]
    fn insert_child_at_index() {
        let mut doc = Document::new();
        let parent = doc.create_element(Element::Div);
        let a = doc.create_element(Element::span("a"));
        let b = doc.create_element(Element::span("b"));
        let c = doc.create_element(Element::span("c"));
        doc.append_child(parent, a);
        doc.append_child(parent, c);
        doc.insert_child(parent, 1, b);
        assert_eq!(doc.children(parent), &[a, b, c]);
        assert_eq!(doc.text_content(parent), "abc");
    }

    #[test]
    fn refuses_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element(Element::Div);
        let inner = doc.create_element(Element::Div);
        doc.append_child(outer, inner);
        doc.append_child(inner, outer);
        assert_eq!(doc.get(outer).expect("outer").parent, None);
        assert_eq!(doc.children(inner).len(), 0);
    }

    #[test]
    fn remove_subtree() {
        let mut doc = Document::new();
        let div = doc.create_element(Element::Div);
        let span = doc.create_element(Element::span("A"));
        doc.append_child(div, span);
        let body = doc.body();
        doc.append_child(body, div);

        doc.remove(div);
        assert!(doc.get(div).is_none());
        assert!(doc.get(span).is_none());
        assert!(doc.children(body).is_empty());

        // Body survives a remove request.
        doc.remove(body);
        assert!(doc.get(body).is_some());
    }

    #[test]
    fn dirty_propagation() {
        let mut doc = Document::new();
        let div = doc.create_element(Element::Div);
        let body = doc.body();
        doc.append_child(body, div);

        doc.layout(viewport());
        assert!(!doc.needs_layout());
        assert!(!doc.get(div).expect("div").dirty);

        doc.set_line_height(div, 20.0);
        assert!(doc.get(div).expect("div").dirty);
        assert!(doc.needs_layout());
    }

    #[test]
    fn get_element_by_id_ignores_detached() {
        let mut doc = Document::new();
        let detached = doc.create_element(Element::Div);
        doc.set_id(detached, "target");
        assert!(doc.get_element_by_id("target").is_none());

        let attached = section(&mut doc, "target", 10.0);
        assert_eq!(doc.get_element_by_id("target"), Some(attached));
    }

    #[test]
    fn find_by_class_in_document_order() {
        let mut doc = Document::new();
        let root = doc.create_element(Element::Div);
        let a = doc.create_element(Element::span("a"));
        let b = doc.create_element(Element::Div);
        let c = doc.create_element(Element::span("c"));
        doc.add_class(a, "text");
        doc.add_class(c, "text");
        doc.add_class(c, "text");
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(b, c);

        assert_eq!(doc.find_by_class(root, "text"), vec![a, c]);
        assert_eq!(doc.get(c).expect("c").classes.len(), 1);
        // Scope itself is excluded.
        doc.add_class(root, "text");
        assert_eq!(doc.find_by_class(root, "text").len(), 2);
    }

    #[test]
    fn span_measure_uses_metrics() {
        let mut doc = Document::new();
        let span = doc.create_element(Element::span("Hello"));
        doc.set_font_size(span, 10.0);
        let size = doc.measure_node(span);
        assert!((size.width - 30.0).abs() < 0.01); // 5 chars * 10 * 0.6
        assert!((size.height - 12.0).abs() < 0.01); // 10 * 1.2

        doc.set_line_height(span, 40.0);
        assert!((doc.rendered_height(span) - 40.0).abs() < 0.01);
    }

    #[test]
    fn image_height_from_natural_size() {
        let mut doc = Document::new();
        let img = doc.create_element(Element::img("icon.png", None));
        assert!(doc.rendered_height(img).abs() < 0.01);
        doc.set_natural_size(img, Some(Size::new(16.0, 32.0)));
        assert!((doc.rendered_height(img) - 32.0).abs() < 0.01);
    }

    #[test]
    fn row_measure_takes_tallest_child() {
        let mut doc = Document::new();
        let row = doc.create_element(Element::Div);
        doc.set_display(row, Display::Row);
        doc.set_padding(row, Edges::symmetric(5.0, 0.0));
        let a = doc.create_element(Element::span("ab"));
        let b = doc.create_element(Element::span("c"));
        doc.set_font_size(a, 10.0);
        doc.set_font_size(b, 20.0);
        doc.append_child(row, a);
        doc.append_child(row, b);

        let size = doc.measure_node(row);
        assert!((size.width - 24.0).abs() < 0.01); // 12 + 12
        assert!((size.height - 24.0).abs() < 0.01);
        assert!((doc.rendered_height(row) - 34.0).abs() < 0.01);
    }

    #[test]
    fn block_layout_stacks_sections() {
        let mut doc = Document::new();
        let one = section(&mut doc, "One", 500.0);
        let two = section(&mut doc, "Two", 700.0);
        let three = section(&mut doc, "Three", 300.0);
        doc.layout(viewport());

        assert_eq!(doc.offset_top(one, 0.0), Some(0.0));
        assert_eq!(doc.offset_top(two, 0.0), Some(500.0));
        assert_eq!(doc.offset_top(three, 0.0), Some(1200.0));
        let body = doc.get(doc.body()).expect("body");
        assert!((body.rect.height - 1500.0).abs() < 0.01);
        assert!((doc.get(one).expect("one").rect.width - 800.0).abs() < 0.01);
    }

    #[test]
    fn fixed_element_takes_no_flow_space() {
        let mut doc = Document::new();
        let bar = doc.create_element(Element::Div);
        doc.set_position(bar, Position::Fixed { x: 0.0, y: 0.0 });
        doc.set_sizing(bar, Sizing::Percent(1.0), Sizing::Fixed(50.0));
        let body = doc.body();
        doc.append_child(body, bar);
        let first = section(&mut doc, "first", 100.0);
        doc.layout(viewport());

        assert_eq!(doc.offset_top(first, 0.0), Some(0.0));
        let bar_node = doc.get(bar).expect("bar");
        assert!(bar_node.fixed);
        assert!((bar_node.rect.width - 800.0).abs() < 0.01);
        assert_eq!(doc.offset_top(bar, 250.0), Some(250.0));
    }

    #[test]
    fn row_layout_places_children_left_to_right() {
        let mut doc = Document::new();
        let row = doc.create_element(Element::Div);
        doc.set_display(row, Display::Row);
        let a = doc.create_element(Element::span("aaaa"));
        let b = doc.create_element(Element::span("bb"));
        doc.set_font_size(a, 10.0);
        doc.set_font_size(b, 10.0);
        doc.append_child(row, a);
        doc.append_child(row, b);
        let body = doc.body();
        doc.append_child(body, row);
        doc.layout(viewport());

        let ra = doc.get(a).expect("a").rect;
        let rb = doc.get(b).expect("b").rect;
        assert!(ra.x.abs() < 0.01);
        assert!((rb.x - 24.0).abs() < 0.01);
        assert!((ra.y - rb.y).abs() < 0.01);
    }

    #[test]
    fn hit_test_prefers_fixed_content() {
        let mut doc = Document::new();
        let bar = doc.create_element(Element::Div);
        doc.set_position(bar, Position::Fixed { x: 0.0, y: 0.0 });
        doc.set_sizing(bar, Sizing::Percent(1.0), Sizing::Fixed(50.0));
        let body = doc.body();
        doc.append_child(body, bar);
        let one = section(&mut doc, "One", 1000.0);
        let two = section(&mut doc, "Two", 1000.0);
        doc.layout(viewport());

        assert_eq!(doc.hit_test(10.0, 10.0, 0.0), Some(bar));
        assert_eq!(doc.hit_test(10.0, 10.0, 1500.0), Some(bar));
        assert_eq!(doc.hit_test(10.0, 100.0, 0.0), Some(one));
        assert_eq!(doc.hit_test(10.0, 100.0, 1000.0), Some(two));
        assert_eq!(doc.hit_test(10.0, 100.0, 5000.0), None);
    }

    #[test]
    fn listener_target_walks_up() {
        let mut doc = Document::new();
        let block = doc.create_element(Element::Div);
        let text = doc.create_element(Element::span("One"));
        doc.append_child(block, text);
        assert!(doc.listener_target(text).is_none());

        doc.bind(block, Listener::SectionClick);
        assert_eq!(
            doc.listener_target(text),
            Some((block, Listener::SectionClick))
        );
        assert_eq!(doc.bound_descendants(block), Vec::<NodeId>::new());
    }

    #[test]
    fn rect_contains() {
        let r = Rect {
            x: 10.0,
            y: 10.0,
            width: 20.0,
            height: 5.0,
        };
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 14.9));
        assert!(!r.contains(30.0, 10.0));
        assert!(!r.contains(9.9, 12.0));
    }
}
