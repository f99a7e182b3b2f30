use super::{Document, Listener, NodeId};

/// Mouse button identifier (decoupled from any windowing backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the page reacts to (decoupled from any windowing backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Space,
}

/// UI events produced by input routing, consumed by the owning widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A bound element was activated. `target` is the element carrying the
    /// listener, not necessarily the innermost element under the cursor.
    Click { target: NodeId, listener: Listener },
}

/// Pointer and keyboard interaction state for one page.
#[derive(Debug, Default)]
pub struct InputState {
    /// Bound element receiving keyboard activation (Tab to cycle).
    pub focused: Option<NodeId>,
    /// Bound element being pressed (mouse down, not yet released).
    pressed: Option<NodeId>,
    /// Mouse button that initiated the press.
    pressed_button: Option<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle mouse button press/release. A click is a left press and
    /// release over the same bound element.
    pub fn handle_mouse_input(
        &mut self,
        doc: &Document,
        button: MouseButton,
        pressed: bool,
        x: f32,
        y: f32,
        scroll_top: f32,
    ) -> Option<UiEvent> {
        let bound = doc
            .hit_test(x, y, scroll_top)
            .and_then(|hit| doc.listener_target(hit));

        if pressed {
            self.pressed = bound.map(|(target, _)| target);
            self.pressed_button = Some(button);
            if button == MouseButton::Left {
                // Pressing outside any bound element clears focus.
                self.focused = self.pressed;
            }
            return None;
        }

        let was_pressed = self.pressed.take();
        let was_button = self.pressed_button.take();
        match (bound, was_pressed, was_button) {
            (Some((target, listener)), Some(pressed_id), Some(MouseButton::Left))
                if target == pressed_id =>
            {
                Some(UiEvent::Click { target, listener })
            }
            _ => None,
        }
    }

    /// Handle a key press. Tab cycles focus through bound elements in
    /// document order; Enter and Space activate the focused one.
    pub fn handle_key(&mut self, doc: &Document, key: Key) -> Option<UiEvent> {
        match key {
            Key::Tab => {
                let focusable = doc.bound_descendants(doc.body());
                self.focused = match self.focused {
                    _ if focusable.is_empty() => None,
                    None => Some(focusable[0]),
                    Some(current) => match focusable.iter().position(|&id| id == current) {
                        Some(idx) => Some(focusable[(idx + 1) % focusable.len()]),
                        None => Some(focusable[0]),
                    },
                };
                None
            }
            Key::Enter | Key::Space => {
                let focused = self.focused?;
                if !doc.is_attached(focused) {
                    self.focused = None;
                    return None;
                }
                self.click(doc, focused)
            }
        }
    }

    /// Programmatic activation, as if `node` had been clicked.
    pub fn click(&self, doc: &Document, node: NodeId) -> Option<UiEvent> {
        doc.listener_target(node)
            .map(|(target, listener)| UiEvent::Click { target, listener })
    }
}
