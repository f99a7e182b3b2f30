use super::{ICON_CONTAINER_ID, ICON_ID, TEXT_CLASS, TITLE_ID};
use crate::dom::{Document, NodeId, Sizing};

/// Vertically center section text and the icon against the title height.
///
/// The title is the tallest element in the row and sets the reference
/// height. Idempotent; works on detached trees. Always returns true.
pub(crate) fn center_elements(doc: &mut Document, root: NodeId) -> bool {
    let title_height = doc
        .find_by_id(root, TITLE_ID)
        .map_or(0.0, |title| doc.rendered_height(title));

    for text in doc.find_by_class(root, TEXT_CLASS) {
        doc.set_line_height(text, title_height);
    }

    if let Some(container) = doc.find_by_id(root, ICON_CONTAINER_ID) {
        doc.set_height(container, Sizing::Fixed(title_height));
        if let Some(icon) = doc.find_by_id(container, ICON_ID) {
            // Unclamped: an icon taller than the title gets a negative offset.
            let icon_height = doc.rendered_height(icon);
            doc.set_margin_top(icon, (title_height - icon_height) / 2.0);
        }
    }

    true
}
