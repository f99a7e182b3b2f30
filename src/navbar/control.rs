use crate::dom::{Document, Element, NodeId};

/// Something that can attach its element tree to a host document.
pub trait Mountable {
    /// Attach to the document. Returns whether the root ended up attached.
    fn create(&mut self, doc: &mut Document) -> bool;
}

/// Base mount behavior: an element tree and the id of the host container
/// it belongs in. Widgets compose a `Control` and layer their own steps
/// around its `create`.
#[derive(Debug, Clone)]
pub struct Control {
    container_id: String,
    element: NodeId,
}

impl Control {
    pub fn new(container_id: impl Into<String>, element: NodeId) -> Self {
        Self {
            container_id: container_id.into(),
            element,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }
}

impl Mountable for Control {
    /// Append the element to the container with `container_id`. When no
    /// such element is attached, a `<section>` with that id is appended to
    /// the body first. Mounting again moves the element to the end of
    /// its container.
    fn create(&mut self, doc: &mut Document) -> bool {
        let container = match doc.get_element_by_id(&self.container_id) {
            Some(existing) => existing,
            None => {
                log::debug!("container #{} not found, inserting into body", self.container_id);
                let section = doc.create_element(Element::Section);
                doc.set_id(section, self.container_id.clone());
                let body = doc.body();
                doc.append_child(body, section);
                section
            }
        };
        doc.append_child(container, self.element);
        doc.is_attached(self.element)
    }
}
