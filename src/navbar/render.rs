use super::config::{NavbarOptions, SectionOrder};
use super::{
    ELEMENT_CLASS, ICON_CONTAINER_ID, ICON_ID, ROOT_CLASS, SECTION_CLASS, TEXT_CLASS, TITLE_ID,
    section_anchor,
};
use crate::assets;
use crate::dom::{Display, Document, Element, Listener, NodeId, Position, Sizing, Theme};

/// Build the detached navbar tree: optional icon, title, then one block per
/// section. Returns the root element.
pub(crate) fn render(doc: &mut Document, options: &NavbarOptions, theme: &Theme) -> NodeId {
    let root = doc.create_element(Element::Div);
    doc.add_class(root, ROOT_CLASS);
    doc.set_display(root, Display::Row);
    doc.set_position(root, Position::Fixed { x: 0.0, y: 0.0 });
    doc.set_sizing(root, Sizing::Percent(1.0), Sizing::Fit);
    doc.set_padding(root, theme.bar_padding);

    if !options.icon.is_empty() {
        let container = doc.create_element(Element::Div);
        doc.set_id(container, ICON_CONTAINER_ID);
        doc.set_margin(container, theme.icon_margin);

        let natural = assets::probe_image_size(&options.icon);
        let img = doc.create_element(Element::img(&options.icon, natural));
        doc.set_id(img, ICON_ID);
        doc.append_child(container, img);
        doc.append_child(root, container);
    }

    let title = doc.create_element(Element::span(&options.title));
    doc.set_id(title, TITLE_ID);
    doc.add_class(title, ELEMENT_CLASS);
    doc.set_font_size(title, theme.title_font_size);
    doc.set_padding(title, theme.title_padding);
    doc.append_child(root, title);

    // Walk sections last to first. Input order inserts each block right
    // after the title, which undoes the reversal; Legacy appends.
    let first_section = doc.children(root).len();
    for label in options.sections.iter().rev() {
        let block = section_block(doc, label, theme);
        match options.section_order {
            SectionOrder::Input => doc.insert_child(root, first_section, block),
            SectionOrder::Legacy => doc.append_child(root, block),
        }
    }

    log::debug!(
        "rendered navbar {:?} with {} sections",
        options.title,
        options.sections.len()
    );
    root
}

fn section_block(doc: &mut Document, label: &str, theme: &Theme) -> NodeId {
    let block = doc.create_element(Element::Div);
    doc.set_id(block, section_anchor(label));
    doc.add_class(block, ELEMENT_CLASS);
    doc.add_class(block, SECTION_CLASS);
    doc.set_padding(block, theme.section_padding);

    let text = doc.create_element(Element::span(label));
    doc.add_class(text, TEXT_CLASS);
    doc.set_font_size(text, theme.section_font_size);
    doc.append_child(block, text);

    doc.bind(block, Listener::SectionClick);
    block
}

#[cfg(test)]
mod tests {
    use super::super::config::NavbarConfig;
    use super::*;

    fn block_ids(doc: &Document, root: NodeId) -> Vec<String> {
        doc.find_by_class(root, SECTION_CLASS)
            .into_iter()
            .filter_map(|id| doc.get(id).and_then(|n| n.id.clone()))
            .collect()
    }

    #[test]
    fn title_only_tree() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test").resolve();
        let root = render(&mut doc, &options, &Theme::default());

        assert!(!doc.is_attached(root));
        assert!(doc.get(root).expect("root").has_class(ROOT_CLASS));
        assert_eq!(doc.children(root).len(), 1);
        let title = doc.find_by_id(root, TITLE_ID).expect("title");
        assert_eq!(doc.text_content(title), "Test");
        assert!(doc.find_by_id(root, ICON_CONTAINER_ID).is_none());
    }

    #[test]
    fn icon_block_precedes_title() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test").icon("missing.ico").resolve();
        let root = render(&mut doc, &options, &Theme::default());

        let children = doc.children(root);
        assert_eq!(children.len(), 2);
        assert_eq!(
            doc.get(children[0]).and_then(|n| n.id.as_deref()),
            Some(ICON_CONTAINER_ID)
        );
        let img = doc.find_by_id(children[0], ICON_ID).expect("image");
        match &doc.get(img).expect("img").element {
            Element::Img { src, natural } => {
                assert_eq!(src, "missing.ico");
                assert!(natural.is_none());
            }
            other => panic!("expected img, got {other:?}"),
        }
    }

    #[test]
    fn empty_icon_means_no_icon() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test").icon("").resolve();
        let root = render(&mut doc, &options, &Theme::default());
        assert!(doc.find_by_id(root, ICON_CONTAINER_ID).is_none());
    }

    #[test]
    fn input_order_matches_sections() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test")
            .sections(["One", "Two", "Three"])
            .resolve();
        let root = render(&mut doc, &options, &Theme::default());
        assert_eq!(block_ids(&doc, root), vec!["id-One", "id-Two", "id-Three"]);
    }

    #[test]
    fn legacy_order_is_reversed() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test")
            .sections(["One", "Two", "Three"])
            .section_order(SectionOrder::Legacy)
            .resolve();
        let root = render(&mut doc, &options, &Theme::default());
        assert_eq!(block_ids(&doc, root), vec!["id-Three", "id-Two", "id-One"]);
    }

    #[test]
    fn section_blocks_are_bound_and_labelled() {
        let mut doc = Document::new();
        let options = NavbarConfig::new("Test").sections(["One"]).resolve();
        let root = render(&mut doc, &options, &Theme::default());

        let block = doc.find_by_id(root, "id-One").expect("block");
        let node = doc.get(block).expect("node");
        assert_eq!(node.listener, Some(Listener::SectionClick));
        assert!(node.has_class(ELEMENT_CLASS));
        let texts = doc.find_by_class(block, TEXT_CLASS);
        assert_eq!(texts.len(), 1);
        assert_eq!(doc.text_content(texts[0]), "One");
    }
}
