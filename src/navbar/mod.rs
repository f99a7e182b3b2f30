//! Fixed navigation strip for single-page layouts.
//!
//! A `Navbar` renders a title, an optional icon and one block per section.
//! Activating a block smooth-scrolls the page to the element whose id is the
//! section name and reports that name to the configured callback.

mod config;
mod control;
mod layout;
mod render;

pub use config::{
    ConfigError, DEFAULT_CONTAINER_ID, NavbarConfig, NavbarOptions, SectionCallback, SectionOrder,
    validate,
};
pub use control::{Control, Mountable};

use std::time::{Duration, Instant};

use crate::dom::{Document, Listener, NodeId, Theme, UiEvent};
use crate::page::Page;

/// Class on the navbar root element.
pub const ROOT_CLASS: &str = "jean-navbar";
/// Id of the block wrapping the icon image.
pub const ICON_CONTAINER_ID: &str = "navbar-icon";
/// Id of the icon image.
pub const ICON_ID: &str = "icon";
/// Id of the title block.
pub const TITLE_ID: &str = "navbar-title";
/// Class shared by the title and section blocks.
pub const ELEMENT_CLASS: &str = "navbar-element";
/// Class of each section block.
pub const SECTION_CLASS: &str = "navbar-section";
/// Class of the label span inside a section block.
pub const TEXT_CLASS: &str = "text";
/// Prefix turning a section name into its block id.
pub const SECTION_ID_PREFIX: &str = "id-";

/// Block id for a section label: `"id-" + label`.
pub fn section_anchor(label: &str) -> String {
    format!("{SECTION_ID_PREFIX}{label}")
}

/// Section name addressed by a block id, if it carries the prefix.
pub fn section_target(anchor: &str) -> Option<&str> {
    anchor.strip_prefix(SECTION_ID_PREFIX)
}

pub struct Navbar {
    options: NavbarOptions,
    control: Control,
    scroll_duration: Duration,
}

impl Navbar {
    /// Build the navbar tree (detached) from a typed configuration.
    pub fn new(config: NavbarConfig, doc: &mut Document, theme: &Theme) -> Self {
        let options = config.resolve();
        let element = render::render(doc, &options, theme);
        Self {
            control: Control::new(options.container_id.clone(), element),
            options,
            scroll_duration: Duration::from_millis(theme.scroll_duration_ms),
        }
    }

    /// Validate an untyped configuration, then build. Nothing is added to
    /// the document when validation fails.
    pub fn from_value(
        value: &ron::Value,
        doc: &mut Document,
        theme: &Theme,
    ) -> Result<Self, ConfigError> {
        let config = validate(value)?;
        Ok(Self::new(config, doc, theme))
    }

    pub fn options(&self) -> &NavbarOptions {
        &self.options
    }

    /// Root element of this navbar.
    pub fn element(&self) -> NodeId {
        self.control.element()
    }

    /// Block for a section label, if rendered.
    pub fn section_block(&self, doc: &Document, label: &str) -> Option<NodeId> {
        doc.find_by_id(self.element(), &section_anchor(label))
    }

    /// Re-center title, icon and section text. Always returns true.
    pub fn center_elements(&self, doc: &mut Document) -> bool {
        layout::center_elements(doc, self.element())
    }

    /// Handle a routed UI event. Returns true if it targeted one of this
    /// navbar's section blocks.
    pub fn handle_event(&self, page: &mut Page, event: UiEvent, now: Instant) -> bool {
        let UiEvent::Click {
            target,
            listener: Listener::SectionClick,
        } = event;
        if !page.doc.contains(self.element(), target) {
            return false;
        }
        self.on_section_click(page, target, now)
    }

    /// Scroll to the section addressed by `block`, then notify the callback.
    /// The callback runs as soon as the scroll starts, not when it ends.
    fn on_section_click(&self, page: &mut Page, block: NodeId, now: Instant) -> bool {
        let Some(section) = page
            .doc
            .get(block)
            .and_then(|n| n.id.as_deref())
            .and_then(section_target)
            .map(str::to_string)
        else {
            log::warn!("section block without a section id");
            return false;
        };

        page.scroll_to_element(&section, self.scroll_duration, now);
        log::debug!("section {section} activated");
        (self.options.on_section_click)(&section);
        true
    }
}

impl Mountable for Navbar {
    /// Mount into the configured container, then center the elements.
    fn create(&mut self, doc: &mut Document) -> bool {
        let created = self.control.create(doc);
        self.center_elements(doc);
        created
    }
}
