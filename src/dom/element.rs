use super::Size;

/// Flat enum element identity.
/// Closed set: the host page only needs these kinds. No trait objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Document body. Exactly one per document, created by `Document::new`.
    Body,

    /// Generic block container.
    Div,

    /// Page section: a scroll target or a mount container.
    Section,

    /// Inline text run.
    Span { text: String },

    /// Image reference. `natural` is the intrinsic pixel size once probed;
    /// `None` renders with zero height.
    Img { src: String, natural: Option<Size> },
}

impl Element {
    pub fn span(text: impl Into<String>) -> Self {
        Element::Span { text: text.into() }
    }

    pub fn img(src: impl Into<String>, natural: Option<Size>) -> Self {
        Element::Img {
            src: src.into(),
            natural,
        }
    }
}

/// How an element arranges its in-flow children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    /// Children stacked top-to-bottom.
    #[default]
    Block,
    /// Children laid out left-to-right, top-aligned.
    Row,
}

/// Action bound to an element. Input routing reports the nearest bound
/// ancestor of the hit element; the owning widget decides what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// Navbar section block: scroll to the matching page section.
    SectionClick,
}
