use serde::Deserialize;

use super::{Edges, TextMetrics};

/// Centralized visual constants for the navbar and its host page.
///
/// Loaded from RON with `#[serde(default)]`, so a theme file only needs
/// the fields it overrides. Widgets read from Theme at construction time
/// instead of hardcoding sizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    // -- Fonts --
    /// Title font size in pixels.
    pub title_font_size: f32,
    /// Section label font size in pixels.
    pub section_font_size: f32,
    /// Approximate font metrics used by measurement.
    pub metrics: TextMetrics,

    // -- Bar --
    /// Padding inside the bar container.
    pub bar_padding: Edges,
    /// Padding around the title block.
    pub title_padding: Edges,
    /// Padding around each section block.
    pub section_padding: Edges,
    /// Margin around the icon block.
    pub icon_margin: Edges,

    // -- Scrolling --
    /// Duration of the section scroll animation in milliseconds.
    pub scroll_duration_ms: u64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_font_size: 24.0,
            section_font_size: 14.0,
            metrics: TextMetrics::default(),

            bar_padding: Edges::symmetric(0.0, 16.0),
            title_padding: Edges::symmetric(8.0, 12.0),
            section_padding: Edges::symmetric(0.0, 12.0),
            icon_margin: Edges::symmetric(0.0, 8.0),

            scroll_duration_ms: 250,
        }
    }
}
