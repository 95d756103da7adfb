//! Page geometry and the running write position.
//!
//! All coordinates are PDF points measured from the top-left corner of the
//! page, y growing downwards. The exporter flips y when writing content
//! streams.

use serde::Serialize;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Fixed page dimensions for one render. A4 with 20 mm margins by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Entries starting below this offset move to a new page.
    pub break_after: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: 210.0 * MM,
            height: 297.0 * MM,
            margin: 20.0 * MM,
            break_after: 250.0 * MM,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Current page and vertical offset. Threaded by value through every
/// section renderer; never shared between documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f32,
}

impl LayoutCursor {
    /// Top-left content origin of the first page.
    pub fn origin(geometry: &PageGeometry) -> Self {
        Self {
            page: 0,
            y: geometry.margin,
        }
    }

    pub fn at(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Top of the following page.
    pub fn next_page(self, geometry: &PageGeometry) -> Self {
        Self {
            page: self.page + 1,
            y: geometry.margin,
        }
    }

    pub fn past_threshold(&self, geometry: &PageGeometry) -> bool {
        self.y > geometry.break_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions_in_points() {
        let g = PageGeometry::a4();
        assert!((g.width - 595.28).abs() < 0.01);
        assert!((g.height - 841.89).abs() < 0.01);
        assert!(g.break_after < g.height - g.margin);
    }

    #[test]
    fn test_next_page_resets_to_top_margin() {
        let g = PageGeometry::a4();
        let c = LayoutCursor::origin(&g).at(500.0).next_page(&g);
        assert_eq!(c.page, 1);
        assert_eq!(c.y, g.margin);
    }

    #[test]
    fn test_past_threshold_is_strict() {
        let g = PageGeometry::a4();
        let c = LayoutCursor::origin(&g).at(g.break_after);
        assert!(!c.past_threshold(&g));
        assert!(c.at(g.break_after + 0.1).past_threshold(&g));
    }
}
