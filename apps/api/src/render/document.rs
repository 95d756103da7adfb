//! In-memory paginated document produced by the composer.
//!
//! Pages hold flat lists of draw operations in top-down point coordinates.
//! Every operation is tagged with the resume section that emitted it, which
//! lets callers (and tests) recover section order without parsing a PDF.

use serde::Serialize;

use crate::layout::cursor::PageGeometry;
use crate::layout::font_metrics::FontFace;
use crate::layout::style::{Rgb, RuleStyle, TemplateStyle};

/// Logical resume block, in fixed render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 5] = [
        SectionKind::Header,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
    ];

    /// Heading text drawn above the section. The header has none.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            SectionKind::Header => None,
            SectionKind::Summary => Some("Professional Summary"),
            SectionKind::Experience => Some("Experience"),
            SectionKind::Education => Some("Education"),
            SectionKind::Skills => Some("Skills"),
        }
    }
}

/// Face, size and color of a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextRun),
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, rule: RuleStyle },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, rule: RuleStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    /// `None` for page furniture such as borders.
    pub section: Option<SectionKind>,
    pub shape: Shape,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl Page {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match &op.shape {
            Shape::Text(run) => Some(run),
            _ => None,
        })
    }
}

/// A composed resume: one or more pages plus the template it was drawn with.
#[derive(Debug, Clone)]
pub struct Document {
    pub template_id: &'static str,
    pub title: String,
    pub geometry: PageGeometry,
    pages: Vec<Page>,
}

impl Document {
    /// Creates a document with its first page already started.
    pub fn new(style: &TemplateStyle, geometry: PageGeometry, title: impl Into<String>) -> Self {
        let mut doc = Self {
            template_id: style.id,
            title: title.into(),
            geometry,
            pages: Vec::new(),
        };
        doc.start_page(style);
        doc
    }

    /// Appends a page and draws the template's page furniture on it.
    /// Returns the new page index.
    pub fn start_page(&mut self, style: &TemplateStyle) -> usize {
        let mut page = Page::default();
        if let Some(rule) = style.page_border {
            let inset = self.geometry.margin / 2.0;
            page.ops.push(DrawOp {
                section: None,
                shape: Shape::StrokeRect {
                    rect: Rect {
                        x: inset,
                        y: inset,
                        width: self.geometry.width - 2.0 * inset,
                        height: self.geometry.height - 2.0 * inset,
                    },
                    rule,
                },
            });
        }
        self.pages.push(page);
        self.pages.len() - 1
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Drawing surface for one section on one page.
    ///
    /// # Panics
    /// If `page` has not been created with `start_page`.
    pub fn canvas(&mut self, page: usize, section: SectionKind) -> Canvas<'_> {
        Canvas {
            page: &mut self.pages[page],
            section,
        }
    }

    /// Sections in the order their first operation appears.
    pub fn section_order(&self) -> Vec<SectionKind> {
        let mut order = Vec::new();
        for op in self.pages.iter().flat_map(|p| p.ops.iter()) {
            if let Some(section) = op.section {
                if !order.contains(&section) {
                    order.push(section);
                }
            }
        }
        order
    }
}

#[cfg(test)]
impl Document {
    /// All text runs, page by page, with their page index.
    pub fn text_runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.text_runs().map(move |r| (i, r)))
    }

    /// Text runs emitted by one section, in draw order.
    pub fn section_text(&self, section: SectionKind) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter(|op| op.section == Some(section))
            .filter_map(|op| match &op.shape {
                Shape::Text(run) => Some(run.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pages on which a line with exactly this text was drawn.
    pub fn pages_containing(&self, text: &str) -> Vec<usize> {
        let mut pages: Vec<usize> = self
            .text_runs()
            .filter(|(_, r)| r.text == text)
            .map(|(i, _)| i)
            .collect();
        pages.dedup();
        pages
    }
}

/// Borrowed drawing surface that tags everything it draws with a section.
pub struct Canvas<'a> {
    page: &'a mut Page,
    section: SectionKind,
}

impl Canvas<'_> {
    fn push(&mut self, shape: Shape) {
        self.page.ops.push(DrawOp {
            section: Some(self.section),
            shape,
        });
    }

    pub fn text(&mut self, x: f32, baseline: f32, text: impl Into<String>, style: TextStyle) {
        self.push(Shape::Text(TextRun {
            x,
            baseline,
            text: text.into(),
            style,
        }));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.push(Shape::FillRect { rect, color });
    }

    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, rule: RuleStyle) {
        self.push(Shape::Line {
            x1,
            y1: y,
            x2,
            y2: y,
            rule,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::style::resolve_style;

    #[test]
    fn test_new_document_has_one_page() {
        let doc = Document::new(resolve_style("modern"), PageGeometry::a4(), "cv");
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages()[0].ops.is_empty());
    }

    #[test]
    fn test_bordered_template_frames_every_page() {
        let style = resolve_style("bold");
        let mut doc = Document::new(style, PageGeometry::a4(), "cv");
        doc.start_page(style);
        for page in doc.pages() {
            assert!(matches!(
                page.ops.first().map(|op| &op.shape),
                Some(Shape::StrokeRect { .. })
            ));
        }
        assert!(doc.section_order().is_empty());
    }

    #[test]
    fn test_section_order_follows_first_appearance() {
        let style = resolve_style("modern");
        let mut doc = Document::new(style, PageGeometry::a4(), "cv");
        let text = TextStyle {
            face: style.regular_face(),
            size: 10.0,
            color: style.body,
        };
        doc.canvas(0, SectionKind::Header).text(0.0, 10.0, "Ann", text);
        doc.canvas(0, SectionKind::Skills).text(0.0, 20.0, "Go", text);
        doc.canvas(0, SectionKind::Header).text(0.0, 30.0, "late", text);
        assert_eq!(
            doc.section_order(),
            vec![SectionKind::Header, SectionKind::Skills]
        );
        assert_eq!(doc.section_text(SectionKind::Header), vec!["Ann", "late"]);
        assert_eq!(doc.pages_containing("Go"), vec![0]);
    }

    #[test]
    #[should_panic]
    fn test_canvas_requires_started_page() {
        let mut doc = Document::new(resolve_style("modern"), PageGeometry::a4(), "cv");
        doc.canvas(1, SectionKind::Summary);
    }
}
