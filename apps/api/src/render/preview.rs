//! Preview renderer — the on-screen counterpart of the composer.
//!
//! Produces a serializable tree the front-end draws as a scrolling card. It
//! applies the same omission rules and section order as the composer and
//! takes every color from the same `TemplateStyle`, so a role that is
//! `secondary` in the PDF is `secondary` on screen. There is no pagination.

use serde::Serialize;

use crate::layout::font_metrics::FontFamily;
use crate::layout::style::{resolve_style, ColorRole, TemplateStyle};
use crate::models::ResumeData;
use crate::render::document::SectionKind;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTree {
    pub template_id: &'static str,
    pub palette: Palette,
    pub sections: Vec<PreviewSection>,
}

/// Resolved colors, as hex strings, for the surrounding card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub body: String,
    pub header_text: String,
    pub header_background: Option<String>,
    pub title_rule: Option<String>,
    pub page_border: Option<String>,
    pub family: FontFamily,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSection {
    pub kind: SectionKind,
    pub title: Option<PreviewText>,
    pub blocks: Vec<PreviewBlock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PreviewBlock {
    Text {
        text: PreviewText,
    },
    Entry {
        title: PreviewText,
        dates: Option<PreviewText>,
        description: Option<PreviewText>,
    },
    Tags {
        items: Vec<PreviewText>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewText {
    pub text: String,
    pub role: ColorRole,
    pub color: String,
    pub size: f32,
    pub bold: bool,
}

fn styled(style: &TemplateStyle, text: impl Into<String>, role: ColorRole, size: f32, bold: bool) -> PreviewText {
    PreviewText {
        text: text.into(),
        role,
        color: style.color(role).hex(),
        size,
        bold,
    }
}

fn section_title(style: &TemplateStyle, kind: SectionKind) -> Option<PreviewText> {
    kind.title()
        .map(|t| styled(style, t, ColorRole::Accent, style.font_sizes.section, true))
}

/// Builds the preview tree for one resume.
pub fn render_preview(data: &ResumeData, template_id: &str) -> PreviewTree {
    let style = resolve_style(template_id);
    let sizes = style.font_sizes;
    let mut sections = Vec::with_capacity(SectionKind::ORDER.len());

    // Header
    let header_role = style.header_role();
    let mut header_blocks = vec![PreviewBlock::Text {
        text: styled(style, data.personal_info.display_name(), header_role, sizes.name, true),
    }];
    if let Some(contact) = data.personal_info.contact_line() {
        header_blocks.push(PreviewBlock::Text {
            text: styled(style, contact, header_role, sizes.text, false),
        });
    }
    sections.push(PreviewSection {
        kind: SectionKind::Header,
        title: None,
        blocks: header_blocks,
    });

    if let Some(summary) = data.summary() {
        sections.push(PreviewSection {
            kind: SectionKind::Summary,
            title: section_title(style, SectionKind::Summary),
            blocks: vec![PreviewBlock::Text {
                text: styled(style, summary, ColorRole::Body, sizes.text, false),
            }],
        });
    }

    if !data.experience.is_empty() {
        let blocks = data
            .experience
            .iter()
            .map(|e| PreviewBlock::Entry {
                title: styled(style, e.title_line(), ColorRole::Primary, sizes.entry, true),
                dates: e
                    .date_line()
                    .map(|d| styled(style, d, ColorRole::Secondary, sizes.text, false)),
                description: e
                    .description()
                    .map(|d| styled(style, d, ColorRole::Body, sizes.text, false)),
            })
            .collect();
        sections.push(PreviewSection {
            kind: SectionKind::Experience,
            title: section_title(style, SectionKind::Experience),
            blocks,
        });
    }

    if !data.education.is_empty() {
        let blocks = data
            .education
            .iter()
            .map(|e| PreviewBlock::Entry {
                title: styled(style, e.title_line(), ColorRole::Primary, sizes.entry, true),
                dates: e
                    .date_line()
                    .map(|d| styled(style, d, ColorRole::Secondary, sizes.text, false)),
                description: None,
            })
            .collect();
        sections.push(PreviewSection {
            kind: SectionKind::Education,
            title: section_title(style, SectionKind::Education),
            blocks,
        });
    }

    let skills = data.skills();
    if !skills.is_empty() {
        sections.push(PreviewSection {
            kind: SectionKind::Skills,
            title: section_title(style, SectionKind::Skills),
            blocks: vec![PreviewBlock::Tags {
                items: skills
                    .into_iter()
                    .map(|s| styled(style, s, ColorRole::Body, sizes.text, false))
                    .collect(),
            }],
        });
    }

    PreviewTree {
        template_id: style.id,
        palette: Palette {
            primary: style.primary.hex(),
            secondary: style.secondary.hex(),
            accent: style.accent.hex(),
            body: style.body.hex(),
            header_text: style.header_text.hex(),
            header_background: style.header_background.map(|c| c.hex()),
            title_rule: style.title_rule.map(|r| r.color.hex()),
            page_border: style.page_border.map(|r| r.color.hex()),
            family: style.family,
        },
        sections,
    }
}

#[cfg(test)]
impl PreviewTree {
    pub fn section_order(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}
