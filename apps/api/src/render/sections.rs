//! Section renderers — one function per resume block.
//!
//! Every renderer has the shape `(doc, data, style, cursor) -> cursor`: it
//! reads its slice of the resume, draws into `doc` starting at `cursor`, and
//! returns where the next section should begin. Data is never mutated and no
//! renderer can fail; missing fields leave empty segments in their line.
//!
//! # Pagination
//! Before each experience/education entry, and before each section title, a
//! cursor sitting below `PageGeometry::break_after` moves to the top of a new
//! page. Entries are never split by this rule; a single entry taller than a
//! page overflows past the threshold once and the next entry starts fresh.
//! Experience and education titles also move to the new page when drawing
//! them would leave their first entry below the threshold.

use tracing::trace;

use crate::layout::cursor::{LayoutCursor, MM};
use crate::layout::style::{ColorRole, TemplateStyle};
use crate::layout::text_flow::{draw_text, measure_height};
use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo};
use crate::render::document::{Document, Rect, SectionKind, TextStyle};

// ────────────────────────────────────────────────────────────────────────────
// Vertical rhythm (points)
// ────────────────────────────────────────────────────────────────────────────

/// Between the name and the contact line.
const CONTACT_GAP: f32 = 5.0 * MM;
/// After a whole section.
const SECTION_GAP: f32 = 10.0 * MM;
/// Between a section title (or its rule) and the first line of content.
const TITLE_GAP: f32 = 5.0 * MM;
/// Between the title rule and the title text above it.
const RULE_GAP: f32 = 1.0 * MM;
/// Between an entry title and its date line.
const DATE_GAP: f32 = 2.0 * MM;
/// Between the date line and the description.
const DESCRIPTION_GAP: f32 = 3.0 * MM;
/// After each experience/education entry.
const ENTRY_GAP: f32 = 8.0 * MM;
/// Space kept below the header text inside a filled band.
const BAND_PADDING: f32 = 6.0 * MM;

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

fn text_style(style: &TemplateStyle, role: ColorRole, bold: bool, size: f32) -> TextStyle {
    TextStyle {
        face: if bold {
            style.bold_face()
        } else {
            style.regular_face()
        },
        size,
        color: style.color(role),
    }
}

/// Starts a new page when the cursor has passed the break threshold.
pub fn break_page_if_needed(
    doc: &mut Document,
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let geometry = doc.geometry;
    if !cursor.past_threshold(&geometry) {
        return cursor;
    }
    doc.start_page(style);
    let next = cursor.next_page(&geometry);
    trace!(page = next.page, y = cursor.y, "Page break");
    next
}

/// Like [`break_page_if_needed`], but also breaks when the title itself would
/// push the first entry past the threshold, so a title never ends a page.
fn break_before_entry_section(
    doc: &mut Document,
    style: &TemplateStyle,
    section: SectionKind,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let geometry = doc.geometry;
    let title_height = section_title_height(style, section, geometry.content_width());
    let below_title = cursor.at(cursor.y + title_height);
    if below_title.past_threshold(&geometry) && cursor.y > geometry.margin {
        doc.start_page(style);
        let next = cursor.next_page(&geometry);
        trace!(page = next.page, y = cursor.y, ?section, "Page break before title");
        return next;
    }
    cursor
}

fn title_style(style: &TemplateStyle) -> TextStyle {
    text_style(style, ColorRole::Accent, true, style.font_sizes.section)
}

/// Vertical space `draw_section_title` consumes, including the gap after it.
fn section_title_height(style: &TemplateStyle, section: SectionKind, width: f32) -> f32 {
    let title = section.title().unwrap_or_default();
    let mut height = measure_height(title, width, &title_style(style));
    if let Some(rule) = style.title_rule {
        height += RULE_GAP + rule.width;
    }
    height + TITLE_GAP
}

/// Draws a section title in the accent color, underlined per the template.
fn draw_section_title(
    doc: &mut Document,
    style: &TemplateStyle,
    section: SectionKind,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let geometry = doc.geometry;
    let title = section.title().unwrap_or_default();
    let mut canvas = doc.canvas(cursor.page, section);
    let mut y = draw_text(
        &mut canvas,
        title,
        geometry.margin,
        cursor.y,
        geometry.content_width(),
        title_style(style),
    );

    if let Some(rule) = style.title_rule {
        let rule_y = y + RULE_GAP;
        canvas.hline(
            geometry.margin,
            geometry.width - geometry.margin,
            rule_y,
            rule,
        );
        y = rule_y + rule.width;
    }

    cursor.at(y + TITLE_GAP)
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// Name at the largest size, then the contact line when any field is present.
///
/// Templates with a header background paint a full-width band first, sized
/// to the header content, and switch the text to the light header color.
pub fn render_header(
    doc: &mut Document,
    info: &PersonalInfo,
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let geometry = doc.geometry;
    let width = geometry.content_width();
    let role = style.header_role();
    let name_style = text_style(style, role, true, style.font_sizes.name);
    let contact_style = text_style(style, role, false, style.font_sizes.text);

    let name = info.display_name();
    let contact = info.contact_line();

    let mut canvas = doc.canvas(cursor.page, SectionKind::Header);

    let band_bottom = style.header_background.map(|color| {
        let mut height = measure_height(name, width, &name_style);
        if let Some(contact) = &contact {
            height += CONTACT_GAP + measure_height(contact, width, &contact_style);
        }
        let bottom = cursor.y + height + BAND_PADDING;
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: geometry.width,
                height: bottom,
            },
            color,
        );
        bottom
    });

    let mut y = draw_text(&mut canvas, name, geometry.margin, cursor.y, width, name_style);

    if let Some(contact) = &contact {
        y = draw_text(
            &mut canvas,
            contact,
            geometry.margin,
            y + CONTACT_GAP,
            width,
            contact_style,
        );
    }

    let y = band_bottom.map_or(y, |bottom| bottom.max(y));
    cursor.at(y + SECTION_GAP)
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

pub fn render_summary(
    doc: &mut Document,
    summary: Option<&str>,
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let Some(summary) = summary.map(str::trim).filter(|s| !s.is_empty()) else {
        return cursor;
    };
    let geometry = doc.geometry;

    let cursor = break_page_if_needed(doc, style, cursor);
    let cursor = draw_section_title(doc, style, SectionKind::Summary, cursor);

    let body = text_style(style, ColorRole::Body, false, style.font_sizes.text);
    let y = draw_text(
        &mut doc.canvas(cursor.page, SectionKind::Summary),
        summary,
        geometry.margin,
        cursor.y,
        geometry.content_width(),
        body,
    );

    cursor.at(y + SECTION_GAP)
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn render_experience(
    doc: &mut Document,
    entries: &[ExperienceEntry],
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    if entries.is_empty() {
        return cursor;
    }
    let geometry = doc.geometry;
    let width = geometry.content_width();
    let title_style = text_style(style, ColorRole::Primary, true, style.font_sizes.entry);
    let date_style = text_style(style, ColorRole::Secondary, false, style.font_sizes.text);
    let body = text_style(style, ColorRole::Body, false, style.font_sizes.text);

    let mut cursor = break_before_entry_section(doc, style, SectionKind::Experience, cursor);
    cursor = draw_section_title(doc, style, SectionKind::Experience, cursor);

    for entry in entries {
        cursor = break_page_if_needed(doc, style, cursor);
        let mut canvas = doc.canvas(cursor.page, SectionKind::Experience);

        let mut y = draw_text(
            &mut canvas,
            &entry.title_line(),
            geometry.margin,
            cursor.y,
            width,
            title_style,
        );
        if let Some(dates) = entry.date_line() {
            y = draw_text(&mut canvas, &dates, geometry.margin, y + DATE_GAP, width, date_style);
        }
        if let Some(description) = entry.description() {
            y = draw_text(
                &mut canvas,
                description,
                geometry.margin,
                y + DESCRIPTION_GAP,
                width,
                body,
            );
        }

        cursor = cursor.at(y + ENTRY_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn render_education(
    doc: &mut Document,
    entries: &[EducationEntry],
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    if entries.is_empty() {
        return cursor;
    }
    let geometry = doc.geometry;
    let width = geometry.content_width();
    let title_style = text_style(style, ColorRole::Primary, true, style.font_sizes.entry);
    let date_style = text_style(style, ColorRole::Secondary, false, style.font_sizes.text);

    let mut cursor = break_before_entry_section(doc, style, SectionKind::Education, cursor);
    cursor = draw_section_title(doc, style, SectionKind::Education, cursor);

    for entry in entries {
        cursor = break_page_if_needed(doc, style, cursor);
        let mut canvas = doc.canvas(cursor.page, SectionKind::Education);

        let mut y = draw_text(
            &mut canvas,
            &entry.title_line(),
            geometry.margin,
            cursor.y,
            width,
            title_style,
        );
        if let Some(dates) = entry.date_line() {
            y = draw_text(&mut canvas, &dates, geometry.margin, y + DATE_GAP, width, date_style);
        }

        cursor = cursor.at(y + ENTRY_GAP);
    }

    cursor
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// One comma-separated line (wrapped if long), not individual bullets.
pub fn render_skills(
    doc: &mut Document,
    skills_line: Option<&str>,
    style: &TemplateStyle,
    cursor: LayoutCursor,
) -> LayoutCursor {
    let Some(skills_line) = skills_line.filter(|s| !s.trim().is_empty()) else {
        return cursor;
    };
    let geometry = doc.geometry;

    let cursor = break_page_if_needed(doc, style, cursor);
    let cursor = draw_section_title(doc, style, SectionKind::Skills, cursor);

    let body = text_style(style, ColorRole::Body, false, style.font_sizes.text);
    let y = draw_text(
        &mut doc.canvas(cursor.page, SectionKind::Skills),
        skills_line,
        geometry.margin,
        cursor.y,
        geometry.content_width(),
        body,
    );

    cursor.at(y + SECTION_GAP)
}
