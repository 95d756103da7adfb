//! Document composer — runs the section renderers in fixed order.

use tracing::debug;

use crate::layout::cursor::{LayoutCursor, PageGeometry};
use crate::layout::style::resolve_style;
use crate::models::ResumeData;
use crate::render::document::Document;
use crate::render::sections::{
    render_education, render_experience, render_header, render_skills, render_summary,
};

/// Composes one resume into a complete paginated document on A4.
pub fn compose(data: &ResumeData, template_id: &str) -> Document {
    compose_with_geometry(data, template_id, PageGeometry::a4())
}

/// Same as [`compose`] with explicit page geometry.
///
/// Resolves the style once, starts at the content origin of page 1 and
/// threads the cursor through header → summary → experience → education →
/// skills. The order never depends on content.
pub fn compose_with_geometry(
    data: &ResumeData,
    template_id: &str,
    geometry: PageGeometry,
) -> Document {
    let style = resolve_style(template_id);
    let mut doc = Document::new(style, geometry, data.personal_info.display_name());
    let cursor = LayoutCursor::origin(&geometry);

    let cursor = render_header(&mut doc, &data.personal_info, style, cursor);
    let cursor = render_summary(&mut doc, data.summary(), style, cursor);
    let cursor = render_experience(&mut doc, &data.experience, style, cursor);
    let cursor = render_education(&mut doc, &data.education, style, cursor);
    let cursor = render_skills(&mut doc, data.skills_line().as_deref(), style, cursor);

    debug!(
        template = doc.template_id,
        sections = ?doc.section_order(),
        pages = doc.page_count(),
        final_y = cursor.y,
        "Composed resume document"
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo};
    use crate::render::document::SectionKind;

    fn jane() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: Some("Jane Doe".to_string()),
                email: Some("jane@x.com".to_string()),
                ..Default::default()
            },
            summary: None,
            experience: vec![ExperienceEntry {
                position: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020".to_string(),
                end_date: "Present".to_string(),
                description: Some("Built things".to_string()),
            }],
            education: vec![],
            skills: vec!["Go".to_string(), "SQL".to_string()],
        }
    }

    #[test]
    fn test_end_to_end_single_page_resume() {
        let doc = compose(&jane(), "modern");

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.template_id, "modern");
        assert_eq!(
            doc.section_text(SectionKind::Header),
            vec!["Jane Doe", "jane@x.com"]
        );
        assert_eq!(
            doc.section_text(SectionKind::Experience),
            vec!["Experience", "Engineer at Acme", "2020 - Present", "Built things"]
        );
        assert_eq!(doc.section_text(SectionKind::Skills), vec!["Skills", "Go, SQL"]);
        assert_eq!(
            doc.section_order(),
            vec![SectionKind::Header, SectionKind::Experience, SectionKind::Skills]
        );
    }

    #[test]
    fn test_empty_resume_renders_header_only() {
        let data = ResumeData {
            summary: Some(String::new()),
            ..Default::default()
        };
        for template in ["modern", "executive", "bold", "nope"] {
            let doc = compose(&data, template);
            assert_eq!(doc.section_order(), vec![SectionKind::Header], "{template}");
            assert_eq!(doc.page_count(), 1);
        }
    }

    #[test]
    fn test_section_order_is_fixed() {
        let mut data = jane();
        data.summary = Some("Pragmatic engineer.".to_string());
        data.education = vec![EducationEntry {
            degree: "BSc".to_string(),
            institution: "MIT".to_string(),
            start_date: "2016".to_string(),
            end_date: "2020".to_string(),
        }];
        let doc = compose(&data, "tech");
        assert_eq!(doc.section_order(), SectionKind::ORDER.to_vec());
    }

    #[test]
    fn test_long_experience_list_spans_pages() {
        let mut data = jane();
        data.experience = (0..30)
            .map(|i| ExperienceEntry {
                position: format!("Engineer {i}"),
                company: "Acme".to_string(),
                start_date: "2010".to_string(),
                end_date: "2012".to_string(),
                description: Some("Designed and operated services for payments. ".repeat(3)),
            })
            .collect();
        let doc = compose(&data, "professional");

        assert!(doc.page_count() > 1);
        for i in 0..30 {
            assert_eq!(
                doc.pages_containing(&format!("Engineer {i} at Acme")).len(),
                1
            );
        }
        // Skills still come last, after the final experience entry.
        let skills_page = doc.pages_containing("Go, SQL")[0];
        let last_entry_page = doc.pages_containing("Engineer 29 at Acme")[0];
        assert!(skills_page >= last_entry_page);
    }

    #[test]
    fn test_compose_does_not_mutate_input() {
        let data = jane();
        let before = data.clone();
        let _ = compose(&data, "creative");
        assert_eq!(data, before);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let data = jane();
        let a = compose(&data, "elegant");
        let b = compose(&data, "elegant");
        assert_eq!(a.pages(), b.pages());
    }
}
