//! Analysis report model and its conversion into a printable resume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeData};

/// Template the report is exported with.
pub const REPORT_TEMPLATE_ID: &str = "analysis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisScores {
    pub overall: u32,
    pub formatting: u32,
    pub content: u32,
    pub keywords: u32,
    pub structure: u32,
    pub ats_compatibility: u32,
}

impl AnalysisScores {
    /// Every score except `overall`, with a display label.
    pub fn breakdown(&self) -> [(&'static str, u32); 5] {
        [
            ("Formatting", self.formatting),
            ("Content", self.content),
            ("Keywords", self.keywords),
            ("Structure", self.structure),
            ("ATS Compatibility", self.ats_compatibility),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionCategory {
    pub category: String,
    #[serde(rename = "type")]
    pub priority: Priority,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub recommended: Vec<String>,
}

/// Full report returned by an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: String,
    pub scores: AnalysisScores,
    pub suggestions: Vec<SuggestionCategory>,
    pub keyword_analysis: KeywordAnalysis,
    pub overall_feedback: String,
    /// Which analyzer produced the report.
    #[serde(default)]
    pub analyzer_backend: String,
}

/// Download name (without extension) for a report exported on `date`.
pub fn report_filename(date: NaiveDate) -> String {
    format!("resume-analysis-{}", date.format("%Y-%m-%d"))
}

/// Maps a report onto the resume model so it prints through the normal composer.
///
/// - header: report title, with date, overall score and origin on the contact line
/// - summary: overall feedback
/// - experience: one entry per suggestion category, items as bullet lines
/// - education: one entry per score in the breakdown
/// - skills: keyword tags
pub fn report_to_resume(report: &AnalysisReport, date: NaiveDate) -> ResumeData {
    let experience = report
        .suggestions
        .iter()
        .map(|s| ExperienceEntry {
            position: s.category.clone(),
            company: format!("Priority: {}", s.priority.label()),
            start_date: String::new(),
            end_date: String::new(),
            description: Some(
                s.items
                    .iter()
                    .map(|item| format!("• {item}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        })
        .collect();

    let education = report
        .scores
        .breakdown()
        .into_iter()
        .map(|(label, score)| EducationEntry {
            degree: label.to_string(),
            institution: format!("{score}/100"),
            start_date: String::new(),
            end_date: String::new(),
        })
        .collect();

    let keywords = &report.keyword_analysis;
    let skills = keywords
        .found
        .iter()
        .map(|k| format!("Found: {k}"))
        .chain(keywords.missing.iter().map(|k| format!("Missing: {k}")))
        .chain(keywords.recommended.iter().map(|k| format!("Recommended: {k}")))
        .collect();

    ResumeData {
        personal_info: PersonalInfo {
            full_name: Some(format!("Resume Analysis Report - {}", report.file_name)),
            email: Some(format!("Analysis Date: {}", date.format("%Y-%m-%d"))),
            phone: Some(format!("Overall Score: {}/100", report.scores.overall)),
            location: Some("Generated by Resume Analyzer".to_string()),
        },
        summary: Some(report.overall_feedback.clone()),
        experience,
        education,
        skills,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::compose;
    use crate::render::document::SectionKind;

    fn report() -> AnalysisReport {
        AnalysisReport {
            file_name: "cv.pdf".to_string(),
            scores: AnalysisScores {
                overall: 82,
                formatting: 90,
                content: 70,
                keywords: 60,
                structure: 80,
                ats_compatibility: 75,
            },
            suggestions: vec![SuggestionCategory {
                category: "Content Enhancement".to_string(),
                priority: Priority::High,
                items: vec!["Add metrics".to_string(), "Add certifications".to_string()],
            }],
            keyword_analysis: KeywordAnalysis {
                found: vec!["Rust".to_string()],
                missing: vec!["AWS".to_string()],
                recommended: vec!["DevOps".to_string()],
            },
            overall_feedback: "Solid.".to_string(),
            analyzer_backend: "randomized".to_string(),
        }
    }

    #[test]
    fn test_report_maps_to_resume_sections() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let data = report_to_resume(&report(), date);

        assert_eq!(
            data.personal_info.full_name.as_deref(),
            Some("Resume Analysis Report - cv.pdf")
        );
        assert_eq!(data.personal_info.email.as_deref(), Some("Analysis Date: 2026-03-01"));
        assert_eq!(data.personal_info.phone.as_deref(), Some("Overall Score: 82/100"));
        assert_eq!(data.experience[0].company, "Priority: HIGH");
        assert_eq!(
            data.experience[0].description.as_deref(),
            Some("• Add metrics\n• Add certifications")
        );
        assert_eq!(data.education.len(), 5);
        assert_eq!(data.education[0].title_line(), "Formatting - 90/100");
        assert_eq!(data.skills, vec!["Found: Rust", "Missing: AWS", "Recommended: DevOps"]);
    }

    #[test]
    fn test_report_prints_through_composer() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let doc = compose(&report_to_resume(&report(), date), REPORT_TEMPLATE_ID);
        assert_eq!(doc.template_id, REPORT_TEMPLATE_ID);
        assert_eq!(doc.section_order(), SectionKind::ORDER.to_vec());
        // Blank dates leave no date line.
        assert!(!doc
            .section_text(SectionKind::Experience)
            .iter()
            .any(|t| t.trim() == "-"));
    }

    #[test]
    fn test_report_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(report_filename(date), "resume-analysis-2026-10-18");
    }

    #[test]
    fn test_report_json_uses_front_end_field_names() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["fileName"], "cv.pdf");
        assert_eq!(json["scores"]["atsCompatibility"], 75);
        assert_eq!(json["suggestions"][0]["type"], "high");
        assert_eq!(json["keywordAnalysis"]["missing"][0], "AWS");
    }
}
