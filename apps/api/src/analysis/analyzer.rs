//! Resume analyzer — pluggable, trait-based scorer for uploaded documents.
//!
//! Default: `RandomizedAnalyzer`, which returns plausible scores drawn from
//! fixed ranges plus a canned suggestion catalog. It never reads the upload's
//! contents. A real implementation can replace it behind the same trait.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::analysis::report::{
    AnalysisReport, AnalysisScores, KeywordAnalysis, Priority, SuggestionCategory,
};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Please select a PDF file.")]
    NotPdf { file_name: String },

    #[error("Uploaded file is empty")]
    Empty,
}

/// A file received from the upload form.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedResume {
    /// Accepts `application/pdf` uploads, or any upload whose name ends in `.pdf`.
    pub fn validate(&self) -> Result<(), AnalyzeError> {
        let is_pdf_type = self
            .content_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("application/pdf"));
        let is_pdf_name = self.file_name.to_ascii_lowercase().ends_with(".pdf");

        if !is_pdf_type && !is_pdf_name {
            return Err(AnalyzeError::NotPdf {
                file_name: self.file_name.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(AnalyzeError::Empty);
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap analyzer backends without touching the handlers.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, upload: &UploadedResume) -> Result<AnalysisReport, AnalyzeError>;
}

// ────────────────────────────────────────────────────────────────────────────
// RandomizedAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Scores drawn uniformly from per-dimension ranges.
///
/// | score             | range  |
/// |-------------------|--------|
/// | overall           | 70–99  |
/// | formatting        | 80–99  |
/// | content           | 65–89  |
/// | keywords          | 55–89  |
/// | structure         | 75–94  |
/// | ats_compatibility | 70–94  |
pub struct RandomizedAnalyzer {
    rng: Mutex<StdRng>,
}

impl RandomizedAnalyzer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn draw_scores(&self) -> AnalysisScores {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        AnalysisScores {
            overall: rng.random_range(70..100),
            formatting: rng.random_range(80..100),
            content: rng.random_range(65..90),
            keywords: rng.random_range(55..90),
            structure: rng.random_range(75..95),
            ats_compatibility: rng.random_range(70..95),
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for RandomizedAnalyzer {
    async fn analyze(&self, upload: &UploadedResume) -> Result<AnalysisReport, AnalyzeError> {
        upload.validate()?;
        let scores = self.draw_scores();
        debug!(
            file = %upload.file_name,
            overall = scores.overall,
            "Randomized analysis complete"
        );
        Ok(build_report(&upload.file_name, scores))
    }
}

/// Assembles the fixed suggestion and keyword catalog around a set of scores.
pub fn build_report(file_name: &str, scores: AnalysisScores) -> AnalysisReport {
    let overall_feedback = feedback_sentence(&scores);
    AnalysisReport {
        file_name: file_name.to_string(),
        scores,
        suggestions: suggestion_catalog(),
        keyword_analysis: KeywordAnalysis {
            found: strings(&["JavaScript", "React", "Node.js", "Project Management", "Team Leadership"]),
            missing: strings(&["Python", "AWS", "Docker", "Agile", "Scrum", "Data Analysis"]),
            recommended: strings(&["Cloud Computing", "DevOps", "Machine Learning", "API Development"]),
        },
        overall_feedback,
        analyzer_backend: "randomized".to_string(),
    }
}

fn feedback_sentence(scores: &AnalysisScores) -> String {
    let strength = if scores.formatting > 80 {
        "formatting"
    } else {
        "content"
    };
    let focus = if scores.keywords < 70 {
        "keyword optimization"
    } else {
        "content enhancement"
    };
    format!(
        "Your resume shows strong {strength} but could benefit from {focus}. \
         Focus on quantifying achievements and including more industry-specific terms."
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn suggestion_catalog() -> Vec<SuggestionCategory> {
    let category = |name: &str, priority: Priority, items: &[&str]| SuggestionCategory {
        category: name.to_string(),
        priority,
        items: strings(items),
    };

    vec![
        category(
            "Content Enhancement",
            Priority::High,
            &[
                "Add quantified achievements (e.g., 'Increased sales by 25%' instead of 'Improved sales')",
                "Include 2-3 key accomplishments for each role with specific metrics",
                "Strengthen your professional summary with industry-specific keywords",
                "Add relevant certifications or professional development courses",
            ],
        ),
        category(
            "Keyword Optimization",
            Priority::High,
            &[
                "Include more industry-specific technical skills",
                "Add relevant software/tools mentioned in job descriptions",
                "Incorporate action verbs like 'implemented', 'developed', 'optimized'",
                "Include soft skills that are in demand: 'collaboration', 'problem-solving'",
            ],
        ),
        category(
            "Format & Structure",
            Priority::Medium,
            &[
                "Ensure consistent date formatting throughout the resume",
                "Use bullet points for better readability",
                "Maintain consistent font sizes and spacing",
                "Keep resume to 1-2 pages maximum",
            ],
        ),
        category(
            "ATS Optimization",
            Priority::High,
            &[
                "Use standard section headers (Experience, Education, Skills)",
                "Avoid using images, graphics, or complex formatting",
                "Save as both .pdf and .docx formats",
                "Include a skills section with exact keyword matches from job posts",
            ],
        ),
        category(
            "Professional Polish",
            Priority::Low,
            &[
                "Add a LinkedIn profile URL",
                "Include a professional email address",
                "Consider adding relevant volunteer work or projects",
                "Proofread for grammar and spelling errors",
            ],
        ),
    ]
}
