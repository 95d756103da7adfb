//! Resume generation — turns a short questionnaire into a full `ResumeData`.
//!
//! Default backend: `TemplatedGenerator`, which fills fixed sentence templates
//! keyed on experience level. No network calls. A model-backed generator can
//! replace it behind the `ContentGenerator` trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeData};

pub const DEFAULT_TEMPLATE_PREFERENCE: &str = "modern";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Unknown values are treated as mid-level.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "entry" => ExperienceLevel::Entry,
            "senior" => ExperienceLevel::Senior,
            _ => ExperienceLevel::Mid,
        }
    }
}

/// Questionnaire answers submitted by the generator form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub target_role: String,
    pub industry: String,
    pub experience_level: String,
    pub key_skills: String,
    /// One role per line.
    pub previous_experience: String,
    pub education: String,
    pub achievements: String,
    pub template_preference: String,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.full_name.trim().is_empty() || self.target_role.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in at least your name and target role.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn template_id(&self) -> &str {
        match self.template_preference.trim() {
            "" => DEFAULT_TEMPLATE_PREFERENCE,
            id => id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub resume_data: ResumeData,
    pub template_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn ContentGenerator>`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedResume, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplatedGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct TemplatedGenerator;

#[async_trait]
impl ContentGenerator for TemplatedGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedResume, AppError> {
        request.validate()?;
        let resume_data = build_resume(request);
        info!(
            role = %request.target_role.trim(),
            experience = resume_data.experience.len(),
            skills = resume_data.skills.len(),
            "Generated resume from questionnaire"
        );
        Ok(GeneratedResume {
            resume_data,
            template_id: request.template_id().to_string(),
        })
    }
}

pub fn build_resume(request: &GenerateRequest) -> ResumeData {
    let role = request.target_role.trim();

    let experience = request
        .previous_experience
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| ExperienceEntry {
            position: role.to_string(),
            company: format!("Company {}", i + 1),
            start_date: "2020".to_string(),
            end_date: if i == 0 { "Present" } else { "2023" }.to_string(),
            description: Some(line.to_string()),
        })
        .collect();

    let skills = request
        .key_skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    ResumeData {
        personal_info: PersonalInfo {
            full_name: non_blank(&request.full_name),
            email: non_blank(&request.email),
            phone: non_blank(&request.phone),
            location: non_blank(&request.location),
        },
        summary: Some(summary_for(request)),
        experience,
        education: vec![EducationEntry {
            degree: request.education.trim().to_string(),
            institution: "University".to_string(),
            start_date: "2016".to_string(),
            end_date: "2020".to_string(),
        }],
        skills,
    }
}

fn summary_for(request: &GenerateRequest) -> String {
    let role = request.target_role.trim();
    let industry = request.industry.trim();
    let achievement = request.achievements.trim().to_lowercase();
    let level = ExperienceLevel::parse(&request.experience_level);

    let (opening, closing_lead) = match level {
        ExperienceLevel::Entry => (
            format!(
                "Dynamic {role} with a passion for {industry}. Eager to contribute fresh \
                 perspectives and strong foundational skills to drive meaningful results."
            ),
            "Known for",
        ),
        ExperienceLevel::Mid => (
            format!(
                "Experienced {role} with proven expertise in {industry}. Demonstrated ability \
                 to deliver high-quality results and collaborate effectively in team environments."
            ),
            "Successfully",
        ),
        ExperienceLevel::Senior => (
            format!(
                "Senior {role} with extensive experience in {industry}. Proven track record of \
                 leading initiatives, mentoring teams, and driving strategic outcomes."
            ),
            "Recognized for",
        ),
    };

    if achievement.is_empty() {
        opening
    } else {
        format!("{opening} {closing_lead} {achievement}.")
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
