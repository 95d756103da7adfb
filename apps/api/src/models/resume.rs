use serde::{Deserialize, Serialize};

/// Normalized resume record handed to the preview and export paths.
///
/// Built fresh from form state on every request and never mutated by the
/// renderers. Every field defaults, so a half-filled form still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
}

/// Placeholder shown when the form has no name yet.
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Returns the trimmed value when it carries any text.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl PersonalInfo {
    pub fn display_name(&self) -> &str {
        non_blank(self.full_name.as_deref()).unwrap_or(NAME_PLACEHOLDER)
    }

    /// Joins the present contact fields with `" | "`.
    /// Returns `None` when no field is present, so no empty line is drawn.
    pub fn contact_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.email.as_deref(),
            self.phone.as_deref(),
            self.location.as_deref(),
        ]
        .into_iter()
        .filter_map(non_blank)
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

impl ExperienceEntry {
    pub fn title_line(&self) -> String {
        format!("{} at {}", self.position, self.company)
    }

    pub fn date_line(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date)
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

impl EducationEntry {
    pub fn title_line(&self) -> String {
        format!("{} - {}", self.degree, self.institution)
    }

    pub fn date_line(&self) -> Option<String> {
        date_range(&self.start_date, &self.end_date)
    }
}

fn date_range(start: &str, end: &str) -> Option<String> {
    if start.trim().is_empty() && end.trim().is_empty() {
        None
    } else {
        Some(format!("{} - {}", start.trim(), end.trim()))
    }
}

impl ResumeData {
    pub fn summary(&self) -> Option<&str> {
        non_blank(self.summary.as_deref())
    }

    /// Skills with blank entries dropped, in input order.
    pub fn skills(&self) -> Vec<&str> {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn skills_line(&self) -> Option<String> {
        let skills = self.skills();
        if skills.is_empty() {
            None
        } else {
            Some(skills.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_line_skips_missing_fields() {
        let info = PersonalInfo {
            full_name: Some("Jane".to_string()),
            email: Some("jane@x.com".to_string()),
            phone: None,
            location: Some("Berlin".to_string()),
        };
        assert_eq!(info.contact_line().as_deref(), Some("jane@x.com | Berlin"));
    }

    #[test]
    fn test_contact_line_none_when_all_blank() {
        let info = PersonalInfo {
            full_name: Some("Ann".to_string()),
            email: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(info.contact_line().is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_placeholder() {
        assert_eq!(PersonalInfo::default().display_name(), NAME_PLACEHOLDER);
    }

    #[test]
    fn test_experience_title_keeps_empty_segments() {
        let entry = ExperienceEntry::default();
        assert_eq!(entry.title_line(), " at ");
        assert!(entry.date_line().is_none());
    }

    #[test]
    fn test_skills_line_drops_blank_entries() {
        let data = ResumeData {
            skills: vec!["Go".to_string(), " ".to_string(), "SQL".to_string()],
            ..Default::default()
        };
        assert_eq!(data.skills_line().as_deref(), Some("Go, SQL"));
    }

    #[test]
    fn test_deserializes_partial_camel_case_payload() {
        let data: ResumeData = serde_json::from_str(
            r#"{"personalInfo":{"fullName":"Ann"},"experience":[{"position":"Dev"}]}"#,
        )
        .unwrap();
        assert_eq!(data.personal_info.full_name.as_deref(), Some("Ann"));
        assert_eq!(data.experience[0].position, "Dev");
        assert!(data.skills.is_empty());
    }
}
