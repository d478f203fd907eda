use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Structured resume as exchanged with the resume-builder and PDF endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillGroup>,
    pub certifications: Vec<Certification>,
}

impl ResumeData {
    /// File name used when saving a generated PDF, e.g. `Ada_Lovelace_Resume.pdf`.
    /// Path separators in the name are treated as word breaks.
    pub fn pdf_file_name(&self) -> String {
        let name = self
            .personal_info
            .full_name
            .replace(['/', '\\'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        if name.is_empty() {
            "Resume.pdf".to_string()
        } else {
            format!("{}_Resume.pdf", name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_resume_fills_defaults() {
        let resume: ResumeData =
            serde_json::from_str(r#"{"personalInfo":{"fullName":"Ada Lovelace"}}"#).unwrap();
        assert_eq!(resume.personal_info.full_name, "Ada Lovelace");
        assert!(resume.experiences.is_empty());
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_links() {
        let resume = ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&resume).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Ada");
        assert!(json["personalInfo"].get("linkedin").is_none());
    }

    #[test]
    fn pdf_file_name_joins_whitespace() {
        let mut resume = ResumeData::default();
        assert_eq!(resume.pdf_file_name(), "Resume.pdf");
        resume.personal_info.full_name = "Ada  King Lovelace".into();
        assert_eq!(resume.pdf_file_name(), "Ada_King_Lovelace_Resume.pdf");
    }

    #[test]
    fn pdf_file_name_never_contains_separators() {
        let mut resume = ResumeData::default();
        resume.personal_info.full_name = "Ada/Lovelace".into();
        assert_eq!(resume.pdf_file_name(), "Ada_Lovelace_Resume.pdf");
        resume.personal_info.full_name = r"..\..\Grace / Hopper".into();
        let name = resume.pdf_file_name();
        assert!(!name.contains('/') && !name.contains('\\'));
        assert_eq!(name, ".._.._Grace_Hopper_Resume.pdf");
    }
}
