use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::resume::ResumeData;

/// Resume section the AI endpoints operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Summary,
    Experience,
    Project,
    Skills,
    Education,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Project => "project",
            SectionType::Skills => "skills",
            SectionType::Education => "education",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(SectionType::Summary),
            "experience" => Ok(SectionType::Experience),
            "project" | "projects" => Ok(SectionType::Project),
            "skills" => Ok(SectionType::Skills),
            "education" => Ok(SectionType::Education),
            other => Err(format!("Unknown section type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSuggestion {
    pub original: String,
    pub suggested: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReviewResult {
    pub score: f64,
    pub overall_feedback: String,
    pub suggestions: Vec<AiSuggestion>,
    pub keywords: Vec<String>,
    pub action_verbs: Vec<String>,
}

/// Response of `POST /resume-builder/suggestions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub section_type: String,
    pub suggestions: AiReviewResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionScores {
    pub personal_info: f64,
    pub summary: f64,
    pub experience: f64,
    pub projects: f64,
    pub education: f64,
    pub skills: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsCompatibility {
    pub score: f64,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FullResumeReview {
    pub overall_score: f64,
    pub section_scores: SectionScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ats_compatibility: AtsCompatibility,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
}

/// Response of `POST /resume-builder/review`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewResponse {
    pub success: bool,
    pub review: FullResumeReview,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteResult {
    /// Shape depends on the section that was rewritten
    pub rewritten: serde_json::Value,
    pub changes: Vec<String>,
    pub improvement: String,
}

/// Response of `POST /resume-builder/rewrite`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteResponse {
    pub success: bool,
    pub section_type: String,
    pub result: RewriteResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletPoint {
    pub text: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedBullets {
    pub bullet_points: Vec<BulletPoint>,
    pub tips: Vec<String>,
}

/// Response of `POST /resume-builder/generate-bullets`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateBulletsResponse {
    pub success: bool,
    pub result: GeneratedBullets,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview: String,
    pub is_premium: bool,
    pub ats_score: f64,
    pub category: String,
}

/// Response of `GET /resume-builder/templates`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesResponse {
    pub success: bool,
    pub templates: Vec<Template>,
}

/// Response of `POST /resume-builder/parse`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub message: String,
    pub resume_data: ResumeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedResume {
    pub id: String,
}

/// Response of `POST /resume-builder/save`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveResumeResponse {
    pub success: bool,
    pub message: String,
    pub resume: SavedResume,
}

/// Response of `POST /generate-pdf/preview`. `pdf` is base64 encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfPreview {
    pub success: bool,
    pub pdf: String,
    pub mime_type: String,
}

/// Response of `POST /generate-pdf/html-preview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlPreview {
    pub success: bool,
    pub html: String,
}
