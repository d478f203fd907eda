use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de::null_as_default;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// One pass/fail check of an ATS report. Report content is AI-generated so every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subheading: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ContactDetails>,
    /// Only present on urgent fixes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// ATS scoring report produced by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ats_essentials: Vec<CheckItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<CheckItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<CheckItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub urgent_fixes: Vec<CheckItem>,
}

impl AtsReport {
    /// Checks that did not pass, across every category.
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckItem> {
        self.ats_essentials
            .iter()
            .chain(&self.content)
            .chain(&self.sections)
            .filter(|c| !c.passed)
    }
}

/// Response of `POST /ats-score`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<AtsReport>,
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub saved: Option<bool>,
    /// Remaining credits after this analysis
    #[serde(default)]
    pub credits: Option<i64>,
    #[serde(default)]
    pub parsed_resume_data: Option<serde_json::Value>,
}

impl AnalyzeResponse {
    /// The report, if the backend says the analysis succeeded.
    pub fn completed_report(&self) -> Option<&AtsReport> {
        self.analysis.as_ref().filter(|_| self.success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Pending,
    Analyzing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Stored analysis record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// Null until the analysis finishes
    #[serde(default)]
    pub ats_score: Option<f64>,
    #[serde(default)]
    pub analysis_data: Option<AtsReport>,
    #[serde(default)]
    pub status: Option<AnalysisStatus>,
    #[serde(default)]
    pub upload_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

/// Response of `GET /ats-score/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyses: Vec<ResumeAnalysis>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_analyses: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_analyses: Vec<ResumeAnalysis>,
}

/// Response of `GET /ats-score/dashboard-stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: DashboardStats,
}

/// Response of `GET /ats-score/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: ResumeAnalysis,
}

/// Response of `DELETE /ats-score/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_deserializes_mongo_style_ids() {
        let json = r#"{
            "success": true,
            "analyses": [{
                "_id": "65f0c0ffee",
                "fileName": "resume.pdf",
                "jobTitle": "Backend Engineer",
                "atsScore": 78,
                "status": "completed",
                "uploadDate": "2024-03-12T10:00:00.000Z",
                "createdAt": "2024-03-12T10:00:01.000Z"
            }],
            "pagination": {"page": 1, "limit": 10, "total": 1, "totalPages": 1}
        }"#;
        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.analyses[0].id, "65f0c0ffee");
        assert_eq!(history.analyses[0].status, Some(AnalysisStatus::Completed));
        assert_eq!(history.analyses[0].ats_score, Some(78.0));
        assert_eq!(history.pagination.total_pages, 1);
    }

    #[test]
    fn failed_checks_skip_passed_items() {
        let report: AtsReport = serde_json::from_str(
            r#"{
                "overallScore": 64,
                "atsEssentials": [
                    {"subheading": "Contact", "passed": true, "summary": "ok"},
                    {"subheading": "File type", "passed": false, "summary": "use PDF"}
                ],
                "content": [{"subheading": "Metrics", "passed": false, "summary": "add numbers"}]
            }"#,
        )
        .unwrap();
        let failed: Vec<_> = report.failed_checks().map(|c| c.subheading.as_str()).collect();
        assert_eq!(failed, vec!["File type", "Metrics"]);
    }

    #[test]
    fn report_tolerates_incomplete_check_items() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{
                "success": true,
                "analysis": {
                    "overallScore": 58,
                    "urgentFixes": [{"subheading": "Quantify impact", "action": "Add numbers"}],
                    "content": [{"summary": null, "passed": false}],
                    "sections": null
                },
                "analysisId": "a9",
                "credits": 1
            }"#,
        )
        .unwrap();
        let report = response.completed_report().unwrap();
        assert_eq!(report.urgent_fixes[0].subheading, "Quantify impact");
        assert_eq!(report.urgent_fixes[0].summary, "");
        assert!(!report.urgent_fixes[0].passed);
        assert_eq!(report.failed_checks().count(), 1);
        assert!(report.sections.is_empty());
    }

    #[test]
    fn history_accepts_entries_still_analyzing() {
        let json = r#"{
            "success": true,
            "analyses": [
                {"_id": "a1", "fileName": "cv.pdf", "atsScore": null, "status": "analyzing"},
                {"_id": "a2", "fileName": "cv.docx", "status": "queued", "createdAt": null}
            ]
        }"#;
        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.analyses[0].ats_score, None);
        assert_eq!(history.analyses[0].status, Some(AnalysisStatus::Analyzing));
        assert_eq!(history.analyses[1].status, Some(AnalysisStatus::Unknown));
        assert_eq!(history.analyses[1].created_at, None);
        assert_eq!(history.pagination.total, 0);
    }

    #[test]
    fn stats_default_missing_counters() {
        let stats: DashboardStatsResponse =
            serde_json::from_str(r#"{"success":true,"stats":{"averageScore":null}}"#).unwrap();
        assert_eq!(stats.stats.total_analyses, 0);
        assert_eq!(stats.stats.average_score, 0.0);
    }

    #[test]
    fn unsuccessful_response_has_no_completed_report() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"success":false,"analysis":{}}"#).unwrap();
        assert!(response.completed_report().is_none());
    }
}
