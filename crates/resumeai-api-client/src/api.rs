//! Domain methods for the ResumeAI API client.
//!
//! One method per backend operation. Response types come from `resumeai_core::models`.

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

use resumeai_core::models::{
    AnalysisResponse, AnalyzeResponse, AuthResponse, DashboardStatsResponse, DeleteResponse,
    GenerateBulletsResponse, HistoryResponse, HtmlPreview, ParseResumeResponse, PdfPreview,
    ResumeData, ReviewResponse, RewriteResponse, SaveResumeResponse, SectionType,
    SuggestionsResponse, TemplatesResponse,
};
use resumeai_core::{ClientError, ClientResult, JobInfo, UploadFile};

use crate::{ApiClient, Download};

fn file_part(file: &UploadFile) -> ClientResult<Part> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| {
            ClientError::Validation(format!(
                "Invalid content type '{}': {}",
                file.content_type, e
            ))
        })
}

fn id_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl ApiClient {
    // ============================================
    // Auth
    // ============================================

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.post_json("/auth/login", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ClientResult<AuthResponse> {
        self.post_json(
            "/auth/register",
            &json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    pub async fn logout(&self) -> ClientResult<Value> {
        self.post_empty("/auth/logout").await
    }

    /// Profile of the session user. Fails with 401 when signed out.
    pub async fn get_profile(&self) -> ClientResult<AuthResponse> {
        self.get("/auth/user-details", &[]).await
    }

    // ============================================
    // ATS score
    // ============================================

    /// Submit a resume for ATS analysis. Blank job fields are not sent.
    pub async fn analyze_resume(
        &self,
        file: &UploadFile,
        job_info: &JobInfo,
    ) -> ClientResult<AnalyzeResponse> {
        let mut form = Form::new().part("resume", file_part(file)?);
        for (name, value) in job_info.form_entries() {
            form = form.text(name, value);
        }

        tracing::info!(
            file_name = %file.file_name,
            size_bytes = file.bytes.len(),
            "Submitting resume for analysis"
        );

        self.post_multipart("/ats-score", form, "Failed to analyze resume")
            .await
    }

    pub async fn get_history(&self, page: u32, limit: u32) -> ClientResult<HistoryResponse> {
        self.get(
            "/ats-score/history",
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_dashboard_stats(&self) -> ClientResult<DashboardStatsResponse> {
        self.get("/ats-score/dashboard-stats", &[]).await
    }

    pub async fn get_analysis(&self, id: &str) -> ClientResult<AnalysisResponse> {
        self.get(&format!("/ats-score/{}", id_segment(id)), &[])
            .await
    }

    pub async fn delete_analysis(&self, id: &str) -> ClientResult<DeleteResponse> {
        self.delete(&format!("/ats-score/{}", id_segment(id))).await
    }

    /// Download the resume file stored with an analysis.
    pub async fn download_resume_file(&self, id: &str) -> ClientResult<Download> {
        self.get_bytes(
            &format!("/ats-score/{}/file", id_segment(id)),
            "Failed to download file",
        )
        .await
    }

    // ============================================
    // Resume builder
    // ============================================

    /// Parse an uploaded resume into structured data.
    pub async fn parse_resume(&self, file: &UploadFile) -> ClientResult<ParseResumeResponse> {
        let form = Form::new().part("resume", file_part(file)?);
        self.post_multipart("/resume-builder/parse", form, "Failed to parse resume")
            .await
    }

    pub async fn get_suggestions(
        &self,
        section_type: SectionType,
        content: &Value,
        job_title: Option<&str>,
    ) -> ClientResult<SuggestionsResponse> {
        let mut body = json!({ "sectionType": section_type, "content": content });
        if let Some(title) = job_title {
            body["jobTitle"] = Value::String(title.to_string());
        }
        self.post_json("/resume-builder/suggestions", &body).await
    }

    pub async fn get_full_review(&self, resume_data: &ResumeData) -> ClientResult<ReviewResponse> {
        self.post_json("/resume-builder/review", &json!({ "resumeData": resume_data }))
            .await
    }

    pub async fn rewrite_content(
        &self,
        section_type: &str,
        content: &Value,
        style: Option<&str>,
    ) -> ClientResult<RewriteResponse> {
        let mut body = json!({ "sectionType": section_type, "content": content });
        if let Some(style) = style {
            body["style"] = Value::String(style.to_string());
        }
        self.post_json("/resume-builder/rewrite", &body).await
    }

    pub async fn generate_bullets(
        &self,
        description: &str,
        count: Option<u32>,
    ) -> ClientResult<GenerateBulletsResponse> {
        let mut body = json!({ "description": description });
        if let Some(count) = count {
            body["count"] = json!(count);
        }
        self.post_json("/resume-builder/generate-bullets", &body)
            .await
    }

    pub async fn get_templates(&self) -> ClientResult<TemplatesResponse> {
        self.get("/resume-builder/templates", &[]).await
    }

    pub async fn save_resume(
        &self,
        resume_data: &ResumeData,
        template_id: Option<&str>,
    ) -> ClientResult<SaveResumeResponse> {
        let mut body = json!({ "resumeData": resume_data });
        if let Some(id) = template_id {
            body["templateId"] = Value::String(id.to_string());
        }
        self.post_json("/resume-builder/save", &body).await
    }

    // ============================================
    // PDF generation
    // ============================================

    /// Render the resume to PDF with the given template.
    pub async fn generate_pdf(
        &self,
        resume_data: &ResumeData,
        template_id: &str,
    ) -> ClientResult<Download> {
        self.post_json_for_pdf(
            "/generate-pdf",
            &json!({ "resumeData": resume_data, "templateId": template_id }),
            "Failed to generate PDF",
        )
        .await
    }

    /// PDF preview as base64.
    pub async fn get_pdf_preview(
        &self,
        resume_data: &ResumeData,
        template_id: &str,
    ) -> ClientResult<PdfPreview> {
        self.post_json(
            "/generate-pdf/preview",
            &json!({ "resumeData": resume_data, "templateId": template_id }),
        )
        .await
    }

    pub async fn get_html_preview(
        &self,
        resume_data: &ResumeData,
        template_id: &str,
    ) -> ClientResult<HtmlPreview> {
        self.post_json(
            "/generate-pdf/html-preview",
            &json!({ "resumeData": resume_data, "templateId": template_id }),
        )
        .await
    }

    /// URL of a template's preview image (does not call the API).
    pub fn template_preview_url(&self, template_id: &str) -> String {
        self.build_url(&format!(
            "/generate-pdf/template-preview/{}",
            id_segment(template_id)
        ))
    }

    // ============================================
    // Job description
    // ============================================

    pub async fn analyze_job_description(&self, job_description: &str) -> ClientResult<Value> {
        self.post_json(
            "/job-desc/analyze",
            &json!({ "jobDescription": job_description }),
        )
        .await
    }

    pub async fn match_resume(&self, resume_id: &str, job_description: &str) -> ClientResult<Value> {
        self.post_json(
            "/job-desc/match",
            &json!({ "resumeId": resume_id, "jobDescription": job_description }),
        )
        .await
    }
}
