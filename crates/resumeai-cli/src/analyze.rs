//! Resume analysis flow
//!
//! An upload goes through, in order: file validation, the rate limiter, the auth gate
//! (signed-out uploads are parked in the pending-upload bridge), the free-plan credit
//! check, and finally the API call. After a login, [`AnalyzeFlow::resume_after_login`]
//! picks the parked upload back up. [`AnalyzeFlow::fix_resume`] turns an analyzed file
//! into resume builder data.

use resumeai_core::models::{AnalyzeResponse, ResumeData};
use resumeai_core::validation::{validate_analyze_upload, validate_parse_upload};
use resumeai_core::{ClientError, ClientResult, CreditError, JobInfo, UploadFile};
use resumeai_infra::{Admission, RateLimitGate};
use resumeai_storage::PendingUploadBridge;

use crate::session::AuthContext;

/// Result of submitting an upload
#[derive(Debug)]
pub enum AnalyzeOutcome {
    Completed(AnalyzeResponse),
    /// The upload was saved; log in and call `resume_after_login` to continue
    LoginRequired,
}

#[derive(Clone)]
pub struct AnalyzeFlow {
    bridge: PendingUploadBridge,
    gate: RateLimitGate,
}

impl AnalyzeFlow {
    pub fn new(bridge: PendingUploadBridge, gate: RateLimitGate) -> Self {
        Self { bridge, gate }
    }

    pub fn bridge(&self) -> &PendingUploadBridge {
        &self.bridge
    }

    pub fn gate(&self) -> &RateLimitGate {
        &self.gate
    }

    pub async fn submit(
        &self,
        auth: &mut AuthContext,
        file: &UploadFile,
        job_info: &JobInfo,
    ) -> ClientResult<AnalyzeOutcome> {
        validate_analyze_upload(file)?;

        if let Admission::Rejected { retry_after } = self.gate.try_admit().await {
            return Err(ClientError::RateLimited { retry_after });
        }

        if !auth.is_authenticated() {
            self.bridge
                .save(file, job_info.to_form_fields())
                .await
                .map_err(|e| {
                    tracing::warn!(error = %e, file_name = %file.file_name, "Failed to park upload");
                    ClientError::Storage("Failed to save file".to_string())
                })?;

            tracing::info!(
                file_name = %file.file_name,
                size_bytes = file.size(),
                "Upload saved until login"
            );
            return Ok(AnalyzeOutcome::LoginRequired);
        }

        if let Some(user) = auth.user().filter(|u| u.is_out_of_credits()) {
            return Err(CreditError::exhausted(user.credits).into());
        }

        self.run(auth, file, job_info)
            .await
            .map(AnalyzeOutcome::Completed)
    }

    /// Continue a parked upload once a login has just succeeded.
    ///
    /// `transitioned` is the value returned by `AuthContext::login`. Returns `None` when
    /// there was no transition or nothing was pending.
    pub async fn resume_after_login(
        &self,
        auth: &mut AuthContext,
        transitioned: bool,
    ) -> Option<ClientResult<AnalyzeResponse>> {
        if !transitioned || !auth.is_authenticated() {
            return None;
        }

        let pending = self.bridge.take().await?;
        let file = pending.to_upload_file();
        let job_info = pending.job_info();

        tracing::info!(file_name = %file.file_name, "Resuming analysis after login");
        Some(self.run(auth, &file, &job_info).await)
    }

    async fn run(
        &self,
        auth: &mut AuthContext,
        file: &UploadFile,
        job_info: &JobInfo,
    ) -> ClientResult<AnalyzeResponse> {
        self.gate.record().await;

        let response = auth.client().analyze_resume(file, job_info).await?;

        if response.completed_report().is_none() {
            tracing::warn!(
                file_name = %file.file_name,
                success = response.success,
                "Analysis response carried no report"
            );
            return Err(ClientError::api(200, "Failed to analyze resume"));
        }

        if let Some(credits) = response.credits.filter(|c| *c >= 0) {
            auth.update_credits(credits);
        }

        Ok(response)
    }

    /// Parse an analyzed file into builder data.
    ///
    /// Returns `None` when the file cannot be parsed (wrong type, backend failure, empty
    /// result); the builder then starts from scratch.
    pub async fn fix_resume(&self, auth: &AuthContext, file: &UploadFile) -> Option<ResumeData> {
        if let Err(e) = validate_parse_upload(file) {
            tracing::info!(file_name = %file.file_name, reason = %e, "Skipping resume parse");
            return None;
        }

        match auth.client().parse_resume(file).await {
            Ok(response) if response.success && response.resume_data != ResumeData::default() => {
                Some(response.resume_data)
            }
            Ok(_) => {
                tracing::warn!(file_name = %file.file_name, "Resume parse returned no data");
                None
            }
            Err(e) => {
                tracing::warn!(
                    file_name = %file.file_name,
                    error = %e,
                    "Failed to parse resume for builder"
                );
                None
            }
        }
    }
}
