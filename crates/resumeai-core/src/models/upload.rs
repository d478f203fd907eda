use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ClientError, ClientResult};

const JOB_TITLE: &str = "jobTitle";
const COMPANY_NAME: &str = "companyName";
const JOB_DESCRIPTION: &str = "jobDescription";

/// A file selected for upload, held fully in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. The content type is inferred from the extension.
    pub fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ClientError::Validation(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let content_type = content_type_for(&file_name).to_string();

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// MIME type for the resume formats the backend accepts.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Optional job context sent along with an ATS analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInfo {
    pub job_title: String,
    pub company_name: String,
    pub job_description: String,
}

impl JobInfo {
    /// Non-empty fields as multipart form entries.
    pub fn form_entries(&self) -> Vec<(&'static str, String)> {
        [
            (JOB_TITLE, &self.job_title),
            (JOB_DESCRIPTION, &self.job_description),
            (COMPANY_NAME, &self.company_name),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k, v.clone()))
        .collect()
    }

    pub fn to_form_fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (JOB_TITLE.to_string(), self.job_title.clone()),
            (COMPANY_NAME.to_string(), self.company_name.clone()),
            (JOB_DESCRIPTION.to_string(), self.job_description.clone()),
        ])
    }

    pub fn from_form_fields(fields: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| fields.get(key).cloned().unwrap_or_default();
        Self {
            job_title: field(JOB_TITLE),
            company_name: field(COMPANY_NAME),
            job_description: field(JOB_DESCRIPTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_entries_skip_blank_fields() {
        let info = JobInfo {
            job_title: "Data Engineer".into(),
            company_name: "  ".into(),
            job_description: String::new(),
        };
        assert_eq!(
            info.form_entries(),
            vec![("jobTitle", "Data Engineer".to_string())]
        );
    }

    #[test]
    fn form_fields_restore_job_info() {
        let info = JobInfo {
            job_title: "SRE".into(),
            company_name: "Acme".into(),
            job_description: "On-call, Kubernetes".into(),
        };
        assert_eq!(JobInfo::from_form_fields(&info.to_form_fields()), info);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("CV.PDF"), "application/pdf");
        assert_eq!(content_type_for("cv.doc"), "application/msword");
        assert_eq!(content_type_for("cv"), "application/octet-stream");
    }

    #[test]
    fn from_path_follows_parent_components() {
        let dir = std::env::temp_dir().join(format!("resumeai-parent-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("drafts")).unwrap();
        std::fs::write(dir.join("cv.pdf"), b"%PDF-1.4").unwrap();

        let file = UploadFile::from_path(&dir.join("drafts").join("..").join("cv.pdf")).unwrap();
        assert_eq!(file.file_name, "cv.pdf");
        assert_eq!(file.bytes, b"%PDF-1.4");

        let missing = UploadFile::from_path(&dir.join("drafts").join("..").join("gone.pdf"));
        assert!(matches!(missing, Err(ClientError::Validation(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn from_path_reads_bytes() {
        let dir = std::env::temp_dir().join(format!("resumeai-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "resume.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.size(), 8);
        assert_eq!(file.extension().as_deref(), Some("pdf"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
