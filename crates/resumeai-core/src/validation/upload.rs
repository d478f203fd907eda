//! Client-side upload checks, run before any network call.

use crate::constants::{
    ANALYZE_ALLOWED_EXTENSIONS, MAX_ANALYZE_FILE_SIZE_BYTES, MAX_PARSE_FILE_SIZE_BYTES,
    PDF_CONTENT_TYPE,
};
use crate::error::{ClientError, ClientResult};
use crate::models::UploadFile;

fn validate_not_empty(file: &UploadFile) -> ClientResult<()> {
    if file.bytes.is_empty() {
        return Err(ClientError::Validation("File is empty".to_string()));
    }
    Ok(())
}

/// ATS analysis accepts PDF, DOC and DOCX up to 5MB.
pub fn validate_analyze_upload(file: &UploadFile) -> ClientResult<()> {
    validate_not_empty(file)?;

    let allowed = file
        .extension()
        .map(|ext| ANALYZE_ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(ClientError::Validation(
            "Please upload a PDF, DOC, or DOCX file".to_string(),
        ));
    }

    if file.size() > MAX_ANALYZE_FILE_SIZE_BYTES {
        return Err(ClientError::Validation(
            "File size must be less than 5MB".to_string(),
        ));
    }

    Ok(())
}

/// The resume builder only imports PDFs, up to 10MB.
pub fn validate_parse_upload(file: &UploadFile) -> ClientResult<()> {
    validate_not_empty(file)?;

    if file.content_type != PDF_CONTENT_TYPE {
        return Err(ClientError::Validation(
            "Please upload a PDF file".to_string(),
        ));
    }

    if file.size() > MAX_PARSE_FILE_SIZE_BYTES {
        return Err(ClientError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str, size: usize) -> UploadFile {
        UploadFile::new(name, content_type, vec![0u8; size])
    }

    #[test]
    fn analyze_accepts_two_megabyte_pdf() {
        let f = file("resume.pdf", PDF_CONTENT_TYPE, 2 * 1024 * 1024);
        assert!(validate_analyze_upload(&f).is_ok());
    }

    #[test]
    fn analyze_accepts_docx() {
        let f = file("resume.DOCX", "application/octet-stream", 1024);
        assert!(validate_analyze_upload(&f).is_ok());
    }

    #[test]
    fn analyze_rejects_six_megabytes() {
        let f = file("resume.pdf", PDF_CONTENT_TYPE, 6 * 1024 * 1024);
        let err = validate_analyze_upload(&f).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: File size must be less than 5MB");
    }

    #[test]
    fn analyze_rejects_unknown_extension() {
        let f = file("resume.png", "image/png", 1024);
        assert!(matches!(
            validate_analyze_upload(&f),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn parse_rejects_non_pdf() {
        let f = file("resume.docx", "application/msword", 1024);
        assert!(matches!(
            validate_parse_upload(&f),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn parse_allows_up_to_ten_megabytes() {
        let f = file("resume.pdf", PDF_CONTENT_TYPE, 10 * 1024 * 1024);
        assert!(validate_parse_upload(&f).is_ok());
        let f = file("resume.pdf", PDF_CONTENT_TYPE, 10 * 1024 * 1024 + 1);
        assert!(validate_parse_upload(&f).is_err());
    }

    #[test]
    fn empty_file_is_rejected() {
        let f = file("resume.pdf", PDF_CONTENT_TYPE, 0);
        assert!(validate_analyze_upload(&f).is_err());
    }
}
