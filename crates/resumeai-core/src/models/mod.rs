//! Backend payload models
//!
//! Shapes mirror the backend JSON (camelCase). Fields the client never reads stay optional
//! or free-form so backend additions do not break deserialization.

pub mod analysis;
pub mod builder;
mod de;
pub mod error_body;
pub mod resume;
pub mod upload;
pub mod user;

pub use analysis::{
    AnalysisStatus, AnalyzeResponse, AnalysisResponse, AtsReport, CheckItem, ContactDetails,
    DashboardStats, DashboardStatsResponse, DeleteResponse, HistoryResponse, Pagination,
    ResumeAnalysis,
};
pub use builder::{
    AiReviewResult, AiSuggestion, AtsCompatibility, BulletPoint, FullResumeReview,
    GeneratedBullets, GenerateBulletsResponse, HtmlPreview, ParseResumeResponse, PdfPreview,
    ReviewResponse, RewriteResponse, RewriteResult, SaveResumeResponse, SavedResume,
    SectionScores, SectionType, SuggestionsResponse, Template, TemplatesResponse,
};
pub use error_body::ApiErrorBody;
pub use resume::{
    Certification, Education, Experience, PersonalInfo, Project, ResumeData, SkillGroup,
};
pub use upload::{JobInfo, UploadFile};
pub use user::{AuthResponse, Plan, User, UserDetails};
