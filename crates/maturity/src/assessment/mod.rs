//! Assessment core: the fixed question bank, the five-step wizard state
//! machine, the answer store, category scoring, and the trait seams to the
//! payment and document collaborators.

pub mod catalog;
pub mod collaborators;
pub mod domain;
pub mod packages;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, Question, QuestionCatalog, OPTION_SCORES, QUESTIONS_PER_CATEGORY};
pub use collaborators::{
    CheckoutError, CheckoutGateway, CheckoutLineItem, CheckoutRequest, CheckoutSessionHandle,
    RenderError, ReportArtifact, ReportRenderer,
};
pub use domain::{
    AnswerStore, Category, CompanyProfile, ProfileError, ProfileField, Step, UserId,
    EMPLOYEE_RANGES, INDUSTRIES,
};
pub use packages::{Package, PackageCatalog, PackageTier};
pub use repository::{
    AssessmentRecord, AssessmentStatusView, RepositoryError, SessionRepository,
};
pub use router::assessment_router;
pub use scoring::ScoreRecord;
pub use service::{AssessmentService, AssessmentServiceError};
pub use session::{AnswerError, AssessmentOutcome, AssessmentSession, SubmissionError};
