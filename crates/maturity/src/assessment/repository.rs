use super::catalog::QuestionCatalog;
use super::domain::{Step, UserId};
use super::session::{AssessmentOutcome, AssessmentSession};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Repository row tracking one user's active session and, after submission,
/// the handed-off outcome. One record per user; starting a new assessment
/// replaces it.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub user_id: UserId,
    pub session: AssessmentSession,
    pub outcome: Option<AssessmentOutcome>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl AssessmentRecord {
    pub fn new(user_id: UserId, session: AssessmentSession) -> Self {
        Self {
            user_id,
            session,
            outcome: None,
            submitted_at: None,
        }
    }

    pub fn status_view(&self, catalog: &QuestionCatalog) -> AssessmentStatusView {
        let step = self.session.step();
        AssessmentStatusView {
            user_id: self.user_id.clone(),
            step,
            step_number: step.number(),
            step_title: step.title(),
            step_description: step.description(),
            profile_complete: self.session.profile().is_complete(),
            answered: self.session.answers().len(),
            total_questions: catalog.questions().len(),
            submitted: self.outcome.is_some(),
        }
    }
}

/// Progress summary exposed to the wizard UI.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub user_id: UserId,
    pub step: Step,
    pub step_number: u8,
    pub step_title: &'static str,
    pub step_description: &'static str,
    pub profile_complete: bool,
    pub answered: usize,
    pub total_questions: usize,
    pub submitted: bool,
}

/// Storage abstraction so the service can be exercised in isolation; the
/// core itself never persists assessments durably.
pub trait SessionRepository: Send + Sync {
    /// Store a record, replacing any existing record for the same user.
    fn store(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    /// Replace an existing record; fails when the user has no session.
    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
