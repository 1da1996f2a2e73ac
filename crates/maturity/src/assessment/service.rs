use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::catalog::{Question, QuestionCatalog};
use super::collaborators::{
    CheckoutError, CheckoutGateway, CheckoutLineItem, CheckoutRequest, CheckoutSessionHandle,
    RenderError, ReportArtifact, ReportRenderer,
};
use super::domain::{ProfileError, ProfileField, UserId};
use super::packages::{Package, PackageCatalog, PackageTier};
use super::repository::{
    AssessmentRecord, AssessmentStatusView, RepositoryError, SessionRepository,
};
use super::session::{AnswerError, AssessmentOutcome, AssessmentSession, SubmissionError};
use crate::config::CheckoutConfig;

/// Service composing the question catalog, session repository, and the
/// payment and document collaborators.
pub struct AssessmentService<R, G, P> {
    repository: Arc<R>,
    gateway: Arc<G>,
    renderer: Arc<P>,
    catalog: QuestionCatalog,
    packages: PackageCatalog,
    checkout: CheckoutConfig,
}

impl<R, G, P> AssessmentService<R, G, P>
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    pub fn new(
        repository: Arc<R>,
        gateway: Arc<G>,
        renderer: Arc<P>,
        checkout: CheckoutConfig,
    ) -> Self {
        Self {
            repository,
            gateway,
            renderer,
            catalog: QuestionCatalog::standard(),
            packages: PackageCatalog::standard(),
            checkout,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn packages(&self) -> &[Package] {
        self.packages.packages()
    }

    /// Begin a fresh session for the user, replacing any previous one.
    pub fn start(&self, user_id: &UserId) -> Result<AssessmentStatusView, AssessmentServiceError> {
        require_signed_in(user_id)?;
        let record = AssessmentRecord::new(user_id.clone(), AssessmentSession::new(Utc::now()));
        let view = record.status_view(&self.catalog);
        self.repository.store(record)?;
        info!(user = %user_id.0, "assessment session started");
        Ok(view)
    }

    pub fn status(&self, user_id: &UserId) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let record = self.load(user_id)?;
        Ok(record.status_view(&self.catalog))
    }

    /// Questions for the current step; empty on the profile and review steps.
    pub fn current_questions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Question>, AssessmentServiceError> {
        let record = self.load(user_id)?;
        let questions = match record.session.step().category() {
            Some(category) => self
                .catalog
                .questions_for_category(category)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Ok(questions)
    }

    pub fn set_profile_field(
        &self,
        user_id: &UserId,
        field: ProfileField,
        value: &str,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.load(user_id)?;
        record.session.set_profile_field(field, value)?;
        let view = record.status_view(&self.catalog);
        self.repository.update(record)?;
        Ok(view)
    }

    pub fn record_answer(
        &self,
        user_id: &UserId,
        question_id: u32,
        score: u8,
    ) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.load(user_id)?;
        record
            .session
            .record_answer(&self.catalog, question_id, score)?;
        let view = record.status_view(&self.catalog);
        self.repository.update(record)?;
        Ok(view)
    }

    /// Forward navigation; silently stays put when the completion guard fails.
    pub fn advance(&self, user_id: &UserId) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.load(user_id)?;
        record.session.advance(&self.catalog);
        let view = record.status_view(&self.catalog);
        self.repository.update(record)?;
        Ok(view)
    }

    pub fn retreat(&self, user_id: &UserId) -> Result<AssessmentStatusView, AssessmentServiceError> {
        let mut record = self.load(user_id)?;
        record.session.retreat();
        let view = record.status_view(&self.catalog);
        self.repository.update(record)?;
        Ok(view)
    }

    /// Score the answers and persist the handoff payload alongside the session.
    pub fn submit(&self, user_id: &UserId) -> Result<AssessmentOutcome, AssessmentServiceError> {
        let mut record = self.load(user_id)?;
        let submitted_at = Utc::now();
        let outcome = record.session.submit(&self.catalog, submitted_at)?;
        record.outcome = Some(outcome.clone());
        record.submitted_at = Some(submitted_at);
        self.repository.update(record)?;
        info!(
            user = %user_id.0,
            technology = outcome.scores.technology,
            security = outcome.scores.security,
            analytics = outcome.scores.analytics,
            "assessment submitted"
        );
        Ok(outcome)
    }

    /// The stored outcome, or `None` when nothing has been submitted yet; the
    /// consumer must treat the absent case as a redirect back to the wizard.
    pub fn results(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentOutcome>, AssessmentServiceError> {
        let record = self.load(user_id)?;
        Ok(record.outcome)
    }

    /// Obtain a payment redirect for the selected packages. Gateway failures
    /// propagate as-is and leave the stored session untouched.
    pub fn checkout(
        &self,
        user_id: &UserId,
        tier_ids: &[String],
    ) -> Result<CheckoutSessionHandle, AssessmentServiceError> {
        require_signed_in(user_id)?;
        let selected = self.select_packages(tier_ids)?;

        let line_items = selected
            .iter()
            .map(|package| CheckoutLineItem {
                name: package.name.to_string(),
                description: package.description.to_string(),
                unit_amount: package.price * 100,
                quantity: 1,
            })
            .collect();

        let handle = self.gateway.create_session(CheckoutRequest {
            user_id: user_id.clone(),
            line_items,
            success_url: self.checkout.success_url(),
            cancel_url: self.checkout.cancel_url(),
        })?;
        Ok(handle)
    }

    /// Render the downloadable report for a submitted assessment.
    pub fn render_report(
        &self,
        user_id: &UserId,
        tier_ids: &[String],
    ) -> Result<ReportArtifact, AssessmentServiceError> {
        let record = self.load(user_id)?;
        let outcome = record
            .outcome
            .as_ref()
            .ok_or(AssessmentServiceError::NotSubmitted)?;
        let selected = if tier_ids.is_empty() {
            Vec::new()
        } else {
            self.select_packages(tier_ids)?
        };
        let artifact = self.renderer.render(outcome, &selected)?;
        Ok(artifact)
    }

    fn select_packages(
        &self,
        tier_ids: &[String],
    ) -> Result<Vec<&Package>, AssessmentServiceError> {
        if tier_ids.is_empty() {
            return Err(AssessmentServiceError::NoPackagesSelected);
        }
        tier_ids
            .iter()
            .map(|id| {
                PackageTier::from_id(id)
                    .map(|tier| self.packages.get(tier))
                    .ok_or_else(|| AssessmentServiceError::UnknownPackage(id.clone()))
            })
            .collect()
    }

    fn load(&self, user_id: &UserId) -> Result<AssessmentRecord, AssessmentServiceError> {
        require_signed_in(user_id)?;
        self.repository
            .fetch(user_id)?
            .ok_or(AssessmentServiceError::SessionNotFound)
    }
}

fn require_signed_in(user_id: &UserId) -> Result<(), AssessmentServiceError> {
    if user_id.is_signed_in() {
        Ok(())
    } else {
        Err(AssessmentServiceError::SignInRequired)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("sign-in required")]
    SignInRequired,
    #[error("no active assessment session for this user")]
    SessionNotFound,
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("assessment has not been submitted yet")]
    NotSubmitted,
    #[error("unknown package '{0}'")]
    UnknownPackage(String),
    #[error("no packages selected")]
    NoPackagesSelected,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
