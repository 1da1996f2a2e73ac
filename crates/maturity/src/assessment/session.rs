use super::catalog::{Question, QuestionCatalog};
use super::domain::{AnswerStore, CompanyProfile, ProfileError, ProfileField, Step};
use super::scoring::ScoreRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One user's pass through the five-step wizard.
///
/// The current step is private so forward navigation cannot bypass the
/// completion guard; all mutation goes through the transition methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSession {
    profile: CompanyProfile,
    answers: AnswerStore,
    step: Step,
    started_at: DateTime<Utc>,
}

impl AssessmentSession {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            profile: CompanyProfile::default(),
            answers: AnswerStore::new(),
            step: Step::CompanyProfile,
            started_at,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn set_profile_field(
        &mut self,
        field: ProfileField,
        value: &str,
    ) -> Result<(), ProfileError> {
        self.profile.set(field, value)
    }

    /// Record an answer, validating the id and score against the catalog.
    ///
    /// Recording is permitted at any step; the UI restricts it to the step
    /// matching the question's category. Overwrites replace the prior value.
    pub fn record_answer(
        &mut self,
        catalog: &QuestionCatalog,
        question_id: u32,
        score: u8,
    ) -> Result<(), AnswerError> {
        let question = catalog
            .question(question_id)
            .ok_or(AnswerError::UnknownQuestion(question_id))?;
        if !question.accepts_score(score) {
            return Err(AnswerError::InvalidScore {
                question: question_id,
                score,
            });
        }
        self.answers.insert(question_id, score);
        Ok(())
    }

    pub fn is_step_complete(&self, catalog: &QuestionCatalog, step: Step) -> bool {
        match step {
            Step::CompanyProfile => self.profile.is_complete(),
            Step::Review => true,
            _ => match step.category() {
                Some(category) => catalog
                    .questions_for_category(category)
                    .iter()
                    .all(|question| self.answers.contains(question.id)),
                None => true,
            },
        }
    }

    /// Move forward one step. A no-op when the current step is incomplete or
    /// the session is already at review; returns the resulting step either way.
    pub fn advance(&mut self, catalog: &QuestionCatalog) -> Step {
        if self.is_step_complete(catalog, self.step) {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
        }
        self.step
    }

    /// Move back one step; a no-op on the profile step.
    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// First incomplete gated step, if any. Review is always navigable and is
    /// never reported here.
    pub fn first_incomplete_step(&self, catalog: &QuestionCatalog) -> Option<Step> {
        Step::ordered()
            .into_iter()
            .filter(|step| *step != Step::Review)
            .find(|step| !self.is_step_complete(catalog, *step))
    }

    /// Score the answers and assemble the handoff payload. Gated on the
    /// profile and all three category steps being complete, independent of the
    /// current step.
    pub fn submit(
        &self,
        catalog: &QuestionCatalog,
        submitted_at: DateTime<Utc>,
    ) -> Result<AssessmentOutcome, SubmissionError> {
        if let Some(step) = self.first_incomplete_step(catalog) {
            return Err(SubmissionError::Incomplete { step });
        }

        Ok(AssessmentOutcome {
            scores: ScoreRecord::compute(&self.answers, catalog),
            company_info: self.profile.clone(),
            answers: self.answers.clone(),
            questions: catalog.questions().to_vec(),
            submitted_at,
        })
    }
}

/// Session-transfer payload handed to results presentation on submit. The
/// raw answers and profile travel with the scores so the consumer can still
/// reference them without assuming any persistence.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub scores: ScoreRecord,
    pub company_info: CompanyProfile,
    pub answers: AnswerStore,
    pub questions: Vec<Question>,
    pub submitted_at: DateTime<Utc>,
}

/// Answer rejected against the catalog's declared options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question {0} is not in the catalog")]
    UnknownQuestion(u32),
    #[error("score {score} is not an offered option for question {question}")]
    InvalidScore { question: u32, score: u8 },
}

/// Submission refused because a gated step is still incomplete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("step {} ({}) is not complete", step.number(), step.title())]
    Incomplete { step: Step },
}
