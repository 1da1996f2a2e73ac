use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::assessment::collaborators::{
    CheckoutError, CheckoutGateway, CheckoutRequest, CheckoutSessionHandle, RenderError,
    ReportArtifact, ReportRenderer,
};
use crate::assessment::domain::{ProfileField, UserId};
use crate::assessment::packages::Package;
use crate::assessment::repository::{AssessmentRecord, RepositoryError, SessionRepository};
use crate::assessment::service::AssessmentService;
use crate::assessment::session::AssessmentOutcome;
use crate::config::CheckoutConfig;

pub(super) fn user() -> UserId {
    UserId("user_2abc".to_string())
}

pub(super) fn checkout_config() -> CheckoutConfig {
    CheckoutConfig {
        public_url: "http://localhost:4000".to_string(),
    }
}

pub(super) type TestService = AssessmentService<MemoryRepository, MemoryGateway, TextRenderer>;

pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>, Arc<MemoryGateway>) {
    let repository = Arc::new(MemoryRepository::default());
    let gateway = Arc::new(MemoryGateway::default());
    let service = AssessmentService::new(
        repository.clone(),
        gateway.clone(),
        Arc::new(TextRenderer),
        checkout_config(),
    );
    (service, repository, gateway)
}

pub(super) fn failing_gateway_service(
) -> AssessmentService<MemoryRepository, FailingGateway, TextRenderer> {
    AssessmentService::new(
        Arc::new(MemoryRepository::default()),
        Arc::new(FailingGateway),
        Arc::new(TextRenderer),
        checkout_config(),
    )
}

/// Fill the profile step with the reference values used across tests.
pub(super) fn complete_profile(service: &TestService, user: &UserId) {
    service
        .set_profile_field(user, ProfileField::Industry, "Technology")
        .expect("industry accepted");
    service
        .set_profile_field(user, ProfileField::ReportName, "Q1")
        .expect("report name accepted");
    service
        .set_profile_field(user, ProfileField::EmployeeCount, "11-50")
        .expect("employee count accepted");
}

/// Answer all fifteen questions with the same score.
pub(super) fn answer_all(service: &TestService, user: &UserId, score: u8) {
    for id in 1..=15 {
        service
            .record_answer(user, id, score)
            .expect("answer accepted");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<UserId, AssessmentRecord>>>,
}

impl MemoryRepository {
    pub(super) fn record(&self, user: &UserId) -> Option<AssessmentRecord> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(user)
            .cloned()
    }
}

impl SessionRepository for MemoryRepository {
    fn store(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.user_id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryGateway {
    requests: Arc<Mutex<Vec<CheckoutRequest>>>,
}

impl MemoryGateway {
    pub(super) fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().expect("gateway mutex poisoned").clone()
    }
}

impl CheckoutGateway for MemoryGateway {
    fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSessionHandle, CheckoutError> {
        let url = request.success_url.clone();
        let mut guard = self.requests.lock().expect("gateway mutex poisoned");
        guard.push(request);
        Ok(CheckoutSessionHandle {
            id: format!("cs_test_{:03}", guard.len()),
            url,
        })
    }
}

pub(super) struct FailingGateway;

impl CheckoutGateway for FailingGateway {
    fn create_session(
        &self,
        _request: CheckoutRequest,
    ) -> Result<CheckoutSessionHandle, CheckoutError> {
        Err(CheckoutError::Transport("gateway offline".to_string()))
    }
}

pub(super) struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(
        &self,
        outcome: &AssessmentOutcome,
        packages: &[&Package],
    ) -> Result<ReportArtifact, RenderError> {
        let mut body = format!(
            "scores {}/{}/{} packages {}",
            outcome.scores.technology,
            outcome.scores.security,
            outcome.scores.analytics,
            packages.len()
        );
        body.push('\n');
        Ok(ReportArtifact {
            file_name: "digital-maturity-assessment.txt".to_string(),
            content_type: "text/plain; charset=utf-8",
            bytes: body.into_bytes(),
        })
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
