//! Integration scenarios for the digital maturity assessment workflow.
//!
//! Scenarios run end to end through the public service facade and HTTP router
//! so the wizard sequencing, scoring handoff, and checkout surface are
//! validated without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use maturity::assessment::{
        AssessmentRecord, AssessmentService, CheckoutError, CheckoutGateway, CheckoutRequest,
        CheckoutSessionHandle, Package, ProfileField, RenderError, ReportArtifact, ReportRenderer,
        RepositoryError, SessionRepository, UserId,
    };
    use maturity::assessment::AssessmentOutcome;
    use maturity::config::CheckoutConfig;

    pub(super) fn user() -> UserId {
        UserId("user_2abc".to_string())
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<UserId, AssessmentRecord>>>,
    }

    impl MemoryRepository {
        pub(super) fn record(&self, user: &UserId) -> Option<AssessmentRecord> {
            self.records.lock().expect("lock").get(user).cloned()
        }
    }

    impl SessionRepository for MemoryRepository {
        fn store(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(record.user_id.clone(), record);
            Ok(())
        }

        fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if !guard.contains_key(&record.user_id) {
                return Err(RepositoryError::NotFound);
            }
            guard.insert(record.user_id.clone(), record);
            Ok(())
        }

        fn fetch(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(user_id).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryGateway {
        requests: Arc<Mutex<Vec<CheckoutRequest>>>,
    }

    impl MemoryGateway {
        pub(super) fn requests(&self) -> Vec<CheckoutRequest> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl CheckoutGateway for MemoryGateway {
        fn create_session(
            &self,
            request: CheckoutRequest,
        ) -> Result<CheckoutSessionHandle, CheckoutError> {
            let url = request.success_url.clone();
            let mut guard = self.requests.lock().expect("lock");
            guard.push(request);
            Ok(CheckoutSessionHandle {
                id: format!("cs_test_{:03}", guard.len()),
                url,
            })
        }
    }

    pub(super) struct TextRenderer;

    impl ReportRenderer for TextRenderer {
        fn render(
            &self,
            outcome: &AssessmentOutcome,
            packages: &[&Package],
        ) -> Result<ReportArtifact, RenderError> {
            let body = format!(
                "technology={} security={} analytics={} packages={}\n",
                outcome.scores.technology,
                outcome.scores.security,
                outcome.scores.analytics,
                packages.len()
            );
            Ok(ReportArtifact {
                file_name: "digital-maturity-assessment.txt".to_string(),
                content_type: "text/plain; charset=utf-8",
                bytes: body.into_bytes(),
            })
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
            CheckoutConfig {
                public_url: "http://localhost:4000".to_string(),
            },
        );
        (service, repository, gateway)
    }

    pub(super) fn complete_profile(service: &TestService, user: &UserId) {
        service
            .set_profile_field(user, ProfileField::Industry, "Technology")
            .expect("industry accepted");
        service
            .set_profile_field(user, ProfileField::ReportName, "Q1 Readiness")
            .expect("report name accepted");
        service
            .set_profile_field(user, ProfileField::EmployeeCount, "11-50")
            .expect("employee count accepted");
    }
}

mod wizard {
    use super::common::*;
    use maturity::assessment::{AssessmentServiceError, Step};

    #[test]
    fn full_walkthrough_scores_every_category() {
        let (service, repository, _) = build_service();
        let user = user();

        service.start(&user).expect("session starts");
        complete_profile(&service, &user);

        let view = service.advance(&user).expect("navigates");
        assert_eq!(view.step, Step::Technology);

        for id in 1..=15 {
            service
                .record_answer(&user, id, 50)
                .expect("answer accepted");
        }
        for expected in [Step::Security, Step::Analytics, Step::Review] {
            let view = service.advance(&user).expect("navigates");
            assert_eq!(view.step, expected);
        }

        let outcome = service.submit(&user).expect("submits");
        assert_eq!(outcome.scores.technology, 50);
        assert_eq!(outcome.scores.security, 50);
        assert_eq!(outcome.scores.analytics, 50);
        assert_eq!(outcome.questions.len(), 15);

        let stored = repository.record(&user).expect("record persisted");
        assert!(stored.outcome.is_some());
        assert!(stored.submitted_at.is_some());
    }

    #[test]
    fn incomplete_submission_is_refused_with_the_blocking_step() {
        let (service, _, _) = build_service();
        let user = user();

        service.start(&user).expect("session starts");
        complete_profile(&service, &user);
        for id in 1..=5 {
            service
                .record_answer(&user, id, 75)
                .expect("answer accepted");
        }

        match service.submit(&user) {
            Err(AssessmentServiceError::Submission(err)) => {
                assert!(err.to_string().contains("Security"));
            }
            other => panic!("expected submission refusal, got {other:?}"),
        }
        assert!(service
            .results(&user)
            .expect("results readable")
            .is_none());
    }

    #[test]
    fn navigation_guard_keeps_the_wizard_on_incomplete_steps() {
        let (service, _, _) = build_service();
        let user = user();

        service.start(&user).expect("session starts");
        let view = service.advance(&user).expect("navigates");
        assert_eq!(view.step, Step::CompanyProfile);

        complete_profile(&service, &user);
        let view = service.advance(&user).expect("navigates");
        assert_eq!(view.step, Step::Technology);
        let view = service.advance(&user).expect("navigates");
        assert_eq!(view.step, Step::Technology);

        let view = service.retreat(&user).expect("navigates");
        assert_eq!(view.step, Step::CompanyProfile);
    }
}

mod checkout {
    use super::common::*;

    #[test]
    fn selected_packages_become_gateway_line_items() {
        let (service, _, gateway) = build_service();
        let user = user();

        let handle = service
            .checkout(&user, &["basic".to_string(), "pro".to_string()])
            .expect("checkout session created");
        assert_eq!(handle.id, "cs_test_001");

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let amounts: Vec<u32> = requests[0]
            .line_items
            .iter()
            .map(|item| item.unit_amount)
            .collect();
        assert_eq!(amounts, vec![49_900, 99_900]);
        assert!(requests[0]
            .success_url
            .ends_with("/success?session_id={CHECKOUT_SESSION_ID}"));
        assert!(requests[0].cancel_url.ends_with("/assessment-results"));
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::common::*;
    use maturity::assessment::assessment_router;

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn results_endpoint_serves_the_handoff_payload_after_submit() {
        let (service, _, _) = build_service();
        let user = user();

        service.start(&user).expect("session starts");
        complete_profile(&service, &user);
        for id in 1..=15 {
            service
                .record_answer(&user, id, 100)
                .expect("answer accepted");
        }
        service.submit(&user).expect("submits");

        let router = assessment_router(Arc::new(service));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/assessments/user_2abc/results")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["scores"]["technology"], 100);
        assert_eq!(payload["company_info"]["industry"], "Technology");
        assert_eq!(
            payload["questions"].as_array().map(Vec::len),
            Some(15)
        );
    }

    #[tokio::test]
    async fn results_endpoint_redirects_when_nothing_was_submitted() {
        let (service, _, _) = build_service();
        let user = user();
        service.start(&user).expect("session starts");

        let router = assessment_router(Arc::new(service));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/assessments/user_2abc/results")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = json_body(response).await;
        assert_eq!(payload["redirect"], "/assessment");
    }
}
