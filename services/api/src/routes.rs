use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

use maturity::assessment::{
    assessment_router, AssessmentService, CheckoutGateway, ReportRenderer, SessionRepository,
};

use crate::infra::AppState;

pub(crate) fn with_assessment_routes<R, G, P>(
    service: Arc<AssessmentService<R, G, P>>,
) -> axum::Router
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use maturity::config::CheckoutConfig;
    use tower::ServiceExt;

    use crate::infra::{InMemorySessionRepository, LocalCheckoutGateway, PlainTextReportRenderer};

    fn build_router() -> axum::Router {
        let service = Arc::new(AssessmentService::new(
            Arc::new(InMemorySessionRepository::default()),
            Arc::new(LocalCheckoutGateway::default()),
            Arc::new(PlainTextReportRenderer),
            CheckoutConfig {
                public_url: "http://localhost:4000".to_string(),
            },
        ));
        with_assessment_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let router = build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted_alongside_operations() {
        let router = build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments/demo-user")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
