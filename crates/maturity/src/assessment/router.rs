use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::collaborators::{CheckoutGateway, ReportRenderer};
use super::domain::{ProfileField, UserId};
use super::repository::SessionRepository;
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing HTTP endpoints for the assessment wizard,
/// results handoff, and the package/checkout surface.
pub fn assessment_router<R, G, P>(service: Arc<AssessmentService<R, G, P>>) -> Router
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:user_id",
            post(start_handler::<R, G, P>).get(status_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/questions",
            get(questions_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/profile",
            put(profile_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/answers",
            put(answer_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/next",
            post(next_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/back",
            post(back_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/submit",
            post(submit_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/results",
            get(results_handler::<R, G, P>),
        )
        .route(
            "/api/v1/assessments/:user_id/report",
            post(report_handler::<R, G, P>),
        )
        .route("/api/v1/packages", get(packages_handler::<R, G, P>))
        .route("/api/v1/checkout", post(checkout_handler::<R, G, P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRequest {
    pub(crate) field: ProfileField,
    pub(crate) value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    pub(crate) question_id: u32,
    pub(crate) score: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutApiRequest {
    pub(crate) user_id: String,
    pub(crate) packages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportRequest {
    #[serde(default)]
    pub(crate) packages: Vec<String>,
}

async fn start_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.start(&UserId(user_id)) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn status_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.status(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn questions_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.current_questions(&UserId(user_id)) {
        Ok(questions) => {
            (StatusCode::OK, axum::Json(json!({ "questions": questions }))).into_response()
        }
        Err(error) => error_response(error),
    }
}

async fn profile_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<ProfileRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.set_profile_field(&UserId(user_id), request.field, &request.value) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn answer_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<AnswerRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.record_answer(&UserId(user_id), request.question_id, request.score) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn next_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.advance(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn back_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.retreat(&UserId(user_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn submit_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.submit(&UserId(user_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn results_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.results(&UserId(user_id)) {
        Ok(Some(outcome)) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        // No handoff payload: the consumer must go back through the wizard.
        Ok(None) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "redirect": "/assessment" })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn report_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.render_report(&UserId(user_id), &request.packages) {
        Ok(artifact) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, artifact.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", artifact.file_name),
                ),
            ],
            artifact.bytes,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn packages_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    (
        StatusCode::OK,
        axum::Json(json!({ "packages": service.packages() })),
    )
        .into_response()
}

async fn checkout_handler<R, G, P>(
    State(service): State<Arc<AssessmentService<R, G, P>>>,
    axum::Json(request): axum::Json<CheckoutApiRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    G: CheckoutGateway + 'static,
    P: ReportRenderer + 'static,
{
    match service.checkout(&UserId(request.user_id), &request.packages) {
        Ok(handle) => (StatusCode::OK, axum::Json(handle)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    match error {
        AssessmentServiceError::SignInRequired => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": error.to_string(), "redirect": "/sign-in" })),
        )
            .into_response(),
        AssessmentServiceError::SessionNotFound => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": error.to_string(), "redirect": "/assessment" })),
        )
            .into_response(),
        AssessmentServiceError::Profile(_)
        | AssessmentServiceError::Answer(_)
        | AssessmentServiceError::Submission(_)
        | AssessmentServiceError::NotSubmitted
        | AssessmentServiceError::UnknownPackage(_)
        | AssessmentServiceError::NoPackagesSelected => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
        AssessmentServiceError::Checkout(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": "error creating checkout session" })),
        )
            .into_response(),
        AssessmentServiceError::Render(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": "error generating report" })),
        )
            .into_response(),
        AssessmentServiceError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
