use super::domain::UserId;
use super::packages::Package;
use super::session::AssessmentOutcome;
use serde::{Deserialize, Serialize};

/// Line item forwarded to the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub description: String,
    /// USD cents, as the gateway expects.
    pub unit_amount: u32,
    pub quantity: u32,
}

/// Everything the payment collaborator needs to mint a hosted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: UserId,
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Redirect target returned by the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionHandle {
    pub id: String,
    pub url: String,
}

/// Outbound hook for payment session creation (e.g. a Stripe adapter).
pub trait CheckoutGateway: Send + Sync {
    fn create_session(&self, request: CheckoutRequest)
        -> Result<CheckoutSessionHandle, CheckoutError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("payment gateway unavailable: {0}")]
    Transport(String),
    #[error("payment session rejected: {0}")]
    Rejected(String),
}

/// Downloadable report produced by the document collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Outbound hook for report generation. The real renderer is an external
/// document service; in-process implementations exist for demos and tests.
pub trait ReportRenderer: Send + Sync {
    fn render(
        &self,
        outcome: &AssessmentOutcome,
        packages: &[&Package],
    ) -> Result<ReportArtifact, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("report rendering failed: {0}")]
    Failed(String),
}
