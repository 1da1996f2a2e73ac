use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use maturity::assessment::{
    AssessmentOutcome, AssessmentRecord, Category, CheckoutError, CheckoutGateway,
    CheckoutRequest, CheckoutSessionHandle, Package, RenderError, ReportArtifact, ReportRenderer,
    RepositoryError, SessionRepository, UserId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session storage; one record per user, replaced on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<UserId, AssessmentRecord>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn store(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.user_id) {
            guard.insert(record.user_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

/// Stand-in payment gateway that mints deterministic session handles instead
/// of calling out to a hosted checkout provider.
#[derive(Default)]
pub(crate) struct LocalCheckoutGateway {
    counter: AtomicU64,
}

impl CheckoutGateway for LocalCheckoutGateway {
    fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSessionHandle, CheckoutError> {
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(CheckoutSessionHandle {
            id: format!("cs_local_{sequence:06}"),
            url: request.success_url,
        })
    }
}

/// Renders the downloadable report as plain text. A hosted document service
/// would slot in behind the same trait for PDF output.
pub(crate) struct PlainTextReportRenderer;

impl ReportRenderer for PlainTextReportRenderer {
    fn render(
        &self,
        outcome: &AssessmentOutcome,
        packages: &[&Package],
    ) -> Result<ReportArtifact, RenderError> {
        let mut body = String::new();
        let mut line = |text: String| {
            body.push_str(&text);
            body.push('\n');
        };

        line("Digital Maturity Assessment".to_string());
        line(format!(
            "Submitted: {}",
            outcome.submitted_at.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(report_name) = outcome.company_info.report_name.as_deref() {
            line(format!("Report: {report_name}"));
        }
        if let Some(industry) = outcome.company_info.industry.as_deref() {
            line(format!("Industry: {industry}"));
        }
        if let Some(employee_count) = outcome.company_info.employee_count.as_deref() {
            line(format!("Employees: {employee_count}"));
        }

        line(String::new());
        line("Scores".to_string());
        for category in Category::ordered() {
            line(format!(
                "  {}: {}/100",
                category.label(),
                outcome.scores.get(category)
            ));
        }

        line(String::new());
        line("Responses".to_string());
        for question in &outcome.questions {
            let answer = outcome
                .answers
                .get(question.id)
                .and_then(|score| {
                    question
                        .options
                        .iter()
                        .find(|option| option.score == score)
                        .map(|option| option.text)
                })
                .unwrap_or("(no answer)");
            line(format!("  {}. {}", question.id, question.text));
            line(format!("     {answer}"));
        }

        if !packages.is_empty() {
            line(String::new());
            line("Selected packages".to_string());
            for package in packages {
                line(format!("  {} (${})", package.name, package.price));
                line(format!("    {}", package.description));
                line(format!("    Timeline: {}", package.timeline));
            }
        }

        Ok(ReportArtifact {
            file_name: "digital-maturity-assessment.txt".to_string(),
            content_type: "text/plain; charset=utf-8",
            bytes: body.into_bytes(),
        })
    }
}

/// Format a score table row for CLI output.
pub(crate) fn score_row(label: &str, score: u8) -> String {
    let mut row = String::new();
    let _ = write!(row, "{label:<12} {score:>3}/100 ");
    let filled = (score as usize) / 5;
    for _ in 0..filled {
        row.push('#');
    }
    for _ in filled..20 {
        row.push('.');
    }
    row
}
