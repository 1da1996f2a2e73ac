use std::sync::Arc;

use clap::Args;

use maturity::assessment::{
    AssessmentService, Category, ProfileField, QuestionCatalog, UserId,
};
use maturity::config::CheckoutConfig;
use maturity::error::AppError;

use crate::infra::{
    score_row, InMemorySessionRepository, LocalCheckoutGateway, PlainTextReportRenderer,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// User identifier for the demo session.
    #[arg(long, default_value = "demo-user")]
    pub(crate) user: String,
    /// Industry recorded on the company profile.
    #[arg(long, default_value = "Technology")]
    pub(crate) industry: String,
    /// Report name recorded on the company profile.
    #[arg(long, default_value = "Demo Assessment")]
    pub(crate) report_name: String,
    /// Employee range recorded on the company profile.
    #[arg(long, default_value = "11-50")]
    pub(crate) employee_count: String,
    /// Score applied to every question (must be one of 0, 25, 50, 75, 100).
    #[arg(long, default_value_t = 50)]
    pub(crate) score: u8,
    /// Packages to send through the demo checkout.
    #[arg(long, value_delimiter = ',', default_value = "basic")]
    pub(crate) packages: Vec<String>,
    /// Skip the checkout portion of the demo.
    #[arg(long)]
    pub(crate) skip_checkout: bool,
}

pub(crate) fn print_questions() {
    let catalog = QuestionCatalog::standard();
    for category in Category::ordered() {
        println!("{}", category.label());
        for question in catalog.questions_for_category(category) {
            println!("  {}. {}", question.id, question.text);
            for option in &question.options {
                println!("     [{:>3}] {}", option.score, option.text);
            }
        }
        println!();
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        user,
        industry,
        report_name,
        employee_count,
        score,
        packages,
        skip_checkout,
    } = args;

    let service = AssessmentService::new(
        Arc::new(InMemorySessionRepository::default()),
        Arc::new(LocalCheckoutGateway::default()),
        Arc::new(PlainTextReportRenderer),
        CheckoutConfig {
            public_url: "http://localhost:4000".to_string(),
        },
    );
    let user = UserId(user);

    println!("Digital maturity assessment demo");
    let view = service.start(&user)?;
    println!(
        "- Session started at step {} ({})",
        view.step_number, view.step_title
    );

    service.set_profile_field(&user, ProfileField::Industry, &industry)?;
    service.set_profile_field(&user, ProfileField::ReportName, &report_name)?;
    service.set_profile_field(&user, ProfileField::EmployeeCount, &employee_count)?;
    println!("- Company profile: {industry}, {employee_count} employees");

    let question_ids: Vec<u32> = service
        .catalog()
        .questions()
        .iter()
        .map(|question| question.id)
        .collect();
    for id in question_ids {
        service.record_answer(&user, id, score)?;
    }

    let mut view = service.advance(&user)?;
    while view.step_number < 5 {
        let next = service.advance(&user)?;
        if next.step_number == view.step_number {
            break;
        }
        view = next;
    }
    println!(
        "- Answered {}/{} questions, now at step {} ({})",
        view.answered, view.total_questions, view.step_number, view.step_title
    );

    let outcome = service.submit(&user)?;
    println!("\nScores");
    for category in Category::ordered() {
        println!(
            "  {}",
            score_row(category.label(), outcome.scores.get(category))
        );
    }

    let artifact = service.render_report(&user, &packages)?;
    println!(
        "\nReport rendered: {} ({} bytes)",
        artifact.file_name,
        artifact.bytes.len()
    );

    if skip_checkout {
        return Ok(());
    }

    println!("\nCheckout");
    for package in service.packages() {
        println!(
            "  {} (${}) - {}",
            package.name, package.price, package.description
        );
    }
    let handle = service.checkout(&user, &packages)?;
    println!("  Session {} -> {}", handle.id, handle.url);

    Ok(())
}
