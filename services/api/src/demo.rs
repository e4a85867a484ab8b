use crate::infra::{InMemoryRequestRepository, LoggingNotificationPublisher};
use aid_intake::config::AppConfig;
use aid_intake::error::AppError;
use aid_intake::workflows::assistance::{
    ApplicationWizard, AssistanceCategory, AssistanceRequestService, CategoryCatalog,
    FileCandidate, Navigation, OpportunityContext, SubmissionCoordinator, SubmissionOutcome,
    UrgencyLevel, ValidationErrors, WizardStep,
};
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Category to select on the first step (e.g. emergency_assistance)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Opportunity type used to pre-seed the draft (e.g. scholarship)
    #[arg(long)]
    pub(crate) opportunity_type: Option<String>,
    /// Program identifier attached to the request
    #[arg(long)]
    pub(crate) program_id: Option<String>,
    /// Request title (defaults to the seeded title, if any)
    #[arg(long)]
    pub(crate) title: Option<String>,
    /// Request description
    #[arg(long, default_value = "")]
    pub(crate) description: String,
    /// Requested amount in DA
    #[arg(long, default_value_t = 0)]
    pub(crate) amount: u32,
    /// Override the category default urgency (routine, important, urgent, critical)
    #[arg(long)]
    pub(crate) urgency: Option<String>,
    /// Files to stage as supporting documents
    #[arg(long)]
    pub(crate) attach: Vec<PathBuf>,
}

pub(crate) fn print_categories() {
    println!("Assistance categories");
    for option in CategoryCatalog::all() {
        let urgency = UrgencyLevel::default_for(option);
        println!(
            "- {} ({}): up to {}, default urgency {}",
            option.label,
            option.value,
            option.formatted_cap(),
            urgency.label()
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        category,
        opportunity_type,
        program_id,
        title,
        description,
        amount,
        urgency,
        attach,
    } = args;

    let config = AppConfig::load()?;
    let context = opportunity_type.map(|kind| OpportunityContext {
        service_category: Some(kind),
        program_id,
        ..OpportunityContext::default()
    });

    let mut wizard =
        ApplicationWizard::new(context.as_ref()).with_stager(config.intake.attachment_stager());

    println!("Assistance request wizard demo");
    if let Some(seeded) = wizard.draft().category {
        println!("Seeded category from opportunity context: {seeded}");
    }

    if let Some(raw) = category {
        match raw.parse::<AssistanceCategory>() {
            Ok(category) => wizard.select_category(category),
            Err(err) => println!("Ignoring category: {err}"),
        }
    }
    if !advance(&mut wizard) {
        return Ok(());
    }

    if let Some(title) = title {
        wizard.set_title(title);
    }
    wizard.set_description(description);
    wizard.set_requested_amount(amount);
    if let Some(raw) = urgency {
        match raw.parse::<UrgencyLevel>() {
            Ok(level) => wizard.set_urgency_level(level),
            Err(err) => println!("Keeping default urgency: {err}"),
        }
    }
    if !advance(&mut wizard) {
        return Ok(());
    }

    let candidates = attach
        .iter()
        .map(|path| file_candidate(path))
        .collect::<Result<Vec<_>, _>>()?;
    for rejected in wizard.stage_attachments(candidates) {
        println!("- skipped {}: {}", rejected.name, rejected.reason.summary());
    }
    println!("Staged documents: {}", wizard.draft().documents.len());
    if !advance(&mut wizard) {
        return Ok(());
    }

    let repository = Arc::new(InMemoryRequestRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let service = Arc::new(AssistanceRequestService::new(
        repository,
        notifications.clone(),
    ));
    let coordinator = SubmissionCoordinator::new(service.clone());

    match wizard.submit(&coordinator) {
        SubmissionOutcome::Submitted(receipt) => {
            if let Navigation::Confirmation { message, .. } = &receipt.navigation {
                println!("\n{message}");
            }
            let record = service.get(&receipt.request_id)?;
            let view = record.status_view();
            println!(
                "Request {}: {} ({}, {}, {})",
                view.request_id.as_str(),
                view.title,
                view.category,
                view.urgency_level.label(),
                view.requested_amount
            );
            println!(
                "Submitted at {}",
                record
                    .submitted_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
            );
            println!(
                "Documents awaiting upload: {}",
                receipt.pending_documents.len()
            );
            println!("Notifications queued: {}", notifications.events().len());
        }
        SubmissionOutcome::Rejected(errors) => print_errors(WizardStep::Review, &errors),
        SubmissionOutcome::Failed(error) => println!("\nSubmission failed: {error}"),
        SubmissionOutcome::InFlight => println!("\nA submission is already in progress"),
    }

    Ok(())
}

fn advance(wizard: &mut ApplicationWizard) -> bool {
    let step = wizard.step();
    match wizard.advance() {
        Ok(next) => {
            println!("[{}] {} -> {}", step.number(), step.label(), next.label());
            true
        }
        Err(errors) => {
            print_errors(step, &errors);
            false
        }
    }
}

fn print_errors(step: WizardStep, errors: &ValidationErrors) {
    println!("\n[{}] {} is incomplete", step.number(), step.label());
    for (field, message) in errors.iter() {
        println!("- {}: {}", field.as_str(), message);
    }
}

fn file_candidate(path: &Path) -> Result<FileCandidate, AppError> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileCandidate::new(name, metadata.len(), mime_type))
}
