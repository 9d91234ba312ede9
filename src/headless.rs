//! One-shot subcommands that run without the terminal UI.

use chrono::Utc;

use crate::activity::{ActivityFeed, TimeDisplay};
use crate::client::{ActivitySource, ClientError, Gateway};
use crate::config::{BookArgs, TrainArgs};
use crate::domain::Availability;
use crate::intake::{
    book_project, request_training, Attachment, IntakeError, ProjectBooking, TrainingApplication,
};
use crate::session::Session;

/// Fetches once and renders the normalized feed as text or JSON.
pub async fn activity_report(
    source: &dyn ActivitySource,
    user: &str,
    limit: u32,
    display: TimeDisplay,
    as_json: bool,
) -> Result<String, ClientError> {
    let mut feed = ActivityFeed::new(display);
    let ticket = feed.request(user, limit).ok_or_else(|| {
        ClientError::ConfigError("no GitHub handle configured (set FOLIO_GITHUB_USER)".to_string())
    })?;

    let result = source.public_events(&ticket.source_id, ticket.limit).await;
    feed.resolve(&ticket, result);

    if let Some(msg) = feed.error() {
        return Err(ClientError::RequestFailed(msg.to_string()));
    }

    if as_json {
        return serde_json::to_string_pretty(feed.items())
            .map_err(|e| ClientError::ParseError(e.to_string()));
    }

    if feed.items().is_empty() {
        return Ok(format!("No recent public activity for {}", ticket.source_id));
    }
    let lines: Vec<String> = feed
        .items()
        .iter()
        .map(|item| {
            let mut line = format!("{} {}  {} {}", item.date, item.time, item.action, item.repo);
            if !item.details.is_empty() {
                line.push_str(&format!(" ({})", item.details));
            }
            line
        })
        .collect();
    Ok(lines.join("\n"))
}

pub async fn book(
    gateway: &dyn Gateway,
    session: &Session,
    args: BookArgs,
) -> Result<String, IntakeError> {
    let attachment = args.attach.as_deref().map(Attachment::read).transpose()?;
    let booking = ProjectBooking {
        title: args.title,
        description: args.description,
        requirements: args.requirements,
        project_type: args.project_type.to_lowercase(),
        budget_range: args.budget,
        deadline: args.deadline,
        attachment,
    };

    let receipt = book_project(gateway, session, &booking, Utc::now()).await?;
    let mut out = format!("Project booked: {}", receipt.project_id);
    if let Some(url) = receipt.file_url {
        out.push_str(&format!("\nAttachment: {}", url));
    }
    Ok(out)
}

pub async fn train(
    gateway: &dyn Gateway,
    session: &Session,
    args: TrainArgs,
) -> Result<String, IntakeError> {
    let availability = parse_availability(&args.availability)?;
    let application = TrainingApplication {
        name: args.name,
        email: args.email,
        phone: args.phone,
        topic: args.topic,
        other_topic: args.other_topic,
        availability,
    };

    request_training(gateway, session, &application).await?;
    Ok("Training request submitted. We'll be in touch soon.".to_string())
}

fn parse_availability(ids: &[String]) -> Result<Vec<Availability>, IntakeError> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| {
            Availability::from_id(id).ok_or_else(|| {
                let known: Vec<&str> = Availability::ALL.iter().map(Availability::id).collect();
                IntakeError::Validation(format!(
                    "unknown availability '{}' (expected one of: {})",
                    id,
                    known.join(", ")
                ))
            })
        })
        .collect()
}
