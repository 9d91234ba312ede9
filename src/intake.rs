//! Project bookings and training requests submitted to the gateway.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};
use thiserror::Error;

use crate::client::{ClientError, Gateway, Query};
use crate::domain::{Availability, NewProject, NewTrainingRequest, OTHER_TOPIC, TRAINING_TOPICS};
use crate::session::Session;

pub const PROJECT_FILES_BUCKET: &str = "project_files";

pub const PROJECT_TYPES: &[&str] = &["software", "hardware"];

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(String),
    #[error("you must be signed in to book a project")]
    NotSignedIn,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to read attachment: {0}")]
    Io(#[from] std::io::Error),
}

fn required(field: &str, value: &str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        return Err(IntakeError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn read(path: &Path) -> Result<Self, IntakeError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self { file_name, bytes })
    }

    fn extension(&self) -> &str {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or("bin")
    }

    fn content_type(&self) -> &'static str {
        match self.extension().to_ascii_lowercase().as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "txt" | "md" => "text/plain",
            "zip" => "application/zip",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectBooking {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub project_type: String,
    pub budget_range: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub attachment: Option<Attachment>,
}

impl ProjectBooking {
    pub fn validate(&self) -> Result<(), IntakeError> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        required("project type", &self.project_type)?;
        if !PROJECT_TYPES.contains(&self.project_type.as_str()) {
            return Err(IntakeError::Validation(format!(
                "project type must be one of: {}",
                PROJECT_TYPES.join(", ")
            )));
        }
        if self.deadline.is_none() {
            return Err(IntakeError::Validation(
                "please select a deadline".to_string(),
            ));
        }
        Ok(())
    }

    fn row(&self, client_id: &str, deadline: NaiveDate) -> NewProject {
        NewProject {
            client_id: client_id.to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: non_blank(&self.requirements),
            project_type: self.project_type.clone(),
            budget_range: non_blank(&self.budget_range),
            deadline: deadline.and_time(chrono::NaiveTime::MIN).and_utc(),
            status: "pending".to_string(),
            file_urls: vec![],
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub project_id: String,
    pub file_url: Option<String>,
}

/// Storage path for a project attachment.
pub fn upload_path(project_id: &str, extension: &str, uploaded_at: DateTime<Utc>) -> String {
    format!(
        "projects/{}/{}.{}",
        project_id,
        uploaded_at.timestamp_millis(),
        extension
    )
}

/// Inserts the project, then uploads the attachment (if any) and records
/// its public URL on the new row.
pub async fn book_project(
    gateway: &dyn Gateway,
    session: &Session,
    booking: &ProjectBooking,
    now: DateTime<Utc>,
) -> Result<BookingReceipt, IntakeError> {
    let user_id = session.user_id().ok_or(IntakeError::NotSignedIn)?;
    booking.validate()?;
    let deadline = booking
        .deadline
        .ok_or_else(|| IntakeError::Validation("please select a deadline".to_string()))?;

    let row = serde_json::to_value(booking.row(user_id, deadline))
        .map_err(|e| ClientError::ParseError(e.to_string()))?;
    let stored = gateway.insert("projects", row).await?;
    let project_id = stored
        .first()
        .and_then(|row| row.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::ParseError("insert returned no project id".to_string()))?;

    tracing::info!("Booked project {}", project_id);

    let file_url = match &booking.attachment {
        Some(attachment) => {
            let path = upload_path(&project_id, attachment.extension(), now);
            gateway
                .upload(
                    PROJECT_FILES_BUCKET,
                    &path,
                    attachment.bytes.clone(),
                    attachment.content_type(),
                )
                .await?;
            let url = gateway.public_url(PROJECT_FILES_BUCKET, &path);
            gateway
                .update(
                    &Query::table("projects").eq("id", &project_id),
                    json!({ "file_urls": [url] }),
                )
                .await?;
            Some(url)
        }
        None => None,
    };

    Ok(BookingReceipt {
        project_id,
        file_url,
    })
}

#[derive(Debug, Clone, Default)]
pub struct TrainingApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub topic: String,
    pub other_topic: Option<String>,
    pub availability: Vec<Availability>,
}

impl TrainingApplication {
    /// The topic that will be stored, resolving the "other" choice.
    pub fn final_topic(&self) -> Result<String, IntakeError> {
        let topic = self.topic.trim();
        if topic == OTHER_TOPIC {
            return non_blank(&self.other_topic).ok_or_else(|| {
                IntakeError::Validation(
                    "please select or specify a training topic".to_string(),
                )
            });
        }
        if topic.is_empty() {
            return Err(IntakeError::Validation(
                "please select or specify a training topic".to_string(),
            ));
        }
        if !TRAINING_TOPICS.contains(&topic) {
            return Err(IntakeError::Validation(format!(
                "unknown training topic: {}",
                topic
            )));
        }
        Ok(topic.to_string())
    }

    pub fn validate(&self) -> Result<String, IntakeError> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(IntakeError::Validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        let topic = self.final_topic()?;
        if self.availability.is_empty() {
            return Err(IntakeError::Validation(
                "please select at least one availability option".to_string(),
            ));
        }
        Ok(topic)
    }

    fn row(&self, session: &Session, topic: String) -> NewTrainingRequest {
        let slots: Vec<&str> = self.availability.iter().map(Availability::id).collect();
        NewTrainingRequest {
            client_id: session.user_id().map(str::to_string),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(&self.phone),
            topic,
            availability: serde_json::to_string(&slots).unwrap_or_else(|_| "[]".to_string()),
            status: "pending".to_string(),
        }
    }
}

/// Anonymous visitors may request training too.
pub async fn request_training(
    gateway: &dyn Gateway,
    session: &Session,
    application: &TrainingApplication,
) -> Result<(), IntakeError> {
    let topic = application.validate()?;
    let row = serde_json::to_value(application.row(session, topic))
        .map_err(|e| ClientError::ParseError(e.to_string()))?;
    gateway.insert("training_requests", row).await?;
    tracing::info!("Submitted training request for {}", application.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::client::fake::FakeGateway;

    fn signed_in() -> Session {
        Session::from_credentials(Some("user-1".into()), Some("jwt".into()))
    }

    fn booking() -> ProjectBooking {
        ProjectBooking {
            title: "Inventory app".into(),
            description: "Track stock".into(),
            requirements: Some("  ".into()),
            project_type: "software".into(),
            budget_range: Some("₹15,000 - ₹30,000".into()),
            deadline: NaiveDate::from_ymd_opt(2024, 9, 1),
            attachment: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    #[test]
    fn upload_path_uses_project_and_millis() {
        assert_eq!(
            upload_path("p1", "pdf", now()),
            "projects/p1/1700000000123.pdf"
        );
    }

    #[test]
    fn booking_requires_deadline_and_known_type() {
        let mut b = booking();
        b.deadline = None;
        assert!(matches!(b.validate(), Err(IntakeError::Validation(_))));

        let mut b = booking();
        b.project_type = "gardening".into();
        assert!(matches!(b.validate(), Err(IntakeError::Validation(_))));

        let mut b = booking();
        b.title = " ".into();
        assert!(matches!(b.validate(), Err(IntakeError::Validation(_))));
    }

    #[tokio::test]
    async fn anonymous_booking_is_rejected_before_any_call() {
        let gateway = FakeGateway::default();
        let result = book_project(&gateway, &Session::Anonymous, &booking(), now()).await;
        assert!(matches!(result, Err(IntakeError::NotSignedIn)));
        assert!(gateway.inserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_without_file_inserts_pending_row() {
        let gateway = FakeGateway::default();
        let receipt = book_project(&gateway, &signed_in(), &booking(), now())
            .await
            .expect("booked");

        assert_eq!(receipt.project_id, "generated-id");
        assert_eq!(receipt.file_url, None);

        let inserts = gateway.inserts.lock().unwrap();
        let (table, row) = &inserts[0];
        assert_eq!(table, "projects");
        assert_eq!(row["status"], "pending");
        assert_eq!(row["client_id"], "user-1");
        assert_eq!(row["type"], "software");
        assert_eq!(row["deadline"], "2024-09-01T00:00:00Z");
        assert_eq!(row["file_urls"], json!([]));
        assert!(row.get("requirements").is_none());
        assert!(gateway.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_with_file_uploads_and_records_url() {
        let gateway = FakeGateway::default();
        let mut b = booking();
        b.attachment = Some(Attachment {
            file_name: "brief.PDF".into(),
            bytes: vec![1, 2, 3],
        });

        let receipt = book_project(&gateway, &signed_in(), &b, now())
            .await
            .expect("booked");

        let expected_url =
            "https://files.test/project_files/projects/generated-id/1700000000123.PDF";
        assert_eq!(receipt.file_url.as_deref(), Some(expected_url));

        let uploads = gateway.uploads.lock().unwrap();
        assert_eq!(
            uploads[0],
            (
                PROJECT_FILES_BUCKET.to_string(),
                "projects/generated-id/1700000000123.PDF".to_string(),
                3
            )
        );

        let updates = gateway.updates.lock().unwrap();
        let (query, patch) = &updates[0];
        assert_eq!(
            query.filter_params(),
            vec![("id".to_string(), "eq.generated-id".to_string())]
        );
        assert_eq!(patch, &json!({ "file_urls": [expected_url] }));
    }

    #[tokio::test]
    async fn failed_insert_stops_before_upload() {
        let gateway = FakeGateway::default().failing("projects");
        let mut b = booking();
        b.attachment = Some(Attachment {
            file_name: "brief.pdf".into(),
            bytes: vec![1],
        });

        let result = book_project(&gateway, &signed_in(), &b, now()).await;
        assert!(matches!(
            result,
            Err(IntakeError::Client(ClientError::Status { status: 400, .. }))
        ));
        assert!(gateway.uploads.lock().unwrap().is_empty());
        assert!(gateway.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_upload_leaves_row_without_file_urls() {
        let gateway = FakeGateway {
            fail_uploads: true,
            ..FakeGateway::default()
        };
        let mut b = booking();
        b.attachment = Some(Attachment {
            file_name: "brief.pdf".into(),
            bytes: vec![1, 2],
        });

        let result = book_project(&gateway, &signed_in(), &b, now()).await;
        assert!(matches!(result, Err(IntakeError::Client(_))));
        assert_eq!(gateway.inserts.lock().unwrap().len(), 1);
        assert_eq!(gateway.uploads.lock().unwrap().len(), 1);
        assert!(gateway.updates.lock().unwrap().is_empty());
    }

    fn application() -> TrainingApplication {
        TrainingApplication {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            phone: None,
            topic: "Python Programming".into(),
            other_topic: None,
            availability: vec![Availability::WeekendMorning, Availability::WeekdayEvening],
        }
    }

    #[test]
    fn other_topic_needs_specifics() {
        let mut app = application();
        app.topic = OTHER_TOPIC.into();
        assert!(matches!(app.validate(), Err(IntakeError::Validation(_))));

        app.other_topic = Some("Embedded Rust".into());
        assert_eq!(app.validate().expect("valid"), "Embedded Rust");
    }

    #[test]
    fn training_requires_availability() {
        let mut app = application();
        app.availability.clear();
        assert!(matches!(app.validate(), Err(IntakeError::Validation(_))));
    }

    #[tokio::test]
    async fn training_row_encodes_availability_as_json_text() {
        let gateway = FakeGateway::default();
        request_training(&gateway, &Session::Anonymous, &application())
            .await
            .expect("submitted");

        let inserts = gateway.inserts.lock().unwrap();
        let (table, row) = &inserts[0];
        assert_eq!(table, "training_requests");
        assert_eq!(row["availability"], "[\"weekend_morning\",\"weekday_evening\"]");
        assert_eq!(row["status"], "pending");
        assert!(row.get("client_id").is_none());
    }

    #[tokio::test]
    async fn failed_training_insert_is_a_client_error() {
        let gateway = FakeGateway::default().failing("training_requests");
        let err = request_training(&gateway, &Session::Anonymous, &application())
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::Client(ClientError::Status { .. })));
        assert_eq!(gateway.inserts.lock().unwrap().len(), 1);
    }

    #[test]
    fn availability_ids_round_trip() {
        for slot in Availability::ALL {
            assert_eq!(Availability::from_id(slot.id()), Some(*slot));
        }
        assert_eq!(Availability::from_id("midnight"), None);
    }
}
