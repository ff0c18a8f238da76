//! Registration form controller
//!
//! [`FormState`] is a plain value: every edit is a transition
//! `(old state, event) -> new state`, and [`submit`] consumes a snapshot and
//! hands back the state the form should show afterwards together with the
//! [`SubmitOutcome`] to notify the user about.

use tracing::{error, info, warn};

use crate::client::RegistrationSink;
use crate::models::{Field, RegistrationSubmission};
use crate::validation::{self, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};

pub const SUCCESS_MESSAGE: &str = "Registration successful!";
pub const FAILURE_MESSAGE: &str = "Failed to register. Please try again.";
pub const ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Edits the controller understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// A field received a new value
    Changed(Field, String),
    /// All fields emptied and error flags cleared
    Reset,
}

/// In-memory state of one registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub vehicle_model: String,
    pub other_notes: String,
    /// Live email validation message, empty when the address is valid
    pub email_error: String,
    /// Set once a submit attempt failed local validation
    pub form_error: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::VehicleModel => &self.vehicle_model,
            Field::OtherNotes => &self.other_notes,
        }
    }

    /// Replace one field. Email edits re-run validation immediately.
    pub fn update(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => {
                self.email_error = validation::email_error_for(&value);
                self.email = value;
            }
            Field::VehicleModel => self.vehicle_model = value,
            Field::OtherNotes => self.other_notes = value,
        }
        self
    }

    pub fn apply(self, event: FormEvent) -> Self {
        match event {
            FormEvent::Changed(field, value) => self.update(field, value),
            FormEvent::Reset => self.reset(),
        }
    }

    /// Empty the five text fields and clear `form_error`
    pub fn reset(mut self) -> Self {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.vehicle_model.clear();
        self.other_notes.clear();
        self.form_error = false;
        self
    }

    /// First failing precondition, checked in field order
    pub fn first_invalid_field(&self) -> Option<Field> {
        if self.first_name.is_empty() {
            Some(Field::FirstName)
        } else if self.last_name.is_empty() {
            Some(Field::LastName)
        } else if self.email.is_empty() || !validation::validate_email(&self.email) {
            Some(Field::Email)
        } else {
            None
        }
    }

    /// Inline error text to show under `field`, if any
    pub fn field_error(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName if self.form_error && self.first_name.is_empty() => {
                Some(FIRST_NAME_REQUIRED)
            }
            Field::LastName if self.form_error && self.last_name.is_empty() => {
                Some(LAST_NAME_REQUIRED)
            }
            Field::Email if !self.email_error.is_empty() => Some(self.email_error.as_str()),
            _ => None,
        }
    }

    pub fn to_submission(&self) -> RegistrationSubmission {
        RegistrationSubmission {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            vehicle_model: self.vehicle_model.clone(),
            other_notes: self.other_notes.clone(),
        }
    }
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed on this field; nothing was sent
    Rejected(Field),
    /// Endpoint answered with a success status
    Succeeded,
    /// Endpoint answered with a non-success status
    Failed { status: u16 },
    /// The request could not be completed
    Errored(String),
}

impl SubmitOutcome {
    /// Message for the blocking notification, `None` for local rejections
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Rejected(_) => None,
            SubmitOutcome::Succeeded => Some(SUCCESS_MESSAGE),
            SubmitOutcome::Failed { .. } => Some(FAILURE_MESSAGE),
            SubmitOutcome::Errored(_) => Some(ERROR_MESSAGE),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded)
    }
}

/// Validate `state` and, if it passes, send it through `sink`.
///
/// Returns the state the form should display next.
pub async fn submit<S>(mut state: FormState, sink: &S) -> (FormState, SubmitOutcome)
where
    S: RegistrationSink + ?Sized,
{
    if let Some(field) = state.first_invalid_field() {
        warn!("Registration blocked: {} failed validation", field.as_str());
        state.form_error = true;
        return (state, SubmitOutcome::Rejected(field));
    }

    let submission = state.to_submission();

    match sink.send(&submission).await {
        Ok(response) if response.is_success() => {
            info!("Registration accepted for {}", submission.email);
            (state.reset(), SubmitOutcome::Succeeded)
        }
        Ok(response) => {
            warn!("Registration refused with status {}", response.status);
            (
                state,
                SubmitOutcome::Failed {
                    status: response.status,
                },
            )
        }
        Err(e) => {
            error!("Error submitting the form: {}", e);
            (state, SubmitOutcome::Errored(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{RegistrationError, SubmitResponse};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    enum Reply {
        Status(u16),
        Unreachable,
    }

    /// Records every submission and answers with a canned reply
    struct MockSink {
        reply: Reply,
        sent: Mutex<Vec<RegistrationSubmission>>,
    }

    impl MockSink {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<RegistrationSubmission> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RegistrationSink for MockSink {
        async fn send(
            &self,
            submission: &RegistrationSubmission,
        ) -> Result<SubmitResponse, RegistrationError> {
            self.sent.lock().unwrap().push(submission.clone());
            match self.reply {
                Reply::Status(status) => Ok(SubmitResponse::new(status)),
                Reply::Unreachable => Err(RegistrationError::Transport(
                    "connection refused".to_string(),
                )),
            }
        }
    }

    fn jane_doe() -> FormState {
        FormState::new()
            .update(Field::FirstName, "Jane")
            .update(Field::LastName, "Doe")
            .update(Field::Email, "jane@example.com")
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = FormState::new();
        for field in Field::all() {
            assert_eq!(state.value(field), "");
            assert!(state.field_error(field).is_none());
        }
        assert!(!state.form_error);
        assert!(state.email_error.is_empty());
    }

    #[test]
    fn test_email_validation_is_live() {
        let state = FormState::new().update(Field::Email, "jane");
        assert_eq!(state.email_error, "Invalid email address");
        assert_eq!(state.field_error(Field::Email), Some("Invalid email address"));

        let state = state.update(Field::Email, "jane@example.com");
        assert!(state.email_error.is_empty());
        assert!(state.field_error(Field::Email).is_none());
    }

    #[test]
    fn test_other_fields_do_not_touch_email_error() {
        let state = FormState::new()
            .update(Field::Email, "bad")
            .update(Field::FirstName, "Jane")
            .update(Field::OtherNotes, "anything goes @ here");
        assert_eq!(state.email_error, "Invalid email address");
        assert_eq!(state.other_notes, "anything goes @ here");
    }

    #[test]
    fn test_apply_events() {
        let state = FormState::new()
            .apply(FormEvent::Changed(Field::VehicleModel, "Supra".to_string()))
            .apply(FormEvent::Changed(Field::Email, "x@y.z".to_string()));
        assert_eq!(state.vehicle_model, "Supra");
        assert_eq!(state.email, "x@y.z");

        let state = state.apply(FormEvent::Reset);
        assert_eq!(state, FormState::new());
    }

    #[test]
    fn test_precondition_order() {
        assert_eq!(FormState::new().first_invalid_field(), Some(Field::FirstName));
        assert_eq!(
            jane_doe().update(Field::LastName, "").first_invalid_field(),
            Some(Field::LastName)
        );
        assert_eq!(
            jane_doe().update(Field::Email, "").first_invalid_field(),
            Some(Field::Email)
        );
        assert_eq!(
            jane_doe().update(Field::Email, "foo").first_invalid_field(),
            Some(Field::Email)
        );
        assert_eq!(jane_doe().first_invalid_field(), None);
    }

    #[tokio::test]
    async fn test_missing_first_name_blocks_submission() {
        let sink = MockSink::new(Reply::Status(201));
        let state = jane_doe().update(Field::FirstName, "");

        let (state, outcome) = submit(state, &sink).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(Field::FirstName));
        assert!(outcome.notification().is_none());
        assert!(sink.sent().is_empty());
        assert!(state.form_error);
        assert_eq!(state.field_error(Field::FirstName), Some("First name is required"));
        assert!(state.field_error(Field::LastName).is_none());
        assert_eq!(state.last_name, "Doe");
        assert_eq!(state.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_invalid_email_blocks_submission() {
        let sink = MockSink::new(Reply::Status(201));
        let state = jane_doe().update(Field::Email, "foo");

        let (state, outcome) = submit(state, &sink).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(Field::Email));
        assert!(sink.sent().is_empty());
        assert!(state.form_error);
        assert_eq!(state.email, "foo");
    }

    #[tokio::test]
    async fn test_success_resets_fields() {
        let sink = MockSink::new(Reply::Status(201));
        let mut state = jane_doe()
            .update(Field::VehicleModel, "Mustang")
            .update(Field::OtherNotes, "Coyote swap");
        state.form_error = true;

        let (state, outcome) = submit(state, &sink).await;

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(outcome.notification(), Some("Registration successful!"));
        assert_eq!(state, FormState::new());

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            RegistrationSubmission {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                vehicle_model: "Mustang".to_string(),
                other_notes: "Coyote swap".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failure_status_keeps_fields() {
        let sink = MockSink::new(Reply::Status(500));

        let (state, outcome) = submit(jane_doe(), &sink).await;

        assert_eq!(outcome, SubmitOutcome::Failed { status: 500 });
        assert_eq!(
            outcome.notification(),
            Some("Failed to register. Please try again.")
        );
        assert_eq!(state.first_name, "Jane");
        assert_eq!(state.last_name, "Doe");
        assert_eq!(state.email, "jane@example.com");
        assert_eq!(sink.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_status_leaves_form_error_alone() {
        let sink = MockSink::new(Reply::Status(400));
        let mut state = jane_doe();
        state.form_error = true;

        let (state, _) = submit(state, &sink).await;
        assert!(state.form_error);
    }

    #[tokio::test]
    async fn test_transport_error_keeps_fields() {
        let sink = MockSink::new(Reply::Unreachable);
        let before = jane_doe();

        let (state, outcome) = submit(before.clone(), &sink).await;

        assert!(matches!(outcome, SubmitOutcome::Errored(ref msg) if msg.contains("connection refused")));
        assert_eq!(
            outcome.notification(),
            Some("An error occurred. Please try again.")
        );
        assert_eq!(state, before);
    }

    /// Collects formatted log lines written by a scoped subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let sink = MockSink::new(Reply::Unreachable);
        let (_, outcome) = submit(jane_doe(), &sink).await;
        assert!(matches!(outcome, SubmitOutcome::Errored(_)));

        let output = logs.contents();
        let line = output
            .lines()
            .find(|l| l.contains("Error submitting the form"))
            .unwrap_or_else(|| panic!("no diagnostic in {output:?}"));
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("connection refused"), "{line}");
    }

    #[tokio::test]
    async fn test_failure_status_is_not_an_error_log() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let sink = MockSink::new(Reply::Status(500));
        let _ = submit(jane_doe(), &sink).await;

        assert!(!logs.contents().contains("Error submitting the form"));
    }

    #[tokio::test]
    async fn test_resubmit_after_correction() {
        let sink = MockSink::new(Reply::Status(200));

        let (state, outcome) = submit(jane_doe().update(Field::LastName, ""), &sink).await;
        assert_eq!(outcome, SubmitOutcome::Rejected(Field::LastName));
        assert_eq!(state.field_error(Field::LastName), Some("Last name is required"));

        let (state, outcome) = submit(state.update(Field::LastName, "Doe"), &sink).await;
        assert!(outcome.is_success());
        assert!(!state.form_error);
        assert_eq!(sink.sent().len(), 1);
    }
}
