//! Account request form: validation and submission state machine.
//!
//! ```text
//! Idle ──submit──► Validating ──invalid──► Rejected (error notification, fields kept) ──► Idle
//!                      │
//!                      └──valid──► Submitting (button disabled, loading label)
//!                                      │
//!                                      └──latency elapsed──► sink.submit(draft)
//!                                              ├─ Ok  ──► fields cleared, success notification ──► Idle
//!                                              └─ Err ──► fields kept, error notification ──► Idle
//! ```
//!
//! The submit button is restored on both exits of `Submitting`, so a failed
//! submission can never leave it disabled. `Validating` and `Rejected` are
//! instantaneous and never stored.
//!
//! Submission goes through a [`SubmissionSink`]. The stock
//! [`SimulatedSubmission`] logs the draft and succeeds; a production sink
//! would POST the draft's JSON (see [`RequestDraft`]) to the account
//! request endpoint.

use crate::notification::{NotificationKind, NotificationManager, NotificationTimer};
use crate::timer::{TimerId, TimerQueue};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const LOADING_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Request sent successfully! We will contact you soon.";
pub const FAILURE_MESSAGE: &str = "Could not send the request. Please try again.";

/// Form fields, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Company,
    Email,
    Phone,
    Country,
    FleetSize,
    Message,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Company,
        Field::Email,
        Field::Phone,
        Field::Country,
        Field::FleetSize,
        Field::Message,
    ];

    pub const REQUIRED: [Field; 5] = [
        Field::Name,
        Field::Company,
        Field::Email,
        Field::Phone,
        Field::Country,
    ];

    /// DOM id of the input, also the JSON key of the backend contract.
    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Company => "company",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Country => "country",
            Field::FleetSize => "fleetSize",
            Field::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full name",
            Field::Company => "Company",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Country => "Country",
            Field::FleetSize => "Number of drivers",
            Field::Message => "Message",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entered values of the form. Serializes to the backend request body
/// `{name, company, email, phone, country, fleetSize, message}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub fleet_size: String,
    pub message: String,
}

impl RequestDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Company => &self.company,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Country => &self.country,
            Field::FleetSize => &self.fleet_size,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Company => &mut self.company,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Country => &mut self.country,
            Field::FleetSize => &mut self.fleet_size,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please complete the required field: {0}")]
    MissingField(Field),
    #[error("Please complete all required fields")]
    MissingFields(Vec<Field>),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Check required fields, then the email format.
///
/// A field is missing only when it is empty; whitespace counts as an answer.
pub fn validate(draft: &RequestDraft) -> Result<(), ValidationError> {
    let missing: Vec<Field> = Field::REQUIRED
        .into_iter()
        .filter(|f| draft.get(*f).is_empty())
        .collect();
    match missing.as_slice() {
        [] => {}
        [only] => return Err(ValidationError::MissingField(*only)),
        _ => return Err(ValidationError::MissingFields(missing)),
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("submission transport failed: {0}")]
    Transport(String),
}

/// Where a validated draft goes once the submission latency has elapsed.
pub trait SubmissionSink {
    fn submit(&mut self, draft: &RequestDraft) -> Result<(), SubmissionError>;
}

/// Logs the draft and reports success. Stands in for the account request
/// endpoint, which is not part of this site.
#[derive(Debug, Default)]
pub struct SimulatedSubmission {
    accepted: usize,
}

impl SimulatedSubmission {
    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

impl SubmissionSink for SimulatedSubmission {
    fn submit(&mut self, draft: &RequestDraft) -> Result<(), SubmissionError> {
        let body = serde_json::to_string(draft)
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        info!(%body, "account request submitted (simulated)");
        self.accepted += 1;
        Ok(())
    }
}

/// Timer payloads scheduled by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTimer {
    SubmissionDue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug)]
pub enum FormState {
    Idle,
    Submitting {
        draft: RequestDraft,
        original_label: String,
        timer: TimerId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight; the button is disabled.
    Ignored,
    Rejected(ValidationError),
    Submitting,
}

pub struct RequestForm {
    fields: RequestDraft,
    button: SubmitButton,
    state: FormState,
    latency: Duration,
    sink: Box<dyn SubmissionSink>,
}

impl fmt::Debug for RequestForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestForm")
            .field("fields", &self.fields)
            .field("button", &self.button)
            .field("state", &self.state)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl RequestForm {
    pub fn new(
        button_label: impl Into<String>,
        latency: Duration,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        Self {
            fields: RequestDraft::default(),
            button: SubmitButton {
                label: button_label.into(),
                disabled: false,
            },
            state: FormState::Idle,
            latency,
            sink,
        }
    }

    pub fn fields(&self) -> &RequestDraft {
        &self.fields
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting { .. })
    }

    /// Handle of the in-flight submission delay, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        match self.state {
            FormState::Submitting { timer, .. } => Some(timer),
            FormState::Idle => None,
        }
    }

    /// User typed into a field.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Submit action. The browser's own submission is always suppressed.
    pub fn submit<T>(
        &mut self,
        timers: &mut TimerQueue<T>,
        notifications: &mut NotificationManager,
    ) -> SubmitOutcome
    where
        T: From<NotificationTimer> + From<FormTimer>,
    {
        if self.is_submitting() {
            return SubmitOutcome::Ignored;
        }
        if let Err(err) = validate(&self.fields) {
            notifications.notify(timers, err.to_string(), NotificationKind::Error);
            return SubmitOutcome::Rejected(err);
        }

        let original_label = std::mem::replace(&mut self.button.label, LOADING_LABEL.to_string());
        self.button.disabled = true;
        let timer = timers.schedule(self.latency, FormTimer::SubmissionDue);
        self.state = FormState::Submitting {
            draft: self.fields.clone(),
            original_label,
            timer,
        };
        SubmitOutcome::Submitting
    }

    /// Handle a fired [`FormTimer`]: hand the draft to the sink and return to
    /// `Idle`, restoring the button either way.
    pub fn on_timer<T>(
        &mut self,
        timers: &mut TimerQueue<T>,
        notifications: &mut NotificationManager,
        timer: FormTimer,
    ) where
        T: From<NotificationTimer>,
    {
        let FormTimer::SubmissionDue = timer;
        let FormState::Submitting {
            draft,
            original_label,
            ..
        } = std::mem::replace(&mut self.state, FormState::Idle)
        else {
            return;
        };

        self.button.label = original_label;
        self.button.disabled = false;

        match self.sink.submit(&draft) {
            Ok(()) => {
                self.fields = RequestDraft::default();
                notifications.notify(timers, SUCCESS_MESSAGE, NotificationKind::Success);
            }
            Err(err) => {
                warn!(error = %err, "account request failed");
                notifications.notify(timers, FAILURE_MESSAGE, NotificationKind::Error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATENCY: Duration = Duration::from_millis(1500);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Notification(NotificationTimer),
        Form(FormTimer),
    }

    impl From<NotificationTimer> for Task {
        fn from(t: NotificationTimer) -> Self {
            Task::Notification(t)
        }
    }

    impl From<FormTimer> for Task {
        fn from(t: FormTimer) -> Self {
            Task::Form(t)
        }
    }

    struct Harness {
        form: RequestForm,
        notifications: NotificationManager,
        timers: TimerQueue<Task>,
    }

    impl Harness {
        fn new(sink: Box<dyn SubmissionSink>) -> Self {
            Self {
                form: RequestForm::new("Request account", LATENCY, sink),
                notifications: NotificationManager::new(
                    Duration::from_millis(5000),
                    Duration::from_millis(300),
                ),
                timers: TimerQueue::new(),
            }
        }

        fn fill(&mut self, values: [(&str, &str); 5]) {
            for (id, value) in values {
                self.form.input(Field::from_id(id).unwrap(), value);
            }
        }

        fn submit(&mut self) -> SubmitOutcome {
            self.form.submit(&mut self.timers, &mut self.notifications)
        }

        fn advance(&mut self, by: Duration) {
            let until = self.timers.now() + by;
            while let Some((_, task)) = self.timers.pop_due(until) {
                match task {
                    Task::Notification(t) => self.notifications.on_timer(&mut self.timers, t),
                    Task::Form(t) => {
                        self.form
                            .on_timer(&mut self.timers, &mut self.notifications, t)
                    }
                }
            }
        }

        fn notification(&self) -> Option<(NotificationKind, &str)> {
            self.notifications
                .current()
                .map(|n| (n.kind, n.message.as_str()))
        }
    }

    struct FailingSink;

    impl SubmissionSink for FailingSink {
        fn submit(&mut self, _draft: &RequestDraft) -> Result<(), SubmissionError> {
            Err(SubmissionError::Transport("connection refused".into()))
        }
    }

    fn valid() -> [(&'static str, &'static str); 5] {
        [
            ("name", "A"),
            ("company", "B"),
            ("email", "a@b.co"),
            ("phone", "1"),
            ("country", "X"),
        ]
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("ops.team@logiflow.example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
    }

    #[test]
    fn validate_reports_single_missing_field() {
        let draft = RequestDraft {
            name: String::new(),
            company: "A".into(),
            email: "a@b.com".into(),
            phone: "1".into(),
            country: "X".into(),
            ..RequestDraft::default()
        };
        assert_eq!(
            validate(&draft),
            Err(ValidationError::MissingField(Field::Name))
        );
    }

    #[test]
    fn validate_reports_all_missing_fields() {
        let draft = RequestDraft {
            email: "a@b.com".into(),
            ..RequestDraft::default()
        };
        assert_eq!(
            validate(&draft),
            Err(ValidationError::MissingFields(vec![
                Field::Name,
                Field::Company,
                Field::Phone,
                Field::Country,
            ]))
        );
    }

    #[test]
    fn validate_accepts_whitespace_only_required_fields() {
        let mut draft = RequestDraft::default();
        for (field, value) in Field::REQUIRED.into_iter().zip(["   ", "B", "a@b.co", "1", "X"]) {
            draft.set(field, value);
        }
        assert_eq!(validate(&draft), Ok(()));

        draft.set(Field::Name, "");
        assert_eq!(
            validate(&draft),
            Err(ValidationError::MissingField(Field::Name))
        );
    }

    #[test]
    fn optional_fields_are_not_required() {
        assert!(!Field::FleetSize.is_required());
        assert!(!Field::Message.is_required());
    }

    #[test]
    fn draft_serializes_to_backend_contract() {
        let draft = RequestDraft {
            name: "Ana".into(),
            fleet_size: "11-50".into(),
            ..RequestDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["name", "company", "email", "phone", "country", "fleetSize", "message"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(json["fleetSize"], "11-50");
    }

    #[test]
    fn empty_required_field_is_rejected_with_error_notification() {
        let mut h = Harness::new(Box::new(SimulatedSubmission::default()));
        h.fill([
            ("name", ""),
            ("company", "A"),
            ("email", "a@b.com"),
            ("phone", "1"),
            ("country", "X"),
        ]);

        assert!(matches!(h.submit(), SubmitOutcome::Rejected(_)));
        let (kind, message) = h.notification().unwrap();
        assert_eq!(kind, NotificationKind::Error);
        assert!(message.contains("Full name"));
        // Entered values stay put.
        assert_eq!(h.form.fields().company, "A");
        assert!(!h.form.button().disabled);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut h = Harness::new(Box::new(SimulatedSubmission::default()));
        h.fill([
            ("name", "A"),
            ("company", "B"),
            ("email", "not-an-email"),
            ("phone", "1"),
            ("country", "X"),
        ]);

        assert_eq!(
            h.submit(),
            SubmitOutcome::Rejected(ValidationError::InvalidEmail)
        );
        assert_eq!(h.notification().unwrap().0, NotificationKind::Error);
        assert_eq!(h.form.fields().email, "not-an-email");
    }

    #[test]
    fn valid_submission_lifecycle() {
        let mut h = Harness::new(Box::new(SimulatedSubmission::default()));
        h.fill(valid());

        assert_eq!(h.submit(), SubmitOutcome::Submitting);
        assert!(h.form.button().disabled);
        assert_eq!(h.form.button().label, LOADING_LABEL);
        assert!(h.notification().is_none());

        let timer = h.form.pending_timer().unwrap();
        h.advance(LATENCY - Duration::from_millis(1));
        assert!(h.form.is_submitting());
        assert!(h.timers.is_pending(timer));

        h.advance(Duration::from_millis(1));
        assert!(!h.form.is_submitting());
        assert_eq!(h.form.pending_timer(), None);
        assert!(!h.timers.is_pending(timer));
        assert!(!h.form.button().disabled);
        assert_eq!(h.form.button().label, "Request account");
        assert!(h.form.fields().is_empty());
        assert_eq!(
            h.notification(),
            Some((NotificationKind::Success, SUCCESS_MESSAGE))
        );
    }

    #[test]
    fn submit_while_submitting_is_ignored() {
        let mut h = Harness::new(Box::new(SimulatedSubmission::default()));
        h.fill(valid());
        h.submit();
        let timer = h.form.pending_timer();
        assert_eq!(h.submit(), SubmitOutcome::Ignored);
        assert_eq!(h.timers.len(), 1);
        assert_eq!(h.form.pending_timer(), timer);
    }

    #[test]
    fn failed_submission_restores_button_and_keeps_values() {
        let mut h = Harness::new(Box::new(FailingSink));
        h.fill(valid());
        h.submit();
        h.advance(LATENCY);

        assert!(!h.form.button().disabled);
        assert_eq!(h.form.button().label, "Request account");
        assert_eq!(h.form.fields().email, "a@b.co");
        assert_eq!(
            h.notification(),
            Some((NotificationKind::Error, FAILURE_MESSAGE))
        );
    }

    #[test]
    fn form_can_be_resubmitted_after_rejection() {
        let mut h = Harness::new(Box::new(SimulatedSubmission::default()));
        h.fill(valid());
        h.form.input(Field::Email, "bad");
        assert!(matches!(h.submit(), SubmitOutcome::Rejected(_)));

        h.form.input(Field::Email, "a@b.co");
        assert_eq!(h.submit(), SubmitOutcome::Submitting);
    }
}
