//! Contact form controller
//!
//! Holds the three field values, their validation errors, and the submission
//! state machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──delivered──▶ Succeeded ──expired──▶ Idle
//!                      │
//!                      └──failed──▶ Idle
//! ```
//!
//! Submission is split in two so the caller owns the await: [`begin_submit`]
//! validates and hands back a [`PendingSubmission`], and [`settle`] applies
//! the transport's outcome. A submit attempt while one is in flight is
//! rejected. Unmounting invalidates the outstanding ticket, so a late
//! response is ignored.
//!
//! [`begin_submit`]: ContactFormController::begin_submit
//! [`settle`]: ContactFormController::settle

mod transport;
mod validation;

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub use transport::{
    DeliveryError, DeliveryFuture, DeliveryRequest, EmailJsPayload, EmailJsTransport,
    EmailTransport,
};
pub use validation::{is_valid_email, validate, Field, FieldError, FieldErrors};

use crate::config::ContactConfig;

/// Submission phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Delivered,
    Failed,
    IndicatorExpired,
}

impl Submission {
    /// Handle an event and return the new phase, or None if no transition
    pub fn on_event(&self, event: SubmissionEvent) -> Option<Self> {
        match (self, event) {
            (Submission::Idle | Submission::Succeeded, SubmissionEvent::Submit) => {
                Some(Submission::Submitting)
            }
            (Submission::Submitting, SubmissionEvent::Delivered) => Some(Submission::Succeeded),
            (Submission::Submitting, SubmissionEvent::Failed) => Some(Submission::Idle),
            (Submission::Succeeded, SubmissionEvent::IndicatorExpired) => Some(Submission::Idle),
            _ => None,
        }
    }
}

/// Why a submit attempt did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("the form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("the contact form is no longer mounted")]
    Unmounted,
}

/// Identifies one accepted submit attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// An accepted submit attempt waiting on the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub request: DeliveryRequest,
}

/// The form's three text fields
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

#[derive(Debug)]
pub struct ContactFormController {
    fields: FormFields,
    errors: FieldErrors,
    submission: Submission,
    success_display: Duration,
    /// Time left on the success indicator
    success_remaining: Option<Duration>,
    delivery_error: Option<DeliveryError>,
    generation: u64,
    in_flight: Option<u64>,
    mounted: bool,
}

impl ContactFormController {
    pub fn new(success_display: Duration) -> Self {
        Self {
            fields: FormFields::default(),
            errors: FieldErrors::new(),
            submission: Submission::Idle,
            success_display,
            success_remaining: None,
            delivery_error: None,
            generation: 0,
            in_flight: None,
            mounted: true,
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(config.success_display())
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == Submission::Submitting
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the success indicator is showing
    pub fn success_visible(&self) -> bool {
        self.success_remaining.is_some()
    }

    /// The last delivery failure, kept until the next submit attempt or edit
    pub fn delivery_error(&self) -> Option<&DeliveryError> {
        self.delivery_error.as_ref()
    }

    /// Edit one field
    ///
    /// Clears that field's error only; the other fields keep theirs until
    /// the next full validation.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
        self.errors.clear(field);
        self.delivery_error = None;
    }

    /// Recompute every field error; true if the form is valid
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.fields.name, &self.fields.email, &self.fields.message);
        self.errors.is_empty()
    }

    /// Validate and, if everything passes, enter `Submitting`
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if !self.mounted {
            return Err(SubmitRejected::Unmounted);
        }
        let Some(next) = self.submission.on_event(SubmissionEvent::Submit) else {
            tracing::debug!("submit ignored, delivery already in flight");
            return Err(SubmitRejected::AlreadySubmitting);
        };

        self.delivery_error = None;
        if !self.validate() {
            return Err(SubmitRejected::Invalid(self.errors.clone()));
        }

        self.success_remaining = None;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.submission = next;

        Ok(PendingSubmission {
            ticket: SubmissionTicket {
                generation: self.generation,
            },
            request: DeliveryRequest {
                name: self.fields.name.clone(),
                email: self.fields.email.clone(),
                message: self.fields.message.clone(),
            },
        })
    }

    /// Apply the transport outcome for `ticket`
    ///
    /// Returns false, changing nothing, when the ticket is stale: the form
    /// was unmounted or the ticket was already settled.
    pub fn settle(&mut self, ticket: SubmissionTicket, outcome: Result<(), DeliveryError>) -> bool {
        if !self.mounted || self.in_flight != Some(ticket.generation) {
            tracing::debug!(generation = ticket.generation, "late delivery response ignored");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                self.submission = self
                    .submission
                    .on_event(SubmissionEvent::Delivered)
                    .unwrap_or(Submission::Succeeded);
                self.fields = FormFields::default();
                self.success_remaining = Some(self.success_display);
                tracing::info!("contact message sent");
            }
            Err(err) => {
                tracing::error!(%err, "contact message delivery failed");
                self.submission = self
                    .submission
                    .on_event(SubmissionEvent::Failed)
                    .unwrap_or(Submission::Idle);
                self.delivery_error = Some(err);
            }
        }
        true
    }

    /// Advance the success indicator timer
    pub fn advance(&mut self, dt: Duration) {
        let Some(remaining) = self.success_remaining else {
            return;
        };
        if dt >= remaining {
            self.success_remaining = None;
            if let Some(next) = self.submission.on_event(SubmissionEvent::IndicatorExpired) {
                self.submission = next;
            }
        } else {
            self.success_remaining = Some(remaining - dt);
        }
    }

    /// Validate, deliver through `transport`, and settle
    pub async fn submit<T>(&mut self, transport: &T) -> Result<(), SubmitRejected>
    where
        T: EmailTransport + ?Sized,
    {
        let pending = self.begin_submit()?;
        let outcome = transport.send(&pending.request).await;
        self.settle(pending.ticket, outcome);
        Ok(())
    }

    /// Reattach with a blank form
    ///
    /// The ticket counter survives, so responses for submissions made before
    /// the last unmount stay stale.
    pub fn mount(&mut self) {
        self.fields = FormFields::default();
        self.errors = FieldErrors::new();
        self.submission = Submission::Idle;
        self.success_remaining = None;
        self.delivery_error = None;
        self.in_flight = None;
        self.mounted = true;
    }

    /// Detach from the page: outstanding tickets become stale and the
    /// indicator timer stops
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.in_flight = None;
        self.success_remaining = None;
        if self.submission == Submission::Submitting {
            self.submission = Submission::Idle;
        }
        tracing::debug!("contact form unmounted");
    }
}

impl Default for ContactFormController {
    fn default() -> Self {
        Self::from_config(&ContactConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFormController {
        let mut form = ContactFormController::default();
        form.set_field(Field::Name, "Jane");
        form.set_field(Field::Email, "jane@x.com");
        form.set_field(Field::Message, "Hello there");
        form
    }

    #[test]
    fn test_invalid_form_does_not_submit() {
        let mut form = ContactFormController::default();
        form.set_field(Field::Name, "Jane");
        form.set_field(Field::Email, "jane@x.com");

        let err = form.begin_submit().unwrap_err();
        let SubmitRejected::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Message), Some(FieldError::EmptyField));
        assert_eq!(form.submission(), Submission::Idle);
        assert_eq!(form.field(Field::Name), "Jane");
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = ContactFormController::default();
        form.set_field(Field::Email, "nope");
        assert!(!form.validate());
        assert_eq!(form.errors().len(), 3);

        form.set_field(Field::Email, "still nope");
        assert_eq!(form.errors().get(Field::Email), None);
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn test_resubmit_while_submitting_rejected() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(), Err(SubmitRejected::AlreadySubmitting));
        assert!(form.settle(pending.ticket, Ok(())));
        assert_eq!(form.submission(), Submission::Succeeded);
    }

    #[test]
    fn test_success_indicator_lasts_exactly_display_time() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        form.settle(pending.ticket, Ok(()));

        assert_eq!(form.fields(), &FormFields::default());
        assert!(form.success_visible());
        form.advance(Duration::from_millis(1999));
        assert!(form.success_visible());
        form.advance(Duration::from_millis(1));
        assert!(!form.success_visible());
        assert_eq!(form.submission(), Submission::Idle);
    }

    #[test]
    fn test_failure_keeps_fields_and_surfaces_error() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        form.settle(pending.ticket, Err(DeliveryError::Transport("offline".into())));

        assert_eq!(form.submission(), Submission::Idle);
        assert_eq!(form.field(Field::Message), "Hello there");
        assert!(!form.success_visible());
        assert_eq!(
            form.delivery_error(),
            Some(&DeliveryError::Transport("offline".into()))
        );

        form.set_field(Field::Message, "Hello again");
        assert_eq!(form.delivery_error(), None);
    }

    #[test]
    fn test_late_response_after_unmount_is_ignored() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        form.unmount();

        assert!(!form.settle(pending.ticket, Ok(())));
        assert_eq!(form.field(Field::Name), "Jane");
        assert!(!form.success_visible());
        assert_eq!(form.begin_submit(), Err(SubmitRejected::Unmounted));
    }

    #[test]
    fn test_remount_keeps_old_tickets_stale() {
        let mut form = filled();
        let old = form.begin_submit().unwrap();
        form.unmount();
        form.mount();
        assert_eq!(form.fields(), &FormFields::default());

        form.set_field(Field::Name, "Sam");
        form.set_field(Field::Email, "sam@y.org");
        form.set_field(Field::Message, "Hi");
        let fresh = form.begin_submit().unwrap();
        assert_ne!(old.ticket, fresh.ticket);
        assert!(!form.settle(old.ticket, Ok(())));
        assert!(form.is_submitting());
        assert!(form.settle(fresh.ticket, Ok(())));
    }

    #[test]
    fn test_ticket_settles_once() {
        let mut form = filled();
        let pending = form.begin_submit().unwrap();
        assert!(form.settle(pending.ticket, Err(DeliveryError::Transport("x".into()))));
        assert!(!form.settle(pending.ticket, Ok(())));
        assert_eq!(form.submission(), Submission::Idle);
    }

    #[test]
    fn test_submission_transitions() {
        assert_eq!(
            Submission::Succeeded.on_event(SubmissionEvent::Submit),
            Some(Submission::Submitting)
        );
        assert_eq!(Submission::Submitting.on_event(SubmissionEvent::Submit), None);
        assert_eq!(Submission::Idle.on_event(SubmissionEvent::Delivered), None);
    }
}
