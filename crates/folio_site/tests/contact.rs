use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use folio_site::contact::{DeliveryFuture, DeliveryRequest};
use folio_site::{
    ContactFormController, DeliveryError, EmailTransport, Field, FieldError, Submission,
    SubmitRejected,
};

/// In-memory transport that records every call
#[derive(Default)]
struct RecordingTransport {
    calls: AtomicUsize,
    fail: bool,
}

impl RecordingTransport {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmailTransport for RecordingTransport {
    fn send<'a>(&'a self, _request: &'a DeliveryRequest) -> DeliveryFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail;
        Box::pin(async move {
            tokio::task::yield_now().await;
            if fail {
                Err(DeliveryError::Transport("connection reset".into()))
            } else {
                Ok(())
            }
        })
    }
}

fn filled_form() -> ContactFormController {
    let mut form = ContactFormController::new(Duration::from_secs(2));
    form.set_field(Field::Name, "Jane");
    form.set_field(Field::Email, "jane@x.com");
    form.set_field(Field::Message, "Hi there");
    form
}

#[test]
fn test_missing_message_is_the_only_error() {
    let mut form = ContactFormController::default();
    form.set_field(Field::Name, "Jane");
    form.set_field(Field::Email, "jane@x.com");

    assert!(!form.validate());
    assert_eq!(form.errors().len(), 1);
    assert_eq!(form.errors().get(Field::Message), Some(FieldError::EmptyField));
}

#[test]
fn test_email_format_cases() {
    for (email, ok) in [
        ("user@example.com", true),
        ("user@example", false),
        ("user@.com", false),
        ("userexample.com", false),
    ] {
        let mut form = filled_form();
        form.set_field(Field::Email, email);
        assert_eq!(form.validate(), ok, "{email}");
    }
}

#[tokio::test]
async fn test_success_indicator_and_single_flight() {
    let transport = RecordingTransport::default();
    let mut form = filled_form();

    let pending = form.begin_submit().unwrap();
    assert_eq!(form.submission(), Submission::Submitting);
    assert_eq!(form.begin_submit(), Err(SubmitRejected::AlreadySubmitting));

    let outcome = transport.send(&pending.request).await;
    assert!(form.settle(pending.ticket, outcome));
    assert_eq!(transport.calls(), 1);

    assert_eq!(form.submission(), Submission::Succeeded);
    assert!(form.success_visible());
    assert_eq!(form.field(Field::Name), "");
    assert_eq!(form.field(Field::Message), "");

    form.advance(Duration::from_millis(1999));
    assert!(form.success_visible());
    form.advance(Duration::from_millis(1));
    assert!(!form.success_visible());
    assert_eq!(form.submission(), Submission::Idle);
}

#[tokio::test]
async fn test_submit_through_transport() {
    let transport = RecordingTransport::default();
    let mut form = filled_form();
    form.submit(&transport).await.unwrap();
    assert_eq!(transport.calls(), 1);
    assert!(form.success_visible());

    // Cleared fields fail validation before reaching the transport
    let err = form.submit(&transport).await.unwrap_err();
    assert!(matches!(err, SubmitRejected::Invalid(_)));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_failed_delivery_keeps_fields() {
    let transport = RecordingTransport::failing();
    let mut form = filled_form();
    form.submit(&transport).await.unwrap();

    assert_eq!(form.submission(), Submission::Idle);
    assert!(!form.success_visible());
    assert_eq!(form.field(Field::Name), "Jane");
    assert!(matches!(form.delivery_error(), Some(DeliveryError::Transport(_))));
}

#[tokio::test]
async fn test_response_after_unmount_is_ignored() {
    let transport = RecordingTransport::default();
    let mut form = filled_form();
    let pending = form.begin_submit().unwrap();

    form.unmount();
    let outcome = transport.send(&pending.request).await;
    assert!(!form.settle(pending.ticket, outcome));
    assert!(!form.success_visible());
}
