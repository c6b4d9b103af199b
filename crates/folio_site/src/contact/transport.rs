//! Contact message delivery
//!
//! The form hands its three field values to an [`EmailTransport`] and waits
//! for a single success or failure. There is no retry. [`EmailJsTransport`]
//! is the production transport and posts to the EmailJS REST API.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

/// The three field values being delivered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeliveryRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Delivery failure reported by a transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The request never got a response
    #[error("delivery transport failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("delivery rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DeliveryError>> + Send + 'a>>;

/// Sends a contact message somewhere
pub trait EmailTransport: Send + Sync {
    fn send<'a>(&'a self, request: &'a DeliveryRequest) -> DeliveryFuture<'a>;
}

/// JSON body accepted by `POST /api/v1.0/email/send`
#[derive(Debug, Serialize)]
pub struct EmailJsPayload<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    /// The account's public key
    pub user_id: &'a str,
    pub template_params: &'a DeliveryRequest,
}

/// EmailJS REST transport
#[derive(Debug, Clone)]
pub struct EmailJsTransport {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailJsTransport {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    pub fn payload<'a>(&'a self, request: &'a DeliveryRequest) -> EmailJsPayload<'a> {
        EmailJsPayload {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: request,
        }
    }

    async fn post(&self, request: &DeliveryRequest) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.payload(request))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "contact message delivered");
        Ok(())
    }
}

impl EmailTransport for EmailJsTransport {
    fn send<'a>(&'a self, request: &'a DeliveryRequest) -> DeliveryFuture<'a> {
        Box::pin(self.post(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emailjs_payload_shape() {
        let transport = EmailJsTransport::new(EmailConfig {
            service_id: "service_abc".into(),
            template_id: "template_xyz".into(),
            public_key: "pk_123".into(),
            ..EmailConfig::default()
        });
        let request = DeliveryRequest {
            name: "Jane".into(),
            email: "jane@x.com".into(),
            message: "Hello".into(),
        };

        let json = serde_json::to_value(transport.payload(&request)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "service_id": "service_abc",
                "template_id": "template_xyz",
                "user_id": "pk_123",
                "template_params": {
                    "name": "Jane",
                    "email": "jane@x.com",
                    "message": "Hello"
                }
            })
        );
    }

    #[test]
    fn test_rejected_error_message() {
        let err = DeliveryError::Rejected {
            status: 400,
            body: "The user ID is invalid".into(),
        };
        assert_eq!(
            err.to_string(),
            "delivery rejected with status 400: The user ID is invalid"
        );
    }
}
