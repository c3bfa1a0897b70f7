use log::{info, warn};
use serde::Serialize;

use crate::config::DeviceConfig;
use crate::wifi::http::{Http, HttpClient, HttpError, HttpHeader, HttpHeaderType, HttpsClient};

/// The only status the webhook answers with when it accepts an alert
const WEBHOOK_ACCEPTED_STATUS: u16 = 204;

#[derive(Debug)]
pub enum AlertError {
    EncodingError,
    HttpError(HttpError),
}

/// Immutable text payload of one alert. Serializes to `{"content": <text>}`
/// with no other members, which is the shape the webhook endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    content: String,
}

impl AlertMessage {
    pub fn new(content: impl Into<String>) -> Self {
        AlertMessage {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// What became of a single alert attempt. There is no retry path, an attempt
/// that did not come back as `Delivered` is simply dropped.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// The webhook answered 204
    Delivered,
    /// The webhook answered, but with some other status
    Rejected(u16),
    /// The request never produced an answer
    Failed(AlertError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Posts alert messages to the configured webhook.
///
/// The dispatcher only borrows the device configuration, it holds no
/// connection between sends. Every attempt opens its own connection and
/// releases it before returning, whichever way the attempt ends.
pub struct AlertDispatcher<'a> {
    config: &'a DeviceConfig,
}

impl<'a> AlertDispatcher<'a> {
    pub fn new(config: &'a DeviceConfig) -> AlertDispatcher<'a> {
        AlertDispatcher { config }
    }

    /// Sends one alert to the webhook and reports what happened.
    ///
    /// Every failure mode is terminal for this single attempt only: the
    /// outcome is logged and returned, never raised. Callers that do not care
    /// may ignore the returned outcome entirely.
    pub fn send(&self, message: &AlertMessage) -> DeliveryOutcome {
        let outcome = match self.attempt(message) {
            Ok(status) => classify_status(status),
            Err(err) => DeliveryOutcome::Failed(err),
        };

        match &outcome {
            DeliveryOutcome::Delivered => info!("alert sent to webhook"),
            DeliveryOutcome::Rejected(status) => {
                warn!("failed to send alert, status code: {}", status)
            }
            DeliveryOutcome::Failed(err) => warn!("error sending alert: {:?}", err),
        }

        outcome
    }

    fn attempt(&self, message: &AlertMessage) -> Result<u16, AlertError> {
        let body = serde_json::to_string(message).map_err(|_| AlertError::EncodingError)?;
        let webhook = self.config.webhook();

        let status = if uses_tls(webhook) {
            post_json::<HttpsClient>(webhook, body)
        } else {
            post_json::<HttpClient>(webhook, body)
        }
        .map_err(AlertError::HttpError)?;

        Ok(status)
    }
}

/// POSTs the body as JSON and waits for the answer. The connection lives only
/// inside this call, every return path releases it.
fn post_json<C: Http>(uri: &str, body: String) -> Result<u16, HttpError> {
    let mut client = C::new()?;
    let headers = vec![HttpHeader::new(
        HttpHeaderType::ContentType,
        "application/json".to_string(),
    )];

    client.post(uri, headers, Some(body))?;

    let mut scratch = [0u8; 64];
    client.wait_for_response(&mut scratch)?;
    Ok(client.response_status())
}

/// 204 means accepted, anything else is a rejection
fn classify_status(status: u16) -> DeliveryOutcome {
    if status == WEBHOOK_ACCEPTED_STATUS {
        DeliveryOutcome::Delivered
    } else {
        DeliveryOutcome::Rejected(status)
    }
}

fn uses_tls(uri: &str) -> bool {
    uri.starts_with("https://")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_message_serializes_to_the_webhook_shape() {
        let message = AlertMessage::new("You have mail!");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"content":"You have mail!"}"#);
    }

    #[test]
    fn test1_message_carries_no_extra_members() {
        let message = AlertMessage::new("hello");
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&message).unwrap()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["content"], "hello");
    }

    #[test]
    fn test2_quotes_in_the_text_stay_valid_json() {
        let message = AlertMessage::new(r#"mail from "someone""#);
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&message).unwrap()).unwrap();
        assert_eq!(value["content"], r#"mail from "someone""#);
    }

    #[test]
    fn test3_status_204_is_delivered() {
        assert!(classify_status(204).is_delivered());
    }

    #[test]
    fn test4_any_other_status_is_rejected() {
        for status in [200, 201, 400, 404, 429, 500] {
            match classify_status(status) {
                DeliveryOutcome::Rejected(code) => assert_eq!(code, status),
                other => panic!("status {} classified as {:?}", status, other),
            }
        }
    }

    #[test]
    fn test5_webhook_scheme_selects_the_client() {
        assert!(uses_tls("https://discord.com/api/webhooks/1/abc"));
        assert!(!uses_tls("http://192.168.0.10/hook"));
    }
}
