//! Webhook receiver for inbound call notifications
//!
//! One inbound delivery moves through fixed gates: event filter, variant
//! decode, signature lookup, signature verification. Any gate failing
//! yields `None`; the receiver never returns a partially trusted event and
//! never surfaces trust failures as errors, so an HTTP handler can reply
//! 200 regardless of authenticity.

use crate::webhook::event::{CallEvent, EVENT_FIELD, EventKind, RawPayload};
use crate::webhook::signature::SignatureCodec;
use std::collections::HashMap;

/// Transport header carrying the delivery signature
pub const SIGNATURE_HEADER: &str = "Signature";

/// Receiver for incoming call-event webhooks
#[derive(Debug, Clone)]
pub struct WebhookReceiver {
    codec: SignatureCodec,
    allowed_events: Option<Vec<EventKind>>,
}

impl WebhookReceiver {
    /// Create a receiver with the given shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            codec: SignatureCodec::new(secret),
            allowed_events: None,
        }
    }

    /// Restrict the receiver to an allow-list of event kinds
    ///
    /// This is a routing filter, not a security check; events outside the
    /// list are dropped before decoding.
    pub fn with_allowed_events(mut self, events: impl IntoIterator<Item = EventKind>) -> Self {
        self.allowed_events = Some(events.into_iter().collect());
        self
    }

    /// Verify and decode one inbound delivery
    ///
    /// `signature` is the value of the `Signature` transport header, passed
    /// in explicitly to keep the receiver transport-agnostic. Returns the
    /// fully verified typed event, or `None` when the delivery is filtered,
    /// unknown, unsigned or forged.
    pub fn event(&self, payload: &RawPayload, signature: Option<&str>) -> Option<CallEvent> {
        let discriminator = payload
            .get(EVENT_FIELD)
            .map(String::as_str)
            .filter(|value| !value.is_empty())?;

        if let Some(allowed) = &self.allowed_events
            && !allowed.iter().any(|kind| kind.as_str() == discriminator)
        {
            tracing::debug!(event = discriminator, "webhook filtered by allow-list");
            return None;
        }

        let Some(event) = CallEvent::decode(discriminator, payload) else {
            tracing::debug!(event = discriminator, "unknown webhook event kind");
            return None;
        };

        // An unsigned delivery is never trusted, even when it decodes.
        let Some(signature) = signature.filter(|value| !value.is_empty()) else {
            tracing::debug!(event = discriminator, "webhook signature missing");
            return None;
        };

        if !self.codec.matches(&event.signature_string(), signature) {
            tracing::debug!(event = discriminator, "webhook signature mismatch");
            return None;
        }

        Some(event)
    }

    /// Verify and decode a form-encoded request body
    pub fn event_from_form(&self, body: &str, signature: Option<&str>) -> Option<CallEvent> {
        let payload: RawPayload = serde_urlencoded::from_str::<Vec<(String, String)>>(body)
            .ok()?
            .into_iter()
            .collect();
        self.event(&payload, signature)
    }

    /// Verify and decode using a header map to locate the signature
    ///
    /// Looks up the `Signature` header case-insensitively.
    pub fn event_from_request(
        &self,
        payload: &RawPayload,
        headers: &HashMap<String, String>,
    ) -> Option<CallEvent> {
        let signature = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
            .map(|(_, value)| value.as_str());
        self.event(payload, signature)
    }

    /// Codec this receiver verifies with (used to sign test fixtures)
    pub fn codec(&self) -> &SignatureCodec {
        &self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn start_payload() -> RawPayload {
        [
            ("event", "NOTIFY_START"),
            ("caller_id", "79990001234"),
            ("called_did", "443020000000"),
            ("call_start", "2017-01-01 12:00:00"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn sign(payload: &RawPayload) -> String {
        let discriminator = payload.get(EVENT_FIELD).unwrap();
        let event = CallEvent::decode(discriminator, payload).unwrap();
        SignatureCodec::new(SECRET).encode(&event.signature_string())
    }

    #[test]
    fn test_valid_delivery() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = start_payload();
        let signature = sign(&payload);

        let event = receiver.event(&payload, Some(&signature)).unwrap();
        assert_eq!(event.kind(), EventKind::Start);
    }

    #[test]
    fn test_missing_signature() {
        let receiver = WebhookReceiver::new(SECRET);
        assert_eq!(receiver.event(&start_payload(), None), None);
    }

    #[test]
    fn test_empty_signature() {
        let receiver = WebhookReceiver::new(SECRET);
        assert_eq!(receiver.event(&start_payload(), Some("")), None);
    }

    #[test]
    fn test_tampered_signature() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = start_payload();
        let mut signature = sign(&payload);
        signature.replace_range(0..1, "x");
        assert_eq!(receiver.event(&payload, Some(&signature)), None);
    }

    #[test]
    fn test_missing_event_field() {
        let receiver = WebhookReceiver::new(SECRET);
        let mut payload = start_payload();
        payload.remove(EVENT_FIELD);
        assert_eq!(receiver.event(&payload, Some("anything")), None);
    }

    #[test]
    fn test_allow_list_rejects_valid_signature() {
        let receiver =
            WebhookReceiver::new(SECRET).with_allowed_events([EventKind::End, EventKind::Record]);
        let payload = start_payload();
        let signature = sign(&payload);
        assert_eq!(receiver.event(&payload, Some(&signature)), None);
    }

    #[test]
    fn test_allow_list_passes_listed_kind() {
        let receiver = WebhookReceiver::new(SECRET).with_allowed_events([EventKind::Start]);
        let payload = start_payload();
        let signature = sign(&payload);
        assert!(receiver.event(&payload, Some(&signature)).is_some());
    }

    #[test]
    fn test_unknown_event_kind_is_silent() {
        let receiver = WebhookReceiver::new(SECRET);
        let mut payload = start_payload();
        payload.insert(EVENT_FIELD.into(), "NOTIFY_FUTURE".into());
        assert_eq!(receiver.event(&payload, Some("sig")), None);
    }

    #[test]
    fn test_event_from_form() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = start_payload();
        let signature = sign(&payload);
        let body =
            "event=NOTIFY_START&caller_id=79990001234&called_did=443020000000\
             &call_start=2017-01-01+12%3A00%3A00";

        let event = receiver.event_from_form(body, Some(&signature)).unwrap();
        assert_eq!(event.kind(), EventKind::Start);
    }

    #[test]
    fn test_event_from_request_header_lookup() {
        let receiver = WebhookReceiver::new(SECRET);
        let payload = start_payload();
        let mut headers = HashMap::new();
        headers.insert("signature".to_string(), sign(&payload));

        assert!(receiver.event_from_request(&payload, &headers).is_some());
    }

    #[test]
    fn test_event_from_request_no_header() {
        let receiver = WebhookReceiver::new(SECRET);
        let headers = HashMap::new();
        assert_eq!(receiver.event_from_request(&start_payload(), &headers), None);
    }
}
