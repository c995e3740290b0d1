//! End-to-end webhook handling scenarios

use novofon::webhook::event::EVENT_FIELD;
use novofon::{
    CallEvent, CallbackReply, EventKind, RawPayload, SignatureCodec, WebhookReceiver,
};

const SECRET: &str = "test-secret";

fn payload(pairs: &[(&str, &str)]) -> RawPayload {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sign(payload: &RawPayload) -> String {
    let event = CallEvent::decode(payload.get(EVENT_FIELD).unwrap(), payload).unwrap();
    SignatureCodec::new(SECRET).encode(&event.signature_string())
}

#[test]
fn start_event_answered_with_spoken_digits() {
    let receiver = WebhookReceiver::new(SECRET).with_allowed_events([EventKind::Start]);
    let payload = payload(&[("event", "NOTIFY_START"), ("caller_id", "79990001234")]);
    let signature = SignatureCodec::new(SECRET).encode("79990001234");

    let event = receiver.event(&payload, Some(&signature)).unwrap();
    let CallEvent::Start(start) = &event else {
        panic!("expected a start event, got {:?}", event);
    };
    assert_eq!(start.caller_id, "79990001234");

    // Dictate the last three digits of the caller's number.
    let digits = &start.caller_id[start.caller_id.len() - 3..];
    let body = CallbackReply::new().say_digits(digits, "ru").into_body();
    let reply: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(reply["ivr_saydigits"]["digits"], "234");
    assert_eq!(reply["ivr_saydigits"]["lang"], "ru");
}

#[test]
fn empty_signature_header_rejects_delivery() {
    let receiver = WebhookReceiver::new(SECRET);
    let payload = payload(&[("event", "NOTIFY_START"), ("caller_id", "79990001234")]);
    assert_eq!(receiver.event(&payload, Some("")), None);
}

#[test]
fn single_tampered_signature_character_rejects_delivery() {
    let receiver = WebhookReceiver::new(SECRET);
    let payload = payload(&[("event", "NOTIFY_START"), ("caller_id", "79990001234")]);
    let good = sign(&payload);

    for position in 0..good.len() {
        let mut tampered: Vec<u8> = good.clone().into_bytes();
        tampered[position] = if tampered[position] == b'x' { b'y' } else { b'x' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert_eq!(
            receiver.event(&payload, Some(&tampered)),
            None,
            "tampered byte {} must not verify",
            position
        );
    }
}

#[test]
fn allow_list_drops_valid_deliveries_of_other_kinds() {
    let receiver = WebhookReceiver::new(SECRET).with_allowed_events([EventKind::Record]);
    let payload = payload(&[("event", "NOTIFY_START"), ("caller_id", "79990001234")]);
    let signature = sign(&payload);
    assert_eq!(receiver.event(&payload, Some(&signature)), None);
}

#[test]
fn unknown_event_kind_is_a_noop() {
    let receiver = WebhookReceiver::new(SECRET);
    let payload = payload(&[("event", "NOTIFY_TRANSCRIPTION"), ("caller_id", "1")]);
    assert_eq!(receiver.event(&payload, Some("whatever")), None);
}

#[test]
fn extra_payload_fields_never_leak_into_events() {
    let receiver = WebhookReceiver::new(SECRET);
    let payload = payload(&[
        ("event", "NOTIFY_START"),
        ("caller_id", "79990001234"),
        ("surprise", "provider-addition"),
        ("wait_dtmf[digits]", "9"),
    ]);
    let signature = sign(&payload);

    let event = receiver.event(&payload, Some(&signature)).unwrap();
    let serialized = serde_json::to_string(&event).unwrap();
    assert!(!serialized.contains("surprise"));
    assert!(!serialized.contains("provider-addition"));
    assert!(!serialized.contains("wait_dtmf"));
}

#[test]
fn every_known_kind_round_trips_through_the_receiver() {
    let receiver = WebhookReceiver::new(SECRET);
    let base = [
        ("caller_id", "79990001234"),
        ("called_did", "443020000000"),
        ("destination", "4430"),
        ("internal", "100"),
        ("call_start", "2017-01-01 12:00:00"),
        ("pbx_call_id", "in_abc"),
        ("call_id_with_rec", "rec_abc"),
        ("duration", "35"),
        ("disposition", "answered"),
        ("status_code", "200"),
        ("is_recorded", "1"),
        ("wait_dtmf[name]", "menu"),
        ("wait_dtmf[digits]", "1"),
        ("wait_dtmf[default_behaviour]", "0"),
    ];

    for kind in [
        EventKind::Start,
        EventKind::Internal,
        EventKind::Answer,
        EventKind::End,
        EventKind::OutStart,
        EventKind::OutEnd,
        EventKind::Record,
        EventKind::Ivr,
    ] {
        let mut raw = payload(&base);
        raw.insert(EVENT_FIELD.to_string(), kind.as_str().to_string());
        let signature = sign(&raw);

        let event = receiver.event(&raw, Some(&signature)).unwrap();
        assert_eq!(event.kind(), kind);
    }
}

#[test]
fn wrong_secret_rejects_all_deliveries() {
    let receiver = WebhookReceiver::new("another-secret");
    let payload = payload(&[("event", "NOTIFY_START"), ("caller_id", "79990001234")]);
    let signature = sign(&payload);
    assert_eq!(receiver.event(&payload, Some(&signature)), None);
}
