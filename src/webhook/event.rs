//! Call-event variants and payload decoding
//!
//! Inbound notifications arrive as a flat form-encoded field map. The
//! `event` field selects one variant out of a closed set; each variant
//! retains only its declared fields (whitelist construction) and defines
//! the canonical string its signature is computed over. Fields absent from
//! the payload contribute empty strings to the canonical string.

use serde::Serialize;
use std::collections::HashMap;

/// Raw webhook payload as delivered by the transport
pub type RawPayload = HashMap<String, String>;

/// Payload field carrying the event discriminator
pub const EVENT_FIELD: &str = "event";

/// Call-event kinds recognized by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Incoming call started (`NOTIFY_START`)
    Start,
    /// Incoming call reached a PBX extension (`NOTIFY_INTERNAL`)
    Internal,
    /// Call was answered (`NOTIFY_ANSWER`)
    Answer,
    /// Incoming call ended (`NOTIFY_END`)
    End,
    /// Outgoing call started (`NOTIFY_OUT_START`)
    OutStart,
    /// Outgoing call ended (`NOTIFY_OUT_END`)
    OutEnd,
    /// Call recording is ready for download (`NOTIFY_RECORD`)
    Record,
    /// IVR digit collection result (`NOTIFY_IVR`)
    Ivr,
}

impl EventKind {
    /// Wire name of the discriminator value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "NOTIFY_START",
            Self::Internal => "NOTIFY_INTERNAL",
            Self::Answer => "NOTIFY_ANSWER",
            Self::End => "NOTIFY_END",
            Self::OutStart => "NOTIFY_OUT_START",
            Self::OutEnd => "NOTIFY_OUT_END",
            Self::Record => "NOTIFY_RECORD",
            Self::Ivr => "NOTIFY_IVR",
        }
    }

    /// Parse a discriminator value, `None` for kinds this client predates
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NOTIFY_START" => Some(Self::Start),
            "NOTIFY_INTERNAL" => Some(Self::Internal),
            "NOTIFY_ANSWER" => Some(Self::Answer),
            "NOTIFY_END" => Some(Self::End),
            "NOTIFY_OUT_START" => Some(Self::OutStart),
            "NOTIFY_OUT_END" => Some(Self::OutEnd),
            "NOTIFY_RECORD" => Some(Self::Record),
            "NOTIFY_IVR" => Some(Self::Ivr),
            _ => None,
        }
    }

    /// Payload fields retained for this kind, as data
    ///
    /// The discriminator itself is consumed by dispatch and not listed.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Start => NotifyStart::FIELDS,
            Self::Internal => NotifyInternal::FIELDS,
            Self::Answer => NotifyAnswer::FIELDS,
            Self::End => NotifyEnd::FIELDS,
            Self::OutStart => NotifyOutStart::FIELDS,
            Self::OutEnd => NotifyOutEnd::FIELDS,
            Self::Record => NotifyRecord::FIELDS,
            Self::Ivr => NotifyIvr::FIELDS,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy one declared field out of the raw payload, empty when absent
fn field(payload: &RawPayload, name: &str) -> String {
    payload.get(name).cloned().unwrap_or_default()
}

/// Incoming call started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyStart {
    /// Call start time, `Y-m-d H:i:s`
    pub call_start: String,
    /// Permanent ID of the call within the PBX
    pub pbx_call_id: String,
    /// Caller number
    pub caller_id: String,
    /// Dialed direct number
    pub called_did: String,
}

impl NotifyStart {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] =
        &["call_start", "pbx_call_id", "caller_id", "called_did"];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            caller_id: field(payload, "caller_id"),
            called_did: field(payload, "called_did"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.caller_id, self.called_did, self.call_start)
    }
}

/// Incoming call reached a PBX extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyInternal {
    pub call_start: String,
    pub pbx_call_id: String,
    pub caller_id: String,
    pub called_did: String,
    /// Extension number the call was routed to
    pub internal: String,
}

impl NotifyInternal {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &[
        "call_start",
        "pbx_call_id",
        "caller_id",
        "called_did",
        "internal",
    ];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            caller_id: field(payload, "caller_id"),
            called_did: field(payload, "called_did"),
            internal: field(payload, "internal"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.caller_id, self.called_did, self.call_start)
    }
}

/// Call was answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyAnswer {
    pub call_start: String,
    pub pbx_call_id: String,
    pub caller_id: String,
    /// Answering number
    pub destination: String,
    pub called_did: String,
    pub internal: String,
}

impl NotifyAnswer {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &[
        "call_start",
        "pbx_call_id",
        "caller_id",
        "destination",
        "called_did",
        "internal",
    ];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            caller_id: field(payload, "caller_id"),
            destination: field(payload, "destination"),
            called_did: field(payload, "called_did"),
            internal: field(payload, "internal"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.caller_id, self.destination, self.call_start)
    }
}

/// Incoming call ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyEnd {
    pub call_start: String,
    pub pbx_call_id: String,
    pub caller_id: String,
    pub called_did: String,
    pub internal: String,
    /// Call duration in seconds
    pub duration: String,
    /// Call outcome, e.g. `answered` or `busy`
    pub disposition: String,
    pub status_code: String,
    /// `1` when a recording exists for this call
    pub is_recorded: String,
    /// ID of the recording file
    pub call_id_with_rec: String,
}

impl NotifyEnd {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &[
        "call_start",
        "pbx_call_id",
        "caller_id",
        "called_did",
        "internal",
        "duration",
        "disposition",
        "status_code",
        "is_recorded",
        "call_id_with_rec",
    ];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            caller_id: field(payload, "caller_id"),
            called_did: field(payload, "called_did"),
            internal: field(payload, "internal"),
            duration: field(payload, "duration"),
            disposition: field(payload, "disposition"),
            status_code: field(payload, "status_code"),
            is_recorded: field(payload, "is_recorded"),
            call_id_with_rec: field(payload, "call_id_with_rec"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.caller_id, self.called_did, self.call_start)
    }
}

/// Outgoing call started
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutStart {
    pub call_start: String,
    pub pbx_call_id: String,
    /// Called number
    pub destination: String,
    /// Extension number the call originates from
    pub internal: String,
}

impl NotifyOutStart {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] =
        &["call_start", "pbx_call_id", "destination", "internal"];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            destination: field(payload, "destination"),
            internal: field(payload, "internal"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.internal, self.destination, self.call_start)
    }
}

/// Outgoing call ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyOutEnd {
    pub call_start: String,
    pub pbx_call_id: String,
    pub destination: String,
    pub internal: String,
    pub duration: String,
    pub disposition: String,
    pub status_code: String,
    pub is_recorded: String,
    pub call_id_with_rec: String,
}

impl NotifyOutEnd {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &[
        "call_start",
        "pbx_call_id",
        "destination",
        "internal",
        "duration",
        "disposition",
        "status_code",
        "is_recorded",
        "call_id_with_rec",
    ];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            destination: field(payload, "destination"),
            internal: field(payload, "internal"),
            duration: field(payload, "duration"),
            disposition: field(payload, "disposition"),
            status_code: field(payload, "status_code"),
            is_recorded: field(payload, "is_recorded"),
            call_id_with_rec: field(payload, "call_id_with_rec"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.internal, self.destination, self.call_start)
    }
}

/// Call recording is ready for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyRecord {
    pub pbx_call_id: String,
    pub call_id_with_rec: String,
}

impl NotifyRecord {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &["pbx_call_id", "call_id_with_rec"];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            pbx_call_id: field(payload, "pbx_call_id"),
            call_id_with_rec: field(payload, "call_id_with_rec"),
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}", self.pbx_call_id, self.call_id_with_rec)
    }
}

/// Digits entered during a DTMF wait, nested in [`NotifyIvr`]
///
/// Delivered inside the form payload under bracketed keys
/// (`wait_dtmf[name]` etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitDtmf {
    /// Name of the DTMF request this input answers
    pub name: String,
    /// Entered digits
    pub digits: String,
    /// `1` when the default behaviour is active
    pub default_behaviour: String,
}

/// IVR digit collection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyIvr {
    pub call_start: String,
    pub pbx_call_id: String,
    pub caller_id: String,
    pub called_did: String,
    /// Collected DTMF input
    pub wait_dtmf: WaitDtmf,
}

impl NotifyIvr {
    /// Recognized payload fields
    pub const FIELDS: &'static [&'static str] = &[
        "call_start",
        "pbx_call_id",
        "caller_id",
        "called_did",
        "wait_dtmf[name]",
        "wait_dtmf[digits]",
        "wait_dtmf[default_behaviour]",
    ];

    fn from_payload(payload: &RawPayload) -> Self {
        Self {
            call_start: field(payload, "call_start"),
            pbx_call_id: field(payload, "pbx_call_id"),
            caller_id: field(payload, "caller_id"),
            called_did: field(payload, "called_did"),
            wait_dtmf: WaitDtmf {
                name: field(payload, "wait_dtmf[name]"),
                digits: field(payload, "wait_dtmf[digits]"),
                default_behaviour: field(payload, "wait_dtmf[default_behaviour]"),
            },
        }
    }

    fn signature_string(&self) -> String {
        format!("{}{}{}", self.caller_id, self.called_did, self.call_start)
    }
}

/// A decoded call event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallEvent {
    Start(NotifyStart),
    Internal(NotifyInternal),
    Answer(NotifyAnswer),
    End(NotifyEnd),
    OutStart(NotifyOutStart),
    OutEnd(NotifyOutEnd),
    Record(NotifyRecord),
    Ivr(NotifyIvr),
}

impl CallEvent {
    /// Decode a raw payload into the variant selected by `discriminator`
    ///
    /// Only declared fields are copied out of the payload; everything else
    /// is dropped so that provider-side payload additions stay invisible.
    /// Unknown discriminators yield `None`, never an error.
    pub fn decode(discriminator: &str, payload: &RawPayload) -> Option<Self> {
        let event = match EventKind::parse(discriminator)? {
            EventKind::Start => Self::Start(NotifyStart::from_payload(payload)),
            EventKind::Internal => Self::Internal(NotifyInternal::from_payload(payload)),
            EventKind::Answer => Self::Answer(NotifyAnswer::from_payload(payload)),
            EventKind::End => Self::End(NotifyEnd::from_payload(payload)),
            EventKind::OutStart => Self::OutStart(NotifyOutStart::from_payload(payload)),
            EventKind::OutEnd => Self::OutEnd(NotifyOutEnd::from_payload(payload)),
            EventKind::Record => Self::Record(NotifyRecord::from_payload(payload)),
            EventKind::Ivr => Self::Ivr(NotifyIvr::from_payload(payload)),
        };
        Some(event)
    }

    /// The kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Start(_) => EventKind::Start,
            Self::Internal(_) => EventKind::Internal,
            Self::Answer(_) => EventKind::Answer,
            Self::End(_) => EventKind::End,
            Self::OutStart(_) => EventKind::OutStart,
            Self::OutEnd(_) => EventKind::OutEnd,
            Self::Record(_) => EventKind::Record,
            Self::Ivr(_) => EventKind::Ivr,
        }
    }

    /// Canonical string the event's signature is computed over
    pub fn signature_string(&self) -> String {
        match self {
            Self::Start(e) => e.signature_string(),
            Self::Internal(e) => e.signature_string(),
            Self::Answer(e) => e.signature_string(),
            Self::End(e) => e.signature_string(),
            Self::OutStart(e) => e.signature_string(),
            Self::OutEnd(e) => e.signature_string(),
            Self::Record(e) => e.signature_string(),
            Self::Ivr(e) => e.signature_string(),
        }
    }
}
