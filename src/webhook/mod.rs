//! Webhook receiving, verification and replies
//!
//! The provider delivers call-lifecycle notifications as form-encoded HTTP
//! POSTs, signed with the account's shared secret. This module owns the
//! trust boundary: [`WebhookReceiver`] filters, decodes and verifies one
//! delivery and hands back either a fully verified [`CallEvent`] or
//! nothing. [`CallbackReply`] builds the synchronous IVR directive sent
//! back in the HTTP response, and [`EventRouter`] dispatches verified
//! events to application handlers.

pub mod event;
pub mod handler;
pub mod receiver;
pub mod reply;
pub mod signature;

pub use event::{
    CallEvent, EVENT_FIELD, EventKind, NotifyAnswer, NotifyEnd, NotifyInternal, NotifyIvr,
    NotifyOutEnd, NotifyOutStart, NotifyRecord, NotifyStart, RawPayload, WaitDtmf,
};
pub use handler::{CallEventHandler, EventRouter};
pub use receiver::{SIGNATURE_HEADER, WebhookReceiver};
pub use reply::{CallbackReply, WaitDtmfPrompt};
pub use signature::SignatureCodec;
