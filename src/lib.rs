//! Novofon cloud PBX API client
//!
//! Typed request builders for the provider's `/v1` REST endpoints plus a
//! webhook receiver that authenticates and decodes inbound call-event
//! notifications.
//!
//! ## Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        novofon                             │
//! │                                                            │
//! │  ┌──────────────────────────┐  ┌────────────────────────┐  │
//! │  │        REST API          │  │       Webhooks         │  │
//! │  │  balance | sip | pbx     │  │  receive → verify →    │  │
//! │  │  statistics | callback   │  │  typed event → reply   │  │
//! │  └──────────────────────────┘  └────────────────────────┘  │
//! │              │                            │                │
//! │        signed requests           HMAC verification         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use novofon::{Api, CallEvent, CallbackReply, EventKind};
//!
//! let api = Api::new("key", "secret");
//! let balance = api.get_balance().await?;
//!
//! // Inside a webhook HTTP handler: `payload` is the form-decoded POST
//! // body, `signature` the value of the `Signature` header.
//! let receiver = api.webhook_receiver().with_allowed_events([EventKind::Start]);
//! if let Some(CallEvent::Start(start)) = receiver.event(&payload, signature) {
//!     // Dictate the last three digits of the caller's number.
//!     let digits = &start.caller_id[start.caller_id.len() - 3..];
//!     let body = CallbackReply::new().say_digits(digits, "ru").into_body();
//!     // write `body` as the HTTP response
//! }
//! ```
//!
//! Webhook trust failures (missing or mismatching signature, unknown or
//! filtered event kinds) all yield `None` rather than errors, so handlers
//! can acknowledge every delivery with HTTP 200 without leaking whether a
//! payload was malformed or forged.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;
pub mod webhook;

pub use api::Api;
pub use client::{Params, RestClient};
pub use config::{API_URL, ApiConfig, SANDBOX_URL};
pub use error::{ApiError, ApiResult};
pub use types::*;
pub use webhook::{
    CallEvent, CallEventHandler, CallbackReply, EventKind, EventRouter, RawPayload,
    SIGNATURE_HEADER, SignatureCodec, WaitDtmf, WaitDtmfPrompt, WebhookReceiver,
};
