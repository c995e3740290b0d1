//! Synchronous reply directives for webhook requests
//!
//! The provider reads the webhook's HTTP response body as a JSON directive
//! telling the PBX what to do with the live call. A reply is built once per
//! inbound request and consumed when serialized; an empty reply means
//! "acknowledge, no action".

use serde_json::{Map, Value, json};

/// Builder for the reply body of a webhook request
#[derive(Debug, Clone, Default)]
pub struct CallbackReply {
    directives: Map<String, Value>,
}

impl CallbackReply {
    /// Create an empty reply (silent acknowledgement)
    pub fn new() -> Self {
        Self::default()
    }

    /// Speak the given digits in the given language
    pub fn say_digits(mut self, digits: impl Into<String>, language: impl Into<String>) -> Self {
        self.directives.insert(
            "ivr_saydigits".to_string(),
            json!({ "digits": digits.into(), "lang": language.into() }),
        );
        self
    }

    /// Speak a number (read as a whole, not digit by digit)
    pub fn say_number(mut self, number: impl Into<String>, language: impl Into<String>) -> Self {
        self.directives.insert(
            "ivr_saynumber".to_string(),
            json!({ "number": number.into(), "lang": language.into() }),
        );
        self
    }

    /// Play a previously uploaded media file
    pub fn play_file(mut self, file_id: impl Into<String>) -> Self {
        self.directives
            .insert("ivr_play".to_string(), Value::String(file_id.into()));
        self
    }

    /// Redirect the call to a number, extension or PBX scenario
    pub fn redirect(mut self, destination: impl Into<String>) -> Self {
        self.directives
            .insert("redirect".to_string(), Value::String(destination.into()));
        self
    }

    /// Hang up the call
    pub fn hangup(mut self) -> Self {
        self.directives
            .insert("hangup".to_string(), Value::Bool(true));
        self
    }

    /// Prompt the caller for DTMF input
    pub fn wait_dtmf(mut self, prompt: WaitDtmfPrompt) -> Self {
        self.directives
            .insert("wait_dtmf".to_string(), prompt.into_value());
        self
    }

    /// Whether any directive was set
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Serialize the reply, consuming the builder
    ///
    /// The provider expects one well-formed reply per webhook request or
    /// none at all; an empty builder yields an empty body.
    pub fn into_body(self) -> String {
        if self.directives.is_empty() {
            return String::new();
        }
        Value::Object(self.directives).to_string()
    }
}

/// DTMF collection prompt settings
#[derive(Debug, Clone)]
pub struct WaitDtmfPrompt {
    name: String,
    max_digits: Option<u32>,
    attempts: Option<u32>,
    timeout_secs: Option<u32>,
    default_behaviour: Option<String>,
}

impl WaitDtmfPrompt {
    /// Create a prompt; `name` identifies the answer in the IVR event
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_digits: None,
            attempts: None,
            timeout_secs: None,
            default_behaviour: None,
        }
    }

    /// Maximum number of digits to collect
    pub fn max_digits(mut self, digits: u32) -> Self {
        self.max_digits = Some(digits);
        self
    }

    /// Number of input attempts before the default behaviour applies
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Seconds to wait for input
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// What the PBX does when no input arrives
    pub fn default_behaviour(mut self, behaviour: impl Into<String>) -> Self {
        self.default_behaviour = Some(behaviour.into());
        self
    }

    fn into_value(self) -> Value {
        let mut prompt = Map::new();
        prompt.insert("name".to_string(), Value::String(self.name));
        if let Some(max_digits) = self.max_digits {
            prompt.insert("maxdigits".to_string(), Value::from(max_digits));
        }
        if let Some(attempts) = self.attempts {
            prompt.insert("attempts".to_string(), Value::from(attempts));
        }
        if let Some(timeout) = self.timeout_secs {
            prompt.insert("timeout".to_string(), Value::from(timeout));
        }
        if let Some(default_behaviour) = self.default_behaviour {
            prompt.insert("default".to_string(), Value::String(default_behaviour));
        }
        Value::Object(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reply_is_silent() {
        let reply = CallbackReply::new();
        assert!(reply.is_empty());
        assert_eq!(reply.into_body(), "");
    }

    #[test]
    fn test_say_digits() {
        let body = CallbackReply::new().say_digits("234", "ru").into_body();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ivr_saydigits"]["digits"], "234");
        assert_eq!(value["ivr_saydigits"]["lang"], "ru");
    }

    #[test]
    fn test_say_number() {
        let body = CallbackReply::new().say_number("150", "en").into_body();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ivr_saynumber"]["number"], "150");
    }

    #[test]
    fn test_redirect_and_hangup() {
        let body = CallbackReply::new().redirect("0-100").hangup().into_body();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["redirect"], "0-100");
        assert_eq!(value["hangup"], true);
    }

    #[test]
    fn test_wait_dtmf_prompt() {
        let prompt = WaitDtmfPrompt::new("menu")
            .max_digits(1)
            .attempts(3)
            .timeout(5)
            .default_behaviour("hangup");
        let body = CallbackReply::new().wait_dtmf(prompt).into_body();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["wait_dtmf"]["name"], "menu");
        assert_eq!(value["wait_dtmf"]["maxdigits"], 1);
        assert_eq!(value["wait_dtmf"]["default"], "hangup");
    }

    #[test]
    fn test_last_directive_of_a_kind_wins() {
        let body = CallbackReply::new()
            .play_file("greeting")
            .play_file("menu")
            .into_body();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["ivr_play"], "menu");
    }
}
