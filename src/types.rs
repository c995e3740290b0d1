//! Typed projections of REST API replies
//!
//! Each type declares exactly the fields this client understands; anything
//! else in the reply is dropped during deserialization. Values are
//! immutable after construction.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wire format for statistics period boundaries
pub(crate) const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Account balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub balance: f64,
    pub currency: String,
}

/// Account timezone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timezone {
    pub unixtime: i64,
    pub datetime: String,
    pub timezone: String,
}

/// Currencies available for the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currencies {
    pub currencies: Vec<String>,
}

/// Languages available for voice prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Languages {
    pub languages: Vec<String>,
}

/// Accepted callback request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCallback {
    pub from: String,
    pub to: String,
    pub time: f64,
}

/// Accepted number-check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCheckNumber {
    pub caller_id: String,
    pub to: String,
    pub time: f64,
}

/// One SIP number of the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sip {
    pub id: String,
    pub display_name: String,
    pub lines: u32,
}

/// SIP numbers of the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipList {
    pub sips: Vec<Sip>,
    /// Remaining SIP numbers the tariff allows
    pub left: Option<u32>,
}

/// Online status of a SIP number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipStatus {
    pub sip: String,
    pub is_online: bool,
}

/// Country where direct numbers can be bought
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectNumberCountry {
    pub country_code: String,
    pub name: String,
}

/// Countries where direct numbers can be bought
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectNumberCountries {
    pub countries: Vec<DirectNumberCountry>,
}

/// A direct (virtual) phone number on the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectNumber {
    pub number: String,
    pub status: String,
    pub country: Option<String>,
    pub description: Option<String>,
    /// SIP number incoming calls are routed to
    pub sip: Option<String>,
    pub start_date: Option<String>,
    pub stop_date: Option<String>,
    pub monthly_fee: Option<f64>,
    pub currency: Option<String>,
    pub channels: Option<u32>,
    #[serde(rename = "type")]
    pub number_type: Option<String>,
}

/// PBX extension numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PbxInternal {
    pub pbx_id: i64,
    pub numbers: Vec<String>,
}

/// Online status of a PBX extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PbxStatus {
    pub pbx_id: i64,
    pub number: String,
    pub is_online: bool,
}

/// Download link for a call recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PbxRecordRequest {
    pub link: Option<String>,
    /// Multiple links when the call produced several recording files
    pub links: Option<Vec<String>>,
    pub lifetime_till: String,
}

/// One call in the overall statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallStatistics {
    pub id: String,
    pub sip: String,
    pub callstart: String,
    pub from: String,
    pub to: String,
    pub description: Option<String>,
    pub disposition: String,
    pub seconds: u32,
    pub billseconds: u32,
    pub billcost: f64,
    pub currency: String,
    pub pbx_call_id: Option<String>,
}

/// Overall call statistics for a period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    pub start: String,
    pub end: String,
    pub stats: Vec<CallStatistics>,
}

/// One call in the PBX statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PbxCallStatistics {
    pub call_id: String,
    pub sip: String,
    pub callstart: String,
    pub clid: String,
    pub destination: String,
    pub disposition: String,
    pub seconds: u32,
    pub is_recorded: bool,
    pub pbx_call_id: String,
}

/// PBX call statistics for a period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PbxStatistics {
    pub start: String,
    pub end: String,
    pub version: Option<u32>,
    pub stats: Vec<PbxCallStatistics>,
}

/// One call in the incoming-calls statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingCallStatistics {
    pub id: String,
    pub sip: String,
    pub callstart: String,
    pub clid: String,
    pub destination: String,
    pub disposition: String,
    pub seconds: u32,
    pub is_recorded: bool,
    pub pbx_call_id: Option<String>,
}

/// Incoming call statistics for a period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingCallsStatistics {
    pub start: String,
    pub end: String,
    pub stats: Vec<IncomingCallStatistics>,
}

/// Direction filter for PBX statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    Incoming,
    Outgoing,
}

impl CallType {
    /// Wire value of the `call_type` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "in",
            Self::Outgoing => "out",
        }
    }
}

/// Query for overall statistics
///
/// The provider caps the period at one month and the page size at 1000
/// rows; unset values fall back to provider defaults (start of the current
/// month, current time).
#[derive(Debug, Clone, Default)]
pub struct StatisticsQuery {
    pub(crate) start: Option<NaiveDateTime>,
    pub(crate) end: Option<NaiveDateTime>,
    pub(crate) sip: Option<String>,
    pub(crate) cost_only: bool,
    pub(crate) stats_type: Option<String>,
    pub(crate) skip: Option<u32>,
    pub(crate) limit: Option<u32>,
}

impl StatisticsQuery {
    /// Create an empty query (provider defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Period start
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Period end
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Filter by SIP number
    pub fn sip(mut self, sip: impl Into<String>) -> Self {
        self.sip = Some(sip.into());
        self
    }

    /// Only return the amount of funds spent in the period
    pub fn cost_only(mut self) -> Self {
        self.cost_only = true;
        self
    }

    /// Request type, e.g. `toll` or `ru495`
    pub fn stats_type(mut self, stats_type: impl Into<String>) -> Self {
        self.stats_type = Some(stats_type.into());
        self
    }

    /// Rows to skip
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Row limit (maximum 1000)
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query for PBX statistics
#[derive(Debug, Clone)]
pub struct PbxStatisticsQuery {
    pub(crate) start: Option<NaiveDateTime>,
    pub(crate) end: Option<NaiveDateTime>,
    pub(crate) new_format: bool,
    pub(crate) call_type: Option<CallType>,
    pub(crate) skip: Option<u32>,
    pub(crate) limit: Option<u32>,
}

impl PbxStatisticsQuery {
    /// Create an empty query (new result format, both directions)
    pub fn new() -> Self {
        Self {
            start: None,
            end: None,
            new_format: true,
            call_type: None,
            skip: None,
            limit: None,
        }
    }

    /// Period start
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Period end
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Request the legacy result format
    pub fn old_format(mut self) -> Self {
        self.new_format = false;
        self
    }

    /// Restrict to one call direction
    pub fn call_type(mut self, call_type: CallType) -> Self {
        self.call_type = Some(call_type);
        self
    }

    /// Rows to skip
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Row limit (maximum 1000)
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Default for PbxStatisticsQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Query for incoming-calls statistics
#[derive(Debug, Clone, Default)]
pub struct IncomingCallsQuery {
    pub(crate) start: Option<NaiveDateTime>,
    pub(crate) end: Option<NaiveDateTime>,
    pub(crate) sip: Option<String>,
    pub(crate) skip: Option<u32>,
    pub(crate) limit: Option<u32>,
}

impl IncomingCallsQuery {
    /// Create an empty query (provider defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Period start
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Period end
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Filter by SIP number
    pub fn sip(mut self, sip: impl Into<String>) -> Self {
        self.sip = Some(sip.into());
        self
    }

    /// Rows to skip
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Row limit (maximum 1000)
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
