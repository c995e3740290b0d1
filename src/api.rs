//! Typed endpoint methods for the REST API

use crate::client::{Params, RestClient};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::*;
use crate::webhook::WebhookReceiver;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Client for the Novofon REST API
///
/// Credentials are an explicit configuration value; there is no global
/// client state. Methods map one-to-one onto `/v1/...` endpoints and
/// return typed replies or [`ApiError`].
#[derive(Debug, Clone)]
pub struct Api {
    client: RestClient,
}

impl Api {
    /// Create a client for the production API
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::with_config(ApiConfig::new(key, secret))
    }

    /// Create a client from an explicit configuration
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ApiConfig {
        self.client.config()
    }

    /// Webhook receiver sharing this client's secret
    pub fn webhook_receiver(&self) -> WebhookReceiver {
        WebhookReceiver::new(self.config().secret())
    }

    /// Account balance
    pub async fn get_balance(&self) -> ApiResult<Balance> {
        self.client.get("info/balance", &Params::new()).await
    }

    /// Account timezone
    pub async fn get_timezone(&self) -> ApiResult<Timezone> {
        self.client.get("info/timezone", &Params::new()).await
    }

    /// Currencies available for the account
    pub async fn get_currencies(&self) -> ApiResult<Currencies> {
        self.client
            .get("info/lists/currencies", &Params::new())
            .await
    }

    /// Languages available for voice prompts
    pub async fn get_languages(&self) -> ApiResult<Languages> {
        self.client
            .get("info/lists/languages", &Params::new())
            .await
    }

    /// Request a callback between `from` and `to`
    ///
    /// `from` is a phone/SIP number, PBX extension or PBX scenario. With
    /// `predicted` set, the system calls `to` first and only connects
    /// `from` when the call succeeds. `to` and `sip` are run through digit
    /// filtering before transmission.
    pub async fn request_callback(
        &self,
        from: &str,
        to: &str,
        sip: Option<&str>,
        predicted: bool,
    ) -> ApiResult<RequestCallback> {
        let mut params = Params::new();
        params.insert("from".to_string(), from.to_string());
        params.insert("to".to_string(), filter_number(to)?);
        if let Some(sip) = sip {
            params.insert("sip".to_string(), filter_number(sip)?);
        }
        if predicted {
            params.insert("predicted".to_string(), "1".to_string());
        }
        self.client.get("request/callback", &params).await
    }

    /// Call `to` and read out `code` to verify the number
    pub async fn request_check_number(
        &self,
        caller_id: &str,
        to: &str,
        code: &str,
        predicted: bool,
    ) -> ApiResult<RequestCheckNumber> {
        let mut params = Params::new();
        params.insert("caller_id".to_string(), caller_id.to_string());
        params.insert("to".to_string(), filter_number(to)?);
        params.insert("code".to_string(), code.to_string());
        if predicted {
            params.insert("predicted".to_string(), "1".to_string());
        }
        self.client.get("request/checknumber", &params).await
    }

    /// SIP numbers of the account
    pub async fn get_sip(&self) -> ApiResult<SipList> {
        self.client.get("sip", &Params::new()).await
    }

    /// Online status of one SIP number
    pub async fn get_sip_status(&self, sip: &str) -> ApiResult<SipStatus> {
        let method = format!("sip/{}/status", filter_number(sip)?);
        self.client.get(&method, &Params::new()).await
    }

    /// Countries where direct numbers can be bought
    pub async fn get_direct_number_countries(
        &self,
        language: Option<&str>,
    ) -> ApiResult<DirectNumberCountries> {
        let mut params = Params::new();
        params.insert(
            "language".to_string(),
            language.unwrap_or("RU").to_string(),
        );
        self.client.get("direct_numbers/countries", &params).await
    }

    /// Direct numbers on the account
    pub async fn get_direct_numbers(&self) -> ApiResult<Vec<DirectNumber>> {
        #[derive(Deserialize)]
        struct Reply {
            info: Vec<DirectNumber>,
        }
        let reply: Reply = self.client.get("direct_numbers", &Params::new()).await?;
        Ok(reply.info)
    }

    /// One direct number on the account
    pub async fn get_direct_number(
        &self,
        number: &str,
        number_type: &str,
    ) -> ApiResult<DirectNumber> {
        let mut params = Params::new();
        params.insert("number".to_string(), number.to_string());
        params.insert("type".to_string(), number_type.to_string());
        self.client.get("direct_numbers/number", &params).await
    }

    /// PBX extension numbers
    pub async fn get_pbx_internal(&self) -> ApiResult<PbxInternal> {
        self.client.get("pbx/internal", &Params::new()).await
    }

    /// Online status of one PBX extension
    pub async fn get_pbx_status(&self, pbx: &str) -> ApiResult<PbxStatus> {
        let method = format!("pbx/internal/{}/status", filter_number(pbx)?);
        self.client.get(&method, &Params::new()).await
    }

    /// Download link for a call recording
    ///
    /// At least one of `call_id` (per-recording ID) and `pbx_call_id`
    /// (permanent PBX call ID) is required. `lifetime` is the link
    /// lifetime in seconds (180 to 5184000, provider default 1800).
    pub async fn get_pbx_record(
        &self,
        call_id: Option<&str>,
        pbx_call_id: Option<&str>,
        lifetime: Option<u32>,
    ) -> ApiResult<PbxRecordRequest> {
        if call_id.is_none() && pbx_call_id.is_none() {
            return Err(ApiError::Validation(
                "call_id or pbx_call_id required".to_string(),
            ));
        }
        let mut params = Params::new();
        insert_opt(&mut params, "call_id", call_id.map(str::to_string));
        insert_opt(&mut params, "pbx_call_id", pbx_call_id.map(str::to_string));
        insert_opt(&mut params, "lifetime", lifetime.map(|l| l.to_string()));
        self.client.get("pbx/record/request", &params).await
    }

    /// Overall call statistics
    ///
    /// The maximum period is one month; longer requests are truncated by
    /// the provider to 30 days.
    pub async fn get_statistics(&self, query: StatisticsQuery) -> ApiResult<Statistics> {
        let params = statistics_params(&query)?;
        self.client.get("statistics", &params).await
    }

    /// PBX call statistics
    pub async fn get_pbx_statistics(&self, query: PbxStatisticsQuery) -> ApiResult<PbxStatistics> {
        let params = pbx_statistics_params(&query);
        self.client.get("statistics/pbx", &params).await
    }

    /// Incoming call statistics
    pub async fn get_incoming_call_statistics(
        &self,
        query: IncomingCallsQuery,
    ) -> ApiResult<IncomingCallsStatistics> {
        let params = incoming_calls_params(&query)?;
        self.client.get("statistics/incoming-calls", &params).await
    }

    /// CallBack widget statistics
    pub async fn get_callback_widget_statistics(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        widget_id: Option<&str>,
    ) -> ApiResult<PbxStatistics> {
        let mut params = Params::new();
        insert_opt(&mut params, "start", format_period(start));
        insert_opt(&mut params, "end", format_period(end));
        insert_opt(&mut params, "widget_id", widget_id.map(str::to_string));
        self.client.get("statistics/callback_widget", &params).await
    }
}

/// Strip a number down to its digits
///
/// Fails fast, before any network call, when nothing is left.
fn filter_number(number: &str) -> ApiResult<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(ApiError::InvalidNumber(number.to_string()));
    }
    Ok(digits)
}

/// Insert a parameter only when a value is present
fn insert_opt(params: &mut Params, key: &str, value: Option<String>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value);
    }
}

fn format_period(instant: Option<NaiveDateTime>) -> Option<String> {
    instant.map(|t| t.format(PERIOD_FORMAT).to_string())
}

fn statistics_params(query: &StatisticsQuery) -> ApiResult<Params> {
    let mut params = Params::new();
    insert_opt(&mut params, "start", format_period(query.start));
    insert_opt(&mut params, "end", format_period(query.end));
    if let Some(sip) = &query.sip {
        params.insert("sip".to_string(), filter_number(sip)?);
    }
    if query.cost_only {
        params.insert("cost_only".to_string(), "1".to_string());
    }
    insert_opt(&mut params, "type", query.stats_type.clone());
    insert_opt(&mut params, "skip", query.skip.map(|v| v.to_string()));
    insert_opt(&mut params, "limit", query.limit.map(|v| v.to_string()));
    Ok(params)
}

fn pbx_statistics_params(query: &PbxStatisticsQuery) -> Params {
    let mut params = Params::new();
    insert_opt(&mut params, "start", format_period(query.start));
    insert_opt(&mut params, "end", format_period(query.end));
    params.insert(
        "version".to_string(),
        if query.new_format { "2" } else { "1" }.to_string(),
    );
    insert_opt(
        &mut params,
        "call_type",
        query.call_type.map(|t| t.as_str().to_string()),
    );
    insert_opt(&mut params, "skip", query.skip.map(|v| v.to_string()));
    insert_opt(&mut params, "limit", query.limit.map(|v| v.to_string()));
    params
}

fn incoming_calls_params(query: &IncomingCallsQuery) -> ApiResult<Params> {
    let mut params = Params::new();
    insert_opt(&mut params, "start", format_period(query.start));
    insert_opt(&mut params, "end", format_period(query.end));
    if let Some(sip) = &query.sip {
        params.insert("sip".to_string(), filter_number(sip)?);
    }
    insert_opt(&mut params, "skip", query.skip.map(|v| v.to_string()));
    insert_opt(&mut params, "limit", query.limit.map(|v| v.to_string()));
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filter_number_strips_formatting() {
        assert_eq!(
            filter_number("+7 (999) 000-12-34").unwrap(),
            "79990001234"
        );
    }

    #[test]
    fn test_filter_number_keeps_plain_digits() {
        assert_eq!(filter_number("100").unwrap(), "100");
    }

    #[test]
    fn test_filter_number_rejects_no_digits() {
        assert!(matches!(
            filter_number("+()- "),
            Err(ApiError::InvalidNumber(_))
        ));
        assert!(matches!(filter_number(""), Err(ApiError::InvalidNumber(_))));
    }

    #[test]
    fn test_statistics_params_skip_unset_values() {
        let params = statistics_params(&StatisticsQuery::new()).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_statistics_params_format_period() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let params = statistics_params(&StatisticsQuery::new().start(start)).unwrap();
        assert_eq!(params.get("start").unwrap(), "2017-01-01 12:00:00");
    }

    #[test]
    fn test_statistics_params_filter_sip() {
        let params =
            statistics_params(&StatisticsQuery::new().sip("+7 (999) 000-12-34")).unwrap();
        assert_eq!(params.get("sip").unwrap(), "79990001234");
    }

    #[test]
    fn test_pbx_statistics_params_version() {
        let params = pbx_statistics_params(&PbxStatisticsQuery::new());
        assert_eq!(params.get("version").unwrap(), "2");

        let params = pbx_statistics_params(&PbxStatisticsQuery::new().old_format());
        assert_eq!(params.get("version").unwrap(), "1");
    }

    #[test]
    fn test_pbx_statistics_params_call_type() {
        let params =
            pbx_statistics_params(&PbxStatisticsQuery::new().call_type(CallType::Incoming));
        assert_eq!(params.get("call_type").unwrap(), "in");
    }
}
