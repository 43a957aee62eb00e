//! Thin client for the aviationstack REST API.
//!
//! One GET per call, no retries, no timeout beyond the transport's own
//! behavior. The CLI wants the body parsed, the proxy wants it verbatim,
//! so the client exposes both shapes over the same URL construction.

use serde::de::DeserializeOwned;

use crate::errors::FlightlineError;
use crate::models::ApiResponse;
use crate::params::QueryParams;

pub const DEFAULT_API_BASE: &str = "https://api.aviationstack.com/v1";

/// Upstream endpoints this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Flights,
    Airports,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Flights => "flights",
            Endpoint::Airports => "airports",
        }
    }
}

/// Upstream response left unparsed for verbatim relaying.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    /// Credential first, caller parameters merged second. The credential
    /// key is not re-protected afterwards, so a caller entry for it wins.
    fn request_url(&self, endpoint: Endpoint, params: &QueryParams) -> String {
        let mut query = QueryParams::new();
        query.set("access_key", &self.api_key);
        query.merge(params);
        format!("{}/{}?{}", self.base_url, endpoint.as_str(), query.encode())
    }

    /// Issue one GET and parse the body as JSON. A non-2xx status becomes
    /// an error carrying the upstream status code and raw body text.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<ApiResponse<T>, FlightlineError> {
        let url = self.request_url(endpoint, params);
        log::debug!("GET {} upstream", endpoint.as_str());

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FlightlineError::UpstreamStatus {
                endpoint: endpoint.as_str(),
                status,
                body,
            });
        }

        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| FlightlineError::Parse {
                endpoint: endpoint.as_str(),
                message: e.to_string(),
            })
    }

    /// Issue one GET and hand back status, content type, and body text for
    /// any upstream status. Only a transport failure is an error here; the
    /// proxy forwards upstream errors as-is.
    pub async fn fetch_raw(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<RawResponse, FlightlineError> {
        let url = self.request_url(endpoint, params);
        log::debug!("GET {} upstream (relay)", endpoint.as_str());

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        UpstreamClient::with_base_url("secret".to_string(), "http://upstream/v1".to_string())
    }

    #[test]
    fn request_url_writes_the_credential_first() {
        let mut params = QueryParams::page_defaults();
        params.set("flight_iata", "BA283");

        let url = client().request_url(Endpoint::Flights, &params);
        assert_eq!(
            url,
            "http://upstream/v1/flights?access_key=secret&limit=5&offset=0&flight_iata=BA283"
        );
    }

    #[test]
    fn request_url_percent_encodes_caller_values() {
        let mut params = QueryParams::new();
        params.set("search", "new york");

        let url = client().request_url(Endpoint::Airports, &params);
        assert_eq!(
            url,
            "http://upstream/v1/airports?access_key=secret&search=new%20york"
        );
    }

    #[test]
    fn a_caller_credential_entry_overwrites_the_real_one() {
        let params = QueryParams::from_pairs([("access_key", "spoofed")]);

        let url = client().request_url(Endpoint::Flights, &params);
        assert_eq!(url, "http://upstream/v1/flights?access_key=spoofed");
    }

    #[test]
    fn default_base_url_is_https() {
        let client = UpstreamClient::new("secret".to_string());
        let url = client.request_url(Endpoint::Flights, &QueryParams::new());
        assert!(url.starts_with("https://api.aviationstack.com/v1/flights?"));
    }
}
