//! Transient per-request value shapes for the aviationstack API.
//!
//! Every field is optional. Absence is a rendering concern (placeholders),
//! never an error, so the models decode whatever subset the upstream sends
//! and ignore the rest of its payload.

use serde::Deserialize;
use serde_json::Value;

/// Envelope shared by every aviationstack endpoint: an optional `data`
/// array plus opaque pagination/error metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<Vec<T>>,
    pub pagination: Option<Value>,
    pub error: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// The `data` array, empty when the upstream omitted it.
    pub fn records(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flight {
    pub flight: Option<FlightCode>,
    pub airline: Option<Airline>,
    pub departure: Option<Leg>,
    pub arrival: Option<Leg>,
    pub aircraft: Option<Aircraft>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightCode {
    pub iata: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Airline {
    pub name: Option<String>,
    pub iata: Option<String>,
}

/// One departure or arrival leg of a flight record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leg {
    pub airport: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<String>,
    pub estimated: Option<String>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub delay: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Aircraft {
    pub registration: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

/// Airport record. City, country, and timezone each have more than one
/// possible source key upstream; the accessors resolve them in order,
/// first present key wins (even when its value is empty).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Airport {
    pub airport_name: Option<String>,
    pub iata_code: Option<String>,
    pub icao_code: Option<String>,
    pub city: Option<String>,
    pub city_name: Option<String>,
    pub city_iata_code: Option<String>,
    pub country_name: Option<String>,
    pub country_iso2: Option<String>,
    pub timezone: Option<String>,
    pub timezone_gmt: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Airport {
    pub fn city(&self) -> Option<&str> {
        self.city
            .as_deref()
            .or(self.city_name.as_deref())
            .or(self.city_iata_code.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        self.country_name.as_deref().or(self.country_iso2.as_deref())
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref().or(self.timezone_gmt.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_defaults_to_no_records() {
        let response: ApiResponse<Flight> = serde_json::from_value(json!({})).unwrap();
        assert!(response.records().is_empty());
    }

    #[test]
    fn envelope_keeps_opaque_metadata() {
        let response: ApiResponse<Flight> = serde_json::from_value(json!({
            "data": [],
            "pagination": {"limit": 5, "offset": 0, "total": 0},
            "error": null
        }))
        .unwrap();

        assert!(response.pagination.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn flight_decodes_with_every_field_missing() {
        let flight: Flight = serde_json::from_value(json!({})).unwrap();
        assert!(flight.flight.is_none());
        assert!(flight.departure.is_none());
        assert!(flight.status.is_none());
    }

    #[test]
    fn flight_ignores_unknown_upstream_fields() {
        let flight: Flight = serde_json::from_value(json!({
            "flight_date": "2024-05-01",
            "live": {"latitude": 48.2},
            "flight": {"iata": "BA283", "number": "283", "icao": "BAW283"},
            "status": "active"
        }))
        .unwrap();

        assert_eq!(flight.flight.unwrap().iata.as_deref(), Some("BA283"));
        assert_eq!(flight.status.as_deref(), Some("active"));
    }

    #[test]
    fn airport_city_resolves_first_present_key() {
        let airport: Airport = serde_json::from_value(json!({
            "city_name": "Lyon",
            "city_iata_code": "LYS"
        }))
        .unwrap();
        assert_eq!(airport.city(), Some("Lyon"));

        let airport: Airport = serde_json::from_value(json!({
            "city": "",
            "city_name": "Lyon"
        }))
        .unwrap();
        // A present-but-empty earlier key still wins.
        assert_eq!(airport.city(), Some(""));
    }

    #[test]
    fn airport_country_and_timezone_fallbacks() {
        let airport: Airport = serde_json::from_value(json!({
            "country_iso2": "GB",
            "timezone_gmt": "+0"
        }))
        .unwrap();

        assert_eq!(airport.country(), Some("GB"));
        assert_eq!(airport.timezone(), Some("+0"));
    }
}
