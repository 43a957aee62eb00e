//! Airport-argument disambiguation for the CLI.

use crate::params::QueryParams;

/// How a raw `airport` argument is interpreted when querying upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportQuery {
    Iata(String),
    Icao(String),
    Search(String),
}

impl AirportQuery {
    /// Exactly three ASCII letters is an IATA code, exactly four an ICAO
    /// code, anything else free-text search. This is a priori pattern
    /// matching with no fallback: a four-letter search phrase is knowingly
    /// queried as an ICAO code.
    pub fn classify(arg: &str) -> Self {
        let letters = arg.chars().all(|c| c.is_ascii_alphabetic());
        match arg.len() {
            3 if letters => AirportQuery::Iata(arg.to_ascii_uppercase()),
            4 if letters => AirportQuery::Icao(arg.to_ascii_uppercase()),
            _ => AirportQuery::Search(arg.to_string()),
        }
    }

    /// The single upstream parameter this query selects.
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        match self {
            AirportQuery::Iata(code) => params.set("iata_code", code),
            AirportQuery::Icao(code) => params.set("icao_code", code),
            AirportQuery::Search(text) => params.set("search", text),
        }
        params
    }
}
