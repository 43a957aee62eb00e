//! Plain-text report rendering for CLI output.
//!
//! Fallback chains follow a fixed first-present-wins order and bottom out
//! in placeholders; a missing field is never an error here.

use crate::models::{Airport, Flight, Leg};

const RULE_WIDTH: usize = 60;
const NO_RESULTS: &str = "No results.";

/// Whether the aircraft line is rendered. Only the single-flight lookup
/// shows it; arrivals and departures listings stay to two legs per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightDetail {
    Summary,
    WithAircraft,
}

fn rule() -> String {
    "—".repeat(RULE_WIDTH)
}

fn truthy(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

fn leg_line(label: &str, leg: Option<&Leg>) -> String {
    let airport = leg
        .and_then(|l| l.airport.as_deref())
        .or_else(|| leg.and_then(|l| l.iata.as_deref()))
        .unwrap_or("N/A");
    let scheduled = leg.and_then(|l| l.scheduled.as_deref()).unwrap_or("—");
    let estimated = leg.and_then(|l| l.estimated.as_deref()).unwrap_or("—");
    let terminal = leg.and_then(|l| l.terminal.as_deref()).unwrap_or("—");
    let gate = leg.and_then(|l| l.gate.as_deref()).unwrap_or("—");
    let delay = leg.and_then(|l| l.delay).unwrap_or(0);

    format!(
        "{label}{airport}  sched: {scheduled}  est: {estimated}  T{terminal} G{gate}  delay: {delay}m"
    )
}

/// Render flight records: a rule per record plus one closing rule, or a
/// bare `No results.` when the data array came back empty.
pub fn render_flights(flights: &[Flight], detail: FlightDetail) -> String {
    if flights.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let mut lines = Vec::new();
    for flight in flights {
        let code = flight
            .flight
            .as_ref()
            .and_then(|f| f.iata.as_deref())
            .or_else(|| flight.flight.as_ref().and_then(|f| f.number.as_deref()))
            .unwrap_or("N/A");
        let airline = flight
            .airline
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .or_else(|| flight.airline.as_ref().and_then(|a| a.iata.as_deref()))
            .unwrap_or("Unknown Airline");
        let status = flight.status.as_deref().unwrap_or("unknown");

        lines.push(rule());
        lines.push(format!("{code} • {airline} • status: {status}"));
        lines.push(leg_line("From: ", flight.departure.as_ref()));
        lines.push(leg_line("To:   ", flight.arrival.as_ref()));

        if detail == FlightDetail::WithAircraft {
            if let Some(aircraft) = flight.aircraft.as_ref() {
                if truthy(&aircraft.registration)
                    || truthy(&aircraft.iata)
                    || truthy(&aircraft.icao)
                {
                    let registration = aircraft.registration.as_deref().unwrap_or("—");
                    let type_iata = aircraft.iata.as_deref().unwrap_or("—");
                    let type_icao = aircraft.icao.as_deref().unwrap_or("—");
                    lines.push(format!(
                        "Aircraft: reg {registration} • type IATA {type_iata} / ICAO {type_icao}"
                    ));
                }
            }
        }
    }
    lines.push(rule());

    lines.join("\n") + "\n"
}

/// Render airport records; the city/country, timezone, and coordinates
/// lines are omitted entirely when their fields are empty.
pub fn render_airports(airports: &[Airport]) -> String {
    if airports.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let mut lines = Vec::new();
    for airport in airports {
        let name = airport.airport_name.as_deref().unwrap_or("Unknown airport");
        let iata = airport.iata_code.as_deref().unwrap_or("—");
        let icao = airport.icao_code.as_deref().unwrap_or("—");

        lines.push(rule());
        lines.push(format!("{name} ({iata}/{icao})"));

        let city = airport.city().unwrap_or("");
        let country = airport.country().unwrap_or("");
        if !city.is_empty() || !country.is_empty() {
            let joiner = if !city.is_empty() && !country.is_empty() {
                ", "
            } else {
                ""
            };
            lines.push(format!("{city}{joiner}{country}"));
        }

        if let Some(tz) = airport.timezone().filter(|tz| !tz.is_empty()) {
            lines.push(format!("TZ: {tz}"));
        }

        if let (Some(lat), Some(lon)) = (airport.latitude, airport.longitude) {
            lines.push(format!("Coords: {lat}, {lon}"));
        }
    }
    lines.push(rule());

    lines.join("\n") + "\n"
}
