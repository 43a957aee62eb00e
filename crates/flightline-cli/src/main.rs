//! Command-line client for aviationstack flight data.
//!
//! Each invocation resolves to exactly one upstream query: a flight
//! lookup, an arrivals or departures listing, or an airport lookup. The
//! response is rendered as a text report on stdout and the process exits.

use clap::{Parser, Subcommand};
use flightline_core::{
    render_airports, render_flights, Airport, AirportQuery, CliConfig, Endpoint, Flight,
    FlightDetail, FlightlineError, QueryParams, UpstreamClient,
};

const USAGE: &str = "Usage:
  flight <IATA>
  arrivals <AIRPORT_IATA>
  departures <AIRPORT_IATA>
  airport <IATA|ICAO|search text>";

#[derive(Parser, Debug)]
#[clap(name = "flightline", version, about = "Aviationstack flight data lookup")]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a flight by IATA code or flight number
    Flight { code: String },
    /// List arrivals for an airport
    Arrivals { airport: String },
    /// List departures for an airport
    Departures { airport: String },
    /// Look up an airport by IATA/ICAO code or free-text search
    Airport { query: String },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // The credential is required at startup, before argument handling.
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let command = match Cli::try_parse() {
        Ok(Cli {
            command: Some(command),
        }) => command,
        // A missing or unrecognized command shape prints the usage block
        // and exits cleanly without touching the network.
        _ => {
            println!("{USAGE}");
            return;
        }
    };

    if let Err(err) = run(config, command).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(config: CliConfig, command: Commands) -> Result<(), FlightlineError> {
    let client = UpstreamClient::new(config.api_key);

    let report = match command {
        Commands::Flight { code } => {
            let mut params = QueryParams::page_defaults();
            params.set("flight_iata", &code);
            let response = client
                .fetch_json::<Flight>(Endpoint::Flights, &params)
                .await?;
            render_flights(&response.records(), FlightDetail::WithAircraft)
        }
        Commands::Arrivals { airport } => {
            let mut params = QueryParams::page_defaults();
            params.set("arr_iata", &airport);
            let response = client
                .fetch_json::<Flight>(Endpoint::Flights, &params)
                .await?;
            render_flights(&response.records(), FlightDetail::Summary)
        }
        Commands::Departures { airport } => {
            let mut params = QueryParams::page_defaults();
            params.set("dep_iata", &airport);
            let response = client
                .fetch_json::<Flight>(Endpoint::Flights, &params)
                .await?;
            render_flights(&response.records(), FlightDetail::Summary)
        }
        Commands::Airport { query } => {
            let mut params = QueryParams::page_defaults();
            params.merge(&AirportQuery::classify(&query).params());
            let response = client
                .fetch_json::<Airport>(Endpoint::Airports, &params)
                .await?;
            render_airports(&response.records())
        }
    };

    print!("{report}");
    Ok(())
}
