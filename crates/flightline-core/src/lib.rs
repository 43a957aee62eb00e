//! Shared core for the Flightline command-line client and proxy server.
//!
//! Both binaries resolve to the same small capability: build a query for
//! one aviationstack endpoint, issue a single GET, and either render the
//! parsed body as a text report (CLI) or hand the raw body back for
//! verbatim relaying (server). This crate holds that capability plus the
//! parameter-merging rules, the optional-field response models, and the
//! airport-argument disambiguation the CLI depends on.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod params;
pub mod query;
pub mod report;

pub use client::{Endpoint, RawResponse, UpstreamClient, DEFAULT_API_BASE};
pub use config::{CliConfig, ProxyConfig};
pub use errors::FlightlineError;
pub use models::{Airport, ApiResponse, Flight};
pub use params::QueryParams;
pub use query::AirportQuery;
pub use report::{render_airports, render_flights, FlightDetail};
