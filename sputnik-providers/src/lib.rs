//! Sputnik Providers - the three upstream data sources.
//!
//! Each provider calls one public HTTP endpoint and degrades gracefully:
//! a failed call falls back to a secondary source or to fixed local data,
//! so every operation returns a display-ready string and **never** an error.
//! The distinction between "the API answered with an error" and "the API was
//! unreachable" is preserved by returning differently labeled placeholders.

#![warn(clippy::all)]

pub mod facts;
pub mod rates;
pub mod weather;

pub use facts::FactsProvider;
pub use rates::RatesProvider;
pub use weather::WeatherProvider;

use sputnik_common::config::ProvidersConfig;
use std::time::Duration;

/// Build a reqwest client with the given request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// All three providers behind one handle.
#[derive(Debug, Clone)]
pub struct Providers {
    facts: FactsProvider,
    weather: WeatherProvider,
    rates: RatesProvider,
}

impl Providers {
    /// Create providers from configuration.
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            facts: FactsProvider::new(config),
            weather: WeatherProvider::new(config),
            rates: RatesProvider::new(config),
        }
    }

    /// Fetch a random fact. Always returns a non-empty string.
    pub async fn random_fact(&self) -> String {
        self.facts.random_fact().await
    }

    /// Fetch a weather report for the given city. The reply always mentions
    /// the city, even when the upstream is down.
    pub async fn weather(&self, city: &str) -> String {
        self.weather.report(city).await
    }

    /// Fetch USD and EUR rates against RUB. Always returns a non-empty string.
    pub async fn exchange_rates(&self) -> String {
        self.rates.report().await
    }
}
