//! Currency-rate provider.
//!
//! One call against a fixed RUB base; USD and EUR are extracted independently
//! so one missing currency does not hide the other.

use sputnik_common::config::ProvidersConfig;

/// Marker used when a currency is absent from the upstream payload.
const RATE_UNAVAILABLE: &str = "Н/Д";

/// Placeholder pair returned when the API answers with an error status.
const TEST_RATES: &str = "Курс валют:\nUSD: 90.5\nEUR: 98.2 (тестовые данные)";

/// Returned when the API is unreachable or its payload is unreadable.
const RATES_UNAVAILABLE: &str = "Курс валют временно недоступен. Попробуйте позже.";

/// USD/EUR against RUB provider.
#[derive(Debug, Clone)]
pub struct RatesProvider {
    client: reqwest::Client,
    url: String,
}

impl RatesProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: crate::http_client(config.short_timeout_secs),
            url: config.rates_url.clone(),
        }
    }

    /// Fetch the current USD and EUR rates. Never fails.
    pub async fn report(&self) -> String {
        let resp = match self.client.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Rates source unreachable");
                return RATES_UNAVAILABLE.to_string();
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "Rates source returned non-success");
            return TEST_RATES.to_string();
        }

        match resp.json::<serde_json::Value>().await {
            Ok(data) => {
                let usd = extract_rate(&data, "USD");
                let eur = extract_rate(&data, "EUR");
                format!("Курс к рублю:\nUSD: {usd}\nEUR: {eur}")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rates payload unreadable");
                RATES_UNAVAILABLE.to_string()
            }
        }
    }
}

/// Pull one currency out of the `rates` object, defaulting to [`RATE_UNAVAILABLE`].
fn extract_rate(data: &serde_json::Value, currency: &str) -> String {
    data.get("rates")
        .and_then(|rates| rates.get(currency))
        .map_or_else(|| RATE_UNAVAILABLE.to_string(), render_rate)
}

/// Numbers render bare; anything else is treated as absent.
fn render_rate(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.to_string(),
        _ => RATE_UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(url: &str) -> RatesProvider {
        let config = ProvidersConfig {
            rates_url: url.into(),
            short_timeout_secs: 2,
            ..ProvidersConfig::default()
        };
        RatesProvider::new(&config)
    }

    async fn mock_rates(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v4/latest/RUB"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn success_reports_both_rates() {
        let server = MockServer::start().await;
        mock_rates(
            &server,
            serde_json::json!({ "base": "RUB", "rates": { "USD": 0.011, "EUR": 0.0099 } }),
        )
        .await;

        let report = provider(&format!("{}/v4/latest/RUB", server.uri())).report().await;
        assert_eq!(report, "Курс к рублю:\nUSD: 0.011\nEUR: 0.0099");
    }

    #[tokio::test]
    async fn missing_currency_defaults_independently() {
        let server = MockServer::start().await;
        mock_rates(&server, serde_json::json!({ "rates": { "USD": 0.011 } })).await;

        let report = provider(&format!("{}/v4/latest/RUB", server.uri())).report().await;
        assert!(report.contains("USD: 0.011"));
        assert!(report.contains("EUR: Н/Д"));
    }

    #[tokio::test]
    async fn error_status_yields_test_rates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let report = provider(&server.uri()).report().await;
        assert_eq!(report, TEST_RATES);
    }

    #[tokio::test]
    async fn unreachable_upstream_yields_unavailable_message() {
        let report = provider("http://127.0.0.1:9/v4/latest/RUB").report().await;
        assert_eq!(report, RATES_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unparseable_payload_yields_unavailable_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let report = provider(&server.uri()).report().await;
        assert_eq!(report, RATES_UNAVAILABLE);
    }
}
