//! Weather provider backed by wttr.in.
//!
//! The two failure classes answer differently: an error status yields a
//! synthetic reading labeled as test data, an unreachable upstream yields a
//! "temporarily unavailable" line. Both always mention the requested city.

use rand::seq::SliceRandom;
use sputnik_common::config::ProvidersConfig;

/// Synthetic readings used when the API answers with an error status.
const SYNTHETIC_READINGS: &[&str] = &[
    "+15°C солнечно",
    "+20°C облачно",
    "+10°C дождь",
    "+25°C ясно",
];

/// Weather-by-city provider.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: crate::http_client(config.weather_timeout_secs),
            base_url: config.weather_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a one-line weather report for `city`. Never fails.
    pub async fn report(&self, city: &str) -> String {
        // wttr.in's compact format: condition + temperature
        let url = format!("{}/{}?format=%C+%t", self.base_url, city);

        let resp = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Weather source unreachable");
                return format!("Сейчас в {city} хорошая погода! (данные временно недоступны)");
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(city = %city, status = %resp.status(), "Weather source returned non-success");
            return format!("Погода в {city}: {} (тестовые данные)", synthetic_reading());
        }

        match resp.text().await {
            Ok(body) => format!("Погода в {city}: {}", body.trim()),
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Weather response body unreadable");
                format!("Сейчас в {city} хорошая погода! (данные временно недоступны)")
            }
        }
    }
}

/// Pick one synthetic reading uniformly at random.
fn synthetic_reading() -> &'static str {
    SYNTHETIC_READINGS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SYNTHETIC_READINGS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> WeatherProvider {
        let config = ProvidersConfig {
            weather_url: base_url.into(),
            weather_timeout_secs: 2,
            ..ProvidersConfig::default()
        };
        WeatherProvider::new(&config)
    }

    #[tokio::test]
    async fn success_includes_city_and_trimmed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Moscow"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Sunny +21°C\n"))
            .mount(&server)
            .await;

        let report = provider(&server.uri()).report("Moscow").await;
        assert_eq!(report, "Погода в Moscow: Sunny +21°C");
    }

    #[tokio::test]
    async fn error_status_yields_labeled_test_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let report = provider(&server.uri()).report("Москва").await;
        assert!(report.contains("Москва"));
        assert!(report.contains("(тестовые данные)"));
        assert!(SYNTHETIC_READINGS.iter().any(|r| report.contains(r)));
    }

    #[tokio::test]
    async fn unreachable_upstream_yields_unavailable_message() {
        let report = provider("http://127.0.0.1:9").report("Казань").await;
        assert_eq!(
            report,
            "Сейчас в Казань хорошая погода! (данные временно недоступны)"
        );
    }

    #[tokio::test]
    async fn report_always_contains_city() {
        for city in ["Moscow", "Нижний Новгород", ""] {
            let report = provider("http://127.0.0.1:9").report(city).await;
            assert!(!report.is_empty());
            assert!(report.contains(city));
        }
    }
}
