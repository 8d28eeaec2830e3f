//! Random-fact provider.
//!
//! Tries the primary endpoint, then the secondary, then a fixed local list.

use rand::seq::SliceRandom;
use sputnik_common::config::ProvidersConfig;

/// Facts served when both upstream sources are unavailable.
const LOCAL_FACTS: &[&str] = &[
    "Медведи гризли могут бегать со скоростью до 50 км/ч",
    "Сердце кита бьется всего 9 раз в минуту",
    "Осьминоги имеют три сердца",
    "Страусы могут бегать быстрее лошадей",
    "Бабочки пробуют пищу ногами",
];

/// Returned when the secondary source answers without a usable text field.
const MISSING_FACT: &str = "Факт не найден";

/// Random-fact provider with a two-source fallback chain.
#[derive(Debug, Clone)]
pub struct FactsProvider {
    client: reqwest::Client,
    primary_url: String,
    fallback_url: String,
}

impl FactsProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            client: crate::http_client(config.short_timeout_secs),
            primary_url: config.facts_url.clone(),
            fallback_url: config.facts_fallback_url.clone(),
        }
    }

    /// Fetch a random fact. Never fails: falls back to the secondary source,
    /// then to a local fact chosen uniformly at random.
    pub async fn random_fact(&self) -> String {
        match self.fetch_from(&self.primary_url).await {
            Some(fact) => fact,
            None => {
                tracing::warn!(url = %self.primary_url, "Primary fact source failed, trying secondary");
                match self.fetch_from(&self.fallback_url).await {
                    Some(fact) => fact,
                    None => {
                        tracing::warn!(url = %self.fallback_url, "Secondary fact source failed, using local fact");
                        local_fact()
                    }
                }
            }
        }
    }

    /// Fetch one fact endpoint. Both sources answer JSON with a `text` field.
    async fn fetch_from(&self, url: &str) -> Option<String> {
        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Fact request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            tracing::debug!(url = %url, status = %resp.status(), "Fact source returned non-success");
            return None;
        }

        let data: serde_json::Value = resp.json().await.ok()?;
        Some(
            data.get("text")
                .and_then(|t| t.as_str())
                .unwrap_or(MISSING_FACT)
                .to_string(),
        )
    }
}

/// Pick one of the built-in facts uniformly at random.
fn local_fact() -> String {
    LOCAL_FACTS
        .choose(&mut rand::thread_rng())
        .map(|f| (*f).to_string())
        .unwrap_or_else(|| LOCAL_FACTS[0].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(primary: &str, fallback: &str) -> FactsProvider {
        let config = ProvidersConfig {
            facts_url: primary.into(),
            facts_fallback_url: fallback.into(),
            short_timeout_secs: 2,
            ..ProvidersConfig::default()
        };
        FactsProvider::new(&config)
    }

    #[test]
    fn local_fact_comes_from_fixed_list() {
        let fact = local_fact();
        assert!(LOCAL_FACTS.contains(&fact.as_str()));
    }

    #[tokio::test]
    async fn primary_source_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/random.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "id": "abc", "text": "Cats sleep a lot" })),
            )
            .mount(&server)
            .await;

        let p = provider(
            &format!("{}/random.json", server.uri()),
            "http://127.0.0.1:9/random",
        );
        assert_eq!(p.random_fact().await, "Cats sleep a lot");
    }

    #[tokio::test]
    async fn falls_back_to_secondary_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/random.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/random"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "text": "Bees can count" })),
            )
            .mount(&server)
            .await;

        let p = provider(
            &format!("{}/random.json", server.uri()),
            &format!("{}/random", server.uri()),
        );
        assert_eq!(p.random_fact().await, "Bees can count");
    }

    #[tokio::test]
    async fn secondary_without_text_field_reports_missing_fact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
            .mount(&server)
            .await;

        let p = provider("http://127.0.0.1:9/random.json", &format!("{}/random", server.uri()));
        assert_eq!(p.random_fact().await, MISSING_FACT);
    }

    #[tokio::test]
    async fn both_sources_down_yields_local_fact() {
        // Unroutable addresses: connection is refused without touching the network
        let p = provider("http://127.0.0.1:9/random.json", "http://127.0.0.1:9/random");
        let fact = p.random_fact().await;
        assert!(!fact.is_empty());
        assert!(LOCAL_FACTS.contains(&fact.as_str()));
    }
}
