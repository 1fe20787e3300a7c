use super::error::{map_http_error, RelayError};
use super::estimate::{fallback_estimate, parse_estimate_reply, Estimate, SYSTEM_PROMPT};
use crate::config::RelayConfig;
use serde_json::{json, Value};

/// Client for the upstream chat-completions gateway
#[derive(Debug, Clone)]
pub struct Estimator {
    client: reqwest::Client,
    config: RelayConfig,
    api_key: Option<String>,
}

impl Estimator {
    pub fn new(config: RelayConfig, api_key: Option<String>) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Build from config, taking the key from the configured env var
    pub fn from_config(config: RelayConfig) -> Result<Self, RelayError> {
        let api_key = config.api_key();
        Self::new(config, api_key)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Ask the model for an estimate of `title`.
    ///
    /// Transport and status failures are errors. A reply that arrives but
    /// cannot be used gives the heuristic estimate instead.
    pub async fn estimate(&self, title: &str) -> Result<Estimate, RelayError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RelayError::MissingTitle);
        }
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!(env = %self.config.api_key_env, "AI API key is not configured");
            return Err(RelayError::NotConfigured);
        };

        tracing::info!(title, model = %self.config.model, "requesting estimate");

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Task: {title}") },
            ],
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "AI gateway unreachable");
                RelayError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %detail, "AI gateway error");
            return Err(map_http_error(status));
        }

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "AI gateway sent a non-JSON body");
                return Ok(fallback_estimate(title));
            }
        };

        let content = data
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str);
        let estimate = match content {
            Some(reply) => parse_estimate_reply(reply, title),
            None => {
                tracing::warn!("no content in AI response, using heuristic");
                fallback_estimate(title)
            }
        };

        tracing::info!(minutes = estimate.minutes, "estimate ready");
        Ok(estimate)
    }

    /// Estimate, degrading any relay error to the heuristic. The error is
    /// returned alongside so callers can report it.
    pub async fn estimate_or_fallback(&self, title: &str) -> (Estimate, Option<RelayError>) {
        match self.estimate(title).await {
            Ok(estimate) => (estimate, None),
            Err(e) => (fallback_estimate(title), Some(e)),
        }
    }
}

/// Run one estimate on a throwaway runtime, for synchronous callers
pub fn estimate_blocking(config: RelayConfig, title: &str) -> (Estimate, Option<RelayError>) {
    let estimator = match Estimator::from_config(config) {
        Ok(estimator) => estimator,
        Err(e) => return (fallback_estimate(title), Some(e)),
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            return (
                fallback_estimate(title),
                Some(RelayError::Transport(e.to_string())),
            )
        }
    };

    runtime.block_on(estimator.estimate_or_fallback(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn estimator(server: &MockServer) -> Estimator {
        let config = RelayConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            ..RelayConfig::default()
        };
        Estimator::new(config, Some("test-key".to_string())).unwrap()
    }

    fn completion(content: &str) -> Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
    }

    #[tokio::test]
    async fn test_estimate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({ "model": "google/gemini-2.5-flash" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"minutes": 90, "firstPrinciples": "Research then write.", "steps": ["Research", "Write"]}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let estimate = estimator(&server).estimate("Write blog post").await.unwrap();
        assert_eq!(estimate.minutes, 90);
        assert_eq!(estimate.first_principles, "Research then write.");
        assert_eq!(estimate.steps, vec!["Research".to_string(), "Write".to_string()]);
    }

    #[tokio::test]
    async fn test_user_message_carries_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{ "role": "system" }, { "role": "user", "content": "Task: Email Bob" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"minutes": 10}"#)))
            .expect(1)
            .mount(&server)
            .await;

        let estimate = estimator(&server).estimate("  Email Bob ").await.unwrap();
        assert_eq!(estimate.minutes, 10);
    }

    #[tokio::test]
    async fn test_clamps_upstream_minutes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(r#"{"minutes": 1000}"#)))
            .mount(&server)
            .await;

        let estimate = estimator(&server).estimate("Rewrite the app").await.unwrap();
        assert_eq!(estimate.minutes, 480);
    }

    #[tokio::test]
    async fn test_falls_back_without_numeric_minutes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("I think about an hour")))
            .mount(&server)
            .await;

        let title = "Plan the team offsite";
        let estimate = estimator(&server).estimate(title).await.unwrap();
        assert_eq!(estimate, fallback_estimate(title));
    }

    #[tokio::test]
    async fn test_falls_back_without_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let estimate = estimator(&server).estimate("Email").await.unwrap();
        assert_eq!(estimate.minutes, 15);
    }

    #[tokio::test]
    async fn test_maps_upstream_statuses() {
        for (status, expected) in [
            (429, RelayError::RateLimited),
            (402, RelayError::QuotaExhausted),
            (503, RelayError::UpstreamStatus(503)),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = estimator(&server).estimate("Email").await.unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn test_blank_title_and_missing_key() {
        let server = MockServer::start().await;
        let err = estimator(&server).estimate("   ").await.unwrap_err();
        assert_eq!(err, RelayError::MissingTitle);

        let config = RelayConfig {
            base_url: server.uri(),
            ..RelayConfig::default()
        };
        let keyless = Estimator::new(config, None).unwrap();
        assert_eq!(keyless.estimate("Email").await.unwrap_err(), RelayError::NotConfigured);
    }

    #[tokio::test]
    async fn test_estimate_or_fallback_reports_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let (estimate, err) = estimator(&server).estimate_or_fallback("Email Bob").await;
        assert_eq!(estimate, fallback_estimate("Email Bob"));
        assert_eq!(err, Some(RelayError::RateLimited));
    }
}
