//! AI rewrite gateway
//!
//! Forwards draft feedback text to an external rewrite webhook and returns
//! either the rewritten text or the original with a failure reason. The
//! gateway never fails the caller: transport errors, bad statuses, and
//! unusable response bodies all collapse into [`RewriteOutcome::Failed`]
//! so a submission flow can fall back to the author's own words.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Webhook endpoint used when `REWRITE_API_URL` is not set.
pub const DEFAULT_ENDPOINT: &str =
    "https://ssaraf8.app.n8n.cloud/webhook/ca0cc0bf-209d-489c-9324-46b1f62a523d";

/// Upper bound on a single rewrite round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the rewrite gateway.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    /// Webhook URL the rewrite request is posted to
    pub endpoint: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Request body sent to the rewrite webhook.
#[derive(Debug, Serialize)]
struct RewriteRequest<'a> {
    feedback_text: &'a str,
}

/// Response body from the rewrite webhook.
///
/// The webhook has returned the rewritten text under either field name, so
/// both are accepted and `feedback_text` wins when both are present.
#[derive(Debug, Deserialize)]
struct RewriteResponse {
    #[serde(default)]
    feedback_text: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// Result of a rewrite attempt, always carrying the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RewriteOutcome {
    /// The webhook produced usable rewritten text
    #[serde(rename_all = "camelCase")]
    Rewritten {
        /// Text the author submitted for rewriting
        original: String,
        /// Text produced by the webhook
        rewritten: String,
    },
    /// The webhook could not be used; the caller should keep the original
    #[serde(rename_all = "camelCase")]
    Failed {
        /// Text the author submitted for rewriting
        original: String,
        /// Human-readable failure description
        reason: String,
    },
}

/// Client for the rewrite webhook.
pub struct RewriteClient {
    config: RewriteConfig,
    client: reqwest::Client,
}

impl RewriteClient {
    /// Creates a client for the given configuration.
    pub fn new(config: RewriteConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a client pointed at the default endpoint.
    #[must_use]
    pub fn with_default() -> Self {
        Self::new(RewriteConfig::default())
    }

    /// Sends `text` to the webhook and returns the outcome.
    pub async fn rewrite(&self, text: &str) -> RewriteOutcome {
        debug!("Requesting rewrite of {} characters", text.len());

        let request = RewriteRequest {
            feedback_text: text,
        };

        let response = match self
            .client
            .post(&self.config.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Rewrite request failed: {e}");
                return RewriteOutcome::Failed {
                    original: text.to_string(),
                    reason: format!("Request failed: {e}"),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Rewrite service returned {status}");
            return RewriteOutcome::Failed {
                original: text.to_string(),
                reason: format!("Rewrite service returned {status}"),
            };
        }

        match response.json::<RewriteResponse>().await {
            Ok(body) => outcome_from_response(text, body),
            Err(e) => {
                warn!("Rewrite response was unusable: {e}");
                RewriteOutcome::Failed {
                    original: text.to_string(),
                    reason: format!("Unusable response: {e}"),
                }
            }
        }
    }
}

fn outcome_from_response(original: &str, body: RewriteResponse) -> RewriteOutcome {
    let rewritten = body
        .feedback_text
        .or(body.text)
        .filter(|text| !text.trim().is_empty());

    match rewritten {
        Some(rewritten) => RewriteOutcome::Rewritten {
            original: original.to_string(),
            rewritten,
        },
        None => RewriteOutcome::Failed {
            original: original.to_string(),
            reason: "Response did not contain rewritten text".to_string(),
        },
    }
}
