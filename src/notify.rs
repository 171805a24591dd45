// Webhook notification - posts a markdown run summary
//
// WeCom-compatible wire format:
//   {"msgtype": "markdown", "markdown": {"content": "..."}}

use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::dispatch::models::BatchResult;

const WEBHOOK_ENDPOINT: &str = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send";

/// How many failed inputs the summary lists before truncating.
const MAX_FAILURES_LISTED: usize = 5;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Posts one markdown message per finished batch to a group webhook.
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: WEBHOOK_ENDPOINT.to_string(),
            key: key.into(),
        }
    }

    /// Override the endpoint (for self-hosted relays and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub async fn notify(&self, action: &str, result: &BatchResult) -> Result<(), NotifyError> {
        let content = markdown_summary(action, result);
        let body = json!({"msgtype": "markdown", "markdown": {"content": content}});

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.key.as_str())])
            .json(&body)
            .send()
            .await?;
        response.error_for_status()?;
        debug!(action, "webhook notification sent");
        Ok(())
    }
}

/// Render one batch result as a short markdown block: verdict, counts,
/// and the first few failed inputs.
pub fn markdown_summary(action: &str, result: &BatchResult) -> String {
    let verdict = if result.success { "success" } else { "failed" };
    let mut lines = vec![
        format!("**{}**: {}", action, verdict),
        format!("> {}", result.message),
        format!(
            "> downloaded: {}, failed: {}",
            result.downloaded_count, result.failed_count
        ),
    ];

    let failures: Vec<_> = result.details.iter().filter(|d| !d.is_success()).collect();
    for detail in failures.iter().take(MAX_FAILURES_LISTED) {
        lines.push(format!(
            "> x {}: {}",
            detail.input,
            detail.error.as_deref().unwrap_or("unknown error")
        ));
    }
    if failures.len() > MAX_FAILURES_LISTED {
        lines.push(format!("> ... {} more", failures.len() - MAX_FAILURES_LISTED));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::models::ItemOutcome;

    #[test]
    fn test_summary_carries_verdict_and_counts() {
        let result = BatchResult {
            success: true,
            message: "detail: processed 2 of 3 inputs".to_string(),
            downloaded_count: 2,
            failed_count: 1,
            details: vec![
                ItemOutcome::success("a", vec!["1".to_string()], 1),
                ItemOutcome::failed("b", Vec::new(), "unrecognized url: b"),
            ],
        };

        let summary = markdown_summary("detail", &result);
        assert!(summary.starts_with("**detail**: success"));
        assert!(summary.contains("downloaded: 2, failed: 1"));
        assert!(summary.contains("b: unrecognized url: b"));
    }

    #[test]
    fn test_summary_truncates_long_failure_lists() {
        let details: Vec<ItemOutcome> = (0..8)
            .map(|i| ItemOutcome::failed(format!("url-{i}"), Vec::new(), "boom"))
            .collect();
        let result = BatchResult {
            success: false,
            message: "detail: no usable results".to_string(),
            downloaded_count: 0,
            failed_count: details.len(),
            details,
        };

        let summary = markdown_summary("detail", &result);
        assert!(summary.contains("url-4"));
        assert!(!summary.contains("url-5"));
        assert!(summary.contains("... 3 more"));
    }
}
