// Batch executor - strictly sequential, per-item failure isolation

use async_trait::async_trait;
use tracing::{debug, warn};

use super::errors::{AdapterError, ItemError};
use super::models::ItemOutcome;

/// What a per-item handler produced for one input.
#[derive(Debug, Clone)]
pub struct ItemSuccess {
    pub extracted_ids: Vec<String>,
    pub payload_size: usize,
}

/// Per-item failure, carrying whatever identifiers were extracted
/// before the failure so the outcome can still report them.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub extracted_ids: Vec<String>,
    pub error: ItemError,
}

impl From<ItemError> for ItemFailure {
    fn from(error: ItemError) -> Self {
        Self {
            extracted_ids: Vec::new(),
            error,
        }
    }
}

impl From<AdapterError> for ItemFailure {
    fn from(error: AdapterError) -> Self {
        ItemError::from(error).into()
    }
}

/// Resolves one normalized input. Implemented per action family.
#[async_trait]
pub trait ItemHandler: Send {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure>;
}

/// Process `items` strictly in order, one at a time. Every failure is
/// recorded against its item and the loop continues; nothing an item
/// does can abort the batch.
pub async fn run_batch(items: &[String], handler: &mut dyn ItemHandler) -> Vec<ItemOutcome> {
    let mut outcomes = Vec::with_capacity(items.len());

    for input in items {
        let outcome = match handler.handle(input).await {
            Ok(ok) if ok.extracted_ids.is_empty() => {
                // An empty identifier set is a failure, not an empty success.
                warn!(input, "no identifiers extracted");
                ItemOutcome::failed(input, Vec::new(), ItemError::NoIdentifiers.to_string())
            }
            Ok(ok) => {
                debug!(input, ids = ok.extracted_ids.len(), payload = ok.payload_size, "item done");
                ItemOutcome::success(input, ok.extracted_ids, ok.payload_size)
            }
            Err(failure) => {
                warn!(input, error = %failure.error, "item failed");
                ItemOutcome::failed(input, failure.extracted_ids, failure.error.to_string())
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::models::ItemStatus;

    /// Handler scripted by input: "fail" errors, "empty" extracts nothing.
    struct Scripted {
        calls: Vec<String>,
    }

    #[async_trait]
    impl ItemHandler for Scripted {
        async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
            self.calls.push(input.to_string());
            match input {
                "fail" => Err(AdapterError::Extraction("bad url".to_string()).into()),
                "empty" => Ok(ItemSuccess {
                    extracted_ids: Vec::new(),
                    payload_size: 0,
                }),
                other => Ok(ItemSuccess {
                    extracted_ids: vec![format!("id-{other}")],
                    payload_size: 1,
                }),
            }
        }
    }

    fn inputs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let mut handler = Scripted { calls: Vec::new() };
        let outcomes = run_batch(&inputs(&["a", "fail", "b"]), &mut handler).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].status, ItemStatus::Success);
        assert_eq!(outcomes[1].status, ItemStatus::Failed);
        assert!(outcomes[1].error.as_deref().unwrap().contains("bad url"));
        assert_eq!(outcomes[2].status, ItemStatus::Success);
        // all three were attempted, in order
        assert_eq!(handler.calls, inputs(&["a", "fail", "b"]));
    }

    #[tokio::test]
    async fn test_empty_identifier_set_is_a_failure() {
        let mut handler = Scripted { calls: Vec::new() };
        let outcomes = run_batch(&inputs(&["empty"]), &mut handler).await;

        assert_eq!(outcomes[0].status, ItemStatus::Failed);
        assert_eq!(outcomes[0].error.as_deref(), Some("no identifiers extracted"));
    }

    #[tokio::test]
    async fn test_order_preserved() {
        let mut handler = Scripted { calls: Vec::new() };
        let outcomes = run_batch(&inputs(&["x", "y", "z"]), &mut handler).await;
        let order: Vec<&str> = outcomes.iter().map(|o| o.input.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_empty_batch_yields_no_outcomes() {
        let mut handler = Scripted { calls: Vec::new() };
        let outcomes = run_batch(&[], &mut handler).await;
        assert!(outcomes.is_empty());
    }
}
