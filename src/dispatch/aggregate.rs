// Result aggregation - counts, verdict and summary message

use super::models::{BatchResult, ItemOutcome};
use super::registry::{Action, CountingMode};

/// Fold per-item outcomes into the single batch report.
///
/// `success` is true iff at least one usable result was produced; a
/// partially failed batch stays successful, an entirely failed one does
/// not. The message carries counts only — raw per-item errors belong in
/// `details`.
pub fn aggregate(action: Action, mode: CountingMode, outcomes: Vec<ItemOutcome>) -> BatchResult {
    let failed_count = outcomes.iter().filter(|o| !o.is_success()).count();
    let succeeded = outcomes.len() - failed_count;

    let downloaded_count = match mode {
        CountingMode::Items => succeeded,
        CountingMode::Identifiers => outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.payload_size)
            .sum(),
    };

    let success = downloaded_count > 0;
    let message = if success {
        match mode {
            CountingMode::Items => format!(
                "{}: processed {} of {} inputs",
                action.name(),
                succeeded,
                outcomes.len()
            ),
            CountingMode::Identifiers => {
                format!("{}: collected {} records", action.name(), downloaded_count)
            }
        }
    } else {
        format!("{}: no usable results", action.name())
    };

    BatchResult {
        success,
        message,
        downloaded_count,
        failed_count,
        details: outcomes,
    }
}
