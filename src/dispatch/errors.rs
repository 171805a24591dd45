// Error types for the dispatch layer
//
// Taxonomy:
// - ValidationError: fatal, reported before any work starts
// - AdapterError:    the failure contract of the injected collaborators
// - ItemError:       isolated per input item, recorded in the batch details
// - DispatchError:   fatal to the whole call; converted to a failed
//   BatchResult at the facade boundary, never surfaced as Err to the caller

use thiserror::Error;

/// Request rejected before any batch work started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The action name is not in the registry. The message enumerates
    /// the supported set so automation callers can self-correct.
    #[error("unknown action: {name} (supported: {supported})")]
    UnknownAction { name: String, supported: String },

    #[error("action {action} requires at least one url")]
    MissingInput { action: &'static str },

    /// Inputs were present but nothing survived trimming.
    #[error("no usable urls provided")]
    EmptyInput,

    #[error("action search requires a non-empty search keyword")]
    EmptyKeyword,

    #[error("urls must be a string or a list of strings")]
    InvalidInputType,

    #[error("action {action} is not supported on the tiktok platform")]
    PlatformUnsupported { action: &'static str },

    #[error("cookie must not be empty")]
    EmptyCredential,
}

/// Failure contract of the injected extraction/fetch/recording backends.
/// The core treats the payload as opaque text.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("unrecognized url: {0}")]
    UnrecognizedUrl(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("recorder error: {0}")]
    Recorder(String),
}

/// Per-item failure. Always isolated by the batch executor; the display
/// text ends up in the item's `error` field, never in the batch message.
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("no identifiers extracted")]
    NoIdentifiers,

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Fatal error for the whole invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The recording session could not be acquired. Nothing can be
    /// bookkept without it, so the whole action aborts.
    #[error("recording session unavailable: {0}")]
    Resource(AdapterError),

    /// Adapter failure outside the per-item isolation boundary.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}
