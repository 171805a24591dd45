//! Batch action dispatch and result aggregation for Douyin/TikTok
//! content fetching.
//!
//! One call = one action (fetch post details, account works, comments,
//! search results, live stream addresses, ...) over a batch of urls or
//! a keyword. The dispatcher validates the action against its
//! compatibility matrix, normalizes the inputs, runs each item through
//! the extraction/fetch pipeline without letting one failure abort the
//! batch, and folds everything into a single [`BatchResult`].
//!
//! Extraction, fetching and recording are injected behind the traits in
//! [`dispatch::traits`]; the [`links`], [`export`] and [`notify`]
//! modules ship reference implementations.

pub mod dispatch;
pub mod export;
pub mod links;
pub mod notify;

pub use dispatch::{
    AccountTab, Action, ActionRegistry, AdapterError, BatchResult, DispatchError, DispatchOptions,
    Dispatcher, ExportFormat, FetchedItem, InvocationRequest, ItemOutcome, ItemStatus, Platform,
    PlatformExtractors, RawInputs, SearchKind, ValidationError,
};
