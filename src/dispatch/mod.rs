// Dispatch module - batch action dispatch and result aggregation

pub mod aggregate;
pub mod errors;
pub mod executor;
pub mod facade;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod recorder;
pub mod registry;
pub mod traits;

pub use errors::{AdapterError, DispatchError, ItemError, ValidationError};
pub use facade::{Dispatcher, PlatformExtractors};
pub use models::{
    AccountTab, BatchResult, DispatchOptions, ExportFormat, FetchedItem, InvocationRequest,
    ItemOutcome, ItemStatus, Platform, RawInputs, SearchKind,
};
pub use recorder::{with_session, RecordingSession};
pub use registry::{Action, ActionRegistry, ActionSpec, CountingMode, InputRule, PlatformSupport};
pub use traits::{
    CollectionKind, ContentFetcher, LinkExtractor, LinkKind, RecordSink, RecorderFactory,
    RecorderOptions,
};
