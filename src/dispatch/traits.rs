// Capability adapter traits - the seams to the external backend
//
// The core never knows how extraction or fetching works; it only sees
// these signatures and the AdapterError failure contract. Real
// implementations live with the collaborating backend; the crate ships
// reference implementations in the `links` and `export` modules.

use std::path::Path;

use async_trait::async_trait;

use super::errors::AdapterError;
use super::models::{AccountTab, ExportFormat, FetchedItem, Platform, SearchKind};
use super::recorder::RecordingSession;

/// What family of identifier an extraction call is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Regular post / video page.
    Post,
    /// Live stream room.
    Live,
    /// Mix / compilation page.
    Mix,
    /// Favorites folder page.
    Collects,
}

/// Collection family for the no-input collection actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Works,
    Music,
}

/// Parses provider urls into opaque identifiers.
#[async_trait]
pub trait LinkExtractor: Send + Sync {
    /// Name of the extractor (for logging).
    fn name(&self) -> &'static str;

    /// Extract identifiers of `kind` from one url. An url that matches
    /// no recognized pattern fails with `AdapterError::UnrecognizedUrl`.
    async fn extract(&self, url: &str, kind: LinkKind) -> Result<Vec<String>, AdapterError>;

    /// Extract account identifiers from a user page url.
    async fn extract_user(&self, url: &str) -> Result<Vec<String>, AdapterError>;
}

/// The fetch/download backend. Retry and backoff policy is entirely
/// owned by the implementation; per-call bounds arrive through options
/// the caller configured on it.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_details(
        &self,
        ids: &[String],
        platform: Platform,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    /// Original-quality variant of the detail fetch (tiktok only path).
    async fn fetch_origin_details(
        &self,
        ids: &[String],
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_account_works(
        &self,
        user_id: &str,
        tab: AccountTab,
        platform: Platform,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_live(
        &self,
        room_ids: &[String],
        platform: Platform,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_comments(
        &self,
        ids: &[String],
        max_pages: u32,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_mix(
        &self,
        mix_ids: &[String],
        platform: Platform,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_user_profiles(
        &self,
        user_ids: &[String],
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn search(
        &self,
        keyword: &str,
        kind: SearchKind,
        max_pages: u32,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_hot_board(
        &self,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_collection(
        &self,
        kind: CollectionKind,
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;

    async fn fetch_collects(
        &self,
        collect_ids: &[String],
        session: &mut RecordingSession,
    ) -> Result<Vec<FetchedItem>, AdapterError>;
}

/// Options handed to the recorder factory when a session opens.
#[derive(Debug, Clone)]
pub struct RecorderOptions {
    pub format: ExportFormat,
    /// Short label for the session, usually the action name.
    pub label: String,
}

/// An open recording resource. Written during the batch, closed exactly
/// once by the scoped recorder.
#[async_trait]
pub trait RecordSink: Send {
    async fn write(&mut self, item: &FetchedItem) -> Result<(), AdapterError>;

    async fn close(&mut self) -> Result<(), AdapterError>;
}

/// Produces recording resources. Acquisition failure aborts the whole
/// action (there is nowhere to record partial progress without one).
#[async_trait]
pub trait RecorderFactory: Send + Sync {
    async fn open(
        &self,
        root: &Path,
        options: &RecorderOptions,
    ) -> Result<Box<dyn RecordSink>, AdapterError>;
}
