// Collection family - account favorites and favorites folders (douyin only)
//
// `collection` / `collection_music` work off the credential's account
// and take no input; `collects` is url-driven like the other batches.

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::ItemOutcome;
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{CollectionKind, ContentFetcher, LinkExtractor, LinkKind};

pub async fn run_collection(
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    kind: CollectionKind,
) -> Vec<ItemOutcome> {
    let label = match kind {
        CollectionKind::Works => "collection",
        CollectionKind::Music => "collection_music",
    };
    match fetcher.fetch_collection(kind, session).await {
        Ok(items) => vec![ItemOutcome::success(label, Vec::new(), items.len())],
        Err(e) => vec![ItemOutcome::failed(label, Vec::new(), e.to_string())],
    }
}

pub struct CollectsHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
}

#[async_trait]
impl ItemHandler for CollectsHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let collect_ids = self.extractor.extract(input, LinkKind::Collects).await?;
        if collect_ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        let items = self
            .fetcher
            .fetch_collects(&collect_ids, self.session)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: collect_ids.clone(),
                error: e.into(),
            })?;

        Ok(ItemSuccess {
            extracted_ids: collect_ids,
            payload_size: items.len(),
        })
    }
}

pub async fn run_collects(
    extractor: &dyn LinkExtractor,
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    urls: &[String],
) -> Vec<ItemOutcome> {
    let mut handler = CollectsHandler {
        extractor,
        fetcher,
        session,
    };
    run_batch(urls, &mut handler).await
}
