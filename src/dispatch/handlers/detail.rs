// Detail action - fetch individual posts per input url

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::{ItemOutcome, Platform};
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor, LinkKind};

pub struct DetailHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
    pub platform: Platform,
    /// Original-quality variant (`detail_unofficial`).
    pub unofficial: bool,
}

#[async_trait]
impl ItemHandler for DetailHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let ids = self.extractor.extract(input, LinkKind::Post).await?;
        if ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        let fetched = if self.unofficial {
            self.fetcher.fetch_origin_details(&ids, self.session).await
        } else {
            self.fetcher
                .fetch_details(&ids, self.platform, self.session)
                .await
        }
        .map_err(|e| ItemFailure {
            extracted_ids: ids.clone(),
            error: e.into(),
        })?;

        Ok(ItemSuccess {
            extracted_ids: ids,
            payload_size: fetched.len(),
        })
    }
}

pub async fn run(
    extractor: &dyn LinkExtractor,
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    urls: &[String],
    platform: Platform,
    unofficial: bool,
) -> Vec<ItemOutcome> {
    let mut handler = DetailHandler {
        extractor,
        fetcher,
        session,
        platform,
        unofficial,
    };
    run_batch(urls, &mut handler).await
}
