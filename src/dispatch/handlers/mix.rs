// Mix action - fetch compilations per mix url

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::{ItemOutcome, Platform};
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor, LinkKind};

pub struct MixHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
    pub platform: Platform,
}

#[async_trait]
impl ItemHandler for MixHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let mix_ids = self.extractor.extract(input, LinkKind::Mix).await?;
        if mix_ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        let works = self
            .fetcher
            .fetch_mix(&mix_ids, self.platform, self.session)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: mix_ids.clone(),
                error: e.into(),
            })?;

        Ok(ItemSuccess {
            extracted_ids: mix_ids,
            payload_size: works.len(),
        })
    }
}

pub async fn run(
    extractor: &dyn LinkExtractor,
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    urls: &[String],
    platform: Platform,
) -> Vec<ItemOutcome> {
    let mut handler = MixHandler {
        extractor,
        fetcher,
        session,
        platform,
    };
    run_batch(urls, &mut handler).await
}
