// Live action - resolve stream addresses per live room url

use async_trait::async_trait;

use crate::dispatch::errors::{AdapterError, ItemError};
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::{ItemOutcome, Platform};
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor, LinkKind};

pub struct LiveHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
    pub platform: Platform,
}

#[async_trait]
impl ItemHandler for LiveHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let room_ids = self.extractor.extract(input, LinkKind::Live).await?;
        if room_ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        let streams = self
            .fetcher
            .fetch_live(&room_ids, self.platform)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: room_ids.clone(),
                error: e.into(),
            })?;

        // A room that resolved to nothing is offline or gone; the caller
        // asked for a stream address, so that is a failure for this url.
        if streams.is_empty() {
            return Err(ItemFailure {
                extracted_ids: room_ids,
                error: AdapterError::Fetch("no live streams resolved".to_string()).into(),
            });
        }

        self.session
            .write_all(&streams)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: room_ids.clone(),
                error: e.into(),
            })?;

        Ok(ItemSuccess {
            extracted_ids: room_ids,
            payload_size: streams.len(),
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
    let mut handler = LiveHandler {
        extractor,
        fetcher,
        session,
        platform,
    };
    run_batch(urls, &mut handler).await
}
