// Comment action - collect comment pages per post url (douyin only)

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::ItemOutcome;
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor, LinkKind};

pub struct CommentHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
    pub max_pages: u32,
}

#[async_trait]
impl ItemHandler for CommentHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let ids = self.extractor.extract(input, LinkKind::Post).await?;
        if ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        self.fetcher
            .fetch_comments(&ids, self.max_pages, self.session)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: ids.clone(),
                error: e.into(),
            })?;

        // Identifier-count mode: the payload is the number of posts whose
        // comments were collected, not the comment rows themselves.
        let payload_size = ids.len();
        Ok(ItemSuccess {
            extracted_ids: ids,
            payload_size,
        })
    }
}

pub async fn run(
    extractor: &dyn LinkExtractor,
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    urls: &[String],
    max_pages: u32,
) -> Vec<ItemOutcome> {
    let mut handler = CommentHandler {
        extractor,
        fetcher,
        session,
        max_pages,
    };
    run_batch(urls, &mut handler).await
}
