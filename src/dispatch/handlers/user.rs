// User action - collect account profiles per user url (douyin only)

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::ItemOutcome;
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor};

pub struct UserHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
}

#[async_trait]
impl ItemHandler for UserHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let user_ids = self.extractor.extract_user(input).await?;
        if user_ids.is_empty() {
            return Err(ItemError::NoIdentifiers.into());
        }

        let profiles = self
            .fetcher
            .fetch_user_profiles(&user_ids, self.session)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: user_ids.clone(),
                error: e.into(),
            })?;

        Ok(ItemSuccess {
            extracted_ids: user_ids,
            payload_size: profiles.len(),
        })
    }
}

pub async fn run(
    extractor: &dyn LinkExtractor,
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    urls: &[String],
) -> Vec<ItemOutcome> {
    let mut handler = UserHandler {
        extractor,
        fetcher,
        session,
    };
    run_batch(urls, &mut handler).await
}
