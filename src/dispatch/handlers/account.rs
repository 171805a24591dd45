// Account action - fetch one works tab per account url

use async_trait::async_trait;

use crate::dispatch::errors::ItemError;
use crate::dispatch::executor::{run_batch, ItemFailure, ItemHandler, ItemSuccess};
use crate::dispatch::models::{AccountTab, ItemOutcome, Platform};
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::{ContentFetcher, LinkExtractor};

pub struct AccountHandler<'a> {
    pub extractor: &'a dyn LinkExtractor,
    pub fetcher: &'a dyn ContentFetcher,
    pub session: &'a mut RecordingSession,
    pub platform: Platform,
    pub tab: AccountTab,
}

#[async_trait]
impl ItemHandler for AccountHandler<'_> {
    async fn handle(&mut self, input: &str) -> Result<ItemSuccess, ItemFailure> {
        let user_ids = self.extractor.extract_user(input).await?;
        // A user page yields one account; extra matches are ignored.
        let Some(user_id) = user_ids.first() else {
            return Err(ItemError::NoIdentifiers.into());
        };

        let works = self
            .fetcher
            .fetch_account_works(user_id, self.tab, self.platform, self.session)
            .await
            .map_err(|e| ItemFailure {
                extracted_ids: user_ids.clone(),
                error: e.into(),
            })?;

        Ok(ItemSuccess {
            extracted_ids: user_ids,
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
    tab: AccountTab,
) -> Vec<ItemOutcome> {
    let mut handler = AccountHandler {
        extractor,
        fetcher,
        session,
        platform,
        tab,
    };
    run_batch(urls, &mut handler).await
}
