// Dispatch facade - the single public entry point
//
// Validates, normalizes, opens the recording session, runs the one
// handler the registry selected, aggregates. Total: every failure is
// converted into a failed BatchResult, nothing escapes as Err or panic.

use std::sync::Arc;

use tracing::{info, warn};

use super::aggregate::aggregate;
use super::errors::DispatchError;
use super::handlers::{account, collection, comment, detail, live, mix, search, user};
use super::models::{BatchResult, InvocationRequest, Platform};
use super::normalize::{normalize_keyword, normalize_urls};
use super::recorder::with_session;
use super::registry::{Action, ActionRegistry, InputRule};
use super::traits::{CollectionKind, ContentFetcher, LinkExtractor, RecorderFactory, RecorderOptions};

/// One link extractor per platform, mirroring the backend's split
/// between douyin and tiktok url grammars.
pub struct PlatformExtractors {
    douyin: Arc<dyn LinkExtractor>,
    tiktok: Arc<dyn LinkExtractor>,
}

impl PlatformExtractors {
    pub fn new(douyin: Arc<dyn LinkExtractor>, tiktok: Arc<dyn LinkExtractor>) -> Self {
        Self { douyin, tiktok }
    }

    /// Same extractor for both platforms.
    pub fn shared(extractor: Arc<dyn LinkExtractor>) -> Self {
        Self {
            douyin: extractor.clone(),
            tiktok: extractor,
        }
    }

    pub fn for_platform(&self, platform: Platform) -> &dyn LinkExtractor {
        match platform {
            Platform::Douyin => self.douyin.as_ref(),
            Platform::Tiktok => self.tiktok.as_ref(),
        }
    }
}

/// Inputs after normalization, shaped by the action's input rule.
enum NormalizedInput {
    Urls(Vec<String>),
    Keyword(String),
    None,
}

impl NormalizedInput {
    fn urls(&self) -> &[String] {
        match self {
            Self::Urls(urls) => urls,
            _ => &[],
        }
    }

    fn keyword(&self) -> &str {
        match self {
            Self::Keyword(keyword) => keyword,
            _ => "",
        }
    }
}

pub struct Dispatcher {
    registry: ActionRegistry,
    extractors: PlatformExtractors,
    fetcher: Arc<dyn ContentFetcher>,
    recorder: Arc<dyn RecorderFactory>,
}

impl Dispatcher {
    pub fn new(
        extractors: PlatformExtractors,
        fetcher: Arc<dyn ContentFetcher>,
        recorder: Arc<dyn RecorderFactory>,
    ) -> Self {
        Self {
            registry: ActionRegistry::new(),
            extractors,
            fetcher,
            recorder,
        }
    }

    /// Run one action over the request's inputs and return the batch
    /// report. Never returns an error: validation failures, resource
    /// failures and anything a handler did not already isolate come
    /// back as a failed result with the error text as message.
    pub async fn dispatch(&self, request: InvocationRequest) -> BatchResult {
        match self.run(&request).await {
            Ok(result) => {
                info!(
                    action = %request.action,
                    success = result.success,
                    downloaded = result.downloaded_count,
                    failed = result.failed_count,
                    "dispatch finished"
                );
                result
            }
            Err(err) => {
                warn!(action = %request.action, error = %err, "dispatch failed");
                BatchResult::fatal(err.to_string())
            }
        }
    }

    async fn run(&self, request: &InvocationRequest) -> Result<BatchResult, DispatchError> {
        let spec = self.registry.validate(request)?;
        let action = spec.action;
        let platform = Platform::from_flag(request.tiktok);

        let input = match spec.input {
            InputRule::Urls => NormalizedInput::Urls(normalize_urls(&request.inputs)?),
            InputRule::Keyword => {
                NormalizedInput::Keyword(normalize_keyword(&request.options.search_keyword)?)
            }
            InputRule::None => NormalizedInput::None,
        };

        info!(action = action.name(), platform = platform.as_str(), "dispatching");

        let extractor = self.extractors.for_platform(platform);
        let fetcher = self.fetcher.as_ref();
        let options = &request.options;
        let recorder_options = RecorderOptions {
            format: options.storage_format,
            label: action.name().to_string(),
        };

        let outcomes = with_session(
            self.recorder.as_ref(),
            &options.download_path,
            &recorder_options,
            move |mut session| async move {
                let outcomes = match action {
                    Action::Detail => {
                        detail::run(extractor, fetcher, &mut session, input.urls(), platform, false)
                            .await
                    }
                    Action::DetailUnofficial => {
                        detail::run(extractor, fetcher, &mut session, input.urls(), platform, true)
                            .await
                    }
                    Action::Account => {
                        account::run(
                            extractor,
                            fetcher,
                            &mut session,
                            input.urls(),
                            platform,
                            options.account_tab,
                        )
                        .await
                    }
                    Action::Live => {
                        live::run(extractor, fetcher, &mut session, input.urls(), platform).await
                    }
                    Action::Comment => {
                        comment::run(
                            extractor,
                            fetcher,
                            &mut session,
                            input.urls(),
                            options.max_pages,
                        )
                        .await
                    }
                    Action::Mix => {
                        mix::run(extractor, fetcher, &mut session, input.urls(), platform).await
                    }
                    Action::User => {
                        user::run(extractor, fetcher, &mut session, input.urls()).await
                    }
                    Action::Search => {
                        search::run_search(
                            fetcher,
                            &mut session,
                            input.keyword(),
                            options.search_type,
                            options.max_pages,
                        )
                        .await
                    }
                    Action::Hot => search::run_hot(fetcher, &mut session).await,
                    Action::Collection => {
                        collection::run_collection(fetcher, &mut session, CollectionKind::Works)
                            .await
                    }
                    Action::CollectionMusic => {
                        collection::run_collection(fetcher, &mut session, CollectionKind::Music)
                            .await
                    }
                    Action::Collects => {
                        collection::run_collects(extractor, fetcher, &mut session, input.urls())
                            .await
                    }
                };
                (session, Ok(outcomes))
            },
        )
        .await?;

        Ok(aggregate(action, spec.counting, outcomes))
    }
}
