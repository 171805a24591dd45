// Search and hot-board actions - flat result lists (douyin only)
//
// These are not url batches: one keyword (or nothing at all) produces
// one flat result list, reported as a single outcome whose payload is
// the list length.

use crate::dispatch::models::{ItemOutcome, SearchKind};
use crate::dispatch::recorder::RecordingSession;
use crate::dispatch::traits::ContentFetcher;

pub async fn run_search(
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
    keyword: &str,
    kind: SearchKind,
    max_pages: u32,
) -> Vec<ItemOutcome> {
    match fetcher.search(keyword, kind, max_pages, session).await {
        Ok(results) => vec![ItemOutcome::success(keyword, Vec::new(), results.len())],
        Err(e) => vec![ItemOutcome::failed(keyword, Vec::new(), e.to_string())],
    }
}

pub async fn run_hot(
    fetcher: &dyn ContentFetcher,
    session: &mut RecordingSession,
) -> Vec<ItemOutcome> {
    match fetcher.fetch_hot_board(session).await {
        Ok(entries) => vec![ItemOutcome::success("hot", Vec::new(), entries.len())],
        Err(e) => vec![ItemOutcome::failed("hot", Vec::new(), e.to_string())],
    }
}
