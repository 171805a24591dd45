// Share-link extractor - regex tables for douyin/tiktok url grammars
//
// Reference implementation of the LinkExtractor seam. Works on the
// canonical web urls only; shortened share links (v.douyin.com/...)
// need a network round-trip to resolve and belong to a richer backend.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::dispatch::errors::AdapterError;
use crate::dispatch::models::Platform;
use crate::dispatch::traits::{LinkExtractor, LinkKind};

lazy_static! {
    // douyin
    static ref DY_POST_RE: Regex =
        Regex::new(r"douyin\.com/(?:video|note)/(\d+)").unwrap();
    static ref DY_MODAL_RE: Regex = Regex::new(r"modal_id=(\d+)").unwrap();
    static ref DY_USER_RE: Regex =
        Regex::new(r"douyin\.com/user/([A-Za-z0-9_\-]+)").unwrap();
    static ref DY_LIVE_RE: Regex = Regex::new(r"live\.douyin\.com/(\d+)").unwrap();
    static ref DY_MIX_RE: Regex =
        Regex::new(r"douyin\.com/mix/detail/(\d+)").unwrap();
    static ref DY_COLLECTS_RE: Regex =
        Regex::new(r"douyin\.com/collection/(\d+)").unwrap();

    // tiktok
    static ref TT_POST_RE: Regex =
        Regex::new(r"tiktok\.com/@[\w.\-]+/(?:video|photo)/(\d+)").unwrap();
    static ref TT_USER_RE: Regex = Regex::new(r"tiktok\.com/@([\w.\-]+)").unwrap();
    static ref TT_LIVE_RE: Regex =
        Regex::new(r"tiktok\.com/@([\w.\-]+)/live").unwrap();
    static ref TT_MIX_RE: Regex =
        Regex::new(r"tiktok\.com/@[\w.\-]+/playlist/[^/\s]*-(\d+)").unwrap();
}

/// Pattern-matching extractor for share text and canonical page urls.
/// One instance per platform; the same text may carry several links.
pub struct ShareLinkExtractor {
    platform: Platform,
}

impl ShareLinkExtractor {
    pub fn douyin() -> Self {
        Self {
            platform: Platform::Douyin,
        }
    }

    pub fn tiktok() -> Self {
        Self {
            platform: Platform::Tiktok,
        }
    }

    fn capture_all(patterns: &[&Regex], text: &str) -> Vec<String> {
        let mut ids = Vec::new();
        for pattern in patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(id) = caps.get(1) {
                    let id = id.as_str().to_string();
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }

    fn patterns(&self, kind: LinkKind) -> Vec<&'static Regex> {
        match (self.platform, kind) {
            (Platform::Douyin, LinkKind::Post) => vec![&DY_POST_RE, &DY_MODAL_RE],
            (Platform::Douyin, LinkKind::Live) => vec![&DY_LIVE_RE],
            (Platform::Douyin, LinkKind::Mix) => vec![&DY_MIX_RE],
            (Platform::Douyin, LinkKind::Collects) => vec![&DY_COLLECTS_RE],
            (Platform::Tiktok, LinkKind::Post) => vec![&TT_POST_RE],
            (Platform::Tiktok, LinkKind::Live) => vec![&TT_LIVE_RE],
            (Platform::Tiktok, LinkKind::Mix) => vec![&TT_MIX_RE],
            // tiktok has no collects grammar; nothing will match.
            (Platform::Tiktok, LinkKind::Collects) => vec![],
        }
    }
}

#[async_trait]
impl LinkExtractor for ShareLinkExtractor {
    fn name(&self) -> &'static str {
        match self.platform {
            Platform::Douyin => "douyin-share-links",
            Platform::Tiktok => "tiktok-share-links",
        }
    }

    async fn extract(&self, url: &str, kind: LinkKind) -> Result<Vec<String>, AdapterError> {
        let ids = Self::capture_all(&self.patterns(kind), url);
        if ids.is_empty() {
            return Err(AdapterError::UnrecognizedUrl(url.to_string()));
        }
        Ok(ids)
    }

    async fn extract_user(&self, url: &str) -> Result<Vec<String>, AdapterError> {
        let pattern = match self.platform {
            Platform::Douyin => &*DY_USER_RE,
            Platform::Tiktok => &*TT_USER_RE,
        };
        let ids = Self::capture_all(&[pattern], url);
        if ids.is_empty() {
            return Err(AdapterError::UnrecognizedUrl(url.to_string()));
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_douyin_video_url() {
        let extractor = ShareLinkExtractor::douyin();
        let ids = extractor
            .extract("https://www.douyin.com/video/7253355171290352955", LinkKind::Post)
            .await
            .unwrap();
        assert_eq!(ids, vec!["7253355171290352955".to_string()]);
    }

    #[tokio::test]
    async fn test_douyin_modal_id() {
        let extractor = ShareLinkExtractor::douyin();
        let ids = extractor
            .extract(
                "https://www.douyin.com/user/self?modal_id=7253355171290352955&showTab=favorite",
                LinkKind::Post,
            )
            .await
            .unwrap();
        assert_eq!(ids, vec!["7253355171290352955".to_string()]);
    }

    #[tokio::test]
    async fn test_text_with_two_links() {
        let extractor = ShareLinkExtractor::douyin();
        let text = "first https://www.douyin.com/video/111 then https://www.douyin.com/note/222";
        let ids = extractor.extract(text, LinkKind::Post).await.unwrap();
        assert_eq!(ids, vec!["111".to_string(), "222".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_collapsed() {
        let extractor = ShareLinkExtractor::douyin();
        let text = "https://www.douyin.com/video/111 https://www.douyin.com/video/111";
        let ids = extractor.extract(text, LinkKind::Post).await.unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_url_fails() {
        let extractor = ShareLinkExtractor::douyin();
        let err = extractor
            .extract("https://example.com/whatever", LinkKind::Post)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnrecognizedUrl(_)));
    }

    #[tokio::test]
    async fn test_douyin_live_room() {
        let extractor = ShareLinkExtractor::douyin();
        let ids = extractor
            .extract("https://live.douyin.com/123456789", LinkKind::Live)
            .await
            .unwrap();
        assert_eq!(ids, vec!["123456789".to_string()]);
    }

    #[tokio::test]
    async fn test_douyin_user_page() {
        let extractor = ShareLinkExtractor::douyin();
        let ids = extractor
            .extract_user("https://www.douyin.com/user/MS4wLjABAAAA86KI_-x")
            .await
            .unwrap();
        assert_eq!(ids, vec!["MS4wLjABAAAA86KI_-x".to_string()]);
    }

    #[tokio::test]
    async fn test_tiktok_video_url() {
        let extractor = ShareLinkExtractor::tiktok();
        let ids = extractor
            .extract("https://www.tiktok.com/@someone/video/7253355171290352955", LinkKind::Post)
            .await
            .unwrap();
        assert_eq!(ids, vec!["7253355171290352955".to_string()]);
    }

    #[tokio::test]
    async fn test_tiktok_user_handle() {
        let extractor = ShareLinkExtractor::tiktok();
        let ids = extractor
            .extract_user("https://www.tiktok.com/@someone.else")
            .await
            .unwrap();
        assert_eq!(ids, vec!["someone.else".to_string()]);
    }

    #[tokio::test]
    async fn test_tiktok_collects_never_matches() {
        let extractor = ShareLinkExtractor::tiktok();
        let err = extractor
            .extract("https://www.tiktok.com/@someone/video/1", LinkKind::Collects)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnrecognizedUrl(_)));
    }
}
