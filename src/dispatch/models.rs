// Common data models for the dispatch layer

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ValidationError;

/// Content provider backend selected by the request's `tiktok` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Douyin,
    Tiktok,
}

impl Platform {
    pub fn from_flag(tiktok: bool) -> Self {
        if tiktok {
            Self::Tiktok
        } else {
            Self::Douyin
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Douyin => "douyin",
            Self::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller's `urls` argument before normalization: absent, a single
/// string, or a list of strings. Anything else is rejected up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawInputs {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl RawInputs {
    /// Coerce a JSON value from a wire-facing caller. Shapes other than
    /// null / string / array-of-strings are `InvalidInputType`.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(s) => Ok(Self::Single(s.clone())),
            Value::Array(items) => {
                let mut urls = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => urls.push(s.clone()),
                        _ => return Err(ValidationError::InvalidInputType),
                    }
                }
                Ok(Self::Many(urls))
            }
            _ => Err(ValidationError::InvalidInputType),
        }
    }

    /// True when no element would survive trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::None => true,
            Self::Single(s) => s.trim().is_empty(),
            Self::Many(urls) => urls.iter().all(|u| u.trim().is_empty()),
        }
    }
}

impl From<&str> for RawInputs {
    fn from(url: &str) -> Self {
        Self::Single(url.to_string())
    }
}

impl From<Vec<String>> for RawInputs {
    fn from(urls: Vec<String>) -> Self {
        Self::Many(urls)
    }
}

/// Works tab for account actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountTab {
    #[default]
    Post,
    Favorite,
    Collection,
}

/// Search result family for the search action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    General,
    User,
    Video,
    Live,
}

/// On-disk format for recording sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Csv => "csv",
        }
    }
}

/// Per-call options the dispatcher routes to handlers and the recorder.
/// Transport concerns (proxies, retry, timeouts, chunk sizes) belong to
/// the injected fetcher, configured at construction.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub download_path: PathBuf,
    pub storage_format: ExportFormat,
    pub account_tab: AccountTab,
    pub search_keyword: String,
    pub search_type: SearchKind,
    pub max_pages: u32,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            download_path: dirs::download_dir()
                .unwrap_or_else(|| PathBuf::from(".")),
            storage_format: ExportFormat::default(),
            account_tab: AccountTab::default(),
            search_keyword: String::new(),
            search_type: SearchKind::default(),
            max_pages: 99_999,
        }
    }
}

impl DispatchOptions {
    pub fn with_download_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.download_path = path.into();
        self
    }

    pub fn with_storage_format(mut self, format: ExportFormat) -> Self {
        self.storage_format = format;
        self
    }

    pub fn with_account_tab(mut self, tab: AccountTab) -> Self {
        self.account_tab = tab;
        self
    }

    pub fn with_search_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.search_keyword = keyword.into();
        self
    }

    pub fn with_search_type(mut self, kind: SearchKind) -> Self {
        self.search_type = kind;
        self
    }

    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }
}

/// One dispatch call. Immutable for the call's duration.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Wire name of the action, e.g. "detail" or "search".
    pub action: String,
    /// Primary (douyin) cookie string.
    pub cookie: String,
    /// Optional tiktok cookie for the alternate platform.
    pub cookie_tiktok: Option<String>,
    /// Alternate platform flag.
    pub tiktok: bool,
    pub inputs: RawInputs,
    pub options: DispatchOptions,
}

impl InvocationRequest {
    pub fn new(action: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            cookie: cookie.into(),
            cookie_tiktok: None,
            tiktok: false,
            inputs: RawInputs::None,
            options: DispatchOptions::default(),
        }
    }

    pub fn with_inputs(mut self, inputs: impl Into<RawInputs>) -> Self {
        self.inputs = inputs.into();
        self
    }

    pub fn with_tiktok(mut self, tiktok: bool) -> Self {
        self.tiktok = tiktok;
        self
    }

    pub fn with_cookie_tiktok(mut self, cookie: impl Into<String>) -> Self {
        self.cookie_tiktok = Some(cookie.into());
        self
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }
}

/// One record produced by the fetch backend and written to the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publish_time: Option<String>,
}

impl FetchedItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            publish_time: None,
        }
    }
}

/// Terminal state of one input item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Success,
    Failed,
}

/// Outcome of one normalized input. Immutable once built by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub input: String,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extracted_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub payload_size: usize,
}

impl ItemOutcome {
    pub fn success(input: impl Into<String>, extracted_ids: Vec<String>, payload_size: usize) -> Self {
        Self {
            input: input.into(),
            status: ItemStatus::Success,
            extracted_ids,
            error: None,
            payload_size,
        }
    }

    pub fn failed(input: impl Into<String>, extracted_ids: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            status: ItemStatus::Failed,
            extracted_ids,
            error: Some(error.into()),
            payload_size: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ItemStatus::Success
    }
}

/// The single structured report every dispatch call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub success: bool,
    pub message: String,
    pub downloaded_count: usize,
    pub failed_count: usize,
    pub details: Vec<ItemOutcome>,
}

impl BatchResult {
    /// Result for a failure that prevented any batch execution.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            downloaded_count: 0,
            failed_count: 0,
            details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_inputs_from_null() {
        assert_eq!(RawInputs::from_value(&Value::Null).unwrap(), RawInputs::None);
    }

    #[test]
    fn test_raw_inputs_from_string() {
        let raw = RawInputs::from_value(&json!("https://x")).unwrap();
        assert_eq!(raw, RawInputs::Single("https://x".to_string()));
    }

    #[test]
    fn test_raw_inputs_from_array() {
        let raw = RawInputs::from_value(&json!(["a", "b"])).unwrap();
        assert_eq!(raw, RawInputs::Many(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_raw_inputs_rejects_number() {
        assert_eq!(
            RawInputs::from_value(&json!(42)),
            Err(ValidationError::InvalidInputType)
        );
    }

    #[test]
    fn test_raw_inputs_rejects_mixed_array() {
        assert_eq!(
            RawInputs::from_value(&json!(["a", 1])),
            Err(ValidationError::InvalidInputType)
        );
    }

    #[test]
    fn test_blank_detection() {
        assert!(RawInputs::None.is_blank());
        assert!(RawInputs::Single("  ".to_string()).is_blank());
        assert!(RawInputs::Many(vec!["".to_string(), " ".to_string()]).is_blank());
        assert!(!RawInputs::Many(vec!["".to_string(), "x".to_string()]).is_blank());
    }

    #[test]
    fn test_default_options_cover_the_routed_set() {
        let options = DispatchOptions::default();
        assert_eq!(options.storage_format, ExportFormat::Jsonl);
        assert_eq!(options.account_tab, AccountTab::Post);
        assert_eq!(options.search_type, SearchKind::General);
        assert_eq!(options.max_pages, 99_999);
        assert!(options.search_keyword.is_empty());
    }

    #[test]
    fn test_batch_result_serializes_flat() {
        let result = BatchResult {
            success: true,
            message: "ok".to_string(),
            downloaded_count: 1,
            failed_count: 0,
            details: vec![ItemOutcome::success("https://x", vec!["1".to_string()], 1)],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["downloaded_count"], json!(1));
        assert_eq!(value["details"][0]["status"], json!("success"));
        // error is omitted on success entries
        assert!(value["details"][0].get("error").is_none());
    }
}
