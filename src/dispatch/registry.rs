// Action registry - the compatibility matrix for every supported action
//
// Replaces per-call-site string dispatch with a fixed table built once:
// each action carries its input rule, platform support and counting mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::models::{InvocationRequest, Platform};

/// Every operation the dispatcher supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Detail,
    DetailUnofficial,
    Account,
    Live,
    Comment,
    Mix,
    User,
    Search,
    Hot,
    Collection,
    CollectionMusic,
    Collects,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::Detail,
        Action::DetailUnofficial,
        Action::Account,
        Action::Live,
        Action::Comment,
        Action::Mix,
        Action::User,
        Action::Search,
        Action::Hot,
        Action::Collection,
        Action::CollectionMusic,
        Action::Collects,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::DetailUnofficial => "detail_unofficial",
            Self::Account => "account",
            Self::Live => "live",
            Self::Comment => "comment",
            Self::Mix => "mix",
            Self::User => "user",
            Self::Search => "search",
            Self::Hot => "hot",
            Self::Collection => "collection",
            Self::CollectionMusic => "collection_music",
            Self::Collects => "collects",
        }
    }

    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == name)
            .ok_or_else(|| ValidationError::UnknownAction {
                name: name.to_string(),
                supported: Self::supported_names(),
            })
    }

    fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of input an action consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// One or more provider urls.
    Urls,
    /// A single search keyword.
    Keyword,
    /// No caller input; the action works off the credential's account.
    None,
}

/// Which platforms an action is valid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSupport {
    Both,
    DouyinOnly,
}

impl PlatformSupport {
    pub fn allows(&self, platform: Platform) -> bool {
        match self {
            Self::Both => true,
            Self::DouyinOnly => platform == Platform::Douyin,
        }
    }
}

/// How the aggregator derives `downloaded_count` for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountingMode {
    /// Count of input items that succeeded.
    Items,
    /// Sum of per-item payload sizes (flat result lists).
    Identifiers,
}

/// Immutable per-action record.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub action: Action,
    pub input: InputRule,
    pub platforms: PlatformSupport,
    pub counting: CountingMode,
}

impl ActionSpec {
    /// The compatibility table. Total over `Action`, so adding a variant
    /// without a row is a compile error instead of a silent fallback.
    pub fn of(action: Action) -> Self {
        use CountingMode::{Identifiers, Items};
        use InputRule::{Keyword, None, Urls};
        use PlatformSupport::{Both, DouyinOnly};

        let (input, platforms, counting) = match action {
            Action::Detail => (Urls, Both, Items),
            Action::DetailUnofficial => (Urls, Both, Items),
            Action::Account => (Urls, Both, Items),
            Action::Live => (Urls, Both, Items),
            Action::Mix => (Urls, Both, Items),
            Action::Comment => (Urls, DouyinOnly, Identifiers),
            Action::User => (Urls, DouyinOnly, Items),
            Action::Search => (Keyword, DouyinOnly, Identifiers),
            Action::Hot => (None, DouyinOnly, Identifiers),
            Action::Collection => (None, DouyinOnly, Identifiers),
            Action::CollectionMusic => (None, DouyinOnly, Identifiers),
            Action::Collects => (Urls, DouyinOnly, Identifiers),
        };

        Self {
            action,
            input,
            platforms,
            counting,
        }
    }
}

/// Validation front for the compatibility table.
pub struct ActionRegistry;

impl ActionRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn spec(&self, action: Action) -> ActionSpec {
        ActionSpec::of(action)
    }

    /// Pure precondition check. No side effects, no network.
    pub fn validate(&self, request: &InvocationRequest) -> Result<ActionSpec, ValidationError> {
        let action = Action::parse(&request.action)?;
        let spec = self.spec(action);

        if request.cookie.trim().is_empty() {
            return Err(ValidationError::EmptyCredential);
        }

        let platform = Platform::from_flag(request.tiktok);
        if !spec.platforms.allows(platform) {
            return Err(ValidationError::PlatformUnsupported {
                action: action.name(),
            });
        }

        match spec.input {
            InputRule::Urls => {
                if request.inputs.is_blank() {
                    return Err(ValidationError::MissingInput {
                        action: action.name(),
                    });
                }
            }
            InputRule::Keyword => {
                if request.options.search_keyword.trim().is_empty() {
                    return Err(ValidationError::EmptyKeyword);
                }
            }
            InputRule::None => {}
        }

        Ok(spec)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
