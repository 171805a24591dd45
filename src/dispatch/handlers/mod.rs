// Per-action handlers
//
// One module per action family. Url-driven families implement
// ItemHandler and go through the batch executor; keyword and no-input
// families fetch one flat result list and report it as a single outcome.

pub mod account;
pub mod collection;
pub mod comment;
pub mod detail;
pub mod live;
pub mod mix;
pub mod search;
pub mod user;
