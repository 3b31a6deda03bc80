//! insect-search: 昆虫カタログ検索クライアント
//!
//! 状態遷移は `insect-search-common` に置き、ここでは通信・設定・表示を扱う。

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod expert;
pub mod interactive;
pub mod render;
pub mod session;
