//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown insect type: {0}")]
    UnknownCategory(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// バックエンド呼び出しの失敗
///
/// 通信・パース失敗（Transport）とサーバーが `success: false` を返した場合
/// （Application）を区別する。どちらもユーザーへの通知としては同じ扱い。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Application(String),
}

impl FetchError {
    pub fn message(&self) -> &str {
        match self {
            FetchError::Transport(msg) | FetchError::Application(msg) => msg,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_unknown_category() {
        let error = Error::UnknownCategory("spider".to_string());
        assert_eq!(format!("{}", error), "Unknown insect type: spider");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_fetch_error_message() {
        let transport = FetchError::Transport("connection refused".to_string());
        let application = FetchError::Application("Неверный тип насекомого".to_string());

        assert_eq!(transport.message(), "connection refused");
        assert_eq!(format!("{}", application), "Неверный тип насекомого");
        assert!(transport.is_transport());
        assert!(!application.is_transport());
    }
}
