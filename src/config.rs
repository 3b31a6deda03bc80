use crate::error::{InsectSearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// バックエンドURLの環境変数
pub const BASE_URL_ENV: &str = "INSECT_SEARCH_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".into(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルが無ければデフォルト
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InsectSearchError::Config("домашний каталог не найден".into()))?;
        Ok(home.join(".config").join("insect-search").join("config.json"))
    }

    /// 実際に使うURL（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override.filter(|u| !u.trim().is_empty()) {
            return url.trim().to_string();
        }
        // 環境変数を優先
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return url.trim().to_string();
            }
        }
        self.base_url.clone()
    }

    /// URLを検証して設定（保存は呼び出し側）
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InsectSearchError::Config(format!("некорректный адрес: {}", url)));
        }
        self.base_url = url;
        Ok(())
    }
}
