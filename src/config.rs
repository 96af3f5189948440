use crate::error::{LinguaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// APIキーを読む環境変数（先頭優先）
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.0-flash-001";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    /// テキスト判定・翻訳用モデル
    pub text_model: String,
    /// 画像解析用モデル
    pub vision_model: String,
    pub base_url: String,
    /// 未設定なら通信ライブラリ任せ
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.into(),
            vision_model: DEFAULT_VISION_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読めなければ警告を出して既定値
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                log::warn!("{}", e);
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            log::warn!("設定ファイルを読めません ({}): {}", path.display(), e);
            Self::default()
        })
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
            .ok_or_else(|| LinguaError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("lingua-lens").join("config.json"))
    }

    /// `.env.local` → `.env` の順で環境変数を読み込む（既存の値は上書きしない）
    pub fn load_env_files() {
        for name in [".env.local", ".env"] {
            if dotenv::from_filename(name).is_ok() {
                log::debug!("環境ファイルを読み込み: {}", name);
            }
        }
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(key);
                }
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LinguaError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}
