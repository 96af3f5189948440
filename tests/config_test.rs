//! 設定ファイルのテスト

use lingua_lens::config::{Config, API_KEY_ENV_VARS, DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL};
use lingua_lens::error::LinguaError;
use tempfile::tempdir;

/// 設定ファイルが無ければ既定値
#[test]
fn test_load_missing_file_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
    assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
    assert!(config.timeout_seconds.is_none());
    assert!(config.timeout().is_none());
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        api_key: Some("secret".into()),
        text_model: "gemini-x".into(),
        timeout_seconds: Some(30),
        ..Default::default()
    };
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api_key.as_deref(), Some("secret"));
    assert_eq!(loaded.text_model, "gemini-x");
    assert_eq!(loaded.vision_model, DEFAULT_VISION_MODEL);
    assert_eq!(loaded.timeout().map(|d| d.as_secs()), Some(30));
}

/// 一部の項目だけの設定ファイルも読める
#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"vision_model": "gemini-vision-test"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.vision_model, "gemini-vision-test");
    assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
}

/// 壊れた設定ファイルはJSONエラー
#[test]
fn test_broken_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// 壊れた設定ファイルでも既定値で続行できる
#[test]
fn test_load_or_default_recovers_from_broken_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut config = Config::load_or_default_from(&path);
    assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
    assert!(config.api_key.is_none());

    // 上書き保存すれば読めるファイルに戻る
    config.api_key = Some("fresh".into());
    config.save_to(&path).expect("設定保存失敗");
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api_key.as_deref(), Some("fresh"));
}

/// APIキーの優先順位: GEMINI_API_KEY → API_KEY → 設定ファイル
///
/// 環境変数を触るので1つのテスト関数の中で順に確認する
#[test]
fn test_api_key_precedence() {
    let saved: Vec<(&str, Option<String>)> = API_KEY_ENV_VARS
        .iter()
        .map(|var| (*var, std::env::var(var).ok()))
        .collect();
    for var in API_KEY_ENV_VARS {
        std::env::remove_var(var);
    }

    let with_file_key = Config {
        api_key: Some("from-file".into()),
        ..Default::default()
    };

    // 設定ファイルのみ
    assert_eq!(with_file_key.get_api_key().unwrap(), "from-file");

    // API_KEY が設定ファイルより優先
    std::env::set_var("API_KEY", "from-api-key");
    assert_eq!(with_file_key.get_api_key().unwrap(), "from-api-key");

    // GEMINI_API_KEY が最優先
    std::env::set_var("GEMINI_API_KEY", "from-gemini");
    assert_eq!(with_file_key.get_api_key().unwrap(), "from-gemini");

    // 空白だけの値は飛ばす
    std::env::set_var("GEMINI_API_KEY", "   ");
    assert_eq!(with_file_key.get_api_key().unwrap(), "from-api-key");

    // どこにも無ければ MissingApiKey
    for var in API_KEY_ENV_VARS {
        std::env::remove_var(var);
    }
    let empty = Config {
        api_key: Some(" ".into()),
        ..Default::default()
    };
    assert!(matches!(empty.get_api_key(), Err(LinguaError::MissingApiKey)));
    assert!(matches!(Config::default().get_api_key(), Err(LinguaError::MissingApiKey)));

    for (var, value) in saved {
        match value {
            Some(v) => std::env::set_var(var, v),
            None => std::env::remove_var(var),
        }
    }
}
