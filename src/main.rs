use clap::Parser;
use lingua_lens::{cli, config, error, gemini, image_input, interactive, progress, render, service};
use cli::{Cli, Commands};
use config::Config;
use error::{LinguaError, Result};
use gemini::{GeminiClient, ModelSet};
use lingua_lens_common::TARGET_LANGUAGES;
use service::LanguageService;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn build_service(config: &Config) -> Result<LanguageService<GeminiClient>> {
    let client = GeminiClient::from_config(config)?;
    Ok(LanguageService::new(client, ModelSet::from_config(config)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ctrl-Cで中断された場合
fn cancelled() -> LinguaError {
    LinguaError::ApiCall("中断されました".into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    Config::load_env_files();

    if let Err(e) = run(cli).await {
        eprintln!("{}", render::render_error(&e.user_message()));
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect { text } => {
            let service = build_service(&Config::load()?)?;
            let result = progress::with_spinner("判定中...", service.detect_language(&text))
                .await
                .ok_or_else(cancelled)??;

            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", render::render_detection(&result));
            }
        }

        Commands::Translate { text, target } => {
            let service = build_service(&Config::load()?)?;
            let result = progress::with_spinner("翻訳中...", service.translate_text(&text, &target))
                .await
                .ok_or_else(cancelled)??;

            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", render::render_translation(&result));
            }
        }

        Commands::Vision { image, mime } => {
            let data_url = image_input::load_image(&image, mime.as_deref())?;
            let service = build_service(&Config::load()?)?;
            let result = progress::with_spinner("解析中...", service.detect_from_image(&data_url))
                .await
                .ok_or_else(cancelled)??;

            if cli.json {
                print_json(&result)?;
            } else {
                let dims = image_input::image_dimensions(&data_url);
                print!("{}", render::render_vision(&result, dims));
            }
        }

        Commands::Interactive => {
            let service = build_service(&Config::load()?)?;
            interactive::run_interactive(&service).await?;
        }

        Commands::Languages => {
            for (i, lang) in TARGET_LANGUAGES.iter().enumerate() {
                let mark = if i == 0 { " (既定)" } else { "" };
                println!("{}{}", lang, mark);
            }
        }

        Commands::Config { set_api_key, show } => {
            // 壊れた設定ファイルでも --set-api-key で書き直せるようにする
            let mut config = Config::load_or_default();

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  テキストモデル: {}", config.text_model);
                println!("  画像モデル: {}", config.vision_model);
                println!("  エンドポイント: {}", config.base_url);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
                println!(
                    "  APIキー: {}",
                    if config.get_api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}
