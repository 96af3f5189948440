//! 対話モード
//!
//! テキスト/画像の2タブを切り替えながら判定・翻訳・画像解析を行う。
//! 状態は Session に集約し、問い合わせ中の Ctrl-C は要求の破棄として扱う。

use crate::error::Result;
use crate::gemini::ContentGenerator;
use crate::image_input::{image_dimensions, load_image};
use crate::progress::with_spinner;
use crate::render::{render_detection, render_error, render_history_line, render_translation, render_vision};
use crate::service::LanguageService;
use dialoguer::{Input, Select};
use lingua_lens_common::{Applied, HistoryStamp, RequestKind, Session, Tab, TARGET_LANGUAGES};
use sha2::{Digest, Sha256};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    EnterText,
    Detect,
    Translate,
    TargetLanguage,
    History,
    SelectImage,
    Scan,
    SwitchTab,
    DismissError,
    Clear,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::EnterText => "テキストを入力",
            MenuItem::Detect => "言語を判定",
            MenuItem::Translate => "翻訳",
            MenuItem::TargetLanguage => "翻訳先を変更",
            MenuItem::History => "履歴から読み込む",
            MenuItem::SelectImage => "画像を選択",
            MenuItem::Scan => "画像を解析",
            MenuItem::SwitchTab => "タブを切り替え",
            MenuItem::DismissError => "エラーを閉じる",
            MenuItem::Clear => "クリア",
            MenuItem::Quit => "終了",
        }
    }
}

/// 現在の状態で選べるメニュー
pub fn menu_for(session: &Session) -> Vec<MenuItem> {
    let mut items = Vec::new();

    match session.active_tab {
        Tab::Text => {
            items.push(MenuItem::EnterText);
            if session.can_begin(RequestKind::DetectText) {
                items.push(MenuItem::Detect);
            }
            // 翻訳は判定後に出す
            if session.detection.is_some() && session.can_begin(RequestKind::Translate) {
                items.push(MenuItem::Translate);
                items.push(MenuItem::TargetLanguage);
            }
            if !session.history().is_empty() {
                items.push(MenuItem::History);
            }
        }
        Tab::Vision => {
            items.push(MenuItem::SelectImage);
            if session.vision.is_none() && session.can_begin(RequestKind::DetectImage) {
                items.push(MenuItem::Scan);
            }
        }
    }

    items.push(MenuItem::SwitchTab);
    if session.error.is_some() {
        items.push(MenuItem::DismissError);
    }
    items.push(MenuItem::Clear);
    items.push(MenuItem::Quit);
    items
}

/// 履歴IDを採番（テキスト・時刻・連番のハッシュ先頭9桁）
pub fn history_stamp(text: &str, timestamp_ms: i64, seq: u64) -> HistoryStamp {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(timestamp_ms.to_le_bytes());
    hasher.update(seq.to_le_bytes());
    let digest = hex::encode(hasher.finalize());

    HistoryStamp {
        id: digest[..9].to_string(),
        timestamp_ms,
    }
}

fn report(applied: Applied) {
    if applied == Applied::Stale {
        log::debug!("古い応答を破棄しました");
    }
}

fn print_state(session: &Session) {
    println!();
    match session.active_tab {
        Tab::Text => println!("── テキスト解析 ──"),
        Tab::Vision => println!("── 画像解析 ──"),
    }

    if let Some(error) = &session.error {
        println!("{}", render_error(error));
    }

    match session.active_tab {
        Tab::Text => {
            if session.input_text.is_empty() {
                println!("入力: (未入力)");
            } else {
                println!("入力: \"{}\" ({}文字)", session.input_text, session.input_text.chars().count());
            }
            if let Some(result) = &session.detection {
                print!("{}", render_detection(result));
                println!("翻訳先: {}", session.target_language);
            }
            if let Some(result) = &session.translation {
                print!("{}", render_translation(result));
            }
        }
        Tab::Vision => {
            match &session.selected_image {
                Some(image) => println!("画像: {} ({} bytes base64)", image.mime_type(), image.payload().len()),
                None => println!("画像: (未選択)"),
            }
            if let (Some(result), Some(image)) = (&session.vision, &session.selected_image) {
                print!("{}", render_vision(result, image_dimensions(image)));
            }
        }
    }
}

async fn detect_text<G: ContentGenerator>(
    service: &LanguageService<G>,
    session: &mut Session,
    seq: &mut u64,
) {
    let Some(ticket) = session.begin(RequestKind::DetectText) else {
        return;
    };

    match with_spinner("判定中... (Ctrl-Cで中止)", service.detect_language(ticket.text())).await {
        Some(outcome) => {
            *seq += 1;
            let stamp = history_stamp(ticket.text(), chrono::Utc::now().timestamp_millis(), *seq);
            let outcome = outcome.map_err(|e| {
                log::error!("判定エラー: {}", e);
                e.user_message()
            });
            report(session.finish_detection(&ticket, outcome, stamp));
        }
        None => session.cancel(),
    }
}

async fn translate<G: ContentGenerator>(service: &LanguageService<G>, session: &mut Session) {
    let Some(ticket) = session.begin(RequestKind::Translate) else {
        return;
    };

    let fut = service.translate_text(ticket.text(), ticket.target_language());
    match with_spinner("翻訳中... (Ctrl-Cで中止)", fut).await {
        Some(outcome) => {
            let outcome = outcome.map_err(|e| {
                log::error!("翻訳エラー: {}", e);
                e.user_message()
            });
            report(session.finish_translation(&ticket, outcome));
        }
        None => session.cancel(),
    }
}

async fn scan_image<G: ContentGenerator>(service: &LanguageService<G>, session: &mut Session) {
    let Some(ticket) = session.begin(RequestKind::DetectImage) else {
        return;
    };
    let Some(image) = ticket.image() else {
        session.cancel();
        return;
    };

    match with_spinner("解析中... (Ctrl-Cで中止)", service.detect_from_image(image)).await {
        Some(outcome) => {
            let outcome = outcome.map_err(|e| {
                log::error!("画像解析エラー: {}", e);
                e.user_message()
            });
            report(session.finish_vision(&ticket, outcome));
        }
        None => session.cancel(),
    }
}

fn choose_target_language(session: &mut Session) -> Result<()> {
    let current = TARGET_LANGUAGES
        .iter()
        .position(|l| *l == session.target_language)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("翻訳先")
        .items(TARGET_LANGUAGES)
        .default(current)
        .interact()?;

    session.target_language = TARGET_LANGUAGES[idx].to_string();
    session.translation = None;
    Ok(())
}

fn choose_history(session: &mut Session) -> Result<()> {
    let lines: Vec<String> = session.history().items().iter().map(render_history_line).collect();
    let idx = Select::new()
        .with_prompt("最近の判定")
        .items(&lines)
        .default(0)
        .interact()?;

    let id = session.history().items()[idx].id.clone();
    session.load_from_history(&id);
    Ok(())
}

fn select_image(session: &mut Session) -> Result<()> {
    let source: String = Input::new()
        .with_prompt("画像ファイルのパス（またはData URL）")
        .interact_text()?;

    match load_image(source.trim(), None) {
        Ok(image) => {
            session.select_image(image);
            session.error = None;
        }
        Err(e) => session.error = Some(e.user_message()),
    }
    Ok(())
}

/// 対話モードを実行
pub async fn run_interactive<G: ContentGenerator>(service: &LanguageService<G>) -> Result<()> {
    let mut session = Session::new();
    let mut seq: u64 = 0;

    println!("🔎 lingua-lens - 対話モード");

    loop {
        print_state(&session);

        let menu = menu_for(&session);
        let labels: Vec<&str> = menu.iter().map(|m| m.label()).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()?;

        match menu[choice] {
            MenuItem::EnterText => {
                let text: String = Input::new()
                    .with_prompt("テキスト")
                    .with_initial_text(session.input_text.clone())
                    .allow_empty(true)
                    .interact_text()?;
                if text != session.input_text {
                    session.input_text = text;
                    session.detection = None;
                    session.translation = None;
                }
            }
            MenuItem::Detect => detect_text(service, &mut session, &mut seq).await,
            MenuItem::Translate => translate(service, &mut session).await,
            MenuItem::TargetLanguage => choose_target_language(&mut session)?,
            MenuItem::History => choose_history(&mut session)?,
            MenuItem::SelectImage => select_image(&mut session)?,
            MenuItem::Scan => scan_image(service, &mut session).await,
            MenuItem::SwitchTab => {
                session.active_tab = match session.active_tab {
                    Tab::Text => Tab::Vision,
                    Tab::Vision => Tab::Text,
                };
            }
            MenuItem::DismissError => session.dismiss_error(),
            MenuItem::Clear => session.clear(),
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
