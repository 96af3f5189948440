//! 画面状態
//!
//! タブ・入力・結果・エラー・処理中フラグ・履歴をまとめて保持する。
//! 要求ごとに世代番号を振り、現在の世代と一致しない応答は捨てる
//! （クリアや後続の要求の後に届いた古い応答で状態を上書きしない）。

use crate::data_url::DataUrl;
use crate::history::{History, HistoryItem};
use crate::prompts::DEFAULT_TARGET_LANGUAGE;
use crate::types::{DetectionResult, TranslationResult, VisionDetectionResult};

/// 表示中のタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Text,
    Vision,
}

/// 要求の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    DetectText,
    Translate,
    DetectImage,
}

/// 発行済み要求の控え
///
/// 送信した入力を保持し、応答を反映するときに世代を照合する
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    generation: u64,
    kind: RequestKind,
    text: String,
    target_language: String,
    image: Option<DataUrl>,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn image(&self) -> Option<&DataUrl> {
        self.image.as_ref()
    }
}

/// 応答を反映したかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// 世代が古いため破棄
    Stale,
}

/// 履歴に付けるIDと時刻（呼び出し側で採番）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStamp {
    pub id: String,
    pub timestamp_ms: i64,
}

/// 画面状態
#[derive(Debug, Clone)]
pub struct Session {
    pub active_tab: Tab,
    pub input_text: String,
    pub target_language: String,
    pub selected_image: Option<DataUrl>,
    pub detection: Option<DetectionResult>,
    pub translation: Option<TranslationResult>,
    pub vision: Option<VisionDetectionResult>,
    pub error: Option<String>,
    loading: bool,
    generation: u64,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_tab: Tab::Text,
            input_text: String::new(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            selected_image: None,
            detection: None,
            translation: None,
            vision: None,
            error: None,
            loading: false,
            generation: 0,
            history: History::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// 要求を開始できるか
    pub fn can_begin(&self, kind: RequestKind) -> bool {
        if self.loading {
            return false;
        }
        match kind {
            RequestKind::DetectText | RequestKind::Translate => !self.input_text.trim().is_empty(),
            RequestKind::DetectImage => self.selected_image.is_some(),
        }
    }

    /// 要求を開始
    ///
    /// 処理中、または入力が無い場合は None
    pub fn begin(&mut self, kind: RequestKind) -> Option<Ticket> {
        if !self.can_begin(kind) {
            return None;
        }

        self.loading = true;
        self.error = None;
        self.generation += 1;

        Some(Ticket {
            generation: self.generation,
            kind,
            text: self.input_text.clone(),
            target_language: self.target_language.clone(),
            image: match kind {
                RequestKind::DetectImage => self.selected_image.clone(),
                _ => None,
            },
        })
    }

    fn accept(&mut self, ticket: &Ticket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    /// テキスト判定の応答を反映。成功時は履歴に追加する
    pub fn finish_detection(
        &mut self,
        ticket: &Ticket,
        outcome: Result<DetectionResult, String>,
        stamp: HistoryStamp,
    ) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => {
                self.history.push(HistoryItem {
                    id: stamp.id,
                    text: ticket.text.clone(),
                    result: result.clone(),
                    timestamp_ms: stamp.timestamp_ms,
                });
                self.detection = Some(result);
                self.translation = None;
            }
            Err(message) => self.error = Some(message),
        }
        Applied::Applied
    }

    /// 翻訳の応答を反映
    pub fn finish_translation(
        &mut self,
        ticket: &Ticket,
        outcome: Result<TranslationResult, String>,
    ) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => self.translation = Some(result),
            Err(message) => self.error = Some(message),
        }
        Applied::Applied
    }

    /// 画像解析の応答を反映
    pub fn finish_vision(
        &mut self,
        ticket: &Ticket,
        outcome: Result<VisionDetectionResult, String>,
    ) -> Applied {
        if !self.accept(ticket) {
            return Applied::Stale;
        }

        match outcome {
            Ok(result) => self.vision = Some(result),
            Err(message) => self.error = Some(message),
        }
        Applied::Applied
    }

    /// 画像を選択（前回の解析結果は破棄）
    pub fn select_image(&mut self, image: DataUrl) {
        self.selected_image = Some(image);
        self.vision = None;
    }

    /// 入力・結果・画像・エラーを一括でリセット
    ///
    /// 処理中の要求は世代を進めて無効化する。履歴とタブは残す。
    pub fn clear(&mut self) {
        self.input_text.clear();
        self.detection = None;
        self.translation = None;
        self.vision = None;
        self.selected_image = None;
        self.error = None;
        self.loading = false;
        self.generation += 1;
    }

    /// 処理中の要求を破棄（入力と結果はそのまま）
    pub fn cancel(&mut self) {
        if self.loading {
            self.loading = false;
            self.generation += 1;
        }
    }

    /// 履歴から入力と判定結果を復元
    pub fn load_from_history(&mut self, id: &str) -> bool {
        let Some(item) = self.history.get(id).cloned() else {
            return false;
        };
        self.input_text = item.text;
        self.detection = Some(item.result);
        self.translation = None;
        self.error = None;
        self.active_tab = Tab::Text;
        true
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
