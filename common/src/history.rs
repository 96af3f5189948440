//! 判定履歴
//!
//! 直近10件のテキスト判定を新しい順に保持する。永続化はしない。
//! 上限を超えた分は末尾から切り捨てる。

use crate::types::DetectionResult;
use serde::{Deserialize, Serialize};

/// 履歴の上限件数
pub const HISTORY_LIMIT: usize = 10;

/// 履歴1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub text: String,
    pub result: DetectionResult,
    /// UNIXミリ秒
    pub timestamp_ms: i64,
}

/// 判定履歴（先頭が最新）
#[derive(Debug, Clone, Default)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加し、上限を超えた分を捨てる
    pub fn push(&mut self, item: HistoryItem) {
        self.items.insert(0, item);
        self.items.truncate(HISTORY_LIMIT);
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
