//! 端末表示

use chrono::{Local, TimeZone};
use lingua_lens_common::{
    confidence_candidates, confidence_tier, ConfidenceTier, DetectionResult, HistoryItem,
    TranslationResult, VisionDetectionResult,
};

/// 言語判定結果
pub fn render_detection(result: &DetectionResult) -> String {
    let mut out = String::new();

    let tier = match confidence_tier(result.confidence) {
        ConfidenceTier::High => "高",
        ConfidenceTier::Moderate => "中",
    };
    out.push_str(&format!(
        "🌐 {} [{}]  信頼度 {:.1}% ({})\n",
        result.detected_language,
        result.iso_code,
        result.confidence * 100.0,
        tier
    ));

    if let Some(dialect) = result.dialect.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("  方言: {}\n", dialect));
    }
    if !result.is_reliable {
        out.push_str("  ⚠ 判定の信頼性は低めです\n");
    }

    out.push_str("  候補:\n");
    for c in confidence_candidates(result) {
        out.push_str(&format!("    {:<24} {:>5.1}%\n", c.name, c.percent));
    }

    if !result.summary.is_empty() {
        out.push_str(&format!("  {}\n", result.summary));
    }

    out
}

/// 翻訳結果
pub fn render_translation(result: &TranslationResult) -> String {
    format!("→ {}\n  {}\n", result.target_language, result.translated_text)
}

/// 画像解析結果
///
/// 画像サイズが分かればピクセル座標も併記する
pub fn render_vision(result: &VisionDetectionResult, dimensions: Option<(u32, u32)>) -> String {
    let mut out = String::new();

    match result.overall_confidence {
        Some(conf) => out.push_str(&format!(
            "🖼 {} ({:.0}%)\n",
            result.detected_language,
            conf * 100.0
        )),
        None => out.push_str(&format!("🖼 {}\n", result.detected_language)),
    }
    if !result.summary.is_empty() {
        out.push_str(&format!("  {}\n", result.summary));
    }

    if result.blocks.is_empty() {
        out.push_str("  テキストは検出されませんでした\n");
        return out;
    }

    out.push_str(&format!("  テキストブロック: {}件\n", result.blocks.len()));
    for (i, block) in result.blocks.iter().enumerate() {
        let rect = block.box_2d.to_overlay();
        out.push_str(&format!(
            "  [{}] {} ({})\n      ➡ {}\n      top {:.1}% left {:.1}% w {:.1}% h {:.1}%",
            i + 1,
            block.text,
            block.language,
            block.translated_text,
            rect.top,
            rect.left,
            rect.width,
            rect.height
        ));
        if let Some((w, h)) = dimensions {
            let (x, y, pw, ph) = rect.to_pixels(w, h);
            out.push_str(&format!("  ({}x{}+{}+{}px)", pw, ph, x, y));
        }
        out.push('\n');
    }

    out
}

/// 履歴1行（時刻 言語 "テキスト"）
pub fn render_history_line(item: &HistoryItem) -> String {
    let time = Local
        .timestamp_millis_opt(item.timestamp_ms)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());

    let preview: String = item.text.chars().take(40).collect();
    let ellipsis = if item.text.chars().count() > 40 { "…" } else { "" };

    format!(
        "{} {} \"{}{}\"",
        time, item.result.detected_language, preview, ellipsis
    )
}

/// エラーバナー
pub fn render_error(message: &str) -> String {
    format!("❌ {}", message)
}
