//! 処理中表示
//!
//! 1件の問い合わせを待つ間スピナーを出す。Ctrl-Cで待機を打ち切れる。

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// スピナーを出しながら待つ
///
/// Ctrl-Cで打ち切った場合は None
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> Option<F::Output> {
    let pb = spinner(message);
    let output = tokio::select! {
        out = fut => Some(out),
        _ = tokio::signal::ctrl_c() => None,
    };
    pb.finish_and_clear();
    output
}
