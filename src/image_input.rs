//! 画像入力
//!
//! ファイルパスまたはData URLを受け取り、送信用のData URLにする。
//! 画像以外（MIMEが image/* でないもの）は受け付けない。

use crate::error::{LinguaError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use lingua_lens_common::DataUrl;
use std::path::Path;

/// パスまたはData URLを読み込む
pub fn load_image(source: &str, mime_override: Option<&str>) -> Result<DataUrl> {
    if source.trim_start().starts_with("data:") {
        let url = DataUrl::parse(source)?;
        return ensure_image(url);
    }

    let path = Path::new(source);
    let bytes = std::fs::read(path)
        .map_err(|e| LinguaError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let mime = match mime_override {
        Some(m) => m.to_string(),
        None => detect_mime(path, &bytes)?,
    };

    log::debug!("画像読み込み: {} ({}, {} bytes)", path.display(), mime, bytes.len());

    ensure_image(encode_data_url(&mime, &bytes))
}

/// バイト列をData URLにする
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> DataUrl {
    DataUrl::from_base64(mime, STANDARD.encode(bytes))
}

/// 先頭バイトで判定し、だめなら拡張子で判定
fn detect_mime(path: &Path, bytes: &[u8]) -> Result<String> {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map(|f| f.to_mime_type().to_string())
        .map_err(|_| LinguaError::UnsupportedImage(path.display().to_string()))
}

fn ensure_image(url: DataUrl) -> Result<DataUrl> {
    if url.is_image() {
        Ok(url)
    } else {
        Err(LinguaError::UnsupportedImage(url.mime_type().to_string()))
    }
}

/// 画像の縦横サイズ（オーバーレイのピクセル換算用）
pub fn image_dimensions(url: &DataUrl) -> Option<(u32, u32)> {
    let bytes = STANDARD.decode(url.payload()).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    Some((img.width(), img.height()))
}
