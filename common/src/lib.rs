//! Lingua Lens Common Library
//!
//! CLIと対話セッションで共有される型とユーティリティ。
//! ネットワーク・ファイルI/Oは含まない。

pub mod data_url;
pub mod display;
pub mod error;
pub mod history;
pub mod parser;
pub mod prompts;
pub mod schema;
pub mod session;
pub mod types;

pub use data_url::{DataUrl, InlineImage, DEFAULT_IMAGE_MIME};
pub use display::{
    confidence_candidates, confidence_tier, Candidate, ConfidenceTier,
    OverlayRect, MAX_CANDIDATES,
};
pub use error::{Error, Result};
pub use history::{History, HistoryItem, HISTORY_LIMIT};
pub use parser::{
    check_required, decode_detection, decode_translation, decode_vision, parse_json_reply,
    validate_detection, validate_translation, validate_vision, Warning,
};
pub use prompts::{
    detection_request, translation_request, vision_request, ModelRole, PromptRequest, Task,
    DEFAULT_TARGET_LANGUAGE, TARGET_LANGUAGES,
};
pub use schema::{ResponseSchema, SchemaType};
pub use session::{Applied, HistoryStamp, RequestKind, Session, Tab, Ticket};
pub use types::{
    Alternative, BoundingBox, DetectionResult, TranslationResult, VisionBlock,
    VisionDetectionResult,
};
