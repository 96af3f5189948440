use clap::{Parser, Subcommand};
use lingua_lens_common::DEFAULT_TARGET_LANGUAGE;

#[derive(Parser)]
#[command(name = "lingua-lens")]
#[command(about = "Gemini言語判定・翻訳・画像OCRツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 結果をJSONで出力
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストの言語を判定
    Detect {
        /// 判定するテキスト
        #[arg(required = true, value_parser = non_blank_text)]
        text: String,
    },

    /// テキストを翻訳
    Translate {
        /// 翻訳するテキスト
        #[arg(required = true, value_parser = non_blank_text)]
        text: String,

        /// 翻訳先の言語
        #[arg(short = 't', long = "to", default_value = DEFAULT_TARGET_LANGUAGE)]
        target: String,
    },

    /// 画像内のテキストを読み取り、言語判定と英訳
    Vision {
        /// 画像ファイルのパス、またはData URL
        #[arg(required = true)]
        image: String,

        /// MIMEタイプを指定（省略時は自動判定）
        #[arg(long)]
        mime: Option<String>,
    },

    /// 対話モード
    Interactive,

    /// 翻訳先言語の一覧
    Languages,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 空白だけのテキストは受け付けない
fn non_blank_text(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("テキストが空です".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_default_target() {
        let cli = Cli::try_parse_from(["lingua-lens", "translate", "Hola"]).unwrap();
        match cli.command {
            Commands::Translate { text, target } => {
                assert_eq!(text, "Hola");
                assert_eq!(target, "English");
            }
            _ => panic!("Expected Translate"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lingua-lens", "detect", "Bonjour", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_vision_with_mime() {
        let cli =
            Cli::try_parse_from(["lingua-lens", "vision", "sign.jpg", "--mime", "image/webp"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Vision { ref image, mime: Some(ref m) } if image == "sign.jpg" && m == "image/webp"
        ));
    }

    #[test]
    fn test_detect_requires_text() {
        assert!(Cli::try_parse_from(["lingua-lens", "detect"]).is_err());
    }

    #[test]
    fn test_blank_text_rejected_by_parser() {
        assert!(Cli::try_parse_from(["lingua-lens", "detect", "   "]).is_err());
        assert!(Cli::try_parse_from(["lingua-lens", "translate", "", "--to", "French"]).is_err());
    }
}
