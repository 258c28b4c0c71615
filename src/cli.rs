use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "authcheck")]
#[command(about = "マーケットプレイス出品画像の真贋チェックツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 出品画像を参照画像と比較して真贋をチェック
    Check {
        /// 出品URL（i.<shop_id>.<item_id> を含むもの）
        #[arg(required = true)]
        url: String,

        /// 商品カテゴリ（参照画像フォルダ名）
        #[arg(short, long)]
        category: String,

        /// 出力CSV（デフォルト: authenticity_check.csv）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 参照画像フォルダ（デフォルト: reference_images）
        #[arg(short, long)]
        reference_dir: Option<PathBuf>,

        /// サンプル画像（1枚目）の保存先
        #[arg(long)]
        save_sample: Option<PathBuf>,
    },

    /// 参照画像のカテゴリ一覧
    Categories {
        /// 参照画像フォルダ
        #[arg(short, long)]
        reference_dir: Option<PathBuf>,
    },

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from([
            "authcheck",
            "check",
            "https://shopee.co.id/-i.111.222",
            "--category",
            "bags",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Check { url, category, output, .. } => {
                assert_eq!(url, "https://shopee.co.id/-i.111.222");
                assert_eq!(category, "bags");
                assert!(output.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_check_requires_category() {
        assert!(Cli::try_parse_from(["authcheck", "check", "https://x/-i.1.2"]).is_err());
    }
}
