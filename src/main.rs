use authcheck_common::render_summary;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use listing_authcheck::{cli, config, error, judge, listing, logging, pipeline, reference, report};
use cli::{Cli, Commands};
use config::Config;
use error::{AuthCheckError, Result};
use pipeline::{Pipeline, Progress};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Check { url, category, output, reference_dir, save_sample } => {
            println!("🔍 authcheck - 真贋チェック\n");

            // 1. 参照画像
            let reference_dir = reference_dir.unwrap_or_else(|| config.reference_dir.clone());
            println!("[1/4] 参照画像を読み込み中...");
            let library = reference::load_categories(&reference_dir);
            println!(
                "✔ カテゴリ '{}': 参照画像 {}枚\n",
                category,
                library.references(&category).len()
            );

            // 2-3. 出品画像の取得と判定
            let fetcher = listing::HttpListingFetcher::new(
                config.marketplace_base_url.clone(),
                config.fetch_timeout(),
            )
            .map_err(|e| AuthCheckError::Http(e.to_string()))?;
            let vision = judge::OpenAiVisionClient::from_config(&config)?;
            let pipeline = Pipeline::new(&fetcher, &vision, &library, config.cdn_prefix.clone());

            println!("[2/4] 出品情報を取得中...");
            let progress = ProgressBar::hidden();
            let report = pipeline
                .run_check_with_progress(&url, &category, |event| match event {
                    Progress::Fetched { total } => {
                        println!("✔ {}枚の出品画像を検出\n", total);
                        println!("[3/4] 判定中...");
                        progress.set_draw_target(indicatif::ProgressDrawTarget::stderr());
                        progress.set_length(total as u64);
                        progress.set_style(
                            ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
                                .unwrap_or_else(|_| ProgressStyle::default_bar()),
                        );
                    }
                    Progress::Judged { result, .. } => {
                        progress.set_message(result.verdict.label());
                        progress.inc(1);
                    }
                })
                .await?;
            progress.finish_and_clear();
            println!("✔ 判定完了\n");

            // 4. 結果保存
            let output = output.unwrap_or_else(|| config.output_csv.clone());
            println!("[4/4] 結果を保存中...");
            report::write_csv(&report, &output)?;
            println!("✔ 結果を保存: {}\n", output.display());

            println!("{}\n", render_summary(&report, &output.display().to_string()));

            if let Some(sample_url) = &report.sample_image_url {
                println!("Product Image Sample: {}", sample_url);
                if let Some(path) = save_sample {
                    match fetcher.download_to(sample_url, &path).await {
                        Ok(bytes) => println!("✔ サンプル画像を保存: {} ({} bytes)", path.display(), bytes),
                        Err(e) => eprintln!("⚠ サンプル画像の保存に失敗: {}", e),
                    }
                }
            }
        }

        Commands::Categories { reference_dir } => {
            let reference_dir = reference_dir.unwrap_or_else(|| config.reference_dir.clone());
            let library = reference::load_categories(&reference_dir);

            if library.is_empty() {
                println!("カテゴリがありません: {}", reference_dir.display());
            } else {
                println!("カテゴリ一覧 ({}):", reference_dir.display());
                for (name, images) in library.iter() {
                    println!("  {} ({}枚)", name, images.len());
                }
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  API: {}", config.api_base_url);
                println!("  参照画像フォルダ: {}", config.reference_dir.display());
                println!("  出力CSV: {}", config.output_csv.display());
                println!("  マーケットプレイス: {}", config.marketplace_base_url);
                println!("  タイムアウト: {}秒", config.fetch_timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
