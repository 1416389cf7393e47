//! 비트코인 가격 통계 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # CoinGecko 리포트 (현재 시세, 프로필, 차트, 전체 히스토리 통계)
//! btcstat coingecko
//!
//! # Yahoo Finance 리포트 (히스토리 통계, DCA 시뮬레이션, 전망)
//! btcstat yahoo --symbol BTC-EUR --contribution 350
//!
//! # 두 리포트를 순서대로 실행
//! btcstat report
//!
//! # 설정 파일 지정
//! btcstat --config config/default.toml report
//! ```

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

mod commands;

use btcstat_core::{init_logging, AppConfig};

#[derive(Parser)]
#[command(name = "btcstat")]
#[command(about = "Bitcoin price history diagnostics - CoinGecko / Yahoo Finance", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: config/default.toml, 없으면 내장 기본값)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CoinGecko 진단 리포트 실행
    Coingecko {
        /// 코인 식별자 (예: bitcoin)
        #[arg(short = 'i', long)]
        coin_id: Option<String>,

        /// 단기 차트 조회 일수
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Yahoo Finance 진단 리포트 실행
    Yahoo {
        /// Yahoo Finance 심볼 (예: BTC-EUR)
        #[arg(short, long)]
        symbol: Option<String>,

        /// 월 적립 금액
        #[arg(long)]
        contribution: Option<Decimal>,
    },

    /// 두 리포트를 순서대로 실행
    Report,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일이 있으면 로드 (API 키 주입용)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };

    init_logging(&config.logging)?;
    debug!("configuration loaded");

    match cli.command {
        Commands::Coingecko { coin_id, days } => {
            if let Some(coin_id) = coin_id {
                config.analysis.coin_id = coin_id;
            }
            if let Some(days) = days {
                config.analysis.chart_days = days;
            }
            config.validate()?;

            commands::coingecko::run(&config).await?;
        }

        Commands::Yahoo {
            symbol,
            contribution,
        } => {
            if let Some(symbol) = symbol {
                config.analysis.yahoo_symbol = symbol;
            }
            if let Some(contribution) = contribution {
                config.analysis.dca_contribution = contribution;
            }
            config.validate()?;

            commands::yahoo::run(&config).await?;
        }

        Commands::Report => {
            commands::coingecko::run(&config).await?;
            println!();
            commands::yahoo::run(&config).await?;
        }
    }

    Ok(())
}
