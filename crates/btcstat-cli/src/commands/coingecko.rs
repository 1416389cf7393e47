//! CoinGecko 진단 리포트 명령어.
//!
//! 원본 진단 스크립트와 동일한 네 개의 독립 블록을 순서대로 실행합니다:
//! 현재 시세, 코인 프로필, 단기 차트, 전체 히스토리 통계.
//! 각 블록의 실패는 `Error:` 한 줄로 출력되고 다음 블록으로 진행합니다.

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use btcstat_analytics::ReturnStats;
use btcstat_core::{AnalysisConfig, AppConfig, StatError, StatResult};
use btcstat_data::{ChartRange, CoinGeckoClient};

use super::{finish_block, print_rule};

/// CoinGecko 리포트를 실행합니다.
pub async fn run(config: &AppConfig) -> Result<()> {
    let client = CoinGeckoClient::new(&config.provider)?;
    let analysis = &config.analysis;

    info!("CoinGecko report for {}", analysis.coin_id);

    println!("Testing CoinGecko API...");
    print_rule();

    println!("\n1. Current Price:");
    finish_block(current_price_block(&client, analysis).await);

    println!("\n2. Market Data:");
    finish_block(profile_block(&client, analysis).await);

    println!("\n3. Historical Price Data (Last {} days):", analysis.chart_days);
    finish_block(chart_block(&client, analysis).await);

    println!("\n4. Full Historical Data (All Time):");
    finish_block(history_stats_block(&client, analysis).await);

    println!();
    print_rule();
    println!("CoinGecko report complete");

    Ok(())
}

/// 현재 시세 블록: 통화별 가격, 시가총액, 24시간 변동률.
async fn current_price_block(
    client: &CoinGeckoClient,
    analysis: &AnalysisConfig,
) -> StatResult<()> {
    let snapshot = client
        .simple_price(&analysis.coin_id, &analysis.vs_currencies)
        .await?;

    for quote in &snapshot.quotes {
        let currency = quote.currency.to_uppercase();
        println!("  Price ({}): {:.2}", currency, quote.price);
        if let Some(market_cap) = quote.market_cap {
            println!("  Market Cap ({}): {:.0}", currency, market_cap);
        }
        if let Some(change) = quote.change_24h_pct {
            println!("  24h Change ({}): {:+.2}%", currency, change);
        }
    }

    Ok(())
}

/// 코인 프로필 블록: 기본 정보와 통화별 시장 지표.
async fn profile_block(client: &CoinGeckoClient, analysis: &AnalysisConfig) -> StatResult<()> {
    let profile = client
        .coin_profile(&analysis.coin_id, &analysis.vs_currencies)
        .await?;

    println!("  Name: {}", profile.name);
    println!("  Symbol: {}", profile.symbol);
    match profile.genesis_date {
        Some(date) => println!("  Genesis Date: {}", date),
        None => println!("  Genesis Date: N/A"),
    }
    if let Some(rank) = profile.market_cap_rank {
        println!("  Market Cap Rank: {}", rank);
    }

    for figures in &profile.figures {
        let currency = figures.currency.to_uppercase();
        if let Some(price) = figures.current_price {
            println!("  Current Price ({}): {:.2}", currency, price);
        }
        if let Some(market_cap) = figures.market_cap {
            println!("  Market Cap ({}): {:.0}", currency, market_cap);
        }
        if let Some(volume) = figures.total_volume {
            println!("  Total Volume ({}): {:.0}", currency, volume);
        }
        if let Some(ath) = figures.ath {
            println!("  All-Time High ({}): {:.2}", currency, ath);
        }
        if let Some(ath_date) = figures.ath_date {
            println!("  All-Time High Date ({}): {}", currency, ath_date.format("%Y-%m-%d"));
        }
    }

    Ok(())
}

/// 단기 차트 블록: 샘플 수, 기간 양끝 가격, 가격 변동률.
async fn chart_block(client: &CoinGeckoClient, analysis: &AnalysisConfig) -> StatResult<()> {
    let series = client
        .market_chart(
            &analysis.coin_id,
            &analysis.chart_currency,
            ChartRange::Days(analysis.chart_days),
        )
        .await?;

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(StatError::DataUnavailable("empty chart series".to_string()));
    };

    println!("  Total data points: {}", series.len());
    println!(
        "  First price: {:.2} on {}",
        first.price,
        first.timestamp.format("%Y-%m-%d")
    );
    println!(
        "  Last price: {:.2} on {}",
        last.price,
        last.timestamp.format("%Y-%m-%d")
    );

    let change_pct = ((last.price - first.price) / first.price)
        .to_f64()
        .unwrap_or(0.0)
        * 100.0;
    println!("  Price change: {:+.2}%", change_pct);

    Ok(())
}

/// 전체 히스토리 블록: 보유 데이터 범위와 수익 통계.
async fn history_stats_block(
    client: &CoinGeckoClient,
    analysis: &AnalysisConfig,
) -> StatResult<()> {
    let series = client
        .market_chart(
            &analysis.coin_id,
            &analysis.chart_currency,
            ChartRange::Max,
        )
        .await?;

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(StatError::DataUnavailable("empty history series".to_string()));
    };

    println!("  Total data points available: {}", series.len());
    println!(
        "  First data point: {:.2} on {}",
        first.price,
        first.timestamp.format("%Y-%m-%d")
    );
    println!(
        "  Last data point: {:.2} on {}",
        last.price,
        last.timestamp.format("%Y-%m-%d")
    );

    let stats = ReturnStats::from_series(&series)?;

    println!("\n  Quick Stats:");
    println!("  Time Period: {:.1} years", stats.elapsed_years);
    println!("  Total Return: {:.1}%", stats.total_return_pct);
    println!("  CAGR: {:.2}%", stats.cagr_pct);

    Ok(())
}
