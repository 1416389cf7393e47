//! Yahoo Finance 진단 리포트 명령어.
//!
//! 전체 일봉 히스토리를 한 번 조회한 뒤 세 개의 블록을 실행합니다:
//! 수익/위험 통계, 월간 DCA 시뮬레이션, 몬테카를로 전망.
//! 히스토리 조회 자체가 실패하면 나머지 블록은 건너뜁니다.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use btcstat_analytics::{
    resample_monthly, DcaProjection, DcaProjectionConfig, DcaResult, ReturnMoments, ReturnStats,
};
use btcstat_core::{AnalysisConfig, AppConfig, PriceSeries, StatError, StatResult};
use btcstat_data::YahooProvider;

use super::{finish_block, print_rule};

/// Yahoo Finance 리포트를 실행합니다.
pub async fn run(config: &AppConfig) -> Result<()> {
    let analysis = &config.analysis;

    info!("Yahoo Finance report for {}", analysis.yahoo_symbol);

    println!(
        "Testing Yahoo Finance for {} historical data...",
        analysis.yahoo_symbol
    );
    print_rule();

    println!("\n1. Full historical data ({}):", analysis.yahoo_symbol);
    let series = match fetch_history(analysis).await {
        Ok(series) => series,
        Err(error) => {
            // 히스토리가 없으면 이후 블록도 계산할 수 없다
            println!("Error: {}", error);
            return Ok(());
        }
    };

    finish_block(stats_block(&series));

    println!("\n2. Monthly data for DCA simulation:");
    let monthly = resample_monthly(&series);
    finish_block(dca_block(&monthly, analysis));

    println!("\n3. Monte Carlo projection:");
    finish_block(projection_block(&monthly, analysis));

    println!();
    print_rule();
    println!("Yahoo Finance report complete");

    Ok(())
}

/// 전체 히스토리를 조회하고 범위 요약을 출력합니다.
async fn fetch_history(analysis: &AnalysisConfig) -> StatResult<PriceSeries> {
    let provider = YahooProvider::new()?;
    let series = provider.daily_closes(&analysis.yahoo_symbol).await?;

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(StatError::DataUnavailable("empty history series".to_string()));
    };

    println!("  Total data points: {}", series.len());
    println!("  First date: {}", first.timestamp.format("%Y-%m-%d"));
    println!("  Last date: {}", last.timestamp.format("%Y-%m-%d"));
    println!("  First price: {:.2}", first.price);
    println!("  Current price: {:.2}", last.price);

    Ok(series)
}

/// 수익/위험 통계 블록.
fn stats_block(series: &PriceSeries) -> StatResult<()> {
    let stats = ReturnStats::from_series(series)?;

    println!("\n  Statistics ({:.1} years):", stats.elapsed_years);
    println!("  CAGR: {:.2}%", stats.cagr_pct);
    println!(
        "  Annualized Volatility: {:.2}%",
        stats.annualized_volatility_pct
    );
    println!("  Sharpe Ratio: {:.2}", stats.sharpe_ratio);
    println!("  Total Return: {:.0}%", stats.total_return_pct);

    Ok(())
}

/// 월간 DCA 시뮬레이션 블록.
fn dca_block(monthly: &PriceSeries, analysis: &AnalysisConfig) -> StatResult<()> {
    let (Some(first), Some(last)) = (monthly.first(), monthly.last()) else {
        return Err(StatError::InsufficientData(
            "no monthly samples after resampling".to_string(),
        ));
    };

    println!("  Total months: {}", monthly.len());
    println!("  First month: {}", first.timestamp.format("%Y-%m"));
    println!("  Last month: {}", last.timestamp.format("%Y-%m"));

    let result = DcaResult::simulate(monthly, analysis.dca_contribution)?;

    println!(
        "\n  DCA Strategy ({}/month):",
        analysis.dca_contribution
    );
    println!("  Total Invested: {:.0}", result.total_invested);
    println!("  Total Units Acquired: {:.4}", result.total_units);
    println!("  Current Value: {:.0}", result.current_value);
    println!("  Profit/Loss: {:.0}", result.profit_loss);
    println!("  ROI: {:.2}%", result.roi_pct);
    match result.annualized_roi_pct {
        Some(annualized) => println!("  Annualized Return: {:.2}%", annualized),
        None => println!("  Annualized Return: N/A (period too short)"),
    }

    Ok(())
}

/// 몬테카를로 전망 블록.
///
/// 과거 월간 수익률 모멘트로 전망 파라미터를 구성합니다.
fn projection_block(monthly: &PriceSeries, analysis: &AnalysisConfig) -> StatResult<()> {
    let moments = ReturnMoments::from_series(monthly)?;
    let start_price = monthly
        .last()
        .and_then(|point| point.price.to_f64())
        .ok_or_else(|| StatError::InvalidInput("start price out of range".to_string()))?;

    let config = DcaProjectionConfig::from_moments(
        &moments,
        start_price,
        analysis.projection_months,
        analysis.dca_contribution,
        analysis.projection_iterations,
    );

    let projection = DcaProjection::run(&config, &mut StdRng::from_entropy())?;

    println!(
        "  Historical monthly returns: mean {:.2}%, std {:.2}%, skew {:.2}, kurt {:.2}",
        moments.mean * 100.0,
        moments.std_dev * 100.0,
        moments.skewness,
        moments.kurtosis
    );
    println!(
        "  {} paths over {} months ({}/month):",
        projection.iterations, projection.months, analysis.dca_contribution
    );
    println!("  Total Invested: {:.0}", projection.total_invested);
    println!("  Mean Final Value: {:.0}", projection.mean_final_value);
    println!(
        "  Percentiles (5/25/50/75/95): {:.0} / {:.0} / {:.0} / {:.0} / {:.0}",
        projection.percentiles[0],
        projection.percentiles[1],
        projection.percentiles[2],
        projection.percentiles[3],
        projection.percentiles[4]
    );
    println!(
        "  Break-even Probability: {:.1}%",
        projection.break_even_probability * 100.0
    );

    Ok(())
}
