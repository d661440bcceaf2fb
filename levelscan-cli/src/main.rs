//! LevelScan CLI — analyze CSV files or watchlist symbols and print
//! support/resistance levels and trading signals.
//!
//! Commands:
//! - `analyze` — run the pipeline over a CSV file or one or more symbols,
//!   optionally on a refresh loop that reports signal changes
//!
//! The CLI owns everything the core deliberately does not: fetch wiring,
//! the per-symbol signal ledger, and refresh scheduling. Analysis errors
//! for a symbol are treated as "no data this cycle", not as fatal.

mod ledger;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use levelscan_core::{
    analyze, Analysis, AnalyzeRequest, IndicatorParams, SourceSpec, SrConfig, SymbolQuery,
    YahooFetcher,
};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ledger::SignalLedger;

#[derive(Parser)]
#[command(
    name = "levelscan",
    about = "Support/resistance levels and trading signals from OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV file or one or more symbols.
    Analyze {
        /// Symbols to analyze (e.g., SPY QQQ AAPL).
        symbols: Vec<String>,

        /// CSV file with date and OHLCV columns (instead of symbols).
        #[arg(long, conflicts_with = "symbols")]
        csv: Option<PathBuf>,

        /// Lookback period for symbol fetches (e.g., 6mo, 1y).
        #[arg(long, default_value = "6mo")]
        period: String,

        /// Bar interval for symbol fetches (e.g., 1d, 1h).
        #[arg(long, default_value = "1d")]
        interval: String,

        /// TOML config file with [sr] and [indicators] sections.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Require volume confirmation for BUY/SELL.
        #[arg(long, default_value_t = false)]
        volume: bool,

        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Re-run every N seconds, reporting signal changes.
        #[arg(long)]
        watch_interval: Option<u64>,
    },
}

/// TOML-file shape: `[sr]` and `[indicators]` tables plus a `use_volume`
/// flag, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppConfig {
    sr: SrConfig,
    indicators: IndicatorParams,
    use_volume: bool,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        None => Ok(AppConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            symbols,
            csv,
            period,
            interval,
            config,
            volume,
            json,
            watch_interval,
        } => {
            let mut app = load_config(config.as_deref())?;
            app.use_volume |= volume;

            if let Some(path) = csv {
                return analyze_csv(&path, &app, json);
            }
            if symbols.is_empty() {
                bail!("provide one or more symbols, or --csv");
            }
            analyze_watchlist(&symbols, &period, &interval, &app, json, watch_interval)
        }
    }
}

fn analyze_csv(path: &Path, app: &AppConfig, json: bool) -> Result<()> {
    let request = AnalyzeRequest {
        source: SourceSpec::from_csv(path),
        config: app.sr.clone(),
        params: app.indicators.clone(),
        use_volume: app.use_volume,
        fetcher: None,
    };
    let analysis = analyze(request).with_context(|| format!("analyzing {}", path.display()))?;
    print_analysis(&path.display().to_string(), &analysis, json);
    Ok(())
}

fn analyze_watchlist(
    symbols: &[String],
    period: &str,
    interval: &str,
    app: &AppConfig,
    json: bool,
    watch_interval: Option<u64>,
) -> Result<()> {
    let fetcher = YahooFetcher::new();
    let mut ledger = SignalLedger::new();

    loop {
        // Each symbol gets its own independent, stateless analysis call;
        // rayon fans them out without any coordination inside the core.
        let results: Vec<(String, Result<Analysis, levelscan_core::AnalyzeError>)> = symbols
            .par_iter()
            .map(|symbol| {
                let request = AnalyzeRequest {
                    source: SourceSpec::from_symbol(SymbolQuery {
                        symbol: symbol.clone(),
                        period: Some(period.to_string()),
                        interval: Some(interval.to_string()),
                    }),
                    config: app.sr.clone(),
                    params: app.indicators.clone(),
                    use_volume: app.use_volume,
                    fetcher: Some(&fetcher),
                };
                (symbol.clone(), analyze(request))
            })
            .collect();

        for (symbol, result) in &results {
            match result {
                Ok(analysis) => {
                    let changed = ledger.observe(symbol, &analysis.signals);
                    print_analysis(symbol, analysis, json);
                    if watch_interval.is_some() && changed {
                        println!("  >> signal changed for {symbol}");
                    }
                }
                Err(e) => println!("  no data for {symbol} this cycle: {e}"),
            }
        }

        match watch_interval {
            Some(secs) => std::thread::sleep(Duration::from_secs(secs)),
            None => return Ok(()),
        }
    }
}

fn print_analysis(label: &str, analysis: &Analysis, json: bool) {
    if json {
        match serde_json::to_string_pretty(analysis) {
            Ok(text) => println!("{text}"),
            Err(e) => println!("  failed to serialize analysis for {label}: {e}"),
        }
        return;
    }

    println!("== {label}: {} bars ==", analysis.frame.len());

    println!("levels ({}):", analysis.levels.len());
    for level in &analysis.levels {
        println!(
            "  {:>10}  {:>10.2}  {}",
            format!("{:?}", level.kind).to_lowercase(),
            level.price,
            level.timestamp.format("%Y-%m-%d %H:%M")
        );
    }

    if let Some((bar, rsi, macd, macd_signal)) = analysis.frame.last_row() {
        println!(
            "last bar {}: close {:.2}  rsi {:.1}  macd {:.4}  signal {:.4}",
            bar.timestamp.format("%Y-%m-%d %H:%M"),
            bar.close,
            rsi,
            macd,
            macd_signal
        );
    }

    println!("signals:");
    for signal in &analysis.signals {
        println!("  {:?}: {} @ {:.2}", signal.kind, signal.reason, signal.price);
    }
}
