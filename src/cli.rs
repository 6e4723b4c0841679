//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::adapters::classical_decomposition::ClassicalDecomposer;
use crate::adapters::csv_adapter::{CsvAdapter, CsvCatalogAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::static_catalog::StaticCatalog;
use crate::domain::bundle::{compute_bundle, ChartBundle, IndicatorSettings};
use crate::domain::config_validation::{
    build_indicator_settings, build_risk_settings, build_search_threshold, catalog_path, data_dir,
};
use crate::domain::decomposition::{decompose_series, SeriesDecomposition};
use crate::domain::error::AnalyticsError;
use crate::domain::quote::QuoteSummary;
use crate::domain::risk::RiskSettings;
use crate::domain::risk_report::{build_risk_report, RiskReport};
use crate::domain::symbol_search::{record_distance, search, SymbolRecord};
use crate::ports::catalog_port::CatalogPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(
    name = "marketlens",
    about = "Technical indicators and risk analytics over OHLCV data"
)]
pub struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the indicator bundle for one symbol
    Indicators {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Only print the last N rows of the table
        #[arg(long)]
        tail: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Return statistics, VaR/CVaR, volatility and correlation
    Risk {
        #[arg(long, value_delimiter = ',', required = true)]
        symbols: Vec<String>,
        #[arg(long)]
        benchmark: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Fuzzy search the symbol catalog
    Search {
        query: String,
        #[arg(long)]
        threshold: Option<usize>,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Additive trend/seasonal/residual decomposition of closes
    Decompose {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        period: usize,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Latest-bar quote summary
    Quote {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List symbols with price files in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Indicators {
            symbol,
            config,
            data_dir,
            tail,
            json,
        } => run_indicators(&symbol, config.as_deref(), data_dir, tail, json),
        Command::Risk {
            symbols,
            benchmark,
            config,
            data_dir,
            json,
        } => run_risk(&symbols, benchmark.as_deref(), config.as_deref(), data_dir, json),
        Command::Search {
            query,
            threshold,
            catalog,
            config,
        } => run_search(&query, threshold, catalog, config.as_deref()),
        Command::Decompose {
            symbol,
            period,
            config,
            data_dir,
            json,
        } => run_decompose(&symbol, period, config.as_deref(), data_dir, json),
        Command::Quote {
            symbol,
            config,
            data_dir,
            json,
        } => run_quote(&symbol, config.as_deref(), data_dir, json),
        Command::ListSymbols { config, data_dir } => run_list_symbols(config.as_deref(), data_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Option<FileConfigAdapter>, AnalyticsError> {
    path.map(|p| {
        info!("Loading config from {}", p.display());
        FileConfigAdapter::from_file(p)
    })
    .transpose()
}

/// `--data-dir`, then `[data] dir`, then [`DEFAULT_DATA_DIR`].
pub fn resolve_data_dir(arg: Option<PathBuf>, config: Option<&FileConfigAdapter>) -> PathBuf {
    arg.or_else(|| config.and_then(|c| data_dir(c)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn open_data(
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
) -> Result<(Option<FileConfigAdapter>, CsvAdapter), AnalyticsError> {
    let config = load_config(config_path)?;
    let dir = resolve_data_dir(data_dir_arg, config.as_ref());
    debug!("Reading price data from {}", dir.display());
    Ok((config, CsvAdapter::new(dir)))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AnalyticsError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AnalyticsError::Data {
        reason: format!("failed to serialise output: {}", e),
    })?;
    println!("{}", out);
    Ok(())
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

pub fn build_chart_bundle(
    data_port: &dyn DataPort,
    symbol: &str,
    settings: &IndicatorSettings,
) -> Result<ChartBundle, AnalyticsError> {
    let series = data_port.fetch_series(symbol)?;
    let bundle = compute_bundle(&series, settings)?;
    info!(
        symbol,
        bars = series.len(),
        series = bundle.series().len(),
        "computed indicators"
    );
    Ok(bundle)
}

/// Loads every symbol (and the benchmark, if any) and builds the report.
/// Repeated symbols are loaded once.
pub fn build_risk_report_from_port(
    data_port: &dyn DataPort,
    symbols: &[String],
    settings: &RiskSettings,
) -> Result<RiskReport, AnalyticsError> {
    let mut unique: Vec<String> = Vec::new();
    for s in symbols.iter().map(|s| normalize_symbol(s)).filter(|s| !s.is_empty()) {
        if !unique.contains(&s) {
            unique.push(s);
        }
    }

    let series = unique
        .iter()
        .map(|s| data_port.fetch_series(s))
        .collect::<Result<Vec<_>, _>>()?;
    let benchmark = settings
        .benchmark
        .as_deref()
        .map(|b| data_port.fetch_series(b))
        .transpose()?;

    build_risk_report(&series, benchmark.as_ref(), settings)
}

fn run_indicators(
    symbol: &str,
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
    tail: Option<usize>,
    json: bool,
) -> Result<(), AnalyticsError> {
    let (config, data_port) = open_data(config_path, data_dir_arg)?;
    let settings = match &config {
        Some(c) => build_indicator_settings(c)?,
        None => IndicatorSettings::default(),
    };

    let bundle = build_chart_bundle(&data_port, &normalize_symbol(symbol), &settings)?;
    if json {
        return print_json(&bundle);
    }

    let columns = bundle.series();
    let mut header = format!("{:<20} {:>12}", "timestamp", "close");
    for s in &columns {
        header.push_str(&format!(" {:>22}", s.indicator_type.to_string()));
    }
    println!("{}", header);

    let start = tail.map_or(0, |n| bundle.bars.len().saturating_sub(n));
    for (i, bar) in bundle.bars.iter().enumerate().skip(start) {
        let mut row = format!(
            "{:<20} {:>12.4}",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            bar.close
        );
        for s in &columns {
            row.push_str(&format!(" {:>22}", fmt_value(s.value_at(i))));
        }
        println!("{}", row);
    }
    Ok(())
}

fn run_risk(
    symbols: &[String],
    benchmark: Option<&str>,
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
    json: bool,
) -> Result<(), AnalyticsError> {
    let (config, data_port) = open_data(config_path, data_dir_arg)?;
    let mut settings = match &config {
        Some(c) => build_risk_settings(c)?,
        None => RiskSettings::default(),
    };
    if let Some(b) = benchmark {
        settings.benchmark = Some(normalize_symbol(b));
    }

    info!("Analysing {} symbols", symbols.len());
    let report = build_risk_report_from_port(&data_port, symbols, &settings)?;
    if json {
        return print_json(&report);
    }

    println!(
        "{:<8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "symbol", "mean", "stddev", "min", "median", "max", "VaR", "CVaR", "vol_last"
    );
    for s in &report.symbols {
        println!(
            "{:<8} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10}",
            s.symbol,
            s.stats.mean,
            s.stats.stddev,
            s.stats.min,
            s.stats.median,
            s.stats.max,
            s.risk.var,
            s.risk.cvar,
            fmt_value(s.rolling_volatility.last().copied()),
        );
    }

    if let Some(bench) = &report.benchmark {
        println!();
        println!("Against {} (risk-free {:.2}% annual)", bench, settings.risk_free_rate * 100.0);
        println!("{:<8} {:>12} {:>12} {:>10} {:>10}", "symbol", "mean_return", "volatility", "beta", "sharpe");
        for m in report.symbols.iter().filter_map(|s| s.scatter.as_ref()) {
            println!(
                "{:<8} {:>12.5} {:>12.5} {:>10} {:>10}",
                m.symbol,
                m.mean_return,
                m.volatility,
                fmt_value(m.beta),
                fmt_value(m.sharpe_ratio)
            );
        }
    }

    println!();
    println!("Correlation");
    let mut header = format!("{:<8}", "");
    for s in &report.correlation.symbols {
        header.push_str(&format!(" {:>8}", s));
    }
    println!("{}", header);
    for (symbol, row) in report.correlation.symbols.iter().zip(&report.correlation.values) {
        let mut line = format!("{:<8}", symbol);
        for cell in row {
            line.push_str(&format!(" {:>8}", cell.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))));
        }
        println!("{}", line);
    }
    Ok(())
}

fn load_catalog(
    catalog_arg: Option<PathBuf>,
    config: Option<&FileConfigAdapter>,
) -> Result<Vec<SymbolRecord>, AnalyticsError> {
    match catalog_arg.or_else(|| config.and_then(|c| catalog_path(c))) {
        Some(path) => CsvCatalogAdapter::new(path).load_catalog(),
        None => StaticCatalog.load_catalog(),
    }
}

fn run_search(
    query: &str,
    threshold: Option<usize>,
    catalog_arg: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(), AnalyticsError> {
    let config = load_config(config_path)?;
    let threshold = match (threshold, &config) {
        (Some(t), _) => t,
        (None, Some(c)) => build_search_threshold(c)?,
        (None, None) => crate::domain::symbol_search::DEFAULT_THRESHOLD,
    };
    let catalog = load_catalog(catalog_arg, config.as_ref())?;

    let hits = search(query, &catalog, threshold);
    if hits.is_empty() {
        warn!(query, threshold, "no matching symbols");
    }
    for record in &hits {
        println!(
            "{:<8} {:<32} {}",
            record.ticker,
            record.company_name,
            record_distance(query, record)
        );
    }
    info!("{} matches", hits.len());
    Ok(())
}

pub fn decompose_symbol(
    data_port: &dyn DataPort,
    symbol: &str,
    period: usize,
) -> Result<SeriesDecomposition, AnalyticsError> {
    let series = data_port.fetch_series(symbol)?;
    decompose_series(&ClassicalDecomposer, &series, period)
}

fn run_decompose(
    symbol: &str,
    period: usize,
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
    json: bool,
) -> Result<(), AnalyticsError> {
    let (_config, data_port) = open_data(config_path, data_dir_arg)?;
    let out = decompose_symbol(&data_port, &normalize_symbol(symbol), period)?;
    if json {
        return print_json(&out);
    }

    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>12}",
        "timestamp", "observed", "trend", "seasonal", "residual"
    );
    for (i, ts) in out.timestamps.iter().enumerate() {
        println!(
            "{:<20} {:>12.4} {:>12} {:>12.4} {:>12}",
            ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            out.observed[i],
            fmt_value(out.components.trend[i]),
            out.components.seasonal[i],
            fmt_value(out.components.residual[i]),
        );
    }
    Ok(())
}

fn run_quote(
    symbol: &str,
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
    json: bool,
) -> Result<(), AnalyticsError> {
    let (_config, data_port) = open_data(config_path, data_dir_arg)?;
    let series = data_port.fetch_series(&normalize_symbol(symbol))?;
    let quote = QuoteSummary::from_series(&series)?;
    if json {
        return print_json(&quote);
    }

    println!("{} as of {}", quote.symbol, quote.timestamp);
    println!("  last         {:.4}", quote.last_price);
    println!(
        "  change       {:+.4} ({}%)",
        quote.change,
        quote
            .change_pct
            .map_or_else(|| "-".to_string(), |p| format!("{:+.2}", p))
    );
    println!("  open         {:.4}", quote.open);
    println!("  day range    {:.4} - {:.4}", quote.day_low, quote.day_high);
    println!("  period range {:.4} - {:.4}", quote.period_low, quote.period_high);
    println!("  volume       {:.0}", quote.volume);
    Ok(())
}

fn run_list_symbols(
    config_path: Option<&Path>,
    data_dir_arg: Option<PathBuf>,
) -> Result<(), AnalyticsError> {
    let (_config, data_port) = open_data(config_path, data_dir_arg)?;
    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        warn!("No symbols found");
    }
    for symbol in &symbols {
        println!("{}", symbol);
    }
    info!("{} symbols found", symbols.len());
    Ok(())
}
