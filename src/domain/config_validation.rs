//! Configuration validation.
//!
//! Every key is checked before use; a value that is present but malformed is
//! reported as `ConfigInvalid` rather than silently replaced by a default.

use crate::domain::bundle::{BollingerParams, IndicatorSettings, MacdParams, StochasticParams};
use crate::domain::error::AnalyticsError;
use crate::domain::indicator::{bollinger, macd, stochastic};
use crate::domain::risk::RiskSettings;
use crate::domain::symbol_search::DEFAULT_THRESHOLD;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::str::FromStr;

const INDICATOR_KEYS: [&str; 15] = [
    "sma",
    "ema",
    "wma",
    "hma",
    "bollinger_period",
    "bollinger_k",
    "rsi",
    "atr",
    "macd_fast",
    "macd_slow",
    "macd_signal",
    "stoch_k",
    "stoch_d",
    "williams_r",
    "vwap",
];

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> AnalyticsError {
    AnalyticsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn get_trimmed(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, AnalyticsError> {
    match get_trimmed(config, section, key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("cannot parse '{}'", raw))),
    }
}

fn parse_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<usize>, AnalyticsError> {
    match parse_value::<usize>(config, section, key)? {
        Some(0) => Err(invalid(section, key, format!("{} must be a positive integer", key))),
        other => Ok(other),
    }
}

fn parse_flag(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<bool>, AnalyticsError> {
    match get_trimmed(config, section, key) {
        None => Ok(None),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(invalid(section, key, format!("expected a boolean, got '{}'", raw))),
        },
    }
}

/// `[indicators]`: each period key enables its indicator. With no keys at all
/// the default parameters apply.
pub fn build_indicator_settings(config: &dyn ConfigPort) -> Result<IndicatorSettings, AnalyticsError> {
    const S: &str = "indicators";

    if INDICATOR_KEYS.iter().all(|k| get_trimmed(config, S, k).is_none()) {
        return Ok(IndicatorSettings::default());
    }

    let bollinger = match parse_period(config, S, "bollinger_period")? {
        None if get_trimmed(config, S, "bollinger_k").is_some() => {
            return Err(invalid(S, "bollinger_k", "bollinger_k requires bollinger_period"));
        }
        None => None,
        Some(period) => {
            let k = parse_value::<f64>(config, S, "bollinger_k")?.unwrap_or(bollinger::DEFAULT_K);
            if !(k.is_finite() && k > 0.0) {
                return Err(invalid(S, "bollinger_k", "bollinger_k must be positive"));
            }
            Some(BollingerParams { period, k })
        }
    };

    let macd_fast = parse_period(config, S, "macd_fast")?;
    let macd_slow = parse_period(config, S, "macd_slow")?;
    let macd_signal = parse_period(config, S, "macd_signal")?;
    let macd = if macd_fast.is_some() || macd_slow.is_some() || macd_signal.is_some() {
        let params = MacdParams {
            fast: macd_fast.unwrap_or(macd::DEFAULT_FAST),
            slow: macd_slow.unwrap_or(macd::DEFAULT_SLOW),
            signal: macd_signal.unwrap_or(macd::DEFAULT_SIGNAL),
        };
        if params.fast >= params.slow {
            return Err(invalid(S, "macd_fast", "macd_fast must be less than macd_slow"));
        }
        Some(params)
    } else {
        None
    };

    let stochastic = match parse_period(config, S, "stoch_k")? {
        None if get_trimmed(config, S, "stoch_d").is_some() => {
            return Err(invalid(S, "stoch_d", "stoch_d requires stoch_k"));
        }
        None => None,
        Some(k_period) => Some(StochasticParams {
            k_period,
            d_period: parse_period(config, S, "stoch_d")?.unwrap_or(stochastic::DEFAULT_D_PERIOD),
        }),
    };

    let hma = parse_period(config, S, "hma")?;
    if hma == Some(1) {
        return Err(invalid(S, "hma", "hma must be at least 2"));
    }

    Ok(IndicatorSettings {
        sma: parse_period(config, S, "sma")?,
        ema: parse_period(config, S, "ema")?,
        wma: parse_period(config, S, "wma")?,
        hma,
        vwap: parse_flag(config, S, "vwap")?.unwrap_or(false),
        bollinger,
        atr: parse_period(config, S, "atr")?,
        rsi: parse_period(config, S, "rsi")?,
        macd,
        stochastic,
        williams_r: parse_period(config, S, "williams_r")?,
    })
}

/// `[risk]`: every key optional, falling back to [`RiskSettings::default`].
pub fn build_risk_settings(config: &dyn ConfigPort) -> Result<RiskSettings, AnalyticsError> {
    const S: &str = "risk";
    let defaults = RiskSettings::default();

    let confidence = parse_value::<f64>(config, S, "confidence")?.unwrap_or(defaults.confidence);
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(invalid(S, "confidence", "confidence must be between 0 and 1 exclusive"));
    }

    let risk_free_rate =
        parse_value::<f64>(config, S, "risk_free_rate")?.unwrap_or(defaults.risk_free_rate);
    if !(0.0..1.0).contains(&risk_free_rate) {
        return Err(invalid(S, "risk_free_rate", "risk_free_rate must be between 0 and 1"));
    }

    Ok(RiskSettings {
        confidence,
        volatility_window: parse_period(config, S, "volatility_window")?
            .unwrap_or(defaults.volatility_window),
        correlation_lookback: parse_period(config, S, "correlation_lookback")?
            .unwrap_or(defaults.correlation_lookback),
        risk_free_rate,
        benchmark: get_trimmed(config, S, "benchmark").map(|b| b.to_uppercase()),
    })
}

/// `[search] threshold`, a non-negative edit distance.
pub fn build_search_threshold(config: &dyn ConfigPort) -> Result<usize, AnalyticsError> {
    Ok(parse_value::<usize>(config, "search", "threshold")?.unwrap_or(DEFAULT_THRESHOLD))
}

pub fn data_dir(config: &dyn ConfigPort) -> Option<PathBuf> {
    get_trimmed(config, "data", "dir").map(PathBuf::from)
}

pub fn catalog_path(config: &dyn ConfigPort) -> Option<PathBuf> {
    get_trimmed(config, "data", "catalog").map(PathBuf::from)
}
