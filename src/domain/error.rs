//! Domain error types.

/// Top-level error type for marketlens.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("insufficient data for {context}: have {have} points, need {need}")]
    InsufficientData {
        context: String,
        have: usize,
        need: usize,
    },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("invalid series {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },

    #[error("return undefined for {symbol} at index {index}: previous price is zero")]
    UndefinedReturn { symbol: String, index: usize },

    #[error("misaligned series: {symbol} has {len} returns, expected {expected}")]
    MisalignedSeries {
        symbol: String,
        len: usize,
        expected: usize,
    },

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyticsError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        AnalyticsError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn insufficient_data(context: impl Into<String>, have: usize, need: usize) -> Self {
        AnalyticsError::InsufficientData {
            context: context.into(),
            have,
            need,
        }
    }
}

impl From<&AnalyticsError> for std::process::ExitCode {
    fn from(err: &AnalyticsError) -> Self {
        let code: u8 = match err {
            AnalyticsError::Io(_) => 1,
            AnalyticsError::ConfigParse { .. } | AnalyticsError::ConfigInvalid { .. } => 2,
            AnalyticsError::Data { .. }
            | AnalyticsError::InvalidSeries { .. }
            | AnalyticsError::UnknownSymbol(_) => 3,
            AnalyticsError::InvalidParameter { .. } => 4,
            AnalyticsError::InsufficientData { .. }
            | AnalyticsError::UndefinedReturn { .. }
            | AnalyticsError::MisalignedSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
