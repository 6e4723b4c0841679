//! INI file configuration adapter.

use crate::domain::error::AnalyticsError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;
use tracing::debug;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| AnalyticsError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        debug!(path = %path.display(), sections = config.sections().len(), "loaded config");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, AnalyticsError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| AnalyticsError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}
