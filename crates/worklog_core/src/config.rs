//! Work log configuration.
//!
//! # Responsibility
//! - Carry the store path, working sheet name and header labels explicitly
//!   into the service instead of process-wide constants.
//! - Apply environment overrides on top of defaults.
//!
//! # Invariants
//! - Column layout is fixed; only the header labels are configurable.

use crate::model::sheet::{SheetRow, COLUMN_COUNT, DEFAULT_HEADER};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Overrides `WorkLogConfig::path`.
pub const ENV_PATH: &str = "WORKLOG_PATH";
/// Overrides `WorkLogConfig::sheet`.
pub const ENV_SHEET: &str = "WORKLOG_SHEET";

const DEFAULT_PATH: &str = "work/work.sqlite3";
const DEFAULT_SHEET: &str = "Sheet1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPath,
    InvalidSheetName(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "work log path cannot be empty"),
            Self::InvalidSheetName(name) => write!(f, "invalid sheet name: `{name}`"),
        }
    }
}

impl Error for ConfigError {}

/// Work log store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkLogConfig {
    /// Backing database file.
    pub path: PathBuf,
    /// Working sheet (table) name.
    pub sheet: String,
    /// Header labels for Task, Todo, Note, Date.
    pub header: [String; COLUMN_COUNT],
}

impl Default for WorkLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            sheet: DEFAULT_SHEET.to_string(),
            header: DEFAULT_HEADER.map(str::to_string),
        }
    }
}

impl WorkLogConfig {
    /// Defaults with `WORKLOG_PATH` / `WORKLOG_SHEET` overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(ENV_PATH) {
            config.path = PathBuf::from(path);
        }
        if let Ok(sheet) = std::env::var(ENV_SHEET) {
            config.sheet = sheet;
        }
        config
    }

    /// Creates a config for `path` with default sheet and header.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Rejects settings the store cannot open.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if self.sheet.trim().is_empty() {
            return Err(ConfigError::InvalidSheetName(self.sheet.clone()));
        }
        Ok(())
    }

    /// Header row built from the configured labels.
    pub fn header_row(&self) -> SheetRow {
        SheetRow::header(&self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, WorkLogConfig};
    use crate::model::sheet::Column;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_work_directory() {
        let config = WorkLogConfig::default();
        assert_eq!(config.path, PathBuf::from("work/work.sqlite3"));
        assert_eq!(config.sheet, "Sheet1");
        assert_eq!(config.header_row().get(Column::Note), "Note");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let config: WorkLogConfig =
            serde_json::from_str(r#"{"sheet":"Work","header":["任务","Todo","说明","日期"]}"#)
                .unwrap();
        assert_eq!(config.sheet, "Work");
        assert_eq!(config.path, PathBuf::from("work/work.sqlite3"));
        assert_eq!(config.header_row().get(Column::Date), "日期");
    }

    #[test]
    fn validate_rejects_blank_sheet_and_empty_path() {
        let mut config = WorkLogConfig::with_path("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyPath));

        config.path = PathBuf::from("log.sqlite3");
        config.sheet = " ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSheetName(_))
        ));
    }
}
