//! Layered settings: built-in defaults, then an optional TOML file, then
//! `RELEASE_POINTS_*` environment variables. CLI flags are applied on top by
//! the command layer.

use crate::error::{ProcessingError, Result};
use crate::processors::ErrorPolicy;
use crate::readers::ReaderOptions;
use crate::utils::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_FILE};
use crate::writers::OutputFormat;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Abort on the first malformed row, or skip it and keep going
    pub error_policy: ErrorPolicy,

    /// Reject records whose latitude/longitude fall outside the globe
    pub validate_ranges: bool,

    /// Treat a table's first row as a header when neither coordinate parses
    pub skip_header: bool,

    pub output_format: OutputFormat,

    /// Single-character delimiter for CSV/TSV input; sniffed when unset
    pub csv_delimiter: Option<String>,

    /// Encoding label for CSV/TSV input, e.g. `windows-1250`
    pub csv_encoding: Option<String>,
}

impl Settings {
    /// Load settings. An explicit `config_file` must exist; otherwise
    /// `release-points.toml` in the working directory is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => {
                debug!("Using config file: {}", path.display());
                File::from(path).format(FileFormat::Toml).required(true)
            }
            None => File::from(Path::new(DEFAULT_CONFIG_FILE))
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.reader_options()?;
        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }

    pub fn reader_options(&self) -> Result<ReaderOptions> {
        let delimiter = self
            .csv_delimiter
            .as_deref()
            .map(parse_delimiter)
            .transpose()?;

        Ok(ReaderOptions {
            delimiter,
            encoding: self.csv_encoding.clone(),
        })
    }
}

/// Accepts a single ASCII character, or `tab` / `\t` for a tab
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err(ProcessingError::Config(config::ConfigError::Message(format!(
            "delimiter must be a single ASCII character, got '{}'",
            value
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.error_policy, ErrorPolicy::Abort);
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert!(!settings.validate_ranges);
        assert!(!settings.skip_header);
        assert!(settings.reader_options().unwrap().delimiter.is_none());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "error_policy = \"skip\"")?;
        writeln!(file, "validate_ranges = true")?;
        writeln!(file, "output_format = \"csv\"")?;
        writeln!(file, "csv_delimiter = \";\"")?;
        writeln!(file, "csv_encoding = \"windows-1250\"")?;

        let settings = Settings::load(Some(file.path()))?;
        assert_eq!(settings.error_policy, ErrorPolicy::Skip);
        assert!(settings.validate_ranges);
        assert!(!settings.skip_header);
        assert_eq!(settings.output_format, OutputFormat::Csv);

        let options = settings.reader_options()?;
        assert_eq!(options.delimiter, Some(b';'));
        assert_eq!(options.encoding.as_deref(), Some("windows-1250"));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/release-points.toml")));
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }

    #[test]
    fn test_bad_delimiter_in_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "csv_delimiter = \";;\"")?;

        assert!(Settings::load(Some(file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ł").is_err());
    }
}
