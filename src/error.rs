use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid DMS coordinate: '{text}'{}", display_context(.context))]
    InvalidFormat {
        text: String,
        context: Option<RowContext>,
    },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Coordinate {value} out of range at {context}")]
    OutOfRange { value: f64, context: RowContext },

    #[error("Cannot read document: {0}")]
    DocumentAccess(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedDocument(String),
}

impl ProcessingError {
    pub fn invalid_format(text: impl Into<String>) -> Self {
        ProcessingError::InvalidFormat {
            text: text.into(),
            context: None,
        }
    }

    /// Attach the table/row position to a parser error. Other variants pass through.
    pub fn with_context(self, ctx: RowContext) -> Self {
        match self {
            ProcessingError::InvalidFormat { text, .. } => ProcessingError::InvalidFormat {
                text,
                context: Some(ctx),
            },
            other => other,
        }
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ProcessingError::InvalidFormat { .. })
    }

    pub fn context(&self) -> Option<&RowContext> {
        match self {
            ProcessingError::InvalidFormat { context, .. } => context.as_ref(),
            ProcessingError::OutOfRange { context, .. } => Some(context),
            _ => None,
        }
    }
}

/// Which coordinate cell of a row failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateField::Latitude => write!(f, "latitude"),
            CoordinateField::Longitude => write!(f, "longitude"),
        }
    }
}

/// Position of a failing cell. Indices are zero-based and printed one-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContext {
    pub table: usize,
    pub row: usize,
    pub field: CoordinateField,
    pub place: String,
}

impl fmt::Display for RowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table {}, row {}, {} of '{}'",
            self.table + 1,
            self.row + 1,
            self.field,
            self.place
        )
    }
}

fn display_context(context: &Option<RowContext>) -> String {
    match context {
        Some(ctx) => format!(" at {}", ctx),
        None => String::new(),
    }
}
