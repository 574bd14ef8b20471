pub mod delimited_reader;
pub mod docx_reader;

pub use delimited_reader::DelimitedReader;
pub use docx_reader::DocxReader;

use crate::error::{ProcessingError, Result};
use crate::models::Document;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Delimited,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "docx" => Ok(DocumentFormat::Docx),
            "csv" | "tsv" | "txt" => Ok(DocumentFormat::Delimited),
            _ => Err(ProcessingError::UnsupportedDocument(format!(
                "'{}' (expected .docx, .csv, .tsv or .txt)",
                path.display()
            ))),
        }
    }
}

/// Options for the delimited-text reader; ignored for .docx input
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    pub delimiter: Option<u8>,
    pub encoding: Option<String>,
}

/// Open a document and read all of its tables before any parsing starts
pub fn load_document(path: &Path, options: &ReaderOptions) -> Result<Document> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::Docx => DocxReader::read(path),
        DocumentFormat::Delimited => {
            let mut reader = DelimitedReader::new().with_delimiter(options.delimiter);
            if let Some(label) = options.encoding.as_deref() {
                reader = reader.with_encoding(label)?;
            }
            reader.read(path)
        }
    }
}
