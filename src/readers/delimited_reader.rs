use crate::error::{ProcessingError, Result};
use crate::models::{Document, Table, TableRow};
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;
use tracing::{debug, warn};

/// Delimiters tried when none is configured, in order of preference on ties
const CANDIDATE_DELIMITERS: [u8; 3] = [b'\t', b';', b','];

/// Reads CSV/TSV-style text as a single table of rows.
pub struct DelimitedReader {
    delimiter: Option<u8>,
    encoding: &'static Encoding,
}

impl DelimitedReader {
    pub fn new() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a WHATWG encoding label such as `windows-1250` or `iso-8859-2`
    pub fn with_encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            ProcessingError::UnsupportedDocument(format!("unknown text encoding '{}'", label))
        })?;
        Ok(self)
    }

    pub fn read(&self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path).map_err(|e| {
            ProcessingError::DocumentAccess(format!("{}: {}", path.display(), e))
        })?;

        let document = self.read_bytes(&bytes)?;
        debug!(
            "Read {} rows from {}",
            document.tables.first().map_or(0, |t| t.rows.len()),
            path.display()
        );
        Ok(document)
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Document> {
        // decode() honours a byte order mark over the configured encoding
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                "Input is not valid {}; malformed sequences were replaced",
                used.name()
            );
        }

        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Document> {
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(text));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().collect::<TableRow>());
        }

        Ok(Document::new(vec![Table::new(rows)]))
    }
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the candidate delimiter that occurs most often on the first non-empty line
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");

    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .map(|d| (d, first_line.bytes().filter(|b| *b == d).count()))
        .fold((b',', 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a;b;c\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("\n\nname;10°20′30,5″N;21°0′30″E"), b';');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_read_semicolon_rows() {
        let doc = DelimitedReader::new()
            .read_str("Warszawa;52°14′30″N;21°0′30″E\nbad\n")
            .unwrap();

        assert_eq!(doc.tables.len(), 1);
        assert_eq!(
            doc.tables[0].rows[0].cells,
            vec!["Warszawa", "52°14′30″N", "21°0′30″E"]
        );
        assert_eq!(doc.tables[0].rows[1].cells, vec!["bad"]);
    }

    #[test]
    fn test_quoted_cells_with_ascii_quotes() {
        let doc = DelimitedReader::new()
            .with_delimiter(Some(b','))
            .read_str("Kalisz,\"51°45'25\"\" N\",\"18°5'26\"\" E\"\n")
            .unwrap();

        assert_eq!(
            doc.tables[0].rows[0].cells,
            vec!["Kalisz", "51°45'25\" N", "18°5'26\" E"]
        );
    }

    #[test]
    fn test_windows_1250_file() -> Result<()> {
        // "Łódź;51°45′33″N" is not representable in windows-1250 because of
        // the prime glyphs, so use apostrophes as a legacy file would
        let text = "Łódź;51°45'33\"N;19°27'23\"E\r\n";
        let (encoded, _, unmappable) = encoding_rs::WINDOWS_1250.encode(text);
        assert!(!unmappable);

        let mut file = NamedTempFile::new()?;
        file.write_all(&encoded)?;

        let doc = DelimitedReader::new()
            .with_encoding("windows-1250")?
            .with_delimiter(Some(b';'))
            .read(file.path())?;

        assert_eq!(doc.tables[0].rows[0].cells[0], "Łódź");
        assert_eq!(doc.tables[0].rows[0].cells[1], "51°45'33\"N");
        Ok(())
    }

    #[test]
    fn test_unknown_encoding() {
        assert!(DelimitedReader::new().with_encoding("klingon").is_err());
    }
}
