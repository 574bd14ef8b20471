use crate::error::{CoordinateField, ProcessingError, Result, RowContext};
use crate::models::{CoordinateRecord, TableRow, TabularDocument};
use crate::utils::constants::{LATITUDE_CELL, LONGITUDE_CELL, MIN_RECORD_CELLS, NAME_CELL};
use crate::utils::coordinates::dms_to_decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::Validate;

/// What to do when a row's coordinates cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first bad row and return its error
    #[default]
    Abort,
    /// Leave bad rows out and collect their errors in the report
    Skip,
}

#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub records: Vec<CoordinateRecord>,
    pub skipped: Vec<ProcessingError>,
    pub rows_seen: usize,
    pub rows_ineligible: usize,
    pub headers_skipped: usize,
}

impl ExtractionReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = format!(
            "Extraction Summary:\n  Rows Seen: {}\n  Records Extracted: {}\n  Rows With Fewer Than {} Cells: {}\n",
            self.rows_seen,
            self.records.len(),
            MIN_RECORD_CELLS,
            self.rows_ineligible
        );

        if self.headers_skipped > 0 {
            summary.push_str(&format!("  Header Rows Skipped: {}\n", self.headers_skipped));
        }

        if !self.skipped.is_empty() {
            summary.push_str(&format!("  Rows Skipped On Error: {}\n", self.skipped.len()));
            for error in &self.skipped {
                summary.push_str(&format!("    {}\n", error));
            }
        }

        summary
    }
}

enum RowOutcome {
    Record(CoordinateRecord),
    Ineligible,
    Header,
}

pub struct RecordExtractor {
    error_policy: ErrorPolicy,
    validate_ranges: bool,
    skip_header: bool,
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            validate_ranges: false,
            skip_header: false,
        }
    }

    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    pub fn with_range_validation(mut self, validate_ranges: bool) -> Self {
        self.validate_ranges = validate_ranges;
        self
    }

    pub fn with_header_skip(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Extract records in table/row order.
    ///
    /// Under [`ErrorPolicy::Abort`] the first bad row fails the whole call;
    /// under [`ErrorPolicy::Skip`] bad rows are dropped and only the good
    /// records come back. Use [`Self::extract_report`] to see what was skipped.
    pub fn extract<D: TabularDocument + ?Sized>(&self, document: &D) -> Result<Vec<CoordinateRecord>> {
        self.extract_report(document).map(|report| report.records)
    }

    pub fn extract_report<D: TabularDocument + ?Sized>(&self, document: &D) -> Result<ExtractionReport> {
        let mut report = ExtractionReport::default();

        for (table_index, table) in document.tables().iter().enumerate() {
            let mut first_eligible = true;

            for (row_index, row) in table.rows.iter().enumerate() {
                report.rows_seen += 1;

                let header_candidate = self.skip_header && first_eligible;
                let outcome = self.extract_row(row, table_index, row_index, header_candidate);

                match outcome {
                    Ok(RowOutcome::Record(record)) => {
                        first_eligible = false;
                        debug!(
                            "Table {} row {}: {} ({}, {})",
                            table_index + 1,
                            row_index + 1,
                            record.name,
                            record.lat,
                            record.lon
                        );
                        report.records.push(record);
                    }
                    Ok(RowOutcome::Ineligible) => {
                        report.rows_ineligible += 1;
                    }
                    Ok(RowOutcome::Header) => {
                        first_eligible = false;
                        debug!("Table {} row {}: header row skipped", table_index + 1, row_index + 1);
                        report.headers_skipped += 1;
                    }
                    Err(e) => {
                        first_eligible = false;
                        match self.error_policy {
                            ErrorPolicy::Abort => return Err(e),
                            ErrorPolicy::Skip => {
                                warn!("Skipping row: {}", e);
                                report.skipped.push(e);
                            }
                        }
                    }
                }
            }
        }

        info!(
            "Extracted {} records from {} rows ({} skipped)",
            report.records.len(),
            report.rows_seen,
            report.skipped.len()
        );

        Ok(report)
    }

    fn extract_row(
        &self,
        row: &TableRow,
        table: usize,
        row_index: usize,
        header_candidate: bool,
    ) -> Result<RowOutcome> {
        if row.len() < MIN_RECORD_CELLS {
            return Ok(RowOutcome::Ineligible);
        }

        let cells: Vec<&str> = row.cells.iter().map(|c| c.trim()).collect();
        let name = cells[NAME_CELL];

        let context = |field| RowContext {
            table,
            row: row_index,
            field,
            place: name.to_string(),
        };

        let lat = dms_to_decimal(cells[LATITUDE_CELL]);
        let lon = dms_to_decimal(cells[LONGITUDE_CELL]);

        if header_candidate && lat.is_err() && lon.is_err() {
            return Ok(RowOutcome::Header);
        }

        let lat = lat.map_err(|e| e.with_context(context(CoordinateField::Latitude)))?;
        let lon = lon.map_err(|e| e.with_context(context(CoordinateField::Longitude)))?;

        let record = CoordinateRecord::new(name.to_string(), lat, lon);

        if self.validate_ranges {
            record.validate().map_err(|errors| {
                let field = if errors.field_errors().contains_key("lat") {
                    CoordinateField::Latitude
                } else {
                    CoordinateField::Longitude
                };
                let value = match field {
                    CoordinateField::Latitude => record.lat,
                    CoordinateField::Longitude => record.lon,
                };
                ProcessingError::OutOfRange {
                    value,
                    context: context(field),
                }
            })?;
        }

        Ok(RowOutcome::Record(record))
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default abort-on-first-error policy
pub fn extract<D: TabularDocument + ?Sized>(document: &D) -> Result<Vec<CoordinateRecord>> {
    RecordExtractor::new().extract(document)
}
