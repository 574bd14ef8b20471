use crate::error::{CoordinateField, Result};
use crate::models::CoordinateRecord;
use crate::utils::coordinates::decimal_to_dms;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array of {name, lat, lon}
    #[default]
    Json,
    /// CSV with a name,lat,lon header
    Csv,
    /// Aligned table with decimal and DMS columns
    Text,
}

pub struct RecordWriter {
    format: OutputFormat,
}

impl RecordWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_records<W: Write>(&self, records: &[CoordinateRecord], mut out: W) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, records)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(&mut out);
                if records.is_empty() {
                    writer.write_record(["name", "lat", "lon"])?;
                }
                for record in records {
                    writer.serialize(record)?;
                }
                writer.flush()?;
            }
            OutputFormat::Text => {
                let width = records
                    .iter()
                    .map(|r| r.name.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(4);

                for (i, record) in records.iter().enumerate() {
                    let padding = width - record.name.chars().count();
                    writeln!(
                        out,
                        "{:>3}. {}{} {:>11.6} {:>11.6}  {} {}",
                        i + 1,
                        record.name,
                        " ".repeat(padding),
                        record.lat,
                        record.lon,
                        decimal_to_dms(record.lat, CoordinateField::Latitude),
                        decimal_to_dms(record.lon, CoordinateField::Longitude)
                    )?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, records: &[CoordinateRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_records(records, BufWriter::new(file))?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}
