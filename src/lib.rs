pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
pub use models::{CoordinateRecord, Document, Table, TableRow, TabularDocument};
pub use processors::{extract, ErrorPolicy, ExtractionReport, RecordExtractor};
pub use utils::coordinates::dms_to_decimal as parse;
