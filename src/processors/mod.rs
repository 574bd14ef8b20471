pub mod record_extractor;

pub use record_extractor::{extract, ErrorPolicy, ExtractionReport, RecordExtractor};
