pub mod record_writer;

pub use record_writer::{OutputFormat, RecordWriter};
