pub mod record;
pub mod table;

pub use record::CoordinateRecord;
pub use table::{Document, Table, TableRow, TabularDocument};
