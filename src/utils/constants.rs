/// Degree separator glyphs: degree sign and masculine ordinal indicator.
pub const DEGREE_GLYPHS: &[char] = &['\u{00B0}', '\u{00BA}'];

/// Minute separator glyphs: prime, ASCII apostrophe, right single quote.
pub const MINUTE_GLYPHS: &[char] = &['\u{2032}', '\'', '\u{2019}'];

/// Second separator glyphs: double prime, ASCII quote, right double quote.
pub const SECOND_GLYPHS: &[char] = &['\u{2033}', '"', '\u{201D}'];

/// Canonical tokens the glyph variants normalize to
pub const CANONICAL_DEGREE: char = '\u{00B0}';
pub const CANONICAL_MINUTE: char = '\'';
pub const CANONICAL_SECOND: char = '"';

/// Rows need a name, a latitude and a longitude cell
pub const MIN_RECORD_CELLS: usize = 3;
pub const NAME_CELL: usize = 0;
pub const LATITUDE_CELL: usize = 1;
pub const LONGITUDE_CELL: usize = 2;

/// Geographic bounds
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Configuration
pub const CONFIG_ENV_PREFIX: &str = "RELEASE_POINTS";
pub const DEFAULT_CONFIG_FILE: &str = "release-points.toml";

/// Document entry holding the body of a WordprocessingML package
pub const DOCX_BODY_ENTRY: &str = "word/document.xml";
