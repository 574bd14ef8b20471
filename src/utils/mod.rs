pub mod constants;
pub mod coordinates;
pub mod glyphs;

pub use constants::*;
pub use coordinates::{
    decimal_to_dms, dms_to_decimal, parse_components, validate_coordinate_range, DmsComponents,
    Hemisphere,
};
pub use glyphs::{normalize_glyphs, Separator};
