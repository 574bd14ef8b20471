pub mod args;
pub mod commands;

pub use args::{Axis, Cli, Commands};
pub use commands::run;
