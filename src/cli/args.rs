use crate::processors::ErrorPolicy;
use crate::writers::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "release-points")]
#[command(about = "Extract release-point coordinates from tabular documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: ./release-points.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract named coordinates from a .docx or CSV/TSV document
    Extract {
        #[arg(help = "Input document (.docx, .csv, .tsv, .txt)")]
        input: PathBuf,

        #[arg(short, long, help = "Write records to a file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(long, value_enum, help = "What to do with rows whose coordinates do not parse")]
        on_error: Option<ErrorPolicy>,

        #[arg(long, help = "Reject coordinates outside [-90, 90] / [-180, 180]")]
        validate_ranges: bool,

        #[arg(long, help = "Skip a table's first row when it holds column titles")]
        skip_header: bool,

        #[arg(short, long, help = "Delimiter for CSV/TSV input (single character or 'tab')")]
        delimiter: Option<String>,

        #[arg(long, help = "Encoding label for CSV/TSV input, e.g. windows-1250")]
        encoding: Option<String>,

        #[arg(long, help = "Print an extraction summary to stderr")]
        summary: bool,
    },

    /// Convert DMS strings to decimal degrees
    Parse {
        #[arg(required = true, help = "Coordinates such as 52°14′30″N")]
        values: Vec<String>,

        #[arg(long, value_enum, help = "Check the value against this axis and print it back in DMS")]
        axis: Option<Axis>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Axis {
    Lat,
    Lon,
}
