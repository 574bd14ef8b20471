use crate::cli::args::{Axis, Cli, Commands};
use crate::config::{parse_delimiter, Settings};
use crate::error::{CoordinateField, Result};
use crate::processors::RecordExtractor;
use crate::readers::load_document;
use crate::utils::coordinates::{decimal_to_dms, dms_to_decimal, validate_coordinate_range};
use crate::writers::RecordWriter;
use std::io::Write;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet);

    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            on_error,
            validate_ranges,
            skip_header,
            delimiter,
            encoding,
            summary,
        } => {
            // CLI flags override file and environment settings
            if let Some(format) = format {
                settings.output_format = format;
            }
            if let Some(policy) = on_error {
                settings.error_policy = policy;
            }
            settings.validate_ranges |= validate_ranges;
            settings.skip_header |= skip_header;
            if let Some(delimiter) = delimiter {
                parse_delimiter(&delimiter)?;
                settings.csv_delimiter = Some(delimiter);
            }
            if encoding.is_some() {
                settings.csv_encoding = encoding;
            }

            info!("Reading {}", input.display());
            let document = load_document(&input, &settings.reader_options()?)?;

            let extractor = RecordExtractor::new()
                .with_error_policy(settings.error_policy)
                .with_range_validation(settings.validate_ranges)
                .with_header_skip(settings.skip_header);

            let report = extractor.extract_report(&document)?;

            if summary {
                eprintln!("{}", report.generate_summary());
            } else if !report.is_clean() {
                eprintln!(
                    "Skipped {} malformed rows (run with --summary for details)",
                    report.skipped.len()
                );
            }

            let writer = RecordWriter::new(settings.output_format);
            match output {
                Some(path) => writer.write_to_path(&report.records, &path)?,
                None => writer.write_records(&report.records, std::io::stdout().lock())?,
            }
        }

        Commands::Parse { values, axis } => {
            let mut stdout = std::io::stdout().lock();

            for value in values {
                let decimal = dms_to_decimal(&value)?;
                match axis {
                    Some(axis) => {
                        let field = match axis {
                            Axis::Lat => CoordinateField::Latitude,
                            Axis::Lon => CoordinateField::Longitude,
                        };
                        validate_coordinate_range(decimal, field)?;
                        writeln!(
                            stdout,
                            "{}\t{}\t{}",
                            value,
                            decimal,
                            decimal_to_dms(decimal, field)
                        )?;
                    }
                    None => writeln!(stdout, "{}\t{}", value, decimal)?,
                }
            }
        }
    }

    Ok(())
}

/// Set up stderr logging; `RUST_LOG` overrides the flag-derived level
pub fn setup_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("release_points={}", log_level)));

    // try_init: a subscriber may already be installed when run() is called twice in-process
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .is_ok();

    if installed {
        debug!("Logging initialized at level: {}", log_level);
    }
}
