//! wellpath - wellbore trajectory command-line tool
//!
//! # Usage
//!
//! ```bash
//! # Minimum curvature positions at the wellhead, depths below sea level
//! wellpath --header header.json position --survey survey.csv --wellhead --tvdss
//!
//! # Positions every 10 m along the arcs
//! wellpath resample --survey survey.csv --step 10 --output resampled.csv
//!
//! # Survey in feet to metres
//! wellpath convert --survey survey_ft.csv --from ft --to m
//! ```
//!
//! # Environment Variables
//!
//! - `WELLPATH_CONFIG`: Path to a TOML config file (default: ./wellpath.toml)
//! - `WELLPATH_HEADER`: Path to a JSON well header, same as `--header`
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use wellpath::config::WellpathConfig;
use wellpath::csv_io::{self, CsvFormat};
use wellpath::interpolate::interpolate_deviation;
use wellpath::trajectory::{minimum_curvature, radius_of_curvature, tangential};
use wellpath::types::{LengthUnit, PositionLog, Survey, TangentialMethod, WellHeader};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellpath")]
#[command(about = "Wellbore trajectory computation from directional surveys")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides WELLPATH_CONFIG and ./wellpath.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a JSON well header (datum, units, elevation, surface location)
    #[arg(long, global = true, env = "WELLPATH_HEADER")]
    header: Option<PathBuf>,

    /// Field separator of input survey files
    #[arg(long, global = true, default_value = ",")]
    input_delimiter: char,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Compute a position log from a survey
    Position {
        /// Survey CSV with md, inc, azi columns
        #[arg(long)]
        survey: PathBuf,
        /// Position method
        #[arg(long, value_enum, default_value_t = MethodArg::Mincurve)]
        method: MethodArg,
        /// Dogleg severity normalisation length (minimum curvature only)
        #[arg(long)]
        course_length: Option<f64>,
        /// Shift northing and easting to the header's surface location
        #[arg(long)]
        wellhead: bool,
        /// Report depth below sea level using the header's elevation
        #[arg(long)]
        tvdss: bool,
        /// Output CSV (stdout when absent)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Minimum curvature positions at arbitrary measured depths
    Resample {
        #[arg(long)]
        survey: PathBuf,
        /// Regular md step (defaults to [resample] md_step)
        #[arg(long, conflicts_with = "depths")]
        step: Option<f64>,
        /// Explicit measured depths, comma separated
        #[arg(long, value_delimiter = ',')]
        depths: Option<Vec<f64>>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Rebuild a deviation survey from minimum curvature positions
    Deviation {
        #[arg(long)]
        survey: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Linearly interpolate inclination and azimuth onto a regular md step
    Interpolate {
        #[arg(long)]
        survey: PathBuf,
        /// Md step (defaults to [resample] md_step)
        #[arg(long)]
        step: Option<f64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Convert survey measured depths between length units
    Convert {
        #[arg(long)]
        survey: PathBuf,
        /// Unit of the input file (m or ft)
        #[arg(long)]
        from: LengthUnit,
        /// Unit to write (m or ft)
        #[arg(long)]
        to: LengthUnit,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Mincurve,
    Radius,
    High,
    Low,
    Average,
    Balanced,
}

// ============================================================================
// Context
// ============================================================================

/// Settings shared by every subcommand.
struct RunContext {
    config: WellpathConfig,
    header: Option<WellHeader>,
    input_delimiter: char,
}

impl RunContext {
    fn from_args(args: &CliArgs) -> Result<Self> {
        let config = match &args.config {
            Some(path) => WellpathConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => WellpathConfig::load(),
        };
        let header = args
            .header
            .as_deref()
            .map(|path| {
                WellHeader::from_json_file(path)
                    .with_context(|| format!("Failed to load well header {}", path.display()))
            })
            .transpose()?;

        Ok(Self {
            config,
            header,
            input_delimiter: args.input_delimiter,
        })
    }

    /// Header units win over config units; the header describes the well.
    fn units(&self) -> LengthUnit {
        self.header
            .as_ref()
            .map_or(self.config.survey.units, |h| h.units)
    }

    fn course_length(&self, cli: Option<f64>) -> f64 {
        cli.or(self.config.survey.course_length)
            .unwrap_or_else(|| self.units().default_course_length())
    }

    fn require_header(&self, flag: &str) -> Result<&WellHeader> {
        match &self.header {
            Some(header) => Ok(header),
            None => bail!("{flag} needs a well header (--header <json>)"),
        }
    }

    fn read_survey(&self, path: &Path) -> Result<Survey> {
        csv_io::read_survey_csv_file(path, self.input_delimiter)
            .with_context(|| format!("Failed to read survey {}", path.display()))
    }

    fn format(&self) -> CsvFormat {
        self.config.csv_format()
    }
}

// ============================================================================
// Output
// ============================================================================

fn emit_positions(log: &PositionLog, output: Option<&Path>, format: &CsvFormat) -> Result<()> {
    match output {
        Some(path) => {
            csv_io::write_position_csv_file(path, log, format)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            csv_io::write_position_csv(&mut stdout, log, format)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn emit_survey(survey: &Survey, output: Option<&Path>, format: &CsvFormat) -> Result<()> {
    match output {
        Some(path) => {
            csv_io::write_survey_csv_file(path, survey, format)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            csv_io::write_survey_csv(&mut stdout, survey, format)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

// ============================================================================
// Subcommands
// ============================================================================

fn run(ctx: &RunContext, command: SubCommand) -> Result<()> {
    match command {
        SubCommand::Position {
            survey,
            method,
            course_length,
            wellhead,
            tvdss,
            output,
        } => {
            let survey = ctx.read_survey(&survey)?;
            let mut log = match method {
                MethodArg::Mincurve => minimum_curvature(survey, ctx.course_length(course_length))?,
                MethodArg::Radius => radius_of_curvature(survey)?,
                MethodArg::High => tangential(survey, TangentialMethod::High)?,
                MethodArg::Low => tangential(survey, TangentialMethod::Low)?,
                MethodArg::Average => tangential(survey, TangentialMethod::Average)?,
                MethodArg::Balanced => tangential(survey, TangentialMethod::Balanced)?,
            };
            if wellhead {
                let header = ctx.require_header("--wellhead")?;
                log.shift_to_wellhead_in_place(header.surface_northing, header.surface_easting);
            }
            if tvdss {
                let header = ctx.require_header("--tvdss")?;
                log = log.to_tvdss(header.elevation);
            }
            emit_positions(&log, output.as_deref(), &ctx.format())
        }

        SubCommand::Resample {
            survey,
            step,
            depths,
            output,
        } => {
            let survey = ctx.read_survey(&survey)?;
            let log = minimum_curvature(survey, ctx.course_length(None))?;
            let resampled = match depths {
                Some(depths) => log.resample(&depths)?,
                None => log.resample_every(step.unwrap_or(ctx.config.resample.md_step))?,
            };
            emit_positions(&resampled, output.as_deref(), &ctx.format())
        }

        SubCommand::Deviation { survey, output } => {
            let survey = ctx.read_survey(&survey)?;
            let log = minimum_curvature(survey, ctx.course_length(None))?;
            let rebuilt = log.deviation()?;
            emit_survey(&rebuilt, output.as_deref(), &ctx.format())
        }

        SubCommand::Interpolate {
            survey,
            step,
            output,
        } => {
            let survey = ctx.read_survey(&survey)?;
            let interpolated =
                interpolate_deviation(&survey, step.unwrap_or(ctx.config.resample.md_step))?;
            emit_survey(&interpolated, output.as_deref(), &ctx.format())
        }

        SubCommand::Convert {
            survey,
            from,
            to,
            output,
        } => {
            let survey = ctx.read_survey(&survey)?;
            let converted = survey.with_scaled_md(from.convert(1.0, to))?;
            info!(%from, %to, "Converted survey units");
            emit_survey(&converted, output.as_deref(), &ctx.format())
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let ctx = RunContext::from_args(&args)?;
    run(&ctx, args.command)
}
