//! Flat CSV import/export for surveys and position logs
//!
//! Reading is column-name addressed: the header row must name `md`, `inc`
//! and `azi` columns (case-insensitive, in any order, with a few common
//! aliases). Extra columns are ignored and blank lines skipped. Cells may be
//! quoted; a doubled quote inside quotes is a literal quote.
//!
//! Files are unit-unaware. Convert with `LengthUnit` before or after.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::checks::ValidationError;
use crate::types::{PositionLog, Survey};

/// Default number of decimals written per value.
pub const DEFAULT_PRECISION: usize = 3;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV input is empty (no header row)")]
    Empty,

    #[error("missing '{column}' column in header: {header}")]
    MissingColumn { column: &'static str, header: String },

    #[error("line {line}: cannot parse {column} value '{value}' as a number")]
    Parse {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: expected at least {expected} fields, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid survey: {0}")]
    Survey(#[from] ValidationError),
}

/// Output formatting for written CSV files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvFormat {
    pub delimiter: char,
    /// Decimals per value
    pub precision: usize,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: DEFAULT_PRECISION,
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Split a CSV line on `delimiter`, honouring double quotes.
fn csv_split(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Header positions of the survey columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    md: usize,
    inc: usize,
    azi: usize,
}

impl ColumnMap {
    fn from_header(header: &str, delimiter: char) -> Result<Self, CsvError> {
        let mut md = None;
        let mut inc = None;
        let mut azi = None;

        for (idx, col) in csv_split(header, delimiter).iter().enumerate() {
            let name = col.trim().trim_start_matches('#').trim().to_lowercase();
            match name.as_str() {
                "md" | "measured_depth" | "measured depth" | "dept" => {
                    md.get_or_insert(idx);
                }
                "inc" | "incl" | "inclination" => {
                    inc.get_or_insert(idx);
                }
                "azi" | "azim" | "azimuth" => {
                    azi.get_or_insert(idx);
                }
                _ => {}
            }
        }

        let missing = |column| CsvError::MissingColumn {
            column,
            header: header.to_string(),
        };
        Ok(Self {
            md: md.ok_or_else(|| missing("md"))?,
            inc: inc.ok_or_else(|| missing("inc"))?,
            azi: azi.ok_or_else(|| missing("azi"))?,
        })
    }

    fn width(&self) -> usize {
        self.md.max(self.inc).max(self.azi) + 1
    }
}

fn parse_cell(fields: &[String], idx: usize, column: &'static str, line: usize) -> Result<f64, CsvError> {
    let raw = fields[idx].trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CsvError::Parse {
            line,
            column,
            value: raw.to_string(),
        }),
    }
}

/// Read a survey from CSV text.
pub fn read_survey_csv(reader: impl BufRead, delimiter: char) -> Result<Survey, CsvError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(CsvError::Empty)??;
    let columns = ColumnMap::from_header(&header, delimiter)?;

    let mut md = Vec::new();
    let mut inc = Vec::new();
    let mut azi = Vec::new();

    for (i, line) in lines.enumerate() {
        let line = line?;
        let line_num = i + 2;
        if line.trim().is_empty() {
            continue;
        }

        let fields = csv_split(&line, delimiter);
        if fields.len() < columns.width() {
            return Err(CsvError::ShortRow {
                line: line_num,
                expected: columns.width(),
                found: fields.len(),
            });
        }

        md.push(parse_cell(&fields, columns.md, "md", line_num)?);
        inc.push(parse_cell(&fields, columns.inc, "inc", line_num)?);
        azi.push(parse_cell(&fields, columns.azi, "azi", line_num)?);
    }

    debug!(stations = md.len(), "Parsed survey CSV");
    Ok(Survey::new(md, inc, azi)?)
}

pub fn read_survey_csv_file(path: &Path, delimiter: char) -> Result<Survey, CsvError> {
    let file = File::open(path)?;
    let survey = read_survey_csv(BufReader::new(file), delimiter)?;
    info!(path = %path.display(), stations = survey.len(), "Loaded survey");
    Ok(survey)
}

// ============================================================================
// Writing
// ============================================================================

fn write_row(writer: &mut impl Write, values: &[f64], format: &CsvFormat) -> std::io::Result<()> {
    let mut line = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            line.push(format.delimiter);
        }
        line.push_str(&format!("{:.*}", format.precision, v));
    }
    writeln!(writer, "{}", line)
}

fn write_header(writer: &mut impl Write, names: &[&str], format: &CsvFormat) -> std::io::Result<()> {
    writeln!(writer, "{}", names.join(&format.delimiter.to_string()))
}

/// Write `md,inc,azi` rows.
pub fn write_survey_csv(mut writer: impl Write, survey: &Survey, format: &CsvFormat) -> Result<(), CsvError> {
    write_header(&mut writer, &["md", "inc", "azi"], format)?;
    for s in survey.stations() {
        write_row(&mut writer, &[s.md, s.inc, s.azi], format)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `md,depth,northing,easting` rows, plus `dls` for minimum curvature
/// logs. `md` is the resampled md when the log was resampled.
pub fn write_position_csv(mut writer: impl Write, log: &PositionLog, format: &CsvFormat) -> Result<(), CsvError> {
    let md = log.md();
    match log.dls() {
        Some(dls) => {
            write_header(&mut writer, &["md", "depth", "northing", "easting", "dls"], format)?;
            for i in 0..log.len() {
                write_row(
                    &mut writer,
                    &[md[i], log.depth()[i], log.northing()[i], log.easting()[i], dls[i]],
                    format,
                )?;
            }
        }
        None => {
            write_header(&mut writer, &["md", "depth", "northing", "easting"], format)?;
            for i in 0..log.len() {
                write_row(
                    &mut writer,
                    &[md[i], log.depth()[i], log.northing()[i], log.easting()[i]],
                    format,
                )?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_survey_csv_file(path: &Path, survey: &Survey, format: &CsvFormat) -> Result<(), CsvError> {
    write_survey_csv(BufWriter::new(File::create(path)?), survey, format)?;
    info!(path = %path.display(), stations = survey.len(), "Wrote survey");
    Ok(())
}

pub fn write_position_csv_file(path: &Path, log: &PositionLog, format: &CsvFormat) -> Result<(), CsvError> {
    write_position_csv(BufWriter::new(File::create(path)?), log, format)?;
    info!(path = %path.display(), stations = log.len(), "Wrote position log");
    Ok(())
}
