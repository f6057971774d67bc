//! Two-column CSV table conversion.
//!
//! Input tables have a header row followed by rows whose first column is the
//! "Y" value (northing or latitude) and whose second column is the "X" value
//! (easting or longitude). Output tables have a `Y,X` header and one
//! converted row per input row.

use std::{
    fs::{File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::{debug, warn};

use crate::{latlon::LatLon, projections::transverse_mercator::TransverseMercator, svy21::Svy21, Error};

const OUTPUT_HEADER: [&str; 2] = ["Y", "X"];

/// Which way a table is converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// SVY21 northing/easting to latitude/longitude
    ToLatLon,
    /// Latitude/longitude to SVY21 northing/easting
    ToSvy21,
}

/// Counts reported after converting a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Number of data rows converted
    pub rows: usize,
    /// Rows whose geographic position lies outside the working region
    pub outside_working_region: usize,
}

fn parse_field(record: &csv::StringRecord, idx: usize) -> Result<f64, Error> {
    let field = record
        .get(idx)
        .ok_or_else(|| Error::InvalidCoord(format!("Missing column {}.", idx + 1)))?;

    field
        .parse()
        .map_err(|_| Error::InvalidCoord(format!("Cannot parse \"{field}\" as a number.")))
}

/// Converts one input row to `(y, x, in_working_region)`.
fn convert_record(
    record: &csv::StringRecord,
    direction: Direction,
    projection: &TransverseMercator,
) -> Result<(f64, f64, bool), Error> {
    let y = parse_field(record, 0)?;
    let x = parse_field(record, 1)?;

    match direction {
        Direction::ToLatLon => {
            let latlon = Svy21::create(y, x)?.unproject_with(projection)?;
            Ok((latlon.latitude(), latlon.longitude(), latlon.in_working_region()))
        }
        Direction::ToSvy21 => {
            let latlon = LatLon::create(y, x)?;
            let svy21 = latlon.project_with(projection)?;
            Ok((svy21.northing(), svy21.easting(), latlon.in_working_region()))
        }
    }
}

/// Streams a CSV table from `reader` to `writer`, converting each row.
///
/// # Errors
///
/// Returns [`Error::Row`] with the 1-based data-row number when a row is
/// malformed or cannot be converted, and [`Error::Csv`] for CSV or I/O
/// failures.
///
/// # Usage
///
/// ```
/// use svy21::{io::convert_csv, Direction, TransverseMercator};
///
/// let input = "y_coord,x_coord\n38744.572,28001.642\n";
/// let mut output = Vec::new();
///
/// let summary = convert_csv(
///     input.as_bytes(),
///     &mut output,
///     Direction::ToLatLon,
///     TransverseMercator::svy21(),
///     true,
/// ).unwrap();
///
/// assert_eq!(summary.rows, 1);
/// assert!(String::from_utf8(output).unwrap().starts_with("Y,X\n1.36666"));
/// ```
pub fn convert_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    direction: Direction,
    projection: &TransverseMercator,
    write_header: bool,
) -> Result<ConversionSummary, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut writer = csv::Writer::from_writer(writer);

    if write_header {
        writer.write_record(OUTPUT_HEADER)?;
    }

    let mut summary = ConversionSummary::default();
    let mut y_buf = ryu::Buffer::new();
    let mut x_buf = ryu::Buffer::new();

    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let (y, x, inside) = record
            .map_err(Error::from)
            .and_then(|record| convert_record(&record, direction, projection))
            .map_err(|source| Error::Row { row, source: Box::new(source) })?;

        writer.write_record([y_buf.format(y), x_buf.format(x)])?;

        summary.rows += 1;
        if !inside {
            summary.outside_working_region += 1;
        }
    }

    writer.flush()?;

    Ok(summary)
}

/// Returns the final byte of the file at `path`, or `None` if the file is
/// missing or empty.
fn last_byte(path: &Path) -> Result<Option<u8>, Error> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    if file.metadata()?.len() == 0 {
        return Ok(None);
    }

    let mut last = [0_u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;

    Ok(Some(last[0]))
}

/// Converts the CSV file at `input` into `output`.
///
/// The whole table is converted in memory first, and `output` is only
/// touched once every row has converted, so a bad row leaves it as it was.
/// With `append` the rows are added to the end of an existing file (after a
/// line break if the file lacks a trailing one) and the header is only
/// written if the file is missing or empty; otherwise the file is truncated.
///
/// # Errors
///
/// Returns [`Error::Io`] if either file cannot be opened, and otherwise the
/// errors of [`convert_csv`].
pub fn convert_csv_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    direction: Direction,
    append: bool,
) -> Result<ConversionSummary, Error> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let reader = File::open(input)?;
    let tail = if append { last_byte(output)? } else { None };

    debug!(
        "Converting {} -> {} ({direction:?}, append: {append})",
        input.display(),
        output.display(),
    );

    let mut converted = Vec::new();
    if tail.is_some_and(|byte| byte != b'\n') {
        converted.push(b'\n');
    }
    let summary = convert_csv(reader, &mut converted, direction, TransverseMercator::svy21(), tail.is_none())?;

    let mut writer = if append {
        OpenOptions::new().create(true).append(true).open(output)?
    } else {
        File::create(output)?
    };
    writer.write_all(&converted)?;
    writer.flush()?;

    debug!("Converted {} rows from {}", summary.rows, input.display());
    if summary.outside_working_region > 0 {
        warn!(
            "{} of {} rows in {} lie outside the SVY21 working region; accuracy is degraded",
            summary.outside_working_region,
            summary.rows,
            input.display(),
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, direction: Direction) -> Result<(String, ConversionSummary), Error> {
        let mut output = Vec::new();
        let summary = convert_csv(input.as_bytes(), &mut output, direction, TransverseMercator::svy21(), true)?;
        Ok((String::from_utf8(output).unwrap(), summary))
    }

    #[test]
    fn header_only_input() {
        let (output, summary) = run("y_coord,x_coord\n", Direction::ToLatLon).unwrap();
        assert_eq!(output, "Y,X\n");
        assert_eq!(summary, ConversionSummary::default());
    }

    #[test]
    fn to_svy21_rows() {
        let (output, summary) = run("lat,lon,name\n 1.366666 , 103.833333 ,origin\n", Direction::ToSvy21).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Y,X"));

        let coord: Svy21 = lines.next().unwrap().parse().unwrap();
        assert!((coord.northing() - 38744.572).abs() < 1e-3);
        assert!((coord.easting() - 28001.642).abs() < 1e-3);
        assert_eq!(lines.next(), None);
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn counts_rows_outside_working_region() {
        let input = "y,x\n38744.572,28001.642\n600000,28001.642\n";
        let (_, summary) = run(input, Direction::ToLatLon).unwrap();
        assert_eq!(summary, ConversionSummary { rows: 2, outside_working_region: 1 });
    }

    #[test]
    fn reports_bad_row_number() {
        let input = "y,x\n38744.572,28001.642\n39105.269,oops\n";
        match run(input, Direction::ToLatLon) {
            Err(Error::Row { row, source }) => {
                assert_eq!(row, 2);
                assert!(matches!(*source, Error::InvalidCoord(_)));
            }
            other => panic!("expected row error, got {other:?}"),
        }

        match run("lat,lon\n1.3\n", Direction::ToSvy21) {
            Err(Error::Row { row: 1, .. }) => {}
            other => panic!("expected row error, got {other:?}"),
        }

        match run("lat,lon\n90,103.8\n", Direction::ToSvy21) {
            Err(Error::Row { row: 1, source }) => assert!(matches!(*source, Error::InvalidCoord(_))),
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn far_northing_is_a_row_error() {
        let input = "y,x\n38744.572,28001.642\n10000000,28001.642\n";
        match run(input, Direction::ToLatLon) {
            Err(Error::Row { row: 2, source }) => assert!(matches!(*source, Error::Domain(_))),
            other => panic!("expected row error, got {other:?}"),
        }
    }
}
