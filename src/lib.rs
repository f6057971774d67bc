#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! Conversion between WGS84 latitude/longitude and the Singapore SVY21
//! transverse Mercator grid.
//!
//! ```
//! use svy21::{LatLon, Svy21};
//!
//! let coord = Svy21::create(39105.269, 30629.967).unwrap();
//! let latlon = coord.to_latlon().unwrap();
//!
//! assert!((latlon.latitude() - 1.369_927_897_773_748_8).abs() < 1e-9);
//! assert!((latlon.longitude() - 103.856_950_349_764_67).abs() < 1e-9);
//!
//! let back = latlon.to_svy21().unwrap();
//! assert!((back.northing() - 39105.269).abs() < 1e-3);
//! assert!((back.easting() - 30629.967).abs() < 1e-3);
//! ```

use thiserror::Error;

pub mod batch;
pub mod ellipsoid;
pub mod io;
pub mod latlon;
pub mod svy21;

pub mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;
pub(crate) mod utility;

pub use ellipsoid::{Ellipsoid, MeridianSeries};
pub use io::{ConversionSummary, Direction};
pub use latlon::LatLon;
pub use projections::transverse_mercator::{ProjectionParams, TransverseMercator};
pub use svy21::Svy21;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Coordinate outside of projectable domain: {0}")]
    Domain(String),
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("Row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ParseCoord {
    /// Parses a coordinate from text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if the text does not describe a valid
    /// coordinate of this type.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any [`ParseCoord`] type from a string.
///
/// # Errors
///
/// Propagates the error of the target type's [`ParseCoord`] implementation.
///
/// # Usage
///
/// ```
/// use svy21::{LatLon, Svy21};
///
/// let latlon: LatLon = svy21::from_str("1.366666N, 103.833333E").unwrap();
/// assert_eq!(latlon.latitude(), 1.366666);
///
/// let grid: Svy21 = svy21::from_str("38744.572 28001.642").unwrap();
/// assert_eq!(grid.easting(), 28001.642);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

/// Splits a coordinate pair on whitespace and/or a single comma.
pub(crate) fn split_pair(value: &str) -> Result<(&str, &str), Error> {
    let mut pieces = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|piece| !piece.is_empty());

    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(Error::InvalidCoord(format!("Expected two values, found \"{value}\"."))),
    }
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }
}
