// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// SVY21 projection origin. These are the values that best reproduce the
// published test data, not the geodetic coordinates of the Base 7 fundamental
// point (1 22 02.9154 N, 103 49 31.9752 E).
pub(crate) const SVY21_ORIGIN_LAT: f64 = 1.366_666;
pub(crate) const SVY21_ORIGIN_LON: f64 = 103.833_333;
pub(crate) const SVY21_FALSE_NORTHING: f64 = 38_744.572;
pub(crate) const SVY21_FALSE_EASTING: f64 = 28_001.642;
// SVY21 central scale factor
pub(crate) const SVY21_K: f64 = 1.0;

/// Latitude range (degrees) over which the truncated series are validated.
pub(crate) const WORKING_LAT: (f64, f64) = (1.0, 1.6);
/// Longitude range (degrees) over which the truncated series are validated.
pub(crate) const WORKING_LON: (f64, f64) = (103.6, 104.1);

/// Mean radius of Earth in meters
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius>
pub(crate) const EARTH_MEAN_RADIUS_M: f64 = 6371.0088 * 1000.0;
