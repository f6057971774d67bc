use std::{fmt::Display, str::FromStr};

use crate::{
    constants::{EARTH_MEAN_RADIUS_M, WORKING_LAT, WORKING_LON},
    projections::transverse_mercator::TransverseMercator,
    split_pair,
    svy21::Svy21,
    utility::dms,
    Error, ParseCoord, ThisOrThat,
};

/// Representation of a WGS84 Latitude/Longitude point in degrees. Can be
/// converted to/from [`Svy21`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid:
    /// * Latitude must be in range (-90, 90); the poles cannot be projected
    /// * Longitude must be finite; it is taken modulo 360 when projected
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::LatLon;
    ///
    /// let coord = LatLon::create(1.3699278977737488, 103.85695034976466);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 1.3699278977737488);
    /// assert_eq!(coord.longitude(), 103.85695034976466);
    ///
    /// let invalid_coord_lat = LatLon::create(90.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, f64::NAN);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        if !(lat.abs() < f64::from(dms::QD)) {
            Err(Error::InvalidCoord(format!("Latitude {lat} outside of valid range (-90, 90).")))
        } else if !lon.is_finite() {
            Err(Error::InvalidCoord(format!("Longitude {lon} is not finite.")))
        } else {
            Ok(LatLon::new(lat, lon))
        }
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.latitude.is_sign_positive()
    }

    /// Returns whether the point lies in the region where the SVY21 series
    /// are accurate to about a centimeter (latitude 1.0 to 1.6, longitude
    /// 103.6 to 104.1). Points outside still convert, with degraded accuracy.
    ///
    /// # Example
    ///
    /// ```
    /// use svy21::LatLon;
    ///
    /// assert!(LatLon::create(1.35, 103.82).unwrap().in_working_region());
    /// assert!(!LatLon::create(3.14, 101.69).unwrap().in_working_region());
    /// ```
    pub fn in_working_region(&self) -> bool {
        (WORKING_LAT.0..=WORKING_LAT.1).contains(&self.latitude)
            && (WORKING_LON.0..=WORKING_LON.1).contains(&self.longitude)
    }

    /// Returns the distance in meters between two [`LatLon`] points
    /// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    /// Uses the [mean radius of the Earth](https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius)
    /// in the calculation: `6371.0088`
    pub fn haversine(&self, other: &LatLon) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }

    /// Converts from [`Svy21`] to [`LatLon`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the point lies too far from the grid
    /// origin to give a valid latitude.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::{LatLon, Svy21};
    ///
    /// let coord = LatLon::create(1.3446255443241177, 103.72794378041792).unwrap();
    /// let coord_svy21 = Svy21::create(36307.704, 16272.970).unwrap();
    ///
    /// let converted = LatLon::from_svy21(&coord_svy21).unwrap();
    ///
    /// assert!((converted.latitude() - coord.latitude()).abs() < 1e-9);
    /// assert!((converted.longitude() - coord.longitude()).abs() < 1e-9);
    /// ```
    pub fn from_svy21(value: &Svy21) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Svy21`] with the shared SVY21 projection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the latitude cannot be projected. This
    /// only happens for values that bypassed [`LatLon::create`].
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::{LatLon, Svy21};
    ///
    /// let coord = LatLon::create(1.3446255443241177, 103.72794378041792).unwrap();
    ///
    /// let converted = coord.to_svy21().unwrap();
    ///
    /// // Check if the converted coordinate is accurate to 3 decimals (same as reference)
    /// assert!((converted.northing() - 36307.704).abs() < 1e-3);
    /// assert!((converted.easting() - 16272.970).abs() < 1e-3);
    /// ```
    pub fn to_svy21(&self) -> Result<Svy21, Error> {
        Svy21::from_latlon(self)
    }

    /// Projects with a caller-supplied projection instead of the shared SVY21 one.
    ///
    /// # Errors
    ///
    /// Same as [`TransverseMercator::forward`].
    pub fn project_with(&self, projection: &TransverseMercator) -> Result<Svy21, Error> {
        let (northing, easting) = projection.forward(self.latitude, self.longitude)?;
        Ok(Svy21::new(northing, easting))
    }
}

/// Parses a single signed value, with an optional trailing hemisphere letter.
fn parse_component(piece: &str, positive: char, negative: char) -> Result<f64, Error> {
    let upper = piece.to_ascii_uppercase();
    let (number, sign) = match upper.chars().last() {
        Some(c) if c == positive || c == negative => (&upper[..upper.len() - 1], (c == negative).ternary(-1., 1.)),
        _ => (upper.as_str(), 1.),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| Error::InvalidCoord(format!("Cannot parse \"{piece}\" as a number.")))?;

    if sign < 0. && value.is_sign_negative() {
        return Err(Error::InvalidCoord(format!("\"{piece}\" has both a sign and a hemisphere.")));
    }

    Ok(sign * value)
}

impl ParseCoord for LatLon {
    /// Parses `"<lat> <lon>"` (space and/or comma separated). Each value may
    /// carry a hemisphere suffix: `N`/`S` for latitude, `E`/`W` for longitude.
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let (lat, lon) = split_pair(value)?;
        LatLon::create(
            parse_component(lat, 'N', 'S')?,
            parse_component(lon, 'E', 'W')?,
        )
    }
}

impl FromStr for LatLon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LatLon::parse_coord(s)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_hemisphere_forms() {
        let plain: LatLon = "1.3699 103.8569".parse().unwrap();
        assert_eq!(plain, LatLon::new(1.3699, 103.8569));

        let comma: LatLon = "1.3699,103.8569".parse().unwrap();
        assert_eq!(comma, plain);

        let suffixed: LatLon = "1.3699N, 103.8569e".parse().unwrap();
        assert_eq!(suffixed, plain);

        let south_west: LatLon = "33.86S 151.2W".parse().unwrap();
        assert_eq!(south_west, LatLon::new(-33.86, -151.2));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "1.3", "1.3 103.8 5", "abc 103.8", "1.3E 103.8", "-1.3S 103.8", "95 103.8"] {
            assert!(text.parse::<LatLon>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn display_round_trips() {
        let coord = LatLon::new(1.369_927_897_773_748_8, 103.856_950_349_764_67);
        assert_eq!(coord.to_string(), "1.3699278977737488 103.85695034976467");
        assert_eq!(coord.to_string().parse::<LatLon>().unwrap(), coord);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = LatLon::new(1.366_666, 103.833_333);
        let b = LatLon::new(1.452_067, 103.830_803);
        assert_eq!(a.haversine(&a), 0.);
        assert!((a.haversine(&b) - b.haversine(&a)).abs() < 1e-9);
        // About 9.5 km north
        assert!((a.haversine(&b) - 9_500.).abs() < 100.);
    }

    #[test]
    fn hemisphere() {
        assert!(LatLon::new(1.3699, 103.8569).is_north());
        assert!(LatLon::new(0., 103.8569).is_north());
        assert!(!LatLon::new(-33.86, 151.2).is_north());
        assert!(!"33.86S 151.2E".parse::<LatLon>().unwrap().is_north());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names_and_aliases() {
        let coord = LatLon::new(1.366_666, 103.833_333);
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"latitude":1.366666,"longitude":103.833333}"#);
        assert_eq!(serde_json::from_str::<LatLon>(&json).unwrap(), coord);

        let short: LatLon = serde_json::from_str(r#"{"lat":1.366666,"lon":103.833333}"#).unwrap();
        assert_eq!(short, coord);
    }
}
