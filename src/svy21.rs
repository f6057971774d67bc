use std::{fmt::Display, str::FromStr};

use crate::{
    latlon::LatLon,
    projections::transverse_mercator::TransverseMercator,
    split_pair,
    utility::dms,
    Error, ParseCoord,
};

/// Representation of an SVY21 grid point: northing and easting in meters.
///
/// Values are only meaningful within a few hundred kilometers of the grid
/// origin; see [`Svy21::in_working_region`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Svy21 {
    #[cfg_attr(feature = "serde", serde(alias = "n", alias = "y"))]
    pub(crate) northing: f64,
    #[cfg_attr(feature = "serde", serde(alias = "e", alias = "x"))]
    pub(crate) easting: f64,
}

impl Svy21 {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(northing: f64, easting: f64) -> Svy21 {
        Self {
            northing,
            easting,
        }
    }

    /// Tries to create an SVY21 point from its northing and easting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoord`] if either value is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::Svy21;
    ///
    /// let coord = Svy21::create(39105.269, 30629.967);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.northing(), 39105.269);
    /// assert_eq!(coord.easting(), 30629.967);
    ///
    /// assert!(Svy21::create(f64::INFINITY, 30629.967).is_err());
    /// ```
    pub fn create(northing: f64, easting: f64) -> Result<Svy21, Error> {
        if !northing.is_finite() {
            Err(Error::InvalidCoord(format!("Northing {northing} is not finite.")))
        } else if !easting.is_finite() {
            Err(Error::InvalidCoord(format!("Easting {easting} is not finite.")))
        } else {
            Ok(Svy21::new(northing, easting))
        }
    }

    /// Returns the SVY21 northing.
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Returns the SVY21 easting.
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns whether the point maps back into the working region of the
    /// projection. See [`LatLon::in_working_region`].
    pub fn in_working_region(&self) -> bool {
        self.to_latlon().is_ok_and(|latlon| latlon.in_working_region())
    }

    /// Converts from [`LatLon`] to [`Svy21`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the latitude cannot be projected.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::{LatLon, Svy21};
    ///
    /// let coord = LatLon::create(1.4520670518379692, 103.83080332777138).unwrap();
    ///
    /// let converted = Svy21::from_latlon(&coord).unwrap();
    ///
    /// assert!((converted.northing() - 48187.789).abs() < 1e-3);
    /// assert!((converted.easting() - 27720.130).abs() < 1e-3);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<Svy21, Error> {
        value.project_with(TransverseMercator::svy21())
    }

    /// Converts from [`Svy21`] to [`LatLon`] with the shared SVY21 projection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the point is so far from the grid origin
    /// that the series give a latitude outside `(-90, 90)`.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::Svy21;
    ///
    /// let coord = Svy21::create(48187.789, 27720.130).unwrap();
    ///
    /// let converted = coord.to_latlon().unwrap();
    ///
    /// // Check if the converted coordinate matches the reference to 9 decimals
    /// assert!((converted.latitude() - 1.4520670518379692).abs() < 1e-9);
    /// assert!((converted.longitude() - 103.83080332777138).abs() < 1e-9);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.unproject_with(TransverseMercator::svy21())
    }

    /// Inverse-projects with a caller-supplied projection.
    ///
    /// # Errors
    ///
    /// Same as [`Svy21::to_latlon`].
    pub fn unproject_with(&self, projection: &TransverseMercator) -> Result<LatLon, Error> {
        let (lat, lon) = projection.inverse(self.northing, self.easting);
        if !(lat.abs() < f64::from(dms::QD)) || !lon.is_finite() {
            return Err(Error::Domain(format!(
                "Northing {} easting {} maps to latitude {lat}, outside of range (-90, 90).",
                self.northing, self.easting,
            )));
        }

        Ok(LatLon::new(lat, lon))
    }
}

fn parse_component(piece: &str) -> Result<f64, Error> {
    piece
        .parse()
        .map_err(|_| Error::InvalidCoord(format!("Cannot parse \"{piece}\" as a number.")))
}

impl ParseCoord for Svy21 {
    /// Parses `"<northing> <easting>"` (space and/or comma separated).
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let (northing, easting) = split_pair(value)?;
        Svy21::create(parse_component(northing)?, parse_component(easting)?)
    }
}

impl FromStr for Svy21 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Svy21::parse_coord(s)
    }
}

impl Display for Svy21 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing);
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting);
        write!(
            f,
            "{northing} {easting}",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let coord: Svy21 = "38744.572, 28001.642".parse().unwrap();
        assert_eq!(coord, Svy21::new(38744.572, 28001.642));
        assert!("38744.572".parse::<Svy21>().is_err());
        assert!("38744.572 east".parse::<Svy21>().is_err());
        assert!("NaN 28001.642".parse::<Svy21>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Svy21::new(38744.572, 28001.642).to_string(), "38744.572 28001.642");
        assert_eq!(Svy21::new(-1.0, 0.0).to_string(), "-1.0 0.0");
    }

    #[test]
    fn working_region() {
        assert!(Svy21::new(38744.572, 28001.642).in_working_region());
        assert!(!Svy21::new(500_000., 28001.642).in_working_region());
        assert!(!Svy21::new(1e8, 28001.642).in_working_region());
    }

    #[test]
    fn far_northings_do_not_produce_invalid_latlon() {
        for northing in [1e7, 1e8, -1e8] {
            let coord = Svy21::new(northing, 28001.642);
            assert!(matches!(coord.to_latlon(), Err(Error::Domain(_))), "northing {northing}");
        }

        // Anything that does convert keeps the LatLon invariants
        let latlon = Svy21::new(2e6, 28001.642).to_latlon().unwrap();
        assert!(latlon.latitude().abs() < 90.);
        assert_eq!(latlon.to_string().parse::<LatLon>().unwrap(), latlon);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names_and_aliases() {
        let coord = Svy21::new(38744.572, 28001.642);
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"northing":38744.572,"easting":28001.642}"#);
        assert_eq!(serde_json::from_str::<Svy21>(&json).unwrap(), coord);

        for text in [r#"{"n":38744.572,"e":28001.642}"#, r#"{"y":38744.572,"x":28001.642}"#] {
            assert_eq!(serde_json::from_str::<Svy21>(text).unwrap(), coord, "{text}");
        }
    }
}
