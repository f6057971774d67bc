use std::f64::consts::PI;

use lazy_static::lazy_static;

use crate::{
    constants::{SVY21_FALSE_EASTING, SVY21_FALSE_NORTHING, SVY21_K, SVY21_ORIGIN_LAT, SVY21_ORIGIN_LON},
    ellipsoid::Ellipsoid,
    utility::{dms, GeoMath},
    Error,
};

lazy_static! {
    static ref SVY21: TransverseMercator = TransverseMercator::from_parts(Ellipsoid::wgs84(), ProjectionParams::SVY21);
}

/// Definition of a transverse Mercator grid: origin, false offsets and
/// central scale factor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionParams {
    /// Origin latitude in degrees
    pub origin_lat: f64,
    /// Origin (central meridian) longitude in degrees
    pub origin_lon: f64,
    /// False northing in meters
    pub false_northing: f64,
    /// False easting in meters
    pub false_easting: f64,
    /// Central scale factor
    pub k: f64,
}

impl ProjectionParams {
    /// The SVY21 grid.
    pub const SVY21: ProjectionParams = ProjectionParams {
        origin_lat: SVY21_ORIGIN_LAT,
        origin_lon: SVY21_ORIGIN_LON,
        false_northing: SVY21_FALSE_NORTHING,
        false_easting: SVY21_FALSE_EASTING,
        k: SVY21_K,
    };

    fn check(&self) -> Result<(), Error> {
        let finite = [self.origin_lat, self.origin_lon, self.false_northing, self.false_easting, self.k]
            .iter()
            .all(|value| value.is_finite());

        if !finite {
            Err(Error::InvalidParameter(format!("Projection parameters must be finite: {self:?}")))
        } else if self.k <= 0. {
            Err(Error::InvalidParameter(format!("Scale factor {} must be positive.", self.k)))
        } else if self.origin_lat.abs() >= f64::from(dms::QD) {
            Err(Error::InvalidParameter(format!(
                "Origin latitude {} outside of valid range (-90, 90).",
                self.origin_lat
            )))
        } else {
            Ok(())
        }
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        ProjectionParams::SVY21
    }
}

/// Series transverse Mercator projection: the forward transform truncated at
/// eighth order in longitude difference, the inverse expanded about the
/// footpoint latitude.
///
/// Immutable after construction, so a single instance can be shared freely
/// across threads.
#[derive(Clone, Debug)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    params: ProjectionParams,
    // Meridian distance of the origin
    m0: f64,
    // Meridian arc inversion constant, meters per degree of rectifying latitude
    g: f64,
    // Footpoint latitude corrections for sin 2σ, 4σ, 6σ, 8σ
    footpoint: [f64; 4],
}

impl TransverseMercator {
    /// Internal-only constructor that doesn't check the parameters
    pub(crate) fn from_parts(ellipsoid: Ellipsoid, params: ProjectionParams) -> TransverseMercator {
        let a = ellipsoid.a();
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n2 * n2;

        let g = a * (1. - n) * (1. - n2) * (1. + (9. * n2 / 4.) + (225. * n4 / 64.)) * (PI / 180.);

        let footpoint = [
            (3. * n / 2.) - (27. * n3 / 32.),
            (21. * n2 / 16.) - (55. * n4 / 32.),
            151. * n3 / 96.,
            1097. * n4 / 512.,
        ];

        Self {
            m0: ellipsoid.meridian_arc(params.origin_lat),
            ellipsoid,
            params,
            g,
            footpoint,
        }
    }

    /// Builds a projection for an arbitrary ellipsoid and grid definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any parameter is not finite,
    /// the scale factor is not positive, or the origin latitude is outside
    /// `(-90, 90)`.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::{Ellipsoid, ProjectionParams, TransverseMercator};
    ///
    /// let params = ProjectionParams { k: 0.0, ..ProjectionParams::SVY21 };
    /// assert!(TransverseMercator::new(Ellipsoid::wgs84(), params).is_err());
    ///
    /// let tm = TransverseMercator::new(Ellipsoid::wgs84(), ProjectionParams::SVY21).unwrap();
    /// assert_eq!(tm.params(), &ProjectionParams::SVY21);
    /// ```
    pub fn new(ellipsoid: Ellipsoid, params: ProjectionParams) -> Result<TransverseMercator, Error> {
        params.check()?;
        Ok(TransverseMercator::from_parts(ellipsoid, params))
    }

    /// The shared SVY21 projection on the WGS84 ellipsoid.
    pub fn svy21() -> &'static TransverseMercator {
        &SVY21
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Projects a latitude/longitude in degrees to `(northing, easting)` in
    /// meters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if the latitude is not strictly inside
    /// `(-90, 90)` or either value is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::TransverseMercator;
    ///
    /// let (n, e) = TransverseMercator::svy21().forward(1.366666, 103.833333).unwrap();
    /// assert!((n - 38744.572).abs() < 1e-3);
    /// assert!((e - 28001.642).abs() < 1e-3);
    ///
    /// assert!(TransverseMercator::svy21().forward(90.0, 103.8).is_err());
    /// ```
    pub fn forward(&self, lat: f64, lon: f64) -> Result<(f64, f64), Error> {
        if !(lat.abs() < f64::from(dms::QD)) {
            return Err(Error::Domain(format!("Latitude {lat} outside of range (-90, 90).")));
        }
        if !lon.is_finite() {
            return Err(Error::Domain(format!("Longitude {lon} is not finite.")));
        }

        Ok(self.project(lat, lon))
    }

    /// Forward series without the domain check.
    fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let ProjectionParams { origin_lon, false_northing, false_easting, k, .. } = self.params;

        let lat_r = lat.to_radians();
        let (sin_lat, cos_lat) = lat_r.sin_cos();
        let sin2_lat = sin_lat * sin_lat;
        let cos2_lat = cos_lat * cos_lat;
        let cos3_lat = cos2_lat * cos_lat;
        let cos4_lat = cos3_lat * cos_lat;
        let cos5_lat = cos4_lat * cos_lat;
        let cos6_lat = cos5_lat * cos_lat;
        let cos7_lat = cos6_lat * cos_lat;

        let rho = self.ellipsoid.rho(sin2_lat);
        let v = self.ellipsoid.v(sin2_lat);
        let psi = v / rho;
        let t = lat_r.tan();
        let w = (lon - origin_lon).ang_normalize().to_radians();

        let m = self.ellipsoid.meridian_arc(lat);

        let w2 = w * w;
        let w4 = w2 * w2;
        let w6 = w4 * w2;
        let w8 = w6 * w2;

        let psi2 = psi * psi;
        let psi3 = psi2 * psi;
        let psi4 = psi3 * psi;

        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t4 * t2;

        let n1 = w2 / 2. * v * sin_lat * cos_lat;
        let n2 = w4 / 24. * v * sin_lat * cos3_lat * (4. * psi2 + psi - t2);
        let n3 = w6 / 720. * v * sin_lat * cos5_lat
            * ((8. * psi4) * (11. - 24. * t2) - (28. * psi3) * (1. - 6. * t2) + psi2 * (1. - 32. * t2)
                - psi * 2. * t2
                + t4);
        let n4 = w8 / 40320. * v * sin_lat * cos7_lat * (1385. - 3111. * t2 + 543. * t4 - t6);
        let northing = false_northing + k * (m - self.m0 + n1 + n2 + n3 + n4);

        let e1 = w2 / 6. * cos2_lat * (psi - t2);
        let e2 = w4 / 120. * cos4_lat * ((4. * psi3) * (1. - 6. * t2) + psi2 * (1. + 8. * t2) - psi * 2. * t2 + t4);
        let e3 = w6 / 5040. * cos6_lat * (61. - 479. * t2 + 179. * t4 - t6);
        let easting = false_easting + k * v * w * cos_lat * (1. + e1 + e2 + e3);

        (northing, easting)
    }

    /// Footpoint latitude in radians: the latitude on the central meridian
    /// whose meridian distance is `m`.
    fn footpoint_latitude(&self, m: f64) -> f64 {
        let sigma = (m * PI) / (180. * self.g);
        let [f2, f4, f6, f8] = self.footpoint;

        sigma
            + f2 * (2. * sigma).sin()
            + f4 * (4. * sigma).sin()
            + f6 * (6. * sigma).sin()
            + f8 * (8. * sigma).sin()
    }

    /// Converts a `(northing, easting)` in meters back to `(latitude,
    /// longitude)` in degrees. Never fails; far outside the grid's working
    /// region the result is defined but no longer the inverse of
    /// [`forward`](Self::forward).
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::TransverseMercator;
    ///
    /// let (lat, lon) = TransverseMercator::svy21().inverse(48187.789, 27720.130);
    /// assert!((lat - 1.452_067_051_837_969_2).abs() < 1e-9);
    /// assert!((lon - 103.830_803_327_771_38).abs() < 1e-9);
    /// ```
    pub fn inverse(&self, northing: f64, easting: f64) -> (f64, f64) {
        let ProjectionParams { origin_lon, false_northing, false_easting, k, .. } = self.params;

        let n_prime = northing - false_northing;
        let m_prime = self.m0 + (n_prime / k);

        let lat_prime = self.footpoint_latitude(m_prime);
        let sin_lat_prime = lat_prime.sin();
        let sin2_lat_prime = sin_lat_prime * sin_lat_prime;

        let rho_prime = self.ellipsoid.rho(sin2_lat_prime);
        let v_prime = self.ellipsoid.v(sin2_lat_prime);
        let psi_prime = v_prime / rho_prime;
        let psi_prime2 = psi_prime * psi_prime;
        let psi_prime3 = psi_prime2 * psi_prime;
        let psi_prime4 = psi_prime3 * psi_prime;
        let t_prime = lat_prime.tan();
        let t_prime2 = t_prime * t_prime;
        let t_prime4 = t_prime2 * t_prime2;
        let t_prime6 = t_prime4 * t_prime2;

        let e_prime = easting - false_easting;
        let x = e_prime / (k * v_prime);
        let x2 = x * x;
        let x3 = x2 * x;
        let x5 = x3 * x2;
        let x7 = x5 * x2;

        let lat_factor = t_prime / (k * rho_prime);
        let lat1 = lat_factor * ((e_prime * x) / 2.);
        let lat2 = lat_factor * ((e_prime * x3) / 24.)
            * ((-4. * psi_prime2) + (9. * psi_prime) * (1. - t_prime2) + (12. * t_prime2));
        let lat3 = lat_factor * ((e_prime * x5) / 720.)
            * ((8. * psi_prime4) * (11. - 24. * t_prime2) - (12. * psi_prime3) * (21. - 71. * t_prime2)
                + (15. * psi_prime2) * (15. - 98. * t_prime2 + 15. * t_prime4)
                + (180. * psi_prime) * (5. * t_prime2 - 3. * t_prime4)
                + 360. * t_prime4);
        let lat4 = lat_factor * ((e_prime * x7) / 40320.)
            * (1385. - 3633. * t_prime2 + 4095. * t_prime4 + 1575. * t_prime6);
        let lat = lat_prime - lat1 + lat2 - lat3 + lat4;

        // sec is taken at the corrected latitude, not the footpoint
        let sec_lat = 1. / lat.cos();
        let lon1 = x * sec_lat;
        let lon2 = ((x3 * sec_lat) / 6.) * (psi_prime + 2. * t_prime2);
        let lon3 = ((x5 * sec_lat) / 120.)
            * ((-4. * psi_prime3) * (1. - 6. * t_prime2) + psi_prime2 * (9. - 68. * t_prime2)
                + 72. * psi_prime * t_prime2
                + 24. * t_prime4);
        let lon4 = ((x7 * sec_lat) / 5040.) * (61. + 662. * t_prime2 + 1320. * t_prime4 + 720. * t_prime6);
        let lon = origin_lon.to_radians() + lon1 - lon2 + lon3 - lon4;

        (lat.to_degrees(), lon.to_degrees().ang_normalize())
    }
}
