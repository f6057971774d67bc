use crate::{constants::{WGS84_A, WGS84_F}, Error};

/// Coefficients of the truncated meridian arc series
/// `M(φ) = a (A0 φ − A2 sin 2φ + A4 sin 4φ − A6 sin 6φ)`.
///
/// Derived once from the eccentricity powers of an [`Ellipsoid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeridianSeries {
    pub(crate) a0: f64,
    pub(crate) a2: f64,
    pub(crate) a4: f64,
    pub(crate) a6: f64,
}

impl MeridianSeries {
    fn new(e2: f64, e4: f64, e6: f64) -> MeridianSeries {
        Self {
            a0: 1. - (e2 / 4.) - (3. * e4 / 64.) - (5. * e6 / 256.),
            a2: (3. / 8.) * (e2 + (e4 / 4.) + (15. * e6 / 128.)),
            a4: (15. / 256.) * (e4 + (3. * e6 / 4.)),
            a6: 35. * e6 / 3072.,
        }
    }

    /// Returns `(A0, A2, A4, A6)`.
    pub fn coefficients(&self) -> (f64, f64, f64, f64) {
        (self.a0, self.a2, self.a4, self.a6)
    }
}

/// Reference ellipsoid with its derived constants frozen at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
    b: f64,
    e2: f64,
    e4: f64,
    e6: f64,
    series: MeridianSeries,
}

impl Ellipsoid {
    /// Internal-only constructor that doesn't check `a` and `f`
    pub(crate) fn from_parts(a: f64, f: f64) -> Ellipsoid {
        let b = a * (1. - f);
        let e2 = (2. * f) - (f * f);
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        Self {
            a,
            f,
            b,
            e2,
            e4,
            e6,
            series: MeridianSeries::new(e2, e4, e6),
        }
    }

    /// Creates an ellipsoid from its semi-major axis (meters) and flattening.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `a` is not a positive finite
    /// number or `f` is outside `(0, 1)`.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::Ellipsoid;
    ///
    /// let grs80 = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
    /// assert!(grs80.is_ok());
    ///
    /// assert!(Ellipsoid::new(-1.0, 0.003).is_err());
    /// assert!(Ellipsoid::new(6_378_137.0, 1.0).is_err());
    /// ```
    pub fn new(a: f64, f: f64) -> Result<Ellipsoid, Error> {
        if !(a.is_finite() && a > 0.) {
            Err(Error::InvalidParameter(format!("Semi-major axis {a} must be positive.")))
        } else if !(f > 0. && f < 1.) {
            Err(Error::InvalidParameter(format!("Flattening {f} outside of valid range (0, 1).")))
        } else {
            Ok(Ellipsoid::from_parts(a, f))
        }
    }

    /// The WGS84 ellipsoid.
    pub fn wgs84() -> Ellipsoid {
        Ellipsoid::from_parts(WGS84_A, WGS84_F)
    }

    /// Semi-major axis in meters.
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Flattening.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Semi-minor axis in meters.
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// First eccentricity squared.
    #[inline]
    pub fn e2(&self) -> f64 {
        self.e2
    }

    pub fn e4(&self) -> f64 {
        self.e4
    }

    pub fn e6(&self) -> f64 {
        self.e6
    }

    pub fn series(&self) -> &MeridianSeries {
        &self.series
    }

    /// Third flattening `(a − b) / (a + b)`.
    pub fn third_flattening(&self) -> f64 {
        (self.a - self.b) / (self.a + self.b)
    }

    /// Length in meters of the meridian arc from the equator to `lat`
    /// (degrees).
    ///
    /// # Example
    ///
    /// ```
    /// use svy21::Ellipsoid;
    ///
    /// let wgs84 = Ellipsoid::wgs84();
    /// assert_eq!(wgs84.meridian_arc(0.0), 0.0);
    /// // One degree of latitude near the equator is a little under 111 km
    /// assert!((wgs84.meridian_arc(1.0) - 110_574.4).abs() < 1.0);
    /// ```
    pub fn meridian_arc(&self, lat: f64) -> f64 {
        let lat_r = lat.to_radians();
        let MeridianSeries { a0, a2, a4, a6 } = self.series;

        self.a * ((a0 * lat_r) - (a2 * (2. * lat_r).sin()) + (a4 * (4. * lat_r).sin())
            - (a6 * (6. * lat_r).sin()))
    }

    /// Meridional radius of curvature, taking `sin²φ` rather than `φ`.
    pub fn rho(&self, sin2_lat: f64) -> f64 {
        let num = self.a * (1. - self.e2);
        let denom = (1. - self.e2 * sin2_lat).powf(1.5);
        num / denom
    }

    /// Prime-vertical radius of curvature, taking `sin²φ` rather than `φ`.
    pub fn v(&self, sin2_lat: f64) -> f64 {
        let poly = 1. - self.e2 * sin2_lat;
        self.a / poly.sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Ellipsoid::wgs84()
    }
}
