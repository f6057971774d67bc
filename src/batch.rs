//! Row-parallel conversion of many coordinates at once.
//!
//! Every row is independent, so the work is split across the `rayon` thread
//! pool with no coordination. Output order always matches input order.

use rayon::prelude::*;

use crate::{latlon::LatLon, projections::transverse_mercator::TransverseMercator, svy21::Svy21, Error};

impl TransverseMercator {
    /// Projects every point of `coords`.
    ///
    /// # Errors
    ///
    /// Returns the [`Error::Domain`] of the first point (lowest index) that
    /// cannot be projected.
    ///
    /// # Usage
    ///
    /// ```
    /// use svy21::{LatLon, TransverseMercator};
    ///
    /// let points = [
    ///     LatLon::create(1.366666, 103.833333).unwrap(),
    ///     LatLon::create(1.3699278977737488, 103.85695034976466).unwrap(),
    /// ];
    ///
    /// let projected = TransverseMercator::svy21().forward_batch(&points).unwrap();
    ///
    /// assert_eq!(projected.len(), 2);
    /// assert!((projected[1].northing() - 39105.269).abs() < 1e-3);
    /// ```
    pub fn forward_batch(&self, coords: &[LatLon]) -> Result<Vec<Svy21>, Error> {
        // Sequential collect keeps the lowest-index error
        let projected: Vec<Result<Svy21, Error>> = coords
            .par_iter()
            .map(|coord| coord.project_with(self))
            .collect();

        projected.into_iter().collect()
    }

    /// Inverse-projects every point of `coords`.
    ///
    /// # Errors
    ///
    /// Returns the [`Error::Domain`] of the first point (lowest index) that
    /// lies too far from the grid origin to give a valid latitude.
    pub fn inverse_batch(&self, coords: &[Svy21]) -> Result<Vec<LatLon>, Error> {
        let unprojected: Vec<Result<LatLon, Error>> = coords
            .par_iter()
            .map(|coord| coord.unproject_with(self))
            .collect();

        unprojected.into_iter().collect()
    }
}
