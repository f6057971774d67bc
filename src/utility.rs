#[allow(dead_code)]
pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
}

pub(crate) trait GeoMath {
    fn eps_eq(&self, other: Self) -> bool;
    fn remainder(&self, denom: Self) -> Self;
    fn ang_normalize(&self) -> Self;
}

impl GeoMath for f64 {
    fn eps_eq(&self, other: f64) -> bool {
        (*self - other).abs() < f64::EPSILON
    }

    fn remainder(&self, denom: Self) -> Self {
        *self - (*self / denom).round() * denom
    }

    /// Reduce an angle in degrees to `[-180, 180]`, keeping the sign of the
    /// input at the half-turn boundary.
    fn ang_normalize(&self) -> f64 {
        let value = self.remainder(f64::from(dms::TD));
        let hd = f64::from(dms::HD);

        if value.abs().eps_eq(hd) {
            hd.copysign(*self)
        }
        else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeoMath;

    #[test]
    fn normalize_is_identity_near_zero() {
        for value in [0.0, 0.023_617, -0.105_389, 103.856_950_349_764_67, -179.5] {
            assert_eq!(value.ang_normalize(), value);
        }
    }

    #[test]
    fn normalize_wraps_full_turns() {
        assert!((463.833_333_f64.ang_normalize() - 103.833_333).abs() < 1e-9);
        assert!(((-256.166_667_f64).ang_normalize() - 103.833_333).abs() < 1e-9);
        assert_eq!(180_f64.ang_normalize(), 180.0);
        assert_eq!((-180_f64).ang_normalize(), -180.0);
    }
}
