use approx::assert_abs_diff_eq;
use svy21::{LatLon, Svy21, TransverseMercator};

/// (name, northing, easting, latitude, longitude)
const REFERENCE_POINTS: [(&str, f64, f64, f64, f64); 5] = [
    ("SVY21 reference point", 38744.572, 28001.642, 1.366666, 103.833333),
    ("Corner of Ang Mo Kio 66kV Substation", 39105.269, 30629.967, 1.3699278977737488, 103.85695034976466),
    ("Corner of Jurong Lake Canal 400kV Cable Bridge", 36307.704, 16272.970, 1.3446255443241177, 103.72794378041792),
    ("Corner of Sembawang 66kV Substation", 48187.789, 27720.130, 1.4520670518379692, 103.83080332777138),
    ("Kent Ridge", 30811.26429645264, 21362.157043860374, 1.2949192688485278, 103.77367436885834),
];

#[test]
fn reference_points_to_latlon() {
    for (name, northing, easting, lat, lon) in REFERENCE_POINTS {
        let coord = Svy21::create(northing, easting).unwrap().to_latlon().unwrap();
        assert!((coord.latitude() - lat).abs() < 1e-9, "{name}: latitude {}", coord.latitude());
        assert!((coord.longitude() - lon).abs() < 1e-9, "{name}: longitude {}", coord.longitude());
    }
}

#[test]
fn reference_points_to_svy21() {
    for (name, northing, easting, lat, lon) in REFERENCE_POINTS {
        let coord = LatLon::create(lat, lon).unwrap().to_svy21().unwrap();
        assert!((coord.northing() - northing).abs() < 1e-3, "{name}: northing {}", coord.northing());
        assert!((coord.easting() - easting).abs() < 1e-3, "{name}: easting {}", coord.easting());
    }
}

#[test]
fn round_trip_over_working_region() {
    let tm = TransverseMercator::svy21();
    let mut worst = 0_f64;

    for i in 0..=60 {
        for j in 0..=50 {
            let lat = 1.0 + 0.01 * f64::from(i);
            let lon = 103.6 + 0.01 * f64::from(j);

            let (n, e) = tm.forward(lat, lon).unwrap();
            let (lat2, lon2) = tm.inverse(n, e);

            worst = worst.max((lat2 - lat).abs()).max((lon2 - lon).abs());
        }
    }

    assert!(worst < 1e-7, "worst round-trip error {worst} degrees");
}

#[test]
fn round_trip_from_grid() {
    let tm = TransverseMercator::svy21();

    for northing in (0..=50_000).step_by(5_000) {
        for easting in (5_000..=50_000).step_by(5_000) {
            let (n, e) = (f64::from(northing), f64::from(easting));
            let (lat, lon) = tm.inverse(n, e);
            let (n2, e2) = tm.forward(lat, lon).unwrap();

            // sub-millimeter
            assert_abs_diff_eq!(n2, n, epsilon = 1e-3);
            assert_abs_diff_eq!(e2, e, epsilon = 1e-3);
        }
    }
}

#[test]
fn round_trip_distance_is_sub_centimeter() {
    for (_, northing, easting, _, _) in REFERENCE_POINTS {
        let coord = Svy21::create(northing, easting).unwrap().to_latlon().unwrap();
        let back = coord.to_svy21().unwrap().to_latlon().unwrap();
        assert!(coord.haversine(&back) < 1e-2);
    }
}

#[test]
fn easting_increases_with_longitude() {
    let tm = TransverseMercator::svy21();

    for lat in [1.0, 1.2, 1.4, 1.6] {
        let eastings: Vec<f64> = (0..=50)
            .map(|j| tm.forward(lat, 103.6 + 0.01 * f64::from(j)).unwrap().1)
            .collect();
        assert!(eastings.windows(2).all(|w| w[1] > w[0]), "easting not monotonic at latitude {lat}");
    }
}

#[test]
fn northing_increases_with_latitude() {
    let tm = TransverseMercator::svy21();

    for lon in [103.6, 103.85, 104.1] {
        let northings: Vec<f64> = (0..=60)
            .map(|i| tm.forward(1.0 + 0.01 * f64::from(i), lon).unwrap().0)
            .collect();
        assert!(northings.windows(2).all(|w| w[1] > w[0]), "northing not monotonic at longitude {lon}");
    }
}

#[test]
fn transverse_radius_exceeds_meridional_radius() {
    let wgs84 = TransverseMercator::svy21().ellipsoid();

    for tenth in 0..900 {
        let sin2 = (f64::from(tenth) / 10.).to_radians().sin().powi(2);
        assert!(wgs84.v(sin2) >= wgs84.rho(sin2));
    }
}

#[test]
fn conversions_are_deterministic() {
    let tm = TransverseMercator::svy21();

    for (_, northing, easting, lat, lon) in REFERENCE_POINTS {
        let first = tm.forward(lat, lon).unwrap();
        let second = tm.forward(lat, lon).unwrap();
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1.to_bits(), second.1.to_bits());

        let first = tm.inverse(northing, easting);
        let second = tm.inverse(northing, easting);
        assert_eq!(first.0.to_bits(), second.0.to_bits());
        assert_eq!(first.1.to_bits(), second.1.to_bits());
    }
}

#[test]
fn shared_projection_across_threads() {
    let handles: Vec<_> = REFERENCE_POINTS
        .iter()
        .map(|&(_, northing, easting, _, _)| {
            std::thread::spawn(move || TransverseMercator::svy21().inverse(northing, easting))
        })
        .collect();

    for (handle, (_, northing, easting, _, _)) in handles.into_iter().zip(REFERENCE_POINTS) {
        assert_eq!(handle.join().unwrap(), TransverseMercator::svy21().inverse(northing, easting));
    }
}
