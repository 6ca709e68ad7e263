//! Visible-region math for the map view.

use newcomer_core::Location;

/// Smallest span used when fitting, so a single marker is not zoomed in to a
/// point.
const MIN_DELTA: f64 = 0.01;

/// Span used when centring on the user's own position.
const USER_DELTA: f64 = 0.1;

/// A map viewport: centre plus latitude/longitude span in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Whole-country view shown before anything is loaded.
    pub const CANADA: Region = Region {
        latitude: 56.1304,
        longitude: -106.3468,
        latitude_delta: 30.0,
        longitude_delta: 30.0,
    };

    /// Close-up around a single coordinate, e.g. the user's position.
    #[must_use]
    pub fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            latitude_delta: USER_DELTA,
            longitude_delta: USER_DELTA,
        }
    }

    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (latitude - self.latitude).abs() <= self.latitude_delta / 2.0
            && (longitude - self.longitude).abs() <= self.longitude_delta / 2.0
    }
}

/// Smallest region containing every location, grown by `padding` (a fraction
/// of the span added on each side).
///
/// Returns `None` when there are no locations with finite coordinates.
#[must_use]
pub fn fit_region<'a, I>(locations: I, padding: f64) -> Option<Region>
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut points = locations
        .into_iter()
        .filter(|l| l.lat.is_finite() && l.lng.is_finite())
        .map(|l| (l.lat, l.lng));

    let (lat, lng) = points.next()?;
    let (mut min_lat, mut max_lat, mut min_lng, mut max_lng) = (lat, lat, lng, lng);
    for (lat, lng) in points {
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
        min_lng = min_lng.min(lng);
        max_lng = max_lng.max(lng);
    }

    let grow = 1.0 + 2.0 * padding.max(0.0);
    Some(Region {
        latitude: (min_lat + max_lat) / 2.0,
        longitude: (min_lng + max_lng) / 2.0,
        latitude_delta: ((max_lat - min_lat) * grow).max(MIN_DELTA),
        longitude_delta: ((max_lng - min_lng) * grow).max(MIN_DELTA),
    })
}
