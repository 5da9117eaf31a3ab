use super::common::Coordinates;
use chrono::{DateTime, Utc};
pub use chrono_tz::Tz;
use log::*;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

static FINDER: OnceLock<DefaultFinder> = OnceLock::new();

fn get_finder() -> &'static DefaultFinder {
    FINDER.get_or_init(DefaultFinder::new)
}

pub fn get_timezone_name(coordinates: &Coordinates) -> String {
    get_finder().get_tz_name(coordinates.longitude, coordinates.latitude).to_string()
}

pub fn get_timezone(coordinates: &Coordinates) -> Option<Tz> {
    get_timezone_name(coordinates).parse().ok()
}

/// Current time on the local clock of the given place, or in UTC if its timezone is unknown.
pub fn now_at(coordinates: &Coordinates) -> DateTime<Tz> {
    let tz = get_timezone(coordinates).unwrap_or_else(|| {
        warn!("No timezone found for [lat: {}, lon: {}], falling back to UTC",
              coordinates.latitude, coordinates.longitude);
        Tz::UTC
    });

    Utc::now().with_timezone(&tz)
}
