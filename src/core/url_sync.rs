//! Import of calculator selections from a shared booking link.
//!
//! The booking form reads `service`, `rooms`, `bathrooms` and `frequency`
//! once when it opens. Missing or unparseable parameters are skipped and the
//! field keeps its default. Later edits are never written back to the link;
//! [`booking_link`] is an explicit export used by the calculator preview.

use crate::core::configuration::{BookingChange, Configuration};
use crate::core::validator::{MAX_BATHROOMS, MAX_ROOMS, MIN_BATHROOMS, MIN_ROOMS};
use std::collections::HashSet;
use url::form_urlencoded;
use url::Url;

pub const BOOKING_PATH: &str = "/booking";

pub const SERVICE_PARAM: &str = "service";
pub const ROOMS_PARAM: &str = "rooms";
pub const BATHROOMS_PARAM: &str = "bathrooms";
pub const FREQUENCY_PARAM: &str = "frequency";

/// Counts outside the form's range are treated like any other malformed value.
fn parse_count(value: &str, min: u32, max: u32) -> Option<u32> {
    value
        .parse()
        .ok()
        .filter(|count| (min..=max).contains(count))
}

fn parse_param(key: &str, value: &str) -> Option<BookingChange> {
    let value = value.trim();
    match key {
        SERVICE_PARAM => value.parse().ok().map(BookingChange::ServiceType),
        ROOMS_PARAM => parse_count(value, MIN_ROOMS, MAX_ROOMS).map(BookingChange::Rooms),
        BATHROOMS_PARAM => {
            parse_count(value, MIN_BATHROOMS, MAX_BATHROOMS).map(BookingChange::Bathrooms)
        }
        FREQUENCY_PARAM => value.parse().ok().map(BookingChange::Frequency),
        _ => None,
    }
}

/// Extracts the recognised selections from a query string (with or without
/// the leading `?`). When a parameter repeats, its first value wins.
pub fn changes_from_query(query: &str) -> Vec<BookingChange> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut seen = HashSet::new();
    let mut changes = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !seen.insert(key.to_string()) {
            continue;
        }

        match parse_param(&key, &value) {
            Some(change) => changes.push(change),
            None => tracing::debug!("Ignoring query parameter {}={:?}", key, value),
        }
    }

    changes
}

/// Applies the query's selections and returns how many fields were set.
pub fn import_query(configuration: &mut Configuration, query: &str) -> usize {
    let changes = changes_from_query(query);
    let applied = changes.len();
    configuration.apply_all(changes);
    applied
}

pub fn import_url(configuration: &mut Configuration, url: &Url) -> usize {
    import_query(configuration, url.query().unwrap_or(""))
}

pub fn configuration_from_query(query: &str) -> Configuration {
    let mut configuration = Configuration::default();
    import_query(&mut configuration, query);
    configuration
}

/// Accepts a full URL, a relative link like `/booking?rooms=2`, or a bare
/// query string.
pub fn configuration_from_link(link: &str) -> Configuration {
    match Url::parse(link) {
        Ok(url) => {
            let mut configuration = Configuration::default();
            import_url(&mut configuration, &url);
            configuration
        }
        Err(_) => {
            let query = link.split_once('?').map_or(link, |(_, query)| query);
            configuration_from_query(query)
        }
    }
}

/// Query string carrying the pricing selections of `configuration`.
pub fn selection_query(configuration: &Configuration) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(SERVICE_PARAM, configuration.service_type().as_str())
        .append_pair(ROOMS_PARAM, &configuration.rooms().to_string())
        .append_pair(BATHROOMS_PARAM, &configuration.bathrooms().to_string())
        .append_pair(FREQUENCY_PARAM, configuration.frequency().as_str())
        .finish()
}

/// Relative link that opens the booking form with these selections.
pub fn booking_link(configuration: &Configuration) -> String {
    format!("{}?{}", BOOKING_PATH, selection_query(configuration))
}
