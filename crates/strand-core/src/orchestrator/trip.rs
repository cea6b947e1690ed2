//! Round-trip request resolution and connection policy

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::dates::{date_at, find_dates};
use crate::extract::pattern;
use crate::extract::places::clean_place;

static CITIES: Lazy<Regex> = Lazy::new(|| {
    pattern(
        r"(?i)\bfrom\s+([a-zA-Z\s]+?)\s+to\s+([a-zA-Z\s]+?)(?:\s+(?:on|for|returning|return|and|with)\b|\s*[,.?!;]|\s*$)",
    )
});
static RETURN_MARKER: Lazy<Regex> = Lazy::new(|| pattern(r"\breturn(?:ing)?\s+(?:on\s+)?"));

/// The four fields of a round-trip request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripPlan {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub outbound: Option<NaiveDate>,
    pub inbound: Option<NaiveDate>,
}

impl TripPlan {
    /// Resolve what the request states
    ///
    /// The return date is the one after "return"/"returning", else the second
    /// date mentioned; the outbound date is the first other date.
    pub fn resolve(text: &str, today: NaiveDate) -> Self {
        let lowered = text.to_lowercase();
        let dates = find_dates(&lowered, today);

        let marked_return = RETURN_MARKER.find_iter(&lowered).find_map(|m| {
            date_at(&lowered, m.end(), today).map(|date| (m.end(), date))
        });
        let (inbound_at, inbound) = match marked_return {
            Some((at, date)) => (Some(at), Some(date)),
            None => match dates.get(1) {
                Some((at, date)) => (Some(*at), Some(*date)),
                None => (None, None),
            },
        };
        let outbound = dates
            .iter()
            .find(|(at, _)| Some(*at) != inbound_at)
            .map(|(_, date)| *date);

        let (origin, destination) = match CITIES.captures(text) {
            Some(caps) => (clean_place(&caps[1]), clean_place(&caps[2])),
            None => (None, None),
        };

        Self {
            origin,
            destination,
            outbound,
            inbound,
        }
    }
}

/// A fixed change of trains between two cities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    origin: &'static str,
    destination: &'static str,
    /// Station the train legs end and start at
    pub interchange: &'static str,
    route: &'static str,
    steps: &'static [&'static str],
}

impl Connection {
    /// Onward travel from the interchange, one step per line
    pub fn hint(&self) -> String {
        let mut hint = self.route.to_string();
        for step in self.steps {
            hint.push_str("\n• ");
            hint.push_str(step);
        }
        hint
    }
}

const CONNECTIONS: &[Connection] = &[Connection {
    origin: "leeds",
    destination: "croydon",
    interchange: "London Kings Cross",
    route: "London Kings Cross → East Croydon",
    steps: &[
        "Take Northern line to London Bridge",
        "Change to Southern Rail to East Croydon",
        "Journey time: 45-60 minutes",
    ],
}];

/// Connection for a city pair, if one is known
pub fn connection_for(origin: &str, destination: &str) -> Option<&'static Connection> {
    let origin = origin.to_lowercase();
    let destination = destination.to_lowercase();
    CONNECTIONS
        .iter()
        .find(|c| origin.contains(c.origin) && destination.contains(c.destination))
}
