//! Request classification
//!
//! Round trips are checked before combined train + hotel requests because
//! round-trip phrasing usually mentions both domains too.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::pattern;
use crate::tools::domain::{contains_any, MULTI_INTENT_HOTEL, MULTI_INTENT_TRAIN};

const ROUND_TRIP_PHRASES: &[&str] = &["round trip", "return", "returning", "complete trip"];

static PLAN_TRIP: Lazy<Regex> = Lazy::new(|| pattern(r"\bplan\b.*\btrip"));

/// Route chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RoundTrip,
    MultiIntent,
    SingleTool,
}

impl Intent {
    pub fn classify(text: &str) -> Self {
        if is_round_trip(text) {
            Intent::RoundTrip
        } else if is_multi_intent(text) {
            Intent::MultiIntent
        } else {
            Intent::SingleTool
        }
    }
}

pub fn is_round_trip(text: &str) -> bool {
    let lowered = text.to_lowercase();
    contains_any(&lowered, ROUND_TRIP_PHRASES) || PLAN_TRIP.is_match(&lowered)
}

/// Both a train word and a hotel word are present
pub fn is_multi_intent(text: &str) -> bool {
    let lowered = text.to_lowercase();
    contains_any(&lowered, MULTI_INTENT_TRAIN) && contains_any(&lowered, MULTI_INTENT_HOTEL)
}
