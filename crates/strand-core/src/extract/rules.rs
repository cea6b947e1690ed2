//! Pattern table for text-valued slot kinds
//!
//! Each kind has an ordered list of patterns, most specific first. Patterns
//! run case-insensitively over the raw request; the first capture that
//! survives normalization wins. Place kinds may also fall back to a list of
//! well-known names.

use once_cell::sync::Lazy;
use regex::Regex;

use super::pattern;
use super::places::{clean_place, longest_known, normalize_whitespace, title_case, DESTINATIONS, UK_STATIONS};
use super::slot_kind::SlotKind;
use crate::types::ArgValue;

/// Ends a place name: a joining word, punctuation or the end of the text
const END: &str = r"(?:\s+(?:on|at|after|and|for|with|station)\b|\s*[,.?!;]|\s*$)";

/// How a capture becomes a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Normalize {
    /// Title-cased single word or phrase
    Title,
    /// Whitespace-normalized, trailing noise removed, title-cased
    Place,
    /// Whitespace-normalized, trailing punctuation removed
    Expression,
    /// Positive integer
    Count,
}

pub(crate) struct Rule {
    pub kind: SlotKind,
    patterns: Vec<Regex>,
    normalize: Normalize,
    fallback: &'static [&'static str],
}

impl Rule {
    fn new(kind: SlotKind, normalize: Normalize, patterns: &[&str]) -> Self {
        Self {
            kind,
            patterns: patterns
                .iter()
                .map(|p| pattern(&format!("(?i){}", p.replace("{END}", END))))
                .collect(),
            normalize,
            fallback: &[],
        }
    }

    fn with_fallback(mut self, known: &'static [&'static str]) -> Self {
        self.fallback = known;
        self
    }

    /// Resolve a value from the request, if any
    pub fn apply(&self, text: &str, lowered: &str) -> Option<ArgValue> {
        self.patterns
            .iter()
            .filter_map(|re| re.captures(text))
            .find_map(|caps| caps.get(1).and_then(|m| self.normalize(m.as_str())))
            .or_else(|| longest_known(lowered, self.fallback).map(|place| ArgValue::Text(title_case(place))))
    }

    fn normalize(&self, raw: &str) -> Option<ArgValue> {
        match self.normalize {
            Normalize::Title => {
                let value = normalize_whitespace(raw);
                (!value.is_empty()).then(|| ArgValue::Text(title_case(&value)))
            }
            Normalize::Place => clean_place(raw).map(ArgValue::Text),
            Normalize::Expression => {
                let value = normalize_whitespace(raw.trim_end_matches(['?', '!', ',', ';']));
                value
                    .chars()
                    .any(|c| c.is_ascii_digit())
                    .then_some(ArgValue::Text(value))
            }
            Normalize::Count => raw.parse::<i64>().ok().filter(|n| *n > 0).map(ArgValue::Integer),
        }
    }
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use Normalize::*;
    use SlotKind::*;

    let lodging_place = [
        r"\bhotels?\s+in\s+([a-zA-Z\s]+?){END}",
        r"\baccommodation\s+in\s+([a-zA-Z\s]+?){END}",
        r"\bstay\s+in\s+([a-zA-Z\s]+?){END}",
        r"\bstay\s+at\s+\w+\s+in\s+([a-zA-Z\s]+?){END}",
        r"\btravelodge\s+in\s+([a-zA-Z\s]+?){END}",
    ];
    let mut location = lodging_place.to_vec();
    location.extend([
        r"\bbook\s+([a-zA-Z\s]+?)(?:\s+hotel\b|{END})",
        r"\bin\s+([a-zA-Z\s]+?)(?:\s+hotel\b|{END})",
    ]);

    vec![
        Rule::new(
            PersonName,
            Title,
            &[
                r"\bmy name is (\w+)",
                r"\bi'm (\w+)",
                r"\bcall me (\w+)",
                r"\bgreet (\w+)",
                r"\bhello (\w+)",
            ],
        ),
        Rule::new(MathExpression, Expression, &[r"\bcalculate\s+(.+)$", r"([\d(][\d+\-*/().\s]*)"]),
        Rule::new(
            DepartureStation,
            Place,
            &[
                r"\bfrom\s+([a-zA-Z\s]+?)\s+(?:to|for|at)\b",
                r"\bbetween\s+([a-zA-Z\s]+?)\s+and\b",
            ],
        ),
        Rule::new(
            ArrivalStation,
            Place,
            &[
                r"\bfor\s+([a-zA-Z\s\-]+?)(?:\s+and\b|\s+want\b|\s*[,.?!;]|\s*$)",
                r"\bfrom\s+[a-zA-Z\s]+?\s+to\s+([a-zA-Z\s]+?){END}",
                r"\bbetween\s+[a-zA-Z\s]+?\s+and\s+([a-zA-Z\s]+?){END}",
                r"\bto\s+([a-zA-Z\s]+?){END}",
            ],
        ),
        Rule::new(
            Station,
            Place,
            &[
                r"\bfrom\s+([a-zA-Z\s]+?)(?:\s+to\b|{END})",
                r"\bto\s+([a-zA-Z\s]+?){END}",
            ],
        )
        .with_fallback(UK_STATIONS),
        Rule::new(Destination, Place, &lodging_place).with_fallback(DESTINATIONS),
        Rule::new(Location, Place, &location).with_fallback(DESTINATIONS),
        Rule::new(
            HotelName,
            Title,
            &[
                r"\bthe\s+(\w+(?:\s+\w+)*?)\s+hotel\b",
                r"\bhotel\s+(\w+(?:\s+\w+)*)",
                r"(\w+)\s+hotel\b",
            ],
        ),
        Rule::new(
            GuestCount,
            Count,
            &[r"(\d+)\s+guests?\b", r"\bfor\s+(\d+)\s+people\b", r"(\d+)\s+people\b"],
        ),
        Rule::new(RoomCount, Count, &[r"(\d+)\s+rooms?\b"]),
    ]
});

pub(crate) fn rule_for(kind: SlotKind) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.kind == kind)
}
