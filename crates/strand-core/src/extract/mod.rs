//! Parameter extraction
//!
//! Fills a tool's parameter slots from free text. Each slot is classified
//! into a [`SlotKind`], then resolved by the kind's rule: a pattern table for
//! names, places and counts, or the date/time recognizers. A slot nothing
//! matches is left out; whether that matters is decided by
//! [`missing_required`].

pub mod dates;
pub mod places;
mod rules;
mod slot_kind;

use chrono::{Local, NaiveDate};
use regex::Regex;

pub use dates::StayDates;
pub use slot_kind::SlotKind;

use crate::tools::domain::{contains_any, LODGING};
use crate::types::{ArgValue, ExtractedArguments, ToolDescriptor};

/// Compile a hard-coded pattern
pub(crate) fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("hard-coded pattern must compile")
}

/// Rule-based slot filler
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterExtractor {
    /// Reference day for relative and year-less dates; the local date when unset
    today: Option<NaiveDate>,
}

impl ParameterExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference day
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Resolve as many of `tool`'s slots as the text allows
    pub fn extract(&self, text: &str, tool: &ToolDescriptor) -> ExtractedArguments {
        let lowered = text.to_lowercase();
        let today = self.today();
        let lodging = contains_any(&lowered, LODGING);
        let stay = StayDates::resolve(&lowered, today);

        let mut arguments = ExtractedArguments::new();
        for slot in &tool.parameter_schema.slots {
            let value = match SlotKind::classify(slot, lodging) {
                SlotKind::CheckinDate => stay.checkin.map(ArgValue::Date),
                SlotKind::CheckoutDate => stay.checkout.map(ArgValue::Date),
                SlotKind::Date => dates::single_date(&lowered, today).map(ArgValue::Date),
                SlotKind::TimeOfDay => dates::time_of_day(&lowered).map(ArgValue::Time),
                SlotKind::Unknown => None,
                kind => rules::rule_for(kind).and_then(|rule| rule.apply(text, &lowered)),
            };
            if let Some(value) = value {
                arguments.insert(slot.name.clone(), value);
            }
        }
        arguments
    }

    /// Fill slots from values already known by kind
    ///
    /// Used when a composite request has resolved its own fields and needs
    /// them laid onto whatever slot names a tool declares.
    pub fn bind(tool: &ToolDescriptor, values: &[(SlotKind, ArgValue)]) -> ExtractedArguments {
        let mut arguments = ExtractedArguments::new();
        for slot in &tool.parameter_schema.slots {
            let kind = SlotKind::classify(slot, true);
            if let Some((_, value)) = values.iter().find(|(k, _)| *k == kind) {
                arguments.insert(slot.name.clone(), value.clone());
            }
        }
        arguments
    }
}

/// Required slots of `tool` that `arguments` leaves unresolved, in schema order
pub fn missing_required(tool: &ToolDescriptor, arguments: &ExtractedArguments) -> Vec<String> {
    tool.parameter_schema
        .required_names()
        .filter(|name| !arguments.contains(name))
        .map(str::to_string)
        .collect()
}
