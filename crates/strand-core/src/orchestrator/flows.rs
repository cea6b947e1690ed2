//! Single-tool, multi-intent and round-trip flows

use chrono::NaiveDate;

use super::trip::{connection_for, TripPlan};
use super::Orchestrator;
use crate::extract::{missing_required, ParameterExtractor, SlotKind};
use crate::history::Tag;
use crate::tools::domain::{contains_any, Domain, HOTEL_SUBFLOW, TRAIN_SUBFLOW};
use crate::tools::{rank, RelevanceCandidate};
use crate::types::{ArgValue, ExtractedArguments, ToolDescriptor};
use crate::{log_debug, log_info};

const NO_RELEVANT_TOOL: &str = "I couldn't find any relevant tools for your request. \
     Available capabilities include greeting, calculations, and train information.";

const MULTI_INTENT_UNRESOLVED: &str = "I found multiple intents in your request but couldn't extract \
     all required parameters. Please try asking for trains and hotels separately.";

const TRIP_UNRESOLVED: &str = "I couldn't extract all the necessary information for your round trip. \
     Please provide: departure city, destination city, outbound date, and return date.";

/// Response text and what happened while producing it
pub(super) type Reply = (String, Vec<Tag>);

fn join_sections(sections: &[String]) -> String {
    sections.join(&format!("\n\n{}\n\n", "=".repeat(60)))
}

fn missing_notice(missing: Vec<String>) -> String {
    format!("Missing required information: {}", missing.join(", "))
}

impl Orchestrator {
    pub(super) async fn single_tool(&self, text: &str) -> Reply {
        let Some(best) = self.shortlist(text).into_iter().next() else {
            log_info!(self.logger, "[Orchestrator] No relevant tool");
            return (NO_RELEVANT_TOOL.to_string(), Vec::new());
        };
        log_info!(
            self.logger,
            "[Orchestrator] Selected {} (score {})",
            best.tool.qualified_name,
            best.score
        );

        let arguments = self.extractor.extract(text, &best.tool);
        let mut tags = Vec::new();
        let response = match self.resolve(&best.tool, arguments, &mut tags).await {
            Ok(output) => output,
            Err(missing) => format!("I need more information. Please provide: {}", missing.join(", ")),
        };
        (response, tags)
    }

    /// Train section, then hotel section, each resolved on its own
    pub(super) async fn multi_intent(&self, text: &str) -> Reply {
        let lowered = text.to_lowercase();
        let subflows = [
            (Domain::Train, TRAIN_SUBFLOW, "TRAIN OPTIONS"),
            (Domain::Hotel, HOTEL_SUBFLOW, "HOTEL OPTIONS"),
        ];

        let mut sections = Vec::new();
        let mut tags = Vec::new();
        for (domain, triggers, heading) in subflows {
            if !contains_any(&lowered, triggers) {
                continue;
            }
            let Some(tool) = self.best_in(text, domain) else {
                log_info!(self.logger, "[Orchestrator] No {:?} tool for combined request", domain);
                continue;
            };

            let arguments = self.extractor.extract(text, &tool);
            let body = match self.resolve(&tool, arguments, &mut tags).await {
                Ok(output) => output,
                Err(missing) => missing_notice(missing),
            };
            sections.push(format!("{}:\n{}", heading, body));
        }

        if sections.is_empty() {
            return (MULTI_INTENT_UNRESOLVED.to_string(), tags);
        }
        (join_sections(&sections), tags)
    }

    /// Outbound leg, connection, return leg and stay, in that order
    pub(super) async fn round_trip(&self, text: &str) -> Reply {
        let plan = TripPlan::resolve(text, self.extractor.today());
        log_debug!(self.logger, "[Orchestrator] Trip plan: {:?}", plan);

        let (Some(origin), Some(destination), Some(outbound)) =
            (plan.origin.as_deref(), plan.destination.as_deref(), plan.outbound)
        else {
            return (TRIP_UNRESOLVED.to_string(), Vec::new());
        };

        // With a known connection the train legs stop at the interchange
        let connection = connection_for(origin, destination);
        let far_end = connection.map_or(destination, |c| c.interchange);

        let mut tags = Vec::new();
        let mut sections = vec![
            self.train_leg("OUTBOUND JOURNEY", origin, far_end, outbound, &mut tags)
                .await,
        ];
        if let Some(connection) = connection {
            sections.push(format!("CONNECTION:\n{}", connection.hint()));
        }
        if let Some(inbound) = plan.inbound {
            sections.push(
                self.train_leg("RETURN JOURNEY", far_end, origin, inbound, &mut tags)
                    .await,
            );
            if contains_any(&text.to_lowercase(), HOTEL_SUBFLOW) {
                sections.push(self.stay(text, destination, outbound, inbound, &mut tags).await);
            }
        }

        (join_sections(&sections), tags)
    }

    async fn train_leg(
        &self,
        heading: &str,
        from: &str,
        to: &str,
        date: NaiveDate,
        tags: &mut Vec<Tag>,
    ) -> String {
        let title = format!("{} ({}):\n{} → {}", heading, date, from, to);
        let query = format!("Find trains from {} to {} on {}", from, to, date);
        let Some(tool) = self.best_in(&query, Domain::Train) else {
            return format!("{}\nNo train search tool is available.", title);
        };

        let arguments = ParameterExtractor::bind(
            &tool,
            &[
                (SlotKind::DepartureStation, ArgValue::text(from)),
                (SlotKind::ArrivalStation, ArgValue::text(to)),
                (SlotKind::Station, ArgValue::text(from)),
                (SlotKind::Date, ArgValue::Date(date)),
            ],
        );
        let body = self
            .resolve(&tool, arguments, tags)
            .await
            .unwrap_or_else(missing_notice);
        format!("{}\n{}", title, body)
    }

    async fn stay(
        &self,
        text: &str,
        city: &str,
        checkin: NaiveDate,
        checkout: NaiveDate,
        tags: &mut Vec<Tag>,
    ) -> String {
        let body = match self.best_in(text, Domain::Hotel) {
            Some(tool) => {
                let arguments = ParameterExtractor::bind(
                    &tool,
                    &[
                        (SlotKind::Location, ArgValue::text(city)),
                        (SlotKind::Destination, ArgValue::text(city)),
                        (SlotKind::CheckinDate, ArgValue::Date(checkin)),
                        (SlotKind::CheckoutDate, ArgValue::Date(checkout)),
                        (SlotKind::GuestCount, ArgValue::Integer(1)),
                    ],
                );
                self.resolve(&tool, arguments, tags)
                    .await
                    .unwrap_or_else(missing_notice)
            }
            None => "No hotel search tool is available.".to_string(),
        };
        format!("ACCOMMODATION:\n{}", body)
    }

    fn shortlist(&self, text: &str) -> Vec<RelevanceCandidate> {
        let candidates = rank(&self.registry.all(), text, self.settings.max_candidates);
        log_debug!(
            self.logger,
            "[Orchestrator] Candidates for {:?}: {}",
            text,
            candidates
                .iter()
                .map(|c| format!("{}={}", c.tool.qualified_name, c.score))
                .collect::<Vec<_>>()
                .join(", ")
        );
        candidates
    }

    /// Best-ranked tool of one domain
    fn best_in(&self, text: &str, domain: Domain) -> Option<ToolDescriptor> {
        self.shortlist(text)
            .into_iter()
            .find(|c| c.is_in(domain))
            .map(|c| c.tool)
    }

    /// Check required slots, then call the tool
    ///
    /// Missing slot names come back as the error.
    async fn resolve(
        &self,
        tool: &ToolDescriptor,
        arguments: ExtractedArguments,
        tags: &mut Vec<Tag>,
    ) -> Result<String, Vec<String>> {
        let missing = missing_required(tool, &arguments);
        if !missing.is_empty() {
            log_info!(
                self.logger,
                "[Orchestrator] {} needs {}",
                tool.qualified_name,
                missing.join(", ")
            );
            tags.push(Tag::MissingParams(missing.clone()));
            return Err(missing);
        }

        let output = self.invoke(tool, &arguments).await;
        tags.push(Tag::ToolUsed {
            name: tool.qualified_name.clone(),
            arguments,
        });
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::{MockAdapter, MockMode};
    use crate::config::Settings;
    use crate::logging::NoOpLogger;
    use crate::types::{ParameterSchema, ParameterSlot, SlotType};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn greeter() -> MockAdapter {
        MockAdapter::new(
            "greeter",
            vec![
                ToolDescriptor::new(
                    "greeter",
                    "greet",
                    "Greets a person by their name.",
                    ParameterSchema::new(vec![ParameterSlot::new(
                        "name",
                        SlotType::String,
                        "The name of the person to greet",
                    )
                    .required()]),
                ),
                ToolDescriptor::new(
                    "greeter",
                    "calculate",
                    "Performs basic arithmetic calculations.",
                    ParameterSchema::new(vec![ParameterSlot::new(
                        "expression",
                        SlotType::String,
                        "Mathematical expression to evaluate (e.g., '2 + 3 * 4')",
                    )
                    .required()]),
                ),
            ],
        )
    }

    fn trains() -> MockAdapter {
        MockAdapter::new(
            "real_trainline",
            vec![ToolDescriptor::new(
                "real_trainline",
                "search_live_trains",
                "Search for live train times and prices between two UK stations.",
                ParameterSchema::new(vec![
                    ParameterSlot::new("from_station", SlotType::String, "Departure station code or name").required(),
                    ParameterSlot::new("to_station", SlotType::String, "Arrival station code or name").required(),
                    ParameterSlot::new("date", SlotType::String, "Travel date in YYYY-MM-DD format").required(),
                    ParameterSlot::new("time", SlotType::String, "Departure time in HH:MM format (optional)"),
                ]),
            )
            .with_live(true)],
        )
    }

    fn hotels() -> MockAdapter {
        MockAdapter::new(
            "multi_hotels",
            vec![ToolDescriptor::new(
                "multi_hotels",
                "search_hotels_multi",
                "Search for hotels using multiple real APIs with fallback options.",
                ParameterSchema::new(vec![
                    ParameterSlot::new("location", SlotType::String, "City or area to search").required(),
                    ParameterSlot::new("checkin", SlotType::String, "Check-in date (YYYY-MM-DD)").required(),
                    ParameterSlot::new("checkout", SlotType::String, "Check-out date (YYYY-MM-DD)").required(),
                    ParameterSlot::new("guests", SlotType::Integer, "Number of guests"),
                ]),
            )],
        )
    }

    async fn build(adapters: &[Arc<MockAdapter>]) -> Orchestrator {
        let mut orchestrator = Orchestrator::new(Settings::default(), Arc::new(NoOpLogger::new()))
            .with_extractor(ParameterExtractor::with_today(day(2026, 10, 19)));
        for adapter in adapters {
            orchestrator.add_provider(adapter.clone()).await.unwrap();
        }
        orchestrator
    }

    #[tokio::test]
    async fn test_single_tool_greeting() {
        let greeter = Arc::new(greeter());
        let mut orchestrator = build(&[greeter.clone(), Arc::new(trains()), Arc::new(hotels())]).await;

        let response = orchestrator.process_request("Hello, my name is Alice").await;
        assert_eq!(response, "greet {name=Alice}");
        assert_eq!(greeter.call_count(), 1);

        let history = orchestrator.history().entries();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].payload, "Hello, my name is Alice");
        assert_eq!(
            history[1].tags,
            vec![Tag::ToolUsed {
                name: "greeter.greet".into(),
                arguments: ExtractedArguments::new().with("name", "Alice"),
            }]
        );
    }

    #[tokio::test]
    async fn test_single_tool_calculation() {
        let mut orchestrator = build(&[Arc::new(greeter())]).await;
        let response = orchestrator.process_request("Calculate 15 * 7 + 3").await;
        assert_eq!(response, "calculate {expression=15 * 7 + 3}");
    }

    #[tokio::test]
    async fn test_no_relevant_tool() {
        let greeter = Arc::new(greeter());
        let mut orchestrator = build(&[greeter.clone(), Arc::new(hotels())]).await;

        let response = orchestrator.process_request("Tell me a joke").await;
        assert_eq!(response, NO_RELEVANT_TOOL);
        assert_eq!(greeter.call_count(), 0);
        assert!(orchestrator.history().entries()[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameters_skip_the_call() {
        let trains = Arc::new(trains());
        let mut orchestrator = build(&[trains.clone()]).await;

        let response = orchestrator.process_request("Find trains to York").await;
        assert_eq!(response, "I need more information. Please provide: from_station, date");
        assert_eq!(trains.call_count(), 0);
        assert_eq!(
            orchestrator.history().entries()[1].tags,
            vec![Tag::MissingParams(vec!["from_station".into(), "date".into()])]
        );
    }

    #[tokio::test]
    async fn test_overlong_stay_asks_for_checkout() {
        let hotels = Arc::new(hotels());
        let mut orchestrator = build(&[hotels.clone()]).await;

        let response = orchestrator
            .process_request("Find hotels in Bath on 2026-11-01 for 999999999 nights")
            .await;
        assert_eq!(response, "I need more information. Please provide: checkout");
        assert_eq!(hotels.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_and_transport_failure_are_rendered() {
        let trains = Arc::new(trains().with_mode(MockMode::RpcError {
            code: -32601,
            message: "Unknown tool".into(),
        }));
        let mut orchestrator = build(&[trains]).await;
        let response = orchestrator
            .process_request("Find trains from Leeds to York on 2026-11-02")
            .await;
        assert_eq!(response, "Error: Unknown tool");

        let mut orchestrator = build(&[Arc::new(trains_failing())]).await;
        let response = orchestrator
            .process_request("Find trains from Leeds to York on 2026-11-02")
            .await;
        assert_eq!(
            response,
            "Failed to execute real_trainline.search_live_trains: real_trainline unavailable: connection reset"
        );
    }

    fn trains_failing() -> MockAdapter {
        trains().with_mode(MockMode::TransportFailure("connection reset".into()))
    }

    #[tokio::test]
    async fn test_multi_intent_sections_resolve_independently() {
        let trains = Arc::new(trains());
        let hotels = Arc::new(hotels());
        let mut orchestrator = build(&[trains.clone(), hotels.clone()]).await;

        let response = orchestrator
            .process_request("I need a train from Harrogate to Skipton on 2026-11-02 and a hotel")
            .await;

        let (train, hotel) = response.split_once(&"=".repeat(60)).unwrap();
        assert_eq!(
            train.trim(),
            "TRAIN OPTIONS:\nsearch_live_trains {from_station=Harrogate, to_station=Skipton, date=2026-11-02}"
        );
        assert_eq!(hotel.trim(), "HOTEL OPTIONS:\nMissing required information: location");
        assert_eq!(trains.call_count(), 1);
        assert_eq!(hotels.call_count(), 0);

        let tags = &orchestrator.history().entries()[1].tags;
        assert_eq!(tags[0], Tag::MultiIntent);
        assert!(matches!(&tags[1], Tag::ToolUsed { name, .. } if name == "real_trainline.search_live_trains"));
        assert_eq!(tags[2], Tag::MissingParams(vec!["location".into()]));
    }

    #[tokio::test]
    async fn test_round_trip_via_connection() {
        let trains = Arc::new(trains());
        let hotels = Arc::new(hotels());
        let mut orchestrator = build(&[Arc::new(greeter()), trains.clone(), hotels.clone()]).await;

        let response = orchestrator
            .process_request(
                "Plan a trip from Leeds to East Croydon on 15/12/2025 returning 17/12/2025, and book a hotel",
            )
            .await;

        let order: Vec<usize> = [
            "OUTBOUND JOURNEY (2025-12-15):\nLeeds → London Kings Cross",
            "CONNECTION:\nLondon Kings Cross → East Croydon",
            "RETURN JOURNEY (2025-12-17):\nLondon Kings Cross → Leeds",
            "ACCOMMODATION:",
        ]
        .iter()
        .map(|heading| response.find(heading).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", response);

        let legs = trains.calls();
        assert_eq!(legs.len(), 2);
        assert_eq!(
            legs[0].arguments,
            ExtractedArguments::new()
                .with("from_station", "Leeds")
                .with("to_station", "London Kings Cross")
                .with("date", day(2025, 12, 15))
        );
        assert_eq!(legs[1].arguments.get("from_station"), Some(&ArgValue::text("London Kings Cross")));
        assert_eq!(legs[1].arguments.get("to_station"), Some(&ArgValue::text("Leeds")));

        assert_eq!(
            hotels.calls()[0].arguments,
            ExtractedArguments::new()
                .with("location", "East Croydon")
                .with("checkin", day(2025, 12, 15))
                .with("checkout", day(2025, 12, 17))
                .with("guests", 1i64)
        );

        let tags = &orchestrator.history().entries()[1].tags;
        assert_eq!(tags[0], Tag::RoundTrip);
        assert_eq!(tags.len(), 4);
    }

    #[tokio::test]
    async fn test_round_trip_without_connection_or_hotel() {
        let trains = Arc::new(trains());
        let hotels = Arc::new(hotels());
        let mut orchestrator = build(&[trains.clone(), hotels.clone()]).await;

        let response = orchestrator
            .process_request("Return trip from York to Bath on 2026-11-02 returning 2026-11-04")
            .await;
        assert!(response.contains("OUTBOUND JOURNEY (2026-11-02):\nYork → Bath"));
        assert!(response.contains("RETURN JOURNEY (2026-11-04):\nBath → York"));
        assert!(!response.contains("CONNECTION:"));
        assert!(!response.contains("ACCOMMODATION:"));
        assert_eq!(trains.call_count(), 2);
        assert_eq!(hotels.call_count(), 0);
    }

    #[tokio::test]
    async fn test_round_trip_needs_cities_and_outbound_date() {
        let trains = Arc::new(trains());
        let mut orchestrator = build(&[trains.clone()]).await;

        let response = orchestrator.process_request("Plan a round trip to Paris").await;
        assert_eq!(response, TRIP_UNRESOLVED);
        assert_eq!(trains.call_count(), 0);
    }

    #[tokio::test]
    async fn test_round_trip_degrades_per_section() {
        let hotels = Arc::new(hotels());
        let mut orchestrator = build(&[Arc::new(trains_failing()), hotels.clone()]).await;

        let response = orchestrator
            .process_request(
                "Plan a trip from Leeds to East Croydon on 15/12/2025 returning 17/12/2025, and book a hotel",
            )
            .await;
        assert_eq!(response.matches("real_trainline unavailable: connection reset").count(), 2);
        assert!(response.contains("CONNECTION:"));
        assert!(response.contains("ACCOMMODATION:\nsearch_hotels_multi {location=East Croydon"));
        assert_eq!(hotels.call_count(), 1);
    }
}
