//! Relevance scoring
//!
//! Scores every registered tool against a request and returns a short,
//! deterministic ranking. Scoring is purely lexical:
//!
//! | signal                                              | points |
//! |-----------------------------------------------------|--------|
//! | request and description share a domain              | +10 each |
//! | description mentions live/real data (domain match)  | +15    |
//! | train request, live train tool                      | +20    |
//! | train request, other train tool                     | +5     |
//! | word shared by request and description              | +2 each |
//!
//! A tool whose description places it in some domain scores 0 unless the
//! request matches one of its domains.

use std::collections::HashSet;

use super::domain::Domain;
use crate::types::ToolDescriptor;

const DOMAIN_POINTS: u32 = 10;
const FRESHNESS_POINTS: u32 = 15;
const LIVE_TRAIN_POINTS: u32 = 20;
const TRAIN_POINTS: u32 = 5;
const WORD_POINTS: u32 = 2;

/// A tool with its score for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceCandidate {
    pub tool: ToolDescriptor,
    pub score: u32,
}

impl RelevanceCandidate {
    pub fn is_in(&self, domain: Domain) -> bool {
        domain.describes(&self.tool)
    }
}

/// Score one tool against an already lowercased request
pub fn score(tool: &ToolDescriptor, lowered_text: &str) -> u32 {
    let description = tool.description.to_lowercase();
    let tool_domains: Vec<Domain> = Domain::ALL.into_iter().filter(|d| d.describes(tool)).collect();
    let hits = tool_domains.iter().filter(|d| d.matches_request(lowered_text)).count() as u32;

    if !tool_domains.is_empty() && hits == 0 {
        return 0;
    }

    let mut total = hits * DOMAIN_POINTS;

    if hits > 0 && (description.contains("live") || description.contains("real")) {
        total += FRESHNESS_POINTS;
    }

    if Domain::Train.matches_request(lowered_text) && tool_domains.contains(&Domain::Train) {
        total += if tool.live { LIVE_TRAIN_POINTS } else { TRAIN_POINTS };
    }

    let request_words = words(lowered_text);
    let description_words = words(&description);
    total += request_words.intersection(&description_words).count() as u32 * WORD_POINTS;

    total
}

/// Rank `tools` for `text`, best first, keeping at most `limit`
///
/// Zero scores are dropped. Ties keep the order of `tools`.
pub fn rank(tools: &[ToolDescriptor], text: &str, limit: usize) -> Vec<RelevanceCandidate> {
    let lowered = text.to_lowercase();
    let mut candidates: Vec<RelevanceCandidate> = tools
        .iter()
        .filter_map(|tool| {
            let points = score(tool, &lowered);
            (points > 0).then(|| RelevanceCandidate {
                tool: tool.clone(),
                score: points,
            })
        })
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(limit);
    candidates
}

/// Whitespace tokens with surrounding punctuation removed
fn words(text: &str) -> HashSet<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSchema;

    fn tool(provider: &str, name: &str, description: &str) -> ToolDescriptor {
        ToolDescriptor::new(provider, name, description, ParameterSchema::default())
    }

    fn catalogue() -> Vec<ToolDescriptor> {
        vec![
            tool("greeter", "greet", "Greets a person by their name."),
            tool("greeter", "calculate", "Performs basic arithmetic calculations."),
            tool("greeter", "get_time", "Gets the current date and time."),
            tool("trainline", "search_trains", "Search for train times between two stations."),
            tool("real_trainline", "search_live_trains", "Search for live train times and prices between two UK stations.")
                .with_live(true),
            tool("real_trainline", "get_live_departures", "Get live departure board for a specific station.").with_live(true),
            tool("multi_hotels", "search_hotels_multi", "Search for hotels using multiple real APIs with fallback options."),
            tool("hotels", "search_hotels", "Search for hotel accommodation in a city."),
        ]
    }

    #[test]
    fn test_train_request_leaves_hotels_at_zero() {
        let tools = catalogue();
        let text = "search for trains from leeds to london";
        for hotel in tools.iter().filter(|t| Domain::Hotel.describes(t)) {
            assert_eq!(score(hotel, text), 0, "{}", hotel.qualified_name);
        }

        let ranked = rank(&tools, text, 5);
        assert!(ranked.iter().all(|c| !c.is_in(Domain::Hotel)));
        assert_eq!(ranked[0].tool.qualified_name, "real_trainline.search_live_trains");
    }

    #[test]
    fn test_live_train_tool_outranks_demo() {
        let tools = catalogue();
        let live = score(&tools[4], "train to york");
        let demo = score(&tools[3], "train to york");
        assert!(live > demo);
        // domain + freshness + live bonus + "train"
        assert_eq!(live, 10 + 15 + 20 + 2);
        assert_eq!(demo, 10 + 5 + 2);
    }

    #[test]
    fn test_greeting_and_math() {
        let tools = catalogue();
        let ranked = rank(&tools, "Hello, my name is Alice", 5);
        assert_eq!(ranked[0].tool.qualified_name, "greeter.greet");

        let ranked = rank(&tools, "Calculate 15 * 7 + 3", 5);
        assert_eq!(ranked[0].tool.qualified_name, "greeter.calculate");
    }

    #[test]
    fn test_unrelated_text_matches_nothing() {
        assert!(rank(&catalogue(), "zzz qqq", 5).is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic_and_bounded() {
        let tools = catalogue();
        let text = "find a train and a hotel for my journey, real time please";
        let first = rank(&tools, text, 5);
        for _ in 0..10 {
            assert_eq!(rank(&tools, text, 5), first);
        }
        assert!(first.len() <= 5);
        assert!(first.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let tools = vec![
            tool("a", "one", "Greets people."),
            tool("b", "two", "Greets people."),
        ];
        let ranked = rank(&tools, "greet me", 5);
        assert_eq!(ranked[0].tool.qualified_name, "a.one");
        assert_eq!(ranked[1].tool.qualified_name, "b.two");
    }
}
