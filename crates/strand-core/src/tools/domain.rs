//! Keyword domains shared by the relevance engine and the intent classifier
//!
//! All matching is case-insensitive substring search over literal text.

use crate::types::ToolDescriptor;

/// A request/tool domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Train,
    Hotel,
    Greeting,
    Arithmetic,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Train, Domain::Hotel, Domain::Greeting, Domain::Arithmetic];

    /// Words in a request that point at this domain
    pub fn request_keywords(self) -> &'static [&'static str] {
        match self {
            Domain::Train => &[
                "train", "railway", "station", "journey", "travel", "departure", "arrival", "ticket", "rail",
            ],
            Domain::Hotel => &[
                "hotel", "accommodation", "stay", "room", "booking", "checkin", "checkout", "lodge", "resort",
            ],
            Domain::Greeting => &["hello", "hi", "greet", "welcome", "name"],
            Domain::Arithmetic => &["calculate", "math", "add", "subtract", "multiply", "divide", "equation"],
        }
    }

    /// Fragments of a tool description that place the tool in this domain
    pub fn description_markers(self) -> &'static [&'static str] {
        match self {
            Domain::Train => &["train", "station"],
            Domain::Hotel => &["hotel", "accommodation"],
            Domain::Greeting => &["greet"],
            Domain::Arithmetic => &["calculat", "arithmetic"],
        }
    }

    pub fn matches_request(self, lowered_text: &str) -> bool {
        contains_any(lowered_text, self.request_keywords())
    }

    pub fn describes(self, tool: &ToolDescriptor) -> bool {
        contains_any(&tool.description.to_lowercase(), self.description_markers())
    }
}

/// Train words used to detect a combined train + hotel request
pub const MULTI_INTENT_TRAIN: &[&str] = &["train", "railway", "station", "departure", "arrival", "catch", "travel"];

/// Hotel words used to detect a combined train + hotel request
pub const MULTI_INTENT_HOTEL: &[&str] = &["hotel", "stay", "accommodation", "travelodge", "premier inn", "room"];

/// Words that start the train sub-flow of a combined request
pub const TRAIN_SUBFLOW: &[&str] = &["train", "from", "to", "departure", "catch"];

/// Words that start a hotel sub-flow (combined and round-trip requests)
pub const HOTEL_SUBFLOW: &[&str] = &["hotel", "stay", "accommodation", "travelodge"];

/// Mentions of lodging; location slots are only filled when one is present
pub const LODGING: &[&str] = &["hotel", "accommodation", "stay", "travelodge"];

pub fn contains_any(lowered_text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lowered_text.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterSchema;

    fn tool(description: &str) -> ToolDescriptor {
        ToolDescriptor::new("p", "t", description, ParameterSchema::default())
    }

    #[test]
    fn test_description_markers() {
        assert!(Domain::Train.describes(&tool("Search for live train times and prices between two UK stations.")));
        assert!(Domain::Train.describes(&tool("Get live departure board for a specific station.")));
        assert!(Domain::Hotel.describes(&tool("Search for hotels using multiple real APIs with fallback options.")));
        assert!(Domain::Arithmetic.describes(&tool("Performs basic arithmetic calculations.")));
        assert!(Domain::Greeting.describes(&tool("Greets a person by their name.")));
        assert!(!Domain::Hotel.describes(&tool("Search for live train times")));
    }

    #[test]
    fn test_request_keywords_are_substrings() {
        assert!(Domain::Train.matches_request("find trains from leeds"));
        assert!(Domain::Hotel.matches_request("somewhere to stay"));
        assert!(!Domain::Arithmetic.matches_request("find trains from leeds"));
    }
}
