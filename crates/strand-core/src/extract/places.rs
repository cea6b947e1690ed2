//! Place-name cleanup and well-known place lists

/// Stations tried when no station pattern matches
pub const UK_STATIONS: &[&str] = &[
    "london", "manchester", "birmingham", "liverpool", "edinburgh", "glasgow", "bristol", "leeds",
    "sheffield", "newcastle", "cardiff", "nottingham", "oxford", "cambridge", "brighton", "croydon",
    "east croydon", "south croydon", "west croydon",
];

/// Cities tried when no destination or location pattern matches
pub const DESTINATIONS: &[&str] = &[
    "london", "paris", "berlin", "rome", "madrid", "amsterdam", "barcelona", "vienna", "prague",
    "budapest", "manchester", "birmingham", "edinburgh", "glasgow", "bristol", "leeds", "croydon",
    "east croydon", "south croydon", "new york", "tokyo", "sydney", "dubai", "singapore", "brighton",
    "cambridge", "oxford", "nottingham", "sheffield", "cardiff",
];

/// Words that trail a place name in a request but are not part of it
const TRAILING_NOISE: &[&str] = &[
    "today", "tonight", "tomorrow", "next", "week", "please", "morning", "afternoon", "evening",
];

/// Collapse runs of whitespace into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize each word (and each hyphen-separated part), lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = c.is_whitespace() || c == '-';
        }
    }
    out
}

/// Normalize a captured place name
///
/// Returns `None` when nothing is left after trimming.
pub fn clean_place(raw: &str) -> Option<String> {
    let mut words: Vec<&str> = raw.split_whitespace().collect();
    while let Some(last) = words.last() {
        if TRAILING_NOISE.contains(&last.to_lowercase().as_str()) {
            words.pop();
        } else {
            break;
        }
    }
    if words.is_empty() {
        return None;
    }
    Some(title_case(&words.join(" ")))
}

/// Longest entry of `known` that appears as a whole word sequence in the text
///
/// Ties go to the entry listed first.
pub fn longest_known(lowered_text: &str, known: &[&'static str]) -> Option<&'static str> {
    let mut best: Option<&'static str> = None;
    for &place in known {
        if contains_phrase(lowered_text, place) && best.map_or(true, |b| place.len() > b.len()) {
            best = Some(place);
        }
    }
    best
}

/// `phrase` occurs with no letter or digit directly on either side
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
    })
}
