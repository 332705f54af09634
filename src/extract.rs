//! Destination extraction from free-text queries
//!
//! Finds the place name a query talks about, e.g. "Barcelona" in
//! "What's the weather in Barcelona?". The result is only a candidate; the
//! geocoder decides whether it is a real place.

use crate::intent::is_keyword;

/// Words after which a destination usually follows
const ANCHORS: &[&str] = &[
    "in", "to", "at", "near", "around", "for", "from", "visit", "visiting", "about",
];

/// Lower-case words allowed between capitalised words of one name
const JOINERS: &[&str] = &["de", "del", "la", "le", "of", "upon", "am", "an", "da", "di"];

const STOP_WORDS: &[&str] = &[
    "a", "about", "and", "any", "are", "around", "at", "be", "best", "can", "could", "do",
    "does", "for", "from", "go", "going", "good", "how", "i", "i'm", "im", "in", "is", "it",
    "let", "like", "me", "my", "near", "next", "now", "of", "on", "or", "please", "should",
    "show", "some", "tell", "that", "the", "there", "this", "to", "today", "tomorrow",
    "tonight", "top", "we", "week", "weekend", "what", "whats", "when", "where", "which",
    "will", "with", "would", "you", "your", "need", "want", "an", "get", "there's", "s",
    "hey", "hi", "hello", "thanks", "things", "know", "check", "find", "give", "list",
];

/// Dates and times of day; "in July" or "on Monday" never name a destination
const DATE_WORDS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "spring", "summer", "autumn", "fall", "winter",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "morning",
    "afternoon", "evening", "night", "month", "year",
];

/// A word of the query with its original casing and trailing punctuation flag
#[derive(Debug)]
struct Word {
    text: String,
    lower: String,
    capitalised: bool,
    /// Punctuation (other than an apostrophe or hyphen) directly follows the word
    ends_clause: bool,
}

fn words(text: &str) -> Vec<Word> {
    text.split_whitespace()
        .filter_map(|raw| {
            let trimmed = raw.trim_matches(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’' || c == '-'));
            let trimmed = trimmed.trim_matches(|c: char| c == '\'' || c == '’' || c == '-');
            if trimmed.is_empty() {
                return None;
            }
            let stem = trimmed
                .strip_suffix("'s")
                .or_else(|| trimmed.strip_suffix("’s"))
                .unwrap_or(trimmed);
            let ends_clause = raw
                .chars()
                .last()
                .is_some_and(|c| !(c.is_alphanumeric() || c == '\'' || c == '’' || c == '-'));
            Some(Word {
                text: stem.to_string(),
                lower: stem.to_lowercase(),
                capitalised: stem.chars().next().is_some_and(char::is_uppercase),
                ends_clause,
            })
        })
        .collect()
}

fn is_boundary(word: &Word) -> bool {
    STOP_WORDS.contains(&word.lower.as_str())
        || DATE_WORDS.contains(&word.lower.as_str())
        || is_keyword(&word.lower)
}

/// Extract the most likely destination from a query
///
/// Tries, in order: a name following a preposition such as "in" or "to", the
/// longest run of capitalised words, and finally the query itself when only a
/// few non-filler words remain. Returns `None` when nothing plausible is left.
#[must_use]
pub fn extract_location(text: &str) -> Option<String> {
    let words = words(text);
    anchored(&words)
        .or_else(|| longest_capitalised_run(&words))
        .or_else(|| remainder(&words))
}

/// First name following an anchor; a capitalised name wins over an earlier
/// lower-case one, so "in june in Barcelona" still yields "Barcelona"
fn anchored(words: &[Word]) -> Option<String> {
    let mut lowercase = None;
    for (idx, word) in words.iter().enumerate() {
        if !ANCHORS.contains(&word.lower.as_str()) || word.ends_clause {
            continue;
        }

        let mut start = idx + 1;
        if words.get(start).is_some_and(|w| w.lower == "the" && !w.ends_clause) {
            start += 1;
        }
        let Some(first) = words.get(start) else {
            continue;
        };
        if is_boundary(first) {
            continue;
        }

        if first.capitalised {
            if let Some(name) = capitalised_run(&words[start..]) {
                return Some(name);
            }
        } else if lowercase.is_none() {
            lowercase = lowercase_run(&words[start..]);
        }
    }
    lowercase
}

/// Capitalised words from the start of `words`, with joiners in between
fn capitalised_run(words: &[Word]) -> Option<String> {
    let mut taken: Vec<&str> = Vec::new();
    let mut idx = 0;
    while let Some(word) = words.get(idx) {
        let joins_next = JOINERS.contains(&word.lower.as_str())
            && !taken.is_empty()
            && !words[idx - 1].ends_clause
            && !word.ends_clause
            && words.get(idx + 1).is_some_and(|next| next.capitalised);

        if joins_next || (word.capitalised && !is_boundary(word)) {
            taken.push(&word.text);
            if word.ends_clause {
                break;
            }
            idx += 1;
        } else {
            break;
        }
    }
    (!taken.is_empty()).then(|| taken.join(" "))
}

/// Up to three lower-case words until punctuation or a filler word
fn lowercase_run(words: &[Word]) -> Option<String> {
    let mut taken: Vec<&str> = Vec::new();
    for word in words.iter().take(3) {
        if is_boundary(word) {
            break;
        }
        taken.push(&word.text);
        if word.ends_clause {
            break;
        }
    }
    (!taken.is_empty()).then(|| taken.join(" "))
}

fn longest_capitalised_run(words: &[Word]) -> Option<String> {
    (0..words.len())
        .filter(|&idx| words[idx].capitalised && !is_boundary(&words[idx]))
        .filter_map(|idx| capitalised_run(&words[idx..]))
        .fold(None, |best: Option<String>, run| match best {
            Some(current) if current.split(' ').count() >= run.split(' ').count() => Some(current),
            _ => Some(run),
        })
}

fn remainder(words: &[Word]) -> Option<String> {
    let rest: Vec<&str> = words
        .iter()
        .filter(|word| !is_boundary(word))
        .map(|word| word.text.as_str())
        .collect();
    (!rest.is_empty() && rest.len() <= 4).then(|| rest.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("What's the weather in Barcelona?", "Barcelona")]
    #[case("I'm going to Rome, let's plan my trip", "Rome")]
    #[case("What's the temperature in Dubai and what can I visit?", "Dubai")]
    #[case("Things to do in New York City this weekend", "New York City")]
    #[case("weather in paris tomorrow", "paris")]
    #[case("Any attractions near Rio de Janeiro?", "Rio de Janeiro")]
    #[case("Planning a trip to the Hague", "Hague")]
    #[case("What should I see in Rome's old town", "Rome")]
    #[case("What's the weather in July in Barcelona?", "Barcelona")]
    #[case("How hot is it in summer in Rome?", "Rome")]
    #[case("Is it going to rain on Monday morning in Paris", "Paris")]
    #[case("weather at the Eiffel Tower", "Eiffel Tower")]
    #[case("sights around old town in Porto", "Porto")]
    fn test_anchored(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(extract_location(text).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("Paris", "Paris")]
    #[case("tokyo weather", "tokyo")]
    #[case("Lisbon museums please", "Lisbon")]
    #[case("Is Reykjavik cold?", "Reykjavik")]
    #[case("Mumbai", "Mumbai")]
    fn test_without_anchor(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(extract_location(text).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("what's the weather?")]
    #[case("what can I visit")]
    #[case("weather in July")]
    fn test_nothing_to_extract(#[case] text: &str) {
        assert_eq!(extract_location(text), None);
    }

    #[test]
    fn test_prefers_anchored_name_over_longer_run() {
        assert_eq!(
            extract_location("Hey Siri Assistant, weather in Bern").as_deref(),
            Some("Bern")
        );
    }
}
