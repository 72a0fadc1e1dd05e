use crate::model::ticket::Ticket;

/// Normalize a free-text query: lower-case it, turn every character that is
/// not a letter or digit into a space, and collapse the result into single
/// spaces with no leading or trailing blanks.
///
/// The normalized form is what the search input displays after a search
/// runs, and normalizing is idempotent.
pub fn normalize_query(query: &str) -> String {
    let mapped: String = query
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a normalized query into its search words.
pub fn query_words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Build the search corpus for ticket content: letters and digits kept and
/// lower-cased, everything else dropped outright.
///
/// Note the asymmetry with [`normalize_query`]: the query maps punctuation
/// to spaces while the corpus removes it, so "well-known" searches as the
/// two words "well known" but indexes as "wellknown", and a two-word query
/// can match across word boundaries in the original text. Long-standing
/// behavior, kept as is.
pub fn corpus(content: &str) -> String {
    content
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a corpus matches any of the query words (substring containment,
/// OR across words).
pub fn matches_any(corpus: &str, words: &[&str]) -> bool {
    words.iter().any(|word| corpus.contains(word))
}

/// Run a query against a list of tickets.
///
/// Returns one flag per ticket, or `None` for an empty/blank query (the
/// "no emphasis anywhere" rendering state).
pub fn search(tickets: &[Ticket], query: &str) -> Option<Vec<bool>> {
    let normalized = normalize_query(query);
    let words = query_words(&normalized);
    if words.is_empty() {
        return None;
    }
    Some(
        tickets
            .iter()
            .map(|t| matches_any(&corpus(&t.content), &words))
            .collect(),
    )
}
