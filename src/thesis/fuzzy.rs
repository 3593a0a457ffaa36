//! Typo-tolerant name matching, used when a student is removed by a partial
//! or misspelled name.

/// `"  Иванов   Иван "` -> `"Иванов Иван"`.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if `query` is within `max_edits` Levenshtein edits of the whole
/// `candidate` or of any single word of it. Case-insensitive, whitespace
/// normalized.
pub fn fuzzy_matches(query: &str, candidate: &str, max_edits: usize) -> bool {
    let query = clean_text(query).to_lowercase();
    let candidate = clean_text(candidate).to_lowercase();
    if query.is_empty() {
        return false;
    }

    if strsim::levenshtein(&candidate, &query) <= max_edits {
        return true;
    }

    candidate
        .split(' ')
        .any(|part| strsim::levenshtein(part, &query) <= max_edits)
}
