use std::collections::BTreeSet;

/// Index tokens for `text`, lowercased: every whitespace-delimited word as
/// written (punctuation kept, so `one-to-one` and `c++` survive) plus every
/// alphanumeric run inside it (`one`, `to`, `c`). No stemming.
pub fn tokenize_text(text: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for word in words(text) {
        tokens.extend(
            word.split(|c: char| !c.is_alphanumeric())
                .filter(|run| !run.is_empty())
                .map(str::to_string),
        );
        tokens.insert(word);
    }
    tokens
}

/// Query terms: lowercased whitespace-separated words in first-seen order
/// with repeats removed. Punctuation is part of the term.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    words(query)
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}
