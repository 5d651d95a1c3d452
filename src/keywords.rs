//! Heuristic keyword construction from public storefront metadata.
//!
//! When no catalog access is available, a keyword string is inferred from
//! the title, genres, and description: tokens are extracted, filtered,
//! scored (title matches weigh most, genre matches next), and packed
//! comma-separated into a character budget.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::itunes::ItunesApp;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9\-']+").expect("valid pattern"));

/// Generic storefront vocabulary that never helps ranking.
const STOP_WORDS: &[&str] = &[
    "app",
    "apps",
    "application",
    "applications",
    "iphone",
    "ipad",
    "ios",
    "free",
    "best",
    "new",
    "pro",
    "lite",
    "hd",
];

const TITLE_WEIGHT: i64 = 4;
const GENRE_WEIGHT: i64 = 2;

/// Build a comma-separated keyword string within `char_limit` characters,
/// or `None` when no usable terms exist.
pub fn build_keywords(item: &ItunesApp, char_limit: usize) -> Option<String> {
    let title = item.track_name.as_deref().unwrap_or("").to_lowercase();
    let genres: Vec<String> = item.genres.iter().map(|g| g.to_lowercase()).collect();
    let terms = extract_terms(item);

    let mut scores: HashMap<&str, i64> = HashMap::new();
    for term in &terms {
        let mut score = 1;
        if title.contains(term.as_str()) {
            score += TITLE_WEIGHT;
        }
        if genres.iter().any(|g| g.contains(term.as_str())) {
            score += GENRE_WEIGHT;
        }
        *scores.entry(term.as_str()).or_insert(0) += score;
    }

    // Score descending, then alphabetical for a stable order.
    let mut ranked: Vec<(&str, i64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    // Terms that do not fit are skipped, not terminal: a shorter term later
    // in the ranking may still close the remaining gap.
    let mut parts: Vec<&str> = Vec::new();
    let mut length = 0usize;
    for (term, _) in ranked {
        let added = term.len() + usize::from(!parts.is_empty());
        if length + added > char_limit {
            continue;
        }
        parts.push(term);
        length += added;
        if length >= char_limit {
            break;
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

/// Lowercased tokens from title, description, and genres, in that order,
/// de-duplicated and stripped of digits and stop words.
fn extract_terms(item: &ItunesApp) -> Vec<String> {
    let title = item.track_name.as_deref().unwrap_or("").to_lowercase();
    let description = item.description.as_deref().unwrap_or("").to_lowercase();

    let mut raw: Vec<String> = Vec::new();
    for text in [title.as_str(), description.as_str()] {
        raw.extend(TOKEN_RE.find_iter(text).map(|m| m.as_str().to_string()));
    }
    for genre in &item.genres {
        let lowered = genre.to_lowercase();
        raw.extend(TOKEN_RE.find_iter(&lowered).map(|m| m.as_str().to_string()));
    }

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for term in raw {
        if term.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if STOP_WORDS.contains(&term.as_str()) {
            continue;
        }
        if seen.insert(term.clone()) {
            terms.push(term);
        }
    }
    terms
}
