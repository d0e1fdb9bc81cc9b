//! Catalog search: substring matching plus additive relevance ranking
//!
//! Two stages over the in-memory catalog: a match predicate decides which
//! products are candidates at all, then an additive score orders them. The
//! catalog is tens of items, so a linear scan per keystroke is fine.

use crate::models::Product;

/// Queries shorter than this are "not searching yet", not "no results"
const MIN_QUERY_LEN: usize = 2;
/// Hard cap on returned results
const MAX_RESULTS: usize = 8;

/// Ranking weights, highest-priority signal first
const WEIGHT_EXACT_NAME: u32 = 100;
const WEIGHT_NAME_PREFIX: u32 = 50;
const WEIGHT_NAME_CONTAINS: u32 = 30;
const WEIGHT_CATEGORY: u32 = 25;
const WEIGHT_WORD_PAIR: u32 = 10;
const WEIGHT_DESCRIPTION: u32 = 5;
const WEIGHT_ATTRIBUTE: u32 = 5;

/// Search the catalog, best matches first, capped at 8
///
/// Ties keep their catalog order (the sort is stable), so two products with
/// the same score come back in the order the retailer listed them.
pub fn search<'a>(query: &str, catalog: &'a [Product]) -> Vec<&'a Product> {
    search_scored(query, catalog)
        .into_iter()
        .map(|(product, _)| product)
        .collect()
}

/// Same as [`search`] but keeps the relevance score alongside each hit
pub fn search_scored<'a>(query: &str, catalog: &'a [Product]) -> Vec<(&'a Product, u32)> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut scored: Vec<(&Product, u32)> = catalog
        .iter()
        .filter(|product| matches(&query, product))
        .map(|product| (product, relevance_score(&query, product)))
        .collect();

    scored.sort_by_key(|(_, score)| std::cmp::Reverse(*score));
    scored.truncate(MAX_RESULTS);
    scored
}

/// Match predicate: does this product belong in the result set at all?
///
/// AND semantics across query terms, OR semantics across fields, plus a
/// bidirectional partial word match against the name as a last resort.
pub fn matches(query_lower: &str, product: &Product) -> bool {
    let name = product.name.to_lowercase();

    if all_terms_match(query_lower, &name) {
        return true;
    }
    if all_terms_match(query_lower, &product.short_description.to_lowercase()) {
        return true;
    }
    if all_terms_match(query_lower, &product.category_name().to_lowercase()) {
        return true;
    }
    if product
        .application_types
        .iter()
        .any(|a| all_terms_match(query_lower, &a.to_lowercase()))
    {
        return true;
    }
    if product
        .color_temperatures
        .iter()
        .any(|c| all_terms_match(query_lower, &c.to_lowercase()))
    {
        return true;
    }

    // Fallback: any query word partially matching any name word, either way
    // round. Deliberately broad; short words cast a wide net.
    query_lower
        .split_whitespace()
        .any(|q_word| name.split_whitespace().any(|n_word| word_pair(q_word, n_word)))
}

/// Additive relevance score, no normalization
///
/// A long query matching many fields can outscore a short exact match;
/// that is the documented trade-off, keep it that way.
pub fn relevance_score(query_lower: &str, product: &Product) -> u32 {
    let name = product.name.to_lowercase();
    let description = product.short_description.to_lowercase();
    let category = product.category_name().to_lowercase();

    let mut score = 0;

    if name == query_lower {
        score += WEIGHT_EXACT_NAME;
    }
    if name.starts_with(query_lower) {
        score += WEIGHT_NAME_PREFIX;
    }
    if name.contains(query_lower) {
        score += WEIGHT_NAME_CONTAINS;
    }
    if category.contains(query_lower) {
        score += WEIGHT_CATEGORY;
    }

    for q_word in query_lower.split_whitespace() {
        for n_word in name.split_whitespace() {
            if word_pair(q_word, n_word) {
                score += WEIGHT_WORD_PAIR;
            }
        }
    }

    if description.contains(query_lower) {
        score += WEIGHT_DESCRIPTION;
    }
    for app in &product.application_types {
        if app.to_lowercase().contains(query_lower) {
            score += WEIGHT_ATTRIBUTE;
        }
    }
    for temp in &product.color_temperatures {
        if temp.to_lowercase().contains(query_lower) {
            score += WEIGHT_ATTRIBUTE;
        }
    }

    score
}

/// Every whitespace-delimited query term is a substring of the text
fn all_terms_match(query_lower: &str, text_lower: &str) -> bool {
    let mut terms = query_lower.split_whitespace().peekable();
    if terms.peek().is_none() {
        return false;
    }
    terms.all(|term| text_lower.contains(term))
}

/// Bidirectional partial word match: either word contains the other
fn word_pair(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}
